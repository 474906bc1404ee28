use super::money::Money;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque catalog identifier for a product.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductRef(String);

impl ProductRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductRef {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ProductRef {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A catalog record as seen by the cart engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductRef,
    pub name: String,
    pub cost: Money,
}

impl Product {
    pub fn new(id: impl Into<ProductRef>, name: impl Into<String>, cost: Money) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            cost,
        }
    }
}

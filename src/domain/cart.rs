use super::money::{Money, Quantity};
use super::product::{Product, ProductRef};
use crate::error::{CartError, PRODUCT_ALREADY_IN_CART, PRODUCT_NOT_IN_CART};
use serde::{Deserialize, Serialize};

/// One product in a cart, with the price frozen at the moment it was added.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub product: ProductRef,
    pub quantity: Quantity,
    /// Catalog cost captured at add time. Never refreshed afterwards.
    pub price: Money,
}

impl LineItem {
    pub fn from_product(product: &Product, quantity: Quantity) -> Self {
        Self {
            product: product.id.clone(),
            quantity,
            price: product.cost,
        }
    }

    pub fn line_total(&self) -> Result<Money, CartError> {
        self.price.checked_mul(self.quantity)
    }
}

/// A user's cart, keyed by the owner's email.
///
/// Product refs are unique within `items` and insertion order is kept. All
/// mutators validate before touching `items`, so a failed call leaves the cart
/// exactly as it was. The total of a cart built through the mutators always
/// fits in a `Money`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    pub owner: String,
    pub items: Vec<LineItem>,
}

impl Cart {
    pub fn new(owner: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            items: Vec::new(),
        }
    }

    fn position(&self, product: &ProductRef) -> Option<usize> {
        self.items.iter().position(|item| &item.product == product)
    }

    pub fn contains(&self, product: &ProductRef) -> bool {
        self.position(product).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Appends a new line item. Duplicates are rejected, never merged.
    pub fn add_line(&mut self, item: LineItem) -> Result<(), CartError> {
        if self.contains(&item.product) {
            return Err(CartError::Conflict(PRODUCT_ALREADY_IN_CART));
        }
        let mut next = self.items.clone();
        next.push(item);
        self.replace_items(next)
    }

    /// Changes the quantity of an existing line; the price snapshot is kept.
    pub fn set_quantity(
        &mut self,
        product: &ProductRef,
        quantity: Quantity,
    ) -> Result<(), CartError> {
        let idx = self
            .position(product)
            .ok_or(CartError::InvalidReference(PRODUCT_NOT_IN_CART))?;
        let mut next = self.items.clone();
        next[idx].quantity = quantity;
        self.replace_items(next)
    }

    pub fn remove_line(&mut self, product: &ProductRef) -> Result<LineItem, CartError> {
        let idx = self
            .position(product)
            .ok_or(CartError::InvalidReference(PRODUCT_NOT_IN_CART))?;
        Ok(self.items.remove(idx))
    }

    /// Sum of `price × quantity` over the snapshots.
    pub fn total(&self) -> Result<Money, CartError> {
        Self::total_of(&self.items)
    }

    fn total_of(items: &[LineItem]) -> Result<Money, CartError> {
        let lines = items
            .iter()
            .map(LineItem::line_total)
            .collect::<Result<Vec<_>, _>>()?;
        Money::checked_sum(lines)
    }

    fn replace_items(&mut self, items: Vec<LineItem>) -> Result<(), CartError> {
        Self::total_of(&items)?;
        self.items = items;
        Ok(())
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

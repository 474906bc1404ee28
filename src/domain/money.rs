use crate::error::{AMOUNT_OUT_OF_RANGE, CartError};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Sub, SubAssign};

/// A non-currency-tagged monetary value.
///
/// Wraps `rust_decimal::Decimal` so wallet balances, catalog costs and cart
/// totals cannot be mixed up with plain numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Self = Self(Decimal::ZERO);

    pub fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Builds a value that must not be negative (wallets, catalog costs).
    pub fn non_negative(amount: Decimal) -> Result<Self, CartError> {
        if amount >= Decimal::ZERO {
            Ok(Self(amount))
        } else {
            Err(CartError::ValidationError(
                "Amount must not be negative".to_string(),
            ))
        }
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    pub fn checked_add(self, rhs: Self) -> Result<Self, CartError> {
        self.0.checked_add(rhs.0).map(Self).ok_or_else(out_of_range)
    }

    pub fn checked_mul(self, quantity: Quantity) -> Result<Self, CartError> {
        self.0
            .checked_mul(Decimal::from(quantity.0))
            .map(Self)
            .ok_or_else(out_of_range)
    }

    /// Adds up `amounts`, failing instead of overflowing.
    pub fn checked_sum(amounts: impl IntoIterator<Item = Self>) -> Result<Self, CartError> {
        amounts
            .into_iter()
            .try_fold(Self::ZERO, |acc, amount| acc.checked_add(amount))
    }
}

fn out_of_range() -> CartError {
    CartError::ValidationError(AMOUNT_OUT_OF_RANGE.to_string())
}

impl From<Money> for Decimal {
    fn from(money: Money) -> Self {
        money.0
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

/// A line-item quantity. Always at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Quantity(u32);

impl Quantity {
    pub fn new(value: u32) -> Result<Self, CartError> {
        if value >= 1 {
            Ok(Self(value))
        } else {
            Err(CartError::ValidationError(
                "Quantity must be at least 1".to_string(),
            ))
        }
    }

    pub fn value(&self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for Quantity {
    type Error = CartError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Quantity> for u32 {
    fn from(quantity: Quantity) -> Self {
        quantity.0
    }
}

impl Sub for Money {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

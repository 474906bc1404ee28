use super::money::Money;
use crate::config::Config;
use crate::error::{CartError, INSUFFICIENT_BALANCE};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Shipping address every new account starts with. Checkout refuses to ship
/// to it.
pub const DEFAULT_ADDRESS: &str = "ADDRESS_NOT_SET";

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Wallet and shipping state for one registered user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserAccount {
    pub id: UserId,
    pub email: String,
    /// Never negative.
    pub wallet_balance: Money,
    pub shipping_address: String,
}

impl UserAccount {
    /// A freshly registered account: configured starting wallet, no address.
    pub fn register(id: UserId, email: impl Into<String>, config: &Config) -> Self {
        Self {
            id,
            email: email.into(),
            wallet_balance: config.default_wallet_money,
            shipping_address: DEFAULT_ADDRESS.to_string(),
        }
    }

    pub fn has_non_default_address(&self) -> bool {
        self.shipping_address != DEFAULT_ADDRESS
    }

    /// Removes `amount` from the wallet if it is covered.
    pub fn debit(&mut self, amount: Money) -> Result<Money, CartError> {
        if amount > self.wallet_balance {
            return Err(CartError::InsufficientFunds(INSUFFICIENT_BALANCE));
        }
        self.wallet_balance -= amount;
        Ok(self.wallet_balance)
    }

    /// Adds `amount` to the wallet, leaving it untouched on overflow.
    pub fn credit(&mut self, amount: Money) -> Result<Money, CartError> {
        self.wallet_balance = self.wallet_balance.checked_add(amount)?;
        Ok(self.wallet_balance)
    }
}

/// The authenticated caller, as handed over by the identity provider.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentUser {
    pub id: UserId,
    pub email: String,
    pub wallet_balance: Money,
    pub shipping_address: String,
}

impl From<&UserAccount> for CurrentUser {
    fn from(account: &UserAccount) -> Self {
        Self {
            id: account.id.clone(),
            email: account.email.clone(),
            wallet_balance: account.wallet_balance,
            shipping_address: account.shipping_address.clone(),
        }
    }
}

impl CurrentUser {
    /// Key of the user's cart in the cart store.
    pub fn cart_owner(&self) -> &str {
        &self.email
    }
}

use super::cart::Cart;
use super::money::Money;
use super::product::{Product, ProductRef};
use super::user::{UserAccount, UserId};
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Read-only product lookup. `None` means the product does not exist.
#[async_trait]
pub trait Catalog: Send + Sync {
    async fn get_product(&self, product: &ProductRef) -> Result<Option<Product>>;
}

/// One cart per owner key.
#[async_trait]
pub trait CartStore: Send + Sync {
    async fn get(&self, owner: &str) -> Result<Option<Cart>>;
    async fn store(&self, cart: Cart) -> Result<()>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn get(&self, user_id: &UserId) -> Result<Option<UserAccount>>;
    async fn store(&self, account: UserAccount) -> Result<()>;
    async fn all_accounts(&self) -> Result<Vec<UserAccount>>;

    /// Debits the wallet only if it covers `amount`, returning the new balance.
    async fn debit_wallet(&self, user_id: &UserId, amount: Money) -> Result<Money>;

    /// Adds `amount` back to the wallet. Used to undo a debit.
    async fn credit_wallet(&self, user_id: &UserId, amount: Money) -> Result<Money>;

    async fn has_non_default_address(&self, user_id: &UserId) -> Result<bool>;

    async fn set_address(&self, user_id: &UserId, address: String) -> Result<String>;
}

pub type CatalogHandle = Arc<dyn Catalog>;
pub type CartStoreHandle = Arc<dyn CartStore>;
pub type UserStoreHandle = Arc<dyn UserStore>;

use crate::domain::cart::Cart;
use crate::domain::money::Money;
use crate::domain::ports::{CartStore, Catalog, UserStore};
use crate::domain::product::{Product, ProductRef};
use crate::domain::user::{UserAccount, UserId};
use crate::error::{CartError, Result, USER_NOT_FOUND};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

/// A thread-safe in-memory cart store keyed by owner.
///
/// Clones share the same map. `set_fail_on_store` makes every subsequent
/// write fail, which lets tests drive the checkout refund path.
#[derive(Default, Clone)]
pub struct InMemoryCartStore {
    carts: Arc<RwLock<HashMap<String, Cart>>>,
    fail_on_store: Arc<AtomicBool>,
}

impl InMemoryCartStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_fail_on_store(&self, fail: bool) {
        self.fail_on_store.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl CartStore for InMemoryCartStore {
    async fn get(&self, owner: &str) -> Result<Option<Cart>> {
        let carts = self.carts.read().await;
        Ok(carts.get(owner).cloned())
    }

    async fn store(&self, cart: Cart) -> Result<()> {
        if self.fail_on_store.load(Ordering::SeqCst) {
            return Err(CartError::internal("cart store unavailable"));
        }
        let mut carts = self.carts.write().await;
        carts.insert(cart.owner.clone(), cart);
        Ok(())
    }
}

/// A thread-safe in-memory store for user accounts.
#[derive(Default, Clone)]
pub struct InMemoryUserStore {
    accounts: Arc<RwLock<HashMap<UserId, UserAccount>>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn get(&self, user_id: &UserId) -> Result<Option<UserAccount>> {
        let accounts = self.accounts.read().await;
        Ok(accounts.get(user_id).cloned())
    }

    async fn store(&self, account: UserAccount) -> Result<()> {
        let mut accounts = self.accounts.write().await;
        accounts.insert(account.id.clone(), account);
        Ok(())
    }

    async fn all_accounts(&self) -> Result<Vec<UserAccount>> {
        let accounts = self.accounts.read().await;
        let mut all: Vec<UserAccount> = accounts.values().cloned().collect();
        all.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(all)
    }

    async fn debit_wallet(&self, user_id: &UserId, amount: Money) -> Result<Money> {
        let mut accounts = self.accounts.write().await;
        let account = accounts
            .get_mut(user_id)
            .ok_or(CartError::NotFound(USER_NOT_FOUND))?;
        account.debit(amount)
    }

    async fn credit_wallet(&self, user_id: &UserId, amount: Money) -> Result<Money> {
        let mut accounts = self.accounts.write().await;
        let account = accounts
            .get_mut(user_id)
            .ok_or(CartError::NotFound(USER_NOT_FOUND))?;
        account.credit(amount)
    }

    async fn has_non_default_address(&self, user_id: &UserId) -> Result<bool> {
        let accounts = self.accounts.read().await;
        let account = accounts
            .get(user_id)
            .ok_or(CartError::NotFound(USER_NOT_FOUND))?;
        Ok(account.has_non_default_address())
    }

    async fn set_address(&self, user_id: &UserId, address: String) -> Result<String> {
        let mut accounts = self.accounts.write().await;
        let account = accounts
            .get_mut(user_id)
            .ok_or(CartError::NotFound(USER_NOT_FOUND))?;
        account.shipping_address = address;
        Ok(account.shipping_address.clone())
    }
}

/// An in-memory product catalog.
#[derive(Default, Clone)]
pub struct InMemoryCatalog {
    products: Arc<RwLock<HashMap<ProductRef, Product>>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_products(products: impl IntoIterator<Item = Product>) -> Self {
        let products = products.into_iter().map(|p| (p.id.clone(), p)).collect();
        Self {
            products: Arc::new(RwLock::new(products)),
        }
    }

    /// Adds or replaces a product.
    pub async fn insert(&self, product: Product) {
        let mut products = self.products.write().await;
        products.insert(product.id.clone(), product);
    }
}

#[async_trait]
impl Catalog for InMemoryCatalog {
    async fn get_product(&self, product: &ProductRef) -> Result<Option<Product>> {
        let products = self.products.read().await;
        Ok(products.get(product).cloned())
    }
}

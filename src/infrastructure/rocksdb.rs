use crate::domain::cart::Cart;
use crate::domain::money::Money;
use crate::domain::ports::{CartStore, Catalog, UserStore};
use crate::domain::product::{Product, ProductRef};
use crate::domain::user::{UserAccount, UserId};
use crate::error::{CartError, Result, USER_NOT_FOUND};
use async_trait::async_trait;
use rocksdb::{ColumnFamily, ColumnFamilyDescriptor, DB, Options};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::Path;
use std::sync::Arc;

/// Column Family for carts, keyed by owner.
pub const CF_CARTS: &str = "carts";
/// Column Family for user accounts, keyed by user id.
pub const CF_USERS: &str = "users";
/// Column Family for catalog products, keyed by product id.
pub const CF_PRODUCTS: &str = "products";

/// A persistent store implementation using RocksDB.
///
/// Carts, accounts and products live in separate Column Families as JSON
/// values. Wallet updates are read-modify-write on a single key; the engines
/// serialize per user, so the store does not lock on its own.
///
/// This struct is thread-safe (`Clone` shares the underlying `Arc<DB>`).
#[derive(Clone)]
pub struct RocksDBStore {
    db: Arc<DB>,
}

impl RocksDBStore {
    /// Opens or creates a RocksDB instance at the specified path.
    ///
    /// Ensures that the required column families exist.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cfs = [CF_CARTS, CF_USERS, CF_PRODUCTS]
            .into_iter()
            .map(|name| ColumnFamilyDescriptor::new(name, Options::default()))
            .collect::<Vec<_>>();

        let db = DB::open_cf_descriptors(&opts, path, cfs)?;

        Ok(Self { db: Arc::new(db) })
    }

    /// Adds or replaces a catalog product.
    pub fn put_product(&self, product: &Product) -> Result<()> {
        self.put(CF_PRODUCTS, product.id.as_str(), product)
    }

    fn put<T: Serialize>(&self, cf_name: &str, key: &str, value: &T) -> Result<()> {
        let cf = self.cf(cf_name)?;
        let bytes = serde_json::to_vec(value)?;
        self.db.put_cf(cf, key.as_bytes(), bytes)?;
        Ok(())
    }

    fn fetch<T: DeserializeOwned>(&self, cf_name: &str, key: &str) -> Result<Option<T>> {
        let cf = self.cf(cf_name)?;
        match self.db.get_cf(cf, key.as_bytes())? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    fn cf(&self, name: &str) -> Result<&ColumnFamily> {
        self.db
            .cf_handle(name)
            .ok_or_else(|| CartError::internal(format!("{name} column family not found")))
    }

    fn update_account<F, T>(&self, user_id: &UserId, apply: F) -> Result<T>
    where
        F: FnOnce(&mut UserAccount) -> Result<T>,
    {
        let mut account: UserAccount = self
            .fetch(CF_USERS, user_id.as_str())?
            .ok_or(CartError::NotFound(USER_NOT_FOUND))?;
        let out = apply(&mut account)?;
        self.put(CF_USERS, user_id.as_str(), &account)?;
        Ok(out)
    }
}

#[async_trait]
impl CartStore for RocksDBStore {
    async fn get(&self, owner: &str) -> Result<Option<Cart>> {
        self.fetch(CF_CARTS, owner)
    }

    async fn store(&self, cart: Cart) -> Result<()> {
        self.put(CF_CARTS, &cart.owner, &cart)
    }
}

#[async_trait]
impl UserStore for RocksDBStore {
    async fn get(&self, user_id: &UserId) -> Result<Option<UserAccount>> {
        self.fetch(CF_USERS, user_id.as_str())
    }

    async fn store(&self, account: UserAccount) -> Result<()> {
        self.put(CF_USERS, account.id.as_str(), &account)
    }

    async fn all_accounts(&self) -> Result<Vec<UserAccount>> {
        let cf = self.cf(CF_USERS)?;
        let mut accounts = Vec::new();
        // Keys iterate in byte order, which is user id order.
        for item in self.db.iterator_cf(cf, rocksdb::IteratorMode::Start) {
            let (_key, value) = item?;
            accounts.push(serde_json::from_slice(&value)?);
        }
        Ok(accounts)
    }

    async fn debit_wallet(&self, user_id: &UserId, amount: Money) -> Result<Money> {
        self.update_account(user_id, |account| account.debit(amount))
    }

    async fn credit_wallet(&self, user_id: &UserId, amount: Money) -> Result<Money> {
        self.update_account(user_id, |account| account.credit(amount))
    }

    async fn has_non_default_address(&self, user_id: &UserId) -> Result<bool> {
        let account: UserAccount = self
            .fetch(CF_USERS, user_id.as_str())?
            .ok_or(CartError::NotFound(USER_NOT_FOUND))?;
        Ok(account.has_non_default_address())
    }

    async fn set_address(&self, user_id: &UserId, address: String) -> Result<String> {
        self.update_account(user_id, |account| {
            account.shipping_address = address;
            Ok(account.shipping_address.clone())
        })
    }
}

#[async_trait]
impl Catalog for RocksDBStore {
    async fn get_product(&self, product: &ProductRef) -> Result<Option<Product>> {
        self.fetch(CF_PRODUCTS, product.as_str())
    }
}

#![allow(dead_code)]

use cartflow::application::cart::CartEngine;
use cartflow::application::checkout::CheckoutEngine;
use cartflow::application::locks::OwnerLocks;
use cartflow::domain::money::{Money, Quantity};
use cartflow::domain::ports::UserStore;
use cartflow::domain::product::{Product, ProductRef};
use cartflow::domain::user::{CurrentUser, UserAccount, UserId};
use cartflow::infrastructure::in_memory::{InMemoryCartStore, InMemoryCatalog, InMemoryUserStore};
use cartflow::interfaces::transport::CartController;
use rust_decimal::Decimal;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub struct Shop {
    pub carts: InMemoryCartStore,
    pub users: InMemoryUserStore,
    pub catalog: InMemoryCatalog,
    pub locks: OwnerLocks,
}

impl Shop {
    /// A catalog of `p1` (10), `p2` (5) and `p3` (60).
    pub fn new() -> Self {
        Self {
            carts: InMemoryCartStore::new(),
            users: InMemoryUserStore::new(),
            catalog: InMemoryCatalog::with_products([
                Product::new("p1", "Mug", Money::new(Decimal::from(10))),
                Product::new("p2", "Plate", Money::new(Decimal::from(5))),
                Product::new("p3", "Lamp", Money::new(Decimal::from(60))),
            ]),
            locks: OwnerLocks::new(),
        }
    }

    pub fn cart_engine(&self) -> CartEngine {
        CartEngine::new(
            Arc::new(self.carts.clone()),
            Arc::new(self.catalog.clone()),
            self.locks.clone(),
        )
    }

    pub fn checkout_engine(&self) -> CheckoutEngine {
        CheckoutEngine::new(
            Arc::new(self.carts.clone()),
            Arc::new(self.users.clone()),
            self.locks.clone(),
        )
    }

    pub fn controller(&self) -> CartController {
        CartController::new(self.cart_engine(), self.checkout_engine())
    }

    pub async fn register(&self, id: &str, balance: Decimal, address: &str) -> CurrentUser {
        let account = UserAccount {
            id: UserId::new(id),
            email: format!("{id}@example.com"),
            wallet_balance: Money::new(balance),
            shipping_address: address.to_string(),
        };
        self.users.store(account.clone()).await.unwrap();
        CurrentUser::from(&account)
    }

    pub async fn balance(&self, user: &CurrentUser) -> Money {
        self.users
            .get(&user.id)
            .await
            .unwrap()
            .unwrap()
            .wallet_balance
    }
}

pub fn product(id: &str) -> ProductRef {
    ProductRef::new(id)
}

pub fn qty(n: u32) -> Quantity {
    Quantity::new(n).unwrap()
}

/// Writes `lines` to `dir/name`, one per line, and returns the path.
pub fn write_csv(dir: &Path, name: &str, lines: &[&str]) -> PathBuf {
    let path = dir.join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    for line in lines {
        writeln!(file, "{line}").unwrap();
    }
    path
}

/// Catalog and user files shared by the CLI tests.
pub fn write_seed_files(dir: &Path) -> (PathBuf, PathBuf) {
    let catalog = write_csv(
        dir,
        "products.csv",
        &["id, name, cost", "p1, Mug, 10", "p2, Plate, 5", "p3, Lamp, 60"],
    );
    let users = write_csv(
        dir,
        "users.csv",
        &[
            "id, email, wallet, address",
            "u1, u1@example.com, 100,\"1 Main St\"",
            "u2, u2@example.com, 100,",
        ],
    );
    (catalog, users)
}

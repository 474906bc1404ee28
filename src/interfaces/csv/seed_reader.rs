use crate::config::Config;
use crate::domain::money::Money;
use crate::domain::product::{Product, ProductRef};
use crate::domain::user::{UserAccount, UserId};
use crate::error::Result;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Read;

#[derive(Debug, Deserialize)]
struct ProductRecord {
    id: ProductRef,
    name: String,
    cost: Decimal,
}

#[derive(Debug, Deserialize)]
struct UserRecord {
    id: UserId,
    email: String,
    wallet: Option<Decimal>,
    address: Option<String>,
}

/// Reads catalog products from `id, name, cost` rows.
pub struct ProductReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> ProductReader<R> {
    pub fn new(source: R) -> Self {
        Self {
            reader: super::reader_builder().from_reader(source),
        }
    }

    pub fn products(self) -> impl Iterator<Item = Result<Product>> {
        self.reader.into_deserialize().map(|row| -> Result<Product> {
            let record: ProductRecord = row?;
            Ok(Product {
                id: record.id,
                name: record.name,
                cost: Money::non_negative(record.cost)?,
            })
        })
    }
}

/// Reads user accounts from `id, email, wallet, address` rows.
///
/// Blank wallet or address columns fall back to what a new registration gets.
pub struct UserReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> UserReader<R> {
    pub fn new(source: R) -> Self {
        Self {
            reader: super::reader_builder().from_reader(source),
        }
    }

    pub fn accounts<'a>(self, config: &'a Config) -> impl Iterator<Item = Result<UserAccount>> + 'a
    where
        R: 'a,
    {
        self.reader.into_deserialize().map(move |row| -> Result<UserAccount> {
            let record: UserRecord = row?;
            let mut account = UserAccount::register(record.id, record.email, config);
            if let Some(wallet) = record.wallet {
                account.wallet_balance = Money::non_negative(wallet)?;
            }
            if let Some(address) = record.address.filter(|a| !a.is_empty()) {
                account.shipping_address = address;
            }
            Ok(account)
        })
    }
}

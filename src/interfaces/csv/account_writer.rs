use crate::domain::cart::Cart;
use crate::domain::money::Money;
use crate::domain::user::UserAccount;
use crate::error::Result;
use serde::Serialize;
use std::io::Write;

/// One line of the final report.
#[derive(Debug, Serialize, PartialEq)]
pub struct AccountRow {
    pub user: String,
    pub email: String,
    pub wallet: String,
    pub address: String,
    pub items: usize,
    pub cart_total: String,
}

impl AccountRow {
    pub fn new(account: &UserAccount, cart: Option<&Cart>) -> Result<Self> {
        let cart_total = cart.map_or(Ok(Money::ZERO), Cart::total)?;
        Ok(Self {
            user: account.id.to_string(),
            email: account.email.clone(),
            wallet: account.wallet_balance.to_string(),
            address: account.shipping_address.clone(),
            items: cart.map_or(0, |c| c.items.len()),
            cart_total: cart_total.to_string(),
        })
    }
}

/// Writes account rows as CSV with a header line.
pub struct AccountWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> AccountWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write_accounts(&mut self, rows: impl IntoIterator<Item = AccountRow>) -> Result<()> {
        for row in rows {
            self.writer.serialize(row)?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

//! Runtime configuration loaded from environment variables.

use crate::domain::money::Money;
use rust_decimal::Decimal;
use std::str::FromStr;

pub const DEFAULT_WALLET_MONEY: u32 = 500;

/// Reads from environment variables:
/// - `CARTFLOW_DEFAULT_WALLET`: starting wallet for new accounts (default: `500`)
/// - `RUST_LOG`: tracing filter directive (default: `"info"`)
#[derive(Debug, Clone)]
pub struct Config {
    pub default_wallet_money: Money,
    pub log_level: String,
}

impl Config {
    /// Loads configuration from the environment, falling back to defaults for
    /// anything missing or unparsable.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            default_wallet_money: lookup("CARTFLOW_DEFAULT_WALLET")
                .and_then(|v| Decimal::from_str(v.trim()).ok())
                .and_then(|d| Money::non_negative(d).ok())
                .unwrap_or(defaults.default_wallet_money),
            log_level: lookup("RUST_LOG").unwrap_or(defaults.log_level),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_wallet_money: Money::new(Decimal::from(DEFAULT_WALLET_MONEY)),
            log_level: "info".to_string(),
        }
    }
}

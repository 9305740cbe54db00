//! Balance tracking types for the custody model.
//!
//! Every account has an `available` balance (spendable, withdrawable) and
//! an `escrowed` balance (held in registry custody behind a live bid).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Balance of a single account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BalanceEntry {
    /// Free funds.
    pub available: Decimal,
    /// Funds held by the registry for the account's highest bids.
    pub escrowed: Decimal,
}

impl BalanceEntry {
    /// Create a zero balance.
    #[must_use]
    pub fn new() -> Self {
        Self {
            available: Decimal::ZERO,
            escrowed: Decimal::ZERO,
        }
    }

    /// Total balance (available + escrowed).
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.available + self.escrowed
    }

    /// Whether this entry has no balance at all.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.available.is_zero() && self.escrowed.is_zero()
    }
}

impl Default for BalanceEntry {
    fn default() -> Self {
        Self::new()
    }
}

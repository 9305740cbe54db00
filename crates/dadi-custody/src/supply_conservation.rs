//! Supply conservation invariant checker.
//!
//! Invariant enforced over the ledger:
//! ```text
//! Σ(available + escrowed) == Σ(deposits) - Σ(withdrawals)
//! ```
//!
//! Escrow, refund and settlement only move value between accounts, so
//! they must leave the total untouched.

use dadi_types::{DadiError, Result};
use rust_decimal::Decimal;

/// Running totals of value entering and leaving the ledger.
#[derive(Debug, Clone, Default)]
pub struct SupplyConservation {
    deposits: Decimal,
    withdrawals: Decimal,
}

impl SupplyConservation {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_deposit(&mut self, amount: Decimal) {
        self.deposits += amount;
    }

    pub fn record_withdrawal(&mut self, amount: Decimal) {
        self.withdrawals += amount;
    }

    /// Expected total supply: deposits - withdrawals.
    #[must_use]
    pub fn expected_supply(&self) -> Decimal {
        self.deposits - self.withdrawals
    }

    /// Compare the ledger's actual supply with the expected one.
    ///
    /// # Errors
    /// Returns [`DadiError::SupplyInvariantViolation`] if actual ≠ expected.
    pub fn verify(&self, actual_supply: Decimal) -> Result<()> {
        let expected = self.expected_supply();
        if actual_supply != expected {
            return Err(DadiError::SupplyInvariantViolation {
                reason: format!(
                    "actual supply {actual_supply} != expected {expected} \
                     (deposits={}, withdrawals={})",
                    self.deposits, self.withdrawals
                ),
            });
        }
        Ok(())
    }

    #[must_use]
    pub fn total_deposits(&self) -> Decimal {
        self.deposits
    }

    #[must_use]
    pub fn total_withdrawals(&self) -> Decimal {
        self.withdrawals
    }
}

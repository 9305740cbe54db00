//! In-memory ledger backing registry custody.
//!
//! Tracks per-account balances with available/escrowed accounting. All
//! mutations are atomic: either the full operation succeeds or every
//! balance is unchanged.

use std::collections::{HashMap, HashSet};

use dadi_types::{AccountId, BalanceEntry, DadiError, Result};
use rust_decimal::Decimal;

use crate::{custody::Custody, supply_conservation::SupplyConservation};

/// Account balances plus the set of accounts refusing inbound value.
///
/// Refusal models recipients that reject transfers (the executor's
/// known failure mode). It only affects outgoing custody transfers;
/// deposits from outside are always accepted.
#[derive(Debug, Default)]
pub struct Ledger {
    balances: HashMap<AccountId, BalanceEntry>,
    refusing: HashSet<AccountId>,
    supply: SupplyConservation,
}

impl Ledger {
    /// Create an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fund an account from outside the system.
    pub fn deposit(&mut self, account: AccountId, amount: Decimal) {
        self.balances.entry(account).or_default().available += amount;
        self.supply.record_deposit(amount);
    }

    /// Move available funds out of the system.
    ///
    /// # Errors
    /// Returns `InsufficientBalance` if available < amount.
    pub fn withdraw(&mut self, account: AccountId, amount: Decimal) -> Result<()> {
        ensure_positive(amount)?;
        let entry = self.available_at_least(account, amount)?;
        entry.available -= amount;
        self.supply.record_withdrawal(amount);
        Ok(())
    }

    /// Make `account` reject every outgoing custody transfer.
    pub fn refuse_inbound(&mut self, account: AccountId) {
        self.refusing.insert(account);
    }

    /// Undo [`Ledger::refuse_inbound`].
    pub fn accept_inbound(&mut self, account: AccountId) {
        self.refusing.remove(&account);
    }

    #[must_use]
    pub fn refuses(&self, account: AccountId) -> bool {
        self.refusing.contains(&account)
    }

    /// Balance of an account (zero if never seen).
    #[must_use]
    pub fn balance(&self, account: AccountId) -> BalanceEntry {
        self.balances.get(&account).cloned().unwrap_or_default()
    }

    /// Sum of every account's available + escrowed funds.
    #[must_use]
    pub fn total_supply(&self) -> Decimal {
        self.balances.values().map(BalanceEntry::total).sum()
    }

    /// Sum of everything currently held in custody.
    #[must_use]
    pub fn total_escrowed(&self) -> Decimal {
        self.balances.values().map(|e| e.escrowed).sum()
    }

    /// Check the supply conservation invariant.
    ///
    /// # Errors
    /// Returns `SupplyInvariantViolation` if value was created or lost.
    pub fn verify_supply(&self) -> Result<()> {
        self.supply.verify(self.total_supply())
    }

    fn available_at_least(&mut self, account: AccountId, amount: Decimal) -> Result<&mut BalanceEntry> {
        let entry = self
            .balances
            .get_mut(&account)
            .ok_or(DadiError::InsufficientBalance {
                needed: amount,
                available: Decimal::ZERO,
            })?;
        if entry.available < amount {
            return Err(DadiError::InsufficientBalance {
                needed: amount,
                available: entry.available,
            });
        }
        Ok(entry)
    }

    fn check_escrow(&self, account: AccountId, amount: Decimal) -> Result<()> {
        let held = self.escrowed(account);
        if held < amount {
            return Err(DadiError::InsufficientEscrow {
                account,
                needed: amount,
                held,
            });
        }
        Ok(())
    }

    fn check_accepts(&self, recipient: AccountId, amount: Decimal) -> Result<()> {
        if self.refuses(recipient) {
            tracing::warn!(%recipient, %amount, "Recipient refused inbound transfer");
            return Err(DadiError::TransferRejected { recipient, amount });
        }
        Ok(())
    }
}

impl Custody for Ledger {
    fn escrow(&mut self, from: AccountId, amount: Decimal) -> Result<()> {
        ensure_positive(amount)?;
        let entry = self.available_at_least(from, amount)?;
        entry.available -= amount;
        entry.escrowed += amount;
        Ok(())
    }

    fn cancel_escrow(&mut self, from: AccountId, amount: Decimal) -> Result<()> {
        ensure_positive(amount)?;
        self.check_escrow(from, amount)?;

        let entry = self.balances.entry(from).or_default();
        entry.escrowed -= amount;
        entry.available += amount;
        Ok(())
    }

    fn refund(&mut self, to: AccountId, amount: Decimal) -> Result<()> {
        ensure_positive(amount)?;
        self.check_accepts(to, amount)?;
        self.check_escrow(to, amount)?;

        let entry = self.balances.entry(to).or_default();
        entry.escrowed -= amount;
        entry.available += amount;
        Ok(())
    }

    fn settle(&mut self, from: AccountId, to: AccountId, amount: Decimal) -> Result<()> {
        ensure_positive(amount)?;
        self.check_accepts(to, amount)?;
        self.check_escrow(from, amount)?;

        self.balances.entry(from).or_default().escrowed -= amount;
        self.balances.entry(to).or_default().available += amount;
        Ok(())
    }

    fn escrowed(&self, account: AccountId) -> Decimal {
        self.balances
            .get(&account)
            .map_or(Decimal::ZERO, |e| e.escrowed)
    }
}

fn ensure_positive(amount: Decimal) -> Result<()> {
    if amount <= Decimal::ZERO {
        return Err(DadiError::InvalidAmount(amount));
    }
    Ok(())
}

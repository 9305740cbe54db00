//! The value-transfer seam between the registry and its executor.

use dadi_types::{AccountId, Result};
use rust_decimal::Decimal;

/// Moves value in and out of registry custody.
///
/// Every method is all-or-nothing: on `Err` no balance has changed.
/// Outgoing transfers (`refund`, `settle`) may be refused by the
/// recipient, which surfaces as `TransferRejected`.
pub trait Custody {
    /// Take `amount` from `from`'s available balance into custody.
    fn escrow(&mut self, from: AccountId, amount: Decimal) -> Result<()>;

    /// Undo a [`Custody::escrow`] taken earlier in the same call.
    ///
    /// This is a rollback, not a transfer, so recipients cannot refuse it.
    fn cancel_escrow(&mut self, from: AccountId, amount: Decimal) -> Result<()>;

    /// Return `amount` of `to`'s escrow to `to`.
    fn refund(&mut self, to: AccountId, amount: Decimal) -> Result<()>;

    /// Pay `amount` of `from`'s escrow out to `to`.
    fn settle(&mut self, from: AccountId, to: AccountId, amount: Decimal) -> Result<()>;

    /// Amount currently escrowed on behalf of `account`.
    fn escrowed(&self, account: AccountId) -> Decimal;
}

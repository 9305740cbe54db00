//! Error types for the device auction registry.
//!
//! All errors use the `DA_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Auction creation / schedule errors
//! - 2xx: Bidding errors
//! - 3xx: Finalization errors
//! - 4xx: Administration errors
//! - 5xx: Custody / value transfer errors
//! - 9xx: General / internal errors

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::{AccountId, ResourceId};

/// Central error enum for all registry operations.
#[derive(Debug, Error)]
pub enum DadiError {
    // =================================================================
    // Creation Errors (1xx)
    // =================================================================
    /// Start time not in the future, zero duration, or end time overflow.
    #[error("DA_ERR_100: Invalid schedule: {reason}")]
    InvalidSchedule { reason: String },

    /// The minimum bid must be strictly positive.
    #[error("DA_ERR_101: Invalid minimum bid: {min_bid}")]
    InvalidBid { min_bid: Decimal },

    /// The resource handle could not be built from the given input.
    #[error("DA_ERR_102: Invalid resource id: {reason}")]
    InvalidResourceId { reason: String },

    // =================================================================
    // Bidding Errors (2xx)
    // =================================================================
    /// No auction has ever been created for this resource.
    #[error("DA_ERR_200: Auction not found: {0}")]
    NotFound(ResourceId),

    /// The bidding window has not opened yet.
    #[error("DA_ERR_201: Auction has not started (opens at {starts_at})")]
    NotStarted { starts_at: DateTime<Utc> },

    /// The bidding window has closed or the auction was finalized.
    #[error("DA_ERR_202: Bidding period has ended for {0}")]
    Ended(ResourceId),

    /// The offered value does not beat the minimum or the current highest bid.
    #[error("DA_ERR_203: Bid too low: offered {offered}, must exceed {floor}")]
    BidTooLow { offered: Decimal, floor: Decimal },

    // =================================================================
    // Finalization Errors (3xx)
    // =================================================================
    /// The bidding window is still open.
    #[error("DA_ERR_300: Auction has not ended (closes at {ends_at})")]
    NotEnded { ends_at: DateTime<Utc> },

    /// Only the auction's creator may finalize it.
    #[error("DA_ERR_301: Caller {caller} is not the auction owner")]
    NotOwner { caller: AccountId },

    /// The auction was already finalized.
    #[error("DA_ERR_302: Auction already finalized: {0}")]
    AlreadyFinalized(ResourceId),

    // =================================================================
    // Administration Errors (4xx)
    // =================================================================
    /// The registry's pause state forbids this call.
    #[error("DA_ERR_400: Not permitted: {reason}")]
    NotPermitted { reason: String },

    /// Caller is not the registry administrator.
    #[error("DA_ERR_401: Caller {caller} is not the registry administrator")]
    NotAdministrator { caller: AccountId },

    // =================================================================
    // Custody Errors (5xx)
    // =================================================================
    /// Not enough available balance to fund the escrow.
    #[error("DA_ERR_500: Insufficient available balance: need {needed}, have {available}")]
    InsufficientBalance { needed: Decimal, available: Decimal },

    /// Custody does not hold enough of this account's escrow.
    #[error("DA_ERR_501: Insufficient escrow for {account}: need {needed}, held {held}")]
    InsufficientEscrow {
        account: AccountId,
        needed: Decimal,
        held: Decimal,
    },

    /// The recipient refused an outgoing transfer.
    #[error("DA_ERR_502: Transfer of {amount} to {recipient} was rejected")]
    TransferRejected { recipient: AccountId, amount: Decimal },

    /// Supply conservation invariant violated.
    #[error("DA_ERR_503: Supply invariant violation: {reason}")]
    SupplyInvariantViolation { reason: String },

    /// Amounts moved through custody must be positive.
    #[error("DA_ERR_504: Invalid amount: {0}")]
    InvalidAmount(Decimal),

    // =================================================================
    // General / Internal (9xx)
    // =================================================================
    /// Unrecoverable internal error.
    #[error("DA_ERR_900: Internal error: {0}")]
    Internal(String),

    /// Serialization / deserialization error.
    #[error("DA_ERR_901: Serialization error: {0}")]
    Serialization(String),

    /// Configuration error (invalid config file, missing fields, etc.).
    #[error("DA_ERR_902: Configuration error: {0}")]
    Configuration(String),

    /// I/O error.
    #[error("DA_ERR_903: I/O error: {0}")]
    Io(String),
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, DadiError>;

impl From<std::io::Error> for DadiError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for DadiError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

//! Auction record, creation parameters and the lazily evaluated phase model.
//!
//! ## Lifecycle
//!
//! ```text
//!   create         now >= start         now > end        finalize
//!  ───────▶ SCHEDULED ─────────▶ OPEN ─────────▶ CLOSED ─────────▶ FINALIZED
//!                                 ▲  │ bid
//!                                 └──┘
//! ```
//!
//! Phases are never stored. They are derived from the record and the
//! caller-supplied `now` on every call, so an auction whose end time has
//! passed stays `CLOSED` (and `active`) until its owner finalizes it.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{AccountId, DadiError, ResourceId, Result};

/// Absolute point in time as supplied by the executing environment.
pub type Timestamp = DateTime<Utc>;

/// Caller identity and current time attributed to a single call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallContext {
    pub caller: AccountId,
    pub now: Timestamp,
}

impl CallContext {
    #[must_use]
    pub fn new(caller: AccountId, now: Timestamp) -> Self {
        Self { caller, now }
    }
}

/// Where an auction sits in its lifecycle at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AuctionPhase {
    /// Created, bidding window not yet open.
    Scheduled,
    /// Accepting bids.
    Open,
    /// Window closed, waiting for the owner to finalize.
    Closed,
    /// Terminal.
    Finalized,
}

impl fmt::Display for AuctionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scheduled => write!(f, "SCHEDULED"),
            Self::Open => write!(f, "OPEN"),
            Self::Closed => write!(f, "CLOSED"),
            Self::Finalized => write!(f, "FINALIZED"),
        }
    }
}

/// Parameters of a `create` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuctionParams {
    pub resource_id: ResourceId,
    pub start_time: Timestamp,
    pub duration: Duration,
    pub min_bid: Decimal,
}

impl AuctionParams {
    #[must_use]
    pub fn new(
        resource_id: ResourceId,
        start_time: Timestamp,
        duration: Duration,
        min_bid: Decimal,
    ) -> Self {
        Self {
            resource_id,
            start_time,
            duration,
            min_bid,
        }
    }

    /// Validate the schedule and minimum bid against `now`.
    ///
    /// Returns the computed end time on success.
    ///
    /// # Errors
    /// - `InvalidSchedule` if `start_time <= now`, `duration <= 0`, or the
    ///   end time is not representable
    /// - `InvalidBid` if `min_bid <= 0`
    pub fn validate(&self, now: Timestamp) -> Result<Timestamp> {
        if self.start_time <= now {
            return Err(DadiError::InvalidSchedule {
                reason: format!(
                    "start time {} must be in the future (now {now})",
                    self.start_time
                ),
            });
        }
        if self.duration <= Duration::zero() {
            return Err(DadiError::InvalidSchedule {
                reason: format!("duration must be positive, got {}", self.duration),
            });
        }
        if self.min_bid <= Decimal::ZERO {
            return Err(DadiError::InvalidBid {
                min_bid: self.min_bid,
            });
        }
        self.start_time
            .checked_add_signed(self.duration)
            .ok_or_else(|| DadiError::InvalidSchedule {
                reason: "end time overflows".to_string(),
            })
    }
}

/// A single auction for one resource.
///
/// Invariants while `active`:
/// - `highest_bid == 0` iff `highest_bidder` is `None`
/// - `highest_bid > 0` implies `highest_bid > min_bid`
/// - `highest_bid` strictly increases with every accepted bid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Auction {
    /// Creator; receives the proceeds on finalize.
    pub owner: AccountId,
    pub start_time: Timestamp,
    /// `start_time + duration`.
    pub end_time: Timestamp,
    pub min_bid: Decimal,
    /// `None` until the first bid is accepted.
    pub highest_bidder: Option<AccountId>,
    pub highest_bid: Decimal,
    /// Cleared by a successful finalize. Terminal once false.
    pub active: bool,
}

impl Auction {
    /// Fresh auction with zeroed bid fields.
    #[must_use]
    pub fn open(
        owner: AccountId,
        start_time: Timestamp,
        end_time: Timestamp,
        min_bid: Decimal,
    ) -> Self {
        Self {
            owner,
            start_time,
            end_time,
            min_bid,
            highest_bidder: None,
            highest_bid: Decimal::ZERO,
            active: true,
        }
    }

    /// Lifecycle phase at `now`.
    #[must_use]
    pub fn phase(&self, now: Timestamp) -> AuctionPhase {
        if !self.active {
            AuctionPhase::Finalized
        } else if now < self.start_time {
            AuctionPhase::Scheduled
        } else if now <= self.end_time {
            AuctionPhase::Open
        } else {
            AuctionPhase::Closed
        }
    }

    #[must_use]
    pub fn has_bid(&self) -> bool {
        self.highest_bidder.is_some()
    }

    /// The value a new bid must strictly exceed.
    #[must_use]
    pub fn bid_floor(&self) -> Decimal {
        if self.has_bid() {
            self.highest_bid.max(self.min_bid)
        } else {
            self.min_bid
        }
    }

    /// Bidding window length.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.end_time - self.start_time
    }

    /// Snapshot for read callers.
    #[must_use]
    pub fn view(&self) -> AuctionView {
        AuctionView {
            owner: self.owner,
            start_time: self.start_time,
            end_time: self.end_time,
            min_bid: self.min_bid,
            highest_bidder: self.highest_bidder,
            highest_bid: self.highest_bid,
            active: self.active,
        }
    }
}

/// Read model returned by `get_auction`: the 7-tuple external tooling reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuctionView {
    pub owner: AccountId,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    pub min_bid: Decimal,
    pub highest_bidder: Option<AccountId>,
    pub highest_bid: Decimal,
    pub active: bool,
}

// ---------------------------------------------------------------------------
// Test helpers
// ---------------------------------------------------------------------------

/// Timestamp from whole seconds since the UNIX epoch.
#[cfg(any(test, feature = "test-helpers"))]
#[must_use]
pub fn ts(secs: i64) -> Timestamp {
    DateTime::from_timestamp(secs, 0).expect("timestamp in range")
}

#[cfg(any(test, feature = "test-helpers"))]
impl AuctionParams {
    /// One-hour auction opening an hour after `now`, minimum bid 0.1.
    #[must_use]
    pub fn sample(now: Timestamp) -> Self {
        Self {
            resource_id: ResourceId(rand::random()),
            start_time: now + Duration::seconds(3600),
            duration: Duration::seconds(3600),
            min_bid: Decimal::new(1, 1),
        }
    }
}

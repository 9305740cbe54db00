//! Events emitted by the registry.
//!
//! Events are the append-only audit trail external tooling indexes to
//! rebuild auction history without reading registry state. Every
//! successful mutating call emits at least one.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{AccountId, ResourceId, Timestamp};

/// Discriminant of [`AuctionEvent`], used for filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    AuctionCreated,
    BidPlaced,
    AuctionEnded,
    ControlTransferred,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AuctionCreated => write!(f, "AUCTION_CREATED"),
            Self::BidPlaced => write!(f, "BID_PLACED"),
            Self::AuctionEnded => write!(f, "AUCTION_ENDED"),
            Self::ControlTransferred => write!(f, "CONTROL_TRANSFERRED"),
        }
    }
}

/// A registry event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum AuctionEvent {
    AuctionCreated {
        resource_id: ResourceId,
        owner: AccountId,
        start_time: Timestamp,
        end_time: Timestamp,
        min_bid: Decimal,
    },
    BidPlaced {
        resource_id: ResourceId,
        bidder: AccountId,
        value: Decimal,
    },
    /// `winner` is `None` when the auction closed without bids.
    AuctionEnded {
        resource_id: ResourceId,
        winner: Option<AccountId>,
        amount: Decimal,
    },
    ControlTransferred {
        resource_id: ResourceId,
        controller: AccountId,
        valid_from: Timestamp,
        valid_until: Timestamp,
    },
}

impl AuctionEvent {
    #[must_use]
    pub fn kind(&self) -> EventKind {
        match self {
            Self::AuctionCreated { .. } => EventKind::AuctionCreated,
            Self::BidPlaced { .. } => EventKind::BidPlaced,
            Self::AuctionEnded { .. } => EventKind::AuctionEnded,
            Self::ControlTransferred { .. } => EventKind::ControlTransferred,
        }
    }

    #[must_use]
    pub fn resource_id(&self) -> ResourceId {
        match self {
            Self::AuctionCreated { resource_id, .. }
            | Self::BidPlaced { resource_id, .. }
            | Self::AuctionEnded { resource_id, .. }
            | Self::ControlTransferred { resource_id, .. } => *resource_id,
        }
    }
}

/// An event with its position in the log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Strictly increasing from 0.
    pub sequence: u64,
    /// Executor time of the call that emitted the event.
    pub recorded_at: Timestamp,
    pub event: AuctionEvent,
}

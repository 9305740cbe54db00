//! Auction history rebuilt from the event trail alone.
//!
//! Indexers never read registry state; they fold the events of one
//! resource into an [`AuctionHistory`]. A later `AuctionCreated` for the
//! same resource starts a fresh history, matching the registry's
//! overwrite-on-create behaviour.

use dadi_types::{AccountId, AuctionEvent, ControlGrant, EventRecord, ResourceId, Timestamp};
use rust_decimal::Decimal;
use serde::Serialize;

/// One accepted bid as seen in the trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BidEntry {
    pub sequence: u64,
    pub bidder: AccountId,
    pub value: Decimal,
    pub placed_at: Timestamp,
}

/// Result of a finalize, as announced by `AuctionEnded`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Outcome {
    pub winner: Option<AccountId>,
    pub amount: Decimal,
    pub ended_at: Timestamp,
}

/// Everything the trail says about the latest auction on a resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuctionHistory {
    pub resource_id: ResourceId,
    pub owner: AccountId,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    pub min_bid: Decimal,
    /// Accepted bids, oldest first.
    pub bids: Vec<BidEntry>,
    pub outcome: Option<Outcome>,
    pub grant: Option<ControlGrant>,
}

impl AuctionHistory {
    /// Fold `records` into the history of `resource_id`.
    ///
    /// Returns `None` if the trail never saw the resource created.
    pub fn replay<'a, I>(records: I, resource_id: ResourceId) -> Option<Self>
    where
        I: IntoIterator<Item = &'a EventRecord>,
    {
        let mut history: Option<Self> = None;

        for record in records {
            if record.event.resource_id() != resource_id {
                continue;
            }
            match &record.event {
                AuctionEvent::AuctionCreated {
                    owner,
                    start_time,
                    end_time,
                    min_bid,
                    ..
                } => {
                    history = Some(Self {
                        resource_id,
                        owner: *owner,
                        start_time: *start_time,
                        end_time: *end_time,
                        min_bid: *min_bid,
                        bids: Vec::new(),
                        outcome: None,
                        grant: None,
                    });
                }
                AuctionEvent::BidPlaced { bidder, value, .. } => {
                    if let Some(h) = history.as_mut() {
                        h.bids.push(BidEntry {
                            sequence: record.sequence,
                            bidder: *bidder,
                            value: *value,
                            placed_at: record.recorded_at,
                        });
                    }
                }
                AuctionEvent::AuctionEnded { winner, amount, .. } => {
                    if let Some(h) = history.as_mut() {
                        h.outcome = Some(Outcome {
                            winner: *winner,
                            amount: *amount,
                            ended_at: record.recorded_at,
                        });
                    }
                }
                AuctionEvent::ControlTransferred {
                    controller,
                    valid_from,
                    valid_until,
                    ..
                } => {
                    if let Some(h) = history.as_mut() {
                        h.grant = Some(ControlGrant::new(*controller, *valid_from, *valid_until));
                    }
                }
            }
        }

        history
    }

    /// Current leader, if any bid was accepted.
    #[must_use]
    pub fn leader(&self) -> Option<&BidEntry> {
        self.bids.last()
    }

    #[must_use]
    pub fn is_finalized(&self) -> bool {
        self.outcome.is_some()
    }

    /// Refunds implied by the trail: every bid except the leader was
    /// returned in full to its bidder when it was outbid.
    #[must_use]
    pub fn refunds(&self) -> Vec<(AccountId, Decimal)> {
        let outbid = self.bids.len().saturating_sub(1);
        self.bids[..outbid]
            .iter()
            .map(|b| (b.bidder, b.value))
            .collect()
    }
}

//! The auction registry: per-resource create → bid → finalize lifecycle.
//!
//! Every mutating call runs as one indivisible unit supplied by the
//! executor. Inside a call the order is always:
//!
//! 1. **Checks**: all preconditions, no mutation
//! 2. **Effects**: registry records updated
//! 3. **Interactions**: outgoing custody transfers (refund, settle)
//!
//! If an interaction fails, the effects are restored and the error is
//! returned. A call never leaves partial state behind.

use std::collections::HashMap;

use dadi_custody::Custody;
use dadi_types::{
    AccountId, Auction, AuctionEvent, AuctionParams, AuctionPhase, AuctionView, CallContext,
    ControlGrant, DadiError, RegistryConfig, ResourceId, Result, Timestamp, constants,
};
use rust_decimal::Decimal;

use crate::{event_log::EventLog, history::AuctionHistory, pause::PauseSwitch};

/// Holds every auction and control grant, the pause switch, and the
/// event trail.
pub struct AuctionRegistry {
    auctions: HashMap<ResourceId, Auction>,
    grants: HashMap<ResourceId, ControlGrant>,
    switch: PauseSwitch,
    events: EventLog,
}

impl AuctionRegistry {
    #[must_use]
    pub fn new(config: &RegistryConfig) -> Self {
        tracing::info!(
            registry = constants::REGISTRY_NAME,
            version = constants::VERSION,
            admin = %config.admin,
            paused = config.start_paused,
            "Auction registry initialised"
        );
        Self {
            auctions: HashMap::new(),
            grants: HashMap::new(),
            switch: PauseSwitch::new(config.admin, config.start_paused),
            events: EventLog::new(),
        }
    }

    // =================================================================
    // Mutating operations
    // =================================================================

    /// List a resource for auction, owned by the caller.
    ///
    /// An existing record for the same resource is replaced, whatever its
    /// state.
    ///
    /// # Errors
    /// - `NotPermitted` while paused
    /// - `InvalidSchedule` if the start is not in the future or the duration is not positive
    /// - `InvalidBid` if the minimum bid is not positive
    pub fn create(&mut self, ctx: &CallContext, params: &AuctionParams) -> Result<()> {
        self.switch.check_running("create")?;
        let end_time = params.validate(ctx.now)?;

        let auction = Auction::open(ctx.caller, params.start_time, end_time, params.min_bid);
        if let Some(replaced) = self.auctions.insert(params.resource_id, auction) {
            // TODO: decide whether re-listing a live auction should be refused;
            // its escrow stays in custody with no record pointing at it.
            let stranded = if replaced.active {
                replaced.highest_bid
            } else {
                Decimal::ZERO
            };
            tracing::warn!(
                resource = %params.resource_id,
                previous_owner = %replaced.owner,
                was_active = replaced.active,
                %stranded,
                "Existing auction overwritten"
            );
        }

        self.events.append(
            ctx.now,
            AuctionEvent::AuctionCreated {
                resource_id: params.resource_id,
                owner: ctx.caller,
                start_time: params.start_time,
                end_time,
                min_bid: params.min_bid,
            },
        );
        tracing::info!(
            resource = %params.resource_id,
            owner = %ctx.caller,
            start = %params.start_time,
            end = %end_time,
            min_bid = %params.min_bid,
            "Auction created"
        );
        Ok(())
    }

    /// Place a bid of `value`, taken from the caller into custody.
    ///
    /// The previous leader, if any, is refunded its full escrow after the
    /// new leader has been recorded.
    ///
    /// # Errors
    /// - `NotPermitted` while paused
    /// - `NotFound` if no auction exists for the resource
    /// - `NotStarted` before the start time
    /// - `Ended` after the end time or once finalized
    /// - `BidTooLow` unless `value` beats both the minimum and the current highest bid
    /// - any custody error from escrowing the bid or refunding the previous leader
    pub fn bid(
        &mut self,
        ctx: &CallContext,
        custody: &mut impl Custody,
        resource_id: ResourceId,
        value: Decimal,
    ) -> Result<()> {
        self.switch.check_running("bid")?;
        let auction = self
            .auctions
            .get_mut(&resource_id)
            .ok_or(DadiError::NotFound(resource_id))?;

        // 1. Checks
        match auction.phase(ctx.now) {
            AuctionPhase::Open => {}
            AuctionPhase::Scheduled => {
                return Err(DadiError::NotStarted {
                    starts_at: auction.start_time,
                });
            }
            AuctionPhase::Closed | AuctionPhase::Finalized => {
                return Err(DadiError::Ended(resource_id));
            }
        }
        let floor = auction.bid_floor();
        if value <= floor {
            return Err(DadiError::BidTooLow {
                offered: value,
                floor,
            });
        }

        // The bid's value arrives with the call.
        custody.escrow(ctx.caller, value)?;

        // 2. Effects
        let previous_bidder = auction.highest_bidder.replace(ctx.caller);
        let previous_bid = std::mem::replace(&mut auction.highest_bid, value);

        // 3. Interactions
        if let Some(outbid) = previous_bidder {
            if let Err(err) = custody.refund(outbid, previous_bid) {
                tracing::warn!(
                    resource = %resource_id,
                    %outbid,
                    amount = %previous_bid,
                    error = %err,
                    "Refund failed, rolling back bid"
                );
                auction.highest_bidder = previous_bidder;
                auction.highest_bid = previous_bid;
                custody.cancel_escrow(ctx.caller, value).map_err(|e| {
                    DadiError::Internal(format!("failed to return escrow after refund failure: {e}"))
                })?;
                return Err(err);
            }
            tracing::debug!(
                resource = %resource_id,
                %outbid,
                amount = %previous_bid,
                "Previous bidder refunded"
            );
        }

        self.events.append(
            ctx.now,
            AuctionEvent::BidPlaced {
                resource_id,
                bidder: ctx.caller,
                value,
            },
        );
        tracing::info!(
            resource = %resource_id,
            bidder = %ctx.caller,
            value = %value,
            "Bid placed"
        );
        Ok(())
    }

    /// Close an auction whose window has passed.
    ///
    /// With a winner, the winning escrow is paid to the owner and a
    /// control grant covering the auction window is issued and returned.
    /// Without bids the auction simply closes.
    ///
    /// Not gated by the pause switch.
    ///
    /// # Errors
    /// - `NotFound` if no auction exists for the resource
    /// - `AlreadyFinalized` if it was already closed
    /// - `NotOwner` if the caller did not create the auction
    /// - `NotEnded` while `now <= end_time`
    /// - any custody error from paying the owner
    pub fn finalize(
        &mut self,
        ctx: &CallContext,
        custody: &mut impl Custody,
        resource_id: ResourceId,
    ) -> Result<Option<ControlGrant>> {
        let auction = self
            .auctions
            .get_mut(&resource_id)
            .ok_or(DadiError::NotFound(resource_id))?;

        // 1. Checks
        if !auction.active {
            return Err(DadiError::AlreadyFinalized(resource_id));
        }
        if ctx.caller != auction.owner {
            return Err(DadiError::NotOwner { caller: ctx.caller });
        }
        if ctx.now <= auction.end_time {
            return Err(DadiError::NotEnded {
                ends_at: auction.end_time,
            });
        }

        // 2. Effects
        auction.active = false;
        let winner = auction.highest_bidder;
        let amount = auction.highest_bid;
        let owner = auction.owner;
        let grant = winner.map(|w| ControlGrant::new(w, auction.start_time, auction.end_time));
        let replaced_grant = grant.and_then(|g| self.grants.insert(resource_id, g));

        // 3. Interactions
        if let Some(winner) = winner {
            if let Err(err) = custody.settle(winner, owner, amount) {
                tracing::warn!(
                    resource = %resource_id,
                    %owner,
                    %amount,
                    error = %err,
                    "Payout failed, rolling back finalize"
                );
                match replaced_grant {
                    Some(old) => self.grants.insert(resource_id, old),
                    None => self.grants.remove(&resource_id),
                };
                if let Some(auction) = self.auctions.get_mut(&resource_id) {
                    auction.active = true;
                }
                return Err(err);
            }
        }

        self.events.append(
            ctx.now,
            AuctionEvent::AuctionEnded {
                resource_id,
                winner,
                amount,
            },
        );
        if let Some(g) = grant {
            self.events.append(
                ctx.now,
                AuctionEvent::ControlTransferred {
                    resource_id,
                    controller: g.controller,
                    valid_from: g.valid_from,
                    valid_until: g.valid_until,
                },
            );
            tracing::debug!(
                resource = %resource_id,
                controller = %g.controller,
                "Control grant written"
            );
        }
        tracing::info!(
            resource = %resource_id,
            winner = ?winner,
            amount = %amount,
            "Auction finalized"
        );
        Ok(grant)
    }

    /// Block `create` and `bid`. Administrator only.
    pub fn pause(&mut self, ctx: &CallContext) -> Result<()> {
        self.switch.pause(ctx.caller)?;
        tracing::info!(admin = %ctx.caller, "Registry paused");
        Ok(())
    }

    /// Re-open `create` and `bid`. Administrator only.
    pub fn unpause(&mut self, ctx: &CallContext) -> Result<()> {
        self.switch.unpause(ctx.caller)?;
        tracing::info!(admin = %ctx.caller, "Registry unpaused");
        Ok(())
    }

    /// Hand the pause switch to another identity. Administrator only.
    pub fn transfer_admin(&mut self, ctx: &CallContext, new_admin: AccountId) -> Result<()> {
        let previous = self.switch.transfer_admin(ctx.caller, new_admin)?;
        tracing::info!(%previous, %new_admin, "Registry administrator changed");
        Ok(())
    }

    // =================================================================
    // Reads
    // =================================================================

    /// The 7-field view of an auction.
    ///
    /// # Errors
    /// Returns `NotFound` if no auction exists for the resource.
    pub fn get_auction(&self, resource_id: ResourceId) -> Result<AuctionView> {
        self.auction(resource_id)
            .map(Auction::view)
            .ok_or(DadiError::NotFound(resource_id))
    }

    #[must_use]
    pub fn auction(&self, resource_id: ResourceId) -> Option<&Auction> {
        self.auctions.get(&resource_id)
    }

    /// Lifecycle phase of an auction at `now`.
    pub fn phase(&self, resource_id: ResourceId, now: Timestamp) -> Result<AuctionPhase> {
        self.auction(resource_id)
            .map(|a| a.phase(now))
            .ok_or(DadiError::NotFound(resource_id))
    }

    /// Whether `who` holds the control grant for the resource.
    ///
    /// Pure lookup: the grant's window is not compared with any clock.
    #[must_use]
    pub fn has_control(&self, resource_id: ResourceId, who: AccountId) -> bool {
        self.grants
            .get(&resource_id)
            .is_some_and(|g| g.is_held_by(who))
    }

    #[must_use]
    pub fn control_grant(&self, resource_id: ResourceId) -> Option<&ControlGrant> {
        self.grants.get(&resource_id)
    }

    #[must_use]
    pub fn admin(&self) -> AccountId {
        self.switch.admin()
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.switch.is_paused()
    }

    #[must_use]
    pub fn auction_count(&self) -> usize {
        self.auctions.len()
    }

    /// Value the registry's live records say is in custody: the highest
    /// bid of every active auction.
    #[must_use]
    pub fn escrow_held(&self) -> Decimal {
        self.auctions
            .values()
            .filter(|a| a.active)
            .map(|a| a.highest_bid)
            .sum()
    }

    #[must_use]
    pub fn events(&self) -> &EventLog {
        &self.events
    }

    /// History of the latest auction on a resource, rebuilt from events.
    #[must_use]
    pub fn history(&self, resource_id: ResourceId) -> Option<AuctionHistory> {
        AuctionHistory::replay(self.events.iter(), resource_id)
    }
}

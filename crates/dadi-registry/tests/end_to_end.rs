//! End-to-end scenarios across registry and custody.
//!
//! These drive full auction lifecycles the way deployment tooling does:
//! create, wait for the window, bid, wait for the close, finalize, then
//! inspect balances, control and the event trail.

use chrono::Duration;
use dadi_custody::{Custody, Ledger};
use dadi_registry::AuctionRegistry;
use dadi_types::*;
use rust_decimal::Decimal;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn eth(tenths: i64) -> Decimal {
    Decimal::new(tenths, 1)
}

/// A registry, a funded ledger, and a clock that only moves forward.
struct Chain {
    registry: AuctionRegistry,
    ledger: Ledger,
    admin: AccountId,
    now: Timestamp,
}

impl Chain {
    fn new() -> Self {
        init_tracing();
        let admin = AccountId::new();
        Self {
            registry: AuctionRegistry::new(&RegistryConfig::new(admin)),
            ledger: Ledger::new(),
            admin,
            now: ts(1_740_724_898),
        }
    }

    fn account(&mut self, funds: Decimal) -> AccountId {
        let who = AccountId::new();
        self.ledger.deposit(who, funds);
        who
    }

    fn ctx(&self, caller: AccountId) -> CallContext {
        CallContext::new(caller, self.now)
    }

    fn increase_to(&mut self, t: Timestamp) {
        assert!(t >= self.now, "time must not go backwards");
        self.now = t;
    }

    fn create(
        &mut self,
        owner: AccountId,
        id: ResourceId,
        lead: i64,
        duration: i64,
        min_bid: Decimal,
    ) -> Result<()> {
        let params = AuctionParams::new(
            id,
            self.now + Duration::seconds(lead),
            Duration::seconds(duration),
            min_bid,
        );
        let ctx = self.ctx(owner);
        self.registry.create(&ctx, &params)
    }

    fn bid(&mut self, who: AccountId, id: ResourceId, value: Decimal) -> Result<()> {
        let ctx = self.ctx(who);
        self.registry.bid(&ctx, &mut self.ledger, id, value)
    }

    fn finalize(&mut self, who: AccountId, id: ResourceId) -> Result<Option<ControlGrant>> {
        let ctx = self.ctx(who);
        self.registry.finalize(&ctx, &mut self.ledger, id)
    }
}

// =============================================================================
// Test: the reference lifecycle, two bidders, owner finalizes
// =============================================================================
#[test]
fn e2e_two_bidders_owner_finalizes() {
    let mut chain = Chain::new();
    let owner = chain.account(Decimal::new(10, 0));
    let a = chain.account(Decimal::new(10, 0));
    let b = chain.account(Decimal::new(10, 0));
    let id = ResourceId::from_name("device1");

    chain.create(owner, id, 3600, 3600, eth(1)).unwrap();
    let view = chain.registry.get_auction(id).unwrap();
    assert_eq!(view.end_time - view.start_time, Duration::seconds(3600));
    assert!(view.active);

    chain.increase_to(view.start_time);
    chain.bid(a, id, eth(2)).unwrap();

    let a_before = chain.ledger.balance(a).available;
    chain.bid(b, id, eth(3)).unwrap();
    assert_eq!(chain.ledger.balance(a).available - a_before, eth(2));

    chain.increase_to(view.end_time + Duration::seconds(1));
    let owner_before = chain.ledger.balance(owner).available;
    let grant = chain.finalize(owner, id).unwrap().expect("winner exists");

    assert_eq!(grant.controller, b);
    assert_eq!(grant.valid_from, view.start_time);
    assert_eq!(grant.valid_until, view.end_time);
    assert!(chain.registry.has_control(id, b));
    assert!(!chain.registry.has_control(id, a));
    assert_eq!(chain.ledger.balance(owner).available - owner_before, eth(3));
    assert!(!chain.registry.get_auction(id).unwrap().active);

    assert_eq!(chain.ledger.total_escrowed(), Decimal::ZERO);
    chain.ledger.verify_supply().unwrap();
}

// =============================================================================
// Test: edge cases in the order the manual script exercises them
// =============================================================================
#[test]
fn e2e_edge_case_sequence() {
    let mut chain = Chain::new();
    let owner = chain.account(Decimal::new(10, 0));
    let bidder1 = chain.account(Decimal::new(10, 0));
    let bidder2 = chain.account(Decimal::new(10, 0));
    let unauthorized = chain.account(Decimal::new(10, 0));
    let id = ResourceId::from_label("edge_test_1740724898").unwrap();

    chain.create(owner, id, 60, 300, eth(1)).unwrap();
    let view = chain.registry.get_auction(id).unwrap();

    // Too early.
    let early = chain.bid(bidder1, id, Decimal::new(11, 2)).unwrap_err();
    assert!(matches!(early, DadiError::NotStarted { .. }));

    chain.increase_to(view.start_time + Duration::seconds(10));

    // Below minimum.
    let low = chain.bid(bidder1, id, Decimal::new(5, 2)).unwrap_err();
    assert!(matches!(low, DadiError::BidTooLow { .. }));

    // Valid.
    chain.bid(bidder1, id, Decimal::new(11, 2)).unwrap();

    // Equal to current highest.
    let equal = chain.bid(bidder2, id, Decimal::new(11, 2)).unwrap_err();
    assert!(matches!(equal, DadiError::BidTooLow { .. }));

    chain.increase_to(view.end_time + Duration::seconds(10));

    // Unauthorized finalization.
    let unauth = chain.finalize(unauthorized, id).unwrap_err();
    assert!(matches!(unauth, DadiError::NotOwner { .. }));

    // Proper finalization.
    chain.finalize(owner, id).unwrap();
    assert!(chain.registry.has_control(id, bidder1));

    // Late bid.
    let late = chain.bid(bidder2, id, eth(2)).unwrap_err();
    assert!(matches!(late, DadiError::Ended(_)));

    assert_eq!(
        chain.registry.get_auction(id).unwrap().highest_bid,
        Decimal::new(11, 2)
    );
    assert_eq!(id.label(), Some("edge_test_1740724898"));
    chain.ledger.verify_supply().unwrap();
}

// =============================================================================
// Test: three bidders, every outbid refunded exactly, trail replays state
// =============================================================================
#[test]
fn e2e_three_bidders_trail_matches_balances() {
    let mut chain = Chain::new();
    let owner = chain.account(Decimal::ZERO);
    let bidders: Vec<AccountId> = (0..3).map(|_| chain.account(Decimal::new(5, 0))).collect();
    let id = ResourceId::from_label("test_device_1740724898").unwrap();

    chain.create(owner, id, 60, 300, eth(1)).unwrap();
    let view = chain.registry.get_auction(id).unwrap();
    chain.increase_to(view.start_time);

    for (i, who) in bidders.iter().enumerate() {
        let tenths = 2 + i64::try_from(i).unwrap();
        chain.bid(*who, id, eth(tenths)).unwrap();
        chain.increase_to(chain.now + Duration::seconds(30));
        assert_eq!(chain.registry.escrow_held(), chain.ledger.total_escrowed());
    }

    chain.increase_to(view.end_time + Duration::seconds(1));
    chain.finalize(owner, id).unwrap();

    // Losers whole, winner paid exactly the winning bid.
    assert_eq!(chain.ledger.balance(bidders[0]).available, Decimal::new(5, 0));
    assert_eq!(chain.ledger.balance(bidders[1]).available, Decimal::new(5, 0));
    assert_eq!(
        chain.ledger.balance(bidders[2]).available,
        Decimal::new(5, 0) - eth(4)
    );
    assert_eq!(chain.ledger.balance(owner).available, eth(4));

    let history = chain.registry.history(id).unwrap();
    assert_eq!(history.bids.len(), 3);
    assert_eq!(
        history.refunds(),
        vec![(bidders[0], eth(2)), (bidders[1], eth(3))]
    );
    let outcome = history.outcome.unwrap();
    assert_eq!(outcome.winner, Some(bidders[2]));
    assert_eq!(outcome.amount, eth(4));

    let created = chain
        .registry
        .events()
        .of_kind(EventKind::AuctionCreated)
        .next()
        .unwrap();
    assert_eq!(created.sequence, 0);
    assert_eq!(chain.registry.events().range(1..4).len(), 3);
    chain.ledger.verify_supply().unwrap();
}

// =============================================================================
// Test: pause is a circuit breaker for new commitments only
// =============================================================================
#[test]
fn e2e_pause_lets_open_auctions_wind_down() {
    let mut chain = Chain::new();
    let owner = chain.account(Decimal::ZERO);
    let bidder = chain.account(Decimal::new(1, 0));
    let id = ResourceId::from_name("device1");

    chain.create(owner, id, 3600, 3600, eth(1)).unwrap();
    let view = chain.registry.get_auction(id).unwrap();
    chain.increase_to(view.start_time);
    chain.bid(bidder, id, eth(2)).unwrap();

    let admin = chain.admin;
    let ctx = chain.ctx(admin);
    chain.registry.pause(&ctx).unwrap();

    let blocked = chain.bid(bidder, id, eth(5)).unwrap_err();
    assert!(matches!(blocked, DadiError::NotPermitted { .. }));
    let blocked = chain
        .create(owner, ResourceId::from_name("device2"), 3600, 3600, eth(1))
        .unwrap_err();
    assert!(matches!(blocked, DadiError::NotPermitted { .. }));

    chain.increase_to(view.end_time + Duration::seconds(1));
    chain.finalize(owner, id).unwrap();
    assert!(chain.registry.has_control(id, bidder));
    assert_eq!(chain.ledger.balance(owner).available, eth(2));
    assert!(chain.registry.is_paused());
}

// =============================================================================
// Test: a bouncing refund never costs the new bidder anything
// =============================================================================
#[test]
fn e2e_refund_rejection_is_atomic() {
    let mut chain = Chain::new();
    let owner = chain.account(Decimal::ZERO);
    let stubborn = chain.account(Decimal::new(1, 0));
    let challenger = chain.account(Decimal::new(1, 0));
    let id = ResourceId::from_name("device1");

    chain.create(owner, id, 60, 600, eth(1)).unwrap();
    let view = chain.registry.get_auction(id).unwrap();
    chain.increase_to(view.start_time);
    chain.bid(stubborn, id, eth(2)).unwrap();
    chain.ledger.refuse_inbound(stubborn);

    let err = chain.bid(challenger, id, eth(3)).unwrap_err();
    assert!(matches!(err, DadiError::TransferRejected { .. }));
    assert_eq!(chain.ledger.balance(challenger).available, Decimal::new(1, 0));
    assert_eq!(chain.ledger.escrowed(challenger), Decimal::ZERO);
    assert_eq!(
        chain.registry.get_auction(id).unwrap().highest_bidder,
        Some(stubborn)
    );

    // Once the recipient accepts again the same bid goes through.
    chain.ledger.accept_inbound(stubborn);
    chain.bid(challenger, id, eth(3)).unwrap();
    assert_eq!(chain.ledger.balance(stubborn).available, Decimal::new(1, 0));
    chain.ledger.verify_supply().unwrap();
}

// =============================================================================
// Test: the trail exports as JSON for external indexers
// =============================================================================
#[test]
fn e2e_event_trail_exports() {
    let mut chain = Chain::new();
    let owner = chain.account(Decimal::ZERO);
    let bidder = chain.account(Decimal::new(1, 0));
    let id = ResourceId::from_name("device1");

    chain.create(owner, id, 60, 60, eth(1)).unwrap();
    let view = chain.registry.get_auction(id).unwrap();
    chain.increase_to(view.start_time);
    chain.bid(bidder, id, eth(2)).unwrap();
    chain.increase_to(view.end_time + Duration::seconds(1));
    chain.finalize(owner, id).unwrap();

    let json = chain.registry.events().to_json().unwrap();
    let records: Vec<EventRecord> = serde_json::from_str(&json).unwrap();
    assert_eq!(records.len(), 4);
    assert_eq!(records[3].event.kind(), EventKind::ControlTransferred);
    assert!(records.windows(2).all(|w| w[0].sequence + 1 == w[1].sequence));
}

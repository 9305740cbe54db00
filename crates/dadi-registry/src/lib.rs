//! # dadi-registry
//!
//! **Core plane**: the device auction registry.
//!
//! ## Architecture
//!
//! 1. **AuctionRegistry**: per-resource auctions, control grants, the four
//!    mutating operations and the reads
//! 2. **PauseSwitch**: administrator-held circuit breaker for create/bid
//! 3. **EventLog**: append-only audit trail of everything emitted
//! 4. **AuctionHistory**: auction history folded from the trail alone
//!
//! ## Call Flow
//!
//! ```text
//! create   → PauseSwitch → validate → insert record → AuctionCreated
//! bid      → PauseSwitch → phase/floor checks → Custody.escrow
//!          → record leader → Custody.refund(previous) → BidPlaced
//! finalize → owner/phase checks → deactivate + grant
//!          → Custody.settle(winner → owner) → AuctionEnded, ControlTransferred
//! ```
//!
//! The registry holds no locks and spawns nothing. The executor delivers
//! calls one at a time and supplies the caller and the current time in a
//! [`CallContext`](dadi_types::CallContext).

pub mod event_log;
pub mod history;
pub mod pause;
pub mod registry;

pub use event_log::EventLog;
pub use history::{AuctionHistory, BidEntry, Outcome};
pub use pause::PauseSwitch;
pub use registry::AuctionRegistry;

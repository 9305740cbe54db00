//! # dadi-custody
//!
//! **Value plane**: the seam through which the registry moves funds.
//!
//! ## Architecture
//!
//! 1. **Custody**: trait the registry calls to escrow, refund and settle
//! 2. **Ledger**: in-memory `Custody` with available/escrowed accounting
//! 3. **SupplyConservation**: checks that no value is created or lost
//!
//! ## Bid Flow
//!
//! ```text
//! bid    → Custody.escrow(bidder)          available → escrowed
//! outbid → Custody.refund(previous)        escrowed  → available
//! final  → Custody.settle(winner, owner)   escrowed  → owner available
//! ```

pub mod custody;
pub mod ledger;
pub mod supply_conservation;

pub use custody::Custody;
pub use ledger::Ledger;
pub use supply_conservation::SupplyConservation;

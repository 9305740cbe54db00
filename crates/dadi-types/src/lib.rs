//! # dadi-types
//!
//! Shared types, errors, and configuration for the **DADI** device
//! auction registry.
//!
//! This crate is the leaf dependency of the workspace. It defines:
//!
//! - **Identifiers**: [`ResourceId`], [`AccountId`]
//! - **Auction model**: [`Auction`], [`AuctionParams`], [`AuctionPhase`], [`AuctionView`], [`CallContext`]
//! - **Control model**: [`ControlGrant`]
//! - **Events**: [`AuctionEvent`], [`EventKind`], [`EventRecord`]
//! - **Balance model**: [`BalanceEntry`]
//! - **Configuration**: [`RegistryConfig`]
//! - **Errors**: [`DadiError`] with `DA_ERR_` prefix codes
//! - **Constants**: resource handle widths and domain tags

pub mod auction;
pub mod balance;
pub mod config;
pub mod constants;
pub mod error;
pub mod event;
pub mod grant;
pub mod ids;

pub use auction::*;
pub use balance::*;
pub use config::*;
pub use error::*;
pub use event::*;
pub use grant::*;
pub use ids::*;

// Constants are accessed via `dadi_types::constants::FOO`.

//! Core lockout logic for phonegate
//!
//! A small, synchronous state machine over a single persisted record. It
//! decides whether sign-in attempts are currently blocked and escalates block
//! durations as failures accumulate.
//!
//! # Components
//!
//! - [`BlockState`]: the persisted record (JSON, camelCase field names)
//! - [`LockoutTracker`]: read with lazy expiry, write on explicit failures
//! - [`BlockStore`]: single-record storage seam ([`MemoryStore`],
//!   [`RedbStore`])
//! - [`Environment`]: wall-clock time and sleeping, injectable for tests
//!
//! Everything here is free of UI concerns. The tracker is cheap enough to be
//! polled on every display tick.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod country;
pub mod env;
pub mod format;
pub mod state;
pub mod store;
pub mod tracker;

pub use country::{COUNTRIES, Country};
pub use env::Environment;
pub use format::{format_phone_number, format_remaining};
pub use state::BlockState;
pub use store::{BlockStore, MemoryStore, RedbStore, StoreError};
pub use tracker::{
    BlockStatus, CODE_FAILURE_BLOCK, CODE_FAILURE_THRESHOLD, LockoutTracker,
    PHONE_BLOCK_DURATIONS, STATE_KEY,
};

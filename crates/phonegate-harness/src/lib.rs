//! Deterministic simulation harness for phonegate testing.
//!
//! Virtual-clock implementations of the [`phonegate_core::Environment`] and
//! [`phonegate_app::Driver`] traits, so lockout windows measured in hours can
//! be exercised instantly and reproducibly.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod sim_driver;
pub mod sim_env;

pub use sim_driver::{RenderSnapshot, SimDriver, SimError};
pub use sim_env::SimEnv;

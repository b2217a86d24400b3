//! Application layer for phonegate
//!
//! The sign-in flow as a pure state machine plus a generic runtime, so the
//! same orchestration runs in the terminal and in deterministic simulation.
//!
//! # Components
//!
//! - [`App`]: flow state machine (phone screen, code screen, notices)
//! - [`Driver`]: trait for platform-specific I/O
//! - [`Runtime`]: generic event loop that ticks the display and performs the
//!   simulated network delays

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod action;
mod app;
mod config;
mod driver;
mod event;
mod input;
mod runtime;
mod state;

pub use action::{AppAction, PendingRequest};
pub use app::App;
pub use config::FlowConfig;
pub use driver::Driver;
pub use event::AppEvent;
pub use input::KeyInput;
pub use runtime::Runtime;
pub use state::{CODE_LENGTH, CodeForm, Notice, PHONE_DIGITS, PhoneForm, Screen};

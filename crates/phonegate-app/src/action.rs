//! Application side-effects and intents.
//!
//! This module defines the [`AppAction`] enum, which represents instructions
//! produced by the [`crate::App`] state machine for the runtime to execute.

use std::time::Duration;

/// A request waiting on a simulated network round trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingRequest {
    /// "Send me a code" for this number.
    Phone {
        /// Number as displayed, country prefix included.
        number: String,
    },
    /// "Check this code".
    Code {
        /// Entered code digits.
        code: String,
    },
}

/// Actions produced by the App state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppAction {
    /// Render the UI.
    Render,

    /// Quit the application.
    Quit,

    /// Wait `delay`, then deliver [`crate::AppEvent::DelayElapsed`] with
    /// `request`. Never cancelled.
    Simulate {
        /// Request to resolve after the delay.
        request: PendingRequest,
        /// Simulated round-trip time.
        delay: Duration,
    },
}

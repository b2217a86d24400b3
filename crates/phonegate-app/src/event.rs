//! Application input events.
//!
//! This module defines [`AppEvent`], the set of inputs that drive the
//! [`crate::App`] state machine.
//!
//! Events originate from two sources:
//! - User interactions (keyboard, resize, interrupt) and display ticks.
//! - Completion of a simulated network request started by an
//!   [`crate::AppAction::Simulate`].

use crate::{KeyInput, PendingRequest};

/// Events processed by the App state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// Keyboard input.
    Key(KeyInput),

    /// Periodic display refresh.
    Tick,

    /// Terminal resize (columns, rows).
    Resize(u16, u16),

    /// A simulated network delay finished.
    DelayElapsed(PendingRequest),

    /// User asked to exit (Ctrl-C).
    Interrupt,
}

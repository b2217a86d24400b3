//! Flow configuration.

use std::time::Duration;

/// Timing and throttling knobs for the sign-in flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowConfig {
    /// Simulated network delay after submitting the phone number.
    pub phone_delay: Duration,
    /// Simulated network delay after entering a full code.
    pub code_delay: Duration,
    /// How often the display is refreshed (lockout countdown, resend timer).
    pub tick_interval: Duration,
    /// Seconds before "resend code" becomes available.
    pub resend_countdown: u32,
    /// Resends allowed per session before each further resend imposes an
    /// escalating phone-request block. `None` disables throttling.
    pub resend_limit: Option<u32>,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            phone_delay: Duration::from_millis(1_200),
            code_delay: Duration::from_millis(1_000),
            tick_interval: Duration::from_secs(1),
            resend_countdown: 59,
            resend_limit: None,
        }
    }
}

//! Production Environment implementation using system time.
//!
//! `SystemEnv` reads the wall clock (block deadlines are persisted as Unix
//! milliseconds, so they must survive restarts) and sleeps with tokio.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use phonegate_core::Environment;

/// Production environment using the system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEnv;

impl SystemEnv {
    /// Create a new system environment.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Environment for SystemEnv {
    /// Milliseconds since the Unix epoch. A clock set before 1970 reads as 0.
    #[allow(clippy::disallowed_methods)]
    fn now_millis(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |since| u64::try_from(since.as_millis()).unwrap_or(u64::MAX))
    }

    fn sleep(&self, duration: Duration) -> impl std::future::Future<Output = ()> + Send {
        tokio::time::sleep(duration)
    }
}

//! Virtual-clock environment.
//!
//! `SimEnv` keeps wall-clock time in a shared atomic counter. Time only moves
//! when a test advances it or when something sleeps, so block deadlines are
//! exact and tests never wait in real time.

use std::{
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
    time::Duration,
};

use phonegate_core::Environment;

/// Fixed starting point for simulations: 2023-11-14T22:13:20Z.
pub const SIM_EPOCH_MS: u64 = 1_700_000_000_000;

/// Simulated environment with a manually driven clock.
///
/// Clones share the same clock.
#[derive(Debug, Clone)]
pub struct SimEnv {
    now_ms: Arc<AtomicU64>,
}

impl SimEnv {
    /// Create a clock starting at [`SIM_EPOCH_MS`].
    pub fn new() -> Self {
        Self::at(SIM_EPOCH_MS)
    }

    /// Create a clock starting at `now_ms`.
    pub fn at(now_ms: u64) -> Self {
        Self { now_ms: Arc::new(AtomicU64::new(now_ms)) }
    }

    /// Move the clock forward.
    pub fn advance(&self, duration: Duration) {
        let ms = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX);
        self.now_ms.fetch_add(ms, Ordering::SeqCst);
    }
}

impl Default for SimEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl Environment for SimEnv {
    fn now_millis(&self) -> u64 {
        self.now_ms.load(Ordering::SeqCst)
    }

    /// Advances the virtual clock and resolves immediately.
    fn sleep(&self, duration: Duration) -> impl std::future::Future<Output = ()> + Send {
        self.advance(duration);
        std::future::ready(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_clock() {
        let env = SimEnv::new();
        let other = env.clone();

        env.advance(Duration::from_secs(2));

        assert_eq!(other.now_millis(), SIM_EPOCH_MS + 2_000);
    }

    #[tokio::test]
    async fn sleep_advances_virtual_time() {
        let env = SimEnv::at(0);

        env.sleep(Duration::from_millis(1_200)).await;

        assert_eq!(env.now_millis(), 1_200);
    }
}

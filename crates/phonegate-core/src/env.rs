//! Environment abstraction for deterministic testing.
//!
//! Decouples lockout logic from the system clock. Block windows are wall-clock
//! deadlines that must survive restarts, so time is expressed as milliseconds
//! since the Unix epoch rather than a monotonic instant. Tests substitute a
//! virtual clock; production uses `SystemTime`.

use std::time::Duration;

/// Abstract environment providing wall-clock time and async sleeping.
///
/// # Invariants
///
/// Implementations MUST guarantee:
///
/// - `now_millis()` is milliseconds since the Unix epoch
/// - `sleep()` resolves once at least `duration` has passed on this
///   environment's clock (virtual clocks may resolve immediately after
///   advancing)
pub trait Environment: Clone + Send + Sync + 'static {
    /// Current wall-clock time in milliseconds since the Unix epoch.
    fn now_millis(&self) -> u64;

    /// Sleeps for the specified duration.
    ///
    /// This is the ONLY async method in the trait, and it should only be used
    /// by runtime code (never by the tracker).
    fn sleep(&self, duration: Duration) -> impl std::future::Future<Output = ()> + Send;
}

//! Lockout tracker.
//!
//! [`LockoutTracker`] separates "read with lazy expiry" from "write on
//! explicit events". Reads never touch storage, so callers may poll
//! [`LockoutTracker::status`] every display tick; only
//! [`LockoutTracker::impose_phone_block`] and
//! [`LockoutTracker::register_code_failure`] persist.
//!
//! # Escalation
//!
//! Phone-request blocks escalate through [`PHONE_BLOCK_DURATIONS`], indexed by
//! `attempt_level` and clamped to the last entry. Wrong codes use a fixed
//! [`CODE_FAILURE_BLOCK`] once [`CODE_FAILURE_THRESHOLD`] is reached.

use std::time::Duration;

use crate::{BlockState, BlockStore, Environment, StoreError};

/// Storage key of the block record. The suffix versions the schema.
pub const STATE_KEY: &str = "max_auth_block_state_v2";

/// Phone-request block durations, indexed by `attempt_level`.
pub const PHONE_BLOCK_DURATIONS: [Duration; 4] = [
    Duration::from_secs(3 * 60),
    Duration::from_secs(15 * 60),
    Duration::from_secs(60 * 60),
    Duration::from_secs(24 * 60 * 60),
];

/// Consecutive wrong codes that trigger a block.
pub const CODE_FAILURE_THRESHOLD: u32 = 3;

/// Block imposed once the wrong-code threshold is reached.
pub const CODE_FAILURE_BLOCK: Duration = Duration::from_secs(24 * 60 * 60);

/// Outcome of a gate check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockStatus {
    /// Attempts are allowed.
    Open,
    /// Attempts are disallowed.
    Blocked {
        /// Time left until the block lifts (always non-zero).
        remaining: Duration,
    },
}

impl BlockStatus {
    /// Returns true if attempts are currently disallowed.
    pub fn is_blocked(&self) -> bool {
        matches!(self, Self::Blocked { .. })
    }
}

/// Lockout state machine over a single persisted [`BlockState`].
///
/// Holds no state of its own beyond the injected store and environment; every
/// operation re-reads the record, so several trackers over clones of the same
/// store stay consistent (last write wins).
#[derive(Debug, Clone)]
pub struct LockoutTracker<S, E> {
    store: S,
    env: E,
}

impl<S, E> LockoutTracker<S, E>
where
    S: BlockStore,
    E: Environment,
{
    /// Create a tracker over `store`, reading time from `env`.
    pub fn new(store: S, env: E) -> Self {
        Self { store, env }
    }

    /// Current record with lazy expiry applied.
    ///
    /// Returns the zero default when nothing is stored. An expired block reads
    /// as unblocked with `code_failures` reset, but the correction is NOT
    /// written back.
    pub fn read_state(&self) -> Result<BlockState, StoreError> {
        Ok(self.load()?.effective_at(self.env.now_millis()))
    }

    /// Gate check: is a new attempt allowed right now?
    pub fn status(&self) -> Result<BlockStatus, StoreError> {
        let now = self.env.now_millis();
        let state = self.load()?.effective_at(now);

        if state.is_blocked_at(now) {
            Ok(BlockStatus::Blocked { remaining: state.remaining_at(now) })
        } else {
            Ok(BlockStatus::Open)
        }
    }

    /// Impose a phone-request block and escalate the attempt level.
    ///
    /// # Invariants
    ///
    /// - Duration is `PHONE_BLOCK_DURATIONS[min(attempt_level, 3)]`
    /// - Post: `attempt_level` is one higher, `is_blocked` is set
    pub fn impose_phone_block(&self) -> Result<BlockState, StoreError> {
        let now = self.env.now_millis();
        let current = self.load()?.effective_at(now);

        let level = (current.attempt_level as usize).min(PHONE_BLOCK_DURATIONS.len() - 1);
        let duration = PHONE_BLOCK_DURATIONS[level];

        let next = BlockState {
            is_blocked: true,
            block_until: now.saturating_add(millis(duration)),
            attempt_level: current.attempt_level.saturating_add(1),
            ..current
        };

        self.persist(&next)?;
        tracing::info!(
            attempt_level = next.attempt_level,
            duration_secs = duration.as_secs(),
            "phone requests blocked"
        );
        Ok(next)
    }

    /// Record one wrong code.
    ///
    /// Reaching [`CODE_FAILURE_THRESHOLD`] blocks for [`CODE_FAILURE_BLOCK`].
    /// The record is persisted whether or not the threshold was crossed.
    pub fn register_code_failure(&self) -> Result<BlockState, StoreError> {
        let now = self.env.now_millis();
        let current = self.load()?.effective_at(now);

        let mut next =
            BlockState { code_failures: current.code_failures.saturating_add(1), ..current };

        if next.code_failures >= CODE_FAILURE_THRESHOLD {
            next.is_blocked = true;
            next.block_until = now.saturating_add(millis(CODE_FAILURE_BLOCK));
            tracing::info!(code_failures = next.code_failures, "code entry blocked");
        } else {
            tracing::debug!(code_failures = next.code_failures, "wrong code registered");
        }

        self.persist(&next)?;
        Ok(next)
    }

    /// Injected store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Injected environment.
    pub fn env(&self) -> &E {
        &self.env
    }

    /// Raw stored record, without expiry.
    ///
    /// Malformed content is treated as absent so the next write replaces it.
    fn load(&self) -> Result<BlockState, StoreError> {
        let Some(json) = self.store.load()? else {
            return Ok(BlockState::default());
        };

        match serde_json::from_str(&json) {
            Ok(state) => Ok(state),
            Err(e) => {
                tracing::warn!(error = %e, "discarding malformed block record");
                Ok(BlockState::default())
            },
        }
    }

    fn persist(&self, state: &BlockState) -> Result<(), StoreError> {
        let json = serde_json::to_string(state)?;
        self.store.save(&json)
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

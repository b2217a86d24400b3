//! The persisted block record.
//!
//! [`BlockState`] is the only entity phonegate persists. It is stored as JSON
//! with camelCase field names so the layout matches what the browser front-end
//! kept in local storage.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Lockout record for one client installation.
///
/// Missing fields decode as zero/false, so records written before a field
/// existed still load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BlockState {
    /// Attempts are currently disallowed (subject to lazy expiry).
    pub is_blocked: bool,
    /// Moment the block lifts, in milliseconds since the Unix epoch.
    ///
    /// Only meaningful while `is_blocked` is set.
    pub block_until: u64,
    /// Number of phone-request blocks ever imposed. Never decreases.
    pub attempt_level: u32,
    /// Consecutive wrong-code entries since the last reset.
    pub code_failures: u32,
}

impl BlockState {
    /// View of this record as of `now_ms`, with lazy expiry applied.
    ///
    /// A block whose deadline has strictly passed reads as unblocked with
    /// `code_failures` reset. `attempt_level` is left untouched so phone
    /// blocks keep escalating across expired windows.
    pub fn effective_at(self, now_ms: u64) -> Self {
        if self.is_blocked && now_ms > self.block_until {
            Self { is_blocked: false, code_failures: 0, ..self }
        } else {
            self
        }
    }

    /// Whether the block is still active at `now_ms`.
    ///
    /// Stricter than the stored flag: the deadline itself counts as lifted.
    pub fn is_blocked_at(&self, now_ms: u64) -> bool {
        self.is_blocked && self.block_until > now_ms
    }

    /// Time left until the block lifts. Zero when not blocked.
    pub fn remaining_at(&self, now_ms: u64) -> Duration {
        if self.is_blocked {
            Duration::from_millis(self.block_until.saturating_sub(now_ms))
        } else {
            Duration::ZERO
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blocked_until(block_until: u64) -> BlockState {
        BlockState { is_blocked: true, block_until, attempt_level: 2, code_failures: 3 }
    }

    #[test]
    fn json_layout_uses_camel_case() {
        let state = blocked_until(1_700_000_000_000);
        let json = serde_json::to_string(&state).unwrap();

        assert_eq!(
            json,
            r#"{"isBlocked":true,"blockUntil":1700000000000,"attemptLevel":2,"codeFailures":3}"#
        );
    }

    #[test]
    fn missing_fields_default_to_zero() {
        let state: BlockState =
            serde_json::from_str(r#"{"isBlocked":false,"blockUntil":0,"attemptLevel":1}"#)
                .unwrap();

        assert_eq!(state.code_failures, 0);
        assert_eq!(state.attempt_level, 1);
    }

    #[test]
    fn expired_block_reads_as_unblocked() {
        let effective = blocked_until(1_000).effective_at(1_001);

        assert!(!effective.is_blocked);
        assert_eq!(effective.code_failures, 0);
        assert_eq!(effective.attempt_level, 2, "attempt level survives expiry");
        assert_eq!(effective.block_until, 1_000);
    }

    #[test]
    fn block_is_kept_at_exact_deadline() {
        let state = blocked_until(1_000);

        assert_eq!(state.effective_at(1_000), state);
        assert!(!state.is_blocked_at(1_000), "deadline itself is not blocked");
        assert!(state.is_blocked_at(999));
    }

    #[test]
    fn remaining_saturates() {
        let state = blocked_until(5_000);

        assert_eq!(state.remaining_at(2_000), Duration::from_millis(3_000));
        assert_eq!(state.remaining_at(9_000), Duration::ZERO);
        assert_eq!(BlockState::default().remaining_at(0), Duration::ZERO);
    }
}

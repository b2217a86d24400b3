//! Property-based tests for the lockout tracker.
//!
//! Arbitrary interleavings of failures, imposed blocks and elapsed time must
//! keep the escalation table, the read-only guarantee and the gate consistent.

use std::time::Duration;

use phonegate_core::{
    BlockStatus, CODE_FAILURE_BLOCK, CODE_FAILURE_THRESHOLD, Environment, LockoutTracker,
    MemoryStore, PHONE_BLOCK_DURATIONS,
};
use phonegate_harness::SimEnv;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    ImposePhoneBlock,
    CodeFailure,
    Advance(u64),
    Read,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        2 => Just(Op::ImposePhoneBlock),
        3 => Just(Op::CodeFailure),
        3 => (0u64..=100_000_000).prop_map(Op::Advance),
        2 => Just(Op::Read),
    ]
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap()
}

proptest! {
    #[test]
    fn prop_tracker_invariants_hold(ops in prop::collection::vec(op_strategy(), 0..80)) {
        let store = MemoryStore::new();
        let env = SimEnv::new();
        let tracker = LockoutTracker::new(store.clone(), env.clone());

        for op in ops {
            let before = tracker.read_state().unwrap();
            let writes = store.write_count();
            let now = env.now_millis();

            match op {
                Op::ImposePhoneBlock => {
                    let state = tracker.impose_phone_block().unwrap();
                    let level = (before.attempt_level as usize).min(PHONE_BLOCK_DURATIONS.len() - 1);

                    prop_assert!(state.is_blocked);
                    prop_assert_eq!(state.attempt_level, before.attempt_level + 1);
                    prop_assert_eq!(state.block_until, now + millis(PHONE_BLOCK_DURATIONS[level]));
                    prop_assert_eq!(store.write_count(), writes + 1);
                },
                Op::CodeFailure => {
                    let state = tracker.register_code_failure().unwrap();

                    prop_assert_eq!(state.code_failures, before.code_failures + 1);
                    prop_assert_eq!(state.attempt_level, before.attempt_level);
                    if state.code_failures >= CODE_FAILURE_THRESHOLD {
                        prop_assert!(state.is_blocked);
                        prop_assert_eq!(state.block_until, now + millis(CODE_FAILURE_BLOCK));
                    }
                    prop_assert_eq!(store.write_count(), writes + 1);
                },
                Op::Advance(ms) => env.advance(Duration::from_millis(ms)),
                Op::Read => {
                    let first = tracker.read_state().unwrap();
                    let second = tracker.read_state().unwrap();
                    let status = tracker.status().unwrap();

                    prop_assert_eq!(first, second, "reads are idempotent");
                    prop_assert_eq!(store.write_count(), writes, "reads never write");
                    prop_assert_eq!(
                        status.is_blocked(),
                        first.is_blocked && first.block_until > now
                    );
                    if let BlockStatus::Blocked { remaining } = status {
                        prop_assert_eq!(millis(remaining), first.block_until - now);
                    }
                },
            }
        }
    }
}

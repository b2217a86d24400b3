//! Crash recovery tests for `RedbStore`.
//!
//! These tests verify that the block record persists across database
//! close/reopen cycles, simulating client restarts.

use std::time::Duration;

use phonegate_core::{BlockStatus, BlockStore, Environment, LockoutTracker, RedbStore};
use phonegate_harness::SimEnv;
use tempfile::tempdir;

#[test]
fn test_code_block_survives_restart() {
    let dir = tempdir().unwrap();
    let db_path = dir.path().join("state.redb");
    let env = SimEnv::new();

    {
        let tracker = LockoutTracker::new(RedbStore::open(&db_path).unwrap(), env.clone());
        for _ in 0..3 {
            tracker.register_code_failure().unwrap();
        }

        // Database dropped
    }

    env.advance(Duration::from_secs(60 * 60));

    {
        let tracker = LockoutTracker::new(RedbStore::open(&db_path).unwrap(), env.clone());

        assert_eq!(tracker.status().unwrap(), BlockStatus::Blocked {
            remaining: Duration::from_secs(23 * 60 * 60)
        });
        assert_eq!(tracker.read_state().unwrap().code_failures, 3);
    }
}

#[test]
fn test_attempt_level_survives_restart() {
    let dir = tempdir().unwrap();
    let db_path = dir.path().join("state.redb");
    let env = SimEnv::new();

    {
        let tracker = LockoutTracker::new(RedbStore::open(&db_path).unwrap(), env.clone());
        tracker.impose_phone_block().unwrap();
    }

    env.advance(Duration::from_secs(10 * 60));

    {
        let tracker = LockoutTracker::new(RedbStore::open(&db_path).unwrap(), env.clone());
        assert_eq!(tracker.status().unwrap(), BlockStatus::Open);

        let state = tracker.impose_phone_block().unwrap();
        assert_eq!(state.attempt_level, 2);
        assert_eq!(state.block_until, env.now_millis() + 15 * 60 * 1_000);
    }
}

#[test]
fn test_record_uses_camel_case_layout() {
    let dir = tempdir().unwrap();
    let store = RedbStore::open(dir.path().join("state.redb")).unwrap();
    let tracker = LockoutTracker::new(store.clone(), SimEnv::at(1_000));

    tracker.register_code_failure().unwrap();

    insta::assert_snapshot!(
        store.load().unwrap().unwrap(),
        @r#"{"isBlocked":false,"blockUntil":0,"attemptLevel":0,"codeFailures":1}"#
    );
}

#[test]
fn test_malformed_record_is_replaced() {
    let dir = tempdir().unwrap();
    let db_path = dir.path().join("state.redb");

    {
        let store = RedbStore::open(&db_path).unwrap();
        store.save("{\"isBlocked\": tru").unwrap();
    }

    let store = RedbStore::open(&db_path).unwrap();
    let tracker = LockoutTracker::new(store.clone(), SimEnv::new());

    assert_eq!(tracker.status().unwrap(), BlockStatus::Open);
    tracker.impose_phone_block().unwrap();
    assert!(store.load().unwrap().unwrap().starts_with("{\"isBlocked\":true"));
}

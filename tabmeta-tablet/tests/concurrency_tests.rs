#![forbid(unsafe_code)]

//! Readers racing a writer on one tablet must only ever observe pairs the
//! state machine can actually produce.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tabmeta_tablet::{SchemaHashState, TabletMeta};
use tabmeta_test_utils::init_tracing_for_tests;

const READERS: usize = 8;
const CYCLES: i32 = 2_000;

/// The writer moves the tablet `k -> k + 1` every cycle, so a consistent read is
/// one of `Stable{k}`, `Pending{k, k+1}` or `Pending{k+1, k}`.
fn is_reachable(state: SchemaHashState) -> bool {
    match state {
        SchemaHashState::Stable { .. } => true,
        SchemaHashState::Pending { active, pending } => (active - pending).abs() == 1,
    }
}

#[test]
fn test_readers_never_observe_torn_pair() {
    init_tracing_for_tests();
    let meta = Arc::new(TabletMeta::from_parts(1, 1, 1, 1, 0).unwrap());
    let done = AtomicBool::new(false);

    std::thread::scope(|scope| {
        let readers: Vec<_> = (0..READERS)
            .map(|_| {
                let meta = Arc::clone(&meta);
                let done = &done;
                scope.spawn(move || {
                    let mut last_active = 0;
                    while !done.load(Ordering::Acquire) {
                        let state = meta.state();
                        assert!(is_reachable(state), "torn read: {state:?}");

                        // Each read is linearized, so active never moves back.
                        assert!(
                            state.active() >= last_active,
                            "active went backwards: {} after {}",
                            state.active(),
                            last_active
                        );
                        last_active = state.active();
                        assert!(state.contains(state.active()));

                        let snapshot = meta.snapshot();
                        assert!(is_reachable(snapshot.state));
                    }
                })
            })
            .collect();

        let writer = {
            let meta = Arc::clone(&meta);
            let done = &done;
            scope.spawn(move || {
                for k in 0..CYCLES {
                    meta.begin_transition(k + 1).unwrap();
                    meta.commit_transition().unwrap();
                    meta.clear_pending();
                    assert_eq!(meta.active_hash(), k + 1);
                }
                done.store(true, Ordering::Release);
            })
        };

        writer.join().unwrap();
        for reader in readers {
            reader.join().unwrap();
        }
    });

    assert_eq!(meta.state(), SchemaHashState::Stable { active: CYCLES });
}

#[test]
fn test_contains_hash_tracks_cutover_window() {
    init_tracing_for_tests();
    let meta = Arc::new(TabletMeta::from_parts(1, 1, 1, 2, 101).unwrap());
    meta.begin_transition(202).unwrap();

    std::thread::scope(|scope| {
        let readers: Vec<_> = (0..READERS)
            .map(|_| {
                let meta = Arc::clone(&meta);
                scope.spawn(move || {
                    // Until cleanup runs, both layouts stay valid no matter how
                    // the commit interleaves with these reads.
                    for _ in 0..10_000 {
                        assert!(meta.contains_hash(101));
                        assert!(meta.contains_hash(202));
                        assert!(!meta.contains_hash(303));
                    }
                })
            })
            .collect();

        meta.commit_transition().unwrap();
        for reader in readers {
            reader.join().unwrap();
        }
    });

    meta.clear_pending();
    assert!(!meta.contains_hash(101));
    assert!(meta.contains_hash(202));
}

#[test]
fn test_racing_begins_admit_exactly_one() {
    init_tracing_for_tests();
    let meta = Arc::new(TabletMeta::from_parts(1, 1, 1, 3, 101).unwrap());

    let outcomes: Vec<bool> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..16)
            .map(|i| {
                let meta = Arc::clone(&meta);
                scope.spawn(move || meta.begin_transition(1_000 + i).is_ok())
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(outcomes.iter().filter(|ok| **ok).count(), 1);
    let winner = meta.pending_hash().unwrap();
    assert!((1_000..1_016).contains(&winner));
    assert_eq!(meta.active_hash(), 101);
}

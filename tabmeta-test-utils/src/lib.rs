//! Helpers shared by the tablet metadata test suites.

use std::sync::Once;

use tabmeta_tablet::{SchemaHashState, TabletMeta};
use tabmeta_types::SCHEMA_HASH_NONE;

static INIT: Once = Once::new();

/// Initialize tracing for test binaries. Safe to call multiple times.
///
/// Honours `RUST_LOG`; defaults to `info` so transition debug events stay quiet
/// unless asked for (e.g. `RUST_LOG=tabmeta_tablet=debug`).
pub fn init_tracing_for_tests() {
    INIT.call_once(|| {
        use tracing_subscriber::filter::EnvFilter;
        use tracing_subscriber::fmt;
        let env = std::env::var("RUST_LOG").ok();
        let filter = match env {
            Some(_) => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            None => EnvFilter::new("info"),
        };
        fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_test_writer()
            .init();
    });
}

/// Assert the record-level invariants on one atomic read of `meta` and return
/// the state that was checked.
///
/// - the active hash is never the sentinel
/// - a pending hash is present iff a transition is in flight, and is never the
///   sentinel
/// - `describe()` renders the same pair
#[track_caller]
pub fn assert_schema_hash_invariants(meta: &TabletMeta) -> SchemaHashState {
    let snapshot = meta.snapshot();
    let state = snapshot.state;
    assert_ne!(state.active(), SCHEMA_HASH_NONE, "active hash is the sentinel");
    match state {
        SchemaHashState::Stable { .. } => assert_eq!(state.pending(), None),
        SchemaHashState::Pending { pending, .. } => {
            assert_ne!(pending, SCHEMA_HASH_NONE, "pending hash is the sentinel")
        }
    }
    assert!(state.contains(state.active()));
    assert!(!state.contains(SCHEMA_HASH_NONE));
    assert!(
        snapshot.to_string().ends_with(&state.to_string()),
        "describe output disagrees with state: {}",
        snapshot
    );
    state
}

#[cfg(feature = "auto-init")]
mod auto {
    // Use ctor to run at binary init time to avoid having to call init in every test.
    use ctor::ctor;

    #[ctor]
    fn init() {
        super::init_tracing_for_tests();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invariants_hold_across_a_cycle() {
        init_tracing_for_tests();
        let meta = TabletMeta::from_parts(1, 1, 1, 1, 11).unwrap();
        assert_eq!(
            assert_schema_hash_invariants(&meta),
            SchemaHashState::Stable { active: 11 }
        );
        meta.begin_transition(12).unwrap();
        assert_schema_hash_invariants(&meta);
        meta.commit_transition().unwrap();
        assert_schema_hash_invariants(&meta);
        meta.clear_pending();
        assert_eq!(
            assert_schema_hash_invariants(&meta),
            SchemaHashState::Stable { active: 12 }
        );
    }
}

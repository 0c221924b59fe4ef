#![forbid(unsafe_code)]

//! Randomised operation sequences checked against a flat reference model that
//! uses the legacy `(active, pending)` integer pair with `-1` for "none".

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use tabmeta_tablet::{TabletMeta, TabletMetaState};
use tabmeta_test_utils::{assert_schema_hash_invariants, init_tracing_for_tests};
use tabmeta_types::{SCHEMA_HASH_NONE, SchemaHash};

const STEPS: usize = 20_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FlatModel {
    active: SchemaHash,
    pending: SchemaHash,
}

impl FlatModel {
    fn begin(&mut self, hash: SchemaHash) -> bool {
        if self.pending != SCHEMA_HASH_NONE {
            return false;
        }
        self.pending = hash;
        true
    }

    fn commit(&mut self) -> bool {
        if self.pending == SCHEMA_HASH_NONE {
            return false;
        }
        std::mem::swap(&mut self.active, &mut self.pending);
        true
    }

    fn clear(&mut self) {
        self.pending = SCHEMA_HASH_NONE;
    }

    fn force(&mut self, hash: SchemaHash) {
        self.active = hash;
        self.pending = SCHEMA_HASH_NONE;
    }

    fn contains(&self, hash: SchemaHash) -> bool {
        hash != SCHEMA_HASH_NONE && (hash == self.active || hash == self.pending)
    }
}

fn run_sequence(seed: u64) {
    let mut rng = SmallRng::seed_from_u64(seed);
    let meta = TabletMeta::from_parts(3, 1, 4, 1, 5).unwrap();
    let mut model = FlatModel {
        active: 5,
        pending: SCHEMA_HASH_NONE,
    };

    for step in 0..STEPS {
        // Small hash domain so begin/contains collide often.
        let hash: SchemaHash = rng.random_range(0..16);
        match rng.random_range(0..5u8) {
            0 => assert_eq!(
                meta.begin_transition(hash).is_ok(),
                model.begin(hash),
                "seed {seed} step {step}: begin({hash})"
            ),
            1 => assert_eq!(
                meta.commit_transition().is_ok(),
                model.commit(),
                "seed {seed} step {step}: commit"
            ),
            2 => {
                let cleared = meta.clear_pending();
                let expected = (model.pending != SCHEMA_HASH_NONE).then_some(model.pending);
                assert_eq!(cleared, expected, "seed {seed} step {step}: clear");
                model.clear();
            }
            3 => {
                // Repair is rare in practice; keep it rare here too.
                if rng.random_bool(0.1) {
                    meta.force_reset(hash).unwrap();
                    model.force(hash);
                }
            }
            _ => {
                let probe: SchemaHash = rng.random_range(-1..16);
                assert_eq!(
                    meta.contains_hash(probe),
                    model.contains(probe),
                    "seed {seed} step {step}: contains({probe})"
                );
            }
        }

        assert_schema_hash_invariants(&meta);
        let exported = meta.export_state();
        assert_eq!(
            (exported.active_schema_hash, exported.pending_schema_hash),
            (model.active, model.pending),
            "seed {seed} step {step}"
        );
    }

    let restored =
        TabletMeta::from_state(TabletMetaState::decode(&meta.export_state().encode()).unwrap())
            .unwrap();
    assert_eq!(restored.snapshot(), meta.snapshot());
}

#[test]
fn test_random_sequences_match_flat_model() {
    init_tracing_for_tests();
    for seed in [0xC0FF_EE00_DADA_BEEF, 1, 42, 0x5EED] {
        run_sequence(seed);
    }
}

//! Tablet schema-hash versioning.
//!
//! Every tablet of a partitioned table owns a [`TabletMeta`]: its catalog
//! identity plus the schema hash its data is encoded in and, while an online
//! schema change runs, the schema hash it is migrating to.
//!
//! # Protocol
//!
//! A schema-change workflow drives each tablet through
//!
//! 1. [`TabletMeta::begin_transition`] once per change,
//! 2. then either [`TabletMeta::commit_transition`] followed by
//!    [`TabletMeta::clear_pending`], or [`TabletMeta::clear_pending`] alone to
//!    abandon the change.
//!
//! Query and compaction paths call [`TabletMeta::contains_hash`] to decide
//! whether a data file written under a given schema hash is still readable.
//! [`TabletMeta::force_reset`] is an unchecked repair hatch.
//!
//! # Concurrency
//!
//! Each record carries its own `RwLock`. Readers run in parallel; mutators
//! take the write guard for a single O(1) update. Nothing here locks more than
//! one tablet, so unrelated schema changes never contend.
//!
//! ```
//! use tabmeta_tablet::TabletMeta;
//!
//! let meta = TabletMeta::from_parts(1, 2, 3, 4, 101).unwrap();
//! meta.begin_transition(202).unwrap();
//! meta.commit_transition().unwrap();
//! assert!(meta.contains_hash(101));
//! meta.clear_pending();
//! assert!(!meta.contains_hash(101));
//! assert_eq!(meta.active_hash(), 202);
//! ```

#![forbid(unsafe_code)]

pub mod meta;
pub mod persist;
pub mod state;

pub use meta::{TabletMeta, TabletMetaSnapshot};
pub use persist::TabletMetaState;
pub use state::SchemaHashState;

//! tabmeta: per-tablet schema-hash metadata for a distributed analytical store
//!
//! This crate is the primary entrypoint for the tablet metadata layer. It
//! re-exports the state machine from `tabmeta-tablet` together with the shared
//! identifiers and error types, providing a unified API surface for catalog and
//! schema-change code.
//!
//! # Quick Start
//!
//! Drive one tablet through an online schema change:
//!
//! ```rust
//! use std::sync::Arc;
//! use tabmeta::{TabletKey, TabletMeta};
//!
//! let meta = Arc::new(TabletMeta::new(TabletKey::new(1, 2, 3, 4), 101).unwrap());
//! meta.begin_transition(202).unwrap();
//! meta.commit_transition().unwrap();
//! meta.clear_pending();
//! assert_eq!(meta.active_hash(), 202);
//! ```
//!
//! # Architecture
//!
//! - **Identifiers** (`tabmeta-types`): catalog id aliases, [`SchemaHash`], [`TabletKey`].
//! - **State machine** (`tabmeta-tablet`): [`SchemaHashState`] transition rules and the
//!   per-tablet locked [`TabletMeta`] record.
//! - **Errors** (`tabmeta-result`): the unified [`Error`] enum and [`Result`] alias.
//!
//! The tablet registry that owns records is not part of this crate; keep records
//! as `Arc<TabletMeta>` values in a map keyed by [`TabletKey`].

pub use tabmeta_tablet::{SchemaHashState, TabletMeta, TabletMetaSnapshot, TabletMetaState};

pub use tabmeta_types::{
    DatabaseId, IndexId, PartitionId, SCHEMA_HASH_NONE, SchemaHash, TableId, TabletKey,
};

// Re-export result types for error handling
pub use tabmeta_result::{Error, Result};

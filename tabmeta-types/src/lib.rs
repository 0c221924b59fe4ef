//! Shared identifier types for tablet metadata.
//!
//! - [`ids`]: catalog id aliases and the reserved [`SCHEMA_HASH_NONE`] sentinel
//! - [`TabletKey`]: the immutable identity of one tablet

pub mod ids;
pub mod tablet_key;

pub use ids::{
    DatabaseId, IndexId, PartitionId, SCHEMA_HASH_NONE, SchemaHash, TableId,
    is_reserved_schema_hash,
};
pub use tablet_key::TabletKey;

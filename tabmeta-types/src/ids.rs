//! Identifiers shared across tablet metadata crates.
//!
//! These types live in `tabmeta-types` so catalog code can name tablets and
//! schema layouts without depending on the state-machine crate.

/// Unique identifier for a database in the catalog.
pub type DatabaseId = u64;

/// Unique identifier for a table within the catalog.
pub type TableId = u64;

/// Unique identifier for a partition of a table.
pub type PartitionId = u64;

/// Unique identifier for a materialized index (base or rollup) of a table.
pub type IndexId = u64;

/// Fingerprint of a table's physical column/key layout.
///
/// A new value is minted by the schema-change planner whenever an online schema
/// change alters the on-disk layout. Data files are tagged with the schema hash
/// they were written under.
///
/// # Special Values
///
/// - [`SCHEMA_HASH_NONE`] (`-1`) is reserved and never names a layout
pub type SchemaHash = i32;

/// Schema hash meaning "no pending change" in the flat persisted encoding.
pub const SCHEMA_HASH_NONE: SchemaHash = -1;

/// Check if a schema hash is reserved (cannot name a layout).
#[inline]
pub fn is_reserved_schema_hash(hash: SchemaHash) -> bool {
    hash == SCHEMA_HASH_NONE
}

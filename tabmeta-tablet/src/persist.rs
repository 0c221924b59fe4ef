//! Flat, serializable form of a tablet metadata record.
//!
//! Durability belongs to the catalog layer. This module only converts a record
//! to and from a plain value it can write to its log or snapshot, using the
//! legacy `-1` encoding for "no pending change" so the layout matches existing
//! metadata images.

use tabmeta_result::{Error, Result};
use tabmeta_types::{DatabaseId, IndexId, PartitionId, SchemaHash, TableId, TabletKey};

use crate::meta::{TabletMeta, TabletMetaSnapshot};
use crate::state::SchemaHashState;

/// Serializable tablet metadata state for persistence.
#[derive(Debug, Clone, PartialEq, Eq, bitcode::Encode, bitcode::Decode)]
pub struct TabletMetaState {
    pub db_id: DatabaseId,
    pub table_id: TableId,
    pub partition_id: PartitionId,
    pub index_id: IndexId,
    pub active_schema_hash: SchemaHash,
    /// `-1` when no schema change is in flight.
    pub pending_schema_hash: SchemaHash,
}

impl TabletMetaState {
    pub fn key(&self) -> TabletKey {
        TabletKey::new(self.db_id, self.table_id, self.partition_id, self.index_id)
    }

    /// Decode the flat hash pair.
    ///
    /// # Errors
    ///
    /// `Error::ReservedSchemaHash` if the active hash is the sentinel.
    pub fn schema_hash_state(&self) -> Result<SchemaHashState> {
        SchemaHashState::from_flat(self.active_schema_hash, self.pending_schema_hash)
    }

    pub fn encode(&self) -> Vec<u8> {
        bitcode::encode(self)
    }

    /// Decode a state previously produced by [`TabletMetaState::encode`].
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        bitcode::decode(bytes)
            .map_err(|e| Error::CatalogError(format!("invalid tablet metadata state: {}", e)))
    }
}

impl From<TabletMetaSnapshot> for TabletMetaState {
    fn from(snapshot: TabletMetaSnapshot) -> Self {
        Self {
            db_id: snapshot.key.db_id(),
            table_id: snapshot.key.table_id(),
            partition_id: snapshot.key.partition_id(),
            index_id: snapshot.key.index_id(),
            active_schema_hash: snapshot.state.active(),
            pending_schema_hash: snapshot.state.pending_or_sentinel(),
        }
    }
}

impl TabletMeta {
    /// Export the record for persistence, reading the hash pair atomically.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let bytes = meta.export_state().encode();
    /// // ... write bytes to the metadata log ...
    /// let restored = TabletMeta::from_state(TabletMetaState::decode(&bytes)?)?;
    /// ```
    pub fn export_state(&self) -> TabletMetaState {
        self.snapshot().into()
    }

    /// Restore a record from persisted state.
    ///
    /// # Errors
    ///
    /// `Error::ReservedSchemaHash` if the persisted active hash is the sentinel.
    pub fn from_state(state: TabletMetaState) -> Result<Self> {
        let hashes = state.schema_hash_state()?;
        Ok(Self::with_state(state.key(), hashes))
    }
}

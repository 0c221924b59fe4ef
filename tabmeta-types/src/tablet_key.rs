use std::fmt;

use crate::ids::{DatabaseId, IndexId, PartitionId, TableId};

/// Logical position of a tablet in the catalog.
///
/// A `TabletKey` combines the four catalog identifiers that own a tablet. It is
/// the natural key for a tablet registry: `Copy`, hashable, and totally ordered
/// by database, then table, partition, and index.
///
/// The core performs no validation; the catalog is responsible for handing out
/// ids that actually exist.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TabletKey {
    db_id: DatabaseId,
    table_id: TableId,
    partition_id: PartitionId,
    index_id: IndexId,
}

impl TabletKey {
    pub const fn new(
        db_id: DatabaseId,
        table_id: TableId,
        partition_id: PartitionId,
        index_id: IndexId,
    ) -> Self {
        Self {
            db_id,
            table_id,
            partition_id,
            index_id,
        }
    }

    #[inline]
    pub const fn db_id(&self) -> DatabaseId {
        self.db_id
    }

    #[inline]
    pub const fn table_id(&self) -> TableId {
        self.table_id
    }

    #[inline]
    pub const fn partition_id(&self) -> PartitionId {
        self.partition_id
    }

    #[inline]
    pub const fn index_id(&self) -> IndexId {
        self.index_id
    }
}

impl fmt::Display for TabletKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "db={}/table={}/partition={}/index={}",
            self.db_id, self.table_id, self.partition_id, self.index_id
        )
    }
}

//! Per-tablet metadata record.
//!
//! A [`TabletMeta`] pairs an immutable [`TabletKey`] with a [`SchemaHashState`]
//! behind its own reader/writer lock. Records are meant to be shared as
//! `Arc<TabletMeta>` out of an externally owned registry keyed by
//! [`TabletKey`]; no operation here ever touches another record's lock.
//!
//! Every mutator holds the write guard only for the O(1) state update. Logging
//! happens after the guard is released.

use std::fmt;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tabmeta_result::Result;
use tabmeta_types::{DatabaseId, IndexId, PartitionId, SchemaHash, TableId, TabletKey};

use crate::state::{SchemaHashState, check_schema_hash};

/// Schema-hash metadata for one tablet.
#[derive(Debug)]
pub struct TabletMeta {
    key: TabletKey,
    state: RwLock<SchemaHashState>,
}

/// Identity and schema-hash state captured under a single read guard.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TabletMetaSnapshot {
    pub key: TabletKey,
    pub state: SchemaHashState,
}

impl fmt::Display for TabletMetaSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "db_id={} table_id={} partition_id={} index_id={} {}",
            self.key.db_id(),
            self.key.table_id(),
            self.key.partition_id(),
            self.key.index_id(),
            self.state
        )
    }
}

impl TabletMeta {
    /// Create the record for a newly created tablet: stable on `initial`.
    ///
    /// # Errors
    ///
    /// [`Error::ReservedSchemaHash`](tabmeta_result::Error::ReservedSchemaHash) if `initial` is the sentinel.
    pub fn new(key: TabletKey, initial: SchemaHash) -> Result<Self> {
        Ok(Self::with_state(key, SchemaHashState::stable(initial)?))
    }

    pub fn from_parts(
        db_id: DatabaseId,
        table_id: TableId,
        partition_id: PartitionId,
        index_id: IndexId,
        initial: SchemaHash,
    ) -> Result<Self> {
        Self::new(
            TabletKey::new(db_id, table_id, partition_id, index_id),
            initial,
        )
    }

    pub(crate) fn with_state(key: TabletKey, state: SchemaHashState) -> Self {
        Self {
            key,
            state: RwLock::new(state),
        }
    }

    // Identity accessors need no locking.

    #[inline]
    pub fn key(&self) -> TabletKey {
        self.key
    }

    #[inline]
    pub fn db_id(&self) -> DatabaseId {
        self.key.db_id()
    }

    #[inline]
    pub fn table_id(&self) -> TableId {
        self.key.table_id()
    }

    #[inline]
    pub fn partition_id(&self) -> PartitionId {
        self.key.partition_id()
    }

    #[inline]
    pub fn index_id(&self) -> IndexId {
        self.key.index_id()
    }

    // A writer only ever stores a fully computed `Copy` value, so the pair is
    // consistent even if some unrelated panic poisoned the lock.
    fn read_state(&self) -> RwLockReadGuard<'_, SchemaHashState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, SchemaHashState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Apply `rule` under the write guard and return `(before, after)`.
    ///
    /// On error the stored state is untouched and the guard is released before
    /// the error reaches the caller.
    fn transition<F>(&self, rule: F) -> Result<(SchemaHashState, SchemaHashState)>
    where
        F: FnOnce(SchemaHashState) -> Result<SchemaHashState>,
    {
        let mut state = self.write_state();
        let before = *state;
        let after = rule(before)?;
        *state = after;
        Ok((before, after))
    }

    /// Start a schema change towards `new_hash`.
    ///
    /// # Errors
    ///
    /// [`Error::TransitionInFlight`](tabmeta_result::Error::TransitionInFlight) if a change is already pending, which means
    /// two schema changes were started on this tablet without external
    /// serialization. The state is left unchanged.
    pub fn begin_transition(&self, new_hash: SchemaHash) -> Result<()> {
        match self.transition(|state| state.begin(new_hash)) {
            Ok((_, after)) => {
                tracing::debug!(
                    tablet = %self.key,
                    active = after.active(),
                    pending = new_hash,
                    "began schema hash transition"
                );
                Ok(())
            }
            Err(err) => {
                tracing::debug!(tablet = %self.key, error = %err, "rejected schema hash transition");
                Err(err)
            }
        }
    }

    /// Cut over to the pending layout.
    ///
    /// The previous active hash moves into the pending slot and stays
    /// recognised by [`contains_hash`](Self::contains_hash) until
    /// [`clear_pending`](Self::clear_pending) runs.
    ///
    /// # Errors
    ///
    /// [`Error::NoTransitionInFlight`](tabmeta_result::Error::NoTransitionInFlight) if no change was begun.
    pub fn commit_transition(&self) -> Result<()> {
        match self.transition(SchemaHashState::commit) {
            Ok((_, after)) => {
                tracing::debug!(
                    tablet = %self.key,
                    active = after.active(),
                    pending = after.pending_or_sentinel(),
                    "committed schema hash transition"
                );
                Ok(())
            }
            Err(err) => {
                tracing::debug!(tablet = %self.key, error = %err, "rejected schema hash commit");
                Err(err)
            }
        }
    }

    /// Drop the pending hash, whatever state the tablet is in.
    ///
    /// Used to finish a committed change once no reader needs the old layout,
    /// or to abandon a change that never committed. Returns the hash that was
    /// cleared, if any.
    pub fn clear_pending(&self) -> Option<SchemaHash> {
        let (before, after) = {
            let mut state = self.write_state();
            let before = *state;
            *state = before.cleared();
            (before, *state)
        };
        tracing::debug!(
            tablet = %self.key,
            active = after.active(),
            cleared = before.pending_or_sentinel(),
            "cleared pending schema hash"
        );
        before.pending()
    }

    /// Overwrite the state with `Stable { active: hash }`.
    ///
    /// Metadata-repair escape hatch. Any in-flight transition bookkeeping is
    /// discarded without checks; making sure no schema change is legitimately
    /// running is the caller's job.
    ///
    /// # Errors
    ///
    /// [`Error::ReservedSchemaHash`](tabmeta_result::Error::ReservedSchemaHash) if `hash` is the sentinel.
    pub fn force_reset(&self, hash: SchemaHash) -> Result<()> {
        let hash = check_schema_hash(hash)?;
        let (before, _) = self.transition(|_| Ok(SchemaHashState::Stable { active: hash }))?;
        if let Some(discarded) = before.pending() {
            tracing::warn!(
                tablet = %self.key,
                previous_active = before.active(),
                discarded_pending = discarded,
                active = hash,
                "force reset discarded in-flight schema hash transition"
            );
        } else {
            tracing::debug!(
                tablet = %self.key,
                previous_active = before.active(),
                active = hash,
                "force reset schema hash"
            );
        }
        Ok(())
    }

    /// The schema hash tablet data is currently encoded in.
    pub fn active_hash(&self) -> SchemaHash {
        self.read_state().active()
    }

    pub fn pending_hash(&self) -> Option<SchemaHash> {
        self.read_state().pending()
    }

    pub fn is_transition_pending(&self) -> bool {
        self.read_state().is_pending()
    }

    /// Whether a data file tagged with `hash` is still a valid layout for this
    /// tablet. False for every value other than the current active and pending
    /// hashes, including the sentinel.
    pub fn contains_hash(&self, hash: SchemaHash) -> bool {
        self.read_state().contains(hash)
    }

    /// Both hashes, read atomically.
    pub fn state(&self) -> SchemaHashState {
        *self.read_state()
    }

    pub fn snapshot(&self) -> TabletMetaSnapshot {
        TabletMetaSnapshot {
            key: self.key,
            state: self.state(),
        }
    }

    /// Human-readable dump of every field for diagnostics.
    ///
    /// ```text
    /// db_id=1 table_id=2 partition_id=3 index_id=4 active_schema_hash=101 pending_schema_hash=-1
    /// ```
    pub fn describe(&self) -> String {
        self.snapshot().to_string()
    }
}

impl fmt::Display for TabletMeta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.snapshot(), f)
    }
}

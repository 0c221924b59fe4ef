//! Schema-hash versioning state for a single tablet.
//!
//! [`SchemaHashState`] is a plain `Copy` value carrying the transition rules.
//! It knows nothing about locking; [`TabletMeta`](crate::TabletMeta) wraps it in
//! a per-tablet guard and applies these rules under exclusive access.
//!
//! # States
//!
//! - **Stable**: the tablet has exactly one valid on-disk layout, `active`.
//! - **Pending**: a schema change is in flight. Both `active` (old layout, still
//!   read and written by in-flight operations) and `pending` (new layout, being
//!   populated by the migration) are valid existing layouts.
//!
//! # Transitions
//!
//! ```text
//!                 begin(h)                      commit
//!   Stable{a} -------------> Pending{a, h} -------------> Pending{h, a}
//!       ^                          |                            |
//!       |        cleared           |          cleared           |
//!       +--------------------------+----------------------------+
//! ```
//!
//! `commit` swaps the two hashes instead of dropping the old one, so readers
//! that cached the previous active hash still see it accepted by
//! [`SchemaHashState::contains`] until the workflow runs the separate cleanup
//! step. There is no rollback transition.

use std::fmt;

use tabmeta_result::{Error, Result};
use tabmeta_types::{SCHEMA_HASH_NONE, SchemaHash, is_reserved_schema_hash};

/// Active and pending schema hashes of one tablet.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SchemaHashState {
    /// No schema change in flight.
    Stable { active: SchemaHash },
    /// A schema change is migrating the tablet between two layouts.
    Pending {
        active: SchemaHash,
        pending: SchemaHash,
    },
}

/// Reject the reserved sentinel where a real layout is required.
#[inline]
pub(crate) fn check_schema_hash(hash: SchemaHash) -> Result<SchemaHash> {
    if is_reserved_schema_hash(hash) {
        return Err(Error::ReservedSchemaHash(hash));
    }
    Ok(hash)
}

impl SchemaHashState {
    /// Create a stable state whose only layout is `active`.
    pub fn stable(active: SchemaHash) -> Result<Self> {
        Ok(Self::Stable {
            active: check_schema_hash(active)?,
        })
    }

    /// The layout tablet data is currently encoded in.
    #[inline]
    pub const fn active(&self) -> SchemaHash {
        match *self {
            Self::Stable { active } | Self::Pending { active, .. } => active,
        }
    }

    /// The second valid layout while a change is in flight.
    #[inline]
    pub const fn pending(&self) -> Option<SchemaHash> {
        match *self {
            Self::Stable { .. } => None,
            Self::Pending { pending, .. } => Some(pending),
        }
    }

    #[inline]
    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::Pending { .. })
    }

    /// Whether a data file written under `hash` is a valid layout for the tablet.
    ///
    /// The reserved sentinel is never contained because neither slot can hold it.
    #[inline]
    pub const fn contains(&self, hash: SchemaHash) -> bool {
        match *self {
            Self::Stable { active } => active == hash,
            Self::Pending { active, pending } => active == hash || pending == hash,
        }
    }

    /// Stable → Pending with `new_hash` as the migration target.
    ///
    /// # Errors
    ///
    /// [`Error::TransitionInFlight`] if a change is already pending, then
    /// [`Error::ReservedSchemaHash`] if `new_hash` is the sentinel.
    pub fn begin(self, new_hash: SchemaHash) -> Result<Self> {
        match self {
            Self::Stable { active } => Ok(Self::Pending {
                active,
                pending: check_schema_hash(new_hash)?,
            }),
            Self::Pending { active, pending } => {
                Err(Error::TransitionInFlight { active, pending })
            }
        }
    }

    /// Cut over to the pending layout, keeping the previous active hash in the
    /// pending slot.
    ///
    /// # Errors
    ///
    /// [`Error::NoTransitionInFlight`] if the state is stable.
    pub fn commit(self) -> Result<Self> {
        match self {
            Self::Stable { active } => Err(Error::NoTransitionInFlight { active }),
            Self::Pending { active, pending } => Ok(Self::Pending {
                active: pending,
                pending: active,
            }),
        }
    }

    /// Drop the pending slot, whatever it holds.
    #[inline]
    pub const fn cleared(self) -> Self {
        Self::Stable {
            active: self.active(),
        }
    }

    /// Pending hash in the flat encoding, with [`SCHEMA_HASH_NONE`] for "none".
    #[inline]
    pub const fn pending_or_sentinel(&self) -> SchemaHash {
        match *self {
            Self::Stable { .. } => SCHEMA_HASH_NONE,
            Self::Pending { pending, .. } => pending,
        }
    }

    /// Rebuild a state from the flat `(active, pending)` encoding.
    pub fn from_flat(active: SchemaHash, pending: SchemaHash) -> Result<Self> {
        let active = check_schema_hash(active)?;
        if is_reserved_schema_hash(pending) {
            Ok(Self::Stable { active })
        } else {
            Ok(Self::Pending { active, pending })
        }
    }
}

impl fmt::Display for SchemaHashState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "active_schema_hash={} pending_schema_hash={}",
            self.active(),
            self.pending_or_sentinel()
        )
    }
}

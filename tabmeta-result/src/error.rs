use thiserror::Error;

/// Unified error type for all tablet metadata operations.
///
/// The schema-hash state machine has exactly one recoverable-looking failure
/// mode, a precondition violation, and it is reported through the two
/// transition variants below. Everything else is construction-time input
/// checking or state decoding.
///
/// # Error Handling Strategy
///
/// Errors propagate upward with the `?` operator. A transition error means the
/// orchestration layer drove a tablet out of protocol (for example two schema
/// changes racing on one tablet without external serialization). The core never
/// absorbs or retries it; the caller decides whether to abort the job.
///
/// # Thread Safety
///
/// `Error` implements `Send` and `Sync`, so it can cross the worker threads that
/// run schema-change jobs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A schema change was started on a tablet that already has one in flight.
    ///
    /// Raised by `begin_transition`. The tablet state is left untouched: the
    /// existing pending hash remains the target of the in-flight change.
    #[error("schema change already in flight: active_schema_hash={active} pending_schema_hash={pending}")]
    TransitionInFlight { active: i32, pending: i32 },

    /// A schema change was committed on a tablet with no change in flight.
    ///
    /// Raised by `commit_transition` when there was no prior
    /// `begin_transition`. The tablet state is left untouched.
    #[error("no schema change in flight: active_schema_hash={active}")]
    NoTransitionInFlight { active: i32 },

    /// The reserved "no pending change" sentinel was supplied where a real
    /// schema hash is required.
    ///
    /// `-1` is only meaningful in the flat persisted encoding; it can never be
    /// an active or pending layout.
    #[error("schema hash {0} is reserved and cannot name a layout")]
    ReservedSchemaHash(i32),

    /// Persisted tablet metadata could not be decoded or is inconsistent.
    #[error("{0}")]
    CatalogError(String),

}

impl Error {
    /// Whether this error reports a schema-change protocol violation.
    ///
    /// # Examples
    ///
    /// ```
    /// use tabmeta_result::Error;
    ///
    /// let err = Error::NoTransitionInFlight { active: 101 };
    /// assert!(err.is_contract_violation());
    /// assert!(!Error::ReservedSchemaHash(-1).is_contract_violation());
    /// ```
    #[inline]
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            Error::TransitionInFlight { .. } | Error::NoTransitionInFlight { .. }
        )
    }
}

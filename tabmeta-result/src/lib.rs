//! Error types and result definitions for tablet metadata.
//!
//! This crate provides the unified error type ([`Error`]) and result alias
//! ([`Result<T>`]) used by every `tabmeta-*` crate.
//!
//! # Error Categories
//!
//! - **Protocol violations** ([`Error::TransitionInFlight`],
//!   [`Error::NoTransitionInFlight`]): a schema-change workflow called a
//!   transition out of order
//! - **Reserved values** ([`Error::ReservedSchemaHash`]): the legacy `-1`
//!   sentinel used as a real schema hash
//! - **Persisted state** ([`Error::CatalogError`]): exported metadata that cannot
//!   be decoded or restored

pub mod error;
pub mod result;

pub use error::Error;
pub use result::Result;

use crate::error::Error;

/// Result type alias used throughout the tablet metadata crates.
pub type Result<T> = std::result::Result<T, Error>;

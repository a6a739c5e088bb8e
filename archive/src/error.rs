//! Error types for archive operations

use thiserror::Error;

/// Error type for archive operations
///
/// Reads fail for one of two reasons: the input ended before the value did, or the bytes that
/// were present do not decode to a value of the requested type.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    #[error("input exhausted")]
    InputExhausted,
    #[error("invalid input in {0}: {1}")]
    InvalidInput(&'static str, &'static str), // context, message
}

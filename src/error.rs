//! Error type shared by every module of the crate.

use thiserror::Error;

/// Errors reported by code construction, encoding, decoding and the drivers around them.
///
/// An ambiguous decode is not an error; see [`crate::Decoding::Ambiguous`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Reed-Muller parameters violate `r < m`.
    #[error("invalid parameters RM({order},{variables}): require r < m")]
    InvalidParameters { order: usize, variables: usize },

    /// An input vector does not have the exact length the operation needs.
    #[error("expected a vector of length {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// An input exceeds what the implementation is willing to build or enumerate.
    #[error("input of size {length} exceeds the maximum of {max_length}")]
    InputTooLarge { length: usize, max_length: usize },

    /// A textual word contains something other than `0` or `1`.
    #[error("invalid symbol {symbol:?} at position {position}, expected 0 or 1")]
    InvalidSymbol { symbol: char, position: usize },

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

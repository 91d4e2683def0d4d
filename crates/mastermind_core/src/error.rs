//! Error types for game setup and guess validation.

use crate::session::GameStatus;
use crate::types::Symbol;
use serde::{Deserialize, Serialize};

/// Error raised when a guess cannot be recorded.
///
/// None of these leave a mark on the session: the guess is rejected
/// before any state changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_more::Display)]
pub enum GuessError {
    /// The guess has the wrong number of symbols.
    #[display("Guess has {actual} numbers but the code has {expected}")]
    LengthMismatch {
        /// Configured code length.
        expected: usize,
        /// Length of the rejected guess.
        actual: usize,
    },

    /// A symbol lies outside the allowed range.
    #[display("Number {value} at position {} must be between {lower} and {upper}", position + 1)]
    OutOfBounds {
        /// Zero-based index of the offending symbol.
        position: usize,
        /// The offending symbol.
        value: Symbol,
        /// Smallest allowed symbol.
        lower: Symbol,
        /// Largest allowed symbol.
        upper: Symbol,
    },

    /// The game has already finished.
    #[display("Game is already over ({})", _0)]
    InvalidState(GameStatus),

    /// A postcondition failed after applying the guess.
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(String),
}

impl std::error::Error for GuessError {}

/// Error raised when game rules or a secret are rejected.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum SetupError {
    /// Code length of zero.
    #[display("Code length must be at least 1")]
    EmptyCode,

    /// Guess budget of zero.
    #[display("At least one attempt is required")]
    NoAttempts,

    /// Lower bound above upper bound.
    #[display("Lower bound {lower} is greater than upper bound {upper}")]
    InvertedRange {
        /// Requested lower bound.
        lower: Symbol,
        /// Requested upper bound.
        upper: Symbol,
    },

    /// Secret length differs from the configured code length.
    #[display("Secret has {actual} numbers but the code has {expected}")]
    SecretLengthMismatch {
        /// Configured code length.
        expected: usize,
        /// Length of the provided secret.
        actual: usize,
    },

    /// Secret contains a symbol outside the range.
    #[display("Secret number {value} at position {position} is outside {lower}-{upper}")]
    SecretOutOfBounds {
        /// Zero-based index of the offending symbol.
        position: usize,
        /// The offending symbol.
        value: Symbol,
        /// Smallest allowed symbol.
        lower: Symbol,
        /// Largest allowed symbol.
        upper: Symbol,
    },
}

impl std::error::Error for SetupError {}

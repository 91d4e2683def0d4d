//! Parsing player input into guess symbols.

use mastermind_core::Symbol;
use tracing::instrument;

/// Error raised when guess text is not a list of integers.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum InputError {
    /// Nothing was entered.
    #[display("Your guess is invalid; please enter some numbers.")]
    Empty,

    /// A token was not an integer.
    #[display(
        "Your guess is invalid; you must only input integers here. ({token:?} at position {})",
        position + 1
    )]
    NotAnInteger {
        /// Zero-based index of the token.
        position: usize,
        /// The offending token.
        token: String,
    },
}

impl std::error::Error for InputError {}

/// Splits `text` on whitespace and commas into symbols.
#[instrument(skip(text))]
pub fn parse_guess(text: &str) -> Result<Vec<Symbol>, InputError> {
    let tokens: Vec<&str> = text
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
        .collect();
    if tokens.is_empty() {
        return Err(InputError::Empty);
    }
    tokens
        .iter()
        .enumerate()
        .map(|(position, token)| {
            token.parse::<Symbol>().map_err(|_| InputError::NotAnInteger {
                position,
                token: (*token).to_string(),
            })
        })
        .collect()
}

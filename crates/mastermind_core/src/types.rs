//! Core domain types for Mastermind.

use crate::error::SetupError;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};
use tracing::instrument;

/// A single symbol in a code.
pub type Symbol = i32;

/// Inclusive range of allowed symbol values.
///
/// Deserialization goes through [`SymbolRange::new`], so an inverted range
/// is rejected wherever it comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RangeBounds")]
pub struct SymbolRange {
    lower: Symbol,
    upper: Symbol,
}

/// Unchecked wire form of [`SymbolRange`].
#[derive(Deserialize)]
struct RangeBounds {
    lower: Symbol,
    upper: Symbol,
}

impl TryFrom<RangeBounds> for SymbolRange {
    type Error = SetupError;

    fn try_from(bounds: RangeBounds) -> Result<Self, Self::Error> {
        Self::new(bounds.lower, bounds.upper)
    }
}

impl SymbolRange {
    /// Creates a range, rejecting `lower > upper`.
    #[instrument]
    pub fn new(lower: Symbol, upper: Symbol) -> Result<Self, SetupError> {
        if lower > upper {
            return Err(SetupError::InvertedRange { lower, upper });
        }
        Ok(Self { lower, upper })
    }

    /// Smallest allowed symbol.
    pub fn lower(&self) -> Symbol {
        self.lower
    }

    /// Largest allowed symbol.
    pub fn upper(&self) -> Symbol {
        self.upper
    }

    /// Returns true if `symbol` lies within the range.
    pub fn contains(&self, symbol: Symbol) -> bool {
        (self.lower..=self.upper).contains(&symbol)
    }

    /// Position and value of the first symbol outside the range, if any.
    pub fn first_violation(&self, symbols: &[Symbol]) -> Option<(usize, Symbol)> {
        symbols
            .iter()
            .copied()
            .enumerate()
            .find(|(_, s)| !self.contains(*s))
    }
}

impl Default for SymbolRange {
    fn default() -> Self {
        Self { lower: 0, upper: 7 }
    }
}

impl std::fmt::Display for SymbolRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.lower, self.upper)
    }
}

/// An ordered sequence of symbols: a secret or a guess.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Code(Vec<Symbol>);

impl Code {
    /// Wraps a sequence of symbols.
    pub fn new(symbols: Vec<Symbol>) -> Self {
        Self(symbols)
    }

    /// Symbols in order.
    pub fn symbols(&self) -> &[Symbol] {
        &self.0
    }

    /// Number of symbols.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true for the zero-length code.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consumes the code, returning its symbols.
    pub fn into_inner(self) -> Vec<Symbol> {
        self.0
    }
}

impl From<Vec<Symbol>> for Code {
    fn from(symbols: Vec<Symbol>) -> Self {
        Self(symbols)
    }
}

impl From<&[Symbol]> for Code {
    fn from(symbols: &[Symbol]) -> Self {
        Self(symbols.to_vec())
    }
}

impl<const N: usize> From<[Symbol; N]> for Code {
    fn from(symbols: [Symbol; N]) -> Self {
        Self(symbols.to_vec())
    }
}

impl AsRef<[Symbol]> for Code {
    fn as_ref(&self) -> &[Symbol] {
        &self.0
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut symbols = self.0.iter();
        if let Some(first) = symbols.next() {
            write!(f, "{}", first)?;
            for symbol in symbols {
                write!(f, " {}", symbol)?;
            }
        }
        Ok(())
    }
}

/// Preset code lengths.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive)]
pub enum Difficulty {
    /// Four symbols.
    #[default]
    #[strum(to_string = "easy", serialize = "4")]
    Easy,
    /// Six symbols.
    #[strum(to_string = "medium", serialize = "6")]
    Medium,
    /// Eight symbols.
    #[strum(to_string = "hard", serialize = "8")]
    Hard,
}

impl Difficulty {
    /// Code length for this preset.
    pub fn symbol_count(self) -> usize {
        match self {
            Difficulty::Easy => 4,
            Difficulty::Medium => 6,
            Difficulty::Hard => 8,
        }
    }
}

/// Default number of guesses per game.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 10;

/// Rules for one game: code length, symbol range, guess budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(try_from = "GameRules")]
pub struct GameConfig {
    /// Length of the secret and of every guess.
    symbol_count: usize,
    /// Allowed symbol values.
    range: SymbolRange,
    /// Guesses available before the game is lost.
    max_attempts: u32,
}

/// Unchecked wire form of [`GameConfig`].
#[derive(Deserialize)]
struct GameRules {
    symbol_count: usize,
    range: SymbolRange,
    max_attempts: u32,
}

impl TryFrom<GameRules> for GameConfig {
    type Error = SetupError;

    fn try_from(rules: GameRules) -> Result<Self, Self::Error> {
        Self::new(rules.symbol_count, rules.range, rules.max_attempts)
    }
}

impl GameConfig {
    /// Creates a validated configuration.
    #[instrument]
    pub fn new(
        symbol_count: usize,
        range: SymbolRange,
        max_attempts: u32,
    ) -> Result<Self, SetupError> {
        if symbol_count == 0 {
            return Err(SetupError::EmptyCode);
        }
        if max_attempts == 0 {
            return Err(SetupError::NoAttempts);
        }
        Ok(Self {
            symbol_count,
            range,
            max_attempts,
        })
    }

    /// Default range and budget with the preset's code length.
    pub fn from_difficulty(difficulty: Difficulty) -> Self {
        Self {
            symbol_count: difficulty.symbol_count(),
            ..Self::default()
        }
    }

    /// Checks that `secret` can be used under these rules.
    #[instrument(skip(secret))]
    pub fn validate_secret(&self, secret: &Code) -> Result<(), SetupError> {
        if secret.len() != self.symbol_count {
            return Err(SetupError::SecretLengthMismatch {
                expected: self.symbol_count,
                actual: secret.len(),
            });
        }
        if let Some((position, value)) = self.range.first_violation(secret.symbols()) {
            return Err(SetupError::SecretOutOfBounds {
                position,
                value,
                lower: self.range.lower(),
                upper: self.range.upper(),
            });
        }
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            symbol_count: Difficulty::Easy.symbol_count(),
            range: SymbolRange::default(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

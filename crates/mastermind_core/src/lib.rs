//! Mastermind game logic: duplicate-aware scoring and the per-game state
//! machine built on it.
//!
//! # Example
//!
//! ```
//! use mastermind_core::{Code, GameConfig, GameSession, GameStatus};
//!
//! let mut game = GameSession::new(GameConfig::default(), Code::from([1, 4, 1, 4]))?;
//! let result = game.submit_guess([4, 4, 1, 2])?;
//! assert_eq!(*result.correct_count(), 3);
//! assert_eq!(*result.correct_position_count(), 2);
//! assert_eq!(game.status(), GameStatus::InProgress);
//! assert_eq!(game.attempts_remaining(), 9);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod contracts;
mod error;
pub mod invariants;
mod scoring;
mod session;
mod types;

pub use contracts::{
    Contract, GameIsActive, GuessContract, LegalGuess, LengthMatches, SymbolsInRange,
};
pub use error::{GuessError, SetupError};
pub use scoring::{ScoreResult, score};
pub use session::{GameSession, GameStatus, GameView, GuessRecord, ReplayError};
pub use types::{Code, DEFAULT_MAX_ATTEMPTS, Difficulty, GameConfig, Symbol, SymbolRange};

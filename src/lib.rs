//! Mastermind library - session store, secret providers and terminal play
//! around the pure rules in [`mastermind_core`].
//!
//! # Architecture
//!
//! - **Core**: scoring and the per-game state machine (`mastermind_core`)
//! - **Sources**: where secrets come from (local RNG, seeded, random.org)
//! - **Sessions**: one game per session id, replaced on "new game"
//! - **Play**: a line-oriented loop for the terminal
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use mastermind::{GameConfig, SessionManager, ThreadRngSource};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let manager = SessionManager::new(Arc::new(ThreadRngSource));
//! manager.start_game("player-1".to_string(), GameConfig::default()).await?;
//! let view = manager.submit_guess("player-1", vec![0, 1, 2, 3])?;
//! println!("{:?}", view.feedback());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod input;
mod play;
mod session;
mod source;

// Crate-level exports - Configuration
pub use config::{AppConfig, ConfigError, SourceKind};

// Crate-level exports - Input parsing
pub use input::{InputError, parse_guess};

// Crate-level exports - Terminal play
pub use play::{PlaySummary, run_game};

// Crate-level exports - Session management
pub use session::{SessionError, SessionId, SessionManager};

// Crate-level exports - Secret providers
pub use source::{
    FixedSource, RandomOrgSource, SecretSource, SeededSource, SourceError, ThreadRngSource,
    build_source, parse_plain_integers,
};

// Crate-level exports - Game rules
pub use mastermind_core::{
    Code, Difficulty, GameConfig, GameSession, GameStatus, GameView, GuessError, GuessRecord,
    ReplayError, ScoreResult, SetupError, Symbol, SymbolRange, score,
};

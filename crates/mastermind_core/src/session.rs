//! Per-game state machine built on the scorer.

use crate::contracts::{Contract, GuessContract};
use crate::error::{GuessError, SetupError};
use crate::scoring::{ScoreResult, score};
use crate::types::{Code, GameConfig};
use derive_getters::Getters;
use derive_new::new;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Where a game stands.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum GameStatus {
    /// Accepting guesses.
    InProgress,
    /// The secret was guessed.
    Won,
    /// The guess budget ran out.
    Lost,
}

impl GameStatus {
    /// Returns true for `Won` and `Lost`.
    pub fn is_terminal(self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }
}

/// One recorded guess and its score.
#[derive(Debug, Clone, PartialEq, Eq, Getters, new, Serialize, Deserialize)]
pub struct GuessRecord {
    /// The guess as submitted.
    guess: Code,
    /// Its score against the secret.
    result: ScoreResult,
}

/// A single game: the secret, the rules, and every guess so far.
///
/// Remaining attempts are derived from the history length, so each
/// accepted guess consumes exactly one attempt. A deserialized game is
/// rebuilt with [`GameSession::replay`] and must agree with its stored
/// results and status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StoredGame")]
pub struct GameSession {
    config: GameConfig,
    secret: Code,
    history: Vec<GuessRecord>,
    status: GameStatus,
}

/// Unchecked wire form of [`GameSession`].
#[derive(Deserialize)]
struct StoredGame {
    config: GameConfig,
    secret: Code,
    history: Vec<GuessRecord>,
    status: GameStatus,
}

impl TryFrom<StoredGame> for GameSession {
    type Error = ReplayError;

    fn try_from(stored: StoredGame) -> Result<Self, Self::Error> {
        let guesses: Vec<Code> = stored.history.iter().map(|r| r.guess.clone()).collect();
        let session = Self::replay(stored.config, stored.secret, &guesses)?;

        if let Some(index) = session
            .history
            .iter()
            .zip(&stored.history)
            .position(|(replayed, recorded)| replayed != recorded)
        {
            return Err(ReplayError::ResultMismatch { index });
        }
        if session.status != stored.status {
            return Err(ReplayError::StatusMismatch {
                stored: stored.status,
                replayed: session.status,
            });
        }
        Ok(session)
    }
}

impl GameSession {
    /// Starts a game with a secret already drawn from a provider.
    #[instrument(skip(secret))]
    pub fn new(config: GameConfig, secret: Code) -> Result<Self, SetupError> {
        config.validate_secret(&secret)?;
        info!(symbol_count = *config.symbol_count(), "New game started");
        Ok(Self {
            config,
            secret,
            history: Vec::new(),
            status: GameStatus::InProgress,
        })
    }

    /// Rebuilds a game from a stored secret and guess list.
    ///
    /// Every guess passes through the same checks as a live submission.
    #[instrument(skip(secret, guesses), fields(guess_count = guesses.len()))]
    pub fn replay(
        config: GameConfig,
        secret: Code,
        guesses: &[Code],
    ) -> Result<Self, ReplayError> {
        let mut session = Self::new(config, secret)?;
        for (index, guess) in guesses.iter().enumerate() {
            session
                .submit_guess(guess.clone())
                .map_err(|error| ReplayError::Guess { index, error })?;
        }
        debug!(status = %session.status, "Replayed game");
        Ok(session)
    }

    /// Scores a guess and advances the game.
    ///
    /// The transition is built on a copy and committed only once the
    /// postconditions pass. On error the session is unchanged and can take
    /// another guess.
    #[instrument(skip(self, guess), fields(attempts_remaining = self.attempts_remaining()))]
    pub fn submit_guess(&mut self, guess: impl Into<Code>) -> Result<ScoreResult, GuessError> {
        let guess = guess.into();
        GuessContract::pre(self, &guess)?;

        let result = score(self.secret.symbols(), guess.symbols());
        let mut next = self.clone();
        next.history.push(GuessRecord::new(guess, result));

        if *result.won() {
            next.status = GameStatus::Won;
        } else if next.attempts_remaining() == 0 {
            next.status = GameStatus::Lost;
        }

        #[cfg(debug_assertions)]
        GuessContract::post(self, &next)?;

        *self = next;
        debug!(
            correct = *result.correct_count(),
            positioned = *result.correct_position_count(),
            status = %self.status,
            "Guess recorded"
        );
        Ok(result)
    }

    /// Rules of this game.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Current status.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Guesses in submission order.
    pub fn history(&self) -> &[GuessRecord] {
        &self.history
    }

    /// Guesses left before the game is lost.
    pub fn attempts_remaining(&self) -> u32 {
        let used = u32::try_from(self.history.len()).unwrap_or(u32::MAX);
        self.config.max_attempts().saturating_sub(used)
    }

    /// Returns true once the secret has been guessed.
    pub fn has_won(&self) -> bool {
        self.status == GameStatus::Won
    }

    /// Returns true once the game has been won or lost.
    pub fn is_over(&self) -> bool {
        self.status.is_terminal()
    }

    /// Feedback line for every guess, oldest first.
    pub fn feedback(&self) -> Vec<String> {
        self.history.iter().map(|r| r.result.feedback()).collect()
    }

    /// The secret, available only after the game ends.
    pub fn revealed_secret(&self) -> Option<&Code> {
        self.is_over().then_some(&self.secret)
    }

    /// The secret regardless of status, for invariants and persistence.
    pub(crate) fn secret(&self) -> &Code {
        &self.secret
    }

    #[cfg(test)]
    pub(crate) fn force_status(&mut self, status: GameStatus) {
        self.status = status;
    }

    #[cfg(test)]
    pub(crate) fn force_result(&mut self, index: usize, result: ScoreResult) {
        self.history[index].result = result;
    }

    /// Read-only snapshot for the calling layer.
    pub fn view(&self) -> GameView {
        GameView {
            status: self.status,
            symbol_count: *self.config.symbol_count(),
            attempts_remaining: self.attempts_remaining(),
            has_won: self.has_won(),
            is_over: self.is_over(),
            history: self.history.clone(),
            feedback: self.feedback(),
            secret: self.revealed_secret().cloned(),
        }
    }
}

/// Everything a caller may show about a game.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct GameView {
    /// Current status.
    status: GameStatus,
    /// Code length.
    symbol_count: usize,
    /// Guesses left.
    attempts_remaining: u32,
    /// Secret guessed.
    has_won: bool,
    /// Won or lost.
    is_over: bool,
    /// Guesses so far.
    history: Vec<GuessRecord>,
    /// One line per guess.
    feedback: Vec<String>,
    /// Present only once the game is over.
    secret: Option<Code>,
}

/// Error raised while replaying a stored game.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum ReplayError {
    /// The stored secret or rules are invalid.
    #[display("Invalid stored game: {}", _0)]
    Setup(SetupError),
    /// A stored guess was rejected.
    #[display("Stored guess {} rejected: {error}", index + 1)]
    Guess {
        /// Zero-based index of the rejected guess.
        index: usize,
        /// Why it was rejected.
        error: GuessError,
    },
    /// A stored result differs from a fresh score of its guess.
    #[display("Stored result {} does not match its guess", index + 1)]
    ResultMismatch {
        /// Zero-based index of the mismatched record.
        index: usize,
    },
    /// The stored status differs from the one the guesses lead to.
    #[display("Stored status {stored} does not match replayed status {replayed}")]
    StatusMismatch {
        /// Status found in the stored game.
        stored: GameStatus,
        /// Status reached by replaying the guesses.
        replayed: GameStatus,
    },
}

impl std::error::Error for ReplayError {}

impl From<SetupError> for ReplayError {
    fn from(err: SetupError) -> Self {
        ReplayError::Setup(err)
    }
}

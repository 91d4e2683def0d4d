//! Contract-based validation for guess submission.
//!
//! Preconditions decide whether a guess may be recorded at all;
//! postconditions check that recording it kept the session consistent.

use crate::error::GuessError;
use crate::invariants::{InvariantSet, MastermindInvariants};
use crate::session::GameSession;
use crate::types::Code;
use tracing::{instrument, warn};

/// A contract: preconditions and postconditions for a state transition.
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), GuessError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), GuessError>;
}

/// Precondition: the game still accepts guesses.
pub struct GameIsActive;

impl GameIsActive {
    /// Fails with [`GuessError::InvalidState`] once the game is won or lost.
    #[instrument(skip(session))]
    pub fn check(session: &GameSession) -> Result<(), GuessError> {
        if session.is_over() {
            warn!(status = %session.status(), "Guess submitted to finished game");
            Err(GuessError::InvalidState(session.status()))
        } else {
            Ok(())
        }
    }
}

/// Precondition: the guess has exactly `symbol_count` symbols.
pub struct LengthMatches;

impl LengthMatches {
    /// Fails with [`GuessError::LengthMismatch`].
    #[instrument(skip_all)]
    pub fn check(guess: &Code, session: &GameSession) -> Result<(), GuessError> {
        let expected = *session.config().symbol_count();
        if guess.len() != expected {
            warn!(expected, actual = guess.len(), "Guess length mismatch");
            Err(GuessError::LengthMismatch {
                expected,
                actual: guess.len(),
            })
        } else {
            Ok(())
        }
    }
}

/// Precondition: every symbol lies within the configured range.
pub struct SymbolsInRange;

impl SymbolsInRange {
    /// Fails with [`GuessError::OutOfBounds`] for the first offending symbol.
    #[instrument(skip_all)]
    pub fn check(guess: &Code, session: &GameSession) -> Result<(), GuessError> {
        let range = session.config().range();
        match range.first_violation(guess.symbols()) {
            Some((position, value)) => {
                warn!(position, value, %range, "Guess symbol out of bounds");
                Err(GuessError::OutOfBounds {
                    position,
                    value,
                    lower: range.lower(),
                    upper: range.upper(),
                })
            }
            None => Ok(()),
        }
    }
}

/// Composite precondition: all of the above, in order.
pub struct LegalGuess;

impl LegalGuess {
    /// Validates all preconditions for a guess.
    #[instrument(skip_all)]
    pub fn check(guess: &Code, session: &GameSession) -> Result<(), GuessError> {
        GameIsActive::check(session)?;
        LengthMatches::check(guess, session)?;
        SymbolsInRange::check(guess, session)?;
        Ok(())
    }
}

/// Contract for guess submission.
///
/// Preconditions:
/// - Game is in progress
/// - Guess length matches the code length
/// - Every symbol is in range
///
/// Postconditions:
/// - Exactly one history entry was added
/// - All session invariants hold
pub struct GuessContract;

impl Contract<GameSession, Code> for GuessContract {
    fn pre(session: &GameSession, guess: &Code) -> Result<(), GuessError> {
        LegalGuess::check(guess, session)
    }

    fn post(before: &GameSession, after: &GameSession) -> Result<(), GuessError> {
        if after.history().len() != before.history().len() + 1 {
            return Err(GuessError::InvariantViolation(format!(
                "History grew from {} to {}",
                before.history().len(),
                after.history().len()
            )));
        }
        MastermindInvariants::check_all(after).map_err(|violations| {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            GuessError::InvariantViolation(format!("Postcondition failed: {}", descriptions))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::GameStatus;
    use crate::types::GameConfig;

    fn session() -> GameSession {
        GameSession::new(GameConfig::default(), Code::from([1, 4, 1, 4])).unwrap()
    }

    #[test]
    fn test_precondition_accepts_legal_guess() {
        assert!(GuessContract::pre(&session(), &Code::from([4, 4, 1, 2])).is_ok());
    }

    #[test]
    fn test_precondition_length() {
        assert_eq!(
            GuessContract::pre(&session(), &Code::from([4, 4, 1, 2, 0])),
            Err(GuessError::LengthMismatch { expected: 4, actual: 5 })
        );
    }

    #[test]
    fn test_precondition_bounds() {
        assert_eq!(
            GuessContract::pre(&session(), &Code::from([4, -1, 1, 2])),
            Err(GuessError::OutOfBounds { position: 1, value: -1, lower: 0, upper: 7 })
        );
    }

    #[test]
    fn test_length_checked_before_bounds() {
        assert!(matches!(
            GuessContract::pre(&session(), &Code::from([9])),
            Err(GuessError::LengthMismatch { .. })
        ));
    }

    #[test]
    fn test_precondition_finished_game() {
        let mut game = session();
        game.submit_guess([1, 4, 1, 4]).unwrap();
        assert_eq!(
            GuessContract::pre(&game, &Code::from([0, 0, 0, 0])),
            Err(GuessError::InvalidState(GameStatus::Won))
        );
    }

    #[test]
    fn test_postcondition_holds_after_guess() {
        let before = session();
        let mut after = before.clone();
        after.submit_guess([4, 4, 1, 2]).unwrap();
        assert!(GuessContract::post(&before, &after).is_ok());
    }

    #[test]
    fn test_postcondition_detects_missing_history() {
        let before = session();
        assert!(matches!(
            GuessContract::post(&before, &before),
            Err(GuessError::InvariantViolation(_))
        ));
    }
}

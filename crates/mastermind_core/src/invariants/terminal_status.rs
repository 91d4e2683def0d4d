//! Terminal status consistency with the guess history.

use super::Invariant;
use crate::session::{GameSession, GameStatus};

/// Invariant: the status agrees with the history.
///
/// - `Won` iff the last guess won, and no earlier guess did
/// - `Lost` iff the budget is spent without a winning guess
pub struct TerminalStatusInvariant;

impl Invariant<GameSession> for TerminalStatusInvariant {
    fn holds(session: &GameSession) -> bool {
        let history = session.history();
        let wins = history.iter().filter(|r| *r.result().won()).count();
        let last_won = history.last().is_some_and(|r| *r.result().won());
        let exhausted = session.attempts_remaining() == 0;

        match session.status() {
            GameStatus::Won => wins == 1 && last_won,
            GameStatus::Lost => wins == 0 && exhausted,
            GameStatus::InProgress => wins == 0 && !exhausted,
        }
    }

    fn description() -> &'static str {
        "Status matches the outcome of the guess history"
    }
}

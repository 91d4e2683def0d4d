//! Attempt budget: history never outgrows the allowed guesses.

use super::Invariant;
use crate::session::{GameSession, GameStatus};

/// Invariant: `history.len() <= max_attempts`, and a game still in
/// progress has at least one attempt left.
pub struct AttemptBudgetInvariant;

impl Invariant<GameSession> for AttemptBudgetInvariant {
    fn holds(session: &GameSession) -> bool {
        let used = session.history().len();
        let max = *session.config().max_attempts() as usize;
        if used > max {
            return false;
        }
        session.status() != GameStatus::InProgress || used < max
    }

    fn description() -> &'static str {
        "History length stays within the attempt budget"
    }
}

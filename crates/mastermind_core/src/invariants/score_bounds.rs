//! Score consistency: every recorded result is what the scorer gives.

use super::Invariant;
use crate::scoring::score;
use crate::session::GameSession;

/// Invariant: each history entry satisfies
/// `correct_position_count <= correct_count <= symbol_count`, `won` holds
/// exactly when every position matched, and the stored result equals a
/// fresh score of the stored guess.
pub struct ScoreBoundsInvariant;

impl Invariant<GameSession> for ScoreBoundsInvariant {
    fn holds(session: &GameSession) -> bool {
        let symbol_count = *session.config().symbol_count();
        session.history().iter().all(|record| {
            let result = record.result();
            *result.correct_position_count() <= *result.correct_count()
                && *result.correct_count() <= symbol_count
                && *result.won() == (*result.correct_position_count() == symbol_count)
                && *result == score(session.secret().symbols(), record.guess().symbols())
        })
    }

    fn description() -> &'static str {
        "Recorded scores are bounded and match the secret"
    }
}

//! Duplicate-aware scoring of a guess against the secret.

use crate::types::Symbol;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{instrument, trace};

/// Result of scoring one guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Getters, Serialize, Deserialize)]
pub struct ScoreResult {
    /// Guessed symbols present anywhere in the secret, capped per value by
    /// the value's frequency in the secret.
    correct_count: usize,
    /// Guessed symbols matching both value and index.
    correct_position_count: usize,
    /// Every position matched.
    won: bool,
}

impl ScoreResult {
    /// Builds a result for a code of `len` symbols; `won` follows from the
    /// positional count.
    pub fn new(correct_count: usize, correct_position_count: usize, len: usize) -> Self {
        Self {
            correct_count,
            correct_position_count,
            won: correct_position_count == len,
        }
    }

    /// Human-readable summary of this result.
    pub fn feedback(&self) -> String {
        self.to_string()
    }
}

impl std::fmt::Display for ScoreResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.correct_count == 0 && self.correct_position_count == 0 {
            return write!(f, "All incorrect.");
        }
        write!(
            f,
            "{} correct number(s) and {} correct location(s).",
            self.correct_count, self.correct_position_count
        )
    }
}

/// Credits handed out for one symbol value.
#[derive(Debug, Default)]
struct Tally {
    present: usize,
    positioned: usize,
}

/// Scores `guess` against `secret`.
///
/// Both slices must have the same length; callers validate this first.
///
/// A single left-to-right pass: a positional match always earns a
/// position credit, and every occurrence of a value present in the secret
/// earns a "present" credit until that value's frequency in the secret is
/// used up.
#[instrument(skip_all, fields(len = secret.len()))]
pub fn score(secret: &[Symbol], guess: &[Symbol]) -> ScoreResult {
    debug_assert_eq!(secret.len(), guess.len(), "guess length must match secret");
    let len = secret.len();

    if secret == guess {
        trace!("exact match");
        return ScoreResult::new(len, len, len);
    }

    let mut frequency: HashMap<Symbol, usize> = HashMap::new();
    for &symbol in secret {
        *frequency.entry(symbol).or_default() += 1;
    }

    let mut tallies: HashMap<Symbol, Tally> = HashMap::new();
    for (&hidden, &guessed) in secret.iter().zip(guess) {
        let Some(&limit) = frequency.get(&guessed) else {
            continue;
        };
        let tally = tallies.entry(guessed).or_default();
        if hidden == guessed {
            tally.positioned += 1;
        }
        if tally.present < limit {
            tally.present += 1;
        }
    }

    let correct_count = tallies.values().map(|t| t.present).sum();
    let correct_position_count = tallies.values().map(|t| t.positioned).sum();
    trace!(correct_count, correct_position_count, "scored guess");

    ScoreResult::new(correct_count, correct_position_count, len)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(secret: &[Symbol], guess: &[Symbol]) -> (usize, usize, bool) {
        let result = score(secret, guess);
        (*result.correct_count(), *result.correct_position_count(), *result.won())
    }

    #[test]
    fn test_duplicate_cap() {
        assert_eq!(counts(&[1, 4, 1, 4], &[4, 4, 1, 2]), (3, 2, false));
    }

    #[test]
    fn test_no_false_credit_for_repeated_guess() {
        assert_eq!(counts(&[0, 1, 3, 5], &[2, 2, 1, 1]), (1, 0, false));
    }

    #[test]
    fn test_all_incorrect() {
        let result = score(&[1, 2, 3, 4], &[0, 0, 0, 0]);
        assert_eq!((*result.correct_count(), *result.correct_position_count()), (0, 0));
        assert!(!result.won());
        assert_eq!(result.feedback(), "All incorrect.");
    }

    #[test]
    fn test_exact_match() {
        assert_eq!(counts(&[1, 1, 2, 4], &[1, 1, 2, 4]), (4, 4, true));
    }

    #[test]
    fn test_guessing_one_value_everywhere() {
        // Two 4s in the secret: only two credits, both positional.
        assert_eq!(counts(&[1, 4, 1, 4], &[4, 4, 4, 4]), (2, 2, false));
    }

    #[test]
    fn test_partial_positions_with_repeats() {
        assert_eq!(counts(&[1, 1, 2, 4], &[1, 7, 6, 4]), (2, 2, false));
        assert_eq!(counts(&[1, 1, 2, 4], &[1, 1, 1, 1]), (2, 2, false));
    }

    #[test]
    fn test_present_before_positional_is_capped() {
        // The early non-positional 4 uses the only credit; the later
        // positional 4 still counts as a location.
        assert_eq!(counts(&[1, 4], &[4, 4]), (1, 1, false));
    }

    #[test]
    fn test_distinct_symbols_reduce_to_membership() {
        assert_eq!(counts(&[1, 5, 7, 3], &[1, 2, 3, 4]), (2, 1, false));
        assert_eq!(counts(&[0, 1, 2, 3], &[3, 2, 1, 0]), (4, 0, false));
    }

    #[test]
    fn test_empty_codes_win_trivially() {
        assert_eq!(counts(&[], &[]), (0, 0, true));
    }

    #[test]
    fn test_feedback_text() {
        let result = score(&[1, 4, 1, 4], &[4, 4, 1, 2]);
        assert_eq!(result.feedback(), "3 correct number(s) and 2 correct location(s).");
    }
}

//! Tests for duplicate-aware scoring.

use mastermind::{Symbol, score};

fn counts(secret: &[Symbol], guess: &[Symbol]) -> (usize, usize, bool) {
    let result = score(secret, guess);
    (*result.correct_count(), *result.correct_position_count(), *result.won())
}

/// Every code of length `len` over `0..base`.
fn all_codes(len: usize, base: Symbol) -> Vec<Vec<Symbol>> {
    let mut codes = vec![Vec::new()];
    for _ in 0..len {
        codes = codes
            .into_iter()
            .flat_map(|prefix| {
                (0..base).map(move |s| {
                    let mut next = prefix.clone();
                    next.push(s);
                    next
                })
            })
            .collect();
    }
    codes
}

#[test]
fn test_duplicate_cap() {
    assert_eq!(counts(&[1, 4, 1, 4], &[4, 4, 1, 2]), (3, 2, false));
}

#[test]
fn test_no_false_credit() {
    assert_eq!(counts(&[0, 1, 3, 5], &[2, 2, 1, 1]), (1, 0, false));
}

#[test]
fn test_all_incorrect() {
    let result = score(&[1, 2, 3, 4], &[0, 0, 0, 0]);
    assert_eq!(counts(&[1, 2, 3, 4], &[0, 0, 0, 0]), (0, 0, false));
    assert_eq!(result.feedback(), "All incorrect.");
}

#[test]
fn test_exact_match_fast_path() {
    assert_eq!(counts(&[1, 1, 2, 4], &[1, 1, 2, 4]), (4, 4, true));
}

#[test]
fn test_counts_are_ordered_for_every_pair() {
    let codes = all_codes(3, 4);
    for secret in &codes {
        for guess in &codes {
            let (correct, positioned, _) = counts(secret, guess);
            assert!(
                positioned <= correct && correct <= secret.len(),
                "secret {:?} guess {:?}: {} correct, {} positioned",
                secret,
                guess,
                correct,
                positioned
            );
        }
    }
}

#[test]
fn test_won_iff_every_position_matches() {
    let codes = all_codes(3, 4);
    for secret in &codes {
        for guess in &codes {
            let (_, positioned, won) = counts(secret, guess);
            assert_eq!(won, positioned == secret.len());
            assert_eq!(won, secret == guess, "secret {:?} guess {:?}", secret, guess);
        }
    }
}

#[test]
fn test_correct_count_is_frequency_overlap() {
    // Independent formulation: sum over values of min(freq in secret, freq in guess).
    let codes = all_codes(4, 3);
    for secret in &codes {
        for guess in &codes {
            let overlap: usize = (0..3)
                .map(|v| {
                    let in_secret = secret.iter().filter(|&&s| s == v).count();
                    let in_guess = guess.iter().filter(|&&g| g == v).count();
                    in_secret.min(in_guess)
                })
                .sum();
            let exact = secret.iter().zip(guess).filter(|(s, g)| s == g).count();
            assert_eq!(counts(secret, guess), (overlap, exact, exact == secret.len()));
        }
    }
}

#[test]
fn test_absent_values_never_count() {
    assert_eq!(counts(&[1, 1, 1, 1], &[2, 3, 4, 5]), (0, 0, false));
    assert_eq!(counts(&[1, 1, 1, 1], &[2, 1, 4, 5]), (1, 1, false));
}

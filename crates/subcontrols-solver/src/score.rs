//! Exact / color-only match scoring for color codes.

use std::fmt::{self, Display};

use subcontrols_core::{CODE_LENGTH, Code, Color};

/// Result of comparing a guess with the hidden code.
///
/// `exact` counts pegs matching in both color and position. `color` counts the
/// remaining pegs whose color occurs at another, not yet matched, position of
/// the hidden code. Every peg on either side is consumed at most once, so
/// `exact + color <= CODE_LENGTH` always holds.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Score {
    /// Pegs matching in color and position.
    pub exact: u8,
    /// Additional pegs matching in color only.
    pub color: u8,
}

impl Score {
    /// Creates a score.
    #[must_use]
    pub const fn new(exact: u8, color: u8) -> Self {
        Self { exact, color }
    }

    /// Returns `true` if every peg is an exact match.
    #[must_use]
    pub const fn is_solved(self) -> bool {
        self.exact as usize == CODE_LENGTH
    }
}

impl Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} exact, {} color", self.exact, self.color)
    }
}

/// Scores `attempt` against `secret`.
///
/// The first pass counts exact matches and sets those positions aside. The second
/// pass tallies the remaining colors on each side and adds the per-color minimum,
/// so a color repeated in the guess more often than in the code is only credited
/// as many times as it actually remains in the code.
///
/// # Examples
///
/// ```
/// use subcontrols_core::{Code, Color::*};
/// use subcontrols_solver::{Score, score};
///
/// let secret = Code::new([Red, Red, Blue, Green]);
/// let attempt = Code::new([Red, Blue, Red, Red]);
/// assert_eq!(score(&secret, &attempt), Score::new(1, 2));
/// assert!(score(&secret, &secret).is_solved());
/// ```
#[must_use]
pub fn score(secret: &Code, attempt: &Code) -> Score {
    let mut exact = 0;
    let mut secret_left = [0u8; Color::COUNT];
    let mut attempt_left = [0u8; Color::COUNT];

    for (s, a) in secret.iter().zip(attempt.iter()) {
        if s == a {
            exact += 1;
        } else {
            secret_left[s.index()] += 1;
            attempt_left[a.index()] += 1;
        }
    }

    let color = secret_left
        .iter()
        .zip(&attempt_left)
        .map(|(s, a)| *s.min(a))
        .sum();

    Score { exact, color }
}

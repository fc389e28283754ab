use std::num::NonZeroU8;

/// Progress of a puzzle.
///
/// `Solved` and `Failed` are terminal: attempts are ignored until the puzzle is
/// reset.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, derive_more::IsVariant)]
pub enum PuzzleState {
    /// Accepting attempts.
    #[default]
    Unsolved,
    /// An attempt matched the secret.
    Solved,
    /// The attempt budget ran out without a match.
    Failed,
}

impl PuzzleState {
    /// Returns `true` for [`Solved`](Self::Solved) and [`Failed`](Self::Failed).
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Solved | Self::Failed)
    }
}

/// Number of attempts a puzzle accepts, and how many have been used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AttemptBudget {
    limit: Option<NonZeroU8>,
    used: u32,
}

impl AttemptBudget {
    /// A budget of `limit` attempts.
    #[must_use]
    pub const fn limited(limit: NonZeroU8) -> Self {
        Self {
            limit: Some(limit),
            used: 0,
        }
    }

    /// A budget that never runs out.
    #[must_use]
    pub const fn unlimited() -> Self {
        Self {
            limit: None,
            used: 0,
        }
    }

    /// Returns the configured limit, or `None` if unlimited.
    #[must_use]
    pub const fn limit(&self) -> Option<NonZeroU8> {
        self.limit
    }

    /// Returns the number of attempts used.
    #[must_use]
    pub const fn used(&self) -> u32 {
        self.used
    }

    /// Returns the number of attempts left, or `None` if unlimited.
    #[must_use]
    pub fn remaining(&self) -> Option<u32> {
        self.limit
            .map(|limit| u32::from(limit.get()).saturating_sub(self.used))
    }

    /// Returns `true` if no attempts are left.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.remaining() == Some(0)
    }

    fn consume(&mut self) {
        self.used = self.used.saturating_add(1);
    }

    fn restore(&mut self) {
        self.used = 0;
    }
}

/// State change caused by one confirmed attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::IsVariant)]
pub enum Transition {
    /// The puzzle was already terminal; the attempt was not counted.
    Ignored,
    /// The attempt did not match and budget remains.
    Continued,
    /// The attempt matched.
    Solved,
    /// The attempt did not match and used up the budget.
    Failed,
}

/// The shared state machine of every puzzle.
///
/// ```text
/// Unsolved --(no match)----------> Unsolved
/// Unsolved --(match)-------------> Solved
/// Unsolved --(no match, budget 0)-> Failed
/// Solved | Failed --(reset)------> Unsolved
/// ```
///
/// A match on the last allowed attempt counts as a success: the match is checked
/// before exhaustion.
///
/// # Examples
///
/// ```
/// use std::num::NonZeroU8;
///
/// use subcontrols_game::{AttemptBudget, Lifecycle, PuzzleState, Transition};
///
/// let mut lifecycle = Lifecycle::new(AttemptBudget::limited(NonZeroU8::MIN));
/// assert_eq!(lifecycle.record(false), Transition::Failed);
/// assert_eq!(lifecycle.record(true), Transition::Ignored);
/// assert_eq!(lifecycle.state(), PuzzleState::Failed);
///
/// lifecycle.reset();
/// assert_eq!(lifecycle.record(true), Transition::Solved);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Lifecycle {
    state: PuzzleState,
    budget: AttemptBudget,
}

impl Lifecycle {
    /// Creates an unsolved lifecycle with a fresh budget.
    #[must_use]
    pub const fn new(budget: AttemptBudget) -> Self {
        Self {
            state: PuzzleState::Unsolved,
            budget,
        }
    }

    /// Returns the current state.
    #[must_use]
    pub const fn state(&self) -> PuzzleState {
        self.state
    }

    /// Returns the attempt budget.
    #[must_use]
    pub const fn budget(&self) -> &AttemptBudget {
        &self.budget
    }

    /// Returns `true` if the puzzle accepts attempts.
    #[must_use]
    pub const fn accepts_attempts(&self) -> bool {
        !self.state.is_terminal()
    }

    /// Records one confirmed attempt.
    pub fn record(&mut self, matched: bool) -> Transition {
        if self.state.is_terminal() {
            return Transition::Ignored;
        }
        self.budget.consume();
        if matched {
            self.state = PuzzleState::Solved;
            Transition::Solved
        } else if self.budget.is_exhausted() {
            self.state = PuzzleState::Failed;
            Transition::Failed
        } else {
            Transition::Continued
        }
    }

    /// Returns to `Unsolved` with the full budget.
    pub fn reset(&mut self) {
        self.state = PuzzleState::Unsolved;
        self.budget.restore();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limited(limit: u8) -> Lifecycle {
        Lifecycle::new(AttemptBudget::limited(NonZeroU8::new(limit).unwrap()))
    }

    #[test]
    fn test_non_matching_attempts_continue_until_exhausted() {
        let mut lifecycle = limited(3);
        assert_eq!(lifecycle.record(false), Transition::Continued);
        assert_eq!(lifecycle.record(false), Transition::Continued);
        assert_eq!(lifecycle.budget().remaining(), Some(1));
        assert_eq!(lifecycle.record(false), Transition::Failed);
        assert!(lifecycle.state().is_failed());
        assert!(lifecycle.budget().is_exhausted());
    }

    #[test]
    fn test_match_on_last_attempt_is_success() {
        let mut lifecycle = limited(2);
        lifecycle.record(false);
        assert_eq!(lifecycle.record(true), Transition::Solved);
        assert!(lifecycle.state().is_solved());
    }

    #[test]
    fn test_terminal_state_ignores_attempts() {
        let mut lifecycle = limited(5);
        lifecycle.record(true);
        let before = lifecycle;
        assert_eq!(lifecycle.record(false), Transition::Ignored);
        assert_eq!(lifecycle, before);
        assert!(!lifecycle.accepts_attempts());
    }

    #[test]
    fn test_reset_restores_budget() {
        let mut lifecycle = limited(1);
        lifecycle.record(false);
        lifecycle.reset();
        assert_eq!(lifecycle.state(), PuzzleState::Unsolved);
        assert_eq!(lifecycle.budget().used(), 0);
        assert_eq!(lifecycle.budget().remaining(), Some(1));
    }

    #[test]
    fn test_unlimited_budget_never_fails() {
        let mut lifecycle = Lifecycle::new(AttemptBudget::unlimited());
        for _ in 0..1000 {
            assert_eq!(lifecycle.record(false), Transition::Continued);
        }
        assert_eq!(lifecycle.budget().remaining(), None);
        assert_eq!(lifecycle.budget().used(), 1000);
        assert_eq!(lifecycle.record(true), Transition::Solved);
    }
}

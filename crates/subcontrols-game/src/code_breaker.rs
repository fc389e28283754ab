use std::num::NonZeroU8;

use subcontrols_core::{CODE_LENGTH, Code, Color, Keyword};
use subcontrols_generator::{CodeSecret, SecretGenerator, SecretSeed};
use subcontrols_solver::{Score, score};

use crate::{AttemptBudget, Lifecycle, Puzzle, PuzzleId, PuzzleState, Transition};

/// Options for [`CodeBreaker`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeBreakerConfig {
    /// Number of rows on the board.
    pub max_attempts: NonZeroU8,
    /// Generator used for new secrets.
    pub generator: SecretGenerator,
}

impl Default for CodeBreakerConfig {
    fn default() -> Self {
        Self {
            max_attempts: NonZeroU8::new(10).unwrap_or(NonZeroU8::MIN),
            generator: SecretGenerator::new(),
        }
    }
}

impl CodeBreakerConfig {
    /// Sets the number of rows on the board.
    #[must_use]
    pub const fn with_max_attempts(mut self, max_attempts: NonZeroU8) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Sets the secret generator.
    #[must_use]
    pub const fn with_generator(mut self, generator: SecretGenerator) -> Self {
        self.generator = generator;
        self
    }
}

/// Identifies one complete staged row awaiting [`CodeBreaker::commit_attempt`].
///
/// A ticket is invalidated by any later change to the board: staging, undoing,
/// committing or resetting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CommitTicket {
    generation: u64,
}

/// Result of [`CodeBreaker::stage_color`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum StageOutcome {
    /// The puzzle is terminal or the row is already full.
    Ignored,
    /// The color was added; the row holds `len` colors.
    Staged {
        /// Number of staged colors.
        len: usize,
    },
    /// The color completed the row, which can now be committed.
    Complete {
        /// Ticket for [`CodeBreaker::commit_attempt`].
        ticket: CommitTicket,
    },
}

/// Result of committing an attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum CommitOutcome {
    /// Stale ticket, malformed attempt, or terminal puzzle. Nothing changed.
    Ignored,
    /// The attempt was scored and logged.
    Scored {
        /// The attempt's score.
        score: Score,
        /// The lifecycle change it caused.
        transition: Transition,
    },
}

/// A committed row of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttemptRecord {
    /// The submitted code.
    pub code: Code,
    /// Its score against the secret.
    pub score: Score,
}

/// The four-color code breaker.
///
/// Colors are staged one at a time. A complete row is scored in a separate
/// commit step so a front end can show the row before its score; editing the row
/// in between withdraws the pending commit.
///
/// # Examples
///
/// ```
/// use subcontrols_core::Color;
/// use subcontrols_game::{CodeBreaker, CodeBreakerConfig, CommitOutcome, StageOutcome};
///
/// let mut puzzle = CodeBreaker::new(CodeBreakerConfig::default());
/// for color in [Color::Red, Color::Blue, Color::Green] {
///     assert!(puzzle.stage_color(color).is_staged());
/// }
/// let StageOutcome::Complete { ticket } = puzzle.stage_color(Color::Yellow) else {
///     panic!("row should be complete");
/// };
/// assert!(puzzle.commit_attempt(ticket).is_scored());
/// // A ticket scores at most once.
/// assert_eq!(puzzle.commit_attempt(ticket), CommitOutcome::Ignored);
/// ```
#[derive(Debug, Clone)]
pub struct CodeBreaker {
    config: CodeBreakerConfig,
    secret: CodeSecret,
    lifecycle: Lifecycle,
    staged: Vec<Color>,
    history: Vec<AttemptRecord>,
    generation: u64,
    pending: Option<CommitTicket>,
}

impl CodeBreaker {
    /// Creates a code breaker with a random secret.
    #[must_use]
    pub fn new(config: CodeBreakerConfig) -> Self {
        Self::with_seed(config, SecretSeed::random())
    }

    /// Creates a code breaker with the secret determined by `seed`.
    #[must_use]
    pub fn with_seed(config: CodeBreakerConfig, seed: SecretSeed) -> Self {
        Self {
            config,
            secret: config.generator.generate_code_with_seed(seed),
            lifecycle: Lifecycle::new(AttemptBudget::limited(config.max_attempts)),
            staged: Vec::with_capacity(CODE_LENGTH),
            history: Vec::new(),
            generation: 0,
            pending: None,
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &CodeBreakerConfig {
        &self.config
    }

    /// Returns the lifecycle.
    #[must_use]
    pub const fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    /// Returns the colors staged in the current row.
    #[must_use]
    pub fn staged(&self) -> &[Color] {
        &self.staged
    }

    /// Returns the committed rows, oldest first.
    #[must_use]
    pub fn history(&self) -> &[AttemptRecord] {
        &self.history
    }

    /// Returns the ticket of the complete row awaiting commit, if any.
    #[must_use]
    pub const fn pending(&self) -> Option<CommitTicket> {
        self.pending
    }

    /// Returns the secret once the puzzle is over, and `None` while it is running.
    #[must_use]
    pub fn disclosed_code(&self) -> Option<Code> {
        self.lifecycle
            .state()
            .is_terminal()
            .then_some(self.secret.code)
    }

    /// Returns the unlocked keyword once the code is broken.
    #[must_use]
    pub fn keyword(&self) -> Option<Keyword> {
        self.lifecycle
            .state()
            .is_solved()
            .then_some(self.secret.keyword)
    }

    /// Adds `color` to the current row.
    pub fn stage_color(&mut self, color: Color) -> StageOutcome {
        if !self.lifecycle.accepts_attempts() || self.staged.len() >= CODE_LENGTH {
            return StageOutcome::Ignored;
        }
        self.staged.push(color);
        self.touch();
        if self.staged.len() < CODE_LENGTH {
            return StageOutcome::Staged {
                len: self.staged.len(),
            };
        }
        let ticket = CommitTicket {
            generation: self.generation,
        };
        self.pending = Some(ticket);
        log::debug!("control-unlock: row complete, awaiting commit");
        StageOutcome::Complete { ticket }
    }

    /// Removes the last staged color, withdrawing any pending commit.
    pub fn undo(&mut self) -> Option<Color> {
        if !self.lifecycle.accepts_attempts() {
            return None;
        }
        let color = self.staged.pop()?;
        self.touch();
        Some(color)
    }

    /// Scores the staged row if `ticket` is still the pending one.
    pub fn commit_attempt(&mut self, ticket: CommitTicket) -> CommitOutcome {
        if self.pending != Some(ticket) || !self.lifecycle.accepts_attempts() {
            return CommitOutcome::Ignored;
        }
        let Some(code) = Code::from_slice(&self.staged) else {
            return CommitOutcome::Ignored;
        };
        self.staged.clear();
        self.touch();

        let score = score(&self.secret.code, &code);
        self.history.push(AttemptRecord { code, score });
        let transition = self.lifecycle.record(score.is_solved());
        log::debug!("control-unlock: scored {code} as {score}");
        match transition {
            Transition::Solved => log::info!("control-unlock: solved"),
            Transition::Failed => log::info!("control-unlock: out of attempts"),
            Transition::Continued | Transition::Ignored => {}
        }
        CommitOutcome::Scored { score, transition }
    }

    /// Replaces the current row with `colors` and commits it at once.
    ///
    /// Input of the wrong length is ignored.
    pub fn submit_attempt(&mut self, colors: &[Color]) -> CommitOutcome {
        if !self.lifecycle.accepts_attempts() || colors.len() != CODE_LENGTH {
            return CommitOutcome::Ignored;
        }
        self.staged.clear();
        self.staged.extend_from_slice(colors);
        self.touch();
        let ticket = CommitTicket {
            generation: self.generation,
        };
        self.pending = Some(ticket);
        self.commit_attempt(ticket)
    }

    fn touch(&mut self) {
        self.generation += 1;
        self.pending = None;
    }
}

impl Puzzle for CodeBreaker {
    fn id(&self) -> PuzzleId {
        PuzzleId::ControlUnlock
    }

    fn state(&self) -> PuzzleState {
        self.lifecycle.state()
    }

    fn reset_with_seed(&mut self, seed: SecretSeed) {
        self.secret = self.config.generator.generate_code_with_seed(seed);
        self.lifecycle.reset();
        self.staged.clear();
        self.history.clear();
        self.touch();
        log::info!("control-unlock: reset");
    }

    fn reveal(&self) -> String {
        format!("Control Unlock Code: {}", self.secret.code)
    }

    fn status(&self) -> String {
        let mut lines: Vec<String> = self
            .history
            .iter()
            .enumerate()
            .map(|(i, record)| format!("{:>2}. {}  [{}]", i + 1, record.code, record.score))
            .collect();
        match self.lifecycle.state() {
            PuzzleState::Unsolved => {
                let staged = self
                    .staged
                    .iter()
                    .map(|color| color.name())
                    .collect::<Vec<_>>()
                    .join(", ");
                let remaining = self.lifecycle.budget().remaining().unwrap_or_default();
                lines.push(format!("Current row: [{staged}]"));
                lines.push(format!("Attempts left: {remaining}"));
            }
            PuzzleState::Solved => lines.push(format!(
                "Code cracked! The final code was {}. Keyword: {}",
                self.secret.code, self.secret.keyword
            )),
            PuzzleState::Failed => lines.push(format!(
                "Game over! The correct code was: {}",
                self.secret.code
            )),
        }
        lines.join("\n")
    }

    fn banner(&self) -> Option<String> {
        self.keyword().map(|keyword| format!("UNLOCKED: {keyword}"))
    }
}

#[cfg(test)]
mod tests {
    use subcontrols_core::Color::*;

    use super::*;

    const SEED: SecretSeed = SecretSeed::from_bytes([42; 32]);

    fn puzzle() -> CodeBreaker {
        CodeBreaker::with_seed(CodeBreakerConfig::default(), SEED)
    }

    fn secret_colors(puzzle: &CodeBreaker) -> [Color; 4] {
        *puzzle.secret.code.colors()
    }

    // A code that is guaranteed not to match the secret.
    fn wrong_code(puzzle: &CodeBreaker) -> [Color; 4] {
        let mut colors = secret_colors(puzzle);
        colors[0] = if colors[0] == Red { Blue } else { Red };
        colors
    }

    #[test]
    fn test_status_shows_history_and_current_row() {
        let mut puzzle = puzzle();
        let wrong = wrong_code(&puzzle);
        puzzle.submit_attempt(&wrong);
        puzzle.stage_color(Green);
        let status = puzzle.status();
        let lines: Vec<_> = status.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with(&format!(" 1. {}  [", Code::new(wrong))));
        assert_eq!(lines[1], "Current row: [green]");
        assert_eq!(lines[2], "Attempts left: 9");
    }

    fn stage_all(puzzle: &mut CodeBreaker, colors: [Color; 4]) -> StageOutcome {
        let mut outcome = StageOutcome::Ignored;
        for color in colors {
            outcome = puzzle.stage_color(color);
        }
        outcome
    }

    #[test]
    fn test_stage_then_commit_scores_once() {
        let mut puzzle = puzzle();
        let colors = wrong_code(&puzzle);
        let StageOutcome::Complete { ticket } = stage_all(&mut puzzle, colors) else {
            panic!("expected complete row");
        };
        assert_eq!(puzzle.pending(), Some(ticket));

        let outcome = puzzle.commit_attempt(ticket);
        let CommitOutcome::Scored { score, transition } = outcome else {
            panic!("expected score");
        };
        assert_eq!(score.exact, 3);
        assert_eq!(transition, Transition::Continued);
        assert_eq!(puzzle.history().len(), 1);
        assert!(puzzle.staged().is_empty());
        assert_eq!(puzzle.commit_attempt(ticket), CommitOutcome::Ignored);
        assert_eq!(puzzle.history().len(), 1);
    }

    #[test]
    fn test_undo_withdraws_pending_ticket() {
        let mut puzzle = puzzle();
        let colors = secret_colors(&puzzle);
        let StageOutcome::Complete { ticket } = stage_all(&mut puzzle, colors) else {
            panic!("expected complete row");
        };
        assert_eq!(puzzle.undo(), Some(colors[3]));
        assert_eq!(puzzle.pending(), None);
        assert_eq!(puzzle.commit_attempt(ticket), CommitOutcome::Ignored);

        // Re-staging the same color produces a new ticket; the old one stays dead.
        let StageOutcome::Complete { ticket: fresh } = puzzle.stage_color(colors[3]) else {
            panic!("expected complete row");
        };
        assert_ne!(fresh, ticket);
        assert_eq!(puzzle.commit_attempt(ticket), CommitOutcome::Ignored);
        assert!(puzzle.commit_attempt(fresh).is_scored());
        assert!(puzzle.state().is_solved());
    }

    #[test]
    fn test_full_row_ignores_further_colors() {
        let mut puzzle = puzzle();
        stage_all(&mut puzzle, [Red, Red, Red, Red]);
        assert_eq!(puzzle.stage_color(Blue), StageOutcome::Ignored);
        assert_eq!(puzzle.staged(), [Red, Red, Red, Red]);
    }

    #[test]
    fn test_reset_cancels_pending_commit() {
        let mut puzzle = puzzle();
        let StageOutcome::Complete { ticket } = stage_all(&mut puzzle, [Red, Red, Red, Red]) else {
            panic!("expected complete row");
        };
        puzzle.reset_with_seed(SEED);
        assert_eq!(puzzle.commit_attempt(ticket), CommitOutcome::Ignored);
        assert!(puzzle.history().is_empty());
        assert_eq!(puzzle.lifecycle().budget().used(), 0);
    }

    #[test]
    fn test_correct_code_solves_and_claims_banner() {
        let mut puzzle = puzzle();
        assert_eq!(puzzle.banner(), None);
        let outcome = puzzle.submit_attempt(&secret_colors(&puzzle));
        assert_eq!(
            outcome,
            CommitOutcome::Scored {
                score: Score::new(4, 0),
                transition: Transition::Solved
            }
        );
        let keyword = puzzle.keyword().unwrap();
        assert!(Keyword::CODE_BREAKER.contains(&keyword));
        assert_eq!(puzzle.banner(), Some(format!("UNLOCKED: {keyword}")));
        assert_eq!(puzzle.stage_color(Red), StageOutcome::Ignored);
    }

    #[test]
    fn test_exhausting_attempts_fails_and_discloses_secret() {
        let config =
            CodeBreakerConfig::default().with_max_attempts(NonZeroU8::new(3).unwrap());
        let mut puzzle = CodeBreaker::with_seed(config, SEED);
        let wrong = wrong_code(&puzzle);
        assert_eq!(puzzle.disclosed_code(), None);
        for _ in 0..2 {
            puzzle.submit_attempt(&wrong);
        }
        assert!(puzzle.state().is_unsolved());
        let outcome = puzzle.submit_attempt(&wrong);
        assert!(matches!(
            outcome,
            CommitOutcome::Scored {
                transition: Transition::Failed,
                ..
            }
        ));
        assert_eq!(puzzle.disclosed_code(), Some(puzzle.secret.code));
        assert!(puzzle.status().contains("Game over!"));

        // Further attempts leave the state untouched.
        let secret = secret_colors(&puzzle);
        assert_eq!(puzzle.submit_attempt(&secret), CommitOutcome::Ignored);
        assert!(puzzle.state().is_failed());
        assert_eq!(puzzle.history().len(), 3);
    }

    #[test]
    fn test_wrong_length_attempt_is_ignored() {
        let mut puzzle = puzzle();
        assert_eq!(puzzle.submit_attempt(&[Red, Blue]), CommitOutcome::Ignored);
        assert_eq!(
            puzzle.submit_attempt(&[Red, Blue, Green, Yellow, Purple]),
            CommitOutcome::Ignored
        );
        assert_eq!(puzzle.lifecycle().budget().used(), 0);
    }

    #[test]
    fn test_reveal_does_not_change_state() {
        let puzzle = puzzle();
        let text = puzzle.reveal();
        assert_eq!(text, format!("Control Unlock Code: {}", puzzle.secret.code));
        assert!(puzzle.state().is_unsolved());
    }

    #[test]
    fn test_same_seed_same_secret() {
        assert_eq!(puzzle().secret, puzzle().secret);
    }
}

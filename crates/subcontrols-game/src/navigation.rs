use subcontrols_core::Keyword;
use subcontrols_generator::{RiddleSecret, SecretGenerator, SecretSeed};

use crate::{AttemptBudget, Lifecycle, Puzzle, PuzzleId, PuzzleState};

/// The navigation riddle.
///
/// Answers are compared after trimming and case folding. Wrong answers cost
/// nothing.
#[derive(Debug, Clone)]
pub struct NavigationRiddle {
    generator: SecretGenerator,
    secret: RiddleSecret,
    lifecycle: Lifecycle,
}

impl NavigationRiddle {
    /// Creates the puzzle with a random riddle.
    #[must_use]
    pub fn new(generator: SecretGenerator) -> Self {
        Self::with_seed(generator, SecretSeed::random())
    }

    /// Creates the puzzle with the riddle selected by `seed`.
    #[must_use]
    pub fn with_seed(generator: SecretGenerator, seed: SecretSeed) -> Self {
        Self {
            generator,
            secret: generator.generate_riddle_with_seed(seed),
            lifecycle: Lifecycle::new(AttemptBudget::unlimited()),
        }
    }

    /// Returns the question.
    #[must_use]
    pub const fn prompt(&self) -> &'static str {
        self.secret.riddle.prompt()
    }

    /// Returns the lifecycle.
    #[must_use]
    pub const fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    /// Returns the unlocked keyword once answered.
    #[must_use]
    pub fn keyword(&self) -> Option<Keyword> {
        self.state()
            .is_solved()
            .then_some(self.secret.riddle.keyword())
    }

    /// Checks `answer`.
    ///
    /// Returns whether it was correct, or `None` if the riddle is already solved.
    pub fn answer(&mut self, answer: &str) -> Option<bool> {
        if !self.lifecycle.accepts_attempts() {
            return None;
        }
        let correct = self.secret.riddle.accepts(answer);
        log::debug!("navigation: answer {answer:?} correct={correct}");
        if self.lifecycle.record(correct).is_solved() {
            log::info!("navigation: riddle solved");
        }
        Some(correct)
    }
}

impl Puzzle for NavigationRiddle {
    fn id(&self) -> PuzzleId {
        PuzzleId::Navigation
    }

    fn state(&self) -> PuzzleState {
        self.lifecycle.state()
    }

    fn reset_with_seed(&mut self, seed: SecretSeed) {
        self.secret = self.generator.generate_riddle_with_seed(seed);
        self.lifecycle.reset();
        log::info!("navigation: reset");
    }

    fn reveal(&self) -> String {
        let answer = self.secret.riddle.answers().first().copied().unwrap_or("?");
        format!("Nav Riddle: {answer}")
    }

    fn status(&self) -> String {
        match self.keyword() {
            Some(keyword) => format!("{}\nCourse plotted. Keyword: {keyword}", self.prompt()),
            None => format!(
                "{}\nAnswers tried: {}",
                self.prompt(),
                self.lifecycle.budget().used()
            ),
        }
    }

    fn banner(&self) -> Option<String> {
        self.keyword().map(|keyword| format!("UNLOCKED: {keyword}"))
    }
}

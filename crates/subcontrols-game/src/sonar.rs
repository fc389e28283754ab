use subcontrols_core::{Cell, Keyword};
use subcontrols_generator::{SecretGenerator, SecretSeed, SonarSecret};
use subcontrols_solver::{SonarBoard, ToggleOutcome};

use crate::{AttemptBudget, Lifecycle, Puzzle, PuzzleId, PuzzleState};

/// The sonar contact grid.
///
/// Every accepted toggle is checked against the hidden pattern; the puzzle is
/// solved as soon as the active cells equal it. There is no attempt limit: the
/// row and column targets block invalid moves instead.
///
/// # Examples
///
/// ```
/// use subcontrols_game::{Puzzle, SonarPuzzle};
/// use subcontrols_generator::{SecretGenerator, SecretSeed};
///
/// let mut puzzle = SonarPuzzle::with_seed(SecretGenerator::new(), SecretSeed::from_bytes([3; 32]));
/// let cells: Vec<_> = puzzle.board().target().cells().iter().collect();
/// for cell in cells {
///     assert!(puzzle.toggle(cell).is_some_and(|outcome| outcome.is_activated()));
/// }
/// assert!(puzzle.state().is_solved());
/// ```
#[derive(Debug, Clone)]
pub struct SonarPuzzle {
    generator: SecretGenerator,
    secret: SonarSecret,
    board: SonarBoard,
    lifecycle: Lifecycle,
}

impl SonarPuzzle {
    /// Keyword disclosed when the pattern is found.
    pub const KEYWORD: Keyword = Keyword::SONAR;

    /// Creates a puzzle with a random pattern.
    #[must_use]
    pub fn new(generator: SecretGenerator) -> Self {
        Self::with_seed(generator, SecretSeed::random())
    }

    /// Creates a puzzle with the pattern determined by `seed`.
    #[must_use]
    pub fn with_seed(generator: SecretGenerator, seed: SecretSeed) -> Self {
        let secret = generator.generate_sonar_with_seed(seed);
        let board = SonarBoard::new(secret.target.clone());
        Self {
            generator,
            secret,
            board,
            lifecycle: Lifecycle::new(AttemptBudget::unlimited()),
        }
    }

    /// Returns the board with the player's active cells.
    #[must_use]
    pub const fn board(&self) -> &SonarBoard {
        &self.board
    }

    /// Returns the lifecycle.
    #[must_use]
    pub const fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    /// Toggles `cell`.
    ///
    /// Returns `None` once the puzzle is solved; the board is then frozen until
    /// reset. A rejected toggle leaves the board unchanged and carries the
    /// violated lines.
    pub fn toggle(&mut self, cell: Cell) -> Option<ToggleOutcome> {
        if !self.lifecycle.accepts_attempts() {
            return None;
        }
        let outcome = self.board.toggle(cell);
        match &outcome {
            ToggleOutcome::Rejected(violations) => {
                for violation in violations {
                    log::debug!("sonar: rejected {cell}: {violation}");
                }
            }
            ToggleOutcome::OutOfBounds => log::debug!("sonar: {cell} is off the grid"),
            ToggleOutcome::Activated | ToggleOutcome::Deactivated => {
                if self.lifecycle.record(self.board.matches()).is_solved() {
                    log::info!("sonar: pattern matched");
                }
            }
        }
        Some(outcome)
    }

    /// Renders the grid with row targets on the right and column targets below.
    ///
    /// Active cells are `#`; with `show_secret`, hidden contacts not yet active
    /// are `o`.
    #[must_use]
    pub fn render(&self, show_secret: bool) -> String {
        let target = self.board.target();
        let size = target.size().get();
        let header: String = (0..size).map(|col| col.to_string()).collect();
        let mut lines = vec![format!("   {header}")];
        lines.extend((0..size).map(|row| {
            let cells: String = (0..size)
                .map(|col| {
                    let cell = Cell::new(row, col);
                    if self.board.active().contains(cell) {
                        '#'
                    } else if show_secret && target.cells().contains(cell) {
                        'o'
                    } else {
                        '.'
                    }
                })
                .collect();
            format!(
                "{row}  {cells}  {}/{}",
                self.board.row_count(row),
                target.row_target(row)
            )
        }));
        let footer: String = target
            .col_targets()
            .iter()
            .map(ToString::to_string)
            .collect();
        lines.push(format!("   {footer}"));
        lines.join("\n")
    }
}

impl Puzzle for SonarPuzzle {
    fn id(&self) -> PuzzleId {
        PuzzleId::Sonar
    }

    fn state(&self) -> PuzzleState {
        self.lifecycle.state()
    }

    fn reset_with_seed(&mut self, seed: SecretSeed) {
        self.secret = self.generator.generate_sonar_with_seed(seed);
        self.board = SonarBoard::new(self.secret.target.clone());
        self.lifecycle.reset();
        log::info!("sonar: reset with {} pattern", self.secret.shape.name());
    }

    fn reveal(&self) -> String {
        let cells = self
            .secret
            .target
            .cells()
            .iter()
            .map(|cell| cell.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        format!("Sonar Contacts: {cells}")
    }

    fn status(&self) -> String {
        let summary = match self.lifecycle.state() {
            PuzzleState::Solved => format!("Contact pattern locked. Keyword: {}", Self::KEYWORD),
            PuzzleState::Unsolved | PuzzleState::Failed => format!(
                "Active contacts: {}/{}",
                self.board.active().len(),
                self.secret.target.cells().len()
            ),
        };
        format!("{}\n{summary}", self.render(false))
    }

    fn banner(&self) -> Option<String> {
        self.state()
            .is_solved()
            .then(|| format!("UNLOCKED: {}", Self::KEYWORD))
    }
}

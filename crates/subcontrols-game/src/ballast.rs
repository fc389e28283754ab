use std::num::NonZeroU8;

use subcontrols_core::{Keyword, Lever, LeverPosition, Polarity, Residual};
use subcontrols_generator::SecretSeed;
use subcontrols_solver::{BallastRig, Offsets};

use crate::{
    AttemptBudget, BallastReport, Lifecycle, Puzzle, PuzzleId, PuzzleState, Transition,
};

/// Options for [`BallastPuzzle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BallastConfig {
    /// Number of confirmed moves allowed.
    pub max_moves: NonZeroU8,
    /// Keyword disclosed on equilibrium.
    pub keyword: Keyword,
    /// Panel physics.
    pub rig: BallastRig,
}

impl Default for BallastConfig {
    fn default() -> Self {
        Self {
            max_moves: NonZeroU8::new(7).unwrap_or(NonZeroU8::MIN),
            keyword: Keyword::TRIM,
            rig: BallastRig::default(),
        }
    }
}

impl BallastConfig {
    /// Sets the number of confirmed moves allowed.
    #[must_use]
    pub const fn with_max_moves(mut self, max_moves: NonZeroU8) -> Self {
        self.max_moves = max_moves;
        self
    }

    /// Sets the keyword disclosed on equilibrium.
    #[must_use]
    pub const fn with_keyword(mut self, keyword: Keyword) -> Self {
        self.keyword = keyword;
        self
    }

    /// Sets the panel physics.
    #[must_use]
    pub const fn with_rig(mut self, rig: BallastRig) -> Self {
        self.rig = rig;
        self
    }
}

/// Result of [`BallastPuzzle::confirm`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Confirmation {
    /// Residual of the confirmed lever setting.
    pub residual: Residual,
    /// The lifecycle change it caused.
    pub transition: Transition,
}

/// The ballast trim panel.
///
/// Levers and polarity can be moved freely; only a confirmed move is checked
/// against equilibrium and counted against the move budget.
///
/// # Examples
///
/// ```
/// use subcontrols_core::{Lever, LeverPosition};
/// use subcontrols_game::{BallastConfig, BallastPuzzle, Puzzle};
///
/// let mut puzzle = BallastPuzzle::new(BallastConfig::default());
/// for (lever, position) in Lever::ALL.into_iter().zip([0, 0, 2, 4]) {
///     puzzle.set_lever(lever, LeverPosition::new(position)?);
/// }
/// let confirmation = puzzle.confirm().expect("puzzle accepts moves");
/// assert!(confirmation.residual.is_neutral());
/// assert!(puzzle.state().is_solved());
/// # Ok::<(), subcontrols_core::LeverPositionError>(())
/// ```
#[derive(Debug, Clone)]
pub struct BallastPuzzle {
    config: BallastConfig,
    positions: [LeverPosition; 4],
    polarity: Polarity,
    lifecycle: Lifecycle,
    last_confirmed: Residual,
    pending: bool,
}

impl BallastPuzzle {
    /// Creates a panel with centred levers and flood polarity.
    #[must_use]
    pub fn new(config: BallastConfig) -> Self {
        Self {
            config,
            positions: [LeverPosition::CENTER; 4],
            polarity: Polarity::Flood,
            lifecycle: Lifecycle::new(AttemptBudget::limited(config.max_moves)),
            last_confirmed: config.rig.base(),
            pending: false,
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &BallastConfig {
        &self.config
    }

    /// Returns the lifecycle.
    #[must_use]
    pub const fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    /// Returns the position of `lever`.
    #[must_use]
    pub const fn position(&self, lever: Lever) -> LeverPosition {
        self.positions[lever.index()]
    }

    /// Returns the signed offsets of all levers in panel order.
    #[must_use]
    pub fn offsets(&self) -> Offsets {
        self.positions.map(LeverPosition::offset)
    }

    /// Returns the current polarity.
    #[must_use]
    pub const fn polarity(&self) -> Polarity {
        self.polarity
    }

    /// Returns `true` if levers or polarity changed since the last confirmation.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending
    }

    /// Returns the residual of the last confirmed move, or the base residual.
    #[must_use]
    pub const fn last_confirmed(&self) -> Residual {
        self.last_confirmed
    }

    /// Returns the residual the current setting would produce if confirmed.
    #[must_use]
    pub fn projected(&self) -> Residual {
        self.config
            .rig
            .evaluate_positions(self.positions, self.polarity)
    }

    /// Moves `lever` to `position`.
    ///
    /// Returns `false` if the panel is locked.
    pub fn set_lever(&mut self, lever: Lever, position: LeverPosition) -> bool {
        if !self.lifecycle.accepts_attempts() {
            return false;
        }
        if self.positions[lever.index()] != position {
            self.positions[lever.index()] = position;
            self.pending = true;
        }
        true
    }

    /// Switches between flooding and venting.
    ///
    /// Returns the new polarity, or `None` if the panel is locked.
    pub fn toggle_polarity(&mut self) -> Option<Polarity> {
        if !self.lifecycle.accepts_attempts() {
            return None;
        }
        self.polarity = self.polarity.toggled();
        self.pending = true;
        Some(self.polarity)
    }

    /// Engages the current setting, spending one move.
    ///
    /// Returns `None` if the panel is locked.
    pub fn confirm(&mut self) -> Option<Confirmation> {
        if !self.lifecycle.accepts_attempts() {
            return None;
        }
        let residual = self.projected();
        self.last_confirmed = residual;
        self.pending = false;
        let transition = self.lifecycle.record(residual.is_neutral());
        log::debug!("ballast: confirmed {:?} -> {residual}", self.offsets());
        match transition {
            Transition::Solved => log::info!("ballast: equilibrium reached"),
            Transition::Failed => log::info!("ballast: out of moves"),
            Transition::Continued | Transition::Ignored => {}
        }
        Some(Confirmation {
            residual,
            transition,
        })
    }

    /// Describes the last confirmed residual.
    #[must_use]
    pub fn report(&self) -> BallastReport {
        let report = BallastReport::describe(self.last_confirmed);
        match self.lifecycle.state() {
            PuzzleState::Failed => report.locked_out(),
            PuzzleState::Unsolved if self.pending => report.pending(),
            PuzzleState::Unsolved | PuzzleState::Solved => report,
        }
    }

    /// Returns the unlocked keyword once balanced.
    #[must_use]
    pub fn keyword(&self) -> Option<Keyword> {
        self.state().is_solved().then_some(self.config.keyword)
    }

    /// Lists every neutral lever setting under flood polarity.
    #[must_use]
    pub fn hint(&self) -> String {
        let solutions = self.config.rig.find_all_solutions(Polarity::Flood);
        let text = if solutions.is_empty() {
            "No neutral combination found.".to_owned()
        } else {
            solutions
                .iter()
                .map(|offsets| format_offsets(*offsets))
                .collect::<Vec<_>>()
                .join("  •  ")
        };
        format!("Ballast Offsets (flood polarity): {text}")
    }
}

fn format_offsets(offsets: Offsets) -> String {
    Lever::ALL
        .iter()
        .zip(offsets)
        .map(|(lever, offset)| format!("{}: {offset:+}", lever.label()))
        .collect::<Vec<_>>()
        .join(" | ")
}

impl Puzzle for BallastPuzzle {
    fn id(&self) -> PuzzleId {
        PuzzleId::Ballast
    }

    fn state(&self) -> PuzzleState {
        self.lifecycle.state()
    }

    // The rig is fixed; reset only restores the panel.
    fn reset_with_seed(&mut self, _seed: SecretSeed) {
        self.positions = [LeverPosition::CENTER; 4];
        self.polarity = Polarity::Flood;
        self.lifecycle.reset();
        self.last_confirmed = self.config.rig.base();
        self.pending = false;
        log::info!("ballast: reset");
    }

    fn reveal(&self) -> String {
        self.hint()
    }

    fn status(&self) -> String {
        let mut lines = vec![format!("Polarity: {}", self.polarity)];
        lines.extend(
            Lever::ALL
                .into_iter()
                .map(|lever| format!("{:<15} {:+}", lever.label(), self.position(lever).offset())),
        );
        lines.push(self.report().to_string());
        lines.push(match self.lifecycle.state() {
            PuzzleState::Unsolved => {
                let remaining = self.lifecycle.budget().remaining().unwrap_or_default();
                format!("Moves left: {remaining}")
            }
            PuzzleState::Solved => format!("Systems balanced, keyword {}", self.config.keyword),
            PuzzleState::Failed => "Pressure hull breach imminent, reset required.".to_owned(),
        });
        lines.join("\n")
    }

    fn banner(&self) -> Option<String> {
        self.keyword().map(|keyword| format!("{keyword} SECURED"))
    }
}

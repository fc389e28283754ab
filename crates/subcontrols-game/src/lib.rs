//! Puzzle sessions for the submarine console.
//!
//! # Overview
//!
//! Every puzzle follows the same [`Lifecycle`]: it accepts attempts while
//! `Unsolved`, becomes `Solved` on a match or `Failed` when its
//! [`AttemptBudget`] runs out, and ignores attempts in either terminal state
//! until it is reset.
//!
//! - [`CodeBreaker`]: four-color code with exact/color scoring, ten rows.
//! - [`SonarPuzzle`]: grid of contacts checked against row and column targets.
//! - [`BallastPuzzle`]: four levers and a polarity switch, seven confirmed moves.
//! - [`SpotDifference`]: six differences between two porthole scenes.
//! - [`NavigationRiddle`]: a riddle with free-text answers.
//!
//! A [`PuzzleRegistry`] owns the puzzles of one console and keeps the shared
//! [`KeywordBanner`] in sync: the last puzzle solved owns the banner, and only
//! the owner can clear it.
//!
//! # Examples
//!
//! ```
//! use subcontrols_core::Color;
//! use subcontrols_game::{CodeBreaker, PuzzleRegistry};
//! use subcontrols_generator::SecretSeed;
//!
//! let mut registry = PuzzleRegistry::with_default_puzzles();
//! registry.init_all(SecretSeed::from_bytes([0; 32]));
//!
//! let outcome = registry.update(|puzzle: &mut CodeBreaker| {
//!     puzzle.submit_attempt(&[Color::Red, Color::Green, Color::Blue, Color::Yellow])
//! })?;
//! assert!(outcome.is_scored());
//! # Ok::<(), subcontrols_game::RegistryError>(())
//! ```

pub use self::{
    ballast::{BallastConfig, BallastPuzzle, Confirmation},
    ballast_report::{BallastReport, StatusLevel},
    banner::KeywordBanner,
    code_breaker::{
        AttemptRecord, CodeBreaker, CodeBreakerConfig, CommitOutcome, CommitTicket, StageOutcome,
    },
    lifecycle::{AttemptBudget, Lifecycle, PuzzleState, Transition},
    navigation::NavigationRiddle,
    puzzle::{ParsePuzzleIdError, Puzzle, PuzzleId},
    registry::{PuzzleRegistry, RegistryError},
    sonar::SonarPuzzle,
    spot_difference::{DIFFERENCES, Difference, SpotDifference},
};

mod ballast;
mod ballast_report;
mod banner;
mod code_breaker;
mod lifecycle;
mod navigation;
mod puzzle;
mod registry;
mod sonar;
mod spot_difference;

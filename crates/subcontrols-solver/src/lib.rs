//! Attempt evaluation for the SubControls puzzles.
//!
//! Every function in this crate is pure and terminates in bounded time:
//!
//! - [`score`] compares a guessed color [`Code`] with the hidden one (exact and
//!   color-only matches).
//! - [`SonarBoard`] checks toggled cells against per-row / per-column targets and
//!   the exact target cell set.
//! - [`BallastRig`] evaluates lever offsets into tilt/depth residuals and enumerates
//!   every offset combination that reaches equilibrium.
//!
//! Lifecycle (attempt budgets, solved/failed states) lives in `subcontrols-game`;
//! this crate only answers "how close is this attempt".
//!
//! [`Code`]: subcontrols_core::Code

pub mod ballast;
pub mod score;
pub mod sonar;

pub use self::{
    ballast::{BallastRig, LeverCoefficients, Offsets},
    score::{Score, score},
    sonar::{Line, LineViolation, SonarBoard, SonarTarget, ToggleOutcome, Violations},
};

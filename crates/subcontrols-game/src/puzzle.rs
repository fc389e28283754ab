use std::{
    any::Any,
    fmt::{self, Debug, Display},
    str::FromStr,
};

use subcontrols_generator::SecretSeed;

use crate::PuzzleState;

/// Identifier of a registered puzzle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PuzzleId {
    /// Four-color code breaker.
    ControlUnlock,
    /// Sonar contact grid.
    Sonar,
    /// Ballast trim panel.
    Ballast,
    /// Porthole spot-the-difference.
    SpotDifference,
    /// Navigation riddle.
    Navigation,
}

impl PuzzleId {
    /// All identifiers in console order.
    pub const ALL: [Self; 5] = [
        Self::ControlUnlock,
        Self::Sonar,
        Self::Ballast,
        Self::SpotDifference,
        Self::Navigation,
    ];

    /// Returns the stable text id, also used to derive per-puzzle seeds.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ControlUnlock => "control-unlock",
            Self::Sonar => "sonar",
            Self::Ballast => "ballast",
            Self::SpotDifference => "spot-diff",
            Self::Navigation => "navigation",
        }
    }

    /// Returns the human-readable title.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::ControlUnlock => "Control Unlock",
            Self::Sonar => "Sonar Sweep",
            Self::Ballast => "Ballast Trim",
            Self::SpotDifference => "Porthole",
            Self::Navigation => "Nav Riddle",
        }
    }
}

impl Display for PuzzleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown [`PuzzleId`].
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("unknown puzzle id: {id:?}")]
pub struct ParsePuzzleIdError {
    #[error(not(source))]
    id: String,
}

impl FromStr for PuzzleId {
    type Err = ParsePuzzleIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|id| id.as_str() == s.trim())
            .ok_or_else(|| ParsePuzzleIdError { id: s.to_owned() })
    }
}

/// The uniform contract every puzzle offers to the registry.
///
/// A puzzle owns its secret, its attempt budget and its [`PuzzleState`]
/// exclusively. Interaction happens through the concrete type; the registry
/// only needs the lifecycle hooks below.
pub trait Puzzle: Any + Debug {
    /// Returns the identifier the puzzle is registered under.
    fn id(&self) -> PuzzleId;

    /// Returns the current lifecycle state.
    fn state(&self) -> PuzzleState;

    /// Generates the secret determined by `seed` and returns to `Unsolved`.
    fn reset_with_seed(&mut self, seed: SecretSeed);

    /// Generates a fresh random secret and returns to `Unsolved`.
    fn reset(&mut self) {
        self.reset_with_seed(SecretSeed::random());
    }

    /// Discloses the current secret. Never changes the state.
    fn reveal(&self) -> String;

    /// Describes the puzzle's progress for display.
    fn status(&self) -> String;

    /// Returns the banner text this puzzle claims, if solved.
    fn banner(&self) -> Option<String>;
}

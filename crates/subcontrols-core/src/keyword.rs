//! Keywords revealed by solved puzzles.

use std::fmt::{self, Display};

/// A keyword that unlocks further content once a puzzle is solved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Keyword(&'static str);

impl Keyword {
    /// `RUDDER`
    pub const RUDDER: Self = Self("RUDDER");
    /// `PERISCOPE`
    pub const PERISCOPE: Self = Self("PERISCOPE");
    /// `HELM`
    pub const HELM: Self = Self("HELM");
    /// `BALLAST`
    pub const BALLAST: Self = Self("BALLAST");
    /// `TRIM`
    pub const TRIM: Self = Self("TRIM");
    /// `SONAR`
    pub const SONAR: Self = Self("SONAR");
    /// `COMPASS`
    pub const COMPASS: Self = Self("COMPASS");

    /// Keywords the code-breaking puzzle draws from.
    pub const CODE_BREAKER: [Self; 4] = [Self::RUDDER, Self::PERISCOPE, Self::HELM, Self::BALLAST];

    /// Returns the keyword text.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        self.0
    }
}

impl Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

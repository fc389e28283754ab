//! Secret generation for the submarine puzzles.
//!
//! # Overview
//!
//! Every randomized secret is produced from a [`SecretSeed`]. A seed is expanded
//! with a PCG-64 generator, so the same seed always yields the same secret:
//!
//! - [`SecretGenerator::generate_code`] draws a four-color code and the keyword it
//!   unlocks.
//! - [`SecretGenerator::generate_sonar`] picks a base [`Shape`], applies a random
//!   rotation/reflection and derives the row and column targets.
//! - [`SecretGenerator::generate_riddle`] picks one of the navigation [`RIDDLES`].
//!
//! A session uses one seed and [`SecretSeed::derive`]s a sub-seed per puzzle.
//!
//! # Examples
//!
//! ```
//! use subcontrols_generator::{SecretGenerator, SecretSeed};
//!
//! let generator = SecretGenerator::new();
//! let seed = SecretSeed::from_bytes([7; 32]);
//!
//! let a = generator.generate_sonar_with_seed(seed);
//! let b = generator.generate_sonar_with_seed(seed);
//! assert_eq!(a.target, b.target);
//!
//! let rows: u8 = a.target.row_targets().iter().sum();
//! assert_eq!(usize::from(rows), a.target.cells().len());
//! ```

use rand::{Rng, RngExt as _};
use subcontrols_core::{Code, Color, GridSize, Keyword, Transform};
use subcontrols_solver::SonarTarget;

pub use self::{
    riddle::{RIDDLES, Riddle},
    seed::{ParseSeedError, SecretSeed},
    shape::{SHAPES, Shape},
};

mod riddle;
mod seed;
mod shape;

/// Default sonar grid size.
pub const SONAR_GRID_SIZE: GridSize = match GridSize::new(6) {
    Some(size) => size,
    None => panic!("invalid sonar grid size"),
};

/// A generated color code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeSecret {
    /// The hidden code.
    pub code: Code,
    /// The keyword disclosed when the code is broken.
    pub keyword: Keyword,
    /// The seed that reproduces this secret.
    pub seed: SecretSeed,
}

/// A generated sonar contact pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SonarSecret {
    /// The base shape before transformation.
    pub shape: Shape,
    /// The rotation and reflections applied to the shape.
    pub transform: Transform,
    /// The transformed cells and their line targets.
    pub target: SonarTarget,
    /// The seed that reproduces this secret.
    pub seed: SecretSeed,
}

/// A selected navigation riddle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RiddleSecret {
    /// The riddle to answer.
    pub riddle: Riddle,
    /// The seed that reproduces this selection.
    pub seed: SecretSeed,
}

/// Error returned when a sonar grid is too small for a library shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("sonar shape {shape} does not fit a {size}x{size} grid")]
pub struct SonarSizeError {
    /// The first shape that does not fit.
    #[error(not(source))]
    pub shape: &'static str,
    /// The rejected side length.
    pub size: u8,
}

/// Generates puzzle secrets from seeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SecretGenerator {
    sonar_size: GridSize,
    shapes: &'static [Shape],
    keywords: &'static [Keyword],
    riddles: &'static [Riddle],
}

impl Default for SecretGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl SecretGenerator {
    /// Creates a generator with the built-in libraries and a 6×6 sonar grid.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            sonar_size: SONAR_GRID_SIZE,
            shapes: &SHAPES,
            keywords: &Keyword::CODE_BREAKER,
            riddles: &RIDDLES,
        }
    }

    /// Sets the sonar grid size.
    ///
    /// # Errors
    ///
    /// Returns [`SonarSizeError`] if a library shape does not fit the grid, so
    /// every generated pattern keeps all of its contacts.
    pub fn with_sonar_size(mut self, size: GridSize) -> Result<Self, SonarSizeError> {
        if let Some(shape) = self.shapes.iter().find(|shape| !shape.fits(size)) {
            return Err(SonarSizeError {
                shape: shape.name(),
                size: size.get(),
            });
        }
        self.sonar_size = size;
        Ok(self)
    }

    /// Sets the keywords a code secret may unlock.
    ///
    /// An empty list keeps the built-in keywords.
    #[must_use]
    pub const fn with_code_keywords(mut self, keywords: &'static [Keyword]) -> Self {
        if !keywords.is_empty() {
            self.keywords = keywords;
        }
        self
    }

    /// Returns the sonar grid size.
    #[must_use]
    pub const fn sonar_size(&self) -> GridSize {
        self.sonar_size
    }

    /// Generates a code secret from a fresh random seed.
    #[must_use]
    pub fn generate_code(&self) -> CodeSecret {
        self.generate_code_with_seed(SecretSeed::random())
    }

    /// Generates the code secret determined by `seed`.
    #[must_use]
    pub fn generate_code_with_seed(&self, seed: SecretSeed) -> CodeSecret {
        let mut rng = seed.rng();
        let code = Code::new([(); 4].map(|()| pick(&mut rng, &Color::ALL)));
        let keyword = pick(&mut rng, self.keywords);
        CodeSecret {
            code,
            keyword,
            seed,
        }
    }

    /// Generates a sonar secret from a fresh random seed.
    #[must_use]
    pub fn generate_sonar(&self) -> SonarSecret {
        self.generate_sonar_with_seed(SecretSeed::random())
    }

    /// Generates the sonar secret determined by `seed`.
    #[must_use]
    pub fn generate_sonar_with_seed(&self, seed: SecretSeed) -> SonarSecret {
        let mut rng = seed.rng();
        let shape = pick(&mut rng, self.shapes);
        let transform = Transform::new(
            rng.random_range(0..4),
            rng.random_bool(0.5),
            rng.random_bool(0.5),
        );
        let cells = transform.apply_set(&shape.cells(), self.sonar_size);
        SonarSecret {
            shape,
            transform,
            target: SonarTarget::new(self.sonar_size, cells),
            seed,
        }
    }

    /// Selects a riddle from a fresh random seed.
    #[must_use]
    pub fn generate_riddle(&self) -> RiddleSecret {
        self.generate_riddle_with_seed(SecretSeed::random())
    }

    /// Selects the riddle determined by `seed`.
    #[must_use]
    pub fn generate_riddle_with_seed(&self, seed: SecretSeed) -> RiddleSecret {
        let mut rng = seed.rng();
        RiddleSecret {
            riddle: pick(&mut rng, self.riddles),
            seed,
        }
    }
}

// Every library slice handed to `pick` is non-empty.
fn pick<T: Copy, R: Rng>(rng: &mut R, items: &[T]) -> T {
    items[rng.random_range(0..items.len())]
}

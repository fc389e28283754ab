use std::{
    any::{Any, type_name},
    collections::HashMap,
};

use subcontrols_generator::{SecretGenerator, SecretSeed};

use crate::{
    BallastConfig, BallastPuzzle, CodeBreaker, CodeBreakerConfig, KeywordBanner,
    NavigationRiddle, Puzzle, PuzzleId, SonarPuzzle, SpotDifference,
};

/// Errors from [`PuzzleRegistry`].
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum RegistryError {
    /// A puzzle with the same id is already registered.
    #[display("puzzle {id} is already registered")]
    Duplicate {
        /// The conflicting id.
        id: PuzzleId,
    },
    /// No puzzle is registered under the id.
    #[display("no puzzle registered as {id}")]
    UnknownId {
        /// The requested id.
        id: PuzzleId,
    },
    /// No puzzle of the requested type is registered.
    #[display("no puzzle of type {type_name} is registered")]
    NotRegistered {
        /// The requested type.
        type_name: &'static str,
    },
}

/// All puzzles of a console plus the keyword banner they share.
///
/// Puzzles are kept in registration order. After every interaction routed
/// through the registry, the banner is synchronised with the puzzle involved:
/// a solved puzzle claims it, any other puzzle releases it if it was the owner.
///
/// # Examples
///
/// ```
/// use subcontrols_core::{Lever, LeverPosition};
/// use subcontrols_game::{BallastPuzzle, PuzzleId, PuzzleRegistry};
/// use subcontrols_generator::SecretSeed;
///
/// let mut registry = PuzzleRegistry::with_default_puzzles();
/// registry.init_all(SecretSeed::from_bytes([1; 32]));
///
/// registry.update(|ballast: &mut BallastPuzzle| {
///     for (lever, offset) in Lever::ALL.into_iter().zip([-2, -2, 0, 2]) {
///         ballast.set_lever(lever, LeverPosition::from_offset(offset).unwrap());
///     }
///     ballast.confirm();
/// })?;
/// assert_eq!(registry.banner().owner(), Some(PuzzleId::Ballast));
/// assert_eq!(registry.banner().text(), Some("TRIM SECURED"));
///
/// registry.reset_all();
/// assert_eq!(registry.banner().owner(), None);
/// # Ok::<(), subcontrols_game::RegistryError>(())
/// ```
#[derive(Debug, Default)]
pub struct PuzzleRegistry {
    puzzles: Vec<Box<dyn Puzzle>>,
    banner: KeywordBanner,
    seed: Option<SecretSeed>,
    puzzle_seeds: HashMap<PuzzleId, SecretSeed>,
}

impl PuzzleRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with the five console puzzles in their default
    /// configuration.
    #[must_use]
    pub fn with_default_puzzles() -> Self {
        let generator = SecretGenerator::new();
        let puzzles: [Box<dyn Puzzle>; 5] = [
            Box::new(CodeBreaker::new(
                CodeBreakerConfig::default().with_generator(generator),
            )),
            Box::new(SonarPuzzle::new(generator)),
            Box::new(BallastPuzzle::new(BallastConfig::default())),
            Box::new(SpotDifference::new()),
            Box::new(NavigationRiddle::new(generator)),
        ];
        Self {
            puzzles: puzzles.into(),
            ..Self::default()
        }
    }

    /// Adds `puzzle` after the already registered ones.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Duplicate`] if a puzzle with the same id exists.
    pub fn register<P: Puzzle>(&mut self, puzzle: P) -> Result<(), RegistryError> {
        let id = puzzle.id();
        if self.get(id).is_some() {
            return Err(RegistryError::Duplicate { id });
        }
        self.puzzles.push(Box::new(puzzle));
        Ok(())
    }

    /// Returns the ids of the registered puzzles in registration order.
    pub fn ids(&self) -> impl Iterator<Item = PuzzleId> + '_ {
        self.puzzles.iter().map(|puzzle| puzzle.id())
    }

    /// Returns the registered puzzles in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &(dyn Puzzle + 'static)> + '_ {
        self.puzzles.iter().map(|puzzle| &**puzzle)
    }

    /// Returns the puzzle registered as `id`.
    #[must_use]
    pub fn get(&self, id: PuzzleId) -> Option<&dyn Puzzle> {
        self.iter().find(|puzzle| puzzle.id() == id)
    }

    /// Returns the registered puzzle of type `P`.
    #[must_use]
    pub fn puzzle<P: Puzzle>(&self) -> Option<&P> {
        self.puzzles.iter().find_map(|puzzle| {
            let any: &dyn Any = &**puzzle;
            any.downcast_ref::<P>()
        })
    }

    /// Runs `f` on the registered puzzle of type `P`, then synchronises the
    /// banner with it.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotRegistered`] if no puzzle of type `P` exists.
    pub fn update<P, F, R>(&mut self, f: F) -> Result<R, RegistryError>
    where
        P: Puzzle,
        F: FnOnce(&mut P) -> R,
    {
        let (index, puzzle) = self
            .puzzles
            .iter_mut()
            .enumerate()
            .find_map(|(index, puzzle)| {
                let any: &mut dyn Any = &mut **puzzle;
                any.downcast_mut::<P>().map(|puzzle| (index, puzzle))
            })
            .ok_or(RegistryError::NotRegistered {
                type_name: type_name::<P>(),
            })?;
        let result = f(puzzle);
        self.sync_banner(index);
        Ok(result)
    }

    /// Returns the shared banner.
    #[must_use]
    pub const fn banner(&self) -> &KeywordBanner {
        &self.banner
    }

    /// Returns the seed passed to the last [`init_all`](Self::init_all) or
    /// [`reset_all`](Self::reset_all), if any.
    ///
    /// Puzzles reset on their own since then no longer follow this seed; their
    /// secrets are reproduced by [`puzzle_seed`](Self::puzzle_seed).
    #[must_use]
    pub const fn seed(&self) -> Option<SecretSeed> {
        self.seed
    }

    /// Returns the seed the puzzle registered as `id` was last reset with.
    #[must_use]
    pub fn puzzle_seed(&self, id: PuzzleId) -> Option<SecretSeed> {
        self.puzzle_seeds.get(&id).copied()
    }

    /// Performs the first reset of every puzzle from one session seed.
    ///
    /// Each puzzle receives a seed derived from `seed` and its id.
    pub fn init_all(&mut self, seed: SecretSeed) {
        log::info!("initialising {} puzzles", self.puzzles.len());
        self.reset_all_with_seed(seed);
    }

    /// Resets every puzzle with fresh random secrets.
    pub fn reset_all(&mut self) {
        self.reset_all_with_seed(SecretSeed::random());
    }

    /// Clears the banner, then resets every puzzle from `seed`.
    pub fn reset_all_with_seed(&mut self, seed: SecretSeed) {
        self.banner.clear_all();
        self.seed = Some(seed);
        for puzzle in &mut self.puzzles {
            let id = puzzle.id();
            let puzzle_seed = seed.derive(id.as_str());
            puzzle.reset_with_seed(puzzle_seed);
            self.puzzle_seeds.insert(id, puzzle_seed);
        }
        log::info!("session seed {seed}");
    }

    /// Resets the puzzle registered as `id` with a fresh random secret and
    /// returns the seed it was given.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UnknownId`] if no puzzle is registered as `id`.
    pub fn reset(&mut self, id: PuzzleId) -> Result<SecretSeed, RegistryError> {
        let seed = SecretSeed::random();
        self.reset_with_seed(id, seed)?;
        Ok(seed)
    }

    /// Resets the puzzle registered as `id` with the secret determined by `seed`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UnknownId`] if no puzzle is registered as `id`.
    pub fn reset_with_seed(&mut self, id: PuzzleId, seed: SecretSeed) -> Result<(), RegistryError> {
        let index = self
            .puzzles
            .iter()
            .position(|puzzle| puzzle.id() == id)
            .ok_or(RegistryError::UnknownId { id })?;
        self.puzzles[index].reset_with_seed(seed);
        self.puzzle_seeds.insert(id, seed);
        self.sync_banner(index);
        log::info!("{id} reset with seed {seed}");
        Ok(())
    }

    /// Reveals every puzzle's secret, one line per puzzle. States are unchanged.
    #[must_use]
    pub fn reveal_all(&self) -> String {
        self.iter()
            .map(Puzzle::reveal)
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn sync_banner(&mut self, index: usize) {
        let Some(puzzle) = self.puzzles.get(index) else {
            return;
        };
        let id = puzzle.id();
        match puzzle.banner() {
            Some(text) => {
                if self.banner.owner() != Some(id) || self.banner.text() != Some(text.as_str()) {
                    self.banner.claim(id, text);
                }
            }
            None => {
                self.banner.clear(id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use subcontrols_core::{Lever, LeverPosition};

    use super::*;

    const SEED: SecretSeed = SecretSeed::from_bytes([11; 32]);

    fn registry() -> PuzzleRegistry {
        let mut registry = PuzzleRegistry::with_default_puzzles();
        registry.init_all(SEED);
        registry
    }

    fn solve_ballast(registry: &mut PuzzleRegistry) {
        registry
            .update(|ballast: &mut BallastPuzzle| {
                for (lever, offset) in Lever::ALL.into_iter().zip([-2, -2, 0, 2]) {
                    ballast.set_lever(lever, LeverPosition::from_offset(offset).unwrap());
                }
                ballast.confirm();
            })
            .unwrap();
    }

    fn solve_spot_difference(registry: &mut PuzzleRegistry) {
        registry
            .update(|puzzle: &mut SpotDifference| {
                for diff in crate::DIFFERENCES {
                    puzzle.toggle(diff.id);
                }
            })
            .unwrap();
    }

    #[test]
    fn test_default_puzzles_in_console_order() {
        let registry = registry();
        assert_eq!(registry.ids().collect::<Vec<_>>(), PuzzleId::ALL);
        assert_eq!(registry.seed(), Some(SEED));
    }

    #[test]
    fn test_register_rejects_duplicate_id() {
        let mut registry = PuzzleRegistry::new();
        registry.register(SpotDifference::new()).unwrap();
        assert_eq!(
            registry.register(SpotDifference::new()),
            Err(RegistryError::Duplicate {
                id: PuzzleId::SpotDifference
            })
        );
    }

    #[test]
    fn test_update_unregistered_type_fails() {
        let mut registry = PuzzleRegistry::new();
        let result = registry.update(|_: &mut BallastPuzzle| ());
        assert!(matches!(result, Err(RegistryError::NotRegistered { .. })));
    }

    #[test]
    fn test_same_seed_same_session() {
        let a = registry();
        let b = registry();
        assert_eq!(a.reveal_all(), b.reveal_all());
    }

    #[test]
    fn test_solved_puzzle_claims_banner() {
        let mut registry = registry();
        solve_ballast(&mut registry);
        assert_eq!(registry.banner().owner(), Some(PuzzleId::Ballast));
        assert_eq!(registry.banner().text(), Some("TRIM SECURED"));
    }

    #[test]
    fn test_unsolved_puzzle_cannot_clear_other_owner() {
        let mut registry = registry();
        solve_ballast(&mut registry);
        registry
            .update(|puzzle: &mut SpotDifference| puzzle.toggle("buoy-flag"))
            .unwrap();
        registry.reset(PuzzleId::Sonar).unwrap();
        assert_eq!(registry.banner().owner(), Some(PuzzleId::Ballast));
    }

    #[test]
    fn test_later_solve_takes_over_and_owner_reset_releases() {
        let mut registry = registry();
        solve_ballast(&mut registry);
        solve_spot_difference(&mut registry);
        assert_eq!(registry.banner().owner(), Some(PuzzleId::SpotDifference));

        registry.reset(PuzzleId::Ballast).unwrap();
        assert_eq!(registry.banner().owner(), Some(PuzzleId::SpotDifference));

        registry.reset(PuzzleId::SpotDifference).unwrap();
        assert_eq!(registry.banner().owner(), None);
    }

    #[test]
    fn test_reset_all_clears_banner_and_states() {
        let mut registry = registry();
        solve_ballast(&mut registry);
        registry.reset_all();
        assert_eq!(registry.banner().text(), None);
        assert!(registry.iter().all(|puzzle| puzzle.state().is_unsolved()));
        assert_ne!(registry.seed(), Some(SEED));
    }

    #[test]
    fn test_reveal_all_has_one_line_per_puzzle_and_keeps_state() {
        let registry = registry();
        let reveal = registry.reveal_all();
        assert_eq!(reveal.lines().count(), 5);
        assert!(reveal.contains("Ballast Offsets (flood polarity)"));
        assert!(registry.iter().all(|puzzle| puzzle.state().is_unsolved()));
    }

    #[test]
    fn test_single_reset_records_puzzle_seed() {
        let mut registry = registry();
        assert_eq!(
            registry.puzzle_seed(PuzzleId::Sonar),
            Some(SEED.derive("sonar"))
        );

        let seed = registry.reset(PuzzleId::Sonar).unwrap();
        assert_eq!(registry.puzzle_seed(PuzzleId::Sonar), Some(seed));
        assert_eq!(registry.seed(), Some(SEED));

        let mut replay = PuzzleRegistry::with_default_puzzles();
        replay.init_all(SEED);
        replay.reset_with_seed(PuzzleId::Sonar, seed).unwrap();
        assert_eq!(replay.reveal_all(), registry.reveal_all());
    }

    #[test]
    fn test_reset_unknown_id_fails() {
        let mut registry = PuzzleRegistry::new();
        assert_eq!(
            registry.reset(PuzzleId::Ballast),
            Err(RegistryError::UnknownId {
                id: PuzzleId::Ballast
            })
        );
        assert_eq!(registry.puzzle_seed(PuzzleId::Ballast), None);
    }

    #[test]
    fn test_typed_access() {
        let registry = registry();
        assert!(registry.puzzle::<SonarPuzzle>().is_some());
        assert_eq!(
            registry.get(PuzzleId::Navigation).map(Puzzle::id),
            Some(PuzzleId::Navigation)
        );
        assert!(PuzzleRegistry::new().puzzle::<SonarPuzzle>().is_none());
    }
}

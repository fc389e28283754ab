//! Linear tilt/depth evaluation and exhaustive equilibrium search.

use subcontrols_core::{Lever, LeverPosition, Polarity, Residual};

/// Signed lever offsets in panel order ([`Lever::ALL`]).
pub type Offsets = [i8; 4];

/// Per-unit contribution of one lever.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LeverCoefficients {
    /// Tilt change per unit of offset.
    pub tilt: i32,
    /// Depth change per unit of offset.
    pub depth: i32,
}

impl LeverCoefficients {
    /// Creates lever coefficients.
    #[must_use]
    pub const fn new(tilt: i32, depth: i32) -> Self {
        Self { tilt, depth }
    }
}

/// The fixed physics of the ballast panel: a base residual plus linear lever terms.
///
/// For offsets `o` and polarity sign `p`, each residual component is
/// `base + Σ p · o[i] · coefficient[i]`.
///
/// # Examples
///
/// ```
/// use subcontrols_core::{Polarity, Residual};
/// use subcontrols_solver::BallastRig;
///
/// let rig = BallastRig::default();
/// assert_eq!(rig.evaluate([0; 4], Polarity::Flood), Residual::new(-10, -8));
///
/// let solutions = rig.find_all_solutions(Polarity::Flood);
/// assert!(!solutions.is_empty());
/// for offsets in solutions {
///     assert!(rig.evaluate(offsets, Polarity::Flood).is_neutral());
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BallastRig {
    base: Residual,
    levers: [LeverCoefficients; 4],
}

impl Default for BallastRig {
    /// Base tilt -10, base depth -8, levers `bow(-3, 4)`, `stern(4, -3)`,
    /// `port(-5, -2)`, `starboard(6, 5)`.
    fn default() -> Self {
        Self::new(
            Residual::new(-10, -8),
            [
                LeverCoefficients::new(-3, 4),
                LeverCoefficients::new(4, -3),
                LeverCoefficients::new(-5, -2),
                LeverCoefficients::new(6, 5),
            ],
        )
    }
}

impl BallastRig {
    /// Number of notches on each lever.
    const NOTCHES: usize =
        LeverPosition::MAX_OFFSET.abs_diff(LeverPosition::MIN_OFFSET) as usize + 1;

    /// Creates a rig from a base residual and per-lever coefficients in panel order.
    #[must_use]
    pub const fn new(base: Residual, levers: [LeverCoefficients; 4]) -> Self {
        Self { base, levers }
    }

    /// Returns the residual with every lever centred.
    #[must_use]
    pub const fn base(&self) -> Residual {
        self.base
    }

    /// Returns the coefficients of `lever`.
    #[must_use]
    pub const fn coefficients(&self, lever: Lever) -> LeverCoefficients {
        self.levers[lever.index()]
    }

    /// Evaluates signed offsets under `polarity`.
    #[must_use]
    pub fn evaluate(&self, offsets: Offsets, polarity: Polarity) -> Residual {
        let sign = polarity.sign();
        offsets
            .iter()
            .zip(&self.levers)
            .fold(self.base, |acc, (&offset, coefficients)| {
                let units = sign * i32::from(offset);
                Residual::new(
                    acc.tilt + units * coefficients.tilt,
                    acc.depth + units * coefficients.depth,
                )
            })
    }

    /// Evaluates lever positions under `polarity`.
    #[must_use]
    pub fn evaluate_positions(&self, positions: [LeverPosition; 4], polarity: Polarity) -> Residual {
        self.evaluate(positions.map(LeverPosition::offset), polarity)
    }

    /// Returns every offset vector in `[-2, 2]^4` that drives both residuals to zero.
    ///
    /// The full Cartesian product (625 vectors) is enumerated; results are in
    /// lexicographic order of offsets.
    #[must_use]
    pub fn find_all_solutions(&self, polarity: Polarity) -> Vec<Offsets> {
        Self::all_offsets()
            .filter(|offsets| self.evaluate(*offsets, polarity).is_neutral())
            .collect()
    }

    /// Returns `true` if `offsets` reach equilibrium exactly.
    #[must_use]
    pub fn is_solution(&self, offsets: Offsets, polarity: Polarity) -> bool {
        self.evaluate(offsets, polarity).is_neutral()
    }

    fn all_offsets() -> impl Iterator<Item = Offsets> {
        let total = Self::NOTCHES.pow(4);
        (0..total).map(|mut index| {
            let mut offsets = [0; 4];
            for slot in offsets.iter_mut().rev() {
                let notch = i8::try_from(index % Self::NOTCHES).unwrap_or_default();
                *slot = notch + LeverPosition::MIN_OFFSET;
                index /= Self::NOTCHES;
            }
            offsets
        })
    }
}

//! Ballast levers, lever positions, polarity and residuals.

use std::{
    fmt::{self, Display},
    str::FromStr,
};

/// One of the four ballast levers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Lever {
    /// Floods the bow tanks.
    Bow,
    /// Runs the stern pumps.
    Stern,
    /// Trims the port tanks.
    Port,
    /// Trims the starboard tanks.
    Starboard,
}

impl Lever {
    /// All levers in panel order.
    pub const ALL: [Self; 4] = [Self::Bow, Self::Stern, Self::Port, Self::Starboard];

    /// Returns the panel index of this lever (0-3).
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Bow => 0,
            Self::Stern => 1,
            Self::Port => 2,
            Self::Starboard => 3,
        }
    }

    /// Returns the short identifier (`"bow"`, `"stern"`, ...).
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Bow => "bow",
            Self::Stern => "stern",
            Self::Port => "port",
            Self::Starboard => "starboard",
        }
    }

    /// Returns the panel label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Bow => "Bow Flood",
            Self::Stern => "Stern Pumps",
            Self::Port => "Port Trim",
            Self::Starboard => "Starboard Trim",
        }
    }
}

impl Display for Lever {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when parsing an unknown lever id.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("unknown lever: {id:?}")]
pub struct ParseLeverError {
    /// The rejected input.
    #[error(not(source))]
    pub id: String,
}

impl FromStr for Lever {
    type Err = ParseLeverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|lever| lever.id().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ParseLeverError {
                id: trimmed.to_owned(),
            })
    }
}

/// Error returned for a lever position outside `0..=4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("lever position out of range: {position} (expected 0-{})", LeverPosition::MAX.get())]
pub struct LeverPositionError {
    /// The rejected position.
    #[error(not(source))]
    pub position: u8,
}

/// Position of a five-notch lever control.
///
/// The notches map to signed offsets: position `p` means offset `p - 2`, so the
/// centre notch is offset `0`.
///
/// # Examples
///
/// ```
/// use subcontrols_core::LeverPosition;
///
/// let position = LeverPosition::new(4)?;
/// assert_eq!(position.offset(), 2);
/// assert_eq!(LeverPosition::CENTER.offset(), 0);
/// assert!(LeverPosition::new(5).is_err());
/// # Ok::<(), subcontrols_core::LeverPositionError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LeverPosition(u8);

impl LeverPosition {
    /// The lowest notch (offset `-2`).
    pub const MIN: Self = Self(0);
    /// The centre notch (offset `0`).
    pub const CENTER: Self = Self(2);
    /// The highest notch (offset `+2`).
    pub const MAX: Self = Self(4);

    /// Smallest reachable offset.
    pub const MIN_OFFSET: i8 = -2;
    /// Largest reachable offset.
    pub const MAX_OFFSET: i8 = 2;

    /// Creates a position from a notch index.
    ///
    /// # Errors
    ///
    /// Returns [`LeverPositionError`] if `position` is greater than 4.
    pub const fn new(position: u8) -> Result<Self, LeverPositionError> {
        if position > Self::MAX.0 {
            return Err(LeverPositionError { position });
        }
        Ok(Self(position))
    }

    /// Creates a position from a signed offset, returning `None` outside `-2..=2`.
    #[must_use]
    pub const fn from_offset(offset: i8) -> Option<Self> {
        if offset < Self::MIN_OFFSET || offset > Self::MAX_OFFSET {
            return None;
        }
        #[expect(clippy::cast_sign_loss)]
        let position = (offset - Self::MIN_OFFSET) as u8;
        Some(Self(position))
    }

    /// Returns the notch index (0-4).
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Returns the signed offset (`-2..=2`).
    #[must_use]
    #[expect(clippy::cast_possible_wrap)]
    pub const fn offset(self) -> i8 {
        self.0 as i8 + Self::MIN_OFFSET
    }
}

impl Default for LeverPosition {
    fn default() -> Self {
        Self::CENTER
    }
}

/// Direction in which the lever offsets act.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, derive_more::IsVariant)]
pub enum Polarity {
    /// Offsets apply with their natural sign.
    #[default]
    Flood,
    /// Offsets apply with the opposite sign.
    Vent,
}

impl Polarity {
    /// Returns `+1` for [`Polarity::Flood`] and `-1` for [`Polarity::Vent`].
    #[must_use]
    pub const fn sign(self) -> i32 {
        match self {
            Self::Flood => 1,
            Self::Vent => -1,
        }
    }

    /// Returns the opposite polarity.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Flood => Self::Vent,
            Self::Vent => Self::Flood,
        }
    }
}

impl Display for Polarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Flood => "Flood Tanks",
            Self::Vent => "Vent Tanks",
        })
    }
}

/// Remaining deviation from equilibrium.
///
/// Negative tilt leans to port, positive to starboard. Negative depth means the
/// boat is rising, positive that it is sinking.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Residual {
    /// Side-to-side tilt in degrees.
    pub tilt: i32,
    /// Vertical drift in metres.
    pub depth: i32,
}

impl Residual {
    /// The equilibrium residual.
    pub const NEUTRAL: Self = Self { tilt: 0, depth: 0 };

    /// Creates a residual.
    #[must_use]
    pub const fn new(tilt: i32, depth: i32) -> Self {
        Self { tilt, depth }
    }

    /// Returns `true` if both components are exactly zero.
    #[must_use]
    pub const fn is_neutral(self) -> bool {
        self.tilt == 0 && self.depth == 0
    }

    /// Returns the larger of the two absolute components.
    #[must_use]
    pub const fn severity(self) -> u32 {
        let tilt = self.tilt.unsigned_abs();
        let depth = self.depth.unsigned_abs();
        if tilt > depth { tilt } else { depth }
    }
}

impl Display for Residual {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tilt {:+}, depth {:+}", self.tilt, self.depth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lever_ids_round_trip() {
        for lever in Lever::ALL {
            assert_eq!(lever.id().parse::<Lever>(), Ok(lever));
            assert_eq!(Lever::ALL[lever.index()], lever);
        }
        assert!("keel".parse::<Lever>().is_err());
    }

    #[test]
    fn test_lever_position_offsets() {
        let offsets: Vec<i8> = (0..=4)
            .map(|p| LeverPosition::new(p).unwrap().offset())
            .collect();
        assert_eq!(offsets, [-2, -1, 0, 1, 2]);
        assert_eq!(
            LeverPosition::new(5),
            Err(LeverPositionError { position: 5 })
        );
        assert_eq!(LeverPosition::default(), LeverPosition::CENTER);
    }

    #[test]
    fn test_lever_position_from_offset() {
        for offset in -2..=2 {
            let position = LeverPosition::from_offset(offset).unwrap();
            assert_eq!(position.offset(), offset);
        }
        assert_eq!(LeverPosition::from_offset(-3), None);
        assert_eq!(LeverPosition::from_offset(3), None);
    }

    #[test]
    fn test_polarity() {
        assert_eq!(Polarity::default(), Polarity::Flood);
        assert_eq!(Polarity::Flood.sign(), 1);
        assert_eq!(Polarity::Vent.sign(), -1);
        assert_eq!(Polarity::Flood.toggled(), Polarity::Vent);
        assert!(Polarity::Vent.toggled().is_flood());
    }

    #[test]
    fn test_residual_helpers() {
        assert!(Residual::NEUTRAL.is_neutral());
        assert!(!Residual::new(0, 1).is_neutral());
        assert_eq!(Residual::new(-10, 8).severity(), 10);
        assert_eq!(Residual::new(-3, 0).to_string(), "tilt -3, depth +0");
    }
}

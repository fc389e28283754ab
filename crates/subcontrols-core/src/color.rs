//! Peg colors and fixed-length color codes.

use std::{
    fmt::{self, Display},
    ops::Index,
    str::FromStr,
};

/// Number of pegs in a code.
pub const CODE_LENGTH: usize = 4;

/// A peg color.
///
/// # Examples
///
/// ```
/// use subcontrols_core::Color;
///
/// let color: Color = "purple".parse()?;
/// assert_eq!(color, Color::Purple);
/// assert_eq!(color.to_string(), "purple");
/// assert_eq!(Color::ALL.len(), 6);
/// # Ok::<(), subcontrols_core::ParseColorError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Color {
    /// Red peg.
    Red = 0,
    /// Blue peg.
    Blue = 1,
    /// Green peg.
    Green = 2,
    /// Yellow peg.
    Yellow = 3,
    /// Purple peg.
    Purple = 4,
    /// Orange peg.
    Orange = 5,
}

impl Color {
    /// All colors in palette order.
    pub const ALL: [Self; 6] = [
        Self::Red,
        Self::Blue,
        Self::Green,
        Self::Yellow,
        Self::Purple,
        Self::Orange,
    ];

    /// Number of colors in the palette.
    pub const COUNT: usize = Self::ALL.len();

    /// Returns the palette index of this color (0-5).
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the lowercase name of this color.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Blue => "blue",
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Purple => "purple",
            Self::Orange => "orange",
        }
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown color name.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("unknown color: {name:?}")]
pub struct ParseColorError {
    /// The rejected input.
    #[error(not(source))]
    pub name: String,
}

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|color| color.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ParseColorError {
                name: trimmed.to_owned(),
            })
    }
}

/// A complete sequence of [`CODE_LENGTH`] colors.
///
/// Used both for the hidden code and for a submitted guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code([Color; CODE_LENGTH]);

impl Code {
    /// Creates a code from an array of colors.
    #[must_use]
    pub const fn new(colors: [Color; CODE_LENGTH]) -> Self {
        Self(colors)
    }

    /// Creates a code from a slice, returning `None` unless it has exactly
    /// [`CODE_LENGTH`] elements.
    #[must_use]
    pub fn from_slice(colors: &[Color]) -> Option<Self> {
        let colors: [Color; CODE_LENGTH] = colors.try_into().ok()?;
        Some(Self(colors))
    }

    /// Returns the colors of this code.
    #[must_use]
    pub const fn colors(&self) -> &[Color; CODE_LENGTH] {
        &self.0
    }

    /// Returns an iterator over the colors in position order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = Color> + '_ {
        self.0.iter().copied()
    }
}

impl Index<usize> for Code {
    type Output = Color;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, color) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            Display::fmt(color, f)?;
        }
        Ok(())
    }
}

/// Error returned when parsing a [`Code`].
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum ParseCodeError {
    /// One of the entries is not a color name.
    #[display("{_0}")]
    Color(ParseColorError),
    /// The input does not contain exactly [`CODE_LENGTH`] colors.
    #[display("expected {CODE_LENGTH} colors, got {len}")]
    #[from(ignore)]
    Length {
        /// Number of colors found.
        len: usize,
    },
}

impl FromStr for Code {
    type Err = ParseCodeError;

    /// Parses colors separated by commas and/or whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let colors = s
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|part| !part.is_empty())
            .map(str::parse)
            .collect::<Result<Vec<Color>, _>>()?;
        Self::from_slice(&colors).ok_or(ParseCodeError::Length { len: colors.len() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_names_round_trip() {
        for color in Color::ALL {
            assert_eq!(color.name().parse::<Color>(), Ok(color));
        }
        assert_eq!(" ORANGE ".parse::<Color>(), Ok(Color::Orange));
        assert_eq!(
            "teal".parse::<Color>(),
            Err(ParseColorError {
                name: "teal".to_owned()
            })
        );
    }

    #[test]
    fn test_color_index_matches_palette_order() {
        for (i, color) in Color::ALL.into_iter().enumerate() {
            assert_eq!(color.index(), i);
        }
    }

    #[test]
    fn test_code_from_slice_requires_exact_length() {
        assert!(Code::from_slice(&[Color::Red; 3]).is_none());
        assert!(Code::from_slice(&[Color::Red; 5]).is_none());
        assert_eq!(
            Code::from_slice(&[Color::Red; 4]),
            Some(Code::new([Color::Red; 4]))
        );
    }

    #[test]
    fn test_code_parse_and_display() {
        let code: Code = "red,blue green, yellow".parse().unwrap();
        assert_eq!(
            code,
            Code::new([Color::Red, Color::Blue, Color::Green, Color::Yellow])
        );
        assert_eq!(code.to_string(), "red, blue, green, yellow");

        assert_eq!(
            "red blue".parse::<Code>(),
            Err(ParseCodeError::Length { len: 2 })
        );
        assert!(matches!(
            "red blue pink red".parse::<Code>(),
            Err(ParseCodeError::Color(_))
        ));
    }
}

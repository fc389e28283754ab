//! Core value types shared by the SubControls puzzles.
//!
//! Puzzle inputs such as color names, cell ids and lever ids are parsed into the
//! validated types of this crate, so malformed input is rejected at the boundary
//! and evaluation code only sees well-formed values.
//!
//! # Overview
//!
//! - [`color`]: peg colors and fixed-length color [`Code`]s for the code-breaking puzzle
//! - [`cell`]: grid coordinates, grid sizes and the [`CellSet`] bitset used by the sonar puzzle
//! - [`transform`]: quarter-turn rotations and reflections of grid cells
//! - [`ballast`]: levers, lever positions, polarity and residuals for the ballast puzzle
//! - [`keyword`]: keywords revealed when a puzzle is solved
//!
//! # Examples
//!
//! ```
//! use subcontrols_core::{Cell, CellSet, Color, Code, GridSize};
//!
//! let code: Code = "red, blue, green, yellow".parse()?;
//! assert_eq!(code[0], Color::Red);
//!
//! let size = GridSize::new(6).expect("6 is a valid grid size");
//! let mut cells = CellSet::new();
//! cells.insert(Cell::new(2, 3));
//! assert!(size.contains(Cell::new(2, 3)));
//! assert_eq!(cells.len(), 1);
//! # Ok::<(), subcontrols_core::ParseCodeError>(())
//! ```

pub mod ballast;
pub mod cell;
pub mod color;
pub mod keyword;
pub mod transform;

pub use self::{
    ballast::{Lever, LeverPosition, LeverPositionError, ParseLeverError, Polarity, Residual},
    cell::{Cell, CellSet, GridSize, ParseCellError},
    color::{CODE_LENGTH, Code, Color, ParseCodeError, ParseColorError},
    keyword::Keyword,
    transform::Transform,
};

//! Base contact shapes for the sonar grid.

use subcontrols_core::{Cell, CellSet, GridSize};

/// A named base pattern of sonar contacts.
///
/// Coordinates are laid out for a 6×6 grid; see [`Shape::fits`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape {
    name: &'static str,
    cells: &'static [(u8, u8)],
}

impl Shape {
    /// Creates a shape from `(row, col)` pairs.
    #[must_use]
    pub const fn new(name: &'static str, cells: &'static [(u8, u8)]) -> Self {
        Self { name, cells }
    }

    /// Returns the display name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns `true` if every cell of the shape lies inside a grid of `size`.
    #[must_use]
    pub fn fits(&self, size: GridSize) -> bool {
        self.cells
            .iter()
            .all(|&(row, col)| size.contains(Cell::new(row, col)))
    }

    /// Returns the cells of this shape.
    #[must_use]
    pub fn cells(&self) -> CellSet {
        self.cells
            .iter()
            .map(|&(row, col)| Cell::new(row, col))
            .collect()
    }
}

/// The built-in shape library.
pub const SHAPES: [Shape; 5] = [
    Shape::new("hunter-killer", &[(1, 1), (2, 1), (3, 1), (3, 2), (3, 3)]),
    Shape::new("whale", &[(1, 2), (1, 3), (1, 4), (2, 3), (3, 3)]),
    Shape::new("reef", &[(2, 1), (2, 2), (3, 2), (3, 3), (4, 3)]),
    Shape::new("minefield", &[(0, 0), (1, 2), (3, 1), (4, 4), (5, 2)]),
    Shape::new("convoy", &[(2, 0), (2, 1), (2, 2), (2, 3), (4, 4)]),
];

//! Rotations and reflections of grid cells.
//!
//! A [`Transform`] is applied in a fixed order: quarter turns first, then the
//! horizontal reflection, then the vertical reflection. Every step maps the
//! grid onto itself, so a cell inside the grid stays inside it.

use crate::{Cell, CellSet, GridSize};

/// A combination of quarter-turn rotations and reflections on a square grid.
///
/// # Examples
///
/// ```
/// use subcontrols_core::{Cell, GridSize, Transform};
///
/// let size = GridSize::new(6).expect("valid size");
/// let turn = Transform::new(1, false, false);
/// // (row, col) -> (col, N - 1 - row)
/// assert_eq!(turn.apply(Cell::new(0, 2), size), Cell::new(2, 5));
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Transform {
    quarter_turns: u8,
    flip_horizontal: bool,
    flip_vertical: bool,
}

impl Transform {
    /// The transform that leaves every cell in place.
    pub const IDENTITY: Self = Self {
        quarter_turns: 0,
        flip_horizontal: false,
        flip_vertical: false,
    };

    /// All 16 combinations of 0-3 quarter turns and the two reflections.
    ///
    /// Some combinations coincide geometrically (e.g. two reflections equal a half turn).
    pub const ALL: [Self; 16] = {
        let mut all = [Self::IDENTITY; 16];
        let mut i = 0;
        #[expect(clippy::cast_possible_truncation)]
        while i < 16 {
            all[i] = Self {
                quarter_turns: (i % 4) as u8,
                flip_horizontal: (i / 4) % 2 == 1,
                flip_vertical: (i / 8) % 2 == 1,
            };
            i += 1;
        }
        all
    };

    /// Creates a transform. `quarter_turns` is taken modulo 4.
    #[must_use]
    pub const fn new(quarter_turns: u8, flip_horizontal: bool, flip_vertical: bool) -> Self {
        Self {
            quarter_turns: quarter_turns % 4,
            flip_horizontal,
            flip_vertical,
        }
    }

    /// Returns the number of quarter turns (0-3).
    #[must_use]
    pub const fn quarter_turns(self) -> u8 {
        self.quarter_turns
    }

    /// Returns `true` if columns are mirrored (`col -> N - 1 - col`).
    #[must_use]
    pub const fn flip_horizontal(self) -> bool {
        self.flip_horizontal
    }

    /// Returns `true` if rows are mirrored (`row -> N - 1 - row`).
    #[must_use]
    pub const fn flip_vertical(self) -> bool {
        self.flip_vertical
    }

    /// Maps a single cell.
    ///
    /// `cell` must lie inside `size`; cells outside the grid are returned unchanged.
    #[must_use]
    pub const fn apply(self, cell: Cell, size: GridSize) -> Cell {
        if !size.contains(cell) {
            return cell;
        }
        let last = size.last();
        let mut cell = cell;
        let mut turns = 0;
        while turns < self.quarter_turns {
            cell = Cell::new(cell.col, last - cell.row);
            turns += 1;
        }
        if self.flip_horizontal {
            cell = Cell::new(cell.row, last - cell.col);
        }
        if self.flip_vertical {
            cell = Cell::new(last - cell.row, cell.col);
        }
        cell
    }

    /// Maps every cell of a set, dropping duplicates and cells outside the grid.
    #[must_use]
    pub fn apply_set(self, cells: &CellSet, size: GridSize) -> CellSet {
        cells
            .iter()
            .filter(|cell| size.contains(*cell))
            .map(|cell| self.apply(cell, size))
            .collect()
    }
}

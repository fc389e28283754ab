//! Grid coordinates and cell sets.
//!
//! Cells are addressed by `(row, col)` with `(0, 0)` in the top-left corner.
//! Grids are square and at most [`GridSize::MAX`] cells wide, which lets a whole
//! board fit into the 64-bit [`CellSet`].

use std::{
    fmt::{self, Display},
    iter::FusedIterator,
    str::FromStr,
};

/// A cell coordinate on a square grid.
///
/// A `Cell` on its own is not bound to a particular grid; use
/// [`GridSize::contains`] to check that it lies inside one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cell {
    /// Row index, counted from the top.
    pub row: u8,
    /// Column index, counted from the left.
    pub col: u8,
}

impl Cell {
    /// Creates a cell at `(row, col)`.
    #[must_use]
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    const fn bit(self) -> u64 {
        1 << (self.row as u32 * GridSize::MAX as u32 + self.col as u32)
    }

    fn in_storage_range(self) -> bool {
        self.row < GridSize::MAX && self.col < GridSize::MAX
    }
}

impl Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.row, self.col)
    }
}

/// Error returned when parsing a `"row-col"` cell id.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid cell id: {input:?}")]
pub struct ParseCellError {
    /// The rejected input.
    #[error(not(source))]
    pub input: String,
}

impl FromStr for Cell {
    type Err = ParseCellError;

    /// Parses the `"row-col"` form produced by [`Display`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let error = || ParseCellError {
            input: s.to_owned(),
        };
        let (row, col) = s.trim().split_once('-').ok_or_else(error)?;
        let row = row.parse().map_err(|_| error())?;
        let col = col.parse().map_err(|_| error())?;
        Ok(Self::new(row, col))
    }
}

/// Side length of a square grid, between 1 and [`GridSize::MAX`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridSize(u8);

impl GridSize {
    /// Largest supported side length.
    pub const MAX: u8 = 8;

    /// Creates a grid size, returning `None` if `size` is zero or larger than [`Self::MAX`].
    #[must_use]
    pub const fn new(size: u8) -> Option<Self> {
        if size == 0 || size > Self::MAX {
            None
        } else {
            Some(Self(size))
        }
    }

    /// Returns the side length.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Returns the largest valid row or column index (`size - 1`).
    #[must_use]
    pub const fn last(self) -> u8 {
        self.0 - 1
    }

    /// Returns `true` if `cell` lies inside the grid.
    #[must_use]
    pub const fn contains(self, cell: Cell) -> bool {
        cell.row < self.0 && cell.col < self.0
    }

    /// Returns an iterator over all cells in row-major order.
    pub fn cells(self) -> impl Iterator<Item = Cell> {
        (0..self.0).flat_map(move |row| (0..self.0).map(move |col| Cell::new(row, col)))
    }
}

/// A set of cells stored as a 64-bit mask.
///
/// Cells outside the 8×8 storage range are never members; inserting one is ignored.
///
/// # Examples
///
/// ```
/// use subcontrols_core::{Cell, CellSet};
///
/// let set: CellSet = [Cell::new(0, 1), Cell::new(3, 3)].into_iter().collect();
/// assert!(set.contains(Cell::new(3, 3)));
/// assert_eq!(set.iter().collect::<Vec<_>>(), [Cell::new(0, 1), Cell::new(3, 3)]);
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellSet {
    bits: u64,
}

impl CellSet {
    /// The empty set.
    pub const EMPTY: Self = Self { bits: 0 };

    /// Creates an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self::EMPTY
    }

    /// Returns `true` if the set is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// Returns the number of cells in the set.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }

    /// Returns `true` if `cell` is in the set.
    #[must_use]
    pub fn contains(&self, cell: Cell) -> bool {
        cell.in_storage_range() && self.bits & cell.bit() != 0
    }

    /// Inserts a cell, returning `true` if it was not already present.
    pub fn insert(&mut self, cell: Cell) -> bool {
        if !cell.in_storage_range() || self.contains(cell) {
            return false;
        }
        self.bits |= cell.bit();
        true
    }

    /// Removes a cell, returning `true` if it was present.
    pub fn remove(&mut self, cell: Cell) -> bool {
        if !self.contains(cell) {
            return false;
        }
        self.bits &= !cell.bit();
        true
    }

    /// Returns `true` if every cell of `self` is also in `other`.
    #[must_use]
    pub const fn is_subset(&self, other: &Self) -> bool {
        self.bits & !other.bits == 0
    }

    /// Returns the number of cells in row `row`.
    #[must_use]
    pub const fn count_in_row(&self, row: u8) -> usize {
        if row >= GridSize::MAX {
            return 0;
        }
        ((self.bits >> (row as u32 * GridSize::MAX as u32)) & 0xff).count_ones() as usize
    }

    /// Returns the number of cells in column `col`.
    #[must_use]
    pub const fn count_in_col(&self, col: u8) -> usize {
        if col >= GridSize::MAX {
            return 0;
        }
        (self.bits & (0x0101_0101_0101_0101 << col)).count_ones() as usize
    }

    /// Returns an iterator over the cells in row-major order.
    #[must_use]
    pub const fn iter(&self) -> CellSetIter {
        CellSetIter { bits: self.bits }
    }
}

impl FromIterator<Cell> for CellSet {
    fn from_iter<T: IntoIterator<Item = Cell>>(iter: T) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl Extend<Cell> for CellSet {
    fn extend<T: IntoIterator<Item = Cell>>(&mut self, iter: T) {
        for cell in iter {
            self.insert(cell);
        }
    }
}

impl IntoIterator for CellSet {
    type Item = Cell;
    type IntoIter = CellSetIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for &CellSet {
    type Item = Cell;
    type IntoIter = CellSetIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the cells of a [`CellSet`].
#[derive(Debug, Clone)]
pub struct CellSetIter {
    bits: u64,
}

impl Iterator for CellSetIter {
    type Item = Cell;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.bits == 0 {
            return None;
        }
        let index = self.bits.trailing_zeros();
        self.bits &= self.bits - 1;
        #[expect(clippy::cast_possible_truncation)]
        let (row, col) = (
            (index / u32::from(GridSize::MAX)) as u8,
            (index % u32::from(GridSize::MAX)) as u8,
        );
        Some(Cell::new(row, col))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.bits.count_ones() as usize;
        (len, Some(len))
    }
}

impl FusedIterator for CellSetIter {}
impl ExactSizeIterator for CellSetIter {}

//! Row/column constraint matching for the sonar grid.

use std::fmt::{self, Display};

use subcontrols_core::{Cell, CellSet, GridSize};
use tinyvec::ArrayVec;

/// The hidden sonar contact pattern together with its per-line targets.
///
/// Targets are derived from the cells, so they always sum to the number of
/// cells in the pattern.
///
/// # Examples
///
/// ```
/// use subcontrols_core::{Cell, CellSet, GridSize};
/// use subcontrols_solver::SonarTarget;
///
/// let size = GridSize::new(4).expect("valid size");
/// let cells: CellSet = [Cell::new(0, 0), Cell::new(0, 1), Cell::new(2, 1)]
///     .into_iter()
///     .collect();
/// let target = SonarTarget::new(size, cells);
/// assert_eq!(target.row_target(0), 2);
/// assert_eq!(target.col_target(1), 2);
/// assert_eq!(target.row_targets().iter().sum::<u8>(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SonarTarget {
    size: GridSize,
    cells: CellSet,
    rows: [u8; GridSize::MAX as usize],
    cols: [u8; GridSize::MAX as usize],
}

impl SonarTarget {
    /// Creates a target from a cell set, dropping cells outside the grid.
    #[must_use]
    pub fn new(size: GridSize, cells: CellSet) -> Self {
        let cells: CellSet = cells.iter().filter(|cell| size.contains(*cell)).collect();
        let mut rows = [0; GridSize::MAX as usize];
        let mut cols = [0; GridSize::MAX as usize];
        for cell in &cells {
            rows[usize::from(cell.row)] += 1;
            cols[usize::from(cell.col)] += 1;
        }
        Self {
            size,
            cells,
            rows,
            cols,
        }
    }

    /// Returns the grid size.
    #[must_use]
    pub const fn size(&self) -> GridSize {
        self.size
    }

    /// Returns the hidden cells.
    #[must_use]
    pub const fn cells(&self) -> &CellSet {
        &self.cells
    }

    /// Returns the target count of row `row`, or 0 outside the grid.
    #[must_use]
    pub fn row_target(&self, row: u8) -> u8 {
        self.row_targets().get(usize::from(row)).copied().unwrap_or(0)
    }

    /// Returns the target count of column `col`, or 0 outside the grid.
    #[must_use]
    pub fn col_target(&self, col: u8) -> u8 {
        self.col_targets().get(usize::from(col)).copied().unwrap_or(0)
    }

    /// Returns the row targets, one per grid row.
    #[must_use]
    pub fn row_targets(&self) -> &[u8] {
        &self.rows[..usize::from(self.size.get())]
    }

    /// Returns the column targets, one per grid column.
    #[must_use]
    pub fn col_targets(&self) -> &[u8] {
        &self.cols[..usize::from(self.size.get())]
    }
}

/// A grid line: a row or a column, displayed with its zero-based index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Line {
    /// Row with the given index.
    Row(u8),
    /// Column with the given index.
    Column(u8),
}

impl Default for Line {
    fn default() -> Self {
        Self::Row(0)
    }
}

impl Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Row(row) => write!(f, "Row {row}"),
            Self::Column(col) => write!(f, "Column {col}"),
        }
    }
}

/// A line whose count would exceed its target.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LineViolation {
    /// The offending line.
    pub line: Line,
    /// The line's target count.
    pub target: u8,
}

impl Display for LineViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let contacts = if self.target == 1 { "contact" } else { "contacts" };
        write!(f, "{} only holds {} {contacts}", self.line, self.target)
    }
}

/// Violations reported for a rejected toggle: at most one row and one column.
pub type Violations = ArrayVec<[LineViolation; 2]>;

/// Result of a single toggle on a [`SonarBoard`].
#[derive(Debug, Clone, PartialEq, Eq, derive_more::IsVariant)]
pub enum ToggleOutcome {
    /// The cell was switched on.
    Activated,
    /// The cell was switched off.
    Deactivated,
    /// Switching the cell on would exceed a row or column target; nothing changed.
    Rejected(Violations),
    /// The cell lies outside the grid; nothing changed.
    OutOfBounds,
}

impl ToggleOutcome {
    /// Returns `true` if the active set changed.
    #[must_use]
    pub const fn is_accepted(&self) -> bool {
        matches!(self, Self::Activated | Self::Deactivated)
    }

    /// Returns the warnings for a rejected toggle, or an empty slice.
    #[must_use]
    pub fn violations(&self) -> &[LineViolation] {
        match self {
            Self::Rejected(violations) => violations.as_slice(),
            _ => &[],
        }
    }
}

/// The player's active cells checked against a [`SonarTarget`].
///
/// Every toggle is validated immediately: the board never holds a row or column
/// with more active cells than its target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SonarBoard {
    target: SonarTarget,
    active: CellSet,
}

impl SonarBoard {
    /// Creates a board with no active cells.
    #[must_use]
    pub const fn new(target: SonarTarget) -> Self {
        Self {
            target,
            active: CellSet::EMPTY,
        }
    }

    /// Returns the target this board is checked against.
    #[must_use]
    pub const fn target(&self) -> &SonarTarget {
        &self.target
    }

    /// Returns the active cells.
    #[must_use]
    pub const fn active(&self) -> &CellSet {
        &self.active
    }

    /// Returns the number of active cells in row `row`.
    #[must_use]
    pub const fn row_count(&self, row: u8) -> usize {
        self.active.count_in_row(row)
    }

    /// Returns the number of active cells in column `col`.
    #[must_use]
    pub const fn col_count(&self, col: u8) -> usize {
        self.active.count_in_col(col)
    }

    /// Returns the violations that switching `cell` on would cause.
    #[must_use]
    pub fn check_activation(&self, cell: Cell) -> Violations {
        let mut violations = Violations::new();
        let row_target = self.target.row_target(cell.row);
        if self.row_count(cell.row) + 1 > usize::from(row_target) {
            violations.push(LineViolation {
                line: Line::Row(cell.row),
                target: row_target,
            });
        }
        let col_target = self.target.col_target(cell.col);
        if self.col_count(cell.col) + 1 > usize::from(col_target) {
            violations.push(LineViolation {
                line: Line::Column(cell.col),
                target: col_target,
            });
        }
        violations
    }

    /// Toggles `cell`.
    ///
    /// Switching a cell off always succeeds. Switching a cell on is rejected,
    /// leaving the board unchanged, if its row or column is already at target.
    pub fn toggle(&mut self, cell: Cell) -> ToggleOutcome {
        if !self.target.size.contains(cell) {
            return ToggleOutcome::OutOfBounds;
        }
        if self.active.remove(cell) {
            return ToggleOutcome::Deactivated;
        }
        let violations = self.check_activation(cell);
        if !violations.is_empty() {
            return ToggleOutcome::Rejected(violations);
        }
        self.active.insert(cell);
        ToggleOutcome::Activated
    }

    /// Returns `true` if the active cells are exactly the target cells.
    ///
    /// Matching line counts alone are not enough: a different arrangement with the
    /// same row and column sums does not match.
    #[must_use]
    pub fn matches(&self) -> bool {
        let size = self.target.size.get();
        self.active.len() == self.target.cells.len()
            && (0..size).all(|i| {
                self.row_count(i) == usize::from(self.target.row_target(i))
                    && self.col_count(i) == usize::from(self.target.col_target(i))
            })
            && self.active.is_subset(&self.target.cells)
    }

    /// Switches every cell off.
    pub fn clear(&mut self) {
        self.active = CellSet::EMPTY;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(list: &[(u8, u8)]) -> CellSet {
        list.iter().map(|&(row, col)| Cell::new(row, col)).collect()
    }

    // Two diagonals of a 2x2 block have identical line sums but different cells.
    fn diagonal_board() -> SonarBoard {
        let size = GridSize::new(4).unwrap();
        SonarBoard::new(SonarTarget::new(size, cells(&[(0, 0), (1, 1)])))
    }

    #[test]
    fn test_targets_sum_to_cell_count() {
        let size = GridSize::new(6).unwrap();
        let target = SonarTarget::new(size, cells(&[(0, 0), (0, 5), (3, 2), (5, 5)]));
        let rows: u8 = target.row_targets().iter().sum();
        let cols: u8 = target.col_targets().iter().sum();
        assert_eq!(usize::from(rows), target.cells().len());
        assert_eq!(usize::from(cols), target.cells().len());
        assert_eq!(target.row_targets().len(), 6);
    }

    #[test]
    fn test_target_drops_cells_outside_grid() {
        let size = GridSize::new(3).unwrap();
        let target = SonarTarget::new(size, cells(&[(0, 0), (3, 0), (7, 7)]));
        assert_eq!(target.cells().len(), 1);
        assert_eq!(target.row_target(3), 0);
    }

    #[test]
    fn test_exact_cells_match() {
        let mut board = diagonal_board();
        assert!(board.toggle(Cell::new(0, 0)).is_activated());
        assert!(!board.matches());
        assert!(board.toggle(Cell::new(1, 1)).is_activated());
        assert!(board.matches());
    }

    #[test]
    fn test_same_line_sums_different_cells_do_not_match() {
        let mut board = diagonal_board();
        assert!(board.toggle(Cell::new(0, 1)).is_activated());
        assert!(board.toggle(Cell::new(1, 0)).is_activated());
        assert_eq!(board.row_count(0), 1);
        assert_eq!(board.col_count(0), 1);
        assert!(!board.matches());
    }

    #[test]
    fn test_row_overflow_is_rejected_and_board_unchanged() {
        let mut board = diagonal_board();
        board.toggle(Cell::new(0, 0));
        let before = board.clone();

        let outcome = board.toggle(Cell::new(0, 3));
        assert_eq!(
            outcome.violations(),
            [
                LineViolation {
                    line: Line::Row(0),
                    target: 1
                },
                LineViolation {
                    line: Line::Column(3),
                    target: 0
                },
            ]
        );
        assert!(!board.active().contains(Cell::new(0, 3)));
        assert_eq!(board, before);
    }

    #[test]
    fn test_column_only_violation() {
        let mut board = diagonal_board();
        board.toggle(Cell::new(1, 1));
        let outcome = board.toggle(Cell::new(0, 1));
        assert_eq!(
            outcome.violations(),
            [LineViolation {
                line: Line::Column(1),
                target: 1
            }]
        );
        assert_eq!(
            outcome.violations()[0].to_string(),
            "Column 1 only holds 1 contact"
        );
    }

    #[test]
    fn test_deactivate_always_succeeds() {
        let mut board = diagonal_board();
        board.toggle(Cell::new(0, 1));
        assert_eq!(board.toggle(Cell::new(0, 1)), ToggleOutcome::Deactivated);
        assert!(board.active().is_empty());
    }

    #[test]
    fn test_out_of_bounds_is_ignored() {
        let mut board = diagonal_board();
        assert_eq!(board.toggle(Cell::new(4, 0)), ToggleOutcome::OutOfBounds);
        assert!(!ToggleOutcome::OutOfBounds.is_accepted());
        assert!(board.active().is_empty());
    }

    #[test]
    fn test_superset_does_not_match() {
        let size = GridSize::new(4).unwrap();
        let target = SonarTarget::new(size, cells(&[(0, 0), (0, 1), (1, 0), (1, 1)]));
        let mut board = SonarBoard::new(target);
        for cell in [(0, 0), (0, 1), (1, 0)] {
            board.toggle(Cell::new(cell.0, cell.1));
        }
        assert!(!board.matches());
        board.toggle(Cell::new(1, 1));
        assert!(board.matches());
        board.clear();
        assert!(!board.matches());
    }
}

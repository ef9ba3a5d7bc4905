use crate::card::{Column, Position, PositionError, RowIndex, GRID_SIZE};
use crate::marks::MarkGrid;
use std::fmt;

/// A line of five cells that wins when every cell is satisfied.
///
/// Rows are indexed top to bottom from 0; the diagonals run through the free space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[non_exhaustive]
pub enum WinPattern {
    Row(RowIndex),
    Column(Column),
    /// Top-left to bottom-right.
    MainDiagonal,
    /// Top-right to bottom-left.
    AntiDiagonal,
}

impl WinPattern {
    /// Number of distinct winning lines on a card.
    pub const COUNT: usize = 2 * GRID_SIZE + 2;

    /// Every pattern, in report order: rows, then columns, then the two diagonals.
    pub fn all() -> [WinPattern; Self::COUNT] {
        [
            WinPattern::Row(RowIndex::at(0)),
            WinPattern::Row(RowIndex::at(1)),
            WinPattern::Row(RowIndex::at(2)),
            WinPattern::Row(RowIndex::at(3)),
            WinPattern::Row(RowIndex::at(4)),
            WinPattern::Column(Column::B),
            WinPattern::Column(Column::I),
            WinPattern::Column(Column::N),
            WinPattern::Column(Column::G),
            WinPattern::Column(Column::O),
            WinPattern::MainDiagonal,
            WinPattern::AntiDiagonal,
        ]
    }

    /// The row pattern for `row` (0 is the top row).
    pub fn row(row: usize) -> Result<Self, PositionError> {
        RowIndex::try_new(row).map(WinPattern::Row)
    }

    /// The five cells of this line.
    pub fn cells(self) -> [Position; GRID_SIZE] {
        let mut cells = [Position::FREE; GRID_SIZE];
        for (i, cell) in cells.iter_mut().enumerate() {
            *cell = match self {
                WinPattern::Row(r) => Position::at(i, r.get()),
                WinPattern::Column(c) => Position::at(c.index(), i),
                WinPattern::MainDiagonal => Position::at(i, i),
                WinPattern::AntiDiagonal => Position::at(i, GRID_SIZE - 1 - i),
            };
        }
        cells
    }

    pub fn is_satisfied_by(self, grid: &MarkGrid) -> bool {
        self.cells().iter().all(|p| grid.is_satisfied(*p))
    }

    /// Cells of this line still needed.
    pub fn missing(self, grid: &MarkGrid) -> u8 {
        self.cells().iter().filter(|p| !grid.is_satisfied(**p)).count() as u8
    }

    pub fn label(self) -> &'static str {
        match self {
            WinPattern::Row(_) => "row",
            WinPattern::Column(_) => "column",
            WinPattern::MainDiagonal => "diagonal",
            WinPattern::AntiDiagonal => "anti-diagonal",
        }
    }
}

impl fmt::Display for WinPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WinPattern::Row(r) => write!(f, "row {r}"),
            WinPattern::Column(c) => write!(f, "column {c}"),
            other => f.write_str(other.label()),
        }
    }
}

/// Whether any row, column or diagonal is complete. The free space always counts.
///
/// ```
/// use bingo_rs::evaluator::has_won;
/// use bingo_rs::marks::MarkGrid;
///
/// let mut cells = [[false; 5]; 5];
/// for c in 0..5 {
///     cells[c][0] = true;
/// }
/// assert!(has_won(&MarkGrid::from_array(cells)));
/// assert!(!has_won(&MarkGrid::new()));
/// ```
pub fn has_won(grid: &MarkGrid) -> bool {
    find_win(grid).is_some()
}

/// First satisfied pattern in [`WinPattern::all`] order. When several lines are
/// complete at once this is still a single win; the order only makes the report stable.
pub fn find_win(grid: &MarkGrid) -> Option<WinPattern> {
    WinPattern::all().into_iter().find(|p| p.is_satisfied_by(grid))
}

/// Every satisfied pattern, in report order.
pub fn winning_patterns(grid: &MarkGrid) -> Vec<WinPattern> {
    WinPattern::all().into_iter().filter(|p| p.is_satisfied_by(grid)).collect()
}

/// Fewest cells still needed to complete any line; 0 once the card has won.
///
/// ```
/// use bingo_rs::evaluator::cells_to_win;
/// use bingo_rs::marks::MarkGrid;
///
/// // The free space already covers one cell of row 3, column N and both diagonals.
/// assert_eq!(cells_to_win(&MarkGrid::new()), 4);
/// assert_eq!(cells_to_win(&MarkGrid::full()), 0);
/// ```
pub fn cells_to_win(grid: &MarkGrid) -> u8 {
    WinPattern::all().into_iter().map(|p| p.missing(grid)).min().unwrap_or(GRID_SIZE as u8)
}

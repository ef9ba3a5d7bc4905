//! Mark tracking: the boolean grid that records which cells a player has daubed.
//!
//! The grid is the single source of truth. The set of marked numbers is always
//! derived from it on demand, never stored alongside.

use crate::card::{Ball, Card, Position, PositionError, GRID_SIZE};
use crate::evaluator;
use std::collections::BTreeSet;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GridError {
    #[error("expected 5 columns, got {0}")]
    Columns(usize),
    #[error("expected 5 rows in column {column}, got {len}")]
    Rows { column: usize, len: usize },
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum MarkError {
    #[error(transparent)]
    Position(#[from] PositionError),
}

/// Result of a mark request. Only `Marked` changes the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum MarkOutcome {
    Marked,
    AlreadyMarked,
    FreeSpace,
}

impl MarkOutcome {
    pub const fn changed(self) -> bool {
        matches!(self, MarkOutcome::Marked)
    }
}

/// 5x5 mark matrix indexed `[column][row]`.
///
/// The stored boolean of the free space is ignored by [`MarkGrid::is_satisfied`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct MarkGrid([[bool; GRID_SIZE]; GRID_SIZE]);

impl MarkGrid {
    pub const fn new() -> Self {
        Self([[false; GRID_SIZE]; GRID_SIZE])
    }

    /// Every cell marked.
    pub const fn full() -> Self {
        Self([[true; GRID_SIZE]; GRID_SIZE])
    }

    pub const fn from_array(cells: [[bool; GRID_SIZE]; GRID_SIZE]) -> Self {
        Self(cells)
    }

    pub const fn as_array(&self) -> &[[bool; GRID_SIZE]; GRID_SIZE] {
        &self.0
    }

    /// Raw boolean state of a cell.
    pub fn is_marked(&self, pos: Position) -> bool {
        self.0[pos.column()][pos.row()]
    }

    /// Whether a cell counts toward a win: marked, or the free space.
    pub fn is_satisfied(&self, pos: Position) -> bool {
        pos.is_free() || self.is_marked(pos)
    }

    /// Monotonic: a marked cell stays marked, and the free space is never touched.
    pub fn mark(&mut self, pos: Position) -> MarkOutcome {
        if pos.is_free() {
            return MarkOutcome::FreeSpace;
        }
        let cell = &mut self.0[pos.column()][pos.row()];
        if *cell {
            return MarkOutcome::AlreadyMarked;
        }
        *cell = true;
        MarkOutcome::Marked
    }

    /// Marked cells excluding the free space.
    pub fn marked_positions(&self) -> impl Iterator<Item = Position> + '_ {
        Position::all().filter(move |p| !p.is_free() && self.is_marked(*p))
    }

    pub fn count_marked(&self) -> usize {
        self.marked_positions().count()
    }
}

impl From<[[bool; GRID_SIZE]; GRID_SIZE]> for MarkGrid {
    fn from(cells: [[bool; GRID_SIZE]; GRID_SIZE]) -> Self {
        Self(cells)
    }
}

impl TryFrom<Vec<Vec<bool>>> for MarkGrid {
    type Error = GridError;

    /// Accepts only an exact 5x5 shape; nothing is padded or truncated.
    fn try_from(columns: Vec<Vec<bool>>) -> Result<Self, Self::Error> {
        if columns.len() != GRID_SIZE {
            return Err(GridError::Columns(columns.len()));
        }
        let mut grid = [[false; GRID_SIZE]; GRID_SIZE];
        for (c, rows) in columns.iter().enumerate() {
            if rows.len() != GRID_SIZE {
                return Err(GridError::Rows { column: c, len: rows.len() });
            }
            grid[c].copy_from_slice(rows);
        }
        Ok(Self(grid))
    }
}

impl Card {
    /// Mark a cell. Marking the free space or an already-marked cell is a no-op.
    ///
    /// ```
    /// use bingo_rs::card::Position;
    /// use bingo_rs::generator::generate_seeded;
    /// use bingo_rs::marks::MarkOutcome;
    ///
    /// let mut card = generate_seeded(1);
    /// let pos = Position::try_new(0, 0).unwrap();
    /// assert_eq!(card.mark(pos), MarkOutcome::Marked);
    /// assert_eq!(card.mark(pos), MarkOutcome::AlreadyMarked);
    /// assert_eq!(card.mark(Position::FREE), MarkOutcome::FreeSpace);
    /// ```
    pub fn mark(&mut self, pos: Position) -> MarkOutcome {
        self.marked.mark(pos)
    }

    /// Mark by raw coordinates, rejecting anything outside 0..=4.
    pub fn mark_at(&mut self, column: usize, row: usize) -> Result<MarkOutcome, MarkError> {
        let pos = Position::try_new(column, row)?;
        Ok(self.mark(pos))
    }

    /// Mark the cell holding `ball`. `None` when the card does not carry it.
    pub fn daub(&mut self, ball: Ball) -> Option<(Position, MarkOutcome)> {
        let pos = self.position_of(ball)?;
        Some((pos, self.mark(pos)))
    }

    pub fn is_marked(&self, pos: Position) -> bool {
        self.marked.is_marked(pos)
    }

    /// Numbers at marked, non-free cells.
    pub fn derived_marked_values(&self) -> BTreeSet<Ball> {
        self.marked.marked_positions().filter_map(|p| self.number_at(p)).collect()
    }

    pub fn has_won(&self) -> bool {
        evaluator::has_won(&self.marked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::generate_seeded;

    #[test]
    fn mark_is_monotonic_and_idempotent() {
        let mut grid = MarkGrid::new();
        let pos = Position::try_new(1, 3).unwrap();
        assert_eq!(grid.mark(pos), MarkOutcome::Marked);
        let after_first = grid;
        assert_eq!(grid.mark(pos), MarkOutcome::AlreadyMarked);
        assert_eq!(grid, after_first);
        assert_eq!(grid.count_marked(), 1);
    }

    #[test]
    fn free_space_is_satisfied_but_never_marked() {
        let mut grid = MarkGrid::new();
        assert!(grid.is_satisfied(Position::FREE));
        assert_eq!(grid.mark(Position::FREE), MarkOutcome::FreeSpace);
        assert!(!grid.is_marked(Position::FREE));
        assert_eq!(grid.count_marked(), 0);
    }

    #[test]
    fn try_from_rejects_bad_shapes() {
        let four_cols = vec![vec![false; 5]; 4];
        assert_eq!(MarkGrid::try_from(four_cols), Err(GridError::Columns(4)));

        let mut ragged = vec![vec![false; 5]; 5];
        ragged[3] = vec![true; 6];
        assert_eq!(MarkGrid::try_from(ragged), Err(GridError::Rows { column: 3, len: 6 }));

        let mut ok = vec![vec![false; 5]; 5];
        ok[4][0] = true;
        let grid = MarkGrid::try_from(ok).unwrap();
        assert!(grid.is_marked(Position::try_new(4, 0).unwrap()));
    }

    #[test]
    fn mark_at_rejects_out_of_bounds() {
        let mut card = generate_seeded(9);
        let before = card.clone();
        assert!(matches!(card.mark_at(5, 0), Err(MarkError::Position(_))));
        assert!(matches!(card.mark_at(0, 7), Err(MarkError::Position(_))));
        assert_eq!(card, before);
        assert_eq!(card.mark_at(0, 0), Ok(MarkOutcome::Marked));
    }

    #[test]
    fn derived_values_follow_the_grid() {
        let mut card = generate_seeded(3);
        assert!(card.derived_marked_values().is_empty());

        let a = Position::try_new(0, 1).unwrap();
        let b = Position::try_new(4, 4).unwrap();
        card.mark(a);
        card.mark(b);
        card.mark(Position::FREE);

        let values = card.derived_marked_values();
        assert_eq!(values.len(), 2);
        assert!(values.contains(&card.number_at(a).unwrap()));
        assert!(values.contains(&card.number_at(b).unwrap()));
    }

    #[test]
    fn daub_marks_by_number() {
        let mut card = generate_seeded(5);
        let pos = Position::try_new(3, 0).unwrap();
        let ball = card.number_at(pos).unwrap();
        assert_eq!(card.daub(ball), Some((pos, MarkOutcome::Marked)));
        assert_eq!(card.daub(ball), Some((pos, MarkOutcome::AlreadyMarked)));

        let missing = Ball::all().find(|b| !card.contains(*b)).unwrap();
        assert_eq!(card.daub(missing), None);
    }
}

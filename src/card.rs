use crate::marks::MarkGrid;
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

/// Width and height of a card.
pub const GRID_SIZE: usize = 5;

/// Highest ball number in a 75-ball game.
pub const MAX_BALL: u8 = 75;

/// Numbers per column range.
const COLUMN_SPAN: u8 = 15;

/// The five lettered columns. Each owns a disjoint block of 15 numbers:
/// B = 1..=15, I = 16..=30, N = 31..=45, G = 46..=60, O = 61..=75.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Column {
    B = 0,
    I = 1,
    N = 2,
    G = 3,
    O = 4,
}

impl Column {
    pub const ALL: [Column; 5] = [Column::B, Column::I, Column::N, Column::G, Column::O];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn from_index(index: usize) -> Option<Column> {
        match index {
            0 => Some(Column::B),
            1 => Some(Column::I),
            2 => Some(Column::N),
            3 => Some(Column::G),
            4 => Some(Column::O),
            _ => None,
        }
    }

    /// Lowest number this column may hold.
    pub const fn low(self) -> u8 {
        self as u8 * COLUMN_SPAN + 1
    }

    /// Highest number this column may hold.
    pub const fn high(self) -> u8 {
        self.low() + COLUMN_SPAN - 1
    }

    pub fn range(self) -> RangeInclusive<u8> {
        self.low()..=self.high()
    }

    pub const fn letter(self) -> char {
        match self {
            Column::B => 'B',
            Column::I => 'I',
            Column::N => 'N',
            Column::G => 'G',
            Column::O => 'O',
        }
    }

    fn from_letter(c: char) -> Option<Column> {
        match c.to_ascii_uppercase() {
            'B' => Some(Column::B),
            'I' => Some(Column::I),
            'N' => Some(Column::N),
            'G' => Some(Column::G),
            'O' => Some(Column::O),
            _ => None,
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum BallError {
    #[error("ball number out of range 1..=75: {0}")]
    OutOfRange(u8),
    #[error("ball {number} does not belong to column {letter}")]
    ColumnMismatch { letter: char, number: u8 },
    #[error("invalid ball: '{0}'")]
    Invalid(String),
}

/// A called number, 1..=75.
///
/// ```
/// use bingo_rs::card::{Ball, Column};
///
/// let ball: Ball = "G-52".parse().unwrap();
/// assert_eq!(ball.number(), 52);
/// assert_eq!(ball.column(), Column::G);
/// assert_eq!(ball.to_string(), "G-52");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ball(u8);

impl Ball {
    pub fn try_new(number: u8) -> Result<Self, BallError> {
        if number == 0 || number > MAX_BALL {
            return Err(BallError::OutOfRange(number));
        }
        Ok(Self(number))
    }

    /// Caller guarantees `number` is in 1..=75.
    pub(crate) const fn from_raw(number: u8) -> Self {
        debug_assert!(number >= 1 && number <= MAX_BALL);
        Self(number)
    }

    pub const fn number(self) -> u8 {
        self.0
    }

    pub const fn column(self) -> Column {
        match (self.0 - 1) / COLUMN_SPAN {
            0 => Column::B,
            1 => Column::I,
            2 => Column::N,
            3 => Column::G,
            _ => Column::O,
        }
    }

    /// All 75 balls in ascending order.
    pub fn all() -> impl Iterator<Item = Ball> {
        (1..=MAX_BALL).map(Ball)
    }
}

impl fmt::Display for Ball {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.column(), self.0)
    }
}

impl TryFrom<u8> for Ball {
    type Error = BallError;
    fn try_from(n: u8) -> Result<Self, Self::Error> {
        Ball::try_new(n)
    }
}

impl FromStr for Ball {
    type Err = BallError;

    /// Accepts `"52"`, `"G52"`, `"g-52"`. A letter prefix must match the number's column.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        let mut chars = t.chars();
        let (letter, digits) = match chars.next() {
            Some(c) if c.is_ascii_alphabetic() => {
                let column = Column::from_letter(c).ok_or_else(|| BallError::Invalid(s.into()))?;
                let rest = chars.as_str();
                (Some(column), rest.strip_prefix('-').unwrap_or(rest))
            }
            Some(_) => (None, t),
            None => return Err(BallError::Invalid(s.to_string())),
        };
        let number: u8 = digits.parse().map_err(|_| BallError::Invalid(s.to_string()))?;
        let ball = Ball::try_new(number)?;
        if let Some(column) = letter {
            if column != ball.column() {
                return Err(BallError::ColumnMismatch { letter: column.letter(), number });
            }
        }
        Ok(ball)
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PositionError {
    #[error("cell ({column}, {row}) is outside the 5x5 grid")]
    OutOfBounds { column: usize, row: usize },
    #[error("row {0} is outside the 5x5 grid")]
    RowOutOfRange(usize),
}

/// A cell coordinate on a card, indexed `[column][row]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    column: u8,
    row: u8,
}

impl Position {
    /// The centre cell: never holds a number, always counts as marked.
    pub const FREE: Position = Position { column: 2, row: 2 };

    pub fn try_new(column: usize, row: usize) -> Result<Self, PositionError> {
        if column >= GRID_SIZE || row >= GRID_SIZE {
            return Err(PositionError::OutOfBounds { column, row });
        }
        Ok(Self::at(column, row))
    }

    /// Unchecked constructor for coordinates produced by in-crate loops.
    pub(crate) const fn at(column: usize, row: usize) -> Self {
        debug_assert!(column < GRID_SIZE && row < GRID_SIZE);
        Self { column: column as u8, row: row as u8 }
    }

    pub const fn column(self) -> usize {
        self.column as usize
    }

    pub const fn row(self) -> usize {
        self.row as usize
    }

    pub const fn is_free(self) -> bool {
        self.column == Self::FREE.column && self.row == Self::FREE.row
    }

    /// All 25 cells, column by column.
    pub fn all() -> impl Iterator<Item = Position> {
        (0..GRID_SIZE).flat_map(|c| (0..GRID_SIZE).map(move |r| Position::at(c, r)))
    }
}

/// A row index in 0..=4, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RowIndex(u8);

impl RowIndex {
    pub fn try_new(row: usize) -> Result<Self, PositionError> {
        if row >= GRID_SIZE {
            return Err(PositionError::RowOutOfRange(row));
        }
        Ok(Self::at(row))
    }

    pub(crate) const fn at(row: usize) -> Self {
        debug_assert!(row < GRID_SIZE);
        Self(row as u8)
    }

    pub const fn get(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for RowIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0 + 1)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Columns print as their letter, rows 1-based: "N3" is the free space.
        let letter = Column::from_index(self.column()).map(Column::letter).unwrap_or('?');
        write!(f, "{}{}", letter, self.row + 1)
    }
}

/// Opaque card identifier, fixed when the card is created.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CardId(String);

impl CardId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CardError {
    #[error("{value} is outside the range of column {column}")]
    NumberOutOfRange { column: Column, value: u8 },
    #[error("{value} appears more than once in column {column}")]
    DuplicateInColumn { column: Column, value: u8 },
    #[error("free space must be empty, found {0}")]
    FreeSpaceOccupied(u8),
    #[error("cell {0} has no number")]
    MissingNumber(Position),
}

/// A 5x5 bingo card: an immutable number grid plus the mutable mark grid.
///
/// Both grids are indexed `[column][row]`. The centre cell holds `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub(crate) id: CardId,
    pub(crate) numbers: [[Option<Ball>; GRID_SIZE]; GRID_SIZE],
    pub(crate) marked: MarkGrid,
}

impl Card {
    /// Assemble a card from numbers already known to be valid.
    pub(crate) fn from_parts(id: CardId, numbers: [[Option<Ball>; GRID_SIZE]; GRID_SIZE]) -> Self {
        Self { id, numbers, marked: MarkGrid::new() }
    }

    /// Build a card from raw column values, validating every card invariant.
    ///
    /// ```
    /// use bingo_rs::card::{Card, CardId, Position};
    ///
    /// let card = Card::from_columns(CardId::new("fixture"), [
    ///     [Some(1), Some(2), Some(3), Some(4), Some(5)],
    ///     [Some(16), Some(17), Some(18), Some(19), Some(20)],
    ///     [Some(31), Some(32), None, Some(34), Some(35)],
    ///     [Some(46), Some(47), Some(48), Some(49), Some(50)],
    ///     [Some(61), Some(62), Some(63), Some(64), Some(65)],
    /// ]).unwrap();
    /// assert_eq!(card.number_at(Position::FREE), None);
    /// ```
    pub fn from_columns(
        id: CardId,
        columns: [[Option<u8>; GRID_SIZE]; GRID_SIZE],
    ) -> Result<Self, CardError> {
        let mut numbers = [[None; GRID_SIZE]; GRID_SIZE];
        for column in Column::ALL {
            let mut seen: u16 = 0;
            for (row, value) in columns[column.index()].iter().enumerate() {
                let pos = Position::at(column.index(), row);
                match (*value, pos.is_free()) {
                    (Some(v), true) => return Err(CardError::FreeSpaceOccupied(v)),
                    (None, true) => continue,
                    (None, false) => return Err(CardError::MissingNumber(pos)),
                    (Some(v), false) => {
                        if !column.range().contains(&v) {
                            return Err(CardError::NumberOutOfRange { column, value: v });
                        }
                        let bit = 1u16 << (v - column.low());
                        if seen & bit != 0 {
                            return Err(CardError::DuplicateInColumn { column, value: v });
                        }
                        seen |= bit;
                        numbers[column.index()][row] = Some(Ball::from_raw(v));
                    }
                }
            }
        }
        Ok(Self::from_parts(id, numbers))
    }

    pub fn id(&self) -> &CardId {
        &self.id
    }

    pub fn numbers(&self) -> &[[Option<Ball>; GRID_SIZE]; GRID_SIZE] {
        &self.numbers
    }

    pub fn marked(&self) -> &MarkGrid {
        &self.marked
    }

    /// Number at a cell; `None` only for the free space.
    pub fn number_at(&self, pos: Position) -> Option<Ball> {
        self.numbers[pos.column()][pos.row()]
    }

    /// Where `ball` sits on this card, if anywhere. Only its own column is scanned.
    pub fn position_of(&self, ball: Ball) -> Option<Position> {
        let column = ball.column().index();
        self.numbers[column]
            .iter()
            .position(|n| *n == Some(ball))
            .map(|row| Position::at(column, row))
    }

    pub fn contains(&self, ball: Ball) -> bool {
        self.position_of(ball).is_some()
    }

    /// The non-free numbers of one column, top to bottom.
    pub fn column_values(&self, column: Column) -> impl Iterator<Item = Ball> + '_ {
        self.numbers[column.index()].iter().flatten().copied()
    }
}

impl fmt::Display for Card {
    /// Plain-text grid; marked cells are bracketed and the free space is `**`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for column in Column::ALL {
            write!(f, "  {}  ", column)?;
        }
        writeln!(f)?;
        for row in 0..GRID_SIZE {
            for column in 0..GRID_SIZE {
                let pos = Position::at(column, row);
                match self.number_at(pos) {
                    None => write!(f, " ** ")?,
                    Some(b) if self.marked.is_marked(pos) => write!(f, "[{:>2}]", b.number())?,
                    Some(b) => write!(f, " {:>2} ", b.number())?,
                }
                write!(f, " ")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

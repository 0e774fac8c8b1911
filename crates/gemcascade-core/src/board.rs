//! Board state: a square grid of optional tiles.

use std::{
    fmt::{self, Display},
    ops::Index,
    str::FromStr,
};

use derive_more::{Display, Error};

use crate::{Position, Tile, TileKind};

/// Direction that tiles fall toward when gaps are compacted.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gravity {
    /// Tiles fall toward the bottom row.
    #[default]
    Down,
    /// Tiles fall toward the top row.
    Up,
    /// Tiles fall toward the left column.
    Left,
    /// Tiles fall toward the right column.
    Right,
}

impl Gravity {
    /// Returns the cells of one compaction line, starting at the floor.
    ///
    /// For vertical gravity `index` selects a column; for horizontal gravity
    /// it selects a row.
    fn line(self, index: usize, size: usize) -> impl Iterator<Item = Position> {
        (0..size).map(move |i| match self {
            Self::Down => Position::new(index, size - 1 - i),
            Self::Up => Position::new(index, i),
            Self::Left => Position::new(i, index),
            Self::Right => Position::new(size - 1 - i, index),
        })
    }
}

/// One tile moved by [`Board::compact`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fall {
    /// Kind of the moved tile.
    pub kind: TileKind,
    /// Cell the tile left.
    pub from: Position,
    /// Cell the tile landed on.
    pub to: Position,
}

/// Error returned when parsing a [`Board`] from text fails.
#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
pub enum BoardParseError {
    /// The input contains no rows.
    #[display("board text is empty")]
    Empty,
    /// A row's length differs from the number of rows.
    #[display("row {row} has {len} cells, expected {expected}")]
    NotSquare {
        /// Zero-based row index.
        row: usize,
        /// Number of cells found in the row.
        len: usize,
        /// Number of rows in the input.
        expected: usize,
    },
    /// A character is neither a tile symbol nor an empty-cell marker.
    #[display("unknown tile symbol {symbol:?} at ({x}, {y})")]
    UnknownSymbol {
        /// The offending character.
        symbol: char,
        /// Column of the character.
        x: usize,
        /// Row of the character.
        y: usize,
    },
}

/// A square grid of cells, each holding a tile kind or nothing.
///
/// Cells are stored in row-major order. Empty cells only appear while a
/// cascade is being processed; a stable board is always full.
///
/// The text form used by [`Display`] and [`FromStr`] writes one row per line,
/// each cell as its [`TileKind::symbol`], and `.` (or `_`) for an empty cell.
///
/// # Examples
///
/// ```
/// use gemcascade_core::{Board, Position, TileKind};
///
/// let board: Board = "
///     RGB
///     GB.
///     BRG
/// "
/// .parse()?;
///
/// assert_eq!(board.size(), 3);
/// assert_eq!(board[Position::new(1, 0)], Some(TileKind::Green));
/// assert_eq!(board[Position::new(2, 1)], None);
/// assert!(!board.is_full());
/// # Ok::<(), gemcascade_core::BoardParseError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    size: usize,
    cells: Vec<Option<TileKind>>,
}

impl Board {
    /// Board side length used by the standard game.
    pub const DEFAULT_SIZE: usize = 8;

    /// Creates a board with every cell empty.
    #[must_use]
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![None; size * size],
        }
    }

    /// Creates a full board from kinds listed in row-major order.
    ///
    /// Returns `None` unless exactly `size * size` kinds are supplied.
    #[must_use]
    pub fn from_kinds<I>(size: usize, kinds: I) -> Option<Self>
    where
        I: IntoIterator<Item = TileKind>,
    {
        let cells: Vec<_> = kinds.into_iter().map(Some).collect();
        (cells.len() == size * size).then_some(Self { size, cells })
    }

    /// Returns the side length.
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    fn index_of(&self, pos: Position) -> Option<usize> {
        pos.is_within(self.size)
            .then(|| pos.y() * self.size + pos.x())
    }

    /// Returns `true` if `pos` lies on this board.
    #[must_use]
    pub fn contains(&self, pos: Position) -> bool {
        pos.is_within(self.size)
    }

    /// Returns the kind at `pos`, or `None` if the cell is empty or off the board.
    #[must_use]
    pub fn get(&self, pos: Position) -> Option<TileKind> {
        self.index_of(pos).and_then(|i| self.cells[i])
    }

    /// Returns the tile at `pos`, if any.
    #[must_use]
    pub fn tile(&self, pos: Position) -> Option<Tile> {
        self.get(pos).map(|kind| Tile::new(kind, pos))
    }

    /// Writes a cell. Returns `false` (and does nothing) if `pos` is off the board.
    pub fn set(&mut self, pos: Position, kind: Option<TileKind>) -> bool {
        match self.index_of(pos) {
            Some(i) => {
                self.cells[i] = kind;
                true
            }
            None => false,
        }
    }

    /// Empties a cell and returns what it held.
    pub fn take(&mut self, pos: Position) -> Option<TileKind> {
        self.index_of(pos).and_then(|i| self.cells[i].take())
    }

    /// Exchanges the contents of two cells.
    ///
    /// Returns `false` (and does nothing) if either position is off the board.
    pub fn swap(&mut self, a: Position, b: Position) -> bool {
        match (self.index_of(a), self.index_of(b)) {
            (Some(i), Some(j)) => {
                self.cells.swap(i, j);
                true
            }
            _ => false,
        }
    }

    /// Returns `true` if no cell is empty.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Returns every position in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + use<> {
        let size = self.size;
        (0..size).flat_map(move |y| (0..size).map(move |x| Position::new(x, y)))
    }

    /// Returns the empty positions in row-major order.
    pub fn empty_positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.positions().filter(|&pos| self.get(pos).is_none())
    }

    /// Returns the occupied tiles in row-major order.
    pub fn tiles(&self) -> impl Iterator<Item = Tile> + '_ {
        self.positions().filter_map(|pos| self.tile(pos))
    }

    /// Returns the kinds of occupied cells in row-major order.
    #[must_use]
    pub fn kinds(&self) -> Vec<TileKind> {
        self.cells.iter().flatten().copied().collect()
    }

    /// Counts cells holding `kind`.
    #[must_use]
    pub fn count_kind(&self, kind: TileKind) -> usize {
        self.cells
            .iter()
            .filter(|&&cell| cell == Some(kind))
            .count()
    }

    /// Overwrites the board with `kinds`, in row-major order.
    ///
    /// Cells beyond the end of `kinds` are emptied; extra kinds are ignored.
    pub fn refill_row_major<I>(&mut self, kinds: I)
    where
        I: IntoIterator<Item = TileKind>,
    {
        let mut kinds = kinds.into_iter();
        for cell in &mut self.cells {
            *cell = kinds.next();
        }
    }

    /// Slides tiles toward the floor given by `gravity`, closing gaps.
    ///
    /// Each line perpendicular to the floor is compacted independently as a
    /// stable partition: surviving tiles keep their relative order, and the
    /// vacated cells end up at the edge opposite the floor.
    ///
    /// Returns the moves performed, line by line, floor first.
    pub fn compact(&mut self, gravity: Gravity) -> Vec<Fall> {
        let mut falls = Vec::new();
        for index in 0..self.size {
            let line: Vec<Position> = gravity.line(index, self.size).collect();
            let mut write = 0;
            for read in 0..line.len() {
                let Some(kind) = self.get(line[read]) else {
                    continue;
                };
                if read != write {
                    self.set(line[write], Some(kind));
                    self.set(line[read], None);
                    falls.push(Fall {
                        kind,
                        from: line[read],
                        to: line[write],
                    });
                }
                write += 1;
            }
        }
        falls
    }
}

impl Index<Position> for Board {
    type Output = Option<TileKind>;

    /// # Panics
    ///
    /// Panics if `pos` lies off the board.
    fn index(&self, pos: Position) -> &Self::Output {
        let Some(i) = self.index_of(pos) else {
            panic!("position {pos} is off a {0}x{0} board", self.size);
        };
        &self.cells[i]
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.size {
            if y > 0 {
                writeln!(f)?;
            }
            for x in 0..self.size {
                let symbol = self.get(Position::new(x, y)).map_or('.', TileKind::symbol);
                write!(f, "{symbol}")?;
            }
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = BoardParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<&str> = s.split_whitespace().collect();
        if rows.is_empty() {
            return Err(BoardParseError::Empty);
        }
        let size = rows.len();
        let mut board = Self::new(size);
        for (y, row) in rows.into_iter().enumerate() {
            let len = row.chars().count();
            if len != size {
                return Err(BoardParseError::NotSquare {
                    row: y,
                    len,
                    expected: size,
                });
            }
            for (x, symbol) in row.chars().enumerate() {
                if matches!(symbol, '.' | '_') {
                    continue;
                }
                let kind = TileKind::from_symbol(symbol)
                    .ok_or(BoardParseError::UnknownSymbol { symbol, x, y })?;
                board.set(Position::new(x, y), Some(kind));
            }
        }
        Ok(board)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn board(s: &str) -> Board {
        s.parse().expect("valid board text")
    }

    #[test]
    fn test_parse_and_display_roundtrip() {
        let text = "RGBY\nGBY.\n*!@W\nPPPP";
        let parsed = board(text);
        assert_eq!(parsed.size(), 4);
        assert_eq!(parsed.to_string(), text);
        assert_eq!(parsed[Position::new(0, 2)], Some(TileKind::Bomb));
        assert_eq!(parsed[Position::new(3, 1)], None);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<Board>(), Err(BoardParseError::Empty));
        assert_eq!(
            "RG\nG".parse::<Board>(),
            Err(BoardParseError::NotSquare {
                row: 1,
                len: 1,
                expected: 2
            })
        );
        assert_eq!(
            "RG\nGx".parse::<Board>(),
            Err(BoardParseError::UnknownSymbol {
                symbol: 'x',
                x: 1,
                y: 1
            })
        );
    }

    #[test]
    fn test_swap_twice_restores_board() {
        let original = board("RGB GBR BRG");
        let mut swapped = original.clone();
        assert!(swapped.swap(Position::new(0, 0), Position::new(1, 0)));
        assert_ne!(swapped, original);
        assert!(swapped.swap(Position::new(0, 0), Position::new(1, 0)));
        assert_eq!(swapped, original);
    }

    #[test]
    fn test_out_of_bounds_access_is_rejected() {
        let mut b = board("RG GR");
        assert_eq!(b.get(Position::new(2, 0)), None);
        assert!(!b.set(Position::new(0, 2), Some(TileKind::Red)));
        assert!(!b.swap(Position::new(0, 0), Position::new(5, 5)));
        assert_eq!(b, board("RG GR"));
    }

    #[test]
    fn test_compact_down_preserves_order() {
        let mut b = board(
            "
            R.G
            .B.
            Y.W
            ",
        );
        let falls = b.compact(Gravity::Down);
        assert_eq!(
            b,
            board(
                "
                ...
                R.G
                YBW
                "
            )
        );
        assert!(falls.contains(&Fall {
            kind: TileKind::Red,
            from: Position::new(0, 0),
            to: Position::new(0, 1),
        }));
    }

    #[test]
    fn test_compact_other_directions() {
        let text = "
            R.G
            .B.
            Y.W
        ";
        let mut up = board(text);
        up.compact(Gravity::Up);
        assert_eq!(up, board("RBG Y.W ..."));

        let mut left = board(text);
        left.compact(Gravity::Left);
        assert_eq!(left, board("RG. B.. YW."));

        let mut right = board(text);
        right.compact(Gravity::Right);
        assert_eq!(right, board(".RG ..B .YW"));
    }

    #[test]
    fn test_refill_row_major() {
        let mut b = Board::new(2);
        b.refill_row_major([TileKind::Red, TileKind::Blue, TileKind::Green]);
        assert_eq!(b, board("RB G."));
        assert!(!b.is_full());
        assert_eq!(
            b.kinds(),
            vec![TileKind::Red, TileKind::Blue, TileKind::Green]
        );
    }

    fn arb_board() -> impl Strategy<Value = Board> {
        (2usize..=8).prop_flat_map(|size| {
            prop::collection::vec(
                prop::option::weighted(0.7, prop::sample::select(TileKind::BASIC.to_vec())),
                size * size,
            )
            .prop_map(move |cells| Board { size, cells })
        })
    }

    proptest! {
        #[test]
        fn compaction_keeps_column_order(board in arb_board()) {
            let size = board.size();
            let mut compacted = board.clone();
            compacted.compact(Gravity::Down);

            for x in 0..size {
                let before: Vec<_> = (0..size)
                    .filter_map(|y| board.get(Position::new(x, y)))
                    .collect();
                let after: Vec<_> = (0..size)
                    .filter_map(|y| compacted.get(Position::new(x, y)))
                    .collect();
                prop_assert_eq!(&before, &after);

                // Survivors sit on the floor with no gaps beneath them.
                let empty = size - after.len();
                for y in 0..size {
                    prop_assert_eq!(compacted.get(Position::new(x, y)).is_none(), y < empty);
                }
            }
        }

        #[test]
        fn swap_is_an_involution(
            board in arb_board(),
            ax in 0usize..8, ay in 0usize..8, bx in 0usize..8, by in 0usize..8,
        ) {
            let a = Position::new(ax, ay);
            let b = Position::new(bx, by);
            let mut swapped = board.clone();
            swapped.swap(a, b);
            swapped.swap(a, b);
            prop_assert_eq!(swapped, board);
        }
    }
}

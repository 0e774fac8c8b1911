//! Board coordinates.

use std::fmt::{self, Display};

/// A cell coordinate on a square board.
///
/// `x` is the column (0 at the left edge) and `y` is the row (0 at the top edge).
///
/// # Examples
///
/// ```
/// use gemcascade_core::Position;
///
/// let a = Position::new(3, 3);
/// let b = Position::new(3, 4);
/// assert!(a.is_adjacent(b));
/// assert!(!a.is_adjacent(Position::new(4, 4)));
///
/// // Corner cells have two neighbors.
/// assert_eq!(Position::new(0, 0).neighbors(8).count(), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    // Field order gives row-major `Ord`.
    y: usize,
    x: usize,
}

impl Position {
    /// Creates a position from a column and a row.
    #[must_use]
    pub const fn new(x: usize, y: usize) -> Self {
        Self { y, x }
    }

    /// Returns the column.
    #[must_use]
    pub const fn x(self) -> usize {
        self.x
    }

    /// Returns the row.
    #[must_use]
    pub const fn y(self) -> usize {
        self.y
    }

    /// Returns `true` if this position lies on a `size × size` board.
    #[must_use]
    pub const fn is_within(self, size: usize) -> bool {
        self.x < size && self.y < size
    }

    /// Returns the Manhattan distance to `other`.
    #[must_use]
    pub const fn manhattan_distance(self, other: Self) -> usize {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Returns `true` if `other` shares an edge with this position.
    #[must_use]
    pub const fn is_adjacent(self, other: Self) -> bool {
        self.manhattan_distance(other) == 1
    }

    /// Returns the position shifted by `(dx, dy)`, if it stays on a `size × size` board.
    #[must_use]
    pub fn offset(self, dx: isize, dy: isize, size: usize) -> Option<Self> {
        let x = self.x.checked_add_signed(dx)?;
        let y = self.y.checked_add_signed(dy)?;
        let pos = Self::new(x, y);
        pos.is_within(size).then_some(pos)
    }

    /// Returns the orthogonal neighbors on a `size × size` board.
    ///
    /// Neighbors are yielded in up, down, left, right order; off-board
    /// neighbors are skipped.
    pub fn neighbors(self, size: usize) -> impl Iterator<Item = Self> {
        [(0, -1), (0, 1), (-1, 0), (1, 0)]
            .into_iter()
            .filter_map(move |(dx, dy)| self.offset(dx, dy, size))
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adjacency_is_manhattan_one() {
        let center = Position::new(4, 4);
        assert!(center.is_adjacent(Position::new(4, 3)));
        assert!(center.is_adjacent(Position::new(4, 5)));
        assert!(center.is_adjacent(Position::new(3, 4)));
        assert!(center.is_adjacent(Position::new(5, 4)));

        assert!(!center.is_adjacent(center));
        assert!(!center.is_adjacent(Position::new(5, 5)));
        assert!(!center.is_adjacent(Position::new(4, 6)));
    }

    #[test]
    fn test_neighbors_respect_bounds() {
        let size = 8;
        let corner: Vec<_> = Position::new(7, 0).neighbors(size).collect();
        assert_eq!(corner, vec![Position::new(7, 1), Position::new(6, 0)]);

        let inner: Vec<_> = Position::new(3, 3).neighbors(size).collect();
        assert_eq!(
            inner,
            vec![
                Position::new(3, 2),
                Position::new(3, 4),
                Position::new(2, 3),
                Position::new(4, 3),
            ]
        );
    }

    #[test]
    fn test_ordering_is_row_major() {
        assert!(Position::new(7, 0) < Position::new(0, 1));
        assert!(Position::new(1, 1) < Position::new(2, 1));
    }

    #[test]
    fn test_offset_rejects_negative_and_overflow() {
        assert_eq!(Position::new(0, 0).offset(-1, 0, 8), None);
        assert_eq!(Position::new(7, 0).offset(1, 0, 8), None);
        assert_eq!(
            Position::new(2, 2).offset(1, -1, 8),
            Some(Position::new(3, 1))
        );
    }
}

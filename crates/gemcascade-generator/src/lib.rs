//! Board generation for tile-matching games.
//!
//! The [`TileGenerator`] trait is the pluggable source of tile kinds used by
//! the game engine in three situations:
//!
//! - filling a fresh board ([`TileGenerator::initial_kind`]), where kinds that
//!   would complete a run are avoided,
//! - refilling cells emptied by a cascade ([`TileGenerator::refill_kind`]),
//!   where any kind is allowed since chained matches are legitimate play,
//! - permuting the tiles of a stuck board ([`TileGenerator::shuffle`]).
//!
//! [`BoardGenerator`] implements it with a seeded PCG random number generator.
//!
//! # Examples
//!
//! ```
//! use gemcascade_core::matching;
//! use gemcascade_generator::{BoardGenerator, BoardSeed, fill_initial};
//!
//! let mut generator = BoardGenerator::with_seed(BoardSeed::from(42));
//! let board = fill_initial(&mut generator, 8, matching::MIN_MATCH_LEN);
//!
//! assert!(board.is_full());
//! assert!(matching::find_matches(&board, matching::MIN_MATCH_LEN).is_empty());
//! ```

use gemcascade_core::{Board, Position, TileKind};

pub use self::{random::*, seed::*};

mod random;
mod seed;

/// A source of tile kinds for filling, refilling, and shuffling boards.
pub trait TileGenerator {
    /// Chooses the kind for `pos` while building a fresh board.
    ///
    /// Cells are filled left to right, top to bottom, so only the cells to the
    /// left of and above `pos` are populated in `board`. Implementations should
    /// avoid kinds listed by [`blocked_kinds`].
    fn initial_kind(&mut self, pos: Position, board: &Board, min_len: usize) -> TileKind;

    /// Chooses the kind for an empty cell after a cascade compaction.
    fn refill_kind(&mut self, pos: Position, board: &Board) -> TileKind;

    /// Randomly permutes `kinds` in place.
    fn shuffle(&mut self, kinds: &mut [TileKind]);
}

impl<G> TileGenerator for &mut G
where
    G: TileGenerator + ?Sized,
{
    fn initial_kind(&mut self, pos: Position, board: &Board, min_len: usize) -> TileKind {
        (**self).initial_kind(pos, board, min_len)
    }

    fn refill_kind(&mut self, pos: Position, board: &Board) -> TileKind {
        (**self).refill_kind(pos, board)
    }

    fn shuffle(&mut self, kinds: &mut [TileKind]) {
        (**self).shuffle(kinds);
    }
}

/// Returns the kinds that would complete a run ending at `pos`.
///
/// A kind is blocked when the `min_len - 1` cells directly to the left of
/// `pos`, or directly above it, all hold that kind. At most two kinds are
/// returned.
///
/// # Examples
///
/// ```
/// use gemcascade_core::{Board, Position, TileKind};
/// use gemcascade_generator::blocked_kinds;
///
/// let board: Board = "
///     RRB
///     GGB
///     ...
/// "
/// .parse()?;
///
/// assert_eq!(blocked_kinds(Position::new(2, 0), &board, 3), vec![TileKind::Red]);
/// assert_eq!(blocked_kinds(Position::new(2, 2), &board, 3), vec![TileKind::Blue]);
/// assert!(blocked_kinds(Position::new(0, 2), &board, 3).is_empty());
/// # Ok::<(), gemcascade_core::BoardParseError>(())
/// ```
#[must_use]
pub fn blocked_kinds(pos: Position, board: &Board, min_len: usize) -> Vec<TileKind> {
    let needed = min_len.saturating_sub(1);
    let mut blocked = Vec::with_capacity(2);
    if needed == 0 {
        return blocked;
    }

    for (dx, dy) in [(-1, 0), (0, -1)] {
        let mut kind = None;
        let mut count = 0;
        let mut cursor = pos;
        while count < needed {
            let Some(next) = cursor.offset(dx, dy, board.size()) else {
                break;
            };
            let Some(next_kind) = board.get(next) else {
                break;
            };
            if kind.is_some_and(|k| k != next_kind) {
                break;
            }
            kind = Some(next_kind);
            count += 1;
            cursor = next;
        }
        if count == needed
            && let Some(kind) = kind
            && !blocked.contains(&kind)
        {
            blocked.push(kind);
        }
    }
    blocked
}

/// Builds a full `size × size` board using [`TileGenerator::initial_kind`].
///
/// Cells are filled left to right, top to bottom. With a generator that
/// respects [`blocked_kinds`] and a palette of at least three kinds, the
/// result contains no match of length `min_len` or more.
#[must_use]
pub fn fill_initial<G>(generator: &mut G, size: usize, min_len: usize) -> Board
where
    G: TileGenerator + ?Sized,
{
    let mut board = Board::new(size);
    for pos in board.positions() {
        let kind = generator.initial_kind(pos, &board, min_len);
        board.set(pos, Some(kind));
    }
    board
}

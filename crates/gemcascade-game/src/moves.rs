//! Stuck-board detection and recovery.
//!
//! A board is *stuck* when no single swap of adjacent tiles produces a match.
//! Detection simulates every swap on a scratch copy of the board and runs the
//! match detector; recovery shuffles the existing tiles until the board is
//! both match-free and unstuck.

use std::fmt::{self, Display};

use gemcascade_core::{Board, Position, matching};
use gemcascade_generator::TileGenerator;

use crate::GameError;

/// A swap of two adjacent cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Swap {
    /// First cell, the earlier one in row-major order.
    pub a: Position,
    /// Second cell.
    pub b: Position,
}

impl Display for Swap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <-> {}", self.a, self.b)
    }
}

fn swap_makes_match(scratch: &mut Board, a: Position, b: Position, min_len: usize) -> bool {
    scratch.swap(a, b);
    let found = matching::has_match(scratch, min_len);
    scratch.swap(a, b);
    found
}

/// Returns `true` if some adjacent swap produces a match.
///
/// Every cell is tried against each of its neighbors, stopping at the first
/// swap that produces a match.
///
/// # Examples
///
/// ```
/// use gemcascade_core::Board;
/// use gemcascade_game::moves;
///
/// let stuck: Board = "
///     RBGY
///     GYRB
///     RBGY
///     GYRB
/// "
/// .parse()?;
/// assert!(!moves::has_valid_move(&stuck, 3));
///
/// let playable: Board = "
///     RRGY
///     GYRB
///     RBGY
///     GYRB
/// "
/// .parse()?;
/// assert!(moves::has_valid_move(&playable, 3));
/// # Ok::<(), gemcascade_core::BoardParseError>(())
/// ```
#[must_use]
pub fn has_valid_move(board: &Board, min_len: usize) -> bool {
    let mut scratch = board.clone();
    let size = board.size();
    board.positions().any(|pos| {
        pos.neighbors(size)
            .any(|neighbor| swap_makes_match(&mut scratch, pos, neighbor, min_len))
    })
}

/// Lists every adjacent swap that produces a match.
///
/// Each pair of cells appears once, ordered by its first cell in row-major
/// order, horizontal swap before vertical swap.
#[must_use]
pub fn valid_moves(board: &Board, min_len: usize) -> Vec<Swap> {
    let mut scratch = board.clone();
    let size = board.size();
    let mut found = Vec::new();
    for a in board.positions() {
        for b in [a.offset(1, 0, size), a.offset(0, 1, size)]
            .into_iter()
            .flatten()
        {
            if swap_makes_match(&mut scratch, a, b, min_len) {
                found.push(Swap { a, b });
            }
        }
    }
    found
}

/// Rearranges the tiles of `board` until it is playable.
///
/// Each attempt permutes the current kinds with [`TileGenerator::shuffle`] and
/// writes them back in row-major order. An arrangement is accepted once it has
/// no match and at least one valid move.
///
/// Returns the number of attempts used.
///
/// # Errors
///
/// Returns [`GameError::IncompleteBoard`] if the board has empty cells, and
/// [`GameError::ShuffleExhausted`] if no acceptable arrangement was found within
/// `max_attempts`; the board is then restored to its original arrangement.
pub fn shuffle_board<G>(
    board: &mut Board,
    generator: &mut G,
    min_len: usize,
    max_attempts: u32,
) -> Result<u32, GameError>
where
    G: TileGenerator + ?Sized,
{
    if !board.is_full() {
        return Err(GameError::IncompleteBoard);
    }

    let original = board.kinds();
    let mut kinds = original.clone();
    for attempt in 1..=max_attempts {
        generator.shuffle(&mut kinds);
        board.refill_row_major(kinds.iter().copied());
        if !matching::has_match(board, min_len) && has_valid_move(board, min_len) {
            log::debug!("board shuffled into a playable arrangement after {attempt} attempts");
            return Ok(attempt);
        }
        log::trace!("shuffle attempt {attempt} rejected");
    }

    log::warn!("no playable arrangement found after {max_attempts} shuffles");
    board.refill_row_major(original);
    Err(GameError::ShuffleExhausted {
        attempts: max_attempts,
    })
}

#[cfg(test)]
mod tests {
    use gemcascade_core::{TileKind, matching::MIN_MATCH_LEN};
    use gemcascade_generator::{BoardGenerator, BoardSeed};

    use super::*;
    use crate::testing;

    #[test]
    fn test_single_valid_move_is_found() {
        let board = testing::scenario_board();
        assert!(has_valid_move(&board, MIN_MATCH_LEN));
        assert_eq!(
            valid_moves(&board, MIN_MATCH_LEN),
            vec![Swap {
                a: Position::new(3, 3),
                b: Position::new(3, 4),
            }]
        );
    }

    #[test]
    fn test_stuck_board_has_no_moves() {
        let board = testing::stuck_board();
        assert!(!has_valid_move(&board, MIN_MATCH_LEN));
        assert!(valid_moves(&board, MIN_MATCH_LEN).is_empty());
    }

    #[test]
    fn test_check_leaves_board_untouched() {
        let board = testing::scenario_board();
        let before = board.clone();
        let _ = has_valid_move(&board, MIN_MATCH_LEN);
        let _ = valid_moves(&board, MIN_MATCH_LEN);
        assert_eq!(board, before);
    }

    #[test]
    fn test_shuffle_unsticks_board_and_keeps_kinds() {
        let mut board = testing::small_stuck_board();
        assert!(!has_valid_move(&board, MIN_MATCH_LEN));
        let mut before = board.kinds();
        let mut generator = BoardGenerator::with_seed(BoardSeed::from(11));

        let attempts = shuffle_board(&mut board, &mut generator, MIN_MATCH_LEN, 100).unwrap();
        assert!(attempts >= 1);
        assert!(!matching::has_match(&board, MIN_MATCH_LEN));
        assert!(has_valid_move(&board, MIN_MATCH_LEN));

        let mut after = board.kinds();
        before.sort();
        after.sort();
        assert_eq!(before, after);
    }

    #[test]
    fn test_shuffle_gives_up_on_single_kind() {
        let mut board = Board::from_kinds(4, [TileKind::Red; 16]).unwrap();
        let mut generator = BoardGenerator::with_seed(BoardSeed::from(0));
        assert_eq!(
            shuffle_board(&mut board, &mut generator, MIN_MATCH_LEN, 5),
            Err(GameError::ShuffleExhausted { attempts: 5 })
        );
    }

    #[test]
    fn test_exhausted_shuffle_restores_board() {
        for seed in 0..200 {
            let mut board = testing::small_stuck_board();
            let before = board.clone();
            let mut generator = BoardGenerator::with_seed(BoardSeed::from(seed));
            if shuffle_board(&mut board, &mut generator, MIN_MATCH_LEN, 1).is_err() {
                assert_eq!(board, before, "seed {seed}");
                assert!(!matching::has_match(&board, MIN_MATCH_LEN));
            }
        }
    }

    #[test]
    fn test_shuffle_rejects_incomplete_board() {
        let mut board: Board = "RB. GRB BGR".parse().unwrap();
        let mut generator = BoardGenerator::with_seed(BoardSeed::from(0));
        assert_eq!(
            shuffle_board(&mut board, &mut generator, MIN_MATCH_LEN, 5),
            Err(GameError::IncompleteBoard)
        );
    }
}

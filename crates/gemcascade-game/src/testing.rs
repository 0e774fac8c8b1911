//! Fixture boards and deterministic tile sources for tests.

use std::collections::VecDeque;

use gemcascade_core::{Board, Position, TileKind, matching::MIN_MATCH_LEN};
use gemcascade_generator::TileGenerator;

const STRIPES: [TileKind; 4] = [
    TileKind::Red,
    TileKind::Blue,
    TileKind::Green,
    TileKind::Yellow,
];

/// Diagonal four-kind stripes; no adjacent swap on this pattern matches.
fn striped(size: usize) -> Board {
    let mut board = Board::new(size);
    for pos in board.positions() {
        board.set(pos, Some(STRIPES[(pos.x() + 2 * pos.y()) % STRIPES.len()]));
    }
    board
}

/// An 8×8 stuck board.
pub(crate) fn stuck_board() -> Board {
    striped(Board::DEFAULT_SIZE)
}

/// A 4×4 stuck board; small enough that random shuffles recover quickly.
pub(crate) fn small_stuck_board() -> Board {
    striped(4)
}

/// An 8×8 board without matches whose only valid move swaps (3, 3) with
/// (3, 4), completing three whites on row 3.
pub(crate) fn scenario_board() -> Board {
    let mut board = striped(Board::DEFAULT_SIZE);
    for (x, symbol) in "GWWBGYRB".chars().enumerate() {
        board.set(Position::new(x, 3), TileKind::from_symbol(symbol));
    }
    for (x, symbol) in "RBGWRBGY".chars().enumerate() {
        board.set(Position::new(x, 4), TileKind::from_symbol(symbol));
    }
    board
}

/// A 5×5 board whose only valid move, (3, 1) with (3, 2), chains into a
/// second match under [`SafeRefillGenerator`].
pub(crate) fn chain_board() -> Board {
    "
    GRRYY
    GYGBR
    YBRGR
    RGYBY
    YGRBB
    "
    .parse()
    .unwrap()
}

/// Refills from a fixed script.
///
/// Panics when asked for more kinds than scripted, or for an initial fill.
#[derive(Debug, Default)]
pub(crate) struct ScriptedGenerator {
    refills: VecDeque<TileKind>,
}

impl ScriptedGenerator {
    pub(crate) fn new<I>(refills: I) -> Self
    where
        I: IntoIterator<Item = TileKind>,
    {
        Self {
            refills: refills.into_iter().collect(),
        }
    }
}

impl TileGenerator for ScriptedGenerator {
    fn initial_kind(&mut self, pos: Position, _board: &Board, _min_len: usize) -> TileKind {
        panic!("scripted generator cannot fill {pos}");
    }

    fn refill_kind(&mut self, pos: Position, _board: &Board) -> TileKind {
        self.refills
            .pop_front()
            .unwrap_or_else(|| panic!("refill script exhausted at {pos}"))
    }

    fn shuffle(&mut self, kinds: &mut [TileKind]) {
        kinds.rotate_left(1);
    }
}

/// Always produces the same kind.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RepeatGenerator(pub(crate) TileKind);

impl TileGenerator for RepeatGenerator {
    fn initial_kind(&mut self, _pos: Position, _board: &Board, _min_len: usize) -> TileKind {
        self.0
    }

    fn refill_kind(&mut self, _pos: Position, _board: &Board) -> TileKind {
        self.0
    }

    fn shuffle(&mut self, kinds: &mut [TileKind]) {
        kinds.rotate_left(1);
    }
}

/// Picks the first basic kind that does not complete a run through the cell.
///
/// Considers tiles on both sides of the cell, so cascades driven by it never
/// chain on the refilled tiles alone. Refills avoid runs of the length given
/// to [`SafeRefillGenerator::new`], which should match the rules in play.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SafeRefillGenerator {
    min_len: usize,
}

impl Default for SafeRefillGenerator {
    fn default() -> Self {
        Self::new(MIN_MATCH_LEN)
    }
}

impl SafeRefillGenerator {
    pub(crate) fn new(min_len: usize) -> Self {
        Self { min_len }
    }

    fn pick(pos: Position, board: &Board, min_len: usize) -> TileKind {
        TileKind::BASIC
            .into_iter()
            .find(|&kind| !completes_run(pos, kind, board, min_len))
            .unwrap_or(TileKind::BASIC[0])
    }
}

fn completes_run(pos: Position, kind: TileKind, board: &Board, min_len: usize) -> bool {
    let reach = |dx: isize, dy: isize| {
        let mut count = 0;
        let mut cursor = pos;
        while let Some(next) = cursor.offset(dx, dy, board.size())
            && board.get(next) == Some(kind)
        {
            count += 1;
            cursor = next;
        }
        count
    };
    reach(-1, 0) + reach(1, 0) + 1 >= min_len || reach(0, -1) + reach(0, 1) + 1 >= min_len
}

impl TileGenerator for SafeRefillGenerator {
    fn initial_kind(&mut self, pos: Position, board: &Board, min_len: usize) -> TileKind {
        Self::pick(pos, board, min_len)
    }

    fn refill_kind(&mut self, pos: Position, board: &Board) -> TileKind {
        Self::pick(pos, board, self.min_len)
    }

    fn shuffle(&mut self, kinds: &mut [TileKind]) {
        kinds.rotate_left(1);
    }
}

mod tests {
    use super::*;

    #[test]
    fn test_safe_refill_uses_its_run_length() {
        let board: Board = "RR.. .... .... ....".parse().unwrap();
        let pos = Position::new(2, 0);
        assert_eq!(
            SafeRefillGenerator::default().refill_kind(pos, &board),
            TileKind::Blue
        );
        assert_eq!(
            SafeRefillGenerator::new(4).refill_kind(pos, &board),
            TileKind::Red
        );
    }
}

//! Match detection.
//!
//! A *run* is a maximal line of adjacent cells holding the same kind. A run
//! whose length reaches the minimum match length is reported as a
//! [`MatchGroup`]. Rows are scanned left to right, then columns top to bottom;
//! empty cells always break a run.
//!
//! A tile lying on both a horizontal and a vertical run is reported in two
//! groups. Use [`matched_positions`] to collapse groups into the set of cells
//! to clear.

use std::{
    collections::BTreeSet,
    fmt::{self, Display},
};

use crate::{Board, Position, TileKind};

/// Default minimum run length that counts as a match.
pub const MIN_MATCH_LEN: usize = 3;

/// Base score per matched tile.
const SCORE_PER_TILE: u32 = 10;

/// Axis of a match group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchShape {
    /// A run along a row.
    Horizontal,
    /// A run along a column.
    Vertical,
}

impl Display for MatchShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Horizontal => f.write_str("horizontal"),
            Self::Vertical => f.write_str("vertical"),
        }
    }
}

/// A run of same-kind tiles long enough to clear.
///
/// Positions are ordered along the run (left to right, or top to bottom) and
/// never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MatchGroup {
    kind: TileKind,
    shape: MatchShape,
    positions: Vec<Position>,
}

impl MatchGroup {
    /// Returns the kind shared by every tile in the group.
    #[must_use]
    pub fn kind(&self) -> TileKind {
        self.kind
    }

    /// Returns the axis of the run.
    #[must_use]
    pub fn shape(&self) -> MatchShape {
        self.shape
    }

    /// Returns the cells of the run, in scan order.
    #[must_use]
    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    /// Returns the run length.
    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Always `false`; groups are never empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Returns `true` if the run covers `pos`.
    #[must_use]
    pub fn contains(&self, pos: Position) -> bool {
        self.positions.contains(&pos)
    }

    /// Returns the base score of the group: ten points per tile.
    #[must_use]
    pub fn score(&self) -> u32 {
        u32::try_from(self.len()).map_or(u32::MAX, |len| len.saturating_mul(SCORE_PER_TILE))
    }
}

impl Display for MatchGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} x{}", self.shape, self.kind, self.len())?;
        if let Some(first) = self.positions.first() {
            write!(f, " from {first}")?;
        }
        Ok(())
    }
}

/// Accumulates one run while scanning a line.
struct RunScanner<'a> {
    shape: MatchShape,
    min_len: usize,
    groups: &'a mut Vec<MatchGroup>,
    kind: Option<TileKind>,
    run: Vec<Position>,
}

impl RunScanner<'_> {
    fn push(&mut self, pos: Position, kind: Option<TileKind>) {
        if kind.is_none() || kind != self.kind {
            self.flush();
        }
        if let Some(kind) = kind {
            self.kind = Some(kind);
            self.run.push(pos);
        }
    }

    fn flush(&mut self) {
        let run = std::mem::take(&mut self.run);
        if let Some(kind) = self.kind.take()
            && run.len() >= self.min_len
        {
            self.groups.push(MatchGroup {
                kind,
                shape: self.shape,
                positions: run,
            });
        }
    }
}

/// Finds every match group on `board`.
///
/// Horizontal groups come first (rows top to bottom), followed by vertical
/// groups (columns left to right).
///
/// # Examples
///
/// ```
/// use gemcascade_core::{Board, MatchShape, Position, matching};
///
/// let board: Board = "
///     RRRB
///     GBYB
///     GYBB
///     GBYR
/// "
/// .parse()?;
///
/// let groups = matching::find_matches(&board, matching::MIN_MATCH_LEN);
/// assert_eq!(groups.len(), 3);
/// assert_eq!(groups[0].shape(), MatchShape::Horizontal);
/// assert_eq!(groups[0].positions()[0], Position::new(0, 0));
/// assert!(groups[1..].iter().all(|g| g.shape() == MatchShape::Vertical));
/// # Ok::<(), gemcascade_core::BoardParseError>(())
/// ```
#[must_use]
pub fn find_matches(board: &Board, min_len: usize) -> Vec<MatchGroup> {
    let size = board.size();
    let mut groups = Vec::new();

    for (shape, along_rows) in [
        (MatchShape::Horizontal, true),
        (MatchShape::Vertical, false),
    ] {
        for line in 0..size {
            let mut scanner = RunScanner {
                shape,
                min_len,
                groups: &mut groups,
                kind: None,
                run: Vec::with_capacity(size),
            };
            for i in 0..size {
                let pos = if along_rows {
                    Position::new(i, line)
                } else {
                    Position::new(line, i)
                };
                scanner.push(pos, board.get(pos));
            }
            scanner.flush();
        }
    }

    groups
}

/// Returns `true` if `board` has at least one match.
///
/// Equivalent to `!find_matches(board, min_len).is_empty()` without
/// collecting groups.
#[must_use]
pub fn has_match(board: &Board, min_len: usize) -> bool {
    let size = board.size();
    let min_len = min_len.max(1);
    let line_has_run = |cells: &mut dyn Iterator<Item = Option<TileKind>>| {
        let mut prev = None;
        let mut len = 0;
        for kind in cells {
            if kind.is_some() && kind == prev {
                len += 1;
            } else {
                len = usize::from(kind.is_some());
            }
            prev = kind;
            if len >= min_len {
                return true;
            }
        }
        false
    };

    let cell = |x, y| board.get(Position::new(x, y));
    (0..size).any(|y| line_has_run(&mut (0..size).map(|x| cell(x, y))))
        || (0..size).any(|x| line_has_run(&mut (0..size).map(|y| cell(x, y))))
}

/// Collapses groups into the set of matched cells.
///
/// A cell shared by a horizontal and a vertical group appears once.
#[must_use]
pub fn matched_positions(groups: &[MatchGroup]) -> BTreeSet<Position> {
    groups
        .iter()
        .flat_map(|group| group.positions().iter().copied())
        .collect()
}

use std::fmt::{self, Display};

use derive_more::IsVariant;
use gemcascade_core::{Fall, MatchGroup, Position, Tile, TileKind};

/// Something observable that happened inside the engine.
///
/// Events are queued in the order they happen and drained with
/// [`Engine::drain_events`](crate::Engine::drain_events). Within one cascade
/// cycle the order is always:
///
/// 1. [`ComboChanged`](Self::ComboChanged) with the new combo value
/// 2. [`MatchFound`](Self::MatchFound) with every group found that cycle
/// 3. one [`GemsCleared`](Self::GemsCleared) per kind removed, in catalog order
/// 4. [`Compacted`](Self::Compacted)
/// 5. [`Refilled`](Self::Refilled)
///
/// When a rescan finds nothing, [`BoardStable`](Self::BoardStable) is followed by
/// `ComboChanged(0)`, and by [`BoardShuffled`](Self::BoardShuffled) if the settled
/// board had no valid move.
#[derive(Debug, Clone, PartialEq, Eq, IsVariant)]
pub enum EngineEvent {
    /// A cell became the current selection.
    Selected(Position),
    /// The current selection was dropped without a swap.
    Deselected(Position),
    /// Two adjacent tiles were exchanged.
    Swapped {
        /// First selected cell.
        a: Position,
        /// Second selected cell.
        b: Position,
    },
    /// A swap made no match and was undone.
    SwapReverted {
        /// First selected cell.
        a: Position,
        /// Second selected cell.
        b: Position,
    },
    /// Match groups found at the start of a cycle, before clearing.
    MatchFound(Vec<MatchGroup>),
    /// Tiles of one kind were removed; shared cells are counted once.
    GemsCleared {
        /// Kind removed.
        kind: TileKind,
        /// Number of cells of that kind removed.
        count: usize,
    },
    /// Tiles fell to close the gaps left by a clear.
    Compacted(Vec<Fall>),
    /// New tiles were placed into empty cells.
    Refilled(Vec<Tile>),
    /// The combo counter changed.
    ComboChanged(u32),
    /// A cascade finished; the board is full and has no matches.
    BoardStable {
        /// Number of cycles the cascade ran.
        combo: u32,
    },
    /// A stuck board was rearranged.
    BoardShuffled {
        /// Shuffles needed to reach a playable board.
        attempts: u32,
    },
    /// The board was replaced by a freshly generated one.
    BoardReset,
}

impl Display for EngineEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Selected(pos) => write!(f, "selected {pos}"),
            Self::Deselected(pos) => write!(f, "deselected {pos}"),
            Self::Swapped { a, b } => write!(f, "swapped {a} <-> {b}"),
            Self::SwapReverted { a, b } => write!(f, "reverted {a} <-> {b}"),
            Self::MatchFound(groups) => {
                write!(f, "match found:")?;
                for (i, group) in groups.iter().enumerate() {
                    let sep = if i == 0 { " " } else { ", " };
                    write!(f, "{sep}{group}")?;
                }
                Ok(())
            }
            Self::GemsCleared { kind, count } => write!(f, "cleared {count} {kind}"),
            Self::Compacted(falls) => write!(f, "{} tiles fell", falls.len()),
            Self::Refilled(tiles) => write!(f, "{} tiles refilled", tiles.len()),
            Self::ComboChanged(combo) => write!(f, "combo {combo}"),
            Self::BoardStable { combo } => write!(f, "board stable after combo {combo}"),
            Self::BoardShuffled { attempts } => write!(f, "board shuffled ({attempts} attempts)"),
            Self::BoardReset => write!(f, "board reset"),
        }
    }
}

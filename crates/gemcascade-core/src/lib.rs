//! Core data structures for tile-matching games.
//!
//! This crate provides the board model shared by board generation and the
//! game engine.
//!
//! # Overview
//!
//! - [`tile`]: the closed catalog of tile kinds ([`TileKind`]) and the [`Tile`] value
//! - [`position`]: board coordinates ([`Position`]) with adjacency helpers
//! - [`board`]: the square [`Board`] of optional tiles, gravity compaction, and a
//!   compact text format used for fixtures and debugging
//! - [`matching`]: the match detector that finds runs of identical kinds
//!
//! # Examples
//!
//! ```
//! use gemcascade_core::{Board, Position, matching};
//!
//! let mut board: Board = "
//!     RRG
//!     GBR
//!     BGB
//! "
//! .parse()?;
//! assert!(matching::find_matches(&board, matching::MIN_MATCH_LEN).is_empty());
//!
//! // Moving the red tile up completes the top row.
//! board.swap(Position::new(2, 0), Position::new(2, 1));
//! let groups = matching::find_matches(&board, matching::MIN_MATCH_LEN);
//! assert_eq!(groups.len(), 1);
//! assert_eq!(groups[0].len(), 3);
//! # Ok::<(), gemcascade_core::BoardParseError>(())
//! ```

pub mod board;
pub mod matching;
pub mod position;
pub mod tile;

pub use self::{
    board::{Board, BoardParseError, Fall, Gravity},
    matching::{MatchGroup, MatchShape},
    position::Position,
    tile::{Tile, TileKind},
};

//! Match-3 game engine.
//!
//! This crate turns a [`Board`](gemcascade_core::Board) into a playable game:
//! it interprets cell selections as swaps, resolves the resulting cascades,
//! and keeps the board playable.
//!
//! # Overview
//!
//! - [`Engine`]: the facade owning the board, the tile source, and all game state
//! - [`Rules`]: board size, match length, gravity, and retry limits
//! - [`EngineEvent`]: everything observable that happens, queued for the caller
//! - [`CascadePhase`]: the clear, compact, refill, rescan cycle, advanced one
//!   step at a time
//! - [`moves`]: valid-move detection and shuffling of stuck boards
//!
//! The engine never waits. A presentation layer that wants to animate a
//! cascade calls [`Engine::advance`] once per step and drains the events in
//! between; everyone else calls [`Engine::resolve`].
//!
//! # Examples
//!
//! ```
//! use gemcascade_game::{Engine, EngineEvent, Rules};
//! use gemcascade_generator::{BoardGenerator, BoardSeed};
//!
//! let mut engine = Engine::new(Rules::default(), BoardGenerator::with_seed(BoardSeed::from(5)))?;
//!
//! let swap = engine.hint().expect("new boards have a valid move");
//! engine.select_cell(swap.a);
//! engine.select_cell(swap.b);
//! engine.resolve()?;
//!
//! let events = engine.drain_events();
//! assert!(events.contains(&EngineEvent::ComboChanged(1)));
//! assert!(events.iter().any(EngineEvent::is_board_stable));
//! # Ok::<(), gemcascade_game::GameError>(())
//! ```

pub use self::{
    cascade::CascadePhase,
    engine::Engine,
    error::GameError,
    event::EngineEvent,
    moves::Swap,
    rules::Rules,
    selection::{SelectOutcome, Selection},
};

mod cascade;
mod engine;
mod error;
mod event;
pub mod moves;
mod rules;
mod selection;
#[cfg(test)]
mod testing;

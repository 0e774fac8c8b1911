//! Command-line autoplayer for the Gemcascade engine.
//!
//! Generates a board, then repeatedly plays a valid swap and resolves its
//! cascade, printing every engine event and the resulting board.
//!
//! # Usage
//!
//! ```sh
//! cargo run -- --moves 10
//! ```
//!
//! Replay a game and show only the summary:
//!
//! ```sh
//! cargo run -- --seed 1234567890abcdef1234567890abcdef1234567890abcdef1234567890abcdef --quiet
//! ```
//!
//! Set `RUST_LOG=debug` to see the engine's own log output.

use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use gemcascade_core::{Board, TileKind, matching};
use gemcascade_game::{Engine, EngineEvent, GameError, Rules, Swap, moves};
use gemcascade_generator::{BoardGenerator, BoardSeed};
use rand::{SeedableRng as _, seq::IndexedRandom as _};
use rand_pcg::Pcg64;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Seed as 64 hex digits. A random seed is used when omitted.
    #[arg(long, value_name = "HEX")]
    seed: Option<BoardSeed>,

    /// Number of swaps to play.
    #[arg(long, value_name = "N", default_value_t = 20)]
    moves: usize,

    /// Board side length.
    #[arg(long, value_name = "N", default_value_t = Board::DEFAULT_SIZE)]
    size: usize,

    /// Minimum run length that counts as a match.
    #[arg(long, value_name = "N", default_value_t = matching::MIN_MATCH_LEN)]
    min_match: usize,

    /// How the next swap is chosen among the valid ones.
    #[arg(long, value_enum, default_value_t = Strategy::First)]
    strategy: Strategy,

    /// Print only the final summary.
    #[arg(long)]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Strategy {
    /// The first valid swap in row-major order.
    First,
    /// A valid swap picked at random, reproducible from the seed.
    Random,
}

#[derive(Debug, Default)]
struct Summary {
    moves: usize,
    max_combo: u32,
    shuffles: u32,
    cleared: [usize; TileKind::ALL.len()],
}

impl Summary {
    fn record(&mut self, event: &EngineEvent) {
        match *event {
            EngineEvent::GemsCleared { kind, count } => self.cleared[kind.index()] += count,
            EngineEvent::BoardStable { combo } => self.max_combo = self.max_combo.max(combo),
            EngineEvent::BoardShuffled { .. } => self.shuffles += 1,
            _ => {}
        }
    }

    fn print(&self) {
        println!("Summary:");
        println!("  moves played: {}", self.moves);
        println!("  max combo: {}", self.max_combo);
        println!("  shuffles: {}", self.shuffles);
        println!("  cleared:");
        for kind in TileKind::ALL {
            let count = self.cleared[kind.index()];
            if count > 0 {
                println!("    {kind}: {count}");
            }
        }
        println!("    total: {}", self.cleared.iter().sum::<usize>());
    }
}

fn main() -> ExitCode {
    better_panic::install();
    env_logger::init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), GameError> {
    let seed = args.seed.unwrap_or_else(BoardSeed::random);
    let rules = Rules::default()
        .board_size(args.size)
        .min_match_len(args.min_match);
    let mut engine = Engine::new(rules, BoardGenerator::with_seed(seed))?;
    let mut picker = Pcg64::from_rng(&mut Pcg64::from_seed(seed.bytes()));
    log::info!("starting autoplay with seed {seed}");

    if !args.quiet {
        println!("Seed:");
        println!("  {seed}");
        println!();
        print_board(engine.board());
    }

    let mut summary = Summary::default();
    for turn in 1..=args.moves {
        let candidates = moves::valid_moves(engine.board(), rules.min_match_len);
        let next = match args.strategy {
            Strategy::First => candidates.first(),
            Strategy::Random => candidates.choose(&mut picker),
        };
        let Some(&swap) = next else {
            if !args.quiet {
                println!("No valid move left.");
            }
            break;
        };

        if !play(&mut engine, swap)? {
            if !args.quiet {
                println!("Move {turn}: {swap} was not accepted.");
            }
            break;
        }
        summary.moves += 1;

        if !args.quiet {
            println!("Move {turn}: {swap}");
        }
        for event in engine.drain_events() {
            summary.record(&event);
            if !args.quiet {
                println!("  {event}");
            }
        }
        if !args.quiet {
            println!();
            print_board(engine.board());
        }
    }

    summary.print();
    Ok(())
}

/// Plays `swap` and resolves its cascade.
///
/// Returns `false` without resolving when the engine did not take the swap.
fn play(engine: &mut Engine, swap: Swap) -> Result<bool, GameError> {
    let first = engine.select(swap.a);
    let second = engine.select(swap.b);
    if !(first.is_selected() && second.is_committed()) {
        log::warn!("swap {swap} was not played: {first:?}, then {second:?}");
        engine.clear_selection();
        return Ok(false);
    }
    engine.resolve()?;
    Ok(true)
}

fn print_board(board: &Board) {
    println!("Board:");
    for line in board.to_string().lines() {
        println!("  {line}");
    }
    println!();
}

#[cfg(test)]
mod tests {
    use gemcascade_core::Position;

    use super::*;

    #[test]
    fn test_play_resolves_valid_swap() {
        let generator = BoardGenerator::with_seed(BoardSeed::from(3));
        let mut engine = Engine::new(Rules::default(), generator).unwrap();
        let swap = engine.hint().unwrap();

        assert!(play(&mut engine, swap).unwrap());
        assert!(!engine.is_processing());
        let events = engine.drain_events();
        assert!(events.iter().any(EngineEvent::is_board_stable));
    }

    #[test]
    fn test_play_skips_swap_without_match() {
        let board: Board = "RBGY GYRB RBGY GYRB".parse().unwrap();
        let generator = BoardGenerator::with_seed(BoardSeed::from(3));
        let rules = Rules::default().board_size(4);
        let mut engine = Engine::with_board(rules, generator, board.clone()).unwrap();
        let swap = Swap {
            a: Position::new(0, 0),
            b: Position::new(1, 0),
        };

        assert!(!play(&mut engine, swap).unwrap());
        assert_eq!(engine.board(), &board);
        assert_eq!(engine.selected(), None);
        assert!(!engine.is_processing());
    }

    #[test]
    fn test_play_skips_swap_of_distant_cells() {
        let generator = BoardGenerator::with_seed(BoardSeed::from(3));
        let mut engine = Engine::new(Rules::default(), generator).unwrap();
        let before = engine.snapshot();
        let swap = Swap {
            a: Position::new(0, 0),
            b: Position::new(5, 5),
        };

        assert!(!play(&mut engine, swap).unwrap());
        assert_eq!(engine.board(), &before);
        assert_eq!(engine.selected(), None);
    }
}

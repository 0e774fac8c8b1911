//! Example demonstrating initial board generation.
//!
//! This example shows how to:
//! - Create a `BoardGenerator` from a random or fixed seed
//! - Fill a board without pre-existing matches
//! - Display the board and the seed that reproduces it
//! - Sample many boards to measure how often the run-avoiding fill falls back
//!
//! # Usage
//!
//! ```sh
//! cargo run --example generate_board
//! ```
//!
//! Reproduce a board from a seed:
//!
//! ```sh
//! cargo run --example generate_board -- --seed 1234567890abcdef1234567890abcdef1234567890abcdef1234567890abcdef
//! ```
//!
//! Restrict the palette to the first `N` basic kinds and sample many boards:
//!
//! ```sh
//! cargo run --example generate_board -- --kinds 3 --samples 10000
//! ```

use std::process;

use clap::Parser;
use gemcascade_core::{Board, TileKind, matching};
use gemcascade_generator::{BoardGenerator, BoardSeed, fill_initial};
use rayon::prelude::*;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Seed as 64 hex digits. A random seed is used when omitted.
    #[arg(long, value_name = "HEX")]
    seed: Option<BoardSeed>,

    /// Board side length.
    #[arg(long, value_name = "N", default_value_t = Board::DEFAULT_SIZE)]
    size: usize,

    /// Number of basic kinds to draw from (1-6).
    #[arg(long, value_name = "N", default_value_t = TileKind::BASIC.len())]
    kinds: usize,

    /// Minimum run length that counts as a match.
    #[arg(long, value_name = "N", default_value_t = matching::MIN_MATCH_LEN)]
    min_match: usize,

    /// Number of random boards to sample instead of printing one.
    #[arg(long, value_name = "COUNT")]
    samples: Option<usize>,
}

fn main() {
    let args = Args::parse();
    if !(1..=TileKind::BASIC.len()).contains(&args.kinds) {
        eprintln!("--kinds must be between 1 and {}.", TileKind::BASIC.len());
        process::exit(2);
    }
    let palette = &TileKind::BASIC[..args.kinds];

    if let Some(samples) = args.samples {
        if samples == 0 {
            eprintln!("--samples must be at least 1.");
            process::exit(1);
        }
        let with_matches = (0..samples)
            .into_par_iter()
            .filter(|_| {
                let board = generate(palette, BoardSeed::random(), args.size, args.min_match);
                matching::has_match(&board, args.min_match)
            })
            .count();
        println!("Samples: {samples}");
        println!("Palette: {}", palette_names(palette));
        println!("Boards with pre-existing matches: {with_matches}");
        return;
    }

    let seed = args.seed.unwrap_or_else(BoardSeed::random);
    let board = generate(palette, seed, args.size, args.min_match);

    println!("Seed:");
    println!("  {seed}");
    println!();
    println!("Palette:");
    println!("  {}", palette_names(palette));
    println!();
    println!("Board:");
    for line in board.to_string().lines() {
        println!("  {line}");
    }
    println!();
    println!("Counts:");
    for &kind in palette {
        println!("  {kind}: {}", board.count_kind(kind));
    }
    println!(
        "  matches: {}",
        matching::find_matches(&board, args.min_match).len()
    );
}

fn generate(palette: &[TileKind], seed: BoardSeed, size: usize, min_len: usize) -> Board {
    let mut generator =
        BoardGenerator::with_palette(palette.iter().copied(), seed).expect("palette is non-empty");
    fill_initial(&mut generator, size, min_len)
}

fn palette_names(palette: &[TileKind]) -> String {
    palette
        .iter()
        .map(|kind| kind.name())
        .collect::<Vec<_>>()
        .join(", ")
}

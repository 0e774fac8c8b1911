use derive_more::{Display, Error};
use gemcascade_core::{Board, Position, TileKind};
use rand::{Rng as _, SeedableRng as _, seq::SliceRandom as _};
use rand_pcg::Pcg64;

use crate::{BoardSeed, TileGenerator, blocked_kinds};

/// Error returned when a generator palette is unusable.
#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
pub enum PaletteError {
    /// The palette contains no kinds.
    #[display("palette must contain at least one tile kind")]
    Empty,
}

/// Seeded random tile generator.
///
/// Draws kinds uniformly from a palette of basic kinds (all of
/// [`TileKind::BASIC`] by default) using a PCG-64 stream derived from a
/// [`BoardSeed`]. Two generators built from the same seed and palette produce
/// identical boards, refills, and shuffles.
///
/// # Examples
///
/// ```
/// use gemcascade_core::matching::MIN_MATCH_LEN;
/// use gemcascade_generator::{BoardGenerator, BoardSeed, fill_initial};
///
/// let seed = BoardSeed::from(7);
/// let a = fill_initial(&mut BoardGenerator::with_seed(seed), 8, MIN_MATCH_LEN);
/// let b = fill_initial(&mut BoardGenerator::with_seed(seed), 8, MIN_MATCH_LEN);
/// assert_eq!(a, b);
/// ```
#[derive(Debug, Clone)]
pub struct BoardGenerator {
    seed: BoardSeed,
    palette: Vec<TileKind>,
    rng: Pcg64,
}

impl BoardGenerator {
    /// Creates a generator with a fresh random seed and the full basic palette.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(BoardSeed::random())
    }

    /// Creates a generator with the given seed and the full basic palette.
    #[must_use]
    pub fn with_seed(seed: BoardSeed) -> Self {
        log::debug!("board generator seeded with {seed}");
        Self {
            seed,
            palette: TileKind::BASIC.to_vec(),
            rng: Pcg64::from_seed(seed.bytes()),
        }
    }

    /// Creates a generator drawing only from `palette`.
    ///
    /// Duplicate kinds are removed; order is kept.
    ///
    /// # Errors
    ///
    /// Returns [`PaletteError::Empty`] if `palette` has no kinds.
    pub fn with_palette<I>(palette: I, seed: BoardSeed) -> Result<Self, PaletteError>
    where
        I: IntoIterator<Item = TileKind>,
    {
        let mut kinds = Vec::new();
        for kind in palette {
            if !kinds.contains(&kind) {
                kinds.push(kind);
            }
        }
        if kinds.is_empty() {
            return Err(PaletteError::Empty);
        }
        let mut generator = Self::with_seed(seed);
        generator.palette = kinds;
        Ok(generator)
    }

    /// Returns the seed this generator started from.
    #[must_use]
    pub fn seed(&self) -> BoardSeed {
        self.seed
    }

    /// Returns the kinds this generator draws from.
    #[must_use]
    pub fn palette(&self) -> &[TileKind] {
        &self.palette
    }

    fn pick(&mut self, kinds: &[TileKind]) -> TileKind {
        kinds[self.rng.random_range(0..kinds.len())]
    }
}

impl Default for BoardGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl TileGenerator for BoardGenerator {
    fn initial_kind(&mut self, pos: Position, board: &Board, min_len: usize) -> TileKind {
        let blocked = blocked_kinds(pos, board, min_len);
        let allowed: Vec<TileKind> = self
            .palette
            .iter()
            .copied()
            .filter(|kind| !blocked.contains(kind))
            .collect();
        if allowed.is_empty() {
            log::trace!("every kind blocked at {pos}, falling back to full palette");
            let palette = self.palette.clone();
            return self.pick(&palette);
        }
        self.pick(&allowed)
    }

    fn refill_kind(&mut self, _pos: Position, _board: &Board) -> TileKind {
        let i = self.rng.random_range(0..self.palette.len());
        self.palette[i]
    }

    fn shuffle(&mut self, kinds: &mut [TileKind]) {
        kinds.shuffle(&mut self.rng);
    }
}

//! The clear, compact, refill, rescan loop that follows a committed swap.
//!
//! A cascade is advanced one phase at a time so that a presentation layer can
//! pace the steps; nothing here waits or schedules.

use derive_more::IsVariant;
use gemcascade_core::{Board, MatchGroup, Tile, TileKind, matching};
use gemcascade_generator::TileGenerator;

use crate::{EngineEvent, GameError, Rules};

/// The step a cascade will perform next.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, IsVariant)]
pub enum CascadePhase {
    /// No cascade is running; the engine accepts input.
    #[default]
    Idle,
    /// Matched tiles are about to be removed.
    Clearing,
    /// Remaining tiles are about to fall toward the gravity edge.
    Compacting,
    /// Empty cells are about to receive new tiles.
    Refilling,
    /// The board is about to be checked for chained matches.
    Rescanning,
}

#[derive(Debug, Default, Clone)]
pub(crate) struct Cascade {
    phase: CascadePhase,
    combo: u32,
    cycles: u32,
    pending: Vec<MatchGroup>,
}

impl Cascade {
    pub(crate) fn phase(&self) -> CascadePhase {
        self.phase
    }

    pub(crate) fn combo(&self) -> u32 {
        self.combo
    }

    /// Starts a cascade for the groups created by a swap.
    pub(crate) fn begin(&mut self, groups: Vec<MatchGroup>, events: &mut Vec<EngineEvent>) {
        debug_assert!(self.phase.is_idle());
        self.combo = 1;
        self.cycles = 1;
        self.pending = groups;
        self.phase = CascadePhase::Clearing;
        events.push(EngineEvent::ComboChanged(self.combo));
    }

    /// Drops any running cascade, reporting the combo reset if there was one.
    pub(crate) fn abort(&mut self, events: &mut Vec<EngineEvent>) {
        let combo = self.combo;
        *self = Self::default();
        if combo != 0 {
            events.push(EngineEvent::ComboChanged(0));
        }
    }

    /// Performs the current phase and returns the phase that follows.
    pub(crate) fn step<G>(
        &mut self,
        board: &mut Board,
        generator: &mut G,
        rules: &Rules,
        events: &mut Vec<EngineEvent>,
    ) -> Result<CascadePhase, GameError>
    where
        G: TileGenerator + ?Sized,
    {
        self.phase = match self.phase {
            CascadePhase::Idle => CascadePhase::Idle,
            CascadePhase::Clearing => {
                let groups = std::mem::take(&mut self.pending);
                let cleared = clear(board, &groups);
                events.push(EngineEvent::MatchFound(groups));
                events.extend(
                    cleared
                        .into_iter()
                        .map(|(kind, count)| EngineEvent::GemsCleared { kind, count }),
                );
                CascadePhase::Compacting
            }
            CascadePhase::Compacting => {
                let falls = board.compact(rules.gravity);
                log::trace!("{} tiles fell", falls.len());
                events.push(EngineEvent::Compacted(falls));
                CascadePhase::Refilling
            }
            CascadePhase::Refilling => {
                let tiles = refill(board, generator);
                log::trace!("{} tiles refilled", tiles.len());
                events.push(EngineEvent::Refilled(tiles));
                CascadePhase::Rescanning
            }
            CascadePhase::Rescanning => {
                let groups = matching::find_matches(board, rules.min_match_len);
                if groups.is_empty() {
                    log::debug!("cascade settled with combo {}", self.combo);
                    events.push(EngineEvent::BoardStable { combo: self.combo });
                    self.combo = 0;
                    self.cycles = 0;
                    events.push(EngineEvent::ComboChanged(0));
                    CascadePhase::Idle
                } else if self.cycles >= rules.max_cascade_cycles {
                    log::warn!(
                        "cascade still matching after {} cycles, giving up",
                        self.cycles
                    );
                    self.abort(events);
                    return Err(GameError::CascadeLimitExceeded {
                        limit: rules.max_cascade_cycles,
                    });
                } else {
                    self.combo += 1;
                    self.cycles += 1;
                    log::debug!("chain continues, combo {}", self.combo);
                    events.push(EngineEvent::ComboChanged(self.combo));
                    self.pending = groups;
                    CascadePhase::Clearing
                }
            }
        };
        Ok(self.phase)
    }
}

/// Removes every matched cell once and counts the removed tiles per kind.
///
/// Counts are listed in catalog order and omit kinds that were not cleared.
fn clear(board: &mut Board, groups: &[MatchGroup]) -> Vec<(TileKind, usize)> {
    let mut counts = [0_usize; TileKind::ALL.len()];
    for pos in matching::matched_positions(groups) {
        if let Some(kind) = board.take(pos) {
            counts[kind.index()] += 1;
        }
    }
    TileKind::ALL
        .into_iter()
        .filter_map(|kind| {
            let count = counts[kind.index()];
            (count > 0).then_some((kind, count))
        })
        .inspect(|(kind, count)| log::debug!("cleared {count} {kind}"))
        .collect()
}

/// Fills empty cells in row-major order.
///
/// Each new tile is placed before the next kind is drawn, so the generator
/// sees earlier refills.
fn refill<G>(board: &mut Board, generator: &mut G) -> Vec<Tile>
where
    G: TileGenerator + ?Sized,
{
    let mut tiles = Vec::new();
    for pos in board.positions() {
        if board.get(pos).is_some() {
            continue;
        }
        let kind = generator.refill_kind(pos, board);
        board.set(pos, Some(kind));
        tiles.push(Tile::new(kind, pos));
    }
    tiles
}

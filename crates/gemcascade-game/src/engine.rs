use gemcascade_core::{Board, Position, matching};
use gemcascade_generator::{BoardGenerator, TileGenerator, fill_initial};

use crate::{
    CascadePhase, EngineEvent, GameError, Rules, SelectOutcome, Selection,
    cascade::Cascade,
    moves::{self, Swap},
    selection::Step,
};

/// A match-3 board together with the rules and tile source that drive it.
///
/// The engine owns all game state. Callers feed it cell selections, advance
/// cascades at their own pace, and read back what happened through
/// [`Engine::drain_events`].
///
/// Events accumulate until drained, so long-running callers should drain
/// them after every input or step.
///
/// # Example
///
/// ```
/// use gemcascade_game::{Engine, Rules};
/// use gemcascade_generator::{BoardGenerator, BoardSeed};
///
/// let mut engine = Engine::new(Rules::default(), BoardGenerator::with_seed(BoardSeed::from(3)))?;
///
/// let swap = engine.hint().expect("fresh boards are playable");
/// assert!(engine.select_cell(swap.a));
/// assert!(engine.select_cell(swap.b));
/// assert!(engine.is_processing());
///
/// engine.resolve()?;
/// assert!(!engine.is_processing());
/// assert!(engine.board().is_full());
/// # Ok::<(), gemcascade_game::GameError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Engine<G = BoardGenerator> {
    rules: Rules,
    generator: G,
    board: Board,
    selection: Selection,
    cascade: Cascade,
    events: Vec<EngineEvent>,
}

impl<G> Engine<G>
where
    G: TileGenerator,
{
    /// Creates an engine with a freshly generated board.
    ///
    /// The board has no matches and, when [`Rules::auto_shuffle`] is set, at
    /// least one valid move.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidRules`] for unplayable rules and
    /// [`GameError::ShuffleExhausted`] if no playable board could be produced.
    pub fn new(rules: Rules, generator: G) -> Result<Self, GameError> {
        rules.validate()?;
        let mut engine = Self {
            rules,
            generator,
            board: Board::new(rules.board_size),
            selection: Selection::None,
            cascade: Cascade::default(),
            events: Vec::new(),
        };
        engine.board = engine.generate_board()?;
        Ok(engine)
    }

    /// Creates an engine around an existing board.
    ///
    /// The board is used as given, even if it contains matches or no valid
    /// move.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidRules`] for unplayable rules,
    /// [`GameError::BoardSizeMismatch`] if the board size differs from
    /// [`Rules::board_size`], and [`GameError::IncompleteBoard`] if any cell is
    /// empty.
    pub fn with_board(rules: Rules, generator: G, board: Board) -> Result<Self, GameError> {
        rules.validate()?;
        if board.size() != rules.board_size {
            return Err(GameError::BoardSizeMismatch {
                expected: rules.board_size,
                actual: board.size(),
            });
        }
        if !board.is_full() {
            return Err(GameError::IncompleteBoard);
        }
        Ok(Self {
            rules,
            generator,
            board,
            selection: Selection::None,
            cascade: Cascade::default(),
            events: Vec::new(),
        })
    }

    /// Returns the rules this engine plays by.
    #[must_use]
    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    /// Returns the tile source.
    #[must_use]
    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// Returns the current board.
    ///
    /// While a cascade is in progress the board may contain empty cells.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns a copy of the current board.
    #[must_use]
    pub fn snapshot(&self) -> Board {
        self.board.clone()
    }

    /// Returns the combo of the running cascade, or 0 when idle.
    #[must_use]
    pub fn combo(&self) -> u32 {
        self.cascade.combo()
    }

    /// Returns the step the running cascade will perform next.
    #[must_use]
    pub fn phase(&self) -> CascadePhase {
        self.cascade.phase()
    }

    /// Returns `true` while a cascade is in progress.
    ///
    /// Selections are rejected until it finishes.
    #[must_use]
    pub fn is_processing(&self) -> bool {
        !self.cascade.phase().is_idle()
    }

    /// Returns the cell waiting for a swap partner, if any.
    #[must_use]
    pub fn selected(&self) -> Option<Position> {
        self.selection.position()
    }

    /// Returns `true` if some adjacent swap on the current board produces a
    /// match.
    #[must_use]
    pub fn has_valid_move(&self) -> bool {
        moves::has_valid_move(&self.board, self.rules.min_match_len)
    }

    /// Suggests a swap that produces a match.
    #[must_use]
    pub fn hint(&self) -> Option<Swap> {
        moves::valid_moves(&self.board, self.rules.min_match_len)
            .into_iter()
            .next()
    }

    /// Takes every event queued since the last call, oldest first.
    pub fn drain_events(&mut self) -> Vec<EngineEvent> {
        std::mem::take(&mut self.events)
    }

    /// Selects a cell, returning whether the input was accepted.
    ///
    /// See [`Engine::select`] for the outcomes.
    pub fn select_cell(&mut self, pos: Position) -> bool {
        self.select(pos).is_accepted()
    }

    /// Selects a cell.
    ///
    /// - With nothing selected, `pos` becomes the selection.
    /// - Selecting the selected cell again drops it.
    /// - Selecting a non-adjacent cell moves the selection there.
    /// - Selecting an adjacent cell swaps the two tiles. If the swap makes a
    ///   match a cascade starts, to be driven by [`Engine::advance`] or
    ///   [`Engine::resolve`]; otherwise the swap is undone.
    ///
    /// Cells outside the board, and any selection while a cascade is in
    /// progress, are rejected without changing state or emitting events.
    pub fn select(&mut self, pos: Position) -> SelectOutcome {
        if self.is_processing() {
            log::trace!("selection {pos} ignored: cascade in progress");
            return SelectOutcome::Rejected;
        }
        if !self.board.contains(pos) {
            log::trace!("selection {pos} ignored: outside the board");
            return SelectOutcome::Rejected;
        }

        match self.selection.step(pos) {
            Step::Select => {
                self.events.push(EngineEvent::Selected(pos));
                SelectOutcome::Selected
            }
            Step::Deselect(prev) => {
                self.events.push(EngineEvent::Deselected(prev));
                SelectOutcome::Deselected
            }
            Step::Reselect(prev) => {
                self.events.push(EngineEvent::Deselected(prev));
                self.events.push(EngineEvent::Selected(pos));
                SelectOutcome::Reselected
            }
            Step::Commit(first) => self.try_swap(first, pos),
        }
    }

    fn try_swap(&mut self, a: Position, b: Position) -> SelectOutcome {
        self.board.swap(a, b);
        self.events.push(EngineEvent::Swapped { a, b });

        let groups = matching::find_matches(&self.board, self.rules.min_match_len);
        if groups.is_empty() {
            self.board.swap(a, b);
            log::debug!("swap {a} <-> {b} made no match, reverted");
            self.events.push(EngineEvent::SwapReverted { a, b });
            return SelectOutcome::Reverted;
        }

        log::debug!("swap {a} <-> {b} made {} matches", groups.len());
        self.cascade.begin(groups, &mut self.events);
        SelectOutcome::Committed
    }

    /// Drops the current selection, if any.
    pub fn clear_selection(&mut self) {
        if let Some(pos) = self.selection.position() {
            self.selection = Selection::None;
            self.events.push(EngineEvent::Deselected(pos));
        }
    }

    /// Performs one cascade step and returns the phase that follows.
    ///
    /// Does nothing when idle. When the step settles the board and
    /// [`Rules::auto_shuffle`] is set, a stuck board is reshuffled before
    /// returning.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::CascadeLimitExceeded`] if the cascade keeps
    /// matching past [`Rules::max_cascade_cycles`]; the cascade is abandoned
    /// and the engine becomes idle with the board as it stands. Returns
    /// [`GameError::ShuffleExhausted`] if a stuck board could not be
    /// reshuffled; the settled board is then kept unchanged.
    pub fn advance(&mut self) -> Result<CascadePhase, GameError> {
        if !self.is_processing() {
            return Ok(CascadePhase::Idle);
        }
        let phase = self.cascade.step(
            &mut self.board,
            &mut self.generator,
            &self.rules,
            &mut self.events,
        )?;
        if phase.is_idle() && self.rules.auto_shuffle && !self.has_valid_move() {
            log::warn!("board is stuck after cascade, shuffling");
            self.shuffle()?;
        }
        Ok(phase)
    }

    /// Advances the running cascade until the engine is idle.
    ///
    /// # Errors
    ///
    /// Same as [`Engine::advance`].
    pub fn resolve(&mut self) -> Result<(), GameError> {
        while self.is_processing() {
            self.advance()?;
        }
        Ok(())
    }

    /// Replaces the board with a freshly generated one.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Busy`] during a cascade and
    /// [`GameError::ShuffleExhausted`] if no playable board could be produced;
    /// the current board and selection are then kept.
    pub fn reset_board(&mut self) -> Result<(), GameError> {
        if self.is_processing() {
            return Err(GameError::Busy);
        }
        self.board = self.generate_board()?;
        self.clear_selection();
        self.events.push(EngineEvent::BoardReset);
        log::debug!("board reset");
        Ok(())
    }

    /// Rearranges the current tiles into a playable board.
    ///
    /// Returns the number of shuffles used.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Busy`] during a cascade and
    /// [`GameError::ShuffleExhausted`] if no playable arrangement was found;
    /// the tiles are then left where they were.
    pub fn force_shuffle(&mut self) -> Result<u32, GameError> {
        if self.is_processing() {
            return Err(GameError::Busy);
        }
        self.clear_selection();
        self.shuffle()
    }

    fn shuffle(&mut self) -> Result<u32, GameError> {
        let attempts = moves::shuffle_board(
            &mut self.board,
            &mut self.generator,
            self.rules.min_match_len,
            self.rules.max_shuffle_attempts,
        )?;
        self.events.push(EngineEvent::BoardShuffled { attempts });
        Ok(attempts)
    }

    /// Builds a playable board without touching the current one.
    fn generate_board(&mut self) -> Result<Board, GameError> {
        let Rules {
            board_size,
            min_match_len,
            auto_shuffle,
            max_shuffle_attempts,
            ..
        } = self.rules;
        let mut board = fill_initial(&mut self.generator, board_size, min_match_len);
        let needs_shuffle = matching::has_match(&board, min_match_len)
            || (auto_shuffle && !moves::has_valid_move(&board, min_match_len));
        if needs_shuffle {
            log::debug!("generated board is not playable, shuffling");
            moves::shuffle_board(
                &mut board,
                &mut self.generator,
                min_match_len,
                max_shuffle_attempts,
            )?;
        }
        Ok(board)
    }
}

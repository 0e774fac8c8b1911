use derive_more::{Display, Error, IsVariant};

/// Errors reported by the game engine.
///
/// Ordinary player input never produces an error: out-of-bounds or busy-state
/// selections are simply rejected. These variants describe configurations that
/// cannot be played and tile sources that misbehave.
#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq, IsVariant)]
pub enum GameError {
    /// The rules cannot describe a playable game.
    #[display("invalid rules: {reason}")]
    InvalidRules {
        /// What is wrong with the rules.
        reason: &'static str,
    },
    /// A supplied board does not have the size the rules require.
    #[display("board is {actual}x{actual}, rules require {expected}x{expected}")]
    BoardSizeMismatch {
        /// Size required by the rules.
        expected: usize,
        /// Size of the supplied board.
        actual: usize,
    },
    /// A supplied board has empty cells.
    #[display("board has empty cells")]
    IncompleteBoard,
    /// No shuffle produced a match-free board with a valid move.
    ///
    /// Usually means the palette has too few kinds for the board size.
    #[display("no playable arrangement found after {attempts} shuffles")]
    ShuffleExhausted {
        /// Number of shuffles tried.
        attempts: u32,
    },
    /// A cascade kept finding matches past the configured cycle limit.
    #[display("cascade did not settle within {limit} cycles")]
    CascadeLimitExceeded {
        /// The configured limit.
        limit: u32,
    },
    /// The operation needs an idle engine, but a cascade is in progress.
    #[display("a cascade is in progress")]
    Busy,
}

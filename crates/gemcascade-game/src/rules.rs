use gemcascade_core::{Board, Gravity, matching::MIN_MATCH_LEN};

use crate::GameError;

/// Tunable parameters of an [`Engine`](crate::Engine).
///
/// Built with chained setters on top of [`Rules::default`], which describes
/// the standard 8×8 game with matches of three.
///
/// # Example
///
/// ```
/// use gemcascade_core::Gravity;
/// use gemcascade_game::Rules;
///
/// let rules = Rules::default()
///     .board_size(6)
///     .gravity(Gravity::Up)
///     .auto_shuffle(false);
/// assert_eq!(rules.board_size, 6);
/// assert_eq!(rules.min_match_len, 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rules {
    /// Side length of the square board.
    pub board_size: usize,
    /// Minimum run length that counts as a match.
    pub min_match_len: usize,
    /// Edge that tiles fall toward after a clear.
    pub gravity: Gravity,
    /// Upper bound on clear/refill cycles triggered by one swap.
    ///
    /// Reaching it means the tile source keeps recreating matches, which is
    /// reported as [`GameError::CascadeLimitExceeded`].
    pub max_cascade_cycles: u32,
    /// Number of shuffles tried before giving up on a stuck board.
    pub max_shuffle_attempts: u32,
    /// Whether a stuck board is reshuffled automatically once a cascade settles.
    pub auto_shuffle: bool,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            board_size: Board::DEFAULT_SIZE,
            min_match_len: MIN_MATCH_LEN,
            gravity: Gravity::Down,
            max_cascade_cycles: 64,
            max_shuffle_attempts: 100,
            auto_shuffle: true,
        }
    }
}

impl Rules {
    /// Sets [`Rules::board_size`].
    #[must_use]
    pub fn board_size(mut self, board_size: usize) -> Self {
        self.board_size = board_size;
        self
    }

    /// Sets [`Rules::min_match_len`].
    #[must_use]
    pub fn min_match_len(mut self, min_match_len: usize) -> Self {
        self.min_match_len = min_match_len;
        self
    }

    /// Sets [`Rules::gravity`].
    #[must_use]
    pub fn gravity(mut self, gravity: Gravity) -> Self {
        self.gravity = gravity;
        self
    }

    /// Sets [`Rules::max_cascade_cycles`].
    #[must_use]
    pub fn max_cascade_cycles(mut self, max_cascade_cycles: u32) -> Self {
        self.max_cascade_cycles = max_cascade_cycles;
        self
    }

    /// Sets [`Rules::max_shuffle_attempts`].
    #[must_use]
    pub fn max_shuffle_attempts(mut self, max_shuffle_attempts: u32) -> Self {
        self.max_shuffle_attempts = max_shuffle_attempts;
        self
    }

    /// Sets [`Rules::auto_shuffle`].
    #[must_use]
    pub fn auto_shuffle(mut self, auto_shuffle: bool) -> Self {
        self.auto_shuffle = auto_shuffle;
        self
    }

    /// Checks that the rules describe a playable game.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidRules`] if the board is smaller than 2×2, the
    /// minimum match length is below 2 or longer than a row, or either retry
    /// bound is zero.
    pub fn validate(&self) -> Result<(), GameError> {
        let reason = if self.board_size < 2 {
            "board must be at least 2x2"
        } else if self.min_match_len < 2 {
            "minimum match length must be at least 2"
        } else if self.min_match_len > self.board_size {
            "minimum match length exceeds board size"
        } else if self.max_cascade_cycles == 0 {
            "cascade cycle limit must be positive"
        } else if self.max_shuffle_attempts == 0 {
            "shuffle attempt limit must be positive"
        } else {
            return Ok(());
        };
        Err(GameError::InvalidRules { reason })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rules_are_valid() {
        assert!(Rules::default().validate().is_ok());
    }

    #[test]
    fn test_invalid_rules_are_rejected() {
        for rules in [
            Rules::default().board_size(1),
            Rules::default().min_match_len(1),
            Rules::default().board_size(4).min_match_len(5),
            Rules::default().max_cascade_cycles(0),
            Rules::default().max_shuffle_attempts(0),
        ] {
            assert!(
                matches!(rules.validate(), Err(GameError::InvalidRules { .. })),
                "{rules:?} should be rejected"
            );
        }
    }
}

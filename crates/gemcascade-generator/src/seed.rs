use std::{
    fmt::{self, Display},
    str::FromStr,
};

use derive_more::{Display, Error};
use rand::Rng as _;

/// Seed that fully determines a [`BoardGenerator`](crate::BoardGenerator) sequence.
///
/// Seeds print as 64 lowercase hexadecimal digits and parse back from the same
/// form, so a board can be reproduced from a logged seed.
///
/// # Examples
///
/// ```
/// use gemcascade_generator::BoardSeed;
///
/// let seed: BoardSeed = "c1d44bd6afaf8af64f126546884e19298acbdc33c3924a28136715de946ef3f1"
///     .parse()?;
/// assert_eq!(
///     seed.to_string(),
///     "c1d44bd6afaf8af64f126546884e19298acbdc33c3924a28136715de946ef3f1"
/// );
/// # Ok::<(), gemcascade_generator::SeedParseError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoardSeed([u8; 32]);

impl BoardSeed {
    /// Draws a fresh seed from the thread-local RNG.
    #[must_use]
    pub fn random() -> Self {
        let mut bytes = [0; 32];
        rand::rng().fill(&mut bytes);
        Self(bytes)
    }

    /// Returns the raw seed bytes.
    #[must_use]
    pub const fn bytes(&self) -> [u8; 32] {
        self.0
    }
}

impl From<[u8; 32]> for BoardSeed {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl From<u64> for BoardSeed {
    /// Expands a small integer into a seed, for tests and command lines.
    fn from(value: u64) -> Self {
        let mut bytes = [0; 32];
        bytes[..8].copy_from_slice(&value.to_le_bytes());
        Self(bytes)
    }
}

impl Display for BoardSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

/// Error returned when parsing a [`BoardSeed`] fails.
#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
pub enum SeedParseError {
    /// The input is not exactly 64 characters long.
    #[display("seed must be 64 hex digits, got {len}")]
    InvalidLength {
        /// Number of characters found.
        len: usize,
    },
    /// The input contains a non-hexadecimal character.
    #[display("invalid hex digit {ch:?} at index {index}")]
    InvalidDigit {
        /// The offending character.
        ch: char,
        /// Character index in the input.
        index: usize,
    },
}

impl FromStr for BoardSeed {
    type Err = SeedParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let len = s.chars().count();
        if len != 64 {
            return Err(SeedParseError::InvalidLength { len });
        }

        let mut bytes = [0; 32];
        let mut chars = s.chars().enumerate();
        for byte in &mut bytes {
            let mut nibble = || {
                let (index, ch) = chars.next().ok_or(SeedParseError::InvalidLength { len })?;
                ch.to_digit(16)
                    .ok_or(SeedParseError::InvalidDigit { ch, index })
            };
            let hi = nibble()?;
            let lo = nibble()?;
            #[expect(clippy::cast_possible_truncation)]
            let value = ((hi << 4) | lo) as u8;
            *byte = value;
        }
        Ok(Self(bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_parse_roundtrip() {
        let seed = BoardSeed::random();
        let parsed: BoardSeed = seed.to_string().parse().unwrap();
        assert_eq!(parsed, seed);
    }

    #[test]
    fn test_parse_accepts_uppercase() {
        let lower = "1234567890abcdef1234567890abcdef1234567890abcdef1234567890abcdef";
        let a: BoardSeed = lower.parse().unwrap();
        let b: BoardSeed = lower.to_uppercase().parse().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            "abcd".parse::<BoardSeed>(),
            Err(SeedParseError::InvalidLength { len: 4 })
        );
        let bad = format!("{}g", "0".repeat(63));
        assert_eq!(
            bad.parse::<BoardSeed>(),
            Err(SeedParseError::InvalidDigit { ch: 'g', index: 63 })
        );
    }

    #[test]
    fn test_from_u64_is_stable() {
        assert_eq!(
            BoardSeed::from(1).to_string(),
            format!("01{}", "0".repeat(62))
        );
    }
}

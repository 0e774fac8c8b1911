//! Tile kinds and tile values.

use std::fmt::{self, Display};

use crate::Position;

/// The kind of a tile (gem) on the board.
///
/// Kinds are split into basic kinds, which make up the bulk of every board and
/// are the only kinds placed by random generation, and special kinds, which are
/// only ever placed by callers (e.g. as a reward for a large run).
///
/// Matching compares kinds by plain equality. A special kind matches only
/// itself, exactly like a basic kind does.
///
/// # Examples
///
/// ```
/// use gemcascade_core::TileKind;
///
/// assert_eq!(TileKind::BASIC.len(), 6);
/// assert!(!TileKind::Red.is_special());
/// assert!(TileKind::Rainbow.is_special());
///
/// assert_eq!(TileKind::from_symbol('G'), Some(TileKind::Green));
/// assert_eq!(TileKind::Green.symbol(), 'G');
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TileKind {
    /// Red ruby.
    Red,
    /// Blue sapphire.
    Blue,
    /// Green emerald.
    Green,
    /// Purple amethyst.
    Purple,
    /// Yellow topaz.
    Yellow,
    /// White pearl.
    White,
    /// Bomb (special).
    Bomb,
    /// Lightning (special).
    Lightning,
    /// Rainbow stone (special).
    Rainbow,
}

impl TileKind {
    /// Basic kinds, in catalog order.
    pub const BASIC: [Self; 6] = [
        Self::Red,
        Self::Blue,
        Self::Green,
        Self::Purple,
        Self::Yellow,
        Self::White,
    ];

    /// Special kinds, in catalog order.
    pub const SPECIAL: [Self; 3] = [Self::Bomb, Self::Lightning, Self::Rainbow];

    /// Every kind, basic kinds first.
    pub const ALL: [Self; 9] = [
        Self::Red,
        Self::Blue,
        Self::Green,
        Self::Purple,
        Self::Yellow,
        Self::White,
        Self::Bomb,
        Self::Lightning,
        Self::Rainbow,
    ];

    /// Returns `true` for kinds that random generation never places.
    #[must_use]
    pub const fn is_special(self) -> bool {
        matches!(self, Self::Bomb | Self::Lightning | Self::Rainbow)
    }

    /// Returns the human-readable name of this kind.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Red => "ruby",
            Self::Blue => "sapphire",
            Self::Green => "emerald",
            Self::Purple => "amethyst",
            Self::Yellow => "topaz",
            Self::White => "pearl",
            Self::Bomb => "bomb",
            Self::Lightning => "lightning",
            Self::Rainbow => "rainbow stone",
        }
    }

    /// Returns the single-character symbol used by the board text format.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Red => 'R',
            Self::Blue => 'B',
            Self::Green => 'G',
            Self::Purple => 'P',
            Self::Yellow => 'Y',
            Self::White => 'W',
            Self::Bomb => '*',
            Self::Lightning => '!',
            Self::Rainbow => '@',
        }
    }

    /// Parses a symbol produced by [`TileKind::symbol`].
    ///
    /// Letters are accepted in either case.
    #[must_use]
    pub fn from_symbol(symbol: char) -> Option<Self> {
        let kind = match symbol.to_ascii_uppercase() {
            'R' => Self::Red,
            'B' => Self::Blue,
            'G' => Self::Green,
            'P' => Self::Purple,
            'Y' => Self::Yellow,
            'W' => Self::White,
            '*' => Self::Bomb,
            '!' => Self::Lightning,
            '@' => Self::Rainbow,
            _ => return None,
        };
        Some(kind)
    }

    /// Returns the position of this kind in [`TileKind::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl Display for TileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A tile as seen at one board cell.
///
/// Tiles are plain values: the board stores kinds, and a `Tile` is produced on
/// demand together with the position it was read from. Moving a tile means
/// writing its kind to another cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tile {
    /// Kind of the tile.
    pub kind: TileKind,
    /// Cell the tile occupies.
    pub position: Position,
}

impl Tile {
    /// Creates a tile value.
    #[must_use]
    pub const fn new(kind: TileKind, position: Position) -> Self {
        Self { kind, position }
    }
}

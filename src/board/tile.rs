//! Tile kinds and occupant lists.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::PlayerId;
use crate::rules::PowerUp;

/// What a tile does to tokens that land on it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileKind {
    /// Landing here captures opponents.
    #[default]
    Normal,
    /// Nobody is captured here. Landing grants the SafeZone power-up.
    SafeZone,
    /// Landing captures opponents and grants an extra roll.
    DoubleRoll,
}

impl TileKind {
    /// Power-up granted by landing here with an advance move.
    #[must_use]
    pub const fn power_up(self) -> Option<PowerUp> {
        match self {
            TileKind::Normal => None,
            TileKind::SafeZone => Some(PowerUp::SafeZone),
            TileKind::DoubleRoll => Some(PowerUp::DoubleRoll),
        }
    }

    /// Whether arriving tokens capture the current occupants.
    #[must_use]
    pub const fn captures(self) -> bool {
        !matches!(self, TileKind::SafeZone)
    }
}

impl std::fmt::Display for TileKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TileKind::Normal => "normal",
            TileKind::SafeZone => "safe zone",
            TileKind::DoubleRoll => "double roll",
        };
        f.write_str(name)
    }
}

/// A specific token: owner plus token index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TokenRef {
    pub player: PlayerId,
    pub token: u8,
}

impl TokenRef {
    #[must_use]
    pub const fn new(player: PlayerId, token: u8) -> Self {
        Self { player, token }
    }
}

/// Tokens standing on one tile. Order carries no meaning.
pub type Occupants = SmallVec<[TokenRef; 4]>;

/// Read-only view of one tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tile<'a> {
    pub kind: TileKind,
    pub occupants: &'a [TokenRef],
}

impl Tile<'_> {
    /// Whether the given token stands here.
    #[must_use]
    pub fn contains(&self, token: TokenRef) -> bool {
        self.occupants.contains(&token)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.occupants.is_empty()
    }
}

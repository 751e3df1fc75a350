//! Board constants and game configuration.
//!
//! The board topology is fixed: five players, 40 tiles per path, three
//! tokens each. `GameConfig` only carries the knobs that vary between
//! games (seed, starting seat).

use serde::{Deserialize, Serialize};

use super::PlayerId;

/// Seats at the table.
pub const PLAYER_COUNT: usize = 5;

/// Tiles on each player's path.
pub const PATH_LENGTH: usize = 40;

/// Tokens owned by each player.
pub const TOKENS_PER_PLAYER: usize = 3;

/// Finished tokens needed to win.
pub const TOKENS_TO_WIN: u8 = 2;

/// A move whose destination reaches this index finishes the token.
///
/// One short of `PATH_LENGTH`: a token on tile 38 finishes with a 1.
pub const FINISH_THRESHOLD: usize = PATH_LENGTH - 1;

/// Faces on the die.
pub const DIE_FACES: u8 = 6;

/// The only roll that lets a token leave base.
pub const ENTRY_ROLL: u8 = 6;

/// Path indices that are always safe.
pub const SAFE_TILES: [usize; 5] = [0, 8, 16, 24, 32];

/// Path indices whose kind is drawn at board creation (SafeZone or DoubleRoll).
pub const INTERSECTION_TILES: [usize; 5] = [5, 13, 21, 29, 37];

/// Score weight of a finished token.
pub const HOME_TOKEN_SCORE: i32 = 10;

/// Per-game configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Seed for dice and tile-kind generation.
    pub seed: u64,

    /// Seat that takes the first turn.
    pub first_player: PlayerId,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            first_player: PlayerId::new(0),
        }
    }
}

impl GameConfig {
    /// Create a configuration with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    /// Set the seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the seat that moves first.
    #[must_use]
    pub fn with_first_player(mut self, player: PlayerId) -> Self {
        assert!(player.is_seated(), "First player must be seated at the table");
        self.first_player = player;
        self
    }
}

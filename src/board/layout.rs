//! Static tile kinds for every player's path.

use serde::{Deserialize, Serialize};

use super::tile::TileKind;
use crate::core::{GameRng, PlayerId, PlayerMap, INTERSECTION_TILES, PATH_LENGTH, SAFE_TILES};

/// Tile kinds of all five paths.
///
/// Built once per game and never modified; engines and their search clones
/// share one layout behind an `Arc`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardLayout {
    kinds: PlayerMap<Vec<TileKind>>,
}

impl BoardLayout {
    /// Draw a layout. Each player's intersection tiles are independently
    /// SafeZone or DoubleRoll with equal odds.
    #[must_use]
    pub fn generate(rng: &mut GameRng) -> Self {
        let mut kinds = PlayerMap::new(|_| Self::fixed_path());
        for (_, path) in kinds.iter_mut() {
            for &index in &INTERSECTION_TILES {
                path[index] = if rng.gen_bool(0.5) {
                    TileKind::DoubleRoll
                } else {
                    TileKind::SafeZone
                };
            }
        }
        Self { kinds }
    }

    /// A layout where every intersection tile has the same kind.
    ///
    /// Removes the coin flips when a test needs to know what a tile does.
    #[must_use]
    pub fn with_intersections(kind: TileKind) -> Self {
        let mut path = Self::fixed_path();
        for &index in &INTERSECTION_TILES {
            path[index] = kind;
        }
        Self {
            kinds: PlayerMap::with_value(path),
        }
    }

    /// Kind of one tile. Out-of-range indices read as `Normal`.
    #[must_use]
    pub fn kind(&self, player: PlayerId, index: usize) -> TileKind {
        self.kinds
            .get(player)
            .and_then(|path| path.get(index))
            .copied()
            .unwrap_or_default()
    }

    /// One player's full path.
    #[must_use]
    pub fn path(&self, player: PlayerId) -> &[TileKind] {
        self.kinds.get(player).map(Vec::as_slice).unwrap_or(&[])
    }

    fn fixed_path() -> Vec<TileKind> {
        let mut path = vec![TileKind::Normal; PATH_LENGTH];
        for &index in &SAFE_TILES {
            path[index] = TileKind::SafeZone;
        }
        path
    }
}

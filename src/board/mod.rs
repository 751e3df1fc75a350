//! Board model: five private paths of 40 tiles.
//!
//! Tile kinds live in a shared, immutable `BoardLayout`. Occupancy lives in
//! persistent vectors (`im::Vector`), so cloning a `Board` for a search
//! branch costs a handful of reference-count bumps and later writes copy
//! only the touched chunk.
//!
//! A token's position is always read against its owner's path: player 2's
//! token on tile 5 is an occupant of `path(2)[5]` and nowhere else.

mod layout;
mod tile;

pub use layout::BoardLayout;
pub use tile::{Occupants, Tile, TileKind, TokenRef};

use std::sync::Arc;

use im::Vector;

use crate::core::{PlayerId, PlayerMap, PlayerState, PATH_LENGTH};

/// Tile kinds plus who stands where.
#[derive(Clone, Debug)]
pub struct Board {
    layout: Arc<BoardLayout>,
    paths: PlayerMap<Vector<Occupants>>,
}

impl Board {
    /// An empty board over the given layout.
    #[must_use]
    pub fn new(layout: Arc<BoardLayout>) -> Self {
        Self {
            layout,
            paths: PlayerMap::new(|_| Self::empty_path()),
        }
    }

    /// The shared tile kinds.
    #[must_use]
    pub fn layout(&self) -> &Arc<BoardLayout> {
        &self.layout
    }

    /// Kind of one tile on a player's path.
    #[must_use]
    pub fn kind(&self, player: PlayerId, index: usize) -> TileKind {
        self.layout.kind(player, index)
    }

    /// View of one tile, or `None` if the player or index is out of range.
    #[must_use]
    pub fn tile(&self, player: PlayerId, index: usize) -> Option<Tile<'_>> {
        let occupants = self.paths.get(player)?.get(index)?;
        Some(Tile {
            kind: self.layout.kind(player, index),
            occupants: occupants.as_slice(),
        })
    }

    /// Occupants of one tile. Empty for out-of-range coordinates.
    #[must_use]
    pub fn occupants(&self, player: PlayerId, index: usize) -> &[TokenRef] {
        self.paths
            .get(player)
            .and_then(|path| path.get(index))
            .map(|occupants| occupants.as_slice())
            .unwrap_or(&[])
    }

    /// Every tile of a player's path, in order.
    pub fn tiles(&self, player: PlayerId) -> impl Iterator<Item = Tile<'_>> + '_ {
        (0..PATH_LENGTH).filter_map(move |index| self.tile(player, index))
    }

    /// Whether `token` is registered on the given tile.
    #[must_use]
    pub fn contains(&self, player: PlayerId, index: usize, token: TokenRef) -> bool {
        self.occupants(player, index).contains(&token)
    }

    /// Register a token on a tile. Registering twice is a no-op.
    pub(crate) fn place(&mut self, player: PlayerId, index: usize, token: TokenRef) {
        if let Some(occupants) = self.slot_mut(player, index) {
            if !occupants.contains(&token) {
                occupants.push(token);
            }
        }
    }

    /// Unregister a token from a tile. Returns whether it was there.
    pub(crate) fn lift(&mut self, player: PlayerId, index: usize, token: TokenRef) -> bool {
        let Some(occupants) = self.slot_mut(player, index) else {
            return false;
        };
        match occupants.iter().position(|t| *t == token) {
            Some(at) => {
                occupants.swap_remove(at);
                true
            }
            None => false,
        }
    }

    /// Empty a tile, returning whoever stood there.
    pub(crate) fn clear_tile(&mut self, player: PlayerId, index: usize) -> Occupants {
        self.slot_mut(player, index)
            .map(std::mem::take)
            .unwrap_or_default()
    }

    /// Drop all occupancy and re-register every on-path token from its
    /// position field.
    pub(crate) fn rebuild(&mut self, players: &PlayerMap<PlayerState>) {
        self.paths = PlayerMap::new(|_| Self::empty_path());
        for (player, state) in players.iter() {
            for (token, index) in state.on_path() {
                self.place(player, index, TokenRef::new(player, token));
            }
        }
    }

    fn slot_mut(&mut self, player: PlayerId, index: usize) -> Option<&mut Occupants> {
        self.paths.get_mut(player)?.get_mut(index)
    }

    fn empty_path() -> Vector<Occupants> {
        Vector::from(vec![Occupants::new(); PATH_LENGTH])
    }
}

//! Detached projection of engine state.
//!
//! A `Snapshot` holds everything that changes during play: whose turn it
//! is, the dice, the phase, and every token. Tile kinds are not part of it;
//! they never change after board creation and are shared through the
//! engine's `BoardLayout`. Occupancy is not part of it either; it is
//! rebuilt from token positions on restore.

use serde::{Deserialize, Serialize};

use super::action::Move;
use super::player::{PlayerId, PlayerMap};
use super::token::{PlayerState, TokenPosition};
use crate::rules::TurnPhase;

/// Engine state captured at one instant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Seat to act.
    pub current_player: PlayerId,

    /// Last dice value (1 between turns).
    pub dice_roll: u8,

    /// Turn phase, including any pending power-up.
    pub phase: TurnPhase,

    /// Legal moves while `phase` is `Moving`; empty otherwise.
    pub available_moves: Vec<Move>,

    /// Per-player tokens and finished counts.
    pub players: PlayerMap<PlayerState>,

    /// Winner, once the game is over.
    pub winner: Option<PlayerId>,
}

impl Snapshot {
    /// Position of one token, if both ids are in range.
    #[must_use]
    pub fn token_position(&self, player: PlayerId, token: u8) -> Option<TokenPosition> {
        self.players.get(player)?.token(token)
    }

    /// Place a token, keeping `tokens_home` in step with `Home` tokens.
    ///
    /// Handy for setting up positions before `LudoEngine::restore`.
    pub fn set_token(&mut self, player: PlayerId, token: u8, position: TokenPosition) {
        if let Some(state) = self.players.get_mut(player) {
            if let Some(slot) = state.tokens.get_mut(token as usize) {
                *slot = position;
                state.tokens_home =
                    state.tokens.iter().filter(|t| **t == TokenPosition::Home).count() as u8;
            }
        }
    }
}

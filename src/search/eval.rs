//! Static position evaluation.

use crate::core::{PlayerId, PLAYER_COUNT};
use crate::rules::LudoEngine;

/// Score a position from `player`'s point of view: their progress score
/// minus the mean of the four opponents' scores.
///
/// See `PlayerState::score` for the per-player heuristic. Returns 0 for a
/// seat that does not exist.
#[must_use]
pub fn evaluate(engine: &LudoEngine, player: PlayerId) -> f64 {
    let Some(own) = engine.player(player) else {
        return 0.0;
    };
    let opponents: i32 = engine
        .players()
        .iter()
        .filter(|(id, _)| *id != player)
        .map(|(_, state)| state.score())
        .sum();
    f64::from(own.score()) - f64::from(opponents) / (PLAYER_COUNT - 1) as f64
}

//! Turn phases.

use serde::{Deserialize, Serialize};

/// Effect waiting to be resolved after an advance lands on a special tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUp {
    /// Same player rolls again.
    DoubleRoll,
    /// Turn passes once resolved.
    SafeZone,
}

impl std::fmt::Display for PowerUp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PowerUp::DoubleRoll => f.write_str("double roll"),
            PowerUp::SafeZone => f.write_str("safe zone"),
        }
    }
}

/// Where the current turn stands.
///
/// ```text
/// Rolling ──roll──▶ Moving ──move──▶ next player's Rolling
///    ▲                 │
///    │                 ├──advance onto SafeZone/DoubleRoll──▶ PowerUp
///    │                 │                                         │
///    └──DoubleRoll─────┼─────────────────────────────────────────┘
///                      └──second finished token──▶ GameOver
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnPhase {
    /// Waiting for the current player to roll.
    #[default]
    Rolling,
    /// Dice rolled; waiting for one of the available moves.
    Moving,
    /// A power-up must be resolved before the turn continues.
    PowerUp(PowerUp),
    /// Someone has won. Terminal.
    GameOver,
}

impl TurnPhase {
    /// The power-up waiting for resolution, if any.
    #[must_use]
    pub const fn pending_power_up(self) -> Option<PowerUp> {
        match self {
            TurnPhase::PowerUp(power_up) => Some(power_up),
            _ => None,
        }
    }
}

impl std::fmt::Display for TurnPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TurnPhase::Rolling => f.write_str("rolling"),
            TurnPhase::Moving => f.write_str("moving"),
            TurnPhase::PowerUp(power_up) => write!(f, "power-up ({power_up})"),
            TurnPhase::GameOver => f.write_str("game over"),
        }
    }
}

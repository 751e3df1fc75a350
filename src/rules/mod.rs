//! Game rules: the turn state machine and its errors.
//!
//! `LudoEngine` owns the live game. Callers drive it through four commands:
//! - `roll_dice` / `roll_fixed` in the `Rolling` phase
//! - `make_move` / `apply` in the `Moving` phase
//! - `use_powerup` when a power-up is pending
//! - `next_player` to force the turn on
//!
//! Every rejected command returns a `RulesError` and leaves the engine as
//! it was.

mod engine;
mod error;
mod phase;

pub use engine::LudoEngine;
pub use error::RulesError;
pub use phase::{PowerUp, TurnPhase};

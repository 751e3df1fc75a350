//! Match driver.
//!
//! Binds a `LudoEngine` to one `Controller` per seat and plays it forward
//! step by step. Rendering and input are left to the caller.

mod controller;
mod game_loop;

pub use controller::Controller;
pub use game_loop::{Match, MatchConfig, MatchSummary, StepOutcome};

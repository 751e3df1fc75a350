//! # ludo-five
//!
//! Rules engine and computer opponent for five-player Ludo with power-up
//! tiles.
//!
//! ## Design Principles
//!
//! 1. **One owner of state**: `LudoEngine` holds the board, the players and
//!    the turn. Every command validates first and either applies a whole
//!    transition or returns a `RulesError` and changes nothing.
//!
//! 2. **Positions are the truth**: tile occupancy mirrors token positions.
//!    It is updated alongside them during play and rebuilt from them on
//!    restore.
//!
//! 3. **Reproducible**: tile kinds and dice come from one seeded
//!    ChaCha8 stream, so a seed replays a whole game.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: occupancy lives in `im::Vector`s and the
//!   layout behind an `Arc`, so engine clones for search are O(1).
//!
//! - **Snapshot / Restore**: the search only ever works on engines restored
//!   from a snapshot, never on the live one.
//!
//! ## Modules
//!
//! - `core`: Players, tokens, moves, snapshots, RNG, configuration
//! - `board`: Tile kinds, paths and occupancy
//! - `rules`: The turn state machine
//! - `search`: Alpha-beta minimax for computer seats
//! - `driver`: Match loop binding the engine to controllers

pub mod board;
pub mod core;
pub mod driver;
pub mod rules;
pub mod search;

// Re-export commonly used types
pub use crate::core::{
    GameConfig, GameRng, Move, MoveKind, MoveList, PlayerId, PlayerMap,
    PlayerState, Snapshot, TokenPosition,
};

pub use crate::board::{Board, BoardLayout, Tile, TileKind, TokenRef};

pub use crate::rules::{LudoEngine, PowerUp, RulesError, TurnPhase};

pub use crate::search::{choose_move, evaluate, AlphaBeta, SearchConfig, SearchStats};

pub use crate::driver::{Controller, Match, MatchConfig, MatchSummary, StepOutcome};

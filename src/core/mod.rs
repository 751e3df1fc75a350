//! Core game types: players, tokens, moves, RNG, configuration, snapshots.
//!
//! Everything here is plain data. The rules that move it around live in
//! `rules`; the tiles it sits on live in `board`.

pub mod action;
pub mod config;
pub mod player;
pub mod rng;
pub mod snapshot;
pub mod token;

pub use action::{Move, MoveKind, MoveList};
pub use config::{
    GameConfig, DIE_FACES, ENTRY_ROLL, FINISH_THRESHOLD, HOME_TOKEN_SCORE, INTERSECTION_TILES,
    PATH_LENGTH, PLAYER_COUNT, SAFE_TILES, TOKENS_PER_PLAYER, TOKENS_TO_WIN,
};
pub use player::{PlayerId, PlayerMap};
pub use rng::GameRng;
pub use snapshot::Snapshot;
pub use token::{PlayerState, TokenPosition};

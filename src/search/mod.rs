//! Adversarial search for computer-controlled seats.
//!
//! ## Overview
//!
//! Depth-limited minimax with alpha-beta pruning over the five-player game.
//! A node maximizes when the searching player is to act and minimizes for
//! every opponent, so the four opponents are treated as one coalition.
//!
//! - **Non-mutating**: search runs on clones restored from a snapshot
//! - **Deterministic**: dice in simulated turns are fixed, never drawn
//! - **Parallel root**: optional rayon fan-out over root candidates
//!
//! ## Usage
//!
//! ```rust
//! use ludo_five::core::GameConfig;
//! use ludo_five::rules::LudoEngine;
//! use ludo_five::search::{AlphaBeta, SearchConfig};
//!
//! let mut engine = LudoEngine::new(GameConfig::new(7));
//! engine.roll_fixed(6).unwrap();
//!
//! let player = engine.current_player();
//! let mut search = AlphaBeta::new(SearchConfig::default().with_depth(3));
//! if let Some(mv) = search.choose_move(&engine, player) {
//!     engine.apply(player, mv).unwrap();
//! }
//! println!("searched {} nodes", search.stats().nodes);
//! ```

pub mod config;
pub mod eval;
pub mod minimax;
pub mod stats;

pub use config::SearchConfig;
pub use eval::evaluate;
pub use minimax::{choose_move, AlphaBeta};
pub use stats::SearchStats;

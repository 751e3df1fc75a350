//! Depth-limited minimax with alpha-beta pruning.
//!
//! The searcher never touches the engine it is handed. The root is copied
//! out through `snapshot` / `restored`, and every child node is a cheap
//! clone of its parent.
//!
//! ## Node expansion
//!
//! A freshly applied move leaves the game in `Rolling` or `PowerUp`, where
//! no move can be made. Before enumerating moves a node is brought into
//! `Moving`: a pending power-up is resolved and a `Rolling` node is rolled
//! with its current dice value, seat after seat while rolls pass the turn.
//! Dice are never drawn from the RNG, so a search is a pure function of the
//! position.

use std::time::Instant;

use log::{debug, trace};
use rayon::prelude::*;

use super::config::SearchConfig;
use super::eval::evaluate;
use super::stats::SearchStats;
use crate::core::{Move, MoveList, PlayerId, Snapshot, PLAYER_COUNT};
use crate::rules::{LudoEngine, TurnPhase};

/// Stateful alpha-beta searcher.
///
/// Holds its configuration and the statistics of the last decision.
#[derive(Clone, Debug, Default)]
pub struct AlphaBeta {
    config: SearchConfig,
    stats: SearchStats,
}

impl AlphaBeta {
    /// Create a searcher with the given configuration.
    #[must_use]
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            stats: SearchStats::default(),
        }
    }

    /// Create a searcher with default configuration and a custom depth.
    #[must_use]
    pub fn with_depth(depth: u32) -> Self {
        Self::new(SearchConfig::default().with_depth(depth))
    }

    #[must_use]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Statistics of the most recent `choose_move` call.
    #[must_use]
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Pick the best of `player`'s available moves.
    ///
    /// Returns `None` unless the engine is in `Moving` with `player` to
    /// act. A lone candidate is returned without searching. Among equally
    /// valued candidates the first in move order wins.
    pub fn choose_move(&mut self, engine: &LudoEngine, player: PlayerId) -> Option<Move> {
        self.stats.reset();
        if engine.phase() != TurnPhase::Moving || engine.current_player() != player {
            return None;
        }

        let candidates = engine.available_moves();
        self.stats.candidates = candidates.len() as u32;
        match candidates {
            [] => return None,
            [only] => return Some(*only),
            _ => {}
        }

        let start = Instant::now();
        let root = engine.snapshot();
        let depth = self.config.depth.saturating_sub(1);

        let scored: Vec<Option<(f64, SearchStats)>> = if self.config.parallel {
            candidates
                .par_iter()
                .map(|mv| score_candidate(engine, &root, player, *mv, depth))
                .collect()
        } else {
            candidates
                .iter()
                .map(|mv| score_candidate(engine, &root, player, *mv, depth))
                .collect()
        };

        let mut best: Option<(Move, f64)> = None;
        for (mv, result) in candidates.iter().zip(scored) {
            let Some((value, branch)) = result else {
                continue;
            };
            self.stats.merge(&branch);
            trace!("{player} candidate {mv}: {value:.2}");
            if best.map_or(true, |(_, best_value)| value > best_value) {
                best = Some((*mv, value));
            }
        }

        self.stats.time_us = start.elapsed().as_micros() as u64;
        if let Some((mv, value)) = best {
            debug!(
                "{player} chose {mv} ({value:.2}) from {} candidates, {} nodes, {} cutoffs, {}us",
                self.stats.candidates, self.stats.nodes, self.stats.cutoffs, self.stats.time_us
            );
        }
        best.map(|(mv, _)| mv)
    }
}

/// One-shot search with default settings and the given depth.
#[must_use]
pub fn choose_move(engine: &LudoEngine, player: PlayerId, depth: u32) -> Option<Move> {
    AlphaBeta::with_depth(depth).choose_move(engine, player)
}

/// Value of playing `mv` at the root, searched `depth` further plies.
///
/// `None` if the move does not apply to the copy.
fn score_candidate(
    engine: &LudoEngine,
    root: &Snapshot,
    player: PlayerId,
    mv: Move,
    depth: u32,
) -> Option<(f64, SearchStats)> {
    let mut child = engine.restored(root).ok()?;
    child.apply(player, mv).ok()?;

    let mut stats = SearchStats::default();
    let value = minimax(child, player, depth, f64::NEG_INFINITY, f64::INFINITY, &mut stats);
    Some((value, stats))
}

fn minimax(
    mut node: LudoEngine,
    player: PlayerId,
    depth: u32,
    mut alpha: f64,
    mut beta: f64,
    stats: &mut SearchStats,
) -> f64 {
    stats.nodes += 1;
    if depth == 0 || node.is_game_over() {
        stats.leaves += 1;
        return evaluate(&node, player);
    }

    expand(&mut node);
    if node.phase() != TurnPhase::Moving {
        stats.leaves += 1;
        return evaluate(&node, player);
    }

    let mover = node.current_player();
    let maximizing = mover == player;
    let moves = MoveList::from_slice(node.available_moves());
    let mut best: Option<f64> = None;

    for mv in moves {
        let mut child = node.clone();
        if child.apply(mover, mv).is_err() {
            continue;
        }
        let value = minimax(child, player, depth - 1, alpha, beta, stats);

        if maximizing {
            best = Some(best.map_or(value, |b| b.max(value)));
            alpha = alpha.max(value);
        } else {
            best = Some(best.map_or(value, |b| b.min(value)));
            beta = beta.min(value);
        }
        if beta <= alpha {
            stats.cutoffs += 1;
            break;
        }
    }

    best.unwrap_or_else(|| {
        stats.leaves += 1;
        evaluate(&node, player)
    })
}

/// Bring a node into `Moving` if the rules allow it.
///
/// Seats without a legal move pass on their roll and the next seat rolls,
/// so a node only stays unexpanded after a full cycle of passes.
fn expand(node: &mut LudoEngine) {
    // One power-up plus one roll per seat.
    for _ in 0..=PLAYER_COUNT {
        let mover = node.current_player();
        let result = match node.phase() {
            TurnPhase::Moving | TurnPhase::GameOver => return,
            TurnPhase::PowerUp(_) => node.use_powerup(mover).map(|_| ()),
            TurnPhase::Rolling => {
                let dice = node.dice_value();
                node.roll_fixed(dice).map(|_| ())
            }
        };
        if let Err(err) = result {
            trace!("expansion stopped at {mover}: {err}");
            return;
        }
    }
}

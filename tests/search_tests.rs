//! Alpha-beta search through the public API.

use std::sync::Arc;

use ludo_five::board::{BoardLayout, TileKind};
use ludo_five::core::{GameConfig, Move, PlayerId, TokenPosition};
use ludo_five::rules::{LudoEngine, TurnPhase};
use ludo_five::search::{choose_move, evaluate, AlphaBeta, SearchConfig};

const P0: PlayerId = PlayerId::new(0);

fn position(tokens: &[(PlayerId, u8, TokenPosition)], dice: u8) -> LudoEngine {
    let mut engine = LudoEngine::with_layout(
        Arc::new(BoardLayout::with_intersections(TileKind::DoubleRoll)),
        GameConfig::default(),
    );
    let mut snapshot = engine.snapshot();
    for &(player, token, position) in tokens {
        snapshot.set_token(player, token, position);
    }
    engine.restore(&snapshot).unwrap();
    engine.roll_fixed(dice).unwrap();
    engine
}

// =============================================================================
// Root behaviour
// =============================================================================

#[test]
fn test_single_legal_move_is_returned_at_depth_two() {
    let engine = position(&[(P0, 1, TokenPosition::OnPath(20))], 2);
    assert_eq!(engine.available_moves().len(), 1);

    assert_eq!(choose_move(&engine, P0, 2), Some(Move::advance(1)));
}

#[test]
fn test_no_move_while_rolling() {
    let engine = LudoEngine::with_seed(12);
    assert_eq!(engine.phase(), TurnPhase::Rolling);

    assert_eq!(choose_move(&engine, P0, 2), None);
}

#[test]
fn test_no_move_for_waiting_player() {
    let engine = position(&[], 6);

    for player in PlayerId::all().skip(1) {
        assert_eq!(choose_move(&engine, player, 3), None);
    }
}

#[test]
fn test_choice_is_always_available() {
    for seed in 0..10u64 {
        let mut engine = LudoEngine::with_seed(seed);
        let mut search = AlphaBeta::new(SearchConfig::default().with_depth(3));

        for _ in 0..300 {
            let player = engine.current_player();
            match engine.phase() {
                TurnPhase::Rolling => {
                    engine.roll_dice().unwrap();
                }
                TurnPhase::Moving => {
                    let mv = search.choose_move(&engine, player).unwrap();
                    assert!(engine.available_moves().contains(&mv));
                    if engine.apply(player, mv).is_err() {
                        engine.next_player();
                    }
                }
                TurnPhase::PowerUp(_) => {
                    engine.use_powerup(player).unwrap();
                }
                TurnPhase::GameOver => break,
            }
        }
    }
}

#[test]
fn test_search_does_not_touch_engine() {
    let engine = position(
        &[
            (P0, 0, TokenPosition::OnPath(1)),
            (P0, 1, TokenPosition::OnPath(15)),
            (PlayerId::new(3), 0, TokenPosition::OnPath(7)),
        ],
        6,
    );
    let before = engine.snapshot();

    let mut search = AlphaBeta::new(SearchConfig::default().with_depth(5));
    search.choose_move(&engine, P0);

    assert_eq!(engine.snapshot(), before);
    assert_eq!(engine.dice_value(), 6);
}

// =============================================================================
// Decisions
// =============================================================================

#[test]
fn test_takes_the_win() {
    let engine = position(
        &[
            (P0, 0, TokenPosition::Home),
            (P0, 1, TokenPosition::OnPath(34)),
            (P0, 2, TokenPosition::OnPath(2)),
        ],
        5,
    );

    for depth in [1, 2, 4] {
        assert_eq!(choose_move(&engine, P0, depth), Some(Move::finish(1)), "depth {depth}");
    }
}

#[test]
fn test_equal_candidates_pick_first() {
    let engine = position(&[], 6);

    assert_eq!(choose_move(&engine, P0, 2), Some(Move::enter(0)));
    assert_eq!(choose_move(&engine, P0, 3), Some(Move::enter(0)));
}

#[test]
fn test_search_is_deterministic() {
    let engine = position(
        &[
            (P0, 0, TokenPosition::OnPath(4)),
            (P0, 1, TokenPosition::OnPath(11)),
            (PlayerId::new(1), 0, TokenPosition::OnPath(0)),
        ],
        6,
    );

    let first = choose_move(&engine, P0, 4);
    for _ in 0..3 {
        assert_eq!(choose_move(&engine, P0, 4), first);
    }

    let mut parallel = AlphaBeta::new(SearchConfig::default().with_depth(4).with_parallel(true));
    assert_eq!(parallel.choose_move(&engine, P0), first);
}

#[test]
fn test_stats_are_recorded() {
    let engine = position(
        &[(P0, 0, TokenPosition::OnPath(4)), (P0, 1, TokenPosition::OnPath(11))],
        3,
    );
    let mut search = AlphaBeta::new(SearchConfig::default().with_depth(4));

    search.choose_move(&engine, P0);
    let stats = search.stats().clone();

    assert_eq!(stats.candidates, 2);
    assert!(stats.nodes >= 2);
    assert!(stats.leaves >= 1);
    assert!(stats.leaves <= stats.nodes);

    // Stats describe the last call only.
    search.choose_move(&LudoEngine::with_seed(1), P0);
    assert_eq!(search.stats().nodes, 0);
}

#[test]
fn test_evaluation_is_zero_sum_at_start() {
    let engine = LudoEngine::with_seed(2);
    let total: f64 = PlayerId::all().map(|p| evaluate(&engine, p)).sum();
    assert_eq!(total, 0.0);
}

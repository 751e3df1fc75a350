//! Turn state machine behaviour through the public API.

use std::sync::Arc;

use ludo_five::board::{BoardLayout, TileKind, TokenRef};
use ludo_five::core::{GameConfig, Move, MoveKind, PlayerId, TokenPosition, PATH_LENGTH};
use ludo_five::rules::{LudoEngine, PowerUp, RulesError, TurnPhase};

const P0: PlayerId = PlayerId::new(0);
const P1: PlayerId = PlayerId::new(1);

// =============================================================================
// Helpers
// =============================================================================

fn fixed_board(intersections: TileKind) -> LudoEngine {
    LudoEngine::with_layout(
        Arc::new(BoardLayout::with_intersections(intersections)),
        GameConfig::default(),
    )
}

fn with_tokens(mut engine: LudoEngine, player: PlayerId, tokens: &[(u8, TokenPosition)]) -> LudoEngine {
    let mut snapshot = engine.snapshot();
    for &(token, position) in tokens {
        snapshot.set_token(player, token, position);
    }
    engine.restore(&snapshot).unwrap();
    engine
}

// =============================================================================
// Setup and rolling
// =============================================================================

#[test]
fn test_all_tokens_start_in_base() {
    let engine = LudoEngine::with_seed(42);

    for player in PlayerId::all() {
        for token in 0..3 {
            assert_eq!(engine.token_position(player, token), Some(TokenPosition::Base));
        }
        assert_eq!(engine.tokens_home(player), Some(0));
        assert!(engine.board().tiles(player).all(|tile| tile.is_empty()));
    }
}

#[test]
fn test_same_seed_same_board() {
    let a = LudoEngine::with_seed(99);
    let b = LudoEngine::with_seed(99);
    assert_eq!(a.board().layout(), b.board().layout());
}

#[test]
fn test_low_roll_with_all_tokens_in_base_passes_turn() {
    for value in 1..=5 {
        let mut engine = fixed_board(TileKind::SafeZone);

        assert_eq!(engine.roll_fixed(value), Ok(value));

        assert_eq!(engine.current_player(), P1);
        assert_eq!(engine.phase(), TurnPhase::Rolling);
        assert_eq!(engine.dice_value(), 1);
        assert!(engine.available_moves().is_empty());
    }
}

#[test]
fn test_six_offers_every_base_token() {
    let mut engine = fixed_board(TileKind::SafeZone);

    engine.roll_fixed(6).unwrap();

    assert_eq!(engine.phase(), TurnPhase::Moving);
    assert_eq!(
        engine.available_moves(),
        &[Move::enter(0), Move::enter(1), Move::enter(2)]
    );
    assert_eq!(engine.legal_moves(P0).as_slice(), engine.available_moves());
}

#[test]
fn test_roll_dice_draws_in_range() {
    let mut engine = LudoEngine::with_seed(8);

    for _ in 0..200 {
        let value = engine.roll_dice().unwrap();
        assert!((1..=6).contains(&value));
        if engine.phase() == TurnPhase::Moving {
            let player = engine.current_player();
            let moves = engine.available_moves().to_vec();
            if !moves.into_iter().any(|mv| engine.apply(player, mv).is_ok()) {
                engine.next_player();
            }
        }
        if let Some(power_up) = engine.pending_power_up() {
            assert_eq!(engine.use_powerup(engine.current_player()), Ok(power_up));
        }
        if engine.is_game_over() {
            break;
        }
    }
}

// =============================================================================
// Entering and advancing
// =============================================================================

#[test]
fn test_enter_lands_on_tile_zero_and_passes_turn() {
    let mut engine = fixed_board(TileKind::SafeZone);
    engine.roll_fixed(6).unwrap();

    engine.make_move(P0, 0, MoveKind::Enter).unwrap();

    assert_eq!(engine.token_position(P0, 0), Some(TokenPosition::OnPath(0)));
    assert_eq!(engine.board().occupants(P0, 0), &[TokenRef::new(P0, 0)]);
    // Tile 0 is a safe zone, but entering never raises a power-up.
    assert_eq!(engine.phase(), TurnPhase::Rolling);
    assert_eq!(engine.current_player(), P1);
}

#[test]
fn test_advance_onto_normal_tile() {
    let mut engine = with_tokens(fixed_board(TileKind::SafeZone), P0, &[(0, TokenPosition::OnPath(0))]);
    engine.roll_fixed(3).unwrap();

    engine.make_move(P0, 0, MoveKind::Advance).unwrap();

    assert_eq!(engine.token_position(P0, 0), Some(TokenPosition::OnPath(3)));
    assert!(engine.board().occupants(P0, 0).is_empty());
    assert_eq!(engine.board().occupants(P0, 3), &[TokenRef::new(P0, 0)]);
    assert_eq!(engine.current_player(), P1);
}

#[test]
fn test_safe_zone_keeps_occupants_and_raises_power_up() {
    let mut engine = with_tokens(
        fixed_board(TileKind::SafeZone),
        P0,
        &[(0, TokenPosition::OnPath(6)), (1, TokenPosition::OnPath(8))],
    );
    engine.roll_fixed(2).unwrap();

    engine.make_move(P0, 0, MoveKind::Advance).unwrap();

    let tile = engine.board().tile(P0, 8).unwrap();
    assert_eq!(tile.kind, TileKind::SafeZone);
    assert!(tile.contains(TokenRef::new(P0, 0)));
    assert!(tile.contains(TokenRef::new(P0, 1)));
    assert_eq!(engine.phase(), TurnPhase::PowerUp(PowerUp::SafeZone));
    assert!(engine.available_moves().is_empty());

    assert_eq!(engine.use_powerup(P0), Ok(PowerUp::SafeZone));
    assert_eq!(engine.current_player(), P1);
    assert_eq!(engine.phase(), TurnPhase::Rolling);
}

#[test]
fn test_double_roll_gives_same_player_another_roll() {
    let mut engine = with_tokens(fixed_board(TileKind::DoubleRoll), P0, &[(0, TokenPosition::OnPath(3))]);
    engine.roll_fixed(2).unwrap();

    engine.make_move(P0, 0, MoveKind::Advance).unwrap();
    assert_eq!(engine.pending_power_up(), Some(PowerUp::DoubleRoll));

    assert_eq!(engine.use_powerup(P0), Ok(PowerUp::DoubleRoll));
    assert_eq!(engine.current_player(), P0);
    assert_eq!(engine.phase(), TurnPhase::Rolling);

    engine.roll_fixed(4).unwrap();
    assert_eq!(engine.available_moves(), &[Move::advance(0)]);
}

#[test]
fn test_non_safe_landing_clears_own_stack() {
    let mut engine = with_tokens(
        fixed_board(TileKind::SafeZone),
        P0,
        &[(0, TokenPosition::OnPath(10)), (1, TokenPosition::OnPath(12))],
    );
    engine.roll_fixed(2).unwrap();

    engine.make_move(P0, 0, MoveKind::Advance).unwrap();

    assert_eq!(engine.board().occupants(P0, 12), &[TokenRef::new(P0, 0)]);
    assert_eq!(engine.token_position(P0, 1), Some(TokenPosition::OnPath(12)));
    assert_eq!(engine.orphaned_tokens(), vec![TokenRef::new(P0, 1)]);
}

#[test]
fn test_paths_are_private() {
    let mut engine = with_tokens(fixed_board(TileKind::SafeZone), P0, &[(0, TokenPosition::OnPath(1))]);
    engine = with_tokens(engine, P1, &[(0, TokenPosition::OnPath(4))]);
    engine.roll_fixed(3).unwrap();

    engine.make_move(P0, 0, MoveKind::Advance).unwrap();

    // Same index, different paths: nobody is captured.
    assert_eq!(engine.token_position(P1, 0), Some(TokenPosition::OnPath(4)));
    assert_eq!(engine.board().occupants(P1, 4), &[TokenRef::new(P1, 0)]);
}

// =============================================================================
// Finishing and winning
// =============================================================================

#[test]
fn test_finish_threshold() {
    let mut engine = with_tokens(fixed_board(TileKind::SafeZone), P0, &[(0, TokenPosition::OnPath(33))]);
    engine.roll_fixed(5).unwrap();
    assert_eq!(engine.available_moves(), &[Move::advance(0)]);

    let mut engine = with_tokens(fixed_board(TileKind::SafeZone), P0, &[(0, TokenPosition::OnPath(33))]);
    engine.roll_fixed(6).unwrap();
    assert_eq!(engine.available_moves(), &[Move::finish(0)]);

    let mut engine = with_tokens(fixed_board(TileKind::SafeZone), P0, &[(0, TokenPosition::OnPath(38))]);
    engine.roll_fixed(1).unwrap();
    assert_eq!(engine.available_moves(), &[Move::finish(0)]);
}

#[test]
fn test_finish_sends_token_home() {
    let mut engine = with_tokens(fixed_board(TileKind::SafeZone), P0, &[(2, TokenPosition::OnPath(35))]);
    engine.roll_fixed(4).unwrap();

    engine.make_move(P0, 2, MoveKind::Finish).unwrap();

    assert_eq!(engine.token_position(P0, 2), Some(TokenPosition::Home));
    assert_eq!(TokenPosition::Home.to_raw(), PATH_LENGTH as i8);
    assert_eq!(engine.tokens_home(P0), Some(1));
    assert!(engine.board().occupants(P0, 35).is_empty());
    assert!(!engine.is_game_over());
    assert_eq!(engine.current_player(), P1);
}

#[test]
fn test_second_finished_token_wins() {
    let mut engine = with_tokens(
        fixed_board(TileKind::SafeZone),
        P0,
        &[(0, TokenPosition::Home), (1, TokenPosition::OnPath(37))],
    );
    engine.roll_fixed(2).unwrap();

    engine.make_move(P0, 1, MoveKind::Finish).unwrap();

    assert!(engine.is_game_over());
    assert_eq!(engine.winner(), Some(P0));
    assert_eq!(engine.phase(), TurnPhase::GameOver);
    assert!(engine.available_moves().is_empty());

    assert!(matches!(engine.roll_dice(), Err(RulesError::WrongPhase { .. })));
    assert!(matches!(
        engine.make_move(P0, 2, MoveKind::Enter),
        Err(RulesError::WrongPhase { .. })
    ));
    assert!(matches!(engine.use_powerup(P0), Err(RulesError::WrongPhase { .. })));
    engine.next_player();
    assert_eq!(engine.winner(), Some(P0));
    assert_eq!(engine.current_player(), P0);
}

// =============================================================================
// Whole games
// =============================================================================

/// Play with the first applicable move until someone wins.
fn play_out(engine: &mut LudoEngine, limit: usize) {
    for _ in 0..limit {
        let player = engine.current_player();
        match engine.phase() {
            TurnPhase::Rolling => {
                engine.roll_dice().unwrap();
            }
            TurnPhase::Moving => {
                let moves = engine.available_moves().to_vec();
                if !moves.into_iter().any(|mv| engine.apply(player, mv).is_ok()) {
                    engine.next_player();
                }
            }
            TurnPhase::PowerUp(_) => {
                engine.use_powerup(player).unwrap();
            }
            TurnPhase::GameOver => return,
        }
    }
}

#[test]
fn test_random_games_end_with_a_winner() {
    for seed in 0..5 {
        let mut engine = LudoEngine::with_seed(seed);
        play_out(&mut engine, 50_000);

        let winner = engine.winner().expect("game should finish");
        assert!(engine.is_game_over());
        assert_eq!(engine.tokens_home(winner), Some(2));
        for player in PlayerId::all().filter(|p| *p != winner) {
            assert!(engine.tokens_home(player).unwrap() < 2);
        }
    }
}

#[test]
fn test_games_replay_from_seed() {
    let mut a = LudoEngine::with_seed(17);
    let mut b = LudoEngine::with_seed(17);

    play_out(&mut a, 50_000);
    play_out(&mut b, 50_000);

    assert_eq!(a.snapshot(), b.snapshot());
}

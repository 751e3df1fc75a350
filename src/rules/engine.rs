//! Turn state machine for five-player Ludo.
//!
//! `LudoEngine` is the single owner of live game state. Every mutating call
//! checks its preconditions first and returns a `RulesError` without
//! touching anything if they fail; otherwise it applies the whole
//! transition, keeping token positions and tile occupancy in step.

use std::sync::Arc;

use log::{debug, trace};

use super::error::RulesError;
use super::phase::{PowerUp, TurnPhase};
use crate::board::{Board, BoardLayout, TokenRef};
use crate::core::{
    GameConfig, GameRng, Move, MoveKind, MoveList, PlayerId, PlayerMap, PlayerState, Snapshot,
    TokenPosition, DIE_FACES, ENTRY_ROLL, FINISH_THRESHOLD, PATH_LENGTH, PLAYER_COUNT,
    TOKENS_TO_WIN,
};

/// Live game: board, players, turn state and the dice stream.
///
/// Cloning is cheap (shared layout, persistent occupancy vectors) and the
/// clone never aliases the original's mutable state.
#[derive(Clone, Debug)]
pub struct LudoEngine {
    config: GameConfig,
    board: Board,
    players: PlayerMap<PlayerState>,
    current: PlayerId,
    dice: u8,
    phase: TurnPhase,
    available: MoveList,
    winner: Option<PlayerId>,
    rng: GameRng,
}

impl LudoEngine {
    /// New game with a freshly drawn board.
    ///
    /// Tile kinds come from the seed's `"board"` stream; dice come from the
    /// seed's main stream.
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        let layout = BoardLayout::generate(&mut GameRng::new(config.seed).for_context("board"));
        Self::with_layout(Arc::new(layout), config)
    }

    /// New game with the default configuration and the given seed.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self::new(GameConfig::new(seed))
    }

    /// New game over an existing layout.
    #[must_use]
    pub fn with_layout(layout: Arc<BoardLayout>, config: GameConfig) -> Self {
        Self {
            board: Board::new(layout),
            players: PlayerMap::new(PlayerState::new),
            current: config.first_player,
            dice: 1,
            phase: TurnPhase::Rolling,
            available: MoveList::new(),
            winner: None,
            rng: GameRng::new(config.seed),
            config,
        }
    }

    /// Start over on a newly drawn board. The dice stream continues.
    pub fn reset(&mut self) {
        let layout = BoardLayout::generate(&mut self.rng.fork().for_context("board"));
        self.board = Board::new(Arc::new(layout));
        self.players = PlayerMap::new(PlayerState::new);
        self.current = self.config.first_player;
        self.dice = 1;
        self.phase = TurnPhase::Rolling;
        self.available.clear();
        self.winner = None;
        debug!("game reset, {} to roll", self.current);
    }

    // === Observers ===

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn players(&self) -> &PlayerMap<PlayerState> {
        &self.players
    }

    #[must_use]
    pub fn player(&self, player: PlayerId) -> Option<&PlayerState> {
        self.players.get(player)
    }

    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.current
    }

    /// Last dice value. Reset to 1 whenever the turn passes.
    #[must_use]
    pub fn dice_value(&self) -> u8 {
        self.dice
    }

    #[must_use]
    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    #[must_use]
    pub fn pending_power_up(&self) -> Option<PowerUp> {
        self.phase.pending_power_up()
    }

    /// Moves the current player may make. Empty outside `Moving`.
    #[must_use]
    pub fn available_moves(&self) -> &[Move] {
        &self.available
    }

    #[must_use]
    pub fn token_position(&self, player: PlayerId, token: u8) -> Option<TokenPosition> {
        self.players.get(player)?.token(token)
    }

    #[must_use]
    pub fn tokens_home(&self, player: PlayerId) -> Option<u8> {
        self.players.get(player).map(|state| state.tokens_home)
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.phase == TurnPhase::GameOver
    }

    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        self.winner
    }

    /// On-path tokens missing from their tile's occupant list.
    ///
    /// Empty in every state reachable by play except one: an advance onto a
    /// non-safe tile clears the whole tile, so a token of the mover's that
    /// already stood there drops off the board while keeping its position.
    /// `restore` puts such tokens back.
    #[must_use]
    pub fn orphaned_tokens(&self) -> Vec<TokenRef> {
        self.players
            .iter()
            .flat_map(|(player, state)| {
                state
                    .on_path()
                    .map(move |(token, index)| (TokenRef::new(player, token), index))
            })
            .filter(|(token, index)| !self.board.contains(token.player, *index, *token))
            .map(|(token, _)| token)
            .collect()
    }

    // === Move generation ===

    /// Legal moves for `player` with the current dice value.
    ///
    /// A base token may enter on a 6. An on-path token finishes if
    /// `position + dice` reaches 39 and advances otherwise.
    #[must_use]
    pub fn legal_moves(&self, player: PlayerId) -> MoveList {
        self.players
            .get(player)
            .map(|state| moves_for(state, self.dice))
            .unwrap_or_default()
    }

    // === Commands ===

    /// Roll the die for the current player.
    ///
    /// Returns the value rolled. If it gives no legal move the turn passes
    /// straight to the next player.
    pub fn roll_dice(&mut self) -> Result<u8, RulesError> {
        self.expect_phase("roll", TurnPhase::Rolling)?;
        let value = self.rng.roll_die();
        self.roll_fixed(value)
    }

    /// Like `roll_dice`, with the value supplied by the caller.
    pub fn roll_fixed(&mut self, value: u8) -> Result<u8, RulesError> {
        self.expect_phase("roll", TurnPhase::Rolling)?;
        if !(1..=DIE_FACES).contains(&value) {
            return Err(RulesError::InvalidDiceValue { value });
        }

        let player = self.current;
        self.dice = value;
        self.available = self.legal_moves(player);
        if self.available.is_empty() {
            debug!("{player} rolled {value}, no legal move");
            self.next_player();
        } else {
            debug!("{player} rolled {value}, {} move(s)", self.available.len());
            self.phase = TurnPhase::Moving;
        }
        Ok(value)
    }

    /// Move one of `player`'s tokens.
    pub fn make_move(&mut self, player: PlayerId, token: u8, kind: MoveKind) -> Result<(), RulesError> {
        let result = self.try_move(player, token, kind);
        if let Err(err) = &result {
            trace!("rejected {kind} of token {token} for {player}: {err}");
        }
        result
    }

    /// `make_move` taking a `Move`.
    pub fn apply(&mut self, player: PlayerId, mv: Move) -> Result<(), RulesError> {
        self.make_move(player, mv.token, mv.kind)
    }

    /// Resolve the pending power-up. Returns which one it was.
    pub fn use_powerup(&mut self, player: PlayerId) -> Result<PowerUp, RulesError> {
        let TurnPhase::PowerUp(power_up) = self.phase else {
            return Err(RulesError::WrongPhase {
                operation: "use power-up",
                phase: self.phase,
            });
        };
        self.expect_current(player)?;

        match power_up {
            PowerUp::DoubleRoll => {
                debug!("{player} takes an extra roll");
                self.phase = TurnPhase::Rolling;
            }
            PowerUp::SafeZone => self.next_player(),
        }
        Ok(power_up)
    }

    /// Pass the turn to the next seat. Does nothing once the game is over.
    pub fn next_player(&mut self) {
        if self.phase == TurnPhase::GameOver {
            return;
        }
        self.current = self.current.next();
        self.dice = 1;
        self.available.clear();
        self.phase = TurnPhase::Rolling;
    }

    // === Snapshot / restore ===

    /// Capture everything that changes during play.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            current_player: self.current,
            dice_roll: self.dice,
            phase: self.phase,
            available_moves: self.available.to_vec(),
            players: self.players.clone(),
            winner: self.winner,
        }
    }

    /// Load a snapshot into this engine, keeping its layout and dice stream.
    ///
    /// Occupancy is rebuilt from token positions and the move list is
    /// recomputed, so the result is consistent whatever produced the
    /// snapshot. A malformed snapshot is rejected and nothing changes.
    pub fn restore(&mut self, snapshot: &Snapshot) -> Result<(), RulesError> {
        Self::validate(snapshot)?;

        let available = if snapshot.phase == TurnPhase::Moving {
            let moves = moves_for(&snapshot.players[snapshot.current_player], snapshot.dice_roll);
            if moves.is_empty() {
                return Err(invalid("moving phase without a legal move"));
            }
            moves
        } else {
            MoveList::new()
        };

        self.current = snapshot.current_player;
        self.dice = snapshot.dice_roll;
        self.phase = snapshot.phase;
        self.players = snapshot.players.clone();
        self.winner = snapshot.winner;
        self.available = available;
        self.board.rebuild(&self.players);
        Ok(())
    }

    /// A separate engine sharing this one's layout, loaded from `snapshot`.
    pub fn restored(&self, snapshot: &Snapshot) -> Result<Self, RulesError> {
        let mut engine = self.clone();
        engine.restore(snapshot)?;
        Ok(engine)
    }

    fn validate(snapshot: &Snapshot) -> Result<(), RulesError> {
        if snapshot.players.player_count() != PLAYER_COUNT {
            return Err(invalid(format!(
                "expected {PLAYER_COUNT} players, found {}",
                snapshot.players.player_count()
            )));
        }
        if !snapshot.current_player.is_seated() {
            return Err(invalid(format!("{} is not seated", snapshot.current_player)));
        }
        if !(1..=DIE_FACES).contains(&snapshot.dice_roll) {
            return Err(invalid(format!("dice value {}", snapshot.dice_roll)));
        }

        for (player, state) in snapshot.players.iter() {
            if state.id != player {
                return Err(invalid(format!("{} stored in {player}'s slot", state.id)));
            }
            if let Some(index) = state.tokens.iter().find_map(|t| match t {
                TokenPosition::OnPath(i) if *i as usize >= PATH_LENGTH => Some(*i),
                _ => None,
            }) {
                return Err(invalid(format!("{player} has a token on tile {index}")));
            }
            let home = state.tokens.iter().filter(|t| **t == TokenPosition::Home).count();
            if home != state.tokens_home as usize {
                return Err(invalid(format!(
                    "{player} reports {} tokens home but has {home}",
                    state.tokens_home
                )));
            }
        }

        let over = snapshot.phase == TurnPhase::GameOver;
        match snapshot.winner {
            Some(winner) if !over => {
                return Err(invalid(format!("{winner} won but the phase is {}", snapshot.phase)));
            }
            Some(winner) => {
                let home = snapshot.players.get(winner).map_or(0, |s| s.tokens_home);
                if home < TOKENS_TO_WIN {
                    return Err(invalid(format!("{winner} won with {home} tokens home")));
                }
            }
            None if over => return Err(invalid("game over without a winner")),
            None => {
                if let Some((player, _)) = snapshot
                    .players
                    .iter()
                    .find(|(_, s)| s.tokens_home >= TOKENS_TO_WIN)
                {
                    return Err(invalid(format!("{player} has already won")));
                }
            }
        }
        Ok(())
    }

    // === Move execution ===

    fn try_move(&mut self, player: PlayerId, token: u8, kind: MoveKind) -> Result<(), RulesError> {
        self.expect_phase("move", TurnPhase::Moving)?;
        self.expect_current(player)?;
        let position = self.players[player]
            .token(token)
            .ok_or(RulesError::InvalidToken { token })?;

        match kind {
            MoveKind::Enter => self.enter(player, token, position),
            MoveKind::Advance => self.advance(player, token, position),
            MoveKind::Finish => self.finish(player, token, position),
        }
    }

    fn enter(&mut self, player: PlayerId, token: u8, position: TokenPosition) -> Result<(), RulesError> {
        if position != TokenPosition::Base {
            return Err(RulesError::NotInBase { token, position });
        }
        if self.dice != ENTRY_ROLL {
            return Err(RulesError::EntryRequiresSix { rolled: self.dice });
        }

        self.set_position(player, token, TokenPosition::OnPath(0));
        self.board.place(player, 0, TokenRef::new(player, token));
        debug!("{player} entered token {token}");
        self.next_player();
        Ok(())
    }

    fn advance(&mut self, player: PlayerId, token: u8, position: TokenPosition) -> Result<(), RulesError> {
        let from = self.registered_index(player, token, position)?;
        let to = from + self.dice as usize;
        if to >= PATH_LENGTH {
            return Err(RulesError::Overshoot {
                token,
                from,
                rolled: self.dice,
            });
        }

        let mover = TokenRef::new(player, token);
        self.board.lift(player, from, mover);

        let kind = self.board.kind(player, to);
        if kind.captures() {
            // The whole tile is cleared, the mover's own tokens included.
            for occupant in self.board.clear_tile(player, to) {
                if occupant.player != player {
                    self.send_to_base(occupant);
                }
            }
        }

        self.set_position(player, token, TokenPosition::OnPath(to as u8));
        self.board.place(player, to, mover);
        debug!("{player} advanced token {token} from {from} to {to} ({kind})");

        match kind.power_up() {
            Some(power_up) => {
                self.available.clear();
                self.phase = TurnPhase::PowerUp(power_up);
            }
            None => self.next_player(),
        }
        Ok(())
    }

    fn finish(&mut self, player: PlayerId, token: u8, position: TokenPosition) -> Result<(), RulesError> {
        let from = self.registered_index(player, token, position)?;

        self.board.lift(player, from, TokenRef::new(player, token));
        self.set_position(player, token, TokenPosition::Home);
        let state = &mut self.players[player];
        state.tokens_home += 1;
        let home = state.tokens_home;
        debug!("{player} finished token {token} ({home} home)");

        if home >= TOKENS_TO_WIN {
            debug!("{player} wins");
            self.phase = TurnPhase::GameOver;
            self.winner = Some(player);
            self.available.clear();
            return Ok(());
        }
        self.next_player();
        Ok(())
    }

    fn send_to_base(&mut self, victim: TokenRef) {
        let Some(slot) = self
            .players
            .get_mut(victim.player)
            .and_then(|state| state.tokens.get_mut(victim.token as usize))
        else {
            return;
        };
        if let Some(index) = slot.path_index() {
            self.board.lift(victim.player, index, victim);
        }
        *slot = TokenPosition::Base;
        debug!("{} lost token {} to a capture", victim.player, victim.token);
    }

    // === Helpers ===

    fn expect_phase(&self, operation: &'static str, expected: TurnPhase) -> Result<(), RulesError> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(RulesError::WrongPhase {
                operation,
                phase: self.phase,
            })
        }
    }

    fn expect_current(&self, player: PlayerId) -> Result<(), RulesError> {
        if !player.is_seated() {
            return Err(RulesError::InvalidPlayer { player });
        }
        if player != self.current {
            return Err(RulesError::NotCurrentPlayer {
                player,
                current: self.current,
            });
        }
        Ok(())
    }

    /// Path index of an on-path token that is registered on its tile.
    fn registered_index(&self, player: PlayerId, token: u8, position: TokenPosition) -> Result<usize, RulesError> {
        let index = position
            .path_index()
            .ok_or(RulesError::NotOnPath { token, position })?;
        if !self.board.contains(player, index, TokenRef::new(player, token)) {
            return Err(RulesError::OccupancyMismatch { token, index });
        }
        Ok(index)
    }

    fn set_position(&mut self, player: PlayerId, token: u8, position: TokenPosition) {
        self.players[player].tokens[token as usize] = position;
    }
}

fn moves_for(state: &PlayerState, dice: u8) -> MoveList {
    state
        .tokens
        .iter()
        .enumerate()
        .filter_map(|(token, position)| {
            let token = token as u8;
            match *position {
                TokenPosition::Base if dice == ENTRY_ROLL => Some(Move::enter(token)),
                TokenPosition::OnPath(index) if index as usize + dice as usize >= FINISH_THRESHOLD => {
                    Some(Move::finish(token))
                }
                TokenPosition::OnPath(_) => Some(Move::advance(token)),
                _ => None,
            }
        })
        .collect()
}

fn invalid(reason: impl Into<String>) -> RulesError {
    RulesError::InvalidSnapshot {
        reason: reason.into(),
    }
}

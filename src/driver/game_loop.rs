//! Match loop: one engine, one controller per seat.
//!
//! Each `step` performs a single driver action for the player to act:
//! roll, move or resolve a power-up. Computer seats are played through
//! their searcher; human seats stop the loop until the caller acts, either
//! on the engine directly or through `human_default`.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::controller::Controller;
use crate::core::{GameConfig, Move, PlayerId, PlayerMap};
use crate::rules::{LudoEngine, PowerUp, RulesError, TurnPhase};
use crate::search::SearchConfig;

/// Configuration for a match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Seed for the board and the dice.
    pub seed: u64,

    /// Step budget for `Match::play` (default: 10,000).
    pub max_steps: usize,

    /// Search settings shared by every computer seat.
    pub search: SearchConfig,

    /// Seat left to an external decision maker, if any.
    pub human_seat: Option<PlayerId>,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            max_steps: 10_000,
            search: SearchConfig::default(),
            human_seat: None,
        }
    }
}

impl MatchConfig {
    /// Set the seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the step budget.
    #[must_use]
    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// Set the search settings.
    #[must_use]
    pub fn with_search(mut self, search: SearchConfig) -> Self {
        self.search = search;
        self
    }

    /// Hand one seat to a human.
    #[must_use]
    pub fn with_human_seat(mut self, seat: PlayerId) -> Self {
        self.human_seat = Some(seat);
        self
    }
}

/// What a single driver step did.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepOutcome {
    /// Dice rolled. `passed` is set when no move was possible and the turn
    /// went straight to the next player.
    Rolled {
        player: PlayerId,
        value: u8,
        passed: bool,
    },
    /// A move was applied.
    Moved { player: PlayerId, mv: Move },
    /// The pending power-up was resolved.
    PowerUpUsed { player: PlayerId, power_up: PowerUp },
    /// No available move applied; the turn was forced on.
    ForcedAdvance { player: PlayerId },
    /// A human seat is to act.
    AwaitingHuman { player: PlayerId },
    /// The game is over; nothing was done.
    Finished { winner: Option<PlayerId> },
}

/// End-of-run report.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSummary {
    pub seed: u64,
    pub winner: Option<PlayerId>,
    pub finished: bool,
    pub steps: u32,
    pub rolls: u32,
    pub moves: u32,
    pub power_ups: u32,
    pub forced_advances: u32,
    /// Finished tokens per seat.
    pub tokens_home: Vec<u8>,
}

#[derive(Clone, Debug, Default)]
struct Counters {
    steps: u32,
    rolls: u32,
    moves: u32,
    power_ups: u32,
    forced_advances: u32,
}

/// A game in progress together with its controllers.
#[derive(Clone, Debug)]
pub struct Match {
    engine: LudoEngine,
    controllers: PlayerMap<Controller>,
    config: MatchConfig,
    counters: Counters,
}

impl Match {
    /// New match on a fresh board. Every seat is a computer except
    /// `config.human_seat`.
    #[must_use]
    pub fn new(config: MatchConfig) -> Self {
        let engine = LudoEngine::new(GameConfig::new(config.seed));
        let controllers = PlayerMap::new(|player| {
            if config.human_seat == Some(player) {
                Controller::Human
            } else {
                Controller::computer(config.search.clone())
            }
        });
        Self::with_controllers(engine, controllers, config)
    }

    /// Match over an existing engine with explicit controllers.
    #[must_use]
    pub fn with_controllers(
        engine: LudoEngine,
        controllers: PlayerMap<Controller>,
        config: MatchConfig,
    ) -> Self {
        Self {
            engine,
            controllers,
            config,
            counters: Counters::default(),
        }
    }

    #[must_use]
    pub fn engine(&self) -> &LudoEngine {
        &self.engine
    }

    /// Direct engine access for human seats.
    pub fn engine_mut(&mut self) -> &mut LudoEngine {
        &mut self.engine
    }

    #[must_use]
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    #[must_use]
    pub fn controller(&self, player: PlayerId) -> Option<&Controller> {
        self.controllers.get(player)
    }

    /// Perform one action for the player to act.
    pub fn step(&mut self) -> StepOutcome {
        if self.engine.is_game_over() {
            return StepOutcome::Finished {
                winner: self.engine.winner(),
            };
        }

        let player = self.engine.current_player();
        let outcome = match &mut self.controllers[player] {
            Controller::Human => return StepOutcome::AwaitingHuman { player },
            Controller::Computer(search) => {
                act(&mut self.engine, player, |engine| search.choose_move(engine, player))
            }
        };
        self.record(outcome);
        outcome
    }

    /// Act for the current player with the single-key default: roll, play
    /// the first available move, or use the pending power-up.
    pub fn human_default(&mut self) -> StepOutcome {
        if self.engine.is_game_over() {
            return StepOutcome::Finished {
                winner: self.engine.winner(),
            };
        }

        let player = self.engine.current_player();
        let outcome = act(&mut self.engine, player, |engine| {
            engine.available_moves().first().copied()
        });
        self.record(outcome);
        outcome
    }

    /// Step until the game ends, a human seat is to act, or `max_steps`
    /// steps have been taken.
    pub fn run(&mut self, max_steps: usize) -> MatchSummary {
        for _ in 0..max_steps {
            match self.step() {
                StepOutcome::Finished { .. } | StepOutcome::AwaitingHuman { .. } => break,
                _ => {}
            }
        }
        self.summary()
    }

    /// `run` with the configured step budget.
    pub fn play(&mut self) -> MatchSummary {
        self.run(self.config.max_steps)
    }

    /// Report on the match so far.
    #[must_use]
    pub fn summary(&self) -> MatchSummary {
        MatchSummary {
            seed: self.config.seed,
            winner: self.engine.winner(),
            finished: self.engine.is_game_over(),
            steps: self.counters.steps,
            rolls: self.counters.rolls,
            moves: self.counters.moves,
            power_ups: self.counters.power_ups,
            forced_advances: self.counters.forced_advances,
            tokens_home: self
                .engine
                .players()
                .values()
                .map(|state| state.tokens_home)
                .collect(),
        }
    }

    /// Start a new game on a newly drawn board. Controllers are kept.
    pub fn reset(&mut self) {
        self.engine.reset();
        self.counters = Counters::default();
    }

    fn record(&mut self, outcome: StepOutcome) {
        let counters = &mut self.counters;
        counters.steps += 1;
        match outcome {
            StepOutcome::Rolled { .. } => counters.rolls += 1,
            StepOutcome::Moved { .. } => counters.moves += 1,
            StepOutcome::PowerUpUsed { .. } => counters.power_ups += 1,
            StepOutcome::ForcedAdvance { .. } => counters.forced_advances += 1,
            StepOutcome::AwaitingHuman { .. } | StepOutcome::Finished { .. } => {}
        }
    }
}

/// One driver action for `player`, who must be the current player.
fn act(
    engine: &mut LudoEngine,
    player: PlayerId,
    choose: impl FnOnce(&LudoEngine) -> Option<Move>,
) -> StepOutcome {
    match engine.phase() {
        TurnPhase::Rolling => match engine.roll_dice() {
            Ok(value) => StepOutcome::Rolled {
                player,
                value,
                passed: engine.current_player() != player,
            },
            Err(err) => force_advance(engine, player, &err),
        },
        TurnPhase::Moving => {
            let chosen = choose(engine);
            play(engine, player, chosen)
        }
        TurnPhase::PowerUp(_) => match engine.use_powerup(player) {
            Ok(power_up) => StepOutcome::PowerUpUsed { player, power_up },
            Err(err) => force_advance(engine, player, &err),
        },
        TurnPhase::GameOver => StepOutcome::Finished {
            winner: engine.winner(),
        },
    }
}

/// Apply `chosen`, falling back to the other available moves in order.
fn play(engine: &mut LudoEngine, player: PlayerId, chosen: Option<Move>) -> StepOutcome {
    let fallback: Vec<Move> = engine
        .available_moves()
        .iter()
        .copied()
        .filter(|mv| Some(*mv) != chosen)
        .collect();

    let mut last_error = None;
    for mv in chosen.into_iter().chain(fallback) {
        match engine.apply(player, mv) {
            Ok(()) => return StepOutcome::Moved { player, mv },
            Err(err) => {
                debug!("{player} could not play {mv}: {err}");
                last_error = Some(err);
            }
        }
    }

    match last_error {
        Some(err) => force_advance(engine, player, &err),
        None => {
            warn!("{player} had no move to play, forcing the turn on");
            engine.next_player();
            StepOutcome::ForcedAdvance { player }
        }
    }
}

fn force_advance(engine: &mut LudoEngine, player: PlayerId, err: &RulesError) -> StepOutcome {
    warn!("forcing the turn on from {player}: {err}");
    engine.next_player();
    StepOutcome::ForcedAdvance { player }
}

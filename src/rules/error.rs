//! Rejected engine commands.

use thiserror::Error;

use super::phase::TurnPhase;
use crate::core::{PlayerId, TokenPosition};

/// Why the engine refused a command. The engine is unchanged whenever one
/// of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RulesError {
    #[error("{operation} is not allowed during the {phase} phase")]
    WrongPhase {
        operation: &'static str,
        phase: TurnPhase,
    },
    #[error("{player} is not seated at this table")]
    InvalidPlayer { player: PlayerId },
    #[error("it is {current}'s turn, not {player}'s")]
    NotCurrentPlayer { player: PlayerId, current: PlayerId },
    #[error("token {token} does not exist")]
    InvalidToken { token: u8 },
    #[error("dice value {value} is outside 1..=6")]
    InvalidDiceValue { value: u8 },
    #[error("entering needs a 6, rolled {rolled}")]
    EntryRequiresSix { rolled: u8 },
    #[error("token {token} cannot enter from {position:?}")]
    NotInBase { token: u8, position: TokenPosition },
    #[error("token {token} is not on the path ({position:?})")]
    NotOnPath { token: u8, position: TokenPosition },
    #[error("token {token} is not registered on tile {index}")]
    OccupancyMismatch { token: u8, index: usize },
    #[error("advancing token {token} from {from} by {rolled} leaves the path")]
    Overshoot { token: u8, from: usize, rolled: u8 },
    #[error("invalid snapshot: {reason}")]
    InvalidSnapshot { reason: String },
}

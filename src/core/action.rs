//! Move representation: which token, and what it does.
//!
//! A move names a token by its index within the owner's three tokens and a
//! `MoveKind`:
//! - `Enter`: leave base onto tile 0 (needs a 6)
//! - `Advance`: step forward along the path by the dice value
//! - `Finish`: leave the path and count toward the win

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::config::TOKENS_PER_PLAYER;

/// The three things a token can do on a turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveKind {
    /// Base to tile 0.
    Enter,
    /// Forward along the path.
    Advance,
    /// Off the path into the finished pile.
    Finish,
}

impl std::fmt::Display for MoveKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            MoveKind::Enter => "enter",
            MoveKind::Advance => "advance",
            MoveKind::Finish => "finish",
        };
        f.write_str(name)
    }
}

/// A complete move for the current player.
///
/// ## Example
///
/// ```
/// use ludo_five::core::{Move, MoveKind};
///
/// let mv = Move::new(2, MoveKind::Advance);
/// assert_eq!(mv.token, 2);
/// assert_eq!(mv.to_string(), "token 2 advance");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// Token index within the owner's tokens.
    pub token: u8,

    /// What the token does.
    pub kind: MoveKind,
}

impl Move {
    /// Create a move.
    #[must_use]
    pub const fn new(token: u8, kind: MoveKind) -> Self {
        Self { token, kind }
    }

    /// `Enter` for the given token.
    #[must_use]
    pub const fn enter(token: u8) -> Self {
        Self::new(token, MoveKind::Enter)
    }

    /// `Advance` for the given token.
    #[must_use]
    pub const fn advance(token: u8) -> Self {
        Self::new(token, MoveKind::Advance)
    }

    /// `Finish` for the given token.
    #[must_use]
    pub const fn finish(token: u8) -> Self {
        Self::new(token, MoveKind::Finish)
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "token {} {}", self.token, self.kind)
    }
}

/// Legal moves for one player: at most one per token, never heap-allocated.
pub type MoveList = SmallVec<[Move; TOKENS_PER_PLAYER]>;

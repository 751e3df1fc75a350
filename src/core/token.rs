//! Token positions and per-player token state.

use serde::{Deserialize, Serialize};

use super::config::{HOME_TOKEN_SCORE, PATH_LENGTH, TOKENS_PER_PLAYER};
use super::player::PlayerId;

/// Where a token is.
///
/// The raw integer form is `-1` for base, `0..40` for path tiles and `40`
/// for finished tokens.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenPosition {
    /// Not yet entered.
    #[default]
    Base,
    /// On the owner's path at this tile index.
    OnPath(u8),
    /// Finished.
    Home,
}

impl TokenPosition {
    /// Raw integer position.
    #[must_use]
    pub const fn to_raw(self) -> i8 {
        match self {
            TokenPosition::Base => -1,
            TokenPosition::OnPath(index) => index as i8,
            TokenPosition::Home => PATH_LENGTH as i8,
        }
    }

    /// Parse a raw integer position. `None` outside `-1..=40`.
    ///
    /// ```
    /// use ludo_five::core::TokenPosition;
    ///
    /// assert_eq!(TokenPosition::from_raw(-1), Some(TokenPosition::Base));
    /// assert_eq!(TokenPosition::from_raw(12), Some(TokenPosition::OnPath(12)));
    /// assert_eq!(TokenPosition::from_raw(40), Some(TokenPosition::Home));
    /// assert_eq!(TokenPosition::from_raw(41), None);
    /// ```
    #[must_use]
    pub fn from_raw(raw: i8) -> Option<Self> {
        match raw {
            -1 => Some(TokenPosition::Base),
            r if (0..PATH_LENGTH as i8).contains(&r) => Some(TokenPosition::OnPath(r as u8)),
            r if r == PATH_LENGTH as i8 => Some(TokenPosition::Home),
            _ => None,
        }
    }

    /// Path index, if the token is on the path.
    #[must_use]
    pub const fn path_index(self) -> Option<usize> {
        match self {
            TokenPosition::OnPath(index) => Some(index as usize),
            _ => None,
        }
    }
}

/// One player's tokens and finished count.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    /// Owning seat.
    pub id: PlayerId,

    /// Token positions, indexed by token id.
    pub tokens: [TokenPosition; TOKENS_PER_PLAYER],

    /// Tokens that have finished.
    pub tokens_home: u8,
}

impl PlayerState {
    /// All tokens in base.
    #[must_use]
    pub fn new(id: PlayerId) -> Self {
        Self {
            id,
            tokens: [TokenPosition::Base; TOKENS_PER_PLAYER],
            tokens_home: 0,
        }
    }

    /// Position of one token. `None` for an out-of-range token id.
    #[must_use]
    pub fn token(&self, token: u8) -> Option<TokenPosition> {
        self.tokens.get(token as usize).copied()
    }

    /// Tokens on the path, with their ids.
    pub fn on_path(&self) -> impl Iterator<Item = (u8, usize)> + '_ {
        self.tokens
            .iter()
            .enumerate()
            .filter_map(|(id, pos)| pos.path_index().map(|index| (id as u8, index)))
    }

    /// Heuristic progress score: 10 per finished token plus `40 - position`
    /// for every token on the path.
    #[must_use]
    pub fn score(&self) -> i32 {
        let on_path: i32 = self
            .on_path()
            .map(|(_, index)| (PATH_LENGTH - index) as i32)
            .sum();
        i32::from(self.tokens_home) * HOME_TOKEN_SCORE + on_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_round_trip_over_domain() {
        for raw in -1..=PATH_LENGTH as i8 {
            let pos = TokenPosition::from_raw(raw).unwrap();
            assert_eq!(pos.to_raw(), raw);
        }
        assert_eq!(TokenPosition::from_raw(-2), None);
    }

    #[test]
    fn test_new_player_starts_in_base() {
        let state = PlayerState::new(PlayerId::new(2));

        assert!(state.tokens.iter().all(|t| *t == TokenPosition::Base));
        assert_eq!(state.tokens_home, 0);
        assert_eq!(state.score(), 0);
        assert_eq!(state.token(3), None);
    }

    #[test]
    fn test_score_counts_path_and_home() {
        let mut state = PlayerState::new(PlayerId::new(0));
        state.tokens = [TokenPosition::OnPath(0), TokenPosition::OnPath(30), TokenPosition::Home];
        state.tokens_home = 1;

        // 10 for the finished token, 40 + 10 for the two on the path.
        assert_eq!(state.score(), 60);
    }

    #[test]
    fn test_on_path_lists_ids_and_indices() {
        let mut state = PlayerState::new(PlayerId::new(1));
        state.tokens = [TokenPosition::Base, TokenPosition::OnPath(7), TokenPosition::OnPath(3)];

        let on_path: Vec<_> = state.on_path().collect();
        assert_eq!(on_path, vec![(1, 7), (2, 3)]);
    }
}

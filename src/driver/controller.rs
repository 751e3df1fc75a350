//! Who decides for each seat.

use crate::search::{AlphaBeta, SearchConfig};

/// Decision maker for one seat.
#[derive(Clone, Debug)]
pub enum Controller {
    /// Decisions come from outside the driver; `Match::step` waits.
    Human,
    /// Decisions come from an alpha-beta searcher.
    Computer(AlphaBeta),
}

impl Controller {
    /// A computer seat searching with `config`.
    #[must_use]
    pub fn computer(config: SearchConfig) -> Self {
        Controller::Computer(AlphaBeta::new(config))
    }

    #[must_use]
    pub fn is_human(&self) -> bool {
        matches!(self, Controller::Human)
    }
}

impl Default for Controller {
    fn default() -> Self {
        Controller::computer(SearchConfig::default())
    }
}

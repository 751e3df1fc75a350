//! Search configuration parameters.

use serde::{Deserialize, Serialize};

/// Alpha-beta search configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Plies searched, counting the candidate move itself (default: 2).
    /// Zero and one both score candidates by static evaluation alone.
    pub depth: u32,

    /// Search root candidates on the rayon thread pool (default: false).
    /// The chosen move is the same either way.
    pub parallel: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: 2,
            parallel: false,
        }
    }
}

impl SearchConfig {
    /// Create a new config with custom depth.
    #[must_use]
    pub fn with_depth(mut self, depth: u32) -> Self {
        self.depth = depth;
        self
    }

    /// Create a new config with parallel root search on or off.
    #[must_use]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

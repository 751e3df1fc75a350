//! Search statistics for diagnostics and tuning.

use serde::{Deserialize, Serialize};

/// Statistics collected during one `choose_move` call.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Root candidates considered.
    pub candidates: u32,

    /// Nodes visited below the root, leaves included.
    pub nodes: u64,

    /// Nodes scored by static evaluation.
    pub leaves: u64,

    /// Alpha-beta cutoffs taken.
    pub cutoffs: u64,

    /// Total time spent searching (microseconds).
    pub time_us: u64,
}

impl SearchStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset all statistics to zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Fold in counters gathered by a separate search branch.
    ///
    /// Time is not summed; the caller measures wall time for the whole call.
    pub fn merge(&mut self, other: &SearchStats) {
        self.nodes += other.nodes;
        self.leaves += other.leaves;
        self.cutoffs += other.cutoffs;
    }

    /// Calculate nodes visited per second.
    #[must_use]
    pub fn nodes_per_second(&self) -> f64 {
        if self.time_us == 0 {
            0.0
        } else {
            self.nodes as f64 / (self.time_us as f64 / 1_000_000.0)
        }
    }

    /// Fraction of visited nodes that were leaves.
    #[must_use]
    pub fn leaf_ratio(&self) -> f64 {
        if self.nodes == 0 {
            0.0
        } else {
            self.leaves as f64 / self.nodes as f64
        }
    }
}

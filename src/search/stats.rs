use std::fmt;

use serde::{Deserialize, Serialize};

/// Running counters for one traversal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Nodes visited, root included.
    pub nodes: u64,
    pub solutions: u64,
    /// Non-terminal nodes without a single safe capture.
    pub dead_ends: u64,
    /// Deepest ply reached.
    pub max_depth: usize,
}

impl SearchStats {
    #[inline]
    pub(crate) fn record_node(&mut self, depth: usize) {
        self.nodes = self.nodes.saturating_add(1);
        self.max_depth = self.max_depth.max(depth);
    }

    #[inline]
    pub(crate) fn record_solution(&mut self) {
        self.solutions = self.solutions.saturating_add(1);
    }

    #[inline]
    pub(crate) fn record_dead_end(&mut self) {
        self.dead_ends = self.dead_ends.saturating_add(1);
    }
}

impl fmt::Display for SearchStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "nodes={}, solutions={}, dead_ends={}, max_depth={}",
            self.nodes, self.solutions, self.dead_ends, self.max_depth
        )
    }
}

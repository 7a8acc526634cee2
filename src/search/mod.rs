//! Exhaustive capture-chain search.
//!
//! The search only sees the rules engine through [`rules::RulesLike`]:
//! - [`node`]: one reached board state plus the trail of squares the solving piece stood on.
//! - [`tree`]: the depth-first driver that expands nodes and emits solutions.
//! - [`sink`]: where discovered solutions go.

use thiserror::Error;

pub mod node;
pub mod rules;
pub mod sink;
pub mod stats;
pub mod tree;

#[derive(Debug, Error)]
pub enum SearchError {
    /// The side to move does not own exactly one piece. Fatal for the whole search.
    #[error("solving side must own exactly one piece, found {count} (trail so far: [{trail}])")]
    SolverNotUnique { count: usize, trail: String },
    /// A solution could not be written out.
    #[error("failed to emit solution [{trail}]: {source}")]
    Emit {
        trail: String,
        #[source]
        source: std::io::Error,
    },
}

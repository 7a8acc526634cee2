//! Exhaustive search for single-piece capture chains.
//!
//! One piece of the side to move must capture every opposing piece, one per move, always
//! landing on a square no remaining opposing piece attacks. The opponent never replies.

pub mod chess;
pub mod core;
pub mod logging;
pub mod puzzle;
pub mod puzzles;
pub mod search;
pub mod solution;

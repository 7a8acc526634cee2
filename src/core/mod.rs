//! Board geometry primitives.
//!
//! - [`coord`]: small signed file/rank offsets and the common step sets.
//! - [`square`]: one of the 64 squares of the 8x8 board, printed in file+rank notation.

pub mod coord;
pub mod square;

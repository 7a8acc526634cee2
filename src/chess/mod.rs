//! Orthodox chess rules on an 8x8 board, as far as capture puzzles need them.
//!
//! Positions need not be game-legal (kingless puzzles are the norm), so this module does its
//! own FEN handling and move generation instead of enforcing standard position validity.

pub mod board;
pub mod fen;
pub mod piece;
pub mod rules;

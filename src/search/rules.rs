//! The capability set the search consumes from a rules engine.

use std::fmt;

use crate::chess::board::Board;
use crate::chess::piece::Color;
use crate::chess::rules::{Move, StandardRules};
use crate::core::square::Square;

/// Rules-engine contract for capture-chain search.
///
/// Implementations must be deterministic: the same board always yields the same captures in
/// the same order.
pub trait RulesLike {
    type Board: Clone;
    type Move: Clone + fmt::Display;
    type Square: Copy + Eq + fmt::Display + fmt::Debug;
    type Color: Copy + Eq + fmt::Debug;

    fn side_to_move(&self, board: &Self::Board) -> Self::Color;

    fn opponent(&self, color: Self::Color) -> Self::Color;

    /// Squares holding a piece of `color`.
    fn pieces_of(&self, board: &Self::Board, color: Self::Color) -> Vec<Self::Square>;

    /// Pieces of both sides combined.
    fn piece_count(&self, board: &Self::Board) -> usize;

    /// Legal captures for the side to move.
    fn legal_captures(&self, board: &Self::Board) -> Vec<Self::Move>;

    fn origin(&self, mv: &Self::Move) -> Self::Square;

    fn destination(&self, mv: &Self::Move) -> Self::Square;

    fn is_attacked_by(&self, board: &Self::Board, sq: Self::Square, by: Self::Color) -> bool;

    /// Apply `mv` to a copy of `board`.
    fn play(&self, board: &Self::Board, mv: &Self::Move) -> Self::Board;

    /// Apply the null move to a copy of `board`.
    fn pass(&self, board: &Self::Board) -> Self::Board;
}

impl RulesLike for StandardRules {
    type Board = Board;
    type Move = Move;
    type Square = Square;
    type Color = Color;

    #[inline]
    fn side_to_move(&self, board: &Board) -> Color {
        board.turn()
    }

    #[inline]
    fn opponent(&self, color: Color) -> Color {
        color.other()
    }

    fn pieces_of(&self, board: &Board, color: Color) -> Vec<Square> {
        board.pieces(color).map(|(sq, _)| sq).collect()
    }

    fn piece_count(&self, board: &Board) -> usize {
        board.occupied_count()
    }

    fn legal_captures(&self, board: &Board) -> Vec<Move> {
        StandardRules::legal_captures(self, board)
    }

    #[inline]
    fn origin(&self, mv: &Move) -> Square {
        mv.from
    }

    #[inline]
    fn destination(&self, mv: &Move) -> Square {
        mv.to
    }

    fn is_attacked_by(&self, board: &Board, sq: Square, by: Color) -> bool {
        StandardRules::is_attacked_by(self, board, sq, by)
    }

    fn play(&self, board: &Board, mv: &Move) -> Board {
        StandardRules::play(self, board, mv)
    }

    fn pass(&self, board: &Board) -> Board {
        StandardRules::pass(self, board)
    }
}

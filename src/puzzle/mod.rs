//! Puzzle layer: a named starting position plus the checks that must pass before searching.
//!
//! The solving side is whoever is to move in the starting position. It must own exactly one
//! piece; every other piece on the board belongs to the opponent and has to be captured.

use thiserror::Error;

use crate::chess::board::Board;
use crate::chess::fen::FenError;
use crate::chess::piece::Color;
use crate::core::square::Square;

#[derive(Debug, Error)]
pub enum PuzzleError {
    #[error("malformed starting position: {0}")]
    Fen(#[from] FenError),
    #[error("{color} is to move and must own exactly one piece, found {count}")]
    SolverNotUnique { color: Color, count: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Puzzle {
    pub name: String,
    pub fen: String,
    pub board: Board,
}

impl Puzzle {
    /// Parse `fen`. Does not check the single-solver requirement; see [`Puzzle::validate`].
    pub fn from_fen(name: impl Into<String>, fen: &str) -> Result<Self, PuzzleError> {
        let board = Board::from_fen(fen)?;
        Ok(Self {
            name: name.into(),
            fen: fen.trim().to_string(),
            board,
        })
    }

    /// Parse and validate in one step.
    pub fn load(name: impl Into<String>, fen: &str) -> Result<Self, PuzzleError> {
        let puzzle = Self::from_fen(name, fen)?;
        puzzle.validate()?;
        Ok(puzzle)
    }

    /// Intended to be called by CLIs/tests before running the search.
    pub fn validate(&self) -> Result<(), PuzzleError> {
        let color = self.solver();
        let count = self.board.count(color);
        if count != 1 {
            return Err(PuzzleError::SolverNotUnique { color, count });
        }
        Ok(())
    }

    #[inline]
    pub fn solver(&self) -> Color {
        self.board.turn()
    }

    /// Starting square of the solving piece, if there is exactly one.
    pub fn solver_square(&self) -> Option<Square> {
        let mut pieces = self.board.pieces(self.solver());
        match (pieces.next(), pieces.next()) {
            (Some((sq, _)), None) => Some(sq),
            _ => None,
        }
    }

    pub fn opponent_count(&self) -> usize {
        self.board.count(self.solver().other())
    }
}

//! Built-in puzzles (compile-time configs).

use crate::puzzle::{Puzzle, PuzzleError};

/// Puzzle used when no position is given on the command line.
pub const DEFAULT_PUZZLE: &str = "rook_swarm";

/// A white rook among sixteen black minor pieces and pawns.
pub const ROOK_SWARM_FEN: &str = "8/n1pp2Rp/n2p3n/b6p/n1n4n/3n3b/2b4n/8 w - - 0 1";

/// One rook, one undefended knight next to it: a single one-move solution.
pub const LONE_ROOK_FEN: &str = "8/8/8/8/8/8/8/Rn6 w - - 0 1";

/// The only capture lands on a square covered by a second pawn: no solutions.
pub const GUARDED_PAWN_FEN: &str = "8/8/8/8/8/2p5/1p6/1R6 w - - 0 1";

/// Two knights reachable one after the other by a queen.
pub const KNIGHT_PAIR_FEN: &str = "8/8/8/8/8/8/8/Q1n1n3 w - - 0 1";

/// The solving piece alone: solved before the first move.
pub const EMPTY_BOARD_FEN: &str = "8/8/8/8/4K3/8/8/8 w - - 0 1";

fn builtin(name: &str, fen: &str) -> Result<Puzzle, PuzzleError> {
    Puzzle::from_fen(name, fen)
}

pub fn rook_swarm() -> Result<Puzzle, PuzzleError> {
    builtin("rook_swarm", ROOK_SWARM_FEN)
}

pub fn lone_rook() -> Result<Puzzle, PuzzleError> {
    builtin("lone_rook", LONE_ROOK_FEN)
}

pub fn guarded_pawn() -> Result<Puzzle, PuzzleError> {
    builtin("guarded_pawn", GUARDED_PAWN_FEN)
}

pub fn knight_pair() -> Result<Puzzle, PuzzleError> {
    builtin("knight_pair", KNIGHT_PAIR_FEN)
}

pub fn empty_board() -> Result<Puzzle, PuzzleError> {
    builtin("empty_board", EMPTY_BOARD_FEN)
}

/// Return a puzzle by name.
pub fn by_name(name: &str) -> Result<Option<Puzzle>, PuzzleError> {
    match name {
        "rook_swarm" => Ok(Some(rook_swarm()?)),
        "lone_rook" => Ok(Some(lone_rook()?)),
        "guarded_pawn" => Ok(Some(guarded_pawn()?)),
        "knight_pair" => Ok(Some(knight_pair()?)),
        "empty_board" => Ok(Some(empty_board()?)),
        _ => Ok(None),
    }
}

/// Names of all built-in puzzles.
pub fn names() -> &'static [&'static str] {
    &[
        "rook_swarm",
        "lone_rook",
        "guarded_pawn",
        "knight_pair",
        "empty_board",
    ]
}

pub fn available_names() -> &'static [&'static str] {
    names()
}

use std::fmt;

use crate::chess::piece::{Color, Piece, PieceKind};
use crate::core::square::Square;

/// Which castling moves are still nominally available.
///
/// Captures never castle, so these are only carried through and kept up to date when rooks or
/// kings leave (or are captured on) their home squares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CastlingRights {
    pub white_king_side: bool,
    pub white_queen_side: bool,
    pub black_king_side: bool,
    pub black_queen_side: bool,
}

impl CastlingRights {
    pub const NONE: CastlingRights = CastlingRights {
        white_king_side: false,
        white_queen_side: false,
        black_king_side: false,
        black_queen_side: false,
    };

    pub fn is_empty(self) -> bool {
        self == Self::NONE
    }

    /// Drop every right that depends on a piece standing on `sq`.
    pub fn clear_for_square(&mut self, sq: Square) {
        match sq.index() {
            0 => self.white_queen_side = false,
            7 => self.white_king_side = false,
            4 => {
                self.white_king_side = false;
                self.white_queen_side = false;
            }
            56 => self.black_queen_side = false,
            63 => self.black_king_side = false,
            60 => {
                self.black_king_side = false;
                self.black_queen_side = false;
            }
            _ => {}
        }
    }
}

impl fmt::Display for CastlingRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("-");
        }
        for (on, c) in [
            (self.white_king_side, 'K'),
            (self.white_queen_side, 'Q'),
            (self.black_king_side, 'k'),
            (self.black_queen_side, 'q'),
        ] {
            if on {
                write!(f, "{c}")?;
            }
        }
        Ok(())
    }
}

/// A full board state: placement, side to move and the auxiliary FEN fields.
///
/// No king-presence or check legality is enforced; puzzle positions routinely have no kings.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    squares: [Option<Piece>; Square::COUNT],
    pub(crate) turn: Color,
    pub(crate) castling: CastlingRights,
    pub(crate) ep_square: Option<Square>,
    pub(crate) halfmove_clock: u32,
    pub(crate) fullmove_number: u32,
}

impl Board {
    /// An empty board, White to move.
    pub fn empty() -> Self {
        Self {
            squares: [None; Square::COUNT],
            turn: Color::White,
            castling: CastlingRights::NONE,
            ep_square: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    pub fn with_piece(mut self, sq: Square, piece: Piece) -> Self {
        self.set_piece(sq, Some(piece));
        self
    }

    pub fn with_turn(mut self, turn: Color) -> Self {
        self.turn = turn;
        self
    }

    pub fn with_ep_square(mut self, ep: Option<Square>) -> Self {
        self.ep_square = ep;
        self
    }

    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.squares[sq.index()]
    }

    #[inline]
    pub fn set_piece(&mut self, sq: Square, piece: Option<Piece>) {
        self.squares[sq.index()] = piece;
    }

    #[inline]
    pub fn is_occupied(&self, sq: Square) -> bool {
        self.piece_at(sq).is_some()
    }

    /// Pieces of `color`, in a1..h8 order.
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.occupied().filter(move |(_, p)| p.color == color)
    }

    /// All pieces, in a1..h8 order.
    pub fn occupied(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| self.piece_at(sq).map(|p| (sq, p)))
    }

    pub fn occupied_count(&self) -> usize {
        self.squares.iter().filter(|p| p.is_some()).count()
    }

    pub fn count(&self, color: Color) -> usize {
        self.pieces(color).count()
    }

    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces(color)
            .find(|(_, p)| p.kind == PieceKind::King)
            .map(|(sq, _)| sq)
    }

    #[inline]
    pub fn turn(&self) -> Color {
        self.turn
    }

    #[inline]
    pub fn castling(&self) -> CastlingRights {
        self.castling
    }

    #[inline]
    pub fn ep_square(&self) -> Option<Square> {
        self.ep_square
    }

    #[inline]
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    #[inline]
    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8u8).rev() {
            for file in 0..8u8 {
                let c = self
                    .piece_at(Square::new(file, rank))
                    .map(Piece::fen_char)
                    .unwrap_or('.');
                if file > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{c}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

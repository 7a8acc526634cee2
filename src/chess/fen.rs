//! FEN parsing and formatting.
//!
//! Parsing is lenient about material (no kings, any piece counts, pawns on any rank) but strict
//! about syntax. Missing trailing fields default to `w - - 0 1`; a fullmove number of 0 reads
//! as 1. Castling accepts `KQkq` as well as Shredder/X-FEN rook files (`A`-`H`, `a`-`h`).

use std::str::FromStr;

use thiserror::Error;

use crate::chess::board::{Board, CastlingRights};
use crate::chess::piece::{Color, Piece};
use crate::core::square::Square;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FenError {
    #[error("empty FEN")]
    Empty,
    #[error("too many FEN fields: expected at most 6, got {got}")]
    TooManyFields { got: usize },
    #[error("placement must have 8 ranks, got {got}")]
    RankCount { got: usize },
    #[error("rank {rank} does not describe exactly 8 squares: {text:?}")]
    RankWidth { rank: u8, text: String },
    #[error("unknown piece character {character:?} in rank {rank}")]
    UnknownPiece { character: char, rank: u8 },
    #[error("invalid side to move {text:?} (expected 'w' or 'b')")]
    SideToMove { text: String },
    #[error("invalid castling field {text:?}")]
    Castling { text: String },
    #[error("invalid en-passant square {text:?}")]
    EnPassant { text: String },
    #[error("invalid {field} {text:?}")]
    Counter { field: &'static str, text: String },
}

impl Board {
    pub fn from_fen(fen: &str) -> Result<Board, FenError> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        if fields.is_empty() {
            return Err(FenError::Empty);
        }
        if fields.len() > 6 {
            return Err(FenError::TooManyFields { got: fields.len() });
        }

        let mut board = Board::empty();
        parse_placement(&mut board, fields[0])?;

        board.turn = match fields.get(1).copied().unwrap_or("w") {
            "w" => Color::White,
            "b" => Color::Black,
            other => {
                return Err(FenError::SideToMove {
                    text: other.to_string(),
                })
            }
        };
        board.castling = parse_castling(&board, fields.get(2).copied().unwrap_or("-"))?;
        board.ep_square = parse_ep(fields.get(3).copied().unwrap_or("-"))?;
        board.halfmove_clock =
            parse_counter("halfmove clock", fields.get(4).copied().unwrap_or("0"))?;
        board.fullmove_number =
            parse_counter("fullmove number", fields.get(5).copied().unwrap_or("1"))?.max(1);

        Ok(board)
    }

    pub fn to_fen(&self) -> String {
        let mut ranks = Vec::with_capacity(8);
        for rank in (0..8u8).rev() {
            let mut empty = 0;
            let mut text = String::new();
            for file in 0..8u8 {
                match self.piece_at(Square::new(file, rank)) {
                    Some(p) => {
                        if empty > 0 {
                            text.push_str(&empty.to_string());
                            empty = 0;
                        }
                        text.push(p.fen_char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                text.push_str(&empty.to_string());
            }
            ranks.push(text);
        }

        let turn = match self.turn {
            Color::White => "w",
            Color::Black => "b",
        };
        let ep = self
            .ep_square
            .map(|sq| sq.to_string())
            .unwrap_or_else(|| "-".to_string());
        format!(
            "{} {turn} {} {ep} {} {}",
            ranks.join("/"),
            self.castling,
            self.halfmove_clock,
            self.fullmove_number
        )
    }
}

impl FromStr for Board {
    type Err = FenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Board::from_fen(s)
    }
}

fn parse_placement(board: &mut Board, placement: &str) -> Result<(), FenError> {
    let ranks: Vec<&str> = placement.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenError::RankCount { got: ranks.len() });
    }

    for (i, text) in ranks.iter().enumerate() {
        let rank = 7 - i as u8;
        let width_err = || FenError::RankWidth {
            rank: rank + 1,
            text: text.to_string(),
        };
        let mut file: u8 = 0;
        for ch in text.chars() {
            if let Some(n) = ch.to_digit(10) {
                if n == 0 || n > 8 {
                    return Err(width_err());
                }
                file += n as u8;
                if file > 8 {
                    return Err(width_err());
                }
                continue;
            }
            let piece = Piece::from_fen_char(ch).ok_or(FenError::UnknownPiece {
                character: ch,
                rank: rank + 1,
            })?;
            if file >= 8 {
                return Err(width_err());
            }
            board.set_piece(Square::new(file, rank), Some(piece));
            file += 1;
        }
        if file != 8 {
            return Err(width_err());
        }
    }
    Ok(())
}

/// `board` must already hold the placement; rook-file letters are sided against the king.
fn parse_castling(board: &Board, text: &str) -> Result<CastlingRights, FenError> {
    let mut rights = CastlingRights::NONE;
    if text == "-" {
        return Ok(rights);
    }
    for ch in text.chars() {
        match ch {
            'K' => rights.white_king_side = true,
            'Q' => rights.white_queen_side = true,
            'k' => rights.black_king_side = true,
            'q' => rights.black_queen_side = true,
            'A'..='H' | 'a'..='h' => {
                let color = if ch.is_ascii_uppercase() {
                    Color::White
                } else {
                    Color::Black
                };
                let rook_file = ch.to_ascii_lowercase() as u8 - b'a';
                let back_rank = color.other().promotion_rank();
                // Without a king on its home rank, the e-file stands in for it.
                let king_file = board
                    .king_square(color)
                    .filter(|k| k.rank() == back_rank)
                    .map_or(4, |k| k.file());
                let (king_side, queen_side) = match color {
                    Color::White => (&mut rights.white_king_side, &mut rights.white_queen_side),
                    Color::Black => (&mut rights.black_king_side, &mut rights.black_queen_side),
                };
                if rook_file > king_file {
                    *king_side = true;
                } else if rook_file < king_file {
                    *queen_side = true;
                }
            }
            _ => {
                return Err(FenError::Castling {
                    text: text.to_string(),
                })
            }
        }
    }
    Ok(rights)
}

fn parse_ep(text: &str) -> Result<Option<Square>, FenError> {
    if text == "-" {
        return Ok(None);
    }
    let err = || FenError::EnPassant {
        text: text.to_string(),
    };
    let sq: Square = text.parse().map_err(|_| err())?;
    if sq.rank() != 2 && sq.rank() != 5 {
        return Err(err());
    }
    Ok(Some(sq))
}

fn parse_counter(field: &'static str, text: &str) -> Result<u32, FenError> {
    text.parse().map_err(|_| FenError::Counter {
        field,
        text: text.to_string(),
    })
}

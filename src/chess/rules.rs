use std::fmt;

use crate::chess::board::Board;
use crate::chess::piece::{Color, Piece, PieceKind, KNIGHT_DELTAS};
use crate::core::coord::{Coord, KING_STEPS};
use crate::core::square::Square;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveKind {
    /// Ordinary capture on the destination square.
    Capture { captured: PieceKind },
    /// Pawn capture of a pawn that just double-stepped past the destination.
    EnPassant,
    /// Pawn capture onto the last rank.
    Promotion {
        captured: PieceKind,
        promote_to: PieceKind,
    },
}

/// A capturing move. Quiet moves are never generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub kind: MoveKind,
}

impl Move {
    /// Square of the piece removed by this capture.
    pub fn captured_square(&self) -> Square {
        match self.kind {
            MoveKind::EnPassant => Square::new(self.to.file(), self.from.rank()),
            _ => self.to,
        }
    }

    pub fn promotion(&self) -> Option<PieceKind> {
        match self.kind {
            MoveKind::Promotion { promote_to, .. } => Some(promote_to),
            _ => None,
        }
    }
}

/// UCI notation, e.g. `g7h7` or `b7a8q`.
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(p) = self.promotion() {
            write!(f, "{}", p.letter())?;
        }
        Ok(())
    }
}

/// Orthodox piece movement on an 8x8 board, restricted to what capture puzzles need.
///
/// Positions are not required to be game-legal: kings may be missing, and a king standing in
/// the way is captured like any other piece.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardRules;

impl StandardRules {
    pub fn new() -> Self {
        Self
    }

    /// Does any piece of `by` attack `target`? Independent of the side to move.
    pub fn is_attacked_by(&self, board: &Board, target: Square, by: Color) -> bool {
        board
            .pieces(by)
            .any(|(from, piece)| self.piece_attacks(board, piece, from, target))
    }

    #[inline]
    fn piece_attacks(&self, board: &Board, piece: Piece, from: Square, target: Square) -> bool {
        use PieceKind::*;
        if from == target {
            return false;
        }
        let d = target.coord() - from.coord();
        match piece.kind {
            Pawn => d.y == piece.color.forward() && d.x.abs() == 1,
            Knight => {
                let ax = d.x.abs();
                let ay = d.y.abs();
                (ax == 2 && ay == 1) || (ax == 1 && ay == 2)
            }
            King => d.chebyshev_norm() == 1,
            Rook | Bishop | Queen => self.rider_attacks(board, from, d, piece.kind.slide_dirs()),
        }
    }

    fn rider_attacks(&self, board: &Board, from: Square, v: Coord, dirs: &[Coord]) -> bool {
        let Some((dir, dist)) = normalized_dir_and_distance(v) else {
            return false;
        };
        if !dirs.contains(&dir) {
            return false;
        }

        // Any piece strictly between `from` and the target blocks the ray.
        (1..dist).all(|s| from.offset(dir * s).map_or(true, |sq| !board.is_occupied(sq)))
    }

    /// All legal captures for the side to move.
    ///
    /// Order: origin squares a1..h8, then each piece's fixed direction order. Engines that
    /// scan from h8 down (python-chess, for one) list the solutions of a multi-solution puzzle
    /// in a different order; the set of solutions is the same.
    pub fn legal_captures(&self, board: &Board) -> Vec<Move> {
        let us = board.turn();
        let mut out = Vec::new();
        for (from, piece) in board.pieces(us) {
            self.push_captures(board, from, piece, &mut out);
        }
        out.retain(|mv| !self.exposes_own_king(board, mv));
        out
    }

    fn push_captures(&self, board: &Board, from: Square, piece: Piece, out: &mut Vec<Move>) {
        let enemy_at = |sq: Square| {
            board
                .piece_at(sq)
                .filter(|p| p.color != piece.color)
                .map(|p| p.kind)
        };

        match piece.kind {
            PieceKind::Pawn => {
                let fwd = piece.color.forward();
                for dx in [-1, 1] {
                    let Some(to) = from.offset(Coord::new(dx, fwd)) else {
                        continue;
                    };
                    if let Some(captured) = enemy_at(to) {
                        if to.rank() == piece.color.promotion_rank() {
                            for promote_to in PieceKind::PROMOTIONS {
                                out.push(Move {
                                    from,
                                    to,
                                    kind: MoveKind::Promotion {
                                        captured,
                                        promote_to,
                                    },
                                });
                            }
                        } else {
                            out.push(Move {
                                from,
                                to,
                                kind: MoveKind::Capture { captured },
                            });
                        }
                    } else if board.ep_square() == Some(to) {
                        let victim = Square::new(to.file(), from.rank());
                        if enemy_at(victim) == Some(PieceKind::Pawn) {
                            out.push(Move {
                                from,
                                to,
                                kind: MoveKind::EnPassant,
                            });
                        }
                    }
                }
            }
            PieceKind::Knight | PieceKind::King => {
                let steps: &[Coord] = if piece.kind == PieceKind::Knight {
                    &KNIGHT_DELTAS
                } else {
                    &KING_STEPS
                };
                for &d in steps {
                    let Some(to) = from.offset(d) else {
                        continue;
                    };
                    if let Some(captured) = enemy_at(to) {
                        out.push(Move {
                            from,
                            to,
                            kind: MoveKind::Capture { captured },
                        });
                    }
                }
            }
            PieceKind::Rook | PieceKind::Bishop | PieceKind::Queen => {
                for &dir in piece.kind.slide_dirs() {
                    for step in 1..8 {
                        let Some(to) = from.offset(dir * step) else {
                            break;
                        };
                        if !board.is_occupied(to) {
                            continue;
                        }
                        if let Some(captured) = enemy_at(to) {
                            out.push(Move {
                                from,
                                to,
                                kind: MoveKind::Capture { captured },
                            });
                        }
                        break;
                    }
                }
            }
        }
    }

    fn exposes_own_king(&self, board: &Board, mv: &Move) -> bool {
        let us = board.turn();
        let after = self.play(board, mv);
        after
            .king_square(us)
            .is_some_and(|k| self.is_attacked_by(&after, k, us.other()))
    }

    /// Apply `mv` to a copy of `board`.
    ///
    /// `mv` must have been generated for `board`; a move whose origin is empty leaves the
    /// placement untouched.
    pub fn play(&self, board: &Board, mv: &Move) -> Board {
        let mut next = board.clone();
        let Some(piece) = board.piece_at(mv.from) else {
            return next;
        };

        next.set_piece(mv.captured_square(), None);
        next.set_piece(mv.from, None);
        let placed = match mv.kind {
            MoveKind::Promotion { promote_to, .. } => Piece::new(piece.color, promote_to),
            _ => piece,
        };
        next.set_piece(mv.to, Some(placed));

        next.castling.clear_for_square(mv.from);
        next.castling.clear_for_square(mv.to);
        next.ep_square = None;
        next.halfmove_clock = 0;
        self.finish_turn(&mut next);
        next
    }

    /// The null move: the side to move gives up its turn.
    pub fn pass(&self, board: &Board) -> Board {
        let mut next = board.clone();
        next.ep_square = None;
        next.halfmove_clock = next.halfmove_clock.saturating_add(1);
        self.finish_turn(&mut next);
        next
    }

    /// Counters saturate at `u32::MAX`.
    fn finish_turn(&self, board: &mut Board) {
        if board.turn == Color::Black {
            board.fullmove_number = board.fullmove_number.saturating_add(1);
        }
        board.turn = board.turn.other();
    }
}

#[inline]
fn normalized_dir_and_distance(v: Coord) -> Option<(Coord, i8)> {
    let dx = v.x;
    let dy = v.y;

    // rook-like
    if dx == 0 && dy != 0 {
        return Some((Coord::new(0, dy.signum()), dy.abs()));
    }
    if dy == 0 && dx != 0 {
        return Some((Coord::new(dx.signum(), 0), dx.abs()));
    }

    // bishop-like
    if dx != 0 && dy != 0 && dx.abs() == dy.abs() {
        return Some((Coord::new(dx.signum(), dy.signum()), dx.abs()));
    }

    None
}

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::search::rules::RulesLike;
use crate::search::SearchError;

/// Squares the solving piece has stood on, from the starting position onwards.
///
/// Trails are never shared between nodes: [`Trail::extended`] copies before appending, so a
/// branch can never observe a sibling's squares.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Trail<S>(Vec<S>);

impl<S: Copy> Trail<S> {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// A copy of this trail with `sq` appended.
    pub fn extended(&self, sq: S) -> Self {
        let mut squares = Vec::with_capacity(self.0.len() + 1);
        squares.extend_from_slice(&self.0);
        squares.push(sq);
        Self(squares)
    }

    pub fn squares(&self) -> &[S] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn first(&self) -> Option<S> {
        self.0.first().copied()
    }

    pub fn last(&self) -> Option<S> {
        self.0.last().copied()
    }
}

impl<S: Copy> Default for Trail<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Copy> From<Vec<S>> for Trail<S> {
    fn from(squares: Vec<S>) -> Self {
        Self(squares)
    }
}

/// Squares separated by single spaces, e.g. `g7 h7 h6`.
impl<S: fmt::Display> fmt::Display for Trail<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, sq) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{sq}")?;
        }
        Ok(())
    }
}

/// One board state reached by the search.
///
/// The solving side is always the side to move: every child board is "capture, then the
/// opponent passes".
pub struct PositionNode<R: RulesLike> {
    board: R::Board,
    trail: Trail<R::Square>,
    children: Vec<PositionNode<R>>,
}

impl<R: RulesLike> PositionNode<R> {
    /// Build a node from `board` and the trail inherited from its parent (empty for the root).
    ///
    /// Fails if the side to move does not own exactly one piece.
    pub fn new(
        rules: &R,
        board: R::Board,
        inherited: &Trail<R::Square>,
    ) -> Result<Self, SearchError> {
        let solver = rules.side_to_move(&board);
        let squares = rules.pieces_of(&board, solver);
        let &[current] = squares.as_slice() else {
            return Err(SearchError::SolverNotUnique {
                count: squares.len(),
                trail: inherited.to_string(),
            });
        };

        Ok(Self {
            board,
            trail: inherited.extended(current),
            children: Vec::new(),
        })
    }

    /// Captures whose destination is not attacked by the opponent once the capture is made.
    ///
    /// Keeps the rules engine's generation order.
    pub fn safe_captures(&self, rules: &R) -> Vec<R::Move> {
        let opponent = rules.opponent(rules.side_to_move(&self.board));
        rules
            .legal_captures(&self.board)
            .into_iter()
            .filter(|mv| {
                let after = rules.play(&self.board, mv);
                !rules.is_attacked_by(&after, rules.destination(mv), opponent)
            })
            .collect()
    }

    /// True when only the solving piece is left.
    pub fn is_end(&self, rules: &R) -> bool {
        rules.piece_count(&self.board) == 1
    }

    /// Play `mv` on a copy of `board`, then skip the opponent's turn.
    pub fn push_switch(rules: &R, board: &R::Board, mv: &R::Move) -> R::Board {
        let after = rules.play(board, mv);
        rules.pass(&after)
    }

    pub fn add_child(&mut self, rules: &R, board: R::Board) -> Result<(), SearchError> {
        let child = PositionNode::new(rules, board, &self.trail)?;
        self.children.push(child);
        Ok(())
    }

    pub fn board(&self) -> &R::Board {
        &self.board
    }

    pub fn trail(&self) -> &Trail<R::Square> {
        &self.trail
    }

    pub fn children(&self) -> &[PositionNode<R>] {
        &self.children
    }

    pub(crate) fn children_mut(&mut self) -> &mut [PositionNode<R>] {
        &mut self.children
    }

    pub(crate) fn drop_children(&mut self) {
        self.children = Vec::new();
    }

    /// Plies from the root (the root is at depth 0).
    pub fn depth(&self) -> usize {
        self.trail.len() - 1
    }

    /// Opposing pieces still on the board.
    pub fn opponent_count(&self, rules: &R) -> usize {
        let opponent = rules.opponent(rules.side_to_move(&self.board));
        rules.pieces_of(&self.board, opponent).len()
    }

    /// Visit this node and its retained descendants depth-first, parents before children.
    pub fn walk<F>(&self, f: &mut F)
    where
        F: FnMut(&PositionNode<R>),
    {
        f(self);
        for child in &self.children {
            child.walk(f);
        }
    }
}

//! Depth-first driver over capture sequences.
//!
//! Every expansion captures one opposing piece, so recursion depth is bounded by the number of
//! opposing pieces in the starting position and the tree is finite.

use crate::search::node::{PositionNode, Trail};
use crate::search::rules::RulesLike;
use crate::search::sink::SolutionSink;
use crate::search::stats::SearchStats;
use crate::search::SearchError;
use crate::vlog;

/// What happens to a node's children once its subtree has been explored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Retention {
    /// Keep the whole tree; it stays inspectable through [`SearchTree::root`].
    #[default]
    KeepTree,
    /// Release each subtree as soon as it is finished.
    DropExplored,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SearchOptions {
    pub retention: Retention,
}

impl SearchOptions {
    pub fn with_retention(mut self, retention: Retention) -> Self {
        self.retention = retention;
        self
    }
}

pub struct SearchTree<R: RulesLike> {
    root: PositionNode<R>,
    options: SearchOptions,
}

impl<R: RulesLike> SearchTree<R> {
    pub fn new(rules: &R, board: R::Board, options: SearchOptions) -> Result<Self, SearchError> {
        let root = PositionNode::new(rules, board, &Trail::new())?;
        Ok(Self { root, options })
    }

    pub fn root(&self) -> &PositionNode<R> {
        &self.root
    }

    /// Explore the whole tree, emitting each solution as it is found.
    ///
    /// Stops at the first error; nothing after it is emitted.
    pub fn start_traverse<K>(
        &mut self,
        rules: &R,
        sink: &mut K,
    ) -> Result<SearchStats, SearchError>
    where
        K: SolutionSink<R::Square> + ?Sized,
    {
        let mut stats = SearchStats::default();
        Self::traverse(rules, &mut self.root, self.options, &mut stats, sink)?;
        vlog!("search finished: {stats}");
        Ok(stats)
    }

    fn traverse<K>(
        rules: &R,
        node: &mut PositionNode<R>,
        options: SearchOptions,
        stats: &mut SearchStats,
        sink: &mut K,
    ) -> Result<(), SearchError>
    where
        K: SolutionSink<R::Square> + ?Sized,
    {
        stats.record_node(node.depth());

        if node.is_end(rules) {
            stats.record_solution();
            vlog!("solution #{}: {}", stats.solutions, node.trail());
            return sink.emit(node.trail());
        }

        // A retained tree is traversed again without regenerating its children.
        if node.children().is_empty() {
            Self::add_children(rules, node)?;
        }
        if node.children().is_empty() {
            stats.record_dead_end();
            vlog!("dead end at depth {}: {}", node.depth(), node.trail());
            return Ok(());
        }
        vlog!(
            "expanded depth {} [{}] into {} children",
            node.depth(),
            node.trail(),
            node.children().len()
        );

        for child in node.children_mut() {
            Self::traverse(rules, child, options, stats, sink)?;
        }

        if options.retention == Retention::DropExplored {
            node.drop_children();
        }
        Ok(())
    }

    /// One child per safe capture, in generation order.
    pub fn add_children(rules: &R, node: &mut PositionNode<R>) -> Result<(), SearchError> {
        for mv in node.safe_captures(rules) {
            let board = PositionNode::push_switch(rules, node.board(), &mv);
            node.add_child(rules, board)?;
        }
        Ok(())
    }
}

/// Run a full search from `board` and collect every solution trail.
pub fn solve<R: RulesLike>(
    rules: &R,
    board: R::Board,
) -> Result<Vec<Trail<R::Square>>, SearchError> {
    let options = SearchOptions::default().with_retention(Retention::DropExplored);
    let mut tree = SearchTree::new(rules, board, options)?;
    let mut found: Vec<Trail<R::Square>> = Vec::new();
    tree.start_traverse(rules, &mut found)?;
    Ok(found)
}

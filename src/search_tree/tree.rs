use log::{debug, warn};

use super::annotate::{mark_principal_variation, mark_pruned, AnnotateError};
use super::node::{Evaluation, Node};
use super::stats::TreeStats;
use crate::game::{GameState, MoveError, MoveGenerator, Side};

/// The tree explored by one top-level search, rebuilt from the evaluations the
/// search reported.
///
/// A tree is created when a top-level search begins and is mutated by every
/// evaluation of that search. Once `complete` has run it is treated as a snapshot
/// for statistics, queries and drawing.
#[derive(Clone, Debug)]
pub struct SearchTree<S: GameState> {
    root_position: S,
    root_path_length: usize,
    root: Node<S::Move>,
    last_depth: i16,
}

impl<S: GameState> SearchTree<S> {
    pub fn new(position: &S) -> Self {
        let root_position = position.clone();
        Self {
            root_path_length: root_position.move_history().len(),
            root: Node::root(root_position.side_to_move()),
            root_position,
            last_depth: 0,
        }
    }

    /// Starts over from `position`, discarding every recorded node.
    pub fn init(&mut self, position: &S) {
        *self = Self::new(position);
    }

    pub fn root_position(&self) -> &S {
        &self.root_position
    }

    /// Number of moves already played when the root position was captured.
    pub fn root_path_length(&self) -> usize {
        self.root_path_length
    }

    pub fn root_side(&self) -> Side {
        self.root_position.side_to_move()
    }

    pub fn root(&self) -> &Node<S::Move> {
        &self.root
    }

    pub fn last_depth(&self) -> i16 {
        self.last_depth
    }

    /// Records `evaluation` at the end of `path`, a move sequence from the root.
    pub fn insert(&mut self, path: &[S::Move], starting_side: Side, evaluation: Evaluation) {
        self.root.insert(path, starting_side, evaluation);
    }

    /// Records `evaluation` for `position`, deriving its path from the moves played
    /// since the root position. Positions with a shorter history than the root are
    /// not below it and are ignored.
    pub fn record(&mut self, position: &S, evaluation: Evaluation) {
        let side = self.root_side();
        let path = match position.move_history().get(self.root_path_length..) {
            Some(path) => path,
            None => {
                warn!(
                    "ignoring evaluation of a position {} plies deep, above the root at ply {}",
                    position.move_history().len(),
                    self.root_path_length
                );
                return;
            }
        };
        self.root.insert(path, side, evaluation);
    }

    /// Discards the tree when an iterative-deepening pass starts over.
    ///
    /// Fires when `position` is one ply below the root, its move is already in the
    /// tree and `depth` is deeper than any pass seen so far. Must run before the
    /// evaluation of `position` is recorded. Returns whether the tree was reset.
    pub fn check_reset(&mut self, position: &S, depth: i16) -> bool {
        let history = position.move_history();
        if history.len() != self.root_path_length + 1 {
            return false;
        }

        let first_move = match history.last() {
            Some(first_move) => first_move,
            None => return false,
        };

        if !self.root.contains(first_move) || depth <= self.last_depth {
            return false;
        }

        debug!(
            "deeper pass at depth {} revisits {}, resetting tree (previous depth {})",
            depth, first_move, self.last_depth
        );
        self.root = Node::root(self.root_side());
        self.last_depth = depth;
        true
    }

    /// Annotates the finished tree: principal variation first, then the pruned
    /// frontier inferred from `generator`'s legal moves.
    ///
    /// A failure leaves the pruned frontier partially built; the tree should not be
    /// trusted afterwards.
    pub fn complete<G: MoveGenerator<S>>(
        &mut self,
        generator: &G,
    ) -> Result<(), AnnotateError<MoveError<S>>> {
        mark_principal_variation(&mut self.root);

        let mut shadow_position = self.root_position.clone();
        mark_pruned(&mut self.root, &mut shadow_position, generator)?;

        debug!("search tree complete: {:?}", self.stats());
        Ok(())
    }

    pub fn stats(&self) -> TreeStats {
        TreeStats::collect(&self.root)
    }

    /// Looks up the node at `path` without creating anything.
    pub fn find(&self, path: &[S::Move]) -> Option<&Node<S::Move>> {
        self.root.find(path)
    }

    /// Returns the node at `path`, creating unscored placeholders for unknown steps.
    pub fn resolve(&mut self, path: &[S::Move]) -> &mut Node<S::Move> {
        self.root.resolve(path)
    }
}

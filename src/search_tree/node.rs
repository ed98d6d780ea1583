use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::game::Side;

/// What a search reported for one position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Evaluation {
    /// White-positive score backed up at the position.
    pub score: i16,
    pub depth: Option<i16>,
    pub alpha: Option<i16>,
    pub beta: Option<i16>,
    pub is_quiescence: bool,
}

impl Evaluation {
    pub fn new(score: i16) -> Self {
        Self {
            score,
            depth: None,
            alpha: None,
            beta: None,
            is_quiescence: false,
        }
    }

    pub fn with_depth(mut self, depth: i16) -> Self {
        self.depth = Some(depth);
        self
    }

    pub fn with_window(mut self, alpha: i16, beta: i16) -> Self {
        self.alpha = Some(alpha);
        self.beta = Some(beta);
        self
    }

    pub fn quiescence(mut self) -> Self {
        self.is_quiescence = true;
        self
    }
}

/// One position of a reconstructed search tree, reached from the root by exactly
/// one move path.
///
/// Children keep their insertion order so that drawings are deterministic; the
/// index maps each move to its slot in `children`.
#[derive(Clone, Debug)]
pub struct Node<M> {
    is_root: bool,
    children: Vec<(M, Node<M>)>,
    index: FxHashMap<M, usize>,
    score: Option<i16>,
    depth: Option<i16>,
    alpha: Option<i16>,
    beta: Option<i16>,
    side_to_move: Side,
    is_quiescence: bool,
    is_pruned: bool,
    is_principal_variation: bool,
}

impl<M: Clone + Eq + Hash> Node<M> {
    pub fn new(side_to_move: Side) -> Self {
        Self {
            is_root: false,
            children: Vec::new(),
            index: FxHashMap::default(),
            score: None,
            depth: None,
            alpha: None,
            beta: None,
            side_to_move,
            is_quiescence: false,
            is_pruned: false,
            is_principal_variation: false,
        }
    }

    pub fn root(side_to_move: Side) -> Self {
        Self {
            is_root: true,
            ..Self::new(side_to_move)
        }
    }

    pub fn is_root(&self) -> bool {
        self.is_root
    }

    pub fn score(&self) -> Option<i16> {
        self.score
    }

    pub fn depth(&self) -> Option<i16> {
        self.depth
    }

    pub fn alpha(&self) -> Option<i16> {
        self.alpha
    }

    pub fn beta(&self) -> Option<i16> {
        self.beta
    }

    pub fn side_to_move(&self) -> Side {
        self.side_to_move
    }

    pub fn is_quiescence(&self) -> bool {
        self.is_quiescence
    }

    pub fn is_pruned(&self) -> bool {
        self.is_pruned
    }

    pub fn is_principal_variation(&self) -> bool {
        self.is_principal_variation
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Children in insertion order.
    pub fn children(&self) -> impl Iterator<Item = (&M, &Node<M>)> {
        self.children.iter().map(|(game_move, node)| (game_move, node))
    }

    pub(crate) fn children_mut(&mut self) -> impl Iterator<Item = (&M, &mut Node<M>)> {
        self.children
            .iter_mut()
            .map(|(game_move, node)| (&*game_move, node))
    }

    pub fn contains(&self, game_move: &M) -> bool {
        self.index.contains_key(game_move)
    }

    /// Looks up a child without creating it.
    pub fn child(&self, game_move: &M) -> Option<&Node<M>> {
        self.index.get(game_move).map(|&slot| &self.children[slot].1)
    }

    /// Returns the child reached by `game_move`, creating an unscored one if the
    /// move has not been seen yet. New children take the opposite side to move.
    pub fn child_or_insert(&mut self, game_move: &M) -> &mut Node<M> {
        let slot = match self.index.get(game_move).copied() {
            Some(slot) => slot,
            None => {
                let slot = self.children.len();
                let child = Node::new(self.side_to_move.opposite());
                self.children.push((game_move.clone(), child));
                self.index.insert(game_move.clone(), slot);
                slot
            }
        };
        &mut self.children[slot].1
    }

    /// Follows `path` without creating anything; `None` if any step is unknown.
    pub fn find(&self, path: &[M]) -> Option<&Node<M>> {
        path.iter()
            .try_fold(self, |node, game_move| node.child(game_move))
    }

    /// Follows `path`, creating placeholder nodes for unknown steps.
    ///
    /// This always succeeds. A placeholder has no score, so callers that need to
    /// tell recorded positions from synthesized ones check `score()`.
    pub fn resolve(&mut self, path: &[M]) -> &mut Node<M> {
        path.iter()
            .fold(self, |node, game_move| node.child_or_insert(game_move))
    }

    /// Records `evaluation` at the end of `path`, creating intermediate nodes on the
    /// way. The side to move alternates per ply starting from `side_to_move`; a path
    /// recorded twice keeps the later evaluation.
    pub fn insert(&mut self, path: &[M], side_to_move: Side, evaluation: Evaluation) {
        let mut node = self;
        let mut side = side_to_move;
        node.side_to_move = side;
        for game_move in path {
            side = side.opposite();
            node = node.child_or_insert(game_move);
            node.side_to_move = side;
        }
        node.set_evaluation(evaluation);
    }

    fn set_evaluation(&mut self, evaluation: Evaluation) {
        self.score = Some(evaluation.score);
        self.depth = evaluation.depth;
        self.alpha = evaluation.alpha;
        self.beta = evaluation.beta;
        self.is_quiescence = evaluation.is_quiescence;
    }

    pub(crate) fn set_principal_variation(&mut self) {
        self.is_principal_variation = true;
    }

    pub(crate) fn insert_pruned(&mut self, game_move: &M) {
        let is_quiescence = self.is_quiescence;
        let child = self.child_or_insert(game_move);
        child.is_pruned = true;
        child.is_quiescence = is_quiescence;
    }
}

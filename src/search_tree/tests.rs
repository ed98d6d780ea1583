//! Tests for building, resetting, annotating and querying search trees.
//!
//! Test coverage:
//! - Insertion and lookup (round trip, lazy intermediate nodes, overwrite)
//! - Reset policy (iterative deepening passes, non-firing cases)
//! - Principal variation (unscored and scored roots, ties, closure)
//! - Pruned frontier (completeness, disjointness, leaves left alone, quiescence)
//! - Statistics (additivity, no mutation)
//! - Shadow position restored when annotation fails
//! - The chess opening scenario with scripted first moves

use std::collections::HashSet;
use std::fmt;

use super::annotate::mark_pruned;
use super::*;
use crate::game::{GameMove, GameState, MoveGenerator, Side};
use crate::tictactoe::{Board, Cell, GameError, TicTacToeMoveGenerator};

const WHITE_FIRST_MOVES: [&str; 20] = [
    "a2a3", "a2a4", "b2b3", "b2b4", "c2c3", "c2c4", "d2d3", "d2d4", "e2e3", "e2e4", "f2f3",
    "f2f4", "g2g3", "g2g4", "h2h3", "h2h4", "b1a3", "b1c3", "g1f3", "g1h3",
];

const BLACK_REPLIES: [&str; 20] = [
    "a7a6", "a7a5", "b7b6", "b7b5", "c7c6", "c7c5", "d7d6", "d7d5", "e7e6", "e7e5", "f7f6",
    "f7f5", "g7g6", "g7g5", "h7h6", "h7h5", "b8a6", "b8c6", "g8f6", "g8h6",
];

/// A chess move in UCI notation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct Uci(&'static str);

impl fmt::Display for Uci {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The first two plies of chess from the starting position; later plies have no
/// legal moves.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct Opening {
    history: Vec<Uci>,
}

impl GameState for Opening {
    type Move = Uci;

    fn side_to_move(&self) -> Side {
        if self.history.len() % 2 == 0 {
            Side::White
        } else {
            Side::Black
        }
    }

    fn move_history(&self) -> &[Uci] {
        &self.history
    }
}

impl GameMove for Uci {
    type State = Opening;
    type Error = &'static str;

    fn apply(&self, state: &mut Opening) -> Result<(), Self::Error> {
        state.history.push(*self);
        Ok(())
    }

    fn undo(&self, state: &mut Opening) -> Result<(), Self::Error> {
        if state.history.last() != Some(self) {
            return Err("not the last move");
        }
        state.history.pop();
        Ok(())
    }
}

#[derive(Clone)]
struct OpeningMoves;

impl MoveGenerator<Opening> for OpeningMoves {
    type MoveList = Vec<Uci>;

    fn generate_moves(&self, state: &mut Opening) -> Result<Vec<Uci>, &'static str> {
        let moves = match state.history.len() {
            0 => WHITE_FIRST_MOVES.iter().map(|&m| Uci(m)).collect(),
            1 => BLACK_REPLIES.iter().map(|&m| Uci(m)).collect(),
            _ => Vec::new(),
        };
        Ok(moves)
    }
}

fn opening(moves: &[&'static str]) -> Opening {
    Opening {
        history: moves.iter().map(|&m| Uci(m)).collect(),
    }
}

fn path(moves: &[&'static str]) -> Vec<Uci> {
    moves.iter().map(|&m| Uci(m)).collect()
}

fn cells(moves: &[&str]) -> Vec<Cell> {
    moves.iter().map(|cell| cell.parse().unwrap()).collect()
}

/// Builds the tree of the chess opening scenario: e2e4 (10), e2e4 e7e5 (-10), d2d4 (5).
fn opening_tree() -> SearchTree<Opening> {
    let mut tree = SearchTree::new(&Opening::default());
    tree.insert(&path(&["e2e4"]), Side::White, Evaluation::new(10).with_depth(1));
    tree.insert(
        &path(&["e2e4", "e7e5"]),
        Side::White,
        Evaluation::new(-10).with_depth(2),
    );
    tree.insert(&path(&["d2d4"]), Side::White, Evaluation::new(5).with_depth(1));
    tree
}

fn moves_of<M: Clone + Eq + std::hash::Hash>(
    node: &Node<M>,
    pruned: bool,
) -> HashSet<M> {
    node.children()
        .filter(|(_, child)| child.is_pruned() == pruned)
        .map(|(game_move, _)| game_move.clone())
        .collect()
}

/// Checks every expanded node: recorded and pruned children are disjoint and
/// together are exactly the legal moves of the node's position.
fn assert_frontier_complete(node: &Node<Cell>, board: &mut Board) {
    if !node.has_children() {
        return;
    }

    let recorded = moves_of(node, false);
    let pruned = moves_of(node, true);
    assert!(recorded.is_disjoint(&pruned));

    let legal: HashSet<Cell> = TicTacToeMoveGenerator
        .generate_moves(board)
        .unwrap()
        .into_iter()
        .collect();
    let union: HashSet<Cell> = recorded.union(&pruned).copied().collect();
    assert_eq!(union, legal, "frontier mismatch at {:?}", board.move_history());

    for (game_move, child) in node.children() {
        if child.is_pruned() {
            assert!(!child.has_children());
            assert!(child.depth().is_none());
            assert!(child.alpha().is_none());
            assert!(child.beta().is_none());
            continue;
        }
        game_move.apply(board).unwrap();
        assert_frontier_complete(child, board);
        game_move.undo(board).unwrap();
    }
}

fn count_where<M: Clone + Eq + std::hash::Hash>(
    node: &Node<M>,
    predicate: &dyn Fn(&Node<M>) -> bool,
) -> usize {
    let own = if predicate(node) { 1 } else { 0 };
    own + node
        .children()
        .map(|(_, child)| count_where(child, predicate))
        .sum::<usize>()
}

#[test]
fn test_insert_round_trip() {
    let mut tree = SearchTree::new(&Opening::default());
    let evaluation = Evaluation::new(-35).with_depth(3).with_window(-50, 20);
    tree.insert(&path(&["g1f3", "d7d5"]), Side::White, evaluation);

    let node = tree.find(&path(&["g1f3", "d7d5"])).unwrap();
    assert_eq!(node.score(), Some(-35));
    assert_eq!(node.depth(), Some(3));
    assert_eq!(node.alpha(), Some(-50));
    assert_eq!(node.beta(), Some(20));
    assert!(!node.is_quiescence());

    let resolved = tree.resolve(&path(&["g1f3", "d7d5"]));
    assert_eq!(resolved.score(), Some(-35));
}

#[test]
fn test_insert_creates_unscored_intermediate_nodes() {
    let mut tree = SearchTree::new(&Opening::default());
    tree.insert(&path(&["g1f3", "d7d5"]), Side::White, Evaluation::new(1));

    let intermediate = tree.find(&path(&["g1f3"])).unwrap();
    assert!(intermediate.score().is_none());
    assert_eq!(intermediate.side_to_move(), Side::Black);
    assert_eq!(intermediate.child_count(), 1);
}

#[test]
fn test_record_uses_moves_played_since_root() {
    let root = opening(&["e2e4"]);
    let mut tree = SearchTree::new(&root);
    assert_eq!(tree.root_path_length(), 1);
    assert_eq!(tree.root_side(), Side::Black);

    tree.record(
        &opening(&["e2e4", "c7c5"]),
        Evaluation::new(30).quiescence(),
    );

    let node = tree.find(&path(&["c7c5"])).unwrap();
    assert_eq!(node.score(), Some(30));
    assert!(node.is_quiescence());
    assert_eq!(node.side_to_move(), Side::White);
    assert!(tree.find(&path(&["e2e4"])).is_none());
}

#[test]
fn test_record_ignores_positions_above_root() {
    let mut tree = SearchTree::new(&opening(&["e2e4", "e7e5"]));
    tree.record(&opening(&["e2e4"]), Evaluation::new(40).with_depth(3));
    tree.record(&Opening::default(), Evaluation::new(-40));

    assert!(tree.root().score().is_none());
    assert!(tree.root().depth().is_none());
    assert!(!tree.root().has_children());
}

#[test]
fn test_reset_on_deeper_pass() {
    let mut tree = SearchTree::new(&Opening::default());

    // depth 1 pass
    for first_move in ["e2e4", "d2d4"] {
        let position = opening(&[first_move]);
        assert!(!tree.check_reset(&position, 0));
        tree.record(&position, Evaluation::new(0).with_depth(0));
    }

    // depth 2 pass revisits e2e4
    let position = opening(&["e2e4"]);
    assert!(tree.check_reset(&position, 1));
    assert_eq!(tree.last_depth(), 1);
    assert!(!tree.root().has_children());

    tree.record(
        &opening(&["e2e4", "e7e5"]),
        Evaluation::new(-10).with_depth(0),
    );
    tree.record(&position, Evaluation::new(-10).with_depth(1));
    assert!(!tree.check_reset(&opening(&["d2d4"]), 1));
    tree.record(&opening(&["d2d4"]), Evaluation::new(3).with_depth(1));

    for (_, child) in tree.root().children() {
        assert_eq!(child.depth(), Some(1));
    }
    assert_eq!(tree.root().child_count(), 2);
}

#[test]
fn test_reset_ignores_unseen_moves_and_shallower_depths() {
    let mut tree = SearchTree::new(&Opening::default());
    assert!(!tree.check_reset(&opening(&["e2e4"]), 3));

    tree.record(&opening(&["e2e4"]), Evaluation::new(0).with_depth(3));
    assert!(tree.check_reset(&opening(&["e2e4"]), 3));
    tree.record(&opening(&["e2e4"]), Evaluation::new(0).with_depth(3));

    // not deeper than the pass that last reset
    assert!(!tree.check_reset(&opening(&["e2e4"]), 3));
    assert!(!tree.check_reset(&opening(&["e2e4"]), 2));
}

#[test]
fn test_reset_only_considers_first_ply() {
    let mut tree = SearchTree::new(&Opening::default());
    tree.record(&opening(&["e2e4"]), Evaluation::new(0));
    tree.record(&opening(&["e2e4", "e7e5"]), Evaluation::new(0));

    assert!(!tree.check_reset(&opening(&["e2e4", "e7e5"]), 5));
    assert!(!tree.check_reset(&Opening::default(), 5));
    assert!(tree.find(&path(&["e2e4", "e7e5"])).is_some());
}

#[test]
fn test_init_discards_previous_search() {
    let mut tree = opening_tree();
    tree.init(&opening(&["d2d4"]));

    assert!(!tree.root().has_children());
    assert_eq!(tree.root_path_length(), 1);
    assert_eq!(tree.last_depth(), 0);
    assert_eq!(tree.root_side(), Side::Black);
}

#[test]
fn test_opening_pruned_first_moves() {
    let mut tree = opening_tree();
    tree.complete(&OpeningMoves).unwrap();

    let root = tree.root();
    assert_eq!(root.child_count(), 20);
    assert!(!root.is_pruned());

    for (game_move, child) in root.children() {
        let expected_pruned = !matches!(game_move.0, "e2e4" | "d2d4");
        assert_eq!(child.is_pruned(), expected_pruned, "{}", game_move);
    }

    // e2e4 was expanded, so the replies black never tried are pruned
    let e2e4 = tree.find(&path(&["e2e4"])).unwrap();
    assert_eq!(e2e4.child_count(), 20);
    assert_eq!(moves_of(e2e4, true).len(), 19);
    assert!(!e2e4.child(&Uci("e7e5")).unwrap().is_pruned());

    // d2d4 is a leaf and is not expanded
    assert!(!tree.find(&path(&["d2d4"])).unwrap().has_children());
}

#[test]
fn test_opening_pv_with_unscored_root() {
    let mut tree = opening_tree();
    tree.complete(&OpeningMoves).unwrap();

    assert!(tree.root().is_principal_variation());
    assert!(tree.find(&path(&["e2e4"])).unwrap().is_principal_variation());
    assert!(tree.find(&path(&["d2d4"])).unwrap().is_principal_variation());
    assert!(!tree
        .find(&path(&["e2e4", "e7e5"]))
        .unwrap()
        .is_principal_variation());
    assert!(!tree.find(&path(&["c2c4"])).unwrap().is_principal_variation());
}

#[test]
fn test_opening_pv_follows_root_score() {
    for (root_score, principal, other) in [(10, "e2e4", "d2d4"), (5, "d2d4", "e2e4")] {
        let mut tree = opening_tree();
        tree.insert(&[], Side::White, Evaluation::new(root_score).with_depth(2));
        tree.complete(&OpeningMoves).unwrap();

        assert!(tree.root().is_principal_variation());
        assert!(tree.find(&path(&[principal])).unwrap().is_principal_variation());
        assert!(!tree.find(&path(&[other])).unwrap().is_principal_variation());
    }
}

#[test]
fn test_pv_marks_every_tie() {
    let mut tree = SearchTree::new(&Opening::default());
    tree.insert(&[], Side::White, Evaluation::new(0));
    tree.insert(&path(&["e2e4"]), Side::White, Evaluation::new(0));
    tree.insert(&path(&["e2e4", "e7e5"]), Side::White, Evaluation::new(0));
    tree.insert(&path(&["e2e4", "c7c5"]), Side::White, Evaluation::new(0));
    tree.insert(&path(&["e2e4", "d7d5"]), Side::White, Evaluation::new(-20));
    tree.complete(&OpeningMoves).unwrap();

    assert!(tree.find(&path(&["e2e4", "e7e5"])).unwrap().is_principal_variation());
    assert!(tree.find(&path(&["e2e4", "c7c5"])).unwrap().is_principal_variation());
    assert!(!tree.find(&path(&["e2e4", "d7d5"])).unwrap().is_principal_variation());
}

#[test]
fn test_pv_children_need_pv_parent() {
    let mut tree = SearchTree::new(&Opening::default());
    tree.insert(&[], Side::White, Evaluation::new(7));
    tree.insert(&path(&["e2e4"]), Side::White, Evaluation::new(2));
    tree.insert(&path(&["e2e4", "e7e5"]), Side::White, Evaluation::new(2));
    tree.insert(&path(&["d2d4"]), Side::White, Evaluation::new(7));
    tree.complete(&OpeningMoves).unwrap();

    // e7e5 ties its parent but the parent is off the variation
    assert!(!tree.find(&path(&["e2e4"])).unwrap().is_principal_variation());
    assert!(!tree.find(&path(&["e2e4", "e7e5"])).unwrap().is_principal_variation());
}

#[test]
fn test_pruned_children_inherit_quiescence() {
    let mut tree = SearchTree::new(&Opening::default());
    tree.insert(&path(&["e2e4"]), Side::White, Evaluation::new(0).quiescence());
    tree.insert(
        &path(&["e2e4", "e7e5"]),
        Side::White,
        Evaluation::new(0).quiescence(),
    );
    tree.complete(&OpeningMoves).unwrap();

    let e2e4 = tree.find(&path(&["e2e4"])).unwrap();
    for (_, child) in e2e4.children().filter(|(_, child)| child.is_pruned()) {
        assert!(child.is_quiescence());
    }
    // the root is a main-search node, so its pruned children are too
    let c2c4 = tree.find(&path(&["c2c4"])).unwrap();
    assert!(c2c4.is_pruned());
    assert!(!c2c4.is_quiescence());

    let stats = tree.stats();
    assert_eq!(stats.quiescence_pruned, 19);
    assert_eq!(stats.pruned, 19);
    assert_eq!(stats.quiescence_visited, 2);
    assert_eq!(stats.visited, 1);
}

#[test]
fn test_tictactoe_frontier_complete() {
    let mut tree = SearchTree::new(&Board::new());
    let lines: [&[&str]; 4] = [
        &["b2"],
        &["b2", "a1"],
        &["b2", "a1", "c3"],
        &["a1", "b2", "c3", "a3"],
    ];
    for (score, line) in lines.iter().enumerate() {
        let board = Board::from_moves(&cells(line)).unwrap();
        tree.record(&board, Evaluation::new(score as i16));
    }
    tree.complete(&TicTacToeMoveGenerator).unwrap();

    assert_frontier_complete(tree.root(), &mut Board::new());
    // the root position is left as it was
    assert_eq!(tree.root_position(), &Board::new());
}

#[test]
fn test_frontier_skips_unexpanded_leaves() {
    let mut tree = SearchTree::new(&Board::new());
    tree.record(
        &Board::from_moves(&cells(&["b2"])).unwrap(),
        Evaluation::new(4),
    );
    tree.complete(&TicTacToeMoveGenerator).unwrap();

    let b2 = tree.find(&cells(&["b2"])).unwrap();
    assert!(!b2.has_children());
    assert_eq!(tree.root().child_count(), 9);
}

#[test]
fn test_stats_additivity() {
    let mut tree = opening_tree();
    tree.insert(
        &path(&["d2d4", "d7d5"]),
        Side::White,
        Evaluation::new(5).quiescence(),
    );
    tree.complete(&OpeningMoves).unwrap();

    let stats = tree.stats();
    let main_nodes = count_where(tree.root(), &|node: &Node<Uci>| !node.is_quiescence());
    let quiescence_nodes = count_where(tree.root(), &|node: &Node<Uci>| node.is_quiescence());
    assert_eq!(stats.visited + stats.pruned, main_nodes);
    assert_eq!(
        stats.quiescence_visited + stats.quiescence_pruned,
        quiescence_nodes
    );
    assert_eq!(stats.total(), main_nodes + quiescence_nodes);

    // collecting twice yields the same counts
    assert_eq!(tree.stats(), stats);
}

#[test]
fn test_failed_annotation_restores_shadow_position() {
    let mut root = Node::root(Side::White);
    // b2 twice cannot be played
    root.insert(&cells(&["b2", "b2"]), Side::White, Evaluation::new(0));

    let mut board = Board::new();
    let result = mark_pruned(&mut root, &mut board, &TicTacToeMoveGenerator);

    match result {
        Err(AnnotateError::Apply { game_move, error }) => {
            assert_eq!(game_move, "b2");
            assert_eq!(error, GameError::Occupied(cells(&["b2"])[0]));
        }
        other => panic!("expected an apply failure, got {:?}", other),
    }
    assert_eq!(board, Board::new());
}

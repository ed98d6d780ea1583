//! Post-processing passes over a finished search tree.

use std::fmt::Debug;
use std::hash::Hash;

use log::trace;
use thiserror::Error;

use super::node::Node;
use crate::game::{GameState, MoveError, MoveGenerator, MoveGuard};

/// A rules collaborator failure during pruned-branch inference.
#[derive(Error, Debug)]
pub enum AnnotateError<E: Debug> {
    #[error("could not apply {game_move} to the shadow position: {error:?}")]
    Apply { game_move: String, error: E },
    #[error("could not undo {game_move} on the shadow position: {error:?}")]
    Undo { game_move: String, error: E },
    #[error("could not enumerate legal moves: {0:?}")]
    MoveGeneration(E),
}

/// Marks the principal variation below `root`.
///
/// The root is always on it. A child joins when its score equals its parent's,
/// except that an unscored root (every first move evaluated separately) puts all of
/// its children on it. Every child that ties its parent is marked, so the variation
/// is not necessarily a single line.
pub(crate) fn mark_principal_variation<M: Clone + Eq + Hash>(root: &mut Node<M>) {
    root.set_principal_variation();
    let root_score = root.score();
    for (_, child) in root.children_mut() {
        if root_score.is_none() || root_score == child.score() {
            mark_line(child);
        }
    }
}

fn mark_line<M: Clone + Eq + Hash>(node: &mut Node<M>) {
    node.set_principal_variation();
    let score = node.score();
    for (_, child) in node.children_mut() {
        if score.is_some() && score == child.score() {
            mark_line(child);
        }
    }
}

/// Adds a pruned child for every legal move the search never visited.
///
/// Only expanded nodes are inspected: a node without recorded children is a leaf
/// and its legal moves are not materialized. `state` must be the position of
/// `node`; it is restored before this returns, including on error.
pub(crate) fn mark_pruned<S, G>(
    node: &mut Node<S::Move>,
    state: &mut S,
    generator: &G,
) -> Result<(), AnnotateError<MoveError<S>>>
where
    S: GameState,
    G: MoveGenerator<S>,
{
    if !node.has_children() {
        return Ok(());
    }

    for (game_move, child) in node.children_mut() {
        let mut guard =
            MoveGuard::apply(game_move, state).map_err(|error| AnnotateError::Apply {
                game_move: game_move.to_string(),
                error,
            })?;
        mark_pruned(child, guard.state(), generator)?;
        guard.finish().map_err(|error| AnnotateError::Undo {
            game_move: game_move.to_string(),
            error,
        })?;
    }

    let legal_moves = generator
        .generate_moves(state)
        .map_err(AnnotateError::MoveGeneration)?;

    for game_move in legal_moves.as_ref() {
        if !node.contains(game_move) {
            trace!("pruned {}", game_move);
            node.insert_pruned(game_move);
        }
    }

    Ok(())
}

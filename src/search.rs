//! Minimax over a fully built game tree.
//!
//! No pruning: every child of every node is scored. Ties go to the later
//! child in enumeration order (`>=` at maximizing nodes, `<=` at minimizing
//! nodes).

use crate::board::{Pit, Player};
use crate::evaluate::{Evaluator, Score};
use crate::tree::GameTreeNode;

/// Score `node` for `player` and pick the move leading to the best child.
///
/// A leaf is scored by `evaluator` and reports the move that produced it.
/// An internal node reports the move of its optimal child, so the root
/// returns one of its own legal moves. A depth-0 root has no move and
/// yields `None`.
pub fn minimax(node: &GameTreeNode, evaluator: Evaluator, player: Player) -> (Score, Option<Pit>) {
    if node.is_leaf() {
        return (evaluator(&node.board, player), node.mv);
    }

    let mut best_score = if node.maximizing { Score::MIN } else { Score::MAX };
    let mut best_move = None;

    for child in &node.children {
        let (score, _) = minimax(child, evaluator, player);
        let better = if node.maximizing {
            score >= best_score
        } else {
            score <= best_score
        };
        if better {
            best_score = score;
            best_move = child.mv;
        }
    }

    (best_score, best_move)
}

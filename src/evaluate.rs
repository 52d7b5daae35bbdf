//! Leaf evaluation for the search agents.
//!
//! Scores are always from the searching player's point of view: the
//! maximizing layers of the tree belong to that player.

use crate::board::{Board, Player};
use crate::constants::WIN_SCORE;

/// Signed evaluation of a position.
pub type Score = i32;

/// A leaf scoring function, carried by each search agent as data.
pub type Evaluator = fn(&Board, Player) -> Score;

/// Store difference: `player`'s store minus the opponent's.
#[inline]
pub fn material(board: &Board, player: Player) -> Score {
    board.store(player) as Score - board.store(player.other()) as Score
}

/// Material difference, saturated to `±WIN_SCORE` once a side is exhausted.
///
/// The outcome of a terminal position is decided the way the match
/// controller decides it: remaining pit stones go to their owners.
pub fn minimax_score(board: &Board, player: Player) -> Score {
    if !board.is_terminal() {
        return material(board, player);
    }
    match board.finish().winner() {
        Some(winner) if winner == player => WIN_SCORE,
        Some(_) => -WIN_SCORE,
        None => 0,
    }
}

/// Absolute material difference: the most lopsided position scores highest,
/// whichever side it favours.
pub fn hill_climb_score(board: &Board, player: Player) -> Score {
    material(board, player).abs()
}

//! Kalah board representation and the sowing transition.
//!
//! The board holds two rows of pits and two stores. A move never mutates the
//! board it is applied to: [`Board::apply`] returns a fresh board, so the same
//! function serves both the live match and hypothetical search lines.
//!
//! Stones travel around a ring of [`RING_LEN`] slots as seen by the mover:
//! their own pits (in index order), their own store, then the opponent's pits.
//! The opponent's store is never part of the ring.

use std::fmt;

use crate::constants::{PITS, RING_LEN, STONES_PER_PIT};
use crate::error::MoveError;

/// A pit index in `0..PITS`, counted from the mover's left towards their store.
pub type Pit = usize;

/// One of the two sides of the board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Player {
    One,
    Two,
}

impl Player {
    /// Row index of this player in [`Board::pits`] and [`Board::stores`].
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Player::One => 0,
            Player::Two => 1,
        }
    }

    /// The player on the other side of the board.
    #[inline]
    pub fn other(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// Player number as shown to humans (1 or 2).
    pub fn number(self) -> u8 {
        self.index() as u8 + 1
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// Result of applying a legal move.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Transition {
    /// The board after sowing (and capturing, when enabled).
    pub board: Board,
    /// The last stone landed in the mover's own store: they move again.
    pub free_turn: bool,
}

/// A Kalah position: pit and store counts for both players.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    /// `pits[0]` belongs to player one, `pits[1]` to player two.
    pub pits: [[u8; PITS]; 2],
    /// Stores, indexed like `pits`.
    pub stores: [u8; 2],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// The opening position: four stones in every pit, empty stores.
    pub fn new() -> Self {
        Self {
            pits: [[STONES_PER_PIT; PITS]; 2],
            stores: [0; 2],
        }
    }

    /// Build a board from its four sequences, in play order.
    pub fn from_parts(p1_pits: [u8; PITS], p1_store: u8, p2_pits: [u8; PITS], p2_store: u8) -> Self {
        Self {
            pits: [p1_pits, p2_pits],
            stores: [p1_store, p2_store],
        }
    }

    /// Pits of the given player.
    #[inline]
    pub fn side(&self, player: Player) -> &[u8; PITS] {
        &self.pits[player.index()]
    }

    /// Store count of the given player.
    #[inline]
    pub fn store(&self, player: Player) -> u8 {
        self.stores[player.index()]
    }

    /// Sum of every pit and store on the board.
    pub fn total_stones(&self) -> u32 {
        self.pits.iter().flatten().chain(self.stores.iter()).map(|&s| s as u32).sum()
    }

    /// Pits the player may sow from (any non-empty pit), in index order.
    pub fn legal_moves(&self, player: Player) -> Vec<Pit> {
        self.side(player)
            .iter()
            .enumerate()
            .filter(|&(_, &stones)| stones > 0)
            .map(|(pit, _)| pit)
            .collect()
    }

    /// Whether every pit on the player's side is empty.
    pub fn side_empty(&self, player: Player) -> bool {
        self.side(player).iter().all(|&s| s == 0)
    }

    /// The game is over once either side has run out of stones.
    pub fn is_terminal(&self) -> bool {
        self.side_empty(Player::One) || self.side_empty(Player::Two)
    }

    /// Sow from `pit` on behalf of `player`.
    ///
    /// All stones are lifted from the pit and dropped one per slot around the
    /// ring, skipping the opponent's store. The input board is left untouched.
    ///
    /// # Errors
    /// - [`MoveError::OutOfRange`] if `pit >= PITS`
    /// - [`MoveError::EmptyPit`] if the pit holds no stones
    pub fn apply(&self, player: Player, pit: Pit) -> Result<Transition, MoveError> {
        if pit >= PITS {
            return Err(MoveError::OutOfRange { pit });
        }
        let me = player.index();
        let opp = player.other().index();

        let mut next = *self;
        let mut stones = next.pits[me][pit];
        if stones == 0 {
            return Err(MoveError::EmptyPit { pit });
        }
        next.pits[me][pit] = 0;

        let mut slot = pit;
        while stones > 0 {
            slot = (slot + 1) % RING_LEN;
            match slot {
                s if s < PITS => next.pits[me][s] += 1,
                PITS => next.stores[me] += 1,
                s => next.pits[opp][s - PITS - 1] += 1,
            }
            stones -= 1;
        }

        if slot < PITS {
            capture(&mut next, me, opp, slot);
        }

        Ok(Transition {
            board: next,
            free_turn: slot == PITS,
        })
    }

    /// Sweep every stone left in the pits into its owner's store.
    ///
    /// Used by the match controller once the game is over; search scores
    /// positions as they stand.
    pub fn finish(&self) -> Board {
        let mut done = *self;
        for side in 0..2 {
            let left: u8 = done.pits[side].iter().sum();
            done.stores[side] += left;
            done.pits[side] = [0; PITS];
        }
        done
    }

    /// The player with more stones in their store, or `None` on a tie.
    pub fn winner(&self) -> Option<Player> {
        match self.stores[0].cmp(&self.stores[1]) {
            std::cmp::Ordering::Greater => Some(Player::One),
            std::cmp::Ordering::Less => Some(Player::Two),
            std::cmp::Ordering::Equal => None,
        }
    }
}

/// Kalah capture: the last stone landed alone in an own pit facing stones.
fn capture(board: &mut Board, me: usize, opp: usize, slot: usize) {
    if !cfg!(feature = "capture") {
        return;
    }
    let opposite = PITS - 1 - slot;
    let taken = board.pits[opp][opposite];
    if board.pits[me][slot] == 1 && taken > 0 {
        board.pits[opp][opposite] = 0;
        board.pits[me][slot] = 0;
        board.stores[me] += taken + 1;
    }
}

impl fmt::Display for Board {
    /// Three lines: player two's pits right to left, the stores (player two on
    /// the left), then player one's pits left to right.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "  ")?;
        for stones in self.pits[1].iter().rev() {
            write!(f, " {stones:>2}")?;
        }
        writeln!(f)?;
        writeln!(f, "{:>2}{:>width$}", self.stores[1], self.stores[0], width = 3 * PITS + 3)?;
        write!(f, "  ")?;
        for stones in &self.pits[0] {
            write!(f, " {stones:>2}")?;
        }
        writeln!(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::TOTAL_STONES;

    #[test]
    fn test_new_board() {
        let board = Board::new();
        assert_eq!(board.side(Player::One), &[4; PITS]);
        assert_eq!(board.side(Player::Two), &[4; PITS]);
        assert_eq!(board.stores, [0, 0]);
        assert_eq!(board.total_stones(), TOTAL_STONES);
        assert!(!board.is_terminal());
    }

    #[test]
    fn test_opening_move_earns_free_turn() {
        let board = Board::new();
        let t = board.apply(Player::One, 2).unwrap();
        assert_eq!(t.board.side(Player::One), &[4, 4, 0, 5, 5, 5]);
        assert_eq!(t.board.store(Player::One), 1);
        assert_eq!(t.board.side(Player::Two), &[4; PITS]);
        assert!(t.free_turn);
    }

    #[test]
    fn test_move_without_free_turn() {
        let board = Board::new();
        let t = board.apply(Player::One, 0).unwrap();
        assert_eq!(t.board.side(Player::One), &[0, 5, 5, 5, 5, 4]);
        assert_eq!(t.board.store(Player::One), 0);
        assert!(!t.free_turn);
    }

    #[test]
    fn test_player_two_sows_into_own_store() {
        let board = Board::new();
        let t = board.apply(Player::Two, 5).unwrap();
        assert_eq!(t.board.store(Player::Two), 1);
        assert_eq!(t.board.store(Player::One), 0);
        assert_eq!(t.board.side(Player::One), &[5, 5, 5, 4, 4, 4]);
        assert!(!t.free_turn);
    }

    #[test]
    fn test_sowing_skips_opponent_store() {
        let board = Board::from_parts([2, 0, 0, 0, 0, 8], 0, [0; PITS], 0);
        let t = board.apply(Player::One, 5).unwrap();
        assert_eq!(t.board.store(Player::One), 1);
        assert_eq!(t.board.side(Player::Two), &[1; PITS]);
        assert_eq!(t.board.store(Player::Two), 0, "opponent store is skipped");
        // Eighth stone wraps around to our own first pit.
        assert_eq!(t.board.side(Player::One)[0], 3);
        assert!(!t.free_turn);
    }

    #[test]
    fn test_out_of_range_rejected() {
        let board = Board::new();
        assert_eq!(
            board.apply(Player::One, PITS),
            Err(MoveError::OutOfRange { pit: PITS })
        );
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_empty_pit_rejected() {
        let board = Board::from_parts([0, 1, 1, 1, 1, 1], 0, [4; PITS], 0);
        let before = board;
        assert_eq!(board.apply(Player::One, 0), Err(MoveError::EmptyPit { pit: 0 }));
        assert_eq!(board, before);
    }

    #[test]
    fn test_legal_moves() {
        let board = Board::from_parts([0, 2, 0, 1, 0, 0], 0, [4; PITS], 0);
        assert_eq!(board.legal_moves(Player::One), vec![1, 3]);
        assert_eq!(board.legal_moves(Player::Two), (0..PITS).collect::<Vec<_>>());
    }

    #[test]
    fn test_stone_conservation_random_play() {
        let mut rng = fastrand::Rng::with_seed(7);
        for _ in 0..50 {
            let mut board = Board::new();
            let mut player = Player::One;
            while !board.is_terminal() {
                let moves = board.legal_moves(player);
                let pit = moves[rng.usize(..moves.len())];
                let t = board.apply(player, pit).unwrap();
                assert_eq!(t.board.total_stones(), TOTAL_STONES);
                board = t.board;
                if !t.free_turn {
                    player = player.other();
                }
            }
            assert_eq!(board.finish().total_stones(), TOTAL_STONES);
        }
    }

    #[cfg(feature = "capture")]
    #[test]
    fn test_capture_opposite_pit() {
        let board = Board::from_parts([1, 0, 0, 0, 0, 0], 0, [0, 0, 0, 0, 5, 0], 0);
        let t = board.apply(Player::One, 0).unwrap();
        assert_eq!(t.board.side(Player::One), &[0; PITS]);
        assert_eq!(t.board.side(Player::Two)[4], 0);
        assert_eq!(t.board.store(Player::One), 6);
        assert!(!t.free_turn);
    }

    #[cfg(feature = "capture")]
    #[test]
    fn test_no_capture_facing_empty_pit() {
        let board = Board::from_parts([1, 0, 0, 0, 0, 0], 0, [3, 0, 0, 0, 0, 0], 0);
        let t = board.apply(Player::One, 0).unwrap();
        assert_eq!(t.board.side(Player::One)[1], 1);
        assert_eq!(t.board.store(Player::One), 0);
    }

    #[cfg(not(feature = "capture"))]
    #[test]
    fn test_plain_sowing_never_captures() {
        let board = Board::from_parts([1, 0, 0, 0, 0, 0], 0, [0, 0, 0, 0, 5, 0], 0);
        let t = board.apply(Player::One, 0).unwrap();
        assert_eq!(t.board.side(Player::One)[1], 1);
        assert_eq!(t.board.side(Player::Two)[4], 5);
        assert_eq!(t.board.store(Player::One), 0);
    }

    #[test]
    fn test_finish_and_winner() {
        let board = Board::from_parts([0; PITS], 20, [1, 2, 0, 0, 0, 3], 22);
        assert!(board.is_terminal());
        let done = board.finish();
        assert_eq!(done.stores, [20, 28]);
        assert_eq!(done.winner(), Some(Player::Two));
        assert_eq!(Board::from_parts([0; PITS], 24, [0; PITS], 24).winner(), None);
    }

    #[test]
    fn test_display_layout() {
        let board = Board::from_parts([1, 2, 3, 4, 5, 6], 7, [8, 9, 10, 11, 12, 13], 0);
        let text = board.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "   13 12 11 10  9  8");
        assert_eq!(lines[2], "    1  2  3  4  5  6");
        assert!(lines[1].starts_with(" 0"));
        assert!(lines[1].ends_with(" 7"));
    }
}

//! Match controller: turn order, human prompting, and end-of-game scoring.
//!
//! A match owns the live board and asks each seat for a pit in turn. Humans
//! type 1-based pit numbers; agents are asked through [`Agent::select_move`].
//! The chosen move is applied through [`Board::apply`], so a free turn keeps
//! the same player on move. Once either side is empty the remaining stones
//! are swept to their owners and the match is decided.
//!
//! ## Example
//!
//! ```
//! use kalah_rust::agents::Agent;
//! use kalah_rust::game::{Match, Seat};
//!
//! let mut game = Match::new(
//!     Seat::Agent(Agent::random().with_seed(1)),
//!     Seat::Agent(Agent::greedy_vector().with_seed(2)),
//! );
//! let outcome = game.play_headless().unwrap();
//! assert_eq!(outcome.scores()[0] as u32 + outcome.scores()[1] as u32, 48);
//! ```

use std::io::{self, BufRead, Write};

use log::{debug, info};

use crate::agents::Agent;
use crate::board::{Board, Pit, Player, Transition};
use crate::constants::PITS;
use crate::error::{Error, MoveError, Result};

/// Who sits on one side of the board.
#[derive(Debug)]
pub enum Seat {
    Human,
    Agent(Agent),
}

impl Seat {
    pub fn name(&self) -> &'static str {
        match self {
            Seat::Human => "Human",
            Seat::Agent(agent) => agent.name(),
        }
    }
}

/// Final result of a match.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MatchOutcome {
    /// `None` on a draw
    pub winner: Option<Player>,
    /// Board after the final sweep: all stones are in the stores
    pub board: Board,
    /// Moves applied, free turns included
    pub turns: u32,
}

impl MatchOutcome {
    /// Final store counts for player one and player two.
    pub fn scores(&self) -> [u8; 2] {
        self.board.stores
    }

    /// Absolute difference between the final stores.
    pub fn margin(&self) -> u8 {
        self.board.stores[0].abs_diff(self.board.stores[1])
    }
}

/// A match between two seats, starting from the opening position.
pub struct Match {
    board: Board,
    seats: [Seat; 2],
    to_move: Player,
    turns: u32,
}

impl Match {
    pub fn new(player1: Seat, player2: Seat) -> Self {
        Self::from_board(Board::new(), player1, player2)
    }

    /// Start a match from an arbitrary position, player one to move.
    pub fn from_board(board: Board, player1: Seat, player2: Seat) -> Self {
        Self {
            board,
            seats: [player1, player2],
            to_move: Player::One,
            turns: 0,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn to_move(&self) -> Player {
        self.to_move
    }

    pub fn turns(&self) -> u32 {
        self.turns
    }

    pub fn seat(&self, player: Player) -> &Seat {
        &self.seats[player.index()]
    }

    /// Apply `pit` for the player on move and advance the turn.
    ///
    /// The live board is left unchanged if the move is illegal.
    pub fn step(&mut self, pit: Pit) -> Result<Transition> {
        let player = self.to_move;
        let t = self.board.apply(player, pit)?;
        self.board = t.board;
        self.turns += 1;
        if !t.free_turn {
            self.to_move = player.other();
        }
        debug!(
            "turn {}: player {player} sowed pit {pit}{}",
            self.turns,
            if t.free_turn { " (free turn)" } else { "" }
        );
        Ok(t)
    }

    /// Play to the end with no human seats.
    pub fn play_headless(&mut self) -> Result<MatchOutcome> {
        self.play(&mut io::empty(), &mut io::sink())
    }

    /// Play to the end, prompting humans on `input` and narrating to `output`.
    pub fn play<R: BufRead, W: Write>(&mut self, input: &mut R, output: &mut W) -> Result<MatchOutcome> {
        while !self.board.is_terminal() {
            let player = self.to_move;
            let pit = match &mut self.seats[player.index()] {
                Seat::Human => prompt_human(&self.board, player, input, output)?,
                Seat::Agent(agent) => {
                    let pit = agent.select_move(&self.board, player)?;
                    writeln!(output, "{} (player {player}) plays pit {}", agent.name(), pit + 1)?;
                    pit
                }
            };
            self.step(pit)?;
        }

        let board = self.board.finish();
        let outcome = MatchOutcome {
            winner: board.winner(),
            board,
            turns: self.turns,
        };

        writeln!(output, "{board}")?;
        match outcome.winner {
            Some(p) => writeln!(output, "Player {p} wins {}-{}", board.stores[0], board.stores[1])?,
            None => writeln!(output, "Draw {}-{}", board.stores[0], board.stores[1])?,
        }
        info!(
            "{} vs {}: winner {:?}, {}-{} in {} turns",
            self.seats[0].name(),
            self.seats[1].name(),
            outcome.winner,
            board.stores[0],
            board.stores[1],
            self.turns
        );
        Ok(outcome)
    }
}

/// Ask a human for a legal pit until one is given.
///
/// Input is 1-based. Unparseable or illegal input re-prompts; end of input
/// is an error.
fn prompt_human<R: BufRead, W: Write>(board: &Board, player: Player, input: &mut R, output: &mut W) -> Result<Pit> {
    loop {
        write!(output, "{board}Player {player}, choose a pit (1-{PITS}): ")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Err(Error::Io(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed while waiting for a move",
            )));
        }

        let pit = match line.trim().parse::<usize>() {
            Ok(n) if n >= 1 => n - 1,
            _ => {
                writeln!(output, "Please enter a number from 1 to {PITS}.")?;
                continue;
            }
        };

        match board.apply(player, pit) {
            Ok(_) => return Ok(pit),
            Err(MoveError::OutOfRange { .. }) => writeln!(output, "There is no pit {}.", pit + 1)?,
            Err(MoveError::EmptyPit { .. }) => writeln!(output, "Pit {} is empty.", pit + 1)?,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::TOTAL_STONES;

    #[test]
    fn test_step_free_turn_keeps_player() {
        let mut game = Match::new(Seat::Human, Seat::Human);
        let t = game.step(2).unwrap();
        assert!(t.free_turn);
        assert_eq!(game.to_move(), Player::One);
        game.step(0).unwrap();
        assert_eq!(game.to_move(), Player::Two);
        assert_eq!(game.turns(), 2);
    }

    #[test]
    fn test_step_illegal_leaves_board() {
        let mut game = Match::new(Seat::Human, Seat::Human);
        game.step(2).unwrap();
        let before = *game.board();
        assert!(matches!(game.step(2), Err(Error::InvalidMove(_))));
        assert_eq!(*game.board(), before);
        assert_eq!(game.turns(), 1);
    }

    #[test]
    fn test_headless_match_conserves_stones() {
        let mut game = Match::new(
            Seat::Agent(Agent::random().with_seed(3)),
            Seat::Agent(Agent::random().with_seed(4)),
        );
        let outcome = game.play_headless().unwrap();
        assert_eq!(outcome.board.total_stones(), TOTAL_STONES);
        assert!(outcome.board.pits.iter().flatten().all(|&s| s == 0));
        assert_eq!(outcome.winner, outcome.board.winner());
        assert!(outcome.turns > 0);
    }

    #[test]
    fn test_human_reprompts_on_bad_input() {
        let mut game = Match::from_board(
            Board::from_parts([0, 0, 0, 0, 0, 1], 23, [1, 0, 0, 0, 0, 0], 23),
            Seat::Human,
            Seat::Agent(Agent::random()),
        );
        let mut input = io::Cursor::new("x\n9\n1\n6\n");
        let mut output = Vec::new();
        let outcome = game.play(&mut input, &mut output).unwrap();
        let text = String::from_utf8(output).unwrap();

        assert!(text.contains("Please enter a number"));
        assert!(text.contains("There is no pit 9."));
        assert!(text.contains("Pit 1 is empty."));
        // Pit 6 sows into the store, player one's side empties, and player two
        // sweeps their last stone.
        assert_eq!(outcome.scores(), [24, 24]);
        assert_eq!(outcome.winner, None);
        assert_eq!(outcome.turns, 1);
    }

    #[test]
    fn test_human_eof_is_error() {
        let mut game = Match::new(Seat::Human, Seat::Human);
        let mut input = io::Cursor::new("");
        let mut output = Vec::new();
        assert!(matches!(game.play(&mut input, &mut output), Err(Error::Io(_))));
    }
}

//! Kalah-Rust: Mancala (Kalah) with scripted opponents.
//!
//! This crate provides a six-pit Kalah board with a pure sowing transition,
//! and opponents that range from random play to fixed-depth minimax over a
//! fully expanded game tree.
//!
//! ## Modules
//!
//! - [`constants`] - Board dimensions and search parameters
//! - [`board`] - Board state, sowing, free turns and captures
//! - [`evaluate`] - Leaf scoring for the search agents
//! - [`tree`] - Game tree construction under a depth policy
//! - [`search`] - Minimax over a built tree
//! - [`agents`] - Random, greedy, minimax and hill-climbing opponents
//! - [`game`] - Match controller and human prompting
//! - [`experiment`] - Repeated automated matches with a CSV log
//! - [`error`] - Error types
//!
//! ## Example
//!
//! ```
//! use kalah_rust::agents::Agent;
//! use kalah_rust::board::{Board, Player};
//!
//! // Ask a shallow minimax agent for its opening move
//! let board = Board::new();
//! let mut agent = Agent::minimax().with_depth(3);
//! let pit = agent.select_move(&board, Player::One).unwrap();
//!
//! // Apply it to the live board
//! let t = board.apply(Player::One, pit).unwrap();
//! println!("{}free turn: {}", t.board, t.free_turn);
//! ```

pub mod agents;
pub mod board;
pub mod constants;
pub mod error;
pub mod evaluate;
pub mod experiment;
pub mod game;
pub mod search;
pub mod tree;

pub use error::{Error, MoveError, Result};

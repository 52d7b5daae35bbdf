//! Scripted opponents.
//!
//! Every agent answers the same question: given the live board and the side
//! it plays, which pit should be sown next. The four strategies form a closed
//! set; the search strategies carry their depth, depth policy and evaluator
//! as data.

use std::fmt;
use std::str::FromStr;
use std::thread;
use std::time::Duration;

use log::debug;

use crate::board::{Board, Pit, Player};
use crate::constants::{HILL_CLIMB_DEPTH, MAX_TREE_NODES, MINIMAX_DEPTH, PITS, THINK_DELAY};
use crate::error::{Error, Result};
use crate::evaluate::{hill_climb_score, minimax_score, Evaluator};
use crate::search::minimax;
use crate::tree::{DepthPolicy, TreeBuilder};

/// Pause taken before an agent commits to a move.
///
/// Purely cosmetic for interactive play; headless runs and tests use
/// [`ThinkDelay::None`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum ThinkDelay {
    #[default]
    None,
    Fixed(Duration),
}

impl ThinkDelay {
    /// The pause used in interactive matches.
    pub fn interactive() -> Self {
        ThinkDelay::Fixed(THINK_DELAY)
    }

    fn pause(self) {
        if let ThinkDelay::Fixed(d) = self {
            thread::sleep(d);
        }
    }
}

/// The agent families, as named in experiment logs.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum AgentKind {
    Random,
    Vector,
    Minimax,
    HillSearch,
}

impl AgentKind {
    /// Name written to the experiment log.
    pub fn name(self) -> &'static str {
        match self {
            AgentKind::Random => "Random",
            AgentKind::Vector => "Vector",
            AgentKind::Minimax => "Minimax",
            AgentKind::HillSearch => "HillSearch",
        }
    }
}

impl fmt::Display for AgentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AgentKind {
    type Err = Error;

    /// Accepts the one-letter codes `R`, `V`, `M`, `H` or the full names,
    /// case-insensitively.
    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "r" | "random" => Ok(AgentKind::Random),
            "v" | "vector" => Ok(AgentKind::Vector),
            "m" | "minimax" => Ok(AgentKind::Minimax),
            "h" | "hillsearch" | "hill" => Ok(AgentKind::HillSearch),
            _ => Err(Error::UnknownAgent(s.to_string())),
        }
    }
}

/// Parameters of a tree-searching strategy.
#[derive(Copy, Clone, Debug)]
pub struct SearchProfile {
    pub depth: u32,
    pub policy: DepthPolicy,
    pub evaluator: Evaluator,
    pub node_limit: usize,
}

impl SearchProfile {
    /// Fixed-ply minimax with the material evaluator and win override.
    pub fn minimax() -> Self {
        Self {
            depth: MINIMAX_DEPTH,
            policy: DepthPolicy::PerMove,
            evaluator: minimax_score,
            node_limit: MAX_TREE_NODES,
        }
    }

    /// Turn-bounded search where free turns are free, scored by absolute
    /// material difference.
    pub fn hill_climb() -> Self {
        Self {
            depth: HILL_CLIMB_DEPTH,
            policy: DepthPolicy::PerTurn,
            evaluator: hill_climb_score,
            node_limit: MAX_TREE_NODES,
        }
    }
}

/// How an agent chooses its move.
#[derive(Copy, Clone, Debug)]
pub enum Strategy {
    /// Uniform choice among non-empty pits.
    Random,
    /// One-ply preference for free turns, then for overfull pits.
    GreedyVector,
    Minimax(SearchProfile),
    HillClimb(SearchProfile),
}

/// A scripted player.
#[derive(Clone, Debug)]
pub struct Agent {
    strategy: Strategy,
    delay: ThinkDelay,
    rng: fastrand::Rng,
}

impl Agent {
    pub fn new(strategy: Strategy) -> Self {
        Self {
            strategy,
            delay: ThinkDelay::None,
            rng: fastrand::Rng::new(),
        }
    }

    /// Build an agent of the given family with its default parameters.
    pub fn from_kind(kind: AgentKind) -> Self {
        Self::new(match kind {
            AgentKind::Random => Strategy::Random,
            AgentKind::Vector => Strategy::GreedyVector,
            AgentKind::Minimax => Strategy::Minimax(SearchProfile::minimax()),
            AgentKind::HillSearch => Strategy::HillClimb(SearchProfile::hill_climb()),
        })
    }

    pub fn random() -> Self {
        Self::from_kind(AgentKind::Random)
    }

    pub fn greedy_vector() -> Self {
        Self::from_kind(AgentKind::Vector)
    }

    pub fn minimax() -> Self {
        Self::from_kind(AgentKind::Minimax)
    }

    pub fn hill_climb() -> Self {
        Self::from_kind(AgentKind::HillSearch)
    }

    /// Override the search depth. Ignored by agents that do not search.
    pub fn with_depth(mut self, depth: u32) -> Self {
        if let Strategy::Minimax(p) | Strategy::HillClimb(p) = &mut self.strategy {
            p.depth = depth;
        }
        self
    }

    /// Override the node ceiling. Ignored by agents that do not search.
    pub fn with_node_limit(mut self, node_limit: usize) -> Self {
        if let Strategy::Minimax(p) | Strategy::HillClimb(p) = &mut self.strategy {
            p.node_limit = node_limit;
        }
        self
    }

    /// Seed the agent's random source for reproducible play.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = fastrand::Rng::with_seed(seed);
        self
    }

    pub fn with_delay(mut self, delay: ThinkDelay) -> Self {
        self.delay = delay;
        self
    }

    pub fn kind(&self) -> AgentKind {
        match self.strategy {
            Strategy::Random => AgentKind::Random,
            Strategy::GreedyVector => AgentKind::Vector,
            Strategy::Minimax(_) => AgentKind::Minimax,
            Strategy::HillClimb(_) => AgentKind::HillSearch,
        }
    }

    pub fn name(&self) -> &'static str {
        self.kind().name()
    }

    /// Choose a pit for `player` to sow on `board`.
    ///
    /// The returned pit is always legal.
    ///
    /// # Errors
    /// [`Error::NoLegalMove`] if every pit on the player's side is empty.
    pub fn select_move(&mut self, board: &Board, player: Player) -> Result<Pit> {
        if board.side_empty(player) {
            return Err(Error::NoLegalMove { player });
        }
        self.delay.pause();

        match self.strategy {
            Strategy::Random => self.random_move(board, player),
            Strategy::GreedyVector => self.vector_move(board, player),
            Strategy::Minimax(profile) | Strategy::HillClimb(profile) => {
                search_move(&profile, board, player)
            }
        }
    }

    fn random_move(&mut self, board: &Board, player: Player) -> Result<Pit> {
        let moves = board.legal_moves(player);
        if moves.is_empty() {
            return Err(Error::NoLegalMove { player });
        }
        Ok(moves[self.rng.usize(..moves.len())])
    }

    /// Scan pits nearest the store first. Pit `i` is `PITS - i` slots away
    /// from the store.
    fn vector_move(&mut self, board: &Board, player: Player) -> Result<Pit> {
        let pits = board.side(player);

        if let Some(pit) = (0..PITS).rev().find(|&i| pits[i] as usize == PITS - i) {
            debug!("vector: pit {pit} lands in the store");
            return Ok(pit);
        }
        if let Some(pit) = (0..PITS).rev().find(|&i| pits[i] as usize > PITS - i) {
            debug!("vector: pit {pit} overflows past the store");
            return Ok(pit);
        }

        debug!("vector: no preferred pit, playing at random");
        self.random_move(board, player)
    }
}

/// Build a tree from a copy of `board`, run minimax and return the root move.
fn search_move(profile: &SearchProfile, board: &Board, player: Player) -> Result<Pit> {
    let mut builder = TreeBuilder::new(profile.policy).with_node_limit(profile.node_limit);
    let tree = builder.build(profile.depth.max(1), board, true, player);
    let (score, mv) = minimax(&tree, profile.evaluator, player);

    debug!(
        "search: player {player} depth {} nodes {} -> {:?} (score {score})",
        profile.depth,
        builder.nodes_built(),
        mv
    );
    mv.ok_or(Error::NoLegalMove { player })
}

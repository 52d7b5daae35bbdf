//! Game tree construction for the search agents.
//!
//! A tree is built fresh for every decision from a copy of the live board and
//! dropped once the move is chosen. Each node owns its children outright.
//!
//! Two depth policies are supported:
//! - [`DepthPolicy::PerMove`]: every move costs one ply, free turns included
//! - [`DepthPolicy::PerTurn`]: only turn-ending moves cost a ply, so chains of
//!   free turns are followed to their end
//!
//! Because the per-turn policy can blow up on generous boards, the builder
//! also enforces a hard node ceiling. Once it is reached, new nodes are left
//! unexpanded and get scored as leaves.

use std::fmt::Write;

use crate::board::{Board, Pit, Player};
use crate::constants::MAX_TREE_NODES;

/// How the remaining depth changes as the tree descends.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DepthPolicy {
    /// Depth drops by one on every move (bounded-ply lookahead).
    PerMove,
    /// Depth drops only when the turn passes to the opponent.
    PerTurn,
}

impl DepthPolicy {
    /// Depth remaining for a child reached by a move that did or did not
    /// earn a free turn.
    #[inline]
    fn next_depth(self, depth: u32, free_turn: bool) -> u32 {
        match self {
            DepthPolicy::PerTurn if free_turn => depth,
            _ => depth - 1,
        }
    }
}

/// A node in the game tree.
#[derive(Clone, Debug)]
pub struct GameTreeNode {
    /// Position at this node
    pub board: Board,
    /// Whether this layer is optimized for the searching player
    pub maximizing: bool,
    /// Player to move from this position
    pub player: Player,
    /// Pit played by the parent's mover to reach this node (`None` at the root)
    pub mv: Option<Pit>,
    /// One child per legal move, in pit order
    pub children: Vec<GameTreeNode>,
}

impl GameTreeNode {
    /// Create an unexpanded node.
    pub fn new(board: Board, maximizing: bool, player: Player, mv: Option<Pit>) -> Self {
        Self {
            board,
            maximizing,
            player,
            mv,
            children: Vec::new(),
        }
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of nodes in this subtree, including itself.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(GameTreeNode::node_count).sum::<usize>()
    }

    /// Length of the longest path from this node down to a leaf.
    pub fn depth(&self) -> usize {
        self.children.iter().map(|c| c.depth() + 1).max().unwrap_or(0)
    }

    /// Render this subtree, one board per node, indented by one tab per level.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        self.write_tree(0, &mut out);
        out
    }

    fn write_tree(&self, level: usize, out: &mut String) {
        let tabs = "\t".repeat(level);
        for line in self.board.to_string().lines() {
            let _ = writeln!(out, "{tabs}{line}");
        }
        out.push('\n');
        for child in &self.children {
            child.write_tree(level + 1, out);
        }
    }
}

/// Builds game trees under a depth policy and a node ceiling.
pub struct TreeBuilder {
    policy: DepthPolicy,
    node_limit: usize,
    nodes: usize,
}

impl TreeBuilder {
    /// Create a builder with the default node ceiling.
    pub fn new(policy: DepthPolicy) -> Self {
        Self {
            policy,
            node_limit: MAX_TREE_NODES,
            nodes: 0,
        }
    }

    /// Override the node ceiling.
    pub fn with_node_limit(mut self, node_limit: usize) -> Self {
        self.node_limit = node_limit;
        self
    }

    /// Nodes created by the last call to [`TreeBuilder::build`].
    pub fn nodes_built(&self) -> usize {
        self.nodes
    }

    /// Expand `board` into a tree of reachable positions.
    ///
    /// `player` moves first from the root, and `maximizing` tags the root
    /// layer. A free turn keeps the same player and the same tag; otherwise
    /// both flip. Branches stop at depth 0, at terminal positions, and at
    /// the node ceiling. The root's own moves are always expanded when depth
    /// allows, even from a terminal position.
    pub fn build(&mut self, depth: u32, board: &Board, maximizing: bool, player: Player) -> GameTreeNode {
        self.nodes = 1;
        let mut root = GameTreeNode::new(*board, maximizing, player, None);
        self.expand(&mut root, depth, true);
        root
    }

    fn expand(&mut self, node: &mut GameTreeNode, depth: u32, is_root: bool) {
        if depth == 0 || (!is_root && node.board.is_terminal()) {
            return;
        }

        for pit in node.board.legal_moves(node.player) {
            if !is_root && self.nodes >= self.node_limit {
                break;
            }
            let Ok(t) = node.board.apply(node.player, pit) else {
                continue;
            };

            let (player, maximizing) = if t.free_turn {
                (node.player, node.maximizing)
            } else {
                (node.player.other(), !node.maximizing)
            };
            let mut child = GameTreeNode::new(t.board, maximizing, player, Some(pit));
            self.nodes += 1;

            self.expand(&mut child, self.policy.next_depth(depth, t.free_turn), false);
            node.children.push(child);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::PITS;

    #[test]
    fn test_depth_zero_is_single_leaf() {
        let mut builder = TreeBuilder::new(DepthPolicy::PerMove);
        let root = builder.build(0, &Board::new(), true, Player::One);
        assert!(root.is_leaf());
        assert_eq!(root.mv, None);
        assert_eq!(builder.nodes_built(), 1);
    }

    #[test]
    fn test_one_ply_children_in_pit_order() {
        let mut builder = TreeBuilder::new(DepthPolicy::PerMove);
        let root = builder.build(1, &Board::new(), true, Player::One);
        let moves: Vec<_> = root.children.iter().map(|c| c.mv).collect();
        assert_eq!(moves, (0..PITS).map(Some).collect::<Vec<_>>());
        assert!(root.children.iter().all(GameTreeNode::is_leaf));
        assert_eq!(root.node_count(), 1 + PITS);
    }

    #[test]
    fn test_free_turn_keeps_player_and_flag() {
        let mut builder = TreeBuilder::new(DepthPolicy::PerMove);
        let root = builder.build(1, &Board::new(), true, Player::One);
        // Pit 2 holds four stones: the last lands in the store.
        let free = &root.children[2];
        assert_eq!(free.player, Player::One);
        assert!(free.maximizing);
        let normal = &root.children[0];
        assert_eq!(normal.player, Player::Two);
        assert!(!normal.maximizing);
    }

    #[test]
    fn test_per_move_policy_bounds_depth() {
        let mut builder = TreeBuilder::new(DepthPolicy::PerMove);
        let root = builder.build(3, &Board::new(), true, Player::One);
        assert_eq!(root.depth(), 3);
        assert_eq!(builder.nodes_built(), root.node_count());
    }

    #[test]
    fn test_per_turn_policy_follows_free_turns() {
        let mut builder = TreeBuilder::new(DepthPolicy::PerTurn);
        let root = builder.build(1, &Board::new(), true, Player::One);
        // The free-turn child at pit 2 is expanded further within the same ply.
        assert!(!root.children[2].is_leaf());
        assert!(root.children[0].is_leaf());
        assert!(root.depth() >= 2);
    }

    #[test]
    fn test_terminal_position_is_leaf() {
        let board = Board::from_parts([0, 0, 0, 0, 1, 1], 20, [0; PITS], 26);
        let mut builder = TreeBuilder::new(DepthPolicy::PerMove);
        let root = builder.build(4, &board, true, Player::One);
        assert_eq!(root.children.len(), 2);
        assert!(root.children.iter().all(GameTreeNode::is_leaf));
    }

    #[test]
    fn test_node_ceiling() {
        let mut builder = TreeBuilder::new(DepthPolicy::PerTurn).with_node_limit(50);
        let root = builder.build(5, &Board::new(), true, Player::One);
        assert!(builder.nodes_built() <= 50 + PITS);
        assert_eq!(root.children.len(), PITS, "root is always expanded");
        assert_eq!(root.node_count(), builder.nodes_built());
    }

    #[test]
    fn test_dump_indents_by_level() {
        let mut builder = TreeBuilder::new(DepthPolicy::PerMove);
        let root = builder.build(1, &Board::new(), true, Player::One);
        let text = root.dump();
        let first = text.lines().next().unwrap();
        assert!(!first.starts_with('\t'));
        let indented = text.lines().filter(|l| l.starts_with('\t')).count();
        assert_eq!(indented, 3 * PITS);
    }
}

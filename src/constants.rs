//! Constants for board geometry, search parameters, and match pacing.
//!
//! # Capture Rule Configuration
//!
//! The Kalah capture rule is controlled by a Cargo feature:
//! - `capture` (default): landing the last stone in an empty own pit captures
//!   the opposite pit
//!
//! To compile with plain sowing only:
//! ```sh
//! cargo build --no-default-features
//! ```

use std::time::Duration;

// =============================================================================
// Board Geometry
// =============================================================================

/// Pits on each side of the board.
pub const PITS: usize = 6;

/// Stones placed in every pit at the start of a match.
pub const STONES_PER_PIT: u8 = 4;

/// Stones in play for the lifetime of a match (6 pits x 4 stones x 2 players).
pub const TOTAL_STONES: u32 = (PITS as u32) * (STONES_PER_PIT as u32) * 2;

/// Slots a sown stone can land in: own pits, own store, opponent pits.
pub const RING_LEN: usize = 2 * PITS + 1;

// =============================================================================
// Search Parameters
// =============================================================================

/// Default ply budget for the minimax agent.
pub const MINIMAX_DEPTH: u32 = 6;

/// Default turn budget for the hill-climbing agent. Free turns do not consume
/// it, so the effective ply count is larger.
pub const HILL_CLIMB_DEPTH: u32 = 3;

/// Hard ceiling on nodes built per decision. Past it, new nodes are leaves.
pub const MAX_TREE_NODES: usize = 400_000;

/// Score magnitude assigned to a won or lost terminal position.
pub const WIN_SCORE: i32 = 150;

// =============================================================================
// Match Pacing and Output
// =============================================================================

/// Pause inserted before an agent announces its move in interactive play.
pub const THINK_DELAY: Duration = Duration::from_secs(3);

/// Default experiment log file.
pub const DATA_FILE: &str = "data.csv";

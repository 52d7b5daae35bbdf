//! Automated agent-versus-agent experiments with a CSV log.
//!
//! Each finished match appends one row to the log:
//!
//! ```text
//! Player1,Player2,Winner,Score,Diff,Time,NumTurns
//! Minimax,Random,P1,31-17,14,0,42
//! ```
//!
//! The header row is written only when the file is new or empty.

use std::fs::OpenOptions;
use std::path::Path;
use std::time::Instant;

use log::info;
use serde::Serialize;

use crate::agents::{Agent, AgentKind};
use crate::board::Player;
use crate::error::Result;
use crate::game::{Match, MatchOutcome, Seat};

/// One row of the experiment log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct MatchRecord {
    pub player1: String,
    pub player2: String,
    /// `P1`, `P2` or `Draw`
    pub winner: String,
    /// Final stores as `p1-p2`
    pub score: String,
    pub diff: u8,
    /// Whole seconds spent on the match
    pub time: u64,
    pub num_turns: u32,
}

impl MatchRecord {
    pub fn new(player1: AgentKind, player2: AgentKind, outcome: &MatchOutcome, secs: u64) -> Self {
        let [s1, s2] = outcome.scores();
        Self {
            player1: player1.name().to_string(),
            player2: player2.name().to_string(),
            winner: match outcome.winner {
                Some(Player::One) => "P1".to_string(),
                Some(Player::Two) => "P2".to_string(),
                None => "Draw".to_string(),
            },
            score: format!("{s1}-{s2}"),
            diff: outcome.margin(),
            time: secs,
            num_turns: outcome.turns,
        }
    }
}

/// A batch of matches between two agent families.
#[derive(Debug, Clone)]
pub struct Experiment {
    pub player1: AgentKind,
    pub player2: AgentKind,
    pub games: usize,
    /// Base seed for reproducible runs; fresh entropy when `None`
    pub seed: Option<u64>,
    /// Search depth override for minimax and hill-climbing agents
    pub depth: Option<u32>,
}

impl Experiment {
    pub fn new(player1: AgentKind, player2: AgentKind, games: usize) -> Self {
        Self {
            player1,
            player2,
            games,
            seed: None,
            depth: None,
        }
    }

    fn agent(&self, kind: AgentKind, seed: Option<u64>) -> Agent {
        let mut agent = Agent::from_kind(kind);
        if let Some(depth) = self.depth {
            agent = agent.with_depth(depth);
        }
        if let Some(seed) = seed {
            agent = agent.with_seed(seed);
        }
        agent
    }

    /// Play every match, appending one row per match to the CSV at `path`.
    pub fn run(&self, path: &Path) -> Result<Vec<MatchRecord>> {
        let fresh = std::fs::metadata(path).map(|m| m.len() == 0).unwrap_or(true);
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let mut writer = csv::WriterBuilder::new().has_headers(fresh).from_writer(file);

        let mut records = Vec::with_capacity(self.games);
        for i in 0..self.games {
            let seeds = self.seed.map(|s| (s + 2 * i as u64, s + 2 * i as u64 + 1));
            let mut game = Match::new(
                Seat::Agent(self.agent(self.player1, seeds.map(|s| s.0))),
                Seat::Agent(self.agent(self.player2, seeds.map(|s| s.1))),
            );

            let start = Instant::now();
            let outcome = game.play_headless()?;
            let record = MatchRecord::new(self.player1, self.player2, &outcome, start.elapsed().as_secs());

            writer.serialize(&record)?;
            writer.flush()?;
            info!(
                "game {}/{}: {} vs {} -> {} ({})",
                i + 1,
                self.games,
                record.player1,
                record.player2,
                record.winner,
                record.score
            );
            records.push(record);
        }
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::constants::PITS;

    #[test]
    fn test_record_fields() {
        let outcome = MatchOutcome {
            winner: Some(Player::Two),
            board: Board::from_parts([0; PITS], 20, [0; PITS], 28),
            turns: 37,
        };
        let record = MatchRecord::new(AgentKind::Random, AgentKind::Minimax, &outcome, 2);
        assert_eq!(record.player1, "Random");
        assert_eq!(record.player2, "Minimax");
        assert_eq!(record.winner, "P2");
        assert_eq!(record.score, "20-28");
        assert_eq!(record.diff, 8);
        assert_eq!(record.time, 2);
        assert_eq!(record.num_turns, 37);
    }

    #[test]
    fn test_header_written_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.csv");

        let mut exp = Experiment::new(AgentKind::Random, AgentKind::Vector, 2);
        exp.seed = Some(11);
        exp.run(&path).unwrap();
        exp.run(&path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "Player1,Player2,Winner,Score,Diff,Time,NumTurns");
        assert_eq!(lines.iter().filter(|l| l.starts_with("Player1")).count(), 1);
        assert!(lines[1..].iter().all(|l| l.starts_with("Random,Vector,")));
    }

    #[test]
    fn test_seeded_runs_repeat() {
        let dir = tempfile::tempdir().unwrap();
        let mut exp = Experiment::new(AgentKind::Random, AgentKind::Random, 3);
        exp.seed = Some(5);
        let a = exp.run(&dir.path().join("a.csv")).unwrap();
        let b = exp.run(&dir.path().join("b.csv")).unwrap();
        let key = |r: &MatchRecord| (r.winner.clone(), r.score.clone(), r.num_turns);
        assert_eq!(a.iter().map(key).collect::<Vec<_>>(), b.iter().map(key).collect::<Vec<_>>());
    }
}

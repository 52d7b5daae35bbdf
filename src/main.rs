//! Kalah-Rust: Mancala against scripted opponents.
//!
//! ## Usage
//!
//! - `kalah-rust` - Play as player one against the minimax agent
//! - `kalah-rust play --p1 human --p2 vector` - Choose who sits where
//! - `kalah-rust bench M R --games 100` - Log automated matches to `data.csv`
//! - `kalah-rust tree --depth 2` - Dump a game tree from the opening position

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use kalah_rust::agents::{Agent, AgentKind, ThinkDelay};
use kalah_rust::board::{Board, Player};
use kalah_rust::constants::{DATA_FILE, THINK_DELAY};
use kalah_rust::experiment::Experiment;
use kalah_rust::game::{Match, Seat};
use kalah_rust::tree::{DepthPolicy, TreeBuilder};

/// Kalah-Rust: Mancala against scripted opponents
#[derive(Parser)]
#[command(name = "kalah-rust")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a match in the terminal
    Play {
        /// Player one: human, or an agent code (R, V, M, H)
        #[arg(long, default_value = "human")]
        p1: String,
        /// Player two: human, or an agent code (R, V, M, H)
        #[arg(long, default_value = "M")]
        p2: String,
        /// Search depth for minimax and hill-climbing agents
        #[arg(long)]
        depth: Option<u32>,
        /// Agent thinking pause in milliseconds
        #[arg(long, default_value_t = THINK_DELAY.as_millis() as u64)]
        think_ms: u64,
        /// Seed for the agents' random choices
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Run automated matches and append the results to a CSV log
    Bench {
        /// Player one agent code (R, V, M, H)
        p1: AgentKind,
        /// Player two agent code (R, V, M, H)
        p2: AgentKind,
        /// Number of matches to play
        #[arg(long, default_value_t = 100)]
        games: usize,
        /// CSV file to append to
        #[arg(long, default_value = DATA_FILE)]
        out: PathBuf,
        /// Search depth for minimax and hill-climbing agents
        #[arg(long)]
        depth: Option<u32>,
        /// Base seed for reproducible runs
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Print the game tree explored from the opening position
    Tree {
        /// Plies to expand
        #[arg(long, default_value_t = 2)]
        depth: u32,
        /// Follow free turns without spending depth
        #[arg(long)]
        per_turn: bool,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Play {
            p1,
            p2,
            depth,
            think_ms,
            seed,
        }) => {
            let delay = if think_ms == 0 {
                ThinkDelay::None
            } else {
                ThinkDelay::Fixed(Duration::from_millis(think_ms))
            };
            let seat1 = make_seat(&p1, depth, delay, seed)?;
            let seat2 = make_seat(&p2, depth, delay, seed.map(|s| s + 1))?;
            play(seat1, seat2)
        }
        Some(Commands::Bench {
            p1,
            p2,
            games,
            out,
            depth,
            seed,
        }) => {
            let mut exp = Experiment::new(p1, p2, games);
            exp.depth = depth;
            exp.seed = seed;
            let records = exp
                .run(&out)
                .with_context(|| format!("failed to run experiment into {}", out.display()))?;
            let p1_wins = records.iter().filter(|r| r.winner == "P1").count();
            let p2_wins = records.iter().filter(|r| r.winner == "P2").count();
            println!(
                "{p1} vs {p2}: {p1_wins} wins, {p2_wins} losses, {} draws",
                records.len() - p1_wins - p2_wins
            );
            Ok(())
        }
        Some(Commands::Tree { depth, per_turn }) => {
            let policy = if per_turn {
                DepthPolicy::PerTurn
            } else {
                DepthPolicy::PerMove
            };
            let mut builder = TreeBuilder::new(policy);
            let tree = builder.build(depth, &Board::new(), true, Player::One);
            print!("{}", tree.dump());
            println!("{} nodes", builder.nodes_built());
            Ok(())
        }
        None => play(
            Seat::Human,
            Seat::Agent(Agent::minimax().with_delay(ThinkDelay::interactive())),
        ),
    }
}

fn make_seat(code: &str, depth: Option<u32>, delay: ThinkDelay, seed: Option<u64>) -> Result<Seat> {
    if code.eq_ignore_ascii_case("human") {
        return Ok(Seat::Human);
    }
    let kind: AgentKind = code.parse()?;
    let mut agent = Agent::from_kind(kind).with_delay(delay);
    if let Some(depth) = depth {
        agent = agent.with_depth(depth);
    }
    if let Some(seed) = seed {
        agent = agent.with_seed(seed);
    }
    Ok(Seat::Agent(agent))
}

fn play(seat1: Seat, seat2: Seat) -> Result<()> {
    println!("Kalah-Rust: {} vs {}\n", seat1.name(), seat2.name());
    let mut game = Match::new(seat1, seat2);
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    game.play(&mut stdin.lock(), &mut stdout)
        .context("match aborted")?;
    Ok(())
}

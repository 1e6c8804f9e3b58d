// SPDX-License-Identifier: MIT OR Apache-2.0

//! Pins CLI - Command-line interface for dots and boxes
//!
//! Runs bot-versus-bot matches for testing the difficulty tiers, or a
//! human-versus-bot game on the terminal.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pins_cli::config::load_config;
use pins_cli::render::{render_board, render_scores};
use pins_cli::{parse_edge_input, run_match};
use pins_core::{Difficulty, PinsConfig, Seat, Session};
use rand::Rng;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(name = "pins-cli", about = "Dots and boxes command-line interface", version)]
struct Args {
    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run bot-versus-bot games
    Match {
        /// Dots per side
        #[arg(long)]
        grid: Option<u8>,

        /// Number of players
        #[arg(long)]
        players: Option<u8>,

        /// Difficulty per seat, comma separated; repeats to fill all seats
        #[arg(long, value_delimiter = ',')]
        bots: Vec<Difficulty>,

        /// Number of games to play
        #[arg(long, default_value_t = 1)]
        games: u32,

        /// Seed for reproducible games
        #[arg(long)]
        seed: Option<u64>,

        /// Write the last game's snapshot as JSON
        #[arg(long)]
        snapshot: Option<PathBuf>,

        /// Write per-game results as JSON
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// Play against a bot as player 1
    Play {
        /// Dots per side
        #[arg(long)]
        grid: Option<u8>,

        /// Bot difficulty
        #[arg(long)]
        difficulty: Option<Difficulty>,

        /// Seed for the bot
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn init_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.debug);

    let mut config = load_config(args.config.as_deref())?;

    match args.command {
        Command::Match {
            grid,
            players,
            bots,
            games,
            seed,
            snapshot,
            report,
        } => {
            apply_overrides(&mut config, grid, players);
            let bots = if bots.is_empty() {
                vec![config.difficulty]
            } else {
                bots
            };
            let seed = seed.unwrap_or_else(|| rand::thread_rng().gen());
            run_match_command(&config, &bots, games, seed, snapshot, report)
        }
        Command::Play {
            grid,
            difficulty,
            seed,
        } => {
            apply_overrides(&mut config, grid, Some(2));
            let difficulty = difficulty.unwrap_or(config.difficulty);
            let seed = seed.unwrap_or_else(|| rand::thread_rng().gen());
            run_play(config, difficulty, seed)
        }
    }
}

fn apply_overrides(config: &mut PinsConfig, grid: Option<u8>, players: Option<u8>) {
    if let Some(grid) = grid {
        config.game.grid_size = grid;
    }
    if let Some(players) = players {
        config.game.player_count = players;
    }
}

fn run_match_command(
    config: &PinsConfig,
    bots: &[Difficulty],
    games: u32,
    seed: u64,
    snapshot: Option<PathBuf>,
    report_path: Option<PathBuf>,
) -> Result<()> {
    config.validate().context("Invalid game settings")?;
    let names: Vec<&str> = bots.iter().map(Difficulty::as_str).collect();
    println!(
        "Playing {} game(s) on a {}x{} grid: {} (seed {})",
        games,
        config.game.grid_size,
        config.game.grid_size,
        names.join(" vs "),
        seed
    );

    let report = run_match(config, bots, games, seed)?;

    for (i, game) in report.games.iter().enumerate() {
        println!(
            "Game {}: scores {:?}, winners {:?} ({} moves)",
            i + 1,
            game.scores,
            game.winners,
            game.moves
        );
    }

    if let Some(last) = report.games.last() {
        let state = last.snapshot.restore().context("Failed to rebuild final board")?;
        println!("\n{}", render_board(&state));
        println!("{}", render_scores(&state));

        if let Some(path) = snapshot {
            let json = last.snapshot.to_json().context("Failed to encode snapshot")?;
            std::fs::write(&path, json)
                .with_context(|| format!("Failed to write snapshot: {}", path.display()))?;
            println!("Snapshot written to {}", path.display());
        }
    }

    for (i, wins) in report.wins(config.game.player_count).iter().enumerate() {
        println!("Player {} wins: {}", i + 1, wins);
    }

    if let Some(path) = report_path {
        std::fs::write(&path, report.to_json()?)
            .with_context(|| format!("Failed to write report: {}", path.display()))?;
        println!("Report written to {}", path.display());
    }
    Ok(())
}

fn run_play(config: PinsConfig, difficulty: Difficulty, seed: u64) -> Result<()> {
    let seats = vec![Seat::Human, Seat::Bot(difficulty)];
    let mut session = Session::with_seed(config, seats, seed).context("Failed to start game")?;
    println!("You are player 1 against {}", difficulty.description());
    println!("Enter edges as `h ROW COL` or `v ROW COL`, or `quit`.");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        for applied in session.play_bot_turns()? {
            println!("Bot drew {}", applied.edge);
        }

        println!("\n{}", render_board(session.state()));
        println!("{}", render_scores(session.state()));
        if session.is_game_over() {
            break;
        }

        print!("> ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else {
            println!();
            return Ok(());
        };
        let line = line.context("Error reading input")?;
        if matches!(line.trim(), "quit" | "exit" | "q") {
            return Ok(());
        }

        let edge = match parse_edge_input(&line) {
            Ok(edge) => edge,
            Err(e) => {
                eprintln!("{:#}", e);
                continue;
            }
        };
        match session.submit_edge(1, edge) {
            Ok(applied) if applied.completed_any() => {
                println!("Claimed {} box(es), move again", applied.completed_cells.len());
            }
            Ok(_) => {}
            Err(e) => eprintln!("Invalid move: {}", e),
        }
    }

    let winners = session.winners();
    if winners.len() == 1 && winners[0] == 1 {
        println!("You win!");
    } else if winners.contains(&1) {
        println!("Draw.");
    } else {
        println!("The bot wins.");
    }
    Ok(())
}

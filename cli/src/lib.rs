// SPDX-License-Identifier: MIT OR Apache-2.0

//! Pins CLI library: config files, rendering and bot matches

pub mod config;
pub mod render;

use anyhow::{bail, Context, Result};
use pins_core::{Difficulty, Edge, GameSnapshot, PinsConfig, PlayerId, Seat, Session};
use serde::Serialize;

/// Outcome of one finished game
#[derive(Debug, Clone, Serialize)]
pub struct GameResult {
    pub game_id: String,
    pub winners: Vec<PlayerId>,
    pub scores: Vec<u32>,
    pub moves: usize,
    #[serde(skip)]
    pub snapshot: GameSnapshot,
}

/// Results of a series of bot games
#[derive(Debug, Clone, Default, Serialize)]
pub struct MatchReport {
    pub games: Vec<GameResult>,
}

impl MatchReport {
    /// Games won per player (shared wins count for everyone tied)
    pub fn wins(&self, player_count: u8) -> Vec<usize> {
        (1..=player_count)
            .map(|player| {
                self.games
                    .iter()
                    .filter(|game| game.winners.contains(&player))
                    .count()
            })
            .collect()
    }

    /// Pretty JSON for `--report` files
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to encode match report")
    }
}

/// One bot seat per player, cycling through `bots`
pub fn bot_seats(bots: &[Difficulty], player_count: u8) -> Result<Vec<Seat>> {
    if bots.is_empty() {
        bail!("at least one bot difficulty is required");
    }
    Ok((0..player_count as usize)
        .map(|i| Seat::Bot(bots[i % bots.len()]))
        .collect())
}

/// Play `games` bot-only games. Game `i` is seeded with `seed + i`.
pub fn run_match(config: &PinsConfig, bots: &[Difficulty], games: u32, seed: u64) -> Result<MatchReport> {
    let seats = bot_seats(bots, config.game.player_count)?;
    let mut report = MatchReport::default();

    for i in 0..games {
        let mut session = Session::with_seed(config.clone(), seats.clone(), seed.wrapping_add(i as u64))
            .context("Failed to start session")?;
        let played = session.play_bot_turns().context("Bot game failed")?;
        if !session.is_game_over() {
            bail!("bot game {} stopped before the end", i + 1);
        }

        tracing::info!(game = i + 1, winners = ?session.winners(), "Match game finished");
        report.games.push(GameResult {
            game_id: session.context().game_id.clone(),
            winners: session.winners(),
            scores: session.state().scores().to_vec(),
            moves: played.len(),
            snapshot: session.snapshot(),
        });
    }

    Ok(report)
}

/// Parse a typed edge such as `h 0 1`, `v-2-3` or `horizontal-0-1`
pub fn parse_edge_input(input: &str) -> Result<Edge> {
    input
        .trim()
        .parse::<Edge>()
        .with_context(|| format!("Could not parse edge `{}`", input.trim()))
}

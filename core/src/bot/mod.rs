// SPDX-License-Identifier: MIT OR Apache-2.0

//! Bot move selection
//!
//! Four difficulty tiers choose an edge from the current game state:
//!
//! | Tier   | Policy                                                        |
//! |--------|---------------------------------------------------------------|
//! | Easy   | Sometimes takes boxes, sometimes plays safe, otherwise random |
//! | Medium | Takes boxes, builds chains, avoids handing out boxes          |
//! | Hard   | Chain control, short-chain sacrifices, parity-aware safe play |
//! | Expert | Chain control plus alpha-beta search in the endgame           |
//!
//! All tiers draw randomness from a caller-supplied [`rand::Rng`], so games
//! are reproducible with a seeded generator.

pub mod heuristics;
pub mod minimax;
mod tiers;

use crate::board::Edge;
use crate::config::BotConfig;
use crate::game::GameState;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Bot strength
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
    Expert,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::Expert,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
            Difficulty::Expert => "expert",
        }
    }

    /// One-line description for menus and logs
    pub fn description(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy - mostly random, grabs boxes sometimes",
            Difficulty::Medium => "Medium - takes boxes and avoids giving them away",
            Difficulty::Hard => "Hard - fights for chain control",
            Difficulty::Expert => "Expert - searches the endgame",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown difficulty name
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown difficulty `{0}` (expected easy, medium, hard or expert)")]
pub struct ParseDifficultyError(pub String);

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Difficulty::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseDifficultyError(s.to_string()))
    }
}

/// Choose the bot's next edge with the default tuning.
///
/// Returns `None` only when the game is over.
pub fn select_bot_move<R: Rng + ?Sized>(
    state: &GameState,
    difficulty: Difficulty,
    rng: &mut R,
) -> Option<Edge> {
    select_bot_move_with(state, difficulty, &BotConfig::default(), rng)
}

/// Choose the bot's next edge among every undrawn edge
pub fn select_bot_move_with<R: Rng + ?Sized>(
    state: &GameState,
    difficulty: Difficulty,
    config: &BotConfig,
    rng: &mut R,
) -> Option<Edge> {
    let candidates = state.undrawn_edges();
    choose_edge(state, &candidates, difficulty, config, rng)
}

/// Choose one of `candidates`, which must all be undrawn.
///
/// # Panics
///
/// Panics if `candidates` is empty while the game is still running; that
/// means the caller's state and edge list disagree.
pub fn choose_edge<R: Rng + ?Sized>(
    state: &GameState,
    candidates: &[Edge],
    difficulty: Difficulty,
    config: &BotConfig,
    rng: &mut R,
) -> Option<Edge> {
    if candidates.is_empty() {
        assert!(
            state.is_game_over(),
            "bot asked to move with no candidate edges while the game is still running"
        );
        return None;
    }
    if state.is_game_over() {
        return None;
    }
    debug_assert!(
        candidates.iter().all(|edge| !state.is_drawn(*edge)),
        "bot candidates include drawn edges"
    );

    let edge = match difficulty {
        Difficulty::Easy => tiers::easy(state, candidates, config, rng),
        Difficulty::Medium => tiers::medium(state, candidates, rng),
        Difficulty::Hard => tiers::hard(state, candidates, config, rng),
        Difficulty::Expert => tiers::expert(state, candidates, config),
    };

    tracing::debug!(
        %edge,
        %difficulty,
        player = state.current_player(),
        "Bot selected edge"
    );
    Some(edge)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_names_roundtrip() {
        for difficulty in Difficulty::ALL {
            assert_eq!(difficulty.to_string().parse::<Difficulty>().unwrap(), difficulty);
        }
        assert_eq!(" Expert ".parse::<Difficulty>().unwrap(), Difficulty::Expert);
        assert!("impossible".parse::<Difficulty>().is_err());
    }

    #[test]
    fn difficulty_serializes_lowercase() {
        let json = serde_json::to_string(&Difficulty::Hard).unwrap();
        assert_eq!(json, "\"hard\"");
    }
}

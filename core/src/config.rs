// SPDX-License-Identifier: MIT OR Apache-2.0

//! Game and bot configuration

use crate::board::{MAX_GRID_SIZE, MIN_GRID_SIZE};
use crate::bot::Difficulty;
use crate::game::{MAX_PLAYERS, MIN_PLAYERS};
use crate::GameError;
use serde::{Deserialize, Serialize};

/// Rules for a new game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Dots per side
    #[serde(default = "default_grid_size")]
    pub grid_size: u8,

    /// Number of players (2-5)
    #[serde(default = "default_player_count")]
    pub player_count: u8,

    /// Auto-complete chains opened by a completing move
    #[serde(default = "default_auto_chain")]
    pub auto_chain: bool,
}

fn default_grid_size() -> u8 {
    6
}

fn default_player_count() -> u8 {
    2
}

fn default_auto_chain() -> bool {
    true
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: default_grid_size(),
            player_count: default_player_count(),
            auto_chain: default_auto_chain(),
        }
    }
}

impl GameConfig {
    pub fn new(grid_size: u8, player_count: u8) -> Self {
        Self {
            grid_size,
            player_count,
            ..Self::default()
        }
    }

    /// Check grid size and player count ranges
    pub fn validate(&self) -> Result<(), GameError> {
        if !(MIN_GRID_SIZE..=MAX_GRID_SIZE).contains(&self.grid_size) {
            return Err(GameError::InvalidConfig(format!(
                "grid_size must be between {} and {}, got {}",
                MIN_GRID_SIZE, MAX_GRID_SIZE, self.grid_size
            )));
        }
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&self.player_count) {
            return Err(GameError::InvalidConfig(format!(
                "player_count must be between {} and {}, got {}",
                MIN_PLAYERS, MAX_PLAYERS, self.player_count
            )));
        }
        Ok(())
    }
}

/// Tuning knobs for the bot tiers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    /// Minimax depth used by the expert endgame search
    pub search_depth: u8,

    /// Expert switches to search when at most this many cells are unowned
    pub endgame_cells: usize,

    /// Children explored per search node
    pub branch_cap: usize,

    /// Chance that the easy bot takes an available box
    pub easy_complete_chance: f64,

    /// Chance that the easy bot looks for a safe edge
    pub easy_safe_chance: f64,

    /// Minimum length of a chain the hard bot fights over
    pub long_chain_len: usize,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            search_depth: 4,
            endgame_cells: 6,
            branch_cap: 8,
            easy_complete_chance: 0.6,
            easy_safe_chance: 0.5,
            long_chain_len: 3,
        }
    }
}

impl BotConfig {
    pub fn validate(&self) -> Result<(), GameError> {
        if self.search_depth == 0 {
            return Err(GameError::InvalidConfig("search_depth must be at least 1".into()));
        }
        if self.branch_cap == 0 {
            return Err(GameError::InvalidConfig("branch_cap must be at least 1".into()));
        }
        for (name, value) in [
            ("easy_complete_chance", self.easy_complete_chance),
            ("easy_safe_chance", self.easy_safe_chance),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(GameError::InvalidConfig(format!(
                    "{name} must be within 0.0..=1.0, got {value}"
                )));
            }
        }
        Ok(())
    }
}

/// Everything a front end needs to start games
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PinsConfig {
    /// Difficulty used for bot seats unless overridden
    #[serde(default)]
    pub difficulty: Difficulty,

    #[serde(default)]
    pub game: GameConfig,

    #[serde(default)]
    pub bot: BotConfig,
}

impl PinsConfig {
    pub fn validate(&self) -> Result<(), GameError> {
        self.game.validate()?;
        self.bot.validate()
    }
}

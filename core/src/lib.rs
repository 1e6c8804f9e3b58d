// SPDX-License-Identifier: MIT OR Apache-2.0

//! Pins Core - Dots and Boxes Rules and Bots
//!
//! This crate provides the core game functionality including:
//! - Board geometry (dots, edges, cells) and adjacency queries
//! - The game state machine: move legality, box completion, chain
//!   auto-completion, turn order and scoring
//! - Chain analysis used by the stronger bots
//! - Bot move selection for four difficulty tiers
//! - CBOR/JSON snapshots of game state for network sync

#![deny(unsafe_code)]
#![deny(clippy::all)]

pub mod board;
pub mod bot;
pub mod chains;
pub mod config;
pub mod engine;
pub mod game;
pub mod logging;
pub mod rules;
pub mod snapshot;

use thiserror::Error;

/// Numeric player id, `1..=player_count`
pub type PlayerId = u8;

pub use board::{Board, Cell, Edge, Orientation};
pub use bot::{select_bot_move, Difficulty};
pub use config::{BotConfig, GameConfig, PinsConfig};
pub use engine::{GameEvent, PlayerBackend, Seat, Session};
pub use game::{AppliedMove, GameState};
pub use snapshot::GameSnapshot;

/// Why an edge could not be drawn
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum InvalidMove {
    /// The game has already finished
    #[error("game is already over")]
    GameOver,

    /// The edge was drawn earlier in the game
    #[error("edge {0} is already drawn")]
    AlreadyDrawn(Edge),

    /// The edge does not exist on this board
    #[error("edge {0} is outside the board")]
    OutOfBounds(Edge),
}

/// Errors that can occur during game play
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    /// The move was rejected; the game state is unchanged
    #[error("Invalid move: {0}")]
    InvalidMove(#[from] InvalidMove),

    /// Grid size, player count or bot settings out of range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A player tried to move out of turn
    #[error("Player {actual} moved but it is player {expected}'s turn")]
    NotYourTurn {
        /// The player holding the turn
        expected: PlayerId,
        /// The player who submitted the move
        actual: PlayerId,
    },

    /// A snapshot could not be encoded, decoded or replayed
    #[error("Snapshot error: {0}")]
    Snapshot(String),
}

impl GameError {
    /// True for errors that reject a single move
    pub fn is_invalid_move(&self) -> bool {
        matches!(self, GameError::InvalidMove(_))
    }
}

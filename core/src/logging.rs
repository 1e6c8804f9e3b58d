// SPDX-License-Identifier: MIT OR Apache-2.0

//! Structured move logging with per-game correlation ids

use crate::board::{Cell, Edge};
use crate::game::AppliedMove;
use crate::PlayerId;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use uuid::Uuid;

/// Correlation context for one game
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct GameContext {
    /// Unique game ID
    pub game_id: String,
    /// Moves logged so far
    pub move_seq: u64,
}

impl GameContext {
    /// Create a context with a fresh game id
    pub fn new() -> Self {
        Self {
            game_id: Uuid::new_v4().simple().to_string(),
            move_seq: 0,
        }
    }

    /// Reuse a known game id, e.g. when resuming from a snapshot
    pub fn with_game_id(game_id: impl Into<String>) -> Self {
        Self {
            game_id: game_id.into(),
            move_seq: 0,
        }
    }

    /// Take the next move sequence number
    pub fn next_seq(&mut self) -> u64 {
        self.move_seq += 1;
        self.move_seq
    }
}

impl Default for GameContext {
    fn default() -> Self {
        Self::new()
    }
}

/// One applied move, as written to the log
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MoveLogEntry {
    /// RFC 3339 timestamp
    pub timestamp: String,
    pub game_id: String,
    pub seq: u64,
    pub player: PlayerId,
    pub edge: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub auto_edges: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub completed: Vec<String>,
    /// Whether the turn passed
    pub turn_advanced: bool,
}

impl MoveLogEntry {
    pub fn new(context: &mut GameContext, applied: &AppliedMove) -> Self {
        Self {
            timestamp: chrono::Utc::now().to_rfc3339(),
            game_id: context.game_id.clone(),
            seq: context.next_seq(),
            player: applied.player,
            edge: applied.edge.to_string(),
            auto_edges: applied.auto_edges.iter().map(Edge::to_string).collect(),
            completed: applied.completed_cells.iter().map(Cell::to_string).collect(),
            turn_advanced: applied.turn_advanced,
        }
    }

    /// Single-line JSON for log aggregation
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    /// Emit the entry through `tracing`
    pub fn emit(&self) {
        tracing::info!(
            target: "pins::moves",
            game_id = %self.game_id,
            seq = self.seq,
            entry = %self.to_json(),
            "Move applied"
        );
    }
}

/// Logs the duration of a bot search when dropped
pub struct SearchTimer {
    start: Instant,
    operation: &'static str,
    nodes: u64,
}

impl SearchTimer {
    pub fn new(operation: &'static str) -> Self {
        tracing::trace!("Starting {}", operation);
        Self {
            start: Instant::now(),
            operation,
            nodes: 0,
        }
    }

    /// Count one visited search node
    pub fn visit(&mut self) {
        self.nodes += 1;
    }

    pub fn nodes(&self) -> u64 {
        self.nodes
    }
}

impl Drop for SearchTimer {
    fn drop(&mut self) {
        tracing::debug!(
            operation = self.operation,
            nodes = self.nodes,
            duration_ms = self.start.elapsed().as_millis() as u64,
            "Completed {}",
            self.operation
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_numbers_moves() {
        let mut ctx = GameContext::with_game_id("game456");
        assert_eq!(ctx.next_seq(), 1);
        assert_eq!(ctx.next_seq(), 2);
        assert_eq!(ctx.game_id, "game456");
        assert_ne!(GameContext::new().game_id, GameContext::new().game_id);
    }

    #[test]
    fn move_entry_serialization() {
        let mut ctx = GameContext::with_game_id("g1");
        let applied = AppliedMove {
            edge: Edge::vertical(1, 2),
            player: 2,
            completed_cells: vec![Cell::new(1, 1)],
            auto_edges: Vec::new(),
            turn_advanced: false,
        };
        let entry = MoveLogEntry::new(&mut ctx, &applied);
        let json = entry.to_json();
        assert!(json.contains("\"game_id\":\"g1\""));
        assert!(json.contains("\"edge\":\"vertical-1-2\""));
        assert!(json.contains("\"seq\":1"));
        assert!(!json.contains("auto_edges"));
        assert!(chrono::DateTime::parse_from_rfc3339(&entry.timestamp).is_ok());
    }

    #[test]
    fn timer_counts_nodes() {
        let mut timer = SearchTimer::new("test search");
        timer.visit();
        timer.visit();
        assert_eq!(timer.nodes(), 2);
    }
}

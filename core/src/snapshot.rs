// SPDX-License-Identifier: MIT OR Apache-2.0

//! Serializable game snapshots
//!
//! A [`GameSnapshot`] is the minimal state needed to resume a game or to
//! sync it between peers. CBOR is the wire format; JSON is available for
//! files and debugging. Cell ownership is not stored: it is rebuilt by
//! replaying the drawn edges in order.

use crate::board::Edge;
use crate::game::GameState;
use crate::rules::MoveValidator;
use crate::{GameError, PlayerId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Portable copy of a game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub grid_size: u8,
    pub player_count: u8,
    pub current_player: PlayerId,
    /// Score per player id
    pub scores: BTreeMap<PlayerId, u32>,
    /// Edge ids in draw order
    pub drawn_edges: Vec<String>,
    /// Drawing player per edge id
    pub edge_owners: BTreeMap<String, PlayerId>,
    pub game_over: bool,
    #[serde(default)]
    pub last_edge: Option<String>,
    #[serde(default = "default_auto_chain")]
    pub auto_chain: bool,
    /// Log correlation id of the session that took the snapshot
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_id: Option<String>,
}

fn default_auto_chain() -> bool {
    true
}

impl From<&GameState> for GameSnapshot {
    fn from(state: &GameState) -> Self {
        let scores = (1..=state.player_count())
            .map(|player| (player, state.score(player)))
            .collect();
        let drawn_edges = state.history().iter().map(Edge::to_string).collect();
        let edge_owners = state
            .history()
            .iter()
            .filter_map(|edge| state.edge_owner(*edge).map(|owner| (edge.to_string(), owner)))
            .collect();

        Self {
            grid_size: state.grid_size(),
            player_count: state.player_count(),
            current_player: state.current_player(),
            scores,
            drawn_edges,
            edge_owners,
            game_over: state.is_game_over(),
            last_edge: state.last_edge().map(|edge| edge.to_string()),
            auto_chain: state.auto_chain(),
            game_id: None,
        }
    }
}

impl GameSnapshot {
    pub fn capture(state: &GameState) -> Self {
        Self::from(state)
    }

    /// Rebuild the game by replaying every drawn edge for its owner
    pub fn restore(&self) -> Result<GameState, GameError> {
        let mut state = GameState::new(self.grid_size, self.player_count)
            .map_err(|err| snapshot_error(format!("bad header: {err}")))?
            .with_auto_chain(self.auto_chain);

        if self.edge_owners.len() != self.drawn_edges.len() {
            return Err(snapshot_error(format!(
                "{} drawn edges but {} edge owners",
                self.drawn_edges.len(),
                self.edge_owners.len()
            )));
        }

        for id in &self.drawn_edges {
            let edge: Edge = id
                .parse()
                .map_err(|err| snapshot_error(format!("edge `{id}`: {err}")))?;
            let owner = *self
                .edge_owners
                .get(id)
                .ok_or_else(|| snapshot_error(format!("edge {id} has no owner")))?;
            self.check_player(owner)?;
            MoveValidator::new(&state)
                .check_edge(edge)
                .map_err(|err| snapshot_error(format!("cannot replay {id}: {err}")))?;
            state.draw_edge(edge, owner);
        }

        for player in 1..=self.player_count {
            let expected = self.scores.get(&player).copied().unwrap_or(0);
            if state.score(player) != expected {
                return Err(snapshot_error(format!(
                    "player {player} has score {expected} but owns {} cells",
                    state.score(player)
                )));
            }
        }
        if self.scores.keys().any(|player| *player == 0 || *player > self.player_count) {
            return Err(snapshot_error("scores mention unknown players".into()));
        }
        if state.is_game_over() != self.game_over {
            return Err(snapshot_error(format!(
                "game_over is {} but the board says {}",
                self.game_over,
                state.is_game_over()
            )));
        }
        if self.last_edge.as_ref() != self.drawn_edges.last() {
            return Err(snapshot_error("last_edge does not match draw order".into()));
        }

        self.check_player(self.current_player)?;
        state.set_current_player(self.current_player);
        Ok(state)
    }

    /// Encode as CBOR for the network
    pub fn to_cbor(&self) -> Result<Vec<u8>, GameError> {
        serde_cbor::to_vec(self).map_err(|err| {
            tracing::error!("Failed to serialize snapshot: {}", err);
            snapshot_error(err.to_string())
        })
    }

    pub fn from_cbor(data: &[u8]) -> Result<Self, GameError> {
        if data.is_empty() {
            return Err(snapshot_error("empty payload".into()));
        }
        serde_cbor::from_slice(data).map_err(|err| {
            tracing::error!("Failed to deserialize snapshot: {}", err);
            snapshot_error(err.to_string())
        })
    }

    pub fn to_json(&self) -> Result<String, GameError> {
        serde_json::to_string_pretty(self).map_err(|err| snapshot_error(err.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, GameError> {
        serde_json::from_str(json).map_err(|err| {
            tracing::error!("Failed to parse snapshot JSON: {}", err);
            snapshot_error(err.to_string())
        })
    }

    fn check_player(&self, player: PlayerId) -> Result<(), GameError> {
        if player == 0 || player > self.player_count {
            return Err(snapshot_error(format!(
                "player {player} outside 1..={}",
                self.player_count
            )));
        }
        Ok(())
    }
}

/// Blake3 hex digest of the CBOR encoding, for desync detection
pub fn snapshot_digest(snapshot: &GameSnapshot) -> Result<String, GameError> {
    let bytes = snapshot.to_cbor()?;
    Ok(blake3::hash(&bytes).to_hex().to_string())
}

/// Restore a game straight from CBOR bytes
pub fn restore_from_cbor(data: &[u8]) -> Result<GameState, GameError> {
    GameSnapshot::from_cbor(data)?.restore()
}

fn snapshot_error(message: String) -> GameError {
    GameError::Snapshot(message)
}

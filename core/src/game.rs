// SPDX-License-Identifier: MIT OR Apache-2.0

//! Game state machine: drawing edges, claiming cells, turn order

use crate::board::{Board, Cell, Edge};
use crate::config::GameConfig;
use crate::rules::{self, MoveValidator};
use crate::{GameError, PlayerId};
use serde::{Deserialize, Serialize};

/// Smallest supported number of players
pub const MIN_PLAYERS: u8 = 2;
/// Largest supported number of players
pub const MAX_PLAYERS: u8 = 5;

/// Result of one logical turn played through [`GameState::play_edge`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedMove {
    /// The edge chosen by the player
    pub edge: Edge,
    /// The player who drew it
    pub player: PlayerId,
    /// Every cell claimed this turn, including chain auto-completions
    pub completed_cells: Vec<Cell>,
    /// Edges drawn automatically while resolving the chain
    pub auto_edges: Vec<Edge>,
    /// Whether the turn passed to the next player
    pub turn_advanced: bool,
}

impl AppliedMove {
    /// True if the player earned an extra turn
    pub fn completed_any(&self) -> bool {
        !self.completed_cells.is_empty()
    }
}

/// Represents the current state of a dots and boxes game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    player_count: u8,
    current_player: PlayerId,
    /// Drawing player per edge index
    edge_owners: Vec<Option<PlayerId>>,
    /// Drawn edges in the order they were drawn
    history: Vec<Edge>,
    cell_owners: Vec<Option<PlayerId>>,
    /// Drawn edges per cell index
    edge_counts: Vec<u8>,
    scores: Vec<u32>,
    game_over: bool,
    auto_chain: bool,
}

impl GameState {
    /// Create a new game with `grid_size x grid_size` dots
    pub fn new(grid_size: u8, player_count: u8) -> Result<Self, GameError> {
        let board = Board::new(grid_size)?;
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&player_count) {
            return Err(GameError::InvalidConfig(format!(
                "player count must be between {} and {}, got {}",
                MIN_PLAYERS, MAX_PLAYERS, player_count
            )));
        }

        Ok(Self {
            board,
            player_count,
            current_player: 1,
            edge_owners: vec![None; board.total_edges()],
            history: Vec::new(),
            cell_owners: vec![None; board.total_cells()],
            edge_counts: vec![0; board.total_cells()],
            scores: vec![0; player_count as usize],
            game_over: false,
            auto_chain: true,
        })
    }

    /// Create a game from a validated configuration
    pub fn from_config(config: &GameConfig) -> Result<Self, GameError> {
        config.validate()?;
        Ok(Self::new(config.grid_size, config.player_count)?.with_auto_chain(config.auto_chain))
    }

    /// Enable or disable chain auto-completion for this game
    pub fn with_auto_chain(mut self, enabled: bool) -> Self {
        self.auto_chain = enabled;
        self
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn grid_size(&self) -> u8 {
        self.board.size()
    }

    pub fn player_count(&self) -> u8 {
        self.player_count
    }

    /// The player whose turn it is
    pub fn current_player(&self) -> PlayerId {
        self.current_player
    }

    pub fn auto_chain(&self) -> bool {
        self.auto_chain
    }

    /// Scores indexed by `player - 1`
    pub fn scores(&self) -> &[u32] {
        &self.scores
    }

    /// Score of one player (0 for unknown ids)
    pub fn score(&self, player: PlayerId) -> u32 {
        player
            .checked_sub(1)
            .and_then(|i| self.scores.get(i as usize))
            .copied()
            .unwrap_or(0)
    }

    /// Check if every cell has been claimed
    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// True once any edge has been drawn
    pub fn has_started(&self) -> bool {
        !self.history.is_empty()
    }

    /// Drawn edges in draw order
    pub fn history(&self) -> &[Edge] {
        &self.history
    }

    /// The most recently drawn edge
    pub fn last_edge(&self) -> Option<Edge> {
        self.history.last().copied()
    }

    pub fn is_drawn(&self, edge: Edge) -> bool {
        self.edge_owner(edge).is_some()
    }

    /// The player who drew an edge
    pub fn edge_owner(&self, edge: Edge) -> Option<PlayerId> {
        if !self.board.contains_edge(edge) {
            return None;
        }
        self.edge_owners[self.board.edge_index(edge)]
    }

    /// The player who claimed a cell
    pub fn cell_owner(&self, cell: Cell) -> Option<PlayerId> {
        if !self.board.contains_cell(cell) {
            return None;
        }
        self.cell_owners[self.board.cell_index(cell)]
    }

    /// Number of drawn edges around a cell (0..=4)
    pub fn drawn_edge_count(&self, cell: Cell) -> u8 {
        if !self.board.contains_cell(cell) {
            return 0;
        }
        self.edge_counts[self.board.cell_index(cell)]
    }

    /// Edges nobody has drawn yet, in index order
    pub fn undrawn_edges(&self) -> Vec<Edge> {
        self.board
            .all_edges()
            .filter(|edge| !self.is_drawn(*edge))
            .collect()
    }

    /// Number of claimed cells
    pub fn claimed_cells(&self) -> usize {
        self.scores.iter().map(|s| *s as usize).sum()
    }

    /// Number of cells nobody owns yet
    pub fn remaining_cells(&self) -> usize {
        self.board.total_cells() - self.claimed_cells()
    }

    /// Players holding the top score; more than one id means a draw
    pub fn winners(&self) -> Vec<PlayerId> {
        let best = self.scores.iter().copied().max().unwrap_or(0);
        self.scores
            .iter()
            .enumerate()
            .filter(|(_, score)| **score == best)
            .map(|(i, _)| i as PlayerId + 1)
            .collect()
    }

    /// Draw an edge for the current player and claim any cell it completes.
    ///
    /// The turn does not change here; see [`GameState::advance_turn`] and
    /// [`GameState::play_edge`]. On error the state is left untouched.
    pub fn apply_edge(&mut self, edge: Edge) -> Result<Vec<Cell>, GameError> {
        if let Err(err) = MoveValidator::new(self).check_edge(edge) {
            tracing::debug!(%edge, player = self.current_player, "Rejected edge: {}", err);
            return Err(err);
        }

        let completed = self.draw_edge(edge, self.current_player);
        tracing::debug!(
            %edge,
            player = self.current_player,
            completed = completed.len(),
            "Edge drawn"
        );
        Ok(completed)
    }

    /// Pass the turn unless the last move completed a cell
    pub fn advance_turn(&mut self, completed_any: bool) {
        if completed_any || self.game_over {
            return;
        }
        self.current_player = rules::next_player(self.current_player, self.player_count);
    }

    /// Play one logical turn: draw the edge, auto-complete the chain it
    /// opens (when enabled) and advance the turn.
    pub fn play_edge(&mut self, edge: Edge) -> Result<AppliedMove, GameError> {
        let player = self.current_player;
        let mut completed_cells = self.apply_edge(edge)?;
        let mut auto_edges = Vec::new();

        if self.auto_chain && !completed_cells.is_empty() {
            let resolution = rules::resolve_chain(self, edge, &completed_cells);
            auto_edges = resolution.auto_edges;
            completed_cells.extend(resolution.completed);
        }

        let completed_any = !completed_cells.is_empty();
        self.advance_turn(completed_any);

        if self.game_over {
            tracing::info!(winners = ?self.winners(), scores = ?self.scores, "Game over");
        }

        Ok(AppliedMove {
            edge,
            player,
            completed_cells,
            auto_edges,
            turn_advanced: !completed_any,
        })
    }

    /// Mark an edge drawn by `player`, claiming completed cells.
    /// The edge must be on the board and undrawn.
    pub(crate) fn draw_edge(&mut self, edge: Edge, player: PlayerId) -> Vec<Cell> {
        let index = self.board.edge_index(edge);
        self.edge_owners[index] = Some(player);
        self.history.push(edge);

        let mut completed = Vec::with_capacity(2);
        for cell in self.board.cells_adjacent_to_edge(edge) {
            let ci = self.board.cell_index(cell);
            self.edge_counts[ci] += 1;
            assert!(
                self.edge_counts[ci] <= 4,
                "cell {} has {} drawn edges",
                cell,
                self.edge_counts[ci]
            );

            if self.edge_counts[ci] == 4 && self.cell_owners[ci].is_none() {
                self.cell_owners[ci] = Some(player);
                self.scores[(player - 1) as usize] += 1;
                completed.push(cell);
            }
        }

        if self.claimed_cells() == self.board.total_cells() {
            self.game_over = true;
        }

        completed
    }

    pub(crate) fn set_current_player(&mut self, player: PlayerId) {
        self.current_player = player;
    }
}

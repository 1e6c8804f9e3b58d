// SPDX-License-Identifier: MIT OR Apache-2.0

//! Game rules: move validation, turn order and chain auto-completion

use crate::board::{Cell, Edge};
use crate::game::GameState;
use crate::{GameError, InvalidMove, PlayerId};
use std::collections::{HashSet, VecDeque};

/// Validates moves against the rules of dots and boxes
pub struct MoveValidator<'a> {
    /// The game being checked
    state: &'a GameState,
}

impl<'a> MoveValidator<'a> {
    /// Create a new move validator
    pub fn new(state: &'a GameState) -> Self {
        Self { state }
    }

    /// Check if an edge may be drawn right now
    pub fn check_edge(&self, edge: Edge) -> Result<(), GameError> {
        if self.state.is_game_over() {
            return Err(InvalidMove::GameOver.into());
        }

        if !self.state.board().contains_edge(edge) {
            return Err(InvalidMove::OutOfBounds(edge).into());
        }

        if self.state.is_drawn(edge) {
            return Err(InvalidMove::AlreadyDrawn(edge).into());
        }

        Ok(())
    }
}

/// The player after `current`, wrapping back to player 1
pub fn next_player(current: PlayerId, player_count: u8) -> PlayerId {
    (current % player_count) + 1
}

/// Cells and edges added by chain auto-completion
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChainResolution {
    /// Edges drawn automatically, in draw order
    pub auto_edges: Vec<Edge>,
    /// Cells claimed by those edges
    pub completed: Vec<Cell>,
}

/// Auto-complete the chain opened by `trigger`.
///
/// Starting from the cells `trigger` completed, any unowned neighbour with
/// exactly three drawn edges gets its last edge drawn for the current
/// player, as long as the neighbour is reached through an edge drawn during
/// this chain. Edges from earlier turns stop propagation.
pub fn resolve_chain(state: &mut GameState, trigger: Edge, completed: &[Cell]) -> ChainResolution {
    let board = *state.board();
    let player = state.current_player();
    let mut chain_edges = HashSet::from([trigger]);
    let mut queue: VecDeque<Cell> = completed.iter().copied().collect();
    let mut resolution = ChainResolution::default();

    while let Some(cell) = queue.pop_front() {
        for neighbor in board.neighbor_cells(cell) {
            let Some(shared) = board.shared_edge(cell, neighbor) else {
                continue;
            };
            if !chain_edges.contains(&shared) {
                continue;
            }
            if state.cell_owner(neighbor).is_some() || state.drawn_edge_count(neighbor) != 3 {
                continue;
            }

            let missing = board
                .edges_of_cell(neighbor)
                .into_iter()
                .find(|edge| !state.is_drawn(*edge));
            let Some(missing) = missing else {
                continue;
            };

            let claimed = state.draw_edge(missing, player);
            tracing::debug!(edge = %missing, player, claimed = claimed.len(), "Chain edge auto-drawn");
            chain_edges.insert(missing);
            resolution.auto_edges.push(missing);
            for cell in claimed {
                resolution.completed.push(cell);
                queue.push_back(cell);
            }
        }
    }

    resolution
}

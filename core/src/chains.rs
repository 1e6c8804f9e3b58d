// SPDX-License-Identifier: MIT OR Apache-2.0

//! Chain analysis over partially filled cells
//!
//! All chain queries share one breadth-first exploration; a [`ChainQuery`]
//! decides which cells belong to a chain and how cells link to each other.

use crate::board::Cell;
use crate::game::GameState;
use std::collections::{HashSet, VecDeque};

/// How two neighbouring chain cells are considered connected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Link {
    /// Any neighbouring cell
    Adjacent,
    /// Only through a drawn shared edge
    DrawnEdge,
    /// Only through an undrawn shared edge
    OpenEdge,
}

/// Parameters of a chain exploration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainQuery {
    /// Minimum drawn edges for an unowned cell to join a chain
    pub min_edges: u8,
    /// Connectivity between chain cells
    pub link: Link,
    /// Chains shorter than this are discarded
    pub min_len: usize,
}

impl ChainQuery {
    /// Cells with two or more drawn edges, neighbours linked, length >= 2
    pub const CHAINS: ChainQuery = ChainQuery {
        min_edges: 2,
        link: Link::Adjacent,
        min_len: 2,
    };

    /// Cells with at least one drawn edge, neighbours linked, length >= 2
    pub const POTENTIAL: ChainQuery = ChainQuery {
        min_edges: 1,
        link: Link::Adjacent,
        min_len: 2,
    };
}

/// A connected group of unowned cells
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chain {
    cells: Vec<Cell>,
}

impl Chain {
    /// Cells in discovery order
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.cells.contains(&cell)
    }

    /// Three or more cells
    pub fn is_long(&self) -> bool {
        self.len() >= 3
    }
}

/// Chains of unowned cells with at least two drawn edges
pub fn identify_chains(state: &GameState) -> Vec<Chain> {
    explore_chains(state, ChainQuery::CHAINS)
}

/// Chains of unowned cells with at least one drawn edge
pub fn identify_potential_chains(state: &GameState) -> Vec<Chain> {
    explore_chains(state, ChainQuery::POTENTIAL)
}

/// Breadth-first search for every chain matching `query`
pub fn explore_chains(state: &GameState, query: ChainQuery) -> Vec<Chain> {
    let board = state.board();
    let is_member = |cell: Cell| {
        state.cell_owner(cell).is_none() && state.drawn_edge_count(cell) >= query.min_edges
    };

    let mut visited = HashSet::new();
    let mut chains = Vec::new();

    for start in board.all_cells() {
        if visited.contains(&start) || !is_member(start) {
            continue;
        }

        let mut cells = Vec::new();
        let mut queue = VecDeque::from([start]);
        visited.insert(start);

        while let Some(cell) = queue.pop_front() {
            cells.push(cell);

            for neighbor in board.neighbor_cells(cell) {
                if visited.contains(&neighbor) || !is_member(neighbor) {
                    continue;
                }
                let linked = match query.link {
                    Link::Adjacent => true,
                    Link::DrawnEdge => board
                        .shared_edge(cell, neighbor)
                        .is_some_and(|edge| state.is_drawn(edge)),
                    Link::OpenEdge => board
                        .shared_edge(cell, neighbor)
                        .is_some_and(|edge| !state.is_drawn(edge)),
                };
                if linked {
                    visited.insert(neighbor);
                    queue.push_back(neighbor);
                }
            }
        }

        if cells.len() >= query.min_len {
            chains.push(Chain { cells });
        }
    }

    chains
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Edge;

    fn game_with(edges: &[Edge]) -> GameState {
        let mut game = GameState::new(5, 2).unwrap();
        for edge in edges {
            game.play_edge(*edge).unwrap();
        }
        game
    }

    #[test]
    fn empty_board_has_no_chains() {
        let game = GameState::new(5, 2).unwrap();
        assert!(identify_chains(&game).is_empty());
        assert!(identify_potential_chains(&game).is_empty());
    }

    #[test]
    fn corridor_forms_one_chain() {
        // Top and bottom of cells (0,0), (0,1), (0,2)
        let game = game_with(&[
            Edge::horizontal(0, 0),
            Edge::horizontal(1, 0),
            Edge::horizontal(0, 1),
            Edge::horizontal(1, 1),
            Edge::horizontal(0, 2),
            Edge::horizontal(1, 2),
        ]);

        let chains = identify_chains(&game);
        assert_eq!(chains.len(), 1);
        assert_eq!(chains[0].len(), 3);
        assert!(chains[0].is_long());
        assert!(chains[0].contains(Cell::new(0, 1)));

        // The corridor cells connect through open vertical edges
        let open = explore_chains(
            &game,
            ChainQuery {
                link: Link::OpenEdge,
                ..ChainQuery::CHAINS
            },
        );
        assert_eq!(open.len(), 1);
        let drawn = explore_chains(
            &game,
            ChainQuery {
                link: Link::DrawnEdge,
                ..ChainQuery::CHAINS
            },
        );
        assert!(drawn.is_empty());
    }

    #[test]
    fn single_cells_are_discarded() {
        let game = game_with(&[Edge::horizontal(0, 0), Edge::vertical(0, 0)]);
        assert!(identify_chains(&game).is_empty());
        assert!(identify_potential_chains(&game).is_empty());
    }

    #[test]
    fn potential_chains_use_one_edge_threshold() {
        let game = game_with(&[Edge::horizontal(0, 0), Edge::horizontal(0, 1)]);
        let chains = identify_potential_chains(&game);
        assert_eq!(chains.len(), 1);
        assert_eq!(chains[0].cells(), &[Cell::new(0, 0), Cell::new(0, 1)]);
    }
}

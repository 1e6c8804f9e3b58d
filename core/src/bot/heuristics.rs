// SPDX-License-Identifier: MIT OR Apache-2.0

//! Edge heuristics shared by every bot tier

use crate::board::{Cell, Edge};
use crate::game::GameState;
use rand::seq::SliceRandom;
use rand::Rng;

/// Danger added for a neighbouring cell that already has two edges
pub const TWO_EDGE_DANGER: u32 = 10;
/// Danger added for a neighbouring cell that has one edge
pub const ONE_EDGE_DANGER: u32 = 1;

/// Number of cells drawing `edge` would complete (0..=2)
pub fn completion_count(state: &GameState, edge: Edge) -> usize {
    state
        .board()
        .cells_adjacent_to_edge(edge)
        .into_iter()
        .filter(|cell| state.cell_owner(*cell).is_none() && state.drawn_edge_count(*cell) == 3)
        .count()
}

/// True if drawing `edge` claims at least one cell
pub fn would_complete_cell(state: &GameState, edge: Edge) -> bool {
    completion_count(state, edge) > 0
}

/// How much drawing `edge` exposes to the next player.
///
/// Counts the cells around the edge before the move: a cell with two drawn
/// edges adds [`TWO_EDGE_DANGER`], a cell with one adds [`ONE_EDGE_DANGER`].
pub fn danger_score(state: &GameState, edge: Edge) -> u32 {
    state
        .board()
        .cells_adjacent_to_edge(edge)
        .into_iter()
        .filter(|cell| state.cell_owner(*cell).is_none())
        .map(|cell| match state.drawn_edge_count(cell) {
            2 => TWO_EDGE_DANGER,
            1 => ONE_EDGE_DANGER,
            _ => 0,
        })
        .sum()
}

/// The edge completing the most cells; the first one wins ties
pub fn find_completing_edge(state: &GameState, edges: &[Edge]) -> Option<Edge> {
    let mut best: Option<(Edge, usize)> = None;
    for &edge in edges {
        let count = completion_count(state, edge);
        if count > best.map_or(0, |(_, top)| top) {
            best = Some((edge, count));
        }
    }
    best.map(|(edge, _)| edge)
}

/// No neighbouring cell has more than one drawn edge
pub fn is_safe_edge(state: &GameState, edge: Edge) -> bool {
    state
        .board()
        .cells_adjacent_to_edge(edge)
        .into_iter()
        .all(|cell| state.drawn_edge_count(cell) <= 1)
}

/// Every neighbouring cell is still empty
pub fn is_super_safe_edge(state: &GameState, edge: Edge) -> bool {
    state
        .board()
        .cells_adjacent_to_edge(edge)
        .into_iter()
        .all(|cell| state.drawn_edge_count(cell) == 0)
}

pub fn find_safe_edges(state: &GameState, edges: &[Edge]) -> Vec<Edge> {
    edges
        .iter()
        .copied()
        .filter(|edge| is_safe_edge(state, *edge))
        .collect()
}

pub fn find_super_safe_edges(state: &GameState, edges: &[Edge]) -> Vec<Edge> {
    edges
        .iter()
        .copied()
        .filter(|edge| is_super_safe_edge(state, *edge))
        .collect()
}

/// All edges sharing the minimum danger score
pub fn least_dangerous_edges(state: &GameState, edges: &[Edge]) -> Vec<Edge> {
    let scored: Vec<(Edge, u32)> = edges
        .iter()
        .map(|edge| (*edge, danger_score(state, *edge)))
        .collect();
    let Some(min) = scored.iter().map(|(_, danger)| *danger).min() else {
        return Vec::new();
    };
    scored
        .into_iter()
        .filter(|(_, danger)| *danger == min)
        .map(|(edge, _)| edge)
        .collect()
}

/// Safe edges left on the board after drawing `edge`
pub fn safe_edges_after(state: &GameState, edge: Edge) -> usize {
    let mut next = state.clone();
    if next.apply_edge(edge).is_err() {
        return 0;
    }
    next.undrawn_edges()
        .into_iter()
        .filter(|candidate| is_safe_edge(&next, *candidate))
        .count()
}

/// Edges bordering any of `cells`
pub fn edges_touching(state: &GameState, cells: &[Cell], edges: &[Edge]) -> Vec<Edge> {
    edges
        .iter()
        .copied()
        .filter(|edge| {
            state
                .board()
                .cells_adjacent_to_edge(*edge)
                .iter()
                .any(|cell| cells.contains(cell))
        })
        .collect()
}

/// Uniform random choice
pub fn pick<R: Rng + ?Sized>(edges: &[Edge], rng: &mut R) -> Option<Edge> {
    edges.choose(rng).copied()
}

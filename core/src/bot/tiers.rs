// SPDX-License-Identifier: MIT OR Apache-2.0

//! Move policies for each difficulty tier.
//!
//! Every policy receives a non-empty list of undrawn candidate edges and
//! always returns one of them.

use super::heuristics::{
    edges_touching, find_completing_edge, find_safe_edges, find_super_safe_edges,
    least_dangerous_edges, pick, safe_edges_after,
};
use super::minimax;
use crate::board::{Cell, Edge};
use crate::chains::{identify_chains, Chain};
use crate::config::BotConfig;
use crate::game::GameState;
use rand::Rng;

/// Chains at least this long make a short-chain sacrifice worthwhile
const SACRIFICE_LONG_CHAIN: usize = 4;

pub(super) fn easy<R: Rng + ?Sized>(
    state: &GameState,
    candidates: &[Edge],
    config: &BotConfig,
    rng: &mut R,
) -> Edge {
    if let Some(edge) = find_completing_edge(state, candidates) {
        if rng.gen::<f64>() < config.easy_complete_chance {
            return edge;
        }
    }

    if rng.gen::<f64>() < config.easy_safe_chance {
        if let Some(edge) = pick(&find_safe_edges(state, candidates), rng) {
            return edge;
        }
    }

    pick(candidates, rng).unwrap_or(candidates[0])
}

pub(super) fn medium<R: Rng + ?Sized>(state: &GameState, candidates: &[Edge], rng: &mut R) -> Edge {
    if let Some(edge) = find_completing_edge(state, candidates) {
        return edge;
    }

    if let Some(edge) = pick(&chain_building_edges(state, candidates), rng) {
        return edge;
    }

    if let Some(edge) = pick(&find_super_safe_edges(state, candidates), rng) {
        return edge;
    }

    if let Some(edge) = pick(&find_safe_edges(state, candidates), rng) {
        return edge;
    }

    pick(&least_dangerous_edges(state, candidates), rng).unwrap_or(candidates[0])
}

pub(super) fn hard<R: Rng + ?Sized>(
    state: &GameState,
    candidates: &[Edge],
    config: &BotConfig,
    rng: &mut R,
) -> Edge {
    if let Some(edge) = find_completing_edge(state, candidates) {
        return edge;
    }

    let chains = identify_chains(state);
    if let Some(edge) = chain_control_edge(state, candidates, &chains, config.long_chain_len) {
        tracing::trace!(%edge, "Hard bot: chain control");
        return edge;
    }

    if let Some(edge) = sacrifice_edge(state, candidates, &chains) {
        tracing::trace!(%edge, "Hard bot: sacrifice");
        return edge;
    }

    let safe = find_safe_edges(state, candidates);
    if let Some(edge) = parity_edge(state, &safe) {
        return edge;
    }

    pick(&safe, rng).unwrap_or(candidates[0])
}

pub(super) fn expert(state: &GameState, candidates: &[Edge], config: &BotConfig) -> Edge {
    if let Some(edge) = find_completing_edge(state, candidates) {
        return edge;
    }

    let chains = identify_chains(state);
    if let Some(edge) = chain_master_edge(state, candidates, &chains, config) {
        tracing::trace!(%edge, "Expert bot: chain control");
        return edge;
    }

    if state.remaining_cells() <= config.endgame_cells {
        if let Some(edge) = minimax::best_edge(state, candidates, config) {
            return edge;
        }
    }

    let safe = find_safe_edges(state, candidates);
    if let Some(edge) = tempo_edge(state, &safe) {
        return edge;
    }

    if let Some(edge) = parity_edge(state, &safe) {
        return edge;
    }

    candidates[0]
}

/// Safe edges that raise a one-edge cell next to an existing chain cell
fn chain_building_edges(state: &GameState, candidates: &[Edge]) -> Vec<Edge> {
    let board = state.board();
    find_safe_edges(state, candidates)
        .into_iter()
        .filter(|edge| {
            board.cells_adjacent_to_edge(*edge).into_iter().any(|cell| {
                state.drawn_edge_count(cell) == 1
                    && board.neighbor_cells(cell).into_iter().any(|neighbor| {
                        state.cell_owner(neighbor).is_none() && state.drawn_edge_count(neighbor) >= 2
                    })
            })
        })
        .collect()
}

/// Least dangerous edge touching the longest chain, if it is long enough
fn chain_control_edge(
    state: &GameState,
    candidates: &[Edge],
    chains: &[Chain],
    min_len: usize,
) -> Option<Edge> {
    let longest = chains.iter().max_by_key(|chain| chain.len())?;
    if longest.len() < min_len {
        return None;
    }
    let touching = edges_touching(state, longest.cells(), candidates);
    least_dangerous_edges(state, &touching).first().copied()
}

/// Give away a two-cell chain while a long chain is still on the board
fn sacrifice_edge(state: &GameState, candidates: &[Edge], chains: &[Chain]) -> Option<Edge> {
    if !chains.iter().any(|chain| chain.len() >= SACRIFICE_LONG_CHAIN) {
        return None;
    }
    let short = chains.iter().find(|chain| chain.len() == 2)?;
    let touching = edges_touching(state, short.cells(), candidates);
    least_dangerous_edges(state, &touching).first().copied()
}

/// First safe edge leaving an even number of safe edges behind, so the
/// opponent runs out of safe moves first
fn parity_edge(state: &GameState, safe: &[Edge]) -> Option<Edge> {
    safe.iter()
        .copied()
        .find(|edge| safe_edges_after(state, *edge) % 2 == 0)
}

/// Safe edge that pushes a cell to two edges and leaves the fewest safe
/// replies
fn tempo_edge(state: &GameState, safe: &[Edge]) -> Option<Edge> {
    let board = state.board();
    let mut best: Option<(Edge, usize)> = None;

    for &edge in safe {
        let forcing = board
            .cells_adjacent_to_edge(edge)
            .into_iter()
            .any(|cell| state.drawn_edge_count(cell) == 1);
        if !forcing {
            continue;
        }
        let replies = safe_edges_after(state, edge);
        if replies < best.map_or(usize::MAX, |(_, fewest)| fewest) {
            best = Some((edge, replies));
        }
    }

    best.map(|(edge, _)| edge)
}

fn chain_master_edge(
    state: &GameState,
    candidates: &[Edge],
    chains: &[Chain],
    config: &BotConfig,
) -> Option<Edge> {
    if let Some(edge) = find_double_deal_move(state, chains) {
        return Some(edge);
    }
    if let Some(edge) = find_chain_merge_move(state, chains) {
        return Some(edge);
    }

    // Whoever is forced to open the first long chain loses it: stay out of
    // long chains and keep the safe-move parity in our favour.
    let long_cells: Vec<Cell> = chains
        .iter()
        .filter(|chain| chain.len() >= config.long_chain_len)
        .flat_map(|chain| chain.cells().iter().copied())
        .collect();
    if long_cells.is_empty() {
        return None;
    }
    let touching = edges_touching(state, &long_cells, candidates);
    let away: Vec<Edge> = find_safe_edges(state, candidates)
        .into_iter()
        .filter(|edge| !touching.contains(edge))
        .collect();
    parity_edge(state, &away).or_else(|| away.first().copied())
}

/// Double-dealing: decline the last two boxes of a long chain.
///
/// Always `None` for now.
// TODO: hand the last two cells of a captured long chain back to the opponent
// when more long chains remain.
fn find_double_deal_move(_state: &GameState, _chains: &[Chain]) -> Option<Edge> {
    None
}

/// Merging two short chains into one long chain. Always `None` for now.
fn find_chain_merge_move(_state: &GameState, _chains: &[Chain]) -> Option<Edge> {
    None
}

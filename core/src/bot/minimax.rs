// SPDX-License-Identifier: MIT OR Apache-2.0

//! Depth-limited alpha-beta search for endgames

use super::heuristics::{completion_count, danger_score};
use crate::board::Edge;
use crate::chains::identify_chains;
use crate::config::BotConfig;
use crate::game::GameState;
use crate::logging::SearchTimer;
use crate::PlayerId;

const SCORE_WEIGHT: i32 = 10;
const LONG_CHAIN_WEIGHT: i32 = 5;
const SHORT_CHAIN_WEIGHT: i32 = 2;

/// Best of `candidates` for the player to move, searching
/// `config.search_depth` logical turns ahead.
///
/// Returns `None` if `candidates` is empty or the game is over.
pub fn best_edge(state: &GameState, candidates: &[Edge], config: &BotConfig) -> Option<Edge> {
    if state.is_game_over() || candidates.is_empty() {
        return None;
    }

    let mut timer = SearchTimer::new("endgame search");
    let root = state.current_player();
    let depth = config.search_depth.max(1);
    let mut alpha = i32::MIN;
    let beta = i32::MAX;
    let mut best: Option<(Edge, i32)> = None;

    for edge in ordered_moves(state, candidates, config.branch_cap) {
        let mut child = state.clone();
        if child.play_edge(edge).is_err() {
            continue;
        }
        let value = search(&child, depth - 1, alpha, beta, root, config, &mut timer);
        if best.is_none() || best.is_some_and(|(_, top)| value > top) {
            best = Some((edge, value));
        }
        alpha = alpha.max(value);
    }

    if let Some((edge, value)) = best {
        tracing::debug!(%edge, value, nodes = timer.nodes(), "Search picked edge");
    }
    best.map(|(edge, _)| edge)
}

/// Static evaluation from `root`'s point of view
pub fn evaluate(state: &GameState, root: PlayerId) -> i32 {
    let mine = state.score(root) as i32;
    let best_opponent = (1..=state.player_count())
        .filter(|player| *player != root)
        .map(|player| state.score(player) as i32)
        .max()
        .unwrap_or(0);

    let chains = identify_chains(state);
    let long = chains.iter().filter(|chain| chain.is_long()).count() as i32;
    let short = chains.len() as i32 - long;

    (mine - best_opponent) * SCORE_WEIGHT + long * LONG_CHAIN_WEIGHT - short * SHORT_CHAIN_WEIGHT
}

/// Moves most likely to matter first: most completions, then least danger.
/// At most `cap` moves are kept.
fn ordered_moves(state: &GameState, edges: &[Edge], cap: usize) -> Vec<Edge> {
    let mut scored: Vec<(Edge, usize, u32)> = edges
        .iter()
        .map(|edge| (*edge, completion_count(state, *edge), danger_score(state, *edge)))
        .collect();
    scored.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));
    scored.truncate(cap.max(1));
    scored.into_iter().map(|(edge, _, _)| edge).collect()
}

fn search(
    state: &GameState,
    depth: u8,
    mut alpha: i32,
    mut beta: i32,
    root: PlayerId,
    config: &BotConfig,
    timer: &mut SearchTimer,
) -> i32 {
    timer.visit();
    if depth == 0 || state.is_game_over() {
        return evaluate(state, root);
    }

    let moves = ordered_moves(state, &state.undrawn_edges(), config.branch_cap);
    let maximizing = state.current_player() == root;
    let mut best = if maximizing { i32::MIN } else { i32::MAX };

    for edge in moves {
        let mut child = state.clone();
        if child.play_edge(edge).is_err() {
            continue;
        }
        let value = search(&child, depth - 1, alpha, beta, root, config, timer);

        if maximizing {
            best = best.max(value);
            alpha = alpha.max(value);
        } else {
            best = best.min(value);
            beta = beta.min(value);
        }
        if beta <= alpha {
            break;
        }
    }

    best
}

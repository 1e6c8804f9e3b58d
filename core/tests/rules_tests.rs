// SPDX-License-Identifier: MIT OR Apache-2.0

use pins_core::{Cell, Edge, GameError, GameState, InvalidMove};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

#[test]
fn single_cell_goes_to_fourth_edge() {
    let edges = [
        Edge::horizontal(0, 0),
        Edge::vertical(0, 0),
        Edge::horizontal(1, 0),
        Edge::vertical(0, 1),
    ];

    // Every rotation of the draw order
    for start in 0..edges.len() {
        let mut game = GameState::new(2, 2).unwrap();
        for i in 0..edges.len() {
            let edge = edges[(start + i) % edges.len()];
            let drawer = game.current_player();
            let applied = game.play_edge(edge).unwrap();

            if i == 3 {
                assert_eq!(applied.completed_cells, vec![Cell::new(0, 0)]);
                assert_eq!(game.cell_owner(Cell::new(0, 0)), Some(drawer));
                assert!(game.is_game_over());
                assert_eq!(game.winners(), vec![drawer]);
            } else {
                assert!(applied.completed_cells.is_empty());
                assert!(!game.is_game_over());
            }
        }
    }
}

#[test]
fn shared_edge_completes_two_cells() {
    let mut game = GameState::new(3, 2).unwrap();
    for edge in [
        Edge::horizontal(0, 0),
        Edge::horizontal(0, 1),
        Edge::horizontal(1, 0),
        Edge::horizontal(1, 1),
        Edge::vertical(0, 0),
        Edge::vertical(0, 2),
    ] {
        assert!(!game.play_edge(edge).unwrap().completed_any());
    }
    assert_eq!(game.current_player(), 1);

    let applied = game.play_edge(Edge::vertical(0, 1)).unwrap();
    assert_eq!(applied.completed_cells, vec![Cell::new(0, 0), Cell::new(0, 1)]);
    assert!(!applied.turn_advanced);
    assert_eq!(game.current_player(), 1);
    assert_eq!(game.score(1), 2);
    assert_eq!(game.cell_owner(Cell::new(0, 1)), Some(1));
}

#[test]
fn chain_auto_completion_in_one_turn() {
    let mut game = GameState::new(3, 2).unwrap();
    // (0,0) is left with only its right edge open; (0,1) has top and right
    for edge in [
        Edge::horizontal(0, 0),
        Edge::horizontal(0, 1),
        Edge::vertical(0, 0),
        Edge::vertical(0, 2),
        Edge::horizontal(1, 0),
    ] {
        game.play_edge(edge).unwrap();
    }
    assert_eq!(game.current_player(), 2);

    // Closing (0,0) leaves (0,1) with three edges through the new edge
    let applied = game.play_edge(Edge::vertical(0, 1)).unwrap();
    assert_eq!(applied.player, 2);
    assert_eq!(applied.auto_edges, vec![Edge::horizontal(1, 1)]);
    assert_eq!(applied.completed_cells, vec![Cell::new(0, 0), Cell::new(0, 1)]);
    assert_eq!(game.cell_owner(Cell::new(0, 0)), Some(2));
    assert_eq!(game.cell_owner(Cell::new(0, 1)), Some(2));
    assert_eq!(game.edge_owner(Edge::horizontal(1, 1)), Some(2));
    assert_eq!(game.current_player(), 2, "completing player keeps the turn");
    assert_eq!(game.score(2), 2);
}

/// Top and bottom of cells (0,0)..(0,3) on a 5x5 dot grid, plus `extra`
fn corridor(extra: &[Edge]) -> GameState {
    let mut game = GameState::new(5, 2).unwrap();
    for col in 0..4 {
        game.play_edge(Edge::horizontal(0, col)).unwrap();
        game.play_edge(Edge::horizontal(1, col)).unwrap();
    }
    for edge in extra {
        game.play_edge(*edge).unwrap();
    }
    game
}

#[test]
fn chain_runs_down_a_corridor() {
    let mut game = corridor(&[Edge::vertical(0, 0)]);
    assert_eq!(game.current_player(), 2);

    // Each auto-drawn edge leaves the next cell with three edges
    let applied = game.play_edge(Edge::vertical(0, 1)).unwrap();
    assert_eq!(
        applied.auto_edges,
        vec![Edge::vertical(0, 2), Edge::vertical(0, 3), Edge::vertical(0, 4)]
    );
    assert_eq!(
        applied.completed_cells,
        vec![Cell::new(0, 0), Cell::new(0, 1), Cell::new(0, 2), Cell::new(0, 3)]
    );
    for col in 0..4 {
        assert_eq!(game.cell_owner(Cell::new(0, col)), Some(2));
    }
    assert_eq!(game.score(2), 4);
    assert_eq!(game.current_player(), 2);
}

#[test]
fn chain_does_not_cross_earlier_edges() {
    let mut game = corridor(&[Edge::vertical(0, 0), Edge::vertical(0, 2)]);
    assert_eq!(game.current_player(), 1);
    assert_eq!(game.drawn_edge_count(Cell::new(0, 2)), 3);

    // (0,2) sits behind V(0,2), drawn in an earlier turn
    let applied = game.play_edge(Edge::vertical(0, 1)).unwrap();
    assert!(applied.auto_edges.is_empty());
    assert_eq!(applied.completed_cells, vec![Cell::new(0, 0), Cell::new(0, 1)]);
    assert_eq!(game.cell_owner(Cell::new(0, 2)), None);
    assert_eq!(game.drawn_edge_count(Cell::new(0, 2)), 3);
    assert_eq!(game.current_player(), 1);
}

#[test]
fn auto_chain_can_be_disabled() {
    let mut game = GameState::new(3, 2).unwrap().with_auto_chain(false);
    for edge in [
        Edge::horizontal(0, 0),
        Edge::horizontal(0, 1),
        Edge::vertical(0, 0),
        Edge::vertical(0, 2),
        Edge::horizontal(1, 0),
    ] {
        game.play_edge(edge).unwrap();
    }

    let applied = game.play_edge(Edge::vertical(0, 1)).unwrap();
    assert!(applied.auto_edges.is_empty());
    assert_eq!(applied.completed_cells, vec![Cell::new(0, 0)]);
    assert_eq!(game.cell_owner(Cell::new(0, 1)), None);
}

#[test]
fn second_application_is_rejected() {
    let mut game = GameState::new(4, 3).unwrap();
    let edge = Edge::vertical(2, 3);
    game.play_edge(edge).unwrap();

    let before = game.clone();
    let result = game.play_edge(edge);
    assert_eq!(result, Err(GameError::InvalidMove(InvalidMove::AlreadyDrawn(edge))));
    assert!(result.unwrap_err().is_invalid_move());
    assert_eq!(game, before);
}

#[test]
fn moves_after_game_over_are_rejected() {
    let mut game = GameState::new(2, 2).unwrap();
    for edge in game.undrawn_edges() {
        game.play_edge(edge).unwrap();
    }
    let before = game.clone();
    assert_eq!(
        game.apply_edge(Edge::horizontal(0, 0)),
        Err(GameError::InvalidMove(InvalidMove::GameOver))
    );
    assert_eq!(game, before);
}

#[test]
fn turn_passes_only_without_completion() {
    let mut rng = StdRng::seed_from_u64(7);

    for players in 2..=5u8 {
        let mut game = GameState::new(5, players).unwrap();
        let mut edges = game.undrawn_edges();
        edges.shuffle(&mut rng);

        for edge in edges {
            if game.is_drawn(edge) {
                // Already drawn by chain auto-completion
                continue;
            }
            let before = game.current_player();
            let applied = game.play_edge(edge).unwrap();
            if applied.completed_any() {
                assert_eq!(game.current_player(), before);
            } else {
                assert_eq!(game.current_player(), before % players + 1);
            }
        }
        assert!(game.is_game_over());
    }
}

#[test]
fn scores_add_up_to_cell_count() {
    let mut rng = StdRng::seed_from_u64(11);

    for size in 2..=8u8 {
        let mut game = GameState::new(size, 2).unwrap();
        let cells = (size as usize - 1).pow(2);
        assert_eq!(game.board().total_cells(), cells);
        assert_eq!(game.board().total_edges(), 2 * size as usize * (size as usize - 1));

        while !game.is_game_over() {
            let edge = *game.undrawn_edges().choose(&mut rng).unwrap();
            game.play_edge(edge).unwrap();
        }
        assert_eq!(game.scores().iter().sum::<u32>() as usize, cells);
        assert_eq!(game.remaining_cells(), 0);
    }
}

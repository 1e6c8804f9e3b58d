// SPDX-License-Identifier: MIT OR Apache-2.0

//! ASCII board rendering for the CLI.

use pins_core::{Cell, Edge, GameState};

/// Render the game board as ASCII art.
///
/// Dots are `+`, drawn edges `---` and `|`, claimed cells show the owner.
pub fn render_board(game_state: &GameState) -> String {
    let size = game_state.grid_size();
    let mut output = String::new();

    // Column labels over the dots
    output.push_str("   ");
    for col in 0..size {
        output.push_str(&format!("{:<4}", col));
    }
    output.push('\n');

    for row in 0..size {
        // Dot row with horizontal edges
        output.push_str(&format!("{:2} ", row));
        for col in 0..size {
            output.push('+');
            if col + 1 < size {
                let drawn = game_state.is_drawn(Edge::horizontal(row, col));
                output.push_str(if drawn { "---" } else { "   " });
            }
        }
        output.push('\n');

        if row + 1 == size {
            break;
        }

        // Cell row with vertical edges and owners
        output.push_str("   ");
        for col in 0..size {
            let drawn = game_state.is_drawn(Edge::vertical(row, col));
            output.push(if drawn { '|' } else { ' ' });
            if col + 1 < size {
                output.push_str(&format!(" {} ", owner_mark(game_state, Cell::new(row, col))));
            }
        }
        output.push('\n');
    }

    output
}

/// One-line score summary, e.g. `P1: 3  P2: 5 (to move)`
pub fn render_scores(game_state: &GameState) -> String {
    (1..=game_state.player_count())
        .map(|player| {
            let mut entry = format!("P{}: {}", player, game_state.score(player));
            if !game_state.is_game_over() && player == game_state.current_player() {
                entry.push_str(" (to move)");
            }
            entry
        })
        .collect::<Vec<_>>()
        .join("  ")
}

fn owner_mark(game_state: &GameState, cell: Cell) -> char {
    match game_state.cell_owner(cell) {
        Some(player) => char::from_digit(player as u32, 10).unwrap_or('?'),
        None => ' ',
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_empty_board() {
        let game_state = GameState::new(3, 2).unwrap();
        let output = render_board(&game_state);

        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 6); // label row + 3 dot rows + 2 cell rows
        assert!(lines[1].ends_with("+   +   +"));
        assert!(!output.contains('|'));
        assert!(!output.contains("---"));
    }

    #[test]
    fn test_render_board_with_edges_and_owner() {
        let mut game_state = GameState::new(3, 2).unwrap();
        for edge in [
            Edge::horizontal(0, 0),
            Edge::vertical(0, 0),
            Edge::horizontal(1, 0),
            Edge::vertical(0, 1),
        ] {
            game_state.play_edge(edge).unwrap();
        }

        let output = render_board(&game_state);
        let lines: Vec<&str> = output.lines().collect();
        assert!(lines[1].contains("+---+"));
        assert!(lines[2].starts_with("   | 2 |"));
    }

    #[test]
    fn test_render_scores() {
        let game_state = GameState::new(3, 3).unwrap();
        assert_eq!(render_scores(&game_state), "P1: 0 (to move)  P2: 0  P3: 0");
    }
}

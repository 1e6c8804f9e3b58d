//! Quick Pins Demo - Standalone bot-versus-bot game
//! Plays one game between two bot tiers and prints each turn

use anyhow::Result;
use pins_core::engine::BotPlayer;
use pins_core::logging::{GameContext, MoveLogEntry};
use pins_core::{Difficulty, GameState, PlayerBackend};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut args = std::env::args().skip(1);
    let first: Difficulty = args.next().as_deref().unwrap_or("hard").parse()?;
    let second: Difficulty = args.next().as_deref().unwrap_or("expert").parse()?;

    let mut game = GameState::new(5, 2)?;
    let mut context = GameContext::new();
    let mut bots = [BotPlayer::seeded(first, 1), BotPlayer::seeded(second, 2)];
    println!("Pins demo: {} (P1) vs {} (P2)", first, second);

    while !game.is_game_over() {
        let player = game.current_player();
        let Some(edge) = bots[(player - 1) as usize].next_edge(&game) else {
            break;
        };
        let applied = game.play_edge(edge)?;
        MoveLogEntry::new(&mut context, &applied).emit();

        if applied.completed_any() {
            println!("P{} drew {} and claimed {} box(es)", player, edge, applied.completed_cells.len());
        } else {
            println!("P{} drew {}", player, edge);
        }
    }

    println!("Final scores: {:?}", game.scores());
    match game.winners().as_slice() {
        [winner] => println!("Player {} wins", winner),
        _ => println!("Draw"),
    }
    Ok(())
}

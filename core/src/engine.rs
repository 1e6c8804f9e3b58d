// SPDX-License-Identifier: MIT OR Apache-2.0

//! Game engine interfaces: player backends and the session driver

use crate::board::{Cell, Edge};
use crate::bot::{choose_edge, Difficulty};
use crate::config::{BotConfig, GameConfig, PinsConfig};
use crate::game::{AppliedMove, GameState};
use crate::logging::{GameContext, MoveLogEntry};
use crate::snapshot::GameSnapshot;
use crate::{GameError, PlayerId};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Player backend trait for both human and AI players
pub trait PlayerBackend {
    /// Get the next edge from this player, `None` once the game is over
    fn next_edge(&mut self, state: &GameState) -> Option<Edge>;
}

/// Bot backend driven by one of the difficulty tiers
pub struct BotPlayer<R: Rng> {
    difficulty: Difficulty,
    config: BotConfig,
    rng: R,
}

impl<R: Rng> BotPlayer<R> {
    pub fn new(difficulty: Difficulty, rng: R) -> Self {
        Self::with_config(difficulty, BotConfig::default(), rng)
    }

    pub fn with_config(difficulty: Difficulty, config: BotConfig, rng: R) -> Self {
        Self {
            difficulty,
            config,
            rng,
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }
}

impl BotPlayer<StdRng> {
    /// Reproducible bot
    pub fn seeded(difficulty: Difficulty, seed: u64) -> Self {
        Self::new(difficulty, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> PlayerBackend for BotPlayer<R> {
    fn next_edge(&mut self, state: &GameState) -> Option<Edge> {
        let candidates = state.undrawn_edges();
        choose_edge(state, &candidates, self.difficulty, &self.config, &mut self.rng)
    }
}

/// Who controls a player slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Seat {
    Human,
    Bot(Difficulty),
}

/// Things that happened in a session, in order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// An edge was drawn, by the player or by chain auto-completion
    EdgeDrawn {
        player: PlayerId,
        edge: Edge,
        auto: bool,
    },
    /// Cells were claimed during one turn
    CellsCompleted { player: PlayerId, cells: Vec<Cell> },
    /// The last cell was claimed
    GameFinished {
        winners: Vec<PlayerId>,
        scores: Vec<u32>,
    },
}

/// One game plus the seats playing it
pub struct Session {
    state: GameState,
    config: PinsConfig,
    seats: Vec<Seat>,
    context: GameContext,
    events: Vec<GameEvent>,
    move_log: Vec<MoveLogEntry>,
    rng: StdRng,
}

impl Session {
    /// Start a session; `seats` must have one entry per player
    pub fn new(config: PinsConfig, seats: Vec<Seat>) -> Result<Self, GameError> {
        Self::with_rng(config, seats, StdRng::from_entropy())
    }

    /// Start a session whose bots use a seeded generator
    pub fn with_seed(config: PinsConfig, seats: Vec<Seat>, seed: u64) -> Result<Self, GameError> {
        Self::with_rng(config, seats, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: PinsConfig, seats: Vec<Seat>, rng: StdRng) -> Result<Self, GameError> {
        config.validate()?;
        check_seats(&seats, config.game.player_count)?;
        let state = GameState::from_config(&config.game)?;
        let context = GameContext::new();
        tracing::info!(
            game_id = %context.game_id,
            grid = config.game.grid_size,
            players = config.game.player_count,
            "Session started"
        );

        Ok(Self {
            state,
            config,
            seats,
            context,
            events: Vec::new(),
            move_log: Vec::new(),
            rng,
        })
    }

    /// Resume a game from a snapshot. The board settings come from the
    /// snapshot; `config` only supplies the bot tuning.
    pub fn from_snapshot(
        config: PinsConfig,
        seats: Vec<Seat>,
        snapshot: &GameSnapshot,
    ) -> Result<Self, GameError> {
        Self::resume(config, seats, snapshot, StdRng::from_entropy())
    }

    /// Resume a game from a snapshot with seeded bots
    pub fn from_snapshot_with_seed(
        config: PinsConfig,
        seats: Vec<Seat>,
        snapshot: &GameSnapshot,
        seed: u64,
    ) -> Result<Self, GameError> {
        Self::resume(config, seats, snapshot, StdRng::seed_from_u64(seed))
    }

    fn resume(
        mut config: PinsConfig,
        seats: Vec<Seat>,
        snapshot: &GameSnapshot,
        rng: StdRng,
    ) -> Result<Self, GameError> {
        let state = snapshot.restore()?;
        config.game = GameConfig {
            grid_size: state.grid_size(),
            player_count: state.player_count(),
            auto_chain: state.auto_chain(),
        };
        config.validate()?;
        check_seats(&seats, state.player_count())?;

        let context = match &snapshot.game_id {
            Some(game_id) => GameContext::with_game_id(game_id.clone()),
            None => GameContext::new(),
        };
        tracing::info!(
            game_id = %context.game_id,
            drawn = state.history().len(),
            "Session resumed"
        );

        Ok(Self {
            state,
            config,
            seats,
            context,
            events: Vec::new(),
            move_log: Vec::new(),
            rng,
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &PinsConfig {
        &self.config
    }

    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }

    /// Seat of a player id, if it exists
    pub fn seat(&self, player: PlayerId) -> Option<Seat> {
        player
            .checked_sub(1)
            .and_then(|i| self.seats.get(i as usize))
            .copied()
    }

    pub fn context(&self) -> &GameContext {
        &self.context
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Take all events recorded so far
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn move_log(&self) -> &[MoveLogEntry] {
        &self.move_log
    }

    pub fn current_player(&self) -> PlayerId {
        self.state.current_player()
    }

    pub fn undrawn_edges(&self) -> Vec<Edge> {
        self.state.undrawn_edges()
    }

    pub fn is_game_over(&self) -> bool {
        self.state.is_game_over()
    }

    pub fn winners(&self) -> Vec<PlayerId> {
        self.state.winners()
    }

    /// Snapshot of the board, tagged with this session's game id
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            game_id: Some(self.context.game_id.clone()),
            ..GameSnapshot::capture(&self.state)
        }
    }

    /// Play an edge for whoever holds the turn
    pub fn apply_edge(&mut self, edge: Edge) -> Result<AppliedMove, GameError> {
        let applied = match self.state.play_edge(edge) {
            Ok(applied) => applied,
            Err(err) => {
                tracing::warn!(game_id = %self.context.game_id, %edge, "Move rejected: {}", err);
                return Err(err);
            }
        };
        self.record(&applied);
        Ok(applied)
    }

    /// Play an edge on behalf of `player`, who must hold the turn
    pub fn submit_edge(&mut self, player: PlayerId, edge: Edge) -> Result<AppliedMove, GameError> {
        let expected = self.state.current_player();
        if player != expected {
            tracing::warn!(expected, actual = player, "Move submitted out of turn");
            return Err(GameError::NotYourTurn {
                expected,
                actual: player,
            });
        }
        self.apply_edge(edge)
    }

    /// Let bot seats move until a human holds the turn or the game ends
    pub fn play_bot_turns(&mut self) -> Result<Vec<AppliedMove>, GameError> {
        let mut played = Vec::new();

        while !self.state.is_game_over() {
            let Some(Seat::Bot(difficulty)) = self.seat(self.state.current_player()) else {
                break;
            };
            let mut bot =
                BotPlayer::with_config(difficulty, self.config.bot.clone(), &mut self.rng);
            let Some(edge) = bot.next_edge(&self.state) else {
                break;
            };
            played.push(self.apply_edge(edge)?);
        }

        Ok(played)
    }

    /// Start over on a fresh board. Missing seats are filled with humans.
    pub fn reset_game(&mut self, grid_size: u8, player_count: u8) -> Result<(), GameError> {
        let game = GameConfig {
            grid_size,
            player_count,
            auto_chain: self.config.game.auto_chain,
        };
        let state = GameState::from_config(&game)?;

        self.seats.resize(player_count as usize, Seat::Human);
        self.config.game = game;
        self.state = state;
        self.context = GameContext::new();
        self.events.clear();
        self.move_log.clear();
        tracing::info!(game_id = %self.context.game_id, grid = grid_size, players = player_count, "Game reset");
        Ok(())
    }

    fn record(&mut self, applied: &AppliedMove) {
        self.events.push(GameEvent::EdgeDrawn {
            player: applied.player,
            edge: applied.edge,
            auto: false,
        });
        for edge in &applied.auto_edges {
            self.events.push(GameEvent::EdgeDrawn {
                player: applied.player,
                edge: *edge,
                auto: true,
            });
        }
        if applied.completed_any() {
            self.events.push(GameEvent::CellsCompleted {
                player: applied.player,
                cells: applied.completed_cells.clone(),
            });
        }
        if self.state.is_game_over() {
            self.events.push(GameEvent::GameFinished {
                winners: self.state.winners(),
                scores: self.state.scores().to_vec(),
            });
        }

        let entry = MoveLogEntry::new(&mut self.context, applied);
        entry.emit();
        self.move_log.push(entry);
    }
}

fn check_seats(seats: &[Seat], player_count: u8) -> Result<(), GameError> {
    if seats.len() != player_count as usize {
        return Err(GameError::InvalidConfig(format!(
            "{} seats for {} players",
            seats.len(),
            player_count
        )));
    }
    Ok(())
}

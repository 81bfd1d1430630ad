//! Game state and simulation events
//!
//! [`GameState`] is the single simulation context: it owns the map, the
//! player and the enemy roster, and is passed by reference into the driver.

use thiserror::Error;

use super::entity::{Entity, Role};
use super::roster::{EnemyRoster, Handle, RosterError};
use super::tilemap::{TileMap, TileMapError};
use crate::tuning::{Tuning, TuningError};

/// How a finished run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Won,
    Lost,
}

impl Outcome {
    /// Terminal banner text
    pub fn message(self) -> &'static str {
        match self {
            Outcome::Won => "YOU WIN!",
            Outcome::Lost => "YOU LOSE",
        }
    }
}

/// Current phase of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GamePhase {
    #[default]
    Running,
    /// Simulation is frozen; render keeps showing the outcome
    GameOver(Outcome),
}

/// Why an enemy left the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefeatCause {
    Stomped,
    Fell,
}

/// Discrete notifications for external listeners (audio, HUD)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// The player left the ground
    Jumped,
    /// A shooter launched its bullet
    ShotFired { shooter: Handle },
    EnemyDefeated { enemy: Handle, cause: DefeatCause },
    /// The player was caught, shot or fell out of the level
    PlayerDefeated,
    GameOver(Outcome),
}

/// Initialization failures. All of these abort before the run loop starts.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error(transparent)]
    TileMap(#[from] TileMapError),
    #[error(transparent)]
    Roster(#[from] RosterError),
    #[error(transparent)]
    Tuning(#[from] TuningError),
    #[error("the player entity must have the player role")]
    PlayerRole,
}

/// Complete simulation context
#[derive(Debug, Clone)]
pub struct GameState {
    pub tuning: Tuning,
    pub map: TileMap,
    pub player: Entity,
    pub enemies: EnemyRoster,
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Defeated enemies, bullets excluded (recounted every tick)
    pub enemies_defeated: usize,
    pub(crate) events: Vec<GameEvent>,
}

impl GameState {
    pub fn new(
        tuning: Tuning,
        map: TileMap,
        player: Entity,
        enemies: EnemyRoster,
    ) -> Result<Self, SetupError> {
        tuning.validate()?;
        if player.role != Role::Player {
            return Err(SetupError::PlayerRole);
        }
        Ok(Self {
            tuning,
            map,
            player,
            enemies,
            phase: GamePhase::Running,
            time_ticks: 0,
            enemies_defeated: 0,
            events: Vec::new(),
        })
    }

    pub fn is_over(&self) -> bool {
        matches!(self.phase, GamePhase::GameOver(_))
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self.phase {
            GamePhase::GameOver(outcome) => Some(outcome),
            GamePhase::Running => None,
        }
    }

    /// Enemies that must be defeated to win
    pub fn enemies_to_defeat(&self) -> usize {
        self.enemies.countable()
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Events since the last drain, oldest first
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

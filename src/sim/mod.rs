//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Stable iteration order (player first, then roster slot order)
//! - No rendering or platform dependencies

pub mod ai;
pub mod collision;
pub mod entity;
pub mod level;
pub mod roster;
pub mod state;
pub mod tick;
pub mod tilemap;

pub use ai::{AiCommand, PlayerView};
pub use collision::{ContactReport, overlaps, resolve_player_contacts};
pub use entity::{AiState, AiType, Body, Contacts, Entity, EntityKind, Facing, Role, SpriteAnimation};
pub use level::{LEVEL_1_DATA, level_one};
pub use roster::{EnemyRoster, Handle, RosterBuilder, RosterError};
pub use state::{DefeatCause, GameEvent, GamePhase, GameState, Outcome, SetupError};
pub use tick::{FixedStep, TickInput, tick};
pub use tilemap::{TileMap, TileMapError};

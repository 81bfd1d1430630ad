//! Level layouts
//!
//! Level 1 is a 14x5 room: solid tiles around the edge, a floating ledge in
//! the middle and a staircase on each side.

use super::entity::{Entity, SpriteAnimation};
use super::roster::RosterBuilder;
use super::state::{GameState, SetupError};
use super::tilemap::TileMap;
use crate::consts::{LEVEL1_HEIGHT, LEVEL1_WIDTH};
use crate::tuning::Tuning;

/// Row-major tile indices; 0 is empty
#[rustfmt::skip]
pub const LEVEL_1_DATA: [u32; (LEVEL1_WIDTH * LEVEL1_HEIGHT) as usize] = [
    1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1,
    2, 1, 0, 0, 0, 1, 1, 1, 1, 1, 0, 0, 1, 2,
    2, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 2,
    2, 0, 0, 1, 0, 0, 0, 0, 0, 0, 1, 1, 0, 2,
    1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1,
];

/// Spawn cells (column, row)
pub const PLAYER_START: (i32, i32) = (7, 0);
pub const SHOOTER_START: (i32, i32) = (1, 0);
pub const STALKER_START: (i32, i32) = (2, 0);
pub const GUARD_START: (i32, i32) = (2, 0);
/// Where the shooter's bullet parks between shots
pub const BULLET_PARK: (i32, i32) = (2, 0);

/// Build level 1: the map, the animated player and the four-slot roster
/// (bullet, shooter, stalker, guard).
pub fn level_one(tuning: Tuning) -> Result<GameState, SetupError> {
    let map = TileMap::new(
        LEVEL1_WIDTH,
        LEVEL1_HEIGHT,
        LEVEL_1_DATA.to_vec(),
        tuning.tile_size,
    )?;
    let at = |(x, y): (i32, i32)| map.grid_to_world(x, y);

    let player = Entity::player(&tuning.player, at(PLAYER_START))
        .with_animation(SpriteAnimation::player_walk());

    let mut roster = RosterBuilder::new();
    let bullet = roster.push(Entity::bullet(&tuning.bullet, at(BULLET_PARK)));
    roster.push(Entity::shooter(&tuning.shooter, at(SHOOTER_START), bullet));
    roster.push(Entity::stalker(&tuning.stalker, at(STALKER_START)));
    roster.push(Entity::guard(&tuning.guard, at(GUARD_START)));
    let enemies = roster.build()?;

    log::info!(
        "Level 1 loaded: {}x{} tiles, {} enemies ({} to defeat)",
        map.width(),
        map.height(),
        enemies.len(),
        enemies.countable()
    );

    GameState::new(tuning, map, player, enemies)
}

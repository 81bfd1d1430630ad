//! Collision detection and response
//!
//! Tile collisions are resolved one axis at a time by probing the leading
//! edge of an entity's box at both of its corners. Entity-vs-entity contact
//! is a plain AABB overlap test.

use glam::Vec2;

use super::entity::{Body, Entity, Role};
use super::roster::{EnemyRoster, Handle};
use super::tilemap::TileMap;
use crate::consts::COLLISION_SKIN;
use crate::tuning::Tuning;

/// Row of the first solid tile under any sample x at height `y`
fn solid_row(map: &TileMap, xs: [f32; 2], y: f32) -> Option<i32> {
    xs.iter()
        .any(|&x| map.is_solid_at(Vec2::new(x, y)))
        .then(|| map.world_to_grid(Vec2::new(xs[0], y)).1)
}

/// Column of the first solid tile under any sample y at `x`
fn solid_column(map: &TileMap, x: f32, ys: [f32; 2]) -> Option<i32> {
    ys.iter()
        .any(|&y| map.is_solid_at(Vec2::new(x, y)))
        .then(|| map.world_to_grid(Vec2::new(x, ys[0])).0)
}

/// Resolve the vertical move just applied to `body`.
///
/// Rising bodies test their top edge, everything else tests the bottom
/// edge so resting bodies keep reporting ground contact.
pub fn resolve_vertical(body: &mut Body, map: &TileMap) {
    let half = body.half_extents();
    let xs = [
        body.position.x - half.x + COLLISION_SKIN,
        body.position.x + half.x - COLLISION_SKIN,
    ];

    if body.velocity.y > 0.0 {
        let top = body.position.y + half.y;
        if let Some(row) = solid_row(map, xs, top) {
            body.position.y = map.row_bottom(row) - half.y;
            body.velocity.y = 0.0;
            body.contacts.top = true;
        }
    } else {
        let bottom = body.position.y - half.y;
        if let Some(row) = solid_row(map, xs, bottom) {
            body.position.y = map.row_top(row) + half.y;
            body.velocity.y = 0.0;
            body.contacts.bottom = true;
        }
    }
}

/// Resolve the horizontal move just applied to `body`
pub fn resolve_horizontal(body: &mut Body, map: &TileMap) {
    let half = body.half_extents();
    let ys = [
        body.position.y + half.y - COLLISION_SKIN,
        body.position.y - half.y + COLLISION_SKIN,
    ];

    if body.velocity.x < 0.0 {
        let left = body.position.x - half.x;
        if let Some(col) = solid_column(map, left, ys) {
            body.position.x = map.column_right(col) + half.x;
            body.velocity.x = 0.0;
            body.contacts.left = true;
        }
    } else if body.velocity.x > 0.0 {
        let right = body.position.x + half.x;
        if let Some(col) = solid_column(map, right, ys) {
            body.position.x = map.column_left(col) - half.x;
            body.velocity.x = 0.0;
            body.contacts.right = true;
        }
    }
}

/// Axis-aligned box overlap (touching edges do not count)
pub fn overlaps(a: &Body, b: &Body) -> bool {
    let delta = (a.position - b.position).abs();
    let reach = a.half_extents() + b.half_extents();
    delta.x < reach.x && delta.y < reach.y
}

/// Outcome of the player touching enemies during one tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactReport {
    /// Enemies stomped this tick, in roster order
    pub stomped: Vec<Handle>,
    /// The enemy that defeated the player, if any
    pub defeated_by: Option<Handle>,
}

/// Resolve the player against every active enemy.
///
/// Falling onto an enemy from above faster than the stomp threshold defeats
/// it and bounces the player; any other contact defeats the player. Bullets
/// always defeat the player and return to their reset position.
pub fn resolve_player_contacts(
    player: &mut Entity,
    enemies: &mut EnemyRoster,
    tuning: &Tuning,
) -> ContactReport {
    let mut report = ContactReport::default();

    for (handle, enemy) in enemies.iter_mut() {
        if !player.active {
            break;
        }
        if !enemy.active || !overlaps(&player.body, &enemy.body) {
            continue;
        }

        let stomping = player.body.velocity.y < -tuning.stomp_threshold
            && player.body.position.y > enemy.body.position.y;

        match enemy.role {
            Role::Bullet(_) => {
                enemy.reset_bullet();
                player.deactivate();
                report.defeated_by = Some(handle);
            }
            _ if stomping => {
                enemy.deactivate();
                player.body.velocity.y = tuning.stomp_bounce;
                report.stomped.push(handle);
            }
            _ => {
                player.deactivate();
                report.defeated_by = Some(handle);
            }
        }
    }

    report
}

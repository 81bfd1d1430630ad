//! Enemy behavior
//!
//! Each enemy thinks once per tick, after its physics step. Intents written
//! here are consumed by the next tick's integration. Behavior that touches
//! another entity (a shooter firing its bullet) is returned as an
//! [`AiCommand`] and applied by the driver.

use glam::Vec2;

use super::entity::{AiState, Entity, Role};
use super::roster::Handle;
use super::tilemap::TileMap;
use crate::consts::COLLISION_SKIN;
use crate::sign_or_zero;
use crate::tuning::Tuning;

/// What enemies can see of the player
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerView {
    pub position: Vec2,
    pub active: bool,
}

impl PlayerView {
    pub fn of(player: &Entity) -> Self {
        Self {
            position: player.position(),
            active: player.active,
        }
    }
}

/// Cross-entity action requested by an enemy
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AiCommand {
    /// Launch `bullet` from `origin` heading along `direction` (-1 or 1)
    FireBullet {
        bullet: Handle,
        origin: Vec2,
        direction: f32,
    },
}

/// Run one tick of behavior for an active enemy
pub fn think(
    enemy: &mut Entity,
    player: &PlayerView,
    map: &TileMap,
    tuning: &Tuning,
    dt: f32,
) -> Option<AiCommand> {
    if !enemy.active {
        return None;
    }
    match enemy.role {
        Role::Player => None,
        Role::Guard => {
            guard(enemy);
            None
        }
        Role::Shooter(_) => shooter(enemy, player, map, tuning, dt),
        Role::Stalker => {
            stalker(enemy, player, map, tuning);
            None
        }
        Role::Bullet(_) => {
            bullet(enemy, map, tuning);
            None
        }
    }
}

/// Stationary obstacle
fn guard(enemy: &mut Entity) {
    enemy.ai_state = AiState::Idle;
    enemy.set_movement_intent(Vec2::ZERO);
}

fn shooter(
    enemy: &mut Entity,
    player: &PlayerView,
    map: &TileMap,
    tuning: &Tuning,
    dt: f32,
) -> Option<AiCommand> {
    let origin = enemy.position();
    let Role::Shooter(brain) = &mut enemy.role else {
        return None;
    };
    brain.cooldown = (brain.cooldown - dt).max(0.0);

    let dx = player.position.x - origin.x;
    let spotted = player.active
        && dx.abs() <= tuning.shooter_range
        && map.line_of_sight(origin, player.position);

    if !spotted {
        enemy.ai_state = AiState::Idle;
        return None;
    }

    if dx != 0.0 {
        brain.last_seen_side = sign_or_zero(dx);
    }
    let command = (brain.cooldown <= 0.0).then_some(AiCommand::FireBullet {
        bullet: brain.bullet,
        origin,
        direction: brain.last_seen_side,
    });
    enemy.ai_state = AiState::Attacking;
    command
}

/// Whether a stalker walking along `direction` should jump: a solid tile
/// right in front of its feet (step) or no floor ahead (ledge)
fn obstacle_ahead(enemy: &Entity, map: &TileMap, direction: f32, lookahead: f32) -> bool {
    let body = &enemy.body;
    let half = body.half_extents();
    let front_x = body.position.x + direction * (half.x + lookahead);
    let feet = body.position.y - half.y;

    let step = map.is_solid_at(Vec2::new(front_x, feet + COLLISION_SKIN));
    let floor_ahead = map.is_solid_at(Vec2::new(front_x, feet - COLLISION_SKIN));
    step || !floor_ahead
}

fn stalker(enemy: &mut Entity, player: &PlayerView, map: &TileMap, tuning: &Tuning) {
    let dx = player.position.x - enemy.position().x;
    if !player.active || dx.abs() <= tuning.stalker_dead_zone {
        enemy.ai_state = AiState::Idle;
        enemy.set_movement_intent(Vec2::ZERO);
        return;
    }

    let direction = sign_or_zero(dx);
    enemy.ai_state = AiState::Walking;
    enemy.set_movement_intent(Vec2::new(direction, 0.0));

    if enemy.body.is_grounded()
        && obstacle_ahead(enemy, map, direction, tuning.stalker_lookahead)
        && enemy.request_jump()
    {
        log::debug!("Stalker jumps toward player at x={:.2}", player.position.x);
    }
}

/// Retire the bullet once it hits a wall, leaves the map or outruns its range
fn bullet(enemy: &mut Entity, map: &TileMap, tuning: &Tuning) {
    let Role::Bullet(state) = &enemy.role else {
        return;
    };
    let x = enemy.body.position.x;
    let contacts = enemy.body.contacts;
    let expired = contacts.left
        || contacts.right
        || (x - state.launch_x).abs() > tuning.bullet_range
        || x < map.left_bound()
        || x > map.right_bound();
    if expired {
        enemy.reset_bullet();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::roster::RosterBuilder;

    fn floor_map() -> TileMap {
        let mut tiles = vec![0; 70];
        tiles[56..].fill(1);
        TileMap::new(14, 5, tiles, 1.0).unwrap()
    }

    fn view(x: f32, y: f32) -> PlayerView {
        PlayerView {
            position: Vec2::new(x, y),
            active: true,
        }
    }

    #[test]
    fn test_guard_stays_idle() {
        let tuning = Tuning::default();
        let map = floor_map();
        let mut guard = Entity::guard(&tuning.guard, Vec2::new(4.0, -3.25));
        let command = think(&mut guard, &view(4.5, -3.2), &map, &tuning, tuning.fixed_timestep);
        assert!(command.is_none());
        assert_eq!(guard.ai_state, AiState::Idle);
        assert_eq!(guard.body.movement, Vec2::ZERO);
    }

    #[test]
    fn test_shooter_ignores_distant_player() {
        let tuning = Tuning::default();
        let map = floor_map();
        let bullet = RosterBuilder::new().next_handle();
        let mut shooter = Entity::shooter(&tuning.shooter, Vec2::new(1.0, -3.0), bullet);

        let command = think(&mut shooter, &view(12.0, -3.0), &map, &tuning, tuning.fixed_timestep);
        assert!(command.is_none());
        assert_eq!(shooter.ai_state, AiState::Idle);
    }

    #[test]
    fn test_shooter_fires_toward_player_side() {
        let tuning = Tuning::default();
        let map = floor_map();
        let bullet = RosterBuilder::new().next_handle();
        let mut shooter = Entity::shooter(&tuning.shooter, Vec2::new(6.0, -3.0), bullet);

        let command = think(&mut shooter, &view(4.0, -3.0), &map, &tuning, tuning.fixed_timestep);
        assert_eq!(shooter.ai_state, AiState::Attacking);
        assert_eq!(
            command,
            Some(AiCommand::FireBullet {
                bullet,
                origin: Vec2::new(6.0, -3.0),
                direction: -1.0,
            })
        );
    }

    #[test]
    fn test_shooter_blocked_by_wall() {
        let tuning = Tuning::default();
        let mut tiles = vec![0; 70];
        tiles[56..].fill(1);
        tiles[3 * 14 + 4] = 1;
        let map = TileMap::new(14, 5, tiles, 1.0).unwrap();
        let bullet = RosterBuilder::new().next_handle();
        let mut shooter = Entity::shooter(&tuning.shooter, Vec2::new(2.0, -3.0), bullet);

        let command = think(&mut shooter, &view(5.0, -3.0), &map, &tuning, tuning.fixed_timestep);
        assert!(command.is_none());
        assert_eq!(shooter.ai_state, AiState::Idle);
    }

    #[test]
    fn test_stalker_heads_toward_player() {
        let tuning = Tuning::default();
        let map = floor_map();
        let mut stalker = Entity::stalker(&tuning.stalker, Vec2::new(7.0, -3.125));

        think(&mut stalker, &view(2.0, -3.0), &map, &tuning, tuning.fixed_timestep);
        assert_eq!(stalker.body.movement.x, -1.0);
        assert_eq!(stalker.ai_state, AiState::Walking);

        think(&mut stalker, &view(12.0, -3.0), &map, &tuning, tuning.fixed_timestep);
        assert_eq!(stalker.body.movement.x, 1.0);

        think(&mut stalker, &view(7.05, -3.0), &map, &tuning, tuning.fixed_timestep);
        assert_eq!(stalker.body.movement.x, 0.0);
        assert_eq!(stalker.ai_state, AiState::Idle);
    }

    #[test]
    fn test_stalker_jumps_at_step() {
        let tuning = Tuning::default();
        let mut tiles = vec![0; 70];
        tiles[56..].fill(1);
        tiles[3 * 14 + 8] = 1;
        let map = TileMap::new(14, 5, tiles, 1.0).unwrap();

        // Standing on the floor right next to the step at column 8
        let half = tuning.stalker.height / 2.0;
        let x = map.column_left(8) - tuning.stalker.width / 2.0 - 0.01;
        let mut stalker = Entity::stalker(&tuning.stalker, Vec2::new(x, map.row_top(4) + half));
        stalker.body.contacts.bottom = true;

        think(&mut stalker, &view(12.0, -3.0), &map, &tuning, tuning.fixed_timestep);
        assert_eq!(stalker.body.velocity.y, tuning.stalker.jump_power);
    }

    #[test]
    fn test_stalker_does_not_jump_on_flat_ground() {
        let tuning = Tuning::default();
        let map = floor_map();
        let half = tuning.stalker.height / 2.0;
        let mut stalker = Entity::stalker(&tuning.stalker, Vec2::new(6.0, map.row_top(4) + half));
        stalker.body.contacts.bottom = true;
        think(&mut stalker, &view(12.0, -3.0), &map, &tuning, tuning.fixed_timestep);
        assert_eq!(stalker.body.velocity.y, 0.0);
    }

    #[test]
    fn test_bullet_expires_out_of_range() {
        let tuning = Tuning::default();
        let map = floor_map();
        let mut bullet = Entity::bullet(&tuning.bullet, Vec2::new(2.0, 0.0));
        bullet.launch_bullet(Vec2::new(1.0, -3.0), 1.0);
        bullet.body.position.x = 1.0 + tuning.bullet_range + 0.1;
        think(&mut bullet, &view(0.0, 0.0), &map, &tuning, tuning.fixed_timestep);
        assert!(!bullet.active);
        assert_eq!(bullet.position(), Vec2::new(2.0, 0.0));
    }
}

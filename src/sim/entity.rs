//! Entities: the player, enemies and the shooter's bullet
//!
//! Every entity shares a [`Body`] (transform, velocity, collision flags) and
//! carries a [`Role`] holding only what its behavior needs.

use glam::Vec2;

use super::collision::{resolve_horizontal, resolve_vertical};
use super::roster::Handle;
use super::tilemap::TileMap;
use crate::clamp_unit;
use crate::consts::{ANIMATION_FPS, PLAYER_SHEET_COLUMNS, PLAYER_SHEET_ROWS, PLAYER_WALK_FRAMES};
use crate::tuning::{BodyTuning, Tuning};

/// Player or enemy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Player,
    Enemy,
}

/// Immutable behavior category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiType {
    None,
    Guard,
    Shooter,
    Stalker,
    Bullet,
}

/// Mutable behavior phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AiState {
    #[default]
    Idle,
    Walking,
    Attacking,
}

/// Tile contacts found during the last physics step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Contacts {
    pub top: bool,
    pub bottom: bool,
    pub left: bool,
    pub right: bool,
}

/// Shared physics and transform state
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub position: Vec2,
    pub velocity: Vec2,
    pub acceleration: Vec2,
    /// Movement intent, length at most 1
    pub movement: Vec2,
    /// Collision box (width, height)
    pub size: Vec2,
    /// Render scale
    pub scale: Vec2,
    pub speed: f32,
    pub jump_power: f32,
    pub contacts: Contacts,
}

impl Body {
    pub fn new(tuning: &BodyTuning, position: Vec2) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            acceleration: Vec2::new(0.0, tuning.gravity),
            movement: Vec2::ZERO,
            size: Vec2::new(tuning.width, tuning.height),
            scale: Vec2::splat(tuning.scale),
            speed: tuning.speed,
            jump_power: tuning.jump_power,
            contacts: Contacts::default(),
        }
    }

    #[inline]
    pub fn half_extents(&self) -> Vec2 {
        self.size / 2.0
    }

    /// Set the movement intent, rescaling it to length 1 if it is longer
    pub fn set_movement_intent(&mut self, intent: Vec2) {
        self.movement = clamp_unit(intent);
    }

    pub fn is_grounded(&self) -> bool {
        self.contacts.bottom
    }

    /// Jump if standing on something. Returns whether the jump happened;
    /// airborne requests are ignored.
    pub fn request_jump(&mut self) -> bool {
        if !self.contacts.bottom {
            return false;
        }
        self.velocity.y = self.jump_power;
        true
    }

    /// Advance one fixed step: gravity, intent, then Y and X moves each
    /// followed by their own tile resolution.
    pub fn step(&mut self, map: &TileMap, dt: f32, terminal_velocity: f32) {
        self.contacts = Contacts::default();

        self.velocity.y += self.acceleration.y * dt;
        self.velocity.y = self.velocity.y.max(-terminal_velocity);
        self.velocity.x = clamp_unit(self.movement).x * self.speed;

        // Vertical first: landing wins over a same-tick wall hit
        self.position.y += self.velocity.y * dt;
        resolve_vertical(self, map);

        self.position.x += self.velocity.x * dt;
        resolve_horizontal(self, map);
    }
}

/// Sprite-sheet row selection for directional animations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facing {
    Left,
    Right,
    Up,
    Down,
}

impl Facing {
    fn index(self) -> usize {
        match self {
            Facing::Left => 0,
            Facing::Right => 1,
            Facing::Up => 2,
            Facing::Down => 3,
        }
    }
}

/// Frame-based sprite animation over a sprite sheet
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteAnimation {
    /// Sheet cells per facing, indexed by [`Facing`]
    pub index_sets: [[u32; PLAYER_WALK_FRAMES]; 4],
    pub facing: Facing,
    /// Position in the cycle, always below `PLAYER_WALK_FRAMES`
    frame: usize,
    timer: f32,
    pub columns: u32,
    pub rows: u32,
}

impl SpriteAnimation {
    /// The player's four-direction walk cycle
    pub fn player_walk() -> Self {
        Self {
            index_sets: [
                [8, 11, 13, 15], // left
                [0, 3, 5, 7],    // right
                [2, 6, 10, 14],  // up
                [0, 4, 8, 12],   // down
            ],
            facing: Facing::Right,
            frame: 0,
            timer: 0.0,
            columns: PLAYER_SHEET_COLUMNS,
            rows: PLAYER_SHEET_ROWS,
        }
    }

    pub fn face(&mut self, facing: Facing) {
        self.facing = facing;
    }

    /// Step the walk cycle; frames only advance while moving
    pub fn advance(&mut self, moving: bool, dt: f32) {
        if !moving {
            return;
        }
        self.timer += dt;
        if self.timer >= 1.0 / ANIMATION_FPS {
            self.timer = 0.0;
            self.frame = (self.frame + 1) % PLAYER_WALK_FRAMES;
        }
    }

    pub fn frame(&self) -> usize {
        self.frame
    }

    /// Current sprite-sheet cell
    pub fn cell(&self) -> u32 {
        self.index_sets[self.facing.index()][self.frame]
    }
}

/// Shooter-specific state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShooterBrain {
    /// The bullet this shooter fires (owned by the roster)
    pub bullet: Handle,
    /// Seconds until the next shot is allowed
    pub cooldown: f32,
    /// Side the player was last seen on (-1 or 1)
    pub last_seen_side: f32,
}

/// Bullet-specific state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BulletState {
    /// Where the bullet parks while inactive
    pub reset_position: Vec2,
    /// X coordinate of the last launch
    pub launch_x: f32,
}

/// Per-variant behavior data
#[derive(Debug, Clone, PartialEq)]
pub enum Role {
    Player,
    Guard,
    Shooter(ShooterBrain),
    Stalker,
    Bullet(BulletState),
}

/// A simulated entity
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub body: Body,
    pub role: Role,
    pub ai_state: AiState,
    /// Inactive entities are skipped by physics, AI and render
    pub active: bool,
    pub animation: Option<SpriteAnimation>,
}

impl Entity {
    fn with_role(tuning: &BodyTuning, position: Vec2, role: Role) -> Self {
        Self {
            body: Body::new(tuning, position),
            role,
            ai_state: AiState::Idle,
            active: true,
            animation: None,
        }
    }

    pub fn player(tuning: &BodyTuning, position: Vec2) -> Self {
        Self::with_role(tuning, position, Role::Player)
    }

    pub fn guard(tuning: &BodyTuning, position: Vec2) -> Self {
        Self::with_role(tuning, position, Role::Guard)
    }

    pub fn stalker(tuning: &BodyTuning, position: Vec2) -> Self {
        Self::with_role(tuning, position, Role::Stalker)
    }

    pub fn shooter(tuning: &BodyTuning, position: Vec2, bullet: Handle) -> Self {
        Self::with_role(
            tuning,
            position,
            Role::Shooter(ShooterBrain {
                bullet,
                cooldown: 0.0,
                last_seen_side: 1.0,
            }),
        )
    }

    /// Bullets start parked and inactive
    pub fn bullet(tuning: &BodyTuning, reset_position: Vec2) -> Self {
        let mut entity = Self::with_role(
            tuning,
            reset_position,
            Role::Bullet(BulletState {
                reset_position,
                launch_x: reset_position.x,
            }),
        );
        entity.active = false;
        entity
    }

    pub fn with_animation(mut self, animation: SpriteAnimation) -> Self {
        self.animation = Some(animation);
        self
    }

    pub fn kind(&self) -> EntityKind {
        match self.role {
            Role::Player => EntityKind::Player,
            _ => EntityKind::Enemy,
        }
    }

    pub fn ai_type(&self) -> AiType {
        match self.role {
            Role::Player => AiType::None,
            Role::Guard => AiType::Guard,
            Role::Shooter(_) => AiType::Shooter,
            Role::Stalker => AiType::Stalker,
            Role::Bullet(_) => AiType::Bullet,
        }
    }

    pub fn is_bullet(&self) -> bool {
        matches!(self.role, Role::Bullet(_))
    }

    pub fn position(&self) -> Vec2 {
        self.body.position
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }

    /// Input contract: set where the entity wants to go this tick
    pub fn set_movement_intent(&mut self, intent: Vec2) {
        self.body.set_movement_intent(intent);
        if let Some(animation) = &mut self.animation {
            if intent.x < 0.0 {
                animation.face(Facing::Left);
            } else if intent.x > 0.0 {
                animation.face(Facing::Right);
            }
        }
    }

    /// Input contract: jump if grounded, otherwise ignored
    pub fn request_jump(&mut self) -> bool {
        self.active && self.body.request_jump()
    }

    /// Physics and animation for one fixed step. Inactive entities don't move.
    pub fn update_physics(&mut self, map: &TileMap, tuning: &Tuning, dt: f32) {
        if !self.active {
            return;
        }
        self.body.step(map, dt, tuning.terminal_velocity);
        if let Some(animation) = &mut self.animation {
            animation.advance(self.body.movement != Vec2::ZERO, dt);
        }
    }

    /// True once the entity has fallen past the bottom of the map plus margin
    pub fn below_death_line(&self, map: &TileMap, margin: f32) -> bool {
        self.body.position.y < map.bottom_bound() - margin
    }

    /// Send the bullet from `origin` along `direction`. Ignored when the
    /// bullet is already in flight or this is not a bullet.
    pub fn launch_bullet(&mut self, origin: Vec2, direction: f32) -> bool {
        let Role::Bullet(state) = &mut self.role else {
            return false;
        };
        if self.active {
            return false;
        }
        state.launch_x = origin.x;
        self.body.position = origin;
        self.body.velocity = Vec2::ZERO;
        self.body.set_movement_intent(Vec2::new(direction, 0.0));
        self.ai_state = AiState::Walking;
        self.active = true;
        true
    }

    /// Park the bullet at its reset position and deactivate it
    pub fn reset_bullet(&mut self) {
        if let Role::Bullet(state) = &self.role {
            self.body.position = state.reset_position;
            self.body.velocity = Vec2::ZERO;
            self.body.movement = Vec2::ZERO;
            self.body.contacts = Contacts::default();
            self.ai_state = AiState::Idle;
            self.active = false;
        }
    }
}

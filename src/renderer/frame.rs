//! Frame extraction
//!
//! Turns a [`GameState`] into plain draw data. Extraction only reads the
//! state; an external GPU layer binds the named textures and draws.

use glam::Vec2;

use super::vertex::BACKGROUND;
use crate::consts::{
    BANNER_FONT_SIZE, BANNER_OFFSET_X, BANNER_OFFSET_Y, BANNER_SPACING, TILESET_COLUMNS, TILESET_ROWS,
};
use crate::sim::{Entity, GameState, Role, TileMap};

/// Texture an external renderer binds for a drawable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureSlot {
    /// Player walk sheet
    Player,
    /// Shared enemy sprite
    Enemy,
    Bullet,
    Tileset,
}

/// One cell of a sprite sheet or tileset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpriteCell {
    pub index: u32,
    pub columns: u32,
    pub rows: u32,
}

impl SpriteCell {
    /// UV rectangle as (min, max), v growing downwards
    pub fn uv_rect(&self) -> (Vec2, Vec2) {
        let columns = self.columns.max(1);
        let rows = self.rows.max(1);
        let cell = Vec2::new(1.0 / columns as f32, 1.0 / rows as f32);
        let min = Vec2::new(
            (self.index % columns) as f32 * cell.x,
            (self.index / columns) as f32 * cell.y,
        );
        (min, min + cell)
    }
}

/// Drawable pose of one active entity
#[derive(Debug, Clone, PartialEq)]
pub struct SpritePose {
    pub texture: TextureSlot,
    pub position: Vec2,
    pub scale: Vec2,
    /// `None` draws the whole texture
    pub cell: Option<SpriteCell>,
}

/// One nonzero map tile
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileDraw {
    pub center: Vec2,
    pub size: f32,
    pub cell: SpriteCell,
}

/// Terminal message anchored near the player
#[derive(Debug, Clone, PartialEq)]
pub struct Banner {
    pub text: &'static str,
    pub position: Vec2,
    pub font_size: f32,
    pub spacing: f32,
}

/// View offset following the player
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Camera {
    pub offset: Vec2,
}

impl Camera {
    /// Center horizontally on the player, vertically halfway
    pub fn follow(target: Vec2) -> Self {
        Self {
            offset: Vec2::new(-target.x, -target.y / 2.0),
        }
    }
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    /// RGBA clear color
    pub clear_color: [f32; 4],
    pub camera: Camera,
    pub tiles: Vec<TileDraw>,
    /// Player first, then enemies in roster order
    pub sprites: Vec<SpritePose>,
    pub banner: Option<Banner>,
}

fn pose(entity: &Entity) -> SpritePose {
    let texture = match entity.role {
        Role::Player => TextureSlot::Player,
        Role::Bullet(_) => TextureSlot::Bullet,
        _ => TextureSlot::Enemy,
    };
    let cell = entity.animation.as_ref().map(|animation| SpriteCell {
        index: animation.cell(),
        columns: animation.columns,
        rows: animation.rows,
    });
    SpritePose {
        texture,
        position: entity.position(),
        scale: entity.body.scale,
        cell,
    }
}

fn tiles(map: &TileMap) -> Vec<TileDraw> {
    map.solid_tiles()
        .map(|(col, row, index)| TileDraw {
            center: map.grid_to_world(col as i32, row as i32),
            size: map.tile_size(),
            cell: SpriteCell {
                index,
                columns: TILESET_COLUMNS,
                rows: TILESET_ROWS,
            },
        })
        .collect()
}

/// Collect draw data for the current state. Inactive entities are skipped.
pub fn extract(state: &GameState, camera: Camera) -> RenderFrame {
    let mut sprites = Vec::with_capacity(state.enemies.len() + 1);
    if state.player.active {
        sprites.push(pose(&state.player));
    }
    sprites.extend(
        state
            .enemies
            .iter()
            .filter(|(_, enemy)| enemy.active)
            .map(|(_, enemy)| pose(enemy)),
    );

    let banner = state.outcome().map(|outcome| Banner {
        text: outcome.message(),
        position: state.player.position() + Vec2::new(BANNER_OFFSET_X, BANNER_OFFSET_Y),
        font_size: BANNER_FONT_SIZE,
        spacing: BANNER_SPACING,
    });

    RenderFrame {
        clear_color: BACKGROUND,
        camera,
        tiles: tiles(&state.map),
        sprites,
        banner,
    }
}

//! Quad generation for sprites and tiles

use glam::Vec2;

use super::frame::{RenderFrame, SpriteCell, SpritePose, TextureSlot, TileDraw};
use super::vertex::TexturedVertex;

/// Full texture UV rectangle
const FULL_UV: (Vec2, Vec2) = (Vec2::ZERO, Vec2::ONE);

/// Generate vertices for an axis-aligned textured quad (two triangles).
///
/// `uv` is (min, max) with v growing downwards, so the top edge of the quad
/// samples `min.y`.
pub fn quad(center: Vec2, size: Vec2, uv: (Vec2, Vec2)) -> [TexturedVertex; 6] {
    let half = size / 2.0;
    let (uv_min, uv_max) = uv;

    let top_left = TexturedVertex::new(center.x - half.x, center.y + half.y, uv_min.x, uv_min.y);
    let top_right = TexturedVertex::new(center.x + half.x, center.y + half.y, uv_max.x, uv_min.y);
    let bottom_left = TexturedVertex::new(center.x - half.x, center.y - half.y, uv_min.x, uv_max.y);
    let bottom_right =
        TexturedVertex::new(center.x + half.x, center.y - half.y, uv_max.x, uv_max.y);

    [
        bottom_left,
        bottom_right,
        top_right,
        bottom_left,
        top_right,
        top_left,
    ]
}

/// UV rectangle of `tile` in a `columns` x `rows` atlas
pub fn tile_uv(tile: u32, columns: u32, rows: u32) -> (Vec2, Vec2) {
    SpriteCell {
        index: tile,
        columns,
        rows,
    }
    .uv_rect()
}

/// Quad for one sprite, offset by the camera
pub fn sprite_vertices(sprite: &SpritePose, camera_offset: Vec2) -> [TexturedVertex; 6] {
    let uv = sprite.cell.map_or(FULL_UV, |cell| cell.uv_rect());
    quad(sprite.position + camera_offset, sprite.scale, uv)
}

/// One quad per tile, offset by the camera
pub fn tilemap_vertices(tiles: &[TileDraw], camera_offset: Vec2) -> Vec<TexturedVertex> {
    let mut vertices = Vec::with_capacity(tiles.len() * 6);
    for tile in tiles {
        vertices.extend(quad(
            tile.center + camera_offset,
            Vec2::splat(tile.size),
            tile.cell.uv_rect(),
        ));
    }
    vertices
}

/// Vertices of a frame batched by texture, tiles first
pub fn frame_batches(frame: &RenderFrame) -> Vec<(TextureSlot, Vec<TexturedVertex>)> {
    let offset = frame.camera.offset;
    let mut batches: Vec<(TextureSlot, Vec<TexturedVertex>)> = Vec::new();
    if !frame.tiles.is_empty() {
        batches.push((TextureSlot::Tileset, tilemap_vertices(&frame.tiles, offset)));
    }

    for sprite in &frame.sprites {
        let quad = sprite_vertices(sprite, offset);
        match batches.iter_mut().find(|(slot, _)| *slot == sprite.texture) {
            Some((_, vertices)) => vertices.extend(quad),
            None => batches.push((sprite.texture, quad.to_vec())),
        }
    }
    batches
}

//! Tile map geometry and collision queries
//!
//! Grid convention:
//! - `origin` is the world position of the top-left corner of tile (0, 0).
//! - Columns grow to the right (+x), rows grow downward (-y).
//! - The centre of tile (x, y) is `origin + ((x + 0.5) * s, -(y + 0.5) * s)`.

use glam::Vec2;
use thiserror::Error;

/// Errors raised while building a tile map from level data
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum TileMapError {
    #[error("tile count mismatch: expected {expected}, got {actual}")]
    TileCountMismatch { expected: usize, actual: usize },
    #[error("tile map must have a nonzero width and height")]
    EmptyGrid,
    #[error("tile size must be positive and finite, got {0}")]
    InvalidTileSize(f32),
}

/// Immutable grid of tile indices. Index 0 is empty, anything else is solid.
#[derive(Debug, Clone, PartialEq)]
pub struct TileMap {
    width: u32,
    height: u32,
    tiles: Vec<u32>,
    tile_size: f32,
    origin: Vec2,
}

impl TileMap {
    /// Build a map whose tile (0, 0) is centred on the world origin
    pub fn new(width: u32, height: u32, tiles: Vec<u32>, tile_size: f32) -> Result<Self, TileMapError> {
        let half = tile_size / 2.0;
        Self::with_origin(width, height, tiles, tile_size, Vec2::new(-half, half))
    }

    /// Build a map with an explicit top-left world origin
    pub fn with_origin(
        width: u32,
        height: u32,
        tiles: Vec<u32>,
        tile_size: f32,
        origin: Vec2,
    ) -> Result<Self, TileMapError> {
        if width == 0 || height == 0 {
            return Err(TileMapError::EmptyGrid);
        }
        if !tile_size.is_finite() || tile_size <= 0.0 {
            return Err(TileMapError::InvalidTileSize(tile_size));
        }
        let expected = width as usize * height as usize;
        let actual = tiles.len();
        if expected != actual {
            return Err(TileMapError::TileCountMismatch { expected, actual });
        }
        Ok(Self {
            width,
            height,
            tiles,
            tile_size,
            origin,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn tile_size(&self) -> f32 {
        self.tile_size
    }

    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    /// Row-major tile indices
    pub fn tiles(&self) -> &[u32] {
        &self.tiles
    }

    pub fn index_of(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    pub fn tile_at(&self, x: i32, y: i32) -> Option<u32> {
        self.index_of(x, y).map(|index| self.tiles[index])
    }

    /// Solid tile test. Out-of-bounds cells are open space.
    pub fn is_solid(&self, x: i32, y: i32) -> bool {
        self.tile_at(x, y).is_some_and(|tile| tile != 0)
    }

    /// World position of the centre of tile (x, y)
    pub fn grid_to_world(&self, x: i32, y: i32) -> Vec2 {
        Vec2::new(
            self.origin.x + (x as f32 + 0.5) * self.tile_size,
            self.origin.y - (y as f32 + 0.5) * self.tile_size,
        )
    }

    /// Grid cell containing a world point. Points on a boundary belong to the
    /// cell to their right / below.
    pub fn world_to_grid(&self, p: Vec2) -> (i32, i32) {
        let x = ((p.x - self.origin.x) / self.tile_size).floor() as i32;
        let y = ((self.origin.y - p.y) / self.tile_size).floor() as i32;
        (x, y)
    }

    /// Solid test for the cell under a world point
    pub fn is_solid_at(&self, p: Vec2) -> bool {
        let (x, y) = self.world_to_grid(p);
        self.is_solid(x, y)
    }

    /// World y of the top edge of a row
    pub fn row_top(&self, row: i32) -> f32 {
        self.origin.y - row as f32 * self.tile_size
    }

    /// World y of the bottom edge of a row
    pub fn row_bottom(&self, row: i32) -> f32 {
        self.row_top(row + 1)
    }

    /// World x of the left edge of a column
    pub fn column_left(&self, col: i32) -> f32 {
        self.origin.x + col as f32 * self.tile_size
    }

    /// World x of the right edge of a column
    pub fn column_right(&self, col: i32) -> f32 {
        self.column_left(col + 1)
    }

    pub fn left_bound(&self) -> f32 {
        self.origin.x
    }

    pub fn right_bound(&self) -> f32 {
        self.column_left(self.width as i32)
    }

    pub fn top_bound(&self) -> f32 {
        self.origin.y
    }

    pub fn bottom_bound(&self) -> f32 {
        self.row_top(self.height as i32)
    }

    /// Continuous grid coordinates: columns along x, rows downward along y
    fn grid_space(&self, p: Vec2) -> Vec2 {
        Vec2::new(p.x - self.origin.x, self.origin.y - p.y) / self.tile_size
    }

    /// True when no solid tile lies on the segment between two world points.
    ///
    /// Walks every cell the segment crosses, one boundary at a time. A segment
    /// passing exactly through a tile corner also checks both neighbours.
    pub fn line_of_sight(&self, from: Vec2, to: Vec2) -> bool {
        let start = self.grid_space(from);
        let end = self.grid_space(to);
        let delta = end - start;

        let (mut x, mut y) = (start.x.floor() as i32, start.y.floor() as i32);
        let (end_x, end_y) = (end.x.floor() as i32, end.y.floor() as i32);

        let axis = |origin: f32, cell: i32, d: f32| -> (i32, f32, f32) {
            if d > 0.0 {
                (1, (cell as f32 + 1.0 - origin) / d, 1.0 / d)
            } else if d < 0.0 {
                (-1, (origin - cell as f32) / -d, -1.0 / d)
            } else {
                (0, f32::INFINITY, f32::INFINITY)
            }
        };
        let (step_x, mut next_x, span_x) = axis(start.x, x, delta.x);
        let (step_y, mut next_y, span_y) = axis(start.y, y, delta.y);

        let crossings = (end_x - x).unsigned_abs() + (end_y - y).unsigned_abs();
        for _ in 0..crossings {
            if self.is_solid(x, y) {
                return false;
            }
            if next_x < next_y {
                x += step_x;
                next_x += span_x;
            } else {
                y += step_y;
                next_y += span_y;
            }
        }
        !self.is_solid(x, y)
    }

    /// Iterate nonzero tiles as (column, row, tile index)
    pub fn solid_tiles(&self) -> impl Iterator<Item = (u32, u32, u32)> + '_ {
        let width = self.width;
        self.tiles
            .iter()
            .enumerate()
            .filter(|(_, tile)| **tile != 0)
            .map(move |(i, tile)| (i as u32 % width, i as u32 / width, *tile))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::level::LEVEL_1_DATA;
    use proptest::prelude::*;

    fn level_map() -> TileMap {
        TileMap::new(14, 5, LEVEL_1_DATA.to_vec(), 1.0).unwrap()
    }

    #[test]
    fn test_rejects_length_mismatch() {
        let err = TileMap::new(14, 5, vec![0; 69], 1.0).unwrap_err();
        assert_eq!(
            err,
            TileMapError::TileCountMismatch {
                expected: 70,
                actual: 69
            }
        );
    }

    #[test]
    fn test_rejects_empty_and_bad_tile_size() {
        assert_eq!(TileMap::new(0, 5, vec![], 1.0), Err(TileMapError::EmptyGrid));
        assert!(matches!(
            TileMap::new(1, 1, vec![0], 0.0),
            Err(TileMapError::InvalidTileSize(_))
        ));
    }

    #[test]
    fn test_is_solid_follows_level_data() {
        let map = level_map();
        assert!(map.is_solid(0, 0));
        assert!(!map.is_solid(1, 0));
        assert!(map.is_solid(0, 1)); // index 2 is solid too
        assert!((0..14).all(|x| map.is_solid(x, 4)));
    }

    #[test]
    fn test_grid_to_world_centres() {
        let map = level_map();
        assert_eq!(map.grid_to_world(0, 0), Vec2::ZERO);
        assert_eq!(map.grid_to_world(7, 4), Vec2::new(7.0, -4.0));
        assert_eq!(map.world_to_grid(Vec2::new(7.2, -3.9)), (7, 4));
    }

    #[test]
    fn test_bounds() {
        let map = level_map();
        assert_eq!(map.left_bound(), -0.5);
        assert_eq!(map.right_bound(), 13.5);
        assert_eq!(map.top_bound(), 0.5);
        assert_eq!(map.bottom_bound(), -4.5);
        assert_eq!(map.row_top(4), -3.5);
    }

    #[test]
    fn test_line_of_sight() {
        let map = level_map();
        // Row 0 between columns 1 and 12 is open
        assert!(map.line_of_sight(Vec2::new(1.0, 0.0), Vec2::new(7.0, 0.0)));
        // Row 1 has a platform between columns 5 and 9
        assert!(!map.line_of_sight(Vec2::new(2.0, -1.0), Vec2::new(11.0, -1.0)));
        // Symmetric
        assert!(!map.line_of_sight(Vec2::new(11.0, -1.0), Vec2::new(2.0, -1.0)));
    }

    #[test]
    fn test_line_of_sight_catches_corner_clip() {
        // Only the centre tile of a 3x3 map is solid
        let mut tiles = vec![0; 9];
        tiles[4] = 1;
        let map = TileMap::new(3, 3, tiles, 1.0).unwrap();

        // Clips the top-right corner of tile (1, 1) by well under a quarter tile
        assert!(!map.line_of_sight(Vec2::new(0.0, 0.0), Vec2::new(2.0, -0.7)));
        assert!(!map.line_of_sight(Vec2::new(2.0, -0.7), Vec2::new(0.0, 0.0)));
        // Passes just above it
        assert!(map.line_of_sight(Vec2::new(0.0, 0.0), Vec2::new(2.0, -0.45)));
        // Same cell, and a solid start cell
        assert!(map.line_of_sight(Vec2::new(0.1, 0.1), Vec2::new(-0.1, -0.2)));
        assert!(!map.line_of_sight(Vec2::new(1.0, -1.0), Vec2::new(1.2, -1.1)));
    }

    #[test]
    fn test_solid_tiles_iter() {
        let map = level_map();
        let count = map.solid_tiles().count();
        assert_eq!(count, LEVEL_1_DATA.iter().filter(|t| **t != 0).count());
        assert!(map.solid_tiles().all(|(x, y, _)| map.is_solid(x as i32, y as i32)));
    }

    proptest! {
        #[test]
        fn out_of_bounds_is_open_space(x in -1000i32..1000, y in -1000i32..1000) {
            let map = TileMap::new(14, 5, vec![1; 70], 1.0).unwrap();
            prop_assume!(!(0..14).contains(&x) || !(0..5).contains(&y));
            prop_assert!(!map.is_solid(x, y));
        }
    }
}

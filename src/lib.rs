//! Rise of the AI - a tile-based platformer simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (tile map, entities, AI, driver)
//! - `renderer`: Read-only frame extraction and CPU-side quad building
//! - `audio`: Sound cues derived from simulation events
//! - `tuning`: Data-driven gameplay constants
//! - `session`: Frame-level wrapper around the fixed-step accumulator

pub mod audio;
pub mod renderer;
pub mod session;
pub mod sim;
pub mod tuning;

pub use session::Session;
pub use tuning::{Tuning, TuningError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 0.016_666_6;

    /// Level 1 grid dimensions
    pub const LEVEL1_WIDTH: u32 = 14;
    pub const LEVEL1_HEIGHT: u32 = 5;

    /// Tileset atlas layout (columns x rows)
    pub const TILESET_COLUMNS: u32 = 6;
    pub const TILESET_ROWS: u32 = 6;

    /// Player sprite sheet layout
    pub const PLAYER_SHEET_COLUMNS: u32 = 8;
    pub const PLAYER_SHEET_ROWS: u32 = 4;
    pub const PLAYER_WALK_FRAMES: usize = 4;
    /// Walk cycle speed
    pub const ANIMATION_FPS: f32 = 4.0;

    /// Inset applied to collision sample points so a resting edge never reads the
    /// neighbouring tile on the other axis
    pub const COLLISION_SKIN: f32 = 0.001;

    /// Terminal banner layout (text drawing itself is external)
    pub const BANNER_FONT_SIZE: f32 = 0.5;
    pub const BANNER_SPACING: f32 = 0.05;
    pub const BANNER_OFFSET_X: f32 = -2.0;
    pub const BANNER_OFFSET_Y: f32 = 2.0;
}

/// Sign of `value` as -1, 0 or 1 (zero stays zero, unlike `f32::signum`)
#[inline]
pub fn sign_or_zero(value: f32) -> f32 {
    if value > 0.0 {
        1.0
    } else if value < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Clamp a vector's length to at most 1
#[inline]
pub fn clamp_unit(v: Vec2) -> Vec2 {
    if v.length() > 1.0 { v.normalize() } else { v }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_or_zero() {
        assert_eq!(sign_or_zero(3.0), 1.0);
        assert_eq!(sign_or_zero(-0.2), -1.0);
        assert_eq!(sign_or_zero(0.0), 0.0);
    }

    #[test]
    fn test_clamp_unit() {
        let v = clamp_unit(Vec2::new(3.0, 4.0));
        assert!((v.length() - 1.0).abs() < 1e-6);
        assert_eq!(clamp_unit(Vec2::new(0.5, 0.0)), Vec2::new(0.5, 0.0));
    }
}

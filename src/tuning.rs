//! Gameplay tuning
//!
//! Every constant that shapes how the level plays lives here so it can be
//! overridden from a JSON file without rebuilding. Defaults are the level 1
//! balance.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::SIM_DT;

/// Errors raised while loading a tuning file
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse tuning: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning value `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Physical parameters of one entity archetype
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyTuning {
    /// Horizontal speed (world units/s)
    pub speed: f32,
    /// Upward speed set by a jump
    pub jump_power: f32,
    /// Vertical acceleration (negative is down)
    pub gravity: f32,
    /// Collision box width
    pub width: f32,
    /// Collision box height
    pub height: f32,
    /// Render scale
    pub scale: f32,
}

impl BodyTuning {
    const fn new(speed: f32, jump_power: f32, gravity: f32, width: f32, height: f32) -> Self {
        Self {
            speed,
            jump_power,
            gravity,
            width,
            height,
            scale: 1.0,
        }
    }

    const fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }
}

/// Data-driven gameplay constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Fixed simulation step in seconds
    pub fixed_timestep: f32,
    /// World size of one tile
    pub tile_size: f32,

    pub player: BodyTuning,
    pub guard: BodyTuning,
    pub shooter: BodyTuning,
    pub stalker: BodyTuning,
    pub bullet: BodyTuning,

    /// Player must fall faster than this to stomp
    pub stomp_threshold: f32,
    /// Upward velocity given to the player after a stomp
    pub stomp_bounce: f32,

    /// Horizontal distance at which a shooter notices the player
    pub shooter_range: f32,
    /// Seconds between shots while attacking
    pub shooter_cooldown: f32,
    /// Horizontal distance a bullet may travel from its launch point
    pub bullet_range: f32,

    /// Stalker stops chasing inside this horizontal distance
    pub stalker_dead_zone: f32,
    /// How far ahead of its leading edge a stalker looks for steps/ledges
    pub stalker_lookahead: f32,

    /// Entities below the map bottom minus this margin are removed
    pub fall_death_margin: f32,
    /// Maximum downward speed
    pub terminal_velocity: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            fixed_timestep: SIM_DT,
            tile_size: 1.0,

            player: BodyTuning::new(2.25, 3.5, -4.905, 0.35, 0.35),
            guard: BodyTuning::new(2.5, 1.0, -4.91, 0.5, 0.5),
            shooter: BodyTuning::new(2.5, 0.0, 0.0, 0.55, 0.55).with_scale(0.55),
            // Jump power 1.0 cannot clear a single tile step
            stalker: BodyTuning::new(2.5, 3.5, -4.91, 0.75, 0.75),
            bullet: BodyTuning::new(3.0, 0.0, 0.0, 0.15, 0.15).with_scale(0.55),

            stomp_threshold: 1.0,
            stomp_bounce: 1.5,

            shooter_range: 4.0,
            shooter_cooldown: 1.0,
            bullet_range: 6.0,

            stalker_dead_zone: 0.1,
            stalker_lookahead: 0.05,

            fall_death_margin: 2.0,
            terminal_velocity: 10.0,
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON tuning document. Missing fields keep defaults.
    pub fn from_json_str(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load and validate a JSON tuning file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| TuningError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let tuning = Self::from_json_str(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Serialize to pretty JSON (handy for dumping the defaults)
    pub fn to_json_string(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values that would break the simulation
    pub fn validate(&self) -> Result<(), TuningError> {
        positive("fixed_timestep", self.fixed_timestep)?;
        positive("tile_size", self.tile_size)?;
        positive("terminal_velocity", self.terminal_velocity)?;
        positive("shooter_cooldown", self.shooter_cooldown)?;
        positive("stomp_bounce", self.stomp_bounce)?;
        non_negative("stomp_threshold", self.stomp_threshold)?;
        non_negative("stalker_dead_zone", self.stalker_dead_zone)?;

        for (field, body) in self.bodies() {
            positive(field, body.width)?;
            positive(field, body.height)?;
            if !body.speed.is_finite() || !body.gravity.is_finite() || !body.jump_power.is_finite()
            {
                return Err(TuningError::Invalid {
                    field,
                    reason: "body parameters must be finite".to_string(),
                });
            }
        }

        // A single tick must never move an entity further than one tile
        self.within_one_tile("terminal_velocity", self.terminal_velocity)?;
        self.within_one_tile("stomp_bounce", self.stomp_bounce)?;
        for (field, body) in self.bodies() {
            self.within_one_tile(field, body.speed)?;
            self.within_one_tile(field, body.jump_power)?;
            if body.gravity > 0.0 {
                return Err(TuningError::Invalid {
                    field,
                    reason: format!("gravity must pull down, got {}", body.gravity),
                });
            }
        }
        Ok(())
    }

    fn bodies(&self) -> [(&'static str, &BodyTuning); 5] {
        [
            ("player", &self.player),
            ("guard", &self.guard),
            ("shooter", &self.shooter),
            ("stalker", &self.stalker),
            ("bullet", &self.bullet),
        ]
    }

    /// Reject a speed whose single-tick displacement reaches a whole tile
    fn within_one_tile(&self, field: &'static str, speed: f32) -> Result<(), TuningError> {
        let per_tick = speed.abs() * self.fixed_timestep;
        if per_tick >= self.tile_size {
            return Err(TuningError::Invalid {
                field,
                reason: format!("{per_tick} per tick exceeds tile size {}", self.tile_size),
            });
        }
        Ok(())
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), TuningError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(TuningError::Invalid {
            field,
            reason: format!("expected a positive finite number, got {value}"),
        })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), TuningError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(TuningError::Invalid {
            field,
            reason: format!("expected a non-negative finite number, got {value}"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        Tuning::default().validate().unwrap();
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json_str(r#"{ "shooter_range": 2.5 }"#).unwrap();
        assert_eq!(tuning.shooter_range, 2.5);
        assert_eq!(tuning.player, Tuning::default().player);
    }

    #[test]
    fn test_json_roundtrip_of_defaults() {
        let json = Tuning::default().to_json_string().unwrap();
        assert_eq!(Tuning::from_json_str(&json).unwrap(), Tuning::default());
    }

    #[test]
    fn test_rejects_bad_timestep() {
        let err = Tuning::from_json_str(r#"{ "fixed_timestep": 0.0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "fixed_timestep", .. }));
    }

    #[test]
    fn test_rejects_tunneling_speed() {
        let err = Tuning::from_json_str(r#"{ "terminal_velocity": 1000.0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "terminal_velocity", .. }));
    }

    #[test]
    fn test_rejects_tunneling_walk_speed() {
        let mut tuning = Tuning::default();
        tuning.player.speed = 90.0;
        let err = tuning.validate().unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "player", .. }));

        let mut tuning = Tuning::default();
        tuning.bullet.speed = -75.0;
        let err = tuning.validate().unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "bullet", .. }));
    }

    #[test]
    fn test_rejects_tunneling_jump() {
        let mut tuning = Tuning::default();
        tuning.stalker.jump_power = 90.0;
        let err = tuning.validate().unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "stalker", .. }));

        let err = Tuning::from_json_str(r#"{ "stomp_bounce": 80.0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "stomp_bounce", .. }));
    }

    #[test]
    fn test_rejects_upward_gravity() {
        let mut tuning = Tuning::default();
        tuning.guard.gravity = 4.9;
        let err = tuning.validate().unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "guard", .. }));
    }

    #[test]
    fn test_speed_just_under_a_tile_per_tick_is_accepted() {
        let mut tuning = Tuning::default();
        tuning.player.speed = 0.99 / tuning.fixed_timestep;
        tuning.validate().unwrap();
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(
            Tuning::from_json_str("{ not json"),
            Err(TuningError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = Tuning::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, TuningError::Io { .. }));
    }
}

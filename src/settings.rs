//! Game tuning settings
//!
//! Every gameplay constant the simulation reads lives here so a run can be
//! retuned from a JSON file without rebuilding. Defaults come from
//! [`crate::consts`].

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::radius_for_scale;

/// Errors produced while loading or validating settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid setting `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

fn invalid(field: &'static str, reason: impl Into<String>) -> SettingsError {
    SettingsError::Invalid {
        field,
        reason: reason.into(),
    }
}

/// Tunable gameplay parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === World ===
    /// Half-width of the wraparound rectangle
    pub screen_x: f32,
    /// Half-height of the wraparound rectangle
    pub screen_y: f32,
    pub sprite_depth: f32,
    pub background_depth: f32,
    pub background_scale: f32,

    // === Ship ===
    /// Degrees per second
    pub turn_rate: f32,
    pub acceleration: f32,
    pub max_vel: f32,
    pub ship_scale: f32,
    /// Seconds between destruction and respawn
    pub respawn_delay: f64,

    // === Bullets ===
    pub bullet_life: f64,
    pub bullet_repeat: f64,
    pub bullet_speed: f32,
    pub bullet_scale: f32,

    // === Asteroids ===
    pub asteroid_count: usize,
    pub asteroid_init_vel: f32,
    pub asteroid_init_scale: f32,
    pub asteroid_vel_scale: f32,
    pub asteroid_size_scale: f32,
    pub asteroid_min_scale: f32,
    pub asteroid_spawn_clearance: i32,
    pub asteroid_texture_variants: u8,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen_x: SCREEN_X,
            screen_y: SCREEN_Y,
            sprite_depth: SPRITE_DEPTH,
            background_depth: BACKGROUND_DEPTH,
            background_scale: BACKGROUND_SCALE,

            turn_rate: TURN_RATE,
            acceleration: ACCELERATION,
            max_vel: MAX_VEL,
            ship_scale: SHIP_SCALE,
            respawn_delay: RESPAWN_DELAY,

            bullet_life: BULLET_LIFE,
            bullet_repeat: BULLET_REPEAT,
            bullet_speed: BULLET_SPEED,
            bullet_scale: BULLET_SCALE,

            asteroid_count: AST_COUNT,
            asteroid_init_vel: AST_INIT_VEL,
            asteroid_init_scale: AST_INIT_SCALE,
            asteroid_vel_scale: AST_VEL_SCALE,
            asteroid_size_scale: AST_SIZE_SCALE,
            asteroid_min_scale: AST_MIN_SCALE,
            asteroid_spawn_clearance: AST_SPAWN_CLEARANCE,
            asteroid_texture_variants: AST_TEXTURE_VARIANTS,
        }
    }
}

impl Settings {
    /// Parse settings from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Squared speed cap, compared against `length_squared` to skip a sqrt
    pub fn max_vel_sq(&self) -> f32 {
        self.max_vel * self.max_vel
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), SettingsError> {
        let positive = [
            ("screen_x", self.screen_x),
            ("screen_y", self.screen_y),
            ("background_scale", self.background_scale),
            ("turn_rate", self.turn_rate),
            ("acceleration", self.acceleration),
            ("max_vel", self.max_vel),
            ("ship_scale", self.ship_scale),
            ("bullet_speed", self.bullet_speed),
            ("bullet_scale", self.bullet_scale),
            ("asteroid_init_scale", self.asteroid_init_scale),
            ("asteroid_min_scale", self.asteroid_min_scale),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(invalid(field, format!("must be positive, got {}", value)));
            }
        }

        for (field, value) in [
            ("respawn_delay", self.respawn_delay),
            ("bullet_life", self.bullet_life),
            ("bullet_repeat", self.bullet_repeat),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(invalid(field, format!("must not be negative, got {}", value)));
            }
        }

        if self.asteroid_size_scale.is_nan()
            || self.asteroid_size_scale <= 0.0
            || self.asteroid_size_scale >= 1.0
        {
            return Err(invalid(
                "asteroid_size_scale",
                format!("must be in (0, 1), got {}", self.asteroid_size_scale),
            ));
        }

        for (field, value) in [
            ("asteroid_init_vel", self.asteroid_init_vel),
            ("asteroid_vel_scale", self.asteroid_vel_scale),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(invalid(field, format!("must not be negative, got {}", value)));
            }
        }

        if self.asteroid_count == 0 {
            return Err(invalid("asteroid_count", "need at least one asteroid per wave"));
        }

        // A fresh wave must never touch the ship sitting at the origin
        let clearance = self.asteroid_spawn_clearance;
        let min_clearance =
            radius_for_scale(self.ship_scale) + radius_for_scale(self.asteroid_init_scale);
        let min_bound = self.screen_x.min(self.screen_y).floor() as i32;
        if clearance as f32 <= min_clearance || clearance > min_bound {
            return Err(invalid(
                "asteroid_spawn_clearance",
                format!(
                    "must exceed {} and be at most {}, got {}",
                    min_clearance, min_bound, clearance
                ),
            ));
        }

        if self.asteroid_texture_variants == 0 {
            return Err(invalid("asteroid_texture_variants", "need at least one variant"));
        }

        Ok(())
    }
}

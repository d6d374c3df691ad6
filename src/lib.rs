//! Asteroid Hunter - screen-wrapping asteroid shooter core
//!
//! Core modules:
//! - `sim`: Simulation (movement, collisions, spawning, game state)
//! - `present`: Presentation sink the simulation drives
//! - `settings`: Data-driven game tuning

pub mod present;
pub mod settings;
pub mod sim;

pub use present::{PresentationSink, SceneMirror, Texture, VisualHandle};
pub use settings::{Settings, SettingsError};

use glam::Vec2;

/// Game configuration constants (defaults for [`Settings`])
pub mod consts {
    /// World half-extents (screen-space rectangle centered on the origin)
    pub const SCREEN_X: f32 = 20.0;
    pub const SCREEN_Y: f32 = 15.0;

    /// Depth sprites are placed at in front of the camera
    pub const SPRITE_DEPTH: f32 = 55.0;
    /// Backdrop sits far behind everything else
    pub const BACKGROUND_DEPTH: f32 = 200.0;
    pub const BACKGROUND_SCALE: f32 = 146.0;

    /// Ship handling
    pub const TURN_RATE: f32 = 360.0; // degrees per second
    pub const ACCELERATION: f32 = 10.0;
    pub const MAX_VEL: f32 = 6.0;
    pub const SHIP_SCALE: f32 = 1.0;

    /// Bullets
    pub const BULLET_LIFE: f64 = 2.0;
    pub const BULLET_REPEAT: f64 = 0.2;
    pub const BULLET_SPEED: f32 = 10.0;
    pub const BULLET_SCALE: f32 = 0.2;

    /// Asteroids
    pub const AST_COUNT: usize = 10;
    pub const AST_INIT_VEL: f32 = 1.0;
    pub const AST_INIT_SCALE: f32 = 3.0;
    pub const AST_VEL_SCALE: f32 = 2.2;
    pub const AST_SIZE_SCALE: f32 = 0.6;
    pub const AST_MIN_SCALE: f32 = 1.1;
    /// Spawn coordinates never fall inside (-clearance, clearance) on either axis
    pub const AST_SPAWN_CLEARANCE: i32 = 6;
    pub const AST_TEXTURE_VARIANTS: u8 = 3;

    /// Seconds between ship destruction and respawn
    pub const RESPAWN_DELAY: f64 = 2.0;
}

/// Collision radius for a given visual scale
#[inline]
pub fn radius_for_scale(scale: f32) -> f32 {
    0.5 * scale
}

/// Normalize a heading to [0, 360) degrees
#[inline]
pub fn normalize_degrees(degrees: f32) -> f32 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Unit direction for a heading in degrees (0 = up, clockwise positive)
#[inline]
pub fn heading_to_direction(degrees: f32) -> Vec2 {
    let rad = degrees.to_radians();
    Vec2::new(rad.sin(), rad.cos())
}

/// Wrap a single coordinate around a toroidal axis of half-extent `bound`.
///
/// The coordinate only teleports once the whole circle of `radius` has left
/// the screen, and it re-enters with its center on the opposite edge.
#[inline]
pub fn wrap_axis(coord: f32, radius: f32, bound: f32) -> f32 {
    if coord - radius > bound {
        -bound
    } else if coord + radius < -bound {
        bound
    } else {
        coord
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_degrees() {
        assert!((normalize_degrees(370.0) - 10.0).abs() < 1e-4);
        assert!((normalize_degrees(-90.0) - 270.0).abs() < 1e-4);
        assert_eq!(normalize_degrees(0.0), 0.0);
        let tiny = normalize_degrees(-1e-9);
        assert!((0.0..360.0).contains(&tiny));
    }

    #[test]
    fn test_heading_to_direction() {
        let up = heading_to_direction(0.0);
        assert!(up.x.abs() < 1e-6 && (up.y - 1.0).abs() < 1e-6);

        let right = heading_to_direction(90.0);
        assert!((right.x - 1.0).abs() < 1e-6 && right.y.abs() < 1e-6);
    }

    #[test]
    fn test_wrap_axis() {
        // Still partially visible - no wrap
        assert_eq!(wrap_axis(20.5, 1.0, 20.0), 20.5);
        // Fully past the right edge
        assert_eq!(wrap_axis(21.5, 1.0, 20.0), -20.0);
        // Fully past the left edge
        assert_eq!(wrap_axis(-21.5, 1.0, 20.0), 20.0);
    }
}

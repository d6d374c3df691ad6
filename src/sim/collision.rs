//! Circle-circle collision detection
//!
//! Every entity is a circle of radius `scale / 2`. Overlap is tested on
//! squared distances so no square root is taken.

use glam::Vec2;

use super::state::{Asteroid, Body, Bullet, Ship};
use crate::radius_for_scale;

/// Whether two circles described by center and scale overlap
#[inline]
pub fn circles_collide(a_pos: Vec2, a_scale: f32, b_pos: Vec2, b_scale: f32) -> bool {
    let reach = radius_for_scale(a_scale) + radius_for_scale(b_scale);
    (a_pos - b_pos).length_squared() < reach * reach
}

/// Whether two bodies overlap
#[inline]
pub fn bodies_collide(a: &impl Body, b: &impl Body) -> bool {
    circles_collide(a.pos(), a.scale(), b.pos(), b.scale())
}

/// Highest asteroid index the bullet overlaps.
///
/// Scanning from the back means a removal at the returned index never
/// shifts an asteroid that has not been looked at yet.
pub fn bullet_target(bullet: &Bullet, asteroids: &[Asteroid]) -> Option<usize> {
    (0..asteroids.len())
        .rev()
        .find(|&i| bodies_collide(bullet, &asteroids[i]))
}

/// Index of the first asteroid touching the ship
pub fn ship_collision(ship: &Ship, asteroids: &[Asteroid]) -> Option<usize> {
    asteroids.iter().position(|a| bodies_collide(ship, a))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::present::{Texture, VisualHandle};
    use proptest::prelude::*;

    fn rock(x: f32, y: f32, scale: f32) -> Asteroid {
        Asteroid {
            id: 0,
            pos: Vec2::new(x, y),
            vel: Vec2::ZERO,
            scale,
            rotation: 0.0,
            texture: Texture::Asteroid(1),
            visual: VisualHandle(0),
        }
    }

    fn bullet_at(x: f32, y: f32) -> Bullet {
        Bullet {
            id: 0,
            pos: Vec2::new(x, y),
            vel: Vec2::ZERO,
            scale: 0.2,
            rotation: 0.0,
            expires_at: 2.0,
            visual: VisualHandle(0),
        }
    }

    #[test]
    fn test_circles_touching_is_not_a_hit() {
        // radii 1.5 + 0.5 = 2.0, distance exactly 2.0
        assert!(!circles_collide(Vec2::ZERO, 3.0, Vec2::new(2.0, 0.0), 1.0));
        assert!(circles_collide(Vec2::ZERO, 3.0, Vec2::new(1.99, 0.0), 1.0));
    }

    #[test]
    fn test_bullet_target_prefers_highest_index() {
        let asteroids = vec![rock(0.0, 0.0, 3.0), rock(5.0, 0.0, 3.0), rock(0.5, 0.0, 3.0)];
        let b = bullet_at(0.2, 0.0);
        assert_eq!(bullet_target(&b, &asteroids), Some(2));
    }

    #[test]
    fn test_bullet_target_miss() {
        let asteroids = vec![rock(10.0, 10.0, 3.0)];
        assert_eq!(bullet_target(&bullet_at(0.0, 0.0), &asteroids), None);
        assert_eq!(bullet_target(&bullet_at(0.0, 0.0), &[]), None);
    }

    #[test]
    fn test_ship_collision_first_match() {
        let ship = Ship {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            scale: 1.0,
            rotation: 0.0,
            alive: true,
            visual: VisualHandle(0),
        };
        let asteroids = vec![rock(9.0, 0.0, 3.0), rock(1.0, 0.0, 3.0), rock(-1.0, 0.0, 3.0)];
        assert_eq!(ship_collision(&ship, &asteroids), Some(1));
    }

    proptest! {
        #[test]
        fn prop_collision_symmetric(
            ax in -25.0f32..25.0, ay in -20.0f32..20.0, a_scale in 0.1f32..4.0,
            bx in -25.0f32..25.0, by in -20.0f32..20.0, b_scale in 0.1f32..4.0,
        ) {
            let a = Vec2::new(ax, ay);
            let b = Vec2::new(bx, by);
            prop_assert_eq!(
                circles_collide(a, a_scale, b, b_scale),
                circles_collide(b, b_scale, a, a_scale)
            );
        }
    }
}

//! Wave generation, asteroid splitting and bullet creation

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use super::state::{Asteroid, Bullet, GameEvent, GameState};
use crate::heading_to_direction;
use crate::present::{PresentationSink, Texture};

/// Pick an integer uniformly from `[-bound, -clearance] ∪ [clearance, bound]`
fn spawn_coordinate(rng: &mut impl Rng, bound: i32, clearance: i32) -> i32 {
    let span = bound - clearance + 1;
    let offset = rng.random_range(0..span * 2);
    if offset < span {
        -bound + offset
    } else {
        clearance + (offset - span)
    }
}

/// Velocity direction for a split fragment: the old heading turned a
/// quarter clockwise (cross product with the into-screen axis).
#[inline]
fn split_direction(vel: Vec2) -> Vec2 {
    let dir = vel.normalize_or_zero();
    Vec2::new(dir.y, -dir.x)
}

impl GameState {
    /// Replace every asteroid with a fresh wave away from the origin
    pub fn spawn_asteroids(&mut self, sink: &mut impl PresentationSink) {
        self.ship.alive = true;
        for asteroid in self.asteroids.drain(..) {
            sink.destroy(asteroid.visual);
        }

        let bound_x = self.settings.screen_x.floor() as i32;
        let bound_y = self.settings.screen_y.floor() as i32;
        let clearance = self.settings.asteroid_spawn_clearance;

        for _ in 0..self.settings.asteroid_count {
            let variant = self.rng.random_range(1..=self.settings.asteroid_texture_variants);
            let pos = Vec2::new(
                spawn_coordinate(&mut self.rng, bound_x, clearance) as f32,
                spawn_coordinate(&mut self.rng, bound_y, clearance) as f32,
            );
            let heading = self.rng.random::<f32>() * TAU;
            let vel = Vec2::new(heading.sin(), heading.cos()) * self.settings.asteroid_init_vel;

            let scale = self.settings.asteroid_init_scale;
            self.create_asteroid(Texture::Asteroid(variant), pos, vel, scale, sink);
        }

        let count = self.asteroids.len();
        log::info!("Spawned wave of {} asteroids", count);
        self.events.push(GameEvent::WaveSpawned { count });
    }

    /// Add a single asteroid and its visual; returns its id
    pub fn create_asteroid(
        &mut self,
        texture: Texture,
        pos: Vec2,
        vel: Vec2,
        scale: f32,
        sink: &mut impl PresentationSink,
    ) -> u32 {
        assert!(scale > 0.0, "asteroid scale must be positive, got {}", scale);
        let id = self.next_entity_id();
        let visual = sink.create_entity(Some(texture), pos, self.settings.sprite_depth, scale);
        self.asteroids.push(Asteroid {
            id,
            pos,
            vel,
            scale,
            rotation: 0.0,
            texture,
            visual,
        });
        id
    }

    /// Destroy every asteroid without spawning replacements
    pub fn clear_asteroids(&mut self, sink: &mut impl PresentationSink) {
        for asteroid in self.asteroids.drain(..) {
            sink.destroy(asteroid.visual);
        }
    }

    /// Handle a bullet hit on the asteroid at `index`.
    ///
    /// Small asteroids are removed. Larger ones shrink and split into two
    /// fragments flying apart perpendicular to the old heading. The new
    /// fragment is appended, so indices below `index` are untouched.
    pub fn asteroid_hit(&mut self, index: usize, sink: &mut impl PresentationSink) {
        assert!(
            index < self.asteroids.len(),
            "asteroid index {} out of range ({} asteroids)",
            index,
            self.asteroids.len()
        );

        if self.asteroids[index].scale <= self.settings.asteroid_min_scale {
            let asteroid = self.asteroids.remove(index);
            sink.destroy(asteroid.visual);
            log::debug!("Asteroid {} destroyed", asteroid.id);
            self.events.push(GameEvent::AsteroidDestroyed { id: asteroid.id });
            return;
        }

        let size_scale = self.settings.asteroid_size_scale;
        let vel_scale = self.settings.asteroid_vel_scale;
        let (id, pos, vel, scale, texture) = {
            let asteroid = &mut self.asteroids[index];
            asteroid.scale *= size_scale;
            sink.set_scale(asteroid.visual, asteroid.scale);

            let speed = asteroid.vel.length() * vel_scale;
            asteroid.vel = split_direction(asteroid.vel) * speed;
            (
                asteroid.id,
                asteroid.pos,
                asteroid.vel,
                asteroid.scale,
                asteroid.texture,
            )
        };

        // Fragment starts blank, then takes the parent's position and art
        let fragment_id = self.next_entity_id();
        let visual = sink.create_entity(None, pos, self.settings.sprite_depth, scale);
        sink.set_position(visual, pos);
        sink.set_texture(visual, texture);
        self.asteroids.push(Asteroid {
            id: fragment_id,
            pos,
            vel: -vel,
            scale,
            rotation: 0.0,
            texture,
            visual,
        });

        log::debug!("Asteroid {} split (fragment {}, scale {:.2})", id, fragment_id, scale);
        self.events.push(GameEvent::AsteroidSplit {
            id,
            fragment_id,
            scale,
        });
    }

    /// Fire a bullet from the ship's nose along its heading
    pub fn fire(&mut self, now: f64, sink: &mut impl PresentationSink) {
        let id = self.next_entity_id();
        let pos = self.ship.pos;
        let vel = self.ship.vel + heading_to_direction(self.ship.rotation) * self.settings.bullet_speed;
        let scale = self.settings.bullet_scale;
        let visual = sink.create_entity(Some(Texture::Bullet), pos, self.settings.sprite_depth, scale);

        self.bullets.push(Bullet {
            id,
            pos,
            vel,
            scale,
            rotation: 0.0,
            expires_at: now + self.settings.bullet_life,
            visual,
        });
        log::debug!("Bullet {} fired at t={:.2}", id, now);
        self.events.push(GameEvent::BulletFired { id });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::present::SceneMirror;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn game_with_one(scene: &mut SceneMirror, scale: f32, vel: Vec2) -> GameState {
        let mut state = GameState::new(42, scene);
        state.clear_asteroids(scene);
        state.create_asteroid(Texture::Asteroid(2), Vec2::new(3.0, 4.0), vel, scale, scene);
        state
    }

    #[test]
    fn test_spawn_coordinate_ranges() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut seen_low = false;
        let mut seen_high = false;
        for _ in 0..2000 {
            let c = spawn_coordinate(&mut rng, 20, 6);
            assert!((-20..=-6).contains(&c) || (6..=20).contains(&c), "got {}", c);
            seen_low |= c == -20;
            seen_high |= c == 20;
        }
        assert!(seen_low && seen_high);
    }

    #[test]
    fn test_wave_placement() {
        let mut scene = SceneMirror::new();
        let state = GameState::new(3, &mut scene);
        assert_eq!(state.asteroids.len(), 10);
        for a in &state.asteroids {
            assert_eq!(a.scale, 3.0);
            assert!(a.pos.x.abs() >= 6.0 && a.pos.x.abs() <= 20.0);
            assert!(a.pos.y.abs() >= 6.0 && a.pos.y.abs() <= 15.0);
            assert_eq!(a.pos.x.fract(), 0.0);
            assert!((a.vel.length() - 1.0).abs() < 1e-5);
            assert!(matches!(a.texture, Texture::Asteroid(1..=3)));
        }
    }

    #[test]
    fn test_respawn_wave_releases_old_visuals() {
        let mut scene = SceneMirror::new();
        let mut state = GameState::new(3, &mut scene);
        let before = scene.len();
        state.spawn_asteroids(&mut scene);
        assert_eq!(scene.len(), before);
        assert_eq!(scene.destroyed, 10);
    }

    #[test]
    fn test_split_conservation() {
        let mut scene = SceneMirror::new();
        let mut state = game_with_one(&mut scene, 3.0, Vec2::new(1.0, 0.0));
        state.asteroid_hit(0, &mut scene);

        assert_eq!(state.asteroids.len(), 2);
        let (a, b) = (&state.asteroids[0], &state.asteroids[1]);
        assert!((a.scale - 1.8).abs() < 1e-5);
        assert_eq!(a.scale, b.scale);
        assert!((a.vel.length() - 2.2).abs() < 1e-5);
        assert!((b.vel.length() - 2.2).abs() < 1e-5);
        assert_eq!(a.vel + b.vel, Vec2::ZERO);
        // perpendicular to the old heading (rightward -> downward)
        assert!(a.vel.x.abs() < 1e-6 && a.vel.y < 0.0);
        assert_eq!(b.pos, a.pos);
        assert_eq!(b.texture, Texture::Asteroid(2));

        let fragment = scene.get(b.visual).unwrap();
        assert_eq!(fragment.texture, Some(Texture::Asteroid(2)));
        assert_eq!(fragment.pos, a.pos);
        assert!((scene.get(a.visual).unwrap().scale - 1.8).abs() < 1e-5);
    }

    #[test]
    fn test_split_stationary_asteroid() {
        let mut scene = SceneMirror::new();
        let mut state = game_with_one(&mut scene, 3.0, Vec2::ZERO);
        state.asteroid_hit(0, &mut scene);
        assert_eq!(state.asteroids.len(), 2);
        assert_eq!(state.asteroids[0].vel, Vec2::ZERO);
        assert_eq!(state.asteroids[1].vel, Vec2::ZERO);
    }

    #[test]
    fn test_min_scale_removed_without_fragment() {
        let mut scene = SceneMirror::new();
        let mut state = game_with_one(&mut scene, 1.08, Vec2::new(0.0, 2.0));
        state.create_asteroid(Texture::Asteroid(1), Vec2::ZERO, Vec2::ZERO, 3.0, &mut scene);
        let visuals = scene.len();

        state.asteroid_hit(0, &mut scene);
        assert_eq!(state.asteroids.len(), 1);
        assert_eq!(state.asteroids[0].scale, 3.0);
        assert_eq!(scene.len(), visuals - 1);
        assert!(matches!(
            state.events.last(),
            Some(GameEvent::AsteroidDestroyed { .. })
        ));
    }

    #[test]
    fn test_recursive_split_terminates() {
        // 3.0 -> 1.8 -> 1.08 -> removed
        let mut scene = SceneMirror::new();
        let mut state = game_with_one(&mut scene, 3.0, Vec2::new(0.5, 0.5));
        let mut hits = 0;
        while !state.asteroids.is_empty() {
            let last = state.asteroids.len() - 1;
            state.asteroid_hit(last, &mut scene);
            hits += 1;
            assert!(hits < 100);
        }
        // 3 splits, 4 removals
        assert_eq!(hits, 7);
    }

    #[test]
    #[should_panic]
    fn test_hit_out_of_range_panics() {
        let mut scene = SceneMirror::new();
        let mut state = game_with_one(&mut scene, 3.0, Vec2::ZERO);
        state.asteroid_hit(5, &mut scene);
    }

    #[test]
    fn test_fire_inherits_ship_velocity() {
        let mut scene = SceneMirror::new();
        let mut state = GameState::new(1, &mut scene);
        state.ship.vel = Vec2::new(1.0, 0.0);
        state.ship.rotation = 0.0;
        state.fire(3.0, &mut scene);

        let bullet = &state.bullets[0];
        assert!((bullet.vel - Vec2::new(1.0, 10.0)).length() < 1e-5);
        assert_eq!(bullet.expires_at, 5.0);
        assert_eq!(bullet.scale, 0.2);
        assert_eq!(
            scene.get(bullet.visual).unwrap().texture,
            Some(Texture::Bullet)
        );
    }
}

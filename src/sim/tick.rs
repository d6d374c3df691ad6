//! Per-frame simulation tick
//!
//! Drives the Playing -> Destroyed -> Respawning -> Playing loop. The
//! driver calls [`tick`] once per frame with the frame's input snapshot,
//! the current clock time and the elapsed time since the last frame.

use glam::Vec2;

use super::collision;
use super::movement::{self, Bounds, Steering, move_body};
use super::state::{GameEvent, GameState, PendingAction, Scheduled};
use crate::present::PresentationSink;

/// Input snapshot for a single tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    pub turn_left: bool,
    pub turn_right: bool,
    pub accelerate: bool,
    /// One-shot: cleared by [`tick`] every frame
    pub fire: bool,
}

impl TickInput {
    pub fn steering(&self) -> Steering {
        Steering {
            turn_left: self.turn_left,
            turn_right: self.turn_right,
            accelerate: self.accelerate,
        }
    }
}

/// Advance the game by one frame
pub fn tick(
    state: &mut GameState,
    sink: &mut impl PresentationSink,
    input: &mut TickInput,
    now: f64,
    dt: f32,
) {
    assert!(dt >= 0.0, "negative frame delta: {}", dt);
    state.events.clear();

    // Fire is edge-triggered, consumed whether or not a shot happens
    let fire = std::mem::take(&mut input.fire);

    // Ship is down: only the scheduled respawn may run
    if let Some(scheduled) = state.pending {
        if now >= scheduled.at {
            state.pending = None;
            state.run_pending(scheduled.action, sink);
        }
        state.debug_check_invariants();
        return;
    }

    movement::update_ship(&mut state.ship, input.steering(), dt, &state.settings, sink);

    if fire && now > state.next_bullet_time {
        state.fire(now, sink);
        state.next_bullet_time = now + state.settings.bullet_repeat;
    }

    let bounds = Bounds::from_settings(&state.settings);
    for asteroid in &mut state.asteroids {
        move_body(asteroid, dt, bounds, sink);
    }

    for bullet in &mut state.bullets {
        move_body(bullet, dt, bounds, sink);
    }
    state.bullets.retain(|bullet| {
        if bullet.expires_at > now {
            true
        } else {
            log::trace!("Bullet {} expired", bullet.id);
            sink.destroy(bullet.visual);
            false
        }
    });

    resolve_bullet_hits(state, now, sink);

    if let Some(index) = collision::ship_collision(&state.ship, &state.asteroids) {
        state.destroy_ship(index, now, sink);
        state.debug_check_invariants();
        return;
    }

    // Field cleared: start over right away
    if state.asteroids.is_empty() {
        state.spawn_asteroids(sink);
    }

    state.debug_check_invariants();
}

/// Each bullet hits at most one asteroid per frame, the highest-indexed
/// one it overlaps. A hit bullet expires now and is pruned next frame.
fn resolve_bullet_hits(state: &mut GameState, now: f64, sink: &mut impl PresentationSink) {
    for b in 0..state.bullets.len() {
        if let Some(index) = collision::bullet_target(&state.bullets[b], &state.asteroids) {
            state.bullets[b].expires_at = now;
            state.asteroid_hit(index, sink);
        }
    }
}

impl GameState {
    /// Clear the field, hide the ship and schedule its respawn
    pub fn destroy_ship(&mut self, asteroid_index: usize, now: f64, sink: &mut impl PresentationSink) {
        let asteroid_id = self.asteroids[asteroid_index].id;

        self.ship.alive = false;
        self.clear_asteroids(sink);
        for bullet in self.bullets.drain(..) {
            sink.destroy(bullet.visual);
        }
        self.ship.vel = Vec2::ZERO;
        sink.hide(self.ship.visual);

        let at = now + self.settings.respawn_delay;
        self.pending = Some(Scheduled {
            at,
            action: PendingAction::RespawnShip,
        });

        log::info!(
            "Ship destroyed by asteroid {} at t={:.2}, respawn at t={:.2}",
            asteroid_id,
            now,
            at
        );
        self.events.push(GameEvent::ShipDestroyed { asteroid_id });
    }

    fn run_pending(&mut self, action: PendingAction, sink: &mut impl PresentationSink) {
        match action {
            PendingAction::RespawnShip => {
                self.ship.rotation = 0.0;
                sink.set_rotation(self.ship.visual, 0.0);
                self.ship.pos = Vec2::ZERO;
                sink.set_position(self.ship.visual, Vec2::ZERO);
                sink.show(self.ship.visual);
                self.spawn_asteroids(sink);

                log::info!("Ship respawned");
                self.events.push(GameEvent::ShipRespawned);
            }
        }
    }
}

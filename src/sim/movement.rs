//! Movement integration with toroidal screen bounds
//!
//! One primitive moves every entity kind; the ship additionally turns and
//! thrusts before it is integrated.

use glam::Vec2;

use super::state::{Body, Ship};
use crate::present::PresentationSink;
use crate::settings::Settings;
use crate::{heading_to_direction, normalize_degrees, radius_for_scale, wrap_axis};

/// Half-extents of the wraparound rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub half_x: f32,
    pub half_y: f32,
}

impl Bounds {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            half_x: settings.screen_x,
            half_y: settings.screen_y,
        }
    }
}

/// Advance `pos` by `vel * dt`, then wrap each axis independently.
///
/// The radius is read from the body's scale on every call, so a rescaled
/// asteroid wraps with its new size immediately.
pub fn update_pos<B: Body>(body: &mut B, dt: f32, bounds: Bounds) {
    let radius = radius_for_scale(body.scale());
    let moved = body.pos() + body.vel() * dt;
    body.set_pos(Vec2::new(
        wrap_axis(moved.x, radius, bounds.half_x),
        wrap_axis(moved.y, radius, bounds.half_y),
    ));
}

/// Integrate a body and push its new position to the sink
pub fn move_body<B: Body>(body: &mut B, dt: f32, bounds: Bounds, sink: &mut impl PresentationSink) {
    update_pos(body, dt, bounds);
    sink.set_position(body.visual(), body.pos());
}

/// Ship control inputs for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Steering {
    pub turn_left: bool,
    pub turn_right: bool,
    pub accelerate: bool,
}

/// Turn, thrust and integrate the ship
pub fn update_ship(
    ship: &mut Ship,
    steering: Steering,
    dt: f32,
    settings: &Settings,
    sink: &mut impl PresentationSink,
) {
    // Right wins when both turn keys are held
    let turn = if steering.turn_right {
        Some(dt * settings.turn_rate)
    } else if steering.turn_left {
        Some(-dt * settings.turn_rate)
    } else {
        None
    };
    if let Some(delta) = turn {
        ship.rotation = normalize_degrees(ship.rotation + delta);
        sink.set_rotation(ship.visual, ship.rotation);
    }

    if steering.accelerate {
        let thrust = heading_to_direction(ship.rotation) * settings.acceleration * dt;
        let mut vel = ship.vel + thrust;
        if vel.length_squared() > settings.max_vel_sq() {
            vel = vel.normalize() * settings.max_vel;
        }
        ship.vel = vel;
    }

    move_body(ship, dt, Bounds::from_settings(settings), sink);
}

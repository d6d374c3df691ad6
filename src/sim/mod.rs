//! Simulation module
//!
//! All gameplay logic lives here:
//! - Caller-supplied clock and frame delta only
//! - Seeded RNG only
//! - No rendering or platform dependencies (visuals go through a sink)

pub mod collision;
pub mod movement;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{bodies_collide, bullet_target, circles_collide, ship_collision};
pub use movement::{Bounds, Steering, move_body, update_pos, update_ship};
pub use state::{
    Asteroid, Body, Bullet, GameEvent, GamePhase, GameState, PendingAction, Scheduled, Ship,
    WorldSnapshot,
};
pub use tick::{TickInput, tick};

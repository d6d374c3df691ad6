//! Game state and core simulation types
//!
//! Everything the per-frame tick mutates lives on [`GameState`].

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::present::{PresentationSink, Texture, VisualHandle};
use crate::settings::Settings;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ship alive, full update every tick
    Playing,
    /// Ship destroyed, waiting for the respawn deadline
    Respawning { resume_at: f64 },
}

/// Action deferred to a later tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PendingAction {
    /// Reset the ship to the origin, show it and spawn a fresh wave
    RespawnShip,
}

/// A continuation that runs once `now >= at`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scheduled {
    pub at: f64,
    pub action: PendingAction,
}

/// Notable things that happened during the last tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    BulletFired { id: u32 },
    AsteroidSplit { id: u32, fragment_id: u32, scale: f32 },
    AsteroidDestroyed { id: u32 },
    ShipDestroyed { asteroid_id: u32 },
    ShipRespawned,
    WaveSpawned { count: usize },
}

/// The player's ship (exactly one per game)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ship {
    pub pos: Vec2,
    pub vel: Vec2,
    pub scale: f32,
    /// Heading in degrees, [0, 360)
    pub rotation: f32,
    pub alive: bool,
    pub visual: VisualHandle,
}

/// An asteroid entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asteroid {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub scale: f32,
    pub rotation: f32,
    /// Fragments inherit their parent's art
    pub texture: Texture,
    pub visual: VisualHandle,
}

/// A bullet entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub scale: f32,
    pub rotation: f32,
    /// Clock time after which the bullet is pruned
    pub expires_at: f64,
    pub visual: VisualHandle,
}

/// Anything the movement integrator can move
pub trait Body {
    fn pos(&self) -> Vec2;
    fn vel(&self) -> Vec2;
    fn scale(&self) -> f32;
    fn set_pos(&mut self, pos: Vec2);
    fn visual(&self) -> VisualHandle;
}

macro_rules! impl_body {
    ($($ty:ty),*) => {
        $(impl Body for $ty {
            fn pos(&self) -> Vec2 {
                self.pos
            }
            fn vel(&self) -> Vec2 {
                self.vel
            }
            fn scale(&self) -> f32 {
                self.scale
            }
            fn set_pos(&mut self, pos: Vec2) {
                self.pos = pos;
            }
            fn visual(&self) -> VisualHandle {
                self.visual
            }
        })*
    };
}

impl_body!(Ship, Asteroid, Bullet);

/// Complete simulation state
#[derive(Debug)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub settings: Settings,
    pub ship: Ship,
    pub asteroids: Vec<Asteroid>,
    pub bullets: Vec<Bullet>,
    /// Earliest clock time the next shot may be taken (strictly after)
    pub next_bullet_time: f64,
    /// Deferred respawn, if the ship is down
    pub pending: Option<Scheduled>,
    /// Events from the most recent tick
    pub events: Vec<GameEvent>,
    /// Backdrop visual, created once and never touched again
    pub background: VisualHandle,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new game with default settings
    pub fn new(seed: u64, sink: &mut impl PresentationSink) -> Self {
        Self::with_settings(seed, Settings::default(), sink)
    }

    /// Create a new game: backdrop, ship at the origin and the first wave
    pub fn with_settings(seed: u64, settings: Settings, sink: &mut impl PresentationSink) -> Self {
        let background = sink.create_entity(
            Some(Texture::Background),
            Vec2::ZERO,
            settings.background_depth,
            settings.background_scale,
        );
        let ship_visual = sink.create_entity(
            Some(Texture::Ship),
            Vec2::ZERO,
            settings.sprite_depth,
            settings.ship_scale,
        );

        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            ship: Ship {
                pos: Vec2::ZERO,
                vel: Vec2::ZERO,
                scale: settings.ship_scale,
                rotation: 0.0,
                alive: true,
                visual: ship_visual,
            },
            settings,
            asteroids: Vec::new(),
            bullets: Vec::new(),
            next_bullet_time: 0.0,
            pending: None,
            events: Vec::new(),
            background,
            next_id: 1,
        };

        state.spawn_asteroids(sink);
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Current lifecycle phase
    pub fn phase(&self) -> GamePhase {
        match self.pending {
            Some(Scheduled {
                at,
                action: PendingAction::RespawnShip,
            }) => GamePhase::Respawning { resume_at: at },
            None => GamePhase::Playing,
        }
    }

    /// Serializable summary of the world
    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot {
            phase: self.phase(),
            ship: self.ship.clone(),
            asteroids: self.asteroids.clone(),
            bullets: self.bullets.clone(),
        }
    }

    /// Check the invariants tying ship liveness to the entity lists
    pub(crate) fn debug_check_invariants(&self) {
        debug_assert!(
            self.ship.alive || (self.asteroids.is_empty() && self.bullets.is_empty()),
            "dead ship with live entities"
        );
        debug_assert_eq!(self.ship.alive, self.pending.is_none());
        debug_assert!(self.asteroids.iter().all(|a| a.scale > 0.0));
    }
}

/// Point-in-time copy of every entity, for logging and inspection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub phase: GamePhase,
    pub ship: Ship,
    pub asteroids: Vec<Asteroid>,
    pub bullets: Vec<Bullet>,
}

//! Skyflap - a side-scrolling flap-through-the-gaps arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (bird physics, pipes, powerups, arbitration)
//! - `settings`: Difficulty modes and player preferences
//! - `progress`: Best score, medals, achievement flags
//! - `platform`: Browser/native clock shim
//!
//! Rendering, audio, and input capture belong to the embedding shell; the
//! crate reports tick events for the shell to react to.

pub mod platform;
pub mod progress;
pub mod settings;
pub mod sim;

pub use progress::Progress;
pub use settings::{Difficulty, Settings};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Virtual playfield size; the shell letterboxes to fit
    pub const VIRTUAL_WIDTH: f32 = 480.0;
    pub const VIRTUAL_HEIGHT: f32 = 720.0;
    pub const GROUND_HEIGHT: f32 = 100.0;

    /// Timestep clamp so background tabs don't teleport the bird
    pub const MAX_TICK_DT: f32 = 1.0 / 30.0;
    /// Collision-free window at the start of a run
    pub const START_GRACE_SECS: f32 = 0.6;
    /// Flaps inside this window queue instead of stacking
    pub const FLAP_BUFFER_SECS: f32 = 0.05;

    /// Bird sprite size
    pub const BIRD_WIDTH: f32 = 40.0;
    pub const BIRD_HEIGHT: f32 = 32.0;
    pub const BIRD_START_X: f32 = 96.0;
    pub const BIRD_FRAME_SECS: f32 = 0.14;
    /// Vertical dynamics (pixels/s² and pixels/s)
    pub const GRAVITY: f32 = 1500.0;
    pub const FLAP_IMPULSE: f32 = -420.0;
    pub const MAX_FALL_SPEED: f32 = 900.0;
    pub const MAX_RISE_SPEED: f32 = 1000.0;

    /// Pipe geometry
    pub const PIPE_WIDTH: f32 = 64.0;
    pub const BASE_GAP: f32 = 150.0;
    pub const BASE_SCROLL_SPEED: f32 = 200.0;
    /// Horizontal spacing between consecutive pairs
    pub const BASE_SPACING: f32 = 260.0;
    pub const SPACING_JITTER: f32 = 80.0;
    pub const MIN_SPACING: f32 = 180.0;
    /// Largest vertical jump between consecutive gap centers
    pub const MAX_CENTER_DELTA: f32 = 140.0;
    /// New centers ease toward the candidate by this factor
    pub const CENTER_EASING: f32 = 0.85;
    /// Gap centers keep this far from the ceiling and the ground band
    pub const TOP_MARGIN: f32 = 40.0;
    pub const BOTTOM_MARGIN: f32 = 140.0;
    pub const CENTER_BAND_INSET: f32 = 40.0;
    /// First pair spawns this far past the right edge
    pub const SPAWN_START_PAD: f32 = 200.0;
    pub const PIPE_DESPAWN_X: f32 = -100.0;
    /// Segment count the field refills to after despawns
    pub const MIN_SEGMENTS: usize = 8;
    pub const RESET_PAIRS: usize = 4;

    /// Difficulty ramp over run time
    pub const SPEED_RAMP_PER_SEC: f32 = 8.0;
    pub const SPEED_RAMP_CAP: f32 = 140.0;
    pub const GAP_SHRINK_PER_SEC: f32 = 2.0;
    pub const GAP_SHRINK_CAP: f32 = 50.0;
    pub const GAP_WOBBLE_AMP: f32 = 6.0;
    pub const GAP_WOBBLE_RATE: f32 = 1.5;

    /// Powerups
    pub const POWERUP_RADIUS: f32 = 20.0;
    /// Pickup absorb animation length
    pub const ABSORB_SECS: f32 = 0.45;
    /// Score points before another spawn after a pickup
    pub const COLLECT_COOLDOWN_SCORE: u32 = 3;
    /// Spawns land at least this far ahead of the bird
    pub const SPAWN_LOOKAHEAD: f32 = 140.0;
    /// Pairs past the right edge by this much are always safe hosts
    pub const OFFSCREEN_SPAWN_PAD: f32 = 40.0;
    pub const POWERUP_DESPAWN_X: f32 = -80.0;
    /// Shield absorb opens a pass-through window this long
    pub const PASS_THROUGH_SECS: f32 = 0.5;
    /// Pickup reach as a fraction of the bird's larger dimension
    pub const COLLECT_RADIUS_SCALE: f32 = 0.45;
}

/// Axis-aligned box used for bird/pipe overlap tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    /// Strict overlap test - boxes sharing only an edge do not collide
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.pos.x < other.pos.x + other.size.x
            && self.pos.x + self.size.x > other.pos.x
            && self.pos.y < other.pos.y + other.size.y
            && self.pos.y + self.size.y > other.pos.y
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }
}

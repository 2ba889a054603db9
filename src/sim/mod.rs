//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only, one owned generator per randomized component
//! - Event vectors out, no callbacks in
//! - Timers against the run clock, never wall time
//! - No rendering or platform dependencies

pub mod bird;
pub mod pipes;
pub mod powerups;
pub mod rng;
pub mod state;
pub mod tick;

pub use bird::Bird;
pub use pipes::{PairGap, PipeEvent, PipeField, PipeSegment, SegmentKind};
pub use powerups::{Powerup, PowerupKind, PowerupManager, PowerupSchedule};
pub use rng::{GameRng, PIPES_STREAM, POWERUPS_STREAM, random_seed};
pub use state::{CollisionOutcome, GameEvent, GamePhase, GameState, resolve_collision};
pub use tick::{TickInput, difficulty_ramp, tick};

//! Run state and collision arbitration
//!
//! `GameState` owns the bird, the pipe field, the powerup manager, and the
//! held powerup, and folds pipe events through a fixed arbitration order.
//! Every timed window (grace, pass-through, absorb) measures against the
//! accumulated run clock, never wall time.

use crate::consts::*;

use super::bird::Bird;
use super::pipes::{PipeEvent, PipeField};
use super::powerups::{PowerupKind, PowerupManager, PowerupSchedule};
use super::rng::{GameRng, PIPES_STREAM, POWERUPS_STREAM, random_seed};

/// Lifecycle of a session. Menus and cards are the shell's business; the
/// phase only gates what a tick simulates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Waiting for the first flap; the bird bobs over a preview field.
    Ready,
    /// Live run.
    Running,
    /// Run ended; ticks are inert until the shell restarts.
    GameOver,
}

/// Signals for the shell: sounds, HUD flashes, persistence hooks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Flapped,
    /// Displayed score changed; carries the new total.
    Scored(u32),
    PowerCollected(PowerupKind),
    /// A fireball blast removed a pair.
    PairDestroyed,
    ShieldAbsorbed,
    GameOver,
}

/// What a raw pipe collision resolves to, given the player's protections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionOutcome {
    /// Grace or pass-through window active; nothing happens.
    Ignored,
    /// Fireball consumed: blow up the pair and credit a point.
    DestroyPair,
    /// Shield consumed: open a short pass-through window.
    ShieldAbsorb,
    /// Unprotected hit: the run ends.
    Fatal,
}

/// Decide a raw pipe collision. Pure; the caller applies the outcome.
pub fn resolve_collision(
    held: Option<PowerupKind>,
    grace_remaining: f32,
    pass_through_active: bool,
) -> CollisionOutcome {
    if grace_remaining > 0.0 {
        return CollisionOutcome::Ignored;
    }
    if pass_through_active {
        return CollisionOutcome::Ignored;
    }
    match held {
        Some(PowerupKind::Fireball) => CollisionOutcome::DestroyPair,
        Some(PowerupKind::Shield) => CollisionOutcome::ShieldAbsorb,
        None => CollisionOutcome::Fatal,
    }
}

pub struct GameState {
    /// Run seed for reproducibility.
    pub seed: u64,
    pub phase: GamePhase,
    pub bird: Bird,
    pub pipes: PipeField,
    pub powerups: PowerupManager,
    /// Displayed score: pipe passes plus fireball bonuses.
    pub score: u32,
    /// Fireball destroys credited on top of the field's pass count.
    pub(crate) bonus_score: u32,
    /// Run clock in seconds; drives every timed window.
    pub elapsed: f32,
    /// Start-of-run collision grace, counts down while running.
    pub grace: f32,
    pub(crate) pass_through_until: f32,
    /// Where the last shield absorbed a hit (for the shell's flash).
    pub last_shield_x: Option<f32>,
    /// Single-use powerup in hand; collecting replaces it.
    pub held_power: Option<PowerupKind>,
    pub width: f32,
    pub height: f32,
    pub ground_y: f32,
    pub(crate) last_flap_at: f32,
    pub(crate) pending_flap: bool,
    /// Baseline for the menu-screen bob.
    pub(crate) idle_base_y: f32,
    /// Current no-flap glide in seconds.
    pub no_flap_timer: f32,
    /// Best glide this run (achievement feed).
    pub longest_glide: f32,
}

impl GameState {
    /// Create a session with a known seed.
    pub fn new(seed: u64, schedule: PowerupSchedule) -> Self {
        let width = VIRTUAL_WIDTH;
        let height = VIRTUAL_HEIGHT;
        let start_y = height / 2.0 - 12.0;
        let mut state = Self {
            seed,
            phase: GamePhase::Ready,
            bird: Bird::new(BIRD_START_X, start_y),
            pipes: PipeField::new(width, height, GameRng::with_stream(seed, PIPES_STREAM)),
            powerups: PowerupManager::new(schedule, GameRng::with_stream(seed, POWERUPS_STREAM)),
            score: 0,
            bonus_score: 0,
            elapsed: 0.0,
            grace: 0.0,
            pass_through_until: 0.0,
            last_shield_x: None,
            held_power: None,
            width,
            height,
            ground_y: height - GROUND_HEIGHT,
            last_flap_at: f32::NEG_INFINITY,
            pending_flap: false,
            idle_base_y: start_y,
            no_flap_timer: 0.0,
            longest_glide: 0.0,
        };

        // Pre-populate the field for the menu preview
        state.pipes.reset();

        state
    }

    /// Create a session seeded from OS entropy.
    pub fn from_entropy(schedule: PowerupSchedule) -> Self {
        Self::new(random_seed(), schedule)
    }

    /// Begin a fresh run.
    pub fn start(&mut self) {
        if self.phase == GamePhase::Running {
            return;
        }
        self.phase = GamePhase::Running;
        self.bird.reset(BIRD_START_X, self.idle_base_y);
        self.pipes.reset();
        self.pipes.gap = BASE_GAP;
        self.pipes.speed = BASE_SCROLL_SPEED;
        self.score = 0;
        self.bonus_score = 0;
        self.elapsed = 0.0;
        self.grace = START_GRACE_SECS;
        self.held_power = None;
        self.pass_through_until = 0.0;
        self.last_shield_x = None;
        self.last_flap_at = f32::NEG_INFINITY;
        self.pending_flap = false;
        self.no_flap_timer = 0.0;
        self.longest_glide = 0.0;
        self.powerups.reset();
        self.powerups.schedule(self.score);
    }

    /// Pass-through window from the last shield absorb still open?
    pub fn has_pass_through(&self) -> bool {
        self.elapsed < self.pass_through_until
    }

    /// Seconds left on the pass-through window (for the shell's glow).
    pub fn pass_through_remaining(&self) -> f32 {
        (self.pass_through_until - self.elapsed).max(0.0)
    }

    /// Fold one pipe event into the run. Hits can arrive several times per
    /// tick; consumed powerups cannot double-fire because `held_power`
    /// clears on first use.
    pub(crate) fn apply_pipe_event(&mut self, event: PipeEvent, events: &mut Vec<GameEvent>) {
        match event {
            PipeEvent::Hit { pair_id, .. } => self.handle_collision(pair_id, events),
            PipeEvent::Passed { .. } => {
                self.score = self.pipes.score + self.bonus_score;
                events.push(GameEvent::Scored(self.score));
                let gaps = self.pipes.pair_gaps();
                self.powerups
                    .try_spawn(self.score, self.width, self.bird.pos.x, &gaps);
            }
        }
    }

    fn handle_collision(&mut self, pair_id: u32, events: &mut Vec<GameEvent>) {
        match resolve_collision(self.held_power, self.grace, self.has_pass_through()) {
            CollisionOutcome::Ignored => {}
            CollisionOutcome::DestroyPair => {
                self.pipes.destroy_pair(pair_id);
                self.bonus_score += 1;
                self.score = self.pipes.score + self.bonus_score;
                self.held_power = None;
                events.push(GameEvent::PairDestroyed);
                events.push(GameEvent::Scored(self.score));
            }
            CollisionOutcome::ShieldAbsorb => {
                self.held_power = None;
                self.pass_through_until = self.elapsed + PASS_THROUGH_SECS;
                self.last_shield_x = Some(self.bird.pos.x);
                events.push(GameEvent::ShieldAbsorbed);
            }
            CollisionOutcome::Fatal => {
                self.bird.alive = false;
                self.game_over(events);
            }
        }
    }

    pub(crate) fn game_over(&mut self, events: &mut Vec<GameEvent>) {
        if self.phase != GamePhase::Running {
            return;
        }
        self.phase = GamePhase::GameOver;
        events.push(GameEvent::GameOver);
    }

    /// Advance powerups with the scroll and collect any within reach.
    pub(crate) fn update_powerups(&mut self, dt: f32, events: &mut Vec<GameEvent>) {
        self.powerups.update(dt, self.pipes.speed);

        let center = self.bird.center();
        let reach = BIRD_WIDTH.max(BIRD_HEIGHT) * COLLECT_RADIUS_SCALE;
        for index in 0..self.powerups.items.len() {
            let item = &self.powerups.items[index];
            if item.collected {
                continue;
            }
            if item.pos.distance(center) < item.radius + reach {
                let kind = item.kind;
                // replaces any unused power, no stacking
                self.held_power = Some(kind);
                self.powerups.on_collect(index, self.score);
                events.push(GameEvent::PowerCollected(kind));
            }
        }
    }
}

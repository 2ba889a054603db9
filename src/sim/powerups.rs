//! Powerup spawning and lifecycle
//!
//! Spawns are score-triggered: each trigger arms a few points ahead, and the
//! spawn lands in an upcoming pipe gap. Type selection draws from a weighted
//! shuffle bag so fireballs stay rare without long shield droughts.

use glam::Vec2;
use rand::Rng;
use rand::seq::SliceRandom;

use super::pipes::PairGap;
use super::rng::GameRng;
use crate::consts::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerupKind {
    Shield,
    Fireball,
}

impl PowerupKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PowerupKind::Shield => "shield",
            PowerupKind::Fireball => "fireball",
        }
    }
}

/// Spawn cadence, in score points between pickups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerupSchedule {
    Interval { min: u32, max: u32 },
    Disabled,
}

impl Default for PowerupSchedule {
    fn default() -> Self {
        Self::Interval { min: 4, max: 8 }
    }
}

/// A collectible floating in a pipe gap.
#[derive(Debug, Clone)]
pub struct Powerup {
    pub pos: Vec2,
    pub radius: f32,
    pub kind: PowerupKind,
    pub collected: bool,
    /// Absorb animation time remaining once collected.
    pub absorb: f32,
    /// Pair this item spawned into; one item per pair at most.
    pub host_pair_id: u32,
}

pub struct PowerupManager {
    pub items: Vec<Powerup>,
    interval: PowerupSchedule,
    next_score_trigger: Option<u32>,
    cooldown_until_score: u32,
    bag: Vec<PowerupKind>,
    last_kind: Option<PowerupKind>,
    rng: GameRng,
}

impl PowerupManager {
    pub fn new(interval: PowerupSchedule, rng: GameRng) -> Self {
        Self {
            items: Vec::new(),
            interval,
            next_score_trigger: None,
            cooldown_until_score: 0,
            bag: Vec::new(),
            last_kind: None,
            rng,
        }
    }

    pub fn next_score_trigger(&self) -> Option<u32> {
        self.next_score_trigger
    }

    pub fn cooldown_until_score(&self) -> u32 {
        self.cooldown_until_score
    }

    /// Swap the spawn cadence (difficulty change). Disabling clears live
    /// items and any pending trigger.
    pub fn set_interval(&mut self, interval: PowerupSchedule) {
        self.interval = interval;
        if interval == PowerupSchedule::Disabled {
            self.items.clear();
            self.next_score_trigger = None;
        }
    }

    /// Clear run state ahead of a fresh run. The shuffle bag carries over so
    /// rarity holds across runs.
    pub fn reset(&mut self) {
        self.items.clear();
        self.next_score_trigger = None;
        self.cooldown_until_score = 0;
    }

    /// Arm the next spawn a few score points ahead. No-op while disabled.
    pub fn schedule(&mut self, current_score: u32) {
        if let PowerupSchedule::Interval { min, max } = self.interval {
            self.next_score_trigger = Some(current_score + self.rng.random_range(min..=max));
        }
    }

    /// Weighted bag refill (fireball rarer), with a soft anti-repeat across
    /// the refill boundary.
    fn refill_bag(&mut self) {
        self.bag.clear();
        self.bag.extend_from_slice(&[
            PowerupKind::Shield,
            PowerupKind::Shield,
            PowerupKind::Shield,
            PowerupKind::Fireball,
        ]);
        self.bag.shuffle(&mut self.rng);
        if let Some(last) = self.last_kind {
            if self.bag.first() == Some(&last) {
                if let Some(swap) = self.bag.iter().position(|k| *k != last) {
                    self.bag.swap(0, swap);
                }
            }
        }
    }

    fn next_kind(&mut self) -> PowerupKind {
        if self.bag.is_empty() {
            self.refill_bag();
        }
        let kind = self.bag.remove(0);
        self.last_kind = Some(kind);
        kind
    }

    /// One spawn attempt, made after each scoring event.
    ///
    /// Hosts must be unoccupied; a pair still past the right edge is taken
    /// immediately, otherwise the nearest pair comfortably ahead of the
    /// player wins. When no pair qualifies the trigger stays armed and the
    /// next scoring event retries.
    pub fn try_spawn(
        &mut self,
        current_score: u32,
        playfield_width: f32,
        player_x: f32,
        pairs: &[PairGap],
    ) {
        if current_score < self.cooldown_until_score {
            return;
        }
        let Some(trigger) = self.next_score_trigger else {
            return;
        };
        if current_score < trigger {
            return;
        }

        let mut chosen: Option<&PairGap> = None;
        let mut min_x = f32::INFINITY;
        for pair in pairs {
            if self.items.iter().any(|item| item.host_pair_id == pair.pair_id) {
                continue;
            }
            if pair.x > playfield_width + OFFSCREEN_SPAWN_PAD {
                chosen = Some(pair);
                break;
            }
            if pair.x > player_x + SPAWN_LOOKAHEAD && pair.x < min_x {
                min_x = pair.x;
                chosen = Some(pair);
            }
        }
        let Some(pair) = chosen else {
            return;
        };

        let item = Powerup {
            pos: pair.center(),
            radius: POWERUP_RADIUS,
            kind: self.next_kind(),
            collected: false,
            absorb: 0.0,
            host_pair_id: pair.pair_id,
        };
        self.items.push(item);
        self.schedule(current_score);
    }

    /// Mark an item picked up and start the score cooldown before the next
    /// spawn.
    pub fn on_collect(&mut self, index: usize, current_score: u32) {
        let Some(item) = self.items.get_mut(index) else {
            return;
        };
        item.collected = true;
        item.absorb = ABSORB_SECS;
        self.cooldown_until_score = current_score + COLLECT_COOLDOWN_SCORE;
    }

    /// Scroll items with the pipes, run absorb countdowns, and drop spent or
    /// far-off-screen items.
    pub fn update(&mut self, dt: f32, pipe_speed: f32) {
        for item in &mut self.items {
            item.pos.x -= pipe_speed * dt;
            if item.collected {
                item.absorb -= dt;
            }
        }
        self.items
            .retain(|item| !(item.collected && item.absorb <= 0.0) && item.pos.x > POWERUP_DESPAWN_X);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager(seed: u64) -> PowerupManager {
        PowerupManager::new(PowerupSchedule::default(), GameRng::seeded(seed))
    }

    fn gap(pair_id: u32, x: f32) -> PairGap {
        PairGap {
            pair_id,
            x,
            width: 64.0,
            gap_top: 250.0,
            gap_bottom: 400.0,
        }
    }

    #[test]
    fn test_schedule_arms_trigger_within_interval() {
        let mut mgr = manager(1);
        for score in [0u32, 5, 40] {
            mgr.schedule(score);
            let trigger = mgr.next_score_trigger().unwrap();
            assert!(trigger >= score + 4 && trigger <= score + 8);
        }
    }

    #[test]
    fn test_disabled_schedule_never_arms() {
        let mut mgr = PowerupManager::new(PowerupSchedule::Disabled, GameRng::seeded(2));
        mgr.schedule(0);
        assert_eq!(mgr.next_score_trigger(), None);
    }

    #[test]
    fn test_disabling_clears_items_and_trigger() {
        let mut mgr = manager(3);
        mgr.schedule(0);
        let pairs = [gap(0, 600.0)];
        mgr.try_spawn(10, 480.0, 96.0, &pairs);
        assert_eq!(mgr.items.len(), 1);

        mgr.set_interval(PowerupSchedule::Disabled);
        assert!(mgr.items.is_empty());
        assert_eq!(mgr.next_score_trigger(), None);
    }

    #[test]
    fn test_bag_holds_three_shields_per_fireball() {
        let mut mgr = manager(4);
        let shields = (0..1000)
            .filter(|_| mgr.next_kind() == PowerupKind::Shield)
            .count();
        // 250 full bags of exactly 3 shields and 1 fireball
        assert_eq!(shields, 750);
    }

    #[test]
    fn test_no_repeat_across_refill_boundary() {
        let mut mgr = manager(5);
        let draws: Vec<PowerupKind> = (0..400).map(|_| mgr.next_kind()).collect();
        for refill in 1..100 {
            let boundary = refill * 4;
            assert_ne!(
                draws[boundary],
                draws[boundary - 1],
                "repeat across bag boundary at draw {boundary}"
            );
        }
    }

    #[test]
    fn test_spawn_waits_for_trigger() {
        let mut mgr = manager(6);
        mgr.schedule(0);
        let trigger = mgr.next_score_trigger().unwrap();
        let pairs = [gap(0, 600.0)];

        mgr.try_spawn(trigger - 1, 480.0, 96.0, &pairs);
        assert!(mgr.items.is_empty());

        mgr.try_spawn(trigger, 480.0, 96.0, &pairs);
        assert_eq!(mgr.items.len(), 1);
    }

    #[test]
    fn test_unarmed_manager_never_spawns() {
        let mut mgr = manager(7);
        let pairs = [gap(0, 600.0)];
        mgr.try_spawn(100, 480.0, 96.0, &pairs);
        assert!(mgr.items.is_empty());
    }

    #[test]
    fn test_spawn_places_item_at_gap_center() {
        let mut mgr = manager(8);
        mgr.schedule(0);
        let pairs = [gap(3, 700.0)];
        mgr.try_spawn(10, 480.0, 96.0, &pairs);

        let item = &mgr.items[0];
        assert_eq!(item.pos, pairs[0].center());
        assert_eq!(item.pos.x, 700.0 + 32.0);
        assert_eq!(item.pos.y, (250.0 + 400.0) / 2.0);
        assert_eq!(item.radius, POWERUP_RADIUS);
        assert_eq!(item.host_pair_id, 3);
        assert!(!item.collected);
    }

    #[test]
    fn test_spawn_rearms_trigger() {
        let mut mgr = manager(9);
        mgr.schedule(0);
        let pairs = [gap(0, 600.0), gap(1, 900.0)];
        mgr.try_spawn(10, 480.0, 96.0, &pairs);
        let trigger = mgr.next_score_trigger().unwrap();
        assert!(trigger >= 14 && trigger <= 18);
    }

    #[test]
    fn test_occupied_pairs_are_skipped() {
        let mut mgr = manager(10);
        mgr.schedule(0);
        let pairs = [gap(0, 600.0), gap(1, 900.0)];

        mgr.try_spawn(10, 480.0, 96.0, &pairs);
        assert_eq!(mgr.items[0].host_pair_id, 0);

        mgr.try_spawn(20, 480.0, 96.0, &pairs);
        assert_eq!(mgr.items.len(), 2);
        assert_eq!(mgr.items[1].host_pair_id, 1);
    }

    #[test]
    fn test_offscreen_pair_short_circuits_nearest_choice() {
        let mut mgr = manager(11);
        mgr.schedule(0);
        // Nearest-ahead candidate sits at 300; the 600 pair is past the
        // right edge (480 + 40) and wins outright.
        let pairs = [gap(0, 300.0), gap(1, 600.0)];
        mgr.try_spawn(10, 480.0, 96.0, &pairs);
        assert_eq!(mgr.items[0].host_pair_id, 1);
    }

    #[test]
    fn test_pairs_too_close_to_player_are_ignored() {
        let mut mgr = manager(12);
        mgr.schedule(0);
        // 96 + 140 = 236; a pair at 200 is too close, one at 250 qualifies.
        let pairs = [gap(0, 200.0), gap(1, 250.0)];
        mgr.try_spawn(10, 480.0, 96.0, &pairs);
        assert_eq!(mgr.items.len(), 1);
        assert_eq!(mgr.items[0].host_pair_id, 1);
    }

    #[test]
    fn test_failed_spawn_keeps_trigger_armed() {
        let mut mgr = manager(13);
        mgr.schedule(0);
        let trigger = mgr.next_score_trigger().unwrap();

        mgr.try_spawn(trigger, 480.0, 96.0, &[]);
        assert!(mgr.items.is_empty());
        assert_eq!(mgr.next_score_trigger(), Some(trigger));

        // Retry with a host available succeeds without rescheduling first.
        let pairs = [gap(0, 600.0)];
        mgr.try_spawn(trigger + 1, 480.0, 96.0, &pairs);
        assert_eq!(mgr.items.len(), 1);
    }

    #[test]
    fn test_collect_cooldown_blocks_spawns() {
        let mut mgr = manager(14);
        mgr.schedule(0);
        let pairs = [gap(0, 600.0), gap(1, 900.0)];
        mgr.try_spawn(10, 480.0, 96.0, &pairs);

        mgr.on_collect(0, 10);
        assert_eq!(mgr.cooldown_until_score(), 13);

        // Force the trigger low enough that only the cooldown can block.
        mgr.next_score_trigger = Some(11);
        mgr.try_spawn(12, 480.0, 96.0, &pairs);
        assert_eq!(mgr.items.len(), 1);

        mgr.try_spawn(13, 480.0, 96.0, &pairs);
        assert_eq!(mgr.items.len(), 2);
    }

    #[test]
    fn test_collect_marks_item_and_starts_absorb() {
        let mut mgr = manager(15);
        mgr.schedule(0);
        let pairs = [gap(0, 600.0)];
        mgr.try_spawn(10, 480.0, 96.0, &pairs);

        mgr.on_collect(0, 10);
        assert!(mgr.items[0].collected);
        assert_eq!(mgr.items[0].absorb, ABSORB_SECS);
    }

    #[test]
    fn test_update_scrolls_items_with_pipes() {
        let mut mgr = manager(16);
        mgr.schedule(0);
        let pairs = [gap(0, 600.0)];
        mgr.try_spawn(10, 480.0, 96.0, &pairs);
        let x0 = mgr.items[0].pos.x;

        mgr.update(0.1, 200.0);
        assert!((mgr.items[0].pos.x - (x0 - 20.0)).abs() < 1e-3);
    }

    #[test]
    fn test_collected_item_expires_after_absorb() {
        let mut mgr = manager(17);
        mgr.schedule(0);
        let pairs = [gap(0, 600.0)];
        mgr.try_spawn(10, 480.0, 96.0, &pairs);
        mgr.on_collect(0, 10);

        mgr.update(ABSORB_SECS / 2.0, 0.0);
        assert_eq!(mgr.items.len(), 1);

        mgr.update(ABSORB_SECS, 0.0);
        assert!(mgr.items.is_empty());
    }

    #[test]
    fn test_uncollected_item_expires_off_screen_left() {
        let mut mgr = manager(18);
        mgr.schedule(0);
        let pairs = [gap(0, 600.0)];
        mgr.try_spawn(10, 480.0, 96.0, &pairs);

        mgr.items[0].pos.x = POWERUP_DESPAWN_X + 1.0;
        mgr.update(1e-6, 200.0);
        assert_eq!(mgr.items.len(), 1);

        mgr.items[0].pos.x = POWERUP_DESPAWN_X;
        mgr.update(1e-6, 200.0);
        assert!(mgr.items.is_empty());
    }

    #[test]
    fn test_reset_clears_run_state() {
        let mut mgr = manager(19);
        mgr.schedule(0);
        let pairs = [gap(0, 600.0)];
        mgr.try_spawn(10, 480.0, 96.0, &pairs);
        mgr.on_collect(0, 10);

        mgr.reset();
        assert!(mgr.items.is_empty());
        assert_eq!(mgr.next_score_trigger(), None);
        assert_eq!(mgr.cooldown_until_score(), 0);
    }
}

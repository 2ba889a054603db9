//! Procedural pipe field
//!
//! Pipes come in vertically aligned top/bottom pairs whose gap centers follow
//! a smoothed random walk: a uniform candidate, a bounded step from the last
//! center, then easing. The field scrolls left at a speed pushed in by the
//! difficulty ramp and reports hits and pass-throughs as events.

use std::collections::HashSet;

use glam::Vec2;
use rand::Rng;

use super::rng::GameRng;
use crate::Aabb;
use crate::consts::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    Top,
    Bottom,
}

/// One half of a pipe pair.
#[derive(Debug, Clone)]
pub struct PipeSegment {
    pub pair_id: u32,
    pub kind: SegmentKind,
    pub rect: Aabb,
}

/// What [`PipeField::update`] observed this tick, in detection order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PipeEvent {
    /// The player box overlapped this segment. Fires once per overlapping
    /// segment, so a tick can carry several.
    Hit { pair_id: u32, kind: SegmentKind },
    /// The player cleared a pair; `score` is the new total.
    Passed { pair_id: u32, score: u32 },
}

/// Read-only view of one complete pair, used for powerup placement.
#[derive(Debug, Clone, Copy)]
pub struct PairGap {
    pub pair_id: u32,
    /// Leading-edge x shared by both segments.
    pub x: f32,
    pub width: f32,
    /// Lower edge of the top segment.
    pub gap_top: f32,
    /// Upper edge of the bottom segment.
    pub gap_bottom: f32,
}

impl PairGap {
    /// Center of the open gap.
    pub fn center(&self) -> Vec2 {
        Vec2::new(
            self.x + self.width / 2.0,
            (self.gap_top + self.gap_bottom) / 2.0,
        )
    }
}

pub struct PipeField {
    pub segments: Vec<PipeSegment>,
    pub score: u32,
    /// Gap height and scroll speed are pushed in by the difficulty ramp each
    /// tick; the field never adjusts them itself.
    pub gap: f32,
    pub speed: f32,
    passed: HashSet<u32>,
    last_center: f32,
    next_id: u32,
    width: f32,
    height: f32,
    rng: GameRng,
}

impl PipeField {
    pub fn new(width: f32, height: f32, rng: GameRng) -> Self {
        Self {
            segments: Vec::new(),
            score: 0,
            gap: BASE_GAP,
            speed: BASE_SCROLL_SPEED,
            passed: HashSet::new(),
            last_center: height / 2.0,
            next_id: 0,
            width,
            height,
            rng,
        }
    }

    /// Clear the field and pre-seed it for a fresh run. Pair ids keep
    /// counting up so stale references never alias a new pair.
    pub fn reset(&mut self) {
        self.segments.clear();
        self.score = 0;
        self.passed.clear();
        self.last_center = self.height / 2.0;
        for _ in 0..RESET_PAIRS {
            self.spawn();
        }
    }

    fn next_pair_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Bound a raw candidate to at most `MAX_CENTER_DELTA` from the previous
    /// center, then back into the band.
    fn clamp_candidate(candidate: f32, last: f32, band_min: f32, band_max: f32) -> f32 {
        let delta = candidate - last;
        if delta.abs() > MAX_CENTER_DELTA {
            (last + MAX_CENTER_DELTA.copysign(delta)).clamp(band_min, band_max)
        } else {
            candidate
        }
    }

    /// Next gap center: uniform draw, bounded step, then easing toward the
    /// candidate to smooth out extremes.
    fn next_center(&mut self) -> f32 {
        let band_min = TOP_MARGIN + CENTER_BAND_INSET;
        let band_max = (self.height - BOTTOM_MARGIN) - CENTER_BAND_INSET;
        let candidate = self.rng.random_range(band_min..band_max);
        let candidate = Self::clamp_candidate(candidate, self.last_center, band_min, band_max);
        self.last_center + (candidate - self.last_center) * CENTER_EASING
    }

    fn spacing_sample(&mut self) -> f32 {
        BASE_SPACING + self.rng.random_range(-SPACING_JITTER..SPACING_JITTER)
    }

    /// Spawn one pair past the rightmost live segment.
    pub fn spawn(&mut self) {
        let center = self.next_center();
        self.last_center = center;

        let top_h = center - self.gap / 2.0;
        let bottom_y = center + self.gap / 2.0;
        let bottom_h = self.height - bottom_y - GROUND_HEIGHT;

        let farthest = self
            .segments
            .iter()
            .map(|s| s.rect.pos.x)
            .reduce(f32::max)
            .unwrap_or(self.width + SPAWN_START_PAD);
        // Averaging two draws biases spacing toward the base value.
        let spacing = ((self.spacing_sample() + self.spacing_sample()) / 2.0).max(MIN_SPACING);
        let x = farthest + spacing;

        let pair_id = self.next_pair_id();
        self.segments.push(PipeSegment {
            pair_id,
            kind: SegmentKind::Top,
            rect: Aabb::new(x, 0.0, PIPE_WIDTH, top_h),
        });
        self.segments.push(PipeSegment {
            pair_id,
            kind: SegmentKind::Bottom,
            rect: Aabb::new(x, bottom_y, PIPE_WIDTH, bottom_h),
        });
    }

    /// Scroll, detect hits and passes against the player box, drop segments
    /// past the despawn line, and refill the stream.
    ///
    /// With no player (menu preview) the field only scrolls.
    pub fn update(&mut self, dt: f32, player: Option<&Aabb>) -> Vec<PipeEvent> {
        let mut events = Vec::new();

        for seg in &mut self.segments {
            seg.rect.pos.x -= self.speed * dt;
        }

        if let Some(player) = player {
            for seg in &self.segments {
                if seg.rect.overlaps(player) {
                    events.push(PipeEvent::Hit {
                        pair_id: seg.pair_id,
                        kind: seg.kind,
                    });
                }
            }

            // A pair scores once, when its top segment clears the player's
            // leading edge.
            let passed_now: Vec<u32> = self
                .segments
                .iter()
                .filter(|seg| {
                    seg.kind == SegmentKind::Top
                        && !self.passed.contains(&seg.pair_id)
                        && seg.rect.right() < player.pos.x
                })
                .map(|seg| seg.pair_id)
                .collect();
            for pair_id in passed_now {
                self.passed.insert(pair_id);
                self.score += 1;
                events.push(PipeEvent::Passed {
                    pair_id,
                    score: self.score,
                });
            }
        }

        self.segments.retain(|seg| seg.rect.right() >= PIPE_DESPAWN_X);
        while self.segments.len() < MIN_SEGMENTS {
            self.spawn();
        }

        events
    }

    /// Remove both segments of a pair at once (fireball blast). Score and
    /// pass history stay untouched.
    pub fn destroy_pair(&mut self, pair_id: u32) {
        self.segments.retain(|seg| seg.pair_id != pair_id);
    }

    /// Snapshot complete pairs in spawn order.
    pub fn pair_gaps(&self) -> Vec<PairGap> {
        let mut pending: Vec<(u32, Option<Aabb>, Option<Aabb>)> = Vec::new();
        for seg in &self.segments {
            if let Some(entry) = pending.iter_mut().find(|(id, _, _)| *id == seg.pair_id) {
                match seg.kind {
                    SegmentKind::Top => entry.1 = Some(seg.rect),
                    SegmentKind::Bottom => entry.2 = Some(seg.rect),
                }
            } else {
                let entry = match seg.kind {
                    SegmentKind::Top => (seg.pair_id, Some(seg.rect), None),
                    SegmentKind::Bottom => (seg.pair_id, None, Some(seg.rect)),
                };
                pending.push(entry);
            }
        }
        pending
            .into_iter()
            .filter_map(|(pair_id, top, bottom)| {
                let (top, bottom) = (top?, bottom?);
                Some(PairGap {
                    pair_id,
                    x: top.pos.x,
                    width: top.size.x,
                    gap_top: top.bottom(),
                    gap_bottom: bottom.pos.y,
                })
            })
            .collect()
    }
}

//! Bird physics
//!
//! Pure vertical dynamics plus the tilt and wing animation clocks the shell
//! draws from. Horizontal motion belongs to the world scroll, not the bird.

use glam::Vec2;

use crate::Aabb;
use crate::consts::*;

#[derive(Debug, Clone)]
pub struct Bird {
    pub pos: Vec2,
    pub vel_y: f32,
    /// Velocity-eased tilt in radians.
    pub rotation: f32,
    pub alive: bool,
    /// Wing animation clock. Advanced here so replays stay frame-exact.
    pub anim_time: f32,
}

impl Bird {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            vel_y: 0.0,
            rotation: 0.0,
            alive: true,
            anim_time: 0.0,
        }
    }

    pub fn reset(&mut self, x: f32, y: f32) {
        self.pos = Vec2::new(x, y);
        self.vel_y = 0.0;
        self.rotation = 0.0;
        self.alive = true;
        self.anim_time = 0.0;
    }

    pub fn flap(&mut self) {
        if !self.alive {
            return;
        }
        self.vel_y = FLAP_IMPULSE;
        // nudge the wing animation forward
        self.anim_time += BIRD_FRAME_SECS * 0.6;
    }

    /// Integrate one step. Touching the ground band or the ceiling kills.
    pub fn update(&mut self, dt: f32, ground_y: f32) {
        if !self.alive {
            return;
        }
        self.vel_y = (self.vel_y + GRAVITY * dt).clamp(-MAX_RISE_SPEED, MAX_FALL_SPEED);
        self.pos.y += self.vel_y * dt;

        // frame-rate independent easing toward the velocity tilt
        let t = ((self.vel_y + 500.0) / 1400.0).clamp(0.0, 1.0);
        let target = -0.5 + t * 1.2;
        let ease = 1.0 - 0.0001_f32.powf(dt);
        self.rotation += (target - self.rotation) * ease;

        self.anim_time += dt;

        if self.pos.y + BIRD_HEIGHT > ground_y {
            self.pos.y = ground_y - BIRD_HEIGHT;
            self.vel_y = 0.0;
            self.alive = false;
        }
        if self.pos.y < 0.0 {
            self.pos.y = 0.0;
            self.vel_y = 0.0;
            self.alive = false;
        }
    }

    /// Collision box, inset from the drawn sprite.
    pub fn bounds(&self) -> Aabb {
        Aabb::new(
            self.pos.x + 6.0,
            self.pos.y + 4.0,
            BIRD_WIDTH - 12.0,
            BIRD_HEIGHT - 8.0,
        )
    }

    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::new(BIRD_WIDTH, BIRD_HEIGHT) * 0.5
    }

    /// Which of the two wing sprites to draw.
    pub fn wing_frame(&self) -> usize {
        (self.anim_time / BIRD_FRAME_SECS) as usize % 2
    }
}

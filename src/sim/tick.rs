//! Per-frame simulation step
//!
//! The shell calls [`tick`] once per animation frame with the real frame
//! delta; the step clamps it and runs the fixed update order.

use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;

/// Input gathered by the shell for one tick (deterministic).
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Flap requested this frame (tap/space).
    pub flap: bool,
}

/// Scroll speed and gap height for a given run time.
pub fn difficulty_ramp(elapsed: f32) -> (f32, f32) {
    let speed = BASE_SCROLL_SPEED + (elapsed * SPEED_RAMP_PER_SEC).min(SPEED_RAMP_CAP);
    let gap = BASE_GAP - (elapsed * GAP_SHRINK_PER_SEC).min(GAP_SHRINK_CAP)
        + (elapsed * GAP_WOBBLE_RATE).sin() * GAP_WOBBLE_AMP;
    (speed, gap)
}

/// Advance the game by one frame. Returns the events the shell reacts to
/// (sounds, HUD flashes, persistence).
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> Vec<GameEvent> {
    let dt = dt.min(MAX_TICK_DT);
    let mut events = Vec::new();

    state.elapsed += dt;

    if input.flap {
        match state.phase {
            GamePhase::Ready => {
                state.start();
                flap_now(state, &mut events);
            }
            GamePhase::Running => request_flap(state, &mut events),
            // Back to the menu; the shell redraws its card.
            GamePhase::GameOver => state.phase = GamePhase::Ready,
        }
    }

    match state.phase {
        GamePhase::Ready => {
            // Gentle bob over the preview field while waiting.
            let bob = (state.elapsed * 2.0 * std::f32::consts::PI).sin();
            state.bird.pos.y = state.idle_base_y + bob * 10.0;
            state.bird.rotation = bob * 0.25;
            state.bird.anim_time += dt;
            return events;
        }
        GamePhase::GameOver => return events,
        GamePhase::Running => {}
    }

    // The ramp is pushed into the field; it never adjusts itself.
    let (speed, gap) = difficulty_ramp(state.elapsed);
    state.pipes.speed = speed;
    state.pipes.gap = gap;

    state.bird.update(dt, state.ground_y);
    let bounds = state.bird.bounds();

    let pipe_events = state.pipes.update(dt, Some(&bounds));
    for event in pipe_events {
        state.apply_pipe_event(event, &mut events);
    }

    if !state.bird.alive {
        state.game_over(&mut events);
    }
    if state.phase != GamePhase::Running {
        return events;
    }

    state.grace -= dt;
    state.no_flap_timer += dt;
    if state.no_flap_timer > state.longest_glide {
        state.longest_glide = state.no_flap_timer;
    }

    if state.pending_flap && state.elapsed - state.last_flap_at >= FLAP_BUFFER_SECS {
        state.pending_flap = false;
        flap_now(state, &mut events);
    }

    state.update_powerups(dt, &mut events);

    events
}

/// Flaps inside the buffer window queue instead of stacking.
fn request_flap(state: &mut GameState, events: &mut Vec<GameEvent>) {
    if state.elapsed - state.last_flap_at < FLAP_BUFFER_SECS {
        state.pending_flap = true;
        return;
    }
    flap_now(state, events);
}

fn flap_now(state: &mut GameState, events: &mut Vec<GameEvent>) {
    state.last_flap_at = state.elapsed;
    state.bird.flap();
    state.no_flap_timer = 0.0;
    events.push(GameEvent::Flapped);
}

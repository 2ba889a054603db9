//! Skyflap entry point
//!
//! The library is the product; this binary runs a headless autoplay demo
//! on native so a full run can be watched through the logs.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use skyflap::Difficulty;
    use skyflap::sim::{GameEvent, GamePhase, GameState, TickInput, random_seed, tick};

    env_logger::init();

    let seed = random_seed();
    let mut state = GameState::new(seed, Difficulty::Medium.powerup_schedule());
    log::info!("Skyflap headless demo (seed {seed})");

    let dt = 1.0 / 60.0;
    // First flap leaves the ready screen.
    tick(&mut state, &TickInput { flap: true }, dt);

    // Up to two minutes of simulated play.
    for frame in 0..(120 * 60) {
        let input = TickInput {
            flap: frame % 2 == 0 && autopilot_wants_flap(&state),
        };
        for event in tick(&mut state, &input, dt) {
            match event {
                GameEvent::Scored(score) => log::info!("score {score}"),
                GameEvent::PowerCollected(kind) => log::info!("collected a {}", kind.as_str()),
                GameEvent::PairDestroyed => log::info!("pair destroyed"),
                GameEvent::ShieldAbsorbed => log::info!("shield absorbed a hit"),
                GameEvent::GameOver => log::info!("game over"),
                GameEvent::Flapped => {}
            }
        }
        if state.phase == GamePhase::GameOver {
            break;
        }
    }

    log::info!(
        "Run finished: score {}, survived {:.1}s, longest glide {:.2}s",
        state.score,
        state.elapsed,
        state.longest_glide
    );
}

/// Flap whenever falling below the center of the next gap
#[cfg(not(target_arch = "wasm32"))]
fn autopilot_wants_flap(state: &skyflap::sim::GameState) -> bool {
    let target = state
        .pipes
        .pair_gaps()
        .iter()
        .filter(|g| g.x + g.width > state.bird.pos.x)
        .map(|g| g.center().y)
        .next()
        .unwrap_or(state.height / 2.0);
    state.bird.vel_y > 0.0 && state.bird.center().y > target
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

    log::info!("Skyflap core loaded");
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

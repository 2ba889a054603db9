//! Seeded random streams for the simulation
//!
//! Every randomized component owns its own generator so runs replay exactly
//! from a seed. Components sharing one run seed draw from distinct PCG
//! streams to stay uncorrelated.

use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg32;

/// Stream id for the pipe field's generator.
pub const PIPES_STREAM: u64 = 1;
/// Stream id for the powerup manager's generator.
pub const POWERUPS_STREAM: u64 = 2;

/// Owned PCG32 generator handed to one simulation component.
#[derive(Debug, Clone)]
pub struct GameRng {
    rng: Pcg32,
}

impl GameRng {
    /// Deterministic generator for a known seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Deterministic generator on an explicit PCG stream, so several
    /// components can share one run seed.
    pub fn with_stream(seed: u64, stream: u64) -> Self {
        Self {
            rng: Pcg32::new(seed, stream),
        }
    }

    /// Generator seeded from OS entropy. Never fails; falls back to a
    /// counter-mixed seed when the entropy source is unavailable.
    pub fn from_entropy() -> Self {
        Self::seeded(random_seed())
    }
}

impl RngCore for GameRng {
    fn next_u32(&mut self) -> u32 {
        self.rng.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.rng.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.rng.fill_bytes(dest)
    }
}

/// Fresh 64-bit run seed from OS entropy, with a fallback when the entropy
/// source is unavailable (some headless wasm hosts).
pub fn random_seed() -> u64 {
    match Pcg32::try_from_os_rng() {
        Ok(mut rng) => rng.next_u64(),
        Err(_) => fallback_seed(),
    }
}

/// Splitmix64 step over a process-wide counter. Consecutive calls stay
/// decorrelated even without entropy.
fn fallback_seed() -> u64 {
    use std::sync::atomic::{AtomicU64, Ordering};
    static COUNTER: AtomicU64 = AtomicU64::new(0);
    let n = COUNTER.fetch_add(1, Ordering::Relaxed);
    let mut z = n.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

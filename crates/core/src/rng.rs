//! Range helpers over the session's seeded random stream.

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::{Rng, SeedableRng};

pub fn seeded(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Uniform integer in `min..=max`.
pub fn roll_inclusive(rng: &mut ChaCha8Rng, min: u32, max: u32) -> u32 {
    debug_assert!(min <= max);
    let range_size = u64::from(max - min) + 1;
    min + (rng.next_u64() % range_size) as u32
}

/// Whole-pixel coordinate in `0..=max`; a negative bound collapses to zero.
pub fn roll_pixel(rng: &mut ChaCha8Rng, max: f32) -> f32 {
    if max <= 0.0 {
        return 0.0;
    }
    roll_inclusive(rng, 0, max.floor() as u32) as f32
}

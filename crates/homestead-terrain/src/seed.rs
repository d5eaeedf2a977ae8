//! Seed derivation for the noise field.
//!
//! A world seed is expanded into a Perlin permutation seed and a pair of
//! coordinate offsets. The offsets move every sample away from the noise
//! origin, so different seeds produce differently placed but structurally
//! similar terrain.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Half-width of the range the coordinate offsets are drawn from.
const OFFSET_RANGE: f64 = 10_000.0;

/// Per-world shift applied to every noise sample coordinate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NoiseOffsets {
    /// Shift along world X.
    pub x: f64,
    /// Shift along world Z.
    pub z: f64,
}

/// Draws the two noise offsets for a world seed.
///
/// Uses `ChaCha8Rng`, whose output stream is fixed across platforms and
/// crate versions, so the same seed always yields the same offsets.
pub fn noise_offsets(world_seed: u64) -> NoiseOffsets {
    let mut rng = ChaCha8Rng::seed_from_u64(world_seed);
    NoiseOffsets {
        x: rng.random_range(-OFFSET_RANGE..OFFSET_RANGE),
        z: rng.random_range(-OFFSET_RANGE..OFFSET_RANGE),
    }
}

/// Folds a 64-bit world seed into the 32-bit seed `noise::Perlin` takes.
pub fn perlin_seed(world_seed: u64) -> u32 {
    (world_seed ^ (world_seed >> 32)) as u32
}

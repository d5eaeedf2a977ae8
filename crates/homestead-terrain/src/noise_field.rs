//! Seeded 2D coherent noise remapped to `[0, 1]`.
//!
//! The terrain formulas are written against unit-range noise, so raw Perlin
//! output (roughly `[-1, 1]`) is shifted and clamped here once.

use noise::{NoiseFn, Perlin};

use crate::seed::{NoiseOffsets, noise_offsets, perlin_seed};

/// Coordinate shift separating independent noise channels that share one
/// Perlin instance.
const CHANNEL_SHIFT: f64 = 1_000.0;

/// Frequency configuration for terrain sampling.
#[derive(Clone, Debug, PartialEq)]
pub struct NoiseParams {
    /// Frequency of the primary (large-scale shape) channel, in cycles per
    /// block. The detail channel runs at 3× and the macro channel at 0.3×
    /// this value. Default: 0.03.
    pub base_frequency: f64,
}

impl Default for NoiseParams {
    fn default() -> Self {
        Self {
            base_frequency: 0.03,
        }
    }
}

/// Perlin noise in a seed-shifted coordinate space.
pub struct NoiseField {
    perlin: Perlin,
    offsets: NoiseOffsets,
}

impl NoiseField {
    /// Builds the field for a world seed.
    pub fn new(world_seed: u64) -> Self {
        Self {
            perlin: Perlin::new(perlin_seed(world_seed)),
            offsets: noise_offsets(world_seed),
        }
    }

    /// Samples channel 0 at already-scaled coordinates, in `[0, 1]`.
    pub fn sample01(&self, x: f64, z: f64) -> f64 {
        self.sample01_channel(x, z, 0)
    }

    /// Samples an independent channel at already-scaled coordinates, in `[0, 1]`.
    ///
    /// Channels are decorrelated by shifting the sample point, so channel `n`
    /// is the same field read `n * 1000` units away.
    pub fn sample01_channel(&self, x: f64, z: f64, channel: u32) -> f64 {
        let shift = channel as f64 * CHANNEL_SHIFT;
        let raw = self
            .perlin
            .get([x + self.offsets.x + shift, z + self.offsets.z + shift]);
        ((raw + 1.0) * 0.5).clamp(0.0, 1.0)
    }

    /// The seed-derived coordinate offsets.
    pub fn offsets(&self) -> NoiseOffsets {
        self.offsets
    }
}

//! Deterministic procedural terrain: seeded noise, biome shaping rules, column
//! layering, and parallel generation of chunk data.

mod biome;
mod error;
mod generator;
mod noise_field;
mod parallel;
mod seed;

pub use biome::Biome;
pub use error::TerrainError;
pub use generator::{DIRT_DEPTH, HIGH_ELEVATION, SEA_LEVEL, TerrainGenerator};
pub use noise_field::{NoiseField, NoiseParams};
pub use parallel::{default_thread_count, generate_chunks};
pub use seed::{NoiseOffsets, noise_offsets, perlin_seed};

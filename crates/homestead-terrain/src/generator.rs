//! Height field and column layering for a seeded, biome-shaped world.
//!
//! All noise is sampled in world block coordinates, so adjacent chunks tile
//! without seams. The generator never changes after construction: the same
//! `(seed, biome, world size)` always yields identical chunks.

use homestead_voxel::{
    CHUNK_DEPTH, CHUNK_HEIGHT, CHUNK_WIDTH, ChunkCoord, ChunkData, VoxelType, WorldSize,
};

use crate::biome::Biome;
use crate::noise_field::{NoiseField, NoiseParams};

/// World height of the ocean surface. Columns below it are flooded.
pub const SEA_LEVEL: i32 = 64;

/// Thickness of the soil band beneath the surface block.
pub const DIRT_DEPTH: i32 = 4;

/// Surfaces above this height get rock instead of soil beneath them.
pub const HIGH_ELEVATION: i32 = SEA_LEVEL + 15;

const DETAIL_RATIO: f64 = 3.0;
const DETAIL_WEIGHT: f64 = 0.3;
const MACRO_RATIO: f64 = 0.3;

const PATCH_FREQUENCY: f64 = 0.08;
const PATCH_THRESHOLD: f64 = 0.75;
const PATCH_CHANNEL: u32 = 1;

const ROCK_FREQUENCY: f64 = 0.1;
const ROCK_THRESHOLD: f64 = 0.5;
const ROCK_CHANNEL: u32 = 2;

/// Fraction of the world depth over which the coast rises from sea to land.
const COAST_RAMP: f64 = 0.4;

/// Deterministic terrain generator for one world.
pub struct TerrainGenerator {
    seed: u64,
    biome: Biome,
    world_size: WorldSize,
    params: NoiseParams,
    noise: NoiseField,
}

impl TerrainGenerator {
    /// Creates a generator with default noise parameters.
    ///
    /// The world size is required up front because the Coast biome places its
    /// ocean gradient relative to the world depth.
    pub fn new(seed: u64, biome: Biome, world_size: WorldSize) -> Self {
        Self::with_params(seed, biome, world_size, NoiseParams::default())
    }

    /// Creates a generator with explicit noise parameters.
    pub fn with_params(
        seed: u64,
        biome: Biome,
        world_size: WorldSize,
        params: NoiseParams,
    ) -> Self {
        Self {
            seed,
            biome,
            world_size,
            params,
            noise: NoiseField::new(seed),
        }
    }

    /// World seed.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// World biome.
    pub fn biome(&self) -> Biome {
        self.biome
    }

    /// World size this generator was built for.
    pub fn world_size(&self) -> WorldSize {
        self.world_size
    }

    /// Noise parameters in use.
    pub fn params(&self) -> &NoiseParams {
        &self.params
    }

    /// Surface height of the world column `(world_x, world_z)`, in `[1, 255]`.
    pub fn height_at(&self, world_x: i32, world_z: i32) -> i32 {
        let s = self.params.base_frequency;
        let (x, z) = (world_x as f64, world_z as f64);

        let primary = self.noise.sample01(x * s, z * s);
        let detail = self.noise.sample01(x * s * DETAIL_RATIO, z * s * DETAIL_RATIO);
        let macro_scale = self.noise.sample01(x * s * MACRO_RATIO, z * s * MACRO_RATIO);
        let combined = primary + detail * DETAIL_WEIGHT;

        let height = match self.biome {
            Biome::Forest => SEA_LEVEL - 4 + round(combined * 12.0 + macro_scale * 4.0),
            Biome::Mountains => {
                let ridge = (primary - 0.5).abs() * 2.0;
                SEA_LEVEL - 9 + round(combined * 25.0 + ridge * 12.0 + macro_scale * 8.0)
            }
            Biome::Coast => {
                let ramp = self.world_size.depth_blocks().max(1) as f64 * COAST_RAMP;
                let gradient = (z / ramp).clamp(0.0, 1.0);
                SEA_LEVEL + round(lerp(-10.0, 8.0, gradient) + combined * 4.0)
            }
            Biome::Plains => SEA_LEVEL + round(combined * 10.0),
        };

        height.clamp(1, CHUNK_HEIGHT as i32 - 1)
    }

    /// Material of the top block of a column with the given surface height.
    pub fn surface_material(&self, world_x: i32, world_z: i32, height: i32) -> VoxelType {
        if height <= SEA_LEVEL + 1 {
            return VoxelType::Sand;
        }
        let (x, z) = (world_x as f64, world_z as f64);
        match self.biome {
            Biome::Forest => {
                let patch = self.noise.sample01_channel(
                    x * PATCH_FREQUENCY,
                    z * PATCH_FREQUENCY,
                    PATCH_CHANNEL,
                );
                if patch > PATCH_THRESHOLD {
                    VoxelType::Dirt
                } else {
                    VoxelType::Grass
                }
            }
            Biome::Mountains => {
                if height > SEA_LEVEL + 20 {
                    VoxelType::Stone
                } else if height > SEA_LEVEL + 12 {
                    let rock = self.noise.sample01_channel(
                        x * ROCK_FREQUENCY,
                        z * ROCK_FREQUENCY,
                        ROCK_CHANNEL,
                    );
                    if rock > ROCK_THRESHOLD {
                        VoxelType::Stone
                    } else {
                        VoxelType::Grass
                    }
                } else {
                    VoxelType::Grass
                }
            }
            Biome::Coast if height <= SEA_LEVEL + 3 => VoxelType::Sand,
            Biome::Coast | Biome::Plains => VoxelType::Grass,
        }
    }

    /// Block at height `y` in a column whose surface is at `height`.
    pub fn column_block(y: i32, height: i32, surface: VoxelType) -> VoxelType {
        if y > height {
            if y <= SEA_LEVEL {
                VoxelType::Water
            } else {
                VoxelType::Air
            }
        } else if y == height {
            surface
        } else if y > height - DIRT_DEPTH {
            if height > HIGH_ELEVATION {
                VoxelType::Stone
            } else {
                VoxelType::Dirt
            }
        } else {
            VoxelType::Stone
        }
    }

    /// Fills every column of `chunk` in place.
    pub fn generate_chunk(&self, chunk: &mut ChunkData) {
        let (origin_x, origin_z) = chunk.world_origin();
        for lz in 0..CHUNK_DEPTH as i32 {
            for lx in 0..CHUNK_WIDTH as i32 {
                let (wx, wz) = (origin_x + lx, origin_z + lz);
                let height = self.height_at(wx, wz);
                let surface = self.surface_material(wx, wz, height);
                for y in 0..CHUNK_HEIGHT as i32 {
                    chunk.set_block(lx, y, lz, Self::column_block(y, height, surface));
                }
            }
        }
    }

    /// Allocates and fills the chunk at `coord`.
    pub fn generate(&self, coord: ChunkCoord) -> ChunkData {
        let mut chunk = ChunkData::new(coord);
        self.generate_chunk(&mut chunk);
        chunk
    }
}

/// Round half to even, then narrow to `i32`.
fn round(v: f64) -> i32 {
    v.round_ties_even() as i32
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

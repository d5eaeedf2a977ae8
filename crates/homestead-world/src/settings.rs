//! Validated world construction parameters.

use std::str::FromStr;
use std::time::Duration;

use homestead_config::Config;
use homestead_lod::{LodLevel, LodThresholds};
use homestead_terrain::{Biome, NoiseParams};
use homestead_voxel::WorldSize;

use crate::error::WorldError;

/// Which mesh builder turns chunk data into geometry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TerrainRenderer {
    /// Heightmap-interpolated surface with LOD and a water sheet.
    #[default]
    Smooth,
    /// One flat-shaded quad per exposed block face. Ignores LOD.
    Blocky,
}

impl TerrainRenderer {
    /// Every renderer, in declaration order.
    pub const ALL: [TerrainRenderer; 2] = [Self::Smooth, Self::Blocky];

    /// Lowercase name, as used in config files and on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Self::Smooth => "smooth",
            Self::Blocky => "blocky",
        }
    }

    /// How many columns in from a chunk edge an edit still changes the
    /// neighbouring chunk's mesh.
    ///
    /// Blocky faces only look one block across the border. Smooth normals
    /// sample one LOD step past each vertex, so at the coarsest level an edit
    /// up to four columns in reaches the neighbour's edge vertices.
    pub fn edit_reach(self) -> i32 {
        match self {
            Self::Blocky => 1,
            Self::Smooth => LodLevel::Low.step() as i32 + 1,
        }
    }
}

impl std::fmt::Display for TerrainRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TerrainRenderer {
    type Err = WorldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|r| r.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| WorldError::UnknownRenderer(s.to_string()))
    }
}

/// Everything needed to build a world.
#[derive(Clone, Debug, PartialEq)]
pub struct WorldSettings {
    /// Terrain seed.
    pub seed: u64,
    /// The world's single biome.
    pub biome: Biome,
    /// Grid size in chunks. Must be non-empty.
    pub size: WorldSize,
    /// Mesh builder for every chunk.
    pub renderer: TerrainRenderer,
    /// Distances at which chunks drop to coarser LOD.
    pub lod_thresholds: LodThresholds,
    /// Minimum time between LOD re-evaluations in `update_lod`.
    pub lod_check_interval: Duration,
    /// Data generation workers, 0 for one per core.
    pub generation_threads: usize,
    /// Noise frequencies.
    pub noise: NoiseParams,
}

impl Default for WorldSettings {
    fn default() -> Self {
        Self {
            seed: 12345,
            biome: Biome::default(),
            size: WorldSize::new(8, 8),
            renderer: TerrainRenderer::default(),
            lod_thresholds: LodThresholds::default(),
            lod_check_interval: Duration::from_millis(500),
            generation_threads: 0,
            noise: NoiseParams::default(),
        }
    }
}

impl WorldSettings {
    /// Settings for a world of the given seed, biome and size, with defaults
    /// for everything else.
    pub fn new(seed: u64, biome: Biome, size: WorldSize) -> Self {
        Self {
            seed,
            biome,
            size,
            ..Self::default()
        }
    }

    /// Translates a loaded config, parsing the biome and renderer names.
    ///
    /// # Errors
    ///
    /// Fails on unknown names, inverted or non-positive LOD distances, and
    /// anything [`WorldSettings::validate`] rejects.
    pub fn from_config(config: &Config) -> Result<Self, WorldError> {
        let biome: Biome = config.world.biome.parse()?;
        let renderer: TerrainRenderer = config.world.renderer.parse()?;
        let (near, far) = (config.lod.near_chunks, config.lod.far_chunks);
        let lod_thresholds =
            LodThresholds::new(near, far).ok_or(WorldError::InvalidLodThresholds { near, far })?;

        let settings = Self {
            seed: config.world.seed,
            biome,
            size: WorldSize::new(config.world.chunks_x, config.world.chunks_z),
            renderer,
            lod_thresholds,
            lod_check_interval: Duration::from_millis(config.lod.check_interval_ms),
            generation_threads: config.generation.threads,
            noise: NoiseParams {
                base_frequency: config.generation.base_frequency,
            },
        };
        settings.validate()?;
        Ok(settings)
    }

    /// Checks invariants that the field types alone cannot express.
    pub fn validate(&self) -> Result<(), WorldError> {
        if self.size.is_empty() {
            return Err(WorldError::EmptyWorld {
                chunks_x: self.size.chunks_x,
                chunks_z: self.size.chunks_z,
            });
        }
        let frequency = self.noise.base_frequency;
        if !(frequency.is_finite() && frequency > 0.0) {
            return Err(WorldError::InvalidFrequency(frequency));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use homestead_terrain::TerrainError;

    #[test]
    fn test_renderer_parse() {
        assert_eq!("smooth".parse::<TerrainRenderer>().unwrap(), TerrainRenderer::Smooth);
        assert_eq!(" Blocky".parse::<TerrainRenderer>().unwrap(), TerrainRenderer::Blocky);
        let err = "voxel".parse::<TerrainRenderer>().unwrap_err();
        assert!(matches!(err, WorldError::UnknownRenderer(ref n) if n == "voxel"));
    }

    #[test]
    fn test_edit_reach() {
        assert_eq!(TerrainRenderer::Blocky.edit_reach(), 1);
        assert_eq!(TerrainRenderer::Smooth.edit_reach(), 5);
    }

    #[test]
    fn test_from_default_config() {
        let settings = WorldSettings::from_config(&Config::default()).unwrap();
        assert_eq!(settings, WorldSettings::default());
    }

    #[test]
    fn test_from_config_maps_fields() {
        let mut config = Config::default();
        config.world.seed = 5;
        config.world.biome = "coast".to_string();
        config.world.chunks_x = 3;
        config.world.renderer = "blocky".to_string();
        config.lod.check_interval_ms = 250;
        config.generation.threads = 2;

        let settings = WorldSettings::from_config(&config).unwrap();
        assert_eq!(settings.seed, 5);
        assert_eq!(settings.biome, Biome::Coast);
        assert_eq!(settings.size, WorldSize::new(3, 8));
        assert_eq!(settings.renderer, TerrainRenderer::Blocky);
        assert_eq!(settings.lod_check_interval, Duration::from_millis(250));
        assert_eq!(settings.generation_threads, 2);
    }

    #[test]
    fn test_from_config_rejects_unknown_biome() {
        let mut config = Config::default();
        config.world.biome = "tundra".to_string();
        let err = WorldSettings::from_config(&config).unwrap_err();
        assert!(matches!(err, WorldError::Terrain(TerrainError::UnknownBiome(_))));
    }

    #[test]
    fn test_from_config_rejects_inverted_lod() {
        let mut config = Config::default();
        config.lod.near_chunks = 8.0;
        config.lod.far_chunks = 2.0;
        let err = WorldSettings::from_config(&config).unwrap_err();
        assert!(matches!(err, WorldError::InvalidLodThresholds { .. }));
    }

    #[test]
    fn test_validate_rejects_empty_world() {
        let settings = WorldSettings::new(1, Biome::Forest, WorldSize::new(0, 4));
        let err = settings.validate().unwrap_err();
        assert!(matches!(err, WorldError::EmptyWorld { chunks_x: 0, chunks_z: 4 }));
    }

    #[test]
    fn test_validate_rejects_bad_frequency() {
        let mut settings = WorldSettings::default();
        settings.noise.base_frequency = 0.0;
        assert!(matches!(settings.validate(), Err(WorldError::InvalidFrequency(_))));
    }
}

//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Homestead terrain command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "homestead", about = "Homestead voxel terrain")]
pub struct CliArgs {
    /// Terrain seed.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Biome: forest, mountains, coast or plains.
    #[arg(long)]
    pub biome: Option<String>,

    /// World width in chunks.
    #[arg(long)]
    pub chunks_x: Option<u32>,

    /// World depth in chunks.
    #[arg(long)]
    pub chunks_z: Option<u32>,

    /// Mesh style: smooth or blocky.
    #[arg(long)]
    pub renderer: Option<String>,

    /// Worker threads for terrain generation (0 = one per core).
    #[arg(long)]
    pub threads: Option<usize>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(seed) = args.seed {
            self.world.seed = seed;
        }
        if let Some(ref biome) = args.biome {
            self.world.biome = biome.clone();
        }
        if let Some(x) = args.chunks_x {
            self.world.chunks_x = x;
        }
        if let Some(z) = args.chunks_z {
            self.world.chunks_z = z;
        }
        if let Some(ref renderer) = args.renderer {
            self.world.renderer = renderer.clone();
        }
        if let Some(threads) = args.threads {
            self.generation.threads = threads;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_override() {
        let mut config = Config::default();
        let args = CliArgs {
            seed: Some(42),
            biome: Some("mountains".to_string()),
            chunks_x: Some(4),
            ..CliArgs::default()
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.world.seed, 42);
        assert_eq!(config.world.biome, "mountains");
        assert_eq!(config.world.chunks_x, 4);
        // Non-overridden fields retain defaults
        assert_eq!(config.world.chunks_z, 8);
        assert_eq!(config.world.renderer, "smooth");
    }

    #[test]
    fn test_cli_no_override() {
        let original = Config::default();
        let mut config = Config::default();
        config.apply_cli_overrides(&CliArgs::default());
        assert_eq!(config, original);
    }

    #[test]
    fn test_parse_flags() {
        let args = CliArgs::try_parse_from([
            "homestead",
            "--seed",
            "7",
            "--renderer",
            "blocky",
            "--chunks-z",
            "3",
            "--config",
            "/tmp/hs",
        ])
        .unwrap();
        assert_eq!(args.seed, Some(7));
        assert_eq!(args.renderer.as_deref(), Some("blocky"));
        assert_eq!(args.chunks_z, Some(3));
        assert_eq!(args.config, Some(PathBuf::from("/tmp/hs")));
        assert_eq!(args.biome, None);
    }
}

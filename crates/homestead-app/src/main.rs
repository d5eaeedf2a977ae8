//! The binary entry point for Homestead.
//!
//! Loads the config, generates a world, walks a camera across it and logs
//! what the meshes look like afterwards.

mod walkthrough;

use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Parser;
use homestead_config::{CONFIG_FILE_NAME, CliArgs, Config, ConfigError, default_config_dir};
use homestead_world::{WorldError, WorldManager};
use tracing::info;

/// Simulated ticks in the camera walk.
const WALK_TICKS: u32 = 120;

#[derive(Debug, thiserror::Error)]
enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    World(#[from] WorldError),
    #[error("failed to install logger: {0}")]
    Logging(#[from] homestead_log::TryInitError),
}

fn main() {
    let args = CliArgs::parse();
    if let Err(e) = run(&args) {
        eprintln!("homestead: {e}");
        std::process::exit(1);
    }
}

fn run(args: &CliArgs) -> Result<(), AppError> {
    let config_dir = args.config.clone().unwrap_or_else(default_config_dir);
    let loaded = load_config(&config_dir, args)?;

    let log_dir = config_dir.join("logs");
    let log_file = homestead_log::init_logging(
        Some(&log_dir),
        cfg!(debug_assertions),
        Some(&loaded.config),
    )?;
    // Logging only exists from here on; report how the config was found.
    if loaded.created {
        info!(path = %loaded.path.display(), "created default config");
    } else {
        info!(path = %loaded.path.display(), "loaded config");
    }
    if let Some(path) = log_file {
        info!(path = %path.display(), "writing JSON log");
    }
    let config = loaded.config;

    let started = Instant::now();
    let mut world = WorldManager::from_config(&config)?;
    world.generate()?;
    info!(
        chunks = world.chunk_count(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "world ready"
    );

    let summary = walkthrough::run(&mut world, WALK_TICKS);
    walkthrough::log_summary(&world, &summary);
    Ok(())
}

/// Config as resolved at startup, before a subscriber exists to log it.
struct LoadedConfig {
    config: Config,
    path: PathBuf,
    created: bool,
}

/// Loads (or creates) the config in `config_dir` and applies CLI overrides.
fn load_config(config_dir: &Path, args: &CliArgs) -> Result<LoadedConfig, ConfigError> {
    let path = config_dir.join(CONFIG_FILE_NAME);
    let created = !path.exists();
    let mut config = Config::load_or_create(config_dir)?;
    config.apply_cli_overrides(args);
    Ok(LoadedConfig {
        config,
        path,
        created,
    })
}

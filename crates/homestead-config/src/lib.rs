//! Configuration for the Homestead terrain runtime.
//!
//! Settings persist to disk as `config.ron` in the config directory. Every
//! section tolerates missing and unknown fields, so old files keep loading
//! as options are added. Command-line flags override whatever was loaded.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    CONFIG_FILE_NAME, Config, DebugConfig, GenerationConfig, LodConfig, WorldConfig,
    default_config_dir,
};
pub use error::ConfigError;

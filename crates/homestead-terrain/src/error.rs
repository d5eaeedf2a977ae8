//! Terrain error types.

/// Errors raised while configuring or running terrain generation.
#[derive(Debug, thiserror::Error)]
pub enum TerrainError {
    /// A biome name did not match any known biome.
    #[error("unknown biome: {0}")]
    UnknownBiome(String),

    /// The OS refused to start a generation worker thread.
    #[error("failed to spawn chunk generation worker: {0}")]
    WorkerSpawn(#[source] std::io::Error),

    /// Workers exited before every requested chunk was delivered.
    #[error("chunk generation finished with {missing} chunk(s) missing")]
    Incomplete {
        /// Number of chunks that never arrived.
        missing: usize,
    },
}

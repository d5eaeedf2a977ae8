//! World error types.

use homestead_terrain::TerrainError;

/// Errors raised while setting up or building a world.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    /// The world has zero chunks along at least one axis.
    #[error("world size must be at least 1x1 chunks, got {chunks_x}x{chunks_z}")]
    EmptyWorld { chunks_x: u32, chunks_z: u32 },

    /// A renderer name did not match any known mesh style.
    #[error("unknown terrain renderer: {0}")]
    UnknownRenderer(String),

    /// LOD distances must satisfy `0 < near <= far`.
    #[error("invalid LOD distances: near {near}, far {far}")]
    InvalidLodThresholds { near: f32, far: f32 },

    /// The primary noise frequency must be positive and finite.
    #[error("invalid noise frequency: {0}")]
    InvalidFrequency(f64),

    /// The OS refused to start a meshing worker thread.
    #[error("failed to spawn chunk meshing worker: {0}")]
    MeshWorkerSpawn(#[source] std::io::Error),

    /// Terrain setup or generation failed.
    #[error(transparent)]
    Terrain(#[from] TerrainError),
}

//! World-level orchestration: builds the fixed chunk grid, answers block and
//! height queries in world coordinates, applies edits with neighbour-aware
//! mesh rebuilds, and keeps per-chunk LOD in step with the camera.

mod error;
mod manager;
mod settings;

pub use error::WorldError;
pub use manager::WorldManager;
pub use settings::{TerrainRenderer, WorldSettings};

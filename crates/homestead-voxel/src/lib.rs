//! Block storage for the terrain core: voxel types, fixed-size chunk columns,
//! and chunk/world coordinate math.

pub mod chunk;
pub mod coords;
pub mod voxel;

pub use chunk::{CHUNK_DEPTH, CHUNK_HEIGHT, CHUNK_VOLUME, CHUNK_WIDTH, ChunkData};
pub use coords::{ChunkCoord, ChunkMap, WorldSize, world_to_chunk};
pub use voxel::VoxelType;

//! Mesh construction for terrain chunks: the blocky per-face builder, the
//! smooth heightmap builder with LOD, and the shared mesh containers.

pub mod blocky;
pub mod face_direction;
pub mod invalidation;
pub mod mesh_data;
pub mod palette;
pub mod smooth;
pub mod vertex;

pub use blocky::{BlockLookup, ChunkMeshBuilder};
pub use face_direction::FaceDirection;
pub use invalidation::MeshInvalidator;
pub use mesh_data::{MeshData, Submesh};
pub use palette::{BlendCategory, WATER_COLOR, base_color, blend_color};
pub use smooth::{
    ColumnLookup, CornerSample, LOD_STEPS, SmoothTerrainBuilder, UV_TILING, WATER_SURFACE_OFFSET,
    corner_sample,
};
pub use vertex::TerrainVertex;

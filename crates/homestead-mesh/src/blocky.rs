//! Per-face ("blocky") chunk meshing.
//!
//! Every solid block emits one quad for each side that borders a transparent
//! block. Water only emits its top, slightly lowered, into the transparent
//! submesh. Faces are flat-shaded with a fixed per-direction multiplier.

use homestead_voxel::{CHUNK_DEPTH, CHUNK_HEIGHT, CHUNK_WIDTH, ChunkData, VoxelType};

use crate::face_direction::FaceDirection;
use crate::mesh_data::{MeshData, Submesh};
use crate::palette::{WATER_COLOR, base_color, shaded};

/// World-keyed block query for positions outside the chunk being meshed.
pub type BlockLookup<'a> = &'a dyn Fn(i32, i32, i32) -> VoxelType;

/// Distance the water surface sits below the top of its block.
const WATER_SINK: f32 = 0.1;

/// Builds blocky meshes for single chunks.
pub struct ChunkMeshBuilder;

impl ChunkMeshBuilder {
    /// Meshes `chunk` in world space.
    ///
    /// Neighbours outside the chunk's columns come from `lookup`; without one
    /// they are treated as Air, so chunk borders get closed walls.
    pub fn build(chunk: &ChunkData, lookup: Option<BlockLookup<'_>>) -> MeshData {
        let mut mesh = MeshData::new();
        let (origin_x, origin_z) = chunk.world_origin();

        let neighbor = |x: i32, y: i32, z: i32| -> VoxelType {
            if !(0..CHUNK_HEIGHT as i32).contains(&y) {
                VoxelType::Air
            } else if ChunkData::contains_column(x, z) {
                chunk.get_block(x, y, z)
            } else {
                lookup.map_or(VoxelType::Air, |f| f(origin_x + x, y, origin_z + z))
            }
        };

        for y in 0..CHUNK_HEIGHT as i32 {
            for z in 0..CHUNK_DEPTH as i32 {
                for x in 0..CHUNK_WIDTH as i32 {
                    let block = chunk.get_block(x, y, z);
                    let base = [(origin_x + x) as f32, y as f32, (origin_z + z) as f32];
                    match block {
                        VoxelType::Air => {}
                        VoxelType::Water => {
                            if neighbor(x, y + 1, z) == VoxelType::Air {
                                push_face(
                                    &mut mesh,
                                    Submesh::Transparent,
                                    FaceDirection::PosY,
                                    base,
                                    -WATER_SINK,
                                    WATER_COLOR,
                                );
                            }
                        }
                        solid => {
                            let color = base_color(solid);
                            for dir in FaceDirection::ALL {
                                let (nx, ny, nz) = dir.offset(x, y, z);
                                if neighbor(nx, ny, nz).is_transparent() {
                                    push_face(
                                        &mut mesh,
                                        Submesh::Opaque,
                                        dir,
                                        base,
                                        0.0,
                                        shaded(color, dir.shade()),
                                    );
                                }
                            }
                        }
                    }
                }
            }
        }

        mesh
    }
}

/// Pushes the `dir` face of the block whose minimum corner is `base`,
/// shifted vertically by `lift`.
fn push_face(
    mesh: &mut MeshData,
    submesh: Submesh,
    dir: FaceDirection,
    base: [f32; 3],
    lift: f32,
    color: [f32; 4],
) {
    let corners = dir
        .unit_corners()
        .map(|c| [base[0] + c[0], base[1] + c[1] + lift, base[2] + c[2]]);
    mesh.push_quad(submesh, corners, dir.normal(), color);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

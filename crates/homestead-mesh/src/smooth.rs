//! Smooth heightmap meshing with level of detail.
//!
//! The block heightmap is read as a continuous surface: each mesh vertex sits
//! on a block corner at the average height of the (up to) four columns that
//! share that corner. Normals come from central differences on the same
//! corner heights, so two chunks sampling a shared corner always agree on
//! its position, colour and normal, whether or not the neighbouring mesh
//! exists.
//!
//! A flat water sheet is emitted alongside the terrain for every cell that
//! dips below the waterline.

use glam::Vec3;
use homestead_terrain::SEA_LEVEL;
use homestead_voxel::{CHUNK_DEPTH, CHUNK_WIDTH, ChunkData, VoxelType};

use crate::mesh_data::{MeshData, Submesh};
use crate::palette::{BlendCategory, WATER_COLOR, blend_color};

/// Supported vertex strides, from full detail to lowest.
pub const LOD_STEPS: [usize; 3] = [1, 2, 4];

/// World-space UV scale: one texture repeat every `1 / UV_TILING` blocks.
pub const UV_TILING: f32 = 0.25;

/// Height of the water sheet above [`SEA_LEVEL`].
pub const WATER_SURFACE_OFFSET: f32 = 0.15;

/// Corner height used when no column around it has data.
const FALLBACK_HEIGHT: f32 = (SEA_LEVEL + 1) as f32;

/// Columns sharing the corner `(x, z)`, as offsets, in summation order.
const CORNER_COLUMNS: [(i32, i32); 4] = [(-1, -1), (0, -1), (-1, 0), (0, 0)];

/// World-keyed column queries for columns outside the chunk being meshed.
///
/// `height` returns the top solid block of a column, or a negative value
/// when the column has no data. `surface` is only consulted for columns with
/// a non-negative height.
pub struct ColumnLookup<'a> {
    pub height: &'a dyn Fn(i32, i32) -> i32,
    pub surface: &'a dyn Fn(i32, i32) -> VoxelType,
}

/// Averaged terrain state at one block corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CornerSample {
    /// Surface height at the corner (top of the blocks, not their base).
    pub height: f32,
    /// Grass / dirt / stone / sand weights; sums to one.
    pub weights: [f32; 4],
    /// Number of columns that had data, `0..=4`.
    pub contributors: u8,
}

impl CornerSample {
    /// Unlit vertex colour for this corner.
    pub fn color(&self) -> [f32; 4] {
        blend_color(self.weights)
    }
}

/// Samples the world corner `(world_x, world_z)`.
///
/// Columns inside `chunk` are read directly; others go through `lookup`.
/// Columns without data are left out of both the height average and the
/// material tally. With no data at all the corner falls back to
/// `SEA_LEVEL + 1` and pure grass.
pub fn corner_sample(
    chunk: &ChunkData,
    lookup: Option<&ColumnLookup<'_>>,
    world_x: i32,
    world_z: i32,
) -> CornerSample {
    let mut sum = 0i32;
    let mut contributors = 0u8;
    let mut tally = [0.0f32; 4];

    for (dx, dz) in CORNER_COLUMNS {
        let (x, z) = (world_x.saturating_add(dx), world_z.saturating_add(dz));
        let Some((height, surface)) = column(chunk, lookup, x, z) else {
            continue;
        };
        sum += height;
        contributors += 1;
        if let Some(category) = BlendCategory::from_voxel(surface) {
            tally[category.index()] += 1.0;
        }
    }

    if contributors == 0 {
        return CornerSample {
            height: FALLBACK_HEIGHT,
            weights: BlendCategory::Grass.weights(),
            contributors,
        };
    }

    let n = contributors as f32;
    CornerSample {
        height: sum as f32 / n + 1.0,
        weights: tally.map(|t| t / n),
        contributors,
    }
}

/// Height and solid surface of one world column, if it has data.
fn column(
    chunk: &ChunkData,
    lookup: Option<&ColumnLookup<'_>>,
    world_x: i32,
    world_z: i32,
) -> Option<(i32, VoxelType)> {
    let (origin_x, origin_z) = chunk.world_origin();
    let (lx, lz) = (world_x.saturating_sub(origin_x), world_z.saturating_sub(origin_z));
    if ChunkData::contains_column(lx, lz) {
        let height = chunk.solid_height_at(lx, lz);
        return (height >= 0).then(|| (height, chunk.solid_surface_type(lx, lz)));
    }
    let lookup = lookup?;
    let height = (lookup.height)(world_x, world_z);
    (height >= 0).then(|| (height, (lookup.surface)(world_x, world_z)))
}

/// Builds smooth terrain meshes for single chunks.
pub struct SmoothTerrainBuilder;

impl SmoothTerrainBuilder {
    /// Meshes `chunk` at the given vertex stride.
    ///
    /// `lod_step` should be one of [`LOD_STEPS`]; any other value is rounded
    /// down to the nearest supported step. The result holds the terrain in
    /// [`Submesh::Opaque`] followed by the water sheet in
    /// [`Submesh::Transparent`].
    pub fn build(
        chunk: &ChunkData,
        lod_step: usize,
        lookup: Option<&ColumnLookup<'_>>,
    ) -> MeshData {
        let step = supported_step(lod_step);
        let mut terrain = Self::build_surface(chunk, step, lookup);
        let water = Self::build_water(chunk, step, &terrain);
        terrain.append(water);
        terrain
    }

    /// Vertices per grid side at `step`.
    pub fn vertices_per_side(lod_step: usize) -> usize {
        CHUNK_WIDTH / supported_step(lod_step) + 1
    }

    fn build_surface(
        chunk: &ChunkData,
        step: usize,
        lookup: Option<&ColumnLookup<'_>>,
    ) -> MeshData {
        let side_x = CHUNK_WIDTH / step + 1;
        let side_z = CHUNK_DEPTH / step + 1;
        let s = step as i32;
        let (origin_x, origin_z) = chunk.world_origin();

        let mut mesh = MeshData::new();
        let count = side_x * side_z;
        mesh.positions.reserve(count);
        mesh.colors.reserve(count);
        mesh.normals.reserve(count);
        mesh.uvs.reserve(count);
        mesh.blend_weights.reserve(count);

        let height = |wx: i32, wz: i32| corner_sample(chunk, lookup, wx, wz).height;

        for j in 0..side_z as i32 {
            for i in 0..side_x as i32 {
                let (wx, wz) = (origin_x + i * s, origin_z + j * s);
                let sample = corner_sample(chunk, lookup, wx, wz);
                let normal = Vec3::new(
                    height(wx - s, wz) - height(wx + s, wz),
                    2.0 * s as f32,
                    height(wx, wz - s) - height(wx, wz + s),
                )
                .normalize();

                mesh.positions.push([wx as f32, sample.height, wz as f32]);
                mesh.colors.push(sample.color());
                mesh.normals.push(normal.to_array());
                mesh.uvs.push(world_uv(wx as f32, wz as f32));
                mesh.blend_weights.push(sample.weights);
            }
        }

        let index = |i: usize, j: usize| (j * side_x + i) as u32;
        mesh.opaque_indices.reserve((side_x - 1) * (side_z - 1) * 6);
        for j in 0..side_z - 1 {
            for i in 0..side_x - 1 {
                let v00 = index(i, j);
                let v10 = index(i + 1, j);
                let v01 = index(i, j + 1);
                let v11 = index(i + 1, j + 1);
                mesh.push_triangle(Submesh::Opaque, v00, v01, v11);
                mesh.push_triangle(Submesh::Opaque, v00, v11, v10);
            }
        }

        mesh
    }

    /// Water quads for every surface cell with a corner under the waterline.
    fn build_water(chunk: &ChunkData, step: usize, surface: &MeshData) -> MeshData {
        let side_x = CHUNK_WIDTH / step + 1;
        let side_z = CHUNK_DEPTH / step + 1;
        let s = step as f32;
        let water_y = SEA_LEVEL as f32 + WATER_SURFACE_OFFSET;
        let (origin_x, origin_z) = chunk.world_origin();

        let corner_height = |i: usize, j: usize| surface.positions[j * side_x + i][1];

        let mut water = MeshData::new();
        for j in 0..side_z - 1 {
            for i in 0..side_x - 1 {
                let flooded = [(i, j), (i + 1, j), (i, j + 1), (i + 1, j + 1)]
                    .into_iter()
                    .any(|(ci, cj)| corner_height(ci, cj) < water_y);
                if !flooded {
                    continue;
                }

                let x0 = origin_x as f32 + i as f32 * s;
                let z0 = origin_z as f32 + j as f32 * s;
                let (x1, z1) = (x0 + s, z0 + s);
                let base = water.positions.len() as u32;
                for (x, z) in [(x0, z0), (x0, z1), (x1, z1), (x1, z0)] {
                    water.positions.push([x, water_y, z]);
                    water.colors.push(WATER_COLOR);
                    water.normals.push([0.0, 1.0, 0.0]);
                    water.uvs.push(world_uv(x, z));
                    water.blend_weights.push([0.0; 4]);
                }
                water.push_triangle(Submesh::Transparent, base, base + 1, base + 2);
                water.push_triangle(Submesh::Transparent, base, base + 2, base + 3);
            }
        }
        water
    }
}

fn world_uv(x: f32, z: f32) -> [f32; 2] {
    [x * UV_TILING, z * UV_TILING]
}

/// Largest supported step not above `requested`, never below full detail.
fn supported_step(requested: usize) -> usize {
    LOD_STEPS
        .into_iter()
        .rev()
        .find(|&s| s <= requested)
        .unwrap_or(LOD_STEPS[0])
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use homestead_terrain::{Biome, TerrainGenerator};
    use homestead_voxel::{ChunkCoord, WorldSize};

    /// A chunk whose every column is solid up to `height` with `surface` on top.
    fn flat_chunk(coord: ChunkCoord, height: i32, surface: VoxelType) -> ChunkData {
        let mut chunk = ChunkData::new(coord);
        for z in 0..CHUNK_DEPTH as i32 {
            for x in 0..CHUNK_WIDTH as i32 {
                for y in 0..height {
                    chunk.set_block(x, y, z, VoxelType::Stone);
                }
                chunk.set_block(x, height, z, surface);
                for y in height + 1..=SEA_LEVEL {
                    chunk.set_block(x, y, z, VoxelType::Water);
                }
            }
        }
        chunk
    }

    /// Index of the terrain vertex at world `(x, z)`.
    fn vertex_at(mesh: &MeshData, step: usize, x: f32, z: f32) -> Option<usize> {
        let side = SmoothTerrainBuilder::vertices_per_side(step);
        (0..side * side).find(|&i| mesh.positions[i][0] == x && mesh.positions[i][2] == z)
    }

    #[test]
    fn test_vertex_and_triangle_counts_per_lod() {
        let chunk = flat_chunk(ChunkCoord::new(0, 0), 80, VoxelType::Grass);
        for (step, side, triangles) in [(1, 17, 512), (2, 9, 128), (4, 5, 32)] {
            let mesh = SmoothTerrainBuilder::build(&chunk, step, None);
            assert_eq!(mesh.vertex_count(), side * side, "step {step}");
            assert_eq!(mesh.submesh_triangle_count(Submesh::Opaque), triangles, "step {step}");
            assert_eq!(mesh.submesh_triangle_count(Submesh::Transparent), 0);
        }
    }

    #[test]
    fn test_unsupported_step_rounds_down() {
        let chunk = flat_chunk(ChunkCoord::new(0, 0), 80, VoxelType::Grass);
        assert_eq!(
            SmoothTerrainBuilder::build(&chunk, 3, None),
            SmoothTerrainBuilder::build(&chunk, 2, None)
        );
        assert_eq!(
            SmoothTerrainBuilder::build(&chunk, 0, None),
            SmoothTerrainBuilder::build(&chunk, 1, None)
        );
        assert_eq!(SmoothTerrainBuilder::vertices_per_side(8), 5);
    }

    #[test]
    fn test_flat_terrain_sits_on_block_tops_with_up_normals() {
        let chunk = flat_chunk(ChunkCoord::new(1, 2), 80, VoxelType::Grass);
        let height = |_: i32, _: i32| 80;
        let surface = |_: i32, _: i32| VoxelType::Grass;
        let lookup = ColumnLookup {
            height: &height,
            surface: &surface,
        };
        let mesh = SmoothTerrainBuilder::build(&chunk, 1, Some(&lookup));
        for (p, n) in mesh.positions.iter().zip(&mesh.normals) {
            assert_eq!(p[1], 81.0);
            assert_eq!(*n, [0.0, 1.0, 0.0]);
        }
    }

    #[test]
    fn test_positions_are_world_space() {
        let chunk = flat_chunk(ChunkCoord::new(2, 3), 80, VoxelType::Grass);
        let mesh = SmoothTerrainBuilder::build(&chunk, 4, None);
        assert_eq!(mesh.positions[0], [32.0, 81.0, 48.0]);
        assert_eq!(mesh.positions[24], [48.0, 81.0, 64.0]);
    }

    #[test]
    fn test_triangles_face_up() {
        let generator = TerrainGenerator::new(4, Biome::Mountains, WorldSize::new(2, 2));
        let chunk = generator.generate(ChunkCoord::new(0, 0));
        let mesh = SmoothTerrainBuilder::build(&chunk, 1, None);
        for tri in mesh.opaque_indices.chunks_exact(3) {
            let [a, b, c] =
                [tri[0], tri[1], tri[2]].map(|i| Vec3::from(mesh.positions[i as usize]));
            assert!((b - a).cross(c - a).y > 0.0);
        }
    }

    #[test]
    fn test_corner_sample_fallback_without_data() {
        let chunk = ChunkData::new(ChunkCoord::new(0, 0));
        let sample = corner_sample(&chunk, None, 4, 4);
        assert_eq!(sample.contributors, 0);
        assert_eq!(sample.height, (SEA_LEVEL + 1) as f32);
        assert_eq!(sample.weights, [1.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_corner_sample_at_extreme_coordinates() {
        let chunk = flat_chunk(ChunkCoord::new(2, -3), 70, VoxelType::Grass);
        for (wx, wz) in [(i32::MIN, i32::MIN), (i32::MAX, i32::MAX), (i32::MIN, i32::MAX)] {
            let sample = corner_sample(&chunk, None, wx, wz);
            assert_eq!(sample.contributors, 0);
            assert_eq!(sample.height, (SEA_LEVEL + 1) as f32);
        }
    }

    #[test]
    fn test_corner_sample_excludes_missing_columns() {
        let chunk = flat_chunk(ChunkCoord::new(0, 0), 70, VoxelType::Sand);
        // Outer corner of the chunk: only column (0, 0) has data.
        let sample = corner_sample(&chunk, None, 0, 0);
        assert_eq!(sample.contributors, 1);
        assert_eq!(sample.height, 71.0);
        assert_eq!(sample.weights, BlendCategory::Sand.weights());
    }

    #[test]
    fn test_corner_sample_mixes_heights_and_materials() {
        let mut chunk = flat_chunk(ChunkCoord::new(0, 0), 70, VoxelType::Grass);
        chunk.set_block(4, 71, 4, VoxelType::Stone);
        chunk.set_block(4, 72, 4, VoxelType::Stone);
        let sample = corner_sample(&chunk, None, 5, 5);
        assert_eq!(sample.contributors, 4);
        assert_eq!(sample.height, (70.0 * 3.0 + 72.0) / 4.0 + 1.0);
        assert_eq!(sample.weights, [0.75, 0.0, 0.25, 0.0]);
        assert!((sample.weights.iter().sum::<f32>() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_lookup_fills_columns_outside_chunk() {
        let chunk = flat_chunk(ChunkCoord::new(0, 0), 70, VoxelType::Grass);
        let height = |_: i32, _: i32| 74;
        let surface = |_: i32, _: i32| VoxelType::Dirt;
        let lookup = ColumnLookup {
            height: &height,
            surface: &surface,
        };
        let sample = corner_sample(&chunk, Some(&lookup), 0, 8);
        assert_eq!(sample.contributors, 4);
        assert_eq!(sample.height, 73.0);
        assert_eq!(sample.weights, [0.5, 0.5, 0.0, 0.0]);
    }

    #[test]
    fn test_lookup_negative_height_is_missing() {
        let chunk = flat_chunk(ChunkCoord::new(0, 0), 70, VoxelType::Grass);
        let height = |_: i32, _: i32| -1;
        let surface = |_: i32, _: i32| -> VoxelType { panic!("surface read for missing column") };
        let lookup = ColumnLookup {
            height: &height,
            surface: &surface,
        };
        let sample = corner_sample(&chunk, Some(&lookup), 0, 8);
        assert_eq!(sample.contributors, 2);
        assert_eq!(sample.height, 71.0);
    }

    #[test]
    fn test_seam_vertices_match_between_neighbours() {
        let generator = TerrainGenerator::new(99, Biome::Mountains, WorldSize::new(2, 2));
        let height = |x: i32, z: i32| generator.height_at(x, z);
        let surface = |x: i32, z: i32| generator.surface_material(x, z, generator.height_at(x, z));
        let lookup = ColumnLookup {
            height: &height,
            surface: &surface,
        };

        for step in LOD_STEPS {
            let left_chunk = generator.generate(ChunkCoord::new(0, 0));
            let right_chunk = generator.generate(ChunkCoord::new(1, 0));
            let left = SmoothTerrainBuilder::build(&left_chunk, step, Some(&lookup));
            let right = SmoothTerrainBuilder::build(&right_chunk, step, Some(&lookup));
            for z in (0..=16).step_by(step) {
                let z = z as f32;
                let l = vertex_at(&left, step, 16.0, z).unwrap();
                let r = vertex_at(&right, step, 16.0, z).unwrap();
                assert_eq!(left.positions[l], right.positions[r], "step {step} z {z}");
                assert_eq!(left.normals[l], right.normals[r], "step {step} z {z}");
                assert_eq!(left.colors[l], right.colors[r], "step {step} z {z}");
                assert_eq!(left.blend_weights[l], right.blend_weights[r], "step {step} z {z}");
            }
        }
    }

    #[test]
    fn test_normals_are_unit_length() {
        let generator = TerrainGenerator::new(12, Biome::Mountains, WorldSize::new(1, 1));
        let mesh = SmoothTerrainBuilder::build(&generator.generate(ChunkCoord::new(0, 0)), 2, None);
        for n in &mesh.normals {
            assert!((Vec3::from(*n).length() - 1.0).abs() < 1e-5);
            assert!(n[1] > 0.0);
        }
    }

    #[test]
    fn test_underwater_chunk_gets_water_sheet() {
        let chunk = flat_chunk(ChunkCoord::new(0, 0), 50, VoxelType::Sand);
        let mesh = SmoothTerrainBuilder::build(&chunk, 4, None);
        let terrain_vertices = 25;
        assert_eq!(mesh.vertex_count(), terrain_vertices + 16 * 4);
        assert_eq!(mesh.submesh_triangle_count(Submesh::Transparent), 32);
        assert!(mesh.transparent_indices.iter().all(|&i| i >= terrain_vertices as u32));

        let water_y = SEA_LEVEL as f32 + WATER_SURFACE_OFFSET;
        for i in terrain_vertices..mesh.vertex_count() {
            assert_eq!(mesh.positions[i][1], water_y);
            assert_eq!(mesh.normals[i], [0.0, 1.0, 0.0]);
            assert_eq!(mesh.colors[i], WATER_COLOR);
        }
    }

    #[test]
    fn test_uvs_follow_world_position() {
        let chunk = flat_chunk(ChunkCoord::new(1, 0), 50, VoxelType::Sand);
        let mesh = SmoothTerrainBuilder::build(&chunk, 2, None);
        for (p, uv) in mesh.positions.iter().zip(&mesh.uvs) {
            assert_eq!(*uv, [p[0] * UV_TILING, p[2] * UV_TILING]);
        }
    }

    #[test]
    fn test_partially_flooded_cells_only() {
        // West half under water, east half dry land.
        let mut chunk = flat_chunk(ChunkCoord::new(0, 0), 80, VoxelType::Grass);
        for z in 0..CHUNK_DEPTH as i32 {
            for x in 0..8 {
                for y in 51..=80 {
                    let ty = if y <= SEA_LEVEL { VoxelType::Water } else { VoxelType::Air };
                    chunk.set_block(x, y, z, ty);
                }
            }
        }
        let mesh = SmoothTerrainBuilder::build(&chunk, 1, None);
        // The corner at the cliff averages to 66, above the line, so only
        // cells 0..=7 of each row flood.
        let water_quads = mesh.submesh_triangle_count(Submesh::Transparent) / 2;
        assert_eq!(water_quads, 8 * 16);
    }
}

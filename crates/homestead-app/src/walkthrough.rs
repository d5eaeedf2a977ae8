//! Headless camera walk over a generated world.
//!
//! Stands in for a frame loop: the camera moves along the world diagonal at
//! a fixed tick rate, LOD is updated every tick, and one block is dug at the
//! centre. The resulting statistics are what the binary logs.

use std::time::Duration;

use glam::Vec3;
use homestead_lod::LodLevel;
use homestead_voxel::VoxelType;
use homestead_world::WorldManager;

/// Simulated time per tick.
pub const TICK: Duration = Duration::from_millis(100);

/// Height the camera flies at.
const CAMERA_HEIGHT: f32 = 120.0;

/// Vertex and triangle totals for the chunks at one LOD.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LodStats {
    pub chunks: usize,
    pub vertices: usize,
    pub triangles: usize,
}

/// Outcome of a walk.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WalkSummary {
    /// Chunk rebuilds caused by LOD changes over the whole walk.
    pub lod_rebuilds: usize,
    /// Chunks rebuilt by the dig, empty if there was nothing to dig.
    pub dig_rebuilt: usize,
    /// World position of the dug block.
    pub dug: Option<(i32, i32, i32)>,
    /// Per-LOD totals after the walk, indexed by [`LodLevel::index`].
    pub per_lod: [LodStats; 3],
}

impl WalkSummary {
    pub fn total_vertices(&self) -> usize {
        self.per_lod.iter().map(|s| s.vertices).sum()
    }

    pub fn total_triangles(&self) -> usize {
        self.per_lod.iter().map(|s| s.triangles).sum()
    }
}

/// Camera position after `tick` of `ticks` steps along the world diagonal.
pub fn camera_at(world: &WorldManager, tick: u32, ticks: u32) -> Vec3 {
    let size = world.size();
    let t = if ticks == 0 { 1.0 } else { tick as f32 / ticks as f32 };
    Vec3::new(
        t * size.width_blocks() as f32,
        CAMERA_HEIGHT,
        t * size.depth_blocks() as f32,
    )
}

/// Walks the camera for `ticks` steps, digs the surface block at the world
/// centre, and gathers mesh statistics.
pub fn run(world: &mut WorldManager, ticks: u32) -> WalkSummary {
    let mut summary = WalkSummary::default();

    world.check_lod(camera_at(world, 0, ticks));
    for tick in 1..=ticks {
        let camera = camera_at(world, tick, ticks);
        summary.lod_rebuilds += world.update_lod(camera, TICK);
    }

    let size = world.size();
    let (cx, cz) = (size.width_blocks() / 2, size.depth_blocks() / 2);
    let cy = world.height_at_world_pos(cx, cz);
    if cy >= 0 {
        let rebuilt = world.modify_block(cx, cy, cz, VoxelType::Air);
        summary.dig_rebuilt = rebuilt.len();
        summary.dug = Some((cx, cy, cz));
        tracing::info!(x = cx, y = cy, z = cz, rebuilt = rebuilt.len(), "dug centre block");
    }

    summary.per_lod = lod_stats(world);
    summary
}

/// Sums mesh sizes per LOD level.
pub fn lod_stats(world: &WorldManager) -> [LodStats; 3] {
    let mut stats = [LodStats::default(); 3];
    for (_, lod, mesh) in world.meshes() {
        let entry = &mut stats[lod.index() as usize];
        entry.chunks += 1;
        entry.vertices += mesh.vertex_count();
        entry.triangles += mesh.triangle_count();
    }
    stats
}

/// Logs a summary, one line per LOD level that has chunks.
pub fn log_summary(world: &WorldManager, summary: &WalkSummary) {
    tracing::info!(
        chunks = world.chunk_count(),
        renderer = %world.settings().renderer,
        lod_rebuilds = summary.lod_rebuilds,
        vertices = summary.total_vertices(),
        triangles = summary.total_triangles(),
        "walkthrough complete"
    );
    for level in LodLevel::ALL {
        let s = summary.per_lod[level.index() as usize];
        if s.chunks > 0 {
            tracing::info!(
                lod = %level,
                chunks = s.chunks,
                vertices = s.vertices,
                triangles = s.triangles,
                "mesh totals"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use homestead_voxel::WorldSize;
    use homestead_world::{TerrainRenderer, WorldSettings};

    fn world(renderer: TerrainRenderer) -> WorldManager {
        let mut settings = WorldSettings::default();
        settings.size = WorldSize::new(4, 4);
        settings.renderer = renderer;
        settings.generation_threads = 2;
        let mut world = WorldManager::new(settings).unwrap();
        world.generate().unwrap();
        world
    }

    #[test]
    fn test_camera_walks_the_diagonal() {
        let w = world(TerrainRenderer::Smooth);
        assert_eq!(camera_at(&w, 0, 10), Vec3::new(0.0, CAMERA_HEIGHT, 0.0));
        assert_eq!(camera_at(&w, 10, 10), Vec3::new(64.0, CAMERA_HEIGHT, 64.0));
        assert_eq!(camera_at(&w, 5, 10), Vec3::new(32.0, CAMERA_HEIGHT, 32.0));
    }

    #[test]
    fn test_run_digs_centre_column() {
        let mut w = world(TerrainRenderer::Smooth);
        let before = w.height_at_world_pos(32, 32);
        let summary = run(&mut w, 20);

        assert_eq!(summary.dug, Some((32, before, 32)));
        assert_eq!(w.height_at_world_pos(32, 32), before - 1);
        // (32, 32) is a corner of four chunks.
        assert_eq!(summary.dig_rebuilt, 4);
    }

    #[test]
    fn test_stats_cover_every_chunk() {
        let mut w = world(TerrainRenderer::Smooth);
        let summary = run(&mut w, 20);
        let chunks: usize = summary.per_lod.iter().map(|s| s.chunks).sum();
        assert_eq!(chunks, 16);
        assert!(summary.total_triangles() > 0);
        // The camera ends at the far corner, so that chunk is at full detail.
        assert!(summary.per_lod[LodLevel::Full.index() as usize].chunks >= 1);
    }

    #[test]
    fn test_blocky_ignores_lod_counts() {
        let mut w = world(TerrainRenderer::Blocky);
        let summary = run(&mut w, 10);
        let full = summary.per_lod[LodLevel::Full.index() as usize];
        assert!(full.vertices > 0);
        assert_eq!(full.vertices % 4, 0);
    }
}

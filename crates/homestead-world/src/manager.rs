//! The world context object.
//!
//! A [`WorldManager`] owns every chunk of a fixed-size grid plus the derived
//! per-chunk state: the current mesh, its LOD level and a rebuild counter.
//! The world is built in two phases. First all chunk data is generated,
//! then every chunk is meshed against the finished map, because a smooth
//! mesh samples columns of its neighbours.

use std::time::{Duration, Instant};

use glam::Vec3;
use homestead_config::Config;
use homestead_lod::{LodCheckTimer, LodLevel, LodSelector, chunk_distance};
use homestead_mesh::{
    ChunkMeshBuilder, ColumnLookup, MeshData, MeshInvalidator, SmoothTerrainBuilder, corner_sample,
};
use homestead_terrain::{SEA_LEVEL, TerrainGenerator, default_thread_count, generate_chunks};
use homestead_voxel::{
    CHUNK_HEIGHT, ChunkCoord, ChunkData, ChunkMap, VoxelType, WorldSize, world_to_chunk,
};
use rustc_hash::FxHashSet;
use tracing::{debug, info};

use crate::error::WorldError;
use crate::settings::{TerrainRenderer, WorldSettings};

/// Owner of all chunk data, meshes and LOD state for one world.
///
/// Queries never fail: positions outside the world answer with a sentinel
/// (Air, or −1 for heights). All mutation goes through `&mut self`.
pub struct WorldManager {
    settings: WorldSettings,
    generator: TerrainGenerator,
    chunks: ChunkMap<ChunkData>,
    meshes: ChunkMap<MeshData>,
    lods: ChunkMap<LodLevel>,
    rebuild_counts: ChunkMap<u32>,
    /// Coordinates whose mesh changed since the last drain, in first-change order.
    rebuilt: Vec<ChunkCoord>,
    rebuilt_set: FxHashSet<ChunkCoord>,
    selector: LodSelector,
    lod_timer: LodCheckTimer,
}

impl WorldManager {
    /// Validates `settings` and prepares an empty world.
    ///
    /// No chunk exists until [`generate`](Self::generate) runs.
    pub fn new(settings: WorldSettings) -> Result<Self, WorldError> {
        settings.validate()?;
        let generator = TerrainGenerator::with_params(
            settings.seed,
            settings.biome,
            settings.size,
            settings.noise.clone(),
        );
        Ok(Self {
            selector: LodSelector::new(settings.lod_thresholds),
            lod_timer: LodCheckTimer::new(settings.lod_check_interval),
            generator,
            settings,
            chunks: ChunkMap::default(),
            meshes: ChunkMap::default(),
            lods: ChunkMap::default(),
            rebuild_counts: ChunkMap::default(),
            rebuilt: Vec::new(),
            rebuilt_set: FxHashSet::default(),
        })
    }

    /// Builds settings from a loaded config and prepares the world.
    pub fn from_config(config: &Config) -> Result<Self, WorldError> {
        Self::new(WorldSettings::from_config(config)?)
    }

    /// Generates every chunk, then meshes every chunk at full detail.
    ///
    /// Calling this again discards all edits and LOD state and rebuilds the
    /// world from the seed.
    pub fn generate(&mut self) -> Result<(), WorldError> {
        let size = self.settings.size;
        let coords: Vec<ChunkCoord> = size.coords().collect();
        let threads = match self.settings.generation_threads {
            0 => default_thread_count(),
            n => n,
        };
        info!(
            seed = self.settings.seed,
            biome = %self.settings.biome,
            renderer = %self.settings.renderer,
            chunks_x = size.chunks_x,
            chunks_z = size.chunks_z,
            threads,
            "building world"
        );

        self.chunks.clear();
        self.meshes.clear();
        self.lods.clear();
        self.rebuild_counts.clear();
        self.rebuilt.clear();
        self.rebuilt_set.clear();

        let start = Instant::now();
        let data = generate_chunks(&self.generator, &coords, threads)?;
        for chunk in data {
            self.lods.insert(chunk.coord(), LodLevel::Full);
            self.chunks.insert(chunk.coord(), chunk);
        }
        let data_ms = start.elapsed().as_millis() as u64;
        info!(chunks = self.chunks.len(), elapsed_ms = data_ms, "generated chunk data");

        let start = Instant::now();
        let meshes = self.mesh_all(&coords, threads)?;
        let mut vertices = 0;
        for (coord, mesh) in meshes {
            vertices += mesh.vertex_count();
            self.install_mesh(coord, mesh);
        }
        info!(
            meshes = self.meshes.len(),
            vertices,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "built chunk meshes"
        );
        Ok(())
    }

    /// Meshes `coords` on up to `threads` scoped workers against the current
    /// chunk map.
    fn mesh_all(
        &self,
        coords: &[ChunkCoord],
        threads: usize,
    ) -> Result<Vec<(ChunkCoord, MeshData)>, WorldError> {
        let workers = threads.clamp(1, coords.len().max(1));
        if workers == 1 {
            return Ok(coords
                .iter()
                .filter_map(|&c| self.build_mesh(c).map(|m| (c, m)))
                .collect());
        }

        let per_worker = coords.len().div_ceil(workers);
        std::thread::scope(|scope| -> Result<_, WorldError> {
            let mut handles = Vec::with_capacity(workers);
            for (i, batch) in coords.chunks(per_worker).enumerate() {
                let handle = std::thread::Builder::new()
                    .name(format!("chunk-mesh-{i}"))
                    .spawn_scoped(scope, move || {
                        batch
                            .iter()
                            .filter_map(|&c| self.build_mesh(c).map(|m| (c, m)))
                            .collect::<Vec<_>>()
                    })
                    .map_err(WorldError::MeshWorkerSpawn)?;
                handles.push(handle);
            }

            let mut meshes = Vec::with_capacity(coords.len());
            for handle in handles {
                match handle.join() {
                    Ok(batch) => meshes.extend(batch),
                    Err(panic) => std::panic::resume_unwind(panic),
                }
            }
            Ok(meshes)
        })
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// Block at a world position; Air outside the world or its height range.
    pub fn block_at_world_pos(&self, world_x: i32, world_y: i32, world_z: i32) -> VoxelType {
        let (coord, lx, lz) = world_to_chunk(world_x, world_z);
        self.chunks
            .get(&coord)
            .map_or(VoxelType::Air, |c| c.get_block(lx, world_y, lz))
    }

    /// Highest non-Air block of a column (water included), or −1.
    pub fn height_at_world_pos(&self, world_x: i32, world_z: i32) -> i32 {
        self.with_column(world_x, world_z, -1, |c, x, z| c.height_at(x, z))
    }

    /// Block at [`height_at_world_pos`](Self::height_at_world_pos), or Air.
    pub fn surface_type_at_world_pos(&self, world_x: i32, world_z: i32) -> VoxelType {
        self.with_column(world_x, world_z, VoxelType::Air, |c, x, z| c.surface_type(x, z))
    }

    /// Highest solid block of a column, skipping water, or −1.
    pub fn solid_height_at_world_pos(&self, world_x: i32, world_z: i32) -> i32 {
        self.with_column(world_x, world_z, -1, |c, x, z| c.solid_height_at(x, z))
    }

    /// Block at [`solid_height_at_world_pos`](Self::solid_height_at_world_pos), or Air.
    pub fn solid_surface_type_at_world_pos(&self, world_x: i32, world_z: i32) -> VoxelType {
        self.with_column(world_x, world_z, VoxelType::Air, |c, x, z| c.solid_surface_type(x, z))
    }

    /// Height of the smooth terrain surface at a fractional world position.
    ///
    /// Bilinearly interpolates the four surrounding corner heights, so at
    /// integer positions it matches the full-detail smooth mesh exactly.
    /// Outside the world it settles to the `SEA_LEVEL + 1` fallback.
    pub fn smoothed_height_at_world_pos(&self, x: f32, z: f32) -> f32 {
        let (fx, fz) = (x.floor(), z.floor());
        // Corners more than one block past the border have no data in reach.
        let width = self.settings.size.width_blocks() as f32;
        let depth = self.settings.size.depth_blocks() as f32;
        let near_world =
            (-2.0..=width + 1.0).contains(&fx) && (-2.0..=depth + 1.0).contains(&fz);
        if !near_world {
            return (SEA_LEVEL + 1) as f32;
        }
        let (x0, z0) = (fx as i32, fz as i32);
        let (tx, tz) = (x - fx, z - fz);

        let h00 = self.corner_height(x0, z0);
        let h10 = self.corner_height(x0 + 1, z0);
        let h01 = self.corner_height(x0, z0 + 1);
        let h11 = self.corner_height(x0 + 1, z0 + 1);

        let near = h00 + (h10 - h00) * tx;
        let far = h01 + (h11 - h01) * tx;
        near + (far - near) * tz
    }

    fn corner_height(&self, world_x: i32, world_z: i32) -> f32 {
        let (coord, _, _) = world_to_chunk(world_x, world_z);
        let size = self.settings.size;
        let clamped = ChunkCoord::new(
            coord.x.clamp(0, size.chunks_x as i32 - 1),
            coord.z.clamp(0, size.chunks_z as i32 - 1),
        );
        let Some(chunk) = self.chunks.get(&clamped) else {
            return (SEA_LEVEL + 1) as f32;
        };
        self.with_column_lookup(|lookup| {
            corner_sample(chunk, Some(lookup), world_x, world_z).height
        })
    }

    fn with_column<T>(
        &self,
        world_x: i32,
        world_z: i32,
        miss: T,
        f: impl FnOnce(&ChunkData, i32, i32) -> T,
    ) -> T {
        let (coord, lx, lz) = world_to_chunk(world_x, world_z);
        match self.chunks.get(&coord) {
            Some(chunk) => f(chunk, lx, lz),
            None => miss,
        }
    }

    /// Runs `f` with a column lookup backed by this world.
    fn with_column_lookup<T>(&self, f: impl FnOnce(&ColumnLookup<'_>) -> T) -> T {
        let height = |x: i32, z: i32| self.solid_height_at_world_pos(x, z);
        let surface = |x: i32, z: i32| self.solid_surface_type_at_world_pos(x, z);
        f(&ColumnLookup {
            height: &height,
            surface: &surface,
        })
    }

    // -----------------------------------------------------------------------
    // Commands
    // -----------------------------------------------------------------------

    /// Sets one block and rebuilds every mesh that depends on it.
    ///
    /// Returns the chunks that were rebuilt, the edited chunk first. Edits
    /// outside the world or its height range are ignored and return nothing.
    pub fn modify_block(
        &mut self,
        world_x: i32,
        world_y: i32,
        world_z: i32,
        voxel: VoxelType,
    ) -> Vec<ChunkCoord> {
        if !(0..CHUNK_HEIGHT as i32).contains(&world_y) {
            return Vec::new();
        }
        let (coord, lx, lz) = world_to_chunk(world_x, world_z);
        let Some(chunk) = self.chunks.get_mut(&coord) else {
            return Vec::new();
        };
        chunk.set_block(lx, world_y, lz, voxel);

        let reach = self.settings.renderer.edit_reach();
        let dirty: Vec<ChunkCoord> = MeshInvalidator::invalidate(coord, lx, lz, reach)
            .into_iter()
            .filter(|c| self.chunks.contains_key(c))
            .collect();
        for &c in &dirty {
            self.rebuild(c);
        }
        debug!(
            x = world_x,
            y = world_y,
            z = world_z,
            %voxel,
            rebuilt = dirty.len(),
            "block modified"
        );
        dirty
    }

    /// Advances the LOD throttle by `elapsed` and re-evaluates LOD when due.
    ///
    /// Returns the number of chunks rebuilt.
    pub fn update_lod(&mut self, camera: Vec3, elapsed: Duration) -> usize {
        if self.lod_timer.tick(elapsed) {
            self.check_lod(camera)
        } else {
            0
        }
    }

    /// Assigns every chunk the LOD its distance from `camera` calls for,
    /// rebuilding only chunks whose level changed.
    pub fn check_lod(&mut self, camera: Vec3) -> usize {
        let mut changed = 0;
        for coord in self.settings.size.coords() {
            let level = self.selector.select(chunk_distance(coord, camera));
            if self.set_chunk_lod(coord, level) {
                changed += 1;
            }
        }
        if changed > 0 {
            debug!(changed, camera = ?camera, "LOD check rebuilt chunks");
        }
        changed
    }

    /// Moves one chunk to `level` and rebuilds its mesh.
    ///
    /// Returns `false` without rebuilding when the chunk does not exist or is
    /// already at that level.
    pub fn set_chunk_lod(&mut self, coord: ChunkCoord, level: LodLevel) -> bool {
        match self.lods.get(&coord) {
            Some(&current) if current != level => {
                self.lods.insert(coord, level);
                self.rebuild(coord);
                debug!(%coord, from = %current, to = %level, "chunk LOD changed");
                true
            }
            _ => false,
        }
    }

    fn rebuild(&mut self, coord: ChunkCoord) {
        if let Some(mesh) = self.build_mesh(coord) {
            self.install_mesh(coord, mesh);
        }
    }

    fn install_mesh(&mut self, coord: ChunkCoord, mesh: MeshData) {
        self.meshes.insert(coord, mesh);
        *self.rebuild_counts.entry(coord).or_insert(0) += 1;
        if self.rebuilt_set.insert(coord) {
            self.rebuilt.push(coord);
        }
    }

    fn build_mesh(&self, coord: ChunkCoord) -> Option<MeshData> {
        let chunk = self.chunks.get(&coord)?;
        let mesh = match self.settings.renderer {
            TerrainRenderer::Smooth => {
                let step = self.lods.get(&coord).copied().unwrap_or_default().step();
                self.with_column_lookup(|lookup| {
                    SmoothTerrainBuilder::build(chunk, step, Some(lookup))
                })
            }
            TerrainRenderer::Blocky => {
                let lookup = |x: i32, y: i32, z: i32| self.block_at_world_pos(x, y, z);
                ChunkMeshBuilder::build(chunk, Some(&lookup))
            }
        };
        Some(mesh)
    }

    // -----------------------------------------------------------------------
    // Observability
    // -----------------------------------------------------------------------

    /// Chunk data at `coord`.
    pub fn chunk(&self, coord: ChunkCoord) -> Option<&ChunkData> {
        self.chunks.get(&coord)
    }

    /// Current mesh of the chunk at `coord`.
    pub fn chunk_mesh(&self, coord: ChunkCoord) -> Option<&MeshData> {
        self.meshes.get(&coord)
    }

    /// Current LOD of the chunk at `coord`.
    pub fn chunk_lod(&self, coord: ChunkCoord) -> Option<LodLevel> {
        self.lods.get(&coord).copied()
    }

    /// Number of times the chunk's mesh has been built, the initial build
    /// included.
    pub fn rebuild_count(&self, coord: ChunkCoord) -> u32 {
        self.rebuild_counts.get(&coord).copied().unwrap_or(0)
    }

    /// Takes the coordinates whose mesh changed since the previous call.
    pub fn drain_rebuilt(&mut self) -> Vec<ChunkCoord> {
        self.rebuilt_set.clear();
        std::mem::take(&mut self.rebuilt)
    }

    /// Number of chunks with data.
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// World size in chunks.
    pub fn size(&self) -> WorldSize {
        self.settings.size
    }

    /// The generator the world was built with.
    pub fn generator(&self) -> &TerrainGenerator {
        &self.generator
    }

    /// Settings the world was built with.
    pub fn settings(&self) -> &WorldSettings {
        &self.settings
    }

    /// Iterates over every chunk mesh with its coordinate and LOD.
    pub fn meshes(&self) -> impl Iterator<Item = (ChunkCoord, LodLevel, &MeshData)> {
        self.meshes.iter().map(|(&coord, mesh)| {
            let lod = self.lods.get(&coord).copied().unwrap_or_default();
            (coord, lod, mesh)
        })
    }
}

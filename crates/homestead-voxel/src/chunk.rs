//! Fixed-size 16×16×256 block column for one cell of the chunk grid.
//!
//! Blocks live in one flat byte-per-block array indexed
//! `x + z * WIDTH + y * WIDTH * DEPTH`, so a horizontal layer is contiguous.
//! Every accessor is bounds-checked: reads outside the chunk return Air and
//! writes outside the chunk are dropped.

use crate::coords::ChunkCoord;
use crate::voxel::VoxelType;

/// Chunk extent along X, in blocks.
pub const CHUNK_WIDTH: usize = 16;

/// Chunk extent along Z, in blocks.
pub const CHUNK_DEPTH: usize = 16;

/// Chunk extent along Y, in blocks.
pub const CHUNK_HEIGHT: usize = 256;

/// Number of blocks in a chunk (16 × 16 × 256).
pub const CHUNK_VOLUME: usize = CHUNK_WIDTH * CHUNK_DEPTH * CHUNK_HEIGHT;

/// Block storage for one chunk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChunkData {
    coord: ChunkCoord,
    blocks: Box<[VoxelType]>,
}

impl ChunkData {
    /// Creates an all-Air chunk at the given grid coordinate.
    pub fn new(coord: ChunkCoord) -> Self {
        Self {
            coord,
            blocks: vec![VoxelType::Air; CHUNK_VOLUME].into_boxed_slice(),
        }
    }

    /// Grid coordinate of this chunk.
    pub fn coord(&self) -> ChunkCoord {
        self.coord
    }

    /// World block coordinate of local column `(0, 0)`.
    pub fn world_origin(&self) -> (i32, i32) {
        self.coord.world_origin()
    }

    /// Returns the block at a local position, or Air outside the chunk.
    pub fn get_block(&self, x: i32, y: i32, z: i32) -> VoxelType {
        match Self::index(x, y, z) {
            Some(i) => self.blocks[i],
            None => VoxelType::Air,
        }
    }

    /// Overwrites the block at a local position. Out-of-range writes are ignored.
    pub fn set_block(&mut self, x: i32, y: i32, z: i32, voxel: VoxelType) {
        if let Some(i) = Self::index(x, y, z) {
            self.blocks[i] = voxel;
        }
    }

    /// Y of the topmost non-Air block in a column, or `-1` for an empty
    /// (or out-of-range) column.
    pub fn height_at(&self, x: i32, z: i32) -> i32 {
        self.top_matching(x, z, |v| !v.is_air())
    }

    /// Block type at [`height_at`](Self::height_at), or Air for an empty column.
    pub fn surface_type(&self, x: i32, z: i32) -> VoxelType {
        match self.height_at(x, z) {
            -1 => VoxelType::Air,
            y => self.get_block(x, y, z),
        }
    }

    /// Y of the topmost solid block in a column, looking through water.
    /// Returns `-1` if the column holds nothing solid.
    pub fn solid_height_at(&self, x: i32, z: i32) -> i32 {
        self.top_matching(x, z, VoxelType::is_solid)
    }

    /// Block type at [`solid_height_at`](Self::solid_height_at), or Air.
    pub fn solid_surface_type(&self, x: i32, z: i32) -> VoxelType {
        match self.solid_height_at(x, z) {
            -1 => VoxelType::Air,
            y => self.get_block(x, y, z),
        }
    }

    /// Number of blocks of the given type.
    pub fn count(&self, voxel: VoxelType) -> usize {
        self.blocks.iter().filter(|&&v| v == voxel).count()
    }

    /// Raw block bytes in storage order.
    pub fn as_bytes(&self) -> Vec<u8> {
        self.blocks.iter().map(|v| v.as_u8()).collect()
    }

    /// Returns `true` if `(x, z)` names a column of this chunk.
    pub fn contains_column(x: i32, z: i32) -> bool {
        (0..CHUNK_WIDTH as i32).contains(&x) && (0..CHUNK_DEPTH as i32).contains(&z)
    }

    fn top_matching(&self, x: i32, z: i32, pred: impl Fn(VoxelType) -> bool) -> i32 {
        if !Self::contains_column(x, z) {
            return -1;
        }
        (0..CHUNK_HEIGHT as i32)
            .rev()
            .find(|&y| pred(self.get_block(x, y, z)))
            .unwrap_or(-1)
    }

    /// Linear index for a local position, `None` if any axis is out of range.
    fn index(x: i32, y: i32, z: i32) -> Option<usize> {
        if !Self::contains_column(x, z) || !(0..CHUNK_HEIGHT as i32).contains(&y) {
            return None;
        }
        let (x, y, z) = (x as usize, y as usize, z as usize);
        Some(x + z * CHUNK_WIDTH + y * CHUNK_WIDTH * CHUNK_DEPTH)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

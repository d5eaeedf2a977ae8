//! Chunk-grid addressing and world ↔ chunk coordinate conversion.
//!
//! The world is a single horizontal layer of chunks, so a chunk is identified
//! by a 2D grid coordinate. World block coordinates convert to chunk and local
//! coordinates by floor division, which keeps negative coordinates on the
//! correct side of the origin.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::chunk::{CHUNK_DEPTH, CHUNK_WIDTH};

/// Map keyed by chunk coordinate, using `FxHash` for the small fixed-size keys.
pub type ChunkMap<T> = FxHashMap<ChunkCoord, T>;

/// Position of a chunk in the world's chunk grid (not in blocks).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChunkCoord {
    /// Grid X coordinate.
    pub x: i32,
    /// Grid Z coordinate.
    pub z: i32,
}

impl ChunkCoord {
    /// Creates a new chunk coordinate.
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Returns the coordinate offset by `(dx, dz)` chunks.
    pub fn offset(self, dx: i32, dz: i32) -> Self {
        Self {
            x: self.x + dx,
            z: self.z + dz,
        }
    }

    /// World block coordinate of this chunk's `(0, 0)` column.
    pub fn world_origin(self) -> (i32, i32) {
        (self.x * CHUNK_WIDTH as i32, self.z * CHUNK_DEPTH as i32)
    }

    /// Centre of the chunk in chunk units (e.g. `(2.5, 3.5)` for chunk `(2, 3)`).
    pub fn center(self) -> (f32, f32) {
        (self.x as f32 + 0.5, self.z as f32 + 0.5)
    }

    /// The four edge-adjacent neighbours in `-X, +X, -Z, +Z` order.
    pub fn edge_neighbors(self) -> [ChunkCoord; 4] {
        [
            self.offset(-1, 0),
            self.offset(1, 0),
            self.offset(0, -1),
            self.offset(0, 1),
        ]
    }
}

impl std::fmt::Display for ChunkCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.z)
    }
}

/// Splits a world column coordinate into its owning chunk and the local
/// `(x, z)` inside that chunk.
pub fn world_to_chunk(world_x: i32, world_z: i32) -> (ChunkCoord, i32, i32) {
    let w = CHUNK_WIDTH as i32;
    let d = CHUNK_DEPTH as i32;
    (
        ChunkCoord::new(world_x.div_euclid(w), world_z.div_euclid(d)),
        world_x.rem_euclid(w),
        world_z.rem_euclid(d),
    )
}

/// Size of the fixed world grid, in chunks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorldSize {
    /// Number of chunks along X.
    pub chunks_x: u32,
    /// Number of chunks along Z.
    pub chunks_z: u32,
}

impl WorldSize {
    /// Creates a world size.
    pub const fn new(chunks_x: u32, chunks_z: u32) -> Self {
        Self { chunks_x, chunks_z }
    }

    /// Returns `true` if the grid holds no chunks.
    pub fn is_empty(&self) -> bool {
        self.chunks_x == 0 || self.chunks_z == 0
    }

    /// Total number of chunks.
    pub fn chunk_count(&self) -> usize {
        self.chunks_x as usize * self.chunks_z as usize
    }

    /// World width in blocks.
    pub fn width_blocks(&self) -> i32 {
        self.chunks_x as i32 * CHUNK_WIDTH as i32
    }

    /// World depth in blocks.
    pub fn depth_blocks(&self) -> i32 {
        self.chunks_z as i32 * CHUNK_DEPTH as i32
    }

    /// Returns `true` if `coord` lies inside the grid.
    pub fn contains(&self, coord: ChunkCoord) -> bool {
        coord.x >= 0
            && coord.z >= 0
            && (coord.x as u32) < self.chunks_x
            && (coord.z as u32) < self.chunks_z
    }

    /// Iterates every chunk coordinate, X varying fastest.
    pub fn coords(&self) -> impl Iterator<Item = ChunkCoord> + use<> {
        let (cx, cz) = (self.chunks_x as i32, self.chunks_z as i32);
        (0..cz).flat_map(move |z| (0..cx).map(move |x| ChunkCoord::new(x, z)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_world_to_chunk_positive() {
        assert_eq!(world_to_chunk(0, 0), (ChunkCoord::new(0, 0), 0, 0));
        assert_eq!(world_to_chunk(17, 35), (ChunkCoord::new(1, 2), 1, 3));
        assert_eq!(world_to_chunk(15, 16), (ChunkCoord::new(0, 1), 15, 0));
    }

    #[test]
    fn test_world_to_chunk_negative_uses_floor_division() {
        assert_eq!(world_to_chunk(-1, -1), (ChunkCoord::new(-1, -1), 15, 15));
        assert_eq!(world_to_chunk(-16, -17), (ChunkCoord::new(-1, -2), 0, 15));
    }

    #[test]
    fn test_world_origin_inverts_world_to_chunk() {
        let coord = ChunkCoord::new(3, -2);
        let (ox, oz) = coord.world_origin();
        assert_eq!(world_to_chunk(ox, oz), (coord, 0, 0));
    }

    #[test]
    fn test_world_size_contains_and_counts() {
        let size = WorldSize::new(8, 4);
        assert_eq!(size.chunk_count(), 32);
        assert_eq!(size.width_blocks(), 128);
        assert_eq!(size.depth_blocks(), 64);
        assert!(size.contains(ChunkCoord::new(7, 3)));
        assert!(!size.contains(ChunkCoord::new(8, 0)));
        assert!(!size.contains(ChunkCoord::new(-1, 0)));
        assert_eq!(size.coords().count(), 32);
        assert!(WorldSize::new(0, 5).is_empty());
    }

    #[test]
    fn test_edge_neighbors() {
        let n = ChunkCoord::new(2, 3).edge_neighbors();
        assert_eq!(
            n,
            [
                ChunkCoord::new(1, 3),
                ChunkCoord::new(3, 3),
                ChunkCoord::new(2, 2),
                ChunkCoord::new(2, 4)
            ]
        );
    }
}

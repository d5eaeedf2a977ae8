//! Determines which chunk meshes go stale after a block edit.

use homestead_voxel::{CHUNK_DEPTH, CHUNK_WIDTH, ChunkCoord};

/// Determines which chunks need remeshing after a voxel edit.
pub struct MeshInvalidator;

impl MeshInvalidator {
    /// Returns the chunks whose meshes depend on the column at
    /// `(local_x, local_z)` of `edited_chunk`.
    ///
    /// The edited chunk always comes first. A neighbour is added when the
    /// column lies within `reach` columns of their shared edge, and the
    /// diagonal neighbour when that holds on both axes. A `reach` of 1 means
    /// only edge columns affect neighbours (face culling); smooth meshes read
    /// further across the border for their normals.
    ///
    /// Coordinates are not checked against the world bounds.
    pub fn invalidate(
        edited_chunk: ChunkCoord,
        local_x: i32,
        local_z: i32,
        reach: i32,
    ) -> Vec<ChunkCoord> {
        let dx = edge_side(local_x, CHUNK_WIDTH as i32, reach);
        let dz = edge_side(local_z, CHUNK_DEPTH as i32, reach);

        let mut dirty = vec![edited_chunk];
        for &sx in &dx {
            dirty.push(edited_chunk.offset(sx, 0));
        }
        for &sz in &dz {
            dirty.push(edited_chunk.offset(0, sz));
        }
        for &sx in &dx {
            for &sz in &dz {
                dirty.push(edited_chunk.offset(sx, sz));
            }
        }
        dirty
    }
}

/// Neighbour directions (`-1`, `+1`) along one axis that a column at `local`
/// reaches into. Both sides can apply when `reach` spans the whole chunk.
fn edge_side(local: i32, size: i32, reach: i32) -> Vec<i32> {
    let mut sides = Vec::with_capacity(2);
    if local < reach {
        sides.push(-1);
    }
    if local >= size - reach {
        sides.push(1);
    }
    sides
}

#[cfg(test)]
mod tests {
    use super::*;

    fn origin() -> ChunkCoord {
        ChunkCoord::new(0, 0)
    }

    /// Changing a block should invalidate the chunk's own mesh.
    #[test]
    fn test_edit_invalidates_own_mesh_first() {
        let dirty = MeshInvalidator::invalidate(origin(), 8, 8, 1);
        assert_eq!(dirty, vec![origin()]);
    }

    #[test]
    fn test_edge_edit_invalidates_neighbor() {
        let pos = ChunkCoord::new(2, 3);
        let dirty = MeshInvalidator::invalidate(pos, 0, 5, 1);
        assert_eq!(dirty, vec![pos, ChunkCoord::new(1, 3)]);

        let dirty = MeshInvalidator::invalidate(pos, 15, 5, 1);
        assert_eq!(dirty, vec![pos, ChunkCoord::new(3, 3)]);

        let dirty = MeshInvalidator::invalidate(pos, 7, 15, 1);
        assert_eq!(dirty, vec![pos, ChunkCoord::new(2, 4)]);
    }

    #[test]
    fn test_corner_edit_includes_diagonal() {
        let pos = origin();
        let dirty = MeshInvalidator::invalidate(pos, 0, 0, 1);
        assert_eq!(dirty.len(), 4);
        assert!(dirty.contains(&pos.offset(-1, 0)));
        assert!(dirty.contains(&pos.offset(0, -1)));
        assert!(dirty.contains(&pos.offset(-1, -1)));

        let dirty = MeshInvalidator::invalidate(pos, 15, 0, 1);
        assert!(dirty.contains(&pos.offset(1, -1)));
    }

    #[test]
    fn test_wider_reach_pulls_in_near_edge_columns() {
        let pos = origin();
        assert_eq!(MeshInvalidator::invalidate(pos, 3, 8, 1).len(), 1);
        let dirty = MeshInvalidator::invalidate(pos, 3, 8, 5);
        assert_eq!(dirty, vec![pos, pos.offset(-1, 0)]);
        let dirty = MeshInvalidator::invalidate(pos, 11, 8, 5);
        assert_eq!(dirty, vec![pos, pos.offset(1, 0)]);
        assert_eq!(MeshInvalidator::invalidate(pos, 5, 10, 5).len(), 1);
    }
}

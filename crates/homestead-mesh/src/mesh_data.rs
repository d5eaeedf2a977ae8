//! Intermediate mesh geometry produced by the chunk mesh builders.

use crate::vertex::TerrainVertex;

/// Which index list a triangle belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Submesh {
    /// Solid terrain, rendered with an opaque material.
    Opaque,
    /// Water surfaces, rendered with a transparent material.
    Transparent,
}

/// Per-build scratch geometry with parallel vertex channels.
///
/// `positions` and `colors` always have one entry per vertex. `normals`,
/// `uvs` and `blend_weights` are optional channels: each is either empty or
/// the same length as `positions`. Indices are `u32`, so a single mesh may
/// hold more than 65 535 vertices.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshData {
    /// Vertex positions in world space.
    pub positions: Vec<[f32; 3]>,
    /// Linear RGBA vertex colours.
    pub colors: Vec<[f32; 4]>,
    /// Unit vertex normals.
    pub normals: Vec<[f32; 3]>,
    /// Texture coordinates.
    pub uvs: Vec<[f32; 2]>,
    /// Grass / dirt / stone / sand splat weights.
    pub blend_weights: Vec<[f32; 4]>,
    /// Triangle list for [`Submesh::Opaque`].
    pub opaque_indices: Vec<u32>,
    /// Triangle list for [`Submesh::Transparent`].
    pub transparent_indices: Vec<u32>,
}

impl MeshData {
    /// Creates an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of triangles across both submeshes.
    pub fn triangle_count(&self) -> usize {
        (self.opaque_indices.len() + self.transparent_indices.len()) / 3
    }

    /// Number of triangles in one submesh.
    pub fn submesh_triangle_count(&self, submesh: Submesh) -> usize {
        self.indices(submesh).len() / 3
    }

    /// Returns `true` if the mesh has no vertices.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Index list of a submesh.
    pub fn indices(&self, submesh: Submesh) -> &[u32] {
        match submesh {
            Submesh::Opaque => &self.opaque_indices,
            Submesh::Transparent => &self.transparent_indices,
        }
    }

    fn indices_mut(&mut self, submesh: Submesh) -> &mut Vec<u32> {
        match submesh {
            Submesh::Opaque => &mut self.opaque_indices,
            Submesh::Transparent => &mut self.transparent_indices,
        }
    }

    /// Appends a triangle of already-pushed vertex indices.
    pub fn push_triangle(&mut self, submesh: Submesh, a: u32, b: u32, c: u32) {
        self.indices_mut(submesh).extend_from_slice(&[a, b, c]);
    }

    /// Appends a quad as two triangles `(0, 1, 2)` and `(0, 2, 3)`.
    ///
    /// Corners must be counter-clockwise seen from the side the quad faces.
    pub fn push_quad(
        &mut self,
        submesh: Submesh,
        corners: [[f32; 3]; 4],
        normal: [f32; 3],
        color: [f32; 4],
    ) {
        const QUAD_UVS: [[f32; 2]; 4] = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];

        let base = self.positions.len() as u32;
        for (corner, uv) in corners.into_iter().zip(QUAD_UVS) {
            self.positions.push(corner);
            self.colors.push(color);
            self.normals.push(normal);
            self.uvs.push(uv);
        }
        self.push_triangle(submesh, base, base + 1, base + 2);
        self.push_triangle(submesh, base, base + 2, base + 3);
    }

    /// Moves every vertex of `other` to the end of this mesh, offsetting its
    /// indices by this mesh's vertex count.
    ///
    /// An optional channel present on only one side is zero-filled on the
    /// other so the channels stay parallel.
    pub fn append(&mut self, other: MeshData) {
        let base = self.positions.len();
        let added = other.positions.len();
        let offset = base as u32;

        merge_channel(&mut self.normals, other.normals, base, added);
        merge_channel(&mut self.uvs, other.uvs, base, added);
        merge_channel(&mut self.blend_weights, other.blend_weights, base, added);
        self.positions.extend(other.positions);
        self.colors.extend(other.colors);
        self.opaque_indices
            .extend(other.opaque_indices.into_iter().map(|i| i + offset));
        self.transparent_indices
            .extend(other.transparent_indices.into_iter().map(|i| i + offset));
    }

    /// Interleaves the channels into GPU vertices, zero-filling absent ones.
    pub fn to_vertices(&self) -> Vec<TerrainVertex> {
        (0..self.positions.len())
            .map(|i| TerrainVertex {
                position: self.positions[i],
                normal: self.normals.get(i).copied().unwrap_or_default(),
                color: self.colors.get(i).copied().unwrap_or_default(),
                uv: self.uvs.get(i).copied().unwrap_or_default(),
                blend: self.blend_weights.get(i).copied().unwrap_or_default(),
            })
            .collect()
    }
}

fn merge_channel<T: Copy + Default>(ours: &mut Vec<T>, theirs: Vec<T>, base: usize, added: usize) {
    if ours.is_empty() && theirs.is_empty() {
        return;
    }
    ours.resize(base, T::default());
    if theirs.is_empty() {
        ours.resize(base + added, T::default());
    } else {
        ours.extend(theirs);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

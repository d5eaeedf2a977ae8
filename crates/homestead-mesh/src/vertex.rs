//! Interleaved GPU vertex for terrain meshes.
//!
//! Layout (64 bytes total):
//!
//! | Offset | Field      | Type       |
//! |--------|------------|------------|
//! | 0      | `position` | `[f32; 3]` |
//! | 12     | `normal`   | `[f32; 3]` |
//! | 24     | `color`    | `[f32; 4]` |
//! | 40     | `uv`       | `[f32; 2]` |
//! | 48     | `blend`    | `[f32; 4]` |

/// One terrain vertex, ready to be cast to bytes with [`bytemuck`].
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct TerrainVertex {
    /// World-space position.
    pub position: [f32; 3],
    /// Unit normal.
    pub normal: [f32; 3],
    /// Linear RGBA colour, used when no splat textures are bound.
    pub color: [f32; 4],
    /// Texture coordinates.
    pub uv: [f32; 2],
    /// Grass / dirt / stone / sand splat weights.
    pub blend: [f32; 4],
}

static_assertions::assert_eq_size!(TerrainVertex, [u8; 64]);
static_assertions::const_assert_eq!(std::mem::offset_of!(TerrainVertex, blend), 48);

impl TerrainVertex {
    /// Size of one vertex in a vertex buffer.
    pub const STRIDE: usize = std::mem::size_of::<Self>();

    /// Reinterprets a vertex slice as raw bytes for upload.
    pub fn as_bytes(vertices: &[Self]) -> &[u8] {
        bytemuck::cast_slice(vertices)
    }
}

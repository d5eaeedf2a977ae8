//! Block colours and the four-way material blend used by the smooth mesh.

use homestead_voxel::VoxelType;

/// Vertex colour of water surfaces (alpha below one).
pub const WATER_COLOR: [f32; 4] = [0.20, 0.42, 0.78, 0.65];

/// Flat colour of a block type, used by unlit rendering.
pub fn base_color(ty: VoxelType) -> [f32; 4] {
    match ty {
        VoxelType::Air => [0.0, 0.0, 0.0, 0.0],
        VoxelType::Grass => [0.34, 0.62, 0.22, 1.0],
        VoxelType::Dirt => [0.47, 0.33, 0.20, 1.0],
        VoxelType::Stone => [0.52, 0.52, 0.54, 1.0],
        VoxelType::Sand => [0.86, 0.79, 0.55, 1.0],
        VoxelType::Water => WATER_COLOR,
    }
}

/// Surface material channels of the blend-weight vector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BlendCategory {
    Grass = 0,
    Dirt = 1,
    Stone = 2,
    Sand = 3,
}

impl BlendCategory {
    /// Categories in channel order.
    pub const ALL: [BlendCategory; 4] = [Self::Grass, Self::Dirt, Self::Stone, Self::Sand];

    /// Maps a surface block to its channel. Air and water have none.
    pub fn from_voxel(ty: VoxelType) -> Option<Self> {
        match ty {
            VoxelType::Grass => Some(Self::Grass),
            VoxelType::Dirt => Some(Self::Dirt),
            VoxelType::Stone => Some(Self::Stone),
            VoxelType::Sand => Some(Self::Sand),
            VoxelType::Air | VoxelType::Water => None,
        }
    }

    /// Channel index in a blend-weight vector.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Block type this channel stands for.
    pub fn voxel(self) -> VoxelType {
        match self {
            Self::Grass => VoxelType::Grass,
            Self::Dirt => VoxelType::Dirt,
            Self::Stone => VoxelType::Stone,
            Self::Sand => VoxelType::Sand,
        }
    }

    /// Blend weights selecting only this channel.
    pub fn weights(self) -> [f32; 4] {
        let mut w = [0.0; 4];
        w[self.index()] = 1.0;
        w
    }
}

/// Weighted sum of the category base colours. Alpha is always one.
pub fn blend_color(weights: [f32; 4]) -> [f32; 4] {
    let mut rgb = [0.0f32; 3];
    for category in BlendCategory::ALL {
        let w = weights[category.index()];
        let c = base_color(category.voxel());
        for (out, channel) in rgb.iter_mut().zip(c) {
            *out += channel * w;
        }
    }
    [rgb[0], rgb[1], rgb[2], 1.0]
}

/// Scales the RGB part of a colour, leaving alpha untouched.
pub fn shaded(color: [f32; 4], factor: f32) -> [f32; 4] {
    [color[0] * factor, color[1] * factor, color[2] * factor, color[3]]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solid_blocks_are_opaque_water_is_not() {
        for ty in VoxelType::ALL {
            let alpha = base_color(ty)[3];
            if ty.is_solid() {
                assert_eq!(alpha, 1.0, "{ty}");
            } else {
                assert!(alpha < 1.0, "{ty}");
            }
        }
    }

    #[test]
    fn test_single_category_blend_is_its_base_color() {
        for category in BlendCategory::ALL {
            assert_eq!(blend_color(category.weights()), base_color(category.voxel()));
        }
    }

    #[test]
    fn test_even_blend_is_midpoint() {
        let mixed = blend_color([0.5, 0.0, 0.0, 0.5]);
        let grass = base_color(VoxelType::Grass);
        let sand = base_color(VoxelType::Sand);
        for i in 0..3 {
            assert!((mixed[i] - (grass[i] + sand[i]) * 0.5).abs() < 1e-6);
        }
    }

    #[test]
    fn test_category_roundtrip() {
        for category in BlendCategory::ALL {
            assert_eq!(BlendCategory::from_voxel(category.voxel()), Some(category));
        }
        assert_eq!(BlendCategory::from_voxel(VoxelType::Water), None);
    }

    #[test]
    fn test_shaded_keeps_alpha() {
        assert_eq!(shaded([1.0, 1.0, 1.0, 0.5], 0.5), [0.5, 0.5, 0.5, 0.5]);
    }
}

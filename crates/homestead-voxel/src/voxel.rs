//! The closed set of block types and their derived classification.
//!
//! Every cell of a chunk stores exactly one [`VoxelType`] as a single byte.
//! Air is `0` so that zero-initialized storage represents empty space.

use serde::{Deserialize, Serialize};

/// A single block type.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum VoxelType {
    /// Empty space.
    #[default]
    Air = 0,
    /// Grass-topped soil.
    Grass = 1,
    /// Bare soil.
    Dirt = 2,
    /// Rock.
    Stone = 3,
    /// Beach and sea-floor sand.
    Sand = 4,
    /// Standing water up to sea level.
    Water = 5,
}

impl VoxelType {
    /// All block types in discriminant order.
    pub const ALL: [VoxelType; 6] = [
        Self::Air,
        Self::Grass,
        Self::Dirt,
        Self::Stone,
        Self::Sand,
        Self::Water,
    ];

    /// Decodes a stored byte. Returns `None` for bytes that name no type.
    pub fn from_u8(value: u8) -> Option<Self> {
        Self::ALL.get(value as usize).copied()
    }

    /// Returns the byte this type is stored as.
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Returns `true` for types that never hide a neighbouring face (Air, Water).
    pub fn is_transparent(self) -> bool {
        matches!(self, Self::Air | Self::Water)
    }

    /// Returns `true` for everything that is not transparent.
    pub fn is_solid(self) -> bool {
        !self.is_transparent()
    }

    /// Returns `true` for Air.
    pub fn is_air(self) -> bool {
        self == Self::Air
    }

    /// Lowercase name, used in logs and diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            Self::Air => "air",
            Self::Grass => "grass",
            Self::Dirt => "dirt",
            Self::Stone => "stone",
            Self::Sand => "sand",
            Self::Water => "water",
        }
    }
}

impl std::fmt::Display for VoxelType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_water_is_transparent_not_solid() {
        assert!(VoxelType::Water.is_transparent());
        assert!(!VoxelType::Water.is_solid());
    }

    #[test]
    fn test_stone_is_solid() {
        assert!(VoxelType::Stone.is_solid());
        assert!(!VoxelType::Stone.is_transparent());
    }

    #[test]
    fn test_solid_is_complement_of_transparent() {
        for ty in VoxelType::ALL {
            assert_ne!(ty.is_solid(), ty.is_transparent(), "{ty}");
        }
        let transparent: Vec<_> = VoxelType::ALL
            .into_iter()
            .filter(|t| t.is_transparent())
            .collect();
        assert_eq!(transparent, vec![VoxelType::Air, VoxelType::Water]);
    }

    #[test]
    fn test_byte_roundtrip_and_unknown_bytes() {
        for ty in VoxelType::ALL {
            assert_eq!(VoxelType::from_u8(ty.as_u8()), Some(ty));
        }
        assert_eq!(VoxelType::from_u8(6), None);
        assert_eq!(VoxelType::from_u8(255), None);
    }

    #[test]
    fn test_air_is_zero_and_default() {
        assert_eq!(VoxelType::Air.as_u8(), 0);
        assert_eq!(VoxelType::default(), VoxelType::Air);
    }
}

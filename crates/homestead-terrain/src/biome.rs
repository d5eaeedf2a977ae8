//! World biome selector.
//!
//! A world has exactly one biome, chosen at setup. The biome picks the height
//! shaping formula and the surface material rules used by
//! [`TerrainGenerator`](crate::TerrainGenerator).

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TerrainError;

/// Terrain shaping profile.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Biome {
    /// Gentle rolling hills with grass and dirt patches.
    #[default]
    Forest,
    /// Ridged peaks and deep valleys with exposed rock.
    Mountains,
    /// Ocean along the low-Z edge rising to land inland.
    Coast,
    /// Flat grassland using the fallback shaping formula.
    Plains,
}

impl Biome {
    /// Every biome, in declaration order.
    pub const ALL: [Biome; 4] = [Self::Forest, Self::Mountains, Self::Coast, Self::Plains];

    /// Lowercase name, as used in config files and on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Self::Forest => "forest",
            Self::Mountains => "mountains",
            Self::Coast => "coast",
            Self::Plains => "plains",
        }
    }
}

impl std::fmt::Display for Biome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Biome {
    type Err = TerrainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|b| b.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| TerrainError::UnknownBiome(s.to_string()))
    }
}

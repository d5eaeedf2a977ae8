//! Discrete detail levels for chunk meshes.

/// Detail level of one chunk's mesh.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LodLevel {
    /// LOD0: a vertex on every block corner.
    #[default]
    Full,
    /// LOD1: every second corner.
    Medium,
    /// LOD2: every fourth corner.
    Low,
}

impl LodLevel {
    /// All levels from finest to coarsest.
    pub const ALL: [LodLevel; 3] = [Self::Full, Self::Medium, Self::Low];

    /// Vertex stride in blocks when meshing at this level.
    pub fn step(self) -> usize {
        match self {
            Self::Full => 1,
            Self::Medium => 2,
            Self::Low => 4,
        }
    }

    /// Numeric level, 0 for full detail.
    pub fn index(self) -> u8 {
        self as u8
    }

    /// Level for a numeric index, `None` past the coarsest level.
    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }
}

impl std::fmt::Display for LodLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "LOD{}", self.index())
    }
}

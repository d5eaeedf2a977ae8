//! Distance-based LOD selection.

use glam::Vec3;
use homestead_voxel::{CHUNK_DEPTH, CHUNK_WIDTH, ChunkCoord};

use crate::level::LodLevel;

/// Distance boundaries between LOD levels, in chunk units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LodThresholds {
    near: f32,
    far: f32,
}

impl LodThresholds {
    /// Creates thresholds where [`LodLevel::Full`] ends at `near` and
    /// [`LodLevel::Medium`] ends at `far`.
    ///
    /// Returns `None` unless `0 < near <= far` and both are finite.
    pub fn new(near: f32, far: f32) -> Option<Self> {
        let valid = near.is_finite() && far.is_finite() && near > 0.0 && near <= far;
        valid.then_some(Self { near, far })
    }

    /// Upper bound (exclusive) of full detail.
    pub fn near(&self) -> f32 {
        self.near
    }

    /// Upper bound (exclusive) of medium detail.
    pub fn far(&self) -> f32 {
        self.far
    }
}

impl Default for LodThresholds {
    fn default() -> Self {
        Self {
            near: 3.0,
            far: 6.0,
        }
    }
}

/// Selects LOD levels based on distance from the camera.
#[derive(Clone, Debug, Default)]
pub struct LodSelector {
    thresholds: LodThresholds,
}

impl LodSelector {
    /// Create a new LOD selector with the given thresholds.
    pub fn new(thresholds: LodThresholds) -> Self {
        Self { thresholds }
    }

    /// Determine the LOD level for a chunk at `distance` chunk units from
    /// the camera.
    pub fn select(&self, distance: f32) -> LodLevel {
        if distance < self.thresholds.near {
            LodLevel::Full
        } else if distance < self.thresholds.far {
            LodLevel::Medium
        } else {
            LodLevel::Low
        }
    }

    /// Access the underlying thresholds.
    pub fn thresholds(&self) -> &LodThresholds {
        &self.thresholds
    }
}

/// Horizontal distance from the centre of `coord` to a world-space camera
/// position, in chunk units. Camera height is ignored.
pub fn chunk_distance(coord: ChunkCoord, camera: Vec3) -> f32 {
    let (cx, cz) = coord.center();
    let camera_x = camera.x / CHUNK_WIDTH as f32;
    let camera_z = camera.z / CHUNK_DEPTH as f32;
    glam::Vec2::new(cx - camera_x, cz - camera_z).length()
}

//! Integer voxel grid coordinates.
//!
//! Cell `(x, y, z)` covers the half-open unit cube `[x, x+1) x [y, y+1) x [z, z+1)`.
//! Blocks placed by the voxel variants occupy exactly one cell.

use std::fmt;

use glam::{IVec3, Vec3};
use serde::{Deserialize, Serialize};

use crate::Aabb;

/// Position of a unit cell in the voxel grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GridCoord {
    /// Cell index along x
    pub x: i32,
    /// Cell index along y
    pub y: i32,
    /// Cell index along z
    pub z: i32,
}

impl GridCoord {
    /// Creates a coordinate from cell indices.
    #[must_use]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Cell that contains a world-space point.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_world(point: Vec3) -> Self {
        let cell = point.floor();
        Self::new(cell.x as i32, cell.y as i32, cell.z as i32)
    }

    /// World-space center of the cell.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn center(self) -> Vec3 {
        Vec3::new(self.x as f32, self.y as f32, self.z as f32) + Vec3::splat(0.5)
    }

    /// Unit box occupied by the cell.
    #[must_use]
    pub fn bounds(self) -> Aabb {
        Aabb::from_center_half_extents(self.center(), Vec3::splat(0.5))
    }

    /// Neighbouring cell offset by `delta`.
    #[must_use]
    pub fn offset(self, delta: IVec3) -> Self {
        Self::new(self.x + delta.x, self.y + delta.y, self.z + delta.z)
    }
}

impl From<IVec3> for GridCoord {
    fn from(v: IVec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<GridCoord> for IVec3 {
    fn from(c: GridCoord) -> Self {
        IVec3::new(c.x, c.y, c.z)
    }
}

impl fmt::Display for GridCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

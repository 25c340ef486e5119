//! # Basewalk Space
//!
//! Spatial primitives shared by every Basewalk variant.
//!
//! The movement core never touches render meshes. Everything it collides with
//! is reduced to an [`Aabb`], and voxel blocks are addressed through integer
//! [`GridCoord`]s. This crate keeps that math in one place:
//!
//! - **Overlap tests**: strict box/box intersection (touching is not overlap)
//! - **Push-out direction**: normalized center-to-point vector, zero when coincident
//! - **Penetration**: minimum-translation vector along a single axis
//! - **Hashing**: bit-exact hashing of vectors and boxes for determinism checks
//!
//! ## Quick Start
//!
//! ```
//! use basewalk_space::Aabb;
//! use glam::Vec3;
//!
//! let base = Aabb::from_center_half_extents(Vec3::new(-30.0, 3.0, -30.0), Vec3::splat(4.0));
//! let player = Aabb::from_center_half_extents(Vec3::new(-30.0, 1.0, -30.0), Vec3::splat(0.5));
//!
//! assert!(base.intersects(&player));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod grid;
pub mod hash;

use glam::Vec3;
use serde::{Deserialize, Serialize};

pub use grid::GridCoord;
pub use hash::{hash_aabb, hash_f32, hash_vec3};

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Minimum corner
    pub min: Vec3,
    /// Maximum corner
    pub max: Vec3,
}

impl Aabb {
    /// Create a box from dimensions (centered at origin).
    #[must_use]
    pub fn new(width: f32, height: f32, depth: f32) -> Self {
        Self {
            min: Vec3::new(-width / 2.0, -height / 2.0, -depth / 2.0),
            max: Vec3::new(width / 2.0, height / 2.0, depth / 2.0),
        }
    }

    /// Create a box from min/max corners.
    #[must_use]
    pub fn from_min_max(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Create a box from its center and half extents.
    #[must_use]
    pub fn from_center_half_extents(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    /// Get the center of the box.
    #[must_use]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Get the size of the box.
    #[must_use]
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Get the half extents of the box.
    #[must_use]
    pub fn half_extents(&self) -> Vec3 {
        self.size() * 0.5
    }

    /// Check if a point is inside the box (boundary inclusive).
    #[must_use]
    pub fn contains(&self, point: Vec3) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
            && point.z >= self.min.z
            && point.z <= self.max.z
    }

    /// Check if two boxes overlap on every axis.
    ///
    /// Boxes that only share a face, edge or corner do not intersect.
    #[must_use]
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
            && self.min.z < other.max.z
            && self.max.z > other.min.z
    }

    /// Return this box moved by `offset`.
    #[must_use]
    pub fn translated(&self, offset: Vec3) -> Self {
        Self {
            min: self.min + offset,
            max: self.max + offset,
        }
    }

    /// Minimum translation that moves `self` out of `other`.
    ///
    /// Returns `None` when the boxes do not intersect. The vector is non-zero on
    /// exactly one axis: the one with the smallest overlap. Ties resolve in
    /// x, y, z order.
    #[must_use]
    pub fn penetration(&self, other: &Aabb) -> Option<Vec3> {
        if !self.intersects(other) {
            return None;
        }

        let overlap = self.max.min(other.max) - self.min.max(other.min);
        let delta = self.center() - other.center();

        let mut axis = 0;
        if overlap.y < overlap[axis] {
            axis = 1;
        }
        if overlap.z < overlap[axis] {
            axis = 2;
        }

        let sign = if delta[axis] < 0.0 { -1.0 } else { 1.0 };
        let mut mtv = Vec3::ZERO;
        mtv[axis] = overlap[axis] * sign;
        Some(mtv)
    }
}

impl Default for Aabb {
    fn default() -> Self {
        Self::new(1.0, 1.0, 1.0)
    }
}

/// Unit vector pointing from `from` toward `to`.
///
/// Coincident points yield [`Vec3::ZERO`] rather than NaN.
#[must_use]
pub fn push_direction(from: Vec3, to: Vec3) -> Vec3 {
    (to - from).normalize_or_zero()
}

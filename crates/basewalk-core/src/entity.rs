//! The player entity.
//!
//! [`Player`] is plain kinematic state owned by the frame loop. Resolvers
//! mutate it in place once per frame; nothing else writes to it.

use std::fmt;

use basewalk_space::Aabb;
use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::config::{MovementConfig, Plane};
use crate::input::LookState;

/// Side-view facing of the platformer sprite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Facing {
    /// Facing -x
    Left,
    /// Facing +x
    #[default]
    Right,
}

impl fmt::Display for Facing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left => write!(f, "Left"),
            Self::Right => write!(f, "Right"),
        }
    }
}

/// Kinematic state of the controllable entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Center of the collision box.
    pub position: Vec3,
    /// Velocity in units/s.
    pub velocity: Vec3,
    /// Model yaw in world-frame variants (`atan2(vx, vz)` of the last move).
    pub heading: f32,
    /// Side-view facing.
    pub facing: Facing,
    /// Mouse-look orientation.
    pub look: LookState,
    /// Resting on the floor (or, with axis-separated collision, on a volume).
    pub grounded: bool,
    /// In the air because of a jump.
    pub jumping: bool,
    /// Moving with the run key held.
    pub running: bool,
}

impl Player {
    /// A player at rest at `position`, airborne until the ground resolver runs.
    #[must_use]
    pub fn spawn(position: Vec3) -> Self {
        Self {
            position,
            velocity: Vec3::ZERO,
            heading: 0.0,
            facing: Facing::default(),
            look: LookState::default(),
            grounded: false,
            jumping: false,
            running: false,
        }
    }

    /// Collision box from the configured extents and offset.
    #[must_use]
    pub fn collision_box(&self, movement: &MovementConfig) -> Aabb {
        Aabb::from_center_half_extents(self.position + movement.box_offset, movement.half_extents)
    }

    /// In-plane horizontal velocity magnitude.
    #[must_use]
    pub fn horizontal_speed(&self, plane: Plane) -> f32 {
        match plane {
            Plane::XZ => self.velocity.x.hypot(self.velocity.z),
            Plane::XY => self.velocity.x.abs(),
        }
    }

    /// Whether every kinematic component is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.position.is_finite()
            && self.velocity.is_finite()
            && self.heading.is_finite()
            && self.look.yaw.is_finite()
            && self.look.pitch.is_finite()
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::spawn(Vec3::ZERO)
    }
}

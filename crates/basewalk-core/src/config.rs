//! Configuration for the movement and collision step.
//!
//! A [`GameConfig`] bundles every constant the frame step reads. Each of the
//! four demo variants is a preset of the same structure:
//!
//! | Variant        | Plane | Horizontal mode | Movement frame | Floor |
//! |----------------|-------|-----------------|----------------|-------|
//! | `Explorer`     | XZ    | `Reset`         | `World`        | 1.0   |
//! | `Platformer`   | XY    | `Persistent`    | `World`        | 0.75  |
//! | `VoxelSandbox` | XZ    | `Reset`         | `World`        | 0.9   |
//! | `VoxelFps`     | XZ    | `Reset`         | `ViewRelative` | 0.9   |
//!
//! Configs are plain serde data, so a host can ship them as JSON:
//!
//! ```
//! use basewalk_core::config::{GameConfig, Variant};
//!
//! let config = GameConfig::from_json_str(r#"{ "variant": "Platformer" }"#).unwrap();
//! assert_eq!(config.variant, Variant::Platformer);
//! ```

use std::f32::consts::FRAC_PI_2;
use std::fmt;

use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::volume::Color;

/// Default upper bound on a single frame's elapsed time, in seconds.
pub const DEFAULT_MAX_DT: f32 = 0.05;

// =============================================================================
// Errors
// =============================================================================

/// Errors raised while loading or validating a [`GameConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The JSON document could not be parsed.
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    /// A parameter is outside its allowed range.
    #[error("invalid {field}: {reason}")]
    Invalid {
        /// Dotted path of the offending field.
        field: &'static str,
        /// Human-readable constraint that was violated.
        reason: &'static str,
    },
}

// =============================================================================
// Enumerations
// =============================================================================

/// Which demo a config describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Variant {
    /// 3D "visit the bases" exploration demo.
    #[default]
    Explorer,
    /// 2D side-scrolling platformer.
    Platformer,
    /// Third-person voxel block sandbox.
    VoxelSandbox,
    /// First-person voxel block sandbox with mouse look.
    VoxelFps,
}

impl Variant {
    /// All variants in declaration order.
    #[must_use]
    pub const fn all() -> [Variant; 4] {
        [Self::Explorer, Self::Platformer, Self::VoxelSandbox, Self::VoxelFps]
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Explorer => write!(f, "Explorer"),
            Self::Platformer => write!(f, "Platformer"),
            Self::VoxelSandbox => write!(f, "VoxelSandbox"),
            Self::VoxelFps => write!(f, "VoxelFps"),
        }
    }
}

/// How horizontal velocity carries between frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HorizontalMode {
    /// Zeroed every frame, then set from the held movement keys.
    #[default]
    Reset,
    /// Kept until the key that set it is released.
    Persistent,
}

/// Frame of reference for movement keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MovementFrame {
    /// Keys map to fixed world axes.
    #[default]
    World,
    /// Keys are rotated by the look yaw.
    ViewRelative,
}

/// Plane that horizontal movement and the position label use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Plane {
    /// Ground plane of the 3D variants (y is up).
    #[default]
    XZ,
    /// Side-view plane of the platformer; only x is driven by keys.
    XY,
}

/// Collision response against static volumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CollisionPolicy {
    /// Revert to the confirmed position and nudge away from the volume center.
    #[default]
    PushOut,
    /// Translate out along the axis of least penetration.
    AxisSeparated,
}

/// Which velocity components contribute to the displayed speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SpeedMode {
    /// Magnitude of the in-plane horizontal velocity.
    #[default]
    Horizontal,
    /// Magnitude of the full velocity vector.
    Full,
}

/// How coordinates are turned into integers for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PositionRounding {
    /// Nearest integer, halves round toward positive infinity.
    #[default]
    Round,
    /// Largest integer not above the value.
    Floor,
}

// =============================================================================
// Sections
// =============================================================================

/// Kinematic constants for the player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovementConfig {
    /// Speed while walking (units/s).
    pub walk_speed: f32,
    /// Speed while the run key is held (units/s).
    pub run_speed: f32,
    /// Downward acceleration (units/s²).
    pub gravity: f32,
    /// Vertical velocity set by a jump (units/s).
    pub jump_impulse: f32,
    /// Lowest allowed player center height.
    pub floor_height: f32,
    /// Upper clamp for the per-frame delta (seconds).
    pub max_dt: f32,
    /// Horizontal velocity carry-over.
    pub horizontal_mode: HorizontalMode,
    /// Movement key frame of reference.
    pub frame: MovementFrame,
    /// Movement plane.
    pub plane: Plane,
    /// Half extents of the player collision box.
    pub half_extents: Vec3,
    /// Offset of the collision box center from the player position.
    #[serde(default)]
    pub box_offset: Vec3,
    /// Where the player starts and returns on reset.
    pub spawn_position: Vec3,
}

/// Static-volume collision constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollisionConfig {
    /// Response policy.
    pub policy: CollisionPolicy,
    /// Distance of the push-out nudge.
    pub push_distance: f32,
    /// Color a collectible volume switches to once visited.
    pub visited_color: Color,
    /// Lifts the player back onto the floor when a push-out nudge lands
    /// below it. When off, the ground phase corrects the dip next frame.
    #[serde(default)]
    pub clamp_push_to_floor: bool,
}

/// Stats projection constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsConfig {
    /// Speed components to measure.
    pub speed_mode: SpeedMode,
    /// Speed above which the action reads as running.
    pub running_threshold: f32,
    /// Coordinate rounding for the position label.
    pub rounding: PositionRounding,
}

/// Mouse-look constants for pointer-locked variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LookConfig {
    /// Radians of rotation per pointer unit.
    pub sensitivity: f32,
    /// Maximum absolute pitch (radians).
    pub pitch_limit: f32,
}

/// Idle float animation of visited volumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloatConfig {
    /// Peak vertical offset.
    pub amplitude: f32,
    /// Angular frequency (rad/s).
    pub frequency: f32,
}

// =============================================================================
// GameConfig
// =============================================================================

/// Complete configuration for one variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Demo this config belongs to.
    pub variant: Variant,
    /// Kinematics.
    pub movement: MovementConfig,
    /// Collision response.
    pub collision: CollisionConfig,
    /// UI projection.
    pub stats: StatsConfig,
    /// Mouse look.
    pub look: LookConfig,
    /// Visited-volume animation.
    pub float: FloatConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::explorer()
    }
}

impl GameConfig {
    /// Preset for the 3D base exploration demo.
    #[must_use]
    pub fn explorer() -> Self {
        Self {
            variant: Variant::Explorer,
            movement: MovementConfig {
                walk_speed: 10.0,
                run_speed: 20.0,
                gravity: 25.0,
                jump_impulse: 10.0,
                floor_height: 1.0,
                max_dt: DEFAULT_MAX_DT,
                horizontal_mode: HorizontalMode::Reset,
                frame: MovementFrame::World,
                plane: Plane::XZ,
                // Bounds of the whole model: arms, legs and head included.
                half_extents: Vec3::new(1.35, 2.15, 0.86),
                box_offset: Vec3::new(0.0, 0.15, 0.06),
                spawn_position: Vec3::new(0.0, 3.0, 0.0),
            },
            collision: CollisionConfig {
                policy: CollisionPolicy::PushOut,
                push_distance: 0.5,
                visited_color: Color::VISITED,
                clamp_push_to_floor: false,
            },
            stats: StatsConfig {
                speed_mode: SpeedMode::Horizontal,
                running_threshold: 12.0,
                rounding: PositionRounding::Round,
            },
            look: LookConfig::default(),
            float: FloatConfig::default(),
        }
    }

    /// Preset for the 2D platformer.
    #[must_use]
    pub fn platformer() -> Self {
        Self {
            variant: Variant::Platformer,
            movement: MovementConfig {
                walk_speed: 8.0,
                run_speed: 12.0,
                gravity: 30.0,
                jump_impulse: 12.0,
                floor_height: 0.75,
                max_dt: DEFAULT_MAX_DT,
                horizontal_mode: HorizontalMode::Persistent,
                frame: MovementFrame::World,
                plane: Plane::XY,
                half_extents: Vec3::new(0.5, 0.75, 0.5),
                box_offset: Vec3::ZERO,
                spawn_position: Vec3::new(0.0, 0.75, 0.5),
            },
            collision: CollisionConfig {
                policy: CollisionPolicy::PushOut,
                push_distance: 0.5,
                visited_color: Color::VISITED,
                clamp_push_to_floor: false,
            },
            stats: StatsConfig {
                speed_mode: SpeedMode::Full,
                running_threshold: 10.0,
                rounding: PositionRounding::Floor,
            },
            look: LookConfig::default(),
            float: FloatConfig::default(),
        }
    }

    /// Preset for the third-person voxel sandbox.
    #[must_use]
    pub fn voxel_sandbox() -> Self {
        Self {
            variant: Variant::VoxelSandbox,
            movement: MovementConfig {
                walk_speed: 5.0,
                run_speed: 8.0,
                gravity: 25.0,
                jump_impulse: 8.0,
                floor_height: 0.9,
                max_dt: DEFAULT_MAX_DT,
                horizontal_mode: HorizontalMode::Reset,
                frame: MovementFrame::World,
                plane: Plane::XZ,
                half_extents: Vec3::new(0.3, 0.9, 0.3),
                box_offset: Vec3::ZERO,
                spawn_position: Vec3::new(0.5, 3.0, 0.5),
            },
            collision: CollisionConfig {
                policy: CollisionPolicy::PushOut,
                push_distance: 0.5,
                visited_color: Color::VISITED,
                clamp_push_to_floor: false,
            },
            stats: StatsConfig {
                speed_mode: SpeedMode::Horizontal,
                running_threshold: 6.0,
                rounding: PositionRounding::Floor,
            },
            look: LookConfig::default(),
            float: FloatConfig::default(),
        }
    }

    /// Preset for the first-person voxel sandbox.
    #[must_use]
    pub fn voxel_fps() -> Self {
        let mut config = Self::voxel_sandbox();
        config.variant = Variant::VoxelFps;
        config.movement.frame = MovementFrame::ViewRelative;
        config
    }

    /// Preset for `variant`.
    #[must_use]
    pub fn for_variant(variant: Variant) -> Self {
        match variant {
            Variant::Explorer => Self::explorer(),
            Variant::Platformer => Self::platformer(),
            Variant::VoxelSandbox => Self::voxel_sandbox(),
            Variant::VoxelFps => Self::voxel_fps(),
        }
    }

    /// Parses and validates a JSON config.
    ///
    /// Missing top-level sections fall back to the explorer preset.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and
    /// [`ConfigError::Invalid`] if validation fails.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes the config as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if serialization fails.
    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Checks every numeric parameter against its allowed range.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError::Invalid`] encountered.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let m = &self.movement;
        require(m.walk_speed.is_finite() && m.walk_speed >= 0.0, "movement.walk_speed", "must be finite and non-negative")?;
        require(m.run_speed.is_finite() && m.run_speed >= 0.0, "movement.run_speed", "must be finite and non-negative")?;
        require(m.gravity.is_finite() && m.gravity > 0.0, "movement.gravity", "must be finite and positive")?;
        require(m.jump_impulse.is_finite() && m.jump_impulse >= 0.0, "movement.jump_impulse", "must be finite and non-negative")?;
        require(m.floor_height.is_finite(), "movement.floor_height", "must be finite")?;
        require(m.max_dt.is_finite() && m.max_dt > 0.0, "movement.max_dt", "must be finite and positive")?;
        require(
            m.half_extents.is_finite() && m.half_extents.cmpgt(Vec3::ZERO).all(),
            "movement.half_extents",
            "must be finite and positive on every axis",
        )?;
        require(m.box_offset.is_finite(), "movement.box_offset", "must be finite")?;
        require(m.spawn_position.is_finite(), "movement.spawn_position", "must be finite")?;

        let c = &self.collision;
        require(c.push_distance.is_finite() && c.push_distance >= 0.0, "collision.push_distance", "must be finite and non-negative")?;

        let s = &self.stats;
        require(s.running_threshold.is_finite() && s.running_threshold >= 0.0, "stats.running_threshold", "must be finite and non-negative")?;

        let l = &self.look;
        require(l.sensitivity.is_finite(), "look.sensitivity", "must be finite")?;
        require(l.pitch_limit > 0.0 && l.pitch_limit <= FRAC_PI_2, "look.pitch_limit", "must be in (0, pi/2]")?;

        let f = &self.float;
        require(f.amplitude.is_finite() && f.frequency.is_finite(), "float", "must be finite")?;

        Ok(())
    }
}

fn require(ok: bool, field: &'static str, reason: &'static str) -> Result<(), ConfigError> {
    if ok {
        Ok(())
    } else {
        Err(ConfigError::Invalid { field, reason })
    }
}

impl Default for LookConfig {
    fn default() -> Self {
        Self {
            sensitivity: 0.002,
            pitch_limit: FRAC_PI_2,
        }
    }
}

impl Default for FloatConfig {
    fn default() -> Self {
        Self {
            amplitude: 0.5,
            frequency: 3.0,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

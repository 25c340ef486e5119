//! Static volumes: bases, pickups and voxel blocks.
//!
//! A [`StaticVolume`] carries two independent positions:
//!
//! - the **logical box** (`center` + `half_extents`), fixed for the volume's
//!   lifetime and the only thing collision ever reads;
//! - the **presentation** offset, animated each frame for visited volumes and
//!   read only by the renderer.
//!
//! Keeping them apart means a floating base can never drag its collision box
//! up and down with the animation.

use std::fmt;

use basewalk_space::{Aabb, GridCoord};
use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::config::FloatConfig;

/// Unique identifier for a volume within a [`World`](crate::world::World).
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VolumeId(u64);

impl VolumeId {
    /// Creates a `VolumeId` from a raw value.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for VolumeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VolumeId({})", self.0)
    }
}

impl fmt::Display for VolumeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 24-bit `0xRRGGBB` display color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(u32);

impl Color {
    /// Marker color of a visited collectible.
    pub const VISITED: Color = Color(0x8a_2b_e2);

    /// Creates a color from `0xRRGGBB`. Bits above 24 are dropped.
    #[must_use]
    pub const fn from_hex(hex: u32) -> Self {
        Self(hex & 0x00ff_ffff)
    }

    /// Returns `0xRRGGBB`.
    #[must_use]
    pub const fn hex(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06x}", self.0)
    }
}

/// Material of a voxel block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlockKind {
    /// Grass-topped soil
    Grass,
    /// Bare soil
    Dirt,
    /// Rock
    Stone,
    /// Planks
    Wood,
    /// Sand
    Sand,
}

impl BlockKind {
    /// Every block kind, in palette order.
    pub const ALL: [BlockKind; 5] = [Self::Grass, Self::Dirt, Self::Stone, Self::Wood, Self::Sand];

    /// Default display color of the block.
    #[must_use]
    pub const fn color(self) -> Color {
        match self {
            Self::Grass => Color::from_hex(0x2e_cc_71),
            Self::Dirt => Color::from_hex(0x8b_5a_2b),
            Self::Stone => Color::from_hex(0x7f_8c_8d),
            Self::Wood => Color::from_hex(0xa0_52_2d),
            Self::Sand => Color::from_hex(0xf4_d0_3f),
        }
    }
}

/// What a volume represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VolumeKind {
    /// Explorer base; collectible.
    Base,
    /// Platformer pickup; collectible.
    Pickup,
    /// Voxel block at a grid cell; solid only.
    Block {
        /// Material tag.
        kind: BlockKind,
        /// Cell the block occupies.
        coord: GridCoord,
    },
}

impl VolumeKind {
    /// Whether visiting this volume counts toward completion.
    #[must_use]
    pub const fn is_collectible(self) -> bool {
        matches!(self, Self::Base | Self::Pickup)
    }
}

/// Render-only transform of a volume.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Presentation {
    /// Offset from the logical center.
    pub offset: Vec3,
    /// Whether the idle float animation runs.
    pub floating: bool,
}

/// An immovable axis-aligned box the player collides with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaticVolume {
    id: VolumeId,
    kind: VolumeKind,
    center: Vec3,
    half_extents: Vec3,
    base_color: Color,
    /// Current display color.
    pub color: Color,
    visited: bool,
    /// Render transform, never read by collision.
    pub presentation: Presentation,
}

impl StaticVolume {
    /// Creates an unvisited volume.
    #[must_use]
    pub fn new(id: VolumeId, kind: VolumeKind, center: Vec3, half_extents: Vec3, color: Color) -> Self {
        Self {
            id,
            kind,
            center,
            half_extents,
            base_color: color,
            color,
            visited: false,
            presentation: Presentation::default(),
        }
    }

    /// Identifier.
    #[must_use]
    pub fn id(&self) -> VolumeId {
        self.id
    }

    /// Kind tag.
    #[must_use]
    pub fn kind(&self) -> VolumeKind {
        self.kind
    }

    /// Logical center.
    #[must_use]
    pub fn center(&self) -> Vec3 {
        self.center
    }

    /// Logical half extents.
    #[must_use]
    pub fn half_extents(&self) -> Vec3 {
        self.half_extents
    }

    /// Color the volume was created with.
    #[must_use]
    pub fn base_color(&self) -> Color {
        self.base_color
    }

    /// Whether the volume has been visited since the last reset.
    #[must_use]
    pub fn is_visited(&self) -> bool {
        self.visited
    }

    /// Whether the volume counts toward completion.
    #[must_use]
    pub fn is_collectible(&self) -> bool {
        self.kind.is_collectible()
    }

    /// The collision box. Independent of the presentation offset.
    #[must_use]
    pub fn logical_box(&self) -> Aabb {
        Aabb::from_center_half_extents(self.center, self.half_extents)
    }

    /// Where the renderer should draw the volume.
    #[must_use]
    pub fn render_position(&self) -> Vec3 {
        self.center + self.presentation.offset
    }

    /// Marks the volume visited, recolors it and starts the float animation.
    ///
    /// Returns `false` if it was already visited or is not collectible.
    pub(crate) fn mark_visited(&mut self, marker: Color) -> bool {
        if self.visited || !self.is_collectible() {
            return false;
        }
        self.visited = true;
        self.color = marker;
        self.presentation.floating = true;
        true
    }

    /// Clears the visited flag without touching color or animation.
    pub(crate) fn clear_visited(&mut self) -> bool {
        std::mem::replace(&mut self.visited, false)
    }

    /// Advances the float animation to `time` seconds.
    pub fn animate(&mut self, time: f64, float: &FloatConfig) {
        if self.presentation.floating {
            let phase = time * f64::from(float.frequency);
            #[allow(clippy::cast_possible_truncation)]
            let wave = phase.sin() as f32;
            self.presentation.offset = Vec3::new(0.0, float.amplitude * wave, 0.0);
        }
    }

    /// Restores the unvisited look and state.
    pub fn reset(&mut self) {
        self.visited = false;
        self.color = self.base_color;
        self.presentation = Presentation::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> StaticVolume {
        StaticVolume::new(
            VolumeId::new(0),
            VolumeKind::Base,
            Vec3::new(-30.0, 3.0, -30.0),
            Vec3::new(4.0, 3.0, 4.0),
            Color::from_hex(0xffdd59),
        )
    }

    #[test]
    fn color_display_and_mask() {
        assert_eq!(Color::VISITED.to_string(), "#8a2be2");
        assert_eq!(Color::from_hex(0xff12_3456).hex(), 0x12_3456);
    }

    #[test]
    fn mark_visited_is_one_way() {
        let mut volume = base();
        assert!(volume.mark_visited(Color::VISITED));
        assert!(volume.is_visited());
        assert_eq!(volume.color, Color::VISITED);
        assert!(volume.presentation.floating);

        assert!(!volume.mark_visited(Color::VISITED));
    }

    #[test]
    fn blocks_are_never_visited() {
        let mut block = StaticVolume::new(
            VolumeId::new(1),
            VolumeKind::Block {
                kind: BlockKind::Stone,
                coord: GridCoord::new(0, 0, 0),
            },
            GridCoord::new(0, 0, 0).center(),
            Vec3::splat(0.5),
            BlockKind::Stone.color(),
        );
        assert!(!block.mark_visited(Color::VISITED));
        assert!(!block.is_visited());
    }

    #[test]
    fn animation_moves_presentation_not_logical_box() {
        let mut volume = base();
        let before = volume.logical_box();
        volume.mark_visited(Color::VISITED);

        let quarter_period = std::f64::consts::FRAC_PI_2 / 3.0;
        volume.animate(quarter_period, &FloatConfig::default());

        assert!((volume.presentation.offset.y - 0.5).abs() < 1e-5);
        assert!((volume.render_position().y - 3.5).abs() < 1e-5);
        assert_eq!(volume.logical_box(), before);
    }

    #[test]
    fn unvisited_volume_does_not_float() {
        let mut volume = base();
        volume.animate(0.5, &FloatConfig::default());
        assert_eq!(volume.presentation.offset, Vec3::ZERO);
    }

    #[test]
    fn reset_restores_base_color_and_rest_pose() {
        let mut volume = base();
        volume.mark_visited(Color::VISITED);
        volume.animate(1.0, &FloatConfig::default());
        volume.reset();

        assert!(!volume.is_visited());
        assert_eq!(volume.color, volume.base_color());
        assert_eq!(volume.presentation, Presentation::default());
    }
}

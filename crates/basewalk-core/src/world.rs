//! The static world: an ordered list of volumes plus the visit bookkeeping.
//!
//! Volumes are kept in insertion order. Collision scans them in that order
//! every frame, which is what makes "last write wins" well defined when the
//! player overlaps several volumes at once.
//!
//! # Completion latch
//!
//! Completion is edge-triggered: [`World::mark_visited`] reports
//! `completed = true` only on the visit that moves the counter from
//! `total - 1` to `total`, and only if the latch has not fired since the last
//! [`World::reset`]. Un-visiting and re-visiting a volume cannot fire it again.

use basewalk_space::GridCoord;
use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::config::Variant;
use crate::volume::{BlockKind, Color, StaticVolume, VolumeId, VolumeKind};

/// Explorer base colors, in base order.
pub const BASE_COLORS: [u32; 6] = [0xffdd59, 0x2ed573, 0x1e90ff, 0xffa502, 0x3742fa, 0x7bed9f];

/// Explorer base footprint centers `(x, z)`, in base order.
pub const BASE_POSITIONS: [(f32, f32); 6] = [
    (-30.0, -30.0),
    (-30.0, 0.0),
    (-30.0, 30.0),
    (30.0, -30.0),
    (30.0, 0.0),
    (30.0, 30.0),
];

/// Explorer base half extents (an 8 x 6 x 8 building).
pub const BASE_HALF_EXTENTS: Vec3 = Vec3::new(4.0, 3.0, 4.0);

/// Cells within this distance of the spawn column stay free of scattered blocks.
const SPAWN_CLEARANCE: i32 = 2;

/// Errors from world edits.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WorldError {
    /// No volume has the given id.
    #[error("no volume with id {0}")]
    UnknownVolume(VolumeId),
}

/// Result of a first-time visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisitOutcome {
    /// Volume that was visited.
    pub id: VolumeId,
    /// Visited count after this visit.
    pub visited: usize,
    /// Number of collectible volumes.
    pub total: usize,
    /// Whether this visit fired the completion latch.
    pub completed: bool,
}

/// Ordered volume list with visit counters.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct World {
    volumes: Vec<StaticVolume>,
    next_id: u64,
    visited: usize,
    total: usize,
    completion_fired: bool,
}

impl World {
    /// Creates an empty world.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The six-base exploration world.
    #[must_use]
    pub fn explorer() -> Self {
        let mut world = Self::new();
        for (&(x, z), &color) in BASE_POSITIONS.iter().zip(BASE_COLORS.iter()) {
            world.add_volume(
                VolumeKind::Base,
                Vec3::new(x, BASE_HALF_EXTENTS.y, z),
                BASE_HALF_EXTENTS,
                Color::from_hex(color),
            );
        }
        world
    }

    /// A side-scrolling course: stone obstacles and floating pickups.
    #[must_use]
    pub fn platformer() -> Self {
        let mut world = Self::new();
        let pickup_half = Vec3::new(0.3, 0.3, 0.5);
        let pickup_color = Color::from_hex(0xf1_c4_0f);

        for x in [6, 14] {
            let coord = GridCoord::new(x, 0, 0);
            world.add_block(coord, BlockKind::Stone);
        }
        for (x, y) in [(3.0, 2.5), (10.0, 3.0), (18.0, 2.0)] {
            world.add_volume(VolumeKind::Pickup, Vec3::new(x, y, 0.5), pickup_half, pickup_color);
        }
        world
    }

    /// A flat voxel field with `count` blocks scattered deterministically.
    ///
    /// Blocks land on the ground layer (`y = 0`) within `extent` cells of the
    /// origin. Cells within two cells of the spawn column are left clear, so
    /// an `extent` of 2 or less has no free cell and yields an empty world.
    #[must_use]
    pub fn voxel_scatter(seed: u64, count: usize, extent: i32) -> Self {
        let mut world = Self::new();
        if extent <= SPAWN_CLEARANCE {
            return world;
        }
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut placed = 0;
        while placed < count {
            let x = rng.gen_range(-extent..=extent);
            let z = rng.gen_range(-extent..=extent);
            if x.abs() <= SPAWN_CLEARANCE && z.abs() <= SPAWN_CLEARANCE {
                continue;
            }
            let kind = BlockKind::ALL[rng.gen_range(0..BlockKind::ALL.len())];
            world.add_block(GridCoord::new(x, 0, z), kind);
            placed += 1;
        }
        world
    }

    /// Default world for `variant`. `seed` only affects voxel variants.
    #[must_use]
    pub fn for_variant(variant: Variant, seed: u64) -> Self {
        match variant {
            Variant::Explorer => Self::explorer(),
            Variant::Platformer => Self::platformer(),
            Variant::VoxelSandbox | Variant::VoxelFps => Self::voxel_scatter(seed, 24, 12),
        }
    }

    // -------------------------------------------------------------------------
    // Editing
    // -------------------------------------------------------------------------

    /// Appends a volume and returns its id.
    pub fn add_volume(&mut self, kind: VolumeKind, center: Vec3, half_extents: Vec3, color: Color) -> VolumeId {
        let id = VolumeId::new(self.next_id);
        self.next_id += 1;
        if kind.is_collectible() {
            self.total += 1;
        }
        self.volumes.push(StaticVolume::new(id, kind, center, half_extents, color));
        id
    }

    /// Places a unit block in `coord`.
    ///
    /// Occupied cells are not checked; stacking two blocks in one cell is
    /// allowed and both collide.
    pub fn add_block(&mut self, coord: GridCoord, kind: BlockKind) -> VolumeId {
        let id = self.add_volume(
            VolumeKind::Block { kind, coord },
            coord.center(),
            Vec3::splat(0.5),
            kind.color(),
        );
        debug!(%id, %coord, ?kind, "block added");
        id
    }

    /// Removes the most recently placed block in `coord`, if any.
    pub fn remove_block(&mut self, coord: GridCoord) -> Option<StaticVolume> {
        let index = self
            .volumes
            .iter()
            .rposition(|v| matches!(v.kind(), VolumeKind::Block { coord: c, .. } if c == coord))?;
        let volume = self.volumes.remove(index);
        debug!(id = %volume.id(), %coord, "block removed");
        Some(volume)
    }

    /// Removes a volume by id.
    ///
    /// Removal never completes a session. Completion only fires from
    /// [`World::mark_visited`], even if removing the last unvisited
    /// collectible leaves every remaining one visited.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::UnknownVolume`] if no volume has `id`.
    pub fn remove(&mut self, id: VolumeId) -> Result<StaticVolume, WorldError> {
        let index = self.index_of(id).ok_or(WorldError::UnknownVolume(id))?;
        let volume = self.volumes.remove(index);
        if volume.is_collectible() {
            self.total -= 1;
            if volume.is_visited() {
                self.visited -= 1;
            }
        }
        Ok(volume)
    }

    // -------------------------------------------------------------------------
    // Visits
    // -------------------------------------------------------------------------

    /// Marks the volume at `index` visited.
    ///
    /// Returns `None` if the index is out of range, the volume is not
    /// collectible, or it was already visited.
    pub fn mark_visited(&mut self, index: usize, marker: Color) -> Option<VisitOutcome> {
        let volume = self.volumes.get_mut(index)?;
        if !volume.mark_visited(marker) {
            return None;
        }
        let id = volume.id();
        self.visited += 1;

        let completed = self.total > 0 && self.visited == self.total && !self.completion_fired;
        if completed {
            self.completion_fired = true;
        }
        Some(VisitOutcome {
            id,
            visited: self.visited,
            total: self.total,
            completed,
        })
    }

    /// Clears the visited flag of one volume and decrements the counter.
    ///
    /// The completion latch stays set.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::UnknownVolume`] if no volume has `id`.
    pub fn unvisit(&mut self, id: VolumeId) -> Result<(), WorldError> {
        let index = self.index_of(id).ok_or(WorldError::UnknownVolume(id))?;
        if self.volumes[index].clear_visited() {
            self.visited -= 1;
        }
        Ok(())
    }

    /// Restores every volume and counter to the unvisited state.
    pub fn reset(&mut self) {
        for volume in &mut self.volumes {
            volume.reset();
        }
        self.visited = 0;
        self.completion_fired = false;
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// Volumes in scan order.
    #[must_use]
    pub fn volumes(&self) -> &[StaticVolume] {
        &self.volumes
    }

    pub(crate) fn volumes_mut(&mut self) -> &mut [StaticVolume] {
        &mut self.volumes
    }

    /// Looks up a volume by id.
    #[must_use]
    pub fn get(&self, id: VolumeId) -> Option<&StaticVolume> {
        self.volumes.iter().find(|v| v.id() == id)
    }

    fn index_of(&self, id: VolumeId) -> Option<usize> {
        self.volumes.iter().position(|v| v.id() == id)
    }

    /// Number of volumes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.volumes.len()
    }

    /// Whether the world has no volumes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.volumes.is_empty()
    }

    /// Number of visited collectibles.
    #[must_use]
    pub fn visited_count(&self) -> usize {
        self.visited
    }

    /// Number of collectibles.
    #[must_use]
    pub fn total_collectible(&self) -> usize {
        self.total
    }

    /// Whether the completion latch has fired since the last reset.
    #[must_use]
    pub fn completion_fired(&self) -> bool {
        self.completion_fired
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    mod layout_tests {
        use super::*;

        #[test]
        fn explorer_has_six_bases() {
            let world = World::explorer();
            assert_eq!(world.len(), 6);
            assert_eq!(world.total_collectible(), 6);
            assert_eq!(world.visited_count(), 0);

            let first = &world.volumes()[0];
            assert_eq!(first.center(), Vec3::new(-30.0, 3.0, -30.0));
            assert_eq!(first.base_color(), Color::from_hex(0xffdd59));
            assert_eq!(first.logical_box().min.y, 0.0);
            assert_eq!(first.logical_box().max.y, 6.0);
        }

        #[test]
        fn platformer_mixes_blocks_and_pickups() {
            let world = World::platformer();
            assert_eq!(world.total_collectible(), 3);
            assert_eq!(world.len(), 5);
        }

        #[test]
        fn voxel_scatter_is_deterministic() {
            let a = World::voxel_scatter(7, 30, 10);
            let b = World::voxel_scatter(7, 30, 10);
            assert_eq!(a, b);
            assert_eq!(a.len(), 30);
            assert_eq!(a.total_collectible(), 0);
        }

        #[test]
        fn voxel_scatter_seed_changes_layout() {
            let a = World::voxel_scatter(1, 30, 10);
            let b = World::voxel_scatter(2, 30, 10);
            assert_ne!(a, b);
        }

        #[test]
        fn voxel_scatter_keeps_spawn_clear() {
            let world = World::voxel_scatter(99, 50, 6);
            for volume in world.volumes() {
                if let VolumeKind::Block { coord, .. } = volume.kind() {
                    assert!(coord.x.abs() > 2 || coord.z.abs() > 2, "block at spawn: {coord}");
                    assert_eq!(coord.y, 0);
                }
            }
        }

        #[test]
        fn voxel_scatter_with_no_extent_is_empty() {
            assert!(World::voxel_scatter(1, 10, 0).is_empty());
        }

        #[test]
        fn voxel_scatter_inside_spawn_clearance_is_empty() {
            for extent in 1..=2 {
                assert!(World::voxel_scatter(1, 3, extent).is_empty());
            }
            assert_eq!(World::voxel_scatter(1, 3, 3).len(), 3);
        }
    }

    mod edit_tests {
        use super::*;

        #[test]
        fn ids_are_monotonic() {
            let mut world = World::new();
            let a = world.add_block(GridCoord::new(0, 0, 0), BlockKind::Dirt);
            let b = world.add_block(GridCoord::new(1, 0, 0), BlockKind::Dirt);
            assert!(a < b);
        }

        #[test]
        fn remove_block_takes_latest_in_cell() {
            let mut world = World::new();
            let coord = GridCoord::new(3, 1, -2);
            let _first = world.add_block(coord, BlockKind::Stone);
            let second = world.add_block(coord, BlockKind::Wood);

            let removed = world.remove_block(coord).unwrap();
            assert_eq!(removed.id(), second);
            assert_eq!(world.len(), 1);
        }

        #[test]
        fn remove_block_in_empty_cell_is_none() {
            let mut world = World::explorer();
            assert!(world.remove_block(GridCoord::new(0, 0, 0)).is_none());
            assert_eq!(world.len(), 6);
        }

        #[test]
        fn remove_visited_collectible_updates_counters() {
            let mut world = World::explorer();
            let id = world.volumes()[0].id();
            world.mark_visited(0, Color::VISITED).unwrap();

            world.remove(id).unwrap();
            assert_eq!(world.total_collectible(), 5);
            assert_eq!(world.visited_count(), 0);
        }

        #[test]
        fn removing_last_unvisited_does_not_complete() {
            let mut world = World::explorer();
            for i in 0..5 {
                world.mark_visited(i, Color::VISITED).unwrap();
            }
            let last = world.volumes()[5].id();

            world.remove(last).unwrap();
            assert_eq!(world.visited_count(), world.total_collectible());
            assert!(!world.completion_fired());
            // Nothing is left to visit, so the latch can no longer fire.
            assert!(world.mark_visited(0, Color::VISITED).is_none());
        }

        #[test]
        fn remove_unknown_id_errors() {
            let mut world = World::new();
            let err = world.remove(VolumeId::new(42)).unwrap_err();
            assert_eq!(err, WorldError::UnknownVolume(VolumeId::new(42)));
            assert_eq!(err.to_string(), "no volume with id 42");
        }
    }

    mod visit_tests {
        use super::*;

        #[test]
        fn visit_counts_once() {
            let mut world = World::explorer();
            let outcome = world.mark_visited(0, Color::VISITED).unwrap();
            assert_eq!(outcome.visited, 1);
            assert_eq!(outcome.total, 6);
            assert!(!outcome.completed);

            assert!(world.mark_visited(0, Color::VISITED).is_none());
            assert_eq!(world.visited_count(), 1);
        }

        #[test]
        fn completion_fires_on_last_visit_only() {
            let mut world = World::explorer();
            for i in 0..5 {
                assert!(!world.mark_visited(i, Color::VISITED).unwrap().completed);
            }
            assert!(world.mark_visited(5, Color::VISITED).unwrap().completed);
            assert!(world.completion_fired());
        }

        #[test]
        fn completion_latch_survives_unvisit() {
            let mut world = World::explorer();
            for i in 0..6 {
                world.mark_visited(i, Color::VISITED);
            }
            let id = world.volumes()[2].id();
            world.unvisit(id).unwrap();
            assert_eq!(world.visited_count(), 5);

            let again = world.mark_visited(2, Color::VISITED).unwrap();
            assert_eq!(again.visited, 6);
            assert!(!again.completed);
        }

        #[test]
        fn reset_rearms_completion() {
            let mut world = World::explorer();
            for i in 0..6 {
                world.mark_visited(i, Color::VISITED);
            }
            world.reset();
            assert_eq!(world, World::explorer());

            for i in 0..5 {
                world.mark_visited(i, Color::VISITED);
            }
            assert!(world.mark_visited(5, Color::VISITED).unwrap().completed);
        }

        #[test]
        fn empty_world_never_completes() {
            let mut world = World::voxel_scatter(3, 5, 8);
            assert!(world.mark_visited(0, Color::VISITED).is_none());
            assert!(!world.completion_fired());
        }

        #[test]
        fn unvisit_unknown_errors() {
            let mut world = World::explorer();
            assert!(world.unvisit(VolumeId::new(100)).is_err());
        }
    }
}

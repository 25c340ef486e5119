//! Game state owned by the frame loop, and its determinism hash.
//!
//! [`GameState`] replaces the per-demo globals: player, world, clock and frame
//! counter live in one value that the resolvers receive by `&mut`.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use basewalk_space::{hash_f32, hash_vec3};
use serde::{Deserialize, Serialize};

use crate::entity::Player;
use crate::volume::{StaticVolume, VolumeKind};
use crate::world::World;

/// Everything the frame step mutates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// The controllable entity.
    pub player: Player,
    /// Static volumes and visit counters.
    pub world: World,
    spawn: Player,
    time: f64,
    frame: u64,
}

impl GameState {
    /// Creates a state with the player at `spawn`.
    #[must_use]
    pub fn new(spawn: Player, world: World) -> Self {
        Self {
            player: spawn.clone(),
            world,
            spawn,
            time: 0.0,
            frame: 0,
        }
    }

    /// The state the player returns to on reset.
    #[must_use]
    pub fn spawn(&self) -> &Player {
        &self.spawn
    }

    /// Seconds of simulated time since start or last reset.
    #[must_use]
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Frames completed since start or last reset.
    #[must_use]
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub(crate) fn advance_time(&mut self, dt: f32) {
        self.time += f64::from(dt);
    }

    pub(crate) fn advance_frame(&mut self) {
        self.frame += 1;
    }

    /// Returns the player to spawn and every volume to unvisited.
    ///
    /// Blocks placed or removed since start are kept.
    pub fn reset(&mut self) {
        self.player = self.spawn.clone();
        self.world.reset();
        self.time = 0.0;
        self.frame = 0;
    }
}

/// Compute a deterministic hash of game state.
///
/// This hash includes:
/// - Frame counter and time (as bits)
/// - Player kinematics and flags
/// - Every volume's logical box, visit state, color and presentation
/// - World counters and completion latch
///
/// Two states built from the same inputs hash equal only if they are
/// bit-identical.
#[must_use]
pub fn hash_state(state: &GameState) -> u64 {
    let mut hasher = DefaultHasher::new();

    state.frame.hash(&mut hasher);
    state.time.to_bits().hash(&mut hasher);

    hash_player(&state.player, &mut hasher);
    hash_player(&state.spawn, &mut hasher);

    let world = &state.world;
    world.len().hash(&mut hasher);
    for volume in world.volumes() {
        hash_volume(volume, &mut hasher);
    }
    world.visited_count().hash(&mut hasher);
    world.total_collectible().hash(&mut hasher);
    world.completion_fired().hash(&mut hasher);

    hasher.finish()
}

fn hash_player<H: Hasher>(player: &Player, hasher: &mut H) {
    hash_vec3(player.position, hasher);
    hash_vec3(player.velocity, hasher);
    hash_f32(player.heading, hasher);
    player.facing.hash(hasher);
    hash_f32(player.look.yaw, hasher);
    hash_f32(player.look.pitch, hasher);
    player.grounded.hash(hasher);
    player.jumping.hash(hasher);
    player.running.hash(hasher);
}

fn hash_volume<H: Hasher>(volume: &StaticVolume, hasher: &mut H) {
    volume.id().hash(hasher);
    match volume.kind() {
        VolumeKind::Base => 0u8.hash(hasher),
        VolumeKind::Pickup => 1u8.hash(hasher),
        VolumeKind::Block { kind, coord } => {
            2u8.hash(hasher);
            kind.hash(hasher);
            coord.hash(hasher);
        }
    }
    basewalk_space::hash_aabb(&volume.logical_box(), hasher);
    volume.is_visited().hash(hasher);
    volume.color.hash(hasher);
    hash_vec3(volume.presentation.offset, hasher);
    volume.presentation.floating.hash(hasher);
}

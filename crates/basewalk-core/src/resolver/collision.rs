//! Collision resolver: player against static volumes.
//!
//! Volumes are scanned in world order. Every overlapping collectible that has
//! not been visited yet is marked visited before the response is applied, so
//! a single frame can visit several volumes.
//!
//! # Policies
//!
//! - [`CollisionPolicy::PushOut`]: overlap is tested against the player box at
//!   the tentative position, computed once. Each hit reverts the player to the
//!   confirmed position and nudges it `push_distance` away from the volume
//!   center. With several hits the last one wins.
//! - [`CollisionPolicy::AxisSeparated`]: the player box is recomputed per
//!   volume and moved out along the axis of least penetration. Velocity on
//!   that axis is zeroed; an upward push lands the player.
//!
//! A push-out nudge may leave the player below the floor. The ground phase
//! lifts it back on the next frame unless
//! [`CollisionConfig::clamp_push_to_floor`] snaps it up immediately.

use basewalk_space::push_direction;
use glam::Vec3;
use tracing::{debug, info};

use super::{Frame, Resolver};
use crate::config::{CollisionConfig, CollisionPolicy, MovementConfig};
use crate::entity::Player;
use crate::event::{EventLog, GameEvent};
use crate::world::World;

/// Resolver for static-volume overlap, visits and push-out.
#[derive(Debug, Clone, Copy, Default)]
pub struct CollisionResolver;

impl Resolver for CollisionResolver {
    fn name(&self) -> &'static str {
        "collision"
    }

    fn resolve(&self, frame: &mut Frame<'_>) {
        let state = &mut *frame.state;
        resolve_collisions(
            &mut state.player,
            frame.confirmed,
            &mut state.world,
            &frame.config.movement,
            &frame.config.collision,
            frame.events,
        );
    }
}

/// Resolves the player against every volume in `world`.
///
/// `confirmed` is the position at the end of the previous frame. Returns the
/// number of volumes the player overlapped.
pub fn resolve_collisions(
    player: &mut Player,
    confirmed: Vec3,
    world: &mut World,
    movement: &MovementConfig,
    collision: &CollisionConfig,
    events: &mut EventLog,
) -> usize {
    let contacts = match collision.policy {
        CollisionPolicy::PushOut => push_out(player, confirmed, world, movement, collision, events),
        CollisionPolicy::AxisSeparated => axis_separated(player, world, movement, collision, events),
    };

    if collision.clamp_push_to_floor && contacts > 0 && player.position.y < movement.floor_height {
        player.position.y = movement.floor_height;
    }
    contacts
}

fn push_out(
    player: &mut Player,
    confirmed: Vec3,
    world: &mut World,
    movement: &MovementConfig,
    collision: &CollisionConfig,
    events: &mut EventLog,
) -> usize {
    let tentative = player.collision_box(movement);
    let mut contacts = 0;

    for index in 0..world.len() {
        let (hit, center) = {
            let volume = &world.volumes()[index];
            (tentative.intersects(&volume.logical_box()), volume.center())
        };
        if !hit {
            continue;
        }
        contacts += 1;
        visit(world, index, collision, events);

        let direction = push_direction(center, player.position);
        player.position = confirmed + direction * collision.push_distance;
    }
    contacts
}

fn axis_separated(
    player: &mut Player,
    world: &mut World,
    movement: &MovementConfig,
    collision: &CollisionConfig,
    events: &mut EventLog,
) -> usize {
    let mut contacts = 0;

    for index in 0..world.len() {
        let current = player.collision_box(movement);
        let Some(mtv) = current.penetration(&world.volumes()[index].logical_box()) else {
            continue;
        };
        contacts += 1;
        visit(world, index, collision, events);

        player.position += mtv;
        if mtv.x != 0.0 {
            player.velocity.x = 0.0;
        }
        if mtv.z != 0.0 {
            player.velocity.z = 0.0;
        }
        if mtv.y != 0.0 {
            player.velocity.y = 0.0;
            if mtv.y > 0.0 {
                player.grounded = true;
                player.jumping = false;
            }
        }
    }
    contacts
}

fn visit(world: &mut World, index: usize, collision: &CollisionConfig, events: &mut EventLog) {
    let Some(outcome) = world.mark_visited(index, collision.visited_color) else {
        return;
    };
    debug!(id = %outcome.id, visited = outcome.visited, total = outcome.total, "volume visited");
    events.push(GameEvent::VolumeVisited {
        id: outcome.id,
        visited: outcome.visited,
        total: outcome.total,
    });
    if outcome.completed {
        info!(total = outcome.total, "all collectibles visited");
        events.push(GameEvent::AllCollected { total: outcome.total });
    }
}

// =============================================================================
// Tests
// =============================================================================

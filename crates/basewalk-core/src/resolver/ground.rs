//! Ground resolver: the floor plane.

use super::{Frame, Resolver};
use crate::entity::Player;

/// Resolver that keeps the player at or above the floor height.
#[derive(Debug, Clone, Copy, Default)]
pub struct GroundResolver;

impl Resolver for GroundResolver {
    fn name(&self) -> &'static str {
        "ground"
    }

    fn resolve(&self, frame: &mut Frame<'_>) {
        resolve_ground(&mut frame.state.player, frame.config.movement.floor_height);
    }
}

/// Snaps the player onto the floor when at or below it.
///
/// Landing zeroes vertical velocity and clears the jumping flag. Above the
/// floor the player is airborne. Returns the new grounded flag.
pub fn resolve_ground(player: &mut Player, floor: f32) -> bool {
    if player.position.y <= floor {
        player.position.y = floor;
        player.velocity.y = 0.0;
        player.grounded = true;
        player.jumping = false;
    } else {
        player.grounded = false;
    }
    player.grounded
}

//! Kinematic integrator.
//!
//! Per frame, in order:
//! 1. Apply the pointer delta to the look orientation
//! 2. Set horizontal velocity from the held movement keys
//! 3. Apply a jump impulse on a key-down edge while grounded
//! 4. Subtract `gravity * dt` from vertical velocity
//! 5. Integrate `position += velocity * dt`
//!
//! Within one axis the later key in forward/back/left/right order wins, so
//! holding `w` and `s` together moves back and `a` with `d` moves right.

use glam::Vec2;
use tracing::debug;

use crate::config::{HorizontalMode, LookConfig, MovementConfig, MovementFrame, Plane};
use crate::entity::{Facing, Player};
use crate::event::GameEvent;
use crate::input::{InputSnapshot, Key};

use super::{Frame, Resolver};

/// Clamps a raw frame delta into `[0, max_dt]`.
///
/// Negative, NaN and infinite deltas become `0`.
#[must_use]
pub fn clamp_dt(dt: f32, max_dt: f32) -> f32 {
    if dt.is_finite() && dt > 0.0 {
        dt.min(max_dt)
    } else {
        0.0
    }
}

/// Resolver for input-driven velocity, jumping, gravity and integration.
#[derive(Debug, Clone, Copy, Default)]
pub struct KinematicResolver;

impl Resolver for KinematicResolver {
    fn name(&self) -> &'static str {
        "kinematic"
    }

    fn resolve(&self, frame: &mut Frame<'_>) {
        let player = &mut frame.state.player;
        if let Some(event) = integrate(player, frame.input, &frame.config.movement, &frame.config.look, frame.dt) {
            debug!(position = ?player.position, "jump");
            frame.events.push(event);
        }
    }
}

/// Advances the player's velocity and position by `dt`.
///
/// Returns a [`GameEvent::Jumped`] if a jump impulse was applied.
pub fn integrate(
    player: &mut Player,
    input: &InputSnapshot,
    movement: &MovementConfig,
    look: &LookConfig,
    dt: f32,
) -> Option<GameEvent> {
    player.look.apply(input.pointer_delta, look);

    let run = input.is_held(Key::Run);
    let speed = if run { movement.run_speed } else { movement.walk_speed };
    let moving = apply_horizontal(player, input, movement, speed);
    player.running = run && moving;

    let mut jumped = None;
    if input.was_pressed(Key::Jump) && player.grounded {
        player.velocity.y = movement.jump_impulse;
        player.grounded = false;
        player.jumping = true;
        jumped = Some(GameEvent::Jumped {
            position: player.position,
        });
    }

    player.velocity.y -= movement.gravity * dt;
    player.position += player.velocity * dt;

    jumped
}

/// Sets horizontal velocity and facing. Returns whether any movement key is active.
fn apply_horizontal(player: &mut Player, input: &InputSnapshot, movement: &MovementConfig, speed: f32) -> bool {
    let left = input.is_held(Key::Left);
    let right = input.is_held(Key::Right);

    match movement.plane {
        Plane::XY => {
            player.velocity.x = match movement.horizontal_mode {
                HorizontalMode::Reset => reset_axis(left, right) * speed,
                HorizontalMode::Persistent => persistent_axis(player.velocity.x, left, right, speed),
            };
            player.velocity.z = 0.0;
            if player.velocity.x < 0.0 {
                player.facing = Facing::Left;
            } else if player.velocity.x > 0.0 {
                player.facing = Facing::Right;
            }
            player.velocity.x != 0.0
        }
        Plane::XZ => {
            let forward = input.is_held(Key::Forward);
            let back = input.is_held(Key::Back);

            match movement.frame {
                MovementFrame::World => {
                    match movement.horizontal_mode {
                        HorizontalMode::Reset => {
                            player.velocity.x = reset_axis(left, right) * speed;
                            player.velocity.z = reset_axis(forward, back) * speed;
                        }
                        HorizontalMode::Persistent => {
                            player.velocity.x = persistent_axis(player.velocity.x, left, right, speed);
                            player.velocity.z = persistent_axis(player.velocity.z, forward, back, speed);
                        }
                    }
                    if player.velocity.x != 0.0 || player.velocity.z != 0.0 {
                        player.heading = player.velocity.x.atan2(player.velocity.z);
                    }
                }
                MovementFrame::ViewRelative => {
                    let wish = Vec2::new(reset_axis(left, right), reset_axis(forward, back));
                    let world = rotate_by_yaw(wish, player.look.yaw) * speed;
                    player.velocity.x = world.x;
                    player.velocity.z = world.y;
                    player.heading = player.look.yaw;
                }
            }
            player.velocity.x != 0.0 || player.velocity.z != 0.0
        }
    }
}

/// `-1`, `0` or `1` from a pair of opposing keys; the positive key wins ties.
fn reset_axis(negative: bool, positive: bool) -> f32 {
    if positive {
        1.0
    } else if negative {
        -1.0
    } else {
        0.0
    }
}

/// Keeps the previous direction while its key is held, otherwise behaves
/// like [`reset_axis`].
fn persistent_axis(previous: f32, negative: bool, positive: bool, speed: f32) -> f32 {
    if previous < 0.0 && negative {
        -speed
    } else if previous > 0.0 && positive {
        speed
    } else {
        reset_axis(negative, positive) * speed
    }
}

/// Rotates an `(x, z)` ground-plane vector about +y by `yaw` radians.
fn rotate_by_yaw(v: Vec2, yaw: f32) -> Vec2 {
    let (sin, cos) = yaw.sin_cos();
    Vec2::new(v.x * cos + v.y * sin, -v.x * sin + v.y * cos)
}

// =============================================================================
// Tests
// =============================================================================

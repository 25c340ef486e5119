//! Stats projection: the numbers the HUD shows each frame.
//!
//! Projection is pure. It reads the resolved player and world and produces a
//! [`Stats`] value whose `*_label` methods give the exact strings to display.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::{Plane, PositionRounding, SpeedMode, StatsConfig};
use crate::entity::Player;
use crate::world::World;

/// What the player is doing, for the action label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Not moving
    Idle,
    /// Moving below the running threshold
    Walking,
    /// Moving above the threshold or with the run key
    Running,
    /// Airborne with vertical velocity
    Jumping,
}

impl Action {
    /// HUD text.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Walking => "Walking",
            Self::Running => "Running",
            Self::Jumping => "Jumping",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Per-frame HUD values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    /// Measured speed (units/s).
    pub speed: f32,
    /// Current action.
    pub action: Action,
    /// Integer display coordinates in the variant's plane.
    pub position: (i32, i32),
    /// Visited collectibles.
    pub visited: usize,
    /// Total collectibles.
    pub total: usize,
}

impl Stats {
    /// Speed rounded to an integer.
    #[must_use]
    pub fn speed_label(&self) -> String {
        round_half_up(self.speed).to_string()
    }

    /// Action text.
    #[must_use]
    pub fn action_label(&self) -> &'static str {
        self.action.label()
    }

    /// `"a, b"` coordinate text.
    #[must_use]
    pub fn position_label(&self) -> String {
        format!("{}, {}", self.position.0, self.position.1)
    }

    /// `"visited/total"` text.
    #[must_use]
    pub fn visited_label(&self) -> String {
        format!("{}/{}", self.visited, self.total)
    }
}

/// Picks the action label. Rules are checked in priority order.
#[must_use]
pub fn classify(player: &Player, speed: f32, running_threshold: f32) -> Action {
    if player.velocity.y != 0.0 && !player.grounded {
        Action::Jumping
    } else if speed > running_threshold || player.running {
        Action::Running
    } else if speed > 0.0 {
        Action::Walking
    } else {
        Action::Idle
    }
}

/// Derives the HUD values for the current frame.
#[must_use]
pub fn project(player: &Player, world: &World, config: &StatsConfig, plane: Plane) -> Stats {
    let speed = match config.speed_mode {
        SpeedMode::Horizontal => player.horizontal_speed(plane),
        SpeedMode::Full => player.velocity.length(),
    };
    let action = classify(player, speed, config.running_threshold);

    let (a, b) = match plane {
        Plane::XZ => (player.position.x, player.position.z),
        Plane::XY => (player.position.x, player.position.y),
    };
    let position = match config.rounding {
        PositionRounding::Round => (round_half_up(a), round_half_up(b)),
        PositionRounding::Floor => (floor_i32(a), floor_i32(b)),
    };

    Stats {
        speed,
        action,
        position,
        visited: world.visited_count(),
        total: world.total_collectible(),
    }
}

/// Rounds to nearest, halves toward positive infinity (`-2.5 -> -2`).
#[allow(clippy::cast_possible_truncation)]
fn round_half_up(value: f32) -> i32 {
    (value + 0.5).floor() as i32
}

#[allow(clippy::cast_possible_truncation)]
fn floor_i32(value: f32) -> i32 {
    value.floor() as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use glam::Vec3;

    fn grounded_player(velocity: Vec3) -> Player {
        let mut player = Player::spawn(Vec3::new(0.0, 1.0, 0.0));
        player.grounded = true;
        player.velocity = velocity;
        player
    }

    mod action_tests {
        use super::*;

        #[test]
        fn idle_when_still() {
            let player = grounded_player(Vec3::ZERO);
            assert_eq!(classify(&player, 0.0, 12.0), Action::Idle);
        }

        #[test]
        fn walking_below_threshold() {
            let player = grounded_player(Vec3::new(10.0, 0.0, 0.0));
            assert_eq!(classify(&player, 10.0, 12.0), Action::Walking);
        }

        #[test]
        fn running_above_threshold() {
            let player = grounded_player(Vec3::new(20.0, 0.0, 0.0));
            assert_eq!(classify(&player, 20.0, 12.0), Action::Running);
        }

        #[test]
        fn running_flag_wins_over_speed() {
            let mut player = grounded_player(Vec3::new(5.0, 0.0, 0.0));
            player.running = true;
            assert_eq!(classify(&player, 5.0, 12.0), Action::Running);
        }

        #[test]
        fn jumping_beats_running() {
            let mut player = grounded_player(Vec3::new(20.0, 4.0, 0.0));
            player.grounded = false;
            player.running = true;
            assert_eq!(classify(&player, 20.0, 12.0), Action::Jumping);
        }

        #[test]
        fn grounded_with_vertical_velocity_is_not_jumping() {
            let player = grounded_player(Vec3::new(0.0, -0.1, 0.0));
            assert_eq!(classify(&player, 0.0, 12.0), Action::Idle);
        }

        #[test]
        fn airborne_without_vertical_velocity_is_not_jumping() {
            let mut player = grounded_player(Vec3::ZERO);
            player.grounded = false;
            assert_eq!(classify(&player, 0.0, 12.0), Action::Idle);
        }
    }

    mod projection_tests {
        use super::*;

        #[test]
        fn explorer_projection() {
            let config = GameConfig::explorer();
            let mut player = grounded_player(Vec3::new(6.0, 0.0, -8.0));
            player.position = Vec3::new(-2.5, 1.0, 7.6);
            let world = World::explorer();

            let stats = project(&player, &world, &config.stats, config.movement.plane);
            assert!((stats.speed - 10.0).abs() < 1e-6);
            assert_eq!(stats.action, Action::Walking);
            assert_eq!(stats.position, (-2, 8));
            assert_eq!(stats.speed_label(), "10");
            assert_eq!(stats.action_label(), "Walking");
            assert_eq!(stats.position_label(), "-2, 8");
            assert_eq!(stats.visited_label(), "0/6");
        }

        #[test]
        fn platformer_uses_xy_and_floor() {
            let config = GameConfig::platformer();
            let mut player = grounded_player(Vec3::new(-3.0, 0.0, 0.0));
            player.position = Vec3::new(-0.2, 2.9, 0.5);
            let world = World::platformer();

            let stats = project(&player, &world, &config.stats, config.movement.plane);
            assert_eq!(stats.position, (-1, 2));
            assert_eq!(stats.visited_label(), "0/3");
        }

        #[test]
        fn full_speed_mode_includes_vertical() {
            let config = GameConfig::platformer();
            let mut player = grounded_player(Vec3::new(3.0, 4.0, 0.0));
            player.grounded = false;
            let stats = project(&player, &World::new(), &config.stats, config.movement.plane);
            assert!((stats.speed - 5.0).abs() < 1e-6);
            assert_eq!(stats.action, Action::Jumping);
        }

        #[test]
        fn round_half_up_matches_hud_rounding() {
            assert_eq!(round_half_up(2.5), 3);
            assert_eq!(round_half_up(-2.5), -2);
            assert_eq!(round_half_up(-2.6), -3);
            assert_eq!(round_half_up(0.49), 0);
        }
    }
}

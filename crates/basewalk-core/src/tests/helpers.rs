//! Test helper functions for setting up simulations and driving frames.

use glam::Vec3;

use crate::config::GameConfig;
use crate::input::InputSnapshot;
use crate::presenter::{NullPresenter, Presenter};
use crate::simulation::{FrameReport, Simulation};
use crate::world::World;

/// Frame delta used throughout the scenario tests (60 Hz).
pub const DT: f32 = 1.0 / 60.0;

/// Installs a test-writer tracing subscriber. Safe to call from every test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

// =============================================================================
// Simulation Setup
// =============================================================================

/// Builds a simulation for `config` over `world`.
///
/// # Panics
///
/// Panics if `config` is invalid.
pub fn simulation_with(config: GameConfig, world: World) -> Simulation {
    Simulation::new(config, world).expect("test config is valid")
}

/// An explorer simulation whose player has already landed on the floor.
pub fn landed_explorer() -> Simulation {
    let mut sim = Simulation::explorer();
    settle(&mut sim);
    sim
}

/// Steps idle frames until the player is grounded.
///
/// # Panics
///
/// Panics if the player has not landed within two seconds.
pub fn settle(sim: &mut Simulation) {
    for _ in 0..120 {
        if sim.state().player.grounded {
            return;
        }
        step_idle(sim);
    }
    assert!(sim.state().player.grounded, "player never landed");
}

/// Moves the player to `position` with zero velocity.
pub fn teleport(sim: &mut Simulation, position: Vec3) {
    let player = &mut sim.state_mut().player;
    player.position = position;
    player.velocity = Vec3::ZERO;
}

// =============================================================================
// Frame Drivers
// =============================================================================

/// Steps one idle frame, discarding output.
///
/// # Panics
///
/// Panics if the step faults.
pub fn step_idle(sim: &mut Simulation) -> FrameReport {
    sim.step(&InputSnapshot::idle(), DT, &mut NullPresenter)
        .expect("step succeeds")
}

/// Steps `frames` frames with the same input, returning every report.
///
/// # Panics
///
/// Panics if any step faults.
pub fn run_frames(
    sim: &mut Simulation,
    input: InputSnapshot,
    frames: usize,
    presenter: &mut dyn Presenter,
) -> Vec<FrameReport> {
    (0..frames)
        .map(|_| sim.step(&input, DT, presenter).expect("step succeeds"))
        .collect()
}

//! # Basewalk Core
//!
//! Per-frame player movement and collision for small browser-style games.
//!
//! One [`Simulation`] step turns an input snapshot and an elapsed time into a
//! new player state, visit bookkeeping for static volumes, and the values a
//! HUD displays. Four variants share the step and differ only in their
//! [`GameConfig`] preset and world layout:
//!
//! - **Explorer**: walk and jump between six bases; visiting all of them completes the session
//! - **Platformer**: side-scrolling run through blocks and floating pickups
//! - **Voxel sandbox**: walk a block field, place and remove blocks
//! - **Voxel FPS**: the sandbox with pointer-locked mouse look
//!
//! ## Architecture
//!
//! - **State**: [`GameState`] holds the player, the [`World`] and the clock
//! - **Resolvers**: kinematic, ground, collision and presentation phases
//! - **Presenter**: audio, HUD and alerts receive [`GameEvent`]s and [`Stats`]
//!
//! ## Usage
//!
//! ```
//! use basewalk_core::{InputState, RecordingPresenter, Simulation};
//!
//! let mut sim = Simulation::explorer();
//! let mut input = InputState::new();
//! let mut presenter = RecordingPresenter::new();
//!
//! input.key_down("a");
//! for _ in 0..30 {
//!     let snapshot = input.snapshot();
//!     sim.step(&snapshot, 1.0 / 60.0, &mut presenter).unwrap();
//! }
//!
//! let stats = presenter.last_stats.unwrap();
//! assert_eq!(stats.action_label(), "Walking");
//! assert_eq!(stats.visited_label(), "0/6");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

// Re-export the spatial primitives crate
pub use basewalk_space;

// Core modules
pub mod config;
pub mod entity;
pub mod event;
pub mod input;
pub mod presenter;
pub mod resolver;
pub mod simulation;
pub mod state;
pub mod stats;
pub mod volume;
pub mod world;

#[cfg(test)]
mod tests;

pub use config::{ConfigError, GameConfig, Variant};
pub use entity::{Facing, Player};
pub use event::{EventLog, GameEvent, Sound};
pub use input::{InputSnapshot, InputState, Key, Keys, LookState};
pub use presenter::{slider_gain, NullPresenter, Presenter, RecordingPresenter};
pub use simulation::{FrameLoop, FrameReport, LoopError, Simulation, StepError};
pub use state::{hash_state, GameState};
pub use stats::{Action, Stats};
pub use volume::{BlockKind, Color, StaticVolume, VolumeId, VolumeKind};
pub use world::{World, WorldError};

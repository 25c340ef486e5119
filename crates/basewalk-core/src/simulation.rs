//! Simulation module with the per-frame step.
//!
//! The `Simulation` owns the [`GameState`] and runs the resolver pipeline once
//! per frame:
//!
//! 1. **CLAMP**: Sanitize the elapsed time and record the confirmed position
//! 2. **RESOLVE**: Run each [`Resolver`] in order against the state
//! 3. **PROJECT**: Derive [`Stats`] from the resolved state
//! 4. **PRESENT**: Hand events and stats to the [`Presenter`], advance the frame
//!
//! # Faults
//!
//! After every phase the player is checked for non-finite values. A fault
//! halts the simulation: the failing step returns
//! [`StepError::NonFiniteState`] and every later step returns
//! [`StepError::Halted`].
//!
//! # Example
//!
//! ```
//! use basewalk_core::input::{InputSnapshot, Keys};
//! use basewalk_core::presenter::NullPresenter;
//! use basewalk_core::simulation::Simulation;
//!
//! let mut sim = Simulation::explorer();
//! let input = InputSnapshot::holding(Keys::FORWARD);
//!
//! for _ in 0..10 {
//!     sim.step(&input, 1.0 / 60.0, &mut NullPresenter).unwrap();
//! }
//!
//! assert_eq!(sim.state().frame(), 10);
//! assert!(sim.state().player.position.z < 0.0);
//! ```

use std::fmt;

use basewalk_space::GridCoord;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::config::{ConfigError, GameConfig};
use crate::entity::Player;
use crate::event::{EventLog, GameEvent};
use crate::input::InputSnapshot;
use crate::presenter::Presenter;
use crate::resolver::{clamp_dt, default_pipeline, Frame, Resolver};
use crate::state::GameState;
use crate::stats::{project, Stats};
use crate::volume::{BlockKind, VolumeId};
use crate::world::World;

// =============================================================================
// Errors
// =============================================================================

/// Errors from [`Simulation::step`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StepError {
    /// A phase left the player with a NaN or infinite position or velocity.
    #[error("non-finite player state after {phase} phase in frame {frame}")]
    NonFiniteState {
        /// Name of the resolver that produced the fault.
        phase: &'static str,
        /// Frame number of the faulting step.
        frame: u64,
    },

    /// The simulation halted on an earlier fault.
    #[error("simulation halted after an earlier fault")]
    Halted,
}

/// Errors from [`FrameLoop`] scheduling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoopError {
    /// A frame is already registered.
    #[error("a frame is already scheduled")]
    AlreadyScheduled,

    /// `run_frame` was called without a registration.
    #[error("no frame is scheduled")]
    NotScheduled,

    /// The step failed; the registration was dropped.
    #[error(transparent)]
    Fault(#[from] StepError),
}

// =============================================================================
// Simulation
// =============================================================================

/// What one successful step produced.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameReport {
    /// Frame number of this step (0-based).
    pub frame: u64,
    /// Clamped elapsed time used.
    pub dt: f32,
    /// Events delivered this frame, in order.
    pub events: Vec<GameEvent>,
    /// HUD values after the step.
    pub stats: Stats,
}

/// The frame-step orchestrator.
///
/// Owns the configuration, the mutable [`GameState`] and the resolver
/// pipeline. Edits made between frames (reset, block placement) queue their
/// events and are delivered at the start of the next step.
pub struct Simulation {
    config: GameConfig,
    state: GameState,
    resolvers: Vec<Box<dyn Resolver>>,
    pending: EventLog,
    halted: bool,
}

impl fmt::Debug for Simulation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Simulation")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("resolvers", &format!("[{} resolvers]", self.resolvers.len()))
            .field("pending", &self.pending.len())
            .field("halted", &self.halted)
            .finish()
    }
}

impl Simulation {
    /// Creates a simulation over `world` with the player at the configured spawn.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if `config` fails validation.
    pub fn new(config: GameConfig, world: World) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config, world))
    }

    /// Creates a simulation with the default world for `config.variant`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if `config` fails validation.
    pub fn from_config(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        let world = World::for_variant(config.variant, seed);
        Self::new(config, world)
    }

    /// The six-base explorer with its preset configuration.
    #[must_use]
    pub fn explorer() -> Self {
        Self::build(GameConfig::explorer(), World::explorer())
    }

    fn build(config: GameConfig, world: World) -> Self {
        let spawn = Player::spawn(config.movement.spawn_position);
        Self {
            config,
            state: GameState::new(spawn, world),
            resolvers: default_pipeline(),
            pending: EventLog::new(),
            halted: false,
        }
    }

    /// Executes one frame.
    ///
    /// `raw_dt` is the wall-clock delta in seconds; it is clamped to
    /// `[0, max_dt]` before use. Queued edit events are delivered ahead of
    /// this frame's events.
    ///
    /// # Errors
    ///
    /// - [`StepError::NonFiniteState`] if a phase corrupts the player; the
    ///   simulation halts and the presenter is not called
    /// - [`StepError::Halted`] on any step after a fault
    pub fn step(&mut self, input: &InputSnapshot, raw_dt: f32, presenter: &mut dyn Presenter) -> Result<FrameReport, StepError> {
        if self.halted {
            return Err(StepError::Halted);
        }

        let frame_no = self.state.frame();
        let dt = clamp_dt(raw_dt, self.config.movement.max_dt);
        if dt.to_bits() != raw_dt.to_bits() {
            warn!(raw_dt, dt, frame = frame_no, "frame delta clamped");
        }

        let confirmed = self.state.player.position;
        self.state.advance_time(dt);
        let mut events = std::mem::take(&mut self.pending);

        for resolver in &self.resolvers {
            let mut frame = Frame {
                state: &mut self.state,
                input,
                config: &self.config,
                dt,
                confirmed,
                events: &mut events,
            };
            resolver.resolve(&mut frame);

            if !self.state.player.is_finite() {
                self.halted = true;
                let phase = resolver.name();
                error!(phase, frame = frame_no, player = ?self.state.player, "non-finite player state; halting");
                return Err(StepError::NonFiniteState { phase, frame: frame_no });
            }
        }

        let stats = project(
            &self.state.player,
            &self.state.world,
            &self.config.stats,
            self.config.movement.plane,
        );
        let events = events.take();
        for event in &events {
            presenter.on_event(event);
        }
        presenter.on_stats(&stats);

        self.state.advance_frame();
        Ok(FrameReport {
            frame: frame_no,
            dt,
            events,
            stats,
        })
    }

    /// Returns the player to spawn and every volume to unvisited.
    ///
    /// Placed blocks are kept. A [`GameEvent::Reset`] is delivered with the
    /// next step. A halted simulation stays halted.
    pub fn reset(&mut self) {
        info!(frame = self.state.frame(), "reset");
        self.state.reset();
        self.pending.push(GameEvent::Reset);
    }

    /// Places a block and queues [`GameEvent::BlockAdded`].
    pub fn add_block(&mut self, coord: GridCoord, kind: BlockKind) -> VolumeId {
        let id = self.state.world.add_block(coord, kind);
        self.pending.push(GameEvent::BlockAdded { id, coord });
        id
    }

    /// Removes the latest block in `coord` and queues [`GameEvent::BlockRemoved`].
    ///
    /// Returns `None` if the cell is empty.
    pub fn remove_block(&mut self, coord: GridCoord) -> Option<VolumeId> {
        let id = self.state.world.remove_block(coord)?.id();
        self.pending.push(GameEvent::BlockRemoved { id, coord });
        Some(id)
    }

    /// Returns the current state.
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Returns mutable access to the state.
    #[must_use]
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    /// Returns the active configuration.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Whether a fault has halted the simulation.
    #[must_use]
    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// Appends a resolver to the end of the pipeline.
    pub fn add_resolver(&mut self, resolver: Box<dyn Resolver>) {
        self.resolvers.push(resolver);
    }

    /// Number of resolvers in the pipeline.
    #[must_use]
    pub fn resolver_count(&self) -> usize {
        self.resolvers.len()
    }
}

// =============================================================================
// Frame loop
// =============================================================================

/// Single-slot frame scheduler around a [`Simulation`].
///
/// At most one frame is registered at a time. Running a frame consumes the
/// registration and, on success, registers the next one. A fault drops the
/// registration.
#[derive(Debug)]
pub struct FrameLoop {
    simulation: Simulation,
    scheduled: bool,
}

impl FrameLoop {
    /// Wraps `simulation` with nothing scheduled.
    #[must_use]
    pub fn new(simulation: Simulation) -> Self {
        Self {
            simulation,
            scheduled: false,
        }
    }

    /// Registers the next frame.
    ///
    /// # Errors
    ///
    /// Returns [`LoopError::AlreadyScheduled`] if a frame is already registered.
    pub fn schedule(&mut self) -> Result<(), LoopError> {
        if self.scheduled {
            return Err(LoopError::AlreadyScheduled);
        }
        self.scheduled = true;
        Ok(())
    }

    /// Runs the registered frame and registers the next one.
    ///
    /// # Errors
    ///
    /// - [`LoopError::NotScheduled`] if no frame is registered
    /// - [`LoopError::Fault`] if the step fails; nothing stays registered
    pub fn run_frame(&mut self, input: &InputSnapshot, dt: f32, presenter: &mut dyn Presenter) -> Result<FrameReport, LoopError> {
        if !self.scheduled {
            return Err(LoopError::NotScheduled);
        }
        self.scheduled = false;
        let report = self.simulation.step(input, dt, presenter)?;
        self.scheduled = true;
        Ok(report)
    }

    /// Whether a frame is registered.
    #[must_use]
    pub fn is_scheduled(&self) -> bool {
        self.scheduled
    }

    /// Returns the wrapped simulation.
    #[must_use]
    pub fn simulation(&self) -> &Simulation {
        &self.simulation
    }

    /// Returns mutable access to the wrapped simulation.
    #[must_use]
    pub fn simulation_mut(&mut self) -> &mut Simulation {
        &mut self.simulation
    }
}

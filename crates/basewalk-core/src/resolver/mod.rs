//! Resolver module: the ordered phases of one frame step.
//!
//! Each phase is a [`Resolver`] that mutates the [`Frame`] in place. The
//! [`Simulation`](crate::simulation::Simulation) runs them in a fixed order:
//!
//! 1. [`KinematicResolver`]: look, input-driven velocity, jump, gravity, integration
//! 2. [`GroundResolver`]: floor clamp and grounded flag
//! 3. [`CollisionResolver`]: static-volume overlap, visits, push-out
//! 4. [`PresentationResolver`]: float animation of visited volumes
//!
//! # Invariants
//!
//! - Resolvers MUST NOT read the host input map; only `frame.input`
//! - Resolvers MUST be deterministic given the same state, input and `dt`
//! - Collision reads logical boxes only, never `presentation`
//!
//! Each phase also exposes a free function (`integrate`, `resolve_ground`,
//! `resolve_collisions`) so it can be exercised without a full frame.

mod collision;
mod ground;
mod kinematic;
mod presentation;

pub use collision::{resolve_collisions, CollisionResolver};
pub use ground::{resolve_ground, GroundResolver};
pub use kinematic::{clamp_dt, integrate, KinematicResolver};
pub use presentation::PresentationResolver;

use glam::Vec3;

use crate::config::GameConfig;
use crate::event::EventLog;
use crate::input::InputSnapshot;
use crate::state::GameState;

/// Mutable context shared by the phases of one frame.
#[derive(Debug)]
pub struct Frame<'a> {
    /// State being stepped.
    pub state: &'a mut GameState,
    /// Input captured for this frame.
    pub input: &'a InputSnapshot,
    /// Active configuration.
    pub config: &'a GameConfig,
    /// Clamped elapsed time (seconds).
    pub dt: f32,
    /// Player position confirmed at the end of the previous frame.
    pub confirmed: Vec3,
    /// Events raised so far this frame.
    pub events: &'a mut EventLog,
}

/// One phase of the frame step.
///
/// # Example
///
/// ```
/// use basewalk_core::resolver::{Frame, Resolver};
///
/// struct Freeze;
///
/// impl Resolver for Freeze {
///     fn name(&self) -> &'static str {
///         "freeze"
///     }
///
///     fn resolve(&self, frame: &mut Frame<'_>) {
///         frame.state.player.velocity = glam::Vec3::ZERO;
///     }
/// }
/// ```
pub trait Resolver: Send + Sync {
    /// Short phase name used in logs and errors.
    fn name(&self) -> &'static str;

    /// Applies this phase to the frame.
    fn resolve(&self, frame: &mut Frame<'_>);
}

/// The standard phase order.
#[must_use]
pub fn default_pipeline() -> Vec<Box<dyn Resolver>> {
    vec![
        Box::new(KinematicResolver),
        Box::new(GroundResolver),
        Box::new(CollisionResolver),
        Box::new(PresentationResolver),
    ]
}

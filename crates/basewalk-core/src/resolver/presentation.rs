//! Presentation resolver: float animation of visited volumes.
//!
//! Only `presentation.offset` changes here. The logical box a volume collides
//! with never moves.

use super::{Frame, Resolver};

/// Resolver that advances the float animation to the current time.
#[derive(Debug, Clone, Copy, Default)]
pub struct PresentationResolver;

impl Resolver for PresentationResolver {
    fn name(&self) -> &'static str {
        "presentation"
    }

    fn resolve(&self, frame: &mut Frame<'_>) {
        let time = frame.state.time();
        for volume in frame.state.world.volumes_mut() {
            volume.animate(time, &frame.config.float);
        }
    }
}

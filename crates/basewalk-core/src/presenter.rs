//! The seam to the host's audio, HUD and notification code.
//!
//! A [`Presenter`] receives each frame's events in order, followed by that
//! frame's [`Stats`]. Implementations must not call back into the simulation.

use crate::event::{GameEvent, Sound};
use crate::stats::Stats;

/// Receives resolved frame output.
pub trait Presenter {
    /// Called once per event, in emission order.
    fn on_event(&mut self, event: &GameEvent);

    /// Called once per frame after all events.
    fn on_stats(&mut self, stats: &Stats);
}

/// Presenter that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullPresenter;

impl Presenter for NullPresenter {
    fn on_event(&mut self, _event: &GameEvent) {}

    fn on_stats(&mut self, _stats: &Stats) {}
}

/// Presenter that records what a host would have shown or played.
#[derive(Debug, Clone, Default)]
pub struct RecordingPresenter {
    /// Every event received.
    pub events: Vec<GameEvent>,
    /// Sounds triggered, in order.
    pub sounds: Vec<Sound>,
    /// Blocking notifications raised, in order.
    pub alerts: Vec<String>,
    /// Most recent stats.
    pub last_stats: Option<Stats>,
    /// Number of stats updates received.
    pub frames: usize,
}

impl RecordingPresenter {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of recorded events matching `pred`.
    pub fn count(&self, pred: impl Fn(&GameEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl Presenter for RecordingPresenter {
    fn on_event(&mut self, event: &GameEvent) {
        if let Some(sound) = event.sound() {
            self.sounds.push(sound);
        }
        if let Some(alert) = event.alert() {
            self.alerts.push(alert);
        }
        self.events.push(event.clone());
    }

    fn on_stats(&mut self, stats: &Stats) {
        self.last_stats = Some(stats.clone());
        self.frames += 1;
    }
}

/// Maps a 0-100 volume slider to a 0.0-1.0 gain. Values above 100 saturate.
#[must_use]
pub fn slider_gain(slider: u8) -> f32 {
    f32::from(slider.min(100)) / 100.0
}

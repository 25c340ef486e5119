//! Events emitted by the frame step.
//!
//! Events are notifications of things that already happened. The step never
//! calls audio or UI code directly; it appends [`GameEvent`]s to an
//! [`EventLog`] and the frame loop hands them to the
//! [`Presenter`](crate::presenter::Presenter) once the frame is resolved.

use basewalk_space::GridCoord;
use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::volume::VolumeId;

/// Fire-and-forget sound triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sound {
    /// Jump take-off
    Jump,
    /// Collectible picked up
    Collect,
}

/// Something that happened during a frame or an edit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A jump impulse was applied.
    Jumped {
        /// Take-off position.
        position: Vec3,
    },
    /// A collectible was visited for the first time.
    VolumeVisited {
        /// Volume that was visited.
        id: VolumeId,
        /// Visited count after the visit.
        visited: usize,
        /// Number of collectibles.
        total: usize,
    },
    /// The last collectible was visited. Fires once per session.
    AllCollected {
        /// Number of collectibles.
        total: usize,
    },
    /// The session was reset.
    Reset,
    /// A block was placed.
    BlockAdded {
        /// New volume.
        id: VolumeId,
        /// Cell it occupies.
        coord: GridCoord,
    },
    /// A block was removed.
    BlockRemoved {
        /// Removed volume.
        id: VolumeId,
        /// Cell it occupied.
        coord: GridCoord,
    },
}

impl GameEvent {
    /// Sound the audio collaborator should play, if any.
    #[must_use]
    pub fn sound(&self) -> Option<Sound> {
        match self {
            Self::Jumped { .. } => Some(Sound::Jump),
            Self::VolumeVisited { .. } => Some(Sound::Collect),
            _ => None,
        }
    }

    /// Blocking notification text for the UI, if any.
    #[must_use]
    pub fn alert(&self) -> Option<String> {
        match self {
            Self::AllCollected { total } => {
                Some(format!("Congratulations! You visited all {total} bases!"))
            }
            _ => None,
        }
    }
}

/// Append-only event buffer for one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventLog {
    events: Vec<GameEvent>,
}

impl EventLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an event.
    pub fn push(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Drains and returns all recorded events in order.
    pub fn take(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Number of recorded events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether no events are recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Iterates recorded events in order.
    pub fn iter(&self) -> impl Iterator<Item = &GameEvent> {
        self.events.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sounds() {
        assert_eq!(GameEvent::Jumped { position: Vec3::ZERO }.sound(), Some(Sound::Jump));
        assert_eq!(
            GameEvent::VolumeVisited {
                id: VolumeId::new(0),
                visited: 1,
                total: 6
            }
            .sound(),
            Some(Sound::Collect)
        );
        assert_eq!(GameEvent::AllCollected { total: 6 }.sound(), None);
        assert_eq!(GameEvent::Reset.sound(), None);
    }

    #[test]
    fn completion_alert_text() {
        let alert = GameEvent::AllCollected { total: 6 }.alert().unwrap();
        assert_eq!(alert, "Congratulations! You visited all 6 bases!");
        assert!(GameEvent::Reset.alert().is_none());
    }

    #[test]
    fn take_drains_in_order() {
        let mut log = EventLog::new();
        log.push(GameEvent::Reset);
        log.push(GameEvent::AllCollected { total: 1 });
        assert_eq!(log.len(), 2);

        let events = log.take();
        assert_eq!(events[0], GameEvent::Reset);
        assert_eq!(events[1], GameEvent::AllCollected { total: 1 });
        assert!(log.is_empty());
    }

    #[test]
    fn events_serialize() {
        let event = GameEvent::BlockAdded {
            id: VolumeId::new(3),
            coord: GridCoord::new(1, 0, -1),
        };
        let json = serde_json::to_string(&event).unwrap();
        let back: GameEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, back);
    }
}

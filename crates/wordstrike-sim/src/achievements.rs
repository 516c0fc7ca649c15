//! Achievement notifications. Fire-and-forget: the engine never reads back.

use std::sync::{Arc, Mutex};

use wordstrike_core::events::AchievementEvent;

pub trait AchievementSink: Send {
    fn notify(&mut self, event: AchievementEvent);
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl AchievementSink for NullSink {
    fn notify(&mut self, _event: AchievementEvent) {}
}

/// Keeps every event in a shared list that the owner can inspect.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    events: Arc<Mutex<Vec<AchievementEvent>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle to the recorded events; stays valid after the sink is boxed.
    pub fn handle(&self) -> Arc<Mutex<Vec<AchievementEvent>>> {
        Arc::clone(&self.events)
    }
}

impl AchievementSink for RecordingSink {
    fn notify(&mut self, event: AchievementEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

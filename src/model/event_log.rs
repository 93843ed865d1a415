use crate::model::event::{EventKind, GameEvent};

/// Append-only sink of tick-stamped events.
///
/// Emission order is the total order: tick ascending, and within a tick,
/// pipeline order. The log is the single channel of observable simulation
/// output; live transport, storage, and replay all consume this sequence.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventLog {
    events: Vec<GameEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn log(&mut self, tick: u64, description: impl Into<String>, kind: EventKind) {
        self.events.push(GameEvent {
            tick,
            description: description.into(),
            kind,
        });
    }

    /// Random access by index, for replay scrubbing.
    pub fn get(&self, index: usize) -> Option<&GameEvent> {
        self.events.get(index)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Events appended since `cursor`, for incremental live delivery.
    pub fn since(&self, cursor: usize) -> &[GameEvent] {
        &self.events[cursor.min(self.events.len())..]
    }

    pub fn iter(&self) -> impl Iterator<Item = &GameEvent> {
        self.events.iter()
    }

    pub fn into_events(self) -> Vec<GameEvent> {
        self.events
    }
}

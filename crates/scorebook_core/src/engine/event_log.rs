use tracing::debug;

use crate::models::{Event, EventKind, Score, Timestamp};

/// Events ordered by timestamp. Events sharing a timestamp keep the order
/// in which they were registered.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event and return a copy of it as stored.
    ///
    /// The id is the log length at insertion time. Inserting after every
    /// event with a timestamp lower or equal is the same as appending and
    /// stable-sorting.
    pub fn register(&mut self, timestamp: Timestamp, kind: EventKind, score: Score) -> Event {
        let event = Event { id: self.events.len(), timestamp, score, kind };
        let at = self.events.partition_point(|e| e.timestamp <= timestamp);
        debug!(
            id = event.id,
            position = at,
            code = event.code(),
            timestamp = %timestamp,
            %score,
            "event registered"
        );
        self.events.insert(at, event);
        event
    }

    pub fn get(&self, index: usize) -> Option<&Event> {
        self.events.get(index)
    }

    pub fn find(&self, id: usize) -> Option<&Event> {
        self.events.iter().find(|e| e.id == id)
    }

    pub fn contains(&self, id: usize) -> bool {
        self.find(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Event> {
        self.events.iter()
    }

    pub fn as_slice(&self) -> &[Event] {
        &self.events
    }

    /// Give back ids after a replay: the event numbered `i` becomes `ids[i]`.
    pub fn relabel(&mut self, ids: &[usize]) {
        for event in &mut self.events {
            if let Some(&id) = ids.get(event.id) {
                event.id = id;
            }
        }
    }

    /// Every event except `id`, in log order.
    pub fn without(&self, id: usize) -> Vec<Event> {
        self.events.iter().filter(|e| e.id != id).copied().collect()
    }
}

impl std::ops::Index<usize> for EventLog {
    type Output = Event;

    fn index(&self, index: usize) -> &Event {
        &self.events[index]
    }
}

impl<'a> IntoIterator for &'a EventLog {
    type Item = &'a Event;
    type IntoIter = std::slice::Iter<'a, Event>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

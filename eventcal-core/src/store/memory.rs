//! In-memory arena store.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{EventCalError, EventCalResult};
use crate::event::{Event, EventId, NewEvent};
use crate::store::EventStore;

/// Arena of events indexed by id, with monotonically assigned ids.
///
/// Serializable so a host can persist the whole arena as one JSON
/// document (the CLI does exactly that).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryStore {
    next_id: u64,
    events: BTreeMap<EventId, Event>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }

    /// Load a store previously written with [`MemoryStore::save`].
    pub fn load(path: &Path) -> EventCalResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self, path: &Path) -> EventCalResult<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    fn by_start(&self, mut ids: Vec<EventId>) -> Vec<EventId> {
        ids.sort_by_key(|id| (self.events[id].start, *id));
        ids
    }
}

impl EventStore for MemoryStore {
    fn create(&mut self, fields: NewEvent) -> EventCalResult<EventId> {
        self.next_id += 1;
        let id = EventId(self.next_id);
        self.events.insert(id, fields.into_event(id));
        Ok(id)
    }

    fn get(&self, id: EventId) -> Option<&Event> {
        self.events.get(&id)
    }

    fn get_mut(&mut self, id: EventId) -> Option<&mut Event> {
        self.events.get_mut(&id)
    }

    fn delete(&mut self, id: EventId) -> EventCalResult<()> {
        self.events
            .remove(&id)
            .map(|_| ())
            .ok_or(EventCalError::EventNotFound(id))
    }

    fn meta(&self, id: EventId, key: &str) -> Option<Value> {
        self.events.get(&id)?.meta.get(key).cloned()
    }

    fn set_meta(&mut self, id: EventId, key: &str, value: Value) -> EventCalResult<()> {
        let event = self
            .events
            .get_mut(&id)
            .ok_or(EventCalError::EventNotFound(id))?;
        event.meta.insert(key.to_string(), value);
        Ok(())
    }

    fn delete_meta(&mut self, id: EventId, key: &str) -> EventCalResult<()> {
        let event = self
            .events
            .get_mut(&id)
            .ok_or(EventCalError::EventNotFound(id))?;
        event.meta.remove(key);
        Ok(())
    }

    fn parent_of(&self, id: EventId) -> Option<EventId> {
        self.events.get(&id)?.parent
    }

    fn children_starting_after(&self, parent: EventId, after: i64) -> Vec<EventId> {
        let ids = self
            .events
            .values()
            .filter(|e| e.parent == Some(parent) && e.start > after)
            .map(|e| e.id)
            .collect();
        self.by_start(ids)
    }

    fn upcoming(&self, now: i64) -> Vec<EventId> {
        let ids = self
            .events
            .values()
            .filter(|e| e.end > now)
            .map(|e| e.id)
            .collect();
        self.by_start(ids)
    }

    fn all(&self) -> Vec<EventId> {
        let ids = self.events.values().map(|e| e.id).collect();
        self.by_start(ids)
    }

    fn categories(&self, id: EventId) -> BTreeSet<String> {
        self.events
            .get(&id)
            .map(|e| e.categories.clone())
            .unwrap_or_default()
    }

    fn set_categories(&mut self, id: EventId, tags: BTreeSet<String>) -> EventCalResult<()> {
        let event = self
            .events
            .get_mut(&id)
            .ok_or(EventCalError::EventNotFound(id))?;
        event.categories = tags;
        Ok(())
    }
}

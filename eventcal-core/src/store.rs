//! Event store abstraction.
//!
//! The engine never talks to a concrete backend: it runs against
//! anything implementing [`EventStore`]. The crate ships
//! [`memory::MemoryStore`], an id-indexed arena that also serves as the
//! CLI's persisted backend.

pub mod memory;

use std::collections::BTreeSet;

use serde_json::Value;

use crate::error::EventCalResult;
use crate::event::{Event, EventId, NewEvent};

/// Storage collaborator for event records, metadata and category tags.
pub trait EventStore {
    /// Insert a new event and return its assigned id.
    fn create(&mut self, fields: NewEvent) -> EventCalResult<EventId>;

    fn get(&self, id: EventId) -> Option<&Event>;

    fn get_mut(&mut self, id: EventId) -> Option<&mut Event>;

    /// Hard delete. Not reversible.
    fn delete(&mut self, id: EventId) -> EventCalResult<()>;

    fn meta(&self, id: EventId, key: &str) -> Option<Value>;

    fn set_meta(&mut self, id: EventId, key: &str, value: Value) -> EventCalResult<()>;

    fn delete_meta(&mut self, id: EventId, key: &str) -> EventCalResult<()>;

    fn parent_of(&self, id: EventId) -> Option<EventId>;

    /// Ids of occurrences under `parent` with `start > after`, ordered
    /// ascending by start.
    fn children_starting_after(&self, parent: EventId, after: i64) -> Vec<EventId>;

    /// Ids of events that have not yet ended (`end > now`), ordered
    /// ascending by start. The archive-listing query shape.
    fn upcoming(&self, now: i64) -> Vec<EventId>;

    /// All event ids, ordered ascending by start.
    fn all(&self) -> Vec<EventId>;

    fn categories(&self, id: EventId) -> BTreeSet<String>;

    fn set_categories(&mut self, id: EventId, tags: BTreeSet<String>) -> EventCalResult<()>;
}

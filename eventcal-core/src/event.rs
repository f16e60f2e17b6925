//! Event records and related types.
//!
//! An [`Event`] is a single row in the event store: either a standalone
//! event, a recurring series master, or a generated occurrence linked to
//! its master via `parent`.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::EventCalError;

/// Store-assigned event identifier.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct EventId(pub u64);

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Publication status of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    Published,
    #[default]
    Draft,
    Trashed,
}

impl EventStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventStatus::Published => "published",
            EventStatus::Draft => "draft",
            EventStatus::Trashed => "trashed",
        }
    }
}

impl FromStr for EventStatus {
    type Err = EventCalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "published" => Ok(EventStatus::Published),
            "draft" => Ok(EventStatus::Draft),
            "trashed" => Ok(EventStatus::Trashed),
            other => Err(EventCalError::Store(format!(
                "Unknown event status '{}'",
                other
            ))),
        }
    }
}

/// Step unit for a recurring series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecurringPeriod {
    Daily,
    Weekly,
    Monthly,
}

impl fmt::Display for RecurringPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RecurringPeriod::Daily => "daily",
            RecurringPeriod::Weekly => "weekly",
            RecurringPeriod::Monthly => "monthly",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for RecurringPeriod {
    type Err = EventCalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "daily" => Ok(RecurringPeriod::Daily),
            "weekly" => Ok(RecurringPeriod::Weekly),
            "monthly" => Ok(RecurringPeriod::Monthly),
            other => Err(EventCalError::InvalidPeriod(other.to_string())),
        }
    }
}

/// A calendar event record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub title: String,
    pub body: String,
    pub status: EventStatus,

    /// Display formatting only; does not affect generation.
    pub all_day: bool,
    /// Start of the event, epoch seconds (naive local).
    pub start: i64,
    /// End of the event, epoch seconds (naive local).
    pub end: i64,

    // Recurrence fields
    /// Series master this occurrence was generated from, if any.
    pub parent: Option<EventId>,
    /// Marks a series master. Only meaningful when `parent` is None.
    pub recurring: bool,
    /// Step unit for the series.
    pub period: Option<RecurringPeriod>,
    /// No occurrences are generated at or past this timestamp.
    /// Defaults to one year after `start` at generation time.
    pub recurring_end: Option<i64>,
    /// Set once occurrences have been produced for this master.
    pub generated: bool,
    /// Transient request to delete future occurrences and re-expand.
    pub regenerate: bool,

    /// Category tags, copied to occurrences when the feature is enabled.
    pub categories: BTreeSet<String>,
    /// Host-defined metadata. Keys named by the recurrence policy are
    /// copied to each generated occurrence.
    pub meta: BTreeMap<String, Value>,
}

impl Event {
    /// Whether this event is a series master (recurring, no parent).
    pub fn is_master(&self) -> bool {
        self.parent.is_none() && self.recurring
    }
}

/// Fields for creating a new event; the store assigns the id.
#[derive(Debug, Clone, Default)]
pub struct NewEvent {
    pub title: String,
    pub body: String,
    pub status: EventStatus,
    pub all_day: bool,
    pub start: i64,
    pub end: i64,
    pub parent: Option<EventId>,
    pub recurring: bool,
    pub period: Option<RecurringPeriod>,
    pub recurring_end: Option<i64>,
    pub categories: BTreeSet<String>,
}

impl NewEvent {
    pub fn into_event(self, id: EventId) -> Event {
        Event {
            id,
            title: self.title,
            body: self.body,
            status: self.status,
            all_day: self.all_day,
            start: self.start,
            end: self.end,
            parent: self.parent,
            recurring: self.recurring,
            period: self.period,
            recurring_end: self.recurring_end,
            generated: false,
            regenerate: false,
            categories: self.categories,
            meta: BTreeMap::new(),
        }
    }
}

//! Recurring event series engine.
//!
//! This crate expands a "series master" event into a bounded sequence
//! of occurrence records over a pluggable [`store::EventStore`]:
//! - [`engine::EventsCalendar`] drives expansion, regeneration and the
//!   trash/untrash lifecycle guard
//! - [`step`] advances start/end pairs by one day/week/month
//! - [`timestamp`] validates loosely typed timestamp values
//! - [`policy::RecurrencePolicy`] injects host tunables (iteration
//!   limit, copied metadata keys, per-step overrides)

pub mod engine;
pub mod error;
pub mod event;
pub mod features;
pub mod policy;
pub mod step;
pub mod store;
pub mod timestamp;

pub use engine::{EventsCalendar, PRIOR_STATUS_META};
pub use error::{EventCalError, EventCalResult};
pub use event::{Event, EventId, EventStatus, NewEvent, RecurringPeriod};
pub use features::Features;
pub use policy::{DefaultPolicy, RecurrencePolicy, StepContext};
pub use store::memory::MemoryStore;
pub use store::EventStore;

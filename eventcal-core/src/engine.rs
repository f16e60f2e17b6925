//! Series expansion engine.
//!
//! [`EventsCalendar`] wraps an [`EventStore`] and reacts to entity
//! lifecycle events: saving a published series master expands it into
//! occurrence records, an edit with the regenerate flag set deletes
//! future occurrences and re-expands, and trash/untrash transitions run
//! with expansion suspended so the underlying save never generates as a
//! side effect.
//!
//! Every precondition failure is a silent no-op from the caller's view
//! (save paths must not be blocked); the interesting ones emit tracing
//! events.

use chrono::Local;
use serde_json::Value;

use crate::event::{EventId, EventStatus, NewEvent};
use crate::features::Features;
use crate::policy::{DefaultPolicy, RecurrencePolicy, StepContext};
use crate::step;
use crate::store::EventStore;
use crate::timestamp;

/// Meta key recording an event's status before it was trashed.
pub const PRIOR_STATUS_META: &str = "prior_status";

/// The recurrence engine over an event store.
pub struct EventsCalendar<S, P = DefaultPolicy> {
    store: S,
    features: Features,
    policy: P,
    /// Lifecycle guard: while set, saves do not expand or regenerate.
    suspended: bool,
}

impl<S: EventStore> EventsCalendar<S> {
    pub fn new(store: S) -> Self {
        EventsCalendar::with_policy(store, Features::default(), DefaultPolicy)
    }
}

impl<S: EventStore, P: RecurrencePolicy> EventsCalendar<S, P> {
    pub fn with_policy(store: S, features: Features, policy: P) -> Self {
        EventsCalendar {
            store,
            features,
            policy,
            suspended: false,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Suspend expansion for subsequent saves (bulk writes).
    pub fn suspend_generation(&mut self) {
        self.suspended = true;
    }

    /// Resume expansion after [`suspend_generation`].
    ///
    /// [`suspend_generation`]: EventsCalendar::suspend_generation
    pub fn resume_generation(&mut self) {
        self.suspended = false;
    }

    /// Entry point for the host's save path: expand the master if it
    /// has not been expanded yet, then honor a pending regeneration
    /// request.
    pub fn on_save(&mut self, id: EventId) {
        self.on_save_at(id, local_now());
    }

    /// [`on_save`] with an explicit clock, for deterministic callers.
    ///
    /// [`on_save`]: EventsCalendar::on_save
    pub fn on_save_at(&mut self, id: EventId, now: i64) {
        if self.suspended {
            tracing::debug!(event = %id, "Generation suspended; skipping save cascade");
            return;
        }
        self.generate_at(id, false, now);
        self.regenerate_at(id, now);
    }

    /// Move an event to the trash, recording its prior status. The
    /// underlying save runs with expansion suspended.
    pub fn on_trash(&mut self, id: EventId) {
        let Some(status) = self.store.get(id).map(|e| e.status) else {
            return;
        };
        let _ = self
            .store
            .set_meta(id, PRIOR_STATUS_META, Value::String(status.as_str().into()));
        if let Some(event) = self.store.get_mut(id) {
            event.status = EventStatus::Trashed;
        }

        self.suspend_generation();
        self.on_save(id);
        self.resume_generation();
    }

    /// Restore a trashed event to its recorded prior status
    /// (published when none was recorded). Never triggers expansion.
    pub fn on_untrash(&mut self, id: EventId) {
        if self.store.get(id).is_none() {
            return;
        }
        let prior = self
            .store
            .meta(id, PRIOR_STATUS_META)
            .and_then(|v| match v {
                Value::String(s) => s.parse().ok(),
                _ => None,
            })
            .unwrap_or(EventStatus::Published);
        let _ = self.store.delete_meta(id, PRIOR_STATUS_META);
        if let Some(event) = self.store.get_mut(id) {
            event.status = prior;
        }

        self.suspend_generation();
        self.on_save(id);
        self.resume_generation();
    }

    /// Expand a series master into occurrence records.
    ///
    /// A no-op unless the event is a published, not-yet-generated
    /// series master and the recurring feature is enabled. When
    /// `regenerating`, only occurrences strictly after `now` are
    /// created.
    pub fn generate_at(&mut self, master: EventId, regenerating: bool, now: i64) {
        if !self.features.recurring {
            return;
        }
        let Some(event) = self.store.get(master) else {
            tracing::debug!(event = %master, "Not in store; skipping generation");
            return;
        };
        if event.status != EventStatus::Published {
            return;
        }
        // Only generate once
        if event.generated {
            return;
        }
        // Masters only, never a generated child
        if event.parent.is_some() {
            return;
        }
        if !event.recurring {
            return;
        }
        let Some(period) = event.period else {
            tracing::warn!(event = %master, "Recurring master has no period; nothing generated");
            return;
        };

        let title = event.title.clone();
        let body = event.body.clone();
        let all_day = event.all_day;
        let mut start = event.start;
        let mut end = event.end;

        // The master itself represents the first occurrence
        let original_start = start;

        let stop = match event.recurring_end {
            Some(ts) => ts,
            None => match step::plus_one_year(start) {
                Some(ts) => ts,
                None => {
                    tracing::warn!(event = %master, "Default stop bound overflows; nothing generated");
                    return;
                }
            },
        };
        if !timestamp::in_calendar_range(start) || !timestamp::in_calendar_range(stop) {
            tracing::warn!(
                event = %master,
                start,
                stop,
                "Start or stop outside calendar range; nothing generated"
            );
            return;
        }

        let extra_meta: Vec<(String, Value)> = self
            .policy
            .meta_keys()
            .into_iter()
            .filter_map(|key| self.store.meta(master, &key).map(|v| (key, v)))
            .collect();
        let categories = if self.features.categories {
            self.store.categories(master)
        } else {
            Default::default()
        };

        let limit = self.policy.limit();
        let mut last_created = None;
        let mut created = 0u32;
        let mut i = 1u32;
        while start < stop && i < limit {
            // Skip the master's own slot; when regenerating, only
            // recreate occurrences that are still in the future
            if start != original_start && (!regenerating || start > now) {
                let fields = NewEvent {
                    title: title.clone(),
                    body: body.clone(),
                    status: EventStatus::Published,
                    all_day,
                    start,
                    end,
                    parent: Some(master),
                    recurring: false,
                    period: None,
                    recurring_end: None,
                    categories: categories.clone(),
                };
                match self.store.create(fields) {
                    Ok(child) => {
                        for (key, value) in &extra_meta {
                            if let Err(e) = self.store.set_meta(child, key, value.clone()) {
                                tracing::warn!(event = %child, key = %key, error = %e, "Failed to copy metadata");
                            }
                        }
                        last_created = Some(child);
                        created += 1;
                    }
                    Err(e) => {
                        tracing::warn!(event = %master, error = %e, "Failed to create occurrence");
                    }
                }
            }

            let previous_start = start;
            let (next_start, next_end) = step::step(start, end, period);
            let ctx = StepContext {
                previous_start,
                period,
                master,
                last_created,
            };
            start = self.policy.adjust_start(next_start, &ctx);
            end = self.policy.adjust_end(next_end, &ctx);
            i += 1;
        }

        if let Some(event) = self.store.get_mut(master) {
            event.generated = true;
        }
        tracing::debug!(event = %master, created, "Expanded recurring series");
    }

    /// Delete future occurrences of a master and re-expand.
    ///
    /// A no-op unless the event carries a pending regenerate request
    /// and the recurring feature is enabled. Occurrences with
    /// `start <= now` are never touched, nor is the master itself.
    pub fn regenerate_at(&mut self, master: EventId, now: i64) {
        if !self.features.recurring {
            return;
        }
        let Some(event) = self.store.get(master) else {
            return;
        };
        // Make sure they want to regenerate
        if !event.regenerate {
            return;
        }

        // Clear the flags before deleting: a crash mid-delete must not
        // leave a state where re-running the save path is unsafe
        if let Some(event) = self.store.get_mut(master) {
            event.regenerate = false;
            event.generated = false;
        }

        for child in self.store.children_starting_after(master, now) {
            if child == master {
                continue;
            }
            if let Err(e) = self.store.delete(child) {
                tracing::warn!(event = %child, error = %e, "Failed to delete future occurrence");
            }
        }

        self.generate_at(master, true, now);
    }
}

/// Current wall-clock time as a naive local epoch, matching how event
/// timestamps are stored.
fn local_now() -> i64 {
    Local::now().naive_local().and_utc().timestamp()
}

//! Host-injectable recurrence policy.
//!
//! The generator and stepper take their tunables from a
//! [`RecurrencePolicy`] passed in at engine construction: the iteration
//! limit, which extra metadata keys are copied to each occurrence, and
//! per-step overrides of the computed start/end (e.g. skipping
//! weekends).

use crate::event::{EventId, RecurringPeriod};

/// Context handed to the per-step override hooks.
#[derive(Debug, Clone, Copy)]
pub struct StepContext {
    /// Start of the occurrence the step advanced from.
    pub previous_start: i64,
    pub period: RecurringPeriod,
    /// The series master being expanded.
    pub master: EventId,
    /// The most recently created occurrence, if any.
    pub last_created: Option<EventId>,
}

/// Policy hooks for occurrence generation.
pub trait RecurrencePolicy {
    /// Upper bound on expansion loop iterations per master.
    fn limit(&self) -> u32 {
        100
    }

    /// Metadata keys to copy from the master onto each occurrence.
    fn meta_keys(&self) -> Vec<String> {
        Vec::new()
    }

    /// Override the computed start of the next occurrence.
    fn adjust_start(&self, computed: i64, _ctx: &StepContext) -> i64 {
        computed
    }

    /// Override the computed end of the next occurrence.
    fn adjust_end(&self, computed: i64, _ctx: &StepContext) -> i64 {
        computed
    }
}

/// Default policy: limit of 100, no extra metadata, no step overrides.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultPolicy;

impl RecurrencePolicy for DefaultPolicy {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_passes_steps_through() {
        let ctx = StepContext {
            previous_start: 1_700_000_000,
            period: RecurringPeriod::Daily,
            master: EventId(1),
            last_created: None,
        };
        assert_eq!(DefaultPolicy.limit(), 100);
        assert!(DefaultPolicy.meta_keys().is_empty());
        assert_eq!(DefaultPolicy.adjust_start(42, &ctx), 42);
        assert_eq!(DefaultPolicy.adjust_end(43, &ctx), 43);
    }
}

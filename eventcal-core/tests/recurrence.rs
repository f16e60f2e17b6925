//! Whole-engine scenarios: expansion, regeneration, lifecycle guard.

use eventcal_core::{
    DefaultPolicy, EventId, EventStatus, EventStore, EventsCalendar, Features, MemoryStore,
    NewEvent, RecurrencePolicy, RecurringPeriod, StepContext, PRIOR_STATUS_META,
};
use serde_json::json;

const DAY: i64 = 86_400;
// 2023-11-14 22:13:20
const T: i64 = 1_700_000_000;

fn daily_master(start: i64, until: Option<i64>) -> NewEvent {
    NewEvent {
        title: "Standup".to_string(),
        body: "Daily sync".to_string(),
        status: EventStatus::Published,
        start,
        end: start + 3600,
        recurring: true,
        period: Some(RecurringPeriod::Daily),
        recurring_end: until,
        ..NewEvent::default()
    }
}

fn children(engine: &EventsCalendar<MemoryStore>, master: EventId) -> Vec<EventId> {
    engine.store().children_starting_after(master, i64::MIN)
}

#[test]
fn test_daily_expansion_creates_strictly_bounded_occurrences() {
    let mut engine = EventsCalendar::new(MemoryStore::new());
    let master = engine
        .store_mut()
        .create(daily_master(T, Some(T + 3 * DAY)))
        .unwrap();

    engine.on_save_at(master, T);

    let kids = children(&engine, master);
    let starts: Vec<i64> = kids
        .iter()
        .map(|id| engine.store().get(*id).unwrap().start)
        .collect();
    // The master's own slot is skipped and the stop bound is exclusive
    assert_eq!(starts, vec![T + DAY, T + 2 * DAY]);

    for id in &kids {
        let child = engine.store().get(*id).unwrap();
        assert_eq!(child.parent, Some(master));
        assert!(!child.recurring);
        assert_eq!(child.status, EventStatus::Published);
        assert_eq!(child.title, "Standup");
        assert_eq!(child.body, "Daily sync");
        assert_eq!(child.end, child.start + 3600);
        assert_ne!(child.start, T);
    }
    assert!(engine.store().get(master).unwrap().generated);
}

#[test]
fn test_generate_is_idempotent_once_latched() {
    let mut engine = EventsCalendar::new(MemoryStore::new());
    let master = engine
        .store_mut()
        .create(daily_master(T, Some(T + 5 * DAY)))
        .unwrap();

    engine.on_save_at(master, T);
    let first = children(&engine, master).len();

    engine.on_save_at(master, T);
    engine.generate_at(master, false, T);
    assert_eq!(children(&engine, master).len(), first);
}

#[test]
fn test_regeneration_preserves_past_occurrences() {
    let now = T;
    let mut engine = EventsCalendar::new(MemoryStore::new());
    // Starts two days in the past, so expansion produces both past and
    // future occurrences relative to `now`
    let master = engine
        .store_mut()
        .create(daily_master(now - 2 * DAY, Some(now + 2 * DAY + 10)))
        .unwrap();

    engine.on_save_at(master, now);
    let before = children(&engine, master);
    let past_ids: Vec<EventId> = before
        .iter()
        .copied()
        .filter(|id| engine.store().get(*id).unwrap().start <= now)
        .collect();
    let future_ids: Vec<EventId> = before
        .iter()
        .copied()
        .filter(|id| engine.store().get(*id).unwrap().start > now)
        .collect();
    assert!(!past_ids.is_empty());
    assert!(!future_ids.is_empty());

    engine.store_mut().get_mut(master).unwrap().regenerate = true;
    engine.on_save_at(master, now);

    // Past occurrences survive with their original ids
    for id in &past_ids {
        assert!(engine.store().get(*id).is_some());
    }
    // Future ones were deleted and recreated under new ids
    for id in &future_ids {
        assert!(engine.store().get(*id).is_none());
    }
    let after = children(&engine, master);
    let new_future: Vec<i64> = after
        .iter()
        .filter_map(|id| engine.store().get(*id))
        .filter(|e| e.start > now)
        .map(|e| e.start)
        .collect();
    assert_eq!(new_future, vec![now + DAY, now + 2 * DAY]);

    let master_event = engine.store().get(master).unwrap();
    assert!(!master_event.regenerate);
    assert!(master_event.generated);
}

#[test]
fn test_iteration_limit_bounds_runaway_series() {
    let mut engine = EventsCalendar::new(MemoryStore::new());
    // Stop bound ~1000 years out; only the iteration limit applies
    let master = engine
        .store_mut()
        .create(daily_master(T, Some(T + 1000 * 365 * DAY)))
        .unwrap();

    engine.on_save_at(master, T);

    // The loop runs while i < 100 starting from 1 (99 iterations) and
    // the first slot reproduces the master, so 98 occurrences
    assert_eq!(children(&engine, master).len(), 98);
}

#[test]
fn test_missing_recurring_end_defaults_to_one_year() {
    let mut engine = EventsCalendar::new(MemoryStore::new());
    let master = engine.store_mut().create(daily_master(T, None)).unwrap();

    engine.on_save_at(master, T);

    let kids = children(&engine, master);
    // Bounded by the iteration limit, not the 366-day year
    assert_eq!(kids.len(), 98);
    let last = engine.store().get(*kids.last().unwrap()).unwrap();
    assert_eq!(last.start, T + 98 * DAY);
}

#[test]
fn test_no_expansion_for_drafts_children_or_plain_events() {
    let mut engine = EventsCalendar::new(MemoryStore::new());

    let mut draft = daily_master(T, Some(T + 5 * DAY));
    draft.status = EventStatus::Draft;
    let draft = engine.store_mut().create(draft).unwrap();

    let mut plain = daily_master(T, Some(T + 5 * DAY));
    plain.recurring = false;
    let plain = engine.store_mut().create(plain).unwrap();

    let mut child = daily_master(T, Some(T + 5 * DAY));
    child.parent = Some(plain);
    let child = engine.store_mut().create(child).unwrap();

    for id in [draft, plain, child] {
        engine.on_save_at(id, T);
        assert!(children(&engine, id).is_empty());
    }
}

#[test]
fn test_master_without_period_generates_nothing() {
    let mut engine = EventsCalendar::new(MemoryStore::new());
    let mut fields = daily_master(T, Some(T + 5 * DAY));
    fields.period = None;
    let master = engine.store_mut().create(fields).unwrap();

    engine.on_save_at(master, T);

    assert!(children(&engine, master).is_empty());
    // Not latched, so fixing the period and resaving still expands
    assert!(!engine.store().get(master).unwrap().generated);
    engine.store_mut().get_mut(master).unwrap().period = Some(RecurringPeriod::Daily);
    engine.on_save_at(master, T);
    assert_eq!(children(&engine, master).len(), 4);
}

#[test]
fn test_recurring_feature_disabled_is_a_no_op() {
    let features = Features {
        recurring: false,
        categories: true,
    };
    let mut engine = EventsCalendar::with_policy(MemoryStore::new(), features, DefaultPolicy);
    let master = engine
        .store_mut()
        .create(daily_master(T, Some(T + 5 * DAY)))
        .unwrap();

    engine.on_save_at(master, T);

    assert!(engine.store().children_starting_after(master, i64::MIN).is_empty());
    assert!(!engine.store().get(master).unwrap().generated);
}

#[test]
fn test_categories_copied_only_when_enabled() {
    let tags: std::collections::BTreeSet<String> =
        ["workshops".to_string(), "talks".to_string()].into();

    for (enabled, expected) in [(true, tags.clone()), (false, Default::default())] {
        let features = Features {
            recurring: true,
            categories: enabled,
        };
        let mut engine = EventsCalendar::with_policy(MemoryStore::new(), features, DefaultPolicy);
        let mut fields = daily_master(T, Some(T + 3 * DAY));
        fields.categories = tags.clone();
        let master = engine.store_mut().create(fields).unwrap();

        engine.on_save_at(master, T);

        let kids = engine.store().children_starting_after(master, i64::MIN);
        assert!(!kids.is_empty());
        for id in kids {
            assert_eq!(engine.store().categories(id), expected);
        }
    }
}

struct VenuePolicy;

impl RecurrencePolicy for VenuePolicy {
    fn limit(&self) -> u32 {
        5
    }

    fn meta_keys(&self) -> Vec<String> {
        vec!["venue".to_string()]
    }
}

#[test]
fn test_policy_meta_keys_copied_to_occurrences() {
    let mut engine =
        EventsCalendar::with_policy(MemoryStore::new(), Features::default(), VenuePolicy);
    let master = engine
        .store_mut()
        .create(daily_master(T, Some(T + 30 * DAY)))
        .unwrap();
    engine
        .store_mut()
        .set_meta(master, "venue", json!("Main hall"))
        .unwrap();
    engine
        .store_mut()
        .set_meta(master, "speaker", json!("Ada"))
        .unwrap();

    engine.on_save_at(master, T);

    let kids = engine.store().children_starting_after(master, i64::MIN);
    // Limit of 5 allows four loop passes; the first reproduces the master
    assert_eq!(kids.len(), 3);
    for id in kids {
        assert_eq!(engine.store().meta(id, "venue"), Some(json!("Main hall")));
        assert_eq!(engine.store().meta(id, "speaker"), None);
    }
}

struct PushToNoon;

impl RecurrencePolicy for PushToNoon {
    fn limit(&self) -> u32 {
        5
    }

    // Shift every generated occurrence an hour later than the plain
    // calendar step would put it
    fn adjust_start(&self, computed: i64, _ctx: &StepContext) -> i64 {
        computed + 3600
    }
}

#[test]
fn test_policy_step_override_applies_after_core_step() {
    let mut engine =
        EventsCalendar::with_policy(MemoryStore::new(), Features::default(), PushToNoon);
    let master = engine
        .store_mut()
        .create(daily_master(T, Some(T + 30 * DAY)))
        .unwrap();

    engine.on_save_at(master, T);

    let starts: Vec<i64> = engine
        .store()
        .children_starting_after(master, i64::MIN)
        .iter()
        .map(|id| engine.store().get(*id).unwrap().start)
        .collect();
    // Offsets accumulate: each step re-adds a day to the shifted start
    assert_eq!(
        starts,
        vec![T + DAY + 3600, T + 2 * (DAY + 3600), T + 3 * (DAY + 3600)]
    );
}

#[test]
fn test_suspension_guards_bulk_saves() {
    let mut engine = EventsCalendar::new(MemoryStore::new());
    let master = engine
        .store_mut()
        .create(daily_master(T, Some(T + 5 * DAY)))
        .unwrap();

    engine.suspend_generation();
    engine.on_save_at(master, T);
    assert!(children(&engine, master).is_empty());

    engine.resume_generation();
    engine.on_save_at(master, T);
    assert_eq!(children(&engine, master).len(), 4);
}

#[test]
fn test_trash_untrash_round_trip_without_expansion() {
    let mut engine = EventsCalendar::new(MemoryStore::new());
    let mut fields = daily_master(T, Some(T + 5 * DAY));
    fields.status = EventStatus::Draft;
    let master = engine.store_mut().create(fields).unwrap();

    engine.on_trash(master);
    let event = engine.store().get(master).unwrap();
    assert_eq!(event.status, EventStatus::Trashed);
    assert_eq!(
        engine.store().meta(master, PRIOR_STATUS_META),
        Some(json!("draft"))
    );
    assert!(children(&engine, master).is_empty());

    engine.on_untrash(master);
    let event = engine.store().get(master).unwrap();
    assert_eq!(event.status, EventStatus::Draft);
    assert_eq!(engine.store().meta(master, PRIOR_STATUS_META), None);
    // Restoring never generated anything; the guard is released though
    assert!(children(&engine, master).is_empty());
    engine.on_save_at(master, T);
    assert!(children(&engine, master).is_empty()); // still a draft
}

#[test]
fn test_untrash_of_published_master_does_not_expand_but_next_save_does() {
    let mut engine = EventsCalendar::new(MemoryStore::new());
    let master = engine
        .store_mut()
        .create(daily_master(T, Some(T + 4 * DAY)))
        .unwrap();

    engine.on_trash(master);
    engine.on_untrash(master);
    assert_eq!(engine.store().get(master).unwrap().status, EventStatus::Published);
    assert!(children(&engine, master).is_empty());

    engine.on_save_at(master, T);
    assert_eq!(children(&engine, master).len(), 3);
}

#[test]
fn test_regenerate_without_request_flag_is_a_no_op() {
    let mut engine = EventsCalendar::new(MemoryStore::new());
    let master = engine
        .store_mut()
        .create(daily_master(T - 2 * DAY, Some(T + 2 * DAY)))
        .unwrap();
    engine.on_save_at(master, T);
    let before = children(&engine, master);

    engine.regenerate_at(master, T);
    assert_eq!(children(&engine, master), before);
}

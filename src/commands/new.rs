use std::collections::BTreeSet;

use anyhow::{bail, Result};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use eventcal_core::{
    EventStatus, EventStore, EventsCalendar, MemoryStore, NewEvent, RecurringPeriod,
};
use owo_colors::OwoColorize;

const HOUR: i64 = 3600;
const DAY: i64 = 86_400;

#[allow(clippy::too_many_arguments)]
pub fn run(
    engine: &mut EventsCalendar<MemoryStore>,
    title: String,
    start: &str,
    end: Option<&str>,
    body: Option<String>,
    all_day: bool,
    repeat: Option<&str>,
    until: Option<&str>,
    categories: Vec<String>,
) -> Result<()> {
    let (start_ts, date_only) = parse_datetime(start)?;
    let all_day = all_day || date_only;

    let end_ts = match end {
        Some(input) => parse_datetime(input)?.0,
        None if all_day => start_ts + DAY,
        None => start_ts + HOUR,
    };

    let period: Option<RecurringPeriod> = repeat.map(|s| s.parse()).transpose()?;
    let until_ts = match until {
        Some(input) => {
            if period.is_none() {
                bail!("--until requires --repeat");
            }
            Some(parse_datetime(input)?.0)
        }
        None => None,
    };

    let fields = NewEvent {
        title: title.clone(),
        body: body.unwrap_or_default(),
        status: EventStatus::Published,
        all_day,
        start: start_ts,
        end: end_ts,
        recurring: period.is_some(),
        period,
        recurring_end: until_ts,
        categories: categories.into_iter().collect::<BTreeSet<_>>(),
        ..NewEvent::default()
    };
    let recurring = fields.recurring;

    let id = engine.store_mut().create(fields)?;
    engine.on_save(id);

    println!("{}", format!("Created: {} (id {})", title, id).green());
    if recurring {
        let occurrences = engine.store().children_starting_after(id, i64::MIN).len();
        println!("Expanded series: {} occurrences", occurrences);
    }

    Ok(())
}

/// Parse "YYYY-MM-DD HH:MM" (or with a T separator) into naive local
/// epoch seconds. A bare date parses as midnight and flags all-day.
pub fn parse_datetime(input: &str) -> Result<(i64, bool)> {
    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        let ts = date.and_time(NaiveTime::MIN).and_utc().timestamp();
        return Ok((ts, true));
    }

    for format in ["%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(input, format) {
            return Ok((dt.and_utc().timestamp(), false));
        }
    }

    bail!(
        "Could not parse '{}' as a date/time (expected YYYY-MM-DD or YYYY-MM-DD HH:MM)",
        input
    )
}

use anyhow::Result;
use chrono::Local;
use eventcal_core::{EventStore, EventsCalendar, MemoryStore};

use crate::render;

pub fn run(engine: &EventsCalendar<MemoryStore>, all: bool) -> Result<()> {
    let now = Local::now().naive_local().and_utc().timestamp();
    let store = engine.store();
    let ids = if all { store.all() } else { store.upcoming(now) };

    if ids.is_empty() {
        println!("No events.");
        return Ok(());
    }

    for id in ids {
        if let Some(event) = store.get(id) {
            println!("{}", render::event_line(event));
        }
    }

    Ok(())
}

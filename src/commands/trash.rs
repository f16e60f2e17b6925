use anyhow::{bail, Result};
use eventcal_core::{EventId, EventStore, EventsCalendar, MemoryStore};
use owo_colors::OwoColorize;

pub fn run(engine: &mut EventsCalendar<MemoryStore>, id: u64, restore: bool) -> Result<()> {
    let id = EventId(id);
    if engine.store().get(id).is_none() {
        bail!("No event with id {}", id);
    }

    if restore {
        engine.on_untrash(id);
        println!("{}", format!("Restored event {}", id).green());
    } else {
        engine.on_trash(id);
        println!("{}", format!("Trashed event {}", id).yellow());
    }

    Ok(())
}

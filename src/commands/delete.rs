use anyhow::{Context, Result};
use eventcal_core::{EventId, EventStore, EventsCalendar, MemoryStore};
use owo_colors::OwoColorize;

pub fn run(engine: &mut EventsCalendar<MemoryStore>, id: u64) -> Result<()> {
    let id = EventId(id);
    engine
        .store_mut()
        .delete(id)
        .with_context(|| format!("Failed to delete event {}", id))?;

    println!("{}", format!("Deleted event {}", id).red());

    Ok(())
}

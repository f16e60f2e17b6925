use anyhow::{bail, Result};
use eventcal_core::{EventId, EventStore, EventsCalendar, MemoryStore};
use owo_colors::OwoColorize;

pub fn run(engine: &mut EventsCalendar<MemoryStore>, id: u64) -> Result<()> {
    let id = EventId(id);
    let Some(event) = engine.store_mut().get_mut(id) else {
        bail!("No event with id {}", id);
    };
    if !event.is_master() {
        bail!("Event {} is not a series master", id);
    }

    // Future occurrences are deleted and recreated; past ones stay
    event.regenerate = true;
    engine.on_save(id);

    let occurrences = engine.store().children_starting_after(id, i64::MIN).len();
    println!(
        "{}",
        format!("Regenerated series {} ({} occurrences)", id, occurrences).green()
    );

    Ok(())
}

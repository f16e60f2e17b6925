use anyhow::{bail, Result};
use eventcal_core::{EventId, EventStore, EventsCalendar, MemoryStore};
use owo_colors::OwoColorize;

use crate::render;

pub fn run(engine: &EventsCalendar<MemoryStore>, id: u64) -> Result<()> {
    let id = EventId(id);
    let Some(event) = engine.store().get(id) else {
        bail!("No event with id {}", id);
    };

    println!("{}", event.title.bold());
    println!("  Id:      {}", event.id);
    println!("  Status:  {}", event.status.as_str());
    println!(
        "  Starts:  {}",
        render::format_time(event.start, event.all_day)
    );
    println!("  Ends:    {}", render::format_time(event.end, event.all_day));
    if event.all_day {
        println!("  All day");
    }
    if !event.body.is_empty() {
        println!("  Body:    {}", event.body);
    }
    if !event.categories.is_empty() {
        let tags: Vec<&str> = event.categories.iter().map(String::as_str).collect();
        println!("  Tags:    {}", tags.join(", "));
    }
    if let Some(series) = render::series_details(event) {
        println!("  {}", series.cyan());
    }
    if event.is_master() {
        let occurrences = engine.store().children_starting_after(id, i64::MIN).len();
        println!("  Occurrences generated: {}", occurrences);
    }

    Ok(())
}

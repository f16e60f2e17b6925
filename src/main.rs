mod commands;
mod render;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use eventcal_core::{EventsCalendar, MemoryStore};

#[derive(Parser)]
#[command(name = "eventcal")]
#[command(about = "Manage calendar events with recurring series expansion")]
struct Cli {
    /// Path to the event store file (defaults to the user data dir)
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an event; recurring events are expanded on save
    New {
        title: String,

        /// Start date/time ("2025-03-20 15:00", or "2025-03-20" for all-day)
        #[arg(short, long)]
        start: String,

        /// End date/time (defaults to one hour, or one day for all-day)
        #[arg(short, long)]
        end: Option<String>,

        /// Event description
        #[arg(short, long)]
        body: Option<String>,

        /// All-day event
        #[arg(long)]
        all_day: bool,

        /// Recurring period: daily, weekly or monthly
        #[arg(short, long)]
        repeat: Option<String>,

        /// Last date occurrences may start on (defaults to one year out)
        #[arg(short, long)]
        until: Option<String>,

        /// Category tag (repeatable)
        #[arg(short, long)]
        category: Vec<String>,
    },
    /// List upcoming events
    List {
        /// Include events that have already ended
        #[arg(short, long)]
        all: bool,
    },
    /// Show one event in full
    Show { id: u64 },
    /// Delete a series' future occurrences and re-expand it
    Regenerate { id: u64 },
    /// Move an event to the trash
    Trash { id: u64 },
    /// Restore a trashed event
    Untrash { id: u64 },
    /// Permanently delete an event
    Delete { id: u64 },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let path = store_path(cli.store)?;
    let store = if path.exists() {
        MemoryStore::load(&path)
            .with_context(|| format!("Failed to load event store from {}", path.display()))?
    } else {
        MemoryStore::new()
    };
    let mut engine = EventsCalendar::new(store);

    match cli.command {
        Commands::New {
            title,
            start,
            end,
            body,
            all_day,
            repeat,
            until,
            category,
        } => commands::new::run(
            &mut engine,
            title,
            &start,
            end.as_deref(),
            body,
            all_day,
            repeat.as_deref(),
            until.as_deref(),
            category,
        )?,
        Commands::List { all } => commands::list::run(&engine, all)?,
        Commands::Show { id } => commands::show::run(&engine, id)?,
        Commands::Regenerate { id } => commands::regenerate::run(&mut engine, id)?,
        Commands::Trash { id } => commands::trash::run(&mut engine, id, false)?,
        Commands::Untrash { id } => commands::trash::run(&mut engine, id, true)?,
        Commands::Delete { id } => commands::delete::run(&mut engine, id)?,
    }

    engine
        .store()
        .save(&path)
        .with_context(|| format!("Failed to save event store to {}", path.display()))?;

    Ok(())
}

fn store_path(arg: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = arg {
        return Ok(path);
    }
    let dir = dirs::data_dir()
        .context("Could not determine the user data directory")?
        .join("eventcal");
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create {}", dir.display()))?;
    Ok(dir.join("events.json"))
}

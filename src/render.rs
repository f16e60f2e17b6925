//! Terminal rendering for event records.

use chrono::DateTime;
use eventcal_core::{Event, EventStatus};
use owo_colors::OwoColorize;

/// Format a stored timestamp for display: date only for all-day
/// events, date and time otherwise.
pub fn format_time(ts: i64, all_day: bool) -> String {
    match DateTime::from_timestamp(ts, 0) {
        Some(dt) if all_day => dt.naive_utc().format("%b %-d, %Y").to_string(),
        Some(dt) => dt.naive_utc().format("%b %-d, %Y %-I:%M %p").to_string(),
        None => "Unknown".to_string(),
    }
}

/// One-line listing entry: id, start, title, series marker.
pub fn event_line(event: &Event) -> String {
    let time = format_time(event.start, event.all_day);

    let title = match event.status {
        EventStatus::Published => event.title.clone(),
        EventStatus::Draft => format!("{} (draft)", event.title).yellow().to_string(),
        EventStatus::Trashed => format!("{} (trashed)", event.title).red().to_string(),
    };

    let marker = if event.is_master() {
        " [series master]".cyan().to_string()
    } else if let Some(parent) = event.parent {
        format!(" (series {})", parent).dimmed().to_string()
    } else {
        String::new()
    };

    format!("{:>4}  {}  {}{}", event.id.0, time.dimmed(), title, marker)
}

/// Multi-line series description for `show`, in the shape of the
/// listing column: master/child marker plus the recurrence window.
pub fn series_details(event: &Event) -> Option<String> {
    if let Some(parent) = event.parent {
        return Some(format!("Part of series: {}", parent));
    }
    if event.recurring {
        let period = event
            .period
            .map(|p| p.to_string())
            .unwrap_or_else(|| "unset".to_string());
        let until = event
            .recurring_end
            .map(|ts| format_time(ts, true))
            .unwrap_or_else(|| "one year out".to_string());
        return Some(format!(
            "Series master, recurring {} until {}",
            period, until
        ));
    }
    None
}

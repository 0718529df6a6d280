// src/export/model.rs

use crate::models::{CareEvent, Locale};
use crate::utils::time::format_optional;
use serde::Serialize;

/// Flat export row of a care event, joined with its plant's name.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct EventExport {
    pub id: i64,
    pub plant_id: i64,
    pub plant: String,
    pub kind: String,
    pub interval_days: Option<f64>,
    pub last_date: String,
    pub next_date: String,
    pub fertilizer_type: String,
    pub reminder: String,
    pub done: bool,
}

impl EventExport {
    pub fn from_event(event: &CareEvent, plant: &str, locale: Locale) -> Self {
        let reminder = if event.reminder_enabled {
            format_optional(event.reminder_date_time.as_ref())
        } else {
            String::new()
        };

        Self {
            id: event.id,
            plant_id: event.plant_id,
            plant: plant.to_string(),
            kind: event.kind.label(locale).to_string(),
            interval_days: event.interval_days,
            last_date: blank_dash(format_optional(event.last_date.as_ref())),
            next_date: blank_dash(format_optional(event.next_date.as_ref())),
            fertilizer_type: event.fertilizer_type.clone().unwrap_or_default(),
            reminder,
            done: event.done,
        }
    }
}

/// Exports carry empty cells, not the terminal's "—" placeholder.
fn blank_dash(s: String) -> String {
    if s == "—" { String::new() } else { s }
}

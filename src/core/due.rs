//! Next-due computation for care events.

use crate::models::{CareEvent, CareKind, Locale};
use crate::utils::time::MILLIS_PER_DAY;
use chrono::{DateTime, Duration, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueStatus {
    Done,
    Overdue,
    DueSoon,
    Upcoming,
    /// Neither a next date nor last date + interval is known.
    Unscheduled,
}

impl DueStatus {
    pub fn label(&self) -> &'static str {
        match self {
            DueStatus::Done => "done",
            DueStatus::Overdue => "overdue",
            DueStatus::DueSoon => "due soon",
            DueStatus::Upcoming => "upcoming",
            DueStatus::Unscheduled => "unscheduled",
        }
    }
}

/// Repotting with a planned date uses it; anything else is last date plus
/// the interval.
pub fn next_due(event: &CareEvent) -> Option<DateTime<Utc>> {
    if event.kind == CareKind::Repotting
        && let Some(next) = event.next_date
    {
        return Some(next);
    }

    let last = event.last_date?;
    let days = event.interval_days.filter(|d| d.is_finite() && *d > 0.0)?;
    let millis = (days * MILLIS_PER_DAY).round() as i64;

    last.checked_add_signed(Duration::milliseconds(millis))
}

pub fn due_status(event: &CareEvent, now: DateTime<Utc>, soon_window: Duration) -> DueStatus {
    if event.done {
        return DueStatus::Done;
    }

    match next_due(event) {
        None => DueStatus::Unscheduled,
        Some(at) if at < now => DueStatus::Overdue,
        Some(at) if at - now <= soon_window => DueStatus::DueSoon,
        Some(_) => DueStatus::Upcoming,
    }
}

/// "Interval: 3 days", "Interval: 6 h", "Interval: 1 h 30 min", "Interval: <1 min".
pub fn format_interval(days: f64, locale: Locale) -> String {
    let (prefix, unit_days, unit_h, unit_min) = match locale {
        Locale::En => ("Interval:", "days", "h", "min"),
        Locale::Ru => ("Интервал:", "дней", "ч", "мин"),
    };

    if days >= 1.0 {
        return format!("{prefix} {} {unit_days}", days.trunc() as i64);
    }

    let total_minutes = (days * 24.0 * 60.0) as i64;
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;

    let mut parts = Vec::new();
    if hours > 0 {
        parts.push(format!("{hours} {unit_h}"));
    }
    if minutes > 0 {
        parts.push(format!("{minutes} {unit_min}"));
    }
    if parts.is_empty() {
        parts.push(format!("<1 {unit_min}"));
    }

    format!("{prefix} {}", parts.join(" "))
}

/// One line of the `due` overview.
#[derive(Debug, Clone, PartialEq)]
pub struct DueEntry {
    pub event: CareEvent,
    pub due_at: Option<DateTime<Utc>>,
    pub status: DueStatus,
}

/// Open events sorted by due date; unscheduled ones go last.
pub fn due_list(events: Vec<CareEvent>, now: DateTime<Utc>, soon_window: Duration) -> Vec<DueEntry> {
    let mut entries: Vec<DueEntry> = events
        .into_iter()
        .filter(|e| !e.done)
        .map(|event| DueEntry {
            due_at: next_due(&event),
            status: due_status(&event, now, soon_window),
            event,
        })
        .collect();

    entries.sort_by_key(|e| (e.due_at.is_none(), e.due_at, e.event.id));
    entries
}

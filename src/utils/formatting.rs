//! Formatting utilities used for CLI and export outputs.

use crate::models::{CareEvent, Locale};

pub fn bold(s: &str) -> String {
    format!("\x1b[1m{}\x1b[0m", s)
}

/// "Watering 🌊", "Полив 🌊", ...
pub fn kind_with_emoji(event: &CareEvent, locale: Locale) -> String {
    format!("{} {}", event.kind.label(locale), event.kind.emoji())
}

pub fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}

pub fn or_dash(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.to_string(),
        _ => "—".to_string(),
    }
}

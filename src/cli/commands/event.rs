use crate::cli::commands::{open_reminders, open_store};
use crate::cli::parser::{Commands, EventAction, EventFields};
use crate::config::Config;
use crate::core::due::{DueStatus, due_status, format_interval};
use crate::core::{CareEventLogic, SavedEvent};
use crate::errors::{AppError, AppResult};
use crate::models::{CareEvent, CareKind, Locale};
use crate::reminder::ScheduleOutcome;
use crate::ui::messages::{header, info, success, warning};
use crate::utils::formatting::{kind_with_emoji, yes_no};
use crate::utils::table::{Column, Table};
use crate::utils::time::{format_optional, parse_optional_datetime};
use chrono::{Duration, Utc};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Event { action } = cmd {
        let mut store = open_store(cfg)?;

        match action {
            EventAction::Add { plant, fields } => {
                let code = fields
                    .kind
                    .as_deref()
                    .ok_or_else(|| AppError::InvalidInput("--kind is required".into()))?;
                let mut event = CareEvent::new(*plant, parse_kind(code)?);
                apply_fields(&mut event, fields)?;

                let mut reminders = open_reminders(cfg)?;
                let saved = CareEventLogic::add(&mut store, &mut reminders, event)?;
                success(format!(
                    "Care event #{} added: {}",
                    saved.event.id,
                    kind_with_emoji(&saved.event, cfg.language)
                ));
                report_reminder(&saved);
            }

            EventAction::Edit {
                id,
                fields,
                no_remind,
                undone,
            } => {
                let mut event = store.get_event(*id)?;
                apply_fields(&mut event, fields)?;
                if *no_remind {
                    event = event.without_reminder();
                }
                if *undone {
                    event.done = false;
                }

                let mut reminders = open_reminders(cfg)?;
                let saved = CareEventLogic::update(&mut store, &mut reminders, event)?;
                success(format!("Care event #{} updated", saved.event.id));
                report_reminder(&saved);
            }

            EventAction::Del { id } => {
                let mut reminders = open_reminders(cfg)?;
                let removed = CareEventLogic::delete(&mut store, &mut reminders, *id)?;
                success(format!(
                    "Care event #{} deleted ({})",
                    removed.id,
                    kind_with_emoji(&removed, cfg.language)
                ));
            }

            EventAction::Done { id } => {
                let mut reminders = open_reminders(cfg)?;
                let saved = CareEventLogic::mark_done(&mut store, &mut reminders, *id)?;
                success(format!(
                    "Care event #{} marked as done ({})",
                    saved.event.id,
                    format_optional(saved.event.last_date.as_ref())
                ));
                report_reminder(&saved);
            }

            EventAction::List { plant, watch } => {
                let name = store.get_plant(*plant)?.name;
                let mut live = store.watch_events(*plant);
                let soon = cfg.due_soon_window()?;
                let pause = std::time::Duration::from_secs(cfg.poll_interval_secs.max(1));

                loop {
                    if let Some(events) = store.poll(&mut live)? {
                        header(format!("Care events of {name}"));
                        print_events(&events, cfg.language, soon);
                    }
                    if !*watch {
                        break;
                    }
                    std::thread::sleep(pause);
                }
            }
        }
    }

    Ok(())
}

fn parse_kind(code: &str) -> AppResult<CareKind> {
    CareKind::from_code(code).ok_or_else(|| AppError::InvalidCareKind(code.to_string()))
}

/// Copy the options given on the command line onto `event`.
fn apply_fields(event: &mut CareEvent, fields: &EventFields) -> AppResult<()> {
    if let Some(code) = &fields.kind {
        event.kind = parse_kind(code)?;
    }
    if let Some(days) = fields.interval {
        event.interval_days = Some(days);
    }
    if let Some(last) = parse_optional_datetime(fields.last.as_ref())? {
        event.last_date = Some(last);
    }
    if let Some(next) = parse_optional_datetime(fields.next.as_ref())? {
        event.next_date = Some(next);
    }
    if let Some(label) = &fields.fertilizer {
        event.fertilizer_type = Some(label.clone());
    }
    if let Some(at) = parse_optional_datetime(fields.remind.as_ref())? {
        event.reminder_enabled = true;
        event.reminder_date_time = Some(at);
    }
    Ok(())
}

fn report_reminder(saved: &SavedEvent) {
    match &saved.reminder {
        Some(ScheduleOutcome::Scheduled { key, delay }) => {
            info(format!(
                "Reminder scheduled ({key}) in {}",
                human_delay(*delay)
            ));
        }
        Some(ScheduleOutcome::InPast) => {
            warning("Reminder time is in the past: no reminder scheduled.");
        }
        Some(ScheduleOutcome::ReminderDisabled) | None => {}
    }
}

fn human_delay(delay: std::time::Duration) -> String {
    let mins = delay.as_secs() / 60;
    let (d, h, m) = (mins / 1440, (mins % 1440) / 60, mins % 60);
    match (d, h) {
        (0, 0) => format!("{m} min"),
        (0, _) => format!("{h} h {m} min"),
        _ => format!("{d} d {h} h"),
    }
}

fn print_events(events: &[CareEvent], locale: Locale, soon: Duration) {
    if events.is_empty() {
        info("No care events.");
        return;
    }

    let now = Utc::now();
    let mut table = Table::new(vec![
        Column::new("ID", 3),
        Column::new("Type", 8),
        Column::new("Interval", 8),
        Column::new("Last", 10),
        Column::new("Next", 10),
        Column::new("Fertilizer", 5),
        Column::new("Reminder", 8),
        Column::new("Done", 4),
        Column::new("Status", 6),
    ]);

    for ev in events {
        let status = due_status(ev, now, soon);
        table.add_row(vec![
            ev.id.to_string(),
            kind_with_emoji(ev, locale),
            ev.interval_days
                .map(|d| format_interval(d, locale))
                .unwrap_or_else(|| "—".to_string()),
            format_optional(ev.last_date.as_ref()),
            format_optional(ev.next_date.as_ref()),
            ev.fertilizer_type.clone().unwrap_or_else(|| "—".to_string()),
            if ev.reminder_enabled {
                format_optional(ev.reminder_date_time.as_ref())
            } else {
                "off".to_string()
            },
            yes_no(ev.done).to_string(),
            match status {
                DueStatus::Unscheduled => "—".to_string(),
                s => s.label().to_string(),
            },
        ]);
    }

    print!("{}", table.render());
}

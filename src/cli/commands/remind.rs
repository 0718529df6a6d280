use crate::cli::commands::{open_reminders, open_store};
use crate::cli::parser::{Commands, RemindAction};
use crate::config::Config;
use crate::core::clock::SystemClock;
use crate::errors::{AppError, AppResult};
use crate::reminder::{ConsoleNotifier, ReminderRunner, ReminderWorker, SqliteTriggerQueue, TaskScheduler};
use crate::ui::messages::{info, success};
use crate::utils::table::{Column, Table};
use crate::utils::time::{format_local, parse_local_datetime};
use chrono::Utc;
use std::time::Duration;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Remind { action } = cmd {
        match action {
            RemindAction::List => {
                let queue = SqliteTriggerQueue::open(&cfg.database)?;
                let pending = queue.pending()?;
                if pending.is_empty() {
                    info("No pending reminders.");
                    return Ok(());
                }

                let mut table = Table::new(vec![
                    Column::new("Key", 20),
                    Column::new("Due", 10),
                    Column::new("Plant", 8),
                    Column::new("Task", 8),
                ]);
                for t in pending {
                    table.add_row(vec![
                        t.key,
                        format_local(&t.due_at),
                        t.payload.plant_name,
                        t.payload.event_type,
                    ]);
                }
                print!("{}", table.render());
            }

            RemindAction::Run { watch, at } => {
                let queue = SqliteTriggerQueue::open(&cfg.database)?;
                let worker = ReminderWorker::new(
                    ConsoleNotifier::new(cfg.notifications_enabled),
                    cfg.language,
                );
                let mut runner = ReminderRunner::new(queue, worker);

                if *watch {
                    info(format!(
                        "Waiting for reminders (every {} s, Ctrl+C to stop)…",
                        cfg.poll_interval_secs.max(1)
                    ));
                    let pause = Duration::from_secs(cfg.poll_interval_secs.max(1));
                    return runner.run_forever(&SystemClock, pause);
                }

                let now = match at {
                    Some(s) => {
                        parse_local_datetime(s).ok_or_else(|| AppError::InvalidDate(s.clone()))?
                    }
                    None => Utc::now(),
                };

                let fired = runner.run_once(now)?;
                if fired.is_empty() {
                    info("No reminders due.");
                } else {
                    let store = open_store(cfg)?;
                    for t in &fired {
                        store.audit("remind", &t.key, "reminder delivered");
                    }
                    success(format!("{} reminder(s) delivered.", fired.len()));
                }
            }

            RemindAction::Cancel { event_id } => {
                let mut reminders = open_reminders(cfg)?;
                reminders.cancel(*event_id)?;
                success(format!("Reminder of care event #{event_id} cancelled"));
            }
        }
    }

    Ok(())
}

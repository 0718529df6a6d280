use super::{ReminderPayload, TaskScheduler, trigger_key};
use crate::core::clock::{Clock, SystemClock};
use crate::errors::AppResult;
use crate::models::{CareEvent, Locale};
use chrono::{DateTime, Utc};
use std::time::Duration;

/// What [`ReminderScheduler::schedule`] decided for an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduleOutcome {
    Scheduled { key: String, delay: Duration },
    /// Reminder switched off or no reminder timestamp.
    ReminderDisabled,
    /// The reminder timestamp is already behind us; nothing fires.
    InPast,
}

impl ScheduleOutcome {
    pub fn is_scheduled(&self) -> bool {
        matches!(self, ScheduleOutcome::Scheduled { .. })
    }
}

/// Registers and cancels the single pending trigger of each care event.
pub struct ReminderScheduler<S: TaskScheduler, C: Clock = SystemClock> {
    port: S,
    clock: C,
    locale: Locale,
}

impl<S: TaskScheduler> ReminderScheduler<S, SystemClock> {
    pub fn new(port: S, locale: Locale) -> Self {
        Self::with_clock(port, SystemClock, locale)
    }
}

impl<S: TaskScheduler, C: Clock> ReminderScheduler<S, C> {
    pub fn with_clock(port: S, clock: C, locale: Locale) -> Self {
        Self {
            port,
            clock,
            locale,
        }
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn port(&self) -> &S {
        &self.port
    }

    pub fn port_mut(&mut self) -> &mut S {
        &mut self.port
    }

    pub fn into_port(self) -> S {
        self.port
    }

    /// Register the reminder of `event`, replacing any pending one.
    ///
    /// A disabled reminder is a no-op and leaves an existing trigger alone;
    /// removing it is [`ReminderScheduler::cancel`]'s job.
    pub fn schedule(&mut self, event: &CareEvent, plant_name: &str) -> AppResult<ScheduleOutcome> {
        let at = match (event.reminder_enabled, event.reminder_date_time) {
            (true, Some(at)) => at,
            _ => return Ok(ScheduleOutcome::ReminderDisabled),
        };

        let now = self.clock.now();
        let delay = match (at - now).to_std() {
            Ok(d) => d,
            Err(_) => {
                tracing::debug!(event_id = event.id, %at, %now, "reminder in the past, dropped");
                return Ok(ScheduleOutcome::InPast);
            }
        };

        let key = trigger_key(event.id);
        let payload = ReminderPayload {
            event_id: event.id,
            plant_id: event.plant_id,
            plant_name: plant_name.to_string(),
            event_type: event.kind.label(self.locale).to_string(),
        };

        tracing::info!(
            event_id = event.id,
            key = %key,
            delay_secs = delay.as_secs(),
            reminder_at = %at,
            "scheduling reminder"
        );
        self.port.schedule_once(&key, delay, payload)?;

        Ok(ScheduleOutcome::Scheduled { key, delay })
    }

    /// Idempotent.
    pub fn cancel(&mut self, event_id: i64) -> AppResult<()> {
        let key = trigger_key(event_id);
        tracing::debug!(event_id, key = %key, "cancelling reminder");
        self.port.cancel(&key)
    }
}

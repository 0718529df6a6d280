//! Care-event reminders.
//!
//! A reminder is one pending trigger per care event, registered under a key
//! derived from the event id alone. Registering again under the same key
//! replaces the previous trigger, so an event never has more than one.
//!
//! - [`scheduler::ReminderScheduler`] decides whether and when to register.
//! - [`TaskScheduler`] is the port that holds pending triggers:
//!   [`memory::InMemoryScheduler`] or the durable [`queue::SqliteTriggerQueue`].
//! - [`runner::ReminderRunner`] takes due triggers and hands them to
//!   [`worker::ReminderWorker`], which turns a payload into a notification.

pub mod memory;
pub mod notifier;
pub mod queue;
pub mod runner;
pub mod scheduler;
pub mod worker;

use crate::errors::AppResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub use memory::InMemoryScheduler;
pub use notifier::ConsoleNotifier;
pub use queue::SqliteTriggerQueue;
pub use runner::ReminderRunner;
pub use scheduler::{ReminderScheduler, ScheduleOutcome};
pub use worker::{Notification, NotificationChannel, NotificationIcon, Notifier, ReminderWorker, WorkResult};

pub const TRIGGER_KEY_PREFIX: &str = "care_event_reminder_";

/// `care_event_reminder_<eventId>`
pub fn trigger_key(event_id: i64) -> String {
    format!("{TRIGGER_KEY_PREFIX}{event_id}")
}

/// Data captured at scheduling time and handed to the worker at fire time.
/// The worker never goes back to the store: the event may have changed or
/// been deleted by then.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderPayload {
    pub event_id: i64,
    pub plant_id: i64,
    pub plant_name: String,
    /// Localized task label ("Watering", "Полив", ...).
    pub event_type: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PendingTrigger {
    pub key: String,
    pub due_at: DateTime<Utc>,
    pub scheduled_at: DateTime<Utc>,
    pub payload: ReminderPayload,
}

impl PendingTrigger {
    pub fn new(key: &str, scheduled_at: DateTime<Utc>, delay: Duration, payload: ReminderPayload) -> Self {
        let delay = chrono::Duration::from_std(delay).unwrap_or(chrono::Duration::MAX);
        let due_at = scheduled_at
            .checked_add_signed(delay)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        Self {
            key: key.to_string(),
            due_at,
            scheduled_at,
            payload,
        }
    }

    /// Delay requested at registration time.
    pub fn delay(&self) -> chrono::Duration {
        self.due_at - self.scheduled_at
    }

    pub fn is_due(&self, now: &DateTime<Utc>) -> bool {
        self.due_at <= *now
    }
}

/// Keyed one-shot delayed work with replace-on-conflict registration.
pub trait TaskScheduler {
    /// Register `payload` to fire after `delay`. An existing trigger under
    /// `key` is replaced.
    fn schedule_once(&mut self, key: &str, delay: Duration, payload: ReminderPayload) -> AppResult<()>;

    /// Drop the trigger under `key`, if any.
    fn cancel(&mut self, key: &str) -> AppResult<()>;

    /// Every pending trigger, soonest first.
    fn pending(&self) -> AppResult<Vec<PendingTrigger>>;
}

/// A scheduler whose due triggers can be collected by a runner.
pub trait DueSource {
    /// Remove and return the triggers due at `now`, soonest first.
    fn take_due(&mut self, now: DateTime<Utc>) -> AppResult<Vec<PendingTrigger>>;
}

impl<T: TaskScheduler + ?Sized> TaskScheduler for &mut T {
    fn schedule_once(&mut self, key: &str, delay: Duration, payload: ReminderPayload) -> AppResult<()> {
        (**self).schedule_once(key, delay, payload)
    }

    fn cancel(&mut self, key: &str) -> AppResult<()> {
        (**self).cancel(key)
    }

    fn pending(&self) -> AppResult<Vec<PendingTrigger>> {
        (**self).pending()
    }
}

impl<T: TaskScheduler + ?Sized> TaskScheduler for Box<T> {
    fn schedule_once(&mut self, key: &str, delay: Duration, payload: ReminderPayload) -> AppResult<()> {
        (**self).schedule_once(key, delay, payload)
    }

    fn cancel(&mut self, key: &str) -> AppResult<()> {
        (**self).cancel(key)
    }

    fn pending(&self) -> AppResult<Vec<PendingTrigger>> {
        (**self).pending()
    }
}

impl<T: DueSource + ?Sized> DueSource for &mut T {
    fn take_due(&mut self, now: DateTime<Utc>) -> AppResult<Vec<PendingTrigger>> {
        (**self).take_due(now)
    }
}

use crate::core::clock::Clock;
use crate::db::CareStore;
use crate::errors::AppResult;
use crate::models::CareEvent;
use crate::reminder::{ReminderScheduler, ScheduleOutcome, TaskScheduler};

/// Result of a care event write.
#[derive(Debug, Clone, PartialEq)]
pub struct SavedEvent {
    pub event: CareEvent,
    /// What happened to the reminder: `None` when it was cancelled or the
    /// scheduling port failed.
    pub reminder: Option<ScheduleOutcome>,
}

/// Care event operations. Every write goes to the store first; the reminder
/// is brought in line afterwards.
pub struct CareEventLogic;

impl CareEventLogic {
    pub fn add<S: TaskScheduler, C: Clock>(
        store: &mut CareStore,
        reminders: &mut ReminderScheduler<S, C>,
        event: CareEvent,
    ) -> AppResult<SavedEvent> {
        let event = event.normalized();
        event.validate()?;

        let event = store.add_event(event)?;
        store.audit(
            "add",
            &format!("event {}", event.id),
            &format!("{} for plant {}", event.kind.to_db_str(), event.plant_id),
        );

        let reminder = sync_reminder(store, reminders, &event);
        Ok(SavedEvent { event, reminder })
    }

    /// Save `event` in place of the stored one. A disabled reminder cancels
    /// the pending trigger.
    pub fn update<S: TaskScheduler, C: Clock>(
        store: &mut CareStore,
        reminders: &mut ReminderScheduler<S, C>,
        event: CareEvent,
    ) -> AppResult<SavedEvent> {
        let event = event.normalized();
        event.validate()?;

        store.update_event(&event)?;
        store.audit(
            "edit",
            &format!("event {}", event.id),
            &format!("{} updated", event.kind.to_db_str()),
        );

        let reminder = sync_reminder(store, reminders, &event);
        Ok(SavedEvent { event, reminder })
    }

    pub fn delete<S: TaskScheduler, C: Clock>(
        store: &mut CareStore,
        reminders: &mut ReminderScheduler<S, C>,
        id: i64,
    ) -> AppResult<CareEvent> {
        let removed = store.delete_event(id)?;
        store.audit(
            "del",
            &format!("event {id}"),
            &format!("{} removed", removed.kind.to_db_str()),
        );

        cancel_quietly(store, reminders, id);
        Ok(removed)
    }

    /// `done = true`, `last_date = now`; the reminder timestamp is kept and
    /// registered again under the same key.
    pub fn mark_done<S: TaskScheduler, C: Clock>(
        store: &mut CareStore,
        reminders: &mut ReminderScheduler<S, C>,
        id: i64,
    ) -> AppResult<SavedEvent> {
        let mut event = store.get_event(id)?;
        event.done = true;
        event.last_date = Some(reminders.now());

        store.update_event(&event)?;
        store.audit("done", &format!("event {id}"), "marked as done");

        let reminder = sync_reminder(store, reminders, &event);
        Ok(SavedEvent { event, reminder })
    }
}

/// Register the stored event's reminder, or drop its trigger when there is
/// nothing left to fire. Port failures are logged, never returned: the store
/// write already happened.
fn sync_reminder<S: TaskScheduler, C: Clock>(
    store: &CareStore,
    reminders: &mut ReminderScheduler<S, C>,
    event: &CareEvent,
) -> Option<ScheduleOutcome> {
    if !event.has_pending_reminder() {
        cancel_quietly(store, reminders, event.id);
        return None;
    }

    let plant_name = store.plant_name(event.plant_id);
    match reminders.schedule(event, &plant_name) {
        Ok(ScheduleOutcome::InPast) => {
            // An earlier, still pending registration must not fire either.
            cancel_quietly(store, reminders, event.id);
            Some(ScheduleOutcome::InPast)
        }
        Ok(outcome) => {
            if let ScheduleOutcome::Scheduled { key, .. } = &outcome {
                store.audit("remind", key, "reminder scheduled");
            }
            Some(outcome)
        }
        Err(e) => {
            tracing::warn!(%e, event_id = event.id, "failed to schedule reminder");
            store.audit(
                "remind_failed",
                &format!("event {}", event.id),
                &e.to_string(),
            );
            None
        }
    }
}

pub(crate) fn cancel_quietly<S: TaskScheduler, C: Clock>(
    store: &CareStore,
    reminders: &mut ReminderScheduler<S, C>,
    event_id: i64,
) {
    if let Err(e) = reminders.cancel(event_id) {
        tracing::warn!(%e, event_id, "failed to cancel reminder");
        store.audit("remind_failed", &format!("event {event_id}"), &e.to_string());
    }
}

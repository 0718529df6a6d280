mod common;

use chrono::Duration;
use common::t0;
use plantcare::core::{CareEventLogic, Clock, FixedClock, NoteLogic, PlantLogic};
use plantcare::db::CareStore;
use plantcare::db::log::load_log;
use plantcare::errors::{AppError, AppResult};
use plantcare::models::{CareEvent, CareKind, Locale, Plant};
use plantcare::reminder::{
    InMemoryScheduler, PendingTrigger, ReminderPayload, ReminderScheduler, ScheduleOutcome,
    TaskScheduler, trigger_key,
};
use std::rc::Rc;

type Shared = Rc<FixedClock>;
type Reminders = ReminderScheduler<InMemoryScheduler<Shared>, Shared>;

fn setup() -> (CareStore, Shared, Reminders, Plant) {
    let mut store = CareStore::in_memory().unwrap();
    let clock = Rc::new(FixedClock::new(t0()));
    let reminders = ReminderScheduler::with_clock(
        InMemoryScheduler::with_clock(clock.clone()),
        clock.clone(),
        Locale::En,
    );
    let plant = PlantLogic::add(&mut store, Plant::new("Ficus", "", "")).unwrap();
    (store, clock, reminders, plant)
}

#[test]
fn add_stores_event_and_schedules_reminder() {
    let (mut store, _clock, mut reminders, plant) = setup();

    let ev = CareEvent::new(plant.id, CareKind::Watering).with_reminder(t0() + Duration::hours(1));
    let saved = CareEventLogic::add(&mut store, &mut reminders, ev).unwrap();

    assert!(saved.event.id > 0);
    assert_eq!(store.get_event(saved.event.id).unwrap(), saved.event);
    assert!(matches!(saved.reminder, Some(ScheduleOutcome::Scheduled { .. })));

    let trigger = reminders.port().get(&trigger_key(saved.event.id)).unwrap();
    assert_eq!(trigger.payload.plant_name, "Ficus");
    assert_eq!(trigger.payload.event_type, "Watering");
    assert_eq!(trigger.payload.plant_id, plant.id);
}

#[test]
fn add_normalizes_fields_that_do_not_apply() {
    let (mut store, _clock, mut reminders, plant) = setup();

    let mut ev = CareEvent::new(plant.id, CareKind::Watering);
    ev.fertilizer_type = Some("NPK".into());
    ev.next_date = Some(t0());
    ev.reminder_date_time = Some(t0() + Duration::hours(1));

    let saved = CareEventLogic::add(&mut store, &mut reminders, ev).unwrap();
    let stored = store.get_event(saved.event.id).unwrap();

    assert_eq!(stored.fertilizer_type, None);
    assert_eq!(stored.next_date, None);
    assert_eq!(stored.reminder_date_time, None);
    assert!(reminders.port().is_empty());
}

#[test]
fn add_rejects_unknown_plant_and_bad_interval() {
    let (mut store, _clock, mut reminders, plant) = setup();

    let err = CareEventLogic::add(
        &mut store,
        &mut reminders,
        CareEvent::new(999, CareKind::Spraying).with_reminder(t0() + Duration::hours(1)),
    )
    .unwrap_err();
    assert!(matches!(err, AppError::PlantNotFound(999)));

    let mut ev = CareEvent::new(plant.id, CareKind::Watering);
    ev.interval_days = Some(-2.0);
    let err = CareEventLogic::add(&mut store, &mut reminders, ev).unwrap_err();
    assert!(matches!(err, AppError::InvalidInterval(_)));

    assert!(store.all_events().unwrap().is_empty());
    assert!(reminders.port().is_empty());
}

#[test]
fn update_with_reminder_disabled_cancels_trigger() {
    let (mut store, _clock, mut reminders, plant) = setup();

    let ev = CareEvent::new(plant.id, CareKind::Watering).with_reminder(t0() + Duration::hours(1));
    let saved = CareEventLogic::add(&mut store, &mut reminders, ev).unwrap();
    assert_eq!(reminders.port().len(), 1);

    let edited = saved.event.without_reminder();
    let saved = CareEventLogic::update(&mut store, &mut reminders, edited).unwrap();

    assert_eq!(saved.reminder, None);
    assert!(reminders.port().is_empty());
    assert!(!store.get_event(saved.event.id).unwrap().reminder_enabled);
}

#[test]
fn update_moves_the_single_trigger() {
    let (mut store, _clock, mut reminders, plant) = setup();

    let ev = CareEvent::new(plant.id, CareKind::Watering).with_reminder(t0() + Duration::hours(1));
    let saved = CareEventLogic::add(&mut store, &mut reminders, ev).unwrap();

    let later = saved.event.with_reminder(t0() + Duration::days(2));
    CareEventLogic::update(&mut store, &mut reminders, later).unwrap();

    let pending = reminders.port().pending().unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].due_at, t0() + Duration::days(2));
}

#[test]
fn update_to_past_reminder_leaves_nothing_pending() {
    let (mut store, _clock, mut reminders, plant) = setup();

    let ev = CareEvent::new(plant.id, CareKind::Watering).with_reminder(t0() + Duration::hours(1));
    let saved = CareEventLogic::add(&mut store, &mut reminders, ev).unwrap();

    let past = saved.event.with_reminder(t0() - Duration::hours(1));
    let saved = CareEventLogic::update(&mut store, &mut reminders, past).unwrap();

    assert_eq!(saved.reminder, Some(ScheduleOutcome::InPast));
    assert!(reminders.port().is_empty());
}

#[test]
fn delete_removes_event_and_trigger() {
    let (mut store, _clock, mut reminders, plant) = setup();

    let ev = CareEvent::new(plant.id, CareKind::Spraying).with_reminder(t0() + Duration::hours(1));
    let saved = CareEventLogic::add(&mut store, &mut reminders, ev).unwrap();

    let removed = CareEventLogic::delete(&mut store, &mut reminders, saved.event.id).unwrap();
    assert_eq!(removed.id, saved.event.id);
    assert!(reminders.port().is_empty());
    assert!(matches!(
        store.get_event(saved.event.id),
        Err(AppError::EventNotFound(_))
    ));

    assert!(matches!(
        CareEventLogic::delete(&mut store, &mut reminders, saved.event.id),
        Err(AppError::EventNotFound(_))
    ));
}

#[test]
fn mark_done_keeps_reminder_and_reschedules_same_key() {
    let (mut store, clock, mut reminders, plant) = setup();
    let remind_at = t0() + Duration::hours(1);

    let ev = CareEvent::new(plant.id, CareKind::Watering).with_reminder(remind_at);
    let saved = CareEventLogic::add(&mut store, &mut reminders, ev).unwrap();
    let key = trigger_key(saved.event.id);

    clock.advance(Duration::minutes(10));
    let done = CareEventLogic::mark_done(&mut store, &mut reminders, saved.event.id).unwrap();

    assert!(done.event.done);
    assert_eq!(done.event.last_date, Some(clock.now()));
    assert_eq!(done.event.reminder_date_time, Some(remind_at));
    assert_eq!(
        done.reminder,
        Some(ScheduleOutcome::Scheduled {
            key: key.clone(),
            delay: std::time::Duration::from_secs(50 * 60),
        })
    );

    let pending = reminders.port().pending().unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].key, key);
    assert_eq!(pending[0].scheduled_at, clock.now());
    assert_eq!(pending[0].due_at, remind_at);

    let stored = store.get_event(saved.event.id).unwrap();
    assert!(stored.done);
    assert_eq!(stored.last_date, Some(clock.now()));
}

#[test]
fn mark_done_after_reminder_passed_schedules_nothing() {
    let (mut store, clock, mut reminders, plant) = setup();

    let ev = CareEvent::new(plant.id, CareKind::Watering).with_reminder(t0() + Duration::hours(1));
    let saved = CareEventLogic::add(&mut store, &mut reminders, ev).unwrap();

    clock.advance(Duration::hours(2));
    let done = CareEventLogic::mark_done(&mut store, &mut reminders, saved.event.id).unwrap();

    assert_eq!(done.reminder, Some(ScheduleOutcome::InPast));
    assert!(reminders.port().is_empty());
}

#[test]
fn deleting_plant_cascades_and_cancels() {
    let (mut store, _clock, mut reminders, plant) = setup();
    let other = PlantLogic::add(&mut store, Plant::new("Monstera", "", "")).unwrap();

    let mut ids = Vec::new();
    for kind in [CareKind::Watering, CareKind::Fertilizing] {
        let ev = CareEvent::new(plant.id, kind).with_reminder(t0() + Duration::hours(1));
        ids.push(CareEventLogic::add(&mut store, &mut reminders, ev).unwrap().event.id);
    }
    let kept = CareEventLogic::add(
        &mut store,
        &mut reminders,
        CareEvent::new(other.id, CareKind::Spraying).with_reminder(t0() + Duration::hours(1)),
    )
    .unwrap();

    let removed = PlantLogic::delete(&mut store, &mut reminders, plant.id).unwrap();
    assert_eq!(removed, ids);

    assert!(store.events_for_plant(plant.id).unwrap().is_empty());
    let pending: Vec<String> = reminders
        .port()
        .pending()
        .unwrap()
        .into_iter()
        .map(|t| t.key)
        .collect();
    assert_eq!(pending, vec![trigger_key(kept.event.id)]);

    assert!(matches!(
        PlantLogic::delete(&mut store, &mut reminders, plant.id),
        Err(AppError::PlantNotFound(_))
    ));
}

/// Port whose every operation fails, as when the trigger table is unreachable.
struct BrokenPort;

impl TaskScheduler for BrokenPort {
    fn schedule_once(
        &mut self,
        _key: &str,
        _delay: std::time::Duration,
        _payload: ReminderPayload,
    ) -> AppResult<()> {
        Err(AppError::InvalidInput("trigger queue unavailable".into()))
    }

    fn cancel(&mut self, _key: &str) -> AppResult<()> {
        Err(AppError::InvalidInput("trigger queue unavailable".into()))
    }

    fn pending(&self) -> AppResult<Vec<PendingTrigger>> {
        Ok(Vec::new())
    }
}

#[test]
fn scheduling_failure_does_not_undo_the_write() {
    let mut store = CareStore::in_memory().unwrap();
    let plant = PlantLogic::add(&mut store, Plant::new("Ficus", "", "")).unwrap();
    let clock = Rc::new(FixedClock::new(t0()));
    let mut reminders = ReminderScheduler::with_clock(BrokenPort, clock, Locale::En);

    let ev = CareEvent::new(plant.id, CareKind::Watering).with_reminder(t0() + Duration::hours(1));
    let saved = CareEventLogic::add(&mut store, &mut reminders, ev).unwrap();

    assert_eq!(saved.reminder, None);
    assert!(store.get_event(saved.event.id).is_ok());

    CareEventLogic::delete(&mut store, &mut reminders, saved.event.id).unwrap();

    let failures = load_log(store.conn())
        .unwrap()
        .into_iter()
        .filter(|r| r.operation == "remind_failed")
        .count();
    assert_eq!(failures, 2);
}

#[test]
fn notes_lifecycle() {
    let (mut store, _clock, mut reminders, plant) = setup();

    let general = NoteLogic::add(&mut store, "Buy soil", None).unwrap();
    let linked = NoteLogic::add(&mut store, "Check leaves", Some(plant.id)).unwrap();

    assert!(matches!(
        NoteLogic::add(&mut store, "   ", None),
        Err(AppError::InvalidInput(_))
    ));
    assert!(matches!(
        NoteLogic::add(&mut store, "Orphan", Some(999)),
        Err(AppError::PlantNotFound(999))
    ));

    assert_eq!(NoteLogic::list(&store, None).unwrap().len(), 2);
    let for_plant: Vec<i64> = NoteLogic::list(&store, Some(plant.id))
        .unwrap()
        .iter()
        .map(|n| n.id)
        .collect();
    assert_eq!(for_plant, vec![linked.id]);

    let toggled = NoteLogic::toggle_done(&mut store, general.id).unwrap();
    assert!(toggled.done);
    assert!(!NoteLogic::toggle_done(&mut store, general.id).unwrap().done);

    let edited =
        NoteLogic::update(&mut store, general.id, Some("Buy cactus soil"), Some(Some(plant.id)))
            .unwrap();
    assert_eq!(edited.text, "Buy cactus soil");
    assert_eq!(edited.plant_id, Some(plant.id));

    // Notes outlive their plant as general notes.
    PlantLogic::delete(&mut store, &mut reminders, plant.id).unwrap();
    let notes = NoteLogic::list(&store, None).unwrap();
    assert_eq!(notes.len(), 2);
    assert!(notes.iter().all(|n| n.plant_id.is_none()));

    NoteLogic::delete(&mut store, linked.id).unwrap();
    assert!(matches!(
        NoteLogic::delete(&mut store, linked.id),
        Err(AppError::NoteNotFound(_))
    ));
}

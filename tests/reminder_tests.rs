mod common;

use chrono::{DateTime, Duration, Utc};
use common::{RecordingNotifier, t0};
use plantcare::core::{Clock, FixedClock};
use plantcare::models::{CareEvent, CareKind, Locale};
use plantcare::reminder::{
    InMemoryScheduler, NotificationChannel, NotificationIcon, ReminderPayload, ReminderRunner, ReminderScheduler,
    ReminderWorker, ScheduleOutcome, TaskScheduler, WorkResult, trigger_key,
};
use std::rc::Rc;

type Shared = Rc<FixedClock>;

fn scheduler(clock: &Shared) -> ReminderScheduler<InMemoryScheduler<Shared>, Shared> {
    ReminderScheduler::with_clock(
        InMemoryScheduler::with_clock(clock.clone()),
        clock.clone(),
        Locale::En,
    )
}

fn watering(id: i64, remind_at: Option<DateTime<Utc>>) -> CareEvent {
    let mut ev = CareEvent::new(1, CareKind::Watering);
    ev.id = id;
    match remind_at {
        Some(at) => ev.with_reminder(at),
        None => ev,
    }
}

#[test]
fn disabled_reminder_registers_nothing() {
    let clock = Rc::new(FixedClock::new(t0()));
    let mut sched = scheduler(&clock);

    let mut ev = watering(1, Some(t0() + Duration::hours(2)));
    ev.reminder_enabled = false;

    let outcome = sched.schedule(&ev, "Ficus").unwrap();
    assert_eq!(outcome, ScheduleOutcome::ReminderDisabled);
    assert!(sched.port().is_empty());
}

#[test]
fn enabled_without_timestamp_registers_nothing() {
    let clock = Rc::new(FixedClock::new(t0()));
    let mut sched = scheduler(&clock);

    let mut ev = watering(1, None);
    ev.reminder_enabled = true;

    assert_eq!(
        sched.schedule(&ev, "Ficus").unwrap(),
        ScheduleOutcome::ReminderDisabled
    );
    assert!(sched.port().is_empty());
}

#[test]
fn past_reminder_is_dropped() {
    let clock = Rc::new(FixedClock::new(t0()));
    let mut sched = scheduler(&clock);

    let ev = watering(3, Some(t0() - Duration::milliseconds(1000)));

    assert_eq!(sched.schedule(&ev, "Ficus").unwrap(), ScheduleOutcome::InPast);
    assert!(!sched.port().contains(&trigger_key(3)));
}

#[test]
fn reminder_exactly_now_fires_immediately() {
    let clock = Rc::new(FixedClock::new(t0()));
    let mut sched = scheduler(&clock);

    let outcome = sched.schedule(&watering(4, Some(t0())), "Ficus").unwrap();
    assert_eq!(
        outcome,
        ScheduleOutcome::Scheduled {
            key: "care_event_reminder_4".to_string(),
            delay: std::time::Duration::ZERO,
        }
    );
}

#[test]
fn future_reminder_gets_one_keyed_trigger() {
    let clock = Rc::new(FixedClock::new(t0()));
    let mut sched = scheduler(&clock);

    let ev = watering(7, Some(t0() + Duration::milliseconds(3_600_000)));
    let outcome = sched.schedule(&ev, "Ficus").unwrap();

    assert_eq!(
        outcome,
        ScheduleOutcome::Scheduled {
            key: "care_event_reminder_7".to_string(),
            delay: std::time::Duration::from_secs(3600),
        }
    );

    let trigger = sched.port().get("care_event_reminder_7").unwrap();
    assert_eq!(trigger.delay(), Duration::hours(1));
    assert_eq!(
        trigger.payload,
        ReminderPayload {
            event_id: 7,
            plant_id: 1,
            plant_name: "Ficus".to_string(),
            event_type: "Watering".to_string(),
        }
    );
}

#[test]
fn scheduling_twice_replaces_the_trigger() {
    let clock = Rc::new(FixedClock::new(t0()));
    let mut sched = scheduler(&clock);

    sched
        .schedule(&watering(5, Some(t0() + Duration::hours(1))), "Ficus")
        .unwrap();
    sched
        .schedule(&watering(5, Some(t0() + Duration::hours(3))), "Ficus")
        .unwrap();

    let pending = sched.port().pending().unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].key, "care_event_reminder_5");
    assert_eq!(pending[0].due_at, t0() + Duration::hours(3));
}

#[test]
fn cancel_is_idempotent() {
    let clock = Rc::new(FixedClock::new(t0()));
    let mut sched = scheduler(&clock);

    sched.cancel(42).unwrap();
    sched
        .schedule(&watering(42, Some(t0() + Duration::hours(1))), "Ficus")
        .unwrap();
    sched.cancel(42).unwrap();
    sched.cancel(42).unwrap();

    assert!(sched.port().is_empty());
}

#[test]
fn ficus_watering_reminder_fires_after_one_hour() {
    let clock = Rc::new(FixedClock::new(t0()));
    let mut sched = scheduler(&clock);
    let notifier = RecordingNotifier::new();

    sched
        .schedule(&watering(7, Some(t0() + Duration::hours(1))), "Ficus")
        .unwrap();

    let mut runner = ReminderRunner::new(sched.port_mut(), ReminderWorker::new(&notifier, Locale::En));

    clock.advance(Duration::minutes(59));
    assert!(runner.run_once(clock.now()).unwrap().is_empty());
    assert!(notifier.shown.borrow().is_empty());

    clock.advance(Duration::minutes(1));
    let fired = runner.run_once(clock.now()).unwrap();
    assert_eq!(fired.len(), 1);

    let shown = notifier.shown.borrow();
    assert_eq!(shown.len(), 1);
    assert_eq!(shown[0].id, 7);
    assert_eq!(shown[0].title, "Care event reminder");
    assert_eq!(shown[0].body, "Time to do: Watering 🌊 for plant Ficus");
    assert_eq!(shown[0].icon, NotificationIcon::Drizzle);
    assert!(shown[0].auto_cancel);
    drop(shown);

    // Fired once, gone afterwards.
    clock.advance(Duration::hours(1));
    assert!(runner.run_once(clock.now()).unwrap().is_empty());
    assert_eq!(notifier.ids(), vec![7]);
}

#[test]
fn cancelled_reminder_never_notifies() {
    let clock = Rc::new(FixedClock::new(t0()));
    let mut sched = scheduler(&clock);
    let notifier = RecordingNotifier::new();

    sched
        .schedule(&watering(8, Some(t0() + Duration::minutes(10))), "Ficus")
        .unwrap();
    sched.cancel(8).unwrap();

    clock.advance(Duration::hours(1));
    let mut runner = ReminderRunner::new(sched.port_mut(), ReminderWorker::new(&notifier, Locale::En));
    runner.run_once(clock.now()).unwrap();

    assert!(notifier.shown.borrow().is_empty());
}

#[test]
fn worker_without_permission_still_succeeds() {
    let notifier = RecordingNotifier::with_permission(false);
    let worker = ReminderWorker::new(&notifier, Locale::En);

    let payload = ReminderPayload {
        event_id: 1,
        plant_id: 1,
        plant_name: "Ficus".to_string(),
        event_type: "Watering".to_string(),
    };

    assert_eq!(worker.fire(&payload), WorkResult::Success);
    assert!(notifier.shown.borrow().is_empty());
}

#[test]
fn worker_registers_channel_once() {
    let notifier = RecordingNotifier::new();
    let worker = ReminderWorker::new(&notifier, Locale::En);

    for id in 1..=3 {
        worker.fire(&ReminderPayload {
            event_id: id,
            plant_id: 1,
            plant_name: "Ficus".to_string(),
            event_type: "Spraying".to_string(),
        });
    }

    assert_eq!(notifier.channels.get(), 1);
    assert_eq!(
        notifier.registered.borrow()[0],
        NotificationChannel {
            id: "care_event_reminder_channel".to_string(),
            name: "Care event reminders".to_string(),
        }
    );
    assert_eq!(notifier.shown.borrow().len(), 3);
}

#[test]
fn worker_body_variants() {
    let notifier = RecordingNotifier::new();
    let worker = ReminderWorker::new(&notifier, Locale::En);

    worker.fire(&ReminderPayload {
        event_id: 1,
        plant_id: 1,
        plant_name: "  ".to_string(),
        event_type: "Fertilizing".to_string(),
    });
    worker.fire(&ReminderPayload {
        event_id: 2,
        plant_id: 1,
        plant_name: "Ficus".to_string(),
        event_type: "Pruning".to_string(),
    });

    assert_eq!(
        notifier.bodies(),
        vec![
            "Time to do: Fertilizing 🌱".to_string(),
            "Time to do: Pruning for plant Ficus".to_string(),
        ]
    );
    assert_eq!(notifier.shown.borrow()[1].icon, NotificationIcon::AppIcon);
}

#[test]
fn russian_locale_labels_and_text() {
    let clock = Rc::new(FixedClock::new(t0()));
    let mut sched = ReminderScheduler::with_clock(
        InMemoryScheduler::with_clock(clock.clone()),
        clock.clone(),
        Locale::Ru,
    );
    let mut ev = CareEvent::new(2, CareKind::Repotting);
    ev.id = 11;
    let ev = ev.with_reminder(t0() + Duration::minutes(5));

    sched.schedule(&ev, "Фикус").unwrap();
    assert_eq!(
        sched.port().get(&trigger_key(11)).unwrap().payload.event_type,
        "Пересадка"
    );

    let notifier = RecordingNotifier::new();
    clock.advance(Duration::minutes(5));
    let mut runner = ReminderRunner::new(sched.port_mut(), ReminderWorker::new(&notifier, Locale::Ru));
    runner.run_once(clock.now()).unwrap();

    let shown = notifier.shown.borrow();
    assert_eq!(shown[0].title, "Напоминание о событии ухода");
    assert_eq!(shown[0].body, "Пора выполнить: Пересадка 🏺 для растения Фикус");
    assert_eq!(shown[0].icon, NotificationIcon::Snow);
}

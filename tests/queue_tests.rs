mod common;

use chrono::Duration;
use common::{setup_test_db, t0};
use plantcare::core::{Clock, FixedClock, SystemClock};
use plantcare::reminder::{DueSource, ReminderPayload, SqliteTriggerQueue, TaskScheduler};
use rusqlite::Connection;
use std::rc::Rc;
use std::time::Duration as StdDuration;

fn payload(event_id: i64) -> ReminderPayload {
    ReminderPayload {
        event_id,
        plant_id: 1,
        plant_name: "Ficus".to_string(),
        event_type: "Watering".to_string(),
    }
}

#[test]
fn same_key_replaces_previous_trigger() {
    let clock = Rc::new(FixedClock::new(t0()));
    let mut queue = SqliteTriggerQueue::in_memory(clock.clone()).unwrap();

    queue
        .schedule_once("care_event_reminder_1", StdDuration::from_secs(60), payload(1))
        .unwrap();
    let mut renamed = payload(1);
    renamed.plant_name = "Big Ficus".to_string();
    queue
        .schedule_once("care_event_reminder_1", StdDuration::from_secs(600), renamed)
        .unwrap();

    let pending = queue.pending().unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].due_at, t0() + Duration::minutes(10));
    assert_eq!(pending[0].payload.plant_name, "Big Ficus");
}

#[test]
fn take_due_hands_out_each_trigger_once() {
    let clock = Rc::new(FixedClock::new(t0()));
    let mut queue = SqliteTriggerQueue::in_memory(clock.clone()).unwrap();

    queue
        .schedule_once("care_event_reminder_2", StdDuration::from_secs(120), payload(2))
        .unwrap();
    queue
        .schedule_once("care_event_reminder_1", StdDuration::from_secs(60), payload(1))
        .unwrap();
    queue
        .schedule_once("care_event_reminder_3", StdDuration::from_secs(3600), payload(3))
        .unwrap();

    let due = queue.take_due(t0() + Duration::minutes(5)).unwrap();
    let keys: Vec<&str> = due.iter().map(|t| t.key.as_str()).collect();
    assert_eq!(keys, vec!["care_event_reminder_1", "care_event_reminder_2"]);

    assert!(queue.take_due(t0() + Duration::minutes(5)).unwrap().is_empty());
    assert_eq!(queue.pending().unwrap().len(), 1);
    assert!(queue.get("care_event_reminder_3").unwrap().is_some());
}

#[test]
fn cancel_missing_key_is_fine() {
    let mut queue = SqliteTriggerQueue::in_memory(SystemClock).unwrap();
    queue.cancel("care_event_reminder_404").unwrap();
    assert!(queue.pending().unwrap().is_empty());
}

#[test]
fn triggers_survive_reopen_with_camel_case_payload() {
    let db = setup_test_db("queue_durable");
    let clock = Rc::new(FixedClock::new(t0()));

    {
        let mut queue = SqliteTriggerQueue::open_with_clock(&db, clock.clone()).unwrap();
        queue
            .schedule_once("care_event_reminder_7", StdDuration::from_secs(3600), payload(7))
            .unwrap();
    }

    let raw: String = Connection::open(&db)
        .unwrap()
        .query_row(
            "SELECT payload FROM pending_triggers WHERE key = 'care_event_reminder_7'",
            [],
            |r| r.get(0),
        )
        .unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(json["eventId"], 7);
    assert_eq!(json["plantId"], 1);
    assert_eq!(json["plantName"], "Ficus");
    assert_eq!(json["eventType"], "Watering");

    let mut queue = SqliteTriggerQueue::open_with_clock(&db, clock.clone()).unwrap();
    let trigger = queue.get("care_event_reminder_7").unwrap().unwrap();
    assert_eq!(trigger.delay(), Duration::hours(1));

    clock.advance(Duration::hours(1));
    let due = queue.take_due(clock.now()).unwrap();
    assert_eq!(due.len(), 1);
    assert_eq!(due[0].payload, payload(7));
}

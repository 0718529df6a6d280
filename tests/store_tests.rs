mod common;

use chrono::Duration;
use common::{setup_test_db, t0};
use plantcare::db::CareStore;
use plantcare::db::migrate::known_versions;
use plantcare::errors::AppError;
use plantcare::models::{CareEvent, CareKind, Note, Plant};

#[test]
fn migrations_run_once() {
    let db = setup_test_db("store_migrations");

    let store = CareStore::open(&db).unwrap();
    let applied: i64 = store
        .conn()
        .query_row(
            "SELECT COUNT(*) FROM log WHERE operation = 'migration_applied'",
            [],
            |r| r.get(0),
        )
        .unwrap();
    assert_eq!(applied as usize, known_versions().len());
    drop(store);

    // Reopening applies nothing new.
    let store = CareStore::open(&db).unwrap();
    let again: i64 = store
        .conn()
        .query_row(
            "SELECT COUNT(*) FROM log WHERE operation = 'migration_applied'",
            [],
            |r| r.get(0),
        )
        .unwrap();
    assert_eq!(again, applied);
}

#[test]
fn plant_crud() {
    let mut store = CareStore::in_memory().unwrap();

    let mut plant = store
        .add_plant(Plant::new("Ficus", "Ficus benjamina", "by the window"))
        .unwrap();
    assert!(plant.id > 0);

    plant.notes = "moved to the balcony".into();
    store.update_plant(&plant).unwrap();
    assert_eq!(store.get_plant(plant.id).unwrap(), plant);
    assert_eq!(store.plant_name(plant.id), "Ficus");
    assert_eq!(store.plant_name(12345), "");

    assert!(matches!(
        store.add_plant(Plant::new("  ", "", "")),
        Err(AppError::InvalidInput(_))
    ));
    assert!(matches!(
        store.get_plant(12345),
        Err(AppError::PlantNotFound(12345))
    ));
}

#[test]
fn event_fields_survive_storage() {
    let mut store = CareStore::in_memory().unwrap();
    let plant = store.add_plant(Plant::new("Monstera", "", "")).unwrap();

    let mut ev = CareEvent::new(plant.id, CareKind::Fertilizing);
    ev.interval_days = Some(0.25);
    ev.last_date = Some(t0());
    ev.fertilizer_type = Some("NPK 10-10-10".into());
    ev.reminder_time = Some(9 * 3_600_000);
    let ev = ev.with_reminder(t0() + Duration::days(1));

    let stored = store.add_event(ev.clone()).unwrap();
    let loaded = store.get_event(stored.id).unwrap();

    assert_eq!(loaded.kind, CareKind::Fertilizing);
    assert_eq!(loaded.interval_days, Some(0.25));
    assert_eq!(loaded.last_date, Some(t0()));
    assert_eq!(loaded.fertilizer_type.as_deref(), Some("NPK 10-10-10"));
    assert_eq!(loaded.reminder_date_time, Some(t0() + Duration::days(1)));
    assert!(loaded.reminder_enabled);
    assert_eq!(loaded.reminder_time, Some(9 * 3_600_000));
    assert_eq!(loaded, stored);
}

#[test]
fn watch_yields_snapshot_after_each_write() {
    let mut store = CareStore::in_memory().unwrap();
    let plant = store.add_plant(Plant::new("Ficus", "", "")).unwrap();
    let other = store.add_plant(Plant::new("Cactus", "", "")).unwrap();

    let mut watch = store.watch_events(plant.id);
    assert_eq!(watch.plant_id(), plant.id);

    assert_eq!(store.poll(&mut watch).unwrap(), Some(Vec::new()));
    assert_eq!(store.poll(&mut watch).unwrap(), None);

    let ev = store
        .add_event(CareEvent::new(plant.id, CareKind::Watering))
        .unwrap();
    let snapshot = store.poll(&mut watch).unwrap().unwrap();
    assert_eq!(snapshot, vec![ev.clone()]);
    assert_eq!(store.poll(&mut watch).unwrap(), None);

    let mut done = ev.clone();
    done.done = true;
    store.update_event(&done).unwrap();
    assert_eq!(store.poll(&mut watch).unwrap(), Some(vec![done]));

    // Writes elsewhere also produce a (possibly identical) snapshot.
    store
        .add_event(CareEvent::new(other.id, CareKind::Spraying))
        .unwrap();
    let snapshot = store.poll(&mut watch).unwrap().unwrap();
    assert_eq!(snapshot.len(), 1);

    store.delete_event(ev.id).unwrap();
    assert_eq!(store.poll(&mut watch).unwrap(), Some(Vec::new()));
}

#[test]
fn watch_sees_commits_from_other_connections() {
    let db = setup_test_db("store_watch_cross");

    let mut writer = CareStore::open(&db).unwrap();
    let plant = writer.add_plant(Plant::new("Ficus", "", "")).unwrap();

    let reader = CareStore::open(&db).unwrap();
    let mut watch = reader.watch_events(plant.id);
    assert_eq!(reader.poll(&mut watch).unwrap(), Some(Vec::new()));
    assert_eq!(reader.poll(&mut watch).unwrap(), None);

    writer
        .add_event(CareEvent::new(plant.id, CareKind::Repotting))
        .unwrap();

    let snapshot = reader.poll(&mut watch).unwrap().unwrap();
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot[0].kind, CareKind::Repotting);
}

#[test]
fn events_are_listed_per_plant() {
    let mut store = CareStore::in_memory().unwrap();
    let a = store.add_plant(Plant::new("A", "", "")).unwrap();
    let b = store.add_plant(Plant::new("B", "", "")).unwrap();

    store.add_event(CareEvent::new(a.id, CareKind::Watering)).unwrap();
    store.add_event(CareEvent::new(b.id, CareKind::Watering)).unwrap();
    store.add_event(CareEvent::new(a.id, CareKind::Spraying)).unwrap();

    let kinds: Vec<CareKind> = store
        .events_for_plant(a.id)
        .unwrap()
        .into_iter()
        .map(|e| e.kind)
        .collect();
    assert_eq!(kinds, vec![CareKind::Watering, CareKind::Spraying]);
    assert_eq!(store.all_events().unwrap().len(), 3);

    assert!(matches!(
        store.add_event(CareEvent::new(999, CareKind::Watering)),
        Err(AppError::PlantNotFound(999))
    ));
}

#[test]
fn notes_persist_across_reopen() {
    let db = setup_test_db("store_notes_persist");

    {
        let mut store = CareStore::open(&db).unwrap();
        store.add_note(Note::new("Repot in spring", None)).unwrap();
    }

    let store = CareStore::open(&db).unwrap();
    let notes = store.list_notes(None).unwrap();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].text, "Repot in spring");
    assert!(!notes[0].done);
}

use crate::errors::{AppError, AppResult};
use crate::models::{CareEvent, CareKind};
use crate::utils::time::{from_millis, opt_to_millis};
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

const SELECT_EVENTS: &str = "SELECT id, plant_id, type, interval_days, last_date, fertilizer_type,
        next_date, reminder_date_time, done, reminder_enabled, reminder_time
 FROM care_events";

pub fn map_row(row: &Row) -> Result<CareEvent> {
    let kind_str: String = row.get("type")?;
    let kind = CareKind::from_db_str(&kind_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidCareKind(kind_str.clone())),
        )
    })?;

    let millis = |col: &str| -> Result<Option<chrono::DateTime<chrono::Utc>>> {
        Ok(row.get::<_, Option<i64>>(col)?.and_then(from_millis))
    };

    Ok(CareEvent {
        id: row.get("id")?,
        plant_id: row.get("plant_id")?,
        kind,
        interval_days: row.get("interval_days")?,
        last_date: millis("last_date")?,
        fertilizer_type: row.get("fertilizer_type")?,
        next_date: millis("next_date")?,
        reminder_date_time: millis("reminder_date_time")?,
        done: row.get::<_, i32>("done")? == 1,
        reminder_enabled: row.get::<_, i32>("reminder_enabled")? == 1,
        reminder_time: row.get("reminder_time")?,
    })
}

/// Insert a new event and return the id assigned by SQLite.
pub fn insert_event(conn: &Connection, ev: &CareEvent) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO care_events (plant_id, type, interval_days, last_date, fertilizer_type,
                                  next_date, reminder_date_time, done, reminder_enabled, reminder_time)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            ev.plant_id,
            ev.kind.to_db_str(),
            ev.interval_days,
            opt_to_millis(ev.last_date.as_ref()),
            ev.fertilizer_type,
            opt_to_millis(ev.next_date.as_ref()),
            opt_to_millis(ev.reminder_date_time.as_ref()),
            if ev.done { 1 } else { 0 },
            if ev.reminder_enabled { 1 } else { 0 },
            ev.reminder_time,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Update an event (all fields except id)
pub fn update_event(conn: &Connection, ev: &CareEvent) -> AppResult<()> {
    let changed = conn.execute(
        "UPDATE care_events
         SET plant_id = ?1, type = ?2, interval_days = ?3,
             last_date = ?4, fertilizer_type = ?5, next_date = ?6,
             reminder_date_time = ?7, done = ?8, reminder_enabled = ?9,
             reminder_time = ?10
         WHERE id = ?11",
        params![
            ev.plant_id,
            ev.kind.to_db_str(),
            ev.interval_days,
            opt_to_millis(ev.last_date.as_ref()),
            ev.fertilizer_type,
            opt_to_millis(ev.next_date.as_ref()),
            opt_to_millis(ev.reminder_date_time.as_ref()),
            if ev.done { 1 } else { 0 },
            if ev.reminder_enabled { 1 } else { 0 },
            ev.reminder_time,
            ev.id,
        ],
    )?;

    if changed == 0 {
        return Err(AppError::EventNotFound(ev.id));
    }
    Ok(())
}

/// Returns whether a row was actually removed.
pub fn delete_event(conn: &Connection, id: i64) -> AppResult<bool> {
    let n = conn.execute("DELETE FROM care_events WHERE id = ?1", [id])?;
    Ok(n > 0)
}

pub fn load_event(conn: &Connection, id: i64) -> AppResult<Option<CareEvent>> {
    let sql = format!("{SELECT_EVENTS} WHERE id = ?1");
    let ev = conn.query_row(&sql, [id], map_row).optional()?;
    Ok(ev)
}

pub fn load_events_by_plant(conn: &Connection, plant_id: i64) -> AppResult<Vec<CareEvent>> {
    let sql = format!("{SELECT_EVENTS} WHERE plant_id = ?1 ORDER BY id ASC");
    let mut stmt = conn.prepare_cached(&sql)?;

    let rows = stmt.query_map([plant_id], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn load_all_events(conn: &Connection) -> AppResult<Vec<CareEvent>> {
    let sql = format!("{SELECT_EVENTS} ORDER BY plant_id ASC, id ASC");
    let mut stmt = conn.prepare(&sql)?;

    let rows = stmt.query_map([], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn event_ids_for_plant(conn: &Connection, plant_id: i64) -> AppResult<Vec<i64>> {
    let mut stmt = conn.prepare("SELECT id FROM care_events WHERE plant_id = ?1")?;
    let ids = stmt
        .query_map([plant_id], |row| row.get::<_, i64>(0))?
        .collect::<Result<Vec<_>>>()?;
    Ok(ids)
}

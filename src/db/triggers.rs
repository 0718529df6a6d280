//! Rows of the `pending_triggers` table backing the durable reminder queue.

use crate::errors::{AppError, AppResult};
use crate::reminder::{PendingTrigger, ReminderPayload};
use crate::utils::time::{from_millis, to_millis};
use chrono::{DateTime, Utc};
use rusqlite::{Connection, Result, Row, params};

fn map_row(row: &Row) -> Result<PendingTrigger> {
    let conversion = |col: usize, e: AppError| {
        rusqlite::Error::FromSqlConversionFailure(col, rusqlite::types::Type::Text, Box::new(e))
    };

    let due_ms: i64 = row.get("due_at")?;
    let scheduled_ms: i64 = row.get("scheduled_at")?;
    let payload_json: String = row.get("payload")?;

    let payload: ReminderPayload =
        serde_json::from_str(&payload_json).map_err(|e| conversion(3, AppError::Json(e)))?;

    Ok(PendingTrigger {
        key: row.get("key")?,
        due_at: from_millis(due_ms)
            .ok_or_else(|| conversion(1, AppError::InvalidDate(due_ms.to_string())))?,
        scheduled_at: from_millis(scheduled_ms)
            .ok_or_else(|| conversion(2, AppError::InvalidDate(scheduled_ms.to_string())))?,
        payload,
    })
}

/// Insert or replace the trigger registered under `trigger.key`.
pub fn upsert_trigger(conn: &Connection, trigger: &PendingTrigger) -> AppResult<()> {
    let payload = serde_json::to_string(&trigger.payload)?;
    conn.execute(
        "INSERT INTO pending_triggers (key, due_at, scheduled_at, payload)
         VALUES (?1, ?2, ?3, ?4)
         ON CONFLICT(key) DO UPDATE SET
             due_at = excluded.due_at,
             scheduled_at = excluded.scheduled_at,
             payload = excluded.payload",
        params![
            trigger.key,
            to_millis(&trigger.due_at),
            to_millis(&trigger.scheduled_at),
            payload
        ],
    )?;
    Ok(())
}

pub fn delete_trigger(conn: &Connection, key: &str) -> AppResult<bool> {
    let n = conn.execute("DELETE FROM pending_triggers WHERE key = ?1", [key])?;
    Ok(n > 0)
}

pub fn load_triggers(conn: &Connection) -> AppResult<Vec<PendingTrigger>> {
    let mut stmt = conn.prepare(
        "SELECT key, due_at, scheduled_at, payload FROM pending_triggers
         ORDER BY due_at ASC, key ASC",
    )?;

    let mut out = Vec::new();
    for r in stmt.query_map([], map_row)? {
        out.push(r?);
    }
    Ok(out)
}

/// Remove and return every trigger due at or before `now`, atomically, so a
/// trigger is handed out exactly once even with several runners.
pub fn take_due_triggers(conn: &mut Connection, now: &DateTime<Utc>) -> AppResult<Vec<PendingTrigger>> {
    let now_ms = to_millis(now);
    let tx = conn.transaction_with_behavior(rusqlite::TransactionBehavior::Immediate)?;

    let due = {
        let mut stmt = tx.prepare(
            "SELECT key, due_at, scheduled_at, payload FROM pending_triggers
             WHERE due_at <= ?1
             ORDER BY due_at ASC, key ASC",
        )?;
        stmt.query_map([now_ms], map_row)?
            .collect::<Result<Vec<_>>>()?
    };

    tx.execute("DELETE FROM pending_triggers WHERE due_at <= ?1", [now_ms])?;
    tx.commit()?;

    Ok(due)
}

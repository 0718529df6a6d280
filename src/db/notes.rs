use crate::errors::{AppError, AppResult};
use crate::models::Note;
use crate::utils::time::{from_millis, to_millis};
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

pub fn map_row(row: &Row) -> Result<Note> {
    let millis: i64 = row.get("date")?;
    let created_at = from_millis(millis).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Integer,
            Box::new(AppError::InvalidDate(millis.to_string())),
        )
    })?;

    Ok(Note {
        id: row.get("id")?,
        text: row.get("text")?,
        created_at,
        plant_id: row.get("plant_id")?,
        done: row.get::<_, i32>("done")? == 1,
    })
}

pub fn insert_note(conn: &Connection, n: &Note) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO notes (text, date, plant_id, done) VALUES (?1, ?2, ?3, ?4)",
        params![
            n.text,
            to_millis(&n.created_at),
            n.plant_id,
            if n.done { 1 } else { 0 }
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn update_note(conn: &Connection, n: &Note) -> AppResult<()> {
    let changed = conn.execute(
        "UPDATE notes SET text = ?1, plant_id = ?2, done = ?3 WHERE id = ?4",
        params![n.text, n.plant_id, if n.done { 1 } else { 0 }, n.id],
    )?;
    if changed == 0 {
        return Err(AppError::NoteNotFound(n.id));
    }
    Ok(())
}

pub fn delete_note(conn: &Connection, id: i64) -> AppResult<bool> {
    let n = conn.execute("DELETE FROM notes WHERE id = ?1", [id])?;
    Ok(n > 0)
}

pub fn load_note(conn: &Connection, id: i64) -> AppResult<Option<Note>> {
    let n = conn
        .query_row(
            "SELECT id, text, date, plant_id, done FROM notes WHERE id = ?1",
            [id],
            map_row,
        )
        .optional()?;
    Ok(n)
}

/// All notes, or only those attached to `plant_id`. Newest first.
pub fn load_notes(conn: &Connection, plant_id: Option<i64>) -> AppResult<Vec<Note>> {
    let mut out = Vec::new();

    match plant_id {
        Some(pid) => {
            let mut stmt = conn.prepare(
                "SELECT id, text, date, plant_id, done FROM notes
                 WHERE plant_id = ?1 ORDER BY date DESC, id DESC",
            )?;
            for r in stmt.query_map([pid], map_row)? {
                out.push(r?);
            }
        }
        None => {
            let mut stmt = conn.prepare(
                "SELECT id, text, date, plant_id, done FROM notes ORDER BY date DESC, id DESC",
            )?;
            for r in stmt.query_map([], map_row)? {
                out.push(r?);
            }
        }
    }

    Ok(out)
}

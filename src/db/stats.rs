use crate::db::triggers::load_triggers;
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use crate::utils::time::format_local;
use rusqlite::Connection;
use std::fs;

/// Row counts of the main tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DbCounts {
    pub plants: i64,
    pub care_events: i64,
    pub pending_reminders: i64,
    pub notes: i64,
    pub reference_plants: i64,
}

fn count(conn: &Connection, table: &str) -> rusqlite::Result<i64> {
    conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))
}

pub fn counts(conn: &Connection) -> rusqlite::Result<DbCounts> {
    Ok(DbCounts {
        plants: count(conn, "plants")?,
        care_events: count(conn, "care_events")?,
        pending_reminders: count(conn, "pending_triggers")?,
        notes: count(conn, "notes")?,
        reference_plants: count(conn, "reference_plants")?,
    })
}

pub fn print_db_info(conn: &Connection, db_path: &str) -> AppResult<()> {
    println!();

    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    let c = counts(conn)?;
    for (label, value) in [
        ("Plants", c.plants),
        ("Care events", c.care_events),
        ("Pending reminders", c.pending_reminders),
        ("Notes", c.notes),
        ("Reference plants", c.reference_plants),
    ] {
        println!("{}• {}:{} {}{}{}", CYAN, label, RESET, GREEN, value, RESET);
    }

    let next = load_triggers(conn)?
        .into_iter()
        .next()
        .map(|t| format_local(&t.due_at))
        .unwrap_or_else(|| format!("{GREY}--{RESET}"));
    println!("{}• Next reminder:{} {}", CYAN, RESET, next);

    println!();
    Ok(())
}

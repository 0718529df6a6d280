use crate::errors::{AppError, AppResult};
use crate::models::Plant;
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

pub fn map_row(row: &Row) -> Result<Plant> {
    Ok(Plant {
        id: row.get("id")?,
        name: row.get("name")?,
        plant_type: row.get("type")?,
        notes: row.get("notes")?,
    })
}

pub fn insert_plant(conn: &Connection, p: &Plant) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO plants (name, type, notes) VALUES (?1, ?2, ?3)",
        params![p.name, p.plant_type, p.notes],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn update_plant(conn: &Connection, p: &Plant) -> AppResult<()> {
    let changed = conn.execute(
        "UPDATE plants SET name = ?1, type = ?2, notes = ?3 WHERE id = ?4",
        params![p.name, p.plant_type, p.notes, p.id],
    )?;
    if changed == 0 {
        return Err(AppError::PlantNotFound(p.id));
    }
    Ok(())
}

/// Care events go with the plant (ON DELETE CASCADE), notes become general.
pub fn delete_plant(conn: &Connection, id: i64) -> AppResult<bool> {
    let n = conn.execute("DELETE FROM plants WHERE id = ?1", [id])?;
    Ok(n > 0)
}

pub fn load_plant(conn: &Connection, id: i64) -> AppResult<Option<Plant>> {
    let p = conn
        .query_row(
            "SELECT id, name, type, notes FROM plants WHERE id = ?1",
            [id],
            map_row,
        )
        .optional()?;
    Ok(p)
}

pub fn load_plants(conn: &Connection) -> AppResult<Vec<Plant>> {
    let mut stmt = conn.prepare("SELECT id, name, type, notes FROM plants ORDER BY id ASC")?;
    let rows = stmt.query_map([], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

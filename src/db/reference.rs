use crate::errors::{AppError, AppResult};
use crate::models::ReferencePlant;
use rusqlite::{Connection, Result, Row, params};
use serde::de::DeserializeOwned;

const SELECT_REFERENCE: &str = "SELECT id, name, description, image_res, watering, light,
        temperature, fertilizing, notes, toxicity_note, disease_ids, is_favorite
 FROM reference_plants";

/// Decode a JSON-encoded TEXT column.
pub(crate) fn json_column<T: DeserializeOwned>(row: &Row, col: &str) -> Result<T> {
    let raw: String = row.get(col)?;
    serde_json::from_str(&raw).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::Json(e)),
        )
    })
}

pub fn map_row(row: &Row) -> Result<ReferencePlant> {
    Ok(ReferencePlant {
        id: row.get("id")?,
        name: row.get("name")?,
        description: row.get("description")?,
        image_res: row.get("image_res")?,
        watering: row.get("watering")?,
        light: row.get("light")?,
        temperature: row.get("temperature")?,
        fertilizing: row.get("fertilizing")?,
        notes: row.get("notes")?,
        toxicity_note: row.get("toxicity_note")?,
        disease_ids: json_column(row, "disease_ids")?,
        is_favorite: row.get::<_, i32>("is_favorite")? == 1,
    })
}

/// Clear the catalogue and insert `plants` in one transaction.
pub fn replace_all(conn: &mut Connection, plants: &[ReferencePlant]) -> AppResult<usize> {
    let tx = conn.transaction()?;
    tx.execute("DELETE FROM reference_plants", [])?;
    {
        let mut stmt = tx.prepare(
            "INSERT INTO reference_plants (name, description, image_res, watering, light,
                                           temperature, fertilizing, notes, toxicity_note, disease_ids,
                                           is_favorite)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        )?;
        for p in plants {
            let disease_ids = serde_json::to_string(&p.disease_ids)?;
            stmt.execute(params![
                p.name,
                p.description,
                p.image_res,
                p.watering,
                p.light,
                p.temperature,
                p.fertilizing,
                p.notes,
                p.toxicity_note,
                disease_ids,
                if p.is_favorite { 1 } else { 0 },
            ])?;
        }
    }
    tx.commit()?;
    Ok(plants.len())
}

/// Case-insensitive substring search on the name, ordered by name.
pub fn search(conn: &Connection, query: &str) -> AppResult<Vec<ReferencePlant>> {
    let pattern = format!("%{}%", query.trim());
    let sql = format!("{SELECT_REFERENCE} WHERE name LIKE ?1 ORDER BY name ASC");
    let mut stmt = conn.prepare(&sql)?;

    let mut out = Vec::new();
    for r in stmt.query_map([pattern], map_row)? {
        out.push(r?);
    }
    Ok(out)
}

pub fn favorites(conn: &Connection) -> AppResult<Vec<ReferencePlant>> {
    let sql = format!("{SELECT_REFERENCE} WHERE is_favorite = 1 ORDER BY name ASC");
    let mut stmt = conn.prepare(&sql)?;

    let mut out = Vec::new();
    for r in stmt.query_map([], map_row)? {
        out.push(r?);
    }
    Ok(out)
}

pub fn set_favorite(conn: &Connection, id: i64, favorite: bool) -> AppResult<()> {
    let changed = conn.execute(
        "UPDATE reference_plants SET is_favorite = ?1 WHERE id = ?2",
        params![if favorite { 1 } else { 0 }, id],
    )?;
    if changed == 0 {
        return Err(AppError::ReferenceNotFound(id));
    }
    Ok(())
}

pub fn load(conn: &Connection, id: i64) -> AppResult<ReferencePlant> {
    let sql = format!("{SELECT_REFERENCE} WHERE id = ?1");
    conn.query_row(&sql, [id], map_row).map_err(|e| match e {
        rusqlite::Error::QueryReturnedNoRows => AppError::ReferenceNotFound(id),
        other => other.into(),
    })
}

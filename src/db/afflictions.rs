//! Disease and pest catalogues, one table keyed by `(kind, id)`.
//! List fields are stored as JSON text.

use crate::db::reference::json_column;
use crate::errors::{AppError, AppResult};
use crate::models::{Affliction, AfflictionKind};
use rusqlite::{Connection, Result, Row, params, params_from_iter};

const SELECT_AFFLICTIONS: &str = "SELECT kind, id, name, symptoms, causes, treatment,
        prevention, affected_plants, is_favorite
 FROM afflictions";

pub fn map_row(row: &Row) -> Result<Affliction> {
    let kind_str: String = row.get("kind")?;
    let kind = AfflictionKind::from_db_str(&kind_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidInput(format!("unknown catalogue kind {kind_str}"))),
        )
    })?;

    Ok(Affliction {
        kind,
        id: row.get("id")?,
        name: row.get("name")?,
        symptoms: json_column(row, "symptoms")?,
        causes: json_column(row, "causes")?,
        treatment: json_column(row, "treatment")?,
        prevention: row.get("prevention")?,
        affected_plants: json_column(row, "affected_plants")?,
        is_favorite: row.get::<_, i32>("is_favorite")? == 1,
    })
}

/// Replace every entry of `kind` with `items` in one transaction.
pub fn replace_all(
    conn: &mut Connection,
    kind: AfflictionKind,
    items: &[Affliction],
) -> AppResult<usize> {
    let tx = conn.transaction()?;
    tx.execute("DELETE FROM afflictions WHERE kind = ?1", [kind.to_db_str()])?;
    {
        let mut stmt = tx.prepare(
            "INSERT INTO afflictions (kind, id, name, symptoms, causes, treatment,
                                      prevention, affected_plants, is_favorite)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        )?;
        for a in items {
            stmt.execute(params![
                kind.to_db_str(),
                a.id,
                a.name,
                serde_json::to_string(&a.symptoms)?,
                serde_json::to_string(&a.causes)?,
                serde_json::to_string(&a.treatment)?,
                a.prevention,
                serde_json::to_string(&a.affected_plants)?,
                if a.is_favorite { 1 } else { 0 },
            ])?;
        }
    }
    tx.commit()?;
    Ok(items.len())
}

fn collect(
    conn: &Connection,
    sql: &str,
    args: &[&dyn rusqlite::ToSql],
) -> AppResult<Vec<Affliction>> {
    let mut stmt = conn.prepare(sql)?;
    let mut out = Vec::new();
    for r in stmt.query_map(args, map_row)? {
        out.push(r?);
    }
    Ok(out)
}

/// Case-insensitive substring match on the name or on an affected plant.
pub fn search(
    conn: &Connection,
    kind: AfflictionKind,
    query: &str,
) -> AppResult<Vec<Affliction>> {
    let pattern = format!("%{}%", query.trim());
    let sql = format!(
        "{SELECT_AFFLICTIONS}
         WHERE kind = ?1 AND (name LIKE ?2 OR affected_plants LIKE ?2)
         ORDER BY name ASC"
    );
    collect(conn, &sql, &[&kind.to_db_str(), &pattern])
}

pub fn favorites(conn: &Connection, kind: AfflictionKind) -> AppResult<Vec<Affliction>> {
    let sql =
        format!("{SELECT_AFFLICTIONS} WHERE kind = ?1 AND is_favorite = 1 ORDER BY name ASC");
    collect(conn, &sql, &[&kind.to_db_str()])
}

/// Entries of `kind` with the given ids, ordered by name. Unknown ids are skipped.
pub fn by_ids(
    conn: &Connection,
    kind: AfflictionKind,
    ids: &[i64],
) -> AppResult<Vec<Affliction>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let marks = vec!["?"; ids.len()].join(", ");
    let sql = format!(
        "{SELECT_AFFLICTIONS} WHERE kind = '{}' AND id IN ({marks}) ORDER BY name ASC",
        kind.to_db_str()
    );
    let mut stmt = conn.prepare(&sql)?;
    let mut out = Vec::new();
    for r in stmt.query_map(params_from_iter(ids.iter()), map_row)? {
        out.push(r?);
    }
    Ok(out)
}

pub fn load(conn: &Connection, kind: AfflictionKind, id: i64) -> AppResult<Affliction> {
    let sql = format!("{SELECT_AFFLICTIONS} WHERE kind = ?1 AND id = ?2");
    conn.query_row(&sql, params![kind.to_db_str(), id], map_row)
        .map_err(|e| match e {
            rusqlite::Error::QueryReturnedNoRows => AppError::AfflictionNotFound(kind, id),
            other => other.into(),
        })
}

pub fn set_favorite(
    conn: &Connection,
    kind: AfflictionKind,
    id: i64,
    favorite: bool,
) -> AppResult<()> {
    let changed = conn.execute(
        "UPDATE afflictions SET is_favorite = ?1 WHERE kind = ?2 AND id = ?3",
        params![if favorite { 1 } else { 0 }, kind.to_db_str(), id],
    )?;
    if changed == 0 {
        return Err(AppError::AfflictionNotFound(kind, id));
    }
    Ok(())
}

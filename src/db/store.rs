//! Durable store for plants, care events and notes.
//!
//! Per-plant event lists are observable: [`CareStore::watch_events`] hands out
//! an [`EventWatch`], and [`CareStore::poll`] yields a fresh snapshot whenever
//! a write has been committed since the watch last looked, whether through
//! this store or through any other connection to the same file.

use crate::db::initialize::init_db;
use crate::db::log::ttlog_quiet;
use crate::db::pool::DbPool;
use crate::db::{events, notes, plants};
use crate::errors::{AppError, AppResult};
use crate::models::{CareEvent, Note, Plant};
use rusqlite::Connection;

pub struct CareStore {
    pool: DbPool,
    /// Bumped on every write made through this store. `PRAGMA data_version`
    /// only moves for commits made by *other* connections.
    revision: u64,
}

/// Cursor of a live "events of plant N" query.
#[derive(Debug, Clone)]
pub struct EventWatch {
    plant_id: i64,
    seen: Option<(i64, u64)>,
}

impl EventWatch {
    pub fn plant_id(&self) -> i64 {
        self.plant_id
    }
}

impl CareStore {
    /// Open (and migrate) the database at `path`.
    pub fn open(path: &str) -> AppResult<Self> {
        Self::from_pool(DbPool::new(path)?)
    }

    pub fn in_memory() -> AppResult<Self> {
        Self::from_pool(DbPool::in_memory()?)
    }

    pub fn from_pool(pool: DbPool) -> AppResult<Self> {
        init_db(&pool.conn)?;
        Ok(Self { pool, revision: 0 })
    }

    pub fn conn(&self) -> &Connection {
        &self.pool.conn
    }

    pub fn conn_mut(&mut self) -> &mut Connection {
        &mut self.pool.conn
    }

    fn committed(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    /// Best-effort row in the audit `log` table.
    pub fn audit(&self, operation: &str, target: &str, message: &str) {
        ttlog_quiet(&self.pool.conn, operation, target, message);
    }

    // ---------------------------
    // Plants
    // ---------------------------

    pub fn add_plant(&mut self, mut plant: Plant) -> AppResult<Plant> {
        if plant.name.trim().is_empty() {
            return Err(AppError::InvalidInput("plant name must not be blank".into()));
        }
        plant.id = plants::insert_plant(&self.pool.conn, &plant)?;
        self.committed();
        tracing::debug!(plant_id = plant.id, "plant stored");
        Ok(plant)
    }

    pub fn update_plant(&mut self, plant: &Plant) -> AppResult<()> {
        if plant.name.trim().is_empty() {
            return Err(AppError::InvalidInput("plant name must not be blank".into()));
        }
        plants::update_plant(&self.pool.conn, plant)?;
        self.committed();
        Ok(())
    }

    /// Delete a plant with its care events; returns the ids of the events
    /// that went with it.
    pub fn delete_plant(&mut self, id: i64) -> AppResult<Vec<i64>> {
        let tx = self.pool.conn.transaction()?;
        let event_ids = events::event_ids_for_plant(&tx, id)?;
        if !plants::delete_plant(&tx, id)? {
            return Err(AppError::PlantNotFound(id));
        }
        tx.commit()?;
        self.committed();
        Ok(event_ids)
    }

    pub fn get_plant(&self, id: i64) -> AppResult<Plant> {
        plants::load_plant(&self.pool.conn, id)?.ok_or(AppError::PlantNotFound(id))
    }

    pub fn list_plants(&self) -> AppResult<Vec<Plant>> {
        plants::load_plants(&self.pool.conn)
    }

    /// Display name for notification text; empty when the plant is unknown.
    pub fn plant_name(&self, id: i64) -> String {
        match plants::load_plant(&self.pool.conn, id) {
            Ok(Some(p)) => p.name,
            _ => String::new(),
        }
    }

    // ---------------------------
    // Care events
    // ---------------------------

    pub fn add_event(&mut self, mut event: CareEvent) -> AppResult<CareEvent> {
        if plants::load_plant(&self.pool.conn, event.plant_id)?.is_none() {
            return Err(AppError::PlantNotFound(event.plant_id));
        }
        event.id = events::insert_event(&self.pool.conn, &event)?;
        self.committed();
        tracing::debug!(event_id = event.id, plant_id = event.plant_id, "care event stored");
        Ok(event)
    }

    pub fn update_event(&mut self, event: &CareEvent) -> AppResult<()> {
        if plants::load_plant(&self.pool.conn, event.plant_id)?.is_none() {
            return Err(AppError::PlantNotFound(event.plant_id));
        }
        events::update_event(&self.pool.conn, event)?;
        self.committed();
        Ok(())
    }

    /// Delete and return the removed event.
    pub fn delete_event(&mut self, id: i64) -> AppResult<CareEvent> {
        let event = self.get_event(id)?;
        events::delete_event(&self.pool.conn, id)?;
        self.committed();
        Ok(event)
    }

    pub fn get_event(&self, id: i64) -> AppResult<CareEvent> {
        events::load_event(&self.pool.conn, id)?.ok_or(AppError::EventNotFound(id))
    }

    /// One-shot snapshot of a plant's events.
    pub fn events_for_plant(&self, plant_id: i64) -> AppResult<Vec<CareEvent>> {
        events::load_events_by_plant(&self.pool.conn, plant_id)
    }

    pub fn all_events(&self) -> AppResult<Vec<CareEvent>> {
        events::load_all_events(&self.pool.conn)
    }

    /// Start observing the events of `plant_id`. The first
    /// [`CareStore::poll`] always returns a snapshot.
    pub fn watch_events(&self, plant_id: i64) -> EventWatch {
        EventWatch {
            plant_id,
            seen: None,
        }
    }

    /// `Some(snapshot)` if anything was committed since `watch` last saw the
    /// list, `None` otherwise.
    pub fn poll(&self, watch: &mut EventWatch) -> AppResult<Option<Vec<CareEvent>>> {
        let data_version: i64 = self
            .pool
            .conn
            .query_row("PRAGMA data_version", [], |row| row.get(0))?;
        let current = (data_version, self.revision);

        if watch.seen == Some(current) {
            return Ok(None);
        }

        let snapshot = self.events_for_plant(watch.plant_id)?;
        watch.seen = Some(current);
        Ok(Some(snapshot))
    }

    // ---------------------------
    // Notes
    // ---------------------------

    pub fn add_note(&mut self, mut note: Note) -> AppResult<Note> {
        if let Some(pid) = note.plant_id
            && plants::load_plant(&self.pool.conn, pid)?.is_none()
        {
            return Err(AppError::PlantNotFound(pid));
        }
        note.id = notes::insert_note(&self.pool.conn, &note)?;
        self.committed();
        Ok(note)
    }

    pub fn update_note(&mut self, note: &Note) -> AppResult<()> {
        notes::update_note(&self.pool.conn, note)?;
        self.committed();
        Ok(())
    }

    pub fn delete_note(&mut self, id: i64) -> AppResult<()> {
        if !notes::delete_note(&self.pool.conn, id)? {
            return Err(AppError::NoteNotFound(id));
        }
        self.committed();
        Ok(())
    }

    pub fn get_note(&self, id: i64) -> AppResult<Note> {
        notes::load_note(&self.pool.conn, id)?.ok_or(AppError::NoteNotFound(id))
    }

    pub fn list_notes(&self, plant_id: Option<i64>) -> AppResult<Vec<Note>> {
        notes::load_notes(&self.pool.conn, plant_id)
    }
}

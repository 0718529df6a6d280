use crate::db::{CareStore, afflictions, reference};
use crate::errors::{AppError, AppResult};
use crate::models::{
    Affliction, AfflictionKind, AfflictionRecord, ReferencePlant, ReferencePlantRecord,
};
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Browsing and maintenance of the reference catalogues: plants, diseases
/// and pests.
pub struct ReferenceLogic;

impl ReferenceLogic {
    /// Replace the plant catalogue with the JSON array of records in `file`.
    pub fn import(store: &mut CareStore, file: &str) -> AppResult<usize> {
        let path = Path::new(file);
        let records: Vec<ReferencePlantRecord> = read_records(path)?;

        let plants: Vec<ReferencePlant> = records
            .into_iter()
            .map(ReferencePlantRecord::into_reference_plant)
            .collect();

        let count = reference::replace_all(store.conn_mut(), &plants)?;
        store.audit(
            "import",
            &path.to_string_lossy(),
            &format!("{count} reference plants imported"),
        );
        tracing::info!(count, file = %path.display(), "reference catalogue replaced");

        Ok(count)
    }

    pub fn search(store: &CareStore, query: &str) -> AppResult<Vec<ReferencePlant>> {
        reference::search(store.conn(), query.trim())
    }

    pub fn favorites(store: &CareStore) -> AppResult<Vec<ReferencePlant>> {
        reference::favorites(store.conn())
    }

    /// Flip the favorite flag and return the updated entry.
    pub fn toggle_favorite(store: &CareStore, id: i64) -> AppResult<ReferencePlant> {
        let current = reference::load(store.conn(), id)?;
        reference::set_favorite(store.conn(), id, !current.is_favorite)?;
        reference::load(store.conn(), id)
    }

    /// Replace the disease or pest catalogue. Ids must be unique within the
    /// file: reference plants link to diseases by id.
    pub fn import_afflictions(
        store: &mut CareStore,
        kind: AfflictionKind,
        file: &str,
    ) -> AppResult<usize> {
        let path = Path::new(file);
        let records: Vec<AfflictionRecord> = read_records(path)?;

        let mut seen = HashSet::new();
        if let Some(dup) = records.iter().find(|r| !seen.insert(r.id)) {
            return Err(AppError::InvalidInput(format!(
                "duplicate {} id {} in {}",
                kind.to_string().to_lowercase(),
                dup.id,
                path.display()
            )));
        }

        let items: Vec<Affliction> = records
            .into_iter()
            .map(|r| r.into_affliction(kind))
            .collect();

        let count = afflictions::replace_all(store.conn_mut(), kind, &items)?;
        store.audit(
            "import",
            &path.to_string_lossy(),
            &format!("{count} {} entries imported", kind.to_string().to_lowercase()),
        );
        tracing::info!(count, %kind, file = %path.display(), "catalogue replaced");

        Ok(count)
    }

    /// Match on the name or on one of the affected plants.
    pub fn search_afflictions(
        store: &CareStore,
        kind: AfflictionKind,
        query: &str,
    ) -> AppResult<Vec<Affliction>> {
        afflictions::search(store.conn(), kind, query)
    }

    pub fn affliction_favorites(
        store: &CareStore,
        kind: AfflictionKind,
    ) -> AppResult<Vec<Affliction>> {
        afflictions::favorites(store.conn(), kind)
    }

    pub fn toggle_affliction_favorite(
        store: &CareStore,
        kind: AfflictionKind,
        id: i64,
    ) -> AppResult<Affliction> {
        let current = afflictions::load(store.conn(), kind, id)?;
        afflictions::set_favorite(store.conn(), kind, id, !current.is_favorite)?;
        afflictions::load(store.conn(), kind, id)
    }

    /// Diseases a reference plant is prone to. Ids missing from the disease
    /// catalogue are ignored.
    pub fn diseases_of(store: &CareStore, plant: &ReferencePlant) -> AppResult<Vec<Affliction>> {
        afflictions::by_ids(store.conn(), AfflictionKind::Disease, &plant.disease_ids)
    }
}

fn read_records<T: DeserializeOwned>(path: &Path) -> AppResult<Vec<T>> {
    if !path.exists() {
        return Err(AppError::InvalidInput(format!(
            "reference file not found: {}",
            path.display()
        )));
    }

    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

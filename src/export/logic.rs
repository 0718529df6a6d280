// src/export/logic.rs

use crate::db::CareStore;
use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::EventExport;
use crate::models::Locale;
use crate::ui::messages::warning;
use crate::utils::prompt::may_overwrite;
use std::collections::HashMap;
use std::path::Path;

pub struct ExportLogic;

impl ExportLogic {
    /// Export every care event, with its plant's name, to `file`.
    ///
    /// Returns the number of rows written (0 when there is nothing to export
    /// and no file was created).
    pub fn export(
        store: &CareStore,
        format: ExportFormat,
        file: &str,
        force: bool,
        locale: Locale,
    ) -> AppResult<usize> {
        let path = Path::new(file);

        if !path.is_absolute() {
            return Err(AppError::Export(format!(
                "Output file path must be absolute: {file}"
            )));
        }

        if !may_overwrite(path, force)? {
            return Err(AppError::Export(format!(
                "cancelled, '{}' not overwritten",
                path.display()
            )));
        }

        let rows = load_rows(store, locale)?;

        if rows.is_empty() {
            warning("No care events to export.");
            return Ok(0);
        }

        match format {
            ExportFormat::Csv => export_csv(&rows, path)?,
            ExportFormat::Json => export_json(&rows, path)?,
        }

        store.audit(
            "export",
            &path.to_string_lossy(),
            &format!("{} care events exported as {}", rows.len(), format.as_str()),
        );

        Ok(rows.len())
    }
}

pub(crate) fn load_rows(store: &CareStore, locale: Locale) -> AppResult<Vec<EventExport>> {
    let names: HashMap<i64, String> = store
        .list_plants()?
        .into_iter()
        .map(|p| (p.id, p.name))
        .collect();

    Ok(store
        .all_events()?
        .iter()
        .map(|ev| {
            let plant = names.get(&ev.plant_id).map(String::as_str).unwrap_or("");
            EventExport::from_event(ev, plant, locale)
        })
        .collect())
}

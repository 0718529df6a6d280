use crate::errors::AppResult;
use crate::export::{EventExport, notify_export_success};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

pub(crate) fn export_json(rows: &[EventExport], path: &Path) -> AppResult<()> {
    let mut out = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut out, rows)?;
    out.flush()?;

    notify_export_success("JSON", path);
    Ok(())
}

/// Header row comes from the serde field names of [`EventExport`].
pub(crate) fn export_csv(rows: &[EventExport], path: &Path) -> AppResult<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;

    notify_export_success("CSV", path);
    Ok(())
}

use crate::db::log::ttlog_quiet;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success, warning};
use crate::utils::prompt::may_overwrite;
use rusqlite::Connection;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

pub struct BackupLogic;

impl BackupLogic {
    /// Snapshot the database at `db_path` into `dest_file`, or into
    /// `dest_file` with a `.zip` extension when `compress` is set.
    ///
    /// Only the final target is ever replaced, and only with `force` or after
    /// the user confirms. Returns the written path, or `None` when the user
    /// declined.
    pub fn backup(
        db_path: &str,
        dest_file: &str,
        compress: bool,
        force: bool,
    ) -> AppResult<Option<PathBuf>> {
        let src = Path::new(db_path);
        if !src.exists() {
            return Err(AppError::Io(io::Error::new(
                io::ErrorKind::NotFound,
                format!("no database at {}", src.display()),
            )));
        }

        let raw = Path::new(dest_file);
        let target = if compress {
            raw.with_extension("zip")
        } else {
            raw.to_path_buf()
        };

        let live = fs::canonicalize(src)?;
        for candidate in [raw, target.as_path()] {
            if same_file(&live, candidate)? {
                return Err(AppError::InvalidInput(format!(
                    "backup target {} is the database itself",
                    candidate.display()
                )));
            }
        }

        if !may_overwrite(&target, force)? {
            warning("Backup cancelled.");
            return Ok(None);
        }

        if let Some(dir) = target.parent()
            && !dir.as_os_str().is_empty()
        {
            fs::create_dir_all(dir)?;
        }

        let conn = Connection::open(src)?;

        if compress {
            let scratch = scratch_path(&target)?;
            let zipped = snapshot(&conn, &scratch).and_then(|_| {
                let entry = raw
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| "plantcare.sqlite".into());
                zip_file(&scratch, &entry, &target)
            });
            if let Err(e) = fs::remove_file(&scratch)
                && scratch.exists()
            {
                warning(format!("Could not remove {}: {e}", scratch.display()));
            }
            zipped?;
            info(format!("Compressed: {}", target.display()));
        } else {
            // Approved by `may_overwrite`; VACUUM INTO needs the path free.
            if target.exists() {
                fs::remove_file(&target)?;
            }
            snapshot(&conn, &target)?;
        }
        success(format!("Backup created: {}", target.display()));

        ttlog_quiet(
            &conn,
            "backup",
            &target.to_string_lossy(),
            if compress { "zipped snapshot" } else { "snapshot" },
        );
        tracing::info!(path = %target.display(), compress, "database backup written");

        Ok(Some(target))
    }
}

fn same_file(live: &Path, candidate: &Path) -> AppResult<bool> {
    if !candidate.exists() {
        return Ok(false);
    }
    Ok(fs::canonicalize(candidate)? == live)
}

/// A path next to `target` that does not exist yet.
fn scratch_path(target: &Path) -> AppResult<PathBuf> {
    let name = target
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "plantcare".into());

    (0..100)
        .map(|n| target.with_file_name(format!(".{name}.{}.{n}.snapshot", std::process::id())))
        .find(|p| !p.exists())
        .ok_or_else(|| {
            AppError::InvalidInput(format!("no free scratch file next to {}", target.display()))
        })
}

/// Consistent copy of the open database, even while another process uses it.
fn snapshot(conn: &Connection, dest: &Path) -> AppResult<()> {
    conn.execute("VACUUM INTO ?1", [dest.to_string_lossy().into_owned()])?;
    Ok(())
}

fn zip_file(src: &Path, entry: &str, zip_path: &Path) -> AppResult<()> {
    let mut writer = ZipWriter::new(fs::File::create(zip_path)?);
    writer.start_file(
        entry,
        SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated),
    )?;
    io::copy(&mut fs::File::open(src)?, &mut writer)?;
    writer.finish()?;
    Ok(())
}

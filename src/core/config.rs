use crate::config::Config;
use crate::errors::{AppError, AppResult};
use std::fs;
use std::path::Path;
use std::process::Command;

pub struct ConfigLogic;

impl ConfigLogic {
    /// The configuration as effectively loaded (file values plus defaults).
    pub fn render(cfg: &Config) -> AppResult<String> {
        Ok(serde_yaml::to_string(cfg)?)
    }

    /// Keys missing from the file at `path`; every key when it does not exist.
    pub fn check(path: &Path) -> AppResult<Vec<&'static str>> {
        if !path.exists() {
            return Ok(crate::config::CONFIG_KEYS.to_vec());
        }
        let content = fs::read_to_string(path)?;
        Config::missing_fields(&content)
    }

    /// Open `path` in `editor`, then `$EDITOR`/`$VISUAL`, then the platform default.
    pub fn edit(path: &Path, editor: &Option<String>) -> AppResult<String> {
        let ed = editor
            .clone()
            .or_else(|| std::env::var("EDITOR").ok())
            .or_else(|| std::env::var("VISUAL").ok())
            .unwrap_or_else(|| {
                if cfg!(target_os = "windows") {
                    "notepad".into()
                } else {
                    "nano".into()
                }
            });

        let status = Command::new(&ed)
            .arg(path)
            .status()
            .map_err(|e| AppError::Config(format!("cannot start editor '{ed}': {e}")))?;

        if !status.success() {
            return Err(AppError::Config(format!("editor '{ed}' exited with {status}")));
        }

        Ok(ed)
    }
}

use crate::errors::{AppError, AppResult};
use crate::models::Locale;
use crate::utils::path::expand_tilde;
use chrono::TimeDelta;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

const APP_DIR: &str = ".plantcare";
const CONFIG_FILE: &str = "plantcare.conf";
const DATABASE_FILE: &str = "plantcare.sqlite";

/// Upper bound of `due_soon_hours`: one year.
pub const MAX_DUE_SOON_HOURS: i64 = 24 * 366;

/// Keys every complete configuration file carries (`config --check`).
pub const CONFIG_KEYS: [&str; 6] = [
    "database",
    "language",
    "notifications_enabled",
    "poll_interval_secs",
    "due_soon_hours",
    "log_level",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default)]
    pub language: Locale,
    /// Whether `remind run` may show notifications.
    #[serde(default = "default_notifications")]
    pub notifications_enabled: bool,
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,
    #[serde(default = "default_due_soon_hours")]
    pub due_soon_hours: i64,
    /// tracing filter used when RUST_LOG is not set.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_database() -> String {
    Config::database_file().to_string_lossy().to_string()
}
fn default_notifications() -> bool {
    true
}
fn default_poll_interval() -> u64 {
    30
}
fn default_due_soon_hours() -> i64 {
    24
}
fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database(),
            language: Locale::default(),
            notifications_enabled: default_notifications(),
            poll_interval_secs: default_poll_interval(),
            due_soon_hours: default_due_soon_hours(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// `~/.plantcare` (current directory when no home is known)
    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
    }

    pub fn config_file() -> PathBuf {
        Self::config_dir().join(CONFIG_FILE)
    }

    pub fn database_file() -> PathBuf {
        Self::config_dir().join(DATABASE_FILE)
    }

    /// Load the configuration file; defaults when it does not exist.
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> AppResult<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let cfg: Self = serde_yaml::from_str(content)
            .map_err(|e| AppError::Config(format!("cannot parse configuration: {e}")))?;
        cfg.due_soon_window()?;
        Ok(cfg)
    }

    /// `due_soon_hours` as a duration; must lie in `0..=MAX_DUE_SOON_HOURS`.
    pub fn due_soon_window(&self) -> AppResult<TimeDelta> {
        if !(0..=MAX_DUE_SOON_HOURS).contains(&self.due_soon_hours) {
            return Err(AppError::Config(format!(
                "due_soon_hours must be between 0 and {MAX_DUE_SOON_HOURS}, got {}",
                self.due_soon_hours
            )));
        }
        TimeDelta::try_hours(self.due_soon_hours).ok_or_else(|| {
            AppError::Config(format!("due_soon_hours out of range: {}", self.due_soon_hours))
        })
    }

    /// Keys of [`CONFIG_KEYS`] absent from the YAML document.
    pub fn missing_fields(content: &str) -> AppResult<Vec<&'static str>> {
        let value: serde_yaml::Value = serde_yaml::from_str(content)?;
        let mapping = value.as_mapping();

        Ok(CONFIG_KEYS
            .iter()
            .copied()
            .filter(|key| {
                mapping
                    .map(|m| !m.contains_key(serde_yaml::Value::from(*key)))
                    .unwrap_or(true)
            })
            .collect())
    }

    /// Create the configuration directory, the configuration file (unless
    /// `is_test`) and an empty database file. Returns the database path.
    pub fn init_all(custom_db: Option<String>, is_test: bool) -> AppResult<String> {
        let dir = Self::config_dir();

        let db_path = match custom_db {
            Some(name) => {
                let p = expand_tilde(&name);
                if p.is_absolute() { p } else { dir.join(p) }
            }
            None => dir.join(DATABASE_FILE),
        };

        if !is_test {
            fs::create_dir_all(&dir)?;
            let config = Config {
                database: db_path.to_string_lossy().to_string(),
                ..Config::default()
            };
            let yaml = serde_yaml::to_string(&config)?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
        }

        if let Some(parent) = db_path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        if !db_path.exists() {
            fs::File::create(&db_path)?;
        }

        Ok(db_path.to_string_lossy().to_string())
    }
}

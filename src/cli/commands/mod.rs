pub mod backup;
pub mod config;
pub mod db;
pub mod due;
pub mod event;
pub mod export;
pub mod init;
pub mod log;
pub mod note;
pub mod plant;
pub mod reference;
pub mod remind;

use crate::config::Config;
use crate::db::CareStore;
use crate::errors::AppResult;
use crate::reminder::{ReminderScheduler, SqliteTriggerQueue};

/// Reminder scheduling as wired for the command line: the durable queue
/// living in the configured database.
pub(crate) type Reminders = ReminderScheduler<SqliteTriggerQueue>;

pub(crate) fn open_store(cfg: &Config) -> AppResult<CareStore> {
    CareStore::open(&cfg.database)
}

pub(crate) fn open_reminders(cfg: &Config) -> AppResult<Reminders> {
    let queue = SqliteTriggerQueue::open(&cfg.database)?;
    Ok(ReminderScheduler::new(queue, cfg.language))
}

//! Durable scheduling port backed by the `pending_triggers` table.
//!
//! Each CLI invocation that schedules a reminder writes here; `remind run`
//! (possibly in another process) takes the due rows and fires them.

use super::{DueSource, PendingTrigger, ReminderPayload, TaskScheduler};
use crate::core::clock::{Clock, SystemClock};
use crate::db::initialize::init_db;
use crate::db::pool::DbPool;
use crate::db::triggers;
use crate::errors::AppResult;
use chrono::{DateTime, Utc};
use std::time::Duration;

pub struct SqliteTriggerQueue<C: Clock = SystemClock> {
    pool: DbPool,
    clock: C,
}

impl SqliteTriggerQueue<SystemClock> {
    pub fn open(path: &str) -> AppResult<Self> {
        Self::open_with_clock(path, SystemClock)
    }
}

impl<C: Clock> SqliteTriggerQueue<C> {
    pub fn open_with_clock(path: &str, clock: C) -> AppResult<Self> {
        Self::from_pool(DbPool::new(path)?, clock)
    }

    pub fn in_memory(clock: C) -> AppResult<Self> {
        Self::from_pool(DbPool::in_memory()?, clock)
    }

    pub fn from_pool(pool: DbPool, clock: C) -> AppResult<Self> {
        init_db(&pool.conn)?;
        Ok(Self { pool, clock })
    }

    pub fn get(&self, key: &str) -> AppResult<Option<PendingTrigger>> {
        Ok(self.pending()?.into_iter().find(|t| t.key == key))
    }
}

impl<C: Clock> TaskScheduler for SqliteTriggerQueue<C> {
    fn schedule_once(&mut self, key: &str, delay: Duration, payload: ReminderPayload) -> AppResult<()> {
        let trigger = PendingTrigger::new(key, self.clock.now(), delay, payload);
        triggers::upsert_trigger(&self.pool.conn, &trigger)?;
        tracing::debug!(key, due_at = %trigger.due_at, "trigger stored");
        Ok(())
    }

    fn cancel(&mut self, key: &str) -> AppResult<()> {
        if triggers::delete_trigger(&self.pool.conn, key)? {
            tracing::debug!(key, "trigger removed");
        }
        Ok(())
    }

    fn pending(&self) -> AppResult<Vec<PendingTrigger>> {
        triggers::load_triggers(&self.pool.conn)
    }
}

impl<C: Clock> DueSource for SqliteTriggerQueue<C> {
    fn take_due(&mut self, now: DateTime<Utc>) -> AppResult<Vec<PendingTrigger>> {
        triggers::take_due_triggers(&mut self.pool.conn, &now)
    }
}

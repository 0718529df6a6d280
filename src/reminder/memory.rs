//! Non-durable scheduling port: pending triggers live in an ordered map.

use super::{DueSource, PendingTrigger, ReminderPayload, TaskScheduler};
use crate::core::clock::{Clock, SystemClock};
use crate::errors::AppResult;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::time::Duration;

pub struct InMemoryScheduler<C: Clock = SystemClock> {
    clock: C,
    triggers: BTreeMap<String, PendingTrigger>,
}

impl InMemoryScheduler<SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for InMemoryScheduler<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> InMemoryScheduler<C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            clock,
            triggers: BTreeMap::new(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&PendingTrigger> {
        self.triggers.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.triggers.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.triggers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triggers.is_empty()
    }
}

impl<C: Clock> TaskScheduler for InMemoryScheduler<C> {
    fn schedule_once(&mut self, key: &str, delay: Duration, payload: ReminderPayload) -> AppResult<()> {
        let trigger = PendingTrigger::new(key, self.clock.now(), delay, payload);
        self.triggers.insert(key.to_string(), trigger);
        Ok(())
    }

    fn cancel(&mut self, key: &str) -> AppResult<()> {
        self.triggers.remove(key);
        Ok(())
    }

    fn pending(&self) -> AppResult<Vec<PendingTrigger>> {
        let mut out: Vec<PendingTrigger> = self.triggers.values().cloned().collect();
        out.sort_by(|a, b| a.due_at.cmp(&b.due_at).then_with(|| a.key.cmp(&b.key)));
        Ok(out)
    }
}

impl<C: Clock> DueSource for InMemoryScheduler<C> {
    fn take_due(&mut self, now: DateTime<Utc>) -> AppResult<Vec<PendingTrigger>> {
        let due_keys: Vec<String> = self
            .triggers
            .values()
            .filter(|t| t.is_due(&now))
            .map(|t| t.key.clone())
            .collect();

        let mut due: Vec<PendingTrigger> = due_keys
            .iter()
            .filter_map(|k| self.triggers.remove(k))
            .collect();
        due.sort_by(|a, b| a.due_at.cmp(&b.due_at).then_with(|| a.key.cmp(&b.key)));
        Ok(due)
    }
}

use super::worker::{Notifier, ReminderWorker, WorkResult};
use super::{DueSource, PendingTrigger};
use crate::core::clock::Clock;
use crate::errors::AppResult;
use chrono::{DateTime, Utc};
use std::time::Duration;

/// Plays the platform's part: collects due triggers and fires each one
/// exactly once.
pub struct ReminderRunner<Q: DueSource, N: Notifier> {
    queue: Q,
    worker: ReminderWorker<N>,
}

impl<Q: DueSource, N: Notifier> ReminderRunner<Q, N> {
    pub fn new(queue: Q, worker: ReminderWorker<N>) -> Self {
        Self { queue, worker }
    }

    pub fn queue(&self) -> &Q {
        &self.queue
    }

    pub fn worker(&self) -> &ReminderWorker<N> {
        &self.worker
    }

    /// Fire everything due at `now`; returns the triggers that fired.
    pub fn run_once(&mut self, now: DateTime<Utc>) -> AppResult<Vec<PendingTrigger>> {
        let due = self.queue.take_due(now)?;

        for trigger in &due {
            let WorkResult::Success = self.worker.fire(&trigger.payload);
            tracing::info!(key = %trigger.key, due_at = %trigger.due_at, "reminder delivered");
        }

        Ok(due)
    }

    /// Poll forever, every `interval`.
    pub fn run_forever(&mut self, clock: &dyn Clock, interval: Duration) -> AppResult<()> {
        loop {
            self.run_once(clock.now())?;
            std::thread::sleep(interval);
        }
    }
}

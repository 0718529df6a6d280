use super::care_kind::CareKind;
use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CareEvent {
    pub id: i64,                                  // ⇔ care_events.id
    pub plant_id: i64,                            // ⇔ care_events.plant_id (FK plants.id)
    pub kind: CareKind,                           // ⇔ care_events.type
    pub interval_days: Option<f64>,               // ⇔ care_events.interval_days (0.25 = 6h)
    pub last_date: Option<DateTime<Utc>>,         // ⇔ care_events.last_date (epoch millis)
    pub fertilizer_type: Option<String>,          // only for Fertilizing
    pub next_date: Option<DateTime<Utc>>,         // only for Repotting
    pub reminder_date_time: Option<DateTime<Utc>>, // only while reminder_enabled
    pub done: bool,
    pub reminder_enabled: bool,
    pub reminder_time: Option<i64>, // millis since midnight, not used for scheduling
}

impl CareEvent {
    /// A fresh, not yet stored event (`id = 0`, `done = false`, no reminder).
    pub fn new(plant_id: i64, kind: CareKind) -> Self {
        Self {
            id: 0,
            plant_id,
            kind,
            interval_days: None,
            last_date: None,
            fertilizer_type: None,
            next_date: None,
            reminder_date_time: None,
            done: false,
            reminder_enabled: false,
            reminder_time: None,
        }
    }

    pub fn with_reminder(mut self, at: DateTime<Utc>) -> Self {
        self.reminder_enabled = true;
        self.reminder_date_time = Some(at);
        self
    }

    pub fn without_reminder(mut self) -> Self {
        self.reminder_enabled = false;
        self.reminder_date_time = None;
        self
    }

    /// Drop the fields that carry no meaning for this event's kind or
    /// reminder state.
    pub fn normalized(mut self) -> Self {
        if self.kind != CareKind::Fertilizing {
            self.fertilizer_type = None;
        }
        if self.kind != CareKind::Repotting {
            self.next_date = None;
        }
        if !self.reminder_enabled {
            self.reminder_date_time = None;
        }
        if let Some(label) = &self.fertilizer_type
            && label.trim().is_empty()
        {
            self.fertilizer_type = None;
        }
        self
    }

    pub fn validate(&self) -> AppResult<()> {
        if let Some(days) = self.interval_days
            && !(days.is_finite() && days > 0.0)
        {
            return Err(AppError::InvalidInterval(days));
        }
        Ok(())
    }

    pub fn has_pending_reminder(&self) -> bool {
        self.reminder_enabled && self.reminder_date_time.is_some()
    }
}

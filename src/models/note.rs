use chrono::{DateTime, SubsecRound, Utc};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Note {
    pub id: i64,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub plant_id: Option<i64>, // None → general note
    pub done: bool,
}

impl Note {
    pub fn new(text: impl Into<String>, plant_id: Option<i64>) -> Self {
        Self {
            id: 0,
            text: text.into(),
            // Stored as epoch millis.
            created_at: Utc::now().trunc_subsecs(3),
            plant_id,
            done: false,
        }
    }
}

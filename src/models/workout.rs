use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A completed workout; the qualifying event for streaks.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkoutCompletion {
    pub id: String,
    pub client_id: String,
    pub date: NaiveDate,
    pub workout_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl WorkoutCompletion {
    pub fn new(client_id: String, date: NaiveDate, workout_name: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            client_id,
            date,
            workout_name,
            duration_minutes: None,
            notes: None,
            created_at: Utc::now(),
        }
    }
}

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct MacroTotals {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

/// Per-day nutrition totals. At most one exists per (client, date).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NutritionDayLog {
    pub client_id: String,
    pub date: NaiveDate,
    pub totals: MacroTotals,
    pub compliance_score: u8,
    #[serde(default)]
    pub meals_completed: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NutritionDayLog {
    pub fn new(client_id: String, date: NaiveDate, totals: MacroTotals, compliance_score: u8) -> Self {
        let now = Utc::now();
        Self {
            client_id,
            date,
            totals,
            compliance_score,
            meals_completed: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NutritionInput {
    #[serde(default)]
    pub date: Option<NaiveDate>,
    pub totals: MacroTotals,
    pub compliance_score: u8,
    #[serde(default)]
    pub meals_completed: Vec<String>,
}

/// Daily targets set by the coach for one client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NutritionTargets {
    pub client_id: String,
    pub calories: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protein: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carbs: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fat: Option<f64>,
    pub updated_at: DateTime<Utc>,
}

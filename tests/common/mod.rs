#![allow(dead_code)]

use chrono::{Duration, NaiveDate};
use coachvital::Engine;
use coachvital::db::Database;
use coachvital::models::config::Config;
use coachvital::models::metric::MetricInput;
use coachvital::models::nutrition::{MacroTotals, NutritionInput};
use tempfile::TempDir;

/// Fixed "today" for deterministic date arithmetic.
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 15).unwrap()
}

/// `n` days before [`today`].
pub fn days_ago(n: i64) -> NaiveDate {
    today() - Duration::days(n)
}

/// Create a temporary database for testing.
pub fn setup_db() -> (TempDir, Database) {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("test.db");
    let db = Database::open(&db_path).unwrap();
    (dir, db)
}

/// Engine over a temporary database with default config, pinned to [`today`].
pub fn setup_engine() -> (TempDir, Engine) {
    setup_engine_with(Config::default())
}

pub fn setup_engine_with(config: Config) -> (TempDir, Engine) {
    let (dir, db) = setup_db();
    (dir, Engine::new(db, config).as_of(today()))
}

pub fn metric(value: f64, date: NaiveDate) -> MetricInput {
    MetricInput {
        value,
        date: Some(date),
        ..Default::default()
    }
}

pub fn nutrition(calories: f64, date: NaiveDate) -> NutritionInput {
    NutritionInput {
        date: Some(date),
        totals: MacroTotals {
            calories,
            protein: 120.0,
            carbs: 200.0,
            fat: 60.0,
        },
        compliance_score: 80,
        meals_completed: Vec::new(),
    }
}

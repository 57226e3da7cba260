use chrono::{Duration, NaiveDate};
use serde::Serialize;

use crate::core::logging::{read_history, validate_client_id};
use crate::core::projection::{self, ProjectionResult};
use crate::core::trend::{self, TrendResult, round2};
use crate::db::Database;
use crate::error::Result;
use crate::models::config::Config;
use crate::models::metric::{CurrentSnapshot, MetricEntry};

/// Minimum window read for stats so the month change is always covered.
const MIN_STATS_WINDOW_DAYS: u32 = 30;

#[derive(Debug, Serialize)]
pub struct ProgressStats {
    pub current: Option<CurrentSnapshot>,
    pub week_change: Option<f64>,
    pub month_change: Option<f64>,
    pub trend: TrendResult,
    pub prediction: Option<ProjectionResult>,
    pub entries: usize,
}

/// Latest value minus the oldest value inside the last `days` days.
/// `history` must be newest first. Needs two entries in the window.
pub fn change_over(history: &[MetricEntry], days: i64, today: NaiveDate) -> Option<f64> {
    let cutoff = today - Duration::days(days);
    let in_window: Vec<&MetricEntry> = history.iter().filter(|e| e.date >= cutoff).collect();
    if in_window.len() < 2 {
        return None;
    }
    let latest = in_window.first()?;
    let oldest = in_window.last()?;
    Some(round2(latest.value - oldest.value))
}

pub fn compute(db: &Database, config: &Config, client_id: &str, today: NaiveDate) -> Result<ProgressStats> {
    validate_client_id(client_id)?;
    let window = config.history.default_window_days.max(MIN_STATS_WINDOW_DAYS);
    let history = read_history(db, client_id, window, today)?;
    let current = db.get_snapshot(client_id)?;

    Ok(ProgressStats {
        current,
        week_change: change_over(&history, 7, today),
        month_change: change_over(&history, 30, today),
        trend: trend::classify_entries(&history, &config.trend),
        prediction: projection::project_entries(&history, &config.projection),
        entries: history.len(),
    })
}

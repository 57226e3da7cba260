use std::sync::LazyLock;

use chrono::{Duration, NaiveDate};
use regex::Regex;

use crate::db::Database;
use crate::error::{Error, Result, validation};
use crate::models::config::{Config, Validation};
use crate::models::metric::{MetricEntry, MetricInput};
use crate::models::workout::WorkoutCompletion;

/// Longest history window a caller may ask for.
pub const MAX_WINDOW_DAYS: u32 = 3650;

static CLIENT_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9_.@-]{0,63}$").expect("valid regex"));

pub fn validate_client_id(client_id: &str) -> Result<()> {
    if CLIENT_ID_RE.is_match(client_id) {
        Ok(())
    } else {
        Err(validation(format!("invalid client id: '{}'", client_id)))
    }
}

/// Reject non-finite and physically implausible values.
pub fn validate_value(value: f64, bounds: &Validation) -> Result<()> {
    if !value.is_finite() {
        return Err(validation(format!("value must be a finite number, got {}", value)));
    }
    if value < bounds.min_value || value > bounds.max_value {
        return Err(validation(format!(
            "value {} outside plausible range {}-{}",
            value, bounds.min_value, bounds.max_value
        )));
    }
    Ok(())
}

pub fn validate_window(window_days: u32) -> Result<()> {
    if window_days == 0 || window_days > MAX_WINDOW_DAYS {
        return Err(validation(format!(
            "window must be 1-{} days, got {}",
            MAX_WINDOW_DAYS, window_days
        )));
    }
    Ok(())
}

pub fn validate_date(date: NaiveDate, today: NaiveDate) -> Result<()> {
    if date > today {
        return Err(validation(format!("date {} is in the future", date)));
    }
    Ok(())
}

fn build_entry(config: &Config, client_id: &str, input: &MetricInput, today: NaiveDate) -> Result<MetricEntry> {
    validate_client_id(client_id)?;
    validate_value(input.value, &config.validation)?;
    let date = input.date.unwrap_or(today);
    validate_date(date, today)?;

    let mut entry = MetricEntry::new(client_id.to_string(), date, input.value);
    entry.time_of_day = input.metadata.time_of_day;
    entry.feeling = input.metadata.feeling;
    entry.notes = input
        .metadata
        .notes
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(String::from);
    Ok(entry)
}

/// Validate and write one entry. A second write for the same day updates the
/// existing row.
pub fn log_metric(
    db: &Database,
    config: &Config,
    client_id: &str,
    input: &MetricInput,
    today: NaiveDate,
) -> Result<MetricEntry> {
    let entry = build_entry(config, client_id, input, today)?;
    let stored = db.write_metric_entry(&entry)?;
    tracing::info!(client = client_id, date = %stored.date, value = stored.value, "metric saved");
    Ok(stored)
}

/// Log metrics from a JSON array of `{value, date?, time_of_day?, feeling?, notes?}`.
/// Every entry is validated before anything is written, and the batch is
/// stored in one transaction.
pub fn log_batch(
    db: &Database,
    config: &Config,
    client_id: &str,
    batch_json: &str,
    today: NaiveDate,
) -> Result<Vec<MetricEntry>> {
    let inputs: Vec<MetricInput> = serde_json::from_str(batch_json)
        .map_err(|e| validation(format!("invalid batch: {}", e)))?;

    let mut entries = Vec::with_capacity(inputs.len());
    for (i, input) in inputs.iter().enumerate() {
        let entry = build_entry(config, client_id, input, today).map_err(|e| match e {
            Error::Validation(msg) => validation(format!("batch entry {}: {}", i, msg)),
            other => other,
        })?;
        entries.push(entry);
    }

    let results = db.write_metric_entries(&entries)?;
    tracing::info!(client = client_id, count = results.len(), "metric batch saved");
    Ok(results)
}

/// Entries in `[today - window_days, today]`, one per date, newest first.
pub fn read_history(
    db: &Database,
    client_id: &str,
    window_days: u32,
    today: NaiveDate,
) -> Result<Vec<MetricEntry>> {
    validate_client_id(client_id)?;
    validate_window(window_days)?;
    let from = today - Duration::days(window_days as i64);
    let rows = db.query_metric_entries(client_id, from, today)?;
    let history = dedupe_by_day(rows);
    tracing::debug!(client = client_id, window_days, entries = history.len(), "history read");
    Ok(history)
}

/// Keep one entry per date (the most recently created), ordered newest date first.
pub fn dedupe_by_day(mut entries: Vec<MetricEntry>) -> Vec<MetricEntry> {
    entries.sort_by(|a, b| {
        b.date
            .cmp(&a.date)
            .then_with(|| b.created_at.cmp(&a.created_at))
    });
    entries.dedup_by_key(|e| e.date);
    entries
}

/// Record a completed workout. Several per day are allowed.
pub fn log_workout(
    db: &Database,
    client_id: &str,
    workout_name: &str,
    date: Option<NaiveDate>,
    duration_minutes: Option<u32>,
    notes: Option<&str>,
    today: NaiveDate,
) -> Result<WorkoutCompletion> {
    validate_client_id(client_id)?;
    let name = workout_name.trim();
    if name.is_empty() {
        return Err(validation("workout name must not be empty"));
    }
    let date = date.unwrap_or(today);
    validate_date(date, today)?;

    let mut w = WorkoutCompletion::new(client_id.to_string(), date, name.to_string());
    w.duration_minutes = duration_minutes;
    w.notes = notes.map(String::from);
    db.insert_workout(&w)?;
    tracing::info!(client = client_id, date = %date, workout = name, "workout logged");
    Ok(w)
}

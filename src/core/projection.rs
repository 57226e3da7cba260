use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::core::trend::round2;
use crate::models::config::ProjectionSettings;
use crate::models::metric::MetricEntry;

const CONFIDENCE_FLOOR: f64 = 50.0;
const CONFIDENCE_CAP: f64 = 95.0;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ProjectionResult {
    pub change_estimate: f64,
    pub timeframe_days: u32,
    pub confidence_percent: f64,
    pub weekly_rate: f64,
    pub projected_value: f64,
}

/// Extrapolate the average weekly rate of change over `horizon_days`.
///
/// Points are bucketed into calendar weeks counted from the oldest date. Each
/// bucket's net change (last minus first) is scaled to a full week by the days
/// the bucket actually spans, and the bucket rates are averaged. Returns `None`
/// with fewer than `min_entries` points or when no bucket spans more than one day.
pub fn project(points: &[(NaiveDate, f64)], horizon_days: u32, min_entries: usize) -> Option<ProjectionResult> {
    if points.is_empty() || points.len() < min_entries {
        return None;
    }

    let mut sorted: Vec<(NaiveDate, f64)> = points.to_vec();
    sorted.sort_by_key(|(d, _)| *d);
    let oldest = sorted[0].0;

    let mut buckets: BTreeMap<i64, Vec<(NaiveDate, f64)>> = BTreeMap::new();
    for (date, value) in &sorted {
        let idx = (*date - oldest).num_days() / 7;
        buckets.entry(idx).or_default().push((*date, *value));
    }

    let weekly_rates: Vec<f64> = buckets
        .values()
        .filter_map(|bucket| {
            let (first_date, first_value) = bucket.first()?;
            let (last_date, last_value) = bucket.last()?;
            let span = (*last_date - *first_date).num_days();
            if span == 0 {
                return None;
            }
            Some((last_value - first_value) / span as f64 * 7.0)
        })
        .collect();

    if weekly_rates.is_empty() {
        return None;
    }

    let weekly_rate = weekly_rates.iter().sum::<f64>() / weekly_rates.len() as f64;
    let change_estimate = weekly_rate * horizon_days as f64 / 7.0;
    let latest = sorted[sorted.len() - 1].1;

    Some(ProjectionResult {
        change_estimate: round2(change_estimate),
        timeframe_days: horizon_days,
        confidence_percent: confidence(sorted.len()),
        weekly_rate: round2(weekly_rate),
        projected_value: round2(latest + change_estimate),
    })
}

/// Data-volume heuristic: grows with the sample count, bounded to 50-95%.
pub fn confidence(sample_count: usize) -> f64 {
    (CONFIDENCE_FLOOR + 2.0 * sample_count as f64).clamp(CONFIDENCE_FLOOR, CONFIDENCE_CAP)
}

pub fn project_entries(entries: &[MetricEntry], settings: &ProjectionSettings) -> Option<ProjectionResult> {
    let points: Vec<(NaiveDate, f64)> = entries.iter().map(MetricEntry::point).collect();
    project(&points, settings.horizon_days, settings.min_entries)
}

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::config::TrendSettings;
use crate::models::metric::MetricEntry;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Stable,
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Up => write!(f, "up"),
            Self::Down => write!(f, "down"),
            Self::Stable => write!(f, "stable"),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TrendResult {
    pub direction: Direction,
    pub recent_window_avg: Option<f64>,
    pub prior_window_avg: Option<f64>,
}

impl TrendResult {
    fn stable(recent_window_avg: Option<f64>, prior_window_avg: Option<f64>) -> Self {
        Self {
            direction: Direction::Stable,
            recent_window_avg,
            prior_window_avg,
        }
    }
}

/// Compare the mean of the newest `window` points against the mean of the
/// `window` points before them.
///
/// Input order does not matter; points are sorted newest first here. With no
/// prior window the result is stable.
pub fn classify(points: &[(NaiveDate, f64)], window: usize, threshold: f64) -> TrendResult {
    let window = window.max(1);
    let mut sorted: Vec<(NaiveDate, f64)> = points.to_vec();
    sorted.sort_by(|a, b| b.0.cmp(&a.0));

    let values: Vec<f64> = sorted.iter().map(|(_, v)| *v).collect();
    let recent = &values[..values.len().min(window)];
    let prior = &values[recent.len()..values.len().min(window * 2)];

    let recent_avg = mean(recent);
    let prior_avg = mean(prior);

    let (Some(r), Some(p)) = (recent_avg, prior_avg) else {
        return TrendResult::stable(recent_avg.map(round2), prior_avg.map(round2));
    };

    let direction = if (r - p).abs() < threshold {
        Direction::Stable
    } else if r > p {
        Direction::Up
    } else {
        Direction::Down
    };

    TrendResult {
        direction,
        recent_window_avg: Some(round2(r)),
        prior_window_avg: Some(round2(p)),
    }
}

/// Classify a metric history with the configured window and threshold.
pub fn classify_entries(entries: &[MetricEntry], settings: &TrendSettings) -> TrendResult {
    let points: Vec<(NaiveDate, f64)> = entries.iter().map(MetricEntry::point).collect();
    classify(&points, settings.window_size, settings.stable_threshold)
}

pub(crate) fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

pub(crate) fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

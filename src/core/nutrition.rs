use chrono::{Duration, NaiveDate, Utc};
use serde::Serialize;

use crate::core::logging::{validate_client_id, validate_date, validate_window};
use crate::core::trend::{self, TrendResult, round2};
use crate::db::Database;
use crate::error::{Result, validation};
use crate::models::config::Config;
use crate::models::nutrition::{NutritionDayLog, NutritionInput, NutritionTargets};

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Period {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub total_days: u32,
}

impl Period {
    /// The `window_days` calendar days ending on `today`.
    pub fn ending(today: NaiveDate, window_days: u32) -> Self {
        let days = window_days.max(1);
        Self {
            start: today - Duration::days(days as i64 - 1),
            end: today,
            total_days: days,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct NutritionAverages {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub compliance_score: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct NutritionSummary {
    pub period: Period,
    pub logged_days: u32,
    /// `None` when nothing was logged in the period.
    pub averages: Option<NutritionAverages>,
    /// Percentage of period days with a log.
    pub adherence_rate: f64,
    /// Percentage of logged days whose calories fall inside the target band.
    pub target_hit_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calorie_target: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protein_target: Option<f64>,
    pub trend: TrendResult,
}

/// Acceptable calorie range around a target, as a percentage either side.
#[derive(Debug, Clone, Copy)]
pub struct CalorieBand {
    pub target: f64,
    pub band_pct: f64,
}

impl CalorieBand {
    pub fn contains(&self, calories: f64) -> bool {
        (calories - self.target).abs() <= self.target * self.band_pct / 100.0
    }
}

/// Aggregate day logs over `period`.
///
/// Averages divide by logged days only. Logs outside the period are ignored;
/// when a date appears twice the most recently updated log wins.
pub fn summarize(
    logs: &[NutritionDayLog],
    period: Period,
    targets: Option<&NutritionTargets>,
    band_pct: f64,
    trend_window: usize,
    trend_threshold: f64,
) -> NutritionSummary {
    let mut days: Vec<&NutritionDayLog> = logs.iter().filter(|l| period.contains(l.date)).collect();
    days.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| b.updated_at.cmp(&a.updated_at)));
    days.dedup_by_key(|l| l.date);

    let logged_days = days.len() as u32;
    let averages = if days.is_empty() {
        None
    } else {
        let n = days.len() as f64;
        let sum = |f: fn(&NutritionDayLog) -> f64| days.iter().map(|l| f(*l)).sum::<f64>() / n;
        Some(NutritionAverages {
            calories: round2(sum(|l| l.totals.calories)),
            protein: round2(sum(|l| l.totals.protein)),
            carbs: round2(sum(|l| l.totals.carbs)),
            fat: round2(sum(|l| l.totals.fat)),
            compliance_score: round2(sum(|l| l.compliance_score as f64)),
        })
    };

    let adherence_rate = round1(logged_days as f64 / period.total_days as f64 * 100.0);

    let band = targets.map(|t| CalorieBand {
        target: t.calories,
        band_pct,
    });
    let target_hit_rate = match band {
        Some(b) if logged_days > 0 => {
            let hits = days.iter().filter(|l| b.contains(l.totals.calories)).count();
            Some(round1(hits as f64 / logged_days as f64 * 100.0))
        }
        _ => None,
    };

    let points: Vec<(NaiveDate, f64)> = days.iter().map(|l| (l.date, l.totals.calories)).collect();
    let trend = trend::classify(&points, trend_window, trend_threshold);

    NutritionSummary {
        period,
        logged_days,
        averages,
        adherence_rate,
        target_hit_rate,
        calorie_target: targets.map(|t| t.calories),
        protein_target: targets.and_then(|t| t.protein),
        trend,
    }
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

fn validate_input(input: &NutritionInput) -> Result<()> {
    if input.compliance_score > 100 {
        return Err(validation(format!(
            "compliance score must be 0-100, got {}",
            input.compliance_score
        )));
    }
    let t = &input.totals;
    for (name, v) in [
        ("calories", t.calories),
        ("protein", t.protein),
        ("carbs", t.carbs),
        ("fat", t.fat),
    ] {
        if !v.is_finite() || v < 0.0 {
            return Err(validation(format!("{} must be a non-negative number, got {}", name, v)));
        }
    }
    Ok(())
}

/// Validate and upsert the day's nutrition totals.
pub fn log_nutrition(
    db: &Database,
    client_id: &str,
    input: &NutritionInput,
    today: NaiveDate,
) -> Result<NutritionDayLog> {
    validate_client_id(client_id)?;
    validate_input(input)?;
    let date = input.date.unwrap_or(today);
    validate_date(date, today)?;

    let mut log = NutritionDayLog::new(client_id.to_string(), date, input.totals, input.compliance_score);
    log.meals_completed = input.meals_completed.clone();
    let stored = db.upsert_nutrition_log(&log)?;
    tracing::info!(client = client_id, date = %date, calories = stored.totals.calories, "nutrition saved");
    Ok(stored)
}

pub fn set_targets(
    db: &Database,
    client_id: &str,
    calories: f64,
    protein: Option<f64>,
    carbs: Option<f64>,
    fat: Option<f64>,
) -> Result<NutritionTargets> {
    validate_client_id(client_id)?;
    if !calories.is_finite() || calories <= 0.0 {
        return Err(validation(format!("calorie target must be positive, got {}", calories)));
    }
    for v in [protein, carbs, fat].into_iter().flatten() {
        if !v.is_finite() || v < 0.0 {
            return Err(validation(format!("macro target must be non-negative, got {}", v)));
        }
    }
    let targets = NutritionTargets {
        client_id: client_id.to_string(),
        calories,
        protein,
        carbs,
        fat,
        updated_at: Utc::now(),
    };
    db.upsert_nutrition_targets(&targets)?;
    tracing::info!(client = client_id, calories, "nutrition targets set");
    Ok(targets)
}

/// Read the period's logs and targets and aggregate them.
pub fn summary(
    db: &Database,
    config: &Config,
    client_id: &str,
    window_days: u32,
    today: NaiveDate,
) -> Result<NutritionSummary> {
    validate_client_id(client_id)?;
    validate_window(window_days)?;
    let period = Period::ending(today, window_days);
    let logs = db.query_nutrition_logs(client_id, period.start, period.end)?;
    let targets = db.get_nutrition_targets(client_id)?;
    tracing::debug!(client = client_id, window_days, logs = logs.len(), "nutrition summary");
    Ok(summarize(
        &logs,
        period,
        targets.as_ref(),
        config.nutrition.target_band_pct,
        config.trend.window_size,
        config.nutrition.calorie_trend_threshold,
    ))
}

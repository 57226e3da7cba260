//! The progress analytics service.
//!
//! An [`Engine`] owns its store handle, configuration and event hub; callers
//! construct one and pass it where it is needed. Reads are pure computations
//! over a single store read. Writes publish an [`Event`] after they commit.

use chrono::{Duration, Local, NaiveDate};

use crate::core::insights::{self, InsightContext, RULES};
use crate::core::logging;
use crate::core::nutrition::{self, NutritionSummary};
use crate::core::stats::{self, ProgressStats};
use crate::core::streak::{self, StreakState};
use crate::db::Database;
use crate::error::Result;
use crate::events::{Event, EventHub, PublishReport, Subscription, Topic};
use crate::models::config::Config;
use crate::models::insight::Insight;
use crate::models::metric::{CurrentSnapshot, MetricEntry, MetricInput};
use crate::models::nutrition::{NutritionDayLog, NutritionInput, NutritionTargets};
use crate::models::workout::WorkoutCompletion;

/// Details of a workout to record.
#[derive(Debug, Clone, Default)]
pub struct WorkoutInput<'a> {
    pub name: &'a str,
    pub date: Option<NaiveDate>,
    pub duration_minutes: Option<u32>,
    pub notes: Option<&'a str>,
}

pub struct Engine {
    db: Database,
    config: Config,
    hub: EventHub,
    as_of: Option<NaiveDate>,
}

impl Engine {
    pub fn new(db: Database, config: Config) -> Self {
        Self {
            db,
            config,
            hub: EventHub::new(),
            as_of: None,
        }
    }

    /// Share an existing hub instead of the engine's own.
    pub fn with_hub(mut self, hub: EventHub) -> Self {
        self.hub = hub;
        self
    }

    /// Evaluate "today" as `date` instead of the local calendar date.
    pub fn as_of(mut self, date: NaiveDate) -> Self {
        self.as_of = Some(date);
        self
    }

    pub fn today(&self) -> NaiveDate {
        self.as_of.unwrap_or_else(|| Local::now().date_naive())
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    pub fn hub(&self) -> &EventHub {
        &self.hub
    }

    pub fn subscribe<F>(&self, topic: Topic, handler: F) -> Subscription
    where
        F: Fn(&Event) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.hub.subscribe(topic, handler)
    }

    fn publish(&self, event: Event) -> PublishReport {
        self.hub.publish(&event)
    }

    // ── metrics ──────────────────────────────────────────────────────────────

    pub fn save_metric(&self, client_id: &str, input: &MetricInput) -> Result<MetricEntry> {
        let entry = logging::log_metric(&self.db, &self.config, client_id, input, self.today())?;
        self.publish(Event::MetricSaved(entry.clone()));
        Ok(entry)
    }

    pub fn log_batch(&self, client_id: &str, batch_json: &str) -> Result<Vec<MetricEntry>> {
        let entries = logging::log_batch(&self.db, &self.config, client_id, batch_json, self.today())?;
        for e in &entries {
            self.publish(Event::MetricSaved(e.clone()));
        }
        Ok(entries)
    }

    pub fn get_history(&self, client_id: &str, window_days: u32) -> Result<Vec<MetricEntry>> {
        logging::read_history(&self.db, client_id, window_days, self.today())
    }

    pub fn current_snapshot(&self, client_id: &str) -> Result<Option<CurrentSnapshot>> {
        logging::validate_client_id(client_id)?;
        self.db.get_snapshot(client_id)
    }

    pub fn get_stats(&self, client_id: &str) -> Result<ProgressStats> {
        stats::compute(&self.db, &self.config, client_id, self.today())
    }

    // ── workouts & streaks ───────────────────────────────────────────────────

    /// Record a workout, then publish it with the updated streak, plus a
    /// milestone event when the streak crosses one.
    pub fn log_workout(&self, client_id: &str, input: &WorkoutInput<'_>) -> Result<WorkoutCompletion> {
        let before = self.get_streak(client_id)?;
        let workout = logging::log_workout(
            &self.db,
            client_id,
            input.name,
            input.date,
            input.duration_minutes,
            input.notes,
            self.today(),
        )?;
        let after = self.get_streak(client_id)?;

        self.publish(Event::WorkoutLogged {
            workout: workout.clone(),
            streak: after,
        });
        if let Some(days) =
            streak::milestone_reached(before.current, after.current, &self.config.streak.milestones)
        {
            tracing::info!(client = client_id, days, "streak milestone reached");
            self.publish(Event::StreakMilestone {
                client_id: client_id.to_string(),
                days,
            });
        }
        Ok(workout)
    }

    /// Workouts in the last `window_days` days, newest first.
    pub fn get_workouts(&self, client_id: &str, window_days: u32) -> Result<Vec<WorkoutCompletion>> {
        logging::validate_client_id(client_id)?;
        logging::validate_window(window_days)?;
        let today = self.today();
        self.db
            .list_workouts(client_id, today - Duration::days(window_days as i64), today)
    }

    pub fn get_streak(&self, client_id: &str) -> Result<StreakState> {
        streak::for_client(&self.db, &self.config.streak, client_id, self.today())
    }

    // ── nutrition ────────────────────────────────────────────────────────────

    pub fn save_nutrition(&self, client_id: &str, input: &NutritionInput) -> Result<NutritionDayLog> {
        let log = nutrition::log_nutrition(&self.db, client_id, input, self.today())?;
        self.publish(Event::NutritionLogged(log.clone()));
        Ok(log)
    }

    pub fn set_nutrition_targets(
        &self,
        client_id: &str,
        calories: f64,
        protein: Option<f64>,
        carbs: Option<f64>,
        fat: Option<f64>,
    ) -> Result<NutritionTargets> {
        nutrition::set_targets(&self.db, client_id, calories, protein, carbs, fat)
    }

    pub fn nutrition_targets(&self, client_id: &str) -> Result<Option<NutritionTargets>> {
        logging::validate_client_id(client_id)?;
        self.db.get_nutrition_targets(client_id)
    }

    pub fn get_nutrition_summary(&self, client_id: &str, window_days: u32) -> Result<NutritionSummary> {
        nutrition::summary(&self.db, &self.config, client_id, window_days, self.today())
    }

    // ── insights ─────────────────────────────────────────────────────────────

    /// All matching insights over the default nutrition window and the current
    /// streak, capped to `insights.max_displayed`.
    pub fn get_insights(&self, client_id: &str) -> Result<Vec<Insight>> {
        let summary = self.get_nutrition_summary(client_id, self.config.nutrition.default_window_days)?;
        let streak = self.get_streak(client_id)?;
        let ctx = InsightContext {
            nutrition: &summary,
            streak,
        };
        let all = insights::evaluate(&ctx, RULES);
        tracing::debug!(client = client_id, matched = all.len(), "insights evaluated");
        Ok(insights::cap(all, self.config.insights.max_displayed))
    }
}

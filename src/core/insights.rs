//! Rule-table insight generation.
//!
//! Each [`InsightRule`] pairs a [`Condition`] with a title, severity and a
//! message template. [`evaluate`] checks every rule independently and returns
//! all that match, in table order. Adding a rule means adding a row to
//! [`RULES`]; the evaluator never changes.

use crate::core::nutrition::NutritionSummary;
use crate::core::streak::StreakState;
use crate::core::trend::Direction;
use crate::models::insight::{Insight, Severity};

/// Facts the rules are evaluated against.
#[derive(Debug, Clone)]
pub struct InsightContext<'a> {
    pub nutrition: &'a NutritionSummary,
    pub streak: StreakState,
}

#[derive(Debug, Clone, Copy)]
pub enum Condition {
    AdherenceBelow(f64),
    AdherenceAtLeast(f64),
    /// `lo <= adherence < hi`
    AdherenceBetween(f64, f64),
    TargetHitAtLeast(f64),
    TargetHitBelow(f64),
    /// Average protein below this percentage of the protein target.
    ProteinBelowTargetPct(f64),
    CalorieTrend(Direction),
    AvgCaloriesAboveTarget,
    StreakAtLeast(u32),
    /// No current streak, but there has been one before.
    StreakLost,
    All(&'static [Condition]),
}

impl Condition {
    pub fn holds(&self, ctx: &InsightContext<'_>) -> bool {
        let n = ctx.nutrition;
        match *self {
            Self::AdherenceBelow(v) => n.adherence_rate < v,
            Self::AdherenceAtLeast(v) => n.adherence_rate >= v,
            Self::AdherenceBetween(lo, hi) => n.adherence_rate >= lo && n.adherence_rate < hi,
            Self::TargetHitAtLeast(v) => n.target_hit_rate.is_some_and(|r| r >= v),
            Self::TargetHitBelow(v) => n.target_hit_rate.is_some_and(|r| r < v),
            Self::ProteinBelowTargetPct(pct) => match (n.averages, n.protein_target) {
                (Some(avg), Some(target)) if target > 0.0 => avg.protein < target * pct / 100.0,
                _ => false,
            },
            Self::CalorieTrend(d) => n.trend.direction == d,
            Self::AvgCaloriesAboveTarget => match (n.averages, n.calorie_target) {
                (Some(avg), Some(target)) => avg.calories > target,
                _ => false,
            },
            Self::StreakAtLeast(days) => ctx.streak.current >= days,
            Self::StreakLost => ctx.streak.current == 0 && ctx.streak.longest > 0,
            Self::All(conditions) => conditions.iter().all(|c| c.holds(ctx)),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct InsightRule {
    pub id: &'static str,
    pub condition: Condition,
    pub severity: Severity,
    pub title: &'static str,
    /// Placeholders: `{adherence}`, `{logged_days}`, `{total_days}`,
    /// `{target_hit}`, `{avg_calories}`, `{calorie_target}`, `{avg_protein}`,
    /// `{protein_target}`, `{streak}`, `{longest}`.
    pub template: &'static str,
}

pub static RULES: &[InsightRule] = &[
    InsightRule {
        id: "tracking_needed",
        condition: Condition::AdherenceBelow(50.0),
        severity: Severity::Warning,
        title: "More tracking needed",
        template: "Only {logged_days} of the last {total_days} days were logged ({adherence}%). Consistent logging makes every other number more reliable.",
    },
    InsightRule {
        id: "building_habit",
        condition: Condition::AdherenceBetween(50.0, 80.0),
        severity: Severity::Tip,
        title: "Building the habit",
        template: "Nutrition was logged on {adherence}% of days. A few more logged days will push this into excellent territory.",
    },
    InsightRule {
        id: "excellent_consistency",
        condition: Condition::AdherenceAtLeast(80.0),
        severity: Severity::Success,
        title: "Excellent consistency",
        template: "Nutrition was logged on {adherence}% of days. Keep it up.",
    },
    InsightRule {
        id: "on_target",
        condition: Condition::TargetHitAtLeast(70.0),
        severity: Severity::Success,
        title: "Calories on target",
        template: "{target_hit}% of logged days landed within range of the {calorie_target} kcal target.",
    },
    InsightRule {
        id: "off_target",
        condition: Condition::TargetHitBelow(40.0),
        severity: Severity::Warning,
        title: "Calories off target",
        template: "Only {target_hit}% of logged days were near the {calorie_target} kcal target (average {avg_calories} kcal).",
    },
    InsightRule {
        id: "protein_low",
        condition: Condition::ProteinBelowTargetPct(80.0),
        severity: Severity::Tip,
        title: "Protein boost",
        template: "Average protein is {avg_protein} g against a {protein_target} g target. Add a protein source to each meal.",
    },
    InsightRule {
        id: "calories_rising",
        condition: Condition::All(&[
            Condition::CalorieTrend(Direction::Up),
            Condition::AvgCaloriesAboveTarget,
        ]),
        severity: Severity::Tip,
        title: "Calories creeping up",
        template: "Recent calorie intake is trending up and averages {avg_calories} kcal, above the {calorie_target} kcal target.",
    },
    InsightRule {
        id: "streak_strong",
        condition: Condition::StreakAtLeast(7),
        severity: Severity::Success,
        title: "Workout streak",
        template: "{streak} days in a row with a completed workout.",
    },
    InsightRule {
        id: "streak_restart",
        condition: Condition::StreakLost,
        severity: Severity::Tip,
        title: "Restart the streak",
        template: "The workout streak has lapsed. The best run so far is {longest} days; one session today starts a new one.",
    },
];

/// Evaluate every rule and return all matches in rule order.
pub fn evaluate(ctx: &InsightContext<'_>, rules: &[InsightRule]) -> Vec<Insight> {
    rules
        .iter()
        .filter(|r| r.condition.holds(ctx))
        .map(|r| Insight {
            id: r.id,
            title: r.title.to_string(),
            message: render(r.template, ctx),
            severity: r.severity,
        })
        .collect()
}

/// Truncate to `max` insights; 0 keeps all.
pub fn cap(mut insights: Vec<Insight>, max: usize) -> Vec<Insight> {
    if max > 0 {
        insights.truncate(max);
    }
    insights
}

fn render(template: &str, ctx: &InsightContext<'_>) -> String {
    let n = ctx.nutrition;
    let fmt = |v: Option<f64>| v.map(|x| format!("{}", x)).unwrap_or_else(|| "n/a".to_string());
    let values = [
        ("{adherence}", fmt(Some(n.adherence_rate))),
        ("{logged_days}", n.logged_days.to_string()),
        ("{total_days}", n.period.total_days.to_string()),
        ("{target_hit}", fmt(n.target_hit_rate)),
        ("{avg_calories}", fmt(n.averages.map(|a| a.calories.round()))),
        ("{calorie_target}", fmt(n.calorie_target.map(f64::round))),
        ("{avg_protein}", fmt(n.averages.map(|a| a.protein.round()))),
        ("{protein_target}", fmt(n.protein_target.map(f64::round))),
        ("{streak}", ctx.streak.current.to_string()),
        ("{longest}", ctx.streak.longest.to_string()),
    ];
    let mut out = template.to_string();
    for (key, value) in &values {
        if out.contains(key) {
            out = out.replace(key, value);
        }
    }
    out
}

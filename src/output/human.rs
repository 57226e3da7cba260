use colored::Colorize;
use comfy_table::{Table, presets::UTF8_FULL};

use crate::core::nutrition::NutritionSummary;
use crate::core::stats::ProgressStats;
use crate::core::streak::StreakState;
use crate::models::insight::{Insight, Severity};
use crate::models::metric::MetricEntry;
use crate::models::nutrition::NutritionDayLog;
use crate::models::workout::WorkoutCompletion;

/// Pretty-print a single metric entry.
pub fn format_entry(e: &MetricEntry) -> String {
    let mut line = format!("{} | {} ({})", e.date, e.value, e.time_of_day);
    if let Some(f) = e.feeling {
        line.push_str(&format!("  feeling: {}", f));
    }
    if let Some(ref notes) = e.notes {
        line.push_str(&format!("  # {}", notes));
    }
    line
}

pub fn history_table(entries: &[MetricEntry]) -> String {
    if entries.is_empty() {
        return "No entries in this window.".to_string();
    }
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Date", "Value", "Time", "Feeling", "Notes"]);
    for e in entries {
        table.add_row(vec![
            e.date.to_string(),
            format!("{:.1}", e.value),
            e.time_of_day.to_string(),
            e.feeling.map(|f| f.to_string()).unwrap_or_default(),
            e.notes.clone().unwrap_or_default(),
        ]);
    }
    table.to_string()
}

fn signed(v: Option<f64>) -> String {
    v.map(|x| format!("{:+.1}", x)).unwrap_or_else(|| "n/a".to_string())
}

pub fn format_stats(s: &ProgressStats) -> String {
    let mut out = match &s.current {
        Some(c) => format!("Current: {:.1} (as of {})\n", c.latest_value, c.latest_date),
        None => "Current: no entries yet\n".to_string(),
    };
    out.push_str(&format!("Week change:  {}\n", signed(s.week_change)));
    out.push_str(&format!("Month change: {}\n", signed(s.month_change)));
    out.push_str(&format!("Trend: {}", s.trend.direction));
    if let (Some(r), Some(p)) = (s.trend.recent_window_avg, s.trend.prior_window_avg) {
        out.push_str(&format!(" (recent avg {:.1} vs prior {:.1})", r, p));
    }
    match &s.prediction {
        Some(p) => out.push_str(&format!(
            "\n{}-day projection: {:+.1} -> {:.1} ({:.0}% confidence)",
            p.timeframe_days, p.change_estimate, p.projected_value, p.confidence_percent
        )),
        None => out.push_str("\nProjection: not enough data yet"),
    }
    out
}

pub fn format_streak(s: &StreakState) -> String {
    format!(
        "Current streak: {} day(s) | Longest: {} day(s)",
        s.current, s.longest
    )
}

pub fn format_workout(w: &WorkoutCompletion) -> String {
    let mut line = format!("{} | {}", w.date, w.workout_name);
    if let Some(d) = w.duration_minutes {
        line.push_str(&format!(" ({} min)", d));
    }
    line
}

pub fn format_nutrition_log(l: &NutritionDayLog) -> String {
    format!(
        "{} | {:.0} kcal  P {:.0}g  C {:.0}g  F {:.0}g  compliance {}%",
        l.date, l.totals.calories, l.totals.protein, l.totals.carbs, l.totals.fat, l.compliance_score
    )
}

pub fn format_nutrition_summary(s: &NutritionSummary) -> String {
    let mut out = format!(
        "Nutrition {} to {}: {} of {} days logged ({}% adherence)\n",
        s.period.start, s.period.end, s.logged_days, s.period.total_days, s.adherence_rate
    );
    match s.averages {
        Some(a) => out.push_str(&format!(
            "Averages: {:.0} kcal  P {:.0}g  C {:.0}g  F {:.0}g  compliance {:.0}%\n",
            a.calories, a.protein, a.carbs, a.fat, a.compliance_score
        )),
        None => out.push_str("Averages: no logs in this period\n"),
    }
    match (s.target_hit_rate, s.calorie_target) {
        (Some(r), Some(t)) => out.push_str(&format!("Target hit rate: {}% (target {:.0} kcal)\n", r, t)),
        _ => out.push_str("Target hit rate: no target set\n"),
    }
    out.push_str(&format!("Calorie trend: {}", s.trend.direction));
    out
}

pub fn format_insights(insights: &[Insight]) -> String {
    if insights.is_empty() {
        return "No insights right now.".to_string();
    }
    insights
        .iter()
        .map(|i| {
            let tag = match i.severity {
                Severity::Success => "[success]".green(),
                Severity::Warning => "[warning]".yellow(),
                Severity::Tip => "[tip]".cyan(),
            };
            format!("{} {}\n    {}", tag, i.title.bold(), i.message)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

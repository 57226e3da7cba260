mod common;

use coachvital::Error;
use coachvital::core::nutrition::{CalorieBand, Period, summarize};
use coachvital::core::trend::Direction;
use coachvital::models::nutrition::{MacroTotals, NutritionDayLog};

use common::{days_ago, nutrition, today};

fn day_log(calories: f64, ago: i64) -> NutritionDayLog {
    NutritionDayLog::new(
        "c1".into(),
        days_ago(ago),
        MacroTotals {
            calories,
            protein: 100.0,
            carbs: 200.0,
            fat: 70.0,
        },
        90,
    )
}

/// Scenario: three logged days in a ten-day period
///   Then averages cover the logged days only
///   And adherence is 3 / 10
#[test]
fn test_summary_averages_over_logged_days() {
    let (_dir, engine) = common::setup_engine();
    for (cal, ago) in [(2000.0, 0), (2200.0, 3), (1800.0, 6)] {
        engine.save_nutrition("c1", &nutrition(cal, days_ago(ago))).unwrap();
    }

    let s = engine.get_nutrition_summary("c1", 10).unwrap();
    assert_eq!(s.logged_days, 3);
    assert_eq!(s.period.total_days, 10);
    assert_eq!(s.period.start, days_ago(9));
    assert_eq!(s.period.end, today());

    let avg = s.averages.unwrap();
    assert!((avg.calories - 2000.0).abs() < 0.01);
    assert!((avg.protein - 120.0).abs() < 0.01);
    assert!((avg.compliance_score - 80.0).abs() < 0.01);
    assert!((s.adherence_rate - 30.0).abs() < 0.01);
}

#[test]
fn test_target_hit_rate_uses_band() {
    let (_dir, engine) = common::setup_engine();
    engine.set_nutrition_targets("c1", 2000.0, Some(150.0), None, None).unwrap();
    for (cal, ago) in [(2000.0, 0), (2150.0, 1), (1700.0, 2)] {
        engine.save_nutrition("c1", &nutrition(cal, days_ago(ago))).unwrap();
    }

    let s = engine.get_nutrition_summary("c1", 7).unwrap();
    assert_eq!(s.calorie_target, Some(2000.0));
    assert_eq!(s.protein_target, Some(150.0));
    assert_eq!(s.target_hit_rate, Some(66.7));
}

#[test]
fn test_no_target_means_no_hit_rate() {
    let (_dir, engine) = common::setup_engine();
    engine.save_nutrition("c1", &nutrition(2000.0, today())).unwrap();
    let s = engine.get_nutrition_summary("c1", 7).unwrap();
    assert_eq!(s.target_hit_rate, None);
    assert_eq!(s.calorie_target, None);
}

#[test]
fn test_empty_period() {
    let (_dir, engine) = common::setup_engine();
    let s = engine.get_nutrition_summary("c1", 14).unwrap();
    assert_eq!(s.logged_days, 0);
    assert!(s.averages.is_none());
    assert_eq!(s.adherence_rate, 0.0);
    assert_eq!(s.trend.direction, Direction::Stable);
}

#[test]
fn test_logs_outside_period_ignored() {
    let logs = vec![day_log(2000.0, 0), day_log(9000.0, 20)];
    let s = summarize(&logs, Period::ending(today(), 7), None, 10.0, 7, 50.0);
    assert_eq!(s.logged_days, 1);
    assert!((s.averages.unwrap().calories - 2000.0).abs() < 0.01);
}

#[test]
fn test_duplicate_day_counts_once() {
    let mut stale = day_log(1500.0, 1);
    stale.updated_at -= chrono::Duration::hours(3);
    let fresh = day_log(2500.0, 1);
    let s = summarize(&[stale, fresh], Period::ending(today(), 7), None, 10.0, 7, 50.0);
    assert_eq!(s.logged_days, 1);
    assert!((s.averages.unwrap().calories - 2500.0).abs() < 0.01);
}

#[test]
fn test_calorie_trend_up() {
    let mut logs: Vec<_> = (0..7).map(|ago| day_log(2400.0, ago)).collect();
    logs.extend((7..14).map(|ago| day_log(2000.0, ago)));
    let s = summarize(&logs, Period::ending(today(), 14), None, 10.0, 7, 50.0);
    assert_eq!(s.trend.direction, Direction::Up);
    assert_eq!(s.adherence_rate, 100.0);
}

#[test]
fn test_calorie_band() {
    let band = CalorieBand {
        target: 2000.0,
        band_pct: 10.0,
    };
    assert!(band.contains(1850.0));
    assert!(band.contains(2150.0));
    assert!(!band.contains(2300.0));
    assert!(!band.contains(1700.0));
}

#[test]
fn test_relog_same_day_updates() {
    let (_dir, engine) = common::setup_engine();
    engine.save_nutrition("c1", &nutrition(1800.0, today())).unwrap();
    let updated = engine.save_nutrition("c1", &nutrition(2100.0, today())).unwrap();
    assert!((updated.totals.calories - 2100.0).abs() < f64::EPSILON);

    let logs = engine
        .database()
        .query_nutrition_logs("c1", today(), today())
        .unwrap();
    assert_eq!(logs.len(), 1);
    assert!((logs[0].totals.calories - 2100.0).abs() < f64::EPSILON);
}

#[test]
fn test_rejects_bad_nutrition_input() {
    let (_dir, engine) = common::setup_engine();

    let mut over = nutrition(2000.0, today());
    over.compliance_score = 101;
    assert!(matches!(engine.save_nutrition("c1", &over), Err(Error::Validation(_))));

    let mut negative = nutrition(2000.0, today());
    negative.totals.fat = -1.0;
    assert!(matches!(engine.save_nutrition("c1", &negative), Err(Error::Validation(_))));

    let future = nutrition(2000.0, today() + chrono::Duration::days(1));
    assert!(matches!(engine.save_nutrition("c1", &future), Err(Error::Validation(_))));

    assert!(matches!(
        engine.set_nutrition_targets("c1", 0.0, None, None, None),
        Err(Error::Validation(_))
    ));
}

#[test]
fn test_targets_round_trip_through_store() {
    let (_dir, engine) = common::setup_engine();
    assert!(engine.nutrition_targets("c1").unwrap().is_none());
    engine.set_nutrition_targets("c1", 2200.0, Some(160.0), Some(220.0), Some(70.0)).unwrap();
    engine.set_nutrition_targets("c1", 2100.0, Some(160.0), None, None).unwrap();

    let t = engine.nutrition_targets("c1").unwrap().unwrap();
    assert_eq!(t.calories, 2100.0);
    assert_eq!(t.carbs, None);
}

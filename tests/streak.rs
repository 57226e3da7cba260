mod common;

use chrono::Duration;
use coachvital::WorkoutInput;
use coachvital::core::streak::{compute, current_streak, longest_run, milestone_reached};

use common::{days_ago, today};

/// Scenario: three consecutive days ending today
///   Then the current streak is 3
#[test]
fn test_three_consecutive_days() {
    let dates = [today(), days_ago(1), days_ago(2)];
    assert_eq!(current_streak(&dates, today()), 3);
}

/// Scenario: today and two days ago, nothing yesterday
///   Then the gap breaks the streak at 1
#[test]
fn test_gap_breaks_streak() {
    let dates = [today(), days_ago(2)];
    assert_eq!(current_streak(&dates, today()), 1);
}

/// Scenario: no workout yet today, but yesterday and the day before
///   Then today is still pending and the streak is 2
#[test]
fn test_today_pending_keeps_streak() {
    let dates = [days_ago(1), days_ago(2)];
    assert_eq!(current_streak(&dates, today()), 2);
}

#[test]
fn test_two_idle_days_reset_streak() {
    let dates = [days_ago(2), days_ago(3), days_ago(4)];
    assert_eq!(current_streak(&dates, today()), 0);
}

#[test]
fn test_same_day_duplicates_skipped() {
    let dates = [today(), today(), days_ago(1), days_ago(1), days_ago(1), days_ago(2)];
    assert_eq!(current_streak(&dates, today()), 3);
}

#[test]
fn test_future_dates_ignored() {
    let tomorrow = today() + Duration::days(1);
    let dates = [tomorrow, today(), days_ago(1)];
    assert_eq!(current_streak(&dates, today()), 2);
}

#[test]
fn test_unsorted_input() {
    let dates = [days_ago(2), today(), days_ago(1)];
    assert_eq!(current_streak(&dates, today()), 3);
}

#[test]
fn test_empty_streak() {
    assert_eq!(current_streak(&[], today()), 0);
    assert_eq!(longest_run(&[]), 0);
}

#[test]
fn test_longest_run_finds_best_block() {
    let mut dates: Vec<_> = (20..25).map(days_ago).collect(); // 5-day run
    dates.extend((10..13).map(days_ago)); // 3-day run
    dates.push(today());
    assert_eq!(longest_run(&dates), 5);
}

#[test]
fn test_longest_never_below_current() {
    let recent = [today(), days_ago(1), days_ago(2)];
    let state = compute(&recent, &[], today());
    assert_eq!(state.current, 3);
    assert_eq!(state.longest, 3);
}

#[test]
fn test_milestones() {
    let milestones = [3, 7, 14];
    assert_eq!(milestone_reached(2, 3, &milestones), Some(3));
    assert_eq!(milestone_reached(3, 4, &milestones), None);
    assert_eq!(milestone_reached(6, 7, &milestones), Some(7));
    assert_eq!(milestone_reached(0, 0, &milestones), None);
}

#[test]
fn test_engine_streak_from_workouts() {
    let (_dir, engine) = common::setup_engine();
    for (ago, name) in [(0, "legs"), (0, "cardio"), (1, "push"), (2, "pull"), (5, "legs"), (6, "push")] {
        engine
            .log_workout(
                "c1",
                &WorkoutInput {
                    name,
                    date: Some(days_ago(ago)),
                    ..Default::default()
                },
            )
            .unwrap();
    }

    let streak = engine.get_streak("c1").unwrap();
    assert_eq!(streak.current, 3);
    assert_eq!(streak.longest, 3);
}

#[test]
fn test_engine_longest_uses_lookback() {
    let (_dir, engine) = common::setup_engine();
    for ago in 40..50 {
        engine
            .log_workout(
                "c1",
                &WorkoutInput {
                    name: "run",
                    date: Some(days_ago(ago)),
                    ..Default::default()
                },
            )
            .unwrap();
    }
    let streak = engine.get_streak("c1").unwrap();
    assert_eq!(streak.current, 0);
    assert_eq!(streak.longest, 10);
}

#[test]
fn test_engine_rejects_blank_workout_name() {
    let (_dir, engine) = common::setup_engine();
    let err = engine
        .log_workout(
            "c1",
            &WorkoutInput {
                name: "   ",
                ..Default::default()
            },
        )
        .unwrap_err();
    assert!(matches!(err, coachvital::Error::Validation(_)));
}

#[test]
fn test_workout_details_listed_newest_first() {
    let (_dir, engine) = common::setup_engine();
    engine
        .log_workout(
            "c1",
            &WorkoutInput {
                name: "intervals",
                date: Some(days_ago(3)),
                duration_minutes: Some(40),
                notes: Some("hill repeats"),
            },
        )
        .unwrap();
    engine
        .log_workout(
            "c1",
            &WorkoutInput {
                name: "  mobility ",
                ..Default::default()
            },
        )
        .unwrap();

    let workouts = engine.get_workouts("c1", 7).unwrap();
    assert_eq!(workouts.len(), 2);
    assert_eq!(workouts[0].workout_name, "mobility");
    assert_eq!(workouts[0].date, today());
    assert_eq!(workouts[1].duration_minutes, Some(40));
    assert_eq!(workouts[1].notes.as_deref(), Some("hill repeats"));
}

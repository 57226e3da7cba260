mod common;

use chrono::{Duration, Utc};
use coachvital::Error;
use coachvital::core::logging::{dedupe_by_day, log_batch, log_metric, read_history};
use coachvital::models::config::Config;
use coachvital::models::metric::{Feeling, Metadata, MetricEntry, MetricInput, TimeOfDay};

// ── write path ───────────────────────────────────────────────────────────────

#[test]
fn test_log_metric_basic_fields_persisted() {
    let (_dir, db) = common::setup_db();
    let config = Config::default();
    let input = MetricInput {
        value: 82.5,
        date: None,
        metadata: Metadata {
            time_of_day: TimeOfDay::Evening,
            feeling: Some(Feeling::Tired),
            notes: Some("  after travel ".into()),
        },
    };

    let e = log_metric(&db, &config, "client-1", &input, common::today()).unwrap();

    assert_eq!(e.client_id, "client-1");
    assert_eq!(e.date, common::today());
    assert!((e.value - 82.5).abs() < f64::EPSILON);
    assert_eq!(e.time_of_day, TimeOfDay::Evening);
    assert_eq!(e.feeling, Some(Feeling::Tired));
    assert_eq!(e.notes.as_deref(), Some("after travel"));

    let stored = db.get_metric_entry("client-1", common::today()).unwrap().unwrap();
    assert_eq!(stored, e);
}

#[test]
fn test_new_entry_timestamps_match() {
    let (_dir, db) = common::setup_db();
    let e = log_metric(&db, &Config::default(), "c1", &common::metric(80.0, common::today()), common::today())
        .unwrap();
    assert_eq!(e.created_at, e.updated_at);
}

#[test]
fn test_same_day_writes_update_in_place() {
    let (_dir, db) = common::setup_db();
    let config = Config::default();
    let day = common::days_ago(2);

    for v in [80.0, 79.8, 79.6, 79.9] {
        log_metric(&db, &config, "c1", &common::metric(v, day), common::today()).unwrap();
    }

    let rows = db.query_metric_entries("c1", day, day).unwrap();
    assert_eq!(rows.len(), 1);
    assert!((rows[0].value - 79.9).abs() < f64::EPSILON);
}

#[test]
fn test_same_date_different_clients_are_separate() {
    let (_dir, db) = common::setup_db();
    let config = Config::default();
    let today = common::today();
    log_metric(&db, &config, "a", &common::metric(70.0, today), today).unwrap();
    log_metric(&db, &config, "b", &common::metric(90.0, today), today).unwrap();

    assert_eq!(db.query_metric_entries("a", today, today).unwrap().len(), 1);
    assert_eq!(db.query_metric_entries("b", today, today).unwrap().len(), 1);
}

#[test]
fn test_rejects_non_finite_value() {
    let (_dir, db) = common::setup_db();
    let config = Config::default();
    for v in [f64::NAN, f64::INFINITY] {
        let err = log_metric(&db, &config, "c1", &common::metric(v, common::today()), common::today())
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }
    assert!(db.get_snapshot("c1").unwrap().is_none());
}

#[test]
fn test_rejects_implausible_value_before_write() {
    let (_dir, db) = common::setup_db();
    let config = Config::default();
    for v in [0.0, -5.0, 5000.0] {
        let err = log_metric(&db, &config, "c1", &common::metric(v, common::today()), common::today())
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)), "value {v} should be rejected");
    }
    assert!(db
        .query_metric_entries("c1", common::days_ago(30), common::today())
        .unwrap()
        .is_empty());
}

#[test]
fn test_plausible_range_is_configurable() {
    let (_dir, db) = common::setup_db();
    let mut config = Config::default();
    config.set("validation.max_value", "100").unwrap();
    let err = log_metric(&db, &config, "c1", &common::metric(120.0, common::today()), common::today())
        .unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
}

#[test]
fn test_rejects_future_date_and_bad_client() {
    let (_dir, db) = common::setup_db();
    let config = Config::default();
    let tomorrow = common::today() + Duration::days(1);
    let err = log_metric(&db, &config, "c1", &common::metric(80.0, tomorrow), common::today())
        .unwrap_err();
    assert!(matches!(err, Error::Validation(_)));

    for bad in ["", " ", "a b", "'; DROP TABLE metric_entries; --"] {
        let err = log_metric(&db, &config, bad, &common::metric(80.0, common::today()), common::today())
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)), "client id {bad:?} should be rejected");
    }
}

// ── snapshot ─────────────────────────────────────────────────────────────────

#[test]
fn test_snapshot_tracks_latest_write() {
    let (_dir, db) = common::setup_db();
    let config = Config::default();
    let today = common::today();
    log_metric(&db, &config, "c1", &common::metric(81.0, common::days_ago(1)), today).unwrap();
    log_metric(&db, &config, "c1", &common::metric(80.5, today), today).unwrap();

    let snap = db.get_snapshot("c1").unwrap().unwrap();
    assert_eq!(snap.latest_date, today);
    assert!((snap.latest_value - 80.5).abs() < f64::EPSILON);

    // Same-day correction overwrites.
    log_metric(&db, &config, "c1", &common::metric(80.2, today), today).unwrap();
    let snap = db.get_snapshot("c1").unwrap().unwrap();
    assert!((snap.latest_value - 80.2).abs() < f64::EPSILON);
}

#[test]
fn test_backfill_does_not_regress_snapshot() {
    let (_dir, db) = common::setup_db();
    let config = Config::default();
    let today = common::today();
    log_metric(&db, &config, "c1", &common::metric(80.0, today), today).unwrap();
    log_metric(&db, &config, "c1", &common::metric(84.0, common::days_ago(10)), today).unwrap();

    let snap = db.get_snapshot("c1").unwrap().unwrap();
    assert_eq!(snap.latest_date, today);
    assert!((snap.latest_value - 80.0).abs() < f64::EPSILON);
    assert!(db.get_metric_entry("c1", common::days_ago(10)).unwrap().is_some());
}

// ── read path ────────────────────────────────────────────────────────────────

#[test]
fn test_history_descending_and_windowed() {
    let (_dir, db) = common::setup_db();
    let config = Config::default();
    let today = common::today();
    for (ago, v) in [(3, 80.3), (0, 80.0), (12, 81.2), (1, 80.1), (40, 83.0)] {
        log_metric(&db, &config, "c1", &common::metric(v, common::days_ago(ago)), today).unwrap();
    }

    let history = read_history(&db, "c1", 30, today).unwrap();
    let dates: Vec<_> = history.iter().map(|e| e.date).collect();
    assert_eq!(
        dates,
        vec![
            common::days_ago(0),
            common::days_ago(1),
            common::days_ago(3),
            common::days_ago(12)
        ]
    );
}

#[test]
fn test_history_window_includes_boundary_day() {
    let (_dir, db) = common::setup_db();
    let config = Config::default();
    let today = common::today();
    log_metric(&db, &config, "c1", &common::metric(80.0, common::days_ago(7)), today).unwrap();
    log_metric(&db, &config, "c1", &common::metric(80.0, common::days_ago(8)), today).unwrap();

    let history = read_history(&db, "c1", 7, today).unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].date, common::days_ago(7));
}

#[test]
fn test_history_rejects_bad_window() {
    let (_dir, db) = common::setup_db();
    for w in [0, 100_000] {
        let err = read_history(&db, "c1", w, common::today()).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }
}

#[test]
fn test_history_empty_for_unknown_client() {
    let (_dir, db) = common::setup_db();
    let history = read_history(&db, "nobody", 30, common::today()).unwrap();
    assert!(history.is_empty());
}

#[test]
fn test_dedupe_keeps_most_recently_created() {
    let day = common::days_ago(1);
    let mut older = MetricEntry::new("c1".into(), day, 80.0);
    older.created_at = Utc::now() - Duration::hours(5);
    let newer = MetricEntry::new("c1".into(), day, 79.0);
    let other = MetricEntry::new("c1".into(), common::days_ago(2), 81.0);

    let out = dedupe_by_day(vec![other.clone(), older, newer.clone()]);
    assert_eq!(out.len(), 2);
    assert_eq!(out[0].id, newer.id);
    assert_eq!(out[1].id, other.id);
}

// ── batch ────────────────────────────────────────────────────────────────────

#[test]
fn test_log_batch_writes_all() {
    let (_dir, db) = common::setup_db();
    let config = Config::default();
    let json = r#"[
        {"value": 80.4, "date": "2026-03-13"},
        {"value": 80.1, "date": "2026-03-14", "feeling": "good"},
        {"value": 79.9, "time_of_day": "evening", "notes": "post-run"}
    ]"#;

    let entries = log_batch(&db, &config, "c1", json, common::today()).unwrap();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[1].feeling, Some(Feeling::Good));
    assert_eq!(entries[2].date, common::today());
    assert_eq!(entries[2].time_of_day, TimeOfDay::Evening);

    let history = read_history(&db, "c1", 30, common::today()).unwrap();
    assert_eq!(history.len(), 3);
}

#[test]
fn test_log_batch_invalid_entry_writes_nothing() {
    let (_dir, db) = common::setup_db();
    let config = Config::default();
    let json = r#"[{"value": 80.0, "date": "2026-03-13"}, {"value": 9999}]"#;

    let err = log_batch(&db, &config, "c1", json, common::today()).unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
    assert!(err.to_string().contains("batch entry 1"));
    assert!(read_history(&db, "c1", 30, common::today()).unwrap().is_empty());
}

#[test]
fn test_log_batch_same_day_twice_keeps_last() {
    let (_dir, db) = common::setup_db();
    let json = r#"[{"value": 80.0, "date": "2026-03-14"}, {"value": 79.7, "date": "2026-03-14"}]"#;
    let entries = log_batch(&db, &Config::default(), "c1", json, common::today()).unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].id, entries[1].id);

    let history = read_history(&db, "c1", 30, common::today()).unwrap();
    assert_eq!(history.len(), 1);
    assert!((history[0].value - 79.7).abs() < f64::EPSILON);
    let snap = db.get_snapshot("c1").unwrap().unwrap();
    assert!((snap.latest_value - 79.7).abs() < f64::EPSILON);
}

#[test]
fn test_log_batch_malformed_json() {
    let (_dir, db) = common::setup_db();
    let err = log_batch(&db, &Config::default(), "c1", "not json", common::today()).unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
}

mod common;

use chrono::NaiveDate;
use coachvital::core::trend::{Direction, classify, classify_entries};
use coachvital::models::config::TrendSettings;
use coachvital::models::metric::MetricEntry;

/// Daily points ending today; `values[0]` is today.
fn newest_first(values: &[f64]) -> Vec<(NaiveDate, f64)> {
    values
        .iter()
        .enumerate()
        .map(|(i, v)| (common::days_ago(i as i64), *v))
        .collect()
}

#[test]
fn test_downward_trend() {
    // Recent week ~80, prior week ~82.
    let mut values = vec![80.0; 7];
    values.extend(vec![82.0; 7]);
    let result = classify(&newest_first(&values), 7, 0.1);

    assert_eq!(result.direction, Direction::Down);
    assert_eq!(result.recent_window_avg, Some(80.0));
    assert_eq!(result.prior_window_avg, Some(82.0));
}

#[test]
fn test_upward_trend() {
    let mut values = vec![84.0; 7];
    values.extend(vec![83.0; 5]);
    let result = classify(&newest_first(&values), 7, 0.1);
    assert_eq!(result.direction, Direction::Up);
}

#[test]
fn test_small_difference_is_stable() {
    let mut values = vec![80.05; 7];
    values.extend(vec![80.0; 7]);
    let result = classify(&newest_first(&values), 7, 0.1);
    assert_eq!(result.direction, Direction::Stable);
}

#[test]
fn test_no_prior_window_is_stable() {
    let result = classify(&newest_first(&[70.0, 75.0, 90.0]), 7, 0.1);
    assert_eq!(result.direction, Direction::Stable);
    assert_eq!(result.recent_window_avg, Some(78.33));
    assert_eq!(result.prior_window_avg, None);
}

#[test]
fn test_empty_input_is_stable() {
    let result = classify(&[], 7, 0.1);
    assert_eq!(result.direction, Direction::Stable);
    assert_eq!(result.recent_window_avg, None);
    assert_eq!(result.prior_window_avg, None);
}

#[test]
fn test_only_two_windows_are_used() {
    // Points beyond the second window do not influence the result.
    let mut values = vec![80.0; 7];
    values.extend(vec![80.0; 7]);
    values.extend(vec![200.0; 10]);
    let result = classify(&newest_first(&values), 7, 0.1);
    assert_eq!(result.direction, Direction::Stable);
    assert_eq!(result.prior_window_avg, Some(80.0));
}

#[test]
fn test_input_order_does_not_matter() {
    let mut values: Vec<f64> = (0..14).map(|i| 78.0 + i as f64 * 0.3).collect();
    values.reverse();
    let ordered = newest_first(&values);

    let mut oldest_first = ordered.clone();
    oldest_first.reverse();
    let mut shuffled = ordered.clone();
    shuffled.swap(0, 9);
    shuffled.swap(3, 13);
    shuffled.swap(5, 7);

    let a = classify(&ordered, 7, 0.1);
    let b = classify(&oldest_first, 7, 0.1);
    let c = classify(&shuffled, 7, 0.1);
    assert_eq!(a, b);
    assert_eq!(a, c);
}

#[test]
fn test_classify_entries_uses_settings() {
    let entries: Vec<MetricEntry> = (0..6)
        .map(|i| MetricEntry::new("c1".into(), common::days_ago(i), if i < 3 { 81.0 } else { 80.0 }))
        .collect();

    let narrow = TrendSettings {
        window_size: 3,
        stable_threshold: 0.5,
    };
    assert_eq!(classify_entries(&entries, &narrow).direction, Direction::Up);

    let wide_threshold = TrendSettings {
        window_size: 3,
        stable_threshold: 2.0,
    };
    assert_eq!(
        classify_entries(&entries, &wide_threshold).direction,
        Direction::Stable
    );
}

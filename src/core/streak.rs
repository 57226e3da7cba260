use chrono::{Duration, NaiveDate};
use serde::Serialize;

use crate::core::logging::validate_client_id;
use crate::db::Database;
use crate::error::Result;
use crate::models::config::StreakSettings;

#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct StreakState {
    pub current: u32,
    pub longest: u32,
}

/// Count consecutive qualifying days ending today.
///
/// A day with no event yet does not break the streak: when the newest event is
/// yesterday, counting starts there. Same-day repeats are skipped and future
/// dates are ignored.
pub fn current_streak(dates: &[NaiveDate], today: NaiveDate) -> u32 {
    let mut offsets: Vec<i64> = dates
        .iter()
        .map(|d| (today - *d).num_days())
        .filter(|o| *o >= 0)
        .collect();
    offsets.sort_unstable();

    let mut expected = match offsets.first() {
        Some(1) => 1,
        Some(_) => 0,
        None => return 0,
    };

    let mut streak = 0u32;
    for offset in offsets {
        if offset == expected {
            streak += 1;
            expected += 1;
        } else if offset > expected {
            break;
        }
    }
    streak
}

/// Longest run of consecutive calendar days in `dates`, in any order.
pub fn longest_run(dates: &[NaiveDate]) -> u32 {
    let mut days: Vec<NaiveDate> = dates.to_vec();
    days.sort_unstable();
    days.dedup();

    let mut longest = 0u32;
    let mut run = 0u32;
    let mut prev: Option<NaiveDate> = None;
    for d in days {
        run = match prev {
            Some(p) if (d - p).num_days() == 1 => run + 1,
            _ => 1,
        };
        longest = longest.max(run);
        prev = Some(d);
    }
    longest
}

/// `recent` is the capped window for the current streak, `lookback` the
/// longer history for the longest one.
pub fn compute(recent: &[NaiveDate], lookback: &[NaiveDate], today: NaiveDate) -> StreakState {
    let current = current_streak(recent, today);
    let past: Vec<NaiveDate> = lookback.iter().copied().filter(|d| *d <= today).collect();
    StreakState {
        current,
        longest: longest_run(&past).max(current),
    }
}

/// The highest milestone crossed when the streak moved from `before` to `after`.
pub fn milestone_reached(before: u32, after: u32, milestones: &[u32]) -> Option<u32> {
    milestones
        .iter()
        .copied()
        .filter(|m| *m > before && *m <= after)
        .max()
}

/// Workout streak for a client as of `today`.
pub fn for_client(
    db: &Database,
    settings: &StreakSettings,
    client_id: &str,
    today: NaiveDate,
) -> Result<StreakState> {
    validate_client_id(client_id)?;
    let recent_from = today - Duration::days(settings.window_days as i64);
    let lookback_from = today - Duration::days(settings.longest_lookback_days.max(settings.window_days) as i64);
    let recent = db.workout_dates(client_id, recent_from, today)?;
    let lookback = db.workout_dates(client_id, lookback_from, today)?;
    let state = compute(&recent, &lookback, today);
    tracing::debug!(client = client_id, current = state.current, longest = state.longest, "streak computed");
    Ok(state)
}

use chrono::{Duration, NaiveDate};
use log::debug;
use serde::Serialize;
use std::collections::BTreeSet;

use crate::date_range::parse_log_date;
use crate::models::RecitationLog;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakInfo {
    pub current_streak: u32,
    pub longest_streak: u32,
    pub last_log_date: Option<NaiveDate>,
}

/// All distinct dates that have at least one log, ascending
pub fn distinct_log_dates(logs: &[RecitationLog]) -> BTreeSet<NaiveDate> {
    logs.iter()
        .filter_map(|log| {
            let date = parse_log_date(&log.date);
            if date.is_none() {
                debug!("Skipping log {} with unparseable date '{}'", log.id, log.date);
            }
            date
        })
        .collect()
}

/// Calculate the consecutive-day logging streak.
///
/// The current streak is anchored on `today`, or on yesterday when nothing has
/// been logged yet today, and walks backwards until the first missing day.
/// The longest streak is the longest run of consecutive days anywhere in the history.
/// Callers filter to a single student's logs first.
pub fn compute_streak(logs: &[RecitationLog], today: NaiveDate) -> StreakInfo {
    let dates = distinct_log_dates(logs);

    let Some(&last_log_date) = dates.iter().next_back() else {
        return StreakInfo {
            current_streak: 0,
            longest_streak: 0,
            last_log_date: None,
        };
    };

    let mut current_streak = 0;
    let anchor = if dates.contains(&today) {
        Some(today)
    } else {
        today.pred_opt().filter(|yesterday| dates.contains(yesterday))
    };

    if let Some(mut expected) = anchor {
        while dates.contains(&expected) {
            current_streak += 1;
            match expected.pred_opt() {
                Some(prev) => expected = prev,
                None => break,
            }
        }
    }

    let mut longest_streak = 0;
    let mut run = 0;
    let mut previous: Option<NaiveDate> = None;
    for &date in &dates {
        run = match previous {
            Some(prev) if date - prev == Duration::days(1) => run + 1,
            _ => 1,
        };
        longest_streak = longest_streak.max(run);
        previous = Some(date);
    }

    StreakInfo {
        current_streak,
        longest_streak,
        last_log_date: Some(last_log_date),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::test_support::{log_on, ymd};

    #[test]
    fn test_streak_no_logs() {
        let streak = compute_streak(&[], ymd(2025, 1, 15));
        assert_eq!(
            streak,
            StreakInfo {
                current_streak: 0,
                longest_streak: 0,
                last_log_date: None
            }
        );
    }

    #[test]
    fn test_streak_single_log_today() {
        let logs = vec![log_on("2025-01-15")];
        let streak = compute_streak(&logs, ymd(2025, 1, 15));
        assert_eq!(streak.current_streak, 1);
        assert_eq!(streak.longest_streak, 1);
        assert_eq!(streak.last_log_date, Some(ymd(2025, 1, 15)));
    }

    #[test]
    fn test_streak_single_old_log() {
        let logs = vec![log_on("2025-01-10")];
        let streak = compute_streak(&logs, ymd(2025, 1, 15));
        assert_eq!(streak.current_streak, 0);
        assert_eq!(streak.longest_streak, 1);
        assert_eq!(streak.last_log_date, Some(ymd(2025, 1, 10)));
    }

    #[test]
    fn test_streak_counts_from_yesterday_when_today_missing() {
        let logs = vec![log_on("2025-01-12"), log_on("2025-01-13"), log_on("2025-01-14")];
        let streak = compute_streak(&logs, ymd(2025, 1, 15));
        assert_eq!(streak.current_streak, 3);
        assert_eq!(streak.longest_streak, 3);
    }

    #[test]
    fn test_streak_n_consecutive_days_ending_today() {
        let logs: Vec<_> = (1..=6)
            .map(|day| log_on(&format!("2025-01-{:02}", day)))
            .collect();
        let streak = compute_streak(&logs, ymd(2025, 1, 6));
        assert_eq!(streak.current_streak, 6);
        assert_eq!(streak.longest_streak, 6);
    }

    #[test]
    fn test_streak_gap_then_today() {
        // three consecutive days, a two day gap, then today
        let logs = vec![
            log_on("2025-01-10"),
            log_on("2025-01-11"),
            log_on("2025-01-12"),
            log_on("2025-01-15"),
        ];
        let streak = compute_streak(&logs, ymd(2025, 1, 15));
        assert_eq!(streak.current_streak, 1);
        assert_eq!(streak.longest_streak, 3);
    }

    #[test]
    fn test_streak_duplicate_dates_count_once() {
        let logs = vec![log_on("2025-01-14"), log_on("2025-01-14"), log_on("2025-01-15")];
        let streak = compute_streak(&logs, ymd(2025, 1, 15));
        assert_eq!(streak.current_streak, 2);
        assert_eq!(streak.longest_streak, 2);
    }

    #[test]
    fn test_streak_skips_unparseable_dates() {
        let logs = vec![log_on("not-a-date"), log_on("2025-01-15")];
        let streak = compute_streak(&logs, ymd(2025, 1, 15));
        assert_eq!(streak.current_streak, 1);
        assert_eq!(streak.longest_streak, 1);
    }

    #[test]
    fn test_streak_crosses_month_boundary() {
        let logs = vec![log_on("2024-02-28"), log_on("2024-02-29"), log_on("2024-03-01")];
        let streak = compute_streak(&logs, ymd(2024, 3, 1));
        assert_eq!(streak.current_streak, 3);
        assert_eq!(streak.longest_streak, 3);
    }

    #[test]
    fn test_streak_on_earliest_representable_day() {
        let logs = vec![log_on("2024-01-01")];
        let streak = compute_streak(&logs, NaiveDate::MIN);
        assert_eq!(streak.current_streak, 0);
        assert_eq!(streak.longest_streak, 1);
    }
}

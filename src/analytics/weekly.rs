use chrono::NaiveDate;
use serde::Serialize;

use crate::analytics::grade_average;
use crate::date_range::{WeekWindow, parse_log_date, trailing_weeks};
use crate::models::RecitationLog;

pub const DEFAULT_PROGRESS_WEEKS: usize = 4;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyProgress {
    pub week: String,
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub sessions_count: usize,
    pub average_grade: f64,
    pub total_mistakes: u64,
}

/// Session counts, grades and mistakes for the `weeks` Sunday-to-Saturday weeks
/// ending with the week that contains `today`, oldest week first
pub fn compute_weekly_progress(
    logs: &[RecitationLog],
    today: NaiveDate,
    weeks: usize,
) -> Vec<WeeklyProgress> {
    let dated: Vec<(NaiveDate, &RecitationLog)> = logs
        .iter()
        .filter_map(|log| parse_log_date(&log.date).map(|date| (date, log)))
        .collect();

    trailing_weeks(today, weeks)
        .into_iter()
        .map(|window: WeekWindow| {
            let week_logs: Vec<&RecitationLog> = dated
                .iter()
                .filter(|(date, _)| window.contains(*date))
                .map(|(_, log)| *log)
                .collect();

            WeeklyProgress {
                week: window.label(),
                week_start: window.start,
                week_end: window.end,
                sessions_count: week_logs.len(),
                average_grade: grade_average(week_logs.iter().copied()),
                total_mistakes: week_logs.iter().map(|log| log.total_mistakes()).sum(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::test_support::{typed_log, ymd};
    use crate::models::Grade;

    #[test]
    fn test_weekly_progress_empty_has_all_weeks() {
        let progress = compute_weekly_progress(&[], ymd(2024, 1, 10), DEFAULT_PROGRESS_WEEKS);
        assert_eq!(progress.len(), 4);
        assert_eq!(progress[0].week_start, ymd(2023, 12, 17));
        assert_eq!(progress[3].week_start, ymd(2024, 1, 7));
        assert_eq!(progress[3].week_end, ymd(2024, 1, 13));
        assert!(progress.iter().all(|w| w.sessions_count == 0 && w.average_grade == 0.0));
    }

    #[test]
    fn test_weekly_progress_buckets_by_sunday_week() {
        let logs = vec![
            // Saturday closes the previous week
            typed_log("Sabaq", "2024-01-06", 2, Some(Grade::Good)),
            // Sunday opens the current one
            typed_log("Sabaq", "2024-01-07", 1, Some(Grade::Excellent)),
            typed_log("Dhor", "2024-01-10", 3, Some(Grade::VeryGood)),
            typed_log("Dhor", "2024-01-12", 0, None),
        ];
        let progress = compute_weekly_progress(&logs, ymd(2024, 1, 10), 2);
        assert_eq!(progress.len(), 2);

        let previous = &progress[0];
        assert_eq!(previous.week, "Dec 31");
        assert_eq!(previous.sessions_count, 1);
        assert_eq!(previous.total_mistakes, 2);
        assert_eq!(previous.average_grade, 3.0);

        let current = &progress[1];
        assert_eq!(current.week, "Jan 07");
        assert_eq!(current.sessions_count, 3);
        assert_eq!(current.total_mistakes, 4);
        assert_eq!(current.average_grade, 4.5);
    }

    #[test]
    fn test_weekly_progress_skips_unparseable_dates() {
        let logs = vec![typed_log("Sabaq", "yesterday", 7, Some(Grade::Failed))];
        let progress = compute_weekly_progress(&logs, ymd(2024, 1, 10), 1);
        assert_eq!(progress[0].sessions_count, 0);
        assert_eq!(progress[0].total_mistakes, 0);
    }
}

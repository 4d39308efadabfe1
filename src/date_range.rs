use chrono::{DateTime, Datelike, Days, NaiveDate};
use std::iter;
use serde::Serialize;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a log date.
///
/// Logs store `YYYY-MM-DD`; older exports sometimes carried a full RFC 3339
/// timestamp, in which case the date part is used. Anything else is `None`.
pub fn parse_log_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// The `days` calendar days ending at `today` (inclusive), oldest first.
/// Stops early at the first representable date.
pub fn trailing_days(today: NaiveDate, days: usize) -> Vec<NaiveDate> {
    let mut dates: Vec<NaiveDate> = iter::successors(Some(today), |date| date.pred_opt())
        .take(days)
        .collect();
    dates.reverse();
    dates
}

/// A Sunday-to-Saturday calendar week
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl WeekWindow {
    /// Clamped to the representable date range at either end
    pub fn containing(date: NaiveDate) -> Self {
        let offset = Days::new(date.weekday().num_days_from_sunday() as u64);
        let start = date.checked_sub_days(offset).unwrap_or(NaiveDate::MIN);
        WeekWindow {
            start,
            end: start.checked_add_days(Days::new(6)).unwrap_or(NaiveDate::MAX),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Short display label such as "Jan 07"
    pub fn label(&self) -> String {
        self.start.format("%b %d").to_string()
    }
}

/// The `weeks` calendar weeks ending with the week containing `today`, oldest first.
/// Stops early at the first representable date.
pub fn trailing_weeks(today: NaiveDate, weeks: usize) -> Vec<WeekWindow> {
    let mut windows: Vec<WeekWindow> =
        iter::successors(Some(WeekWindow::containing(today)), |week| {
            week.start.checked_sub_days(Days::new(7)).map(WeekWindow::containing)
        })
        .take(weeks)
        .collect();
    windows.reverse();
    windows
}

/// Rounds half away from zero to one decimal place
pub fn round_to_one_decimal(value: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    (value * 10.0).round() / 10.0
}

/// `part / total` as a whole percentage, 0 when `total` is 0
pub fn percentage(part: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((part as f64 / total as f64) * 100.0).round() as u32
}

/// Mean of `sum / count` rounded to one decimal, 0 when `count` is 0
pub fn average(sum: f64, count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    round_to_one_decimal(sum / count as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_parse_log_date_plain() {
        assert_eq!(parse_log_date("2024-01-15"), Some(ymd(2024, 1, 15)));
    }

    #[test]
    fn test_parse_log_date_timestamp() {
        assert_eq!(
            parse_log_date("2024-01-15T10:20:30.000Z"),
            Some(ymd(2024, 1, 15))
        );
    }

    #[test]
    fn test_parse_log_date_rejects_garbage() {
        assert_eq!(parse_log_date(""), None);
        assert_eq!(parse_log_date("15/01/2024"), None);
        assert_eq!(parse_log_date("2024-13-01"), None);
    }

    #[test]
    fn test_trailing_days_oldest_first() {
        let days = trailing_days(ymd(2024, 3, 2), 4);
        assert_eq!(
            days,
            vec![ymd(2024, 2, 28), ymd(2024, 2, 29), ymd(2024, 3, 1), ymd(2024, 3, 2)]
        );
    }

    #[test]
    fn test_trailing_days_zero() {
        assert!(trailing_days(ymd(2024, 3, 2), 0).is_empty());
    }

    #[test]
    fn test_week_window_starts_on_sunday() {
        // 2024-01-10 is a Wednesday
        let week = WeekWindow::containing(ymd(2024, 1, 10));
        assert_eq!(week.start, ymd(2024, 1, 7));
        assert_eq!(week.end, ymd(2024, 1, 13));
        assert_eq!(week.label(), "Jan 07");

        let sunday = WeekWindow::containing(ymd(2024, 1, 7));
        assert_eq!(sunday, week);
        let saturday = WeekWindow::containing(ymd(2024, 1, 13));
        assert_eq!(saturday, week);
    }

    #[test]
    fn test_trailing_weeks_end_with_current_week() {
        let weeks = trailing_weeks(ymd(2024, 1, 10), 3);
        let starts: Vec<_> = weeks.iter().map(|w| w.start).collect();
        assert_eq!(starts, vec![ymd(2023, 12, 24), ymd(2023, 12, 31), ymd(2024, 1, 7)]);
    }

    #[test]
    fn test_ranges_stop_at_earliest_date() {
        let days = trailing_days(NaiveDate::MIN, 20_000_000);
        assert_eq!(days, vec![NaiveDate::MIN]);

        let near_min = NaiveDate::MIN + Days::new(20);
        let weeks = trailing_weeks(near_min, 20_000_000);
        assert!(!weeks.is_empty() && weeks.len() <= 4);
        assert!(weeks.windows(2).all(|pair| pair[0].end < pair[1].start));
        assert!(weeks.last().unwrap().contains(near_min));
    }

    #[test]
    fn test_week_window_clamps_at_range_edges() {
        let first = WeekWindow::containing(NaiveDate::MIN);
        assert!(first.contains(NaiveDate::MIN));
        let last = WeekWindow::containing(NaiveDate::MAX);
        assert!(last.contains(NaiveDate::MAX));
        assert_eq!(last.end, NaiveDate::MAX);
    }

    #[test]
    fn test_round_half_away_from_zero() {
        assert_eq!(round_to_one_decimal(2.25), 2.3);
        assert_eq!(round_to_one_decimal(2.5), 2.5);
        assert_eq!(round_to_one_decimal(3.333), 3.3);
        assert_eq!(round_to_one_decimal(f64::NAN), 0.0);
    }

    #[test]
    fn test_percentage_and_average_guard_zero() {
        assert_eq!(percentage(1, 3), 33);
        assert_eq!(percentage(2, 3), 67);
        assert_eq!(percentage(5, 0), 0);
        assert_eq!(average(5.0, 2), 2.5);
        assert_eq!(average(5.0, 0), 0.0);
    }
}

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashMap;

use crate::date_range::{average, parse_log_date, trailing_days};
use crate::models::RecitationLog;

pub const DEFAULT_TREND_DAYS: usize = 7;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MistakeBreakdown {
    pub mistakes: u64,
    pub stucks: u64,
    pub marked: u64,
}

impl MistakeBreakdown {
    pub fn total(&self) -> u64 {
        self.mistakes + self.stucks + self.marked
    }

    fn add_log(&mut self, log: &RecitationLog) {
        for count in &log.mistake_counts {
            self.mistakes += count.mistakes as u64;
            self.stucks += count.stucks as u64;
            self.marked += count.marked_mistakes as u64;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MistakeTrend {
    pub date: NaiveDate,
    pub total_mistakes: u64,
    pub average_mistakes: f64,
    pub mistake_types: MistakeBreakdown,
}

impl MistakeTrend {
    /// Chart axis label, e.g. "01/15"
    pub fn label(&self) -> String {
        self.date.format("%m/%d").to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DailyActivity {
    pub date: NaiveDate,
    pub count: usize,
}

/// Groups logs by parsed date, dropping logs whose date cannot be read
pub(crate) fn logs_by_date<'a>(
    logs: impl IntoIterator<Item = &'a RecitationLog>,
) -> HashMap<NaiveDate, Vec<&'a RecitationLog>> {
    let mut by_date: HashMap<NaiveDate, Vec<&'a RecitationLog>> = HashMap::new();
    for log in logs {
        if let Some(date) = parse_log_date(&log.date) {
            by_date.entry(date).or_default().push(log);
        }
    }
    by_date
}

/// Daily mistake totals for the `days` days ending at `today`, oldest first.
/// Days without logs still get a zeroed bucket.
pub fn compute_mistake_trends(
    logs: &[RecitationLog],
    today: NaiveDate,
    days: usize,
) -> Vec<MistakeTrend> {
    let by_date = logs_by_date(logs);

    trailing_days(today, days)
        .into_iter()
        .map(|date| {
            let day_logs = by_date.get(&date).map(Vec::as_slice).unwrap_or_default();
            let mut breakdown = MistakeBreakdown::default();
            for log in day_logs {
                breakdown.add_log(log);
            }
            let total_mistakes = breakdown.total();

            MistakeTrend {
                date,
                total_mistakes,
                average_mistakes: average(total_mistakes as f64, day_logs.len()),
                mistake_types: breakdown,
            }
        })
        .collect()
}

/// Number of sessions logged on each of the `days` days ending at `today`
pub fn compute_consistency(
    logs: &[RecitationLog],
    today: NaiveDate,
    days: usize,
) -> Vec<DailyActivity> {
    let by_date = logs_by_date(logs);

    trailing_days(today, days)
        .into_iter()
        .map(|date| DailyActivity {
            date,
            count: by_date.get(&date).map_or(0, Vec::len),
        })
        .collect()
}

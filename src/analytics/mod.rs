pub mod attendance;
pub mod content;
pub mod grades;
pub mod mistakes;
pub mod recitation_types;
pub mod streak;
pub mod weekly;

use chrono::NaiveDate;
use serde::Serialize;

use crate::date_provider::{DateProvider, SystemDateProvider};
use crate::date_range::round_to_one_decimal;
use crate::models::RecitationLog;

pub use attendance::{AttendanceSummary, compute_attendance};
pub use content::{
    ContentKind, ContentPerformance, ContentSummary, DEFAULT_RECENT_CONTENT_LIMIT,
    compute_content_performance, compute_recent_content,
};
pub use grades::{GradeDistribution, compute_grade_distribution};
pub use mistakes::{
    DEFAULT_TREND_DAYS, DailyActivity, MistakeBreakdown, MistakeTrend, compute_consistency,
    compute_mistake_trends,
};
pub use recitation_types::{
    RecitationTypeStats, TypeActivity, TypeActivityDay, compute_recitation_type_stats,
    compute_type_activity,
};
pub use streak::{StreakInfo, compute_streak};
pub use weekly::{DEFAULT_PROGRESS_WEEKS, WeeklyProgress, compute_weekly_progress};

/// Unrounded mean grade ordinal of the graded logs, `None` when none are graded
pub(crate) fn raw_grade_average<'a>(
    logs: impl IntoIterator<Item = &'a RecitationLog>,
) -> Option<f64> {
    let (sum, count) = logs
        .into_iter()
        .filter_map(|log| log.grade)
        .fold((0u32, 0usize), |(sum, count), grade| (sum + grade.ordinal(), count + 1));
    (count > 0).then(|| sum as f64 / count as f64)
}

/// Mean grade ordinal rounded to one decimal, 0 when nothing is graded
pub(crate) fn grade_average<'a>(logs: impl IntoIterator<Item = &'a RecitationLog>) -> f64 {
    raw_grade_average(logs).map_or(0.0, round_to_one_decimal)
}

/// Restricts a classroom's logs to a single student
pub fn logs_for_user(logs: &[RecitationLog], user_id: &str) -> Vec<RecitationLog> {
    logs.iter()
        .filter(|log| log.user_id == user_id)
        .cloned()
        .collect()
}

/// Every dashboard aggregation computed against the same "today"
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSnapshot {
    pub today: NaiveDate,
    pub total_sessions: usize,
    pub streak: StreakInfo,
    pub attendance: AttendanceSummary,
    pub grade_distribution: Vec<GradeDistribution>,
    pub mistake_trends: Vec<MistakeTrend>,
    pub consistency: Vec<DailyActivity>,
    pub content_performance: Vec<ContentPerformance>,
    pub recent_content: Vec<ContentSummary>,
    pub recitation_types: Vec<RecitationTypeStats>,
    pub type_activity: Vec<TypeActivity>,
    pub weekly_progress: Vec<WeeklyProgress>,
}

/// Analytics facade binding a log snapshot to a clock
pub struct Analytics<'a> {
    logs: &'a [RecitationLog],
    date_provider: &'a dyn DateProvider,
}

impl<'a> Analytics<'a> {
    /// Analytics over `logs` using the system clock for "today"
    pub fn new(logs: &'a [RecitationLog]) -> Self {
        Analytics {
            logs,
            date_provider: &SystemDateProvider,
        }
    }

    pub fn with_date_provider(
        logs: &'a [RecitationLog],
        date_provider: &'a dyn DateProvider,
    ) -> Self {
        Analytics {
            logs,
            date_provider,
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.date_provider.today()
    }

    pub fn streak(&self) -> StreakInfo {
        compute_streak(self.logs, self.today())
    }

    pub fn grade_distribution(&self) -> Vec<GradeDistribution> {
        compute_grade_distribution(self.logs)
    }

    pub fn mistake_trends(&self, days: usize) -> Vec<MistakeTrend> {
        compute_mistake_trends(self.logs, self.today(), days)
    }

    pub fn consistency(&self, days: usize) -> Vec<DailyActivity> {
        compute_consistency(self.logs, self.today(), days)
    }

    pub fn content_performance(&self) -> Vec<ContentPerformance> {
        compute_content_performance(self.logs)
    }

    pub fn recent_content(&self, limit: usize) -> Vec<ContentSummary> {
        compute_recent_content(self.logs, limit)
    }

    pub fn recitation_type_stats(&self) -> Vec<RecitationTypeStats> {
        compute_recitation_type_stats(self.logs)
    }

    pub fn type_activity(&self, days: usize) -> Vec<TypeActivity> {
        compute_type_activity(self.logs, self.today(), days)
    }

    pub fn weekly_progress(&self, weeks: usize) -> Vec<WeeklyProgress> {
        compute_weekly_progress(self.logs, self.today(), weeks)
    }

    pub fn attendance(&self) -> AttendanceSummary {
        compute_attendance(self.logs)
    }

    /// Computes every aggregation, reading the clock once
    pub fn snapshot(&self, days: usize, weeks: usize) -> AnalyticsSnapshot {
        let today = self.today();
        AnalyticsSnapshot {
            today,
            total_sessions: self.logs.len(),
            streak: compute_streak(self.logs, today),
            attendance: compute_attendance(self.logs),
            grade_distribution: compute_grade_distribution(self.logs),
            mistake_trends: compute_mistake_trends(self.logs, today, days),
            consistency: compute_consistency(self.logs, today, days),
            content_performance: compute_content_performance(self.logs),
            recent_content: compute_recent_content(self.logs, DEFAULT_RECENT_CONTENT_LIMIT),
            recitation_types: compute_recitation_type_stats(self.logs),
            type_activity: compute_type_activity(self.logs, today, days),
            weekly_progress: compute_weekly_progress(self.logs, today, weeks),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::{graded_log, log_on, ymd};
    use super::*;
    use crate::date_provider::OverrideDateProvider;
    use crate::models::Grade;

    #[test]
    fn test_grade_average_rounds_to_one_decimal() {
        let logs = vec![
            graded_log("2024-01-01", Some(Grade::Excellent)),
            graded_log("2024-01-02", Some(Grade::VeryGood)),
            graded_log("2024-01-03", Some(Grade::VeryGood)),
            graded_log("2024-01-04", None),
        ];
        assert_eq!(grade_average(&logs), 4.3);
        let raw = raw_grade_average(&logs).unwrap();
        assert!((raw - 13.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_grade_average_without_grades() {
        let logs = vec![graded_log("2024-01-01", None)];
        assert_eq!(grade_average(&logs), 0.0);
        assert_eq!(raw_grade_average(&logs), None);
    }

    #[test]
    fn test_logs_for_user() {
        let mine = log_on("2024-01-01");
        let theirs = RecitationLog {
            user_id: "student-2".to_string(),
            ..log_on("2024-01-02")
        };
        let logs = vec![mine.clone(), theirs];
        assert_eq!(logs_for_user(&logs, "student-1"), vec![mine]);
        assert!(logs_for_user(&logs, "nobody").is_empty());
    }

    #[test]
    fn test_facade_uses_injected_date() {
        let logs = vec![log_on("2024-01-06"), log_on("2024-01-07")];
        let provider = OverrideDateProvider::new(ymd(2024, 1, 7));
        let analytics = Analytics::with_date_provider(&logs, &provider);

        assert_eq!(analytics.today(), ymd(2024, 1, 7));
        assert_eq!(analytics.streak().current_streak, 2);
        assert_eq!(analytics.mistake_trends(7).last().unwrap().date, ymd(2024, 1, 7));
    }

    #[test]
    fn test_snapshot_is_idempotent_and_leaves_input_untouched() {
        let logs = vec![
            graded_log("2024-01-05", Some(Grade::Good)),
            graded_log("2024-01-07", Some(Grade::Excellent)),
        ];
        let before = logs.clone();
        let provider = OverrideDateProvider::new(ymd(2024, 1, 7));
        let analytics = Analytics::with_date_provider(&logs, &provider);

        let first = analytics.snapshot(DEFAULT_TREND_DAYS, DEFAULT_PROGRESS_WEEKS);
        let second = analytics.snapshot(DEFAULT_TREND_DAYS, DEFAULT_PROGRESS_WEEKS);
        assert_eq!(first, second);
        assert_eq!(logs, before);
        assert_eq!(first.total_sessions, 2);
        assert_eq!(first.mistake_trends.len(), 7);
        assert_eq!(first.weekly_progress.len(), 4);
    }
}

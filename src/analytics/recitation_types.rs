use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::analytics::grade_average;
use crate::analytics::mistakes::logs_by_date;
use crate::date_range::{parse_log_date, trailing_days};
use crate::models::{RecitationLog, RecitationType};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecitationTypeStats {
    #[serde(rename = "type")]
    pub recitation_type: RecitationType,
    pub total_sessions: usize,
    pub average_grade: f64,
    pub total_mistakes: u64,
    pub last_session: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TypeActivityDay {
    pub date: NaiveDate,
    pub count: usize,
    pub mistakes: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeActivity {
    #[serde(rename = "type")]
    pub recitation_type: RecitationType,
    pub days: Vec<TypeActivityDay>,
}

/// Groups logs by recognised recitation type; unknown types are dropped
fn group_by_type(logs: &[RecitationLog]) -> BTreeMap<RecitationType, Vec<&RecitationLog>> {
    let mut groups: BTreeMap<RecitationType, Vec<&RecitationLog>> = BTreeMap::new();
    for log in logs {
        match log.recitation_type() {
            Some(recitation_type) => groups.entry(recitation_type).or_default().push(log),
            None => log::debug!(
                "Skipping log {} with unknown recitation type '{}'",
                log.id,
                log.recitation_type
            ),
        }
    }
    groups
}

/// Totals per recitation type, in Sabaq, Last 3 Sabaqs, Sabaq Dhor, Dhor order.
/// Types with no sessions are omitted.
pub fn compute_recitation_type_stats(logs: &[RecitationLog]) -> Vec<RecitationTypeStats> {
    group_by_type(logs)
        .into_iter()
        .map(|(recitation_type, sessions)| RecitationTypeStats {
            recitation_type,
            total_sessions: sessions.len(),
            average_grade: grade_average(sessions.iter().copied()),
            total_mistakes: sessions.iter().map(|log| log.total_mistakes()).sum(),
            last_session: sessions
                .iter()
                .filter_map(|log| parse_log_date(&log.date))
                .max(),
        })
        .collect()
}

/// Daily session counts and mistakes per recitation type over the `days` days ending at `today`
pub fn compute_type_activity(
    logs: &[RecitationLog],
    today: NaiveDate,
    days: usize,
) -> Vec<TypeActivity> {
    let window = trailing_days(today, days);

    group_by_type(logs)
        .into_iter()
        .map(|(recitation_type, sessions)| {
            let by_date = logs_by_date(sessions);
            let days = window
                .iter()
                .map(|date| {
                    let day_logs = by_date.get(date).map(Vec::as_slice).unwrap_or_default();
                    TypeActivityDay {
                        date: *date,
                        count: day_logs.len(),
                        mistakes: day_logs.iter().map(|log| log.total_mistakes()).sum(),
                    }
                })
                .collect();

            TypeActivity {
                recitation_type,
                days,
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
    fn test_type_stats_empty() {
        assert!(compute_recitation_type_stats(&[]).is_empty());
    }

    #[test]
    fn test_type_stats_omits_absent_types_and_unknown_values() {
        let logs = vec![
            typed_log("Dhor", "2024-01-02", 1, Some(Grade::Good)),
            typed_log("Sabaq", "2024-01-01", 2, Some(Grade::Excellent)),
            typed_log("Tilawah", "2024-01-03", 5, None),
        ];
        let stats = compute_recitation_type_stats(&logs);
        let types: Vec<_> = stats.iter().map(|s| s.recitation_type).collect();
        assert_eq!(types, vec![RecitationType::Sabaq, RecitationType::Dhor]);
        assert!(stats.len() <= RecitationType::ALL.len());
    }

    #[test]
    fn test_type_stats_totals_and_last_session() {
        let logs = vec![
            typed_log("Sabaq Dhor", "2024-01-02", 1, Some(Grade::VeryGood)),
            typed_log("Sabaq Dhor", "2024-01-09", 3, Some(Grade::Average)),
            typed_log("Sabaq Dhor", "2024-01-05", 0, None),
        ];
        let stats = compute_recitation_type_stats(&logs);
        assert_eq!(stats.len(), 1);
        let sabaq_dhor = &stats[0];
        assert_eq!(sabaq_dhor.recitation_type, RecitationType::SabaqDhor);
        assert_eq!(sabaq_dhor.total_sessions, 3);
        assert_eq!(sabaq_dhor.total_mistakes, 4);
        assert_eq!(sabaq_dhor.average_grade, 3.0);
        assert_eq!(sabaq_dhor.last_session, Some(ymd(2024, 1, 9)));
    }

    #[test]
    fn test_type_stats_serialize_display_name() {
        let logs = vec![typed_log("Last 3 Sabaqs", "2024-01-02", 0, None)];
        let json = serde_json::to_value(compute_recitation_type_stats(&logs)).unwrap();
        assert_eq!(json[0]["type"], "Last 3 Sabaqs");
        assert_eq!(json[0]["lastSession"], "2024-01-02");
    }

    #[test]
    fn test_type_activity_buckets_per_type() {
        let logs = vec![
            typed_log("Sabaq", "2024-01-07", 2, None),
            typed_log("Sabaq", "2024-01-07", 1, None),
            typed_log("Dhor", "2024-01-06", 4, None),
        ];
        let activity = compute_type_activity(&logs, ymd(2024, 1, 7), 7);
        assert_eq!(activity.len(), 2);

        let sabaq = &activity[0];
        assert_eq!(sabaq.recitation_type, RecitationType::Sabaq);
        assert_eq!(sabaq.days.len(), 7);
        assert_eq!(sabaq.days[6].count, 2);
        assert_eq!(sabaq.days[6].mistakes, 3);

        let dhor = &activity[1];
        assert_eq!(dhor.days[5].count, 1);
        assert_eq!(dhor.days[6].count, 0);
    }
}

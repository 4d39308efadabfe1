use serde::Serialize;
use std::collections::HashMap;

use crate::analytics::{grade_average, raw_grade_average};
use crate::date_range::average;
use crate::models::RecitationLog;

pub const DEFAULT_RECENT_CONTENT_LIMIT: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Surah,
    Juz,
}

/// The surah or juz' a session covered
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContentKey {
    pub kind: ContentKind,
    pub name: String,
}

impl ContentKey {
    /// A surah name takes precedence over a juz' number when a log carries both
    pub fn of(log: &RecitationLog) -> Option<Self> {
        if let Some(surah) = log.surah() {
            Some(ContentKey {
                kind: ContentKind::Surah,
                name: surah.to_string(),
            })
        } else {
            log.juz().map(|juz| ContentKey {
                kind: ContentKind::Juz,
                name: juz.to_string(),
            })
        }
    }

    /// Stable identifier, e.g. `surah-Al-Baqarah` or `juz-30`
    pub fn id(&self) -> String {
        match self.kind {
            ContentKind::Surah => format!("surah-{}", self.name),
            ContentKind::Juz => format!("juz-{}", self.name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentPerformance {
    pub content: String,
    #[serde(rename = "type")]
    pub kind: ContentKind,
    pub total_sessions: usize,
    pub average_grade: f64,
    pub average_mistakes: f64,
    pub needs_improvement: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentSummary {
    #[serde(rename = "type")]
    pub kind: ContentKind,
    pub name: String,
    pub count: usize,
}

fn group_by_content(logs: &[RecitationLog]) -> Vec<(ContentKey, Vec<&RecitationLog>)> {
    let mut groups: HashMap<ContentKey, Vec<&RecitationLog>> = HashMap::new();
    for log in logs {
        if let Some(key) = ContentKey::of(log) {
            groups.entry(key).or_default().push(log);
        }
    }

    let mut groups: Vec<_> = groups.into_iter().collect();
    // Most practised first, then by key so equal counts come out in a stable order
    groups.sort_by(|(a_key, a_logs), (b_key, b_logs)| {
        b_logs.len().cmp(&a_logs.len()).then_with(|| a_key.cmp(b_key))
    });
    groups
}

/// Per surah / juz' performance, most practised content first.
/// Logs that name neither a surah nor a juz' are not counted anywhere.
pub fn compute_content_performance(logs: &[RecitationLog]) -> Vec<ContentPerformance> {
    group_by_content(logs)
        .into_iter()
        .map(|(key, sessions)| {
            let total_sessions = sessions.len();
            let total_mistakes: u64 = sessions.iter().map(|log| log.total_mistakes()).sum();
            let raw_mistakes = total_mistakes as f64 / total_sessions as f64;
            let raw_grade = raw_grade_average(sessions.iter().copied());

            ContentPerformance {
                content: key.name.clone(),
                kind: key.kind,
                total_sessions,
                average_grade: grade_average(sessions.iter().copied()),
                average_mistakes: average(total_mistakes as f64, total_sessions),
                needs_improvement: raw_grade.is_some_and(|grade| grade < 3.0)
                    || raw_mistakes > 5.0,
            }
        })
        .collect()
}

/// The `limit` most practised surahs and juz'
pub fn compute_recent_content(logs: &[RecitationLog], limit: usize) -> Vec<ContentSummary> {
    group_by_content(logs)
        .into_iter()
        .take(limit)
        .map(|(key, sessions)| ContentSummary {
            kind: key.kind,
            name: key.name,
            count: sessions.len(),
        })
        .collect()
}

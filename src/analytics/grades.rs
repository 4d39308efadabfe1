use serde::Serialize;
use std::collections::BTreeMap;

use crate::date_range::percentage;
use crate::models::{Grade, RecitationLog};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeDistribution {
    pub grade: Grade,
    pub count: usize,
    pub percentage: u32,
    pub color: &'static str,
}

/// Share of graded sessions per grade, best grade first.
/// Grades that never occur are left out; an ungraded history yields an empty result.
pub fn compute_grade_distribution(logs: &[RecitationLog]) -> Vec<GradeDistribution> {
    let mut counts: BTreeMap<Grade, usize> = BTreeMap::new();
    for grade in logs.iter().filter_map(|log| log.grade) {
        *counts.entry(grade).or_insert(0) += 1;
    }

    let total: usize = counts.values().sum();
    counts
        .into_iter()
        .map(|(grade, count)| GradeDistribution {
            grade,
            count,
            percentage: percentage(count, total),
            color: grade.color(),
        })
        .collect()
}

use serde::Serialize;

use crate::date_range::percentage;
use crate::models::{AttendanceStatus, RecitationLog};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceSummary {
    pub present: usize,
    pub late: usize,
    pub absent: usize,
    pub unrecorded: usize,
    pub attendance_rate: u32,
}

/// Attendance tallies; the rate counts late arrivals as attended and ignores
/// sessions where attendance was not recorded
pub fn compute_attendance(logs: &[RecitationLog]) -> AttendanceSummary {
    let mut summary = AttendanceSummary::default();
    for log in logs {
        match log.attendance_status {
            Some(AttendanceStatus::Present) => summary.present += 1,
            Some(AttendanceStatus::Late) => summary.late += 1,
            Some(AttendanceStatus::Absent) => summary.absent += 1,
            None => summary.unrecorded += 1,
        }
    }

    let attended = summary.present + summary.late;
    summary.attendance_rate = percentage(attended, attended + summary.absent);
    summary
}

use crate::models::{AttendanceStatus, Grade, MistakeCount, MistakePortion, RecitationLog};
use log::warn;
use rusqlite::Row;

/// Column list matching `LogRowFactory::from_row`
pub const LOG_COLUMNS: &str = "id, user_id, date, recitation_type, surah_name, ayah_start, \
     ayah_end, juz_number, pages_count, tester_name, notes, grade, needs_repeat, \
     attendance_status, absence_reason, created_at";

/// Factory for creating RecitationLog objects from database rows
pub struct LogRowFactory;

impl LogRowFactory {
    /// Creates a RecitationLog (without its mistake counts) from a database row
    /// Expected columns: see `LOG_COLUMNS`
    /// Unknown grade or attendance text is read as absent
    pub fn from_row(row: &Row) -> rusqlite::Result<RecitationLog> {
        let grade: Option<String> = row.get(11)?;
        let attendance_status: Option<String> = row.get(13)?;

        Ok(RecitationLog {
            id: row.get(0)?,
            user_id: row.get(1)?,
            date: row.get(2)?,
            recitation_type: row.get(3)?,
            surah_name: row.get(4)?,
            ayah_start: row.get(5)?,
            ayah_end: row.get(6)?,
            juz_number: row.get(7)?,
            pages_count: row.get(8)?,
            mistake_counts: Vec::new(),
            tester_name: row.get(9)?,
            notes: row.get(10)?,
            grade: grade.as_deref().and_then(Grade::from),
            needs_repeat: row.get(12)?,
            attendance_status: attendance_status
                .as_deref()
                .and_then(AttendanceStatus::from),
            absence_reason: row.get(14)?,
            created_at: row.get(15)?,
        })
    }
}

/// Factory for creating MistakeCount objects from database rows
pub struct MistakeCountRowFactory;

impl MistakeCountRowFactory {
    /// Creates a (log_id, MistakeCount) pair from a database row
    /// Expected columns: log_id, portion, mistakes, stucks, marked_mistakes
    /// Returns `None` for the count when the portion text is not recognised
    pub fn from_row(row: &Row) -> rusqlite::Result<(String, Option<MistakeCount>)> {
        let log_id: String = row.get(0)?;
        let portion: String = row.get(1)?;

        let count = match MistakePortion::from(&portion) {
            Some(portion) => Some(MistakeCount::new(
                portion,
                row.get(2)?,
                row.get(3)?,
                row.get(4)?,
            )),
            None => {
                warn!(
                    "Ignoring mistake count with unknown portion '{}' on log {}",
                    portion, log_id
                );
                None
            }
        };

        Ok((log_id, count))
    }
}

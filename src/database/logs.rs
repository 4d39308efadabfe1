use log::debug;
use rusqlite::{Connection, Result, params};
use std::collections::HashMap;

use crate::models::{MistakeCount, RecitationLog};
use crate::row_factories::{LOG_COLUMNS, LogRowFactory, MistakeCountRowFactory};

pub struct LogsRepository<'a> {
    conn: &'a Connection,
}

impl<'a> LogsRepository<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        LogsRepository { conn }
    }

    /// Inserts a log with its mistake counts, replacing any log with the same id
    pub fn save(&self, log: &RecitationLog) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;

        tx.execute("DELETE FROM mistake_counts WHERE log_id = ?1", [&log.id])?;
        tx.execute(
            "INSERT OR REPLACE INTO recitation_logs (id, user_id, date, recitation_type,
                surah_name, ayah_start, ayah_end, juz_number, pages_count, tester_name, notes,
                grade, needs_repeat, attendance_status, absence_reason, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)",
            params![
                log.id,
                log.user_id,
                log.date,
                log.recitation_type,
                log.surah_name,
                log.ayah_start,
                log.ayah_end,
                log.juz_number,
                log.pages_count,
                log.tester_name,
                log.notes,
                log.grade.map(|grade| grade.as_str()),
                log.needs_repeat,
                log.attendance_status.map(|status| status.as_str()),
                log.absence_reason,
                log.created_at,
            ],
        )?;

        for (position, count) in log.mistake_counts.iter().enumerate() {
            tx.execute(
                "INSERT INTO mistake_counts (log_id, position, portion, mistakes, stucks, marked_mistakes)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    log.id,
                    position as i64,
                    count.portion.as_str(),
                    count.mistakes,
                    count.stucks,
                    count.marked_mistakes
                ],
            )?;
        }

        tx.commit()?;
        debug!(
            "Saved log {} for user {} with {} mistake count entries",
            log.id,
            log.user_id,
            log.mistake_counts.len()
        );
        Ok(())
    }

    pub fn get(&self, log_id: &str) -> Result<Option<RecitationLog>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM recitation_logs WHERE id = ?1",
            LOG_COLUMNS
        ))?;

        let mut rows = stmt.query([log_id])?;

        if let Some(row) = rows.next()? {
            let mut log = LogRowFactory::from_row(row)?;
            let mut counts = self.load_mistake_counts(
                "SELECT log_id, portion, mistakes, stucks, marked_mistakes
                 FROM mistake_counts WHERE log_id = ?1 ORDER BY position",
                log_id,
            )?;
            log.mistake_counts = counts.remove(log_id).unwrap_or_default();
            Ok(Some(log))
        } else {
            Ok(None)
        }
    }

    /// All logs of one student, newest first (creation time breaks ties within a day)
    pub fn list_for_user(&self, user_id: &str) -> Result<Vec<RecitationLog>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM recitation_logs WHERE user_id = ?1
             ORDER BY date DESC, created_at DESC",
            LOG_COLUMNS
        ))?;
        let logs = stmt
            .query_map([user_id], LogRowFactory::from_row)?
            .collect::<Result<Vec<_>>>()?;

        let counts = self.load_mistake_counts(
            "SELECT mc.log_id, mc.portion, mc.mistakes, mc.stucks, mc.marked_mistakes
             FROM mistake_counts mc
             INNER JOIN recitation_logs l ON l.id = mc.log_id
             WHERE l.user_id = ?1
             ORDER BY mc.log_id, mc.position",
            user_id,
        )?;

        Ok(Self::attach_mistake_counts(logs, counts))
    }

    /// Every log in the store, newest first
    pub fn list_all(&self) -> Result<Vec<RecitationLog>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM recitation_logs ORDER BY date DESC, created_at DESC",
            LOG_COLUMNS
        ))?;
        let logs = stmt
            .query_map([], LogRowFactory::from_row)?
            .collect::<Result<Vec<_>>>()?;

        let mut stmt = self.conn.prepare(
            "SELECT log_id, portion, mistakes, stucks, marked_mistakes
             FROM mistake_counts ORDER BY log_id, position",
        )?;
        let counts = Self::group_mistake_counts(&mut stmt, [])?;

        Ok(Self::attach_mistake_counts(logs, counts))
    }

    /// Distinct student ids that have at least one log
    pub fn user_ids(&self) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT DISTINCT user_id FROM recitation_logs ORDER BY user_id")?;
        let user_ids = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<String>>>()?;
        Ok(user_ids)
    }

    pub fn delete(&self, log_id: &str) -> Result<bool> {
        let deleted = self
            .conn
            .execute("DELETE FROM recitation_logs WHERE id = ?1", [log_id])?;
        Ok(deleted > 0)
    }

    pub fn count(&self) -> Result<i64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM recitation_logs", [], |row| row.get(0))?;
        Ok(count)
    }

    fn load_mistake_counts(
        &self,
        query: &str,
        key: &str,
    ) -> Result<HashMap<String, Vec<MistakeCount>>> {
        let mut stmt = self.conn.prepare(query)?;
        Self::group_mistake_counts(&mut stmt, [key])
    }

    fn group_mistake_counts<P: rusqlite::Params>(
        stmt: &mut rusqlite::Statement,
        params: P,
    ) -> Result<HashMap<String, Vec<MistakeCount>>> {
        let mut grouped: HashMap<String, Vec<MistakeCount>> = HashMap::new();
        let rows = stmt.query_map(params, MistakeCountRowFactory::from_row)?;
        for row in rows {
            let (log_id, count) = row?;
            if let Some(count) = count {
                grouped.entry(log_id).or_default().push(count);
            }
        }
        Ok(grouped)
    }

    fn attach_mistake_counts(
        mut logs: Vec<RecitationLog>,
        mut counts: HashMap<String, Vec<MistakeCount>>,
    ) -> Vec<RecitationLog> {
        for log in &mut logs {
            log.mistake_counts = counts.remove(&log.id).unwrap_or_default();
        }
        logs
    }
}

pub mod connection;
pub mod import;
pub mod logs;

use rusqlite::{Connection, Result};
use std::path::Path;

use crate::analytics::Analytics;
use crate::date_provider::DateProvider;
use crate::models::RecitationLog;

pub use import::{ImportError, ImportResult};
pub use logs::LogsRepository;

/// Main Database struct providing access to the log store
pub struct Database {
    pub conn: Connection,
}

impl Database {
    pub fn new(db_path: &str) -> Result<Self> {
        let conn = connection::init_connection(db_path)?;
        Ok(Database { conn })
    }

    fn logs(&self) -> LogsRepository<'_> {
        LogsRepository::new(&self.conn)
    }

    // ===== Logs Repository Access =====

    pub fn save_log(&self, log: &RecitationLog) -> Result<()> {
        self.logs().save(log)
    }

    pub fn get_log(&self, log_id: &str) -> Result<Option<RecitationLog>> {
        self.logs().get(log_id)
    }

    pub fn logs_for_user(&self, user_id: &str) -> Result<Vec<RecitationLog>> {
        self.logs().list_for_user(user_id)
    }

    pub fn all_logs(&self) -> Result<Vec<RecitationLog>> {
        self.logs().list_all()
    }

    pub fn user_ids(&self) -> Result<Vec<String>> {
        self.logs().user_ids()
    }

    pub fn delete_log(&self, log_id: &str) -> Result<bool> {
        self.logs().delete(log_id)
    }

    pub fn count_logs(&self) -> Result<i64> {
        self.logs().count()
    }

    // ===== Import =====

    pub fn import_logs(&self, logs: &[RecitationLog]) -> ImportResult<usize> {
        import::import_logs(&self.logs(), logs)
    }

    pub fn import_logs_from_file(&self, path: &Path) -> ImportResult<usize> {
        import::import_logs_from_file(&self.logs(), path)
    }

    // ===== Analytics Access =====

    /// Runs `f` against a student's logs (or every log when `user_id` is `None`)
    pub fn with_analytics<T>(
        &self,
        user_id: Option<&str>,
        date_provider: &dyn DateProvider,
        f: impl FnOnce(&Analytics) -> T,
    ) -> Result<T> {
        let logs = match user_id {
            Some(user_id) => self.logs_for_user(user_id)?,
            None => self.all_logs()?,
        };
        let analytics = Analytics::with_date_provider(&logs, date_provider);
        Ok(f(&analytics))
    }
}

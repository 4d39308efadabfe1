use log::{info, warn};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::database::logs::LogsRepository;
use crate::models::RecitationLog;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid log export: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
}

pub type ImportResult<T> = Result<T, ImportError>;

/// Parses a JSON array of logs in the app's export format.
///
/// Only a document that is not a JSON array fails as a whole. Entries that do
/// not form a log (a missing id, an unknown recitation portion) are skipped
/// one at a time with a warning.
pub fn parse_logs_json(json: &str) -> ImportResult<Vec<RecitationLog>> {
    let entries: Vec<serde_json::Value> = serde_json::from_str(json)?;
    let total = entries.len();

    let logs: Vec<RecitationLog> = entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match serde_json::from_value(entry) {
            Ok(log) => Some(log),
            Err(e) => {
                warn!("Skipping malformed log at index {}: {}", index, e);
                None
            }
        })
        .collect();

    if logs.len() < total {
        info!("Parsed {} of {} exported logs", logs.len(), total);
    }
    Ok(logs)
}

/// Saves every log in `logs`, returning how many were written.
/// Logs without an id or owner cannot be keyed and are skipped.
pub fn import_logs(repo: &LogsRepository, logs: &[RecitationLog]) -> ImportResult<usize> {
    let mut imported = 0;
    for log in logs {
        if log.id.trim().is_empty() || log.user_id.trim().is_empty() {
            warn!("Skipping imported log without id or user id (date '{}')", log.date);
            continue;
        }
        repo.save(log)?;
        imported += 1;
    }
    Ok(imported)
}

/// Reads a JSON export from `path` and saves its logs
pub fn import_logs_from_file(repo: &LogsRepository, path: &Path) -> ImportResult<usize> {
    let json = fs::read_to_string(path)?;
    let logs = parse_logs_json(&json)?;
    let imported = import_logs(repo, &logs)?;
    info!("Imported {} of {} logs from {}", imported, logs.len(), path.display());
    Ok(imported)
}

use crate::cli::Args;
use crate::database::Database;
use log::info;
use rusqlite::Result;
use std::path::PathBuf;

pub const DEFAULT_DB_PATH: &str = "hifz_tracker.db";
const IN_MEMORY: &str = ":memory:";

/// Where the log store lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreLocation {
    /// Throwaway store, used by `--test`
    InMemory,
    File(PathBuf),
}

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub location: StoreLocation,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        DatabaseConfig {
            location: StoreLocation::File(PathBuf::from(DEFAULT_DB_PATH)),
        }
    }
}

impl DatabaseConfig {
    pub fn in_memory() -> Self {
        DatabaseConfig {
            location: StoreLocation::InMemory,
        }
    }

    /// Path handed to SQLite; `--test` wins over `--db-path`
    pub fn get_path(&self) -> String {
        match &self.location {
            StoreLocation::InMemory => IN_MEMORY.to_string(),
            StoreLocation::File(path) => path.to_string_lossy().into_owned(),
        }
    }

    pub fn from_args(args: &Args) -> Self {
        if args.test {
            return DatabaseConfig::in_memory();
        }
        match &args.db_path {
            Some(path) => DatabaseConfig {
                location: StoreLocation::File(path.clone()),
            },
            None => DatabaseConfig::default(),
        }
    }
}

/// Factory for creating Database instances
pub struct DatabaseFactory;

impl DatabaseFactory {
    pub fn create(config: DatabaseConfig) -> Result<Database> {
        let path = config.get_path();
        info!("Opening log store at {}", path);
        Database::new(&path)
    }
}

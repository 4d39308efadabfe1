use log::{debug, error};
use rusqlite::{Connection, Result, ffi};

// Embed migrations from the migrations directory
refinery::embed_migrations!("migrations");

/// Initializes the database connection and runs migrations
pub fn init_connection(db_path: &str) -> Result<Connection> {
    let mut conn = Connection::open(db_path)?;
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;

    // Run embedded migrations from the migrations folder
    match migrations::runner().run(&mut conn) {
        Ok(report) => {
            debug!(
                "Migrations completed successfully ({} applied)",
                report.applied_migrations().len()
            );
        }
        Err(e) => {
            error!("Refinery migration error: {}", e);
            return Err(rusqlite::Error::SqliteFailure(
                ffi::Error::new(ffi::SQLITE_ERROR),
                Some(format!("migration failed: {}", e)),
            ));
        }
    }

    Ok(conn)
}

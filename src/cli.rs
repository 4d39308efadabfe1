use chrono::NaiveDate;
use clap::Parser;
use clap::builder::RangedU64ValueParser;
use std::path::PathBuf;

use crate::analytics::{DEFAULT_PROGRESS_WEEKS, DEFAULT_TREND_DAYS};
use crate::date_range::DATE_FORMAT;

/// Longest daily window accepted on the command line (about ten years)
pub const MAX_TREND_DAYS: u64 = 3660;
/// Longest weekly window accepted on the command line
pub const MAX_PROGRESS_WEEKS: u64 = 520;

/// Quran memorization progress report for recorded recitation sessions
#[derive(Parser, Debug, Clone)]
#[command(name = "Hifz Tracker")]
#[command(about = "Streaks, grades and mistake trends from recitation logs", long_about = None)]
#[command(version)]
pub struct Args {
    /// Run against a throwaway in-memory store
    #[arg(long)]
    pub test: bool,

    /// SQLite file holding the recitation logs
    #[arg(long, value_name = "PATH")]
    pub db_path: Option<PathBuf>,

    /// Treat this date (YYYY-MM-DD) as today
    #[arg(long, value_name = "DATE")]
    pub override_date: Option<String>,

    /// Student whose logs are analysed; every log is used when omitted
    #[arg(long, value_name = "ID")]
    pub user: Option<String>,

    /// Number of days in the daily trend charts
    #[arg(
        long,
        value_name = "N",
        default_value_t = DEFAULT_TREND_DAYS,
        value_parser = RangedU64ValueParser::<usize>::new().range(1..=MAX_TREND_DAYS)
    )]
    pub days: usize,

    /// Number of weeks in the weekly progress table
    #[arg(
        long,
        value_name = "N",
        default_value_t = DEFAULT_PROGRESS_WEEKS,
        value_parser = RangedU64ValueParser::<usize>::new().range(1..=MAX_PROGRESS_WEEKS)
    )]
    pub weeks: usize,

    /// JSON export of logs to load into the store before reporting
    #[arg(long, value_name = "FILE")]
    pub import: Option<PathBuf>,

    /// Print the analytics as JSON instead of a text report
    #[arg(long)]
    pub json: bool,

    /// Disable coloured output
    #[arg(long)]
    pub no_color: bool,
}

impl Default for Args {
    fn default() -> Self {
        Args::parse_from(["hifz_tracker"])
    }
}

impl Args {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Args::parse()
    }

    /// Parses `--override-date`, which pins "today" for every date-relative figure
    pub fn validate_override_date(&self) -> Result<Option<NaiveDate>, String> {
        let Some(date_str) = &self.override_date else {
            return Ok(None);
        };
        NaiveDate::parse_from_str(date_str, DATE_FORMAT)
            .map(Some)
            .map_err(|_| {
                format!(
                    "Invalid date format for --override-date: '{}'. Expected YYYY-MM-DD",
                    date_str
                )
            })
    }
}

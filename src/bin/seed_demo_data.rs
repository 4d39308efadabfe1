use chrono::Local;
use hifz_tracker::database::Database;
use hifz_tracker::database_factory::DEFAULT_DB_PATH;
use hifz_tracker::demo_data::{demo_students, generate_demo_logs};
use std::env;

const DEMO_SCHOOL_DAYS: usize = 14;

fn main() {
    env_logger::init();
    let args: Vec<String> = env::args().collect();

    if args.len() > 2 {
        eprintln!("Usage: {} [database_file]", args[0]);
        eprintln!();
        eprintln!("Fills the log store with a demo classroom's recitation history.");
        eprintln!();
        eprintln!("Arguments:");
        eprintln!(
            "  [database_file]  Path to the SQLite database file (default: {})",
            DEFAULT_DB_PATH
        );
        std::process::exit(1);
    }

    let db_path = args.get(1).map(String::as_str).unwrap_or(DEFAULT_DB_PATH);

    let db = match Database::new(db_path) {
        Ok(db) => db,
        Err(e) => {
            eprintln!("Error opening database: {}", e);
            std::process::exit(1);
        }
    };

    let students = demo_students();
    let today = Local::now().date_naive();
    let logs = generate_demo_logs(&mut rand::thread_rng(), &students, today, DEMO_SCHOOL_DAYS);

    let imported = match db.import_logs(&logs) {
        Ok(count) => count,
        Err(e) => {
            eprintln!("Error saving demo logs: {}", e);
            std::process::exit(1);
        }
    };

    println!(
        "Demo database created at {} with {} logs for {} students",
        db_path,
        imported,
        students.len()
    );
    for student in &students {
        println!("  {} ({})", student.name, student.id);
    }
}

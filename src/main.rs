use hifz_tracker::analytics::Analytics;
use hifz_tracker::cli::Args;
use hifz_tracker::database_factory::{DatabaseConfig, DatabaseFactory};
use hifz_tracker::date_provider::{DateProvider, OverrideDateProvider, SystemDateProvider};
use hifz_tracker::report::render_report;
use log::info;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse_args();

    let override_date = match args.validate_override_date() {
        Ok(date) => date,
        Err(message) => {
            eprintln!("{}", message);
            std::process::exit(1);
        }
    };
    let date_provider: Box<dyn DateProvider> = match override_date {
        Some(date) => {
            info!("Using overridden date {}", date);
            Box::new(OverrideDateProvider::new(date))
        }
        None => Box::new(SystemDateProvider),
    };

    if args.no_color {
        colored::control::set_override(false);
    }

    let db = DatabaseFactory::create(DatabaseConfig::from_args(&args))?;

    if let Some(path) = &args.import {
        let imported = db.import_logs_from_file(path)?;
        println!("Imported {} logs from {}", imported, path.display());
    }

    let logs = match &args.user {
        Some(user_id) => db.logs_for_user(user_id)?,
        None => db.all_logs()?,
    };
    info!("Loaded {} logs", logs.len());

    let analytics = Analytics::with_date_provider(&logs, date_provider.as_ref());
    let snapshot = analytics.snapshot(args.days, args.weeks);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        if logs.is_empty() {
            println!("No recitation logs found in the database.");
            return Ok(());
        }
        print!("{}", render_report(&snapshot, args.user.as_deref())?);
    }

    Ok(())
}

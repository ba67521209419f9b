use crate::calendar::{CalendarSource, EventFile, GoogleCalendar};
use crate::catalog::CatalogFile;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::{CollectSummary, collect};
use crate::errors::{AppError, AppResult};
use crate::export::{ExportFormat, ensure_writable, export_csv, export_json};
use crate::ui::messages::{header, info, warning};
use crate::utils::date::query_window;
use crate::utils::path::expand_tilde;
use std::path::Path;

/// Handle the `collect` subcommand
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Collect {
        calendar,
        events,
        from,
        to,
        format,
        file,
        force,
    } = cmd
    {
        //
        // 1. Catalog for the selected calendar
        //
        let catalog_file = CatalogFile::load(&expand_tilde(&cfg.catalog))?;
        let catalog = catalog_file.resolve(calendar.as_deref())?;

        //
        // 2. Raw events
        //
        let window = match (from, to) {
            (Some(f), Some(t)) => Some(query_window(f, t)?),
            (None, None) => None,
            _ => {
                return Err(AppError::InvalidDate(
                    "--from and --to must be given together".into(),
                ));
            }
        };

        let raw_events = match (events, window) {
            (Some(path), Some((start, end))) => EventFile::new(Path::new(path)).fetch(start, end)?,
            (Some(path), None) => EventFile::new(Path::new(path)).read_all()?,
            (None, Some((start, end))) => {
                info(format!("Fetching events for calendar '{}'", catalog.name()));
                GoogleCalendar::for_catalog(cfg, catalog)?.fetch(start, end)?
            }
            (None, None) => {
                return Err(AppError::InvalidDate(
                    "--from/--to are required when reading from Google Calendar".into(),
                ));
            }
        };

        //
        // 3. Match + synthesize
        //
        let collected = collect(&raw_events, catalog, cfg.match_threshold);
        print_summary(&collected.summary);

        if collected.rows.is_empty() {
            warning("No shifts produced. Nothing to export.");
            return Ok(());
        }

        //
        // 4. Review file
        //
        let path = Path::new(file);
        ensure_writable(path, "Review file", *force)?;
        match format {
            ExportFormat::Csv => export_csv(&collected.rows, path)?,
            ExportFormat::Json => export_json(&collected.rows, path)?,
        }
    }

    Ok(())
}

fn print_summary(summary: &CollectSummary) {
    header("Collect summary");
    println!("Events read      : {}", summary.events);
    println!("Default template : {}", summary.fallbacks);
    println!("Shifts produced  : {}", summary.shifts);
    println!("Needs skipped    : {}", summary.skipped);
    println!("Without need id  : {}", summary.unmapped);
    println!();

    if summary.unmapped > 0 {
        warning(format!(
            "{} shift(s) have no need id; fill them in before submitting or they will be ignored",
            summary.unmapped
        ));
    }
}

use crate::catalog::{CatalogFile, TemplateCatalog};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::match_title;
use crate::errors::AppResult;
use crate::ui::messages::{header, info, success, warning};
use crate::utils::path::expand_tilde;

/// Handle the `catalog` subcommand
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Catalog {
        calendar,
        list,
        title,
    } = cmd
    {
        let path = expand_tilde(&cfg.catalog);
        let file = CatalogFile::load(&path)?;
        success(format!(
            "Catalog OK: {} ({})",
            path.display(),
            file.names().join(", ")
        ));

        if *list {
            match calendar {
                Some(name) => print_calendar(file.calendar(name)?),
                None => file.calendars().iter().for_each(print_calendar),
            }
        }

        if let Some(title) = title {
            let catalog = file.resolve(calendar.as_deref())?;
            let m = match_title(title, catalog, cfg.match_threshold);
            if m.fallback {
                warning(format!(
                    "'{title}' → default template (best score {} < threshold {})",
                    m.score, cfg.match_threshold
                ));
            } else {
                info(format!("'{title}' → '{}' (score {})", m.keyword, m.score));
            }
            for spec in &m.template.need_ids {
                println!(
                    "   - {:<24} need_id={:<10} slots={}",
                    spec.description,
                    if spec.id.is_empty() { "-" } else { spec.id.as_str() },
                    spec.slots
                );
            }
        }
    }

    Ok(())
}

fn print_calendar(catalog: &TemplateCatalog) {
    header(format!("Calendar '{}'", catalog.name()));
    for (keyword, entry) in catalog.iter() {
        println!(
            "{:<28} {:<10} {:<12} {}",
            keyword,
            entry.kind.et_as_str(),
            entry.group.as_deref().unwrap_or("-"),
            entry.description
        );
        for spec in &entry.need_ids {
            let max = spec
                .max_length
                .map(|m| format!("{m}m"))
                .unwrap_or_else(|| "∞".to_string());
            println!(
                "    {:<24} id={:<10} slots={:<4} offsets={:+}/{:+} max={}",
                spec.description,
                if spec.id.is_empty() { "-" } else { spec.id.as_str() },
                spec.slots,
                spec.offset_start,
                spec.offset_end,
                max
            );
        }
    }
    println!();
}

use crate::api::{AmplifyClient, ShiftApi};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::submit::remove_duplicates;
use crate::core::{BatchSubmitter, GroupStatus, Prepared, RetryPolicy, SubmissionReport};
use crate::errors::{AppError, AppResult};
use crate::export::{ensure_writable, export_payload, import_csv};
use crate::ui::messages::{error, header, info, success, warning};
use std::path::Path;

/// Handle the `submit` subcommand
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Submit { check, .. } = cmd {
        if *check {
            return submit_with(cmd, cfg, None);
        }
        let client = AmplifyClient::from_config(cfg)?;
        return submit_with(cmd, cfg, Some(&client));
    }

    Ok(())
}

/// Run `submit` against `api`; `None` is check mode (nothing is sent).
pub fn submit_with(cmd: &Commands, cfg: &Config, api: Option<&dyn ShiftApi>) -> AppResult<()> {
    if let Commands::Submit {
        file,
        payload,
        dedupe,
        force,
        ..
    } = cmd
    {
        let mut rows = import_csv(Path::new(file))?;
        if *dedupe {
            let before = rows.len();
            rows = remove_duplicates(rows);
            info(format!("Removed {} duplicate row(s)", before - rows.len()));
        }

        // Checked before anything is sent.
        if let Some(out) = payload {
            ensure_writable(Path::new(out), "Payload file", *force)?;
        }

        let prepared = Prepared::from_rows(&rows);

        let report = match api {
            Some(api) => {
                BatchSubmitter::new(api, RetryPolicy::from_config(cfg)).submit_prepared(prepared)
            }
            None => {
                info("Check mode: requests are built but not sent");
                BatchSubmitter::dry_run().submit_prepared(prepared)
            }
        };

        print_report(&report, &cfg.api_base_url);

        if let Some(out) = payload {
            export_payload(&report.batches(), Path::new(out))?;
        }

        if report.has_failures() {
            return Err(AppError::GroupsFailed(report.failed_count()));
        }
    }

    Ok(())
}

fn print_report(report: &SubmissionReport, base_url: &str) {
    header(if report.dry_run {
        "Submission report (check mode)"
    } else {
        "Submission report"
    });

    for group in &report.groups {
        let url = format!(
            "{}/needs/{}/shifts",
            base_url.trim_end_matches('/'),
            group.need_id()
        );
        let title = group.title.as_deref().unwrap_or("-");

        match &group.status {
            GroupStatus::DryRun => {
                info(format!("{url} | {} shift(s) | not sent", group.batch.len()));
                match serde_json::to_string_pretty(&group.batch.body) {
                    Ok(json) => println!("{json}"),
                    Err(e) => warning(format!("cannot render payload: {e}")),
                }
            }
            GroupStatus::Submitted(created) => success(format!(
                "{url} | {title} | {} shift(s) created after {} attempt(s)",
                created.created, group.attempts
            )),
            GroupStatus::Failed(err) => error(format!(
                "{url} | {} shift(s) NOT created after {} attempt(s): {err}",
                group.batch.len(),
                group.attempts
            )),
        }
    }

    for rejected in &report.rejected {
        warning(format!(
            "line {} ({}) rejected: {}",
            rejected.position, rejected.label, rejected.error
        ));
    }

    if report.unmapped > 0 {
        warning(format!(
            "{} row(s) without need id were ignored",
            report.unmapped
        ));
    }

    println!();
    println!("Groups           : {}", report.groups.len());
    println!("Groups failed    : {}", report.failed_count());
    println!("Shifts created   : {}", report.created_count());
    println!("Rows rejected    : {}", report.rejected.len());
    println!("Rows unmapped    : {}", report.unmapped);
}

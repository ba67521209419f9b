//! starpass library root.
//! Exposes the CLI parser, the high-level run() function and the
//! event-to-shift engine (catalog, matcher, synthesizer, validator,
//! batch submitter).

pub mod api;
pub mod calendar;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod core;
pub mod errors;
pub mod export;
pub mod logging;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;
use std::path::PathBuf;
use utils::path::expand_tilde;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli, cfg),
        Commands::Config { .. } => cli::commands::config::handle(cli, cfg),
        Commands::Catalog { .. } => cli::commands::catalog::handle(&cli.command, cfg),
        Commands::Collect { .. } => cli::commands::collect::handle(&cli.command, cfg),
        Commands::Submit { .. } => cli::commands::submit::handle(&cli.command, cfg),
    }
}

/// Config file in use: `--config` or the platform default.
pub fn config_path(cli: &Cli) -> PathBuf {
    cli.config
        .as_deref()
        .map(expand_tilde)
        .unwrap_or_else(Config::config_file)
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    // 1️⃣ parse CLI
    let cli = Cli::parse();

    // 2️⃣ logging + .env secrets
    logging::init(cli.verbose);
    logging::load_dotenv();

    // 3️⃣ load config once
    let mut cfg = Config::load(&config_path(&cli))?;

    // 4️⃣ command-line catalog override
    if let Some(catalog) = &cli.catalog {
        cfg.catalog = catalog.clone();
    }

    dispatch(&cli, &cfg)
}

use crate::catalog::STARTER_CATALOG;
use crate::cli::parser::Cli;
use crate::config::Config;
use crate::config_path;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use crate::utils::path::expand_tilde;
use std::fs;

/// Handle the `init` command
///
/// Creates, when missing:
///  - the configuration file
///  - a starter template catalog at the configured path
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let path = config_path(cli);
    if !Config::init(&path)? {
        info(format!("Config file already exists: {}", path.display()));
    }

    let catalog = expand_tilde(&cfg.catalog);
    if catalog.exists() {
        info(format!("Catalog already exists: {}", catalog.display()));
    } else {
        if let Some(dir) = catalog.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(&catalog, STARTER_CATALOG)?;
        success(format!("Catalog: {}", catalog.display()));
    }

    success("starpass initialization completed");
    Ok(())
}

use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, warning};
use std::io::{self, BufRead, Write};
use std::path::Path;

/// Overwrite guard for output files (`what` names the file in prompts).
///
/// A missing file or `force` passes. Otherwise the user must answer "y";
/// a closed stdin counts as "no".
pub fn ensure_writable(path: &Path, what: &str, force: bool) -> AppResult<()> {
    if force || !path.exists() {
        return Ok(());
    }

    warning(format!("{what} '{}' already exists.", path.display()));
    print!("Replace it? [y/N]: ");
    io::stdout().flush().ok();

    let mut answer = String::new();
    let read = io::stdin().lock().read_line(&mut answer)?;

    if read > 0 && matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes") {
        info(format!("{what} will be replaced."));
        return Ok(());
    }

    Err(AppError::Export(format!(
        "{} left untouched (use --force to replace it)",
        path.display()
    )))
}

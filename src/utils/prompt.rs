use crate::errors::AppResult;
use crate::ui::messages::warning;
use std::io::{self, BufRead, Write};
use std::path::Path;

/// Yes/no question on stdin; anything but `y`/`yes` is a no.
pub fn confirm(question: &str) -> AppResult<bool> {
    print!("{question} [y/N]: ");
    io::stdout().flush().ok();

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;

    Ok(matches!(line.trim().to_lowercase().as_str(), "y" | "yes"))
}

/// Whether `path` may be (re)written: always when it is missing or `force`
/// is set, otherwise the user decides.
pub fn may_overwrite(path: &Path, force: bool) -> AppResult<bool> {
    if force || !path.exists() {
        return Ok(true);
    }

    warning(format!("'{}' already exists.", path.display()));
    confirm("Overwrite it?")
}

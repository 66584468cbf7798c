//! Interactive confirmation prompt for destructive operations.

use std::io;

use console::Term;

/// Ask for confirmation on the terminal; only `y` / `Y` count as assent.
/// Everything else, including an empty line, declines.
pub fn confirm(message: &str) -> io::Result<bool> {
    let term = Term::stdout();
    term.write_str(&format!("{message} [y/N]: "))?;
    let input = term.read_line()?;
    Ok(matches!(input.trim(), "y" | "Y"))
}

//! Terminal output formatting for the jrp CLI.

use chrono::{DateTime, Utc};
use console::{measure_text_width, style};
use jrp_core::models::History;

/// Output formats for list-producing commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Format {
    /// Aligned columns with a header row.
    Table,
    /// One phrase per line.
    Plain,
}

/// Print a result set in the requested format. An empty set gets a neutral
/// one-liner instead of an empty table.
pub fn print_histories(histories: &[History], format: Format) {
    if histories.is_empty() {
        println!("No histories found.");
        return;
    }

    match format {
        Format::Plain => {
            for history in histories {
                println!("{}", history.phrase);
            }
        }
        Format::Table => print!("{}", render_table(histories)),
    }
}

/// Neutral notice: something legitimate happened, just not what the user
/// asked for. Rendered yellow; callers exit zero.
pub fn notice(message: &str) {
    eprintln!("{}", style(message).yellow());
}

/// Hard failure. Rendered red; callers exit non-zero.
pub fn failure(message: &str) {
    eprintln!("{}", style(message).red());
}

const HEADERS: [&str; 7] = ["ID", "Phrase", "Prefix", "Suffix", "Fav", "Created", "Updated"];

fn render_table(histories: &[History]) -> String {
    let rows: Vec<[String; 7]> = histories.iter().map(row_cells).collect();

    // measure_text_width keeps the alignment correct for double-width
    // characters as far as the terminal reports them.
    let mut widths: Vec<usize> = HEADERS.iter().map(|h| measure_text_width(h)).collect();
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(measure_text_width(cell));
        }
    }

    let mut out = String::new();
    push_row(&mut out, &HEADERS.map(String::from), &widths);
    push_separator(&mut out, &widths);
    for row in &rows {
        push_row(&mut out, row, &widths);
    }
    out
}

fn row_cells(history: &History) -> [String; 7] {
    [
        history.id.to_string(),
        history.phrase.clone(),
        history.prefix.as_deref().unwrap_or("-").to_string(),
        history.suffix.as_deref().unwrap_or("-").to_string(),
        if history.is_favorited { "✓" } else { "" }.to_string(),
        format_time(history.created_at),
        format_time(history.updated_at),
    ]
}

fn format_time(t: DateTime<Utc>) -> String {
    t.format("%Y-%m-%d %H:%M:%S").to_string()
}

fn push_row(out: &mut String, cells: &[String; 7], widths: &[usize]) {
    for (i, cell) in cells.iter().enumerate() {
        out.push_str(cell);
        if i + 1 < cells.len() {
            let pad = widths[i].saturating_sub(measure_text_width(cell));
            out.push_str(&" ".repeat(pad));
            out.push_str("  ");
        }
    }
    out.push('\n');
}

fn push_separator(out: &mut String, widths: &[usize]) {
    for (i, width) in widths.iter().enumerate() {
        out.push_str(&"-".repeat(*width));
        if i + 1 < widths.len() {
            out.push_str("  ");
        }
    }
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history(id: i64, phrase: &str, prefix: Option<&str>) -> History {
        let now = Utc::now();
        History {
            id,
            phrase: phrase.to_string(),
            prefix: prefix.map(ToOwned::to_owned),
            suffix: None,
            is_favorited: false,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn table_has_header_separator_and_one_line_per_row() {
        let rows = vec![history(1, "水晶", Some("水")), history(2, "火山", None)];
        let table = render_table(&rows);

        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("ID"));
        assert!(lines[1].starts_with("--"));
        assert!(lines[2].contains("水晶"));
        assert!(lines[3].contains("火山"));
    }

    #[test]
    fn absent_provenance_renders_as_dash() {
        let table = render_table(&[history(1, "火山", None)]);
        assert!(table.lines().nth(2).is_some_and(|l| l.contains('-')));
    }
}

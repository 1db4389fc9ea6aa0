use crate::core::{poster_url, CatalogEntry, RankedStream};
use std::fmt::Write;

/// Cards per grid row.
pub const GRID_COLUMNS: usize = 2;
const CELL_WIDTH: usize = 38;

/// Shortens `text` to at most `max` characters, marking the cut with `...`.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let keep = max.saturating_sub(3);
    let mut out: String = text.chars().take(keep).collect();
    out.push_str("...");
    out
}

/// Renders catalog entries as a numbered grid. Numbers are 1-based and map to
/// `entries[n - 1]`.
pub fn render_grid(entries: &[CatalogEntry], columns: usize) -> String {
    let columns = columns.max(1);
    let mut out = String::new();

    for (row_index, row) in entries.chunks(columns).enumerate() {
        let cells: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(col, entry)| {
                let number = row_index * columns + col + 1;
                let title = if entry.title.is_empty() {
                    "(untitled)"
                } else {
                    entry.title.as_str()
                };
                format!("[{:>2}] {}", number, truncate(title, CELL_WIDTH - 5))
            })
            .collect();

        let line = cells
            .iter()
            .map(|c| format!("{:<width$}", c, width = CELL_WIDTH))
            .collect::<Vec<_>>()
            .join("  ");
        let _ = writeln!(out, "{}", line.trim_end());
    }

    out
}

/// One line per entry with id and poster URL, for non-interactive listings.
pub fn render_catalog_details(entries: &[CatalogEntry], image_base: &str) -> String {
    let mut out = String::new();
    for (i, entry) in entries.iter().enumerate() {
        let poster = entry
            .poster_path
            .as_deref()
            .map(|p| poster_url(image_base, p))
            .unwrap_or_else(|| "-".to_string());
        let _ = writeln!(out, "{:>3}. {}  id={}  poster={}", i + 1, entry.title, entry.id, poster);
    }
    out
}

pub fn render_streams(streams: &[RankedStream]) -> String {
    let mut out = String::new();
    for (i, stream) in streams.iter().enumerate() {
        let host = if stream.host.is_empty() {
            "UNKNOWN".to_string()
        } else {
            stream.host.to_uppercase()
        };
        let actions = if stream.playable {
            "PLAY IN APP | BROWSER"
        } else {
            "BROWSER"
        };
        let _ = writeln!(out, "[{:>2}] {:<25} {}", i + 1, host, actions);
    }
    out
}

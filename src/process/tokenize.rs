// src/process/tokenize.rs
use tracing::{debug, trace, warn};

/// One logical sheet row. Cell 0 is unused, cell 1 holds the row label.
pub type RawRow = Vec<String>;

/// Split exported sheet text into rows of cells.
///
/// A physical line with an odd number of `"` leaves the row open; following
/// lines are appended (joined with `\n`) until the running count is even
/// again. Doubled quotes contribute two to the count, so they never flip the
/// state. An unterminated quote at end of input flushes what was gathered.
pub fn tokenize(text: &str) -> Vec<RawRow> {
    let mut rows = Vec::new();
    let mut pending = String::new();
    let mut open = false;

    for line in text.split('\n') {
        let line = line.strip_suffix('\r').unwrap_or(line);
        let odd = line.matches('"').count() % 2 == 1;

        if open {
            pending.push('\n');
            pending.push_str(line);
            if odd {
                open = false;
                rows.push(split_row(&pending));
                pending.clear();
            }
        } else if odd {
            open = true;
            pending.push_str(line);
        } else {
            rows.push(split_row(line));
        }
    }

    if open {
        warn!(
            pending_len = pending.len(),
            "unterminated quoted field at end of sheet"
        );
        rows.push(split_row(&pending));
    }

    debug!(rows = rows.len(), "tokenized sheet");
    rows
}

/// Split one logical row on unquoted commas, unquoting and trimming cells.
pub fn split_row(row: &str) -> RawRow {
    let mut cells = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = row.chars().peekable();

    while let Some(ch) = chars.next() {
        if in_quotes {
            match ch {
                '"' if chars.peek() == Some(&'"') => {
                    current.push('"');
                    chars.next();
                }
                '"' => in_quotes = false,
                _ => current.push(ch),
            }
        } else {
            match ch {
                '"' => in_quotes = true,
                ',' => cells.push(std::mem::take(&mut current).trim().to_string()),
                _ => current.push(ch),
            }
        }
    }
    cells.push(current.trim().to_string());

    trace!(cells = cells.len(), "split row");
    cells
}

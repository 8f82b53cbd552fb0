// src/process/utils.rs
/// Characters dropped before a cell is parsed as a number.
const NOISE: &[char] = &['"', '\'', ',', '€', '$', '£', '%'];

/// Parse a locale-formatted cell (`"€1,234"`, `"30%"`, `" 9.0 % "`).
///
/// Returns `None` for blank cells, the `-` placeholder, and anything that is
/// not a finite number once the noise characters are removed. Percentages are
/// returned as fractions.
pub fn parse_number(cell: &str) -> Option<f64> {
    let trimmed = cell.trim();
    if trimmed.is_empty() || trimmed == "-" {
        return None;
    }
    let is_percent = trimmed.contains('%');
    let cleaned: String = trimmed
        .chars()
        .filter(|c| !c.is_whitespace() && !NOISE.contains(c))
        .collect();
    let n = cleaned.parse::<f64>().ok().filter(|n| n.is_finite())?;
    Some(if is_percent { n / 100.0 } else { n })
}

/// Display-oriented coercion: anything unparseable counts as zero.
pub fn coerce(cell: &str) -> f64 {
    parse_number(cell).unwrap_or(0.0)
}

/// Take at most `max` characters, appending `...` when anything was cut.
pub fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((byte_idx, _)) => format!("{}...", &s[..byte_idx]),
        None => s.to_string(),
    }
}

/// Keep the leading `YYYY-MM` of a date-like cell.
pub fn year_month(s: &str) -> String {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return "-".to_string();
    }
    trimmed.chars().take(7).collect()
}

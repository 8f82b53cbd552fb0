// src/process/locate.rs
//! Label-driven lookups over tokenized sheet rows.
//!
//! Misses never fail: an absent row reads as twelve zeros, an absent section
//! as an empty slice. Misses are logged so label drift in the source sheet
//! shows up in the logs.

use tracing::{debug, trace};

use super::tokenize::RawRow;
use super::utils::{coerce, parse_number};
use crate::schema::types::Monthly;

/// Cell holding the row label.
pub const LABEL_COL: usize = 1;
/// First of the twelve monthly cells.
pub const FIRST_MONTH_COL: usize = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LabelMatch {
    Contains,
    Exact,
}

impl LabelMatch {
    fn matches(self, row: &RawRow, label: &str) -> bool {
        let Some(cell) = row.get(LABEL_COL) else {
            return false;
        };
        let cell = cell.trim();
        match self {
            LabelMatch::Contains => !cell.is_empty() && cell.contains(label),
            LabelMatch::Exact => cell == label,
        }
    }
}

/// Trimmed label of `row`, empty when the row is too short.
pub fn label(row: &RawRow) -> &str {
    row.get(LABEL_COL).map(|s| s.trim()).unwrap_or("")
}

pub fn position(rows: &[RawRow], label: &str, mode: LabelMatch) -> Option<usize> {
    let found = rows.iter().position(|r| mode.matches(r, label));
    if found.is_none() {
        debug!(label, ?mode, "label not found");
    }
    found
}

/// First row whose label contains `label`.
pub fn find_row<'a>(rows: &'a [RawRow], label: &str) -> Option<&'a RawRow> {
    position(rows, label, LabelMatch::Contains).map(|i| &rows[i])
}

/// Index of the section header row labelled exactly `label`.
pub fn find_section(rows: &[RawRow], label: &str) -> Option<usize> {
    position(rows, label, LabelMatch::Exact)
}

/// Rows from the `header` row up to (not including) the next row whose
/// label is one of `boundaries`, or to the end of the sheet.
pub fn section<'a>(rows: &'a [RawRow], header: &str, boundaries: &[&str]) -> &'a [RawRow] {
    let Some(start) = find_section(rows, header) else {
        return &[];
    };
    let end = rows[start + 1..]
        .iter()
        .position(|r| {
            let l = label(r);
            l != header && boundaries.contains(&l)
        })
        .map(|offset| start + 1 + offset)
        .unwrap_or(rows.len());
    trace!(header, start, end, "section bounds");
    &rows[start..end]
}

/// Twelve monthly values of a located row; `None` when the row is absent.
pub fn monthly_values_opt(row: Option<&RawRow>) -> Option<Monthly> {
    let row = row?;
    Some(std::array::from_fn(|m| {
        row.get(FIRST_MONTH_COL + m)
            .and_then(|c| parse_number(c))
            .unwrap_or(0.0)
    }))
}

/// Twelve monthly values, all zero when the row is absent.
pub fn monthly_values(row: Option<&RawRow>) -> Monthly {
    monthly_values_opt(row).unwrap_or([0.0; 12])
}

/// Numeric value at `(row, col)`; a missing cell in an existing row is zero.
pub fn cell_value(rows: &[RawRow], row: usize, col: usize) -> Option<f64> {
    let r = rows.get(row)?;
    Some(r.get(col).map(|c| coerce(c)).unwrap_or(0.0))
}

/// Highest month with a non-zero value, or 0.
pub fn current_month_idx(values: &Monthly) -> usize {
    values.iter().rposition(|v| *v != 0.0).unwrap_or(0)
}

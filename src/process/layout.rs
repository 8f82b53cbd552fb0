// src/process/layout.rs
//! Fixed-coordinate reads for values the label search cannot reach.
//!
//! The channel allocation split and annual targets sit in the sheet's
//! Total/Average column on rows whose labels are not unique, so they are read
//! by position. Keep this table in step with the sheet layout; a layout change
//! shows up here as a `warn!`, separate from label misses in `locate`.

use tracing::warn;

use super::locate::cell_value;
use super::tokenize::RawRow;
use crate::schema::types::{Channel, ChannelFigures};

/// The sheet's Total/Average column.
pub const TOTAL_COLUMN: usize = 14;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellRef {
    pub row: usize,
    pub col: usize,
    /// Used when the row does not exist at all.
    pub default: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SummaryCells {
    pub allocation: CellRef,
    pub annual_target: CellRef,
}

const fn summary(pct_row: usize, pct_default: f64) -> SummaryCells {
    SummaryCells {
        allocation: CellRef {
            row: pct_row,
            col: TOTAL_COLUMN,
            default: pct_default,
        },
        annual_target: CellRef {
            row: pct_row + 1,
            col: TOTAL_COLUMN,
            default: 0.0,
        },
    }
}

pub static SUMMARY_CELLS: ChannelFigures<SummaryCells> = ChannelFigures {
    referrals: summary(19, 0.3),
    resellers: summary(21, 0.6),
    agencies: summary(23, 0.1),
};

/// Read one fixed cell, falling back to its default when the row is missing.
pub fn read_cell(rows: &[RawRow], at: &CellRef, what: &str) -> f64 {
    cell_value(rows, at.row, at.col).unwrap_or_else(|| {
        warn!(
            what,
            row = at.row,
            col = at.col,
            sheet_rows = rows.len(),
            "fixed-position row missing, using default"
        );
        at.default
    })
}

/// Allocation fractions and annual targets, one per channel.
pub fn read_summary(rows: &[RawRow]) -> (ChannelFigures<f64>, ChannelFigures<f64>) {
    let allocation = ChannelFigures::from_fn(|c: Channel| {
        read_cell(rows, &SUMMARY_CELLS.get(c).allocation, "allocation")
    });
    let annual_target = ChannelFigures::from_fn(|c: Channel| {
        read_cell(rows, &SUMMARY_CELLS.get(c).annual_target, "annual target")
    });
    (allocation, annual_target)
}

// src/process/partners.rs
use tracing::{debug, info, instrument, trace, warn};

use super::locate::{find_section, label, position, LabelMatch};
use super::tokenize::RawRow;
use super::utils::{coerce, truncate_chars, year_month};
use crate::schema::types::{Channel, ContractStatus, Monthly, PartnerRecord};

/// Rows after this one belong to partners without a signed agreement.
pub const NO_AGREEMENT: &str = "No Agreement";

/// Commission text longer than this is cut and marked with `...`.
pub const COMMISSION_MAX_CHARS: usize = 60;

/// Column positions on a partner sheet.
#[derive(Debug, Clone, Copy)]
pub struct PartnerColumns {
    pub name: usize,
    pub country: usize,
    pub contact: usize,
    pub commission: usize,
    pub start: usize,
    pub arr: usize,
    pub mrr_avg: usize,
    pub first_month: usize,
}

pub const PARTNER_COLUMNS: PartnerColumns = PartnerColumns {
    name: 1,
    country: 2,
    contact: 3,
    commission: 4,
    start: 6,
    arr: 8,
    mrr_avg: 10,
    first_month: 11,
};

/// Label of the header row on each partner sheet.
pub fn header_label(channel: Channel) -> &'static str {
    match channel {
        Channel::Referrals => "Referral",
        Channel::Resellers => "Reseller",
        Channel::Agencies => "Agency",
    }
}

fn text(row: &RawRow, col: usize) -> &str {
    row.get(col).map(|s| s.trim()).unwrap_or("")
}

fn number(row: &RawRow, col: usize) -> f64 {
    row.get(col).map(|s| coerce(s)).unwrap_or(0.0)
}

fn partner_from_row(
    row: &RawRow,
    cols: &PartnerColumns,
    contract: ContractStatus,
) -> PartnerRecord {
    let mrr2026: Monthly = std::array::from_fn(|m| number(row, cols.first_month + m));
    PartnerRecord {
        name: text(row, cols.name).to_string(),
        country: text(row, cols.country).to_string(),
        contact_person: text(row, cols.contact).to_string(),
        commission: truncate_chars(text(row, cols.commission), COMMISSION_MAX_CHARS),
        start: year_month(text(row, cols.start)),
        arr: number(row, cols.arr),
        mrr_avg: number(row, cols.mrr_avg),
        mrr2026,
        contract,
    }
}

/// Partners listed under `header` on one partner sheet.
///
/// Named rows between the header and the `No Agreement` row are signed; named
/// rows after it, up to the end of the sheet, are unsigned. A sheet without
/// the header yields no partners.
#[instrument(level = "debug", skip(rows), fields(rows = rows.len()))]
pub fn parse_partner_sheet(rows: &[RawRow], header: &str) -> Vec<PartnerRecord> {
    let Some(header_idx) = find_section(rows, header) else {
        warn!(header, "partner header row not found");
        return Vec::new();
    };
    let body = &rows[header_idx + 1..];
    let sentinel = position(body, NO_AGREEMENT, LabelMatch::Exact);
    debug!(header_idx, ?sentinel, "partner sheet bounds");

    let partners: Vec<PartnerRecord> = body
        .iter()
        .enumerate()
        .filter(|(_, r)| {
            let name = label(r);
            !name.is_empty() && name != NO_AGREEMENT
        })
        .map(|(i, r)| {
            let contract = match sentinel {
                Some(s) if i > s => ContractStatus::Unsigned,
                _ => ContractStatus::Signed,
            };
            trace!(name = label(r), ?contract, "partner row");
            partner_from_row(r, &PARTNER_COLUMNS, contract)
        })
        .collect();

    info!(
        header,
        partners = partners.len(),
        unsigned = partners
            .iter()
            .filter(|p| p.contract == ContractStatus::Unsigned)
            .count(),
        "parsed partner sheet"
    );
    partners
}

/// Parse the partner sheet belonging to `channel`.
pub fn parse_channel_partners(rows: &[RawRow], channel: Channel) -> Vec<PartnerRecord> {
    parse_partner_sheet(rows, header_label(channel))
}

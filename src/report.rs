// src/report.rs
//! Derived figures the dashboard shows on top of a loaded dataset.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::schema::types::{
    Channel, ContractStatus, Dataset, Monthly, PartnerRecord, Partners, MONTHS,
};

/// Order and clamp a month range to `0..=11`.
pub fn normalize_range(from: usize, to: usize) -> (usize, usize) {
    let (a, b) = (from.min(11), to.min(11));
    (a.min(b), a.max(b))
}

/// Sum of `values[from..=to]`, with the range normalized first.
pub fn period_sum(values: &Monthly, from: usize, to: usize) -> f64 {
    let (from, to) = normalize_range(from, to);
    values[from..=to].iter().sum()
}

/// Running totals, month by month.
pub fn cumulative(values: &Monthly) -> Monthly {
    let mut acc = 0.0;
    values.map(|v| {
        acc += v;
        acc
    })
}

/// Actual over target, 0 when there is no positive target.
pub fn achievement(actual: f64, target: f64) -> f64 {
    if target > 0.0 {
        actual / target
    } else {
        0.0
    }
}

/// `YTD`, a single month, or `Jan-Mar`.
pub fn period_label(from: usize, to: usize, current_month_idx: usize) -> String {
    let (from, to) = normalize_range(from, to);
    if from == 0 && to == current_month_idx {
        "YTD".to_string()
    } else if from == to {
        MONTHS[from].to_string()
    } else {
        format!("{}-{}", MONTHS[from], MONTHS[to])
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelSummary {
    pub channel: Channel,
    pub actual: f64,
    pub target: f64,
    pub achievement: f64,
    pub allocation: f64,
    pub partners: usize,
    pub active: usize,
}

pub fn channel_summaries(dataset: &Dataset, from: usize, to: usize) -> Vec<ChannelSummary> {
    let snap = &dataset.snapshot;
    Channel::ALL
        .iter()
        .map(|&channel| {
            let perf = snap.channels.get(channel);
            let partners = dataset.partners.get(channel);
            let actual = period_sum(&perf.closed_mrr, from, to);
            let target = period_sum(&perf.target_mrr, from, to);
            ChannelSummary {
                channel,
                actual,
                target,
                achievement: achievement(actual, target),
                allocation: *snap.allocation.get(channel),
                partners: partners.len(),
                active: partners.iter().filter(|p| p.is_active()).count(),
            }
        })
        .collect()
}

/// Partners with neither historical nor current-year revenue, by country.
pub fn inactive_by_country(partners: &Partners) -> BTreeMap<String, Vec<&PartnerRecord>> {
    let mut grouped: BTreeMap<String, Vec<&PartnerRecord>> = BTreeMap::new();
    for (_, p) in partners.all().filter(|(_, p)| !p.is_active()) {
        let country = if p.country.is_empty() {
            "Unknown".to_string()
        } else {
            p.country.clone()
        };
        grouped.entry(country).or_default().push(p);
    }
    grouped
}

/// Partners listed below the `No Agreement` row on their sheet.
pub fn unsigned_partners(partners: &Partners) -> Vec<(Channel, &PartnerRecord)> {
    partners
        .all()
        .filter(|(_, p)| p.contract == ContractStatus::Unsigned)
        .collect()
}

/// Headline figures for a month range.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodReport {
    pub label: String,
    pub closed_mrr: f64,
    pub closed_arr: f64,
    pub target_mrr: f64,
    pub achievement: f64,
    pub variance: f64,
    /// Running totals across the whole year, for the trend chart.
    pub cumulative_closed_mrr: Monthly,
    pub cumulative_target_mrr: Monthly,
    pub channels: Vec<ChannelSummary>,
    pub active_partners: usize,
    pub inactive_partners: usize,
    pub unsigned_partners: usize,
    /// Names of inactive partners, grouped by country.
    pub inactive_by_country: BTreeMap<String, Vec<String>>,
}

pub fn period_report(dataset: &Dataset, from: usize, to: usize) -> PeriodReport {
    let snap = &dataset.snapshot;
    let closed_mrr = period_sum(&snap.total_closed_mrr, from, to);
    let target_mrr = period_sum(&snap.total_target_mrr, from, to);
    let (active, inactive) = dataset
        .partners
        .all()
        .fold((0, 0), |(a, i), (_, p)| if p.is_active() { (a + 1, i) } else { (a, i + 1) });
    PeriodReport {
        label: period_label(from, to, snap.current_month_idx),
        closed_mrr,
        closed_arr: period_sum(&snap.total_closed_arr, from, to),
        target_mrr,
        achievement: achievement(closed_mrr, target_mrr),
        variance: closed_mrr - target_mrr,
        cumulative_closed_mrr: cumulative(&snap.total_closed_mrr),
        cumulative_target_mrr: cumulative(&snap.total_target_mrr),
        channels: channel_summaries(dataset, from, to),
        active_partners: active,
        inactive_partners: inactive,
        unsigned_partners: unsigned_partners(&dataset.partners).len(),
        inactive_by_country: inactive_by_country(&dataset.partners)
            .into_iter()
            .map(|(country, ps)| (country, ps.into_iter().map(|p| p.name.clone()).collect()))
            .collect(),
    }
}

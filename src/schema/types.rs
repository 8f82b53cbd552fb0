// src/schema/types.rs

use serde::{Deserialize, Serialize};

/// Twelve calendar-month values, Jan = 0 … Dec = 11.
pub type Monthly = [f64; 12];

pub const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// One of the three partner categories.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Channel {
    Referrals,
    Resellers,
    Agencies,
}

impl Channel {
    pub const ALL: [Channel; 3] = [Channel::Referrals, Channel::Resellers, Channel::Agencies];

    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Referrals => "referrals",
            Channel::Resellers => "resellers",
            Channel::Agencies => "agencies",
        }
    }
}

/// One value per channel. Serializes as `{ referrals, resellers, agencies }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChannelFigures<T> {
    pub referrals: T,
    pub resellers: T,
    pub agencies: T,
}

impl<T> ChannelFigures<T> {
    pub fn get(&self, channel: Channel) -> &T {
        match channel {
            Channel::Referrals => &self.referrals,
            Channel::Resellers => &self.resellers,
            Channel::Agencies => &self.agencies,
        }
    }

    /// Build all three entries from a per-channel constructor.
    pub fn from_fn(mut f: impl FnMut(Channel) -> T) -> Self {
        Self {
            referrals: f(Channel::Referrals),
            resellers: f(Channel::Resellers),
            agencies: f(Channel::Agencies),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Channel, &T)> {
        Channel::ALL.into_iter().map(move |c| (c, self.get(c)))
    }
}

/// Closed actuals and targets for a single channel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelPerformance {
    #[serde(rename = "closedARR")]
    pub closed_arr: Monthly,
    #[serde(rename = "closedMRR")]
    pub closed_mrr: Monthly,
    #[serde(rename = "targetMRR")]
    pub target_mrr: Monthly,
}

/// Global totals plus the per-channel breakdown of the performance sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceSnapshot {
    /// Last month with a non-zero closed MRR total.
    pub current_month_idx: usize,
    #[serde(rename = "totalClosedARR")]
    pub total_closed_arr: Monthly,
    #[serde(rename = "totalClosedMRR")]
    pub total_closed_mrr: Monthly,
    #[serde(rename = "totalTargetMRR")]
    pub total_target_mrr: Monthly,
    #[serde(rename = "companyGrowthMRR")]
    pub company_growth_mrr: Monthly,
    pub company_growth_pct: Monthly,
    #[serde(flatten)]
    pub channels: ChannelFigures<ChannelPerformance>,
    /// Share of the total target owned by each channel, sums to ~1.0.
    pub allocation: ChannelFigures<f64>,
    pub annual_target: ChannelFigures<f64>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContractStatus {
    Signed,
    Unsigned,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartnerRecord {
    pub name: String,
    pub country: String,
    pub contact_person: String,
    pub commission: String,
    /// `YYYY-MM`, or `-` when the sheet has no start date.
    pub start: String,
    /// Closed ARR before the tracked year.
    pub arr: f64,
    pub mrr_avg: f64,
    pub mrr2026: Monthly,
    pub contract: ContractStatus,
}

impl PartnerRecord {
    pub fn ytd_mrr(&self) -> f64 {
        self.mrr2026.iter().sum()
    }

    pub fn has_current_year_revenue(&self) -> bool {
        self.ytd_mrr() > 0.0
    }

    pub fn is_active(&self) -> bool {
        self.arr > 0.0 || self.has_current_year_revenue()
    }
}

pub type Partners = ChannelFigures<Vec<PartnerRecord>>;

/// Everything one load cycle produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub snapshot: PerformanceSnapshot,
    pub partners: Partners,
}

impl Partners {
    pub fn all(&self) -> impl Iterator<Item = (Channel, &PartnerRecord)> {
        self.iter()
            .flat_map(|(channel, list)| list.iter().map(move |p| (channel, p)))
    }
}

// src/process/mod.rs
pub mod layout;
pub mod locate;
pub mod partners;
pub mod performance;
pub mod tokenize;
pub mod utils;

use tracing::instrument;

use crate::schema::types::{Channel, ChannelFigures, Dataset};
use partners::parse_channel_partners;
use performance::parse_performance;
pub use tokenize::{tokenize, RawRow};

/// Parse the four sheet exports into one dataset.
///
/// Each sheet is tokenized and assembled independently, so the four run on
/// the rayon pool in parallel.
#[instrument(level = "info", skip_all, fields(perf_len = performance.len()))]
pub fn parse_dataset(performance: &str, partner_sheets: &ChannelFigures<String>) -> Dataset {
    let partners_for = |c: Channel| parse_channel_partners(&tokenize(partner_sheets.get(c)), c);

    let (snapshot, (referrals, (resellers, agencies))) = rayon::join(
        || parse_performance(&tokenize(performance)),
        || {
            rayon::join(
                || partners_for(Channel::Referrals),
                || {
                    rayon::join(
                        || partners_for(Channel::Resellers),
                        || partners_for(Channel::Agencies),
                    )
                },
            )
        },
    );

    Dataset {
        snapshot,
        partners: ChannelFigures {
            referrals,
            resellers,
            agencies,
        },
    }
}

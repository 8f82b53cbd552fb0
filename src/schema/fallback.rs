// src/schema/fallback.rs

use anyhow::{Context, Result};
use std::{fs, io::BufReader, path::Path};
use tracing::debug;

use super::types::{ChannelFigures, ChannelPerformance, Dataset, PerformanceSnapshot};
use crate::process::layout::SUMMARY_CELLS;

/// Dataset substituted wholesale when a load cycle fails.
#[derive(Debug, Clone, Default)]
pub enum Fallback {
    /// Fully shaped, all-zero dataset with no partners.
    #[default]
    Empty,
    Dataset(Box<Dataset>),
}

impl Fallback {
    /// Read a fallback dataset from a JSON file shaped like the live output.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let f = fs::File::open(path)
            .with_context(|| format!("opening fallback dataset {}", path.display()))?;
        let dataset: Dataset = serde_json::from_reader(BufReader::new(f))
            .with_context(|| format!("parsing fallback dataset {}", path.display()))?;
        debug!(path = %path.display(), "loaded fallback dataset");
        Ok(Self::Dataset(Box::new(dataset)))
    }

    pub fn dataset(&self) -> Dataset {
        match self {
            Fallback::Empty => empty_dataset(),
            Fallback::Dataset(d) => d.as_ref().clone(),
        }
    }
}

/// A dataset with every monthly series zeroed and the default channel split.
pub fn empty_dataset() -> Dataset {
    let snapshot = PerformanceSnapshot {
        current_month_idx: 0,
        total_closed_arr: [0.0; 12],
        total_closed_mrr: [0.0; 12],
        total_target_mrr: [0.0; 12],
        company_growth_mrr: [0.0; 12],
        company_growth_pct: [0.0; 12],
        channels: ChannelFigures::<ChannelPerformance>::default(),
        allocation: ChannelFigures::from_fn(|c| SUMMARY_CELLS.get(c).allocation.default),
        annual_target: ChannelFigures::from_fn(|c| SUMMARY_CELLS.get(c).annual_target.default),
    };
    Dataset {
        snapshot,
        partners: ChannelFigures::default(),
    }
}

// src/fetch/mod.rs
//! Retrieval of the four sheet exports and the all-or-nothing load cycle.

pub mod urls;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::{future::Future, path::PathBuf};
use tokio::{fs, time::Instant};
use tracing::{debug, info, instrument, warn};
use url::Url;

use crate::error::LoadError;
use crate::process::parse_dataset;
use crate::schema::fallback::Fallback;
use crate::schema::types::{ChannelFigures, Dataset};
use urls::{Sheet, SheetUrls};

/// Anything that can hand back the raw CSV text of a sheet.
pub trait SheetSource: Sync {
    fn fetch_text(&self, sheet: Sheet) -> impl Future<Output = Result<String>> + Send;
}

/// Published Google Sheets exports over HTTP.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
    urls: Vec<(Sheet, Url)>,
}

impl HttpSource {
    /// Fails up front when a configured URL is malformed, naming the sheet.
    pub fn new(urls: &SheetUrls) -> Result<Self> {
        Self::with_client(Client::new(), urls)
    }

    pub fn with_client(client: Client, urls: &SheetUrls) -> Result<Self> {
        Ok(Self {
            client,
            urls: urls.parsed()?,
        })
    }

    pub fn url(&self, sheet: Sheet) -> Option<&Url> {
        self.urls.iter().find(|(s, _)| *s == sheet).map(|(_, u)| u)
    }
}

async fn get_text(client: &Client, url: &Url) -> Result<String> {
    debug!("Fetching text from {}", url);
    client
        .get(url.clone())
        .send()
        .await
        .with_context(|| format!("GET {} failed", url))?
        .error_for_status()
        .with_context(|| format!("Non-success status {}", url))?
        .text()
        .await
        .with_context(|| format!("Reading text from {}", url))
}

impl SheetSource for HttpSource {
    async fn fetch_text(&self, sheet: Sheet) -> Result<String> {
        let url = self
            .url(sheet)
            .with_context(|| format!("no URL for {} sheet", sheet))?;
        get_text(&self.client, url).await
    }
}

/// Sheets saved as `<dir>/<sheet>.csv`.
#[derive(Debug, Clone)]
pub struct DirSource {
    dir: PathBuf,
}

impl DirSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, sheet: Sheet) -> PathBuf {
        self.dir.join(format!("{}.csv", sheet))
    }
}

impl SheetSource for DirSource {
    async fn fetch_text(&self, sheet: Sheet) -> Result<String> {
        let path = self.path_for(sheet);
        fs::read_to_string(&path)
            .await
            .with_context(|| format!("reading {}", path.display()))
    }
}

async fn fetch_one<S: SheetSource>(source: &S, sheet: Sheet) -> Result<String, LoadError> {
    let start = Instant::now();
    let text = source
        .fetch_text(sheet)
        .await
        .map_err(|e| LoadError::Fetch { sheet, source: e })?;
    info!(sheet = %sheet, bytes = text.len(), elapsed = ?start.elapsed(), "fetched");
    Ok(text)
}

/// One load cycle: fetch all four sheets concurrently, then parse them.
///
/// The first failed retrieval fails the whole cycle; there is no partial
/// dataset.
#[instrument(level = "info", skip(source))]
pub async fn load<S: SheetSource>(source: &S) -> Result<Dataset, LoadError> {
    let (performance, referrals, resellers, agencies) = futures::try_join!(
        fetch_one(source, Sheet::Performance),
        fetch_one(source, Sheet::Referrals),
        fetch_one(source, Sheet::Resellers),
        fetch_one(source, Sheet::Agencies),
    )?;
    let partner_sheets = ChannelFigures {
        referrals,
        resellers,
        agencies,
    };

    // offload parsing to the blocking pool; a panic there surfaces as a JoinError
    tokio::task::spawn_blocking(move || parse_dataset(&performance, &partner_sheets))
        .await
        .map_err(|e| LoadError::Assembly {
            message: e.to_string(),
        })
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    Live,
    Fallback,
}

/// What the presentation layer receives: always a complete dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadOutcome {
    pub source: DataSource,
    pub last_updated: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(flatten)]
    pub dataset: Dataset,
}

/// Run a load cycle, substituting `fallback` wholesale on any failure.
pub async fn load_or_fallback<S: SheetSource>(source: &S, fallback: &Fallback) -> LoadOutcome {
    match load(source).await {
        Ok(dataset) => LoadOutcome {
            source: DataSource::Live,
            last_updated: Some(Utc::now()),
            error: None,
            dataset,
        },
        Err(e) => {
            let message = format!("{:#}", anyhow::Error::new(e));
            warn!(error = %message, "live load failed, using fallback");
            LoadOutcome {
                source: DataSource::Fallback,
                last_updated: None,
                error: Some(message),
                dataset: fallback.dataset(),
            }
        }
    }
}

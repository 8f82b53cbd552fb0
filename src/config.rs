// src/config.rs
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{env, fs, path::Path, path::PathBuf};
use tracing::debug;

use crate::fetch::urls::SheetUrls;
use crate::schema::fallback::Fallback;

pub const ENV_SHEET_DIR: &str = "PARTNERPULSE_SHEET_DIR";
pub const ENV_FALLBACK: &str = "PARTNERPULSE_FALLBACK";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub sheets: SheetUrls,
    /// JSON dataset substituted when a load fails; an all-zero dataset if unset.
    #[serde(default)]
    pub fallback_path: Option<PathBuf>,
    /// Read `<sheet>.csv` files from here instead of fetching.
    #[serde(default)]
    pub sheet_dir: Option<PathBuf>,
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Config = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing config {}", path.display()))?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Apply `PARTNERPULSE_*` environment overrides.
    pub fn with_env(mut self) -> Self {
        if let Ok(dir) = env::var(ENV_SHEET_DIR) {
            self.sheet_dir = Some(PathBuf::from(dir));
        }
        if let Ok(path) = env::var(ENV_FALLBACK) {
            self.fallback_path = Some(PathBuf::from(path));
        }
        self
    }

    pub fn fallback(&self) -> Result<Fallback> {
        match &self.fallback_path {
            Some(path) => Fallback::from_json_file(path),
            None => Ok(Fallback::Empty),
        }
    }
}

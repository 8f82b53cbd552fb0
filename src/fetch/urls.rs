// src/fetch/urls.rs
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

const PUBLISHED_SHEET: &str = "https://docs.google.com/spreadsheets/d/e/2PACX-1vS44A9WaJHn9l_I9CDTcLnFgRD5oRjtKW90L8y3q-fc1PI4qC-FcSIftjkKW0vk77W_CnB51k2CcGFH/pub";

/// Sheet tab ids of the published workbook.
static DEFAULT_GIDS: &[(Sheet, &str)] = &[
    (Sheet::Performance, "359741855"),
    (Sheet::Referrals, "0"),
    (Sheet::Resellers, "698698364"),
    (Sheet::Agencies, "1988093832"),
];

/// The four exports a load cycle needs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sheet {
    Performance,
    Referrals,
    Resellers,
    Agencies,
}

impl Sheet {
    pub const ALL: [Sheet; 4] = [
        Sheet::Performance,
        Sheet::Referrals,
        Sheet::Resellers,
        Sheet::Agencies,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Sheet::Performance => "performance",
            Sheet::Referrals => "referrals",
            Sheet::Resellers => "resellers",
            Sheet::Agencies => "agencies",
        }
    }
}

impl fmt::Display for Sheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn published_csv_url(gid: &str) -> String {
    format!("{}?gid={}&single=true&output=csv", PUBLISHED_SHEET, gid)
}

fn default_url(sheet: Sheet) -> String {
    DEFAULT_GIDS
        .iter()
        .find(|(s, _)| *s == sheet)
        .map(|(_, gid)| published_csv_url(gid))
        .unwrap_or_default()
}

fn default_performance() -> String {
    default_url(Sheet::Performance)
}
fn default_referrals() -> String {
    default_url(Sheet::Referrals)
}
fn default_resellers() -> String {
    default_url(Sheet::Resellers)
}
fn default_agencies() -> String {
    default_url(Sheet::Agencies)
}

/// CSV export URL per sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetUrls {
    #[serde(default = "default_performance")]
    pub performance: String,
    #[serde(default = "default_referrals")]
    pub referrals: String,
    #[serde(default = "default_resellers")]
    pub resellers: String,
    #[serde(default = "default_agencies")]
    pub agencies: String,
}

impl Default for SheetUrls {
    fn default() -> Self {
        Self {
            performance: default_performance(),
            referrals: default_referrals(),
            resellers: default_resellers(),
            agencies: default_agencies(),
        }
    }
}

impl SheetUrls {
    pub fn get(&self, sheet: Sheet) -> &str {
        match sheet {
            Sheet::Performance => &self.performance,
            Sheet::Referrals => &self.referrals,
            Sheet::Resellers => &self.resellers,
            Sheet::Agencies => &self.agencies,
        }
    }

    /// Parse every URL, naming the sheet whose URL is malformed.
    pub fn parsed(&self) -> Result<Vec<(Sheet, Url)>> {
        Sheet::ALL
            .iter()
            .map(|&sheet| {
                let url = Url::parse(self.get(sheet))
                    .with_context(|| format!("parsing {} sheet URL", sheet))?;
                Ok((sheet, url))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_urls_are_csv_exports() -> Result<()> {
        let urls = SheetUrls::default();
        for (sheet, url) in urls.parsed()? {
            assert_eq!(url.scheme(), "https", "{}", sheet);
            assert!(url.query().unwrap_or("").contains("output=csv"));
        }
        assert!(urls.referrals.contains("gid=0&"));
        Ok(())
    }

    #[test]
    fn test_bad_url_names_sheet() {
        let urls = SheetUrls {
            agencies: "not a url".into(),
            ..SheetUrls::default()
        };
        let err = urls.parsed().unwrap_err();
        assert!(format!("{:#}", err).contains("agencies"));
    }
}

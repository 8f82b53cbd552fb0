use thiserror::Error;

use crate::fetch::urls::Sheet;

/// The only failure a load cycle surfaces. Any variant means the caller
/// substitutes the fallback dataset.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("fetching {sheet} sheet failed")]
    Fetch {
        sheet: Sheet,
        #[source]
        source: anyhow::Error,
    },

    #[error("assembling dataset failed: {message}")]
    Assembly { message: String },
}

impl LoadError {
    /// Sheet whose retrieval failed, if the failure was a fetch.
    pub fn sheet(&self) -> Option<Sheet> {
        match self {
            LoadError::Fetch { sheet, .. } => Some(*sheet),
            LoadError::Assembly { .. } => None,
        }
    }
}

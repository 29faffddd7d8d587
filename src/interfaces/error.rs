use thiserror::Error;

use crate::utils::http::FetchError;

/// Request-level failures surfaced to callers
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConvertError {
    #[error("unsupported target: {0}")]
    InvalidTarget(String),

    #[error("subscription url is required")]
    MissingUrl,

    #[error("at least one subscription url is required")]
    MissingSources,

    #[error("failed to fetch subscription {url}: {source}")]
    Fetch { url: String, source: FetchError },
}

impl ConvertError {
    /// Stable identifier for front ends
    pub fn code(&self) -> &'static str {
        match self {
            ConvertError::InvalidTarget(_) => "invalid_target",
            ConvertError::MissingUrl => "missing_url",
            ConvertError::MissingSources => "missing_sources",
            ConvertError::Fetch { .. } => "fetch_failed",
        }
    }
}

//! Error types for the converter.
//!
//! Only collaborator failures (transport, malformed responses, unreadable
//! reference data) are errors. Data-quality problems in a bulletin are
//! recorded as [`Issue`](crate::context::Issue)s instead and never abort a run.

use thiserror::Error;

/// Main error type for the converter library.
#[derive(Debug, Error)]
pub enum WikitextError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Failed to fetch the province category listing.
    #[error("Failed to fetch province list from Wikipedia: {source}")]
    ProvinceQuery {
        #[source]
        source: reqwest::Error,
    },

    /// Failed to download the bulletin from the scraper endpoint.
    #[error("Failed to download bulletin from {url}: {source}")]
    BulletinDownload {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Failed to submit wikitext for a preview render.
    #[error("Failed to render wikitext preview: {source}")]
    Preview {
        #[source]
        source: reqwest::Error,
    },

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Region reference data could not be parsed.
    #[error("Invalid region data: {0}")]
    RegionData(#[from] serde_yaml_ng::Error),

    /// Region reference table has no regions.
    #[error("Region table is empty")]
    EmptyRegionTable,

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A collaborator answered with a body of an unexpected shape.
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    /// The bulletin issue timestamp is not a usable ISO 8601 datetime.
    #[error("Invalid issued timestamp: '{0}'. Expected ISO 8601 (e.g., 2020-11-01T03:00:00Z)")]
    InvalidTimestamp(String),

    /// Missing or invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Signal level outside 1-5.
    #[error("Invalid signal level: {0}. Expected 1 to 5")]
    InvalidSignalLevel(u8),
}

/// Result type alias for converter operations.
pub type Result<T> = std::result::Result<T, WikitextError>;

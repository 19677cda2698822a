//! HTTP client wrapper for the remote collaborators.
//!
//! Requests are one-shot: a failed fetch aborts the conversion run.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::Url;
use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::error::{Result, WikitextError};

/// User agent string identifying this converter.
const USER_AGENT: &str = concat!("pagasa-wikitext/", env!("CARGO_PKG_VERSION"));

/// Create a configured HTTP client.
///
/// # Returns
/// A `reqwest::blocking::Client` configured with the timeout from `config`
/// and a descriptive user agent (required by the Wikimedia API policy).
pub fn create_client(config: &ClientConfig) -> Result<Client> {
    let client = Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .user_agent(USER_AGENT)
        .build()?;
    Ok(client)
}

/// Build a URL with query parameters.
pub fn build_url(base: &str, params: &[(&str, &str)]) -> Result<Url> {
    let parsed = if params.is_empty() {
        Url::parse(base)
    } else {
        Url::parse_with_params(base, params)
    };
    parsed.map_err(|e| WikitextError::Config(format!("invalid URL '{base}': {e}")))
}

/// Download a URL and return the raw body.
///
/// Non-success statuses are errors.
pub fn download_bytes(client: &Client, url: Url) -> Result<Vec<u8>> {
    tracing::debug!(url = %url, "GET");
    let response = client.get(url).send()?.error_for_status()?;
    let bytes = response.bytes()?;
    Ok(bytes.to_vec())
}

/// Download a URL and deserialize its JSON body.
pub fn download_json<T: DeserializeOwned>(client: &Client, url: Url) -> Result<T> {
    let bytes = download_bytes(client, url)?;
    Ok(serde_json::from_slice(&bytes)?)
}

//! Bulletin sources.
//!
//! The bulletin itself is produced by an upstream PAGASA scraper. This
//! module only pulls its JSON output; it does not check it.

use reqwest::blocking::Client;

use crate::config::ClientConfig;
use crate::error::{Result, WikitextError};
use crate::http::{build_url, create_client, download_json};
use crate::types::Bulletin;

/// Something that can supply the latest bulletin.
pub trait BulletinSource {
    fn pull_bulletin(&self) -> Result<Bulletin>;
}

/// An already-parsed bulletin is its own source.
impl BulletinSource for Bulletin {
    fn pull_bulletin(&self) -> Result<Bulletin> {
        Ok(self.clone())
    }
}

/// Fetches bulletin JSON from the scraper's HTTP endpoint.
pub struct HttpBulletinSource {
    http: Client,
    url: String,
}

impl HttpBulletinSource {
    #[must_use]
    pub fn new(http: Client, url: impl Into<String>) -> Self {
        Self {
            http,
            url: url.into(),
        }
    }

    /// Build a source from configuration. Fails when no bulletin URL is set.
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let url = config.bulletin_url.as_deref().ok_or_else(|| {
            WikitextError::Config("PAGASA_BULLETIN_URL is not set".to_string())
        })?;
        Ok(Self::new(create_client(config)?, url))
    }
}

impl BulletinSource for HttpBulletinSource {
    fn pull_bulletin(&self) -> Result<Bulletin> {
        let url = build_url(&self.url, &[])?;
        let bulletin: Bulletin = download_json(&self.http, url).map_err(|e| match e {
            WikitextError::Http(source) => WikitextError::BulletinDownload {
                url: self.url.clone(),
                source,
            },
            other => other,
        })?;

        tracing::info!(
            url = %self.url,
            active = bulletin.has_active_typhoon(),
            "Pulled bulletin"
        );
        Ok(bulletin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config_requires_url() {
        let result = HttpBulletinSource::from_config(&ClientConfig::default());
        assert!(matches!(result, Err(WikitextError::Config(_))));
    }

    #[test]
    fn test_from_config_with_url() {
        let config = ClientConfig::builder()
            .bulletin_url("http://127.0.0.1:1/bulletin.json")
            .build();
        let source = HttpBulletinSource::from_config(&config).unwrap();
        assert_eq!(source.url, "http://127.0.0.1:1/bulletin.json");
    }

    #[test]
    fn test_bulletin_is_own_source() {
        let bulletin = Bulletin::from_json(r#"{"typhoon": null}"#).unwrap();
        assert_eq!(bulletin.pull_bulletin().unwrap(), bulletin);
    }
}

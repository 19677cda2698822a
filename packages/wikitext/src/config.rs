//! Configuration constants and client settings.

/// MediaWiki API endpoint of the English Wikipedia.
pub const WIKIPEDIA_API_URL: &str = "https://en.wikipedia.org/w/api.php";

/// Page ID of "Category:Provinces of the Philippines".
pub const PROVINCES_CATEGORY_PAGE_ID: &str = "722637";

/// HTTP timeout in seconds.
pub const HTTP_TIMEOUT_SECS: u64 = 30;

/// Name of the Wikipedia template the converter fills in.
pub const TEMPLATE_NAME: &str = "TyphoonWarningsTable";

/// Attribution placed in the `PHsource` field of the template.
pub const SOURCE_LINK: &str =
    "[http://bagong.pagasa.dost.gov.ph/tropical-cyclone/severe-weather-bulletin/2 PAGASA]";

/// Philippine Standard Time offset from UTC, in seconds (UTC+8).
pub const PHT_OFFSET_SECS: i32 = 8 * 60 * 60;

/// Template returned when the bulletin reports no active typhoon.
pub const NO_ACTIVE_TYPHOON_TEMPLATE: &str = "''No active typhoon warning signals.''";

/// Settings for the remote collaborators (Wikipedia and the bulletin scraper).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// MediaWiki `api.php` endpoint.
    pub api_url: String,
    /// JSON endpoint of the bulletin scraper. Without it, bulletins must be
    /// supplied by the caller.
    pub bulletin_url: Option<String>,
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: WIKIPEDIA_API_URL.to_string(),
            bulletin_url: None,
            timeout_secs: HTTP_TIMEOUT_SECS,
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Reads `WIKIPEDIA_API_URL`, `PAGASA_BULLETIN_URL` and
    /// `HTTP_TIMEOUT_SECS`; anything unset falls back to the defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let api_url = std::env::var("WIKIPEDIA_API_URL").unwrap_or(defaults.api_url);

        let bulletin_url = std::env::var("PAGASA_BULLETIN_URL")
            .ok()
            .filter(|url| !url.trim().is_empty());

        let timeout_secs = std::env::var("HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.timeout_secs);

        Self {
            api_url,
            bulletin_url,
            timeout_secs,
        }
    }

    /// Create a config builder, mostly for tests against a mock server.
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`ClientConfig`].
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    pub fn api_url(mut self, api_url: impl Into<String>) -> Self {
        self.config.api_url = api_url.into();
        self
    }

    pub fn bulletin_url(mut self, bulletin_url: impl Into<String>) -> Self {
        self.config.bulletin_url = Some(bulletin_url.into());
        self
    }

    pub fn timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.config.timeout_secs = timeout_secs;
        self
    }

    pub fn build(self) -> ClientConfig {
        self.config
    }
}

//! MediaWiki API access: the province category and preview rendering.

use reqwest::blocking::Client;
use serde::Deserialize;

use crate::config::{ClientConfig, PROVINCES_CATEGORY_PAGE_ID};
use crate::context::ProvinceSet;
use crate::error::{Result, WikitextError};
use crate::http::{build_url, create_client, download_json};

/// Upper bound on category continuation requests.
const MAX_CATEGORY_PAGES: usize = 20;

/// Source of the province page titles used for link decisions.
pub trait ProvinceDirectory {
    fn fetch_provinces(&self) -> Result<ProvinceSet>;
}

/// A fixed set serves as its own directory.
impl ProvinceDirectory for ProvinceSet {
    fn fetch_provinces(&self) -> Result<ProvinceSet> {
        Ok(self.clone())
    }
}

/// Renders wikitext to HTML.
pub trait PreviewRenderer {
    fn parse_wikitext(&self, wikitext: &str) -> Result<String>;
}

#[derive(Debug, Deserialize)]
struct CategoryMembersResponse {
    query: Option<CategoryQuery>,
    #[serde(rename = "continue")]
    continuation: Option<Continuation>,
}

#[derive(Debug, Deserialize)]
struct CategoryQuery {
    categorymembers: Vec<CategoryMember>,
}

#[derive(Debug, Deserialize)]
struct CategoryMember {
    title: String,
}

#[derive(Debug, Deserialize)]
struct Continuation {
    cmcontinue: Option<String>,
    #[serde(rename = "continue")]
    token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ParseResponse {
    parse: Option<ParseBody>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct ParseBody {
    text: Option<ParseText>,
}

#[derive(Debug, Deserialize)]
struct ParseText {
    #[serde(rename = "*")]
    html: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    info: Option<String>,
}

/// Client for the MediaWiki action API.
pub struct WikipediaClient {
    http: Client,
    api_url: String,
}

impl WikipediaClient {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        Ok(Self::with_client(create_client(config)?, &config.api_url))
    }

    /// Use an existing HTTP client.
    #[must_use]
    pub fn with_client(http: Client, api_url: &str) -> Self {
        Self {
            http,
            api_url: api_url.to_string(),
        }
    }

    fn query_category_page(&self, continuation: Option<&Continuation>) -> Result<CategoryMembersResponse> {
        let mut params = vec![
            ("action", "query"),
            ("format", "json"),
            ("list", "categorymembers"),
            ("cmpageid", PROVINCES_CATEGORY_PAGE_ID),
            ("cmprop", "title"),
            ("cmnamespace", "0"),
            ("cmlimit", "max"),
        ];
        if let Some(next) = continuation {
            if let Some(cmcontinue) = next.cmcontinue.as_deref() {
                params.push(("cmcontinue", cmcontinue));
            }
            if let Some(token) = next.token.as_deref() {
                params.push(("continue", token));
            }
        }

        let url = build_url(&self.api_url, &params)?;
        download_json(&self.http, url).map_err(|e| match e {
            WikitextError::Http(source) => WikitextError::ProvinceQuery { source },
            other => other,
        })
    }
}

impl ProvinceDirectory for WikipediaClient {
    /// Titles of all articles in "Category:Provinces of the Philippines",
    /// following continuation until the listing is exhausted.
    fn fetch_provinces(&self) -> Result<ProvinceSet> {
        let mut provinces = ProvinceSet::new();
        let mut continuation: Option<Continuation> = None;

        for page in 0..MAX_CATEGORY_PAGES {
            let response = self.query_category_page(continuation.as_ref())?;
            let query = response.query.ok_or_else(|| {
                WikitextError::UnexpectedResponse(
                    "category member listing has no 'query' field".to_string(),
                )
            })?;
            provinces.extend(query.categorymembers.into_iter().map(|member| member.title));

            continuation = response
                .continuation
                .filter(|next| next.cmcontinue.is_some());
            if continuation.is_none() {
                tracing::info!(provinces = provinces.len(), pages = page + 1, "Fetched province list");
                return Ok(provinces);
            }
        }

        tracing::warn!(
            provinces = provinces.len(),
            max_pages = MAX_CATEGORY_PAGES,
            "Province listing still continuing, using what was fetched"
        );
        Ok(provinces)
    }
}

impl PreviewRenderer for WikipediaClient {
    /// Render wikitext with `action=parse`. A response without
    /// `parse.text.*` is an error.
    fn parse_wikitext(&self, wikitext: &str) -> Result<String> {
        let url = build_url(
            &self.api_url,
            &[
                ("action", "parse"),
                ("format", "json"),
                ("text", wikitext),
                ("contentmodel", "wikitext"),
            ],
        )?;

        let response: ParseResponse = download_json(&self.http, url).map_err(|e| match e {
            WikitextError::Http(source) => WikitextError::Preview { source },
            other => other,
        })?;

        if let Some(error) = response.error {
            return Err(WikitextError::UnexpectedResponse(format!(
                "Wikipedia refused to parse the template: {}",
                error.info.unwrap_or_else(|| "unknown error".to_string())
            )));
        }

        response
            .parse
            .and_then(|parse| parse.text)
            .and_then(|text| text.html)
            .ok_or_else(|| {
                WikitextError::UnexpectedResponse(
                    "Response from Wikipedia cannot be processed.".to_string(),
                )
            })
    }
}

//! Wikipedia opensearch and REST summary client.
//!
//! Two thin endpoints back the pipeline: opensearch resolves a free-text
//! query to a page title and URL (used to attach a `wiki_url` to selected
//! feed items), and the REST summary endpoint returns a page extract (used
//! to synthesize fallback facts).
//!
//! # Retry Strategy
//!
//! Summary fetches retry on transient server statuses (429/500/502/503/504)
//! with linear backoff, up to 3 attempts. Anything else — network errors,
//! other statuses, malformed bodies — fails immediately so the caller can
//! move to its offline fallback without stalling the run.

use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tokio::time::sleep;
use tracing::{debug, instrument, warn};

const WIKI_OPENSEARCH: &str = "https://en.wikipedia.org/w/api.php";
const WIKI_SUMMARY: &str = "https://en.wikipedia.org/api/rest_v1/page/summary/";

const MAX_ATTEMPTS: u32 = 3;
const BACKOFF_STEP: Duration = Duration::from_secs(1);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(12);

/// Failure classes for Wikipedia lookups.
///
/// Callers branch on these to apply the documented fallback policy instead
/// of treating every failure the same.
#[derive(Debug, Error)]
pub enum WikiError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("unexpected HTTP status {0}")]
    Status(u16),
    #[error("empty extract for {0:?}")]
    EmptyExtract(String),
    #[error("{0:?} is a disambiguation page")]
    Disambiguation(String),
}

/// A resolved page from opensearch: canonical title plus article URL.
#[derive(Debug, Clone, PartialEq)]
pub struct WikiPage {
    pub title: String,
    pub url: String,
}

/// The fields we read from the REST summary response.
#[derive(Debug, Deserialize)]
pub struct PageSummary {
    pub title: String,
    #[serde(default)]
    pub extract: String,
    #[serde(rename = "type", default)]
    pub page_type: String,
    #[serde(default)]
    pub thumbnail: Option<Thumbnail>,
    #[serde(default)]
    pub content_urls: Option<ContentUrls>,
}

#[derive(Debug, Deserialize)]
pub struct Thumbnail {
    pub source: String,
}

#[derive(Debug, Deserialize)]
pub struct ContentUrls {
    pub desktop: DesktopUrls,
}

#[derive(Debug, Deserialize)]
pub struct DesktopUrls {
    pub page: String,
}

impl PageSummary {
    /// The article URL: desktop content URL when present, otherwise
    /// reconstructed from the title.
    pub fn page_url(&self) -> String {
        match &self.content_urls {
            Some(urls) => urls.desktop.page.clone(),
            None => wiki_url_for_title(&self.title),
        }
    }
}

/// Reconstruct an article URL from a page title.
pub fn wiki_url_for_title(title: &str) -> String {
    format!(
        "https://en.wikipedia.org/wiki/{}",
        urlencoding::encode(&title.replace(' ', "_"))
    )
}

fn is_retryable(status: u16) -> bool {
    matches!(status, 429 | 500 | 502 | 503 | 504)
}

/// Pull the first title/URL pair out of an opensearch response array.
///
/// The response is positional: `[query, [titles], [descriptions], [urls]]`.
/// A missing URL is reconstructed from the title.
fn parse_opensearch(data: &serde_json::Value) -> Option<WikiPage> {
    let title = data.get(1)?.get(0)?.as_str()?.to_string();
    let url = data
        .get(3)
        .and_then(|urls| urls.get(0))
        .and_then(|u| u.as_str())
        .map(str::to_string)
        .unwrap_or_else(|| wiki_url_for_title(&title));
    Some(WikiPage { title, url })
}

/// Wikipedia API client with a shared HTTP connection pool.
pub struct WikiClient {
    client: reqwest::Client,
}

impl WikiClient {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("daily_science_feed/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        WikiClient { client }
    }

    /// Resolve a free-text query to the best-matching page.
    ///
    /// Returns `Ok(None)` when the search comes back empty; errors only on
    /// transport or status failures.
    #[instrument(level = "debug", skip(self))]
    pub async fn search(&self, query: &str) -> Result<Option<WikiPage>, WikiError> {
        let response = self
            .client
            .get(WIKI_OPENSEARCH)
            .query(&[
                ("action", "opensearch"),
                ("search", query),
                ("limit", "1"),
                ("namespace", "0"),
                ("format", "json"),
            ])
            .send()
            .await?;

        let status = response.status().as_u16();
        if status != 200 {
            return Err(WikiError::Status(status));
        }

        let data: serde_json::Value = response.json().await?;
        Ok(parse_opensearch(&data))
    }

    /// Fetch a page summary, retrying transient server errors.
    ///
    /// Retries up to [`MAX_ATTEMPTS`] times on 429/500/502/503/504 with
    /// linear backoff. Empty extracts and disambiguation pages surface as
    /// their own error classes so the caller can re-roll the page pool.
    #[instrument(level = "debug", skip(self))]
    pub async fn summary(&self, title: &str) -> Result<PageSummary, WikiError> {
        let url = format!("{}{}", WIKI_SUMMARY, urlencoding::encode(title));

        let mut attempt = 0u32;
        loop {
            attempt += 1;
            let response = self
                .client
                .get(&url)
                .header("accept", "application/json")
                .send()
                .await?;

            let status = response.status().as_u16();
            if status != 200 {
                if is_retryable(status) && attempt < MAX_ATTEMPTS {
                    let delay = BACKOFF_STEP * attempt;
                    warn!(%title, status, attempt, ?delay, "Transient status; backing off");
                    sleep(delay).await;
                    continue;
                }
                return Err(WikiError::Status(status));
            }

            let summary: PageSummary = response.json().await?;
            if summary.page_type == "disambiguation" {
                return Err(WikiError::Disambiguation(title.to_string()));
            }
            if summary.extract.trim().is_empty() {
                return Err(WikiError::EmptyExtract(title.to_string()));
            }
            debug!(%title, extract_len = summary.extract.len(), "Fetched page summary");
            return Ok(summary);
        }
    }
}

impl Default for WikiClient {
    fn default() -> Self {
        Self::new()
    }
}

//! Feed retrieval and entry extraction.
//!
//! Feeds are fetched one at a time — a failed or malformed feed is logged
//! and skipped, never failing the run. Parsing is delegated to `feed-rs`,
//! which handles both RSS and Atom, so only three fields matter here:
//! title, link, and summary/description.

use crate::models::FeedEntry;
use crate::utils::truncate_for_log;
use futures::stream::{self, StreamExt};
use std::error::Error;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};
use url::Url;

const FETCH_TIMEOUT: Duration = Duration::from_secs(12);

/// Build the HTTP client used for feed fetching.
pub fn feed_client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(FETCH_TIMEOUT)
        .user_agent(concat!("daily_science_feed/", env!("CARGO_PKG_VERSION")))
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}

/// Extract usable entries from a raw feed document.
///
/// Entries keep their markup-bearing summary; cleanup happens at
/// classification time. Entries whose link is not a parseable absolute URL
/// are dropped here — a relative or garbage link can't serve as a dedup key
/// or a card target.
fn entries_from_bytes(bytes: &[u8]) -> Result<Vec<FeedEntry>, Box<dyn Error>> {
    let feed = feed_rs::parser::parse(bytes)?;

    let entries = feed
        .entries
        .into_iter()
        .filter_map(|entry| {
            let link = entry
                .links
                .first()
                .map(|l| l.href.clone())
                .or_else(|| entry.id.starts_with("http").then(|| entry.id.clone()))?;
            if Url::parse(&link).is_err() {
                debug!(%link, "Skipping entry with unparseable link");
                return None;
            }

            let title = entry.title.map(|t| t.content).unwrap_or_default();
            let summary = entry
                .summary
                .map(|s| s.content)
                .or_else(|| entry.content.and_then(|c| c.body))
                .unwrap_or_default();

            Some(FeedEntry { title, link, summary })
        })
        .collect();

    Ok(entries)
}

/// Fetch and parse a single feed URL.
async fn fetch_feed(client: &reqwest::Client, url: &str) -> Result<Vec<FeedEntry>, Box<dyn Error>> {
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(format!("feed fetch returned HTTP {}", status.as_u16()).into());
    }
    let bytes = response.bytes().await?;
    entries_from_bytes(&bytes)
}

/// Fetch every configured feed sequentially and pool the entries.
///
/// Failures are per-feed: a dead URL or unparseable document costs only
/// that feed's entries.
#[instrument(level = "info", skip_all, fields(feeds = urls.len()))]
pub async fn fetch_all(client: &reqwest::Client, urls: &[String]) -> Vec<FeedEntry> {
    let entries: Vec<FeedEntry> = stream::iter(urls)
        .then(|url| async move {
            match fetch_feed(client, url).await {
                Ok(entries) => {
                    debug!(%url, count = entries.len(), "Fetched feed");
                    entries
                }
                Err(e) => {
                    warn!(%url, error = %truncate_for_log(&e.to_string(), 200), "Feed skipped");
                    Vec::new()
                }
            }
        })
        .collect::<Vec<_>>()
        .await
        .into_iter()
        .flatten()
        .collect();

    info!(count = entries.len(), "Collected feed entries");
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    const RSS_SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Top Science News</title>
    <link>https://example.com/science</link>
    <item>
      <title>Neurons mapped in new atlas</title>
      <link>https://example.com/articles/neurons</link>
      <description>&lt;p&gt;Researchers mapped neurons. The atlas is public.&lt;/p&gt;</description>
    </item>
    <item>
      <title>No link here</title>
      <description>Dropped entry.</description>
    </item>
  </channel>
</rss>"#;

    const ATOM_SAMPLE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title>Space Updates</title>
  <id>urn:uuid:60a76c80-d399-11d9-b93C-0003939e0af6</id>
  <updated>2025-11-03T18:30:02Z</updated>
  <entry>
    <title>Probe reaches orbit</title>
    <link href="https://example.com/probe"/>
    <id>urn:uuid:1225c695-cfb8-4ebb-aaaa-80da344efa6a</id>
    <updated>2025-11-03T18:30:02Z</updated>
    <summary>The probe entered orbit. Data follows soon.</summary>
  </entry>
</feed>"#;

    #[test]
    fn test_entries_from_rss() {
        let entries = entries_from_bytes(RSS_SAMPLE.as_bytes()).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].title, "Neurons mapped in new atlas");
        assert_eq!(entries[0].link, "https://example.com/articles/neurons");
        assert!(entries[0].summary.contains("Researchers mapped neurons"));
    }

    #[test]
    fn test_entries_from_atom() {
        let entries = entries_from_bytes(ATOM_SAMPLE.as_bytes()).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].title, "Probe reaches orbit");
        assert_eq!(entries[0].link, "https://example.com/probe");
        assert_eq!(entries[0].summary, "The probe entered orbit. Data follows soon.");
    }

    #[test]
    fn test_entries_from_garbage_is_error() {
        assert!(entries_from_bytes(b"this is not xml at all").is_err());
    }

    #[tokio::test]
    async fn test_fetch_all_swallows_unreachable_feeds() {
        let client = feed_client();
        // Reserved TLD; resolution fails fast and the run continues.
        let urls = vec!["https://feed.invalid/rss.xml".to_string()];
        let entries = fetch_all(&client, &urls).await;
        assert!(entries.is_empty());
    }
}

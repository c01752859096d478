//! Run configuration: feed lists and file paths.
//!
//! Everything has a built-in default so a bare invocation works. An
//! optional YAML file (`--config`) replaces any subset of the fields:
//!
//! ```yaml
//! general_feeds:
//!   - https://www.sciencedaily.com/rss/top/science.xml
//! category_feeds:
//!   Space:
//!     - https://www.nasa.gov/rss/dyn/breaking_news.rss
//! output_path: data/daily.json
//! custom_facts_path: data/custom_facts.json
//! ```

use crate::classify::CATEGORIES;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::error::Error;
use tracing::info;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Broad science feeds scanned for every category.
    pub general_feeds: Vec<String>,
    /// Extra feeds pooled in per category. Entries from these compete in
    /// selection like any other candidate; they aren't routed directly.
    pub category_feeds: BTreeMap<String, Vec<String>>,
    /// Where the digest JSON is written (overwritten every run).
    pub output_path: String,
    /// Externally maintained custom-facts file.
    pub custom_facts_path: String,
}

impl Default for Config {
    fn default() -> Self {
        let mut category_feeds = BTreeMap::new();
        category_feeds.insert(
            "AI".to_string(),
            vec!["https://www.technologyreview.com/feed/".to_string()],
        );
        category_feeds.insert(
            "Physics".to_string(),
            vec!["https://www.sciencedaily.com/rss/matter_energy/physics.xml".to_string()],
        );
        category_feeds.insert(
            "Entrepreneurship".to_string(),
            vec!["https://techcrunch.com/category/startups/feed/".to_string()],
        );
        category_feeds.insert(
            "Space".to_string(),
            vec!["https://www.nasa.gov/rss/dyn/breaking_news.rss".to_string()],
        );
        category_feeds.insert(
            "Biology".to_string(),
            vec!["https://www.sciencedaily.com/rss/plants_animals.xml".to_string()],
        );
        category_feeds.insert(
            "Health".to_string(),
            vec!["https://www.sciencedaily.com/rss/health_medicine.xml".to_string()],
        );
        category_feeds.insert(
            "Environment".to_string(),
            vec!["https://www.sciencedaily.com/rss/earth_climate.xml".to_string()],
        );

        Config {
            general_feeds: vec![
                "https://www.sciencedaily.com/rss/top/science.xml".to_string(),
                "https://phys.org/rss-feed/".to_string(),
                "https://www.sciencenews.org/feed".to_string(),
            ],
            category_feeds,
            output_path: "data/daily.json".to_string(),
            custom_facts_path: "data/custom_facts.json".to_string(),
        }
    }
}

impl Config {
    /// Load configuration: defaults when no file is given, otherwise the
    /// file merged over defaults by serde. A file the user named but that
    /// can't be read or parsed is an error, not a silent default.
    pub fn load(path: Option<&str>) -> Result<Config, Box<dyn Error>> {
        let Some(path) = path else {
            return Ok(Config::default());
        };
        let text = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&text)?;
        info!(%path, "Loaded configuration file");
        Ok(config)
    }

    /// All feed URLs to fetch: the general list, then per-category lists in
    /// fixed category order. Keys that aren't a known category are ignored.
    pub fn all_feed_urls(&self) -> Vec<String> {
        let mut urls = self.general_feeds.clone();
        for category in CATEGORIES {
            if let Some(feeds) = self.category_feeds.get(category) {
                urls.extend(feeds.iter().cloned());
            }
        }
        urls
    }
}

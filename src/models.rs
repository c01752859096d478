//! Data models for feed entries, candidates, and the emitted digest.
//!
//! This module defines the core data structures used throughout the pipeline:
//! - [`FeedEntry`]: Raw entry data pulled from an RSS/Atom feed
//! - [`Candidate`]: A normalized entry eligible for category selection
//! - [`FactItem`]: One item of the emitted digest (RSS pick, fallback fact,
//!   or custom item — all share this shape)
//! - [`DailyDigest`]: The final artifact written to disk each run
//!
//! Field order on [`FactItem`] matches the JSON shape consumed by the
//! downstream card renderer, so the serialized output stays stable.

use serde::{Deserialize, Serialize};

/// A raw entry as pulled from an RSS/Atom feed.
///
/// This is the unprocessed form: `summary` may still carry HTML markup.
/// Entries with an empty title or link are discarded before they ever
/// become candidates.
#[derive(Debug, Clone)]
pub struct FeedEntry {
    /// The entry headline.
    pub title: String,
    /// The article URL. Doubles as the per-run dedup key.
    pub link: String,
    /// The raw summary or description, markup and all.
    pub summary: String,
}

/// A normalized feed entry eligible for category selection.
///
/// Created during classification, consumed during selection, and dropped
/// afterwards — unselected candidates are not retried on later runs.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub title: String,
    /// Cleaned summary, at most two sentences.
    pub summary: String,
    pub link: String,
    /// One-shot categorizer guess. Overridden with the target category
    /// when the candidate is accepted into a selection slot.
    pub category: String,
    pub hook: String,
    pub question: String,
}

/// An audio attachment on a custom item: `{src, title}` with `src` required.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct AudioAttachment {
    pub src: String,
    #[serde(default)]
    pub title: String,
}

/// One item of the daily digest.
///
/// RSS-derived picks, Wikipedia fallback facts, and custom items all
/// serialize to this shape. `image`/`images` are intentionally left empty
/// for pipeline-produced items (image lookup is disabled); custom items may
/// carry whatever the authoring file provides.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FactItem {
    pub title: String,
    pub summary: String,
    pub link: String,
    pub image: String,
    pub wiki_url: String,
    pub category: String,
    pub hook: String,
    pub question: String,
    pub images: Vec<String>,
    pub audio: Option<AudioAttachment>,
}

impl FactItem {
    /// Build a pipeline item: empty image fields, no audio.
    pub fn bare(title: String, summary: String, link: String, category: String) -> Self {
        FactItem {
            title,
            summary,
            link,
            image: String::new(),
            wiki_url: String::new(),
            category,
            hook: String::new(),
            question: String::new(),
            images: Vec::new(),
            audio: None,
        }
    }
}

impl Candidate {
    /// Convert into a digest item, forcing the given category and flavor.
    pub fn into_item(self, category: &str, hook: String, question: String) -> FactItem {
        let mut item = FactItem::bare(self.title, self.summary, self.link, category.to_string());
        item.hook = hook;
        item.question = question;
        item
    }
}

/// The final artifact: one item per fixed category followed by all custom
/// items, stamped with the generation time.
#[derive(Debug, Deserialize, Serialize)]
pub struct DailyDigest {
    /// UTC generation timestamp, `YYYY-MM-DD HH:MM UTC`.
    pub date: String,
    pub items: Vec<FactItem>,
}

//! Hand-authored "custom facts" loaded from a local JSON file.
//!
//! The file is maintained outside this pipeline and loaded verbatim each
//! run: `{"items": [{title, summary, link, image?, images?, audio?,
//! category?, hook?, wiki_url?, question?}, ...]}`. Loading is lenient —
//! a missing or malformed file yields an empty list, and per-item fields
//! are normalized rather than validated. Custom items are never
//! deduplicated against feed-derived items.

use crate::models::{AudioAttachment, FactItem};
use serde::Deserialize;
use tracing::{debug, info, warn};

/// Category applied to custom items that don't declare one.
pub const CUSTOM_CATEGORY: &str = "For you specially";

#[derive(Debug, Default, Deserialize)]
struct RawCustomFile {
    #[serde(default)]
    items: Vec<RawCustomItem>,
}

#[derive(Debug, Default, Deserialize)]
struct RawCustomItem {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    link: Option<String>,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    images: Option<Vec<String>>,
    #[serde(default)]
    audio: Option<RawAudio>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    hook: Option<String>,
    #[serde(default)]
    wiki_url: Option<String>,
    #[serde(default)]
    question: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawAudio {
    #[serde(default)]
    src: Option<String>,
    #[serde(default)]
    title: Option<String>,
}

fn trimmed(field: Option<String>) -> String {
    field.map(|s| s.trim().to_string()).unwrap_or_default()
}

fn normalize_item(raw: RawCustomItem) -> FactItem {
    // `images` wins over a single `image`; either way empty strings are
    // dropped so the list only carries real URLs.
    let image = trimmed(raw.image);
    let images: Vec<String> = match raw.images {
        Some(list) => list
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
        None if !image.is_empty() => vec![image.clone()],
        None => Vec::new(),
    };

    // An audio object without a usable `src` is discarded entirely.
    let audio = raw.audio.and_then(|a| {
        let src = trimmed(a.src);
        if src.is_empty() {
            None
        } else {
            Some(AudioAttachment {
                src,
                title: trimmed(a.title),
            })
        }
    });

    let category = {
        let c = trimmed(raw.category);
        if c.is_empty() { CUSTOM_CATEGORY.to_string() } else { c }
    };

    FactItem {
        title: trimmed(raw.title),
        summary: trimmed(raw.summary),
        link: trimmed(raw.link),
        image,
        wiki_url: trimmed(raw.wiki_url),
        category,
        hook: trimmed(raw.hook),
        question: trimmed(raw.question),
        images,
        audio,
    }
}

/// Parse the custom-facts document. Malformed JSON yields an empty list.
fn parse_custom_facts(text: &str) -> Vec<FactItem> {
    match serde_json::from_str::<RawCustomFile>(text) {
        Ok(file) => file.items.into_iter().map(normalize_item).collect(),
        Err(e) => {
            warn!(error = %e, "Custom facts file is malformed; ignoring it");
            Vec::new()
        }
    }
}

/// Load custom facts from `path`. Never fails: a missing or unreadable
/// file just means no custom items this run.
pub async fn load_custom_facts(path: &str) -> Vec<FactItem> {
    let text = match tokio::fs::read_to_string(path).await {
        Ok(text) => text,
        Err(e) => {
            debug!(%path, error = %e, "No custom facts file");
            return Vec::new();
        }
    };

    let items = parse_custom_facts(&text);
    info!(%path, count = items.len(), "Loaded custom facts");
    items
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_image_becomes_one_element_list() {
        let items =
            parse_custom_facts(r#"{"items":[{"title":"X","image":"http://a/1.png"}]}"#);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].images, vec!["http://a/1.png"]);
        assert_eq!(items[0].image, "http://a/1.png");
        assert!(items[0].audio.is_none());
    }

    #[test]
    fn test_images_array_preferred_over_single_image() {
        let items = parse_custom_facts(
            r#"{"items":[{"title":"X","image":"http://a/solo.png","images":["http://a/1.png","http://a/2.png"]}]}"#,
        );
        assert_eq!(items[0].images, vec!["http://a/1.png", "http://a/2.png"]);
    }

    #[test]
    fn test_audio_without_src_is_discarded() {
        let items =
            parse_custom_facts(r#"{"items":[{"title":"X","audio":{"title":"A tune"}}]}"#);
        assert!(items[0].audio.is_none());

        let items =
            parse_custom_facts(r#"{"items":[{"title":"X","audio":{"src":"   "}}]}"#);
        assert!(items[0].audio.is_none());
    }

    #[test]
    fn test_audio_with_src_is_kept_and_trimmed() {
        let items = parse_custom_facts(
            r#"{"items":[{"title":"X","audio":{"src":" http://a/clip.mp3 ","title":" Clip "}}]}"#,
        );
        let audio = items[0].audio.clone().unwrap();
        assert_eq!(audio.src, "http://a/clip.mp3");
        assert_eq!(audio.title, "Clip");
    }

    #[test]
    fn test_missing_or_blank_category_gets_sentinel() {
        let items = parse_custom_facts(
            r#"{"items":[{"title":"A"},{"title":"B","category":"  "},{"title":"C","category":"Space"}]}"#,
        );
        assert_eq!(items[0].category, CUSTOM_CATEGORY);
        assert_eq!(items[1].category, CUSTOM_CATEGORY);
        assert_eq!(items[2].category, "Space");
    }

    #[test]
    fn test_text_fields_are_trimmed() {
        let items = parse_custom_facts(
            r#"{"items":[{"title":"  Spaced  ","summary":" s ","link":" http://a "}]}"#,
        );
        assert_eq!(items[0].title, "Spaced");
        assert_eq!(items[0].summary, "s");
        assert_eq!(items[0].link, "http://a");
    }

    #[test]
    fn test_malformed_json_yields_empty_list() {
        assert!(parse_custom_facts("{not json").is_empty());
        assert!(parse_custom_facts(r#"{"items": "nope"}"#).is_empty());
    }

    #[test]
    fn test_file_order_is_preserved() {
        let items = parse_custom_facts(
            r#"{"items":[{"title":"First"},{"title":"Second"},{"title":"Third"}]}"#,
        );
        let titles: Vec<&str> = items.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["First", "Second", "Third"]);
    }

    #[tokio::test]
    async fn test_missing_file_yields_empty_list() {
        let items = load_custom_facts("/definitely/not/a/real/path.json").await;
        assert!(items.is_empty());
    }
}

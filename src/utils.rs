//! Text normalization and small filesystem helpers.
//!
//! The two text functions here define the "cleaned summary" contract for the
//! whole pipeline: [`clean_html`] strips markup and collapses whitespace,
//! [`first_two_sentences`] bounds a summary to its first two
//! sentence-terminated segments. Both always return a string and never fail.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::Html;
use std::error::Error;
use std::fs as stdfs;
use tokio::fs;
use tracing::{info, instrument};

/// A sentence terminator followed by whitespace.
static SENTENCE_END: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?]\s").unwrap());

/// Strip HTML markup from a summary and collapse whitespace.
///
/// Tags are removed by parsing the input as an HTML fragment and collecting
/// only the text nodes, then runs of whitespace are collapsed to single
/// spaces and the ends trimmed. Plain text passes through unchanged, which
/// makes the function idempotent.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(clean_html("<p>Neurons  fire.</p>"), "Neurons fire.");
/// assert_eq!(clean_html(""), "");
/// ```
pub fn clean_html(raw: &str) -> String {
    if raw.trim().is_empty() {
        return String::new();
    }
    let fragment = Html::parse_fragment(raw);
    let text = fragment.root_element().text().collect::<Vec<_>>().join(" ");
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Truncate text to its first two sentence-terminated segments.
///
/// A segment ends at `.`, `!`, or `?` followed by whitespace. Text with
/// fewer than two such boundaries is returned whole (trimmed), so a summary
/// that never terminates is kept rather than dropped.
pub fn first_two_sentences(text: &str) -> String {
    let trimmed = text.trim();
    match SENTENCE_END.find_iter(trimmed).nth(1) {
        // Keep everything up to and including the second terminator.
        Some(m) => trimmed[..m.start() + 1].to_string(),
        None => trimmed.to_string(),
    }
}

/// Truncate a string for logging purposes.
///
/// Long strings are truncated to `max` bytes with an ellipsis and byte
/// count indicator appended.
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        s.to_string()
    } else {
        let mut cut = max;
        while !s.is_char_boundary(cut) {
            cut -= 1;
        }
        format!("{}…(+{} bytes)", &s[..cut], s.len() - cut)
    }
}

/// Ensure a directory exists and is writable.
///
/// Creates the directory if it doesn't exist, then performs a write test by
/// creating and immediately deleting a probe file. Run before the pipeline
/// so a read-only output location fails fast instead of after all the
/// network work.
#[instrument(level = "info", skip_all, fields(path = %path))]
pub async fn ensure_writable_dir(path: &str) -> Result<(), Box<dyn Error>> {
    if let Err(e) = fs::create_dir_all(path).await {
        return Err(Box::new(e));
    }
    let probe_path = format!("{}/..__probe_write__", path.trim_end_matches('/'));
    match stdfs::File::create(&probe_path) {
        Ok(_) => {
            let _ = stdfs::remove_file(&probe_path);
            info!("Output directory is writable");
            Ok(())
        }
        Err(e) => Err(Box::new(e)),
    }
}

//! Digest serialization and persistence.
//!
//! The digest is the run's sole durable product: human-readable indented
//! JSON, UTF-8 with non-ASCII characters preserved, overwriting the
//! previous day's file in place. A write failure here is fatal — there is
//! nothing useful to salvage from a run that can't produce its file.

use crate::models::DailyDigest;
use std::error::Error;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

/// Serialize the digest and overwrite `path`.
#[instrument(level = "info", skip_all, fields(path = %path))]
pub async fn write_digest(digest: &DailyDigest, path: &str) -> Result<(), Box<dyn Error>> {
    let json = serde_json::to_string_pretty(digest)?;

    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).await?;
        }
    }

    fs::write(path, json).await?;
    info!(items = digest.items.len(), "Wrote daily digest");
    Ok(())
}

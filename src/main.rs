//! # Daily Science Feed
//!
//! A scheduled aggregation pipeline that builds a daily JSON feed of
//! science-fact items for a downstream card UI.
//!
//! ## Features
//!
//! - Pulls candidate stories from configurable RSS/Atom science feeds
//! - Assigns each story to one of eight fixed categories via keyword
//!   heuristics and picks the most relevant story per category
//! - Falls back to a Wikipedia "quick fact" (or a canned offline fact)
//!   when a category has no relevant story
//! - Merges hand-authored custom items from a local JSON file
//! - Writes the combined list with a UTC timestamp to `data/daily.json`
//!
//! ## Usage
//!
//! ```sh
//! daily_science_feed              # defaults: data/daily.json
//! daily_science_feed -o out.json --seed 42
//! ```
//!
//! ## Architecture
//!
//! One sequential pass per invocation:
//! 1. **Fetch**: retrieve entries from every configured feed
//! 2. **Classify**: clean summaries, categorize, attach flavor text
//! 3. **Select**: one item per category, Wikipedia fallback otherwise
//! 4. **Merge**: append custom items
//! 5. **Emit**: timestamp and write the digest JSON

use chrono::Utc;
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::error::Error;
use std::path::Path;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod classify;
mod cli;
mod config;
mod custom;
mod fallback;
mod feeds;
mod flavor;
mod models;
mod output;
mod select;
mod utils;
mod wiki;

use classify::Taxonomy;
use cli::Cli;
use config::Config;
use models::DailyDigest;
use utils::ensure_writable_dir;
use wiki::WikiClient;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("daily_science_feed starting up");

    let args = Cli::parse();
    debug!(?args.output, ?args.custom_facts, ?args.config, "Parsed CLI arguments");

    let config = Config::load(args.config.as_deref())?;
    let output_path = args.output.unwrap_or_else(|| config.output_path.clone());
    let custom_facts_path = args
        .custom_facts
        .unwrap_or_else(|| config.custom_facts_path.clone());

    // Early check: the run is pointless if the output location is broken.
    let output_dir = Path::new(&output_path)
        .parent()
        .map(|p| p.to_string_lossy().into_owned())
        .filter(|p| !p.is_empty())
        .unwrap_or_else(|| ".".to_string());
    if let Err(e) = ensure_writable_dir(&output_dir).await {
        error!(
            path = %output_dir,
            error = %e,
            "Output directory is not writable (fix perms or choose a different path)"
        );
        return Err(e);
    }

    // Seeded runs reproduce flavor and fallback picks exactly.
    let mut rng = match args.seed {
        Some(seed) => {
            info!(seed, "Using seeded RNG");
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_os_rng(),
    };

    // ---- Fetch ----
    let client = feeds::feed_client();
    let feed_urls = config.all_feed_urls();
    let entries = feeds::fetch_all(&client, &feed_urls).await;

    // ---- Classify ----
    let taxonomy = Taxonomy::new();
    let candidates = classify::build_candidates(entries, &taxonomy, &mut rng);
    info!(count = candidates.len(), "Candidates ready for selection");

    // ---- Select (one item per category, fallback where needed) ----
    let wiki = WikiClient::new();
    let mut items = select::select_daily(candidates, &taxonomy, &wiki, &mut rng).await;

    // ---- Merge custom items ----
    let custom_items = custom::load_custom_facts(&custom_facts_path).await;
    items.extend(custom_items);

    // ---- Emit ----
    let digest = DailyDigest {
        date: Utc::now().format("%Y-%m-%d %H:%M UTC").to_string(),
        items,
    };
    if let Err(e) = output::write_digest(&digest, &output_path).await {
        error!(path = %output_path, error = %e, "Failed to write daily digest");
        return Err(e);
    }

    let elapsed = start_time.elapsed();
    info!(
        items = digest.items.len(),
        path = %output_path,
        ?elapsed,
        "Wrote daily digest"
    );

    Ok(())
}

//! Command-line interface definitions.
//!
//! Every flag is optional: a bare `daily_science_feed` run uses built-in
//! defaults, which is how the scheduled job invokes it.

use clap::Parser;

/// Command-line arguments for the daily feed builder.
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Output path for the digest JSON (overrides the config file)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Path to the custom-facts JSON file (overrides the config file)
    #[arg(long)]
    pub custom_facts: Option<String>,

    /// Optional path to a YAML config file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Seed for the flavor/fallback RNG; omit for OS randomness
    #[arg(long, env = "DAILY_FEED_SEED")]
    pub seed: Option<u64>,
}

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Red-separator watcher for spreadsheet snapshots.
///
/// Evaluates an exported grid snapshot for a red separator row and
/// fires a single webhook notification when one is found.
#[derive(Parser, Debug)]
#[command(name = "sheetwatch", version, about = "Red-separator watcher")]
pub struct CliArgs {
    /// Webhook endpoint URL (overrides WEBHOOK_URL)
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Shared secret embedded in the payload (overrides WEBHOOK_SECRET)
    #[arg(long)]
    pub secret: Option<String>,

    /// Comma-separated color tokens treated as red (overrides RED_COLORS)
    #[arg(long)]
    pub red_colors: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Evaluate a snapshot and print the decision; never dispatches
    Check {
        /// Path to the exported snapshot JSON
        snapshot: PathBuf,
    },

    /// Handle one change event: evaluate, notify iff the separator is red
    Run {
        /// Path to the exported snapshot JSON
        snapshot: PathBuf,
    },

    /// Send a test payload to verify endpoint and secret wiring
    TestNotify,
}

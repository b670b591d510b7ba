//! protfetch CLI Library
//!
//! Gathers everything four public services know about one protein into a
//! single JSON document.
//!
//! # Overview
//!
//! - **Resolution**: a free-text protein name becomes a UniProtKB accession
//! - **Sources**: UniProt, InterPro, STRING and QuickGO adapters, each failing soft
//! - **Pacing**: a fixed pause after every STRING and QuickGO sub-call
//! - **Output**: `{accession}_comprehensive_info.json` in the output directory

#![deny(clippy::unwrap_used, clippy::expect_used)]

pub mod aggregate;
pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod progress;
pub mod rate_limit;
pub mod sources;

// Re-export commonly used types
pub use error::{CliError, Result};
pub use pipeline::{Pipeline, RunObserver, RunOutcome};

use clap::Parser;
use std::path::PathBuf;

/// protfetch - comprehensive protein information from UniProt, InterPro, STRING and QuickGO
#[derive(Parser, Debug)]
#[command(name = "protfetch")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Protein name to look up (prompted for when omitted)
    pub name: Option<String>,

    /// NCBI taxonomy id used for STRING queries
    #[arg(long, env = "PROTFETCH_SPECIES")]
    pub species: Option<u32>,

    /// Directory the JSON document is written to
    #[arg(short, long, env = "PROTFETCH_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Contact address sent to upstream services in the user agent
    #[arg(long, env = "PROTFETCH_CONTACT_EMAIL")]
    pub contact: Option<String>,

    /// Pause after each STRING and QuickGO request, in milliseconds
    #[arg(long, env = "PROTFETCH_DELAY_MS")]
    pub delay_ms: Option<u64>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

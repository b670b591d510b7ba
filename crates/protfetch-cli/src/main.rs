//! protfetch - Main entry point

use clap::Parser;
use protfetch_cli::{commands, Cli};
use protfetch_common::logging::{init_logging, LogConfig, LogLevel, LogOutput};
use std::process;
use tracing::error;

#[tokio::main]
async fn main() {
    // A missing .env file is fine
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Logs go to stderr so stdout only carries progress lines
    let level = if cli.verbose {
        LogLevel::Debug
    } else {
        LogLevel::Warn
    };
    let base = LogConfig::builder()
        .level(level)
        .output(LogOutput::Console)
        .log_file_prefix("protfetch")
        .build();

    // Environment variables take precedence over the flag
    let log_config = base.clone().with_env().unwrap_or(base);

    // The CLI works without logging
    let _ = init_logging(&log_config);

    if let Err(e) = commands::fetch::run(&cli).await {
        error!(error = %e, "Command failed");
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

//! Fetch command implementation
//!
//! Reads the protein name, runs the pipeline and prints where the document
//! went plus a one-line status per source.

use crate::config::Config;
use crate::error::Result;
use crate::pipeline::{Pipeline, RunOutcome};
use crate::progress::ConsoleObserver;
use crate::Cli;
use colored::Colorize;
use protfetch_common::CompositeRecord;
use std::io::{self, BufRead, IsTerminal};
use tracing::debug;

/// Run the fetch command
pub async fn run(cli: &Cli) -> Result<()> {
    let config = build_config(cli)?;
    config.validate()?;

    let name = match &cli.name {
        Some(name) => name.clone(),
        None => prompt_name()?,
    };
    let name = name.trim();

    debug!(
        name = %name,
        species = config.species,
        delay_ms = config.delay_ms,
        output_dir = %config.output_dir.display(),
        "Starting fetch"
    );

    println!("\nFetching information for: {}", name.bold());

    let pipeline = Pipeline::new(&config)?;
    let observer = ConsoleObserver::resolving(name);
    let outcome = pipeline.run(name, &observer).await;
    observer.finish();

    match outcome? {
        RunOutcome::NotFound { query } => {
            println!("{} No results found for '{}'", "✗".red(), query);
        }
        RunOutcome::Written { path, record, .. } => {
            println!(
                "\n{} Comprehensive information has been saved to {}",
                "✓".green(),
                path.display().to_string().cyan()
            );
            for line in summary_lines(&record) {
                println!("  {}", line);
            }
        }
    }

    Ok(())
}

/// Environment config with command-line flags applied on top
pub fn build_config(cli: &Cli) -> Result<Config> {
    let mut config = Config::from_env()?;

    if let Some(species) = cli.species {
        config.species = species;
    }
    if let Some(dir) = &cli.output_dir {
        config.output_dir = dir.clone();
    }
    if let Some(contact) = &cli.contact {
        config.contact_email = contact.clone();
    }
    if let Some(delay_ms) = cli.delay_ms {
        config.delay_ms = delay_ms;
    }

    Ok(config)
}

/// Ask for the name on a terminal, otherwise take the first line of stdin
fn prompt_name() -> Result<String> {
    if io::stdin().is_terminal() {
        return Ok(inquire::Text::new("What protein would you like to know about?").prompt()?);
    }

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line)
}

/// One status line per source, in output key order
pub fn summary_lines(record: &CompositeRecord) -> Vec<String> {
    let uniprot = match &record.uniprot {
        Some(_) => "ok".to_string(),
        None => "unavailable".to_string(),
    };
    let interpro = match &record.interpro {
        Some(domains) => format!(
            "{} entries ({} integrated)",
            domains.entries.len(),
            domains.integrated_count()
        ),
        None => "unavailable".to_string(),
    };
    let string = format!("{}/6 fields", record.string.present_count());
    let quickgo = format!("{} GO terms", record.quickgo.go_terms.len());

    vec![
        format!("{:<9} {}", "uniprot", uniprot),
        format!("{:<9} {}", "interpro", interpro),
        format!("{:<9} {}", "string", string),
        format!("{:<9} {}", "quickgo", quickgo),
    ]
}

//! Configuration for a protfetch run
//!
//! Defaults mirror the public services; every value can be overridden with a
//! `PROTFETCH_*` environment variable or a command-line flag.

use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

// ============================================================================
// Configuration Constants
// ============================================================================

/// Contact address sent to every upstream in the user agent.
/// Set `PROTFETCH_CONTACT_EMAIL` to your own address for real runs.
pub const DEFAULT_CONTACT_EMAIL: &str = "protfetch@example.org";

/// NCBI taxonomy id used for STRING lookups (human).
pub const DEFAULT_SPECIES: u32 = 9606;

/// Pause after every STRING and QuickGO sub-call.
pub const DEFAULT_DELAY_MS: u64 = 1000;

/// Request timeout; large STRING enrichment payloads can be slow.
pub const DEFAULT_API_TIMEOUT_SECS: u64 = 300;

pub const DEFAULT_UNIPROT_URL: &str = "https://rest.uniprot.org";
pub const DEFAULT_INTERPRO_URL: &str = "https://www.ebi.ac.uk/interpro/api";
pub const DEFAULT_STRING_URL: &str = "https://string-db.org/api";
pub const DEFAULT_QUICKGO_URL: &str = "https://www.ebi.ac.uk/QuickGO/services";

/// Base URLs of the four upstream services
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceUrls {
    pub uniprot: String,
    pub interpro: String,
    pub string: String,
    pub quickgo: String,
}

impl Default for ServiceUrls {
    fn default() -> Self {
        Self {
            uniprot: DEFAULT_UNIPROT_URL.to_string(),
            interpro: DEFAULT_INTERPRO_URL.to_string(),
            string: DEFAULT_STRING_URL.to_string(),
            quickgo: DEFAULT_QUICKGO_URL.to_string(),
        }
    }
}

impl ServiceUrls {
    /// Point every service at one host; used by tests against a mock server
    pub fn all(base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/').to_string();
        Self {
            uniprot: base.clone(),
            interpro: base.clone(),
            string: base.clone(),
            quickgo: base,
        }
    }
}

/// Run configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Contact address identifying this client to upstream services
    pub contact_email: String,

    /// Taxonomy id passed to STRING
    pub species: u32,

    /// Fixed delay after each rate-limited call, in milliseconds
    pub delay_ms: u64,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,

    /// Directory the artifact is written to
    pub output_dir: PathBuf,

    pub urls: ServiceUrls,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            contact_email: DEFAULT_CONTACT_EMAIL.to_string(),
            species: DEFAULT_SPECIES,
            delay_ms: DEFAULT_DELAY_MS,
            timeout_secs: DEFAULT_API_TIMEOUT_SECS,
            output_dir: PathBuf::from("."),
            urls: ServiceUrls::default(),
        }
    }
}

fn parse_env<T: std::str::FromStr>(key: &str) -> Result<Option<T>> {
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| CliError::config(format!("{} has an invalid value '{}'", key, raw))),
        Err(_) => Ok(None),
    }
}

impl Config {
    /// Load config from environment variables on top of the defaults
    ///
    /// - `PROTFETCH_CONTACT_EMAIL`
    /// - `PROTFETCH_SPECIES`
    /// - `PROTFETCH_DELAY_MS`
    /// - `PROTFETCH_API_TIMEOUT_SECS`
    /// - `PROTFETCH_OUTPUT_DIR`
    /// - `PROTFETCH_UNIPROT_URL`, `PROTFETCH_INTERPRO_URL`,
    ///   `PROTFETCH_STRING_URL`, `PROTFETCH_QUICKGO_URL`
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(email) = std::env::var("PROTFETCH_CONTACT_EMAIL") {
            config.contact_email = email;
        }
        if let Some(species) = parse_env("PROTFETCH_SPECIES")? {
            config.species = species;
        }
        if let Some(delay) = parse_env("PROTFETCH_DELAY_MS")? {
            config.delay_ms = delay;
        }
        if let Some(timeout) = parse_env("PROTFETCH_API_TIMEOUT_SECS")? {
            config.timeout_secs = timeout;
        }
        if let Ok(dir) = std::env::var("PROTFETCH_OUTPUT_DIR") {
            config.output_dir = PathBuf::from(dir);
        }
        if let Ok(url) = std::env::var("PROTFETCH_UNIPROT_URL") {
            config.urls.uniprot = url;
        }
        if let Ok(url) = std::env::var("PROTFETCH_INTERPRO_URL") {
            config.urls.interpro = url;
        }
        if let Ok(url) = std::env::var("PROTFETCH_STRING_URL") {
            config.urls.string = url;
        }
        if let Ok(url) = std::env::var("PROTFETCH_QUICKGO_URL") {
            config.urls.quickgo = url;
        }

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.contact_email.trim().is_empty() {
            return Err(CliError::config("Contact email cannot be empty"));
        }

        let urls = [
            ("UniProt", &self.urls.uniprot),
            ("InterPro", &self.urls.interpro),
            ("STRING", &self.urls.string),
            ("QuickGO", &self.urls.quickgo),
        ];
        for (service, url) in urls {
            if url.trim().is_empty() {
                return Err(CliError::config(format!("{} base URL cannot be empty", service)));
            }
        }

        if self.timeout_secs == 0 {
            return Err(CliError::config("Timeout must be greater than 0"));
        }

        Ok(())
    }

    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// User agent carrying the contact address
    pub fn user_agent(&self) -> String {
        format!(
            "protfetch/{} (mailto:{})",
            env!("CARGO_PKG_VERSION"),
            self.contact_email
        )
    }
}

//! Protein name to accession resolution
//!
//! Asks the UniProtKB search endpoint for exactly one hit and takes it as is.
//! No fuzzy matching; upstream relevance ranking decides.

use crate::api::{endpoints, ApiClient};
use crate::error::Result;
use crate::sources::uniprot::ProteinDescription;
use protfetch_common::Accession;
use serde::Deserialize;
use tracing::{error, info, warn};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchHit {
    primary_accession: Option<String>,
    protein_description: Option<ProteinDescription>,
}

/// UniProtKB search response
#[derive(Debug, Default, Deserialize)]
pub struct SearchResponse {
    results: Option<Vec<SearchHit>>,
}

/// Outcome of a successful resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedProtein {
    pub accession: Accession,
    /// Recommended (or submitted) full name; may be absent upstream
    pub display_name: Option<String>,
}

/// Take the first hit carrying a usable accession
pub fn extract_best_hit(response: SearchResponse) -> Option<ResolvedProtein> {
    let hit = response.results.unwrap_or_default().into_iter().next()?;

    let raw = hit.primary_accession?;
    let accession = match Accession::parse(&raw) {
        Ok(accession) => accession,
        Err(e) => {
            warn!(error = %e, "Search hit carried an unusable accession");
            return None;
        }
    };

    Some(ResolvedProtein {
        accession,
        display_name: hit.protein_description.and_then(|d| d.display_name()),
    })
}

/// Resolves free-text protein names against UniProtKB
#[derive(Debug, Clone)]
pub struct Resolver {
    client: ApiClient,
}

impl Resolver {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Best match for `name`, or `None` when nothing matched or the call failed
    pub async fn resolve(&self, name: &str) -> Option<ResolvedProtein> {
        match self.try_resolve(name).await {
            Ok(Some(resolved)) => {
                info!(query = %name, accession = %resolved.accession, "Protein resolved");
                Some(resolved)
            }
            Ok(None) => {
                info!(query = %name, "No UniProtKB entry matched");
                None
            }
            Err(e) => {
                error!(operation = "uniprot_search", query = %name, error = %e, "Error occurred while fetching data");
                None
            }
        }
    }

    async fn try_resolve(&self, name: &str) -> Result<Option<ResolvedProtein>> {
        let url = endpoints::uniprot_search_url(&self.client.urls().uniprot);
        let query = [
            ("query", format!("({})", name.trim())),
            ("format", "json".to_string()),
            ("fields", "accession,protein_name".to_string()),
            ("size", "1".to_string()),
        ];

        let response: SearchResponse = self.client.get_json(&url, &query).await?;
        Ok(extract_best_hit(response))
    }
}

//! STRING interaction adapter
//!
//! Six independent form-POST calls, one per STRING method. A failed method
//! leaves its own field `None` and the others untouched. Every call is
//! followed by a rate-limiter pause.

use crate::api::{endpoints, ApiClient};
use crate::error::Result;
use crate::rate_limit::{throttled, RateLimiter};
use protfetch_common::{Accession, InteractionRecord};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// STRING separates identifiers with a carriage return (`%0d` once encoded)
pub const IDENTIFIER_SEPARATOR: &str = "\r";

/// Minimum combined score for network edges (medium confidence)
pub const NETWORK_REQUIRED_SCORE: u32 = 400;

/// Number of interaction partners requested
pub const PARTNER_LIMIT: u32 = 10;

/// One or more identifiers sent to STRING in a single request
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StringQuery {
    identifiers: Vec<String>,
}

impl StringQuery {
    pub fn identifiers(&self) -> &[String] {
        &self.identifiers
    }

    pub fn is_empty(&self) -> bool {
        self.identifiers.is_empty()
    }

    /// Wire form of the identifier list
    pub fn joined(&self) -> String {
        self.identifiers.join(IDENTIFIER_SEPARATOR)
    }
}

impl From<&str> for StringQuery {
    fn from(value: &str) -> Self {
        std::iter::once(value.to_string()).collect()
    }
}

impl From<&Accession> for StringQuery {
    fn from(value: &Accession) -> Self {
        Self::from(value.as_str())
    }
}

impl From<Vec<String>> for StringQuery {
    fn from(value: Vec<String>) -> Self {
        value.into_iter().collect()
    }
}

impl FromIterator<String> for StringQuery {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            identifiers: iter
                .into_iter()
                .map(|id| id.trim().to_string())
                .filter(|id| !id.is_empty())
                .collect(),
        }
    }
}

/// STRING API methods queried for every protein
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringMethod {
    GetStringIds,
    Network,
    InteractionPartners,
    FunctionalAnnotation,
    Enrichment,
    PpiEnrichment,
}

impl StringMethod {
    /// Call order used by the adapter
    pub const ALL: [StringMethod; 6] = [
        StringMethod::GetStringIds,
        StringMethod::Network,
        StringMethod::InteractionPartners,
        StringMethod::FunctionalAnnotation,
        StringMethod::Enrichment,
        StringMethod::PpiEnrichment,
    ];

    /// Path segment of the method
    pub fn as_str(self) -> &'static str {
        match self {
            StringMethod::GetStringIds => "get_string_ids",
            StringMethod::Network => "network",
            StringMethod::InteractionPartners => "interaction_partners",
            StringMethod::FunctionalAnnotation => "functional_annotation",
            StringMethod::Enrichment => "enrichment",
            StringMethod::PpiEnrichment => "ppi_enrichment",
        }
    }

    /// Parameters specific to the method, on top of identifiers and species
    fn extra_params(self) -> Vec<(&'static str, String)> {
        match self {
            StringMethod::GetStringIds => {
                vec![("limit", "1".to_string()), ("echo_query", "1".to_string())]
            }
            StringMethod::Network => {
                vec![("required_score", NETWORK_REQUIRED_SCORE.to_string())]
            }
            StringMethod::InteractionPartners => vec![("limit", PARTNER_LIMIT.to_string())],
            StringMethod::FunctionalAnnotation
            | StringMethod::Enrichment
            | StringMethod::PpiEnrichment => Vec::new(),
        }
    }

    /// Full form body for this method
    pub fn form(self, query: &StringQuery, species: u32) -> Vec<(&'static str, String)> {
        let mut form = vec![
            ("identifiers", query.joined()),
            ("species", species.to_string()),
        ];
        form.extend(self.extra_params());
        form
    }

    fn slot(self, record: &mut InteractionRecord) -> &mut Option<Value> {
        match self {
            StringMethod::GetStringIds => &mut record.identifiers,
            StringMethod::Network => &mut record.network,
            StringMethod::InteractionPartners => &mut record.interaction_partners,
            StringMethod::FunctionalAnnotation => &mut record.functional_annotation,
            StringMethod::Enrichment => &mut record.enrichment,
            StringMethod::PpiEnrichment => &mut record.ppi_enrichment,
        }
    }
}

impl std::fmt::Display for StringMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Adapter for the STRING REST API
#[derive(Debug, Clone)]
pub struct StringAdapter {
    client: ApiClient,
    limiter: Arc<dyn RateLimiter>,
    species: u32,
}

impl StringAdapter {
    pub fn new(client: ApiClient, limiter: Arc<dyn RateLimiter>, species: u32) -> Self {
        Self {
            client,
            limiter,
            species,
        }
    }

    /// Query every method in turn; each field is `None` when its call failed
    pub async fn fetch(&self, query: &StringQuery) -> InteractionRecord {
        let mut record = InteractionRecord::default();

        if query.is_empty() {
            warn!("STRING query has no identifiers, skipping");
            return record;
        }

        for method in StringMethod::ALL {
            *method.slot(&mut record) = self.call(method, query).await;
        }

        info!(
            identifiers = query.identifiers().len(),
            species = self.species,
            present = record.present_count(),
            "STRING data fetched"
        );
        record
    }

    /// One method call followed by a pause, success or failure
    pub async fn call(&self, method: StringMethod, query: &StringQuery) -> Option<Value> {
        match throttled(self.limiter.as_ref(), self.try_call(method, query)).await {
            Ok(value) => {
                debug!(method = %method, "STRING call succeeded");
                Some(value)
            }
            Err(e) => {
                error!(operation = "string", method = %method, error = %e, "Error calling STRING");
                None
            }
        }
    }

    async fn try_call(&self, method: StringMethod, query: &StringQuery) -> Result<Value> {
        let url = endpoints::string_method_url(&self.client.urls().string, method.as_str());
        self.client
            .post_form(&url, &method.form(query, self.species))
            .await
    }
}

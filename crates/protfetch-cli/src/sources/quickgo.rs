//! QuickGO adapter: GO term discovery and per-term expansion
//!
//! Discovery reads the biological-process annotations of a protein and keeps
//! the distinct GO ids. Expansion then issues seven ontology queries per term,
//! one term at a time, pausing after each query. Query failures only null the
//! affected field.

use crate::api::{endpoints, ApiClient};
use crate::error::Result;
use crate::rate_limit::{throttled, RateLimiter};
use protfetch_common::types::is_go_term_id;
use protfetch_common::{Accession, GoTermDetail, OntologyRecord};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// GO aspect used for discovery
pub const DISCOVERY_ASPECT: &str = "biological_process";

/// Page size for the discovery annotation search
pub const DISCOVERY_LIMIT: u32 = 10;

/// Page size for the per-term annotation search
pub const ANNOTATION_LIMIT: u32 = 10;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Annotation {
    go_id: Option<String>,
}

/// QuickGO annotation search page
#[derive(Debug, Default, Deserialize)]
pub struct AnnotationSearch {
    results: Option<Vec<Annotation>>,
}

/// Distinct, well-formed GO ids of an annotation page, sorted
pub fn extract_go_terms(search: AnnotationSearch) -> Vec<String> {
    let mut terms = BTreeSet::new();
    for go_id in search
        .results
        .unwrap_or_default()
        .into_iter()
        .filter_map(|a| a.go_id)
    {
        if is_go_term_id(&go_id) {
            terms.insert(go_id);
        } else {
            warn!(go_id = %go_id, "Skipping malformed GO id");
        }
    }
    terms.into_iter().collect()
}

/// The seven ontology queries made for every GO term
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TermQuery {
    TermInfo,
    Ancestors,
    Children,
    Descendants,
    History,
    Xrefs,
    Annotations,
}

impl TermQuery {
    pub const ALL: [TermQuery; 7] = [
        TermQuery::TermInfo,
        TermQuery::Ancestors,
        TermQuery::Children,
        TermQuery::Descendants,
        TermQuery::History,
        TermQuery::Xrefs,
        TermQuery::Annotations,
    ];

    /// Field name in the output document
    pub fn as_str(self) -> &'static str {
        match self {
            TermQuery::TermInfo => "term_info",
            TermQuery::Ancestors => "ancestors",
            TermQuery::Children => "children",
            TermQuery::Descendants => "descendants",
            TermQuery::History => "history",
            TermQuery::Xrefs => "xrefs",
            TermQuery::Annotations => "annotations",
        }
    }

    /// URL and query parameters for `go_id`
    pub fn request(self, base_url: &str, go_id: &str) -> (String, Vec<(&'static str, String)>) {
        let view = match self {
            TermQuery::TermInfo => None,
            TermQuery::Ancestors => Some("ancestors"),
            TermQuery::Children => Some("children"),
            TermQuery::Descendants => Some("descendants"),
            TermQuery::History => Some("history"),
            TermQuery::Xrefs => Some("xrefs"),
            TermQuery::Annotations => {
                return (
                    endpoints::quickgo_annotation_search_url(base_url),
                    vec![
                        ("goId", go_id.to_string()),
                        ("limit", ANNOTATION_LIMIT.to_string()),
                    ],
                );
            }
        };
        (endpoints::quickgo_term_url(base_url, go_id, view), Vec::new())
    }

    fn slot(self, detail: &mut GoTermDetail) -> &mut Option<Value> {
        match self {
            TermQuery::TermInfo => &mut detail.term_info,
            TermQuery::Ancestors => &mut detail.ancestors,
            TermQuery::Children => &mut detail.children,
            TermQuery::Descendants => &mut detail.descendants,
            TermQuery::History => &mut detail.history,
            TermQuery::Xrefs => &mut detail.xrefs,
            TermQuery::Annotations => &mut detail.annotations,
        }
    }
}

/// Adapter for the QuickGO REST API
#[derive(Debug, Clone)]
pub struct QuickGoAdapter {
    client: ApiClient,
    limiter: Arc<dyn RateLimiter>,
}

impl QuickGoAdapter {
    pub fn new(client: ApiClient, limiter: Arc<dyn RateLimiter>) -> Self {
        Self { client, limiter }
    }

    /// Distinct GO ids annotated on the protein; empty when the call fails
    pub async fn discover_terms(&self, accession: &Accession) -> Vec<String> {
        match self.try_discover(accession).await {
            Ok(terms) => {
                info!(accession = %accession, terms = terms.len(), "GO terms discovered");
                terms
            }
            Err(e) => {
                error!(operation = "quickgo_discovery", accession = %accession, error = %e, "Error fetching GO terms");
                Vec::new()
            }
        }
    }

    async fn try_discover(&self, accession: &Accession) -> Result<Vec<String>> {
        let url = endpoints::quickgo_annotation_search_url(&self.client.urls().quickgo);
        let query = [
            ("geneProductId", accession.to_string()),
            ("aspect", DISCOVERY_ASPECT.to_string()),
            ("limit", DISCOVERY_LIMIT.to_string()),
        ];
        let search: AnnotationSearch = self.client.get_json(&url, &query).await?;
        Ok(extract_go_terms(search))
    }

    /// All seven queries for one term
    pub async fn fetch_term(&self, go_id: &str) -> GoTermDetail {
        let mut detail = GoTermDetail::default();
        for query in TermQuery::ALL {
            *query.slot(&mut detail) = self.call(query, go_id).await;
        }
        detail
    }

    /// One query followed by a pause, success or failure
    pub async fn call(&self, query: TermQuery, go_id: &str) -> Option<Value> {
        let (url, params) = query.request(&self.client.urls().quickgo, go_id);
        let outcome: Result<Value> =
            throttled(self.limiter.as_ref(), self.client.get_json(&url, &params)).await;

        match outcome {
            Ok(value) => {
                debug!(go_id = %go_id, query = query.as_str(), "QuickGO call succeeded");
                Some(value)
            }
            Err(e) => {
                error!(operation = "quickgo", go_id = %go_id, query = query.as_str(), error = %e, "Error calling QuickGO");
                None
            }
        }
    }

    /// Expand every term sequentially; `on_term` runs after each term completes
    pub async fn expand<F>(&self, go_terms: Vec<String>, mut on_term: F) -> OntologyRecord
    where
        F: FnMut(&str),
    {
        let mut record = OntologyRecord::new(go_terms);
        for go_id in record.go_terms.clone() {
            let detail = self.fetch_term(&go_id).await;
            on_term(&go_id);
            record.terms.insert(go_id, detail);
        }
        record
    }

    /// Discovery followed by expansion
    pub async fn fetch(&self, accession: &Accession) -> OntologyRecord {
        let terms = self.discover_terms(accession).await;
        self.expand(terms, |_| {}).await
    }
}

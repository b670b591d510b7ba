//! InterPro protein adapter
//!
//! Fetches `/protein/UniProt/{accession}` and flattens the integrated
//! (`entry_subset`) and `unintegrated` categories into one ordered entry list.
//! The remaining blocks are passed through untouched.

use crate::api::{endpoints, ApiClient};
use crate::error::Result;
use protfetch_common::{Accession, DomainEntry, DomainRecord};
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::BTreeMap;
use tracing::{error, info};

#[derive(Debug, Default, Deserialize)]
struct RawEntry {
    accession: Option<String>,
    /// Plain string in most payloads, `{ "name": ..., "short": ... }` in some
    name: Option<Value>,
    #[serde(rename = "type")]
    entry_type: Option<String>,
    source_database: Option<String>,
    go_terms: Option<Value>,
    locations: Option<Value>,
    children: Option<Value>,
    counters: Option<Value>,
    signatures: Option<Value>,
    cross_references: Option<Value>,
}

/// InterPro protein document
#[derive(Debug, Default, Deserialize)]
pub struct InterProProtein {
    metadata: Option<Value>,
    entry_subset: Option<Vec<RawEntry>>,
    unintegrated: Option<Vec<RawEntry>>,
    structure: Option<Value>,
    site_matches: Option<Value>,
    taxonomy: Option<Value>,
    proteomes: Option<Value>,
    set_info: Option<Value>,
    extra_fields: Option<Value>,
}

fn entry_name(name: Option<Value>) -> Option<String> {
    match name? {
        Value::String(s) => Some(s),
        Value::Object(map) => map.get("name").and_then(Value::as_str).map(str::to_string),
        _ => None,
    }
}

fn normalize_entry(raw: RawEntry, integrated: bool) -> DomainEntry {
    DomainEntry {
        accession: raw.accession,
        name: entry_name(raw.name),
        entry_type: raw.entry_type,
        source_database: raw.source_database,
        integrated,
        go_terms: raw.go_terms.unwrap_or_else(|| json!([])),
        locations: raw.locations.unwrap_or_else(|| json!([])),
        children: raw.children.unwrap_or_else(|| json!([])),
        counters: raw.counters.unwrap_or_else(|| json!({})),
        signatures: raw.signatures.unwrap_or_else(|| json!([])),
        cross_references: raw.cross_references.unwrap_or_else(|| json!([])),
    }
}

fn group_by_database(entries: &[DomainEntry]) -> BTreeMap<String, Vec<String>> {
    let mut groups: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for entry in entries {
        if let (Some(db), Some(acc)) = (&entry.source_database, &entry.accession) {
            groups.entry(db.clone()).or_default().push(acc.clone());
        }
    }
    groups
}

/// Reduce a raw InterPro document to the normalized record
pub fn extract_domain_record(accession: &Accession, protein: InterProProtein) -> DomainRecord {
    let integrated = protein
        .entry_subset
        .unwrap_or_default()
        .into_iter()
        .map(|e| normalize_entry(e, true));
    let unintegrated = protein
        .unintegrated
        .unwrap_or_default()
        .into_iter()
        .map(|e| normalize_entry(e, false));
    let entries: Vec<DomainEntry> = integrated.chain(unintegrated).collect();

    DomainRecord {
        accession: accession.clone(),
        metadata: protein.metadata.unwrap_or_else(|| json!({})),
        member_databases: group_by_database(&entries),
        entries,
        structures: protein.structure.unwrap_or_else(|| json!([])),
        site_matches: protein.site_matches.unwrap_or_else(|| json!([])),
        taxonomy: protein.taxonomy.unwrap_or_else(|| json!({})),
        proteomes: protein.proteomes.unwrap_or_else(|| json!([])),
        set_info: protein.set_info.unwrap_or_else(|| json!([])),
        extra_fields: protein.extra_fields.unwrap_or_else(|| json!({})),
    }
}

/// Adapter for the InterPro REST API
#[derive(Debug, Clone)]
pub struct InterProAdapter {
    client: ApiClient,
}

impl InterProAdapter {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Fetch and normalize the protein document; `None` when the call fails
    pub async fn fetch(&self, accession: &Accession) -> Option<DomainRecord> {
        match self.try_fetch(accession).await {
            Ok(record) => {
                info!(
                    accession = %accession,
                    entries = record.entries.len(),
                    integrated = record.integrated_count(),
                    "InterPro entries fetched"
                );
                Some(record)
            }
            Err(e) => {
                error!(operation = "interpro_protein", accession = %accession, error = %e, "Error fetching InterPro data");
                None
            }
        }
    }

    async fn try_fetch(&self, accession: &Accession) -> Result<DomainRecord> {
        let url = endpoints::interpro_protein_url(&self.client.urls().interpro, accession.as_str());
        let protein: InterProProtein = self.client.get_json(&url, &[]).await?;
        Ok(extract_domain_record(accession, protein))
    }
}

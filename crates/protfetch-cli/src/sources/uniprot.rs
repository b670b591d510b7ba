//! UniProtKB entry adapter
//!
//! Fetches `/uniprotkb/{accession}` and reduces the entry to a
//! [`ProteinRecord`]. Every lookup tolerates missing intermediate keys; only
//! a transport or decode failure drops the whole record.

use crate::api::{endpoints, ApiClient};
use crate::error::Result;
use protfetch_common::{Accession, ProteinFeature, ProteinRecord};
use serde::Deserialize;
use tracing::{error, info};

const FUNCTION_COMMENT: &str = "FUNCTION";
const SUBCELLULAR_LOCATION_COMMENT: &str = "SUBCELLULAR LOCATION";

// ============================================================================
// Upstream shapes
// ============================================================================

/// `{ "value": ..., "evidences": [...] }`; evidences are not kept
#[derive(Debug, Default, Deserialize)]
pub(crate) struct EvidencedValue {
    pub value: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProteinName {
    pub full_name: Option<EvidencedValue>,
    pub ec_numbers: Option<Vec<EvidencedValue>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProteinDescription {
    pub recommended_name: Option<ProteinName>,
    pub submission_names: Option<Vec<ProteinName>>,
    pub ec_numbers: Option<Vec<EvidencedValue>>,
}

impl ProteinDescription {
    /// Recommended full name only
    pub fn recommended_full_name(&self) -> Option<String> {
        self.recommended_name
            .as_ref()
            .and_then(|n| n.full_name.as_ref())
            .and_then(|v| v.value.clone())
    }

    /// Recommended full name, else the first submitted one
    pub fn display_name(&self) -> Option<String> {
        self.recommended_full_name().or_else(|| {
            self.submission_names
                .iter()
                .flatten()
                .find_map(|n| n.full_name.as_ref().and_then(|v| v.value.clone()))
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Gene {
    gene_name: Option<EvidencedValue>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Organism {
    scientific_name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct Sequence {
    value: Option<String>,
    length: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct SubcellularLocation {
    location: Option<EvidencedValue>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Comment {
    comment_type: Option<String>,
    texts: Option<Vec<EvidencedValue>>,
    subcellular_locations: Option<Vec<SubcellularLocation>>,
}

impl Comment {
    fn is(&self, kind: &str) -> bool {
        self.comment_type.as_deref() == Some(kind)
    }
}

#[derive(Debug, Default, Deserialize)]
struct Keyword {
    name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct Feature {
    #[serde(rename = "type")]
    feature_type: Option<String>,
    description: Option<String>,
}

/// Subset of a UniProtKB JSON entry
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UniProtEntry {
    entry_type: Option<String>,
    #[serde(rename = "uniProtkbId")]
    uniprotkb_id: Option<String>,
    protein_description: Option<ProteinDescription>,
    genes: Option<Vec<Gene>>,
    organism: Option<Organism>,
    sequence: Option<Sequence>,
    comments: Option<Vec<Comment>>,
    keywords: Option<Vec<Keyword>>,
    features: Option<Vec<Feature>>,
}

// ============================================================================
// Extraction
// ============================================================================

/// Reduce a raw entry to the normalized record
pub fn extract_protein_record(accession: &Accession, entry: UniProtEntry) -> ProteinRecord {
    let comments = entry.comments.unwrap_or_default();
    let description = entry.protein_description.unwrap_or_default();

    let gene_name = entry
        .genes
        .unwrap_or_default()
        .into_iter()
        .find_map(|g| g.gene_name.and_then(|n| n.value));

    let (sequence, sequence_length) = match entry.sequence {
        Some(seq) => (seq.value, seq.length),
        None => (None, None),
    };

    let function = comments
        .iter()
        .find(|c| c.is(FUNCTION_COMMENT))
        .and_then(|c| c.texts.as_ref())
        .and_then(|texts| texts.first())
        .and_then(|t| t.value.clone());

    let subcellular_locations = comments
        .iter()
        .filter(|c| c.is(SUBCELLULAR_LOCATION_COMMENT))
        .flat_map(|c| c.subcellular_locations.iter().flatten())
        .filter_map(|loc| loc.location.as_ref().and_then(|l| l.value.clone()))
        .collect();

    // EC numbers sit either on the description or on the recommended name
    let ec_numbers = description
        .ec_numbers
        .iter()
        .flatten()
        .chain(
            description
                .recommended_name
                .iter()
                .flat_map(|n| n.ec_numbers.iter().flatten()),
        )
        .filter_map(|ec| ec.value.clone())
        .collect();

    let keywords = entry
        .keywords
        .unwrap_or_default()
        .into_iter()
        .filter_map(|k| k.name)
        .collect();

    let features = entry
        .features
        .unwrap_or_default()
        .into_iter()
        .map(|f| ProteinFeature {
            feature_type: f.feature_type,
            description: f.description,
        })
        .collect();

    ProteinRecord {
        accession: accession.clone(),
        entry_type: entry.entry_type,
        entry_name: entry.uniprotkb_id,
        protein_name: description.recommended_full_name(),
        gene_name,
        organism: entry.organism.and_then(|o| o.scientific_name),
        sequence,
        sequence_length,
        function,
        subcellular_locations,
        ec_numbers,
        keywords,
        features,
    }
}

// ============================================================================
// Adapter
// ============================================================================

/// Adapter for the UniProtKB REST API
#[derive(Debug, Clone)]
pub struct UniProtAdapter {
    client: ApiClient,
}

impl UniProtAdapter {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Fetch and normalize the entry; `None` when the call fails
    pub async fn fetch(&self, accession: &Accession) -> Option<ProteinRecord> {
        match self.try_fetch(accession).await {
            Ok(record) => {
                info!(accession = %accession, features = record.features.len(), "UniProt entry fetched");
                Some(record)
            }
            Err(e) => {
                error!(operation = "uniprot_entry", accession = %accession, error = %e, "Error fetching UniProt data");
                None
            }
        }
    }

    async fn try_fetch(&self, accession: &Accession) -> Result<ProteinRecord> {
        let url = endpoints::uniprot_entry_url(&self.client.urls().uniprot, accession.as_str());
        let entry: UniProtEntry = self.client.get_json(&url, &[]).await?;
        Ok(extract_protein_record(accession, entry))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn accession() -> Accession {
        Accession::parse("P69905").unwrap()
    }

    fn parse(value: serde_json::Value) -> UniProtEntry {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_extract_full_entry() {
        let entry = parse(json!({
            "entryType": "UniProtKB reviewed (Swiss-Prot)",
            "uniProtkbId": "HBA_HUMAN",
            "proteinDescription": {
                "recommendedName": {"fullName": {"value": "Hemoglobin subunit alpha"}}
            },
            "genes": [{"geneName": {"value": "HBA1"}}, {"geneName": {"value": "HBA2"}}],
            "organism": {"scientificName": "Homo sapiens", "taxonId": 9606},
            "sequence": {"value": "MVLSPADKTN", "length": 142},
            "comments": [
                {"commentType": "FUNCTION", "texts": [{"value": "Involved in oxygen transport"}]},
                {"commentType": "SUBCELLULAR LOCATION", "subcellularLocations": [
                    {"location": {"value": "Cytoplasm"}}
                ]}
            ],
            "keywords": [{"id": "KW-0349", "name": "Heme"}, {"id": "KW-0408", "name": "Iron"}],
            "features": [{"type": "Chain", "description": "Hemoglobin subunit alpha"}]
        }));

        let record = extract_protein_record(&accession(), entry);
        assert_eq!(record.accession.as_str(), "P69905");
        assert_eq!(record.entry_name.as_deref(), Some("HBA_HUMAN"));
        assert_eq!(record.protein_name.as_deref(), Some("Hemoglobin subunit alpha"));
        assert_eq!(record.gene_name.as_deref(), Some("HBA1"));
        assert_eq!(record.organism.as_deref(), Some("Homo sapiens"));
        assert_eq!(record.sequence_length, Some(142));
        assert_eq!(record.function.as_deref(), Some("Involved in oxygen transport"));
        assert_eq!(record.subcellular_locations, vec!["Cytoplasm"]);
        assert_eq!(record.keywords, vec!["Heme", "Iron"]);
        assert_eq!(record.features.len(), 1);
        assert_eq!(record.features[0].feature_type.as_deref(), Some("Chain"));
    }

    #[test]
    fn test_extract_empty_entry_defaults_everything() {
        let record = extract_protein_record(&accession(), parse(json!({})));
        assert_eq!(record.accession.as_str(), "P69905");
        assert!(record.entry_type.is_none());
        assert!(record.protein_name.is_none());
        assert!(record.gene_name.is_none());
        assert!(record.sequence.is_none());
        assert!(record.function.is_none());
        assert!(record.subcellular_locations.is_empty());
        assert!(record.ec_numbers.is_empty());
        assert!(record.features.is_empty());
    }

    #[test]
    fn test_extract_tolerates_nulls_and_empty_genes() {
        let record = extract_protein_record(
            &accession(),
            parse(json!({
                "genes": [],
                "organism": null,
                "comments": [{"commentType": "FUNCTION", "texts": []}],
                "keywords": [{"id": "KW-0001"}]
            })),
        );
        assert!(record.gene_name.is_none());
        assert!(record.organism.is_none());
        assert!(record.function.is_none());
        assert!(record.keywords.is_empty());
    }

    #[test]
    fn test_gene_name_skips_genes_without_name() {
        let record = extract_protein_record(
            &accession(),
            parse(json!({
                "genes": [{"orderedLocusNames": [{"value": "b0001"}]}, {"geneName": {"value": "thrL"}}]
            })),
        );
        assert_eq!(record.gene_name.as_deref(), Some("thrL"));
    }

    #[test]
    fn test_function_uses_first_function_comment_only() {
        let record = extract_protein_record(
            &accession(),
            parse(json!({
                "comments": [
                    {"commentType": "SIMILARITY", "texts": [{"value": "Belongs to the globin family"}]},
                    {"commentType": "FUNCTION", "texts": [{"value": "first"}, {"value": "second"}]},
                    {"commentType": "FUNCTION", "texts": [{"value": "third"}]}
                ]
            })),
        );
        assert_eq!(record.function.as_deref(), Some("first"));
    }

    #[test]
    fn test_subcellular_locations_across_comments() {
        let record = extract_protein_record(
            &accession(),
            parse(json!({
                "comments": [
                    {"commentType": "SUBCELLULAR LOCATION", "subcellularLocations": [
                        {"location": {"value": "Nucleus"}},
                        {"topology": {"value": "Peripheral membrane protein"}}
                    ]},
                    {"commentType": "FUNCTION", "subcellularLocations": [
                        {"location": {"value": "ignored"}}
                    ]},
                    {"commentType": "SUBCELLULAR LOCATION", "subcellularLocations": [
                        {"location": {"value": "Cytoplasm"}}
                    ]}
                ]
            })),
        );
        assert_eq!(record.subcellular_locations, vec!["Nucleus", "Cytoplasm"]);
    }

    #[test]
    fn test_ec_numbers_from_both_locations() {
        let record = extract_protein_record(
            &accession(),
            parse(json!({
                "proteinDescription": {
                    "recommendedName": {
                        "fullName": {"value": "Carbonic anhydrase 2"},
                        "ecNumbers": [{"value": "4.2.1.1"}]
                    },
                    "ecNumbers": [{"value": "4.2.1.69"}]
                }
            })),
        );
        assert_eq!(record.ec_numbers, vec!["4.2.1.69", "4.2.1.1"]);
    }

    #[test]
    fn test_display_name_falls_back_to_submission_name() {
        let description: ProteinDescription = serde_json::from_value(json!({
            "submissionNames": [{"fullName": {"value": "Uncharacterized protein"}}]
        }))
        .unwrap();
        assert_eq!(description.display_name().as_deref(), Some("Uncharacterized protein"));
    }

    #[test]
    fn test_protein_name_ignores_submission_names() {
        let record = extract_protein_record(
            &accession(),
            parse(json!({
                "entryType": "UniProtKB unreviewed (TrEMBL)",
                "proteinDescription": {
                    "submissionNames": [{"fullName": {"value": "Uncharacterized protein"}}]
                }
            })),
        );
        assert!(record.protein_name.is_none());
        assert_eq!(record.entry_type.as_deref(), Some("UniProtKB unreviewed (TrEMBL)"));
    }
}

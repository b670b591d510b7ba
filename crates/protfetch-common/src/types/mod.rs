//! Domain types shared across protfetch
//!
//! Every upstream response is normalized into one of the sub-documents below.
//! All leaves are optional: an absent upstream value becomes `None` or an
//! empty collection, never a missing key.

use crate::error::{ProtfetchError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::LazyLock;

static GO_TERM_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^GO:\d{7}$").ok());

/// Returns true when `id` has the canonical `GO:NNNNNNN` shape
pub fn is_go_term_id(id: &str) -> bool {
    GO_TERM_PATTERN
        .as_ref()
        .map(|re| re.is_match(id))
        .unwrap_or(false)
}

// ============================================================================
// Accession
// ============================================================================

/// Stable identifier of one UniProtKB entry (e.g. `P69905`).
///
/// Resolved once per run and handed to every adapter verbatim. There is no
/// mutable access to the inner string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Accession(String);

impl Accession {
    /// Parse an accession, trimming surrounding whitespace.
    ///
    /// The accession is spliced into URL paths and file names, so only ASCII
    /// letters, digits, `_` and `-` are accepted.
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || !trimmed.chars().all(is_accession_char) {
            return Err(ProtfetchError::InvalidAccession(raw.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// File name of the artifact written for this accession
    pub fn output_file_name(&self) -> String {
        format!("{}_comprehensive_info.json", self.0)
    }
}

fn is_accession_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

impl std::fmt::Display for Accession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Accession {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Accession {
    type Error = ProtfetchError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<Accession> for String {
    fn from(value: Accession) -> Self {
        value.0
    }
}

// ============================================================================
// UniProt
// ============================================================================

/// One `{type, description}` feature of a UniProt entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProteinFeature {
    #[serde(rename = "type")]
    pub feature_type: Option<String>,
    pub description: Option<String>,
}

/// Normalized UniProtKB entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProteinRecord {
    pub accession: Accession,
    pub entry_type: Option<String>,
    pub entry_name: Option<String>,
    pub protein_name: Option<String>,
    pub gene_name: Option<String>,
    pub organism: Option<String>,
    pub sequence: Option<String>,
    pub sequence_length: Option<u64>,
    pub function: Option<String>,
    pub subcellular_locations: Vec<String>,
    pub ec_numbers: Vec<String>,
    pub keywords: Vec<String>,
    pub features: Vec<ProteinFeature>,
}

// ============================================================================
// InterPro
// ============================================================================

/// One InterPro entry or member-database signature matched on the protein
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainEntry {
    pub accession: Option<String>,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub entry_type: Option<String>,
    pub source_database: Option<String>,
    /// True when the entry came from the integrated subset
    pub integrated: bool,
    pub go_terms: Value,
    pub locations: Value,
    pub children: Value,
    pub counters: Value,
    pub signatures: Value,
    pub cross_references: Value,
}

/// Normalized InterPro protein document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainRecord {
    pub accession: Accession,
    pub metadata: Value,
    /// Integrated entries first, then unintegrated ones, upstream order kept
    pub entries: Vec<DomainEntry>,
    pub structures: Value,
    pub site_matches: Value,
    pub taxonomy: Value,
    pub proteomes: Value,
    pub set_info: Value,
    pub extra_fields: Value,
    /// Entry accessions grouped by their source database
    pub member_databases: BTreeMap<String, Vec<String>>,
}

impl DomainRecord {
    pub fn integrated_count(&self) -> usize {
        self.entries.iter().filter(|e| e.integrated).count()
    }
}

// ============================================================================
// STRING
// ============================================================================

/// STRING sub-document: six independently nullable method results
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InteractionRecord {
    pub identifiers: Option<Value>,
    pub network: Option<Value>,
    pub interaction_partners: Option<Value>,
    pub functional_annotation: Option<Value>,
    pub enrichment: Option<Value>,
    pub ppi_enrichment: Option<Value>,
}

impl InteractionRecord {
    /// Number of fields that came back from upstream
    pub fn present_count(&self) -> usize {
        [
            &self.identifiers,
            &self.network,
            &self.interaction_partners,
            &self.functional_annotation,
            &self.enrichment,
            &self.ppi_enrichment,
        ]
        .iter()
        .filter(|f| f.is_some())
        .count()
    }
}

// ============================================================================
// QuickGO
// ============================================================================

/// Ontology details for one GO term, each field fetched separately
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GoTermDetail {
    pub term_info: Option<Value>,
    pub ancestors: Option<Value>,
    pub children: Option<Value>,
    pub descendants: Option<Value>,
    pub history: Option<Value>,
    pub xrefs: Option<Value>,
    pub annotations: Option<Value>,
}

/// QuickGO sub-document.
///
/// Serialized as a single map: the `go_terms` list next to one key per term.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OntologyRecord {
    pub go_terms: Vec<String>,
    #[serde(flatten)]
    pub terms: BTreeMap<String, GoTermDetail>,
}

impl OntologyRecord {
    pub fn new(go_terms: Vec<String>) -> Self {
        Self {
            go_terms,
            terms: BTreeMap::new(),
        }
    }
}

// ============================================================================
// Composite
// ============================================================================

/// Top-level artifact, always serialized with exactly four keys
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositeRecord {
    pub uniprot: Option<ProteinRecord>,
    pub interpro: Option<DomainRecord>,
    pub string: InteractionRecord,
    pub quickgo: OntologyRecord,
}

impl CompositeRecord {
    pub fn to_pretty_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn empty_record() -> CompositeRecord {
        CompositeRecord {
            uniprot: None,
            interpro: None,
            string: InteractionRecord::default(),
            quickgo: OntologyRecord::default(),
        }
    }

    #[test]
    fn test_accession_parse_trims() {
        let acc = Accession::parse("  P69905\n").unwrap();
        assert_eq!(acc.as_str(), "P69905");
        assert_eq!(acc.to_string(), "P69905");
    }

    #[test]
    fn test_accession_rejects_blank_and_inner_whitespace() {
        assert!(Accession::parse("").is_err());
        assert!(Accession::parse("   ").is_err());
        assert!(Accession::parse("P69 905").is_err());
    }

    #[test]
    fn test_accession_rejects_url_metacharacters() {
        for raw in ["P69905/../x", "P?1", "P#1", "P%2F1", "P69905.json", "Pé1"] {
            assert!(Accession::parse(raw).is_err(), "{raw} should be rejected");
        }
        assert_eq!(Accession::parse("P69905-2").unwrap().as_str(), "P69905-2");
        assert_eq!(Accession::parse("A0A_024R161").unwrap().as_str(), "A0A_024R161");
    }

    #[test]
    fn test_accession_output_file_name() {
        let acc = Accession::parse("P69905").unwrap();
        assert_eq!(acc.output_file_name(), "P69905_comprehensive_info.json");
    }

    #[test]
    fn test_accession_deserialize_validates() {
        let ok: Accession = serde_json::from_value(json!("P68871")).unwrap();
        assert_eq!(ok.as_str(), "P68871");
        assert!(serde_json::from_value::<Accession>(json!("")).is_err());
    }

    #[test]
    fn test_is_go_term_id() {
        assert!(is_go_term_id("GO:0008150"));
        assert!(!is_go_term_id("GO:815"));
        assert!(!is_go_term_id("go:0008150"));
        assert!(!is_go_term_id("GO:00081500"));
    }

    #[test]
    fn test_composite_has_exactly_four_keys() {
        let value = serde_json::to_value(empty_record()).unwrap();
        let obj = value.as_object().unwrap();
        let mut keys: Vec<_> = obj.keys().cloned().collect();
        keys.sort();
        assert_eq!(keys, vec!["interpro", "quickgo", "string", "uniprot"]);
        assert!(obj["uniprot"].is_null());
        assert!(obj["interpro"].is_null());
    }

    #[test]
    fn test_quickgo_flattens_terms_next_to_go_terms() {
        let mut quickgo = OntologyRecord::new(vec!["GO:0015671".to_string()]);
        quickgo.terms.insert(
            "GO:0015671".to_string(),
            GoTermDetail {
                term_info: Some(json!({"numberOfHits": 1})),
                ..Default::default()
            },
        );

        let value = serde_json::to_value(&quickgo).unwrap();
        assert_eq!(value["go_terms"], json!(["GO:0015671"]));
        assert_eq!(value["GO:0015671"]["term_info"]["numberOfHits"], json!(1));
        assert!(value["GO:0015671"]["history"].is_null());
    }

    #[test]
    fn test_composite_round_trip_preserves_types() {
        let mut record = empty_record();
        record.uniprot = Some(ProteinRecord {
            accession: Accession::parse("P69905").unwrap(),
            entry_type: Some("UniProtKB reviewed (Swiss-Prot)".to_string()),
            entry_name: Some("HBA_HUMAN".to_string()),
            protein_name: Some("Hemoglobin subunit alpha".to_string()),
            gene_name: Some("HBA1".to_string()),
            organism: Some("Homo sapiens".to_string()),
            sequence: Some("MVLSPADKTNVKAAWGKVGAHAGEYGAEALERMFLSFPTTKTYFPHF".to_string()),
            sequence_length: Some(142),
            function: None,
            subcellular_locations: vec![],
            ec_numbers: vec![],
            keywords: vec!["Heme".to_string()],
            features: vec![ProteinFeature {
                feature_type: Some("Chain".to_string()),
                description: None,
            }],
        });
        record.string.network = Some(json!([{"score": 0.999}]));
        record.quickgo = OntologyRecord::new(vec!["GO:0015671".to_string()]);
        record
            .quickgo
            .terms
            .insert("GO:0015671".to_string(), GoTermDetail::default());

        let text = record.to_pretty_json().unwrap();
        let parsed: CompositeRecord = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, record);

        let raw: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(raw["uniprot"]["sequence_length"], json!(142));
        assert_eq!(raw["uniprot"]["features"][0]["type"], json!("Chain"));
        assert!(raw["uniprot"]["function"].is_null());
        assert!(raw["string"]["enrichment"].is_null());
    }

    #[test]
    fn test_round_trip_keeps_long_mantissa_floats() {
        let p_value = 0.000047630939344047156_f64;
        let mut record = empty_record();
        record.string.ppi_enrichment = Some(json!([{"p_value": p_value, "score": 0.9990000000000001}]));

        let parsed: CompositeRecord =
            serde_json::from_str(&record.to_pretty_json().unwrap()).unwrap();
        let enrichment = parsed.string.ppi_enrichment.as_ref().unwrap();
        assert_eq!(enrichment[0]["p_value"].as_f64().unwrap().to_bits(), p_value.to_bits());
        assert_eq!(parsed, record);
    }

    proptest! {
        #[test]
        fn prop_float_leaves_survive_round_trip(x in proptest::num::f64::NORMAL) {
            let mut record = empty_record();
            record.string.network = Some(json!([{"score": x}]));
            let parsed: CompositeRecord =
                serde_json::from_str(&record.to_pretty_json().unwrap()).unwrap();
            prop_assert_eq!(parsed, record);
        }
    }

    #[test]
    fn test_pretty_json_uses_two_space_indent() {
        let text = empty_record().to_pretty_json().unwrap();
        assert!(text.contains("\n  \"uniprot\": null"));
    }

    #[test]
    fn test_interaction_present_count() {
        let mut record = InteractionRecord::default();
        assert_eq!(record.present_count(), 0);
        record.identifiers = Some(json!([]));
        record.ppi_enrichment = Some(json!([{"p_value": 0.01}]));
        assert_eq!(record.present_count(), 2);
    }

    proptest! {
        #[test]
        fn prop_accession_parse_is_idempotent(raw in "[A-Z][0-9][A-Z0-9]{3}[0-9]") {
            let padded = format!(" {} ", raw);
            let acc = Accession::parse(&padded).unwrap();
            prop_assert_eq!(acc.as_str(), raw.as_str());
            let again = Accession::parse(acc.as_str()).unwrap();
            prop_assert_eq!(again, acc);
        }
    }
}

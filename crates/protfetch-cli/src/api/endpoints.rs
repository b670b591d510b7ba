//! Upstream endpoint URL builders
//!
//! Pure helpers; base URLs come from [`crate::config::ServiceUrls`].

fn trim(base_url: &str) -> &str {
    base_url.trim_end_matches('/')
}

/// UniProtKB search endpoint
pub fn uniprot_search_url(base_url: &str) -> String {
    format!("{}/uniprotkb/search", trim(base_url))
}

/// Full UniProtKB entry
pub fn uniprot_entry_url(base_url: &str, accession: &str) -> String {
    format!("{}/uniprotkb/{}", trim(base_url), accession)
}

/// InterPro protein document for a UniProt accession
pub fn interpro_protein_url(base_url: &str, accession: &str) -> String {
    format!("{}/protein/UniProt/{}", trim(base_url), accession)
}

/// STRING method endpoint with JSON output
pub fn string_method_url(base_url: &str, method: &str) -> String {
    format!("{}/json/{}", trim(base_url), method)
}

/// QuickGO annotation search
pub fn quickgo_annotation_search_url(base_url: &str) -> String {
    format!("{}/annotation/search", trim(base_url))
}

/// QuickGO ontology term, optionally a sub-resource such as `ancestors`
pub fn quickgo_term_url(base_url: &str, go_id: &str, view: Option<&str>) -> String {
    match view {
        Some(view) => format!("{}/ontology/go/terms/{}/{}", trim(base_url), go_id, view),
        None => format!("{}/ontology/go/terms/{}", trim(base_url), go_id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniprot_urls() {
        assert_eq!(
            uniprot_search_url("https://rest.uniprot.org"),
            "https://rest.uniprot.org/uniprotkb/search"
        );
        assert_eq!(
            uniprot_entry_url("https://rest.uniprot.org/", "P69905"),
            "https://rest.uniprot.org/uniprotkb/P69905"
        );
    }

    #[test]
    fn test_interpro_protein_url() {
        assert_eq!(
            interpro_protein_url("https://www.ebi.ac.uk/interpro/api", "P69905"),
            "https://www.ebi.ac.uk/interpro/api/protein/UniProt/P69905"
        );
    }

    #[test]
    fn test_string_method_url() {
        assert_eq!(
            string_method_url("https://string-db.org/api", "ppi_enrichment"),
            "https://string-db.org/api/json/ppi_enrichment"
        );
    }

    #[test]
    fn test_quickgo_urls() {
        let base = "https://www.ebi.ac.uk/QuickGO/services";
        assert_eq!(
            quickgo_annotation_search_url(base),
            "https://www.ebi.ac.uk/QuickGO/services/annotation/search"
        );
        assert_eq!(
            quickgo_term_url(base, "GO:0015671", None),
            "https://www.ebi.ac.uk/QuickGO/services/ontology/go/terms/GO:0015671"
        );
        assert_eq!(
            quickgo_term_url(base, "GO:0015671", Some("xrefs")),
            "https://www.ebi.ac.uk/QuickGO/services/ontology/go/terms/GO:0015671/xrefs"
        );
    }
}

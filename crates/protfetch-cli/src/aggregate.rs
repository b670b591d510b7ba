//! Composite record assembly and the output artifact
//!
//! No transformation happens here: the four sub-documents are placed under
//! their source keys and written as indented JSON.

use crate::error::Result;
use protfetch_common::{
    Accession, CompositeRecord, DomainRecord, InteractionRecord, OntologyRecord, ProteinRecord,
};
use std::path::{Path, PathBuf};
use tracing::info;

/// Place the four sub-documents under their source keys
pub fn assemble(
    uniprot: Option<ProteinRecord>,
    interpro: Option<DomainRecord>,
    string: InteractionRecord,
    quickgo: OntologyRecord,
) -> CompositeRecord {
    CompositeRecord {
        uniprot,
        interpro,
        string,
        quickgo,
    }
}

/// `<dir>/{accession}_comprehensive_info.json`
pub fn output_path(dir: &Path, accession: &Accession) -> PathBuf {
    dir.join(accession.output_file_name())
}

/// Serialize `record` with 2-space indentation and write it into `dir`
pub async fn write_artifact(
    record: &CompositeRecord,
    dir: &Path,
    accession: &Accession,
) -> Result<PathBuf> {
    let path = output_path(dir, accession);
    let mut body = record.to_pretty_json()?;
    body.push('\n');

    tokio::fs::create_dir_all(dir).await?;
    tokio::fs::write(&path, body.as_bytes()).await?;

    info!(path = %path.display(), bytes = body.len(), "Artifact written");
    Ok(path)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use tempfile::TempDir;

    #[test]
    fn test_output_path() {
        let accession = Accession::parse("P69905").unwrap();
        assert_eq!(
            output_path(Path::new("out"), &accession),
            PathBuf::from("out/P69905_comprehensive_info.json")
        );
    }

    #[tokio::test]
    async fn test_write_artifact_round_trip() {
        let dir = TempDir::new().unwrap();
        let accession = Accession::parse("P69905").unwrap();

        let mut string = InteractionRecord::default();
        string.network = Some(json!([{"stringId_A": "9606.ENSP00000251595", "score": 0.999}]));
        let record = assemble(None, None, string, OntologyRecord::default());

        let path = write_artifact(&record, dir.path(), &accession).await.unwrap();
        assert!(path.ends_with("P69905_comprehensive_info.json"));

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.ends_with('\n'));

        let value: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value.as_object().unwrap().len(), 4);
        assert!(value["uniprot"].is_null());
        assert_eq!(value["string"]["network"][0]["score"], json!(0.999));
        assert_eq!(value["quickgo"]["go_terms"], json!([]));

        let parsed: CompositeRecord = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, record);
    }

    #[tokio::test]
    async fn test_write_artifact_creates_missing_directory() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("runs").join("today");
        let accession = Accession::parse("P68871").unwrap();
        let record = assemble(
            None,
            None,
            InteractionRecord::default(),
            OntologyRecord::default(),
        );

        let path = write_artifact(&record, &nested, &accession).await.unwrap();
        assert!(path.exists());
    }
}

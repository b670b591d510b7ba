//! protfetch Common Library
//!
//! Shared domain model, error handling and logging for the protfetch workspace.
//!
//! # Overview
//!
//! - **Types**: the normalized per-source sub-documents and the composite record
//! - **Error Handling**: common error and result types
//! - **Logging**: `tracing` subscriber setup shared by every binary
//!
//! # Example
//!
//! ```no_run
//! use protfetch_common::{Accession, Result};
//!
//! fn output_name(raw: &str) -> Result<String> {
//!     let accession = Accession::parse(raw)?;
//!     Ok(format!("{}_comprehensive_info.json", accession))
//! }
//! ```

#![deny(clippy::unwrap_used, clippy::expect_used)]

pub mod error;
pub mod logging;
pub mod types;

// Re-export commonly used types
pub use error::{ProtfetchError, Result};
pub use types::{
    Accession, CompositeRecord, DomainEntry, DomainRecord, GoTermDetail, InteractionRecord,
    OntologyRecord, ProteinFeature, ProteinRecord,
};

//! Upstream sources
//!
//! Each adapter owns one service: it calls it, decodes the response into
//! typed optional shapes and reduces those to a normalized sub-document with
//! a pure `extract_*` function.

pub mod interpro;
pub mod quickgo;
pub mod resolver;
pub mod string_db;
pub mod uniprot;

pub use interpro::InterProAdapter;
pub use quickgo::QuickGoAdapter;
pub use resolver::{ResolvedProtein, Resolver};
pub use string_db::{StringAdapter, StringQuery};
pub use uniprot::UniProtAdapter;

//! CLI command implementations
//!
//! protfetch has a single command; it lives in [`fetch`].

pub mod fetch;

//! HTTP plumbing shared by the resolver and the source adapters.

pub mod client;
pub mod endpoints;

pub use client::ApiClient;

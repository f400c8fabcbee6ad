//! # Paper Harvester
//!
//! Searches several academic and book sources for a free-text query, normalizes
//! each source's response into a common [`Record`], and downloads the referenced
//! documents to a local directory.
//!
//! ## Architecture
//!
//! - [`models`]: Core data structures ([`Record`] and its builder)
//! - [`sources`]: Source plugins with a trait-based architecture
//! - [`download`]: Streaming download worker, idempotent on existing files
//! - [`orchestrator`]: Sequential search fan-out plus a bounded download pool
//! - [`utils`]: Shared HTTP client and filename sanitization
//! - [`config`]: Configuration management

pub mod config;
pub mod download;
pub mod models;
pub mod orchestrator;
pub mod sources;
pub mod utils;

// Re-export commonly used types
pub use download::Downloader;
pub use models::Record;
pub use orchestrator::Orchestrator;
pub use sources::{Source, SourceRegistry};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

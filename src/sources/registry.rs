//! Registry for managing search source plugins.

use std::sync::Arc;

use super::{
    ArxivSource, EricSource, GoogleBooksSource, GoogleScholarSource, OpenLibrarySource, PmcSource,
    SemanticScholarSource, Source, WikibooksSource,
};
use crate::utils::HttpClient;

/// Registry for all available search sources.
///
/// Sources are held in registration order; the orchestrator queries them
/// sequentially in exactly this order, so iteration must be deterministic.
#[derive(Debug, Clone)]
pub struct SourceRegistry {
    sources: Vec<Arc<dyn Source>>,
}

impl SourceRegistry {
    /// Create a registry with every built-in source, sharing one HTTP client.
    ///
    /// PMC, arXiv and Semantic Scholar come first, matching the order results
    /// are accumulated and reported in.
    pub fn new(client: HttpClient) -> Self {
        let mut registry = Self::empty();

        registry.register(Arc::new(PmcSource::new(client.clone())));
        registry.register(Arc::new(ArxivSource::new(client.clone())));
        registry.register(Arc::new(SemanticScholarSource::new(client.clone())));
        registry.register(Arc::new(GoogleScholarSource::new(client.clone())));
        registry.register(Arc::new(GoogleBooksSource::new(client.clone())));
        registry.register(Arc::new(WikibooksSource::new(client.clone())));
        registry.register(Arc::new(EricSource::new(client.clone())));
        registry.register(Arc::new(OpenLibrarySource::new(client)));

        registry
    }

    /// Create an empty registry
    pub fn empty() -> Self {
        Self {
            sources: Vec::new(),
        }
    }

    /// Register a new source at the end of the invocation order
    pub fn register(&mut self, source: Arc<dyn Source>) {
        self.sources.push(source);
    }

    /// Get a source by ID
    pub fn get(&self, id: &str) -> Option<&Arc<dyn Source>> {
        self.sources.iter().find(|s| s.id() == id)
    }

    /// All registered sources, in invocation order
    pub fn all(&self) -> impl Iterator<Item = &Arc<dyn Source>> {
        self.sources.iter()
    }

    /// All source IDs, in invocation order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.sources.iter().map(|s| s.id())
    }

    /// Check if a source exists
    pub fn has(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Number of registered sources
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

//! The event source seam: the [`EventSource`] trait and its registry.
//!
//! A source translates one external provider's response into the
//! canonical [`EventRecord`] shape. Sources are the system's external
//! collaborators — HTTP clients, scrapers, local fixtures — and the
//! aggregator treats each one's failure as "zero events from that
//! source", never as a fatal error.

use anyhow::Result;
use async_trait::async_trait;
use eventide_core::EventRecord;

use crate::config::Config;
use crate::source_fs::FilesystemSource;

/// A provider of event records.
///
/// Implementations may perform blocking I/O (HTTP requests, file reads)
/// on the async runtime. Errors returned from [`fetch`](EventSource::fetch)
/// are absorbed by the aggregator and logged; a source must not take the
/// whole collection pass down with it.
#[async_trait]
pub trait EventSource: Send + Sync {
    /// Short source identifier (e.g. `"filesystem"`, `"ticketmaster"`).
    fn name(&self) -> &str;

    /// One-line description, shown by `evt sources`.
    fn description(&self) -> &str;

    /// Whether the source looks usable with its current configuration.
    fn healthy(&self) -> bool {
        true
    }

    /// Fetch events for a location (postal code), optionally narrowed by
    /// interest keywords. An empty interest slice means "everything".
    async fn fetch(&self, location: &str, interests: &[String]) -> Result<Vec<EventRecord>>;
}

/// Ordered collection of registered event sources.
#[derive(Default)]
pub struct SourceRegistry {
    sources: Vec<Box<dyn EventSource>>,
}

impl SourceRegistry {
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
        }
    }

    /// Build a registry from configuration, registering every configured
    /// built-in source.
    pub fn from_config(config: &Config) -> Self {
        let mut registry = Self::new();
        if let Some(fs_config) = &config.sources.filesystem {
            registry.register(Box::new(FilesystemSource::new(fs_config.clone())));
        }
        registry
    }

    pub fn register(&mut self, source: Box<dyn EventSource>) {
        self.sources.push(source);
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn EventSource> {
        self.sources.iter().map(|s| s.as_ref())
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

/// Print the source table for `evt sources`.
pub fn list_sources(registry: &SourceRegistry) {
    println!("{:<16} {:<10} DESCRIPTION", "SOURCE", "HEALTHY");
    if registry.is_empty() {
        println!("(no sources configured)");
        return;
    }
    for source in registry.iter() {
        println!(
            "{:<16} {:<10} {}",
            source.name(),
            source.healthy(),
            source.description()
        );
    }
}

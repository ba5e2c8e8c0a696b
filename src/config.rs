//! TOML configuration parsing and validation.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub sources: SourcesConfig,
    #[serde(default)]
    pub embedding: EmbeddingConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub retrieval: RetrievalConfig,
    #[serde(default)]
    pub aggregation: AggregationConfig,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct SourcesConfig {
    pub filesystem: Option<FilesystemSourceConfig>,
}

/// Configuration for the filesystem event source: a directory of JSON
/// files, each holding an array of event records.
#[derive(Debug, Deserialize, Clone)]
pub struct FilesystemSourceConfig {
    pub root: PathBuf,
    #[serde(default = "default_include_globs")]
    pub include_globs: Vec<String>,
    #[serde(default)]
    pub exclude_globs: Vec<String>,
    /// Drop events whose ISO date is already in the past.
    #[serde(default = "default_upcoming_only")]
    pub upcoming_only: bool,
}

fn default_include_globs() -> Vec<String> {
    vec!["**/*.json".to_string()]
}

fn default_upcoming_only() -> bool {
    true
}

#[derive(Debug, Deserialize, Clone)]
pub struct EmbeddingConfig {
    #[serde(default = "default_provider")]
    pub provider: String,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub dims: Option<usize>,
    /// Base URL for the Ollama provider (default `http://localhost:11434`).
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: "disabled".to_string(),
            model: None,
            dims: None,
            url: None,
            max_retries: 5,
            timeout_secs: 30,
        }
    }
}

impl EmbeddingConfig {
    pub fn is_enabled(&self) -> bool {
        self.provider != "disabled"
    }
}

fn default_provider() -> String {
    "disabled".to_string()
}
fn default_max_retries() -> u32 {
    5
}
fn default_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Deserialize, Clone)]
pub struct CacheConfig {
    /// Ranked-result cache entry lifetime, in seconds.
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_ttl_secs(),
        }
    }
}

fn default_ttl_secs() -> u64 {
    3600
}

#[derive(Debug, Deserialize, Clone)]
pub struct RetrievalConfig {
    /// Default number of recommendations per query.
    #[serde(default = "default_k")]
    pub k: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self { k: default_k() }
    }
}

fn default_k() -> usize {
    eventide_core::DEFAULT_K
}

#[derive(Debug, Deserialize, Clone)]
pub struct AggregationConfig {
    /// Fold case when comparing `(name, date, venue)` identity keys.
    #[serde(default = "default_case_insensitive")]
    pub case_insensitive_dedup: bool,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            case_insensitive_dedup: default_case_insensitive(),
        }
    }
}

fn default_case_insensitive() -> bool {
    true
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    if config.retrieval.k == 0 {
        anyhow::bail!("retrieval.k must be >= 1");
    }

    if config.embedding.is_enabled() {
        if config.embedding.dims.is_none() || config.embedding.dims == Some(0) {
            anyhow::bail!(
                "embedding.dims must be > 0 when provider is '{}'",
                config.embedding.provider
            );
        }
        if config.embedding.model.is_none() {
            anyhow::bail!(
                "embedding.model must be specified when provider is '{}'",
                config.embedding.provider
            );
        }
    }

    match config.embedding.provider.as_str() {
        "disabled" | "openai" | "ollama" => {}
        other => anyhow::bail!(
            "Unknown embedding provider: '{}'. Must be disabled, openai, or ollama.",
            other
        ),
    }

    Ok(config)
}

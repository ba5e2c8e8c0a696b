//! Filesystem event source: walk a directory of JSON event files.
//!
//! Each matched file holds a JSON array of [`EventRecord`]s. Unreadable
//! or malformed files are skipped with a warning — problems inside the
//! source never escape its [`fetch`](crate::sources::EventSource::fetch)
//! boundary as hard errors unless the configured root itself is missing.

use anyhow::{bail, Result};
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use globset::{Glob, GlobSet, GlobSetBuilder};
use tracing::{debug, warn};
use walkdir::WalkDir;

use eventide_core::EventRecord;

use crate::config::FilesystemSourceConfig;
use crate::sources::EventSource;

pub struct FilesystemSource {
    config: FilesystemSourceConfig,
}

impl FilesystemSource {
    pub fn new(config: FilesystemSourceConfig) -> Self {
        Self { config }
    }

    fn scan(&self) -> Result<Vec<EventRecord>> {
        let root = &self.config.root;
        if !root.exists() {
            bail!("Filesystem source root does not exist: {}", root.display());
        }

        let include_set = build_globset(&self.config.include_globs)?;
        let exclude_set = build_globset(&self.config.exclude_globs)?;

        let mut files: Vec<_> = Vec::new();
        for entry in WalkDir::new(root) {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            let rel = entry
                .path()
                .strip_prefix(root)
                .unwrap_or(entry.path())
                .to_string_lossy()
                .to_string();
            if exclude_set.is_match(&rel) || !include_set.is_match(&rel) {
                continue;
            }
            files.push(entry.path().to_path_buf());
        }
        // Sort for deterministic ordering
        files.sort();

        let mut events = Vec::new();
        for path in files {
            let content = match std::fs::read_to_string(&path) {
                Ok(content) => content,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "skipping unreadable event file");
                    continue;
                }
            };
            match serde_json::from_str::<Vec<EventRecord>>(&content) {
                Ok(mut parsed) => {
                    debug!(path = %path.display(), count = parsed.len(), "loaded event file");
                    events.append(&mut parsed);
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "skipping malformed event file");
                }
            }
        }
        Ok(events)
    }
}

#[async_trait]
impl EventSource for FilesystemSource {
    fn name(&self) -> &str {
        "filesystem"
    }

    fn description(&self) -> &str {
        "Event records from local JSON files"
    }

    fn healthy(&self) -> bool {
        self.config.root.exists()
    }

    async fn fetch(&self, location: &str, interests: &[String]) -> Result<Vec<EventRecord>> {
        let mut events = self.scan()?;

        events.retain(|event| event.postal_code == location);

        if self.config.upcoming_only {
            let today = Utc::now().date_naive();
            events.retain(|event| !is_past_date(&event.date, today));
        }

        if !interests.is_empty() {
            let interests: Vec<String> = interests.iter().map(|i| i.to_lowercase()).collect();
            events.retain(|event| {
                let text = event.retrieval_text().to_lowercase();
                interests.iter().any(|interest| text.contains(interest))
            });
        }

        Ok(events)
    }
}

/// True only when the date parses as ISO and is strictly before `today`.
/// Non-ISO values (including the `"N/A"` sentinel) are kept.
fn is_past_date(date: &str, today: NaiveDate) -> bool {
    let prefix = date.get(..10).unwrap_or(date);
    match NaiveDate::parse_from_str(prefix, "%Y-%m-%d") {
        Ok(parsed) => parsed < today,
        Err(_) => false,
    }
}

fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern)?);
    }
    Ok(builder.build()?)
}

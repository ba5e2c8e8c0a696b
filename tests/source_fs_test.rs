//! Filesystem event source: scanning, filtering, and malformed-file
//! tolerance against a temp directory fixture.

use std::fs;

use tempfile::TempDir;

use eventide::config::FilesystemSourceConfig;
use eventide::source_fs::FilesystemSource;
use eventide::sources::EventSource;

fn write_events(dir: &TempDir, file: &str, body: &str) {
    fs::write(dir.path().join(file), body).unwrap();
}

fn source(dir: &TempDir, upcoming_only: bool) -> FilesystemSource {
    FilesystemSource::new(FilesystemSourceConfig {
        root: dir.path().to_path_buf(),
        include_globs: vec!["**/*.json".to_string()],
        exclude_globs: vec![],
        upcoming_only,
    })
}

const PORTLAND_EVENTS: &str = r#"[
    {
        "name": "Sunset Stage",
        "description": "An outdoor concert in the park",
        "date": "2099-07-04",
        "location": "Portland, OR",
        "postal_code": "97201",
        "categories": ["music", "outdoor"],
        "venue": "Waterfront Park"
    },
    {
        "name": "Dev Summit",
        "description": "A technology conference",
        "date": "2099-10-01",
        "location": "Portland, OR",
        "postal_code": "97201",
        "categories": ["technology"]
    }
]"#;

const SEATTLE_EVENTS: &str = r#"[
    {
        "name": "Pike Market Tour",
        "description": "A guided food tour",
        "date": "2099-08-15",
        "location": "Seattle, WA",
        "postal_code": "98101",
        "categories": ["food"]
    }
]"#;

#[tokio::test]
async fn fetch_filters_by_postal_code() {
    let dir = TempDir::new().unwrap();
    write_events(&dir, "portland.json", PORTLAND_EVENTS);
    write_events(&dir, "seattle.json", SEATTLE_EVENTS);

    let events = source(&dir, false).fetch("97201", &[]).await.unwrap();
    assert_eq!(events.len(), 2);
    assert!(events.iter().all(|e| e.postal_code == "97201"));
}

#[tokio::test]
async fn fetch_narrows_by_interests() {
    let dir = TempDir::new().unwrap();
    write_events(&dir, "portland.json", PORTLAND_EVENTS);

    let events = source(&dir, false)
        .fetch("97201", &["music".to_string()])
        .await
        .unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].name, "Sunset Stage");
}

#[tokio::test]
async fn malformed_file_is_skipped_not_fatal() {
    let dir = TempDir::new().unwrap();
    write_events(&dir, "good.json", PORTLAND_EVENTS);
    write_events(&dir, "broken.json", "{ not valid json at all");

    let events = source(&dir, false).fetch("97201", &[]).await.unwrap();
    assert_eq!(events.len(), 2);
}

#[tokio::test]
async fn non_matching_files_are_ignored() {
    let dir = TempDir::new().unwrap();
    write_events(&dir, "events.json", PORTLAND_EVENTS);
    write_events(&dir, "notes.txt", "not an event file");

    let events = source(&dir, false).fetch("97201", &[]).await.unwrap();
    assert_eq!(events.len(), 2);
}

#[tokio::test]
async fn past_events_dropped_when_upcoming_only() {
    let dir = TempDir::new().unwrap();
    write_events(
        &dir,
        "mixed.json",
        r#"[
            {
                "name": "Long Gone",
                "description": "Happened years ago",
                "date": "2001-01-01",
                "location": "Portland, OR",
                "postal_code": "97201"
            },
            {
                "name": "Date Unknown",
                "description": "Source gave no date",
                "date": "N/A",
                "location": "Portland, OR",
                "postal_code": "97201"
            },
            {
                "name": "Far Future",
                "description": "Not for a while",
                "date": "2099-01-01",
                "location": "Portland, OR",
                "postal_code": "97201"
            }
        ]"#,
    );

    let events = source(&dir, true).fetch("97201", &[]).await.unwrap();
    let names: Vec<&str> = events.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["Date Unknown", "Far Future"]);
}

#[tokio::test]
async fn missing_root_is_a_source_error() {
    let dir = TempDir::new().unwrap();
    let config = FilesystemSourceConfig {
        root: dir.path().join("does-not-exist"),
        include_globs: vec!["**/*.json".to_string()],
        exclude_globs: vec![],
        upcoming_only: false,
    };
    let src = FilesystemSource::new(config);
    assert!(!src.healthy());
    assert!(src.fetch("97201", &[]).await.is_err());
}

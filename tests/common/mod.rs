//! Shared test fixtures and utilities for integration tests.
//!
//! # Test Isolation Strategy
//!
//! Each test builds its own document source:
//! - [`TempWorkspace`] lays out a real local checkout (`docs/` plus `.windsurf/`)
//!   in a temporary directory, for tests that go through [`DocumentFetcher`].
//! - [`MapFetcher`] serves documents from memory, with optional per-location
//!   delays so completion order can be scrambled on purpose.
//!
//! # Available Fixtures
//!
//! - `local_catalog`: a temp checkout holding every default manifest document
//! - `fixed_clock`: a clock frozen at 2025-08-15T12:00:00Z

use customization_catalog::dates::{FixedClock, parse_date};
use customization_catalog::error::FetchError;
use customization_catalog::fetch::Fetch;
use customization_catalog::manifest::Manifest;
use rstest::fixture;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tempfile::TempDir;

/// A temporary workspace directory for test isolation.
///
/// Provides basic filesystem operations within a temp directory that is
/// automatically cleaned up when dropped.
///
/// # Example
///
/// ```ignore
/// let workspace = TempWorkspace::new();
/// workspace.create_file("docs/rules/style/x.md", "---\n---\n");
/// assert!(workspace.path().join("docs/rules/style/x.md").exists());
/// ```
#[allow(dead_code)] // Methods used across different integration test crates
pub struct TempWorkspace {
    _temp: TempDir,
    root: PathBuf,
}

#[allow(dead_code)] // Methods used across different integration test crates
impl TempWorkspace {
    /// Creates a new empty temporary workspace.
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let root = temp.path().to_path_buf();
        Self { _temp: temp, root }
    }

    /// Returns the root path of this workspace.
    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Root path as a string, as the local deployment context expects it.
    pub fn root_str(&self) -> String {
        self.root.display().to_string()
    }

    /// Creates a file with the given content within this workspace.
    ///
    /// Parent directories are created automatically if they don't exist.
    ///
    /// # Panics
    /// Panics if file creation fails.
    pub fn create_file(&self, path: &str, content: &str) {
        let full_path = self.root.join(path);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).unwrap_or_else(|e| {
                panic!("Failed to create parent directory for '{}': {}", path, e)
            });
        }
        std::fs::write(&full_path, content)
            .unwrap_or_else(|e| panic!("Failed to write file '{}': {}", path, e));
    }

    /// Removes a file from this workspace.
    pub fn remove_file(&self, path: &str) {
        std::fs::remove_file(self.root.join(path))
            .unwrap_or_else(|e| panic!("Failed to remove file '{}': {}", path, e));
    }

    /// Writes the same document as display copy under `docs/` and canonical
    /// source under `.windsurf/`.
    pub fn create_document(&self, relative_stem: &str, content: &str) {
        self.create_file(&format!("docs/{}.md", relative_stem), content);
        self.create_file(&format!(".windsurf/{}.md", relative_stem), content);
    }
}

impl Default for TempWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

/// Front-matter markdown for a manifest entry.
#[allow(dead_code)]
pub fn markdown_document(labels: &str, description: &str) -> String {
    format!(
        "---\nlabels: {}\nauthor: Cascade Team\nmodified: 2025-08-14\n---\n\n# Title\n\n## Description\n\n{}\n\n## Rules\n\n- Item\n",
        labels, description
    )
}

/// Labels and description per default manifest document, in manifest order.
#[allow(dead_code)]
pub const DEFAULT_DOCUMENTS: &[(&str, &str, &str)] = &[
    ("rules/framework/react", "react, javascript", "Component patterns for React."),
    ("rules/language/java", "java", "Idiomatic Java."),
    ("rules/language/typescript", "typescript, best-practices", "Enforces type safety."),
    ("rules/security/secure-coding", "security", "Validate every input."),
    ("rules/style/code-review-checklist", "review", "What to check in review."),
    ("rules/style/coding-best-practices", "style", "Readable code first."),
    ("workflows/maintenance/debugging-issues", "debugging", "Find the root cause."),
    ("workflows/setup/dev-environment-setup", "workflow", "Prepare a machine."),
    ("workflows/setup/node-project-setup", "nodejs, workflow", "Bootstrap a Node.js project."),
];

/// A temp checkout holding every document of the default manifest.
#[fixture]
pub fn local_catalog() -> TempWorkspace {
    let workspace = TempWorkspace::new();
    for (stem, labels, description) in DEFAULT_DOCUMENTS {
        workspace.create_document(stem, &markdown_document(labels, description));
    }
    workspace
}

#[fixture]
pub fn fixed_clock() -> FixedClock {
    FixedClock(parse_date("2025-08-15T12:00:00Z").expect("valid date"))
}

/// In-memory [`Fetch`] implementation.
#[derive(Debug, Default)]
pub struct MapFetcher {
    documents: HashMap<String, String>,
    delays: HashMap<String, Duration>,
    calls: AtomicUsize,
    /// `start <location>` and `finish <location>` in the order they happened.
    events: Mutex<Vec<String>>,
}

#[allow(dead_code)]
impl MapFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(mut self, location: impl Into<String>, content: impl Into<String>) -> Self {
        self.documents.insert(location.into(), content.into());
        self
    }

    pub fn with_delay(mut self, location: impl Into<String>, delay: Duration) -> Self {
        self.delays.insert(location.into(), delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn events(&self) -> Vec<String> {
        self.events.lock().expect("events lock").clone()
    }

    fn record(&self, event: &str, location: &str) {
        self.events
            .lock()
            .expect("events lock")
            .push(format!("{} {}", event, location));
    }
}

impl Fetch for MapFetcher {
    async fn fetch_text(&self, location: &str) -> Result<String, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.record("start", location);
        if let Some(delay) = self.delays.get(location) {
            tokio::time::sleep(*delay).await;
        }
        self.record("finish", location);
        self.documents
            .get(location)
            .cloned()
            .ok_or_else(|| FetchError::Status {
                location: location.to_string(),
                status: 404,
            })
    }
}

/// A fetcher serving every default manifest document in local mode under `root`.
#[allow(dead_code)]
pub fn default_map_fetcher(root: &str) -> MapFetcher {
    DEFAULT_DOCUMENTS
        .iter()
        .fold(MapFetcher::new(), |fetcher, (stem, labels, description)| {
            fetcher.with_document(
                format!("{}/docs/{}.md", root, stem),
                markdown_document(labels, description),
            )
        })
}

#[allow(dead_code)]
pub fn default_manifest_len() -> usize {
    Manifest::default().len()
}

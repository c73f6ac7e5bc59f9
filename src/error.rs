//! Error handling types and utilities.

use thiserror::Error;

/// A specialized Result type for binary and configuration plumbing.
///
/// This is an alias for `anyhow::Result` with context added via `.context()` and
/// `.with_context()` at the process boundary.
pub type Result<T> = anyhow::Result<T>;

/// Error returned by a [`Fetch`](crate::fetch::Fetch) implementation.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The remote host answered with a non-success status.
    #[error("{location} answered with status {status}")]
    Status { location: String, status: u16 },
    /// The request never produced a response (DNS, TLS, timeout, ...).
    #[error("request to {location} failed: {message}")]
    Transport { location: String, message: String },
    /// Reading a local file failed.
    #[error("failed to read {location}: {source}")]
    Io {
        location: String,
        #[source]
        source: std::io::Error,
    },
}

/// Why a single catalog document was left out of the catalog.
///
/// These never escape the loader; they are logged and the document is skipped.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// Fetching the display path failed.
    #[error("document '{id}' is unreachable: {source}")]
    Unreachable {
        id: String,
        #[source]
        source: FetchError,
    },
    /// The document lacks the front-matter block it must start with.
    #[error("document '{id}' at {location} has no front-matter block")]
    Malformed { id: String, location: String },
}

/// Catalog-wide failure. Only these propagate out of
/// [`CatalogLoader::load_all`](crate::loader::CatalogLoader::load_all).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// The manifest has no entries at all.
    #[error("the catalog manifest is empty")]
    EmptyManifest,
    /// Two manifest entries resolve to the same record id.
    #[error("the catalog manifest lists '{id}' more than once")]
    DuplicateEntry { id: String },
    /// Every document in the manifest was skipped.
    #[error("none of the {attempted} catalog documents could be loaded")]
    NothingLoaded { attempted: usize },
}

/// Error returned when the configuration file cannot be used.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid site url '{url}': {reason}")]
    SiteUrl { url: String, reason: String },
}

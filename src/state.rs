//! Shared state behind the MCP tools.
//!
//! The catalog itself is immutable once loaded. The only mutable piece is a
//! small LRU cache of canonical sources fetched for `get_source`.

use crate::error::FetchError;
use crate::fetch::Fetch;
use crate::loader::Catalog;
use crate::types::Customization;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Sources kept in memory unless configured otherwise.
pub const DEFAULT_SOURCE_CACHE_SIZE: usize = 32;

pub struct CatalogState<F> {
    catalog: Arc<Catalog>,
    /// Deployment mode name, for reporting.
    mode: &'static str,
    fetcher: F,
    /// Canonical source text keyed by source path.
    sources: Mutex<LruCache<String, Arc<str>>>,
}

impl<F> std::fmt::Debug for CatalogState<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogState")
            .field("records", &self.catalog.len())
            .field("mode", &self.mode)
            .field(
                "cached_sources",
                &self.sources.try_lock().map(|cache| cache.len()).ok(),
            )
            .finish()
    }
}

impl<F: Fetch> CatalogState<F> {
    pub fn new(catalog: Catalog, mode: &'static str, fetcher: F, cache_size: usize) -> Self {
        let capacity = NonZeroUsize::new(cache_size).unwrap_or(NonZeroUsize::MIN);
        Self {
            catalog: Arc::new(catalog),
            mode,
            fetcher,
            sources: Mutex::new(LruCache::new(capacity)),
        }
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub fn mode(&self) -> &'static str {
        self.mode
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Canonical markdown for `record`, served from cache once fetched.
    ///
    /// The cache lock is not held during the fetch, so a slow source never
    /// stalls other callers. Two concurrent misses for the same source may
    /// both fetch; the first result to land is kept.
    pub async fn source_text(&self, record: &Customization) -> Result<Arc<str>, FetchError> {
        if let Some(text) = self.sources.lock().await.get(&record.source_path) {
            tracing::debug!(id = %record.id, "Source cache hit");
            return Ok(Arc::clone(text));
        }

        tracing::debug!(id = %record.id, location = %record.source_path, "Fetching source");
        let fetched: Arc<str> = self.fetcher.fetch_text(&record.source_path).await?.into();

        let mut cache = self.sources.lock().await;
        if let Some(text) = cache.get(&record.source_path) {
            return Ok(Arc::clone(text));
        }
        cache.put(record.source_path.clone(), Arc::clone(&fetched));
        Ok(fetched)
    }

    /// Number of sources currently cached.
    pub async fn cached_sources(&self) -> usize {
        self.sources.lock().await.len()
    }
}

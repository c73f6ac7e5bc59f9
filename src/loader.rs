//! Catalog loading.
//!
//! Every manifest entry is fetched concurrently and results are re-sorted into
//! manifest order. A document that cannot be fetched or parsed is logged and
//! left out; only catalog-wide problems fail the load.

use crate::dates::{Clock, SystemClock, format_relative};
use crate::deployment::DeploymentContext;
use crate::description::extract_description;
use crate::error::{CatalogError, DocumentError};
use crate::fetch::Fetch;
use crate::labels::infer_labels;
use crate::manifest::{Manifest, ManifestEntry};
use crate::metadata::{ContentEncoding, extract_metadata};
use crate::types::{Activation, Customization, CustomizationKind, UNKNOWN_AUTHOR, format_category};
use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Documents fetched at once unless configured otherwise.
pub const DEFAULT_CONCURRENCY: usize = 8;

/// The loaded, immutable collection plus its label indexes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    records: Vec<Customization>,
    all_labels: BTreeSet<String>,
    labels_by_category: BTreeMap<String, BTreeSet<String>>,
}

/// Totals reported by `catalog_stats`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogStats {
    pub total: usize,
    pub rules: usize,
    pub workflows: usize,
    pub labels: usize,
    pub categories: usize,
}

impl Catalog {
    /// Index `records`, keeping their order.
    pub fn new(records: Vec<Customization>) -> Self {
        let mut all_labels = BTreeSet::new();
        let mut labels_by_category: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();

        for record in &records {
            let category = labels_by_category.entry(record.category.clone()).or_default();
            for label in &record.labels {
                all_labels.insert(label.clone());
                category.insert(label.clone());
            }
        }

        Self {
            records,
            all_labels,
            labels_by_category,
        }
    }

    pub fn records(&self) -> &[Customization] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Customization> {
        self.records.iter().find(|record| record.id == id)
    }

    /// Every label in use, sorted.
    pub fn all_labels(&self) -> &BTreeSet<String> {
        &self.all_labels
    }

    /// Labels in use per display category, sorted.
    pub fn labels_by_category(&self) -> &BTreeMap<String, BTreeSet<String>> {
        &self.labels_by_category
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.labels_by_category.keys().map(String::as_str)
    }

    pub fn stats(&self) -> CatalogStats {
        let rules = self
            .records
            .iter()
            .filter(|record| record.kind == CustomizationKind::Rule)
            .count();
        CatalogStats {
            total: self.records.len(),
            rules,
            workflows: self.records.len() - rules,
            labels: self.all_labels.len(),
            categories: self.labels_by_category.len(),
        }
    }
}

/// Loads the manifest's documents into a [`Catalog`].
#[derive(Debug)]
pub struct CatalogLoader<F> {
    manifest: Manifest,
    deployment: Box<dyn DeploymentContext>,
    fetcher: F,
    clock: Box<dyn Clock>,
    concurrency: usize,
}

impl<F: Fetch> CatalogLoader<F> {
    pub fn new(manifest: Manifest, deployment: Box<dyn DeploymentContext>, fetcher: F) -> Self {
        Self {
            manifest,
            deployment,
            fetcher,
            clock: Box::new(SystemClock),
            concurrency: DEFAULT_CONCURRENCY,
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Bound the number of in-flight fetches. Zero is treated as one.
    #[must_use]
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn deployment(&self) -> &dyn DeploymentContext {
        self.deployment.as_ref()
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Fetch and normalize every manifest entry.
    ///
    /// Records come back in manifest order regardless of which fetch finishes
    /// first. Fails only when the manifest itself is unusable or when not a
    /// single document could be loaded.
    pub async fn load_all(&self) -> Result<Catalog, CatalogError> {
        self.manifest.validate()?;

        let now = self.clock.now();
        let attempted = self.manifest.len();
        tracing::info!(
            documents = attempted,
            mode = self.deployment.name(),
            concurrency = self.concurrency,
            "Loading catalog"
        );

        // A slow fetch occupies one slot only; manifest order is restored below.
        let mut results: Vec<(usize, Result<Customization, DocumentError>)> =
            stream::iter(self.manifest.entries().iter().enumerate())
                .map(|(index, entry)| async move { (index, self.load_one(entry, now).await) })
                .buffer_unordered(self.concurrency)
                .collect()
                .await;
        results.sort_by_key(|(index, _)| *index);

        let mut records = Vec::with_capacity(attempted);
        for (_, result) in results {
            match result {
                Ok(record) => records.push(record),
                Err(e) => tracing::warn!(error = %e, "Skipping catalog document"),
            }
        }

        if records.is_empty() {
            return Err(CatalogError::NothingLoaded { attempted });
        }

        tracing::info!(
            loaded = records.len(),
            skipped = attempted - records.len(),
            "Catalog loaded"
        );
        Ok(Catalog::new(records))
    }

    async fn load_one(
        &self,
        entry: &ManifestEntry,
        now: DateTime<Utc>,
    ) -> Result<Customization, DocumentError> {
        let display_path = self.deployment.display_path(entry);
        let source_path = self.deployment.source_path(entry);

        let content = self
            .fetcher
            .fetch_text(&display_path)
            .await
            .map_err(|source| DocumentError::Unreachable {
                id: entry.id(),
                source,
            })?;

        build_record(
            entry,
            &content,
            self.deployment.encoding(),
            display_path,
            source_path,
            now,
        )
    }
}

/// Turn one fetched document into a record.
pub fn build_record(
    entry: &ManifestEntry,
    content: &str,
    encoding: ContentEncoding,
    path: String,
    source_path: String,
    now: DateTime<Utc>,
) -> Result<Customization, DocumentError> {
    let metadata = extract_metadata(content, encoding).map_err(|_| DocumentError::Malformed {
        id: entry.id(),
        location: path.clone(),
    })?;

    let labels = match metadata.explicit_labels() {
        Some(labels) => labels.to_vec(),
        None => infer_labels(content),
    };

    let activation = match metadata.activation.as_deref() {
        Some(raw) => Activation::parse(raw).unwrap_or_else(|| {
            tracing::debug!(id = %entry.id(), activation = raw, "Unknown activation, using manual");
            Activation::default()
        }),
        None => Activation::default(),
    };

    let modified = match metadata.modified.as_deref() {
        Some(raw) => format_relative(raw, now),
        None => format_relative(&now.to_rfc3339(), now),
    };

    Ok(Customization {
        id: entry.id(),
        title: entry.title.clone(),
        description: extract_description(content, encoding),
        kind: entry.kind,
        category: format_category(metadata.category.as_deref().unwrap_or(&entry.subcategory)),
        labels,
        author: metadata
            .author
            .clone()
            .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string()),
        activation,
        filename: format!("{}.md", entry.stem()),
        path,
        source_path,
        modified,
    })
}

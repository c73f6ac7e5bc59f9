//! The fixed list of documents the catalog knows about.
//!
//! There is no directory discovery: adding a document means adding a row here.

use crate::error::CatalogError;
use crate::types::CustomizationKind;
use std::collections::HashSet;

/// One known document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    pub kind: CustomizationKind,
    /// Raw subdirectory key, e.g. `language`.
    pub subcategory: String,
    /// File name including the `.md` suffix.
    pub filename: String,
    /// Display title. Authoritative over anything in the document body.
    pub title: String,
}

impl ManifestEntry {
    pub fn new(
        kind: CustomizationKind,
        subcategory: impl Into<String>,
        filename: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            subcategory: subcategory.into(),
            filename: filename.into(),
            title: title.into(),
        }
    }

    /// File name without a trailing `.md` (case-insensitive).
    pub fn stem(&self) -> &str {
        let split = self.filename.len().saturating_sub(3);
        match (self.filename.get(..split), self.filename.get(split..)) {
            (Some(stem), Some(suffix)) if suffix.eq_ignore_ascii_case(".md") => stem,
            _ => &self.filename,
        }
    }

    /// Stable record id: `{type}-{subcategory}-{stem}`.
    pub fn id(&self) -> String {
        format!("{}-{}-{}", self.kind, self.subcategory, self.stem())
    }

    /// Path of the document relative to a docs or sources root, without suffix.
    pub fn relative_stem(&self) -> String {
        format!("{}/{}/{}", self.kind, self.subcategory, self.stem())
    }
}

/// Ordered collection of manifest entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    entries: Vec<ManifestEntry>,
}

impl Manifest {
    pub fn new(entries: Vec<ManifestEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[ManifestEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check the catalog-wide preconditions the loader relies on: at least one
    /// entry, and no two entries mapping to the same record id.
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.entries.is_empty() {
            return Err(CatalogError::EmptyManifest);
        }

        let mut seen = HashSet::with_capacity(self.entries.len());
        for entry in &self.entries {
            let id = entry.id();
            if !seen.insert(id.clone()) {
                return Err(CatalogError::DuplicateEntry { id });
            }
        }
        Ok(())
    }
}

impl Default for Manifest {
    /// The documents shipped with the catalog.
    fn default() -> Self {
        use CustomizationKind::{Rule, Workflow};

        let rows: &[(CustomizationKind, &str, &str, &str)] = &[
            (Rule, "framework", "react.md", "React Best Practices"),
            (Rule, "language", "java.md", "Java Development Guidelines"),
            (Rule, "language", "typescript.md", "TypeScript Best Practices"),
            (Rule, "security", "secure-coding.md", "Secure Coding Practices"),
            (Rule, "style", "code-review-checklist.md", "Code Review Checklist"),
            (Rule, "style", "coding-best-practices.md", "Coding Best Practices"),
            (Workflow, "maintenance", "debugging-issues.md", "Debugging Issues Workflow"),
            (Workflow, "setup", "dev-environment-setup.md", "Development Environment Setup"),
            (Workflow, "setup", "node-project-setup.md", "Node.js Project Setup"),
        ];

        Self::new(
            rows.iter()
                .map(|(kind, sub, file, title)| ManifestEntry::new(*kind, *sub, *file, *title))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::{check, let_assert};

    #[test]
    fn test_default_manifest_is_valid() {
        let manifest = Manifest::default();
        check!(manifest.len() == 9);
        check!(manifest.validate().is_ok());
    }

    #[test]
    fn test_entry_id_and_stem() {
        let entry = ManifestEntry::new(
            CustomizationKind::Rule,
            "language",
            "typescript.md",
            "TypeScript Best Practices",
        );
        check!(entry.stem() == "typescript");
        check!(entry.id() == "rules-language-typescript");
        check!(entry.relative_stem() == "rules/language/typescript");
    }

    #[test]
    fn test_stem_without_suffix() {
        let entry = ManifestEntry::new(CustomizationKind::Workflow, "setup", "README", "Readme");
        check!(entry.stem() == "README");
    }

    #[test]
    fn test_duplicate_entries_rejected() {
        let manifest = Manifest::new(vec![
            ManifestEntry::new(CustomizationKind::Rule, "style", "a.md", "A"),
            ManifestEntry::new(CustomizationKind::Rule, "style", "a.MD", "A again"),
        ]);
        let_assert!(Err(CatalogError::DuplicateEntry { id }) = manifest.validate());
        check!(id == "rules-style-a");
    }

    #[test]
    fn test_empty_manifest_rejected() {
        check!(Manifest::new(vec![]).validate() == Err(CatalogError::EmptyManifest));
    }
}

//! Metadata extraction for the two document encodings.
//!
//! Front-matter markdown must open with a `---` delimited block of `key: value`
//! lines; a document without one is unusable. Rendered HTML may embed the same
//! lines in a `<!-- METADATA ... -->` comment, or only a labels `<meta>` tag, or
//! nothing at all.

use crate::types::normalize_labels;
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;
use thiserror::Error;

static METADATA_COMMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<!--\s*METADATA\s*(.*?)\s*-->").expect("metadata comment regex is valid")
});

static LABELS_META_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta\s+name="labels"\s+content="([^"]*)"\s*/?>"#)
        .expect("labels meta tag regex is valid")
});

/// How a fetched document is encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentEncoding {
    /// Raw markdown opening with a front-matter block.
    Frontmatter,
    /// Statically rendered HTML.
    Rendered,
}

/// The document does not open with a front-matter block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("document does not start with a front-matter block")]
pub struct MissingFrontmatter;

/// Metadata recovered from a document. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    /// `None` when the document has no `labels` key at all; `Some(vec![])`
    /// when the key is present but lists nothing.
    pub labels: Option<Vec<String>>,
    pub author: Option<String>,
    pub category: Option<String>,
    /// Raw authored activation value (`activation`, or `trigger` as a fallback).
    pub activation: Option<String>,
    /// Raw ISO date or date-time.
    pub modified: Option<String>,
    /// Every non-label key as a trimmed, quote-stripped string.
    pub fields: BTreeMap<String, String>,
}

impl Metadata {
    /// Explicit labels, if any were authored.
    pub fn explicit_labels(&self) -> Option<&[String]> {
        self.labels.as_deref().filter(|labels| !labels.is_empty())
    }

    fn insert(&mut self, key: &str, value: String) {
        match key {
            "author" => self.author = Some(value.clone()),
            "category" => self.category = Some(value.clone()),
            "activation" => self.activation = Some(value.clone()),
            "trigger" if self.activation.is_none() => self.activation = Some(value.clone()),
            "modified" => self.modified = Some(value.clone()),
            _ => {}
        }
        self.fields.insert(key.to_string(), value);
    }
}

/// Extract metadata from `content` according to its encoding.
///
/// Only the front-matter encoding can fail, and only when the opening block is
/// missing or never closed.
pub fn extract_metadata(
    content: &str,
    encoding: ContentEncoding,
) -> Result<Metadata, MissingFrontmatter> {
    match encoding {
        ContentEncoding::Frontmatter => {
            let (block, _body) = split_frontmatter(content).ok_or(MissingFrontmatter)?;
            Ok(parse_fields(block))
        }
        ContentEncoding::Rendered => Ok(extract_rendered(content)),
    }
}

/// Split a document into its front-matter block and body.
///
/// The first line (ignoring a byte-order mark) must be `---`; the block runs up
/// to the next line that is exactly `---`. Returns `None` otherwise.
pub fn split_frontmatter(content: &str) -> Option<(&str, &str)> {
    let text = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut lines = text.split_inclusive('\n');

    let first = lines.next()?;
    if first.trim_end() != "---" {
        return None;
    }

    let block_start = first.len();
    let mut offset = block_start;
    for line in lines {
        if line.trim_end() == "---" {
            return Some((&text[block_start..offset], &text[offset + line.len()..]));
        }
        offset += line.len();
    }
    None
}

fn extract_rendered(html: &str) -> Metadata {
    if let Some(captures) = METADATA_COMMENT.captures(html) {
        let metadata = parse_fields(&captures[1]);
        tracing::debug!(?metadata, "Extracted metadata from HTML comment");
        return metadata;
    }

    let mut metadata = Metadata::default();
    if let Some(captures) = LABELS_META_TAG.captures(html) {
        metadata.labels = Some(parse_label_list(&captures[1]));
    }
    metadata
}

/// Parse `key: value` lines. Lines without a colon, and keys or values that
/// are empty after trimming, are ignored.
fn parse_fields(block: &str) -> Metadata {
    let mut metadata = Metadata::default();

    for line in block.lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let key = key.trim();
        let value = value.trim();
        if key.is_empty() || value.is_empty() {
            continue;
        }

        if key == "labels" {
            metadata.labels = Some(parse_label_list(value));
        } else {
            metadata.insert(key, strip_quotes(value));
        }
    }

    metadata
}

/// Parse either `[a, "b", 'c']` or `a, b, c`.
fn parse_label_list(value: &str) -> Vec<String> {
    let value = value.trim();
    let inner = value
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .unwrap_or(value);

    normalize_labels(inner.split(',').map(strip_quotes))
}

fn strip_quotes(value: &str) -> String {
    value.trim().replace(['"', '\''], "")
}

//! Description snippet extraction.
//!
//! Markdown documents carry a `## Description` section; rendered documents the
//! same section as `<h2>Description</h2>` followed by a paragraph. Both fall
//! back to the first prose line when the section is missing.

use crate::metadata::{ContentEncoding, split_frontmatter};
use crate::types::NO_DESCRIPTION;
use regex::Regex;
use std::sync::LazyLock;

/// Longest description kept, counted in characters and including the marker.
pub const MAX_DESCRIPTION_CHARS: usize = 200;

const ELLIPSIS: &str = "...";

static MD_DESCRIPTION_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?mi)^#{2,3}[ \t]*Description[ \t]*\r?$").expect("valid regex")
});
static MD_SECTION_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^#{2,3} ").expect("valid regex"));
static MD_FENCED_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```.*?```").expect("valid regex"));
static MD_IMAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[[^\]]*\]\([^)]+\)").expect("valid regex"));
static MD_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\([^)]+\)").expect("valid regex"));
static HTML_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").expect("valid regex"));

static HTML_DESCRIPTION_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<h2[^>]*>\s*Description\s*</h2>").expect("valid regex")
});
static HTML_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<h[1-6][^>]*>").expect("valid regex"));
static HTML_PARAGRAPH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<p[^>]*>(.*?)</p>").expect("valid regex"));
static HTML_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+>").expect("valid regex"));
static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Extract a plain-text description of at most [`MAX_DESCRIPTION_CHARS`].
///
/// Never returns an empty string.
pub fn extract_description(content: &str, encoding: ContentEncoding) -> String {
    let raw = match encoding {
        ContentEncoding::Frontmatter => markdown_description(content),
        ContentEncoding::Rendered => rendered_description(content),
    };
    truncate(&raw)
}

fn markdown_description(content: &str) -> String {
    if let Some(heading) = MD_DESCRIPTION_HEADING.find(content) {
        let rest = &content[heading.end()..];
        let section = MD_SECTION_END
            .find(rest)
            .map_or(rest, |end| &rest[..end.start()]);

        let section = MD_FENCED_CODE.replace_all(section, "");
        let section = MD_IMAGE.replace_all(&section, "");
        let section = MD_LINK.replace_all(&section, "$1");
        return section.into_owned();
    }

    let body = split_frontmatter(content).map_or(content, |(_, body)| body);
    let body = HTML_COMMENT.replace_all(body, "");
    let body = MD_FENCED_CODE.replace_all(&body, "");
    body.lines()
        .map(str::trim)
        .find(|line| !line.is_empty() && !line.starts_with('#') && !line.starts_with("```"))
        .unwrap_or_default()
        .to_string()
}

fn rendered_description(html: &str) -> String {
    if let Some(heading) = HTML_DESCRIPTION_HEADING.find(html) {
        let rest = &html[heading.end()..];
        let section = HTML_HEADING
            .find(rest)
            .map_or(rest, |next| &rest[..next.start()]);

        return match HTML_PARAGRAPH.captures(section) {
            Some(paragraph) => strip_html(&paragraph[1]),
            None => strip_html(section),
        };
    }

    if let Some(paragraph) = HTML_PARAGRAPH.captures(html) {
        return strip_html(&paragraph[1]);
    }

    strip_html(html)
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or_default()
        .to_string()
}

/// Remove comments and tags, then decode the handful of entities a static
/// site generator emits for prose.
pub fn strip_html(html: &str) -> String {
    let without_comments = HTML_COMMENT.replace_all(html, "");
    let text = HTML_TAG.replace_all(&without_comments, "");
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&amp;", "&")
        .trim()
        .to_string()
}

/// Collapse whitespace and cap the length, falling back to the sentinel.
pub fn truncate(text: &str) -> String {
    let normalized = WHITESPACE.replace_all(text, " ");
    let normalized = normalized.trim();
    if normalized.is_empty() {
        return NO_DESCRIPTION.to_string();
    }

    if normalized.chars().count() <= MAX_DESCRIPTION_CHARS {
        return normalized.to_string();
    }

    let keep = MAX_DESCRIPTION_CHARS - ELLIPSIS.len();
    let mut out: String = normalized.chars().take(keep).collect();
    out.push_str(ELLIPSIS);
    out
}

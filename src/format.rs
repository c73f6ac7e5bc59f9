//! Plain-text rendering of catalog records for tool responses.

use crate::filter::ActiveFilter;
use crate::types::Customization;
use rmcp::schemars;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

/// DetailLevel level for record display.
///
/// DO NOT add doc comments to individual variants - this causes schemars to generate
/// `oneOf` schemas instead of simple `enum` arrays, breaking MCP client enum handling.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum DetailLevel {
    Low,
    #[default]
    Medium,
    High,
}

/// One record as a bullet, growing with the detail level.
///
/// - Low: title and id
/// - Medium: + type, category, labels, description
/// - High: + author, activation, modified, paths
pub fn render_record(out: &mut String, record: &Customization, detail: DetailLevel) {
    let _ = writeln!(out, "• {} (`{}`)", record.title, record.id);
    if detail == DetailLevel::Low {
        return;
    }

    let _ = writeln!(out, "    {} · {}", record.kind, record.category);
    if !record.labels.is_empty() {
        let _ = writeln!(out, "    labels: {}", record.labels.join(", "));
    }
    let _ = writeln!(out, "    {}", record.description);

    if detail == DetailLevel::High {
        let _ = writeln!(
            out,
            "    author: {} · activation: {} · modified: {}",
            record.author, record.activation, record.modified
        );
        let _ = writeln!(out, "    path: {}", record.path);
        let _ = writeln!(out, "    source: {}", record.source_path);
    }
}

/// Full view of a single record.
pub fn render_detail(record: &Customization) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# {}", record.title);
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", record.description);
    let _ = writeln!(out);
    let _ = writeln!(out, "id:         {}", record.id);
    let _ = writeln!(out, "type:       {}", record.kind);
    let _ = writeln!(out, "category:   {}", record.category);
    let _ = writeln!(
        out,
        "labels:     {}",
        if record.labels.is_empty() {
            "(none)".to_string()
        } else {
            record.labels.join(", ")
        }
    );
    let _ = writeln!(out, "author:     {}", record.author);
    let _ = writeln!(out, "activation: {}", record.activation);
    let _ = writeln!(out, "modified:   {}", record.modified);
    let _ = writeln!(out, "filename:   {}", record.filename);
    let _ = writeln!(out, "path:       {}", record.path);
    let _ = writeln!(out, "source:     {}", record.source_path);
    out
}

/// `Active filters: type: rules, label: react` or nothing when none are set.
pub fn render_active_filters(out: &mut String, chips: &[ActiveFilter]) {
    if chips.is_empty() {
        return;
    }
    let joined = chips
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    let _ = writeln!(out, "Active filters: {}", joined);
}

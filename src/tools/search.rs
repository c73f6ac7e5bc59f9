//! Filtered listing of catalog records.

use crate::fetch::Fetch;
use crate::filter::{FilterAction, FilterState, TypeFilter, apply, offered_labels};
use crate::format::{DetailLevel, render_active_filters, render_record};
use crate::state::CatalogState;
use crate::types::CustomizationKind;
use rmcp::schemars;
use serde::Deserialize;
use std::fmt::Write as _;

/// Type restriction accepted by the search tool.
///
/// DO NOT add doc comments to individual variants - this causes schemars to generate
/// `oneOf` schemas instead of simple `enum` arrays, breaking MCP client enum handling.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum TypeArg {
    #[default]
    All,
    Rules,
    Workflows,
}

impl From<TypeArg> for TypeFilter {
    fn from(arg: TypeArg) -> Self {
        match arg {
            TypeArg::All => Self::All,
            TypeArg::Rules => Self::Only(CustomizationKind::Rule),
            TypeArg::Workflows => Self::Only(CustomizationKind::Workflow),
        }
    }
}

#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct SearchCatalogRequest {
    /// Case-insensitive text matched against title, description, category and labels
    #[serde(default)]
    pub query: Option<String>,
    /// Restrict to rules or workflows (default: all)
    #[serde(default, rename = "type")]
    pub kind: TypeArg,
    /// Labels to filter by; a record matches when it has any of them
    #[serde(default)]
    pub labels: Vec<String>,
    /// Category whose labels are offered for refinement. Does not filter results.
    #[serde(default)]
    pub category: Option<String>,
    /// Detail level: low (titles), medium (+ labels, description), high (+ paths)
    #[serde(default)]
    pub detail_level: DetailLevel,
    /// Maximum number of results to return (default: 20)
    #[serde(default)]
    pub limit: Option<usize>,
}

const DEFAULT_LIMIT: usize = 20;

impl SearchCatalogRequest {
    /// Fold the request into a filter state through the reducer.
    pub fn filter_state(&self) -> FilterState {
        let mut state = FilterState::default().reduce(FilterAction::SetType(self.kind.into()));
        for label in &self.labels {
            if !state.labels.contains(&label.trim().to_lowercase()) {
                state = state.reduce(FilterAction::ToggleLabel(label.clone()));
            }
        }
        // Stray whitespace from tool arguments is not a search.
        if let Some(query) = self.query.as_deref().map(str::trim)
            && !query.is_empty()
        {
            state = state.reduce(FilterAction::SetSearch(query.to_string()));
        }
        state.reduce(FilterAction::SetCategory(self.category.clone()))
    }
}

/// Run a filtered search over the loaded catalog.
pub async fn handle_search<F: Fetch>(
    state: &CatalogState<F>,
    request: SearchCatalogRequest,
) -> Result<String, String> {
    let catalog = state.catalog();
    let filter = request.filter_state();
    let matches = apply(catalog.records(), &filter);
    let limit = request.limit.unwrap_or(DEFAULT_LIMIT).max(1);

    tracing::debug!(?filter, matches = matches.len(), "Search");

    let mut output = String::new();
    render_active_filters(&mut output, &filter.active_filters());

    if matches.is_empty() {
        output.push_str("No results found.\n\n");
        output.push_str("Search tips:\n");
        output.push_str("• Try a shorter or more general term\n");
        output.push_str("• Labels combine with OR; type and text narrow further\n");
        output.push_str("• Use list_labels to see which labels exist\n");
        return Ok(output);
    }

    let _ = writeln!(
        output,
        "Showing {} of {} matching customizations ({} total):\n",
        matches.len().min(limit),
        matches.len(),
        catalog.len()
    );
    for record in matches.iter().take(limit) {
        render_record(&mut output, record, request.detail_level);
    }

    if filter.category.is_some() {
        let offered = offered_labels(catalog, &filter);
        let _ = writeln!(output, "\nLabels to refine by: {}", offered.join(", "));
    }

    Ok(output)
}

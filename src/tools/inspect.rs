//! Detail view of one record, with fuzzy suggestions for unknown ids.

use crate::fetch::Fetch;
use crate::format::render_detail;
use crate::loader::Catalog;
use crate::state::CatalogState;
use rapidfuzz::distance::jaro_winkler;
use rmcp::schemars;
use serde::Deserialize;
use std::fmt::Write as _;

/// Suggestions must score above this Jaro-Winkler similarity.
const SUGGESTION_THRESHOLD: f64 = 0.8;
const MAX_SUGGESTIONS: usize = 5;

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct InspectCustomizationRequest {
    /// Record id, e.g. "rules-language-typescript". A title also works.
    pub id: String,
}

pub async fn handle_inspect<F: Fetch>(
    state: &CatalogState<F>,
    request: InspectCustomizationRequest,
) -> Result<String, String> {
    let catalog = state.catalog();
    let wanted = request.id.trim();

    let found = catalog.get(wanted).or_else(|| {
        catalog
            .records()
            .iter()
            .find(|record| record.title.eq_ignore_ascii_case(wanted))
    });
    if let Some(record) = found {
        return Ok(render_detail(record));
    }

    let suggestions = suggest_ids(catalog, wanted);
    let mut result = format!("Customization '{}' not found.", wanted);
    if suggestions.is_empty() {
        result.push_str(" Use search_catalog to browse available ids.\n");
    } else {
        result.push_str(" Did you mean one of these?\n\n");
        for (id, title) in suggestions {
            let _ = writeln!(result, "• `{}` ({})", id, title);
        }
    }
    Ok(result)
}

/// Ids (with titles) most similar to `query`, best first.
pub fn suggest_ids<'a>(catalog: &'a Catalog, query: &str) -> Vec<(&'a str, &'a str)> {
    let query = query.to_lowercase();
    let mut scored: Vec<(f64, &str, &str)> = catalog
        .records()
        .iter()
        .map(|record| {
            let by_id = jaro_winkler::similarity(query.chars(), record.id.chars());
            let by_title =
                jaro_winkler::similarity(query.chars(), record.title.to_lowercase().chars());
            (by_id.max(by_title), record.id.as_str(), record.title.as_str())
        })
        .filter(|(score, _, _)| *score > SUGGESTION_THRESHOLD)
        .collect();

    scored.sort_by(|a, b| b.0.total_cmp(&a.0));
    scored
        .into_iter()
        .take(MAX_SUGGESTIONS)
        .map(|(_, id, title)| (id, title))
        .collect()
}

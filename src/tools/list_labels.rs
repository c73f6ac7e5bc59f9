use crate::fetch::Fetch;
use crate::filter::{FilterAction, FilterState, offered_labels};
use crate::state::CatalogState;
use rmcp::schemars;
use serde::Deserialize;
use std::fmt::Write as _;

#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct ListLabelsRequest {
    /// Display category (e.g. "Languages"). If omitted, lists labels for every category.
    #[serde(default)]
    pub category: Option<String>,
}

/// List labels, either for one category or grouped by all categories.
pub async fn handle_list_labels<F: Fetch>(
    state: &CatalogState<F>,
    request: ListLabelsRequest,
) -> Result<String, String> {
    let catalog = state.catalog();
    let mut output = String::new();

    if let Some(category) = request.category {
        let known = catalog.labels_by_category().contains_key(&category);
        let filter = FilterState::default().reduce(FilterAction::SetCategory(Some(category.clone())));
        let labels = offered_labels(catalog, &filter);

        if known {
            let _ = writeln!(output, "Labels in '{}' ({}):", category, labels.len());
        } else {
            let categories = catalog.categories().collect::<Vec<_>>().join(", ");
            let _ = writeln!(
                output,
                "Category '{}' not found (known: {}). All labels ({}):",
                category,
                categories,
                labels.len()
            );
        }
        let _ = writeln!(output, "{}", labels.join(", "));
        return Ok(output);
    }

    let _ = writeln!(output, "All labels ({}):", catalog.all_labels().len());
    let all: Vec<&str> = catalog.all_labels().iter().map(String::as_str).collect();
    let _ = writeln!(output, "{}\n", all.join(", "));

    let _ = writeln!(output, "By category:");
    for (category, labels) in catalog.labels_by_category() {
        let labels: Vec<&str> = labels.iter().map(String::as_str).collect();
        let shown = if labels.is_empty() {
            "(none)".to_string()
        } else {
            labels.join(", ")
        };
        let _ = writeln!(output, "• {}: {}", category, shown);
    }

    Ok(output)
}

use crate::fetch::Fetch;
use crate::state::CatalogState;
use rmcp::schemars;
use serde::Deserialize;

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetSourceRequest {
    /// Record id, e.g. "workflows-setup-node-project-setup"
    pub id: String,
}

/// Return the canonical markdown behind a record, ready to copy or save
/// under the record's filename.
pub async fn handle_get_source<F: Fetch>(
    state: &CatalogState<F>,
    request: GetSourceRequest,
) -> Result<String, String> {
    let id = request.id.trim();
    let record = state.catalog().get(id).ok_or_else(|| {
        format!(
            "Customization '{}' not found. Use inspect_customization for suggestions.",
            id
        )
    })?;

    let text = state
        .source_text(record)
        .await
        .map_err(|e| format!("Failed to fetch source for '{}': {}", id, e))?;

    Ok(text.to_string())
}

//! MCP server exposing the catalog as tools.

use crate::fetch::DocumentFetcher;
use crate::state::CatalogState;
use crate::tools::{
    GetSourceRequest, InspectCustomizationRequest, ListLabelsRequest, SearchCatalogRequest,
    handle_catalog_stats, handle_get_source, handle_inspect, handle_list_labels, handle_search,
};
use rmcp::{
    ServerHandler,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::*,
    schemars::{self, JsonSchema, generate::SchemaSettings},
    tool, tool_handler, tool_router,
};
use std::sync::Arc;

/// MCP server for browsing rules and workflows
#[derive(Clone)]
pub struct CatalogServer {
    /// Loaded catalog and source cache
    state: Arc<CatalogState<DocumentFetcher>>,

    /// Tool router for handling MCP tool calls
    tool_router: ToolRouter<Self>,
}

impl std::fmt::Debug for CatalogServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogServer")
            .field("state", &self.state)
            .finish()
    }
}

#[tool_router]
impl CatalogServer {
    pub fn new(state: CatalogState<DocumentFetcher>) -> Self {
        Self {
            state: Arc::new(state),
            tool_router: Self::tool_router(),
        }
    }

    pub fn state(&self) -> &Arc<CatalogState<DocumentFetcher>> {
        &self.state
    }

    #[tool(
        description = "Search the catalog of rules and workflows. Filters by type, labels (any of) and case-insensitive text over title, description, category and labels. A category only narrows the labels offered for refinement, never the results.",
        input_schema = inline_schema_for_type::<SearchCatalogRequest>()
    )]
    async fn search_catalog(
        &self,
        Parameters(request): Parameters<SearchCatalogRequest>,
    ) -> std::result::Result<String, String> {
        handle_search(self.state.as_ref(), request).await
    }

    #[tool(
        description = "List labels in use, for one display category or grouped by every category.",
        input_schema = inline_schema_for_type::<ListLabelsRequest>()
    )]
    async fn list_labels(
        &self,
        Parameters(request): Parameters<ListLabelsRequest>,
    ) -> std::result::Result<String, String> {
        handle_list_labels(self.state.as_ref(), request).await
    }

    #[tool(
        description = "Show every field of one customization by id (or exact title). Unknown ids get close-match suggestions.",
        input_schema = inline_schema_for_type::<InspectCustomizationRequest>()
    )]
    async fn inspect_customization(
        &self,
        Parameters(request): Parameters<InspectCustomizationRequest>,
    ) -> std::result::Result<String, String> {
        handle_inspect(self.state.as_ref(), request).await
    }

    #[tool(
        description = "Fetch the canonical markdown source of a customization, suitable for copying into a project or saving under its filename.",
        input_schema = inline_schema_for_type::<GetSourceRequest>()
    )]
    async fn get_source(
        &self,
        Parameters(request): Parameters<GetSourceRequest>,
    ) -> std::result::Result<String, String> {
        handle_get_source(self.state.as_ref(), request).await
    }

    #[tool(description = "Summarize the loaded catalog: counts per type, labels, categories and hosting mode.")]
    async fn catalog_stats(&self) -> std::result::Result<String, String> {
        handle_catalog_stats(self.state.as_ref()).await
    }
}

#[tool_handler]
impl ServerHandler for CatalogServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo::new(ServerCapabilities::builder().enable_tools().build())
            .with_protocol_version(ProtocolVersion::V_2024_11_05)
            .with_server_info(Implementation::from_build_env())
            .with_instructions(
                "customization-catalog: browse a fixed catalog of rules and workflows. \
                 Use search_catalog to filter, list_labels to discover labels, \
                 inspect_customization for details and get_source for the markdown itself."
                    .to_string(),
            )
    }
}

/// Generate an inline JSON schema for MCP tools
///
/// Unlike rmcp's default `schema_for_type()`, this function sets `inline_subschemas = true`
/// to generate inline enum definitions instead of $ref patterns. This ensures MCP Inspector
/// displays enums as dropdown widgets rather than raw JSON input fields.
pub fn inline_schema_for_type<T: JsonSchema>() -> Arc<JsonObject> {
    let mut settings = SchemaSettings::draft07();
    settings.transforms = vec![Box::new(schemars::transform::AddNullable::default())];
    settings.inline_subschemas = true;

    let generator = settings.into_generator();
    let schema = generator.into_root_schema_for::<T>();
    let object = serde_json::to_value(schema).expect("failed to serialize schema");

    let json_object = match object {
        serde_json::Value::Object(object) => object,
        _ => panic!("Schema serialization produced non-object value"),
    };

    Arc::new(json_object)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;

    #[test]
    fn test_type_enum_is_inlined() {
        let schema = inline_schema_for_type::<SearchCatalogRequest>();
        let text = serde_json::to_string(&*schema).unwrap();
        check!(text.contains("\"workflows\""));
        check!(!text.contains("$ref"));
    }
}

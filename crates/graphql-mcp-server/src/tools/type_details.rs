use crate::errors::McpError;
use crate::json_schema::input_schema;
use crate::schema_cache::SchemaCache;
use crate::tools::describe::type_details;
use crate::tools::{failure, text};
use rmcp::model::{CallToolResult, Tool};
use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, warn};

/// The name of the tool to describe a named type
pub const TYPE_DETAILS_TOOL_NAME: &str = "type-details";

/// How many similarly named types to suggest for an unknown name
const MAX_SIMILAR: usize = 10;

#[derive(Clone)]
pub struct TypeDetails {
    schema: Arc<SchemaCache>,
    pub tool: Tool,
}

/// Input for the type-details tool
#[derive(Debug, JsonSchema, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Input {
    /// The name of the type to describe
    type_name: String,
}

impl TypeDetails {
    pub fn new(schema: Arc<SchemaCache>) -> Self {
        Self {
            schema,
            tool: Tool::new(
                TYPE_DETAILS_TOOL_NAME,
                "Describe a GraphQL type: its fields and their types, input fields, enum values, or the members of a union.",
                input_schema::<Input>(),
            ),
        }
    }

    pub async fn execute(&self, input: Input) -> Result<CallToolResult, McpError> {
        info!(type_name = %input.type_name, "Describing type");

        let schema = match self.schema.schema().await {
            Ok(schema) => schema,
            Err(error) => {
                warn!(%error, "Failed to load schema");
                return Ok(failure(error));
            }
        };

        if let Some(full_type) = schema.type_by_name(input.type_name.trim()) {
            return Ok(text(type_details(full_type)));
        }

        let needle = input.type_name.trim().to_lowercase();
        let similar = schema
            .types
            .iter()
            .filter(|full_type| !full_type.is_built_in())
            .filter(|full_type| full_type.name.to_lowercase().contains(&needle))
            .map(|full_type| full_type.name.as_str())
            .take(MAX_SIMILAR)
            .collect::<Vec<_>>();

        let mut message = format!("Type '{}' was not found in the schema.", input.type_name);
        if !similar.is_empty() {
            message.push_str(&format!(" Similar types: {}.", similar.join(", ")));
        }
        Ok(text(message))
    }
}

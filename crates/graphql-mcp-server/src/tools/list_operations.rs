use crate::errors::McpError;
use crate::json_schema::input_schema;
use crate::schema_cache::SchemaCache;
use crate::tools::describe::field_line;
use crate::tools::{failure, text};
use graphql_operation_template::{OperationKind, filter_operations, generate};
use rmcp::model::{CallToolResult, Tool};
use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, warn};

/// The name of the tool to list query operations
pub const LIST_QUERIES_TOOL_NAME: &str = "list-queries";

/// The name of the tool to list mutation operations
pub const LIST_MUTATIONS_TOOL_NAME: &str = "list-mutations";

const DEFAULT_LIMIT: usize = 50;

/// Lists the root operations of one kind
#[derive(Clone)]
pub struct ListOperations {
    kind: OperationKind,
    schema: Arc<SchemaCache>,
    pub tool: Tool,
}

/// Input for the list-queries and list-mutations tools
#[derive(Debug, JsonSchema, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Input {
    /// Only list operations whose name or description contains this text
    #[serde(default)]
    search: Option<String>,

    /// Include an example request for each operation
    #[serde(default)]
    generate_example: bool,

    /// The maximum number of operations to list
    #[serde(default = "default_limit")]
    limit: usize,
}

const fn default_limit() -> usize {
    DEFAULT_LIMIT
}

impl ListOperations {
    pub fn queries(schema: Arc<SchemaCache>) -> Self {
        Self {
            kind: OperationKind::Query,
            schema,
            tool: Tool::new(
                LIST_QUERIES_TOOL_NAME,
                "List the queries the API offers, optionally filtered by a search term. Set `generateExample` to include an example request for each one.",
                input_schema::<Input>(),
            ),
        }
    }

    pub fn mutations(schema: Arc<SchemaCache>) -> Self {
        Self {
            kind: OperationKind::Mutation,
            schema,
            tool: Tool::new(
                LIST_MUTATIONS_TOOL_NAME,
                "List the mutations the API offers, optionally filtered by a search term. Set `generateExample` to include an example request for each one.",
                input_schema::<Input>(),
            ),
        }
    }

    pub async fn execute(&self, input: Input) -> Result<CallToolResult, McpError> {
        info!(
            kind = %self.kind,
            search = input.search.as_deref(),
            limit = input.limit,
            "Listing operations"
        );

        let schema = match self.schema.schema().await {
            Ok(schema) => schema,
            Err(error) => {
                warn!(%error, "Failed to load schema");
                return Ok(failure(error));
            }
        };

        let plural = match self.kind {
            OperationKind::Query => "queries",
            OperationKind::Mutation => "mutations",
        };
        let search = input
            .search
            .as_deref()
            .map(str::trim)
            .filter(|search| !search.is_empty());
        let matching = filter_operations(&schema, self.kind, search);
        let matching_clause = search
            .map(|search| format!(" matching '{search}'"))
            .unwrap_or_default();

        if matching.is_empty() {
            return Ok(text(format!(
                "No {plural} found{matching_clause}. Use `get-schema` to see every operation."
            )));
        }

        let shown = matching.len().min(input.limit);
        let noun = if matching.len() == 1 {
            self.kind.as_str()
        } else {
            plural
        };
        let mut output = format!("Found {} {noun}{matching_clause}", matching.len());
        if shown < matching.len() {
            output.push_str(&format!(" (showing {shown})"));
        }
        output.push(':');

        for operation in matching.into_iter().take(input.limit) {
            output.push_str(&format!("\n\n- {}", field_line(operation)));
            if input.generate_example {
                let example = generate(self.kind, operation);
                if !example.is_empty() {
                    output.push_str(&format!("\n\n```graphql\n{}\n```", example.query_text));
                    if !example.variables.is_empty() {
                        output.push_str(&format!(
                            "\n\nVariables: {}",
                            serde_json::Value::Object(example.variables)
                        ));
                    }
                }
            }
        }

        Ok(text(output))
    }
}

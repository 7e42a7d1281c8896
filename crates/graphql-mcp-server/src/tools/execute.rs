use crate::errors::McpError;
use crate::graphql::GraphQLClient;
use crate::json_schema::input_schema;
use crate::tools::{failure, graphql_result, invalid_input, text};
use apollo_compiler::ast::{Definition, Document, OperationType};
use rmcp::model::{CallToolResult, Tool};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, warn};

/// The name of the tool to execute an arbitrary GraphQL document
pub const EXECUTE_QUERY_TOOL_NAME: &str = "execute-query";

#[derive(Clone)]
pub struct ExecuteQuery {
    client: GraphQLClient,
    pub tool: Tool,
}

/// Input for the execute-query tool
#[derive(Debug, JsonSchema, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Input {
    /// The GraphQL query or mutation
    query: String,

    /// Variable values, as a JSON object or a string containing one
    #[serde(default)]
    variables: Option<Value>,

    /// Only check the syntax of the document without sending it
    #[serde(default)]
    validate_only: bool,
}

impl ExecuteQuery {
    pub fn new(client: GraphQLClient) -> Self {
        Self {
            client,
            tool: Tool::new(
                EXECUTE_QUERY_TOOL_NAME,
                "Execute a GraphQL query or mutation against the API. Use `get-schema`, `list-queries` and `type-details` to learn the schema, and `generate-query` to build a valid starting point. Set `validateOnly` to check the syntax without executing.",
                input_schema::<Input>(),
            ),
        }
    }

    pub async fn execute(&self, input: Input) -> Result<CallToolResult, McpError> {
        info!(validate_only = input.validate_only, "Executing query");
        debug!(query = %input.query, variables = ?input.variables);

        let variables = variables(input.variables)?;
        if input.validate_only {
            return Ok(validate(&input.query));
        }

        match self.client.execute_query(&input.query, variables).await {
            Ok(response) => Ok(graphql_result("Query executed successfully", response)),
            Err(error) => {
                warn!(%error, "Query execution failed");
                Ok(failure(error))
            }
        }
    }
}

/// Variables may arrive as an object or as a JSON string holding one
fn variables(variables: Option<Value>) -> Result<Option<Value>, McpError> {
    match variables {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(json)) if json.trim().is_empty() => Ok(None),
        Some(Value::String(json)) => match serde_json::from_str(&json) {
            Ok(Value::Object(object)) => Ok(Some(Value::Object(object))),
            Ok(_) => Err(invalid_input("variables must be a JSON object")),
            Err(error) => Err(invalid_input(format!("variables are not valid JSON: {error}"))),
        },
        Some(object @ Value::Object(_)) => Ok(Some(object)),
        Some(_) => Err(invalid_input("variables must be a JSON object")),
    }
}

/// Parse the document and list its operations. Nothing is checked against the schema.
fn validate(query: &str) -> CallToolResult {
    let document = match Document::parse(query, "query.graphql") {
        Ok(document) => document,
        Err(with_errors) => return failure(format!("Syntax error: {with_errors}")),
    };

    let operations = document
        .definitions
        .iter()
        .filter_map(|definition| match definition {
            Definition::OperationDefinition(operation) => Some(format!(
                "{} {}",
                match operation.operation_type {
                    OperationType::Query => "query",
                    OperationType::Mutation => "mutation",
                    OperationType::Subscription => "subscription",
                },
                operation
                    .name
                    .as_ref()
                    .map(|name| name.as_str())
                    .unwrap_or("(anonymous)")
            )),
            _ => None,
        })
        .collect::<Vec<_>>();

    if operations.is_empty() {
        return failure("Syntax error: the document does not define an operation");
    }

    text(format!(
        "Query syntax is valid.\n\nOperations:\n{}",
        operations
            .iter()
            .map(|operation| format!("- {operation}"))
            .collect::<Vec<_>>()
            .join("\n")
    ))
}

use crate::errors::McpError;
use crate::json_schema::input_schema;
use crate::schema_cache::SchemaCache;
use crate::tools::{failure, invalid_input, text};
use graphql_operation_template::{OperationKind, generate, render_type, resolve};
use rmcp::model::{CallToolResult, Tool};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, warn};

/// The name of the tool to generate an example request for an operation
pub const GENERATE_QUERY_TOOL_NAME: &str = "generate-query";

#[derive(Clone)]
pub struct GenerateQuery {
    schema: Arc<SchemaCache>,
    pub tool: Tool,
}

/// The kind of operation to generate
#[derive(JsonSchema, Deserialize, Debug, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum OperationType {
    Query,
    Mutation,
}

impl From<OperationType> for OperationKind {
    fn from(value: OperationType) -> Self {
        match value {
            OperationType::Query => OperationKind::Query,
            OperationType::Mutation => OperationKind::Mutation,
        }
    }
}

/// Input for the generate-query tool
#[derive(Debug, JsonSchema, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Input {
    /// The operation name. Partial names match the shortest operation containing them.
    operation_name: String,

    /// Whether the operation is a query or a mutation
    operation_type: OperationType,
}

impl GenerateQuery {
    pub fn new(schema: Arc<SchemaCache>) -> Self {
        Self {
            schema,
            tool: Tool::new(
                GENERATE_QUERY_TOOL_NAME,
                "Generate an example request for a query or mutation, with variable declarations and placeholder values derived from its arguments. Replace the placeholder selection set with fields of the return type.",
                input_schema::<Input>(),
            ),
        }
    }

    pub async fn execute(&self, input: Input) -> Result<CallToolResult, McpError> {
        let kind = OperationKind::from(input.operation_type);
        info!(operation = %input.operation_name, %kind, "Generating example");

        let requested = input.operation_name.trim();
        if requested.is_empty() {
            return Err(invalid_input("operationName must not be empty"));
        }

        let schema = match self.schema.schema().await {
            Ok(schema) => schema,
            Err(error) => {
                warn!(%error, "Failed to load schema");
                return Ok(failure(error));
            }
        };

        let operation = match resolve(&schema, kind, requested) {
            Ok(operation) => operation,
            Err(not_found) => {
                let list_tool = match kind {
                    OperationKind::Query => "list-queries",
                    OperationKind::Mutation => "list-mutations",
                };
                return Ok(text(format!(
                    "{not_found}. Use `{list_tool}` to see the available operations."
                )));
            }
        };

        let example = generate(kind, operation);
        if example.is_empty() {
            return Ok(text(format!(
                "Could not generate an example for '{}'.",
                input.operation_name
            )));
        }

        let mut output = String::new();
        if !operation.name.eq_ignore_ascii_case(requested) {
            output.push_str(&format!(
                "Closest match for '{}': {}\n\n",
                input.operation_name, operation.name
            ));
        }
        output.push_str(&format!(
            "Example {kind} for `{}`:\n\n```graphql\n{}\n```",
            operation.name, example.query_text
        ));
        if !example.variables.is_empty() {
            let variables = Value::Object(example.variables);
            output.push_str(&format!(
                "\n\nVariables:\n\n```json\n{}\n```",
                serde_json::to_string_pretty(&variables).unwrap_or_else(|_| variables.to_string())
            ));
        }
        output.push_str("\n\nThe selection set `{ id name }` is a placeholder.");
        if let Some(return_type) = &operation.type_ref {
            output.push_str(&format!(
                " Replace it with fields of `{}`, using `type-details` to list them.",
                render_type(return_type)
            ));
        }

        Ok(text(output))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::result_text;
    use crate::tools::test_support::{business_schema, schema_cache};
    use insta::assert_snapshot;
    use serde_json::json;

    async fn run(input: Value) -> String {
        let result = GenerateQuery::new(schema_cache(business_schema()))
            .execute(serde_json::from_value(input).unwrap())
            .await
            .unwrap();
        result_text(&result).to_string()
    }

    #[tokio::test]
    async fn generates_the_customer_order_query() {
        let text = run(json!({
            "operationName": "getCustomerOrder",
            "operationType": "query"
        }))
        .await;

        assert!(text.contains(
            "query GetCustomerOrder($biId: String!) {\n  getCustomerOrder(biId: $biId) {"
        ));
        assert_snapshot!(text, @r#"
        Example query for `getCustomerOrder`:

        ```graphql
        query GetCustomerOrder($biId: String!) {
          getCustomerOrder(biId: $biId) {
            id
            name
          }
        }
        ```

        Variables:

        ```json
        {
          "biId": "String1"
        }
        ```

        The selection set `{ id name }` is a placeholder. Replace it with fields of `Order`, using `type-details` to list them.
        "#);
    }

    #[tokio::test]
    async fn mentions_partial_matches() {
        let text = run(json!({ "operationName": "Order", "operationType": "query" })).await;

        assert!(text.starts_with("Closest match for 'Order': getCustomerOrder"));
    }

    #[tokio::test]
    async fn reports_unknown_operations() {
        let text = run(json!({
            "operationName": "deleteEverything",
            "operationType": "mutation"
        }))
        .await;

        assert_eq!(
            text,
            "No mutation operation matching 'deleteEverything' was found. Use `list-mutations` to see the available operations."
        );
    }

    #[tokio::test]
    async fn blank_operation_names_are_invalid_params() {
        let error = GenerateQuery::new(schema_cache(business_schema()))
            .execute(
                serde_json::from_value(json!({ "operationName": "  ", "operationType": "query" }))
                    .unwrap(),
            )
            .await
            .unwrap_err();

        assert_eq!(error.code, rmcp::model::ErrorCode::INVALID_PARAMS);
        assert_eq!(error.message, "operationName must not be empty");
    }

    #[test]
    fn operation_type_must_be_query_or_mutation() {
        assert!(
            serde_json::from_value::<Input>(json!({
                "operationName": "onOrder",
                "operationType": "subscription"
            }))
            .is_err()
        );
    }
}

use crate::errors::McpError;
use crate::json_schema::input_schema;
use crate::schema_cache::SchemaCache;
use crate::tools::describe::{field_details, field_line, type_details};
use crate::tools::{failure, text};
use graphql_operation_template::{IntrospectionSchema, OperationKind};
use rmcp::model::{CallToolResult, Tool};
use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, warn};

/// The name of the tool to summarize the schema or look up part of it
pub const GET_SCHEMA_TOOL_NAME: &str = "get-schema";

#[derive(Clone)]
pub struct GetSchema {
    schema: Arc<SchemaCache>,
    pub tool: Tool,
}

/// Input for the get-schema tool
#[derive(Debug, JsonSchema, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Input {
    /// Describe only this type
    #[serde(default)]
    type_name: Option<String>,

    /// Describe only this field. Without `typeName`, root operations are searched.
    #[serde(default)]
    field_name: Option<String>,

    /// Include query operations in the summary
    #[serde(default = "default_true")]
    include_queries: bool,

    /// Include mutation operations in the summary
    #[serde(default = "default_true")]
    include_mutations: bool,

    /// Introspect the API again instead of using the cached schema
    #[serde(default)]
    refresh: bool,
}

const fn default_true() -> bool {
    true
}

impl GetSchema {
    pub fn new(schema: Arc<SchemaCache>) -> Self {
        Self {
            schema,
            tool: Tool::new(
                GET_SCHEMA_TOOL_NAME,
                "Get an overview of the GraphQL schema, listing the available queries and mutations. Pass `typeName` to describe a type, `fieldName` to describe a single field, or `refresh` to reload the schema from the API.",
                input_schema::<Input>(),
            ),
        }
    }

    pub async fn execute(&self, input: Input) -> Result<CallToolResult, McpError> {
        info!(
            type_name = input.type_name.as_deref(),
            field_name = input.field_name.as_deref(),
            refresh = input.refresh,
            "Getting schema"
        );

        let schema = if input.refresh {
            self.schema.refresh().await
        } else {
            self.schema.schema().await
        };
        let schema = match schema {
            Ok(schema) => schema,
            Err(error) => {
                warn!(%error, "Failed to load schema");
                return Ok(failure(error));
            }
        };

        let type_name = input.type_name.as_deref().filter(|name| !name.is_empty());
        let field_name = input.field_name.as_deref().filter(|name| !name.is_empty());
        Ok(match (type_name, field_name) {
            (Some(type_name), field_name) => describe_type(&schema, type_name, field_name),
            (None, Some(field_name)) => describe_root_field(&schema, field_name, &kinds(&input)),
            (None, None) => summary(&schema, &kinds(&input)),
        })
    }
}

fn kinds(input: &Input) -> Vec<OperationKind> {
    [
        (input.include_queries, OperationKind::Query),
        (input.include_mutations, OperationKind::Mutation),
    ]
    .into_iter()
    .filter_map(|(included, kind)| included.then_some(kind))
    .collect()
}

fn describe_type(
    schema: &IntrospectionSchema,
    type_name: &str,
    field_name: Option<&str>,
) -> CallToolResult {
    let Some(full_type) = schema.type_by_name(type_name) else {
        return text(format!(
            "Type '{type_name}' was not found in the schema. Use `get-schema` without arguments to see the available operations."
        ));
    };

    match field_name {
        None => text(type_details(full_type)),
        Some(field_name) => {
            if let Some(field) = full_type.field(field_name) {
                text(format!("{}.{}", full_type.name, field_details(field)))
            } else if let Some(input_field) = full_type.input_field(field_name) {
                let field = graphql_operation_template::OperationDescriptor {
                    name: input_field.name.clone(),
                    description: input_field.description.clone(),
                    type_ref: Some(input_field.type_ref.clone()),
                    ..Default::default()
                };
                text(format!("{}.{}", full_type.name, field_details(&field)))
            } else {
                text(format!(
                    "Field '{field_name}' was not found on type '{}'. Use `type-details` to list its fields.",
                    full_type.name
                ))
            }
        }
    }
}

fn describe_root_field(
    schema: &IntrospectionSchema,
    field_name: &str,
    kinds: &[OperationKind],
) -> CallToolResult {
    kinds
        .iter()
        .find_map(|kind| {
            schema
                .operations(*kind)
                .iter()
                .find(|operation| operation.name.eq_ignore_ascii_case(field_name))
                .map(|operation| text(format!("{kind} {}", field_details(operation))))
        })
        .unwrap_or_else(|| {
            text(format!(
                "No operation named '{field_name}' was found. Use `list-queries` or `list-mutations` to search for one."
            ))
        })
}

fn summary(schema: &IntrospectionSchema, kinds: &[OperationKind]) -> CallToolResult {
    let mut sections = vec!["GraphQL schema".to_string()];

    for kind in kinds {
        let operations = schema.operations(*kind);
        let mut section = format!(
            "{} ({}):",
            match kind {
                OperationKind::Query => "Queries",
                OperationKind::Mutation => "Mutations",
            },
            operations.len()
        );
        if operations.is_empty() {
            section.push_str("\n  (none)");
        }
        for operation in operations {
            section.push_str(&format!("\n  {}", field_line(operation)));
        }
        sections.push(section);
    }

    let named_types = schema
        .types
        .iter()
        .filter(|full_type| !full_type.is_built_in())
        .count();
    sections.push(format!(
        "{named_types} named types. Use `type-details` to inspect one."
    ));

    text(sections.join("\n\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::result_text;
    use crate::tools::test_support::{business_schema, schema_cache};
    use insta::assert_snapshot;
    use serde_json::json;

    async fn run(input: serde_json::Value) -> String {
        let tool = GetSchema::new(schema_cache(business_schema()));
        let result = tool
            .execute(serde_json::from_value(input).unwrap())
            .await
            .unwrap();
        result_text(&result).to_string()
    }

    #[tokio::test]
    async fn summarizes_root_operations() {
        assert_snapshot!(run(json!({})).await, @r"
        GraphQL schema

        Queries (3):
          _heartbeat: Boolean! - Liveness check
          getCustomerOrder(biId: String!): Order - A customer order by business identifier
          deals(dealId: String, limit: Int = 5): [Deal] - Deals with their funding nodes

        Mutations (1):
          createPriceProposal(input: PriceProposalInput!): PriceProposal - Create a price proposal for a deal

        3 named types. Use `type-details` to inspect one.
        ");
    }

    #[tokio::test]
    async fn summary_can_leave_out_mutations() {
        let summary = run(json!({ "includeMutations": false })).await;

        assert!(summary.contains("Queries (3):"));
        assert!(!summary.contains("Mutations"));
    }

    #[tokio::test]
    async fn describes_a_field_of_a_type() {
        assert_snapshot!(run(json!({ "typeName": "Order", "fieldName": "legacyNumber" })).await, @r"
        Order.legacyNumber: String

        Deprecated: Use id
        ");
    }

    #[tokio::test]
    async fn describes_a_root_field() {
        assert_snapshot!(run(json!({ "fieldName": "createPriceProposal" })).await, @r"
        mutation createPriceProposal(input: PriceProposalInput!): PriceProposal

        Create a price proposal for a deal

        Arguments:
          input: PriceProposalInput!
        ");
    }

    #[tokio::test]
    async fn reports_unknown_types() {
        let text = run(json!({ "typeName": "Invoice" })).await;

        assert!(text.starts_with("Type 'Invoice' was not found in the schema."));
    }
}

//! MCP tools and the text envelope they share

pub(crate) mod business;
mod describe;
pub(crate) mod execute;
pub(crate) mod generate_query;
pub(crate) mod get_schema;
pub(crate) mod heartbeat;
pub(crate) mod list_operations;
pub(crate) mod type_details;

use crate::errors::McpError;
use crate::graphql::GraphQLResponse;
use rmcp::model::{CallToolResult, Content, ErrorCode};
use serde_json::Value;
use std::fmt::Display;

const SYNTAX_SUGGESTION: &str =
    "Check the query syntax. Use `generate-query` to build a valid example for an operation.";
const AUTH_SUGGESTION: &str = "Check that CLIENT_ID, CLIENT_SECRET and AUTH_URL are set correctly and that the client may access the API.";
const NETWORK_SUGGESTION: &str =
    "Check network connectivity and that GRAPHQL_URL points at a reachable GraphQL endpoint.";

/// Substrings of an error message, and the advice to give when one is present
const SUGGESTIONS: [(&[&str], &str); 3] = [
    (&["syntax", "parse"], SYNTAX_SUGGESTION),
    (
        &["authentication", "401", "403", "unauthorized", "forbidden"],
        AUTH_SUGGESTION,
    ),
    (
        &["network", "timeout", "timed out", "connect"],
        NETWORK_SUGGESTION,
    ),
];

/// Advice for recovering from an error, chosen by what its message mentions
pub(crate) fn suggestion(message: &str) -> Option<&'static str> {
    let message = message.to_lowercase();
    SUGGESTIONS
        .iter()
        .find(|(needles, _)| needles.iter().any(|needle| message.contains(needle)))
        .map(|(_, suggestion)| *suggestion)
}

pub(crate) fn text(text: impl Into<String>) -> CallToolResult {
    CallToolResult {
        content: vec![Content::text(text.into())],
        is_error: None,
    }
}

/// Text followed by a JSON code block
pub(crate) fn text_with_json(heading: &str, data: &Value) -> CallToolResult {
    text(format!("{heading}\n\n{}", json_block(data)))
}

/// An error reported to the client as a tool result rather than a protocol error
pub(crate) fn failure(error: impl Display) -> CallToolResult {
    let message = error.to_string();
    let mut text = format!("Error: {message}");
    if let Some(suggestion) = suggestion(&message) {
        text.push_str(&format!("\n\nSuggestion: {suggestion}"));
    }
    CallToolResult {
        content: vec![Content::text(text)],
        is_error: Some(true),
    }
}

/// Report a GraphQL response. Errors are always listed, and only count as a failure when no data
/// came back.
pub(crate) fn graphql_result(heading: &str, response: GraphQLResponse) -> CallToolResult {
    if !response.has_errors() {
        return text_with_json(heading, &response.data);
    }

    let mut errors = String::from("GraphQL errors:");
    for error in &response.errors {
        errors.push_str(&format!("\n- {}", error.message));
        if let Some(path) = &error.path {
            errors.push_str(&format!(" (path: {path})"));
        }
    }

    if response.data.is_null() {
        let messages = response
            .errors
            .iter()
            .map(|error| error.message.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        if let Some(suggestion) = suggestion(&messages) {
            errors.push_str(&format!("\n\nSuggestion: {suggestion}"));
        }
        CallToolResult {
            content: vec![Content::text(errors)],
            is_error: Some(true),
        }
    } else {
        text(format!(
            "{heading}\n\n{}\n\n{errors}",
            json_block(&response.data)
        ))
    }
}

pub(crate) fn invalid_input(message: impl Into<String>) -> McpError {
    McpError::new(ErrorCode::INVALID_PARAMS, message.into(), None)
}

fn json_block(data: &Value) -> String {
    let pretty = serde_json::to_string_pretty(data).unwrap_or_else(|_| data.to_string());
    format!("```json\n{pretty}\n```")
}

/// The text of a single-content result
#[cfg(test)]
pub(crate) fn result_text(result: &CallToolResult) -> &str {
    result
        .content
        .first()
        .and_then(|content| content.as_text())
        .map(|text| text.text.as_str())
        .unwrap_or_default()
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::auth::{ClientCredentials, TokenProvider};
    use crate::graphql::GraphQLClient;
    use crate::schema_cache::SchemaCache;
    use graphql_operation_template::IntrospectionSchema;
    use secrecy::SecretString;
    use serde_json::Value;
    use std::sync::Arc;
    use url::Url;

    /// A client for an endpoint served by a mock server, including its token endpoint
    pub(crate) async fn client(server: &mut mockito::Server) -> GraphQLClient {
        server
            .mock("POST", "/oauth/token")
            .with_status(200)
            .with_body(r#"{"access_token":"token","expires_in":3600}"#)
            .create_async()
            .await;
        client_for(&server.url())
    }

    /// A client for a port nothing listens on, for tools that must not reach the endpoint
    pub(crate) fn unreachable_client() -> GraphQLClient {
        client_for("http://127.0.0.1:9")
    }

    /// A client whose token and GraphQL endpoints live under `base`
    pub(crate) fn client_for(base: &str) -> GraphQLClient {
        let http = reqwest::Client::new();
        let tokens = TokenProvider::new(
            http.clone(),
            ClientCredentials {
                token_url: Url::parse(&format!("{base}/oauth/token")).unwrap(),
                client_id: "client".to_string(),
                client_secret: SecretString::from("secret".to_string()),
            },
        );
        GraphQLClient::new(
            http,
            Url::parse(&format!("{base}/graphql")).unwrap(),
            Arc::new(tokens),
        )
    }

    /// A schema cache preloaded from the `data` of an introspection response
    pub(crate) fn schema_cache(introspection_data: Value) -> Arc<SchemaCache> {
        let schema: IntrospectionSchema =
            serde_json::from_value(introspection_data["__schema"].clone()).unwrap();
        Arc::new(SchemaCache::with_schema(unreachable_client(), schema))
    }

    /// A small schema in the shape of the business API
    pub(crate) fn business_schema() -> Value {
        serde_json::json!({
            "__schema": {
                "queryType": {
                    "name": "Query",
                    "fields": [
                        {
                            "name": "_heartbeat",
                            "description": "Liveness check",
                            "args": [],
                            "type": { "kind": "NON_NULL", "ofType": { "kind": "SCALAR", "name": "Boolean" } }
                        },
                        {
                            "name": "getCustomerOrder",
                            "description": "A customer order by business identifier",
                            "args": [{
                                "name": "biId",
                                "description": "Business identifier of the order",
                                "type": { "kind": "NON_NULL", "ofType": { "kind": "SCALAR", "name": "String" } },
                                "defaultValue": null
                            }],
                            "type": { "kind": "OBJECT", "name": "Order" }
                        },
                        {
                            "name": "deals",
                            "description": "Deals with their funding nodes",
                            "args": [
                                { "name": "dealId", "type": { "kind": "SCALAR", "name": "String" } },
                                { "name": "limit", "type": { "kind": "SCALAR", "name": "Int" }, "defaultValue": "5" }
                            ],
                            "type": { "kind": "LIST", "ofType": { "kind": "OBJECT", "name": "Deal" } }
                        }
                    ]
                },
                "mutationType": {
                    "name": "Mutation",
                    "fields": [{
                        "name": "createPriceProposal",
                        "description": "Create a price proposal for a deal",
                        "args": [{
                            "name": "input",
                            "type": { "kind": "NON_NULL", "ofType": { "kind": "INPUT_OBJECT", "name": "PriceProposalInput" } }
                        }],
                        "type": { "kind": "OBJECT", "name": "PriceProposal" },
                        "isDeprecated": false
                    }]
                },
                "types": [
                    {
                        "kind": "OBJECT",
                        "name": "Order",
                        "description": "An order placed by a customer",
                        "fields": [
                            { "name": "id", "args": [], "type": { "kind": "NON_NULL", "ofType": { "kind": "SCALAR", "name": "ID" } } },
                            { "name": "status", "args": [], "type": { "kind": "ENUM", "name": "OrderStatus" } },
                            {
                                "name": "legacyNumber",
                                "args": [],
                                "type": { "kind": "SCALAR", "name": "String" },
                                "isDeprecated": true,
                                "deprecationReason": "Use id"
                            }
                        ],
                        "interfaces": [{ "kind": "INTERFACE", "name": "Node" }]
                    },
                    {
                        "kind": "ENUM",
                        "name": "OrderStatus",
                        "enumValues": [
                            { "name": "OPEN", "description": "Not yet fulfilled" },
                            { "name": "CLOSED" }
                        ]
                    },
                    {
                        "kind": "INPUT_OBJECT",
                        "name": "PriceProposalInput",
                        "inputFields": [
                            { "name": "dealId", "type": { "kind": "NON_NULL", "ofType": { "kind": "SCALAR", "name": "ID" } } },
                            { "name": "discount", "type": { "kind": "SCALAR", "name": "Float" }, "defaultValue": "0" }
                        ]
                    },
                    { "kind": "OBJECT", "name": "__Schema", "fields": [] }
                ]
            }
        })
    }
}

use crate::errors::McpError;
use crate::graphql::GraphQLClient;
use crate::json_schema::input_schema;
use crate::queries::HEARTBEAT;
use crate::tools::{failure, graphql_result};
use rmcp::model::{CallToolResult, Tool};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{info, warn};

/// The name of the tool to check that the API is reachable
pub const CHECK_HEARTBEAT_TOOL_NAME: &str = "check-heartbeat";

#[derive(Clone)]
pub struct CheckHeartbeat {
    client: GraphQLClient,
    pub tool: Tool,
}

/// The check-heartbeat tool takes no input
#[derive(Debug, JsonSchema, Deserialize)]
pub struct Input {}

impl CheckHeartbeat {
    pub fn new(client: GraphQLClient) -> Self {
        Self {
            client,
            tool: Tool::new(
                CHECK_HEARTBEAT_TOOL_NAME,
                "Check that the GraphQL API is reachable and that authentication works.",
                input_schema::<Input>(),
            ),
        }
    }

    pub async fn execute(&self, _input: Input) -> Result<CallToolResult, McpError> {
        info!("Checking heartbeat");
        match self.client.execute_query(HEARTBEAT.document, None).await {
            Ok(response) => Ok(graphql_result("The GraphQL API is reachable.", response)),
            Err(error) => {
                warn!(%error, "Heartbeat failed");
                Ok(failure(error))
            }
        }
    }
}

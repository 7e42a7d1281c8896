use crate::errors::McpError;
use crate::graphql::GraphQLClient;
use crate::schema_cache::SchemaCache;
use crate::tools::business::{
    BiIdInput, BusinessTool, DealWithFundingNodesInput, GET_CUSTOMER_ORDER_TOOL_NAME,
    GET_DEAL_WITH_FUNDING_NODES_TOOL_NAME, GET_ORDER_AUTHOR_DETAILS_TOOL_NAME,
    GET_PRICE_PROPOSAL_TOOL_NAME, OrderAuthorInput,
};
use crate::tools::execute::{EXECUTE_QUERY_TOOL_NAME, ExecuteQuery};
use crate::tools::generate_query::{GENERATE_QUERY_TOOL_NAME, GenerateQuery};
use crate::tools::get_schema::{GET_SCHEMA_TOOL_NAME, GetSchema};
use crate::tools::heartbeat::{CHECK_HEARTBEAT_TOOL_NAME, CheckHeartbeat};
use crate::tools::list_operations::{
    LIST_MUTATIONS_TOOL_NAME, LIST_QUERIES_TOOL_NAME, ListOperations,
};
use crate::tools::type_details::{TYPE_DETAILS_TOOL_NAME, TypeDetails};
use rmcp::model::{
    CallToolRequestParam, CallToolResult, ErrorCode, Implementation, ListToolsResult,
    PaginatedRequestParam, ServerCapabilities, ServerInfo,
};
use rmcp::service::RequestContext;
use rmcp::{RoleServer, ServerHandler};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// The MCP service, dispatching tool calls to their handlers
#[derive(Clone)]
pub(super) struct Running {
    execute_query: ExecuteQuery,
    get_schema: GetSchema,
    list_queries: ListOperations,
    list_mutations: ListOperations,
    type_details: TypeDetails,
    generate_query: GenerateQuery,
    check_heartbeat: CheckHeartbeat,
    deal_with_funding_nodes: BusinessTool,
    order_author_details: BusinessTool,
    customer_order: BusinessTool,
    price_proposal: BusinessTool,
}

impl Running {
    pub(super) fn new(client: GraphQLClient, schema: Arc<SchemaCache>) -> Self {
        Self {
            execute_query: ExecuteQuery::new(client.clone()),
            get_schema: GetSchema::new(schema.clone()),
            list_queries: ListOperations::queries(schema.clone()),
            list_mutations: ListOperations::mutations(schema.clone()),
            type_details: TypeDetails::new(schema.clone()),
            generate_query: GenerateQuery::new(schema),
            check_heartbeat: CheckHeartbeat::new(client.clone()),
            deal_with_funding_nodes: BusinessTool::deal_with_funding_nodes(client.clone()),
            order_author_details: BusinessTool::order_author_details(client.clone()),
            customer_order: BusinessTool::customer_order(client.clone()),
            price_proposal: BusinessTool::price_proposal(client),
        }
    }
}

impl ServerHandler for Running {
    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        debug!(tool = %request.name, arguments = ?request.arguments, "Tool called");
        let name = request.name.to_string();
        match name.as_str() {
            EXECUTE_QUERY_TOOL_NAME => {
                self.execute_query
                    .execute(convert_arguments(request)?)
                    .await
            }
            GET_SCHEMA_TOOL_NAME => self.get_schema.execute(convert_arguments(request)?).await,
            LIST_QUERIES_TOOL_NAME => {
                self.list_queries
                    .execute(convert_arguments(request)?)
                    .await
            }
            LIST_MUTATIONS_TOOL_NAME => {
                self.list_mutations
                    .execute(convert_arguments(request)?)
                    .await
            }
            TYPE_DETAILS_TOOL_NAME => {
                self.type_details
                    .execute(convert_arguments(request)?)
                    .await
            }
            GENERATE_QUERY_TOOL_NAME => {
                self.generate_query
                    .execute(convert_arguments(request)?)
                    .await
            }
            CHECK_HEARTBEAT_TOOL_NAME => {
                self.check_heartbeat
                    .execute(convert_arguments(request)?)
                    .await
            }
            GET_DEAL_WITH_FUNDING_NODES_TOOL_NAME => {
                self.deal_with_funding_nodes
                    .execute::<DealWithFundingNodesInput>(convert_arguments(request)?)
                    .await
            }
            GET_ORDER_AUTHOR_DETAILS_TOOL_NAME => {
                self.order_author_details
                    .execute::<OrderAuthorInput>(convert_arguments(request)?)
                    .await
            }
            GET_CUSTOMER_ORDER_TOOL_NAME => {
                self.customer_order
                    .execute::<BiIdInput>(convert_arguments(request)?)
                    .await
            }
            GET_PRICE_PROPOSAL_TOOL_NAME => {
                self.price_proposal
                    .execute::<BiIdInput>(convert_arguments(request)?)
                    .await
            }
            name => Err(tool_not_found(name)),
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        Ok(ListToolsResult {
            next_cursor: None,
            tools: self.tools(),
        })
    }

    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            instructions: Some(
                "Explore the GraphQL API with `get-schema`, `list-queries`, `list-mutations` and `type-details`, build requests with `generate-query`, and run them with `execute-query`."
                    .to_string(),
            ),
            ..Default::default()
        }
    }
}

impl Running {
    fn tools(&self) -> Vec<rmcp::model::Tool> {
        vec![
            self.execute_query.tool.clone(),
            self.get_schema.tool.clone(),
            self.list_queries.tool.clone(),
            self.list_mutations.tool.clone(),
            self.type_details.tool.clone(),
            self.generate_query.tool.clone(),
            self.check_heartbeat.tool.clone(),
            self.deal_with_funding_nodes.tool.clone(),
            self.order_author_details.tool.clone(),
            self.customer_order.tool.clone(),
            self.price_proposal.tool.clone(),
        ]
    }
}

fn tool_not_found(name: &str) -> McpError {
    McpError::new(
        ErrorCode::METHOD_NOT_FOUND,
        format!("Tool {name} not found"),
        None,
    )
}

fn convert_arguments<T: serde::de::DeserializeOwned>(
    arguments: CallToolRequestParam,
) -> Result<T, McpError> {
    let arguments = arguments
        .arguments
        .map(Value::Object)
        .unwrap_or_else(|| Value::Object(Default::default()));
    serde_json::from_value(arguments)
        .map_err(|_| McpError::new(ErrorCode::INVALID_PARAMS, "Invalid input".to_string(), None))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::test_support::{business_schema, schema_cache, unreachable_client};
    use serde_json::json;

    fn running() -> Running {
        Running::new(unreachable_client(), schema_cache(business_schema()))
    }

    fn request(name: &str, arguments: Value) -> CallToolRequestParam {
        CallToolRequestParam {
            name: name.to_string().into(),
            arguments: arguments.as_object().cloned(),
        }
    }

    #[test]
    fn lists_every_tool_once() {
        let names = running()
            .tools()
            .into_iter()
            .map(|tool| tool.name.to_string())
            .collect::<Vec<_>>();

        assert_eq!(
            names,
            vec![
                "execute-query",
                "get-schema",
                "list-queries",
                "list-mutations",
                "type-details",
                "generate-query",
                "check-heartbeat",
                "get-deal-with-funding-nodes",
                "get-order-author-details",
                "get-customer-order",
                "get-price-proposal",
            ]
        );
    }

    #[test]
    fn missing_arguments_use_defaults() {
        let input: Result<DealWithFundingNodesInput, _> =
            convert_arguments(CallToolRequestParam {
                name: GET_DEAL_WITH_FUNDING_NODES_TOOL_NAME.into(),
                arguments: None,
            });

        assert!(input.is_ok());
    }

    #[test]
    fn malformed_arguments_are_invalid_params() {
        let error = convert_arguments::<BiIdInput>(request(
            GET_CUSTOMER_ORDER_TOOL_NAME,
            json!({ "biId": 42 }),
        ))
        .unwrap_err();

        assert_eq!(error.code, ErrorCode::INVALID_PARAMS);
        assert_eq!(error.message, "Invalid input");
    }

    #[test]
    fn generate_query_rejects_unknown_operation_types() {
        let error = convert_arguments::<crate::tools::generate_query::Input>(request(
            GENERATE_QUERY_TOOL_NAME,
            json!({ "operationName": "getCustomerOrder", "operationType": "subscription" }),
        ))
        .unwrap_err();

        assert_eq!(error.code, ErrorCode::INVALID_PARAMS);
    }
}

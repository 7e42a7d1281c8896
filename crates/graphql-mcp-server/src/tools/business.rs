//! Tools backed by the fixed documents in [`crate::queries`]

use crate::errors::McpError;
use crate::graphql::GraphQLClient;
use crate::json_schema::input_schema;
use crate::queries::{
    BusinessQuery, GET_CUSTOMER_ORDER, GET_DEAL_WITH_FUNDING_NODES, GET_ORDER_AUTHOR_DETAILS,
    GET_PRICE_PROPOSAL,
};
use crate::tools::{failure, graphql_result, invalid_input};
use rmcp::model::{CallToolResult, Tool};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

pub const GET_DEAL_WITH_FUNDING_NODES_TOOL_NAME: &str = "get-deal-with-funding-nodes";
pub const GET_ORDER_AUTHOR_DETAILS_TOOL_NAME: &str = "get-order-author-details";
pub const GET_CUSTOMER_ORDER_TOOL_NAME: &str = "get-customer-order";
pub const GET_PRICE_PROPOSAL_TOOL_NAME: &str = "get-price-proposal";

const DEFAULT_DEAL_LIMIT: u32 = 5;

/// Input for get-deal-with-funding-nodes. Serializes to the document's variables.
#[derive(Debug, JsonSchema, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DealWithFundingNodesInput {
    /// Restrict the result to this deal
    #[serde(default, skip_serializing_if = "Option::is_none")]
    deal_id: Option<String>,

    /// The maximum number of deals to return
    #[serde(default = "default_deal_limit")]
    limit: u32,
}

const fn default_deal_limit() -> u32 {
    DEFAULT_DEAL_LIMIT
}

/// Input for get-order-author-details
#[derive(Debug, JsonSchema, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderAuthorInput {
    /// Business identifier of the order
    order_bi_id: String,
}

/// Input for get-customer-order and get-price-proposal
#[derive(Debug, JsonSchema, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BiIdInput {
    /// Business identifier of the record
    bi_id: String,
}

/// Inputs whose identifiers must not be blank
pub trait Identifiers {
    fn identifiers(&self) -> Vec<(&'static str, &str)>;
}

impl Identifiers for DealWithFundingNodesInput {
    fn identifiers(&self) -> Vec<(&'static str, &str)> {
        self.deal_id
            .as_deref()
            .map(|deal_id| vec![("dealId", deal_id)])
            .unwrap_or_default()
    }
}

impl Identifiers for OrderAuthorInput {
    fn identifiers(&self) -> Vec<(&'static str, &str)> {
        vec![("orderBiId", self.order_bi_id.as_str())]
    }
}

impl Identifiers for BiIdInput {
    fn identifiers(&self) -> Vec<(&'static str, &str)> {
        vec![("biId", self.bi_id.as_str())]
    }
}

/// Runs one of the business documents with the tool input as its variables
#[derive(Clone)]
pub struct BusinessTool {
    query: BusinessQuery,
    heading: &'static str,
    client: GraphQLClient,
    pub tool: Tool,
}

impl BusinessTool {
    pub fn deal_with_funding_nodes(client: GraphQLClient) -> Self {
        Self {
            query: GET_DEAL_WITH_FUNDING_NODES,
            heading: "Deals with funding nodes",
            client,
            tool: Tool::new(
                GET_DEAL_WITH_FUNDING_NODES_TOOL_NAME,
                "Get deals together with their funding nodes. Optionally restrict to one deal by `dealId`; `limit` defaults to 5.",
                input_schema::<DealWithFundingNodesInput>(),
            ),
        }
    }

    pub fn order_author_details(client: GraphQLClient) -> Self {
        Self {
            query: GET_ORDER_AUTHOR_DETAILS,
            heading: "Order author details",
            client,
            tool: Tool::new(
                GET_ORDER_AUTHOR_DETAILS_TOOL_NAME,
                "Get the author of a customer order, identified by its business identifier.",
                input_schema::<OrderAuthorInput>(),
            ),
        }
    }

    pub fn customer_order(client: GraphQLClient) -> Self {
        Self {
            query: GET_CUSTOMER_ORDER,
            heading: "Customer order",
            client,
            tool: Tool::new(
                GET_CUSTOMER_ORDER_TOOL_NAME,
                "Get a customer order with its customer and line items, identified by its business identifier.",
                input_schema::<BiIdInput>(),
            ),
        }
    }

    pub fn price_proposal(client: GraphQLClient) -> Self {
        Self {
            query: GET_PRICE_PROPOSAL,
            heading: "Price proposal",
            client,
            tool: Tool::new(
                GET_PRICE_PROPOSAL_TOOL_NAME,
                "Get a price proposal with its items, identified by its business identifier.",
                input_schema::<BiIdInput>(),
            ),
        }
    }

    pub async fn execute<I>(&self, input: I) -> Result<CallToolResult, McpError>
    where
        I: Serialize + Identifiers,
    {
        if let Some((name, _)) = input
            .identifiers()
            .into_iter()
            .find(|(_, value)| value.trim().is_empty())
        {
            return Err(invalid_input(format!("{name} must not be empty")));
        }

        let variables = serde_json::to_value(&input)
            .map_err(|error| invalid_input(format!("Invalid input: {error}")))?;
        info!(query = self.query.name, "Running business query");
        debug!(%variables);

        match self
            .client
            .execute_query(self.query.document, Some(variables))
            .await
        {
            Ok(response) => Ok(graphql_result(self.heading, response)),
            Err(error) => {
                warn!(query = self.query.name, %error, "Business query failed");
                Ok(failure(error))
            }
        }
    }
}

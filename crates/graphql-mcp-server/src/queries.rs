//! Hand-written documents for the business tools

/// A named document sent to the endpoint as-is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusinessQuery {
    pub name: &'static str,
    pub document: &'static str,
}

pub const GET_CUSTOMER_ORDER: BusinessQuery = BusinessQuery {
    name: "GetCustomerOrder",
    document: include_str!("queries/get_customer_order.graphql"),
};

pub const GET_PRICE_PROPOSAL: BusinessQuery = BusinessQuery {
    name: "GetPriceProposal",
    document: include_str!("queries/get_price_proposal.graphql"),
};

pub const GET_DEAL_WITH_FUNDING_NODES: BusinessQuery = BusinessQuery {
    name: "GetDealWithFundingNodes",
    document: include_str!("queries/get_deal_with_funding_nodes.graphql"),
};

pub const GET_ORDER_AUTHOR_DETAILS: BusinessQuery = BusinessQuery {
    name: "GetOrderAuthorDetails",
    document: include_str!("queries/get_order_author_details.graphql"),
};

/// Liveness probe for the endpoint
pub const HEARTBEAT: BusinessQuery = BusinessQuery {
    name: "Heartbeat",
    document: include_str!("queries/heartbeat.graphql"),
};

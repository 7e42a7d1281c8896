use crate::graphql::GraphQLError;
use reqwest::StatusCode;
use tokio::task::JoinError;

/// A required setting is absent or unusable
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required configuration: {0}")]
    Missing(&'static str),

    #[error("Invalid configuration for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// A failure to obtain an access token
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Missing OAuth credential: {0}")]
    MissingCredentials(&'static str),

    #[error("Network error requesting access token: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Authentication failed with status {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("Token response did not contain an access_token")]
    MissingAccessToken,

    #[error("Could not decode token response: {0}")]
    InvalidResponse(#[from] serde_json::Error),
}

/// A failure to get a response from the GraphQL endpoint
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("Network error sending GraphQL request: {0}")]
    Http(#[from] reqwest::Error),

    #[error("GraphQL endpoint responded with status {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("Invalid GraphQL response: {0}")]
    InvalidResponse(String),
}

/// The GraphQL endpoint answered with errors and no data
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("GraphQL request failed: {}", join_messages(.errors))]
pub struct GraphQLResponseError {
    pub errors: Vec<GraphQLError>,
}

fn join_messages(errors: &[GraphQLError]) -> String {
    errors
        .iter()
        .map(|error| error.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// A failure to load the schema through introspection
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    GraphQL(#[from] GraphQLResponseError),

    #[error("Introspection response did not contain a schema")]
    MissingSchema,

    #[error("Could not decode introspection result: {0}")]
    Decode(#[from] serde_json::Error),
}

/// An error in server initialization
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Could not build HTTP client: {0}")]
    HttpClient(reqwest::Error),

    #[error("Could not bind listener: {0}")]
    Io(#[from] std::io::Error),

    #[error("MCP service failed to initialize: {0}")]
    Initialize(String),

    #[error("Failed to start server")]
    StartupError(#[from] JoinError),
}

/// An MCP tool error
pub type McpError = rmcp::model::ErrorData;

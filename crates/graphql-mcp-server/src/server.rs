//! Server construction and transports

mod running;

use crate::auth::{ClientCredentials, TokenProvider};
use crate::errors::ServerError;
use crate::graphql::GraphQLClient;
use crate::schema_cache::SchemaCache;
use bon::bon;
use rmcp::ServiceExt as _;
use rmcp::transport::stdio;
use rmcp::transport::streamable_http_server::StreamableHttpService;
use rmcp::transport::streamable_http_server::session::local::LocalSessionManager;
use running::Running;
use serde::Deserialize;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use url::Url;

/// How the MCP client talks to the server
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Transport {
    /// JSON-RPC over standard input and output
    #[default]
    Stdio,

    /// Streamable HTTP, served under `/mcp`
    StreamableHttp {
        #[serde(default = "defaults::address")]
        address: IpAddr,

        #[serde(default = "defaults::port")]
        port: u16,
    },
}

mod defaults {
    use std::net::{IpAddr, Ipv4Addr};

    pub(super) const fn address() -> IpAddr {
        IpAddr::V4(Ipv4Addr::LOCALHOST)
    }

    pub(super) const fn port() -> u16 {
        5000
    }
}

/// The GraphQL MCP server
pub struct Server {
    transport: Transport,
    endpoint: Url,
    credentials: ClientCredentials,
    timeout: Duration,
}

#[bon]
impl Server {
    #[builder]
    pub fn new(
        #[builder(default)] transport: Transport,
        endpoint: Url,
        credentials: ClientCredentials,
        #[builder(default = Duration::from_secs(30))] timeout: Duration,
    ) -> Self {
        Self {
            transport,
            endpoint,
            credentials,
            timeout,
        }
    }

    /// Serve until the client disconnects or, for HTTP, until a shutdown signal arrives
    pub async fn start(self) -> Result<(), ServerError> {
        let http = reqwest::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(ServerError::HttpClient)?;
        let tokens = Arc::new(TokenProvider::new(http.clone(), self.credentials));
        let client = GraphQLClient::new(http, self.endpoint, tokens);
        let schema = Arc::new(SchemaCache::new(client.clone()));

        tokio::spawn({
            let schema = schema.clone();
            async move {
                if let Err(error) = schema.schema().await {
                    warn!(%error, "Could not load the schema at startup; it will be loaded on first use");
                }
            }
        });

        let running = Running::new(client, schema);
        match self.transport {
            Transport::StreamableHttp { address, port } => {
                info!(port = ?port, address = ?address, "Starting MCP server in Streamable HTTP mode");
                let listen_address = SocketAddr::new(address, port);
                let service = StreamableHttpService::new(
                    move || Ok(running.clone()),
                    LocalSessionManager::default().into(),
                    Default::default(),
                );
                let router = axum::Router::new().nest_service("/mcp", service);
                let tcp_listener = tokio::net::TcpListener::bind(listen_address).await?;

                let cancellation_token = CancellationToken::new();
                tokio::spawn({
                    let cancellation_token = cancellation_token.clone();
                    async move {
                        shutdown_signal().await;
                        cancellation_token.cancel();
                    }
                });
                if let Err(e) = axum::serve(tcp_listener, router)
                    .with_graceful_shutdown(async move { cancellation_token.cancelled().await })
                    .await
                {
                    error!("Failed to serve MCP over HTTP: {e:?}");
                    return Err(ServerError::Io(e));
                }
                info!("MCP server stopped");
            }
            Transport::Stdio => {
                info!("Starting MCP server in stdio mode");
                let service = running
                    .serve(stdio())
                    .await
                    .inspect_err(|e| {
                        error!("serving error: {:?}", e);
                    })
                    .map_err(|e| ServerError::Initialize(e.to_string()))?;
                service.waiting().await.map_err(ServerError::StartupError)?;
            }
        }

        Ok(())
    }
}

/// Resolves on Ctrl-C, or SIGTERM on unix
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = tokio::signal::ctrl_c().await {
            error!(%error, "Failed to install Ctrl-C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                error!(%error, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

use clap::Parser;
use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use graphql_mcp_server::server::Server;
use std::path::PathBuf;
use tracing::{Level, info};

mod runtime;

/// Clap styling
const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

/// Arguments to the MCP server
#[derive(Debug, clap::Parser)]
#[command(
    version,
    styles = STYLES,
    about = "GraphQL MCP Server - explore and query a GraphQL API from an AI agent",
)]
struct Args {
    /// Path to a YAML config file. Environment variables override its values.
    config: Option<PathBuf>,

    /// Override the configured log level
    #[arg(long = "log", short = 'l')]
    log_level: Option<Level>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => runtime::read_config(path)?,
        None => runtime::read_config_from_env()?,
    };
    if let Some(level) = args.log_level {
        config.logging.level = level;
    }

    let _guard = runtime::setup_logging(&config)?;

    info!(
        environment = %config.environment,
        "GraphQL MCP Server v{} starting",
        env!("CARGO_PKG_VERSION")
    );

    let (endpoint, credentials) = config.validate()?;
    info!(%endpoint, timeout = ?config.timeout, "Using GraphQL endpoint");

    Ok(Server::builder()
        .transport(config.transport)
        .endpoint(endpoint)
        .credentials(credentials)
        .timeout(config.timeout)
        .build()
        .start()
        .await?)
}

//! Runtime utilities
//!
//! This module is only used by the main binary and covers configuration loading and logging.

mod config;
mod logging;

use figment::{
    Figment,
    providers::{Env, Format, Yaml},
};
use std::path::Path;

pub use config::Config;
pub use logging::setup_logging;

/// Separator to use when drilling down into nested options in the env figment
const ENV_NESTED_SEPARATOR: &str = "__";

/// Prefix for environment variables that may set any option
const ENV_PREFIX: &str = "GRAPHQL_MCP_";

/// Read configuration from environment variables only (when no config file is provided)
#[allow(clippy::result_large_err)]
pub fn read_config_from_env() -> Result<Config, figment::Error> {
    Figment::new()
        .join(common_env())
        .join(Env::prefixed(ENV_PREFIX).split(ENV_NESTED_SEPARATOR))
        .extract()
}

/// Read in a config from a YAML file, filling in any missing values from the environment
#[allow(clippy::result_large_err)]
pub fn read_config(yaml_path: impl AsRef<Path>) -> Result<Config, figment::Error> {
    Figment::new()
        .join(common_env())
        .join(Env::prefixed(ENV_PREFIX).split(ENV_NESTED_SEPARATOR))
        .join(Yaml::file(yaml_path))
        .extract()
}

/// Figment provider mapping the conventional, unprefixed environment variables into the nested
/// structure of the config
fn common_env() -> Env {
    Env::raw()
        .only(&[
            "graphql_url",
            "auth_url",
            "client_id",
            "client_secret",
            "log_level",
            "node_env",
        ])
        .map(|key| match key.to_string().to_lowercase().as_str() {
            "graphql_url" => "endpoint".into(),
            "auth_url" => "auth:url".into(),
            "client_id" => "auth:client_id".into(),
            "client_secret" => "auth:client_secret".into(),
            "log_level" => "logging:level".into(),
            "node_env" => "environment".into(),

            // Unreachable given the `only` filter above
            other => other.to_string().into(),
        })
        .split(":")
}

use super::logging::Logging;
use graphql_mcp_server::auth::ClientCredentials;
use graphql_mcp_server::errors::ConfigError;
use graphql_mcp_server::server::Transport;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::fmt;
use std::time::Duration;
use url::Url;

/// Configuration for the MCP server
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// The GraphQL endpoint to query
    pub endpoint: Option<Url>,

    /// OAuth client credentials
    pub auth: AuthConfig,

    /// Deadline for each outbound request
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,

    /// The deployment environment
    pub environment: Environment,

    /// Logging configuration
    pub logging: Logging,

    /// The type of server transport to use
    pub transport: Transport,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: None,
            auth: AuthConfig::default(),
            timeout: defaults::timeout(),
            environment: Environment::default(),
            logging: Logging::default(),
            transport: Transport::default(),
        }
    }
}

/// Client credentials for the token endpoint
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// The token endpoint
    pub url: Option<Url>,

    #[serde(deserialize_with = "parsers::optional_string")]
    pub client_id: Option<String>,

    #[serde(deserialize_with = "parsers::optional_secret")]
    pub client_secret: Option<SecretString>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[serde(alias = "prod")]
    Production,
    Test,
    /// Also used for any environment name that is not recognized
    #[default]
    #[serde(alias = "dev", other)]
    Development,
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Environment::Development => "development",
            Environment::Production => "production",
            Environment::Test => "test",
        })
    }
}

impl Config {
    /// Check that everything needed to reach the API is present
    pub fn validate(&self) -> Result<(Url, ClientCredentials), ConfigError> {
        let endpoint = self
            .endpoint
            .clone()
            .ok_or(ConfigError::Missing("GRAPHQL_URL"))?;
        let token_url = self
            .auth
            .url
            .clone()
            .ok_or(ConfigError::Missing("AUTH_URL"))?;
        let client_id = self
            .auth
            .client_id
            .clone()
            .filter(|id| !id.is_empty())
            .ok_or(ConfigError::Missing("CLIENT_ID"))?;
        let client_secret = self
            .auth
            .client_secret
            .clone()
            .filter(|secret| !secret.expose_secret().is_empty())
            .ok_or(ConfigError::Missing("CLIENT_SECRET"))?;

        if self.timeout.is_zero() {
            return Err(ConfigError::Invalid {
                key: "timeout",
                reason: "must be greater than zero".to_string(),
            });
        }

        Ok((
            endpoint,
            ClientCredentials {
                token_url,
                client_id,
                client_secret,
            },
        ))
    }
}

mod defaults {
    use std::time::Duration;

    pub(super) const fn timeout() -> Duration {
        Duration::from_secs(30)
    }
}

mod parsers {
    use secrecy::SecretString;
    use serde::{Deserialize, Deserializer};

    /// Environment values that look numeric arrive as numbers
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Text(String),
        Unsigned(u64),
        Signed(i64),
        Float(f64),
    }

    pub(super) fn optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(
            Option::<Scalar>::deserialize(deserializer)?.map(|scalar| match scalar {
                Scalar::Text(text) => text,
                Scalar::Unsigned(number) => number.to_string(),
                Scalar::Signed(number) => number.to_string(),
                Scalar::Float(number) => number.to_string(),
            }),
        )
    }

    pub(super) fn optional_secret<'de, D>(
        deserializer: D,
    ) -> Result<Option<SecretString>, D::Error>
    where
        D: Deserializer<'de>,
    {
        optional_string(deserializer).map(|secret| secret.map(SecretString::from))
    }
}

//! Logging config and setup
//!
//! MCP frames travel over stdout in stdio mode, so logs go to stderr or to a rolling file.

mod defaults;
mod log_rotation_kind;

use super::config::{Config, Environment};
use log_rotation_kind::LogRotationKind;
use serde::{Deserialize, Deserializer, de::Error as _};
use std::path::{Path, PathBuf};
use tracing::{Level, Subscriber};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Logging related options
#[derive(Debug, Deserialize)]
pub struct Logging {
    /// The log level to use for tracing
    #[serde(default = "defaults::log_level", deserialize_with = "level")]
    pub level: Level,

    /// Directory for log files. Logs go to stderr when unset.
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// Log file rotation period when a path is set
    #[serde(default = "defaults::default_rotation")]
    pub rotation: LogRotationKind,
}

impl Default for Logging {
    fn default() -> Self {
        Self {
            level: defaults::log_level(),
            path: None,
            rotation: defaults::default_rotation(),
        }
    }
}

fn level<'de, D>(deserializer: D) -> Result<Level, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    raw.trim()
        .parse()
        .map_err(|_| D::Error::custom(format!("unknown log level '{raw}'")))
}

/// Install the global subscriber. Production logs are JSON lines.
///
/// The returned guard flushes the file writer when dropped and must be held until exit.
pub fn setup_logging(config: &Config) -> Result<Option<WorkerGuard>, anyhow::Error> {
    let mut env_filter = EnvFilter::from_default_env().add_directive(config.logging.level.into());
    if config.logging.level == Level::INFO {
        env_filter = env_filter.add_directive("rmcp=warn".parse()?);
    }

    let json = config.environment == Environment::Production;
    let (writer, guard, with_ansi) = match &config.logging.path {
        Some(path) => match file_writer(path, config.logging.rotation.clone()) {
            Ok((writer, guard)) => (writer, Some(guard), false),
            Err(error) => {
                eprintln!("Log file setup failed ({error}) - falling back to stderr");
                (BoxMakeWriter::new(std::io::stderr), None, true)
            }
        },
        None => (BoxMakeWriter::new(std::io::stderr), None, true),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer(writer, with_ansi && !json, json))
        .init();

    Ok(guard)
}

fn file_writer(
    path: &Path,
    rotation: LogRotationKind,
) -> Result<(BoxMakeWriter, WorkerGuard), anyhow::Error> {
    std::fs::create_dir_all(path)?;
    let appender = RollingFileAppender::builder()
        .rotation(rotation.into())
        .filename_prefix("graphql_mcp_server")
        .filename_suffix("log")
        .build(path)?;
    let (non_blocking, guard) = tracing_appender::non_blocking(appender);
    Ok((BoxMakeWriter::new(non_blocking), guard))
}

fn fmt_layer<S>(
    writer: BoxMakeWriter,
    with_ansi: bool,
    json: bool,
) -> Box<dyn Layer<S> + Send + Sync>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    let layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_ansi(with_ansi)
        .with_target(false);
    if json {
        layer.json().boxed()
    } else {
        layer.boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn levels_parse_case_insensitively() {
        let logging: Logging = serde_json::from_value(json!({ "level": "DEBUG" })).unwrap();

        assert_eq!(logging.level, Level::DEBUG);
        assert_eq!(logging.rotation, LogRotationKind::Daily);
        assert!(logging.path.is_none());
    }

    #[test]
    fn unknown_levels_are_rejected() {
        let error = serde_json::from_value::<Logging>(json!({ "level": "loud" })).unwrap_err();

        assert!(error.to_string().contains("unknown log level 'loud'"));
    }
}

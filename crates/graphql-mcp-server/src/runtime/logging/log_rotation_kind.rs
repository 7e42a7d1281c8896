use serde::Deserialize;
use tracing_appender::rolling::Rotation;

/// How often the log file rolls over
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogRotationKind {
    #[serde(alias = "MINUTELY")]
    Minutely,
    #[serde(alias = "HOURLY")]
    Hourly,
    #[serde(alias = "DAILY")]
    Daily,
    #[serde(alias = "NEVER")]
    Never,
}

impl From<LogRotationKind> for Rotation {
    fn from(value: LogRotationKind) -> Self {
        match value {
            LogRotationKind::Minutely => Rotation::MINUTELY,
            LogRotationKind::Hourly => Rotation::HOURLY,
            LogRotationKind::Daily => Rotation::DAILY,
            LogRotationKind::Never => Rotation::NEVER,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::LogRotationKind;
    use rstest::rstest;
    use tracing_appender::rolling::Rotation;

    #[rstest]
    #[case("minutely", Rotation::MINUTELY)]
    #[case("HOURLY", Rotation::HOURLY)]
    #[case("daily", Rotation::DAILY)]
    #[case("never", Rotation::NEVER)]
    fn parses_and_maps_to_rotation(#[case] raw: &str, #[case] expected: Rotation) {
        let kind: LogRotationKind = serde_json::from_value(serde_json::json!(raw)).unwrap();

        assert_eq!(Rotation::from(kind), expected);
    }
}

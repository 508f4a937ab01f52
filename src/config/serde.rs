use super::{ConfigError, SessionConfig};
use duration_string::DurationString;
use serde::{Deserialize, Serialize};

/// A serializable session configuration.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SerializableSessionConfig {
    timeout: Option<DurationString>,
    connect_timeout: Option<DurationString>,
    user_agent: Option<String>,
}

impl SerializableSessionConfig {
    /// Parses a configuration in TOML.
    pub fn from_toml(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    /// Compiles a configuration filling missing fields with defaults.
    pub fn compile(self) -> SessionConfig {
        let mut config = SessionConfig::default();

        if let Some(timeout) = self.timeout.as_deref().copied() {
            config = config.set_timeout(timeout);
        }

        if let Some(timeout) = self.connect_timeout.as_deref().copied() {
            config = config.set_connect_timeout(timeout);
        }

        if let Some(user_agent) = self.user_agent {
            config = config.set_user_agent(user_agent);
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DEFAULT_CONNECT_TIMEOUT, DEFAULT_USER_AGENT};
    use core::time::Duration;
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    #[test]
    fn compile_empty() {
        assert_eq!(
            SerializableSessionConfig::from_toml("").unwrap().compile(),
            SessionConfig::default()
        );
    }

    #[test]
    fn compile_durations() {
        let config = SerializableSessionConfig::from_toml(indoc! {r#"
            timeout = "3s"
            user_agent = "foo"
        "#})
        .unwrap()
        .compile();

        assert_eq!(config.timeout(), Duration::from_secs(3));
        assert_eq!(config.connect_timeout(), DEFAULT_CONNECT_TIMEOUT);
        assert_eq!(config.user_agent(), "foo");
        assert_ne!(config.user_agent(), DEFAULT_USER_AGENT);
    }

    #[test]
    fn compile_milliseconds() {
        let config = SessionConfig::from_toml(indoc! {r#"
            connect_timeout = "250ms"
        "#})
        .unwrap();

        assert_eq!(config.connect_timeout(), Duration::from_millis(250));
    }

    #[test]
    fn reject_unknown_field() {
        assert!(matches!(
            SerializableSessionConfig::from_toml("max_redirects = 5"),
            Err(ConfigError::Toml(_))
        ));
    }
}

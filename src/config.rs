mod error;
mod serde;

pub use self::{error::ConfigError, serde::SerializableSessionConfig};
use core::time::Duration;

/// A default total timeout of a transfer.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
/// A default connection timeout.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
/// A maximum number of redirects followed by a transfer.
pub const MAX_REDIRECTS: usize = 2;
/// A default user agent.
pub const DEFAULT_USER_AGENT: &str = concat!("jarcurl/", env!("CARGO_PKG_VERSION"));

/// A session configuration.
///
/// The options here are applied to the transport handle once when a session
/// is constructed and stay fixed for its lifetime.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SessionConfig {
    timeout: Duration,
    connect_timeout: Duration,
    user_agent: String,
}

impl SessionConfig {
    /// Creates a session configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a session configuration in TOML.
    pub fn from_toml(source: &str) -> Result<Self, ConfigError> {
        Ok(SerializableSessionConfig::from_toml(source)?.compile())
    }

    /// Returns a total timeout.
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns a connection timeout.
    pub const fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }

    /// Returns a user agent.
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Sets a total timeout.
    pub const fn set_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets a connection timeout.
    pub const fn set_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Sets a user agent.
    pub fn set_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_timeouts() {
        let config = SessionConfig::default();

        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert_eq!(config.connect_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn set_options() {
        let config = SessionConfig::new()
            .set_timeout(Duration::from_millis(100))
            .set_connect_timeout(Duration::from_millis(50))
            .set_user_agent("foo");

        assert_eq!(config.timeout(), Duration::from_millis(100));
        assert_eq!(config.connect_timeout(), Duration::from_millis(50));
        assert_eq!(config.user_agent(), "foo");
    }
}

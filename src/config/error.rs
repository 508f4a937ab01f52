use core::error::Error;
use core::fmt;
use core::fmt::Display;
use core::fmt::Formatter;

/// A configuration error.
#[derive(Debug)]
pub enum ConfigError {
    /// An invalid header name.
    HttpInvalidHeaderName(http::header::InvalidHeaderName),
    /// An invalid header value.
    HttpInvalidHeaderValue(http::header::InvalidHeaderValue),
    /// A malformed TOML document.
    Toml(toml::de::Error),
}

impl Display for ConfigError {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::HttpInvalidHeaderName(error) => {
                write!(formatter, "{error}")
            }
            ConfigError::HttpInvalidHeaderValue(error) => {
                write!(formatter, "{error}")
            }
            ConfigError::Toml(error) => {
                write!(formatter, "{error}")
            }
        }
    }
}

impl Error for ConfigError {}

impl From<http::header::InvalidHeaderName> for ConfigError {
    fn from(error: http::header::InvalidHeaderName) -> Self {
        Self::HttpInvalidHeaderName(error)
    }
}

impl From<http::header::InvalidHeaderValue> for ConfigError {
    fn from(error: http::header::InvalidHeaderValue) -> Self {
        Self::HttpInvalidHeaderValue(error)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(error: toml::de::Error) -> Self {
        Self::Toml(error)
    }
}

use core::{
    error::Error,
    fmt::{self, Display, Formatter},
};

/// A kind of transfer failure.
///
/// Codes follow the libcurl error numbers so that they stay stable across
/// transport implementations.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TransferErrorKind {
    /// A URL is missing or malformed.
    UrlMalformat,
    /// A connection to a host failed.
    CouldntConnect,
    /// A local file to upload could not be read.
    ReadError,
    /// A transfer or connection timed out.
    OperationTimedout,
    /// More redirects were issued than allowed.
    TooManyRedirects,
    /// Sending a request failed.
    SendError,
    /// Receiving a response failed.
    RecvError,
}

impl TransferErrorKind {
    /// Returns a numeric error code.
    pub const fn code(self) -> u32 {
        match self {
            Self::UrlMalformat => 3,
            Self::CouldntConnect => 7,
            Self::ReadError => 26,
            Self::OperationTimedout => 28,
            Self::TooManyRedirects => 47,
            Self::SendError => 55,
            Self::RecvError => 56,
        }
    }
}

impl Display for TransferErrorKind {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::UrlMalformat => write!(formatter, "malformed URL"),
            Self::CouldntConnect => write!(formatter, "could not connect"),
            Self::ReadError => write!(formatter, "read error"),
            Self::OperationTimedout => write!(formatter, "operation timed out"),
            Self::TooManyRedirects => write!(formatter, "too many redirects"),
            Self::SendError => write!(formatter, "send error"),
            Self::RecvError => write!(formatter, "receive error"),
        }
    }
}

/// A transfer failure captured by a session.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TransferError {
    kind: TransferErrorKind,
    message: String,
}

impl TransferError {
    /// Creates a transfer error.
    pub fn new(kind: TransferErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Returns a kind.
    pub const fn kind(&self) -> TransferErrorKind {
        self.kind
    }

    /// Returns a numeric code.
    pub const fn code(&self) -> u32 {
        self.kind.code()
    }

    /// Returns a message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Error for TransferError {}

impl Display for TransferError {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}: {}", self.kind, self.message)
    }
}

impl From<reqwest::Error> for TransferError {
    fn from(error: reqwest::Error) -> Self {
        let kind = if error.is_builder() {
            TransferErrorKind::UrlMalformat
        } else if error.is_redirect() {
            TransferErrorKind::TooManyRedirects
        } else if error.is_timeout() {
            TransferErrorKind::OperationTimedout
        } else if error.is_connect() {
            TransferErrorKind::CouldntConnect
        } else if error.is_request() {
            TransferErrorKind::SendError
        } else {
            TransferErrorKind::RecvError
        };

        Self::new(kind, render_chain(&error))
    }
}

impl From<url::ParseError> for TransferError {
    fn from(error: url::ParseError) -> Self {
        Self::new(TransferErrorKind::UrlMalformat, error.to_string())
    }
}

impl From<std::io::Error> for TransferError {
    fn from(error: std::io::Error) -> Self {
        Self::new(TransferErrorKind::ReadError, error.to_string())
    }
}

fn render_chain(error: &dyn Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();

    while let Some(error) = source {
        message.push_str(": ");
        message.push_str(&error.to_string());
        source = error.source();
    }

    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn code() {
        assert_eq!(TransferErrorKind::UrlMalformat.code(), 3);
        assert_eq!(TransferErrorKind::OperationTimedout.code(), 28);
        assert_eq!(TransferErrorKind::TooManyRedirects.code(), 47);
    }

    #[test]
    fn display() {
        assert_eq!(
            TransferError::new(TransferErrorKind::CouldntConnect, "connection refused").to_string(),
            "could not connect: connection refused"
        );
    }

    #[test]
    fn convert_url_error() {
        let error = TransferError::from(url::Url::parse("foo").unwrap_err());

        assert_eq!(error.kind(), TransferErrorKind::UrlMalformat);
        assert!(!error.message().is_empty());
    }

    #[test]
    fn convert_io_error() {
        let error = TransferError::from(std::io::Error::from(std::io::ErrorKind::NotFound));

        assert_eq!(error.code(), 26);
    }
}

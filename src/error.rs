use core::error;
use core::fmt::{self, Display, Formatter};
use std::io;

/// An error on acquiring or releasing session resources.
#[derive(Debug)]
pub enum Error {
    /// A cookie jar file is malformed or unwritable.
    CookieJar(String),
    /// A file system operation failed.
    Io(io::Error),
    /// A transport handle could not be built.
    Resource(reqwest::Error),
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::CookieJar(_) => None,
            Self::Io(error) => Some(error),
            Self::Resource(error) => Some(error),
        }
    }
}

impl Display for Error {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::CookieJar(error) => write!(formatter, "invalid cookie jar: {error}"),
            Self::Io(error) => write!(formatter, "{error}"),
            Self::Resource(error) => write!(formatter, "failed to build transport handle: {error}"),
        }
    }
}

impl From<io::Error> for Error {
    fn from(error: io::Error) -> Self {
        Self::Io(error)
    }
}

impl From<reqwest::Error> for Error {
    fn from(error: reqwest::Error) -> Self {
        Self::Resource(error)
    }
}

use crate::config::ConfigError;
use http::{HeaderMap, HeaderName, HeaderValue};
use std::path::PathBuf;
use url::form_urlencoded::Serializer;

/// A field of a multipart POST body.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PostField {
    /// A text value.
    Text(String),
    /// A local file uploaded as a file part.
    File(PathBuf),
}

impl From<&str> for PostField {
    fn from(value: &str) -> Self {
        Self::Text(value.into())
    }
}

impl From<String> for PostField {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<PathBuf> for PostField {
    fn from(path: PathBuf) -> Self {
        Self::File(path)
    }
}

/// A POST body.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PostBody {
    /// A URL-encoded form body.
    Form(String),
    /// A `multipart/form-data` body encoded at transfer time.
    Multipart(Vec<(String, PostField)>),
}

/// A configuration of a single request.
///
/// An empty configuration describes a request without a URL, which fails at
/// transfer time.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RequestConfig {
    url: Option<String>,
    body: Option<PostBody>,
    basic_auth: Option<(String, String)>,
    headers: HeaderMap,
}

impl RequestConfig {
    /// Creates an empty request configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a URL.
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// Returns a POST body.
    pub const fn body(&self) -> Option<&PostBody> {
        self.body.as_ref()
    }

    /// Returns a username and password for Basic authentication.
    pub fn basic_auth(&self) -> Option<(&str, &str)> {
        self.basic_auth
            .as_ref()
            .map(|(username, password)| (username.as_str(), password.as_str()))
    }

    /// Returns headers.
    pub const fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Returns `true` if nothing is configured.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Sets a URL.
    ///
    /// The URL is not validated until transfer.
    pub fn set_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Sets Basic authentication credentials.
    pub fn set_basic_auth(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.basic_auth = Some((username.into(), password.into()));
        self
    }

    /// Sets a URL-encoded form body.
    pub fn set_form_post_data<K: AsRef<str>, V: AsRef<str>>(
        mut self,
        fields: impl IntoIterator<Item = (K, V)>,
    ) -> Self {
        self.body = Some(PostBody::Form(
            Serializer::new(String::new())
                .extend_pairs(fields)
                .finish(),
        ));
        self
    }

    /// Sets a multipart body.
    pub fn set_file_post_data<K: Into<String>, V: Into<PostField>>(
        mut self,
        fields: impl IntoIterator<Item = (K, V)>,
    ) -> Self {
        self.body = Some(PostBody::Multipart(
            fields
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        ));
        self
    }

    /// Merges headers into the current ones.
    ///
    /// Headers of the same names are overridden. Nothing is merged if any of
    /// the headers is invalid.
    pub fn set_headers<K: AsRef<str>, V: AsRef<str>>(
        mut self,
        headers: impl IntoIterator<Item = (K, V)>,
    ) -> Result<Self, ConfigError> {
        self.insert_headers(headers)?;
        Ok(self)
    }

    pub(crate) fn insert_headers<K: AsRef<str>, V: AsRef<str>>(
        &mut self,
        headers: impl IntoIterator<Item = (K, V)>,
    ) -> Result<(), ConfigError> {
        for (name, value) in parse_headers(headers)? {
            self.headers.insert(name, value);
        }

        Ok(())
    }
}

fn parse_headers<K: AsRef<str>, V: AsRef<str>>(
    headers: impl IntoIterator<Item = (K, V)>,
) -> Result<Vec<(HeaderName, HeaderValue)>, ConfigError> {
    headers
        .into_iter()
        .map(|(name, value)| {
            Ok((
                HeaderName::from_bytes(name.as_ref().as_bytes())?,
                HeaderValue::from_str(value.as_ref())?,
            ))
        })
        .collect()
}

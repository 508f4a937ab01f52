use crate::transfer_error::TransferError;
use core::time::Duration;
use http::{HeaderMap, StatusCode, Version, header::CONTENT_TYPE};
use url::Url;

/// Metadata of a response.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ResponseInfo {
    url: Url,
    status: StatusCode,
    version: Version,
    headers: HeaderMap,
    size_download: usize,
    total_time: Duration,
}

impl ResponseInfo {
    pub(crate) const fn new(
        url: Url,
        status: StatusCode,
        version: Version,
        headers: HeaderMap,
        size_download: usize,
        total_time: Duration,
    ) -> Self {
        Self {
            url,
            status,
            version,
            headers,
            size_download,
            total_time,
        }
    }

    /// Returns an effective URL after redirects.
    pub const fn url(&self) -> &Url {
        &self.url
    }

    /// Returns a status code.
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Returns an HTTP version.
    pub const fn version(&self) -> Version {
        self.version
    }

    /// Returns response headers.
    pub const fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Returns a content type.
    pub fn content_type(&self) -> Option<&str> {
        self.headers.get(CONTENT_TYPE)?.to_str().ok()
    }

    /// Returns a number of body bytes downloaded.
    pub const fn size_download(&self) -> usize {
        self.size_download
    }

    /// Returns a total time of a transfer.
    pub const fn total_time(&self) -> Duration {
        self.total_time
    }
}

/// An outcome of a single transfer.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Transfer {
    info: Option<ResponseInfo>,
    body: Option<Vec<u8>>,
    error: Option<TransferError>,
}

impl Transfer {
    pub(crate) const fn succeed(info: ResponseInfo, body: Vec<u8>) -> Self {
        Self {
            info: Some(info),
            body: Some(body),
            error: None,
        }
    }

    pub(crate) const fn fail(error: TransferError, info: Option<ResponseInfo>) -> Self {
        Self {
            info,
            body: None,
            error: Some(error),
        }
    }

    /// Returns response metadata.
    pub const fn info(&self) -> Option<&ResponseInfo> {
        self.info.as_ref()
    }

    /// Returns a response body.
    pub fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }

    /// Returns a transfer error.
    pub const fn error(&self) -> Option<&TransferError> {
        self.error.as_ref()
    }

    /// Returns an error code, which is `0` on success.
    pub fn error_no(&self) -> u32 {
        self.error.as_ref().map(TransferError::code).unwrap_or_default()
    }

    /// Returns `true` if a transfer succeeded.
    pub const fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transfer_error::TransferErrorKind;
    use http::HeaderValue;
    use pretty_assertions::assert_eq;

    fn build_info() -> ResponseInfo {
        ResponseInfo::new(
            Url::parse("https://foo.com").unwrap(),
            StatusCode::OK,
            Version::HTTP_11,
            [(CONTENT_TYPE, HeaderValue::from_static("text/plain"))]
                .into_iter()
                .collect(),
            3,
            Duration::from_millis(1),
        )
    }

    #[test]
    fn success() {
        let transfer = Transfer::succeed(build_info(), b"foo".to_vec());

        assert!(transfer.is_success());
        assert_eq!(transfer.body(), Some(&b"foo"[..]));
        assert_eq!(transfer.error_no(), 0);
        assert_eq!(
            transfer.info().and_then(ResponseInfo::content_type),
            Some("text/plain")
        );
    }

    #[test]
    fn failure() {
        let transfer = Transfer::fail(
            TransferError::new(TransferErrorKind::CouldntConnect, "refused"),
            None,
        );

        assert!(!transfer.is_success());
        assert_eq!(transfer.body(), None);
        assert_eq!(transfer.error_no(), 7);
    }

    #[test]
    fn empty() {
        let transfer = Transfer::default();

        assert_eq!(transfer.info(), None);
        assert_eq!(transfer.body(), None);
        assert_eq!(transfer.error(), None);
    }
}

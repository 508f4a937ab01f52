use crate::{
    config::{ConfigError, MAX_REDIRECTS, SessionConfig},
    cookie_jar::FileCookieJar,
    error::Error,
    request::{PostBody, PostField, RequestConfig},
    response::{ResponseInfo, Transfer},
    transfer_error::{TransferError, TransferErrorKind},
};
use alloc::sync::Arc;
use core::mem::take;
use http::header::CONTENT_TYPE;
use log::{debug, trace, warn};
use reqwest::{
    blocking::{Client, ClientBuilder, multipart::Form},
    redirect::Policy,
};
use std::{path::Path, time::Instant};
use tempfile::{Builder, TempPath};
use url::Url;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
const COOKIE_FILE_PREFIX: &str = "jarcurl-";
const COOKIE_FILE_SUFFIX: &str = ".json";

/// An HTTP session.
///
/// A session owns a transport handle and a cookie jar backed by a temporary
/// file. Both are reused by every transfer and released when the session is
/// closed or dropped.
///
/// A request is configured with the `set_*` methods and executed by
/// [`fire`](Self::fire), which clears the configuration afterwards while
/// cookies stay in the jar. Alternatively, [`send`](Self::send) executes a
/// request described by a [`RequestConfig`] without touching pending
/// configuration.
///
/// Transport failures never surface as `Err`. They are captured in a
/// [`Transfer`] and inspected with [`error`](Self::error) and
/// [`error_no`](Self::error_no).
#[derive(Debug)]
pub struct Session {
    handle: Client,
    cookie_jar: Arc<FileCookieJar>,
    cookie_file: TempPath,
    pending: RequestConfig,
    last: Option<Transfer>,
}

impl Session {
    /// Creates a session with a default configuration.
    pub fn new() -> Result<Self, Error> {
        Self::with_config(&SessionConfig::default())
    }

    /// Creates a session.
    pub fn with_config(config: &SessionConfig) -> Result<Self, Error> {
        let cookie_file = Builder::new()
            .prefix(COOKIE_FILE_PREFIX)
            .suffix(COOKIE_FILE_SUFFIX)
            .tempfile()?
            .into_temp_path();
        let cookie_jar = Arc::new(FileCookieJar::new(cookie_file.to_path_buf()));
        let handle = ClientBuilder::new()
            .http1_only()
            .redirect(Policy::limited(MAX_REDIRECTS))
            .cookie_provider(cookie_jar.clone())
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .user_agent(config.user_agent())
            .build()?;

        debug!(
            "created a session with a cookie jar at {}",
            cookie_file.display()
        );

        Ok(Self {
            handle,
            cookie_jar,
            cookie_file,
            pending: Default::default(),
            last: None,
        })
    }

    /// Sets a URL of the next request.
    pub fn set_url(&mut self, url: impl Into<String>) -> &mut Self {
        self.pending = take(&mut self.pending).set_url(url);
        self
    }

    /// Sets Basic authentication credentials of the next request.
    pub fn set_basic_auth(
        &mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> &mut Self {
        self.pending = take(&mut self.pending).set_basic_auth(username, password);
        self
    }

    /// Sets a URL-encoded form body of the next request.
    pub fn set_form_post_data<K: AsRef<str>, V: AsRef<str>>(
        &mut self,
        fields: impl IntoIterator<Item = (K, V)>,
    ) -> &mut Self {
        self.pending = take(&mut self.pending).set_form_post_data(fields);
        self
    }

    /// Sets a multipart body of the next request.
    pub fn set_file_post_data<K: Into<String>, V: Into<PostField>>(
        &mut self,
        fields: impl IntoIterator<Item = (K, V)>,
    ) -> &mut Self {
        self.pending = take(&mut self.pending).set_file_post_data(fields);
        self
    }

    /// Merges headers into ones of the next request.
    pub fn set_headers<K: AsRef<str>, V: AsRef<str>>(
        &mut self,
        headers: impl IntoIterator<Item = (K, V)>,
    ) -> Result<&mut Self, ConfigError> {
        self.pending.insert_headers(headers)?;
        Ok(self)
    }

    /// Executes a pending request and clears its configuration.
    pub fn fire(&mut self) -> &mut Self {
        self.last = None;
        let request = take(&mut self.pending);
        self.last = Some(self.send(&request));
        self
    }

    /// Executes a request.
    ///
    /// Cookies in memory are sent with the request and the whole jar is written
    /// to its file after the transfer.
    pub fn send(&mut self, request: &RequestConfig) -> Transfer {
        let transfer = self
            .execute(request)
            .unwrap_or_else(|error| Transfer::fail(error, None));

        if let Some(error) = transfer.error() {
            debug!("transfer failed: {error}");
        }

        if let Err(error) = self.cookie_jar.save() {
            warn!(
                "failed to save cookies to {}: {error}",
                self.cookie_file.display()
            );
        }

        transfer
    }

    /// Returns a pending request configuration.
    pub const fn request(&self) -> &RequestConfig {
        &self.pending
    }

    /// Returns an outcome of the last transfer.
    pub const fn transfer(&self) -> Option<&Transfer> {
        self.last.as_ref()
    }

    /// Returns response metadata of the last transfer.
    pub fn info(&self) -> Option<&ResponseInfo> {
        self.last.as_ref()?.info()
    }

    /// Returns a response body of the last transfer.
    pub fn body(&self) -> Option<&[u8]> {
        self.last.as_ref()?.body()
    }

    /// Returns an error of the last transfer.
    pub fn error(&self) -> Option<&TransferError> {
        self.last.as_ref()?.error()
    }

    /// Returns an error code of the last transfer, which is `0` on success.
    pub fn error_no(&self) -> Option<u32> {
        self.last.as_ref().map(Transfer::error_no)
    }

    /// Returns a cookie jar.
    pub fn cookie_jar(&self) -> &FileCookieJar {
        &self.cookie_jar
    }

    /// Returns a path of a cookie jar file.
    pub fn cookie_path(&self) -> &Path {
        &self.cookie_file
    }

    /// Returns a raw transport handle.
    ///
    /// Requests sent through the handle directly share the cookie jar in
    /// memory. Cookies they receive are kept and written to the jar file on
    /// the next [`fire`](Self::fire) or [`send`](Self::send).
    pub const fn handle(&self) -> &Client {
        &self.handle
    }

    /// Closes a session releasing its transport handle and removing its cookie
    /// jar file.
    ///
    /// Dropping a session releases the same resources but ignores errors.
    /// A closed session cannot be used anymore.
    ///
    /// ```compile_fail
    /// let mut session = jarcurl::Session::new()?;
    ///
    /// session.close()?;
    /// session.set_url("https://example.com").fire();
    /// # Ok::<(), jarcurl::Error>(())
    /// ```
    pub fn close(self) -> Result<(), Error> {
        let Self {
            handle,
            cookie_file,
            ..
        } = self;

        drop(handle);
        cookie_file.close()?;

        debug!("closed a session");

        Ok(())
    }

    fn execute(&self, request: &RequestConfig) -> Result<Transfer, TransferError> {
        let url = Url::parse(
            request
                .url()
                .ok_or_else(|| TransferError::new(TransferErrorKind::UrlMalformat, "no URL set"))?,
        )?;

        let mut builder = match request.body() {
            None => self.handle.get(url.clone()),
            Some(PostBody::Form(body)) => self
                .handle
                .post(url.clone())
                .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
                .body(body.clone()),
            Some(PostBody::Multipart(fields)) => {
                self.handle.post(url.clone()).multipart(build_form(fields)?)
            }
        };

        if let Some((username, password)) = request.basic_auth() {
            builder = builder.basic_auth(username, Some(password));
        }

        if !request.headers().is_empty() {
            builder = builder.headers(request.headers().clone());
        }

        trace!("sending a request to {url}");

        let start = Instant::now();
        let response = builder.send()?;
        let url = response.url().clone();
        let status = response.status();
        let version = response.version();
        let headers = response.headers().clone();

        trace!("got {status} response from {url}");

        let body = response.bytes();
        let total_time = start.elapsed();

        Ok(match body {
            Ok(body) => Transfer::succeed(
                ResponseInfo::new(url, status, version, headers, body.len(), total_time),
                body.to_vec(),
            ),
            Err(error) => Transfer::fail(
                error.into(),
                Some(ResponseInfo::new(
                    url, status, version, headers, 0, total_time,
                )),
            ),
        })
    }
}

fn build_form(fields: &[(String, PostField)]) -> Result<Form, TransferError> {
    fields
        .iter()
        .try_fold(Form::new(), |form, (name, field)| -> Result<_, TransferError> {
            Ok(match field {
                PostField::Text(value) => form.text(name.clone(), value.clone()),
                PostField::File(path) => form.file(name.clone(), path)?,
            })
        })
}

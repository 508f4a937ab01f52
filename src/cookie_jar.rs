use crate::error::Error;
use cookie_store::{CookieStore, RawCookie};
use core::str;
use http::HeaderValue;
use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::{Path, PathBuf},
    sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
};
use url::Url;

/// A cookie jar backed by a file.
///
/// Cookies in memory are authoritative. A session writes them to the file
/// with [`save`](Self::save) after each transfer, and [`load`](Self::load)
/// restores them from a file written before.
#[derive(Debug)]
pub struct FileCookieJar {
    path: PathBuf,
    store: RwLock<CookieStore>,
}

impl FileCookieJar {
    /// Creates an empty cookie jar backed by a file at `path`.
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            store: Default::default(),
        }
    }

    /// Returns a path of a backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replaces cookies in memory with ones in a backing file.
    ///
    /// An empty file is an empty jar. Expired cookies are dropped.
    pub fn load(&self) -> Result<(), Error> {
        let file = File::open(&self.path)?;

        let store = if file.metadata()?.len() == 0 {
            CookieStore::default()
        } else {
            cookie_store::serde::json::load(BufReader::new(file))
                .map_err(|error| Error::CookieJar(error.to_string()))?
        };

        *self.write() = store;

        Ok(())
    }

    /// Writes all cookies including session ones into a backing file.
    pub fn save(&self) -> Result<(), Error> {
        let mut writer = BufWriter::new(File::create(&self.path)?);

        cookie_store::serde::json::save_incl_expired_and_nonpersistent(&self.read(), &mut writer)
            .map_err(|error| Error::CookieJar(error.to_string()))?;
        writer.flush()?;

        Ok(())
    }

    /// Returns names and values of cookies to be sent to a URL.
    pub fn cookies(&self, url: &Url) -> Vec<(String, String)> {
        self.read()
            .get_request_values(url)
            .map(|(name, value)| (name.into(), value.into()))
            .collect()
    }

    /// Removes all cookies in memory.
    pub fn clear(&self) {
        self.write().clear();
    }

    fn read(&self) -> RwLockReadGuard<'_, CookieStore> {
        self.store.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, CookieStore> {
        self.store.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl reqwest::cookie::CookieStore for FileCookieJar {
    fn set_cookies(&self, cookie_headers: &mut dyn Iterator<Item = &HeaderValue>, url: &Url) {
        let cookies = cookie_headers
            .filter_map(|value| str::from_utf8(value.as_bytes()).ok())
            .filter_map(|value| RawCookie::parse(value.to_owned()).ok())
            .collect::<Vec<_>>();

        self.write().store_response_cookies(cookies.into_iter(), url);
    }

    fn cookies(&self, url: &Url) -> Option<HeaderValue> {
        let value = self
            .read()
            .get_request_values(url)
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join("; ");

        if value.is_empty() {
            None
        } else {
            HeaderValue::from_str(&value).ok()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use reqwest::cookie::CookieStore as _;
    use std::fs;
    use tempfile::NamedTempFile;

    fn set_cookie(jar: &FileCookieJar, url: &Url, value: &'static str) {
        jar.set_cookies(&mut [HeaderValue::from_static(value)].iter(), url);
    }

    #[test]
    fn store_cookies() {
        let jar = FileCookieJar::new(NamedTempFile::new().unwrap().path().into());
        let url = Url::parse("http://foo.com/").unwrap();

        set_cookie(&jar, &url, "a=1; Path=/");
        set_cookie(&jar, &url, "b=2; Path=/");

        let mut cookies = FileCookieJar::cookies(&jar, &url);
        cookies.sort();

        assert_eq!(
            cookies,
            vec![
                ("a".to_owned(), "1".to_owned()),
                ("b".to_owned(), "2".to_owned())
            ]
        );
    }

    #[test]
    fn render_cookie_header() {
        let jar = FileCookieJar::new(NamedTempFile::new().unwrap().path().into());
        let url = Url::parse("http://foo.com/").unwrap();

        assert_eq!(reqwest::cookie::CookieStore::cookies(&jar, &url), None);

        set_cookie(&jar, &url, "a=1");

        assert_eq!(
            reqwest::cookie::CookieStore::cookies(&jar, &url),
            Some(HeaderValue::from_static("a=1"))
        );
    }

    #[test]
    fn skip_other_hosts() {
        let jar = FileCookieJar::new(NamedTempFile::new().unwrap().path().into());

        set_cookie(&jar, &Url::parse("http://foo.com/").unwrap(), "a=1");

        assert!(FileCookieJar::cookies(&jar, &Url::parse("http://bar.com/").unwrap()).is_empty());
    }

    #[test]
    fn load_empty_file() {
        let file = NamedTempFile::new().unwrap();
        let jar = FileCookieJar::new(file.path().into());
        let url = Url::parse("http://foo.com/").unwrap();

        set_cookie(&jar, &url, "a=1");
        jar.load().unwrap();

        assert!(FileCookieJar::cookies(&jar, &url).is_empty());
    }

    #[test]
    fn save_and_load_session_cookies() {
        let file = NamedTempFile::new().unwrap();
        let url = Url::parse("http://foo.com/").unwrap();

        let jar = FileCookieJar::new(file.path().into());
        set_cookie(&jar, &url, "a=1");
        jar.save().unwrap();

        assert!(fs::read_to_string(file.path()).unwrap().contains("a=1"));

        let other = FileCookieJar::new(file.path().into());
        other.load().unwrap();

        assert_eq!(
            FileCookieJar::cookies(&other, &url),
            vec![("a".to_owned(), "1".to_owned())]
        );
    }

    #[test]
    fn fail_to_load_broken_file() {
        let file = NamedTempFile::new().unwrap();
        fs::write(file.path(), "{").unwrap();

        assert!(matches!(
            FileCookieJar::new(file.path().into()).load(),
            Err(Error::CookieJar(_))
        ));
    }

    #[test]
    fn clear() {
        let jar = FileCookieJar::new(NamedTempFile::new().unwrap().path().into());
        let url = Url::parse("http://foo.com/").unwrap();

        set_cookie(&jar, &url, "a=1");
        jar.clear();

        assert!(FileCookieJar::cookies(&jar, &url).is_empty());
    }
}

//! Page fetch for checks.
//!
//! One HTTP GET per check through the curl crate (libcurl), with a hard
//! timeout and no retries, followed by best-effort HTML extraction of the
//! SEO fields we record.

mod parse;

pub use parse::parse_html;

use std::time::Duration;

use crate::error::FetchError;

/// Default total timeout for a check request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Largest response body read for a check. Larger bodies abort the transfer.
pub const DEFAULT_MAX_BODY_BYTES: usize = 4 * 1024 * 1024;

/// Fields extracted from one fetched page. Absent elements are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageMetadata {
    /// Final HTTP status (after redirects).
    pub status_code: u32,
    pub h1: String,
    pub title: String,
    pub description: String,
}

/// Something that can fetch a page and extract its metadata.
///
/// Implementations block; the repository calls them from `spawn_blocking`.
pub trait PageFetcher: Send + Sync + 'static {
    fn fetch(&self, url: &str) -> Result<PageMetadata, FetchError>;
}

/// Curl-backed fetcher used outside of tests.
#[derive(Debug, Clone)]
pub struct CurlFetcher {
    timeout: Duration,
    user_agent: Option<String>,
    max_body_bytes: usize,
}

impl Default for CurlFetcher {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT)
    }
}

impl CurlFetcher {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            user_agent: None,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }

    /// Sends `User-Agent: <ua>` with every request.
    pub fn with_user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Fails the fetch with a write error once the body exceeds `max` bytes.
    pub fn with_max_body_bytes(mut self, max: usize) -> Self {
        self.max_body_bytes = max;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl PageFetcher for CurlFetcher {
    fn fetch(&self, url: &str) -> Result<PageMetadata, FetchError> {
        let (status_code, body) = get(
            url,
            self.timeout,
            self.user_agent.as_deref(),
            self.max_body_bytes,
        )?;
        Ok(parse_html(status_code, &String::from_utf8_lossy(&body)))
    }
}

/// Fetches `url` with the default timeout and parses the response.
pub fn fetch_and_parse(url: &str) -> Result<PageMetadata, FetchError> {
    CurlFetcher::default().fetch(url)
}

/// Performs the GET and returns `(status, body)` for a 2xx final response.
///
/// Follows redirects. Runs in the current thread.
fn get(
    url: &str,
    timeout: Duration,
    user_agent: Option<&str>,
    max_body_bytes: usize,
) -> Result<(u32, Vec<u8>), FetchError> {
    let mut body: Vec<u8> = Vec::new();

    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    easy.get(true)?;
    easy.follow_location(true)?;
    easy.max_redirections(10)?;
    easy.timeout(timeout)?;
    // Empty string = every encoding libcurl was built with.
    easy.accept_encoding("")?;
    if let Some(ua) = user_agent {
        easy.useragent(ua)?;
    }

    {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| {
            if body.len() + data.len() > max_body_bytes {
                // Short write: libcurl aborts with CURLE_WRITE_ERROR.
                return Ok(0);
            }
            body.extend_from_slice(data);
            Ok(data.len())
        })?;
        transfer.perform()?;
    }

    let code = easy.response_code()?;
    if !(200..300).contains(&code) {
        return Err(FetchError::Status(code));
    }

    Ok((code, body))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_fetcher_uses_five_second_timeout() {
        assert_eq!(CurlFetcher::default().timeout(), Duration::from_secs(5));
        assert_eq!(CurlFetcher::default().max_body_bytes, DEFAULT_MAX_BODY_BYTES);
    }

    #[test]
    fn invalid_url_is_fetch_error() {
        let err = fetch_and_parse("http://[not-a-host").unwrap_err();
        assert!(matches!(err, FetchError::Transport(_)));
    }
}

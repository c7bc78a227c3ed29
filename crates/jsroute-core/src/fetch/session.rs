//! libcurl-backed session: one reused Easy handle, so connections and cookies persist.

use super::{Accept, FetchError, FetchResponse, Fetcher};
use anyhow::{Context, Result};
use std::time::Duration;

/// Headers sent with every request on top of the per-kind `Accept` set.
const PERSISTENT_HEADERS: &[&str] = &["Connection: keep-alive"];

pub struct CurlSession {
    easy: curl::easy::Easy,
}

impl CurlSession {
    /// Builds a session with the given User-Agent, redirects followed, all
    /// supported content encodings accepted and the in-memory cookie engine on.
    pub fn new(user_agent: &str) -> Result<Self> {
        let mut easy = curl::easy::Easy::new();
        easy.useragent(user_agent).context("set User-Agent")?;
        easy.follow_location(true)?;
        // Empty string: every encoding libcurl was built with (gzip, deflate, br).
        easy.accept_encoding("")?;
        // Empty file name enables the cookie engine without reading a jar.
        easy.cookie_file("")?;
        easy.connect_timeout(Duration::from_secs(15))?;
        Ok(Self { easy })
    }

    fn header_list(referer: Option<&str>, accept: Accept) -> Result<curl::easy::List, curl::Error> {
        let mut list = curl::easy::List::new();
        for h in PERSISTENT_HEADERS.iter().chain(accept.header_lines()) {
            list.append(h)?;
        }
        if let Some(r) = referer {
            list.append(&format!("Referer: {}", r.trim()))?;
        }
        Ok(list)
    }
}

impl Fetcher for CurlSession {
    fn get(
        &mut self,
        url: &str,
        referer: Option<&str>,
        timeout: Option<Duration>,
        accept: Accept,
    ) -> Result<FetchResponse, FetchError> {
        let mut body: Vec<u8> = Vec::new();

        self.easy.url(url)?;
        self.easy.get(true)?;
        // Zero disables the transfer timeout.
        self.easy.timeout(timeout.unwrap_or(Duration::ZERO))?;
        self.easy.http_headers(Self::header_list(referer, accept)?)?;

        {
            let mut transfer = self.easy.transfer();
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()?;
        }

        let status = self.easy.response_code()?;
        if status != 200 {
            return Err(FetchError::Http(status));
        }
        Ok(FetchResponse { status, body })
    }
}

//! HTTP GET for pages and scripts.
//!
//! The crawl only ever needs a blocking GET that returns the body bytes, so
//! the rest of the crate talks to a [`Fetcher`]. [`CurlSession`] is the real
//! implementation; tests substitute an in-memory site.

mod error;
mod session;

pub use error::FetchError;
pub use session::CurlSession;

use std::time::Duration;

/// Which `Accept` header set a request carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accept {
    /// HTML page fetch (link discovery).
    Page,
    /// Script download.
    Script,
}

impl Accept {
    /// Header lines (without the persistent ones) sent for this kind of request.
    pub fn header_lines(self) -> &'static [&'static str] {
        match self {
            Accept::Page => &[
                "Accept: text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
            ],
            Accept::Script => &[
                "Accept: text/javascript, application/javascript, */*; q=0.01",
                "Accept-Language: en-US,en;q=0.9",
            ],
        }
    }
}

/// A successful (HTTP 200) response.
#[derive(Debug, Clone)]
pub struct FetchResponse {
    pub status: u32,
    pub body: Vec<u8>,
}

impl FetchResponse {
    /// Body decoded as UTF-8, replacing invalid sequences.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Blocking HTTP GET with a session that persists headers and cookies across calls.
pub trait Fetcher {
    /// GET `url`. `timeout` of `None` means no transfer timeout.
    /// Any status other than 200 is returned as [`FetchError::Http`].
    fn get(
        &mut self,
        url: &str,
        referer: Option<&str>,
        timeout: Option<Duration>,
        accept: Accept,
    ) -> Result<FetchResponse, FetchError>;
}

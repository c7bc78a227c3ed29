//! Fetch error type.

/// Why a GET produced no usable body. Callers log it and move on.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Curl reported an error (timeout, connection, DNS, bad URL, etc.).
    #[error(transparent)]
    Curl(#[from] curl::Error),
    /// Response status was not 200.
    #[error("HTTP {0}")]
    Http(u32),
}

impl FetchError {
    /// True for transport-level failures where no response was received.
    pub fn is_network(&self) -> bool {
        matches!(self, FetchError::Curl(_))
    }
}

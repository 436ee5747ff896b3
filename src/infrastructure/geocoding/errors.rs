use thiserror::Error;

/// Failure of a single call to a geocoding or routing provider.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProviderError {
    /// No match for the address, or no route between the points.
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Service error: {0}")]
    Service(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Malformed response: {0}")]
    Malformed(String),
}

impl ProviderError {
    /// `NotFound` is a definitive answer; everything else may succeed on retry.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, Self::NotFound(_))
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_decode() {
            Self::Malformed(err.to_string())
        } else if err.status() == Some(reqwest::StatusCode::NOT_FOUND) {
            Self::NotFound(err.to_string())
        } else {
            Self::Service(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ProviderError {
    fn from(err: serde_json::Error) -> Self {
        Self::Malformed(err.to_string())
    }
}

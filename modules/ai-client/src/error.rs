use thiserror::Error;

pub type Result<T> = std::result::Result<T, UpstreamError>;

/// Failure of an outbound text-generation call.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("No credential configured for {0}")]
    NotConfigured(String),
}

impl From<reqwest::Error> for UpstreamError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            UpstreamError::MalformedResponse(err.to_string())
        } else {
            UpstreamError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for UpstreamError {
    fn from(err: serde_json::Error) -> Self {
        UpstreamError::MalformedResponse(err.to_string())
    }
}

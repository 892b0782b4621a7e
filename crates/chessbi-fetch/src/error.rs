//! Error types for chessbi-fetch.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    /// The server rejected the request; terminal for this call.
    #[error("API error {status}: {message}")]
    Remote { status: u16, message: String },

    /// `429` answers persisted through the whole attempt budget.
    #[error("API error 429: rate limit exceeded after {attempts} attempts")]
    RateLimited { attempts: u32 },

    #[error("network error after {attempts} attempts: {message}")]
    Network { attempts: u32, message: String },

    #[error("request failed: {0}")]
    Transport(String),

    #[error("unexpected response format from {url}: {reason}")]
    ResponseFormat { url: String, reason: String },

    #[error("max retries exhausted ({attempts} attempts)")]
    RetriesExhausted { attempts: u32 },

    #[error("invalid header value: {0}")]
    InvalidHeader(String),
}

impl FetchError {
    /// HTTP status associated with the failure, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Remote { status, .. } => Some(*status),
            FetchError::RateLimited { .. } => Some(429),
            _ => None,
        }
    }

    /// `true` when the failure says the remote service is unusable, as opposed
    /// to one response carrying a body that could not be interpreted.
    pub fn is_service_failure(&self) -> bool { !matches!(self, FetchError::ResponseFormat { .. }) }
}

pub type Result<T> = std::result::Result<T, FetchError>;

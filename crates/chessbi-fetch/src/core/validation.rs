/// Coarse classification of an HTTP status code for the retry state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    /// 2xx
    Success,
    /// 304; only a success when a validator was sent.
    NotModified,
    /// 429
    TooManyRequests,
    /// 5xx
    ServerError,
    /// 4xx other than 429
    ClientError,
    /// Anything else (1xx, 3xx other than 304, out of range).
    Unexpected,
}

impl StatusClass {
    /// Whether a response in this class may be retried.
    pub fn is_retryable(self) -> bool {
        matches!(self, StatusClass::TooManyRequests | StatusClass::ServerError)
    }
}

/// Classify a status code.
///
/// # Examples
///
/// ```
/// use chessbi_fetch::core::{classify_status, StatusClass};
///
/// assert_eq!(classify_status(200), StatusClass::Success);
/// assert_eq!(classify_status(304), StatusClass::NotModified);
/// assert_eq!(classify_status(429), StatusClass::TooManyRequests);
/// assert_eq!(classify_status(503), StatusClass::ServerError);
/// assert_eq!(classify_status(404), StatusClass::ClientError);
/// ```
pub fn classify_status(status: u16) -> StatusClass {
    match status {
        304 => StatusClass::NotModified,
        429 => StatusClass::TooManyRequests,
        200..=299 => StatusClass::Success,
        400..=499 => StatusClass::ClientError,
        500..=599 => StatusClass::ServerError,
        _ => StatusClass::Unexpected,
    }
}

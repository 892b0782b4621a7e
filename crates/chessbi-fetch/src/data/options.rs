use std::time::Duration;

/// Identification header sent when the caller does not provide one.
pub const DEFAULT_USER_AGENT: &str = "ChessBI (contact: unknown)";

/// Configuration for the fetch client.
///
/// # Examples
///
/// ```
/// use chessbi_fetch::ClientOptions;
/// use std::time::Duration;
///
/// let options = ClientOptions::default()
///     .user_agent("ChessBI (contact: me@example.com)")
///     .max_retries(3)
///     .backoff_base(Duration::from_millis(500));
/// assert_eq!(options.max_retries, 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientOptions {
    /// `User-Agent` header sent with every request.
    ///
    /// Default: `"ChessBI (contact: unknown)"`
    pub user_agent: String,

    /// Per-request timeout. A request exceeding it counts as a network
    /// failure and is retried.
    ///
    /// Default: 30s
    pub timeout: Duration,

    /// Maximum number of retry attempts for transient failures.
    ///
    /// - Includes only retries after the initial attempt
    /// - Retries are triggered for network errors, 429 and 5xx answers
    /// - Total attempts = 1 (initial) + max_retries
    ///
    /// Default: 5
    pub max_retries: u32,

    /// Base delay for exponential backoff between retries.
    ///
    /// The nominal delay before retry N (0-indexed) is `backoff_base * 2^N`,
    /// then jittered by up to ±25%.
    ///
    /// Default: 1s
    pub backoff_base: Duration,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            user_agent:   DEFAULT_USER_AGENT.to_string(),
            timeout:      Duration::from_secs(30),
            max_retries:  5,
            backoff_base: Duration::from_secs(1),
        }
    }
}

impl ClientOptions {
    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    #[must_use]
    pub fn backoff_base(mut self, backoff_base: Duration) -> Self {
        self.backoff_base = backoff_base;
        self
    }

    /// Total number of attempts a single logical fetch may make.
    pub fn max_attempts(&self) -> u32 { self.max_retries.saturating_add(1) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = ClientOptions::default();
        assert_eq!(options.user_agent, DEFAULT_USER_AGENT);
        assert_eq!(options.timeout, Duration::from_secs(30));
        assert_eq!(options.max_retries, 5);
        assert_eq!(options.backoff_base, Duration::from_secs(1));
        assert_eq!(options.max_attempts(), 6);
    }

    #[test]
    fn test_builder_chain() {
        let options = ClientOptions::default()
            .user_agent("ua")
            .timeout(Duration::from_secs(5))
            .max_retries(0)
            .backoff_base(Duration::ZERO);
        assert_eq!(options.user_agent, "ua");
        assert_eq!(options.timeout, Duration::from_secs(5));
        assert_eq!(options.max_attempts(), 1);
        assert_eq!(options.backoff_base, Duration::ZERO);
    }
}

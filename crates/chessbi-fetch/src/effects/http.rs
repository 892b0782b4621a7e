use std::future::Future;

use thiserror::Error;

use crate::data::HttpResponse;

/// Failure to obtain any HTTP response at all.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    /// Connection refused, DNS failure, timeout. Retried with backoff.
    #[error("network error: {0}")]
    Network(String),

    /// Any other transport failure. Never retried.
    #[error("transport error: {0}")]
    Transport(String),
}

/// Asynchronous HTTP client abstraction.
///
/// Implementations issue one GET and buffer the whole response. They do not
/// retry and do not interpret status codes; both are the [`Fetcher`]'s job.
///
/// # Implementations
///
/// - [`ReqwestClient`]: Production implementation using `reqwest`
/// - [`ScriptedClient`](crate::mock::ScriptedClient): canned responses for tests
///
/// [`Fetcher`]: crate::Fetcher
pub trait HttpClient: Send + Sync {
    /// Perform a single GET against `url` with the extra `headers`.
    fn get(
        &self,
        url: &str,
        headers: &[(String, String)],
    ) -> impl Future<Output = Result<HttpResponse, RequestError>> + Send;
}

#[cfg(feature = "reqwest")]
mod reqwest_impl {
    use super::*;
    use crate::data::ClientOptions;
    use crate::error::FetchError;
    use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT};

    /// Production HTTP client implementation using reqwest.
    ///
    /// Holds one connection pool for its whole lifetime; dropping it closes
    /// the pooled connections.
    pub struct ReqwestClient {
        client: reqwest::Client,
    }

    impl ReqwestClient {
        pub fn new(options: &ClientOptions) -> Result<Self, FetchError> {
            let mut headers = HeaderMap::new();
            headers.insert(
                USER_AGENT,
                HeaderValue::from_str(&options.user_agent)
                    .map_err(|e| FetchError::InvalidHeader(e.to_string()))?,
            );
            headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

            let client = reqwest::Client::builder()
                .default_headers(headers)
                .timeout(options.timeout)
                .build()
                .map_err(|e| FetchError::Transport(e.to_string()))?;
            Ok(Self { client })
        }
    }

    impl From<reqwest::Error> for RequestError {
        fn from(e: reqwest::Error) -> Self {
            if e.is_connect() || e.is_timeout() {
                RequestError::Network(e.to_string())
            } else {
                RequestError::Transport(e.to_string())
            }
        }
    }

    impl HttpClient for ReqwestClient {
        async fn get(
            &self,
            url: &str,
            headers: &[(String, String)],
        ) -> Result<HttpResponse, RequestError> {
            let mut request = self.client.get(url);

            for (key, value) in headers {
                request = request.header(key.as_str(), value.as_str());
            }

            let response = request.send().await?;
            let status = response.status().as_u16();
            let headers = response
                .headers()
                .iter()
                .filter_map(|(name, value)| {
                    value.to_str().ok().map(|v| (name.as_str().to_string(), v.to_string()))
                })
                .collect();
            let body = response.bytes().await?;

            Ok(HttpResponse {
                status,
                headers,
                body,
            })
        }
    }
}

#[cfg(feature = "reqwest")]
pub use reqwest_impl::ReqwestClient;

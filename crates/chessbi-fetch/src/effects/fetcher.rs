use std::time::Duration;

use tracing::{debug, warn};

use crate::core::{StatusClass, backoff_delay, classify_status, parse_retry_after};
use crate::data::{ClientOptions, FetchOutcome, HttpResponse, Validator};
use crate::effects::http::{HttpClient, RequestError};
use crate::error::{FetchError, Result};

/// Longest body prefix quoted in error messages.
const ERROR_BODY_LIMIT: usize = 200;

/// One transition of the retry state machine.
#[derive(Debug)]
enum Step {
    Done(FetchOutcome),
    Retry(Duration),
    Fail(FetchError),
}

/// Issues a logical GET, retrying transient failures within the configured
/// attempt budget.
pub struct Fetcher<C: HttpClient> {
    client:  C,
    options: ClientOptions,
}

impl<C: HttpClient> Fetcher<C> {
    pub fn new(client: C, options: ClientOptions) -> Self { Self { client, options } }

    pub fn options(&self) -> &ClientOptions { &self.options }

    pub fn client(&self) -> &C { &self.client }

    /// Give back the underlying client, ending this fetcher's use of it.
    pub fn into_client(self) -> C { self.client }

    /// Fetch `url`, sending `validator` as `If-None-Match` when present.
    ///
    /// Makes at most `max_retries + 1` attempts. Sleeps between attempts
    /// block this call; nothing else runs concurrently with the retries.
    pub async fn fetch(&self, url: &str, validator: Option<&Validator>) -> Result<FetchOutcome> {
        let validator = validator.filter(|v| !v.is_empty());
        let headers: Vec<(String, String)> = validator
            .map(|v| vec![("If-None-Match".to_string(), v.as_str().to_string())])
            .unwrap_or_default();

        for retry in 0..=self.options.max_retries {
            let step = match self.client.get(url, &headers).await {
                Ok(response) => self.on_response(url, response, validator.is_some(), retry),
                Err(err) => self.on_request_error(url, err, retry),
            };

            match step {
                Step::Done(outcome) => return Ok(outcome),
                Step::Fail(err) => return Err(err),
                Step::Retry(delay) => {
                    warn!(
                        url,
                        attempt = retry + 1,
                        delay_ms = delay.as_millis() as u64,
                        "transient failure, retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        }

        Err(FetchError::RetriesExhausted {
            attempts: self.options.max_attempts(),
        })
    }

    fn on_response(
        &self,
        url: &str,
        response: HttpResponse,
        validator_sent: bool,
        retry: u32,
    ) -> Step {
        let status = response.status;
        let class = classify_status(status);
        let can_retry = retry < self.options.max_retries;
        debug!(url, status, retryable = class.is_retryable(), "response received");

        match class {
            StatusClass::NotModified if validator_sent => Step::Done(FetchOutcome::Unchanged {
                validator: issued_validator(&response),
            }),
            StatusClass::TooManyRequests if can_retry => {
                let delay = response
                    .header_value("retry-after")
                    .and_then(parse_retry_after)
                    .unwrap_or_else(|| self.backoff(retry));
                Step::Retry(delay)
            }
            StatusClass::TooManyRequests => Step::Fail(FetchError::RateLimited {
                attempts: retry + 1,
            }),
            StatusClass::ServerError if can_retry => Step::Retry(self.backoff(retry)),
            StatusClass::ServerError => Step::Fail(FetchError::Remote {
                status,
                message: format!("server error after {retry} retries"),
            }),
            StatusClass::ClientError => Step::Fail(FetchError::Remote {
                status,
                message: format!("client error: {}", response.body_snippet(ERROR_BODY_LIMIT)),
            }),
            StatusClass::Success => {
                let validator = issued_validator(&response);
                Step::Done(FetchOutcome::Fresh {
                    body: response.body,
                    validator,
                })
            }
            StatusClass::NotModified | StatusClass::Unexpected => Step::Fail(FetchError::Remote {
                status,
                message: format!(
                    "unexpected status code: {}",
                    response.body_snippet(ERROR_BODY_LIMIT)
                ),
            }),
        }
    }

    fn on_request_error(&self, url: &str, err: RequestError, retry: u32) -> Step {
        match err {
            RequestError::Network(message) if retry < self.options.max_retries => {
                debug!(url, %message, "network failure");
                Step::Retry(self.backoff(retry))
            }
            RequestError::Network(message) => Step::Fail(FetchError::Network {
                attempts: retry + 1,
                message,
            }),
            RequestError::Transport(message) => Step::Fail(FetchError::Transport(message)),
        }
    }

    fn backoff(&self, retry: u32) -> Duration { backoff_delay(retry, self.options.backoff_base) }
}

fn issued_validator(response: &HttpResponse) -> Option<Validator> {
    response.header_value("etag").and_then(Validator::from_header)
}

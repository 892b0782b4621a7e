//! Resilient conditional HTTP GET.
//!
//! # Architecture
//!
//! This crate follows the three-layer pattern:
//! - [`data`] - Immutable configuration and types
//! - [`core`] - Pure transformations (backoff arithmetic, status classification)
//! - [`effects`] - I/O operations behind the [`HttpClient`] trait
//!
//! # Key Features
//!
//! - **Conditional Fetch**: an opaque [`Validator`] is sent as `If-None-Match`;
//!   a `304` answer becomes [`FetchOutcome::Unchanged`]
//! - **Bounded Retries**: `max_retries + 1` attempts at most, exponential backoff
//!   with ±25% jitter, `Retry-After` honoured for `429`
//! - **Typed Failures**: every terminal condition is a [`FetchError`] variant

pub mod core;
pub mod data;
mod effects;
mod error;

pub use core::{
    JITTER_FRACTION, StatusClass, backoff_delay, classify_status, jittered_delay,
    parse_retry_after, retry_delay,
};
pub use data::{ClientOptions, DEFAULT_USER_AGENT, FetchOutcome, HttpResponse, Validator};
pub use effects::{Fetcher, HttpClient, RequestError};

#[cfg(feature = "reqwest")]
pub use effects::ReqwestClient;

#[cfg(any(test, feature = "test-util"))]
pub use effects::mock;

pub use error::{FetchError, Result};

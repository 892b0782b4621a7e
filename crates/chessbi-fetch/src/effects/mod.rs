//! I/O operations for fetching.
//!
//! The retry loop lives in [`Fetcher`]; the wire is behind [`HttpClient`] so
//! the loop can be driven by a scripted client in tests.

mod fetcher;
mod http;
#[cfg(any(test, feature = "test-util"))]
pub mod mock;

pub use fetcher::Fetcher;
pub use http::{HttpClient, RequestError};

#[cfg(feature = "reqwest")]
pub use http::ReqwestClient;

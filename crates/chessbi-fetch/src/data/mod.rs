//! Immutable data types for fetch operations.

pub mod options;
pub mod outcome;
pub mod response;

pub use options::{ClientOptions, DEFAULT_USER_AGENT};
pub use outcome::{FetchOutcome, Validator};
pub use response::HttpResponse;

//! Pure transformations for the retry state machine.
//!
//! Nothing in here sleeps or touches the network; the effects layer feeds
//! responses through these functions and acts on the answers.

mod retry;
mod validation;

pub use retry::{JITTER_FRACTION, backoff_delay, jittered_delay, parse_retry_after, retry_delay};
pub use validation::{StatusClass, classify_status};

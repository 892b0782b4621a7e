//! Atomic file placement.
//!
//! Files are written to a uniquely named sibling temp file and renamed over
//! the destination, so readers observe either the previous content or the
//! complete new content.

mod atomic_write;
mod error;

pub use atomic_write::{AtomicWriteOptions, atomic_read, atomic_write};
pub use error::{Error, Result};

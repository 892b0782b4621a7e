use std::fmt;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Opaque cache validator (an `ETag` value) issued by the remote service.
///
/// Only ever compared for equality and echoed back; never parsed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Validator(String);

impl Validator {
    pub fn new(value: impl Into<String>) -> Self { Self(value.into()) }

    /// Build a validator from a header value; empty values carry no validator.
    pub fn from_header(value: &str) -> Option<Self> {
        (!value.is_empty()).then(|| Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str { &self.0 }

    pub fn is_empty(&self) -> bool { self.0.is_empty() }
}

impl fmt::Display for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

impl From<&str> for Validator {
    fn from(value: &str) -> Self { Self(value.to_string()) }
}

impl From<String> for Validator {
    fn from(value: String) -> Self { Self(value) }
}

/// Result of one logical fetch.
///
/// A missing `validator` means the server did not issue one; it never means
/// "forget the validator you already have".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Fresh {
        body:      Bytes,
        validator: Option<Validator>,
    },
    Unchanged {
        validator: Option<Validator>,
    },
}

impl FetchOutcome {
    pub fn validator(&self) -> Option<&Validator> {
        match self {
            FetchOutcome::Fresh { validator, .. } | FetchOutcome::Unchanged { validator } => {
                validator.as_ref()
            }
        }
    }

    pub fn is_unchanged(&self) -> bool { matches!(self, FetchOutcome::Unchanged { .. }) }
}

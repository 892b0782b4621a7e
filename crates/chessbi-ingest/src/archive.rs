use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

static MONTH_KEY_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}-\d{2}$").unwrap());

static ARCHIVE_MONTH_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/(?<year>\d{4})/(?<month>\d{2})$").unwrap());

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid month `{0}`, expected YYYY-MM")]
pub struct ParseMonthKeyError(pub String);

/// A `YYYY-MM` month key. Ordering is lexicographic, which for this fixed
/// width format is chronological.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MonthKey(String);

impl MonthKey {
    pub fn as_str(&self) -> &str { &self.0 }
}

impl FromStr for MonthKey {
    type Err = ParseMonthKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if MONTH_KEY_REGEX.is_match(s) {
            Ok(Self(s.to_string()))
        } else {
            Err(ParseMonthKeyError(s.to_string()))
        }
    }
}

impl TryFrom<String> for MonthKey {
    type Error = ParseMonthKeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> { value.parse() }
}

impl From<MonthKey> for String {
    fn from(value: MonthKey) -> Self { value.0 }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

/// URL of one monthly archive, e.g.
/// `https://api.chess.com/pub/player/hikaru/games/2023/12`.
///
/// Used as the key of the validator store, so a validator is always tied to
/// the exact archive it was issued for.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArchiveRef(String);

impl ArchiveRef {
    pub fn new(url: impl Into<String>) -> Self { Self(url.into()) }

    pub fn as_str(&self) -> &str { &self.0 }

    /// Month encoded as the trailing `/YYYY/MM` of the URL.
    pub fn month_key(&self) -> Option<MonthKey> {
        let caps = ARCHIVE_MONTH_REGEX.captures(&self.0)?;
        Some(MonthKey(format!("{}-{}", &caps["year"], &caps["month"])))
    }
}

impl fmt::Display for ArchiveRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

impl From<&str> for ArchiveRef {
    fn from(value: &str) -> Self { Self(value.to_string()) }
}

impl From<String> for ArchiveRef {
    fn from(value: String) -> Self { Self(value) }
}

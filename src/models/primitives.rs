//! Primitive types and newtypes for type-safe API interactions.
//!
//! Path parameters are validated when they are constructed, so a value
//! that reaches URL building can never contain path separators or
//! traversal sequences.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{Error, Result};

/// Maximum length of a voucher series code.
const SERIES_CODE_MAX_LEN: usize = 10;

/// Query parameters of a request.
///
/// Keys are normalized to lowercase. Setting a key that is already present
/// replaces its value without changing its position, so iteration order is
/// the order in which keys were first inserted.
///
/// # Example
///
/// ```
/// use fortnox_rs::Query;
///
/// let query = Query::new()
///     .set("FromDate", "2024-01-01")
///     .set("financialyear", 3);
///
/// assert_eq!(query.get("fromdate"), Some("2024-01-01"));
/// assert_eq!(query.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Query(Vec<(String, String)>);

impl Query {
    /// Create an empty query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a parameter, replacing any existing value for the same key.
    pub fn set(mut self, key: impl AsRef<str>, value: impl ToString) -> Self {
        self.insert(key.as_ref(), value.to_string());
        self
    }

    /// Set a parameter when `value` is present.
    pub fn set_opt<V: ToString>(self, key: impl AsRef<str>, value: Option<V>) -> Self {
        match value {
            Some(value) => self.set(key, value),
            None => self,
        }
    }

    /// Merge another query into this one. Keys from `other` win.
    pub fn merge(mut self, other: &Query) -> Self {
        for (key, value) in other.iter() {
            self.insert(key, value.to_string());
        }
        self
    }

    /// Remove a parameter by (case-insensitive) key.
    pub fn remove(mut self, key: &str) -> Self {
        let key = key.to_ascii_lowercase();
        self.0.retain(|(k, _)| *k != key);
        self
    }

    /// Look up a parameter by (case-insensitive) key.
    pub fn get(&self, key: &str) -> Option<&str> {
        let key = key.to_ascii_lowercase();
        self.0
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Iterate over the parameters in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the query has no parameters.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn insert(&mut self, key: &str, value: String) {
        let key = key.to_ascii_lowercase();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.0.push((key, value)),
        }
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, value)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("&")?;
            }
            write!(f, "{}={}", key, value)?;
        }
        Ok(())
    }
}

/// A validated voucher series code (e.g. `A`, `B`, `K`).
///
/// # Example
///
/// ```
/// use fortnox_rs::SeriesCode;
///
/// let series = SeriesCode::new(" A ").expect("valid series");
/// assert_eq!(series.as_str(), "A");
///
/// assert!(SeriesCode::new("../A").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SeriesCode(String);

impl SeriesCode {
    /// Create a series code, validating it for use in a URL path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if the trimmed value is empty,
    /// contains `/` or `..`, is longer than 10 characters, or contains
    /// anything other than ASCII letters, digits, `_` and `-`.
    pub fn new(series: &str) -> Result<Self> {
        let trimmed = series.trim();

        if trimmed.is_empty() || trimmed.contains('/') || trimmed.contains("..") {
            return Err(Error::Validation(
                "Invalid voucher series: contains invalid characters".to_string(),
            ));
        }

        let well_formed = trimmed.len() <= SERIES_CODE_MAX_LEN
            && trimmed
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !well_formed {
            return Err(Error::Validation(format!(
                "Invalid voucher series: must be alphanumeric (max {} chars)",
                SERIES_CODE_MAX_LEN
            )));
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Get the series code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SeriesCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for SeriesCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for SeriesCode {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        Self::new(&s)
    }
}

impl TryFrom<&str> for SeriesCode {
    type Error = Error;

    fn try_from(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl From<SeriesCode> for String {
    fn from(series: SeriesCode) -> Self {
        series.0
    }
}

/// SIE export type.
///
/// Fortnox only exports SIE type 3 (balances and results per account) and
/// type 4 (type 3 plus all vouchers).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SieType {
    /// SIE 3
    Type3,
    /// SIE 4
    Type4,
}

impl SieType {
    /// The path segment used by the export endpoint.
    pub fn as_str(&self) -> &'static str {
        match self {
            SieType::Type3 => "3",
            SieType::Type4 => "4",
        }
    }
}

impl fmt::Display for SieType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<u8> for SieType {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            3 => Ok(SieType::Type3),
            4 => Ok(SieType::Type4),
            other => Err(Error::Validation(format!(
                "Invalid SIE type: {}; must be 3 or 4",
                other
            ))),
        }
    }
}

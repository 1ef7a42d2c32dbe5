//! Request parameters.

use std::fmt::Display;

use crate::error::ExmoError;

/// Insertion-ordered request parameters.
///
/// The encoded form of these parameters is what gets signed, so the order
/// in which they are inserted is the order in which they are transmitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    pairs: Vec<(String, String)>,
}

impl Params {
    /// Create an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parameter, builder style.
    pub fn with(mut self, key: impl Into<String>, value: impl Display) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert a parameter.
    ///
    /// An existing key keeps its position and has its value replaced.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Display) {
        let key = key.into();
        let value = value.to_string();
        match self.pairs.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.pairs.push((key, value)),
        }
    }

    /// Get the value of a parameter.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Whether there are no parameters.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Iterate over the parameters in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Encode as `application/x-www-form-urlencoded`, in insertion order.
    pub fn encode(&self) -> Result<String, ExmoError> {
        serde_urlencoded::to_string(&self.pairs)
            .map_err(|e| ExmoError::config(format!("Failed to encode parameters: {e}")))
    }
}

impl<K: Into<String>, V: Display> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Params::new();
        for (k, v) in iter {
            params.insert(k, v);
        }
        params
    }
}

/// One or more currency pairs, e.g. `BTC_USD` or `["BTC_USD", "ETH_USD"]`.
///
/// Pairs are joined with commas and upper-cased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pairs(String);

impl Pairs {
    /// The comma-separated, upper-cased pair list.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Reject an empty pair list.
    pub(crate) fn require_non_empty(self) -> Result<Self, ExmoError> {
        if self.0.split(',').any(|p| p.trim().is_empty()) {
            return Err(ExmoError::config("At least one currency pair must be given"));
        }
        Ok(self)
    }

    fn join<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let joined = pairs
            .into_iter()
            .map(|p| p.as_ref().trim().to_uppercase())
            .collect::<Vec<_>>()
            .join(",");
        Self(joined)
    }
}

impl Display for Pairs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Pairs {
    fn from(pairs: &str) -> Self {
        Self(pairs.trim().to_uppercase())
    }
}

impl From<String> for Pairs {
    fn from(pairs: String) -> Self {
        Self::from(pairs.as_str())
    }
}

impl From<&[&str]> for Pairs {
    fn from(pairs: &[&str]) -> Self {
        Self::join(pairs)
    }
}

impl<const N: usize> From<[&str; N]> for Pairs {
    fn from(pairs: [&str; N]) -> Self {
        Self::join(pairs)
    }
}

impl From<Vec<&str>> for Pairs {
    fn from(pairs: Vec<&str>) -> Self {
        Self::join(pairs)
    }
}

impl From<Vec<String>> for Pairs {
    fn from(pairs: Vec<String>) -> Self {
        Self::join(pairs)
    }
}

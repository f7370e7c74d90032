use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical region identifier, independent of display casing.
///
/// Normalisation trims, collapses whitespace, upper-cases, spells "and" as `&`
/// and drops a trailing "(UT)" marker, so "Jammu and Kashmir" and
/// "JAMMU & KASHMIR (UT)" name the same key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct RegionKey(String);

impl RegionKey {
    pub fn new(raw: &str) -> Self {
        Self(normalize_region(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for RegionKey {
    fn from(raw: String) -> Self {
        Self::new(&raw)
    }
}

impl From<&str> for RegionKey {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<RegionKey> for String {
    fn from(key: RegionKey) -> Self {
        key.0
    }
}

impl fmt::Display for RegionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub fn normalize_region(raw: &str) -> String {
    let upper = raw.to_uppercase();
    let mut tokens: Vec<&str> = upper.split_whitespace().collect();
    if tokens.last() == Some(&"(UT)") {
        tokens.pop();
    }
    tokens
        .into_iter()
        .map(|token| if token == "AND" { "&" } else { token })
        .collect::<Vec<_>>()
        .join(" ")
}

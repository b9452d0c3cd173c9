use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::SpoolError;

/// One queued unit of work: an opaque string token.
///
/// The durable record stores one item per line, so an item can never be
/// empty or carry a line break. Both are rejected at construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Item(String);

impl Item {
    pub fn new(s: impl Into<String>) -> Result<Self, SpoolError> {
        let s = s.into();
        if s.is_empty() || s.contains(['\n', '\r']) {
            return Err(SpoolError::InvalidItem(s));
        }
        Ok(Self(s))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl TryFrom<String> for Item {
    type Error = SpoolError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for Item {
    type Error = SpoolError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Item> for String {
    fn from(item: Item) -> Self {
        item.0
    }
}

impl AsRef<str> for Item {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

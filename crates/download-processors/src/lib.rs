mod catalog;
pub use catalog::*;

mod track;
pub use track::*;

mod collection;
pub use collection::*;

mod processor;
pub use processor::*;


#[cfg(test)]
mod test_utils;

use serde::{Deserialize, Serialize};
use std::ops::Deref;
use uuid::Uuid;

// CatalogId
#[derive(Eq, PartialEq, Clone, Hash, Debug, Default, Serialize, Deserialize)]
pub struct CatalogId(pub(crate) String);

impl CatalogId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Deref for CatalogId {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<&str> for CatalogId {
    fn from(value: &str) -> Self {
        CatalogId(value.to_string())
    }
}

impl From<String> for CatalogId {
    fn from(value: String) -> Self {
        CatalogId(value)
    }
}

impl std::fmt::Display for CatalogId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// RequestId
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestId(Uuid);

impl RequestId {
    pub fn new() -> Self {
        RequestId(Uuid::new_v4())
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl Deref for RequestId {
    type Target = Uuid;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

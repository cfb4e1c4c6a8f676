//! A single rendered header line, and the small case-insensitive map
//! type used for Digest/Challenge parameter sets.

use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub name: String,
    pub value: String,
}

impl Header {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Header {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A case-insensitive string-to-string map, grounded in the source's
/// `mget_stringmap_create_nocase` used for Digest/Challenge params.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParamMap {
    inner: HashMap<String, String>,
}

impl ParamMap {
    pub fn new() -> Self {
        ParamMap::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.inner.insert(name.into().to_ascii_lowercase(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.inner.get(&name.to_ascii_lowercase()).map(|s| s.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }
}

//! Citation item data.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// A bibliographic record rendered against a style.
///
/// The engine only ever looks fields up by name and never mutates an item,
/// so any field store can participate by implementing this trait.
pub trait CitationItem {
    /// Look up a field by name. Absent fields are a normal condition and
    /// render as empty text.
    fn field(&self, name: &str) -> Option<&str>;
}

impl CitationItem for BTreeMap<String, String> {
    fn field(&self, name: &str) -> Option<&str> {
        self.get(name).map(|s| s.as_str())
    }
}

impl CitationItem for HashMap<String, String> {
    fn field(&self, name: &str) -> Option<&str> {
        self.get(name).map(|s| s.as_str())
    }
}

impl<T: CitationItem + ?Sized> CitationItem for &T {
    fn field(&self, name: &str) -> Option<&str> {
        (**self).field(name)
    }
}

/// An owned citation item backed by a sorted field map.
///
/// Serializes as a flat JSON object, which is the CLI's item input format.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Item {
    fields: BTreeMap<String, String>,
}

impl Item {
    /// Create an empty item.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field, returning the item for chaining.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Set a field in place.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(name.into(), value.into());
    }

    /// Get a field value.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(|s| s.as_str())
    }

    /// Whether the item has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl CitationItem for Item {
    fn field(&self, name: &str) -> Option<&str> {
        self.get(name)
    }
}

impl FromIterator<(String, String)> for Item {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

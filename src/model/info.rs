//! Style metadata (the `info` block).

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

/// Metadata extracted from a style's info block.
///
/// Fields are a flat mapping from lower-cased element name to text content,
/// last-wins on duplicate names. `title` and `id` are computed once at
/// construction so concurrent readers never race on a lazy cache.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Info {
    fields: BTreeMap<String, String>,

    #[serde(skip)]
    title: Option<String>,

    #[serde(skip)]
    id: Option<String>,
}

impl Info {
    /// Build metadata from a field mapping.
    pub fn from_fields(fields: BTreeMap<String, String>) -> Self {
        let title = fields.get("title").cloned();
        let id = fields.get("id").cloned();
        Self { fields, title, id }
    }

    /// Get a metadata field by name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(|s| s.as_str())
    }

    /// The full metadata mapping.
    pub fn fields(&self) -> &BTreeMap<String, String> {
        &self.fields
    }

    /// The style title, if present.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// The style id, if present.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// The style's link target, if present.
    pub fn link(&self) -> Option<&str> {
        self.fields.get("link").map(|s| s.as_str())
    }

    /// The `updated` timestamp, parsed as RFC 3339.
    pub fn updated(&self) -> Option<DateTime<Utc>> {
        let raw = self.fields.get("updated")?;
        DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }

    /// Whether the info block was empty or absent.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Info {
        let mut fields = BTreeMap::new();
        fields.insert("title".to_string(), "Test Style".to_string());
        fields.insert("id".to_string(), "http://example.org/test".to_string());
        fields.insert("link".to_string(), "http://example.org/test.csl".to_string());
        fields.insert("updated".to_string(), "2020-01-02T03:04:05+00:00".to_string());
        Info::from_fields(fields)
    }

    #[test]
    fn test_derived_reads() {
        let info = sample();
        assert_eq!(info.title(), Some("Test Style"));
        assert_eq!(info.id(), Some("http://example.org/test"));
        assert_eq!(info.link(), Some("http://example.org/test.csl"));
    }

    #[test]
    fn test_updated_timestamp() {
        let info = sample();
        let updated = info.updated().unwrap();
        assert_eq!(updated.to_rfc3339(), "2020-01-02T03:04:05+00:00");
    }

    #[test]
    fn test_invalid_timestamp_is_none() {
        let mut fields = BTreeMap::new();
        fields.insert("updated".to_string(), "not a date".to_string());
        assert!(Info::from_fields(fields).updated().is_none());
    }

    #[test]
    fn test_empty_info() {
        let info = Info::default();
        assert!(info.is_empty());
        assert_eq!(info.title(), None);
        assert_eq!(info.link(), None);
    }
}

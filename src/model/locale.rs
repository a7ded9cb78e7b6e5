//! Locale definitions extracted from a style document.

use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// A locale definition: an optional language tag plus the terms it defines.
///
/// A style may embed any number of locale elements. At most one of them is
/// conventionally untagged and acts as the style's own default; tagged
/// locales override it for matching languages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Locale {
    /// Language code (`xml:lang`), absent for the style-default locale.
    pub language: Option<String>,

    /// Terms defined by this locale, keyed by term name.
    pub terms: BTreeMap<String, String>,
}

impl Locale {
    /// Create a locale with a language tag and no terms.
    pub fn with_language(language: impl Into<String>) -> Self {
        Self {
            language: Some(language.into()),
            terms: BTreeMap::new(),
        }
    }

    /// Look up a term by name.
    pub fn term(&self, name: &str) -> Option<&str> {
        self.terms.get(name).map(|s| s.as_str())
    }

    /// Selection priority: language-tagged locales are more specific than
    /// the untagged default.
    fn specificity(&self) -> u8 {
        match self.language {
            Some(_) => 0,
            None => 1,
        }
    }
}

impl PartialOrd for Locale {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Locale {
    fn cmp(&self, other: &Self) -> Ordering {
        self.specificity()
            .cmp(&other.specificity())
            .then_with(|| self.language.cmp(&other.language))
            .then_with(|| self.terms.cmp(&other.terms))
    }
}

//! The in-memory style model.

use serde::Serialize;
use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::locate::ResolveConfig;
use crate::model::{Info, Locale, RenderNode};

/// A parsed style document: options, metadata, macros, locales, and the
/// citation and bibliography render specifications.
///
/// A `Style` is immutable after construction. Rendering is read-only, so a
/// single instance may be shared across threads freely; [`Style::update`]
/// produces a replacement instance rather than mutating in place, letting
/// callers hot-swap a reference atomically.
#[derive(Debug, Clone, Serialize)]
pub struct Style {
    /// Style-wide options from the root element's attributes.
    pub options: HashMap<String, String>,

    /// Style metadata (title, id, link, ...).
    pub info: Info,

    /// Named macros, each mapping to its rendering subtree.
    pub macros: HashMap<String, RenderNode>,

    /// Locale definitions in document order; duplicates preserved.
    pub locales: Vec<Locale>,

    /// The citation render specification.
    pub citation: RenderSpec,

    /// The bibliography render specification.
    pub bibliography: RenderSpec,
}

/// A top-level render specification: a layout root plus the options carried
/// on the citation or bibliography element itself.
#[derive(Debug, Clone, Serialize)]
pub struct RenderSpec {
    /// Options from the spec element's attributes.
    pub options: HashMap<String, String>,

    /// The layout node evaluated for each citation item.
    pub layout: RenderNode,
}

impl Style {
    /// Get a style-wide option value; absent keys are simply `None`.
    pub fn option(&self, key: &str) -> Option<&str> {
        self.options.get(key).map(|s| s.as_str())
    }

    /// Style metadata.
    pub fn info(&self) -> &Info {
        &self.info
    }

    /// The style title, if present.
    pub fn title(&self) -> Option<&str> {
        self.info.title()
    }

    /// The style id, if present.
    pub fn id(&self) -> Option<&str> {
        self.info.id()
    }

    /// The style's link target.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::MissingLink`] when the info block has no link
    /// entry.
    pub fn link(&self) -> Result<&str> {
        self.info.link().ok_or(Error::MissingLink)
    }

    /// The macro table.
    pub fn macros(&self) -> &HashMap<String, RenderNode> {
        &self.macros
    }

    /// Look up a macro body by name.
    pub fn get_macro(&self, name: &str) -> Option<&RenderNode> {
        self.macros.get(name)
    }

    /// The citation render specification.
    pub fn citation(&self) -> &RenderSpec {
        &self.citation
    }

    /// The bibliography render specification.
    pub fn bibliography(&self) -> &RenderSpec {
        &self.bibliography
    }

    /// Locales matching the requested language, most specific first.
    ///
    /// A locale matches when its language is unset, no language was
    /// requested, or the two are equal. `region` is accepted for interface
    /// stability but does not yet discriminate.
    pub fn locales(&self, language: Option<&str>, _region: Option<&str>) -> Vec<&Locale> {
        let mut selected: Vec<&Locale> = self
            .locales
            .iter()
            .filter(|locale| match (&locale.language, language) {
                (None, _) | (_, None) => true,
                (Some(have), Some(want)) => have == want,
            })
            .collect();
        selected.sort();
        selected
    }

    /// Re-open the style from its link target, producing a new `Style`.
    ///
    /// The current instance is left untouched; callers swap in the returned
    /// style once construction succeeds.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::MissingLink`] when the style has no link, or
    /// with any resolution/construction error from re-opening.
    pub fn update(&self, config: &ResolveConfig) -> Result<Style> {
        let link = self.link()?;
        crate::open_with_config(link, config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Sequence;
    use std::collections::BTreeMap;

    fn sample_style() -> Style {
        let mut options = HashMap::new();
        options.insert("class".to_string(), "in-text".to_string());

        let mut fields = BTreeMap::new();
        fields.insert("title".to_string(), "Sample".to_string());

        let mut macros = HashMap::new();
        macros.insert("author".to_string(), RenderNode::variable("author"));

        Style {
            options,
            info: Info::from_fields(fields),
            macros,
            locales: vec![
                Locale::default(),
                Locale::with_language("en"),
                Locale::with_language("de"),
            ],
            citation: RenderSpec {
                options: HashMap::new(),
                layout: RenderNode::Layout(Sequence::default()),
            },
            bibliography: RenderSpec {
                options: HashMap::new(),
                layout: RenderNode::Layout(Sequence::default()),
            },
        }
    }

    #[test]
    fn test_option_lookup_never_errors() {
        let style = sample_style();
        assert_eq!(style.option("class"), Some("in-text"));
        assert_eq!(style.option("no-such-option"), None);
    }

    #[test]
    fn test_link_missing() {
        let style = sample_style();
        assert!(matches!(style.link(), Err(Error::MissingLink)));
    }

    #[test]
    fn test_locales_language_filter() {
        let style = sample_style();

        let matched = style.locales(Some("en"), None);
        assert_eq!(matched.len(), 2);
        // Most specific first: the tagged locale precedes the default.
        assert_eq!(matched[0].language.as_deref(), Some("en"));
        assert_eq!(matched[1].language, None);
    }

    #[test]
    fn test_locales_no_language_returns_all() {
        let style = sample_style();
        assert_eq!(style.locales(None, None).len(), 3);
    }

    #[test]
    fn test_locales_idempotent() {
        let style = sample_style();
        let first = style.locales(Some("de"), None);
        let second = style.locales(Some("de"), None);
        assert_eq!(first, second);
    }

    #[test]
    fn test_get_macro() {
        let style = sample_style();
        assert!(style.get_macro("author").is_some());
        assert!(style.get_macro("year").is_none());
    }
}

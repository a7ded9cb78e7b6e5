//! Style construction from a parsed element tree.

use std::collections::{BTreeMap, HashMap};

use crate::dom::{self, Element};
use crate::error::{Error, Result};
use crate::model::{Info, Locale, RenderNode, RenderSpec, Sequence, Style, TextSource};

use super::options::{ErrorMode, ParseOptions};

/// Builds a [`Style`] from a style source document.
///
/// The source tree is walked exactly once and not retained; construction
/// either yields a complete immutable `Style` or fails without producing a
/// partial one.
pub struct StyleParser {
    root: Element,
    options: ParseOptions,
}

impl StyleParser {
    /// Parse a style source string.
    pub fn from_str(source: &str) -> Result<Self> {
        Self::from_str_with_options(source, ParseOptions::default())
    }

    /// Parse a style source string with custom options.
    pub fn from_str_with_options(source: &str, options: ParseOptions) -> Result<Self> {
        let root = dom::parse(source)?;
        if root.name != "style" {
            return Err(Error::MalformedStyle(format!(
                "expected <style> root element, found <{}>",
                root.name
            )));
        }
        Ok(Self { root, options })
    }

    /// Construct the style model.
    pub fn parse(&self) -> Result<Style> {
        let citation = self.parse_spec("citation")?;
        let bibliography = self.parse_spec("bibliography")?;
        let locales = self.parse_locales();
        let info = self.parse_info();
        let options = attribute_map(&self.root);
        let macros = self.parse_macros()?;

        Ok(Style {
            options,
            info,
            macros,
            locales,
            citation,
            bibliography,
        })
    }

    /// Extract a top-level render spec (citation or bibliography). The
    /// element and its layout child must each be present exactly once.
    fn parse_spec(&self, name: &str) -> Result<RenderSpec> {
        let element = self.root.child(name).ok_or_else(|| {
            Error::MalformedStyle(format!("style has no <{}> element", name))
        })?;

        let layout_el = element.child("layout").ok_or_else(|| {
            Error::MalformedStyle(format!("<{}> has no <layout> element", name))
        })?;

        let layout = self
            .build_node(layout_el)?
            .unwrap_or_else(|| RenderNode::Layout(Sequence::default()));

        Ok(RenderSpec {
            options: attribute_map(element),
            layout,
        })
    }

    /// Extract locale elements in document order. Duplicate languages are
    /// a style-authoring concern and are preserved as-is.
    fn parse_locales(&self) -> Vec<Locale> {
        self.root
            .children_named("locale")
            .map(|el| {
                let mut terms = BTreeMap::new();
                if let Some(terms_el) = el.child("terms") {
                    for term in terms_el.children_named("term") {
                        if let Some(name) = term.attr("name") {
                            terms.insert(name.to_string(), term.text().to_string());
                        }
                    }
                }
                Locale {
                    language: el.attr("lang").map(|s| s.to_string()),
                    terms,
                }
            })
            .collect()
    }

    /// Flatten the info element's immediate children into a field mapping,
    /// lower-cased names, last-wins on duplicates.
    fn parse_info(&self) -> Info {
        let mut fields = BTreeMap::new();
        if let Some(info_el) = self.root.child("info") {
            for child in &info_el.children {
                let value = match child.name.as_str() {
                    // The link element carries its target in href.
                    "link" => child.attr("href").unwrap_or_else(|| child.text()),
                    _ => child.text(),
                };
                fields.insert(child.name.to_lowercase(), value.to_string());
            }
        }
        Info::from_fields(fields)
    }

    /// Extract macros keyed by name. A duplicate name overwrites the
    /// earlier entry; style documents are not re-validated here.
    fn parse_macros(&self) -> Result<HashMap<String, RenderNode>> {
        let mut macros = HashMap::new();
        for macro_el in self.root.children_named("macro") {
            let name = match macro_el.attr("name") {
                Some(name) => name.to_string(),
                None => {
                    if self.options.error_mode == ErrorMode::Strict {
                        return Err(Error::MalformedStyle(
                            "macro element without a name attribute".to_string(),
                        ));
                    }
                    log::warn!("Skipping macro element without a name attribute");
                    continue;
                }
            };

            let body = self.build_body(macro_el)?;
            macros.insert(name, body);
        }
        Ok(macros)
    }

    /// Build the body of an element that may hold several rendering
    /// children. A single child becomes the body directly; several are
    /// wrapped in an undelimited group.
    fn build_body(&self, element: &Element) -> Result<RenderNode> {
        let mut children = self.build_children(element)?;
        Ok(match children.len() {
            1 => children.remove(0),
            _ => RenderNode::Group(Sequence::new(children, "")),
        })
    }

    fn build_children(&self, element: &Element) -> Result<Vec<RenderNode>> {
        let mut nodes = Vec::new();
        for child in &element.children {
            if let Some(node) = self.build_node(child)? {
                nodes.push(node);
            }
        }
        Ok(nodes)
    }

    /// Build a rendering node, dispatching on the element name. Returns
    /// `None` when a lenient parse skips an unsupported element.
    fn build_node(&self, element: &Element) -> Result<Option<RenderNode>> {
        match element.name.as_str() {
            "layout" => {
                let seq = self.build_sequence(element)?;
                Ok(Some(RenderNode::Layout(seq)))
            }
            "group" => {
                let seq = self.build_sequence(element)?;
                Ok(Some(RenderNode::Group(seq)))
            }
            "text" => self.build_text(element),
            other => {
                if self.options.error_mode == ErrorMode::Strict {
                    return Err(Error::MalformedStyle(format!(
                        "unsupported rendering element <{}>",
                        other
                    )));
                }
                log::warn!("Skipping unsupported rendering element <{}>", other);
                Ok(None)
            }
        }
    }

    fn build_sequence(&self, element: &Element) -> Result<Sequence> {
        let children = self.build_children(element)?;
        Ok(Sequence::new(children, element.attr("delimiter").unwrap_or("")).with_affixes(
            element.attr("prefix").unwrap_or(""),
            element.attr("suffix").unwrap_or(""),
        ))
    }

    /// A text element resolves its macro, value, or variable attribute, in
    /// that order.
    fn build_text(&self, element: &Element) -> Result<Option<RenderNode>> {
        if let Some(name) = element.attr("macro") {
            return Ok(Some(RenderNode::Macro(name.to_string())));
        }
        if let Some(literal) = element.attr("value") {
            return Ok(Some(RenderNode::Text(TextSource::Value(
                literal.to_string(),
            ))));
        }
        if let Some(field) = element.attr("variable") {
            return Ok(Some(RenderNode::Text(TextSource::Variable(
                field.to_string(),
            ))));
        }

        if self.options.error_mode == ErrorMode::Strict {
            return Err(Error::MalformedStyle(
                "text element without macro, value, or variable attribute".to_string(),
            ));
        }
        log::warn!("Skipping text element without macro, value, or variable attribute");
        Ok(None)
    }
}

fn attribute_map(element: &Element) -> HashMap<String, String> {
    element.attributes.iter().cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"<style class="in-text" version="1.0">
  <info>
    <title>Test Style</title>
    <id>http://example.org/test</id>
  </info>
  <macro name="author">
    <text variable="author"/>
  </macro>
  <citation>
    <layout delimiter="; ">
      <text macro="author"/>
    </layout>
  </citation>
  <bibliography>
    <layout>
      <text variable="title"/>
    </layout>
  </bibliography>
</style>"#;

    #[test]
    fn test_parse_minimal_style() {
        let style = StyleParser::from_str(MINIMAL).unwrap().parse().unwrap();

        assert_eq!(style.option("class"), Some("in-text"));
        assert_eq!(style.option("version"), Some("1.0"));
        assert_eq!(style.title(), Some("Test Style"));
        assert_eq!(style.id(), Some("http://example.org/test"));
        assert_eq!(style.macros.len(), 1);

        match style.citation.layout {
            RenderNode::Layout(ref seq) => {
                assert_eq!(seq.delimiter, "; ");
                assert_eq!(seq.children, vec![RenderNode::Macro("author".to_string())]);
            }
            _ => panic!("expected layout node"),
        }
    }

    #[test]
    fn test_missing_citation_is_malformed() {
        let source = "<style><bibliography><layout/></bibliography></style>";
        let result = StyleParser::from_str(source).unwrap().parse();
        assert!(matches!(result, Err(Error::MalformedStyle(_))));
    }

    #[test]
    fn test_missing_layout_is_malformed() {
        let source = "<style><citation/><bibliography><layout/></bibliography></style>";
        let result = StyleParser::from_str(source).unwrap().parse();
        assert!(matches!(result, Err(Error::MalformedStyle(_))));
    }

    #[test]
    fn test_wrong_root_element() {
        assert!(matches!(
            StyleParser::from_str("<locale/>"),
            Err(Error::MalformedStyle(_))
        ));
    }

    #[test]
    fn test_info_last_wins() {
        let source = r#"<style>
  <info><title>First</title><title>Second</title></info>
  <citation><layout/></citation>
  <bibliography><layout/></bibliography>
</style>"#;
        let style = StyleParser::from_str(source).unwrap().parse().unwrap();
        assert_eq!(style.title(), Some("Second"));
    }

    #[test]
    fn test_info_link_href() {
        let source = r#"<style>
  <info><link href="http://example.org/style.csl"/></info>
  <citation><layout/></citation>
  <bibliography><layout/></bibliography>
</style>"#;
        let style = StyleParser::from_str(source).unwrap().parse().unwrap();
        assert_eq!(style.link().unwrap(), "http://example.org/style.csl");
    }

    #[test]
    fn test_duplicate_macro_last_wins() {
        let source = r#"<style>
  <macro name="x"><text value="first"/></macro>
  <macro name="x"><text value="second"/></macro>
  <citation><layout/></citation>
  <bibliography><layout/></bibliography>
</style>"#;
        let style = StyleParser::from_str(source).unwrap().parse().unwrap();
        assert_eq!(
            style.get_macro("x"),
            Some(&RenderNode::value("second"))
        );
    }

    #[test]
    fn test_locales_document_order() {
        let source = r#"<style>
  <locale xml:lang="en"><terms><term name="chapter">ch.</term></terms></locale>
  <locale/>
  <locale xml:lang="en"/>
  <citation><layout/></citation>
  <bibliography><layout/></bibliography>
</style>"#;
        let style = StyleParser::from_str(source).unwrap().parse().unwrap();

        assert_eq!(style.locales.len(), 3);
        assert_eq!(style.locales[0].language.as_deref(), Some("en"));
        assert_eq!(style.locales[0].term("chapter"), Some("ch."));
        assert_eq!(style.locales[1].language, None);
        // Duplicate languages are not deduplicated.
        assert_eq!(style.locales[2].language.as_deref(), Some("en"));
    }

    #[test]
    fn test_unsupported_element_strict() {
        let source = r#"<style>
  <citation><layout><names variable="author"/></layout></citation>
  <bibliography><layout/></bibliography>
</style>"#;
        let result = StyleParser::from_str(source).unwrap().parse();
        assert!(matches!(result, Err(Error::MalformedStyle(_))));
    }

    #[test]
    fn test_unsupported_element_lenient() {
        let source = r#"<style>
  <citation><layout delimiter=", ">
    <names variable="author"/>
    <text variable="year"/>
  </layout></citation>
  <bibliography><layout/></bibliography>
</style>"#;
        let style = StyleParser::from_str_with_options(source, ParseOptions::new().lenient())
            .unwrap()
            .parse()
            .unwrap();

        match style.citation.layout {
            RenderNode::Layout(ref seq) => {
                // The unsupported names element was skipped.
                assert_eq!(seq.children, vec![RenderNode::variable("year")]);
            }
            _ => panic!("expected layout node"),
        }
    }

    #[test]
    fn test_macro_with_multiple_children_wrapped() {
        let source = r#"<style>
  <macro name="cite">
    <text variable="author"/>
    <text variable="year"/>
  </macro>
  <citation><layout/></citation>
  <bibliography><layout/></bibliography>
</style>"#;
        let style = StyleParser::from_str(source).unwrap().parse().unwrap();

        match style.get_macro("cite").unwrap() {
            RenderNode::Group(seq) => {
                assert_eq!(seq.children.len(), 2);
                assert!(seq.delimiter.is_empty());
            }
            other => panic!("expected group wrapper, got {:?}", other),
        }
    }

    #[test]
    fn test_deterministic_open() {
        let a = StyleParser::from_str(MINIMAL).unwrap().parse().unwrap();
        let b = StyleParser::from_str(MINIMAL).unwrap().parse().unwrap();

        assert_eq!(a.options, b.options);
        assert_eq!(a.info, b.info);
        assert_eq!(a.locales, b.locales);
        let mut a_keys: Vec<_> = a.macros.keys().collect();
        let mut b_keys: Vec<_> = b.macros.keys().collect();
        a_keys.sort();
        b_keys.sort();
        assert_eq!(a_keys, b_keys);
    }
}

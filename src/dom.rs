//! Minimal XML element tree built on quick-xml.
//!
//! Style construction only needs a small slice of XML: element lookup by
//! name, attribute access, ordered child iteration, and text content. This
//! module parses a style source into an owned [`Element`] tree exposing
//! exactly that interface. Namespace prefixes are stripped to local names,
//! so CSL's default namespace is transparent and `xml:lang` surfaces as
//! `lang`.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::{Error, Result};

/// An XML element with its attributes, child elements, and text content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Local element name (namespace prefix stripped).
    pub name: String,

    /// Attributes in document order, as (local name, value) pairs.
    pub attributes: Vec<(String, String)>,

    /// Child elements in document order.
    pub children: Vec<Element>,

    /// Concatenated text content directly inside this element.
    text: String,
}

impl Element {
    fn new(name: String, attributes: Vec<(String, String)>) -> Self {
        Self {
            name,
            attributes,
            children: Vec::new(),
            text: String::new(),
        }
    }

    /// Get an attribute value by local name.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Get the first child element with the given name.
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Iterate over child elements with the given name, in document order.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// Trimmed text content directly inside this element.
    pub fn text(&self) -> &str {
        self.text.trim()
    }
}

/// Strip a namespace prefix, returning the local name.
fn local_name(raw: &[u8]) -> String {
    let name = String::from_utf8_lossy(raw);
    match name.rfind(':') {
        Some(pos) => name[pos + 1..].to_string(),
        None => name.into_owned(),
    }
}

fn read_attributes(e: &BytesStart<'_>) -> Result<Vec<(String, String)>> {
    let mut attributes = Vec::new();
    for attr in e.attributes() {
        let attr = attr.map_err(|err| Error::MalformedStyle(err.to_string()))?;
        let value = attr
            .unescape_value()
            .map_err(|err| Error::MalformedStyle(err.to_string()))?;
        attributes.push((local_name(attr.key.as_ref()), value.into_owned()));
    }
    Ok(attributes)
}

/// Parse an XML document into an element tree rooted at its single root
/// element. Comments, processing instructions, and doctype declarations
/// are skipped.
pub fn parse(source: &str) -> Result<Element> {
    let mut reader = Reader::from_str(source);
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let element = Element::new(local_name(e.name().as_ref()), read_attributes(&e)?);
                stack.push(element);
            }
            Ok(Event::Empty(e)) => {
                let element = Element::new(local_name(e.name().as_ref()), read_attributes(&e)?);
                attach(&mut stack, &mut root, element)?;
            }
            Ok(Event::End(_)) => {
                let element = stack.pop().ok_or_else(|| {
                    Error::MalformedStyle("unexpected closing tag".to_string())
                })?;
                attach(&mut stack, &mut root, element)?;
            }
            Ok(Event::Text(e)) => {
                let text = e
                    .unescape()
                    .map_err(|err| Error::MalformedStyle(err.to_string()))?;
                if let Some(parent) = stack.last_mut() {
                    parent.text.push_str(&text);
                }
            }
            Ok(Event::CData(e)) => {
                if let Some(parent) = stack.last_mut() {
                    parent.text.push_str(&String::from_utf8_lossy(e.as_ref()));
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {} // comments, PIs, declarations
            Err(e) => return Err(e.into()),
        }
    }

    if let Some(unclosed) = stack.last() {
        return Err(Error::MalformedStyle(format!(
            "unclosed element <{}>",
            unclosed.name
        )));
    }

    root.ok_or_else(|| Error::MalformedStyle("empty document".to_string()))
}

fn attach(stack: &mut [Element], root: &mut Option<Element>, element: Element) -> Result<()> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None => {
            if root.is_some() {
                return Err(Error::MalformedStyle(
                    "multiple root elements".to_string(),
                ));
            }
            *root = Some(element);
        }
    }
    Ok(())
}

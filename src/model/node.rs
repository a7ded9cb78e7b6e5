//! Rendering tree node types.
//!
//! A style's citation and bibliography layouts, and every macro body, are
//! trees of [`RenderNode`]. The renderer matches exhaustively on the node
//! kind, so adding a CSL node kind means adding a variant here and one
//! evaluator arm — unrelated code is untouched.

use serde::Serialize;

/// A node in a style's rendering tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RenderNode {
    /// A layout: children evaluated in order and joined with a delimiter.
    Layout(Sequence),

    /// A group: same join contract as a layout, but its affixes are
    /// suppressed when the joined body is empty.
    Group(Sequence),

    /// A macro invocation by name.
    Macro(String),

    /// A literal or item-field text node.
    Text(TextSource),
}

/// An ordered sequence of child nodes joined by a delimiter, shared by
/// layout and group nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Sequence {
    /// Child nodes in document order.
    pub children: Vec<RenderNode>,

    /// Literal string placed between consecutive child results.
    pub delimiter: String,

    /// Literal string prepended to the joined result.
    pub prefix: String,

    /// Literal string appended to the joined result.
    pub suffix: String,
}

impl Sequence {
    /// Create a sequence with the given children and delimiter.
    pub fn new(children: Vec<RenderNode>, delimiter: impl Into<String>) -> Self {
        Self {
            children,
            delimiter: delimiter.into(),
            prefix: String::new(),
            suffix: String::new(),
        }
    }

    /// Set prefix and suffix affixes.
    pub fn with_affixes(mut self, prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self.suffix = suffix.into();
        self
    }
}

/// What a text node resolves against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextSource {
    /// A literal string rendered as-is.
    Value(String),

    /// A named field looked up on the citation item. A missing field
    /// renders as an empty string, not an error.
    Variable(String),
}

impl RenderNode {
    /// Convenience constructor for a layout node.
    pub fn layout(children: Vec<RenderNode>, delimiter: impl Into<String>) -> Self {
        RenderNode::Layout(Sequence::new(children, delimiter))
    }

    /// Convenience constructor for a group node.
    pub fn group(children: Vec<RenderNode>, delimiter: impl Into<String>) -> Self {
        RenderNode::Group(Sequence::new(children, delimiter))
    }

    /// Convenience constructor for a literal text node.
    pub fn value(literal: impl Into<String>) -> Self {
        RenderNode::Text(TextSource::Value(literal.into()))
    }

    /// Convenience constructor for a field-reference text node.
    pub fn variable(field: impl Into<String>) -> Self {
        RenderNode::Text(TextSource::Variable(field.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_constructor() {
        let node = RenderNode::layout(
            vec![RenderNode::variable("author"), RenderNode::variable("year")],
            ", ",
        );

        match node {
            RenderNode::Layout(seq) => {
                assert_eq!(seq.children.len(), 2);
                assert_eq!(seq.delimiter, ", ");
                assert!(seq.prefix.is_empty());
            }
            _ => panic!("expected layout node"),
        }
    }

    #[test]
    fn test_sequence_affixes() {
        let seq = Sequence::new(vec![], "; ").with_affixes("(", ")");
        assert_eq!(seq.prefix, "(");
        assert_eq!(seq.suffix, ")");
    }
}

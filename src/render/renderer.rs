//! Stateless evaluation of rendering trees.

use crate::error::{Error, Result};
use crate::model::{RenderNode, Sequence, Style, TextSource};

use super::item::CitationItem;

/// Default recursion depth limit; style layouts are authored and shallow,
/// so anything deeper indicates a macro cycle.
const DEFAULT_MAX_DEPTH: usize = 64;

/// Evaluates rendering trees against citation items.
///
/// The renderer is a pure tree evaluator: the only state it closes over is
/// the borrowed [`Style`], used for macro lookups. Rendering the same item
/// against the same node always yields the same string, and a failed render
/// leaves the style usable for subsequent calls.
pub struct Renderer<'a> {
    style: &'a Style,
    max_depth: usize,
}

impl<'a> Renderer<'a> {
    /// Create a renderer over a style.
    pub fn new(style: &'a Style) -> Self {
        Self {
            style,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Override the recursion depth limit.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Render the style's citation layout for an item.
    pub fn citation<I: CitationItem>(&self, item: &I) -> Result<String> {
        self.render(item, &self.style.citation.layout)
    }

    /// Render the style's bibliography layout for an item.
    pub fn bibliography<I: CitationItem>(&self, item: &I) -> Result<String> {
        self.render(item, &self.style.bibliography.layout)
    }

    /// Render a node against an item.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::UnknownMacro`] when a macro reference names a
    /// macro absent from the style, or [`Error::CyclicMacroReference`] when
    /// the depth guard trips.
    pub fn render<I: CitationItem>(&self, item: &I, node: &RenderNode) -> Result<String> {
        self.render_at(item, node, 0)
    }

    fn render_at<I: CitationItem>(
        &self,
        item: &I,
        node: &RenderNode,
        depth: usize,
    ) -> Result<String> {
        if depth > self.max_depth {
            return Err(Error::CyclicMacroReference(self.max_depth));
        }

        match node {
            RenderNode::Layout(seq) => {
                let body = self.render_joined(item, seq, depth)?;
                Ok(format!("{}{}{}", seq.prefix, body, seq.suffix))
            }
            RenderNode::Group(seq) => {
                let body = self.render_joined(item, seq, depth)?;
                // Group affixes are suppressed around an empty body.
                if body.is_empty() {
                    Ok(body)
                } else {
                    Ok(format!("{}{}{}", seq.prefix, body, seq.suffix))
                }
            }
            RenderNode::Macro(name) => {
                let body = self
                    .style
                    .get_macro(name)
                    .ok_or_else(|| Error::UnknownMacro(name.clone()))?;
                self.render_at(item, body, depth + 1)
            }
            RenderNode::Text(TextSource::Value(literal)) => Ok(literal.clone()),
            RenderNode::Text(TextSource::Variable(field)) => {
                // Missing fields degrade to empty text.
                Ok(item.field(field).unwrap_or_default().to_string())
            }
        }
    }

    /// Plain delimiter join: every child result becomes a segment, empty
    /// ones included.
    fn render_joined<I: CitationItem>(
        &self,
        item: &I,
        seq: &Sequence,
        depth: usize,
    ) -> Result<String> {
        let mut segments = Vec::with_capacity(seq.children.len());
        for child in &seq.children {
            segments.push(self.render_at(item, child, depth + 1)?);
        }
        Ok(segments.join(&seq.delimiter))
    }
}

//! # citestyle
//!
//! Citation Style Language (CSL) style interpretation and rendering engine.
//!
//! This library loads a CSL style document into an immutable in-memory
//! model (macros, citation/bibliography layouts, locales, options) and
//! renders citation items against it, producing formatted text.
//!
//! ## Quick Start
//!
//! ```
//! use citestyle::{open_str, Item, Renderer};
//!
//! fn main() -> citestyle::Result<()> {
//!     let style = open_str(r#"<style>
//!       <macro name="author"><text variable="author"/></macro>
//!       <citation>
//!         <layout delimiter=", ">
//!           <text macro="author"/>
//!           <text variable="year"/>
//!         </layout>
//!       </citation>
//!       <bibliography><layout><text variable="title"/></layout></bibliography>
//!     </style>"#)?;
//!
//!     let item = Item::new()
//!         .with_field("author", "Doe")
//!         .with_field("year", "2020");
//!
//!     let renderer = Renderer::new(&style);
//!     assert_eq!(renderer.citation(&item)?, "Doe, 2020");
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Layout evaluation**: delimiter-joined rendering of layout, group,
//!   text, and macro-reference nodes
//! - **Macro resolution**: named rendering fragments invoked by reference,
//!   with cycle detection
//! - **Locale selection**: language-based lookup with fallback to the
//!   style's untagged default
//! - **Graceful degradation**: missing item fields render as empty text
//! - **Thread safety**: styles are immutable after construction, so
//!   concurrent renders need no locking

pub mod dom;
pub mod error;
pub mod locate;
pub mod model;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use error::{Error, Result};
pub use locate::{locate, ResolveConfig};
pub use model::{Info, Locale, RenderNode, RenderSpec, Sequence, Style, TextSource};
pub use parser::{ErrorMode, ParseOptions, StyleParser};
pub use render::{to_json, CitationItem, Item, JsonFormat, Renderer};

use std::path::Path;

/// Open a style from raw markup.
///
/// # Errors
///
/// Fails with [`Error::MalformedStyle`] when the source is not well-formed
/// or is missing its citation or bibliography element.
pub fn open_str(source: &str) -> Result<Style> {
    StyleParser::from_str(source)?.parse()
}

/// Open a style from raw markup with custom options.
pub fn open_str_with_options(source: &str, options: ParseOptions) -> Result<Style> {
    StyleParser::from_str_with_options(source, options)?.parse()
}

/// Open a style from a file path.
///
/// # Example
///
/// ```no_run
/// let style = citestyle::open_file("styles/apa.csl").unwrap();
/// println!("{}", style.title().unwrap_or("untitled"));
/// ```
pub fn open_file<P: AsRef<Path>>(path: P) -> Result<Style> {
    open_str(&std::fs::read_to_string(path)?)
}

/// Open a style from any identifier the resolver understands: raw markup,
/// a file path, or a bare style name under the configured repository.
pub fn open_with_config(source: &str, config: &ResolveConfig) -> Result<Style> {
    open_str(&locate(source, config)?)
}

/// Render a citation for a single item.
pub fn cite<I: CitationItem>(style: &Style, item: &I) -> Result<String> {
    Renderer::new(style).citation(item)
}

/// Render a bibliography entry for a single item.
pub fn bibliography_entry<I: CitationItem>(style: &Style, item: &I) -> Result<String> {
    Renderer::new(style).bibliography(item)
}

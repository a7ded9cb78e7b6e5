//! Style construction module.

mod options;
mod style_parser;

pub use options::{ErrorMode, ParseOptions};
pub use style_parser::StyleParser;

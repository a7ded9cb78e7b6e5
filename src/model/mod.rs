//! Style model types.
//!
//! This module defines the in-memory representation of a parsed style: the
//! [`Style`] root, its [`RenderNode`] trees, locale definitions, and info
//! metadata. The model is immutable after construction; evaluation lives in
//! [`crate::render`].

mod info;
mod locale;
mod node;
mod style;

pub use info::Info;
pub use locale::Locale;
pub use node::{RenderNode, Sequence, TextSource};
pub use style::{RenderSpec, Style};

//! Rendering module: evaluating style layouts against citation items.

mod item;
mod json;
mod renderer;

pub use item::{CitationItem, Item};
pub use json::{to_json, JsonFormat};
pub use renderer::Renderer;

//! Error types for the citestyle library.

use std::io;
use thiserror::Error;

/// Result type alias for citestyle operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while loading or rendering styles.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading style sources.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The style source is not well-formed XML or is missing required
    /// top-level elements (citation, bibliography).
    #[error("Malformed style: {0}")]
    MalformedStyle(String),

    /// A macro reference names a macro that is absent from the style.
    #[error("Unknown macro: {0}")]
    UnknownMacro(String),

    /// The recursion depth guard tripped while rendering, which indicates
    /// a cyclic macro reference or pathologically deep nesting.
    #[error("Cyclic macro reference: render depth exceeded {0}")]
    CyclicMacroReference(usize),

    /// `link` or `update` was invoked on a style whose info block has no
    /// link entry.
    #[error("Style has no link metadata")]
    MissingLink,

    /// A style source could not be resolved to readable markup.
    #[error("Style not found: {0}")]
    StyleNotFound(String),

    /// Error during rendering or serialization.
    #[error("Rendering error: {0}")]
    Render(String),
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::MalformedStyle(err.to_string())
    }
}

//! Style source resolution.
//!
//! A style identifier may be raw markup, a file path, or the bare name of
//! a style in a local repository directory. Resolution is driven entirely
//! by an explicit [`ResolveConfig`] value passed at call time; there is no
//! process-wide default state. Remote URI fetching is deliberately left to
//! callers — this library performs no network access.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Configuration for resolving style identifiers.
#[derive(Debug, Clone, Default)]
pub struct ResolveConfig {
    /// Directory holding `<name>.csl` files for bare-name lookups.
    pub styles_dir: Option<PathBuf>,

    /// Style name used when an empty identifier is resolved.
    pub default_style: Option<String>,
}

impl ResolveConfig {
    /// Create an empty configuration: only raw markup and file paths
    /// resolve.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the local style repository directory.
    pub fn with_styles_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.styles_dir = Some(dir.into());
        self
    }

    /// Set the default style name.
    pub fn with_default_style(mut self, name: impl Into<String>) -> Self {
        self.default_style = Some(name.into());
        self
    }
}

/// Resolve a style identifier to its source markup.
///
/// Resolution order: raw markup (leading `<?xml` or `<style`), an existing
/// file path, then `styles_dir/<name>.csl`. An empty identifier resolves
/// through the configured default style name.
pub fn locate(source: &str, config: &ResolveConfig) -> Result<String> {
    let source = if source.trim().is_empty() {
        match config.default_style.as_deref() {
            Some(name) => name,
            None => return Err(Error::StyleNotFound("<empty>".to_string())),
        }
    } else {
        source
    };

    if is_raw_markup(source) {
        return Ok(source.to_string());
    }

    let path = Path::new(source);
    if path.is_file() {
        log::debug!("Resolved style from file {}", path.display());
        return Ok(fs::read_to_string(path)?);
    }

    if let Some(ref dir) = config.styles_dir {
        let local = dir.join(format!("{}.csl", source));
        if local.is_file() {
            log::debug!("Resolved style '{}' from {}", source, local.display());
            return Ok(fs::read_to_string(local)?);
        }
    }

    Err(Error::StyleNotFound(source.to_string()))
}

fn is_raw_markup(source: &str) -> bool {
    let trimmed = source.trim_start();
    trimmed.starts_with("<?xml") || trimmed.starts_with("<style")
}

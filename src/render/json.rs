//! JSON serialization of the style model.

use crate::error::{Error, Result};
use crate::model::Style;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Serialize a style model (options, info, macros, locales, layouts) to
/// JSON.
pub fn to_json(style: &Style, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(style),
        JsonFormat::Compact => serde_json::to_string(style),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::StyleParser;

    const SOURCE: &str = r#"<style class="in-text">
  <info><title>Test</title></info>
  <citation><layout/></citation>
  <bibliography><layout/></bibliography>
</style>"#;

    #[test]
    fn test_to_json_pretty() {
        let style = StyleParser::from_str(SOURCE).unwrap().parse().unwrap();
        let json = to_json(&style, JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"title\""));
        assert!(json.contains("Test"));
        assert!(json.contains('\n'));
    }

    #[test]
    fn test_to_json_compact() {
        let style = StyleParser::from_str(SOURCE).unwrap().parse().unwrap();
        let json = to_json(&style, JsonFormat::Compact).unwrap();
        assert!(!json.contains('\n'));
        assert!(json.contains("in-text"));
    }
}

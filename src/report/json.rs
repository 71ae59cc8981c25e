//! JSON report rendering.

use crate::error::{Error, Result};
use crate::report::ReportView;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Serialize a report view to JSON.
pub fn to_json(view: &ReportView, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(view),
        JsonFormat::Compact => serde_json::to_string(view),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::Summary;

    fn empty_view() -> ReportView {
        ReportView {
            summary: Summary::default(),
            text_diffs: Vec::new(),
            table_diffs: Vec::new(),
            table_multiset: None,
            image_pages: Vec::new(),
        }
    }

    #[test]
    fn test_to_json_pretty() {
        let json = to_json(&empty_view(), JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"summary\""));
        assert!(json.contains('\n'));
    }

    #[test]
    fn test_to_json_compact() {
        let json = to_json(&empty_view(), JsonFormat::Compact).unwrap();
        assert!(!json.contains('\n'));
    }
}

//! Recoverable anomalies found while flattening
//!
//! None of these stop the conversion. Each one names the record and field
//! it was found in so the caller can inspect or assert on it.

use super::document::Category;
use serde_json::Value;
use std::fmt;

const PREVIEW_LIMIT: usize = 80;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// Field name outside the known vocabulary; still emitted as literals
    UnrecognizedField,
    /// Sub-field of a nested descriptor outside the known vocabulary; skipped
    UnrecognizedSubField,
    /// Value shape differs from what the field's rule expects; skipped
    UnexpectedShape,
    /// Nested record lacks a key its rule needs; element skipped
    MissingField,
    /// Value cannot form a valid IRI or blank node label; skipped
    InvalidIdentifier,
}

impl DiagnosticKind {
    /// Notices are expected vocabulary drift rather than malformed data
    pub fn is_notice(&self) -> bool {
        matches!(self, DiagnosticKind::UnrecognizedField)
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DiagnosticKind::UnrecognizedField => "unrecognized field",
            DiagnosticKind::UnrecognizedSubField => "unrecognized sub-field",
            DiagnosticKind::UnexpectedShape => "unexpected value shape",
            DiagnosticKind::MissingField => "missing field",
            DiagnosticKind::InvalidIdentifier => "invalid identifier",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub category: Category,
    /// Top-level record key
    pub node: String,
    /// Dotted path of the field, e.g. `ldc_types.ldc_arguments`
    pub field: String,
    pub detail: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} in {} {} field '{}': {}",
            self.kind, self.category, self.node, self.field, self.detail
        )
    }
}

/// Short JSON rendering of a value for diagnostics
pub(crate) fn preview(value: &Value) -> String {
    let text = value.to_string();
    if text.chars().count() <= PREVIEW_LIMIT {
        text
    } else {
        let cut: String = text.chars().take(PREVIEW_LIMIT).collect();
        format!("{}...", cut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_display() {
        let d = Diagnostic {
            kind: DiagnosticKind::UnexpectedShape,
            category: Category::Event,
            node: "DWD_EVE_1".to_string(),
            field: "overlay_parents".to_string(),
            detail: "expected a list, got \"x\"".to_string(),
        };
        assert_eq!(
            d.to_string(),
            "unexpected value shape in event DWD_EVE_1 field 'overlay_parents': expected a list, got \"x\""
        );
    }

    #[test]
    fn test_preview_truncates() {
        let long = json!("a".repeat(200));
        let shown = preview(&long);
        assert!(shown.ends_with("..."));
        assert_eq!(shown.chars().count(), PREVIEW_LIMIT + 3);
        assert_eq!(preview(&json!(5)), "5");
    }

    #[test]
    fn test_notice_kinds() {
        assert!(DiagnosticKind::UnrecognizedField.is_notice());
        assert!(!DiagnosticKind::MissingField.is_notice());
    }
}

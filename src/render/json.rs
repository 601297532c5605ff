//! JSON rendering of parsed documents and audit results.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::model::{AuditFinding, AuditResult, ParsedDocument};

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Audit report as written by [`audit_to_json`].
#[derive(Debug, Serialize)]
pub struct AuditReport<'a> {
    /// Whether no rule fired
    pub clean: bool,
    /// Number of findings
    pub issue_count: usize,
    /// Distinct flagged paragraph indices
    pub flagged_paragraphs: Vec<usize>,
    /// Findings in document order
    pub findings: &'a [AuditFinding],
}

impl<'a> From<&'a AuditResult> for AuditReport<'a> {
    fn from(result: &'a AuditResult) -> Self {
        Self {
            clean: result.is_clean(),
            issue_count: result.len(),
            flagged_paragraphs: result.flagged_paragraphs(),
            findings: &result.findings,
        }
    }
}

/// Convert a parsed document to JSON.
pub fn to_json(doc: &ParsedDocument, format: JsonFormat) -> Result<String> {
    serialize(doc, format)
}

/// Convert an audit result to a JSON report.
pub fn audit_to_json(result: &AuditResult, format: JsonFormat) -> Result<String> {
    serialize(&AuditReport::from(result), format)
}

/// Serialize any report value.
pub fn serialize<T: Serialize + ?Sized>(value: &T, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(value),
        JsonFormat::Compact => serde_json::to_string(value),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BlockKind, ContentBlock, RuleKind, TableBlock};

    #[test]
    fn test_to_json_pretty() {
        let mut doc = ParsedDocument::new();
        doc.push(ContentBlock::new(BlockKind::BulletBold, "Due Date").with_children(vec!["March 31".into()]));
        doc.push(TableBlock::new(vec!["Item".into()], vec![]));

        let json = to_json(&doc, JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"type\": \"content\""));
        assert!(json.contains("\"kind\": \"bullet_bold\""));
        assert!(json.contains("\"type\": \"table\""));
        assert!(json.contains('\n'));

        let back: ParsedDocument = serde_json::from_str(&json).unwrap();
        assert_eq!(back, doc);
    }

    #[test]
    fn test_to_json_compact() {
        let doc = ParsedDocument::new();
        let json = to_json(&doc, JsonFormat::Compact).unwrap();
        assert!(!json.contains('\n'));
    }

    #[test]
    fn test_audit_to_json() {
        let mut result = AuditResult::new();
        result.add(AuditFinding::new(3, RuleKind::Font, "Font 'Calibri' used, must be Arial"));

        let json = audit_to_json(&result, JsonFormat::Compact).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["clean"], false);
        assert_eq!(value["issue_count"], 1);
        assert_eq!(value["flagged_paragraphs"][0], 3);
        assert_eq!(value["findings"][0]["rule"], "font");
    }
}

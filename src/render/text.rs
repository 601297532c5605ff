//! Plain text rendering of parsed documents and audit results.

use crate::error::Result;
use crate::model::{AuditResult, Block, BlockKind, ParsedDocument};

/// Convert a parsed document to an indented plain text outline.
///
/// Headings are set off by blank lines, list items get a bullet, description
/// lines and indented body copy are indented, and tables are rendered one
/// tab-separated line per row.
pub fn to_text(doc: &ParsedDocument) -> Result<String> {
    let mut lines: Vec<String> = Vec::new();

    for block in doc {
        match block {
            Block::Table(table) => {
                lines.push(String::new());
                lines.push(table.plain_text());
                lines.push(String::new());
            }
            Block::Content(content) => match content.kind {
                BlockKind::H1 | BlockKind::H2 | BlockKind::H3 => {
                    lines.push(String::new());
                    lines.push(content.text.trim().to_string());
                }
                BlockKind::Bullet | BlockKind::BulletBold => {
                    lines.push(format!("\u{2022} {}", content.text.trim()));
                    lines.extend(content.children.iter().map(|c| format!("  {}", c.trim())));
                }
                BlockKind::BodyIndent => lines.push(format!("  {}", content.text.trim())),
                BlockKind::Body => lines.push(content.text.trim().to_string()),
            },
        }
    }

    Ok(lines.join("\n").trim().to_string())
}

/// Human-readable audit summary, one line per finding.
pub fn audit_to_text(result: &AuditResult) -> Result<String> {
    Ok(result.summary())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AuditFinding, ContentBlock, RuleKind, TableBlock};

    #[test]
    fn test_to_text() {
        let mut doc = ParsedDocument::new();
        doc.push(ContentBlock::new(BlockKind::H1, "Scope"));
        doc.push(ContentBlock::new(BlockKind::BulletBold, "Due Date").with_children(vec!["March 31".into()]));
        doc.push(TableBlock::new(vec!["A".into(), "B".into()], vec![vec!["1".into()]]));

        let text = to_text(&doc).unwrap();
        assert_eq!(text, "Scope\n\u{2022} Due Date\n  March 31\n\nA\tB\n1");
    }

    #[test]
    fn test_audit_to_text() {
        let mut result = AuditResult::new();
        assert_eq!(audit_to_text(&result).unwrap(), "No formatting issues found.");

        result.add(AuditFinding::new(2, RuleKind::BodySize, "Body text size sz=999, expected 20/24"));
        let text = audit_to_text(&result).unwrap();
        assert!(text.starts_with("Found 1 formatting issue(s):"));
        assert!(text.contains("  P2: Body text size sz=999"));
    }
}

//! Audit findings.

use serde::{Deserialize, Serialize};

/// The formatting rule a finding violates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    /// Run font is not the brand font
    Font,
    /// Body copy run size outside the allowed sizes
    BodySize,
    /// Level-1 heading run size differs from the required size
    Heading1Size,
    /// Typed bullet glyph in a paragraph without list numbering
    BulletGlyph,
    /// Body copy line spacing outside the allowed values
    BodyLineSpacing,
    /// List item indent outside the allowed values
    BulletIndent,
}

impl RuleKind {
    /// Every rule, in evaluation order.
    pub const ALL: [RuleKind; 6] = [
        RuleKind::Font,
        RuleKind::BodySize,
        RuleKind::Heading1Size,
        RuleKind::BulletGlyph,
        RuleKind::BodyLineSpacing,
        RuleKind::BulletIndent,
    ];

    /// Name used in reports and JSON.
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleKind::Font => "font",
            RuleKind::BodySize => "body_size",
            RuleKind::Heading1Size => "heading1_size",
            RuleKind::BulletGlyph => "bullet_glyph",
            RuleKind::BodyLineSpacing => "body_line_spacing",
            RuleKind::BulletIndent => "bullet_indent",
        }
    }
}

impl std::fmt::Display for RuleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One rule violation in one paragraph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditFinding {
    /// Index among all top-level body paragraphs, empty ones included
    pub paragraph_index: usize,

    /// Violated rule
    pub rule: RuleKind,

    /// Human-readable description
    pub description: String,
}

impl AuditFinding {
    /// Create a finding.
    pub fn new(paragraph_index: usize, rule: RuleKind, description: impl Into<String>) -> Self {
        Self {
            paragraph_index,
            rule,
            description: description.into(),
        }
    }
}

/// Ordered findings of one audit.
///
/// Findings are in paragraph order, then rule evaluation order within a
/// paragraph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditResult {
    /// All findings
    pub findings: Vec<AuditFinding>,
}

impl AuditResult {
    /// Create an empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a finding.
    pub fn add(&mut self, finding: AuditFinding) {
        self.findings.push(finding);
    }

    /// Check if no rule fired.
    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }

    /// Number of findings.
    pub fn len(&self) -> usize {
        self.findings.len()
    }

    /// Check if there are no findings.
    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }

    /// Distinct paragraph indices with at least one finding, ascending.
    pub fn flagged_paragraphs(&self) -> Vec<usize> {
        let mut indices: Vec<usize> = self.findings.iter().map(|f| f.paragraph_index).collect();
        indices.dedup();
        indices
    }

    /// Findings for one paragraph.
    pub fn for_paragraph(&self, index: usize) -> impl Iterator<Item = &AuditFinding> {
        self.findings
            .iter()
            .filter(move |f| f.paragraph_index == index)
    }

    /// Count findings of a rule.
    pub fn count_rule(&self, rule: RuleKind) -> usize {
        self.findings.iter().filter(|f| f.rule == rule).count()
    }

    /// Human-readable summary, one line per finding.
    pub fn summary(&self) -> String {
        if self.is_clean() {
            return "No formatting issues found.".to_string();
        }
        let mut lines = vec![format!(
            "Found {} formatting issue(s):\n",
            self.findings.len()
        )];
        for finding in &self.findings {
            lines.push(format!(
                "  P{}: {}",
                finding.paragraph_index, finding.description
            ));
        }
        lines.join("\n")
    }
}

//! Audit options and rule thresholds.

use crate::style::StyleSheet;
use serde::{Deserialize, Serialize};

/// Allow-sets and limits checked by the audit rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleSet {
    /// The brand font
    pub allowed_font: String,

    /// Fonts accepted in addition to the brand font
    pub font_exceptions: Vec<String>,

    /// Allowed body copy sizes in half-points
    pub body_sizes: Vec<u32>,

    /// Required level-1 heading size in half-points
    pub heading1_size: u32,

    /// Typed glyphs that should have been list numbering
    pub bullet_glyphs: Vec<char>,

    /// Allowed body copy line spacing values (240ths of a line)
    pub body_line_spacings: Vec<i64>,

    /// Allowed list item left indents in twips
    pub bullet_indents: Vec<i64>,
}

impl RuleSet {
    /// Check whether a font name is acceptable (case-insensitive).
    pub fn font_allowed(&self, font: &str) -> bool {
        font.eq_ignore_ascii_case(&self.allowed_font)
            || self
                .font_exceptions
                .iter()
                .any(|f| font.eq_ignore_ascii_case(f))
    }

    /// Check whether text contains a typed bullet glyph.
    pub fn contains_bullet_glyph(&self, text: &str) -> bool {
        text.chars().any(|c| self.bullet_glyphs.contains(&c))
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            allowed_font: "Arial".to_string(),
            font_exceptions: vec!["Symbol".to_string()],
            body_sizes: vec![20, 24],
            heading1_size: 36,
            bullet_glyphs: vec!['\u{2022}', '\u{25AA}', '\u{2023}', '\u{25BA}'],
            body_line_spacings: vec![240, 276, 288],
            bullet_indents: vec![0, 142, 284, 426, 720],
        }
    }
}

/// Options for auditing documents.
#[derive(Debug, Clone, Default)]
pub struct AuditOptions {
    /// Template contract (style ids and highlight colors)
    pub styles: StyleSheet,

    /// Rule thresholds
    pub rules: RuleSet,
}

impl AuditOptions {
    /// Create new audit options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the style sheet.
    pub fn with_styles(mut self, styles: StyleSheet) -> Self {
        self.styles = styles;
        self
    }

    /// Set the rule thresholds.
    pub fn with_rules(mut self, rules: RuleSet) -> Self {
        self.rules = rules;
        self
    }
}

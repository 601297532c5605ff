//! Paragraph classification.
//!
//! A paragraph is reduced to a few [`Signals`] and then matched against
//! [`CLASSIFICATION_RULES`]; the first rule that matches decides the kind.
//! New rules are added to the table at the position that gives them their
//! precedence.

use crate::model::BlockKind;
use crate::style::StyleSheet;
use crate::wordml::Paragraph;

/// Half-point size from which a paragraph reads as a level-1 heading.
pub const H1_MIN_SIZE: u32 = 36;
/// Half-point size from which a paragraph reads as a level-2 heading.
pub const H2_MIN_SIZE: u32 = 28;
/// Half-point size from which a bold paragraph reads as a level-3 heading.
pub const H3_MIN_SIZE: u32 = 24;

/// Features of a paragraph used for classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Signals {
    /// Heading level 1..=3, or 0 for none
    pub heading_level: u8,
    /// Paragraph uses list numbering
    pub numbered: bool,
    /// First direct run is bold
    pub bold: bool,
}

impl Signals {
    /// Collect the signals of a paragraph.
    pub fn from_paragraph(p: &Paragraph<'_>, styles: &StyleSheet) -> Self {
        let bold = p.first_run_bold();
        Self {
            heading_level: heading_level(p, styles, bold),
            numbered: p.has_numbering(),
            bold,
        }
    }
}

/// One entry of the classification table.
#[derive(Clone, Copy)]
pub struct ClassificationRule {
    /// Rule name for diagnostics
    pub name: &'static str,
    /// Predicate over the signals
    pub matches: fn(&Signals) -> bool,
    /// Resulting kind
    pub kind: BlockKind,
}

/// Classification rules in priority order.
pub const CLASSIFICATION_RULES: &[ClassificationRule] = &[
    ClassificationRule {
        name: "heading-1",
        matches: |s| s.heading_level == 1,
        kind: BlockKind::H1,
    },
    ClassificationRule {
        name: "heading-2",
        matches: |s| s.heading_level == 2,
        kind: BlockKind::H2,
    },
    ClassificationRule {
        name: "heading-3",
        matches: |s| s.heading_level == 3,
        kind: BlockKind::H3,
    },
    ClassificationRule {
        name: "numbered-bold",
        matches: |s| s.numbered && s.bold,
        kind: BlockKind::BulletBold,
    },
    ClassificationRule {
        name: "numbered",
        matches: |s| s.numbered,
        kind: BlockKind::Bullet,
    },
    ClassificationRule {
        name: "bold",
        matches: |s| s.bold,
        kind: BlockKind::H3,
    },
];

/// Classify signals; paragraphs no rule claims are body copy.
pub fn classify(signals: &Signals) -> BlockKind {
    CLASSIFICATION_RULES
        .iter()
        .find(|rule| (rule.matches)(signals))
        .map(|rule| rule.kind)
        .unwrap_or(BlockKind::Body)
}

/// Detect the heading level of a paragraph.
///
/// The paragraph style wins over the outline level, which wins over run
/// font sizes. Returns 0 when the paragraph is not a heading.
pub fn heading_level(p: &Paragraph<'_>, styles: &StyleSheet, first_run_bold: bool) -> u8 {
    level_from_style(p.style_id(), styles)
        .or_else(|| level_from_outline(p.outline_level()))
        .or_else(|| level_from_size(p.max_font_size(), first_run_bold))
        .unwrap_or(0)
}

fn level_from_style(style: Option<&str>, styles: &StyleSheet) -> Option<u8> {
    let style = style?;
    if style == styles.heading1_style {
        return Some(1);
    }
    match style.to_lowercase().as_str() {
        "heading1" | "heading 1" => Some(1),
        "heading2" | "heading 2" => Some(2),
        "heading3" | "heading 3" => Some(3),
        _ => None,
    }
}

fn level_from_outline(level: Option<u32>) -> Option<u8> {
    match level? {
        0 => Some(1),
        1 => Some(2),
        2 => Some(3),
        _ => None,
    }
}

fn level_from_size(size: Option<u32>, first_run_bold: bool) -> Option<u8> {
    let size = size?;
    if size >= H1_MIN_SIZE {
        Some(1)
    } else if size >= H2_MIN_SIZE {
        Some(2)
    } else if size >= H3_MIN_SIZE && first_run_bold {
        Some(3)
    } else {
        None
    }
}

//! The formatting rules.
//!
//! Each rule looks at one non-empty top-level paragraph and reports zero or
//! more violations. Rules never fail: a missing or unparsable property means
//! the rule does not fire (except for run sizes, where any declared value
//! outside the allow-set is reported as written).

use super::options::RuleSet;
use crate::model::RuleKind;
use crate::style::StyleSheet;
use crate::wordml::Paragraph;

/// What a rule sees of a paragraph.
pub struct ParagraphContext<'a> {
    /// The paragraph
    pub paragraph: Paragraph<'a>,
    /// Its full text
    pub text: &'a str,
    /// Its style id
    pub style: Option<&'a str>,
    /// Template contract
    pub styles: &'a StyleSheet,
    /// Thresholds
    pub rules: &'a RuleSet,
}

impl ParagraphContext<'_> {
    fn has_style(&self, style: &str) -> bool {
        self.style == Some(style)
    }
}

/// A formatting rule.
pub trait Rule: Send + Sync {
    /// Which rule this is.
    fn kind(&self) -> RuleKind;

    /// Describe every violation in the paragraph.
    fn check(&self, ctx: &ParagraphContext<'_>) -> Vec<String>;
}

/// The six rules in evaluation order.
pub fn default_rules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(FontRule),
        Box::new(BodySizeRule),
        Box::new(Heading1SizeRule),
        Box::new(BulletGlyphRule),
        Box::new(BodyLineSpacingRule),
        Box::new(BulletIndentRule),
    ]
}

fn join<T: ToString>(values: &[T]) -> String {
    values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("/")
}

fn parse_number(value: &str) -> Option<i64> {
    value.trim().parse().ok()
}

/// Every run must use the brand font.
pub struct FontRule;

impl Rule for FontRule {
    fn kind(&self) -> RuleKind {
        RuleKind::Font
    }

    fn check(&self, ctx: &ParagraphContext<'_>) -> Vec<String> {
        ctx.paragraph
            .runs()
            .filter_map(|run| {
                run.fonts()
                    .into_iter()
                    .find(|font| !ctx.rules.font_allowed(font))
            })
            .map(|font| format!("Font '{}' used, must be {}", font, ctx.rules.allowed_font))
            .collect()
    }
}

/// Body copy runs must use an allowed size.
pub struct BodySizeRule;

impl Rule for BodySizeRule {
    fn kind(&self) -> RuleKind {
        RuleKind::BodySize
    }

    fn check(&self, ctx: &ParagraphContext<'_>) -> Vec<String> {
        if !ctx.has_style(&ctx.styles.body_style) {
            return Vec::new();
        }
        ctx.paragraph
            .runs()
            .filter_map(|run| {
                let raw = run.font_size_raw()?;
                let allowed = run
                    .font_size()
                    .is_some_and(|size| ctx.rules.body_sizes.contains(&size));
                (!allowed).then(|| {
                    format!(
                        "Body text size sz={}, expected {}",
                        raw,
                        join(&ctx.rules.body_sizes)
                    )
                })
            })
            .collect()
    }
}

/// Level-1 heading runs with text must use the heading size.
pub struct Heading1SizeRule;

impl Rule for Heading1SizeRule {
    fn kind(&self) -> RuleKind {
        RuleKind::Heading1Size
    }

    fn check(&self, ctx: &ParagraphContext<'_>) -> Vec<String> {
        if !ctx.has_style(&ctx.styles.heading1_style) {
            return Vec::new();
        }
        let expected = ctx.rules.heading1_size;
        ctx.paragraph
            .runs()
            .filter(|run| !run.text().trim().is_empty())
            .filter_map(|run| {
                let raw = run.font_size_raw()?;
                (run.font_size() != Some(expected)).then(|| {
                    format!(
                        "H1 heading size sz={}, expected {} ({}pt)",
                        raw,
                        expected,
                        expected as f32 / 2.0
                    )
                })
            })
            .collect()
    }
}

/// Typed bullet glyphs are only acceptable in numbered paragraphs.
pub struct BulletGlyphRule;

impl Rule for BulletGlyphRule {
    fn kind(&self) -> RuleKind {
        RuleKind::BulletGlyph
    }

    fn check(&self, ctx: &ParagraphContext<'_>) -> Vec<String> {
        if ctx.rules.contains_bullet_glyph(ctx.text) && !ctx.paragraph.has_numbering() {
            vec!["Unicode bullet character in text, use Word numbering instead".to_string()]
        } else {
            Vec::new()
        }
    }
}

/// Body copy line spacing must be one of the allowed values.
pub struct BodyLineSpacingRule;

impl Rule for BodyLineSpacingRule {
    fn kind(&self) -> RuleKind {
        RuleKind::BodyLineSpacing
    }

    fn check(&self, ctx: &ParagraphContext<'_>) -> Vec<String> {
        if !ctx.has_style(&ctx.styles.body_style) {
            return Vec::new();
        }
        let Some(line) = ctx.paragraph.line_spacing().and_then(parse_number) else {
            return Vec::new();
        };
        if ctx.rules.body_line_spacings.contains(&line) {
            return Vec::new();
        }
        vec![format!(
            "Body line spacing {}, expected {}",
            line,
            join(&ctx.rules.body_line_spacings)
        )]
    }
}

/// Numbered body copy must use a standard indent.
pub struct BulletIndentRule;

impl Rule for BulletIndentRule {
    fn kind(&self) -> RuleKind {
        RuleKind::BulletIndent
    }

    fn check(&self, ctx: &ParagraphContext<'_>) -> Vec<String> {
        if !ctx.paragraph.has_numbering() || !ctx.has_style(&ctx.styles.body_style) {
            return Vec::new();
        }
        // A paragraph without w:ind sits at the margin
        let Some(left) = parse_number(ctx.paragraph.left_indent().unwrap_or("0")) else {
            return Vec::new();
        };
        if ctx.rules.bullet_indents.contains(&left) {
            return Vec::new();
        }
        vec![format!("Bullet indent left={}, non-standard value", left)]
    }
}

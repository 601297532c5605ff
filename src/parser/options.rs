//! Parsing options and configuration.

use crate::style::StyleSheet;

/// Options for parsing user documents.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Template contract (the level-1 heading style id is recognized)
    pub styles: StyleSheet,

    /// Whether bold bullets absorb the body paragraphs that follow them
    pub merge_descriptions: bool,
}

impl ParseOptions {
    /// Create new parse options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the style sheet.
    pub fn with_styles(mut self, styles: StyleSheet) -> Self {
        self.styles = styles;
        self
    }

    /// Enable or disable merging of bullet descriptions.
    pub fn with_merge_descriptions(mut self, merge: bool) -> Self {
        self.merge_descriptions = merge;
        self
    }

    /// Keep every paragraph as its own block.
    pub fn flat(mut self) -> Self {
        self.merge_descriptions = false;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            styles: StyleSheet::default(),
            merge_descriptions: true,
        }
    }
}

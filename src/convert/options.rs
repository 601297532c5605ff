//! Compositor options.

use crate::style::StyleSheet;

/// Options for converting documents into the branded template.
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// Template contract (style ids, numbering ids, colors, layout)
    pub styles: StyleSheet,

    /// Cover title used when a conversion call passes none
    pub title: Option<String>,
}

impl ConvertOptions {
    /// Create new conversion options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the style sheet.
    pub fn with_styles(mut self, styles: StyleSheet) -> Self {
        self.styles = styles;
        self
    }

    /// Set the default cover title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Resolve the title for one call: an explicit title wins over the
    /// configured one. Empty or whitespace-only titles leave the cover
    /// untouched.
    pub fn effective_title<'a>(&'a self, title: Option<&'a str>) -> Option<&'a str> {
        title
            .or(self.title.as_deref())
            .filter(|t| !t.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_options_builder() {
        let options = ConvertOptions::new().with_title("Annual Report");
        assert_eq!(options.title.as_deref(), Some("Annual Report"));
        assert_eq!(options.styles, StyleSheet::default());
    }

    #[test]
    fn test_effective_title() {
        let options = ConvertOptions::new().with_title("Default");
        assert_eq!(options.effective_title(Some("Given")), Some("Given"));
        assert_eq!(options.effective_title(None), Some("Default"));
        assert_eq!(options.effective_title(Some("")), None);
        assert_eq!(options.effective_title(Some("   ")), None);
        assert_eq!(ConvertOptions::new().with_title(" \t").effective_title(None), None);
        assert_eq!(ConvertOptions::new().effective_title(None), None);
    }
}

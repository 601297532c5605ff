//! Structural parsing of user documents.

mod classify;
mod docx_parser;
mod options;

pub use classify::{classify, heading_level, ClassificationRule, Signals, CLASSIFICATION_RULES};
pub use docx_parser::{merge_descriptions, DocxParser};
pub use options::ParseOptions;

//! Document model types.
//!
//! [`ParsedDocument`] is the sole output of parsing and the sole input to
//! composition. [`AuditResult`] carries the findings of an audit. All types
//! serialize with serde for JSON reports.

mod audit;
mod block;

pub use audit::{AuditFinding, AuditResult, RuleKind};
pub use block::{Block, BlockKind, ContentBlock, ParsedDocument, TableBlock};

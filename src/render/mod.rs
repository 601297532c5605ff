//! Rendering of parsed documents and audit results as text or JSON.

mod json;
mod text;

pub use json::{audit_to_json, serialize, to_json, AuditReport, JsonFormat};
pub use text::{audit_to_text, to_text};

//! The shared namespace table.
//!
//! Element and attribute names are matched by namespace URI and local name,
//! never by prefix. Prefixes only matter when serializing newly created
//! nodes, which take the prefix the document already declares for their
//! namespace or, failing that, the conventional prefix listed here.

/// WordprocessingML main namespace.
pub const W: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
/// Office document relationships namespace.
pub const R: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
/// DrawingML WordprocessingML drawing namespace.
pub const WP: &str = "http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing";
/// DrawingML main namespace.
pub const A: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
/// DrawingML picture namespace.
pub const PIC: &str = "http://schemas.openxmlformats.org/drawingml/2006/picture";
/// Markup compatibility namespace.
pub const MC: &str = "http://schemas.openxmlformats.org/markup-compatibility/2006";
/// Word 2010 extensions namespace.
pub const W14: &str = "http://schemas.microsoft.com/office/word/2010/wordml";
/// Word 2010 drawing extensions namespace.
pub const WP14: &str = "http://schemas.microsoft.com/office/word/2010/wordprocessingDrawing";
/// The reserved `xml` namespace (`xml:space`).
pub const XML: &str = "http://www.w3.org/XML/1998/namespace";
/// The reserved `xmlns` namespace for declarations.
pub const XMLNS: &str = "http://www.w3.org/2000/xmlns/";

/// Conventional prefixes, in lookup order.
const TABLE: &[(&str, &str)] = &[
    ("w", W),
    ("r", R),
    ("wp", WP),
    ("a", A),
    ("pic", PIC),
    ("mc", MC),
    ("w14", W14),
    ("wp14", WP14),
    ("xml", XML),
];

/// Conventional prefix for a namespace URI.
pub fn conventional_prefix(uri: &str) -> Option<&'static str> {
    TABLE.iter().find(|(_, ns)| *ns == uri).map(|(p, _)| *p)
}

/// Namespace URI implicitly bound to a reserved prefix.
pub fn reserved_namespace(prefix: &str) -> Option<&'static str> {
    match prefix {
        "xml" => Some(XML),
        "xmlns" => Some(XMLNS),
        _ => None,
    }
}

/// A stack of in-scope prefix bindings.
///
/// Each element pushes one frame holding the declarations it carries.
#[derive(Debug, Default)]
pub(crate) struct Scope {
    frames: Vec<Vec<(Option<String>, String)>>,
}

impl Scope {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Push a frame of declarations: `None` is the default namespace.
    pub(crate) fn push(&mut self, bindings: Vec<(Option<String>, String)>) {
        self.frames.push(bindings);
    }

    pub(crate) fn pop(&mut self) {
        self.frames.pop();
    }

    /// Add a prefix binding to the innermost frame.
    pub(crate) fn bind(&mut self, prefix: &str, uri: &str) {
        let binding = (Some(prefix.to_string()), uri.to_string());
        match self.frames.last_mut() {
            Some(frame) => frame.push(binding),
            None => self.frames.push(vec![binding]),
        }
    }

    /// Resolve a prefix (or the default namespace for `None`).
    pub(crate) fn resolve(&self, prefix: Option<&str>) -> Option<&str> {
        if let Some(p) = prefix {
            if let Some(ns) = reserved_namespace(p) {
                return Some(ns);
            }
        }
        for frame in self.frames.iter().rev() {
            for (bound, uri) in frame.iter().rev() {
                if bound.as_deref() == prefix {
                    // xmlns="" undeclares the default namespace
                    return if uri.is_empty() { None } else { Some(uri) };
                }
            }
        }
        None
    }

    /// Find a prefix currently bound to `uri`.
    pub(crate) fn prefix_for(&self, uri: &str) -> Option<&str> {
        if uri == XML {
            return Some("xml");
        }
        for frame in self.frames.iter().rev() {
            for (bound, ns) in frame.iter().rev() {
                if let Some(p) = bound {
                    if ns == uri && self.resolve(Some(p)) == Some(uri) {
                        return Some(p);
                    }
                }
            }
        }
        None
    }

    /// The in-scope default namespace.
    pub(crate) fn default_namespace(&self) -> Option<&str> {
        self.resolve(None)
    }
}

//! XML tree access.
//!
//! Parts are parsed into an owned node tree whose element and attribute
//! names carry their resolved namespace. Lookups go through namespace URI and
//! local name so documents using unusual prefixes (or a default namespace)
//! behave the same as those using the conventional `w:` prefix.

mod node;
pub mod ns;
mod reader;
mod writer;

pub use node::{Attribute, Descendants, Element, Node, QName};
pub use reader::parse;
pub use writer::write;

use crate::error::Result;

/// The `<?xml ...?>` declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlDecl {
    /// Version string
    pub version: String,
    /// Declared encoding
    pub encoding: Option<String>,
    /// Standalone flag
    pub standalone: Option<String>,
}

impl Default for XmlDecl {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            encoding: Some("UTF-8".to_string()),
            standalone: Some("yes".to_string()),
        }
    }
}

/// A parsed XML part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlDocument {
    /// XML declaration, if present
    pub decl: Option<XmlDecl>,
    /// Nodes between the declaration and the root element
    pub prolog: Vec<Node>,
    /// Root element
    pub root: Element,
    /// Nodes after the root element
    pub epilog: Vec<Node>,
}

impl XmlDocument {
    /// Create a document around a root element, without a declaration.
    pub fn new(root: Element) -> Self {
        Self {
            decl: None,
            prolog: Vec::new(),
            root,
            epilog: Vec::new(),
        }
    }

    /// Parse a document from bytes.
    pub fn parse(data: &[u8]) -> Result<Self> {
        parse(data)
    }

    /// Serialize the document.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        write(self)
    }

    /// Declare `xmlns:prefix` on the root unless that prefix is already bound
    /// there.
    ///
    /// Built elements then serialize with this prefix instead of carrying
    /// their own declarations.
    pub fn declare_namespace(&mut self, prefix: &str, uri: &str) {
        let bound = self
            .root
            .attributes
            .iter()
            .filter_map(|a| a.declaration())
            .any(|(p, _)| p.as_deref() == Some(prefix));
        if bound {
            return;
        }
        self.root.attributes.push(Attribute {
            name: QName {
                prefix: Some("xmlns".to_string()),
                local: prefix.to_string(),
                ns: Some(ns::XMLNS.to_string()),
            },
            value: uri.to_string(),
        });
    }
}

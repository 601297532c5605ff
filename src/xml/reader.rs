//! Building the node tree from quick-xml events.

use super::node::{Attribute, Element, Node, QName};
use super::ns::{self, Scope};
use super::{XmlDecl, XmlDocument};
use crate::error::{Error, Result};
use quick_xml::events::{BytesDecl, BytesStart, Event};
use quick_xml::Reader;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Parse a complete XML document.
///
/// Whitespace, comments and processing instructions are kept so that an
/// unchanged tree writes back equivalent markup.
pub fn parse(data: &[u8]) -> Result<XmlDocument> {
    let data = data.strip_prefix(UTF8_BOM).unwrap_or(data);
    let text = std::str::from_utf8(data)
        .map_err(|e| Error::Parse(format!("document is not valid UTF-8: {}", e)))?;

    let mut reader = Reader::from_str(text);
    reader.trim_text(false);

    let mut builder = TreeBuilder::default();
    let mut scope = Scope::new();

    loop {
        let event = reader.read_event().map_err(|e| {
            Error::Parse(format!(
                "malformed XML at byte {}: {}",
                reader.buffer_position(),
                e
            ))
        })?;

        match event {
            Event::Decl(decl) => builder.decl = Some(read_decl(&decl)?),
            Event::Start(start) => {
                let el = open_element(&start, &mut scope)?;
                builder.stack.push(el);
            }
            Event::Empty(start) => {
                let el = open_element(&start, &mut scope)?;
                scope.pop();
                builder.attach(Node::Element(el))?;
            }
            Event::End(_) => {
                scope.pop();
                let el = builder
                    .stack
                    .pop()
                    .ok_or_else(|| Error::Parse("unbalanced end tag".into()))?;
                builder.attach(Node::Element(el))?;
            }
            Event::Text(t) => {
                let value = t
                    .unescape()
                    .map_err(|e| Error::Parse(format!("invalid character data: {}", e)))?;
                if !value.is_empty() {
                    builder.attach(Node::Text(value.into_owned()))?;
                }
            }
            Event::CData(c) => {
                let value = utf8(&c.into_inner())?.to_string();
                builder.attach(Node::CData(value))?;
            }
            Event::Comment(c) => builder.attach(Node::Comment(utf8(&c)?.to_string()))?,
            Event::PI(pi) => {
                builder.attach(Node::ProcessingInstruction(utf8(&pi)?.to_string()))?
            }
            Event::DocType(d) => builder.attach(Node::DocType(utf8(&d)?.to_string()))?,
            Event::Eof => break,
        }
    }

    builder.finish()
}

#[derive(Default)]
struct TreeBuilder {
    decl: Option<XmlDecl>,
    prolog: Vec<Node>,
    root: Option<Element>,
    epilog: Vec<Node>,
    stack: Vec<Element>,
}

impl TreeBuilder {
    fn attach(&mut self, node: Node) -> Result<()> {
        if let Some(parent) = self.stack.last_mut() {
            parent.children.push(node);
            return Ok(());
        }

        match node {
            Node::Element(el) => {
                if self.root.is_some() {
                    return Err(Error::Parse("document has more than one root element".into()));
                }
                self.root = Some(el);
            }
            other if self.root.is_none() => self.prolog.push(other),
            other => self.epilog.push(other),
        }
        Ok(())
    }

    fn finish(self) -> Result<XmlDocument> {
        if let Some(open) = self.stack.last() {
            return Err(Error::Parse(format!(
                "unexpected end of document inside <{}>",
                open.name.raw()
            )));
        }
        let root = self
            .root
            .ok_or_else(|| Error::Parse("document has no root element".into()))?;

        Ok(XmlDocument {
            decl: self.decl,
            prolog: self.prolog,
            root,
            epilog: self.epilog,
        })
    }
}

fn utf8(bytes: &[u8]) -> Result<&str> {
    std::str::from_utf8(bytes).map_err(|e| Error::Parse(format!("invalid UTF-8 in markup: {}", e)))
}

fn read_decl(decl: &BytesDecl<'_>) -> Result<XmlDecl> {
    let version = decl
        .version()
        .map_err(|e| Error::Parse(format!("invalid XML declaration: {}", e)))?;
    let encoding = match decl.encoding() {
        Some(Ok(enc)) => Some(utf8(&enc)?.to_string()),
        Some(Err(e)) => return Err(Error::Parse(format!("invalid XML declaration: {}", e))),
        None => None,
    };
    let standalone = match decl.standalone() {
        Some(Ok(sa)) => Some(utf8(&sa)?.to_string()),
        Some(Err(e)) => return Err(Error::Parse(format!("invalid XML declaration: {}", e))),
        None => None,
    };

    Ok(XmlDecl {
        version: utf8(&version)?.to_string(),
        encoding,
        standalone,
    })
}

/// Resolve a start tag into an element and push its namespace frame.
fn open_element(start: &BytesStart<'_>, scope: &mut Scope) -> Result<Element> {
    let raw = utf8(start.name().as_ref())?.to_string();

    let mut bindings = Vec::new();
    let mut raw_attrs = Vec::new();
    for attr in start.attributes() {
        let attr =
            attr.map_err(|e| Error::Parse(format!("malformed attribute in <{}>: {}", raw, e)))?;
        let key = utf8(attr.key.as_ref())?.to_string();
        let value = attr
            .unescape_value()
            .map_err(|e| Error::Parse(format!("invalid attribute value in <{}>: {}", raw, e)))?
            .into_owned();

        if key == "xmlns" {
            bindings.push((None, value.clone()));
        } else if let Some(prefix) = key.strip_prefix("xmlns:") {
            bindings.push((Some(prefix.to_string()), value.clone()));
        }
        raw_attrs.push((key, value));
    }
    scope.push(bindings);

    let name = element_name(&raw, scope)?;
    let attributes = raw_attrs
        .into_iter()
        .map(|(key, value)| Attribute {
            name: attribute_name(&key, scope),
            value,
        })
        .collect();

    Ok(Element {
        name,
        attributes,
        children: Vec::new(),
    })
}

fn element_name(raw: &str, scope: &Scope) -> Result<QName> {
    match raw.split_once(':') {
        Some((prefix, local)) => {
            let ns = scope.resolve(Some(prefix)).ok_or_else(|| {
                Error::Parse(format!("unbound namespace prefix in <{}>", raw))
            })?;
            Ok(QName {
                prefix: Some(prefix.to_string()),
                local: local.to_string(),
                ns: Some(ns.to_string()),
            })
        }
        None => Ok(QName {
            prefix: None,
            local: raw.to_string(),
            ns: scope.default_namespace().map(str::to_string),
        }),
    }
}

/// Unprefixed attributes have no namespace. An unbound prefix is kept as
/// spelled with no namespace.
fn attribute_name(raw: &str, scope: &Scope) -> QName {
    if raw == "xmlns" {
        return QName {
            prefix: None,
            local: raw.to_string(),
            ns: Some(ns::XMLNS.to_string()),
        };
    }
    match raw.split_once(':') {
        Some((prefix, local)) => QName {
            prefix: Some(prefix.to_string()),
            local: local.to_string(),
            ns: scope.resolve(Some(prefix)).map(str::to_string),
        },
        None => QName::local(raw),
    }
}

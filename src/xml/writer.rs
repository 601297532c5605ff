//! Serializing the node tree with quick-xml.

use super::node::{Element, Node, QName};
use super::ns::{self, Scope};
use super::XmlDocument;
use crate::error::{Error, Result};
use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::fmt::Display;

/// Serialize a document to bytes.
pub fn write(doc: &XmlDocument) -> Result<Vec<u8>> {
    let mut writer = Writer::new(Vec::new());
    let mut scope = Scope::new();

    if let Some(decl) = &doc.decl {
        let event = BytesDecl::new(
            &decl.version,
            decl.encoding.as_deref(),
            decl.standalone.as_deref(),
        );
        writer
            .write_event(Event::Decl(event))
            .map_err(xml_write_error)?;
    }

    for node in &doc.prolog {
        write_node(&mut writer, node, &mut scope)?;
    }
    write_element(&mut writer, &doc.root, &mut scope)?;
    for node in &doc.epilog {
        write_node(&mut writer, node, &mut scope)?;
    }

    Ok(writer.into_inner())
}

fn xml_write_error<E: Display>(err: E) -> Error {
    Error::Render(format!("failed to write XML: {}", err))
}

fn write_node(writer: &mut Writer<Vec<u8>>, node: &Node, scope: &mut Scope) -> Result<()> {
    let event = match node {
        Node::Element(el) => return write_element(writer, el, scope),
        Node::Text(text) => Event::Text(BytesText::new(text)),
        Node::CData(text) => Event::CData(BytesCData::new(text.as_str())),
        Node::Comment(text) => Event::Comment(BytesText::from_escaped(text.as_str())),
        Node::ProcessingInstruction(text) => Event::PI(BytesText::from_escaped(text.as_str())),
        Node::DocType(text) => Event::DocType(BytesText::from_escaped(text.as_str())),
    };
    writer.write_event(event).map_err(xml_write_error)
}

fn write_element(writer: &mut Writer<Vec<u8>>, el: &Element, scope: &mut Scope) -> Result<()> {
    scope.push(el.attributes.iter().filter_map(|a| a.declaration()).collect());

    let mut declared = Vec::new();
    let name = qualify(&el.name, scope, false, &mut declared);
    let attr_names: Vec<String> = el
        .attributes
        .iter()
        .map(|a| qualify(&a.name, scope, true, &mut declared))
        .collect();

    let mut start = BytesStart::new(name.as_str());
    for (prefix, uri) in &declared {
        let key = format!("xmlns:{}", prefix);
        start.push_attribute((key.as_str(), uri.as_str()));
    }
    for (attr, key) in el.attributes.iter().zip(&attr_names) {
        start.push_attribute((key.as_str(), attr.value.as_str()));
    }

    if el.children.is_empty() {
        writer
            .write_event(Event::Empty(start))
            .map_err(xml_write_error)?;
    } else {
        writer
            .write_event(Event::Start(start))
            .map_err(xml_write_error)?;
        for child in &el.children {
            write_node(writer, child, scope)?;
        }
        writer
            .write_event(Event::End(BytesEnd::new(name.as_str())))
            .map_err(xml_write_error)?;
    }

    scope.pop();
    Ok(())
}

/// Spell a name for output.
///
/// Parsed names keep their prefix. Built names reuse a prefix in scope, the
/// default namespace (elements only), or bind the conventional prefix on the
/// current element.
fn qualify(
    name: &QName,
    scope: &mut Scope,
    attribute: bool,
    declared: &mut Vec<(String, String)>,
) -> String {
    if name.prefix.is_some() {
        return name.raw();
    }
    let Some(uri) = name.ns.as_deref() else {
        return name.local.clone();
    };
    if uri == ns::XMLNS {
        return name.local.clone();
    }
    if !attribute && scope.default_namespace() == Some(uri) {
        return name.local.clone();
    }
    if let Some(prefix) = scope.prefix_for(uri) {
        return format!("{}:{}", prefix, name.local);
    }

    let prefix = fresh_prefix(uri, scope);
    scope.bind(&prefix, uri);
    declared.push((prefix.clone(), uri.to_string()));
    format!("{}:{}", prefix, name.local)
}

fn fresh_prefix(uri: &str, scope: &Scope) -> String {
    if let Some(prefix) = ns::conventional_prefix(uri) {
        if scope.resolve(Some(prefix)).is_none() {
            return prefix.to_string();
        }
    }
    (0..)
        .map(|n| format!("ns{}", n))
        .find(|p| scope.resolve(Some(p)).is_none())
        .unwrap_or_else(|| "ns".to_string())
}

#[cfg(test)]
mod tests {
    use super::super::{parse, XmlDocument};
    use super::*;

    fn to_string(doc: &XmlDocument) -> String {
        String::from_utf8(write(doc).unwrap()).unwrap()
    }

    #[test]
    fn test_round_trip_preserves_markup() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><!-- note --><w:body><w:p><w:r><w:t xml:space="preserve">a &lt; b</w:t></w:r></w:p></w:body></w:document>"#;
        let doc = parse(xml.as_bytes()).unwrap();
        assert_eq!(to_string(&doc), xml);
    }

    #[test]
    fn test_built_elements_use_document_prefix() {
        let xml = r#"<x:document xmlns:x="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><x:body/></x:document>"#;
        let mut doc = parse(xml.as_bytes()).unwrap();
        let body = doc.root.w_child_mut("body").unwrap();
        body.children
            .push(Element::w("p").with_child(Element::w("pStyle").with_w_attr("val", "Body")).into());

        let out = to_string(&doc);
        assert!(out.contains(r#"<x:p><x:pStyle x:val="Body"/></x:p>"#));
    }

    #[test]
    fn test_built_elements_in_default_namespace() {
        let xml = r#"<document xmlns="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><body/></document>"#;
        let mut doc = parse(xml.as_bytes()).unwrap();
        let body = doc.root.w_child_mut("body").unwrap();
        body.children.push(Element::w("p").with_w_attr("rsidR", "01").into());

        let out = to_string(&doc);
        assert!(out.contains(r#"<p xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main" w:rsidR="01"/>"#));
    }

    #[test]
    fn test_undeclared_namespace_is_bound() {
        let doc = XmlDocument::new(Element::w("document"));
        let out = to_string(&doc);
        assert_eq!(
            out,
            r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"/>"#
        );
    }
}

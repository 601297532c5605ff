//! Owned XML node tree.

use super::ns;

/// A namespace-qualified name.
///
/// `prefix` records how a parsed name was spelled and is reused verbatim on
/// output. Names built in code leave it `None`; the writer then picks a
/// prefix bound to `ns`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QName {
    /// Prefix as written in the source, if any
    pub prefix: Option<String>,
    /// Local part of the name
    pub local: String,
    /// Resolved namespace URI
    pub ns: Option<String>,
}

impl QName {
    /// Create a name in a namespace.
    pub fn new(ns: &str, local: &str) -> Self {
        Self {
            prefix: None,
            local: local.to_string(),
            ns: Some(ns.to_string()),
        }
    }

    /// Create a name without a namespace.
    pub fn local(local: &str) -> Self {
        Self {
            prefix: None,
            local: local.to_string(),
            ns: None,
        }
    }

    /// Create a WordprocessingML name.
    pub fn w(local: &str) -> Self {
        Self::new(ns::W, local)
    }

    /// Check namespace and local name.
    pub fn is(&self, ns: &str, local: &str) -> bool {
        self.local == local && self.ns.as_deref() == Some(ns)
    }

    /// Check for a WordprocessingML name.
    pub fn is_w(&self, local: &str) -> bool {
        self.is(ns::W, local)
    }

    /// The name as spelled in the source (`prefix:local` or `local`).
    pub fn raw(&self) -> String {
        match &self.prefix {
            Some(prefix) => format!("{}:{}", prefix, self.local),
            None => self.local.clone(),
        }
    }
}

/// An attribute with its unescaped value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Attribute name
    pub name: QName,
    /// Unescaped value
    pub value: String,
}

impl Attribute {
    /// Check whether this is a namespace declaration (`xmlns` or `xmlns:p`).
    pub fn is_declaration(&self) -> bool {
        self.name.ns.as_deref() == Some(ns::XMLNS)
    }

    /// The binding introduced by a namespace declaration.
    pub fn declaration(&self) -> Option<(Option<String>, String)> {
        if !self.is_declaration() {
            return None;
        }
        let prefix = match &self.name.prefix {
            Some(_) => Some(self.name.local.clone()),
            None => None,
        };
        Some((prefix, self.value.clone()))
    }
}

/// A node of the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Element with attributes and children
    Element(Element),
    /// Unescaped character data
    Text(String),
    /// CDATA section content
    CData(String),
    /// Comment content, kept escaped
    Comment(String),
    /// Processing instruction content, kept escaped
    ProcessingInstruction(String),
    /// Document type declaration, kept escaped
    DocType(String),
}

impl Node {
    /// Borrow the element, if this node is one.
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(el) => Some(el),
            _ => None,
        }
    }

    /// Mutably borrow the element, if this node is one.
    pub fn as_element_mut(&mut self) -> Option<&mut Element> {
        match self {
            Node::Element(el) => Some(el),
            _ => None,
        }
    }

    /// Check for a WordprocessingML element with the given local name.
    pub fn is_w(&self, local: &str) -> bool {
        self.as_element().is_some_and(|el| el.is_w(local))
    }
}

impl From<Element> for Node {
    fn from(el: Element) -> Self {
        Node::Element(el)
    }
}

/// An element node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Element name
    pub name: QName,
    /// Attributes in source order, namespace declarations included
    pub attributes: Vec<Attribute>,
    /// Child nodes in document order
    pub children: Vec<Node>,
}

impl Element {
    /// Create an empty element.
    pub fn new(name: QName) -> Self {
        Self {
            name,
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Create an empty WordprocessingML element.
    pub fn w(local: &str) -> Self {
        Self::new(QName::w(local))
    }

    /// Check for a WordprocessingML element with the given local name.
    pub fn is_w(&self, local: &str) -> bool {
        self.name.is_w(local)
    }

    // ========================================================================
    // Attributes
    // ========================================================================

    /// Get an attribute value by namespace and local name.
    pub fn attr(&self, ns: Option<&str>, local: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name.local == local && a.name.ns.as_deref() == ns)
            .map(|a| a.value.as_str())
    }

    /// Get a `w:`-qualified attribute value.
    pub fn w_attr(&self, local: &str) -> Option<&str> {
        self.attr(Some(ns::W), local)
    }

    /// Set an attribute, replacing an existing one with the same name.
    pub fn set_attr(&mut self, name: QName, value: &str) {
        let existing = self
            .attributes
            .iter_mut()
            .find(|a| a.name.local == name.local && a.name.ns == name.ns);
        match existing {
            Some(attr) => attr.value = value.to_string(),
            None => self.attributes.push(Attribute {
                name,
                value: value.to_string(),
            }),
        }
    }

    /// Set a `w:`-qualified attribute.
    pub fn set_w_attr(&mut self, local: &str, value: &str) {
        self.set_attr(QName::w(local), value);
    }

    /// Builder form of [`Element::set_w_attr`].
    pub fn with_w_attr(mut self, local: &str, value: &str) -> Self {
        self.set_w_attr(local, value);
        self
    }

    /// Builder form of [`Element::set_attr`].
    pub fn with_attr(mut self, name: QName, value: &str) -> Self {
        self.set_attr(name, value);
        self
    }

    // ========================================================================
    // Children
    // ========================================================================

    /// Append a child element (builder form).
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(Node::Element(child));
        self
    }

    /// Append a text node (builder form).
    pub fn with_text(mut self, text: &str) -> Self {
        self.children.push(Node::Text(text.to_string()));
        self
    }

    /// Iterate over child elements.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Node::as_element)
    }

    /// Iterate mutably over child elements.
    pub fn elements_mut(&mut self) -> impl Iterator<Item = &mut Element> {
        self.children.iter_mut().filter_map(Node::as_element_mut)
    }

    /// First child element with the given name.
    pub fn child(&self, ns: &str, local: &str) -> Option<&Element> {
        self.elements().find(|el| el.name.is(ns, local))
    }

    /// First `w:` child element with the given local name.
    pub fn w_child(&self, local: &str) -> Option<&Element> {
        self.child(ns::W, local)
    }

    /// Mutable form of [`Element::w_child`].
    pub fn w_child_mut(&mut self, local: &str) -> Option<&mut Element> {
        self.elements_mut().find(|el| el.is_w(local))
    }

    /// All `w:` child elements with the given local name.
    pub fn w_children<'a>(&'a self, local: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.elements().filter(move |el| el.is_w(local))
    }

    /// Follow a path of `w:` child names, e.g. `["pPr", "pStyle"]`.
    pub fn w_path(&self, path: &[&str]) -> Option<&Element> {
        path.iter()
            .try_fold(self, |el, local| el.w_child(local))
    }

    /// Every descendant element in document order (excluding `self`).
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            stack: vec![self.children.iter()],
        }
    }

    /// Every `w:` descendant with the given local name.
    pub fn w_descendants<'a>(&'a self, local: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.descendants().filter(move |el| el.is_w(local))
    }

    /// Concatenated direct text and CDATA children.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for node in &self.children {
            match node {
                Node::Text(t) | Node::CData(t) => out.push_str(t),
                _ => {}
            }
        }
        out
    }

    /// Replace all children with a single text node.
    pub fn set_text(&mut self, text: &str) {
        self.children = vec![Node::Text(text.to_string())];
    }

    /// Remove child elements matching `pred`; other nodes are kept.
    pub fn remove_elements<F>(&mut self, mut pred: F)
    where
        F: FnMut(&Element) -> bool,
    {
        self.children.retain(|node| match node {
            Node::Element(el) => !pred(el),
            _ => true,
        });
    }

    /// Get the `w:` child named `local`, inserting an empty one if absent.
    ///
    /// A new child goes before the first existing sibling that `order`
    /// ranks after it, so children stay in schema sequence. Siblings missing
    /// from `order` never move the insertion point.
    pub fn ensure_w_child(&mut self, local: &str, order: &[&str]) -> &mut Element {
        let idx = match self.children.iter().position(|n| n.is_w(local)) {
            Some(idx) => idx,
            None => {
                let idx = insertion_index(&self.children, local, order);
                self.children.insert(idx, Node::Element(Element::w(local)));
                idx
            }
        };
        match &mut self.children[idx] {
            Node::Element(el) => el,
            _ => unreachable!("index was taken from an element position"),
        }
    }

    /// Get the `w:` child named `local`, inserting an empty one as the first
    /// child if absent. Used for `w:pPr` and `w:rPr`.
    pub fn ensure_leading_w_child(&mut self, local: &str) -> &mut Element {
        let idx = match self.children.iter().position(|n| n.is_w(local)) {
            Some(idx) => idx,
            None => {
                self.children.insert(0, Node::Element(Element::w(local)));
                0
            }
        };
        match &mut self.children[idx] {
            Node::Element(el) => el,
            _ => unreachable!("index was taken from an element position"),
        }
    }

    /// Insert a `w:` child in schema order, replacing an existing one.
    pub fn put_w_child(&mut self, child: Element, order: &[&str]) {
        let local = child.name.local.clone();
        *self.ensure_w_child(&local, order) = child;
    }
}

fn rank(order: &[&str], local: &str) -> Option<usize> {
    order.iter().position(|name| *name == local)
}

fn insertion_index(children: &[Node], local: &str, order: &[&str]) -> usize {
    let Some(own) = rank(order, local) else {
        return children.len();
    };
    children
        .iter()
        .position(|node| match node {
            Node::Element(el) if el.name.ns.as_deref() == Some(ns::W) => {
                rank(order, &el.name.local).is_some_and(|r| r > own)
            }
            _ => false,
        })
        .unwrap_or(children.len())
}

/// Pre-order iterator over descendant elements.
pub struct Descendants<'a> {
    stack: Vec<std::slice::Iter<'a, Node>>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(iter) = self.stack.last_mut() {
            match iter.next() {
                Some(Node::Element(el)) => {
                    self.stack.push(el.children.iter());
                    return Some(el);
                }
                Some(_) => {}
                None => {
                    self.stack.pop();
                }
            }
        }
        None
    }
}

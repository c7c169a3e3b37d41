//! # Detached XML Trees
//!
//! Input documents are parsed with `xot`, then copied out of the `xot` arena
//! into the small owned tree defined here. Records extracted from one file are
//! independent of the parser that produced them, so files can be parsed on
//! separate threads and the records moved into the merged output without any
//! ownership tie to their source document.
//!
//! Only three kinds of node survive the copy: elements, text and comments.
//! Text nodes made of whitespace alone are dropped: they are indentation from
//! the source file and the merged output is re-indented anyway. Names are
//! stored as local names; the namespace of the output is decided when the
//! merged document is built.

use xot::{Value, Xot};

/// An XML element detached from the document it was parsed from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    /// Attributes in source order, keyed by local name.
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Node>,
}

/// A child of an [`Element`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
    Comment(String),
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Builder-style helper that appends an attribute.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    /// Builder-style helper that appends a child node.
    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Direct child elements with the given local name, in document order.
    pub fn child_elements<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a Element> + 'a {
        let name = name.to_string();
        self.children.iter().filter_map(move |child| match child {
            Node::Element(element) if element.name == name => Some(element),
            _ => None,
        })
    }

    /// All descendant elements with the given local name, in document order.
    pub fn descendants_named<'a>(&'a self, name: &str) -> Vec<&'a Element> {
        let mut found = Vec::new();
        collect_descendants(self, name, &mut found);
        found
    }

    /// Concatenated text of the direct text children.
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|child| match child {
                Node::Text(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

fn collect_descendants<'a>(element: &'a Element, name: &str, found: &mut Vec<&'a Element>) {
    for child in &element.children {
        if let Node::Element(child) = child {
            if child.name == name {
                found.push(child);
            }
            collect_descendants(child, name, found);
        }
    }
}

/// Returns `attributes` with the value of `name` replaced, keeping its position.
///
/// The attribute is appended if it was not present.
pub fn replace_attribute(
    attributes: &[(String, String)],
    name: &str,
    value: &str,
) -> Vec<(String, String)> {
    let mut replaced = attributes.to_vec();
    match replaced.iter_mut().find(|(key, _)| key == name) {
        Some(entry) => entry.1 = value.to_string(),
        None => replaced.push((name.to_string(), value.to_string())),
    }
    replaced
}

/// Parses `text` and returns its document element as a detached tree.
///
/// The error is the parser's message; callers attach the file it came from.
pub fn parse(text: &str) -> std::result::Result<Element, String> {
    let mut xot = Xot::new();
    let document = xot.parse(text).map_err(|e| e.to_string())?;
    let root = xot.document_element(document).map_err(|e| e.to_string())?;
    detach_element(&xot, root)
}

fn detach_element(xot: &Xot, node: xot::Node) -> std::result::Result<Element, String> {
    let name = xot
        .element(node)
        .map(|element| xot.local_name_str(element.name()).to_string())
        .unwrap_or_default();

    // Names are kept without their namespace, so two attributes may collapse
    // onto one local name.
    let mut attributes: Vec<(String, String)> = Vec::new();
    for (attribute, value) in xot.attributes(node).iter() {
        let local = xot.local_name_str(attribute).to_string();
        if attributes.iter().any(|(existing, _)| *existing == local) {
            return Err(format!("element {} repeats attribute {}", name, local));
        }
        attributes.push((local, value.to_string()));
    }

    let children = xot
        .children(node)
        .filter_map(|child| detach_node(xot, child).transpose())
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(Element {
        name,
        attributes,
        children,
    })
}

fn detach_node(xot: &Xot, node: xot::Node) -> std::result::Result<Option<Node>, String> {
    Ok(match xot.value(node) {
        Value::Element(_) => Some(Node::Element(detach_element(xot, node)?)),
        Value::Text(text) if !text.get().trim().is_empty() => {
            Some(Node::Text(text.get().to_string()))
        }
        Value::Comment(comment) => Some(Node::Comment(comment.get().to_string())),
        _ => None,
    })
}

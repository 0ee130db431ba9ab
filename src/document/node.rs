/*
** This file is a part of minixml (minimal XML document library)
** Copyright (C) 2000-2025 Gurer Ozen
**
** minixml is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use crate::NodeId;

/// Kind of a node in the document tree.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum NodeType {
    Element,
    Text,
    Document,
    Comment,
    ProcessingInstruction,
}

/// A namespace declaration made by an `xmlns` or `xmlns:prefix` attribute.
///
/// The default namespace has an empty prefix.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NamespaceInfo {
    prefix: String,
    uri: String,
}

impl NamespaceInfo {
    pub fn new(prefix: &str, uri: &str) -> Self {
        NamespaceInfo {
            prefix: prefix.to_string(),
            uri: uri.to_string(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }
}

/// Reference to a [NamespaceInfo] owned by an element of the document.
///
/// Use [Document::namespace_info](crate::Document::namespace_info) to
/// look the declaration up.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct NamespaceRef {
    pub(crate) owner: NodeId,
    pub(crate) index: usize,
}

impl NamespaceRef {
    /// The element carrying the declaration.
    pub fn owner(&self) -> NodeId {
        self.owner
    }
}

/// Splits a qualified name at the first colon into prefix and local name.
pub(crate) fn split_name(name: &str) -> (&str, &str) {
    match name.split_once(':') {
        Some((prefix, local)) => (prefix, local),
        None => ("", name),
    }
}

/// Returns the declared prefix if the attribute name is a namespace declaration.
fn declared_prefix(name: &str) -> Option<&str> {
    if name == "xmlns" {
        Some("")
    } else {
        name.strip_prefix("xmlns:")
    }
}

/// An element attribute.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Attribute {
    qualified_name: String,
    local_name: String,
    prefix: String,
    value: String,
    pub(crate) namespace: Option<NamespaceRef>,
}

impl Attribute {
    pub fn new(name: &str, value: &str) -> Self {
        let (prefix, local) = split_name(name);
        Attribute {
            qualified_name: name.to_string(),
            local_name: local.to_string(),
            prefix: prefix.to_string(),
            value: value.to_string(),
            namespace: None,
        }
    }

    pub fn qualified_name(&self) -> &str {
        &self.qualified_name
    }

    pub fn local_name(&self) -> &str {
        &self.local_name
    }

    /// Returns the prefix, or `None` for an unprefixed name.
    pub fn prefix(&self) -> Option<&str> {
        if self.prefix.is_empty() {
            None
        } else {
            Some(&self.prefix)
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Namespace bound by the last resolution pass.
    pub fn namespace(&self) -> Option<NamespaceRef> {
        self.namespace
    }
}

pub(crate) struct Element {
    pub(crate) name: String,
    pub(crate) attributes: Vec<Attribute>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) namespaces: Vec<NamespaceInfo>,
    pub(crate) namespace: Option<NamespaceRef>,
}

impl Element {
    pub(crate) fn new(name: &str) -> Self {
        Element {
            name: name.to_string(),
            attributes: Vec::new(),
            children: Vec::new(),
            namespaces: Vec::new(),
            namespace: None,
        }
    }

    pub(crate) fn prefix(&self) -> &str {
        split_name(&self.name).0
    }

    /// Appends an attribute, or records a declaration for `xmlns` names.
    pub(crate) fn add_attribute(&mut self, name: &str, value: &str) {
        match declared_prefix(name) {
            Some(prefix) => {
                self.declare(prefix, value);
            }
            None => self.attributes.push(Attribute::new(name, value)),
        }
    }

    /// Declares a prefix, replacing the URI of an earlier declaration in place.
    pub(crate) fn declare(&mut self, prefix: &str, uri: &str) -> usize {
        match self.declaration(prefix) {
            Some(index) => {
                self.namespaces[index] = NamespaceInfo::new(prefix, uri);
                index
            }
            None => {
                self.namespaces.push(NamespaceInfo::new(prefix, uri));
                self.namespaces.len() - 1
            }
        }
    }

    pub(crate) fn declaration(&self, prefix: &str) -> Option<usize> {
        self.namespaces.iter().position(|ns| ns.prefix == prefix)
    }
}

pub(crate) enum NodePayload {
    Document(Vec<NodeId>),
    Element(Element),
    Text(String),
    Comment(String),
    ProcessingInstruction(String),
}

pub(crate) struct Node {
    pub(crate) parent: Option<NodeId>,
    pub(crate) payload: NodePayload,
}

impl Node {
    pub(crate) fn new(payload: NodePayload) -> Self {
        Node {
            parent: None,
            payload,
        }
    }

    pub(crate) fn node_type(&self) -> NodeType {
        match self.payload {
            NodePayload::Document(_) => NodeType::Document,
            NodePayload::Element(_) => NodeType::Element,
            NodePayload::Text(_) => NodeType::Text,
            NodePayload::Comment(_) => NodeType::Comment,
            NodePayload::ProcessingInstruction(_) => NodeType::ProcessingInstruction,
        }
    }

    pub(crate) fn children(&self) -> &[NodeId] {
        match &self.payload {
            NodePayload::Document(children) => children,
            NodePayload::Element(element) => &element.children,
            _ => &[],
        }
    }

    pub(crate) fn children_mut(&mut self) -> Option<&mut Vec<NodeId>> {
        match &mut self.payload {
            NodePayload::Document(children) => Some(children),
            NodePayload::Element(element) => Some(&mut element.children),
            _ => None,
        }
    }

    pub(crate) fn value(&self) -> Option<&str> {
        match &self.payload {
            NodePayload::Text(value)
            | NodePayload::Comment(value)
            | NodePayload::ProcessingInstruction(value) => Some(value),
            _ => None,
        }
    }

    pub(crate) fn element(&self) -> Option<&Element> {
        match &self.payload {
            NodePayload::Element(element) => Some(element),
            _ => None,
        }
    }

    pub(crate) fn element_mut(&mut self) -> Option<&mut Element> {
        match &mut self.payload {
            NodePayload::Element(element) => Some(element),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn qualified_names() {
        assert_eq!(split_name("a"), ("", "a"));
        assert_eq!(split_name("p:a"), ("p", "a"));
        assert_eq!(split_name("p:a:b"), ("p", "a:b"));
        assert_eq!(split_name(":a"), ("", "a"));

        let attr = Attribute::new("xml:lang", "en");
        assert_eq!(attr.qualified_name(), "xml:lang");
        assert_eq!(attr.local_name(), "lang");
        assert_eq!(attr.prefix(), Some("xml"));
        assert_eq!(attr.value(), "en");
        assert_eq!(attr.namespace(), None);
        assert_eq!(Attribute::new("id", "1").prefix(), None);
    }

    #[test]
    fn declarations_are_diverted() {
        let mut element = Element::new("p:a");
        element.add_attribute("id", "1");
        element.add_attribute("xmlns", "urn:default");
        element.add_attribute("xmlns:p", "urn:p1");
        element.add_attribute("id", "2");
        element.add_attribute("xmlns:p", "urn:p2");

        assert_eq!(element.prefix(), "p");
        let names: Vec<&str> = element.attributes.iter().map(|a| a.qualified_name()).collect();
        assert_eq!(names, ["id", "id"]);
        assert_eq!(
            element.namespaces,
            [
                NamespaceInfo::new("", "urn:default"),
                NamespaceInfo::new("p", "urn:p2")
            ]
        );
        assert_eq!(element.declaration("p"), Some(1));
        assert_eq!(element.declaration("q"), None);
    }
}

/*
** This file is a part of minixml (minimal XML document library)
** Copyright (C) 2000-2025 Gurer Ozen
**
** minixml is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use std::fmt::Debug;

use crate::NodeId;

use super::AncestorOrSelf;
use super::Attributes;
use super::Children;
use super::DescendantOrSelf;
use super::Document;
use super::Element;
use super::NamespaceInfo;
use super::NamespaceRef;
use super::Node;
use super::NodeType;
use super::writer::Writer;
use super::writer::clamp_depth;

/// Read only position in a [Document] tree.
///
/// Navigation methods consume the cursor and return a new one. Moving
/// off the tree gives a null cursor, and every further move on a null
/// cursor gives a null cursor again, so chains like
/// `doc.root().find_tag("a").first_tag().attribute("x")` never panic.
///
/// ```
/// let doc: minixml::Document = "<a><b/>text<c x='1'/></a>".parse()?;
/// let b = doc.find_tag("a").first_tag();
/// assert_eq!(b.name(), "b");
/// assert_eq!(b.next_tag().attribute("x"), Some("1"));
/// assert!(b.previous_tag().is_null());
/// assert!(b.first_child().parent().is_null());
/// # Ok::<(), minixml::DocumentError>(())
/// ```
#[derive(Clone, Copy)]
pub struct Cursor<'a> {
    doc: &'a Document,
    node: Option<NodeId>,
}

impl<'a> Cursor<'a> {
    pub(super) fn new(doc: &'a Document, node: Option<NodeId>) -> Cursor<'a> {
        Cursor { doc, node }
    }

    fn null(self) -> Cursor<'a> {
        Cursor::new(self.doc, None)
    }

    fn with(self, node: Option<NodeId>) -> Cursor<'a> {
        Cursor::new(self.doc, node)
    }

    fn get_node(&self) -> Option<&'a Node> {
        let doc = self.doc;
        self.node.and_then(|id| doc.node(id))
    }

    fn get_element(&self) -> Option<&'a Element> {
        self.get_node().and_then(Node::element)
    }

    /// Returns the siblings slice and the position of this node in it.
    fn siblings(&self) -> Option<(&'a [NodeId], usize)> {
        let id = self.node?;
        let parent = self.get_node()?.parent?;
        let siblings = self.doc.node(parent)?.children();
        let index = siblings.iter().position(|child| *child == id)?;
        Some((siblings, index))
    }

    //
    // Navigation methods
    //

    pub fn next(self) -> Cursor<'a> {
        match self.siblings() {
            Some((siblings, index)) => self.with(siblings.get(index + 1).copied()),
            None => self.null(),
        }
    }

    pub fn next_tag(self) -> Cursor<'a> {
        let mut next = self.next();
        while !next.is_null() && !next.is_element() {
            next = next.next();
        }
        next
    }

    pub fn previous(self) -> Cursor<'a> {
        match self.siblings() {
            Some((siblings, index)) if index > 0 => self.with(siblings.get(index - 1).copied()),
            _ => self.null(),
        }
    }

    pub fn previous_tag(self) -> Cursor<'a> {
        let mut previous = self.previous();
        while !previous.is_null() && !previous.is_element() {
            previous = previous.previous();
        }
        previous
    }

    pub fn parent(self) -> Cursor<'a> {
        self.with(self.get_node().and_then(|node| node.parent))
    }

    /// Returns the topmost ancestor, the document node for attached nodes.
    pub fn root(self) -> Cursor<'a> {
        match self.ancestor_or_self().last() {
            Some(root) => root,
            None => self.null(),
        }
    }

    pub fn first_child(self) -> Cursor<'a> {
        self.with(self.get_node().and_then(|node| node.children().first().copied()))
    }

    pub fn last_child(self) -> Cursor<'a> {
        self.with(self.get_node().and_then(|node| node.children().last().copied()))
    }

    pub fn first_tag(self) -> Cursor<'a> {
        let child = self.first_child();
        if child.is_null() || child.is_element() {
            child
        } else {
            child.next_tag()
        }
    }

    /// Returns the first child element with the given qualified name.
    pub fn find_tag(self, name: &str) -> Cursor<'a> {
        match self.children().find(|child| child.is_element() && child.name() == name) {
            Some(child) => child,
            None => self.null(),
        }
    }

    /// Returns the first child node of the given type.
    pub fn find_type(self, node_type: NodeType) -> Cursor<'a> {
        match self
            .children()
            .find(|child| child.node_type() == Some(node_type))
        {
            Some(child) => child,
            None => self.null(),
        }
    }

    /// Iterates over the child elements with the given qualified name.
    pub fn find_tags<'n>(self, name: &'n str) -> impl Iterator<Item = Cursor<'a>> + 'n
    where
        'a: 'n,
    {
        self.children()
            .filter(move |child| child.is_element() && child.name() == name)
    }

    //
    // Iterator methods
    //

    pub fn children(self) -> Children<'a> {
        Children::new(self.doc, self.get_node())
    }

    pub fn attributes(self) -> Attributes<'a> {
        Attributes::new(self.get_element())
    }

    pub fn descendant_or_self(self) -> DescendantOrSelf<'a> {
        DescendantOrSelf::new(self)
    }

    pub fn ancestor_or_self(self) -> AncestorOrSelf<'a> {
        AncestorOrSelf::new(self)
    }

    //
    // Node property methods
    //

    pub fn document(&self) -> &'a Document {
        self.doc
    }

    /// Handle of the node, `None` for a null cursor.
    pub fn id(&self) -> Option<NodeId> {
        self.get_node().and(self.node)
    }

    pub fn is_null(&self) -> bool {
        self.get_node().is_none()
    }

    pub fn node_type(&self) -> Option<NodeType> {
        self.get_node().map(Node::node_type)
    }

    pub fn is_element(&self) -> bool {
        self.get_element().is_some()
    }

    /// Qualified name of an element, empty for other nodes.
    pub fn name(&self) -> &'a str {
        match self.get_element() {
            Some(element) => &element.name,
            None => "",
        }
    }

    pub fn local_name(&self) -> &'a str {
        match self.get_element() {
            Some(element) => super::node::split_name(&element.name).1,
            None => "",
        }
    }

    pub fn prefix(&self) -> Option<&'a str> {
        match self.get_element().map(Element::prefix) {
            Some("") | None => None,
            prefix => prefix,
        }
    }

    /// Text of a text, comment or processing instruction node, empty for
    /// other nodes.
    ///
    /// Text values are entity decoded. Comments keep the separator space
    /// the parser puts after every word.
    pub fn value(&self) -> &'a str {
        self.get_node().and_then(Node::value).unwrap_or("")
    }

    /// Returns the value of the first attribute with this local name
    /// and no namespace.
    pub fn attribute(&self, local_name: &str) -> Option<&'a str> {
        self.attributes()
            .find(|attr| attr.namespace().is_none() && attr.local_name() == local_name)
            .map(|attr| attr.value())
    }

    /// Returns the value of the first attribute with this local name
    /// bound to the namespace `uri`.
    pub fn attribute_ns(&self, local_name: &str, uri: &str) -> Option<&'a str> {
        let doc = self.doc;
        self.attributes()
            .find(|attr| {
                attr.local_name() == local_name
                    && attr
                        .namespace()
                        .and_then(|ns| doc.namespace_info(ns))
                        .is_some_and(|info| info.uri() == uri)
            })
            .map(|attr| attr.value())
    }

    /// Namespace bound to the element by the last resolution pass.
    pub fn namespace(&self) -> Option<NamespaceRef> {
        self.get_element().and_then(|element| element.namespace)
    }

    pub fn namespace_uri(&self) -> Option<&'a str> {
        let doc = self.doc;
        self.namespace()
            .and_then(|ns| doc.namespace_info(ns))
            .map(NamespaceInfo::uri)
    }

    /// Finds the declaration of `prefix` in scope at this node.
    ///
    /// Works on the current tree without a resolution pass. An empty
    /// prefix looks up the default namespace.
    pub fn lookup_namespace(&self, prefix: &str) -> Option<&'a NamespaceInfo> {
        let doc = self.doc;
        self.node
            .and_then(|id| doc.lookup_namespace(id, prefix))
            .and_then(|ns| doc.namespace_info(ns))
    }

    /// Namespace declarations made on this element.
    pub fn namespaces(&self) -> &'a [NamespaceInfo] {
        match self.get_element() {
            Some(element) => &element.namespaces,
            None => &[],
        }
    }

    //
    // Serialization
    //

    fn writer(&self) -> Writer<'a> {
        Writer::new(self.doc, self.doc.write_options())
    }

    /// Returns the length of the XML string representation.
    pub fn str_size(&self) -> usize {
        self.str_size_at(0)
    }

    fn str_size_at(&self, depth: usize) -> usize {
        match self.id() {
            Some(id) => self.writer().size(id, depth),
            None => 0,
        }
    }

    /// Serializes the subtree, indented as if it was `depth` levels deep.
    pub fn to_string_at(&self, depth: i32) -> String {
        let depth = clamp_depth(depth);
        let id = match self.id() {
            Some(id) => id,
            None => return String::new(),
        };
        let mut buf = String::with_capacity(self.str_size_at(depth));
        // Writing into a String cannot fail
        let _ = self.writer().write(id, depth, &mut buf);
        buf
    }

    #[allow(
        clippy::inherent_to_string_shadow_display,
        reason = "prereserving exact capacity makes this function significantly faster"
    )]
    pub fn to_string(&self) -> String {
        self.to_string_at(0)
    }
}

impl PartialEq for Cursor<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.doc, other.doc) && self.id() == other.id()
    }
}

impl Debug for Cursor<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.id() {
            Some(id) => write!(f, "Cursor ({id})"),
            None => write!(f, "Cursor (null)"),
        }
    }
}

impl std::fmt::Display for Cursor<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.id() {
            Some(id) => self.writer().write(id, 0, f),
            None => Ok(()),
        }
    }
}

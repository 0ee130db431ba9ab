/*
** This file is a part of minixml (minimal XML document library)
** Copyright (C) 2000-2025 Gurer Ozen
**
** minixml is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use std::slice;

use crate::NodeId;

use super::Attribute;
use super::Cursor;
use super::Document;
use super::Element;
use super::Node;

pub struct Attributes<'a> {
    inner: slice::Iter<'a, Attribute>,
}

impl<'a> Attributes<'a> {
    pub(super) fn new(element: Option<&'a Element>) -> Self {
        let attributes: &'a [Attribute] = match element {
            Some(element) => &element.attributes,
            None => &[],
        };
        Attributes {
            inner: attributes.iter(),
        }
    }
}

impl<'a> Iterator for Attributes<'a> {
    type Item = &'a Attribute;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}

pub struct Children<'a> {
    doc: &'a Document,
    inner: slice::Iter<'a, NodeId>,
}

impl<'a> Children<'a> {
    pub(super) fn new(doc: &'a Document, node: Option<&'a Node>) -> Self {
        let children: &'a [NodeId] = match node {
            Some(node) => node.children(),
            None => &[],
        };
        Children {
            doc,
            inner: children.iter(),
        }
    }
}

impl<'a> Iterator for Children<'a> {
    type Item = Cursor<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|id| self.doc.cursor(*id))
    }
}

/// Pre-order walk of a subtree, starting with the node itself.
pub struct DescendantOrSelf<'a> {
    doc: &'a Document,
    stack: Vec<NodeId>,
}

impl<'a> DescendantOrSelf<'a> {
    pub(super) fn new(cursor: Cursor<'a>) -> Self {
        let mut stack = Vec::new();
        stack.extend(cursor.id());
        DescendantOrSelf {
            doc: cursor.document(),
            stack,
        }
    }
}

impl<'a> Iterator for DescendantOrSelf<'a> {
    type Item = Cursor<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let id = self.stack.pop()?;
            if let Some(node) = self.doc.node(id) {
                self.stack.extend(node.children().iter().rev());
                return Some(self.doc.cursor(id));
            }
        }
    }
}

/// Walk from a node up to the top of its tree.
pub struct AncestorOrSelf<'a> {
    current: Cursor<'a>,
}

impl<'a> AncestorOrSelf<'a> {
    pub(super) fn new(cursor: Cursor<'a>) -> Self {
        AncestorOrSelf { current: cursor }
    }
}

impl<'a> Iterator for AncestorOrSelf<'a> {
    type Item = Cursor<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current.is_null() {
            return None;
        }
        let result = self.current;
        self.current = self.current.parent();
        Some(result)
    }
}

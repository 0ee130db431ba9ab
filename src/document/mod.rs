/*
** This file is a part of minixml (minimal XML document library)
** Copyright (C) 2000-2025 Gurer Ozen
**
** minixml is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

mod cursor;
mod error;
mod iterators;
mod namespace;
mod node;
mod writer;

use std::fs;
use std::fs::File;
use std::io;
use std::io::BufWriter;
use std::io::Write;
use std::path::Path;
use std::str::FromStr;

use tracing::debug;

use crate::Arena;
use crate::ArenaStats;
use crate::NoMemory;
use crate::NodeId;
use crate::parser::Token;
use crate::parser::TreeBuilder;
use crate::parser::tokenize;

pub use cursor::Cursor;
pub use error::DocumentError;
pub use error::description;
pub use iterators::AncestorOrSelf;
pub use iterators::Attributes;
pub use iterators::Children;
pub use iterators::DescendantOrSelf;
pub use node::Attribute;
pub use node::NamespaceInfo;
pub use node::NamespaceRef;
pub use node::NodeType;
pub use writer::DEFAULT_INDENT_WIDTH;
pub use writer::WriteOptions;

pub(crate) use node::Element;
pub(crate) use node::Node;
pub(crate) use node::NodePayload;

use writer::Writer;
use writer::clamp_depth;

/// An XML document: the node tree plus the source it was parsed from.
///
/// All nodes are owned by the document and addressed with [NodeId]
/// handles. Read access goes through [Cursor] values returned by
/// [root()](Document::root) and [cursor()](Document::cursor); edits are
/// methods on the document itself, so the borrow checker keeps cursors
/// from observing a tree in the middle of a change.
///
/// # Examples
///
/// ```
/// use minixml::Document;
///
/// let mut doc = Document::new();
/// doc.parse_str("<note><to name='B'/></note>")?;
///
/// let note = doc.find_tag("note");
/// assert_eq!(note.find_tag("to").attribute("name"), Some("B"));
///
/// let id = note.id().unwrap();
/// let text = doc.create_text("hi & bye")?;
/// doc.append_child(id, text)?;
/// assert_eq!(doc.to_string(), "<note>\n  <to name=\"B\"/>\n  hi &amp; bye\n</note>\n");
/// # Ok::<(), minixml::DocumentError>(())
/// ```
pub struct Document {
    arena: Arena<Node>,
    root: NodeId,
    source: String,
    tokens: Vec<Token>,
    options: WriteOptions,
}

impl Document {
    /// Creates an empty document with only the root node.
    pub fn new() -> Document {
        let (arena, root) = Arena::with_root(Node::new(NodePayload::Document(Vec::new())));
        Document {
            arena,
            root,
            source: String::new(),
            tokens: Vec::new(),
            options: WriteOptions::default(),
        }
    }

    /// Reads and parses the file at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Document, DocumentError> {
        let mut doc = Document::new();
        doc.load(path)?;
        Ok(doc)
    }

    /// Replaces the tree with the contents of the file at `path`.
    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> Result<(), DocumentError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| DocumentError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), bytes = text.len(), "loaded XML source");
        self.parse_str(&text)
    }

    /// Replaces the tree with the parsed `text`.
    ///
    /// Tokenizes, builds and resolves the namespaces in one go. Children
    /// of the old tree are detached and destroyed only after the new tree
    /// is built, so on error the document is left as it was.
    pub fn parse_str(&mut self, text: &str) -> Result<(), DocumentError> {
        let tokens = tokenize(text);
        debug!(bytes = text.len(), tokens = tokens.len(), "tokenized XML source");

        let nodes = TreeBuilder::new(&tokens).build(self)?;

        self.clear_children(self.root)?;
        for id in nodes {
            self.attach(self.root, id);
        }
        self.source = text.to_string();
        self.tokens = tokens;
        self.resolve_namespaces();

        Ok(())
    }

    /// Serializes the tree into the file at `path`.
    pub fn save<P: AsRef<Path>>(&self, path: P, depth: i32) -> Result<(), DocumentError> {
        let path = path.as_ref();
        let wrap = |source: io::Error| DocumentError::Write {
            path: path.to_path_buf(),
            source,
        };
        let file = File::create(path).map_err(wrap)?;
        let mut out = BufWriter::new(file);
        writer::write_io(&self.writer(), self.root, clamp_depth(depth), &mut out).map_err(wrap)?;
        out.flush().map_err(wrap)?;
        debug!(path = %path.display(), "saved XML document");

        Ok(())
    }

    /// Serializes the tree into a byte stream.
    ///
    /// The output is byte for byte the same as [to_string_at()](Document::to_string_at).
    pub fn write_to<W: Write>(&self, mut out: W, depth: i32) -> Result<(), DocumentError> {
        writer::write_io(&self.writer(), self.root, clamp_depth(depth), &mut out)?;
        Ok(())
    }

    /// Serializes the tree starting at the given indentation depth.
    ///
    /// Negative depths are treated as zero.
    pub fn to_string_at(&self, depth: i32) -> String {
        self.root().to_string_at(depth)
    }

    #[allow(
        clippy::inherent_to_string_shadow_display,
        reason = "prereserving exact capacity makes this function significantly faster"
    )]
    pub fn to_string(&self) -> String {
        self.to_string_at(0)
    }

    /// Exact size of the [to_string()](Document::to_string) output in bytes.
    pub fn str_size(&self) -> usize {
        self.root().str_size()
    }

    pub fn write_options(&self) -> WriteOptions {
        self.options
    }

    pub fn set_write_options(&mut self, options: WriteOptions) {
        self.options = options;
    }

    fn writer(&self) -> Writer<'_> {
        Writer::new(self, self.options)
    }

    /// Source text of the last successful parse.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Tokens of the last parse.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn arena_stats(&self) -> ArenaStats {
        self.arena.stats()
    }

    //
    // Node access
    //

    pub fn root_id(&self) -> NodeId {
        self.root
    }

    pub fn root<'a>(&'a self) -> Cursor<'a> {
        Cursor::new(self, Some(self.root))
    }

    /// Returns a cursor on the node, or a null cursor for a stale handle.
    pub fn cursor<'a>(&'a self, id: NodeId) -> Cursor<'a> {
        if self.arena.contains(id) {
            Cursor::new(self, Some(id))
        } else {
            Cursor::new(self, None)
        }
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.arena.contains(id)
    }

    pub fn node_type(&self, id: NodeId) -> Option<NodeType> {
        self.arena.get(id).map(Node::node_type)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.arena.get(id).and_then(|node| node.parent)
    }

    /// Looks up the declaration a resolved namespace reference points to.
    ///
    /// Returns `None` if the owner element is gone or the declaration
    /// changed since the last resolution pass.
    pub fn namespace_info(&self, ns: NamespaceRef) -> Option<&NamespaceInfo> {
        self.arena
            .get(ns.owner)
            .and_then(Node::element)
            .and_then(|element| element.namespaces.get(ns.index))
    }

    pub(crate) fn node(&self, id: NodeId) -> Option<&Node> {
        self.arena.get(id)
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut Node, DocumentError> {
        self.arena
            .get_mut(id)
            .ok_or(DocumentError::BadEdit(description::STALE_NODE))
    }

    fn element_mut(&mut self, id: NodeId) -> Result<&mut Element, DocumentError> {
        self.node_mut(id)?
            .element_mut()
            .ok_or(DocumentError::BadEdit(description::NOT_AN_ELEMENT))
    }

    //
    // Convenience functions to avoid typing .root() all the time
    //

    pub fn first_child<'a>(&'a self) -> Cursor<'a> {
        self.root().first_child()
    }

    pub fn first_tag<'a>(&'a self) -> Cursor<'a> {
        self.root().first_tag()
    }

    pub fn find_tag<'a>(&'a self, name: &str) -> Cursor<'a> {
        self.root().find_tag(name)
    }

    //
    // Node creation, new nodes are detached
    //

    pub(crate) fn insert_node(&mut self, node: Node) -> Result<NodeId, NoMemory> {
        self.arena.insert(node)
    }

    pub fn create_element(&mut self, name: &str) -> Result<NodeId, DocumentError> {
        Ok(self.insert_node(Node::new(NodePayload::Element(Element::new(name))))?)
    }

    pub fn create_text(&mut self, value: &str) -> Result<NodeId, DocumentError> {
        Ok(self.insert_node(Node::new(NodePayload::Text(value.to_string())))?)
    }

    pub fn create_comment(&mut self, value: &str) -> Result<NodeId, DocumentError> {
        Ok(self.insert_node(Node::new(NodePayload::Comment(value.to_string())))?)
    }

    pub fn create_processing_instruction(&mut self, value: &str) -> Result<NodeId, DocumentError> {
        Ok(self.insert_node(Node::new(NodePayload::ProcessingInstruction(
            value.to_string(),
        )))?)
    }

    //
    // Tree edits
    //

    /// Links a detached child as the last child of parent. Both must exist.
    pub(crate) fn attach(&mut self, parent: NodeId, child: NodeId) {
        if let Some(children) = self.arena.get_mut(parent).and_then(Node::children_mut) {
            children.push(child);
            if let Some(node) = self.arena.get_mut(child) {
                node.parent = Some(parent);
            }
        }
    }

    /// Frees a detached node and its whole subtree.
    pub(crate) fn destroy(&mut self, id: NodeId) {
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.arena.remove(current) {
                stack.extend_from_slice(node.children());
            }
        }
    }

    /// Appends a detached node as the last child of `parent`.
    ///
    /// Fails if the child already has a parent, is the document root, or
    /// contains `parent` in its subtree, and if `parent` cannot have
    /// children.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DocumentError> {
        let child_node = self
            .arena
            .get(child)
            .ok_or(DocumentError::BadEdit(description::STALE_NODE))?;
        if child == self.root {
            return Err(DocumentError::BadEdit(description::ROOT_EDIT));
        }
        if child_node.parent.is_some() {
            return Err(DocumentError::BadEdit(description::ALREADY_ATTACHED));
        }
        match self.node_type(parent) {
            None => return Err(DocumentError::BadEdit(description::STALE_NODE)),
            Some(NodeType::Document | NodeType::Element) => {}
            Some(_) => return Err(DocumentError::BadEdit(description::NOT_A_CONTAINER)),
        }
        if self.cursor(parent).ancestor_or_self().any(|c| c.id() == Some(child)) {
            return Err(DocumentError::BadEdit(description::CYCLIC_APPEND));
        }
        self.attach(parent, child);

        Ok(())
    }

    /// Unlinks the node from its parent, keeping it alive.
    ///
    /// Returns `false` if the node was not attached.
    pub fn detach(&mut self, id: NodeId) -> Result<bool, DocumentError> {
        if id == self.root {
            return Err(DocumentError::BadEdit(description::ROOT_EDIT));
        }
        let node = self.node_mut(id)?;
        let parent = match node.parent.take() {
            None => return Ok(false),
            Some(parent) => parent,
        };
        if let Some(children) = self.arena.get_mut(parent).and_then(Node::children_mut) {
            children.retain(|child| *child != id);
        }

        Ok(true)
    }

    /// Detaches the node and destroys it together with its subtree.
    pub fn remove(&mut self, id: NodeId) -> Result<(), DocumentError> {
        self.detach(id)?;
        self.destroy(id);
        Ok(())
    }

    /// Detaches and destroys all children of the node.
    pub fn clear_children(&mut self, id: NodeId) -> Result<(), DocumentError> {
        let children = match self.node_mut(id)?.children_mut() {
            Some(children) => std::mem::take(children),
            None => return Ok(()),
        };
        for child in children {
            if let Some(node) = self.arena.get_mut(child) {
                node.parent = None;
            }
            self.destroy(child);
        }

        Ok(())
    }

    /// Changes the text of a text, comment or processing instruction node.
    pub fn set_value(&mut self, id: NodeId, value: &str) -> Result<(), DocumentError> {
        match &mut self.node_mut(id)?.payload {
            NodePayload::Text(old)
            | NodePayload::Comment(old)
            | NodePayload::ProcessingInstruction(old) => {
                value.clone_into(old);
                Ok(())
            }
            _ => Err(DocumentError::BadEdit(description::NO_VALUE)),
        }
    }

    /// Renames an element. Namespaces must be resolved again afterwards.
    pub fn set_name(&mut self, id: NodeId, name: &str) -> Result<(), DocumentError> {
        name.clone_into(&mut self.element_mut(id)?.name);
        Ok(())
    }

    /// Appends an attribute, even if one with the same name exists.
    ///
    /// `xmlns` and `xmlns:prefix` names declare a namespace instead.
    pub fn append_attribute(
        &mut self,
        id: NodeId,
        name: &str,
        value: &str,
    ) -> Result<(), DocumentError> {
        self.element_mut(id)?.add_attribute(name, value);
        Ok(())
    }

    /// Sets the value of the first attribute with the qualified `name`.
    ///
    /// Appends a new attribute if there is none. A `None` value removes
    /// every attribute with that name.
    pub fn set_attribute(
        &mut self,
        id: NodeId,
        name: &str,
        value: Option<&str>,
    ) -> Result<(), DocumentError> {
        let element = self.element_mut(id)?;
        match value {
            None => element
                .attributes
                .retain(|attr| attr.qualified_name() != name),
            Some(value) => {
                match element
                    .attributes
                    .iter_mut()
                    .find(|attr| attr.qualified_name() == name)
                {
                    Some(attr) => *attr = Attribute::new(name, value),
                    None => element.add_attribute(name, value),
                }
            }
        }

        Ok(())
    }

    /// Removes the first attribute with the qualified `name`.
    ///
    /// Returns `false` if there was no such attribute.
    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> Result<bool, DocumentError> {
        let element = self.element_mut(id)?;
        match element
            .attributes
            .iter()
            .position(|attr| attr.qualified_name() == name)
        {
            Some(index) => {
                element.attributes.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn clear_attributes(&mut self, id: NodeId) -> Result<(), DocumentError> {
        self.element_mut(id)?.attributes.clear();
        Ok(())
    }

    /// Declares `prefix` on the element. An empty prefix sets the default namespace.
    ///
    /// Bindings are updated by the next [resolve_namespaces()](Document::resolve_namespaces).
    pub fn declare_namespace(
        &mut self,
        id: NodeId,
        prefix: &str,
        uri: &str,
    ) -> Result<(), DocumentError> {
        self.element_mut(id)?.declare(prefix, uri);
        Ok(())
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.root(), f)
    }
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Document ({})", self.arena.stats())
    }
}

impl FromStr for Document {
    type Err = DocumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut doc = Document::new();
        doc.parse_str(s)?;
        Ok(doc)
    }
}


mod nocompile;

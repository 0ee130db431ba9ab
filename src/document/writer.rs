/*
** This file is a part of minixml (minimal XML document library)
** Copyright (C) 2000-2025 Gurer Ozen
**
** minixml is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use std::fmt;
use std::io;

use crate::NodeId;
use crate::entities::escape_fmt;
use crate::entities::escaped_size;

use super::Document;
use super::Element;
use super::Node;
use super::NodePayload;

/// Number of spaces per nesting level in the serialized output.
pub const DEFAULT_INDENT_WIDTH: usize = 2;

/// Serialization settings of a [Document](crate::Document).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct WriteOptions {
    /// Number of spaces per nesting level.
    pub indent_width: usize,
    /// Encode the predefined entities in text content.
    ///
    /// Text is decoded when parsed, so this keeps the round trip of parsed
    /// text exact. Text built by hand that contains `-`, `=`, `/`, `?` or
    /// `>` comes back as several text nodes, since those characters split
    /// words. Attribute values are always written as they are, inside `'`
    /// when they contain `"`.
    pub escape_text: bool,
}

impl WriteOptions {
    pub fn new() -> Self {
        WriteOptions {
            indent_width: DEFAULT_INDENT_WIDTH,
            escape_text: true,
        }
    }

    pub fn with_indent_width(mut self, indent_width: usize) -> Self {
        self.indent_width = indent_width;
        self
    }

    pub fn with_escape_text(mut self, escape_text: bool) -> Self {
        self.escape_text = escape_text;
        self
    }
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self::new()
    }
}

pub(super) fn clamp_depth(depth: i32) -> usize {
    usize::try_from(depth).unwrap_or(0)
}

enum VisitorStep<'a> {
    StartTag(&'a Element, usize),
    EndTag(&'a Element, usize),
    Leaf(&'a NodePayload, usize),
}

struct Frame<'a> {
    node: &'a Node,
    next: usize,
    level: usize,
}

/// Depth first walk of a subtree in document order.
///
/// Elements are visited twice, once going down and once coming back up.
/// The document node produces no steps itself, its children stay at
/// the level of the document.
struct Visitor<'a> {
    doc: &'a Document,
    pending: Option<(&'a Node, usize)>,
    stack: Vec<Frame<'a>>,
}

impl<'a> Visitor<'a> {
    fn new(doc: &'a Document, start: NodeId, level: usize) -> Visitor<'a> {
        Visitor {
            doc,
            pending: doc.node(start).map(|node| (node, level)),
            stack: Vec::new(),
        }
    }
}

impl<'a> Iterator for Visitor<'a> {
    type Item = VisitorStep<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((node, level)) = self.pending.take() {
                match &node.payload {
                    NodePayload::Document(_) => {
                        self.stack.push(Frame {
                            node,
                            next: 0,
                            level,
                        });
                    }
                    NodePayload::Element(element) => {
                        self.stack.push(Frame {
                            node,
                            next: 0,
                            level,
                        });
                        return Some(VisitorStep::StartTag(element, level));
                    }
                    payload => return Some(VisitorStep::Leaf(payload, level)),
                }
            }

            let frame = self.stack.last_mut()?;
            let node: &'a Node = frame.node;
            match node.children().get(frame.next).copied() {
                Some(child) => {
                    frame.next += 1;
                    let level = match node.payload {
                        NodePayload::Element(_) => frame.level + 1,
                        _ => frame.level,
                    };
                    // Stale children are silently skipped
                    self.pending = self.doc.node(child).map(|node| (node, level));
                }
                None => {
                    let frame = self.stack.pop()?;
                    if let NodePayload::Element(element) = &frame.node.payload {
                        return Some(VisitorStep::EndTag(element, frame.level));
                    }
                }
            }
        }
    }
}

/// Removes the space appended to every comment token by the parser.
fn comment_text(value: &str) -> &str {
    value.strip_suffix(' ').unwrap_or(value)
}

fn declaration_name_size(prefix: &str) -> usize {
    if prefix.is_empty() {
        "xmlns".len()
    } else {
        "xmlns:".len() + prefix.len()
    }
}

// Values are never encoded, so the quote is picked to avoid the contents.
// A value holding both quote kinds cannot be written back faithfully.
fn value_quote(value: &str) -> char {
    if value.contains('"') { '\'' } else { '"' }
}

fn write_value<W: fmt::Write + ?Sized>(value: &str, out: &mut W) -> fmt::Result {
    let quote = value_quote(value);
    write!(out, "={quote}{value}{quote}")
}

/// Serializer shared by the string, size and stream outputs.
pub(super) struct Writer<'a> {
    doc: &'a Document,
    options: WriteOptions,
}

impl<'a> Writer<'a> {
    pub(super) fn new(doc: &'a Document, options: WriteOptions) -> Writer<'a> {
        Writer { doc, options }
    }

    fn indent_size(&self, level: usize) -> usize {
        level * self.options.indent_width
    }

    fn text_size(&self, value: &str) -> usize {
        if self.options.escape_text {
            escaped_size(value)
        } else {
            value.len()
        }
    }

    /// Exact number of bytes [write()](Writer::write) produces.
    pub(super) fn size(&self, start: NodeId, depth: usize) -> usize {
        let mut size = 0;
        for step in Visitor::new(self.doc, start, depth) {
            match step {
                VisitorStep::StartTag(element, level) => {
                    size += self.indent_size(level);
                    size += 1; // Tag opening '<'
                    size += element.name.len();
                    for ns in &element.namespaces {
                        size += 1; // space
                        size += declaration_name_size(ns.prefix());
                        size += 2; // '=' and opening quote
                        size += ns.uri().len();
                        size += 1; // closing quote
                    }
                    for attr in &element.attributes {
                        size += 1;
                        size += attr.qualified_name().len();
                        size += 2;
                        size += attr.value().len();
                        size += 1;
                    }
                    if element.children.is_empty() {
                        size += 3; // Standalone tag closing '/>' and newline
                    } else {
                        size += 2;
                    }
                }
                VisitorStep::EndTag(element, level) => {
                    if !element.children.is_empty() {
                        size += self.indent_size(level);
                        size += 2; // End tag opening '</'
                        size += element.name.len();
                        size += 2; // '>' and newline
                    }
                }
                VisitorStep::Leaf(payload, level) => {
                    size += self.indent_size(level);
                    size += match payload {
                        NodePayload::Text(value) => self.text_size(value),
                        NodePayload::Comment(value) => "<!---->".len() + comment_text(value).len(),
                        NodePayload::ProcessingInstruction(value) => "<??>".len() + value.len(),
                        _ => 0,
                    };
                    size += 1;
                }
            }
        }

        size
    }

    fn write_indent<W: fmt::Write + ?Sized>(&self, level: usize, out: &mut W) -> fmt::Result {
        write!(out, "{:1$}", "", self.indent_size(level))
    }

    pub(super) fn write<W: fmt::Write + ?Sized>(
        &self,
        start: NodeId,
        depth: usize,
        out: &mut W,
    ) -> fmt::Result {
        for step in Visitor::new(self.doc, start, depth) {
            match step {
                VisitorStep::StartTag(element, level) => {
                    self.write_indent(level, out)?;
                    out.write_char('<')?;
                    out.write_str(&element.name)?;
                    for ns in &element.namespaces {
                        if ns.prefix().is_empty() {
                            out.write_str(" xmlns")?;
                        } else {
                            write!(out, " xmlns:{}", ns.prefix())?;
                        }
                        write_value(ns.uri(), out)?;
                    }
                    for attr in &element.attributes {
                        write!(out, " {}", attr.qualified_name())?;
                        write_value(attr.value(), out)?;
                    }
                    if element.children.is_empty() {
                        out.write_str("/>\n")?;
                    } else {
                        out.write_str(">\n")?;
                    }
                }
                VisitorStep::EndTag(element, level) => {
                    if !element.children.is_empty() {
                        self.write_indent(level, out)?;
                        out.write_str("</")?;
                        out.write_str(&element.name)?;
                        out.write_str(">\n")?;
                    }
                }
                VisitorStep::Leaf(payload, level) => {
                    self.write_indent(level, out)?;
                    match payload {
                        NodePayload::Text(value) => {
                            if self.options.escape_text {
                                escape_fmt(value, out)?;
                            } else {
                                out.write_str(value)?;
                            }
                        }
                        NodePayload::Comment(value) => {
                            write!(out, "<!--{}-->", comment_text(value))?;
                        }
                        NodePayload::ProcessingInstruction(value) => {
                            write!(out, "<?{value}?>")?;
                        }
                        _ => {}
                    }
                    out.write_char('\n')?;
                }
            }
        }

        Ok(())
    }
}

/// Adapts a byte stream to the `fmt::Write` interface of the writer,
/// keeping the I/O error which `fmt::Error` cannot carry.
struct IoAdapter<'w, W: io::Write + ?Sized> {
    inner: &'w mut W,
    error: Option<io::Error>,
}

impl<W: io::Write + ?Sized> fmt::Write for IoAdapter<'_, W> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.inner.write_all(s.as_bytes()).map_err(|err| {
            self.error = Some(err);
            fmt::Error
        })
    }
}

pub(super) fn write_io<W: io::Write + ?Sized>(
    writer: &Writer<'_>,
    start: NodeId,
    depth: usize,
    out: &mut W,
) -> io::Result<()> {
    let mut adapter = IoAdapter {
        inner: out,
        error: None,
    };
    match writer.write(start, depth, &mut adapter) {
        Ok(()) => Ok(()),
        Err(_) => Err(adapter
            .error
            .unwrap_or_else(|| io::Error::other("formatter error"))),
    }
}

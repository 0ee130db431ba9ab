/*
** This file is a part of minixml (minimal XML document library)
** Copyright (C) 2000-2025 Gurer Ozen
**
** minixml is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use tracing::debug;
use tracing::trace;

use crate::Document;
use crate::NodeId;
use crate::document::Element;
use crate::document::Node;
use crate::document::NodePayload;
use crate::entities::unescape;

use super::ParseError;
use super::Token;
use super::TokenKind;
use super::TokenKind::{Dash, Equals, Exclamation, Gt, Identifier, Lt, Question, Slash};

/// Recursive descent builder of the document tree.
///
/// Every parse function takes the same `at` position and leaves it
/// after the last token it consumed, so the lookahead seen by the
/// caller always continues exactly where the callee stopped.
pub(crate) struct TreeBuilder<'t> {
    tokens: &'t [Token],
}

impl<'t> TreeBuilder<'t> {
    pub(crate) fn new(tokens: &'t [Token]) -> Self {
        TreeBuilder { tokens }
    }

    fn kind(&self, at: usize) -> Option<TokenKind> {
        self.tokens.get(at).map(|token| token.kind)
    }

    fn literal(&self, at: usize) -> &'t str {
        match self.tokens.get(at) {
            Some(token) => &token.literal,
            None => "",
        }
    }

    fn starts(&self, at: usize, first: TokenKind, second: TokenKind) -> bool {
        self.kind(at) == Some(first) && self.kind(at + 1) == Some(second)
    }

    fn at_comment_end(&self, at: usize) -> bool {
        self.starts(at, Dash, Dash) && self.kind(at + 2) == Some(Gt)
    }

    /// Builds the top level nodes into `doc` without attaching them.
    ///
    /// On error every node created so far is destroyed again.
    pub(crate) fn build(&self, doc: &mut Document) -> Result<Vec<NodeId>, ParseError> {
        let mut at = 0;
        let mut nodes = Vec::new();
        if let Err(err) = self.parse_document(doc, &mut at, &mut nodes) {
            for id in nodes {
                doc.destroy(id);
            }
            return Err(err);
        }
        debug!(tokens = self.tokens.len(), nodes = nodes.len(), "built document tree");

        Ok(nodes)
    }

    fn parse_document(
        &self,
        doc: &mut Document,
        at: &mut usize,
        nodes: &mut Vec<NodeId>,
    ) -> Result<(), ParseError> {
        while *at < self.tokens.len() {
            match (self.kind(*at), self.kind(*at + 1)) {
                (Some(Lt), Some(Identifier)) => nodes.push(self.parse_element(doc, at)?),
                (Some(Lt), Some(Exclamation)) => {
                    if let Some(comment) = self.parse_markup(doc, at)? {
                        nodes.push(comment);
                    }
                }
                (Some(Lt), Some(Question)) => nodes.push(self.parse_pi(doc, at)?),
                _ => {
                    trace!(token = self.literal(*at), "skipping stray top level token");
                    *at += 1;
                }
            }
        }
        Ok(())
    }

    fn parse_element(&self, doc: &mut Document, at: &mut usize) -> Result<NodeId, ParseError> {
        *at += 1;
        let name = self.literal(*at);
        *at += 1;

        let mut element = Element::new(name);
        while self.starts(*at, Identifier, Equals) {
            let attribute_name = self.literal(*at);
            *at += 2;
            let value = match self.kind(*at) {
                Some(TokenKind::String | Identifier) => {
                    let value = self.literal(*at);
                    *at += 1;
                    value
                }
                _ => "",
            };
            element.add_attribute(attribute_name, value);
        }
        let id = doc.insert_node(Node::new(NodePayload::Element(element)))?;

        if self.starts(*at, Slash, Gt) {
            *at += 2;
            return Ok(id);
        }
        if self.kind(*at) == Some(Gt) {
            *at += 1;
        }
        if let Err(err) = self.parse_content(doc, id, name, at) {
            doc.destroy(id);
            return Err(err);
        }

        Ok(id)
    }

    fn parse_content(
        &self,
        doc: &mut Document,
        parent: NodeId,
        name: &str,
        at: &mut usize,
    ) -> Result<(), ParseError> {
        loop {
            match (self.kind(*at), self.kind(*at + 1)) {
                // Input ended inside the element, keep what we have
                (None, _) => return Ok(()),
                (Some(Lt), Some(Slash)) => break,
                (Some(Lt), Some(Identifier | TokenKind::String)) => {
                    let child = self.parse_element(doc, at)?;
                    doc.attach(parent, child);
                }
                (Some(Lt), Some(Exclamation)) => {
                    if let Some(child) = self.parse_markup(doc, at)? {
                        doc.attach(parent, child);
                    }
                }
                (Some(Lt), Some(Question)) => {
                    let child = self.parse_pi(doc, at)?;
                    doc.attach(parent, child);
                }
                (Some(Identifier | TokenKind::String), _) => {
                    let child = self.parse_text(doc, at)?;
                    doc.attach(parent, child);
                }
                _ => *at += 1,
            }
        }

        let location = self.tokens[*at].location;
        *at += 2;
        let found = match self.kind(*at) {
            Some(Identifier | TokenKind::String) => {
                let found = self.literal(*at);
                *at += 1;
                found
            }
            _ => "",
        };
        if found != name {
            debug!(expected = name, found, %location, "end tag mismatch");
            return Err(ParseError::TagMismatch {
                expected: name.to_string(),
                found: found.to_string(),
                location,
            });
        }
        if self.kind(*at) == Some(Gt) {
            *at += 1;
        }

        Ok(())
    }

    fn parse_text(&self, doc: &mut Document, at: &mut usize) -> Result<NodeId, ParseError> {
        let mut words = Vec::new();
        while let Some(TokenKind::String | Identifier) = self.kind(*at) {
            words.push(self.literal(*at));
            *at += 1;
        }
        let text = unescape(&words.join(" "));

        Ok(doc.insert_node(Node::new(NodePayload::Text(text)))?)
    }

    /// Parses a `<!-- -->` comment, or skips a `<!...>` declaration.
    fn parse_markup(&self, doc: &mut Document, at: &mut usize) -> Result<Option<NodeId>, ParseError> {
        *at += 2;
        if !self.starts(*at, Dash, Dash) {
            trace!(token = self.literal(*at), "skipping markup declaration");
            while let Some(kind) = self.kind(*at) {
                *at += 1;
                if kind == Gt {
                    break;
                }
            }
            return Ok(None);
        }
        *at += 2;

        let mut text = String::new();
        while *at < self.tokens.len() && !self.at_comment_end(*at) {
            text.push_str(self.literal(*at));
            text.push(' ');
            *at += 1;
        }
        if self.at_comment_end(*at) {
            *at += 3;
        }

        Ok(Some(doc.insert_node(Node::new(NodePayload::Comment(text)))?))
    }

    /// Parses a `<? ?>` processing instruction, putting back the `=` and
    /// quotes of its pseudo attributes.
    fn parse_pi(&self, doc: &mut Document, at: &mut usize) -> Result<NodeId, ParseError> {
        *at += 2;

        let mut text = String::new();
        while let Some(kind) = self.kind(*at) {
            let literal = self.literal(*at);
            match kind {
                Question => break,
                Identifier if self.kind(*at + 1) == Some(Equals) => {
                    text.push(' ');
                    text.push_str(literal);
                }
                Equals => text.push_str("=\""),
                TokenKind::String => {
                    text.push_str(literal);
                    text.push('"');
                }
                _ => text.push_str(literal),
            }
            *at += 1;
        }
        if self.kind(*at) == Some(Question) {
            *at += 1;
            if self.kind(*at) == Some(Gt) {
                *at += 1;
            }
        }

        Ok(doc.insert_node(Node::new(NodePayload::ProcessingInstruction(text)))?)
    }
}

/*
** This file is a part of minixml (minimal XML document library)
** Copyright (C) 2000-2025 Gurer Ozen
**
** minixml is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use super::Location;

/// Kind of a lexical token.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TokenKind {
    /// `<`
    Lt,
    /// `>`
    Gt,
    /// `/`
    Slash,
    /// `=`
    Equals,
    /// A bare word such as a tag name, an attribute name or a word of text.
    Identifier,
    /// A single or double quoted string. The literal excludes the quotes.
    String,
    /// `?`
    Question,
    /// `-`
    Dash,
    /// `!`
    Exclamation,
}

/// A lexical token with its text and the location of its first character.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub literal: String,
    pub location: Location,
}

impl Token {
    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

macro_rules! whitespace {
    () => {
        ' ' | '\t' | '\r' | '\n' | '\x0B' | '\x0C'
    };
}

macro_rules! word_end {
    () => {
        whitespace!() | '<' | '>' | '=' | '/' | '?' | '-'
    };
}

/// Single pass scanner over the source text.
///
/// Scanning never fails: anything which is not a delimiter, a quoted
/// string or whitespace becomes part of an identifier. Note that `!`
/// can be inside an identifier but `-` cannot, which keeps the comment
/// delimiters separate from the words around them.
pub struct Tokenizer<'a> {
    rest: &'a str,
    location: Location,
}

impl<'a> Tokenizer<'a> {
    pub fn new(source: &'a str) -> Self {
        Tokenizer {
            rest: source,
            location: Location::new(),
        }
    }

    pub fn location(&self) -> Location {
        self.location
    }

    fn peek(&self) -> Option<char> {
        self.rest.chars().next()
    }

    fn bump(&mut self, c: char) {
        self.rest = &self.rest[c.len_utf8()..];
        self.location.advance(c);
    }

    fn take_while(&mut self, mut pred: impl FnMut(char) -> bool) -> &'a str {
        let rest = self.rest;
        let mut len = 0;
        for c in rest.chars() {
            if !pred(c) {
                break;
            }
            len += c.len_utf8();
            self.location.advance(c);
        }
        self.rest = &rest[len..];
        &rest[..len]
    }
}

impl Iterator for Tokenizer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        self.take_while(|c| matches!(c, whitespace!()));
        let c = self.peek()?;
        let location = self.location;

        let single = match c {
            '<' => Some(TokenKind::Lt),
            '>' => Some(TokenKind::Gt),
            '=' => Some(TokenKind::Equals),
            '/' => Some(TokenKind::Slash),
            '?' => Some(TokenKind::Question),
            '-' => Some(TokenKind::Dash),
            '!' => Some(TokenKind::Exclamation),
            _ => None,
        };
        if let Some(kind) = single {
            self.bump(c);
            return Some(Token {
                kind,
                literal: c.to_string(),
                location,
            });
        }

        if c == '"' || c == '\'' {
            self.bump(c);
            let literal = self.take_while(|x| x != c).to_string();
            // Unterminated strings silently run to the end of input
            if self.peek() == Some(c) {
                self.bump(c);
            }
            return Some(Token {
                kind: TokenKind::String,
                literal,
                location,
            });
        }

        let literal = self.take_while(|x| !matches!(x, word_end!())).to_string();
        Some(Token {
            kind: TokenKind::Identifier,
            literal,
            location,
        })
    }
}

/// Converts the whole source text into a token sequence.
pub fn tokenize(source: &str) -> Vec<Token> {
    Tokenizer::new(source).collect()
}

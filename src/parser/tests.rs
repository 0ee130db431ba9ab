/*
** This file is a part of minixml (minimal XML document library)
** Copyright (C) 2000-2025 Gurer Ozen
**
** minixml is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use super::TokenKind::*;
use super::*;
use crate::Document;
use crate::DocumentError;
use crate::NodeType;

fn check_tokens(s: &str, expected: &[(TokenKind, &str)]) {
    let tokens = tokenize(s);
    let found: Vec<(TokenKind, &str)> = tokens
        .iter()
        .map(|token| (token.kind, token.literal.as_str()))
        .collect();
    assert_eq!(found, expected);
}

fn parse_error(s: &str) -> ParseError {
    match s.parse::<Document>() {
        Err(DocumentError::Parse(err)) => err,
        other => panic!("expected a parse error, got {:?}", other.map(|doc| doc.to_string())),
    }
}

#[test]
fn tokens() {
    check_tokens(
        "<a x=\"1\">hi</a>",
        &[
            (Lt, "<"),
            (Identifier, "a"),
            (Identifier, "x"),
            (Equals, "="),
            (String, "1"),
            (Gt, ">"),
            (Identifier, "hi"),
            (Lt, "<"),
            (Slash, "/"),
            (Identifier, "a"),
            (Gt, ">"),
        ],
    );
    check_tokens(
        "<?pi?><b/>",
        &[
            (Lt, "<"),
            (Question, "?"),
            (Identifier, "pi"),
            (Question, "?"),
            (Gt, ">"),
            (Lt, "<"),
            (Identifier, "b"),
            (Slash, "/"),
            (Gt, ">"),
        ],
    );
    check_tokens("", &[]);
    check_tokens(" \t\r\n\x0B\x0C ", &[]);
}

#[test]
fn comment_tokens() {
    check_tokens(
        "<!-- hi-there -->",
        &[
            (Lt, "<"),
            (Exclamation, "!"),
            (Dash, "-"),
            (Dash, "-"),
            (Identifier, "hi"),
            (Dash, "-"),
            (Identifier, "there"),
            (Dash, "-"),
            (Dash, "-"),
            (Gt, ">"),
        ],
    );
}

#[test]
fn identifier_characters() {
    // Quotes and exclamation marks only start tokens of their own
    check_tokens(
        "say it's fine! \"quoted\"",
        &[
            (Identifier, "say"),
            (Identifier, "it's"),
            (Identifier, "fine!"),
            (String, "quoted"),
        ],
    );
    check_tokens(
        "a&amp;b;c",
        &[(Identifier, "a&amp;b;c")],
    );
}

#[test]
fn strings() {
    check_tokens(
        "'a \"b\" c' \"d 'e' f\" '' '<>=/?-!'",
        &[
            (String, "a \"b\" c"),
            (String, "d 'e' f"),
            (String, ""),
            (String, "<>=/?-!"),
        ],
    );
    // Unterminated strings run to the end of input
    check_tokens(
        "<a x='oops>",
        &[
            (Lt, "<"),
            (Identifier, "a"),
            (Identifier, "x"),
            (Equals, "="),
            (String, "oops>"),
        ],
    );
}

#[test]
fn utf8() {
    let tokens = tokenize("<ş>ğü</ş>");
    assert_eq!(tokens[1].literal, "ş");
    assert_eq!(tokens[3].literal, "ğü");
    assert_eq!(
        tokens[4].location,
        Location {
            bytes: 8,
            lines: 0,
            column: 5,
        }
    );
}

#[test]
fn locations() {
    let s = "<a>\n  <b/>\n</a>";
    let tokens = tokenize(s);
    assert_eq!(tokens[3].literal, "<");
    assert_eq!(
        tokens[3].location,
        Location {
            bytes: 6,
            lines: 1,
            column: 2,
        }
    );

    let mut tokenizer = Tokenizer::new(s);
    assert_eq!(tokenizer.by_ref().count(), tokens.len());
    assert_eq!(
        tokenizer.location(),
        Location {
            bytes: s.len(),
            lines: 2,
            column: 4,
        }
    );
    assert_eq!(
        tokenizer.location().to_string(),
        "byte: 15, line: 2, column: 4"
    );
}

#[test]
fn tag_mismatch() {
    let err = parse_error("<a><b></a></b>");
    assert_eq!(
        err,
        ParseError::TagMismatch {
            expected: "b".to_string(),
            found: "a".to_string(),
            location: Location {
                bytes: 6,
                lines: 0,
                column: 6,
            },
        }
    );
    assert_eq!(
        err.to_string(),
        "end tag mismatch at byte: 6, line: 0, column: 6: expected 'b', got 'a'"
    );

    assert!(matches!(
        parse_error("<a></>"),
        ParseError::TagMismatch { expected, found, .. } if expected == "a" && found.is_empty()
    ));
    assert!(matches!(
        parse_error("<a>\n<b/>\n</c>"),
        ParseError::TagMismatch { location: Location { lines: 2, column: 0, .. }, .. }
    ));
}

#[test]
fn failed_parse_keeps_nothing() {
    let mut doc = Document::new();
    assert!(doc.parse_str("<a><b><c>text</c><d/></b></x>").is_err());
    assert_eq!(doc.arena_stats().nr_live, 1);
    assert!(doc.root().first_child().is_null());

    doc.parse_str("<x y='1'/>").unwrap();
    assert!(doc.parse_str("<!-- c --><a><b></a>").is_err());
    assert_eq!(doc.to_string(), "<x y=\"1\"/>\n");
    assert_eq!(doc.arena_stats().nr_live, 2);
    assert_eq!(doc.source(), "<x y='1'/>");
}

#[test]
fn stray_tokens() {
    let doc: Document = "hello > = / <a/> world ? - !".parse().unwrap();
    assert_eq!(doc.root().children().count(), 1);
    assert_eq!(doc.first_child().name(), "a");
}

#[test]
fn attributes() {
    let doc: Document = "<a x='1' y=\"two words\" z=3 e='' w='&lt;'/>".parse().unwrap();
    let a = doc.find_tag("a");
    let attrs: Vec<(&str, &str)> = a
        .attributes()
        .map(|attr| (attr.qualified_name(), attr.value()))
        .collect();
    assert_eq!(
        attrs,
        [
            ("x", "1"),
            ("y", "two words"),
            ("z", "3"),
            ("e", ""),
            ("w", "&lt;")
        ]
    );
    assert!(a.first_child().is_null());

    // Duplicates are kept in order
    let doc: Document = "<a x='1' x='2'/>".parse().unwrap();
    assert_eq!(doc.find_tag("a").attributes().count(), 2);
    assert_eq!(doc.find_tag("a").attribute("x"), Some("1"));
}

#[test]
fn self_closing() {
    for s in ["<a/>", "<a></a>", "<a ></a >"] {
        let doc: Document = s.parse().unwrap();
        let a = doc.find_tag("a");
        assert!(a.is_element());
        assert_eq!(a.children().count(), 0);
        assert_eq!(doc.to_string(), "<a/>\n");
    }
}

#[test]
fn text() {
    let doc: Document = "<a>  hello   big\n world  </a>".parse().unwrap();
    assert_eq!(doc.find_tag("a").first_child().value(), "hello big world");

    let doc: Document = "<a>a &lt; b &amp; c</a>".parse().unwrap();
    assert_eq!(doc.find_tag("a").first_child().value(), "a < b & c");

    let doc: Document = "<a>&foo; &#65; &</a>".parse().unwrap();
    assert_eq!(doc.find_tag("a").first_child().value(), "&foo; &#65; &");
}

#[test]
fn mixed_content() {
    let doc: Document = "<p>Hello <b>big</b> world</p>".parse().unwrap();
    let children: Vec<(NodeType, &str, &str)> = doc
        .find_tag("p")
        .children()
        .filter_map(|c| Some((c.node_type()?, c.name(), c.value())))
        .collect();
    assert_eq!(
        children,
        [
            (NodeType::Text, "", "Hello"),
            (NodeType::Element, "b", ""),
            (NodeType::Text, "", "world"),
        ]
    );
    assert_eq!(doc.find_tag("p").find_tag("b").first_child().value(), "big");
}

#[test]
fn comments() {
    let doc: Document = "<!-- top --><a><!-- a-b  c --><b/></a><!--end-->".parse().unwrap();
    let top: Vec<(NodeType, &str)> = doc
        .root()
        .children()
        .filter_map(|c| Some((c.node_type()?, c.value())))
        .collect();
    assert_eq!(
        top,
        [
            (NodeType::Comment, "top "),
            (NodeType::Element, ""),
            (NodeType::Comment, "end "),
        ]
    );
    let comment = doc.find_tag("a").first_child();
    assert_eq!(comment.node_type(), Some(NodeType::Comment));
    assert_eq!(comment.value(), "a - b c ");
    assert_eq!(comment.next().name(), "b");

    // Entities stay encoded in comments
    let doc: Document = "<a><!-- &lt; --></a>".parse().unwrap();
    assert_eq!(doc.find_tag("a").first_child().value(), "&lt; ");
}

#[test]
fn markup_declarations() {
    let doc: Document = "<!DOCTYPE note SYSTEM \"note.dtd\">\n<note><to/></note>"
        .parse()
        .unwrap();
    assert_eq!(doc.root().children().count(), 1);
    assert_eq!(doc.first_child().name(), "note");
    assert_eq!(doc.first_child().first_tag().name(), "to");
}

#[test]
fn processing_instructions() {
    let doc: Document = "<?xml version=\"1.0\" encoding='UTF-8'?>\n<a><?php echo?></a>"
        .parse()
        .unwrap();
    let pi = doc.first_child();
    assert_eq!(pi.node_type(), Some(NodeType::ProcessingInstruction));
    assert_eq!(pi.value(), "xml version=\"1.0\" encoding=\"UTF-8\"");
    assert_eq!(pi.next().name(), "a");

    let pi = doc.find_tag("a").first_child();
    assert_eq!(pi.node_type(), Some(NodeType::ProcessingInstruction));
    assert_eq!(pi.value(), "phpecho");
    assert!(pi.next().is_null());
}

#[test]
fn unclosed_elements() {
    let doc: Document = "<a><b>text".parse().unwrap();
    let b = doc.find_tag("a").find_tag("b");
    assert_eq!(b.first_child().value(), "text");
    assert_eq!(doc.to_string(), "<a>\n  <b>\n    text\n  </b>\n</a>\n");
}

#[test]
fn tokens_are_kept() {
    let mut doc = Document::new();
    doc.parse_str("<a>b</a>").unwrap();
    assert_eq!(doc.source(), "<a>b</a>");
    assert_eq!(doc.tokens().len(), 8);
    assert!(doc.tokens()[5].is(Slash));
}

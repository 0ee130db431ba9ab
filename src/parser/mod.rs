/*
** This file is a part of minixml (minimal XML document library)
** Copyright (C) 2000-2025 Gurer Ozen
**
** minixml is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

//! Tokenizer and recursive descent tree builder.
//!
//! Parsing happens in two complete passes: the whole source text is
//! first converted into a [Token] vector by [tokenize], then the
//! tree builder walks the tokens and creates the nodes. The
//! [Document](crate::Document) runs both and then resolves namespaces.
//!
//! The accepted grammar is deliberately loose:
//! ```text
//! document := (comment | processing-instruction)* element (comment)*
//! element  := '<' qname attribute* ( '/>' | '>' content '</' qname '>' )
//! attribute := identifier '=' string
//! content  := (element | text | comment | processing-instruction)*
//! comment  := '<!' ... '-->'
//! processing-instruction := '<?' (identifier | '=' | string)* '?>'
//! ```
//! Tokens which do not fit anywhere are skipped. The only fatal
//! syntax error is a closing tag with a different name.

mod builder;
mod error;
mod location;
mod token;

pub(crate) use builder::TreeBuilder;
pub use error::ParseError;
pub use location::Location;
pub use token::Token;
pub use token::TokenKind;
pub use token::Tokenizer;
pub use token::tokenize;

#[cfg(test)]
mod tests;

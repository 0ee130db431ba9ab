/*
** This file is a part of minixml (minimal XML document library)
** Copyright (C) 2000-2025 Gurer Ozen
**
** minixml is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

mod arena;
mod document;
pub mod entities;
mod parser;

pub use arena::Arena;
pub use arena::ArenaStats;
pub use arena::NoMemory;
pub use arena::NodeId;

pub use parser::Location;
pub use parser::ParseError;
pub use parser::Token;
pub use parser::TokenKind;
pub use parser::Tokenizer;
pub use parser::tokenize;

pub use document::AncestorOrSelf;
pub use document::Attribute;
pub use document::Attributes;
pub use document::Children;
pub use document::Cursor;
pub use document::DEFAULT_INDENT_WIDTH;
pub use document::DescendantOrSelf;
pub use document::Document;
pub use document::DocumentError;
pub use document::NamespaceInfo;
pub use document::NamespaceRef;
pub use document::NodeType;
pub use document::WriteOptions;
pub use document::description;

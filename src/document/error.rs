/*
** This file is a part of minixml (minimal XML document library)
** Copyright (C) 2000-2025 Gurer Ozen
**
** minixml is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::NoMemory;
use crate::ParseError;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("not enough memory")]
    NoMemory,

    #[error("cannot read '{}': {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("cannot write '{}': {source}", path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid XML syntax: {0}")]
    Parse(ParseError),

    #[error("invalid document edit: {0}")]
    BadEdit(&'static str),
}

impl From<NoMemory> for DocumentError {
    fn from(_: NoMemory) -> Self {
        DocumentError::NoMemory
    }
}

impl From<ParseError> for DocumentError {
    fn from(err: ParseError) -> Self {
        match err {
            ParseError::NoMemory(_) => DocumentError::NoMemory,
            err => DocumentError::Parse(err),
        }
    }
}

pub mod description {
    pub const STALE_NODE: &str = "node does not exist in this document";
    pub const ALREADY_ATTACHED: &str = "node already has a parent";
    pub const NOT_A_CONTAINER: &str = "only document and element nodes can have children";
    pub const CYCLIC_APPEND: &str = "node cannot be appended inside its own subtree";
    pub const ROOT_EDIT: &str = "document root cannot be attached, detached or removed";
    pub const NOT_AN_ELEMENT: &str = "attributes and namespaces exist only on element nodes";
    pub const NO_VALUE: &str = "only text, comment and processing instruction nodes have values";
}

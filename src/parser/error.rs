/*
** This file is a part of minixml (minimal XML document library)
** Copyright (C) 2000-2025 Gurer Ozen
**
** minixml is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use thiserror::Error;

use crate::NoMemory;

use super::Location;

/// Type of the error which aborted building the document tree.
///
/// The tokenizer never fails and most malformed input is skipped, so
/// these categories are the only conditions the caller must handle.
/// When any of them is returned no part of the tree is kept.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum ParseError {
    /// The name in a closing tag is different from the open element.
    ///
    /// `location` points at the `<` of the closing tag.
    #[error("end tag mismatch at {location}: expected '{expected}', got '{found}'")]
    TagMismatch {
        expected: String,
        found: String,
        location: Location,
    },

    /// Nodes for the tree could not be allocated.
    #[error(transparent)]
    NoMemory(#[from] NoMemory),
}

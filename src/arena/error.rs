/*
** This file is a part of minixml (minimal XML document library)
** Copyright (C) 2000-2025 Gurer Ozen
**
** minixml is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use std::collections::TryReserveError;
use std::num::TryFromIntError;

use thiserror::Error;

/// Error type for node allocation failures.
///
/// Arena methods return this error when the slot vector cannot grow,
/// either because the allocator refused or because the handle space
/// is used up. Best action is to abort the current operation.
///
/// Details about the failed allocation are not included, the size of
/// the arena is always in relation to the size of the parsed input.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
#[error("not enough memory")]
pub struct NoMemory;

impl From<TryReserveError> for NoMemory {
    fn from(_: TryReserveError) -> Self {
        NoMemory
    }
}

impl From<TryFromIntError> for NoMemory {
    fn from(_: TryFromIntError) -> Self {
        NoMemory
    }
}

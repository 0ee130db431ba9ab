/*
** This file is a part of minixml (minimal XML document library)
** Copyright (C) 2000-2025 Gurer Ozen
**
** minixml is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

mod error;

use std::cmp;
use std::fmt::Display;

pub use error::NoMemory;

const MIN_NODE_SLOTS: usize = 32;

/// Handle of a value stored in an [Arena].
///
/// A handle stays valid until the value is removed. Removed slots are
/// reused with a new generation, so an old handle never refers to the
/// value which took its place.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct NodeId {
    index: u32,
    generation: u32,
}

impl NodeId {
    fn slot(self) -> usize {
        self.index as usize
    }
}

impl Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}.{}", self.index, self.generation)
    }
}

struct Slot<T> {
    generation: u32,
    value: Option<T>,
}

/// Slot storage for the document nodes.
///
/// All nodes of a document live in one vector and refer to each other
/// by [NodeId] handles, so the parent back links do not need any
/// reference counting or raw pointers.
pub struct Arena<T> {
    slots: Vec<Slot<T>>,
    free: Vec<u32>,
    nr_live: usize,
}

/// Memory usage statistics of an [Arena].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ArenaStats {
    /// Number of slots ever allocated.
    pub nr_slots: usize,
    /// Number of slots holding a value.
    pub nr_live: usize,
    /// Number of removed slots waiting for reuse.
    pub nr_free: usize,
}

impl Display for ArenaStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "slots: {}, live: {}, free: {}",
            self.nr_slots, self.nr_live, self.nr_free
        )
    }
}

impl<T> Arena<T> {
    /// Creates a new `Arena` with the default initial capacity.
    pub fn new() -> Arena<T> {
        Self::with_capacity(0)
    }

    pub fn with_capacity(nr_slots: usize) -> Arena<T> {
        let nr_slots = cmp::max(nr_slots, MIN_NODE_SLOTS);
        Arena {
            slots: Vec::with_capacity(nr_slots),
            free: Vec::new(),
            nr_live: 0,
        }
    }

    /// Creates a new `Arena` holding `value` in its first slot.
    ///
    /// The initial capacity is always allocated up front, so this cannot
    /// fail like [insert()](Arena::insert) can.
    pub fn with_root(value: T) -> (Arena<T>, NodeId) {
        let mut arena = Self::new();
        arena.slots.push(Slot {
            generation: 0,
            value: Some(value),
        });
        arena.nr_live = 1;
        let id = NodeId {
            index: 0,
            generation: 0,
        };

        (arena, id)
    }

    pub fn insert(&mut self, value: T) -> Result<NodeId, NoMemory> {
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.value = Some(value);
            self.nr_live += 1;
            return Ok(NodeId {
                index,
                generation: slot.generation,
            });
        }
        let index = u32::try_from(self.slots.len())?;
        self.slots.try_reserve(1)?;
        self.slots.push(Slot {
            generation: 0,
            value: Some(value),
        });
        self.nr_live += 1;

        Ok(NodeId {
            index,
            generation: 0,
        })
    }

    pub fn get(&self, id: NodeId) -> Option<&T> {
        match self.slots.get(id.slot()) {
            Some(slot) if slot.generation == id.generation => slot.value.as_ref(),
            _ => None,
        }
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut T> {
        match self.slots.get_mut(id.slot()) {
            Some(slot) if slot.generation == id.generation => slot.value.as_mut(),
            _ => None,
        }
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    /// Takes the value out and retires the handle.
    pub fn remove(&mut self, id: NodeId) -> Option<T> {
        let slot = match self.slots.get_mut(id.slot()) {
            Some(slot) if slot.generation == id.generation => slot,
            _ => return None,
        };
        let value = slot.value.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        self.nr_live -= 1;

        Some(value)
    }

    pub fn len(&self) -> usize {
        self.nr_live
    }

    pub fn is_empty(&self) -> bool {
        self.nr_live == 0
    }

    pub fn stats(&self) -> ArenaStats {
        ArenaStats {
            nr_slots: self.slots.len(),
            nr_live: self.nr_live,
            nr_free: self.free.len(),
        }
    }
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests;

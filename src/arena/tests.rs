/*
** This file is a part of minixml (minimal XML document library)
** Copyright (C) 2000-2025 Gurer Ozen
**
** minixml is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use super::*;

const CHARS: &str = "1234567890abcdefghijklmnopqrstuv";

#[test]
fn it_works() {
    let mut arena = Arena::new();
    assert!(arena.is_empty());

    let a = arena.insert("test".to_string()).unwrap();
    let b = arena.insert("moretest".to_string()).unwrap();
    assert_eq!(arena.len(), 2);
    assert_eq!(arena.get(a).map(String::as_str), Some("test"));
    assert_eq!(arena.get(b).map(String::as_str), Some("moretest"));

    arena.get_mut(a).unwrap().push('!');
    assert_eq!(arena.get(a).map(String::as_str), Some("test!"));
}

#[test]
fn many_inserts() {
    let mut arena = Arena::new();

    let mut ids = Vec::new();
    for _ in 0..1000 {
        for j in 0..CHARS.len() {
            ids.push(arena.insert(&CHARS[..j]).unwrap());
        }
    }
    assert_eq!(arena.len(), 1000 * CHARS.len());
    assert_eq!(arena.get(ids[33]), Some(&&CHARS[..1]));
    assert_eq!(arena.stats().nr_free, 0);
}

#[test]
fn removed_handles_are_stale() {
    let mut arena = Arena::new();

    let a = arena.insert(1).unwrap();
    assert_eq!(arena.remove(a), Some(1));
    assert!(!arena.contains(a));
    assert_eq!(arena.get(a), None);
    assert_eq!(arena.get_mut(a), None);
    assert_eq!(arena.remove(a), None);

    // The slot is reused, but the old handle must not see the new value
    let b = arena.insert(2).unwrap();
    assert_ne!(a, b);
    assert_eq!(arena.get(a), None);
    assert_eq!(arena.get(b), Some(&2));
    assert_eq!(arena.stats().nr_slots, 1);
}

#[test]
fn stats() {
    let mut arena = Arena::with_capacity(4);
    let ids: Vec<NodeId> = (0..10).map(|i| arena.insert(i).unwrap()).collect();
    arena.remove(ids[3]);
    arena.remove(ids[7]);

    let stats = arena.stats();
    assert_eq!(
        stats,
        ArenaStats {
            nr_slots: 10,
            nr_live: 8,
            nr_free: 2,
        }
    );
    assert_eq!(stats.to_string(), "slots: 10, live: 8, free: 2");
}

#[test]
fn handle_display() {
    let mut arena = Arena::new();
    let a = arena.insert(()).unwrap();
    arena.remove(a);
    let b = arena.insert(()).unwrap();
    assert_eq!(a.to_string(), "#0.0");
    assert_eq!(b.to_string(), "#0.1");
}

#[test]
fn root_slot() {
    let (mut arena, root) = Arena::with_root("root");
    assert_eq!(arena.len(), 1);
    assert_eq!(arena.get(root), Some(&"root"));
    assert_eq!(root.to_string(), "#0.0");

    let a = arena.insert("a").unwrap();
    assert_ne!(a, root);
    assert_eq!(arena.stats().nr_slots, 2);
}

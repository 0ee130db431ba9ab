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

use crate::NodeId;

use super::Cursor;
use super::Document;
use super::Node;
use super::NamespaceRef;

struct Bindings {
    element: Option<NamespaceRef>,
    attributes: Vec<Option<NamespaceRef>>,
}

impl Document {
    /// Binds every element and prefixed attribute to its namespace.
    ///
    /// Runs automatically after each parse. Call it again after editing
    /// names, attributes or declarations; running it on an up to date
    /// tree changes nothing.
    ///
    /// An element takes the nearest declaration of its prefix, or of the
    /// default namespace if it has no prefix; an empty URI there undoes
    /// the binding. Unprefixed attributes never have a namespace.
    pub fn resolve_namespaces(&mut self) {
        let elements: Vec<NodeId> = self
            .root()
            .descendant_or_self()
            .filter(Cursor::is_element)
            .filter_map(|cursor| cursor.id())
            .collect();

        let nr_elements = elements.len();
        for id in elements {
            let bindings = match self.bindings(id) {
                Some(bindings) => bindings,
                None => continue,
            };
            if let Some(element) = self.arena.get_mut(id).and_then(Node::element_mut) {
                element.namespace = bindings.element;
                for (attr, ns) in element.attributes.iter_mut().zip(bindings.attributes) {
                    attr.namespace = ns;
                }
            }
        }
        debug!(nr_elements, "resolved namespaces");
    }

    fn bindings(&self, id: NodeId) -> Option<Bindings> {
        let element = self.node(id)?.element()?;

        let prefix = element.prefix();
        let namespace = self
            .lookup_namespace(id, prefix)
            .filter(|ns| self.namespace_info(*ns).is_some_and(|info| !info.uri().is_empty()));
        if namespace.is_none() && !prefix.is_empty() {
            debug!(name = %element.name, "unresolved element prefix");
        }

        let attributes = element
            .attributes
            .iter()
            .map(|attr| {
                let prefix = attr.prefix()?;
                let ns = self.lookup_namespace(id, prefix);
                if ns.is_none() {
                    debug!(name = attr.qualified_name(), "unresolved attribute prefix");
                }
                ns
            })
            .collect();

        Some(Bindings {
            element: namespace,
            attributes,
        })
    }

    /// Finds the nearest declaration of `prefix` from `start` upwards.
    pub(crate) fn lookup_namespace(&self, start: NodeId, prefix: &str) -> Option<NamespaceRef> {
        self.cursor(start).ancestor_or_self().find_map(|cursor| {
            let owner = cursor.id()?;
            let index = self.node(owner)?.element()?.declaration(prefix)?;
            Some(NamespaceRef { owner, index })
        })
    }
}

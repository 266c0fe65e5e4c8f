// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Name lookup tables owned by namescope elements.

use alloc::boxed::Box;

use hashbrown::HashMap;

use crate::node::ElementId;

/// Maps names to elements within one namescope.
#[derive(Clone, Debug, Default)]
pub struct Namescope {
    names: HashMap<Box<str>, ElementId>,
}

impl Namescope {
    /// Element registered under `name`.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<ElementId> {
        self.names.get(name).copied()
    }

    /// Number of registered names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether no names are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Registered `(name, element)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, ElementId)> + '_ {
        self.names.iter().map(|(name, id)| (&**name, *id))
    }

    pub(crate) fn contains(&self, name: &str) -> bool {
        self.names.contains_key(name)
    }

    pub(crate) fn insert(&mut self, name: &str, id: ElementId) {
        self.names.insert(name.into(), id);
    }

    /// Removes `name` only if it still maps to `id`.
    pub(crate) fn remove(&mut self, name: &str, id: ElementId) {
        if self.names.get(name) == Some(&id) {
            self.names.remove(name);
        }
    }
}

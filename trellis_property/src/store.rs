// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-element sparse property storage.
//!
//! Each writable precedence level is a vector of `(PropertyId, ErasedValue)`
//! kept sorted by id and searched with binary search. Typical elements set a
//! handful of properties, so contiguous storage beats a hash map here.

use alloc::vec::Vec;
use smallvec::SmallVec;

use crate::id::{Property, PropertyId};
use crate::registry::PropertyRegistry;
use crate::value::{ErasedValue, PropertyValue};

const INLINE_CAPACITY: usize = 6;

type Layer = SmallVec<[(PropertyId, ErasedValue); INLINE_CAPACITY]>;

/// Writable precedence levels, lowest first.
///
/// Inherited and default values are not stored; see [`ValueSource`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Precedence {
    /// Written by the style cascade.
    Styled,
    /// Written explicitly by application code.
    Local,
    /// Written by a running storyboard; overlays everything else.
    Animated,
}

impl Precedence {
    /// Every stored level, lowest first.
    pub const ALL: [Self; 3] = [Self::Styled, Self::Local, Self::Animated];

    #[inline]
    const fn slot(self) -> usize {
        match self {
            Self::Styled => 0,
            Self::Local => 1,
            Self::Animated => 2,
        }
    }
}

/// Where an effective value came from.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ValueSource {
    /// Registry default.
    Default,
    /// Nearest logical ancestor with a value.
    Inherited,
    /// Style cascade.
    Styled,
    /// Explicit local write.
    Local,
    /// Running animation.
    Animated,
}

impl From<Precedence> for ValueSource {
    fn from(precedence: Precedence) -> Self {
        match precedence {
            Precedence::Styled => Self::Styled,
            Precedence::Local => Self::Local,
            Precedence::Animated => Self::Animated,
        }
    }
}

/// Stored property values of one element.
///
/// ```rust
/// use trellis_property::{Precedence, PropertyMetadata, PropertyRegistry, PropertyStore};
///
/// let mut registry = PropertyRegistry::new();
/// let width = registry.register("Width", PropertyMetadata::new(0.0_f64));
///
/// let mut store = PropertyStore::new(1_u32);
/// store.set(width, Precedence::Styled, 40.0);
/// store.set(width, Precedence::Local, 60.0);
/// assert_eq!(*store.get_own_or_default(width, &registry), 60.0);
///
/// store.clear(width, Precedence::Local);
/// assert_eq!(*store.get_own_or_default(width, &registry), 40.0);
/// ```
#[derive(Clone, Debug)]
pub struct PropertyStore<K> {
    layers: [Layer; 3],
    owner: K,
}

impl<K: Copy + Eq> PropertyStore<K> {
    /// Empty store for `owner`.
    #[must_use]
    pub fn new(owner: K) -> Self {
        Self {
            layers: [Layer::new(), Layer::new(), Layer::new()],
            owner,
        }
    }

    /// Key of the owning element.
    #[must_use]
    #[inline]
    pub fn owner(&self) -> K {
        self.owner
    }

    /// Whether no level holds any value.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layers.iter().all(|layer| layer.is_empty())
    }

    /// Number of distinct properties with at least one stored value.
    #[must_use]
    pub fn len(&self) -> usize {
        let mut ids: Vec<PropertyId> = self
            .layers
            .iter()
            .flat_map(|layer| layer.iter().map(|(id, _)| *id))
            .collect();
        ids.sort_unstable();
        ids.dedup();
        ids.len()
    }

    /// Ids with a value at `precedence`, in id order.
    pub fn ids_at(&self, precedence: Precedence) -> impl Iterator<Item = PropertyId> + '_ {
        self.layers[precedence.slot()].iter().map(|(id, _)| *id)
    }

    #[inline]
    fn find(&self, id: PropertyId, precedence: Precedence) -> Result<usize, usize> {
        self.layers[precedence.slot()].binary_search_by_key(&id, |(pid, _)| *pid)
    }

    /// Stored value at one level, erased.
    #[must_use]
    pub fn get_erased(&self, id: PropertyId, precedence: Precedence) -> Option<&ErasedValue> {
        self.find(id, precedence)
            .ok()
            .map(|idx| &self.layers[precedence.slot()][idx].1)
    }

    /// Stores `value` at one level without type checking.
    ///
    /// Callers validate against the registry first; the notifying helpers in
    /// [`DependencyObjectExt`](crate::DependencyObjectExt) do so.
    pub fn set_erased(&mut self, id: PropertyId, precedence: Precedence, value: ErasedValue) {
        match self.find(id, precedence) {
            Ok(idx) => self.layers[precedence.slot()][idx].1 = value,
            Err(idx) => self.layers[precedence.slot()].insert(idx, (id, value)),
        }
    }

    /// Removes the value at one level, returning it.
    pub fn clear_erased(&mut self, id: PropertyId, precedence: Precedence) -> Option<ErasedValue> {
        self.find(id, precedence)
            .ok()
            .map(|idx| self.layers[precedence.slot()].remove(idx).1)
    }

    /// Stored typed value at one level.
    #[must_use]
    pub fn get<T: 'static>(&self, property: Property<T>, precedence: Precedence) -> Option<&T> {
        self.get_erased(property.id(), precedence)
            .and_then(ErasedValue::downcast_ref)
    }

    /// Stores a typed value at one level, bypassing coercion and notification.
    pub fn set<T: PropertyValue>(&mut self, property: Property<T>, precedence: Precedence, value: T) {
        self.set_erased(property.id(), precedence, ErasedValue::new(value));
    }

    /// Removes a typed value at one level. Returns whether one was stored.
    pub fn clear<T: 'static>(&mut self, property: Property<T>, precedence: Precedence) -> bool {
        self.clear_erased(property.id(), precedence).is_some()
    }

    /// Whether one level holds a value.
    #[must_use]
    pub fn has(&self, id: PropertyId, precedence: Precedence) -> bool {
        self.find(id, precedence).is_ok()
    }

    /// Shorthand for the [`Precedence::Local`] level.
    #[must_use]
    pub fn get_local<T: 'static>(&self, property: Property<T>) -> Option<&T> {
        self.get(property, Precedence::Local)
    }

    /// Shorthand for the [`Precedence::Local`] level.
    pub fn set_local<T: PropertyValue>(&mut self, property: Property<T>, value: T) {
        self.set(property, Precedence::Local, value);
    }

    /// Highest stored level for `id` (animated, then local, then styled).
    #[must_use]
    pub fn own_erased(&self, id: PropertyId) -> Option<(&ErasedValue, ValueSource)> {
        Precedence::ALL
            .iter()
            .rev()
            .find_map(|&p| self.get_erased(id, p).map(|v| (v, ValueSource::from(p))))
    }

    /// Typed form of [`own_erased`](Self::own_erased).
    #[must_use]
    pub fn own<T: 'static>(&self, property: Property<T>) -> Option<(&T, ValueSource)> {
        self.own_erased(property.id())
            .and_then(|(v, source)| v.downcast_ref().map(|v| (v, source)))
    }

    /// Own value or the registry default, ignoring inheritance.
    ///
    /// # Panics
    ///
    /// Panics if `property` is not registered in `registry` with type `T`.
    #[must_use]
    pub fn get_own_or_default<'a, T: 'static>(
        &'a self,
        property: Property<T>,
        registry: &'a PropertyRegistry,
    ) -> &'a T {
        match self.own(property) {
            Some((value, _)) => value,
            None => registry.metadata(property).default_value(),
        }
    }

    /// Drops every value at one level and returns the affected ids.
    pub fn clear_level(&mut self, precedence: Precedence) -> Vec<PropertyId> {
        self.layers[precedence.slot()]
            .drain(..)
            .map(|(id, _)| id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::PropertyMetadata;
    use alloc::vec;

    fn registry() -> (PropertyRegistry, Property<f64>, Property<f64>) {
        let mut registry = PropertyRegistry::new();
        let width = registry.register("Width", PropertyMetadata::new(0.0_f64));
        let height = registry.register("Height", PropertyMetadata::new(5.0_f64));
        (registry, width, height)
    }

    #[test]
    fn layers_are_independent() {
        let (_, width, _) = registry();
        let mut store = PropertyStore::new(0_u32);
        store.set(width, Precedence::Styled, 1.0);
        store.set(width, Precedence::Local, 2.0);
        store.set(width, Precedence::Animated, 3.0);

        assert!(store.clear(width, Precedence::Local));
        assert_eq!(store.get(width, Precedence::Styled), Some(&1.0));
        assert_eq!(store.get(width, Precedence::Animated), Some(&3.0));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn own_value_prefers_highest_level() {
        let (_, width, _) = registry();
        let mut store = PropertyStore::new(0_u32);
        store.set(width, Precedence::Styled, 1.0);
        assert_eq!(store.own(width), Some((&1.0, ValueSource::Styled)));
        store.set(width, Precedence::Animated, 3.0);
        assert_eq!(store.own(width), Some((&3.0, ValueSource::Animated)));
        store.set(width, Precedence::Local, 2.0);
        assert_eq!(store.own(width), Some((&3.0, ValueSource::Animated)));
    }

    #[test]
    fn falls_back_to_default() {
        let (registry, width, height) = registry();
        let store = PropertyStore::new(0_u32);
        assert_eq!(*store.get_own_or_default(width, &registry), 0.0);
        assert_eq!(*store.get_own_or_default(height, &registry), 5.0);
        assert!(store.is_empty());
    }

    #[test]
    fn entries_stay_sorted() {
        let (_, width, height) = registry();
        let mut store = PropertyStore::new(0_u32);
        store.set(height, Precedence::Styled, 1.0);
        store.set(width, Precedence::Styled, 1.0);
        let ids: Vec<_> = store.ids_at(Precedence::Styled).collect();
        assert_eq!(ids, vec![width.id(), height.id()]);
    }

    #[test]
    fn clear_level_reports_ids() {
        let (_, width, height) = registry();
        let mut store = PropertyStore::new(0_u32);
        store.set(width, Precedence::Animated, 1.0);
        store.set(height, Precedence::Animated, 1.0);
        store.set(width, Precedence::Local, 9.0);
        let cleared = store.clear_level(Precedence::Animated);
        assert_eq!(cleared, vec![width.id(), height.id()]);
        assert_eq!(store.own(width), Some((&9.0, ValueSource::Local)));
    }
}

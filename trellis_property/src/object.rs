// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Effective value resolution and notifying writes.
//!
//! Resolution order is animated, local, styled, inherited, default. The
//! inherited tier is the nearest logical ancestor's own stored value, found by
//! walking the parent chain iteratively.

use crate::error::PropertyError;
use crate::id::{Property, PropertyId};
use crate::metadata::PropertyFlags;
use crate::registry::{PropertyRegistration, PropertyRegistry};
use crate::store::{Precedence, PropertyStore, ValueSource};
use crate::value::{ErasedValue, PropertyValue};

/// Maps an element key to its store and logical parent.
pub trait ParentLookup<'a, K: Copy + Eq + 'a> {
    /// Store and parent of `key`, or `None` if the key is gone.
    fn lookup(&self, key: K) -> Option<(&'a PropertyStore<K>, Option<K>)>;
}

impl<'a, K, F> ParentLookup<'a, K> for F
where
    K: Copy + Eq + 'a,
    F: Fn(K) -> Option<(&'a PropertyStore<K>, Option<K>)>,
{
    #[inline]
    fn lookup(&self, key: K) -> Option<(&'a PropertyStore<K>, Option<K>)> {
        self(key)
    }
}

/// Walks from `start` up the parent chain and returns the first own value.
pub fn walk_inherited_erased<'a, K, F>(
    mut current: Option<K>,
    id: PropertyId,
    lookup: &F,
) -> Option<&'a ErasedValue>
where
    K: Copy + Eq + 'a,
    F: ParentLookup<'a, K> + ?Sized,
{
    while let Some(key) = current {
        let (store, parent) = lookup.lookup(key)?;
        if let Some((value, _)) = store.own_erased(id) {
            return Some(value);
        }
        current = parent;
    }
    None
}

/// Typed form of [`walk_inherited_erased`].
pub fn walk_inherited<'a, K, T, F>(
    current: Option<K>,
    property: Property<T>,
    lookup: &F,
) -> Option<&'a T>
where
    K: Copy + Eq + 'a,
    T: 'static,
    F: ParentLookup<'a, K> + ?Sized,
{
    walk_inherited_erased(current, property.id(), lookup).and_then(ErasedValue::downcast_ref)
}

/// Result of a write that changed the effective value.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PropertyChange {
    /// Which property changed.
    pub property: PropertyId,
    /// Its behavior flags, for invalidation.
    pub flags: PropertyFlags,
}

/// Anything that owns a [`PropertyStore`].
pub trait DependencyObject<K: Copy + Eq> {
    /// The element's store.
    fn property_store(&self) -> &PropertyStore<K>;

    /// The element's store, mutably.
    fn property_store_mut(&mut self) -> &mut PropertyStore<K>;

    /// Logical parent used for inheritance.
    fn parent_key(&self) -> Option<K>;
}

/// Resolution and notifying writes for every [`DependencyObject`].
///
/// Writers pass the already-resolved inherited value instead of a parent
/// lookup so the store can be borrowed mutably while the parents live in the
/// same arena.
pub trait DependencyObjectExt<K: Copy + Eq>: DependencyObject<K> {
    /// Effective erased value and its source.
    fn resolve_erased<'a>(
        &'a self,
        registration: &PropertyRegistration,
        id: PropertyId,
        inherited: Option<&'a ErasedValue>,
    ) -> (ResolvedValue<'a>, ValueSource)
    where
        K: 'a,
    {
        if let Some((value, source)) = self.property_store().own_erased(id) {
            return (ResolvedValue::Borrowed(value), source);
        }
        if registration.inherits()
            && let Some(value) = inherited
        {
            return (ResolvedValue::Borrowed(value), ValueSource::Inherited);
        }
        (
            ResolvedValue::Owned(registration.default_value()),
            ValueSource::Default,
        )
    }

    /// Effective typed value, walking logical ancestors when the property
    /// inherits.
    ///
    /// # Panics
    ///
    /// Panics if `property` is not registered in `registry` with type `T`.
    fn get_value<'a, T, F>(
        &'a self,
        property: Property<T>,
        registry: &'a PropertyRegistry,
        lookup: &F,
    ) -> &'a T
    where
        K: 'a,
        T: 'static,
        F: ParentLookup<'a, K> + ?Sized,
    {
        if let Some((value, _)) = self.property_store().own(property) {
            return value;
        }
        let metadata = registry.metadata(property);
        if metadata.inherits()
            && let Some(value) = walk_inherited(self.parent_key(), property, lookup)
        {
            return value;
        }
        metadata.default_value()
    }

    /// Which tier currently supplies `id`.
    fn value_source<'a, F>(
        &'a self,
        registry: &PropertyRegistry,
        id: PropertyId,
        lookup: &F,
    ) -> ValueSource
    where
        K: 'a,
        F: ParentLookup<'a, K> + ?Sized,
    {
        if let Some((_, source)) = self.property_store().own_erased(id) {
            return source;
        }
        if registry.inherits(id) && walk_inherited_erased(self.parent_key(), id, lookup).is_some() {
            return ValueSource::Inherited;
        }
        ValueSource::Default
    }

    /// Writes (`Some`) or clears (`None`) one level and reports whether the
    /// effective value changed.
    ///
    /// Values are type-checked and coerced first. The change callback runs at
    /// most once, and only when the effective value actually differs.
    fn write_erased(
        &mut self,
        registry: &PropertyRegistry,
        id: PropertyId,
        precedence: Precedence,
        value: Option<ErasedValue>,
        inherited: Option<&ErasedValue>,
    ) -> Result<Option<PropertyChange>, PropertyError> {
        let registration = registry.get(id).ok_or(PropertyError::Unregistered(id))?;
        let value = value.map(|v| registration.coerce(v)).transpose()?;

        let before = self.resolve_erased(registration, id, inherited).0.into_owned();
        match value {
            Some(value) => self.property_store_mut().set_erased(id, precedence, value),
            None => {
                if self.property_store_mut().clear_erased(id, precedence).is_none() {
                    return Ok(None);
                }
            }
        }
        let (after, _) = self.resolve_erased(registration, id, inherited);
        if before.value_eq(after.value()) {
            return Ok(None);
        }
        registration.notify_changed(&before, after.value());
        tracing::trace!(property = registration.name(), ?precedence, "effective value changed");
        Ok(Some(PropertyChange {
            property: id,
            flags: registration.flags(),
        }))
    }

    /// Typed, notifying write at one level.
    ///
    /// # Panics
    ///
    /// Panics if `property` is not registered in `registry` with type `T`.
    fn set_value_notifying<T: PropertyValue>(
        &mut self,
        registry: &PropertyRegistry,
        property: Property<T>,
        precedence: Precedence,
        value: T,
        inherited: Option<&ErasedValue>,
    ) -> Option<PropertyChange> {
        match self.write_erased(
            registry,
            property.id(),
            precedence,
            Some(ErasedValue::new(value)),
            inherited,
        ) {
            Ok(change) => change,
            Err(err) => panic!("{err}"),
        }
    }

    /// Typed, notifying clear of one level.
    fn clear_value_notifying<T: 'static>(
        &mut self,
        registry: &PropertyRegistry,
        property: Property<T>,
        precedence: Precedence,
        inherited: Option<&ErasedValue>,
    ) -> Option<PropertyChange> {
        self.write_erased(registry, property.id(), precedence, None, inherited)
            .ok()
            .flatten()
    }
}

impl<K: Copy + Eq, D: DependencyObject<K> + ?Sized> DependencyObjectExt<K> for D {}

/// An effective value that is either stored or a fresh default.
#[derive(Debug)]
pub enum ResolvedValue<'a> {
    /// Borrowed from a store.
    Borrowed(&'a ErasedValue),
    /// Materialized default.
    Owned(ErasedValue),
}

impl ResolvedValue<'_> {
    /// Borrows the value.
    #[must_use]
    pub fn value(&self) -> &ErasedValue {
        match self {
            Self::Borrowed(value) => value,
            Self::Owned(value) => value,
        }
    }

    /// Clones out of the store if needed.
    #[must_use]
    pub fn into_owned(self) -> ErasedValue {
        match self {
            Self::Borrowed(value) => value.clone(),
            Self::Owned(value) => value,
        }
    }
}

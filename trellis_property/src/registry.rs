// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Registration table for property descriptors.
//!
//! A [`PropertyRegistry`] is filled once during startup and then shared
//! read-only; the embedding view takes ownership of it so nothing can be
//! registered after elements exist.

use alloc::borrow::ToOwned;
use alloc::boxed::Box;
use alloc::vec::Vec;
use core::any::{Any, TypeId};

use hashbrown::HashMap;

use crate::error::PropertyError;
use crate::id::{Property, PropertyId};
use crate::metadata::{PropertyFlags, PropertyMetadata};
use crate::value::{ErasedValue, PropertyValue};

/// One row of the registry.
pub struct PropertyRegistration {
    name: &'static str,
    type_id: TypeId,
    type_name: &'static str,
    metadata: Box<dyn ErasedMetadata>,
}

impl PropertyRegistration {
    /// Canonical property name.
    #[must_use]
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Declaring element type.
    #[must_use]
    #[inline]
    pub fn owner(&self) -> &'static str {
        self.metadata.owner()
    }

    /// Style alias, if one was given.
    #[must_use]
    #[inline]
    pub fn style_name(&self) -> Option<&'static str> {
        self.metadata.style_name()
    }

    /// Value type.
    #[must_use]
    #[inline]
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Value type name, for diagnostics.
    #[must_use]
    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Behavior flags.
    #[must_use]
    #[inline]
    pub fn flags(&self) -> PropertyFlags {
        self.metadata.flags()
    }

    /// Whether the property inherits.
    #[must_use]
    #[inline]
    pub fn inherits(&self) -> bool {
        self.metadata.flags().contains(PropertyFlags::INHERITS)
    }

    /// A fresh copy of the default value.
    #[must_use]
    pub fn default_value(&self) -> ErasedValue {
        self.metadata.default_erased()
    }

    /// Parses style text into a value of the registered type.
    pub fn parse(&self, text: &str) -> Result<ErasedValue, PropertyError> {
        self.metadata
            .parse_erased(text)
            .ok_or_else(|| PropertyError::Unparseable {
                property: self.name,
                text: text.to_owned(),
            })
    }

    /// Checks that `value` has the registered type and runs coercion.
    pub fn coerce(&self, value: ErasedValue) -> Result<ErasedValue, PropertyError> {
        if value.type_id() != self.type_id {
            return Err(PropertyError::TypeMismatch {
                property: self.name,
                expected: self.type_name,
            });
        }
        Ok(self.metadata.coerce_erased(value))
    }

    /// Runs the change callback with erased arguments.
    pub fn notify_changed(&self, old_value: &ErasedValue, new_value: &ErasedValue) {
        self.metadata.notify_erased(old_value, new_value);
    }

    fn metadata<T: 'static>(&self) -> Option<&PropertyMetadata<T>> {
        self.metadata.as_any().downcast_ref()
    }
}

impl core::fmt::Debug for PropertyRegistration {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PropertyRegistration")
            .field("name", &self.name)
            .field("owner", &self.owner())
            .field("style_name", &self.style_name())
            .field("type", &self.type_name)
            .field("flags", &self.flags())
            .finish_non_exhaustive()
    }
}

/// Table of registered properties.
///
/// ```rust
/// use trellis_property::{PropertyFlags, PropertyMetadataBuilder, PropertyRegistry};
///
/// let mut registry = PropertyRegistry::new();
/// let halign = registry.register(
///     "HorizontalAlignment",
///     PropertyMetadataBuilder::new(0_u8)
///         .style_name("halign")
///         .flags(PropertyFlags::AFFECTS_ARRANGE)
///         .build(),
/// );
///
/// assert_eq!(registry.by_style_name("halign"), Some(halign.id()));
/// assert_eq!(registry.by_style_name("horizontal-alignment"), Some(halign.id()));
/// ```
#[derive(Default)]
pub struct PropertyRegistry {
    properties: Vec<PropertyRegistration>,
    by_name: HashMap<&'static str, PropertyId>,
    by_style_name: HashMap<alloc::string::String, PropertyId>,
}

impl PropertyRegistry {
    /// Empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a property.
    ///
    /// # Panics
    ///
    /// Panics if the name is taken; use [`try_register`](Self::try_register)
    /// to handle that case.
    pub fn register<T: PropertyValue>(
        &mut self,
        name: &'static str,
        metadata: PropertyMetadata<T>,
    ) -> Property<T> {
        match self.try_register(name, metadata) {
            Ok(property) => property,
            Err(err) => panic!("{err}"),
        }
    }

    /// Registers a property, failing on duplicate names or aliases.
    pub fn try_register<T: PropertyValue>(
        &mut self,
        name: &'static str,
        metadata: PropertyMetadata<T>,
    ) -> Result<Property<T>, PropertyError> {
        if self.by_name.contains_key(name) {
            return Err(PropertyError::DuplicateName { name });
        }
        let kebab = kebab_case(name);
        let alias = metadata.style_name();
        if let Some(alias) = alias
            && self.by_style_name.contains_key(alias)
        {
            return Err(PropertyError::DuplicateName { name: alias });
        }
        let index =
            u16::try_from(self.properties.len()).map_err(|_| PropertyError::TooManyProperties)?;
        if index == u16::MAX {
            return Err(PropertyError::TooManyProperties);
        }
        let id = PropertyId::new(index);

        self.properties.push(PropertyRegistration {
            name,
            type_id: TypeId::of::<T>(),
            type_name: core::any::type_name::<T>(),
            metadata: Box::new(metadata),
        });
        self.by_name.insert(name, id);
        self.by_style_name.entry(kebab).or_insert(id);
        if let Some(alias) = alias {
            self.by_style_name.insert(alias.to_owned(), id);
        }
        tracing::trace!(name, %id, "registered property");
        Ok(Property::from_id(id))
    }

    /// Number of registered properties.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// Whether nothing is registered.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Looks up a property by canonical name.
    #[must_use]
    pub fn by_name(&self, name: &str) -> Option<PropertyId> {
        self.by_name.get(name).copied()
    }

    /// Looks up a property the way style declarations name it.
    ///
    /// Accepts the registered alias, the kebab-case form of the canonical name
    /// (`min-width` for `MinWidth`) and the canonical name itself.
    #[must_use]
    pub fn by_style_name(&self, name: &str) -> Option<PropertyId> {
        self.by_style_name
            .get(name)
            .copied()
            .or_else(|| self.by_name(name))
    }

    /// Canonical name of `id`.
    #[must_use]
    pub fn name(&self, id: PropertyId) -> Option<&'static str> {
        self.get(id).map(PropertyRegistration::name)
    }

    /// Registration row for `id`.
    #[must_use]
    pub fn get(&self, id: PropertyId) -> Option<&PropertyRegistration> {
        self.properties.get(usize::from(id.index()))
    }

    /// Behavior flags of `id`; empty for unknown ids.
    #[must_use]
    pub fn flags(&self, id: PropertyId) -> PropertyFlags {
        self.get(id).map(PropertyRegistration::flags).unwrap_or_default()
    }

    /// Whether `id` inherits.
    #[must_use]
    pub fn inherits(&self, id: PropertyId) -> bool {
        self.get(id).is_some_and(PropertyRegistration::inherits)
    }

    /// Typed metadata for `property`.
    #[must_use]
    pub fn get_metadata<T: 'static>(&self, property: Property<T>) -> Option<&PropertyMetadata<T>> {
        self.get(property.id()).and_then(PropertyRegistration::metadata)
    }

    /// Typed metadata, panicking when `property` is foreign to this registry.
    ///
    /// # Panics
    ///
    /// Panics if the handle was not produced by this registry with type `T`.
    #[must_use]
    pub fn metadata<T: 'static>(&self, property: Property<T>) -> &PropertyMetadata<T> {
        match self.get_metadata(property) {
            Some(metadata) => metadata,
            None => panic!(
                "{} is not registered with type {}",
                property.id(),
                core::any::type_name::<T>()
            ),
        }
    }

    /// All registrations in id order.
    pub fn iter(&self) -> impl Iterator<Item = (PropertyId, &PropertyRegistration)> {
        self.properties.iter().enumerate().map(|(i, r)| {
            #[expect(clippy::cast_possible_truncation, reason = "index < len < u16::MAX")]
            (PropertyId::new(i as u16), r)
        })
    }
}

impl core::fmt::Debug for PropertyRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PropertyRegistry")
            .field("count", &self.properties.len())
            .field(
                "properties",
                &self.properties.iter().map(|r| r.name).collect::<Vec<_>>(),
            )
            .finish()
    }
}

/// `MinWidth` → `min-width`.
fn kebab_case(name: &str) -> alloc::string::String {
    let mut out = alloc::string::String::with_capacity(name.len() + 4);
    for (i, ch) in name.char_indices() {
        if ch.is_ascii_uppercase() {
            if i != 0 {
                out.push('-');
            }
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

trait ErasedMetadata: Any {
    fn as_any(&self) -> &dyn Any;
    fn flags(&self) -> PropertyFlags;
    fn owner(&self) -> &'static str;
    fn style_name(&self) -> Option<&'static str>;
    fn default_erased(&self) -> ErasedValue;
    fn parse_erased(&self, text: &str) -> Option<ErasedValue>;
    fn coerce_erased(&self, value: ErasedValue) -> ErasedValue;
    fn notify_erased(&self, old_value: &ErasedValue, new_value: &ErasedValue);
}

impl<T: PropertyValue> ErasedMetadata for PropertyMetadata<T> {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn flags(&self) -> PropertyFlags {
        Self::flags(self)
    }

    fn owner(&self) -> &'static str {
        Self::owner(self)
    }

    fn style_name(&self) -> Option<&'static str> {
        Self::style_name(self)
    }

    fn default_erased(&self) -> ErasedValue {
        ErasedValue::new(self.default_value().clone())
    }

    fn parse_erased(&self, text: &str) -> Option<ErasedValue> {
        self.parse(text).map(|v| ErasedValue::new(self.coerce(v)))
    }

    fn coerce_erased(&self, value: ErasedValue) -> ErasedValue {
        match value.downcast::<T>() {
            Ok(v) => ErasedValue::new(self.coerce(v)),
            Err(value) => value,
        }
    }

    fn notify_erased(&self, old_value: &ErasedValue, new_value: &ErasedValue) {
        if let (Some(old), Some(new)) = (old_value.downcast_ref(), new_value.downcast_ref()) {
            self.notify_changed(old, new);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::PropertyMetadataBuilder;
    use alloc::vec;

    #[test]
    fn ids_are_dense() {
        let mut registry = PropertyRegistry::new();
        let a = registry.register("Width", PropertyMetadata::new(0.0_f64));
        let b = registry.register("Height", PropertyMetadata::new(0.0_f64));
        assert_eq!((a.id().index(), b.id().index()), (0, 1));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn duplicate_name_is_an_error() {
        let mut registry = PropertyRegistry::new();
        registry.register("Width", PropertyMetadata::new(0.0_f64));
        let err = registry
            .try_register("Width", PropertyMetadata::new(1.0_f64))
            .unwrap_err();
        assert_eq!(err, PropertyError::DuplicateName { name: "Width" });
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn duplicate_alias_is_an_error() {
        let mut registry = PropertyRegistry::new();
        registry.register(
            "Foreground",
            PropertyMetadataBuilder::new(0_u32).style_name("color").build(),
        );
        let err = registry
            .try_register(
                "TextColor",
                PropertyMetadataBuilder::new(0_u32).style_name("color").build(),
            )
            .unwrap_err();
        assert_eq!(err, PropertyError::DuplicateName { name: "color" });
    }

    #[test]
    #[should_panic(expected = "already registered")]
    fn register_panics_on_duplicate() {
        let mut registry = PropertyRegistry::new();
        registry.register("Width", PropertyMetadata::new(0.0_f64));
        registry.register("Width", PropertyMetadata::new(0.0_f64));
    }

    #[test]
    fn style_lookup_accepts_kebab_case_and_alias() {
        let mut registry = PropertyRegistry::new();
        let min_width = registry.register("MinWidth", PropertyMetadata::new(0.0_f64));
        let halign = registry.register(
            "HorizontalAlignment",
            PropertyMetadataBuilder::new(0_u8).style_name("halign").build(),
        );
        assert_eq!(registry.by_style_name("min-width"), Some(min_width.id()));
        assert_eq!(registry.by_style_name("MinWidth"), Some(min_width.id()));
        assert_eq!(registry.by_style_name("halign"), Some(halign.id()));
        assert_eq!(registry.by_style_name("valign"), None);
    }

    #[test]
    fn erased_parse_and_coerce() {
        let mut registry = PropertyRegistry::new();
        let opacity = registry.register(
            "Opacity",
            PropertyMetadataBuilder::new(1.0_f64)
                .coerce(|v| v.clamp(0.0, 1.0))
                .parse_with(|s| s.parse().ok())
                .build(),
        );
        let row = registry.get(opacity.id()).unwrap();
        assert_eq!(row.parse("3").unwrap().downcast_ref::<f64>(), Some(&1.0));
        assert!(matches!(
            row.parse("opaque"),
            Err(PropertyError::Unparseable { .. })
        ));
        assert!(matches!(
            row.coerce(ErasedValue::new(1_i32)),
            Err(PropertyError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn iter_preserves_order() {
        let mut registry = PropertyRegistry::new();
        registry.register("Width", PropertyMetadata::new(0.0_f64));
        registry.register("Height", PropertyMetadata::new(0.0_f64));
        let names: Vec<_> = registry.iter().map(|(_, r)| r.name()).collect();
        assert_eq!(names, vec!["Width", "Height"]);
    }

    #[test]
    fn kebab_case_conversion() {
        assert_eq!(kebab_case("HorizontalAlignment"), "horizontal-alignment");
        assert_eq!(kebab_case("Width"), "width");
    }
}

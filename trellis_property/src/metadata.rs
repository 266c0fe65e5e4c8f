// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property descriptors: default value, behavior flags and callbacks.

use alloc::boxed::Box;
use core::fmt;

use bitflags::bitflags;

bitflags! {
    /// What a change to a property invalidates.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub struct PropertyFlags: u8 {
        /// Desired size must be recomputed.
        const AFFECTS_MEASURE = 1 << 0;
        /// Final placement must be recomputed.
        const AFFECTS_ARRANGE = 1 << 1;
        /// Only the drawn output changes.
        const AFFECTS_RENDER = 1 << 2;
        /// Unset values fall back to the nearest logical ancestor.
        const INHERITS = 1 << 3;
    }
}

/// Invoked with `(old, new)` whenever the effective value changes.
pub type PropertyChangedCallback<T> = Box<dyn Fn(&T, &T)>;

/// Maps a proposed value to the value actually stored.
pub type CoerceValueCallback<T> = Box<dyn Fn(T) -> T>;

/// Converts style text such as `"12"` or `"red"` into a typed value.
pub type StyleParser<T> = fn(&str) -> Option<T>;

/// Configuration of one registered property.
///
/// ```rust
/// use trellis_property::{PropertyFlags, PropertyMetadataBuilder};
///
/// let metadata = PropertyMetadataBuilder::new(f64::NAN)
///     .owner("FrameworkElement")
///     .flags(PropertyFlags::AFFECTS_MEASURE)
///     .parse_with(|text| text.trim().parse().ok())
///     .build();
///
/// assert!(metadata.default_value().is_nan());
/// assert_eq!(metadata.parse("12"), Some(12.0));
/// ```
pub struct PropertyMetadata<T: 'static> {
    default_value: T,
    flags: PropertyFlags,
    owner: &'static str,
    style_name: Option<&'static str>,
    changed_callback: Option<PropertyChangedCallback<T>>,
    coerce_callback: Option<CoerceValueCallback<T>>,
    parser: Option<StyleParser<T>>,
}

impl<T: 'static> PropertyMetadata<T> {
    /// Metadata with no flags, owner or callbacks.
    #[must_use]
    pub fn new(default_value: T) -> Self {
        PropertyMetadataBuilder::new(default_value).build()
    }

    /// Value reported when no layer is set.
    #[must_use]
    #[inline]
    pub fn default_value(&self) -> &T {
        &self.default_value
    }

    /// Behavior flags.
    #[must_use]
    #[inline]
    pub fn flags(&self) -> PropertyFlags {
        self.flags
    }

    /// Whether unset values inherit from logical ancestors.
    #[must_use]
    #[inline]
    pub fn inherits(&self) -> bool {
        self.flags.contains(PropertyFlags::INHERITS)
    }

    /// Name of the element type that declared the property.
    #[must_use]
    #[inline]
    pub fn owner(&self) -> &'static str {
        self.owner
    }

    /// Alternate name accepted in style declarations.
    #[must_use]
    #[inline]
    pub fn style_name(&self) -> Option<&'static str> {
        self.style_name
    }

    /// Runs the change callback, if any.
    #[inline]
    pub fn notify_changed(&self, old_value: &T, new_value: &T) {
        if let Some(callback) = &self.changed_callback {
            callback(old_value, new_value);
        }
    }

    /// Applies the coercion callback, if any.
    #[inline]
    pub fn coerce(&self, value: T) -> T {
        match &self.coerce_callback {
            Some(callback) => callback(value),
            None => value,
        }
    }

    /// Parses style text with the registered parser.
    #[must_use]
    pub fn parse(&self, text: &str) -> Option<T> {
        self.parser.and_then(|parse| parse(text))
    }

    /// Whether a change callback is registered.
    #[must_use]
    #[inline]
    pub fn has_changed_callback(&self) -> bool {
        self.changed_callback.is_some()
    }
}

impl<T: fmt::Debug + 'static> fmt::Debug for PropertyMetadata<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyMetadata")
            .field("default_value", &self.default_value)
            .field("flags", &self.flags)
            .field("owner", &self.owner)
            .field("style_name", &self.style_name)
            .field("has_changed_callback", &self.changed_callback.is_some())
            .field("has_coerce_callback", &self.coerce_callback.is_some())
            .field("has_parser", &self.parser.is_some())
            .finish()
    }
}

/// Builder for [`PropertyMetadata`].
pub struct PropertyMetadataBuilder<T: 'static> {
    metadata: PropertyMetadata<T>,
}

impl<T: 'static> PropertyMetadataBuilder<T> {
    /// Starts a descriptor with the given default.
    #[must_use]
    pub fn new(default_value: T) -> Self {
        Self {
            metadata: PropertyMetadata {
                default_value,
                flags: PropertyFlags::empty(),
                owner: "",
                style_name: None,
                changed_callback: None,
                coerce_callback: None,
                parser: None,
            },
        }
    }

    /// Replaces the behavior flags.
    #[must_use]
    pub fn flags(mut self, flags: PropertyFlags) -> Self {
        self.metadata.flags = flags;
        self
    }

    /// Toggles [`PropertyFlags::INHERITS`].
    #[must_use]
    pub fn inherits(mut self, inherits: bool) -> Self {
        self.metadata.flags.set(PropertyFlags::INHERITS, inherits);
        self
    }

    /// Records the declaring element type.
    #[must_use]
    pub fn owner(mut self, owner: &'static str) -> Self {
        self.metadata.owner = owner;
        self
    }

    /// Sets the alias used by style declarations (`halign` for
    /// `HorizontalAlignment`, for example).
    #[must_use]
    pub fn style_name(mut self, name: &'static str) -> Self {
        self.metadata.style_name = Some(name);
        self
    }

    /// Registers the change callback.
    #[must_use]
    pub fn on_changed<F>(mut self, callback: F) -> Self
    where
        F: Fn(&T, &T) + 'static,
    {
        self.metadata.changed_callback = Some(Box::new(callback));
        self
    }

    /// Registers a coercion callback.
    #[must_use]
    pub fn coerce<F>(mut self, callback: F) -> Self
    where
        F: Fn(T) -> T + 'static,
    {
        self.metadata.coerce_callback = Some(Box::new(callback));
        self
    }

    /// Registers the parser used for textual style values.
    #[must_use]
    pub fn parse_with(mut self, parser: StyleParser<T>) -> Self {
        self.metadata.parser = Some(parser);
        self
    }

    /// Finishes the descriptor.
    #[must_use]
    pub fn build(self) -> PropertyMetadata<T> {
        self.metadata
    }
}

impl<T: fmt::Debug + 'static> fmt::Debug for PropertyMetadataBuilder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PropertyMetadataBuilder")
            .field(&self.metadata)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use core::cell::Cell;

    #[test]
    fn defaults_are_empty() {
        let metadata = PropertyMetadata::new(0_i32);
        assert!(metadata.flags().is_empty());
        assert!(!metadata.inherits());
        assert_eq!(metadata.style_name(), None);
        assert_eq!(metadata.parse("1"), None);
    }

    #[test]
    fn inherits_toggles_flag_only() {
        let metadata = PropertyMetadataBuilder::new(12.0_f64)
            .flags(PropertyFlags::AFFECTS_MEASURE)
            .inherits(true)
            .build();
        assert!(metadata.inherits());
        assert!(metadata.flags().contains(PropertyFlags::AFFECTS_MEASURE));
    }

    #[test]
    fn coerce_clamps() {
        let metadata = PropertyMetadataBuilder::new(1.0_f64)
            .coerce(|v| v.clamp(0.0, 1.0))
            .build();
        assert_eq!(metadata.coerce(4.0), 1.0);
        assert_eq!(metadata.coerce(-4.0), 0.0);
    }

    #[test]
    fn changed_callback_receives_old_and_new() {
        let seen = Rc::new(Cell::new((0, 0)));
        let sink = seen.clone();
        let metadata = PropertyMetadataBuilder::new(0_i32)
            .on_changed(move |old, new| sink.set((*old, *new)))
            .build();
        metadata.notify_changed(&1, &2);
        assert_eq!(seen.get(), (1, 2));
    }
}

// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Named resources shared across a view.

use alloc::rc::Rc;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use trellis_property::{ErasedValue, PropertyValue};

use crate::rule::{Declaration, DeclaredValue};

/// Resources declared by the stylesheet's `View` rules.
///
/// Immutable and cheap to clone. Entries are kept sorted by name; a name
/// declared twice keeps the last value.
///
/// ```rust
/// use trellis_style::ResourceDictionaryBuilder;
///
/// let resources = ResourceDictionaryBuilder::new()
///     .text("accent", "#0078d4")
///     .value("corner", 4.0_f64)
///     .build();
///
/// assert_eq!(resources.get_text("accent"), Some("#0078d4"));
/// assert_eq!(resources.get::<f64>("corner"), Some(&4.0));
/// assert!(resources.get::<f64>("missing").is_none());
/// ```
#[derive(Clone, Debug, Default)]
pub struct ResourceDictionary {
    inner: Rc<Vec<(String, DeclaredValue)>>,
}

impl ResourceDictionary {
    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Whether there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    fn find(&self, name: &str) -> Option<&DeclaredValue> {
        self.inner
            .binary_search_by(|(k, _)| k.as_str().cmp(name))
            .ok()
            .map(|idx| &self.inner[idx].1)
    }

    /// Whether `name` is present.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    /// The raw declared value.
    #[must_use]
    pub fn declared(&self, name: &str) -> Option<&DeclaredValue> {
        self.find(name)
    }

    /// A typed resource. `None` when missing, textual or of another type.
    #[must_use]
    pub fn get<T: 'static>(&self, name: &str) -> Option<&T> {
        match self.find(name)? {
            DeclaredValue::Value(value) => value.downcast_ref(),
            DeclaredValue::Text(_) => None,
        }
    }

    /// A textual resource.
    #[must_use]
    pub fn get_text(&self, name: &str) -> Option<&str> {
        match self.find(name)? {
            DeclaredValue::Text(text) => Some(text),
            DeclaredValue::Value(_) => None,
        }
    }

    /// Entries in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &DeclaredValue)> + '_ {
        self.inner.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Builder for [`ResourceDictionary`].
#[derive(Debug, Default)]
pub struct ResourceDictionaryBuilder {
    entries: Vec<(String, DeclaredValue)>,
}

impl ResourceDictionaryBuilder {
    /// Empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a textual resource.
    #[must_use]
    pub fn text(mut self, name: &str, text: &str) -> Self {
        self.push(name.to_string(), DeclaredValue::Text(text.to_string()));
        self
    }

    /// Adds a typed resource.
    #[must_use]
    pub fn value<T: PropertyValue>(mut self, name: &str, value: T) -> Self {
        self.push(name.to_string(), DeclaredValue::Value(ErasedValue::new(value)));
        self
    }

    /// Adds every setter of `declarations`; transitions are ignored.
    pub fn extend<'a>(&mut self, declarations: impl IntoIterator<Item = &'a Declaration>) {
        for declaration in declarations {
            if let Declaration::Setter { property, value } = declaration {
                self.push(property.clone(), value.clone());
            }
        }
    }

    fn push(&mut self, name: String, value: DeclaredValue) {
        match self.entries.binary_search_by(|(k, _)| k.cmp(&name)) {
            Ok(idx) => self.entries[idx].1 = value,
            Err(idx) => self.entries.insert(idx, (name, value)),
        }
    }

    /// Finishes the dictionary.
    #[must_use]
    pub fn build(self) -> ResourceDictionary {
        ResourceDictionary {
            inner: Rc::new(self.entries),
        }
    }
}

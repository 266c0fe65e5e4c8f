// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Property: reactive property storage with layered precedence.
//!
//! Every element owns a sparse [`PropertyStore`]. A property's effective value
//! is resolved through five tiers, highest first:
//!
//! | Tier | Stored | Written by |
//! |------|--------|------------|
//! | Animated | yes | running storyboards |
//! | Local | yes | application code |
//! | Styled | yes | the style cascade |
//! | Inherited | no | nearest logical ancestor (only for [`PropertyFlags::INHERITS`]) |
//! | Default | no | the [`PropertyRegistry`] |
//!
//! Writing one tier never touches the others, so clearing a local value
//! exposes whatever the cascade set underneath it.
//!
//! ## Change notification
//!
//! [`DependencyObjectExt::write_erased`] and its typed wrappers compare the
//! effective value before and after the write. Only a real change runs the
//! descriptor's change callback and yields a [`PropertyChange`] carrying the
//! property's [`PropertyFlags`], which the caller turns into layout or render
//! invalidation.
//!
//! ```rust
//! use trellis_property::{
//!     DependencyObject, DependencyObjectExt, Precedence, PropertyFlags,
//!     PropertyMetadataBuilder, PropertyRegistry, PropertyStore,
//! };
//!
//! struct Label {
//!     store: PropertyStore<u32>,
//! }
//!
//! impl DependencyObject<u32> for Label {
//!     fn property_store(&self) -> &PropertyStore<u32> { &self.store }
//!     fn property_store_mut(&mut self) -> &mut PropertyStore<u32> { &mut self.store }
//!     fn parent_key(&self) -> Option<u32> { None }
//! }
//!
//! let mut registry = PropertyRegistry::new();
//! let width = registry.register(
//!     "Width",
//!     PropertyMetadataBuilder::new(f64::NAN)
//!         .flags(PropertyFlags::AFFECTS_MEASURE)
//!         .build(),
//! );
//!
//! let mut label = Label { store: PropertyStore::new(7) };
//! let change = label.set_value_notifying(&registry, width, Precedence::Local, 120.0, None);
//! assert!(change.is_some_and(|c| c.flags.contains(PropertyFlags::AFFECTS_MEASURE)));
//!
//! // Writing the same value again is silent.
//! assert!(label.set_value_notifying(&registry, width, Precedence::Local, 120.0, None).is_none());
//! ```
//!
//! ## `no_std` Support
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod error;
mod id;
mod metadata;
mod object;
mod registry;
mod store;
mod value;

pub use error::PropertyError;
pub use id::{Property, PropertyId};
pub use metadata::{
    CoerceValueCallback, PropertyChangedCallback, PropertyFlags, PropertyMetadata,
    PropertyMetadataBuilder, StyleParser,
};
pub use object::{
    DependencyObject, DependencyObjectExt, ParentLookup, PropertyChange, ResolvedValue,
    walk_inherited, walk_inherited_erased,
};
pub use registry::{PropertyRegistration, PropertyRegistry};
pub use store::{Precedence, PropertyStore, ValueSource};
pub use value::{ErasedValue, PropertyValue};
